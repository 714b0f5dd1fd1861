//! Mensajes para el usuario según el resultado de cada proceso

use crate::error::ReportError;
use crate::normalizer::NormalizeReport;
use crate::orders::OrdersReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Notificación que la interfaz muestra en un cuadro de mensaje
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.into(),
        }
    }

    pub fn no_file_selected() -> Self {
        Self::new(NoticeLevel::Warning, "Sin archivo", "Primero selecciona un archivo CSV.")
    }

    pub fn normalized(report: &NormalizeReport) -> Self {
        Self::new(
            NoticeLevel::Info,
            "Proceso completado",
            format!(
                "✅ Archivo procesado y guardado en:\n{}\n\n📊 Total de filas procesadas: {}",
                report.output_path.display(),
                report.rows_written
            ),
        )
    }

    pub fn orders(report: &OrdersReport) -> Self {
        let mut message = format!(
            "Archivo generado:\n{}\n\nTotal general: C$ {:.2}",
            report.output_path.display(),
            report.total
        );
        if report.unknown_prices > 0 {
            message.push_str(&format!("\n\n⚠️ {} artículos sin precio conocido", report.unknown_prices));
        }
        Self::new(NoticeLevel::Info, "Proceso completado", message)
    }

    pub fn from_error(err: &ReportError) -> Self {
        match err {
            ReportError::EmptyInput { file } => {
                Self::new(NoticeLevel::Warning, "Archivo vacío", format!("⚠️ El archivo {} está vacío.", file))
            }
            ReportError::EmptyResult => Self::new(NoticeLevel::Warning, "Sin datos", err.to_string()),
            ReportError::MissingColumn(_) => Self::new(
                NoticeLevel::Error,
                "Error",
                format!("{}\nVerificá que el archivo sea el orderDetails original de PedidosYa.", err),
            ),
            ReportError::UnsupportedFileType(_) => Self::new(NoticeLevel::Error, "Error", err.to_string()),
            ReportError::Save { path, .. } if is_excel(path) => {
                Self::new(NoticeLevel::Error, "Error al guardar el Excel", err.to_string())
            }
            ReportError::Save { .. } => {
                Self::new(NoticeLevel::Error, "Error al guardar el archivo", err.to_string())
            }
            ReportError::PriceList(_) => Self::new(NoticeLevel::Error, "Lista de precios", err.to_string()),
            ReportError::Io(_) | ReportError::Csv(_) | ReportError::Spreadsheet(_) => {
                Self::new(NoticeLevel::Error, "Error al leer el archivo", err.to_string())
            }
        }
    }
}

fn is_excel(path: &std::path::Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("xlsx"))
}
