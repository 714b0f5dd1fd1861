//! Definición de errores del procesamiento de reportes

use std::path::PathBuf;
use thiserror::Error;

/// Errores que puede reportar cualquiera de los dos procesos
#[derive(Debug, Error)]
pub enum ReportError {
    /// El archivo de entrada no tiene ninguna fila
    #[error("El archivo {file} está vacío.")]
    EmptyInput { file: String },

    /// Falta una columna obligatoria
    #[error("En el archivo falta la columna: '{0}'.")]
    MissingColumn(String),

    /// No se obtuvo ningún artículo
    #[error("No se encontraron artículos para procesar en este archivo.")]
    EmptyResult,

    #[error("Tipo de archivo no soportado: {0}")]
    UnsupportedFileType(String),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error de CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Error de lectura de calamine
    #[error("Error al leer la hoja de cálculo: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Falló la escritura del archivo de salida
    #[error("No se pudo guardar {}: {reason}", path.display())]
    Save { path: PathBuf, reason: String },

    #[error("Lista de precios inválida: {0}")]
    PriceList(#[from] serde_json::Error),
}

impl ReportError {
    /// Envuelve un error producido mientras se escribía `path`
    pub fn save(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Save {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
