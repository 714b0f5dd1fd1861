//! Ventana principal

use std::path::{Path, PathBuf};

use anyhow::Result;
use eframe::egui;
use egui::{CentralPanel, RichText, Vec2};
use egui_extras::{Column, TableBuilder};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use tracing::{error, warn};

use crate::config::Settings;
use crate::normalizer::{self, RowNormalizer};
use crate::notice::{Notice, NoticeLevel};
use crate::orders::{self, LineItemExpander, PriceTable};

use super::theme::{Colors, light_theme};

/// Estado de la aplicación
pub struct ReportFixerApp {
    settings: Settings,
    normalizer: RowNormalizer,
    expander: LineItemExpander,
    /// Archivo de Promicsyst elegido
    selected_file: Option<PathBuf>,
    /// Último aviso mostrado
    last_notice: Option<Notice>,
    /// Carpeta del último archivo generado
    last_folder: Option<PathBuf>,
    /// Encabezado + primeras filas del último resultado
    preview: Vec<Vec<String>>,
    status: String,
}

impl ReportFixerApp {
    pub fn new(settings: Settings) -> Self {
        let mut status = "Selecciona un archivo para comenzar".to_string();

        let prices = match settings.price_list.as_deref() {
            Some(path) => PriceTable::load(path).unwrap_or_else(|e| {
                error!("No se pudo cargar la lista de precios {}: {}", path.display(), e);
                status = format!("Lista de precios inválida ({}), se usan los precios incluidos", e);
                PriceTable::default()
            }),
            None => PriceTable::default(),
        };

        if let Err(e) = settings.ensure_dirs() {
            warn!("No se pudieron crear las carpetas de trabajo: {}", e);
        }

        Self {
            normalizer: RowNormalizer::new(settings.product_column),
            expander: LineItemExpander::new(prices),
            settings,
            selected_file: None,
            last_notice: None,
            last_folder: None,
            preview: Vec::new(),
            status,
        }
    }

    fn pick_promicsyst_file(&mut self) {
        if let Some(path) = FileDialog::new()
            .set_title("Seleccionar archivo CSV")
            .set_directory(&self.settings.input_dir)
            .add_filter("Archivos CSV", &["csv"])
            .add_filter("Todos los archivos", &["*"])
            .pick_file()
        {
            self.status = format!("Archivo seleccionado: {}", file_name(&path));
            self.selected_file = Some(path);
        }
    }

    fn process_promicsyst(&mut self) {
        let Some(path) = self.selected_file.clone() else {
            self.show_notice(Notice::no_file_selected());
            return;
        };

        let notice = match normalizer::process_file(&path, &self.settings.output_dir, &self.normalizer) {
            Ok(report) => {
                self.last_folder = report.output_path.parent().map(Path::to_path_buf);
                self.preview = report.preview.clone();
                Notice::normalized(&report)
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                Notice::from_error(&e)
            }
        };
        self.show_notice(notice);
    }

    fn pick_and_process_orders(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Seleccionar orderDetails de PedidosYa")
            .set_directory(&self.settings.input_dir)
            .add_filter("Archivos CSV", &["csv"])
            .add_filter("Archivos Excel", &["xlsx", "xls"])
            .add_filter("Todos los archivos", &["*"])
            .pick_file()
        else {
            return;
        };

        let notice = match orders::process_file(&path, &self.expander) {
            Ok(report) => {
                self.last_folder = report.output_path.parent().map(Path::to_path_buf);
                self.preview = report.preview.clone();
                Notice::orders(&report)
            }
            Err(e) => {
                error!("{}: {}", path.display(), e);
                Notice::from_error(&e)
            }
        };
        self.show_notice(notice);
    }

    /// Muestra el aviso en un cuadro de mensaje y en la barra de estado
    fn show_notice(&mut self, notice: Notice) {
        let level = match notice.level {
            NoticeLevel::Info => MessageLevel::Info,
            NoticeLevel::Warning => MessageLevel::Warning,
            NoticeLevel::Error => MessageLevel::Error,
        };
        MessageDialog::new()
            .set_level(level)
            .set_title(notice.title.as_str())
            .set_description(notice.message.as_str())
            .set_buttons(MessageButtons::Ok)
            .show();

        self.status = notice.message.lines().next().unwrap_or_default().to_string();
        self.last_notice = Some(notice);
    }

    fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::new()
            .fill(Colors::BG_CARD)
            .stroke(egui::Stroke::new(1.0, Colors::BORDER))
            .corner_radius(12.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                add_contents(ui);
            });
    }

    fn promicsyst_card(&mut self, ui: &mut egui::Ui) {
        Self::card(ui, |ui| {
            ui.label(RichText::new("FixPromicsyst").size(18.0).color(Colors::TEXT_PRIMARY));
            ui.label(
                RichText::new(format!(
                    "1) Haz clic en 'Seleccionar archivo CSV'.\n\
                     2) Elige el archivo CSV original de Promicsyst.\n\
                     3) Se generará el archivo limpio en la carpeta '{}'.",
                    self.settings.output_dir.display()
                ))
                .color(Colors::TEXT_SECONDARY),
            );

            let selected = match &self.selected_file {
                Some(path) => format!("Archivo seleccionado: {}", file_name(path)),
                None => "Ningún archivo seleccionado".to_string(),
            };
            ui.label(RichText::new(selected).color(Colors::TEXT_PRIMARY));

            ui.horizontal(|ui| {
                if ui.button("Seleccionar archivo CSV").clicked() {
                    self.pick_promicsyst_file();
                }
                let process = egui::Button::new(RichText::new("Procesar archivo").color(egui::Color32::WHITE))
                    .fill(Colors::ACCENT)
                    .min_size(Vec2::new(160.0, 0.0));
                if ui.add(process).clicked() {
                    self.process_promicsyst();
                }
            });
        });
    }

    fn orders_card(&mut self, ui: &mut egui::Ui) {
        Self::card(ui, |ui| {
            ui.label(RichText::new("Procesador de reportes PedidosYa").size(18.0).color(Colors::TEXT_PRIMARY));
            ui.label(
                RichText::new(
                    "1. Seleccioná el archivo orderDetails (.csv o .xlsx)\n\
                     2. Se generará un Excel con la tabla Detalle:\n   \
                     Número de pedido, Fecha, Producto, Cantidad,\n   \
                     Precio unitario, Subtotal y Entregado.",
                )
                .color(Colors::TEXT_SECONDARY),
            );
            ui.label(
                RichText::new(format!("{} precios cargados", self.expander.prices().rules().len()))
                    .size(12.0)
                    .color(Colors::TEXT_SECONDARY),
            );
            if ui
                .add(egui::Button::new("Seleccionar archivo y procesar").min_size(Vec2::new(260.0, 32.0)))
                .clicked()
            {
                self.pick_and_process_orders();
            }
        });
    }

    fn preview_table(&self, ui: &mut egui::Ui) {
        let Some((header, rows)) = self.preview.split_first() else {
            return;
        };
        let columns = self.preview.iter().map(Vec::len).max().unwrap_or(0);

        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().resizable(true), columns)
                .header(20.0, |mut head| {
                    for i in 0..columns {
                        head.col(|ui| {
                            ui.strong(cell_text(header, i));
                        });
                    }
                })
                .body(|mut body| {
                    for row in rows {
                        body.row(18.0, |mut table_row| {
                            for i in 0..columns {
                                table_row.col(|ui| {
                                    ui.label(cell_text(row, i));
                                });
                            }
                        });
                    }
                });
        });
    }
}

impl eframe::App for ReportFixerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(8.0, 10.0);

            // encabezado
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Report Fixer").size(26.0).color(Colors::TEXT_PRIMARY));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(self.last_folder.is_some(), egui::Button::new("📁 Abrir carpeta"))
                        .clicked()
                    {
                        if let Some(ref folder) = self.last_folder {
                            if let Err(e) = open::that(folder) {
                                warn!("No se pudo abrir {}: {}", folder.display(), e);
                            }
                        }
                    }
                });
            });

            self.promicsyst_card(ui);
            self.orders_card(ui);

            if !self.preview.is_empty() {
                ui.label(RichText::new("Vista previa").size(16.0).color(Colors::TEXT_PRIMARY));
                self.preview_table(ui);
            }

            // barra de estado
            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                let color = match self.last_notice.as_ref().map(|n| n.level) {
                    Some(NoticeLevel::Info) => Colors::SUCCESS,
                    Some(NoticeLevel::Warning) => Colors::WARNING,
                    Some(NoticeLevel::Error) => Colors::ERROR,
                    None => Colors::TEXT_SECONDARY,
                };
                ui.label(RichText::new(&self.status).size(13.0).color(color));
            });
        });
    }
}

fn cell_text(row: &[String], i: usize) -> String {
    row.get(i).cloned().unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Inicia la aplicación
pub fn run(settings: Settings) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 680.0])
            .with_min_inner_size([560.0, 480.0])
            .with_title("Report Fixer - Promicsyst / PedidosYa"),
        ..Default::default()
    };

    eframe::run_native(
        "Report Fixer",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_style(light_theme());
            Ok(Box::new(ReportFixerApp::new(settings)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Error de la aplicación: {}", e))
}
