//! Report Fixer - limpieza de reportes de Promicsyst y PedidosYa
//!
//! # Funciones
//! - FixPromicsyst: una fila por producto del CSV de Promicsyst (`;`)
//! - PedidosYa: detalle de artículos con precio a partir de orderDetails (CSV/Excel)
//! - Interfaz con selector de archivos y avisos

pub mod config;
pub mod error;
pub mod fallback;
pub mod gui;
pub mod input;
pub mod normalizer;
pub mod notice;
pub mod orders;

pub use config::Settings;
pub use error::ReportError;
pub use normalizer::RowNormalizer;
pub use orders::{LineItemExpander, PriceTable};

/// Filas mostradas en la vista previa de la interfaz
pub const PREVIEW_ROWS: usize = 20;
