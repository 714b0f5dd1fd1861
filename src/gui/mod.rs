//! Interfaz gráfica

mod app;
mod theme;

pub use app::{ReportFixerApp, run};
