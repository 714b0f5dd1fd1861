//! FixPromicsyst - una fila por producto del reporte de Promicsyst
//!
//! La celda de productos contiene varias líneas `Producto (diferencia)`. Cada
//! línea genera una fila de salida con las columnas anteriores a esa celda, el
//! nombre del producto y la diferencia.
//!
//! Las columnas posteriores a la celda de productos no se copian a la salida.

mod product_line;

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::fallback::{FallbackPolicy, Parsed};
use crate::input::read_raw_rows;

pub use product_line::{ProductLine, format_difference, has_difference, parse_product_line};

pub const DELIMITER: u8 = b';';
pub const PRODUCT_HEADER: &str = "Producto";
pub const DIFFERENCE_HEADER: &str = "Diferencia";

/// Cómo se ubica la celda de productos en cada fila
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductColumn {
    /// Primera celda con un grupo `(número)`; sin coincidencia la fila se descarta
    #[default]
    AutoDetect,
    /// Índice fijo; las filas más cortas se descartan
    Index(usize),
}

impl ProductColumn {
    fn locate(&self, row: &[String]) -> Option<usize> {
        match *self {
            Self::AutoDetect => row.iter().position(|cell| has_difference(cell)),
            Self::Index(i) => (i < row.len()).then_some(i),
        }
    }
}

/// Fila de salida
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    /// Celdas anteriores a la celda de productos
    pub leading: Vec<String>,
    pub product: String,
    pub difference: Parsed<f64>,
}

impl NormalizedRow {
    pub fn to_record(&self) -> Vec<String> {
        let mut record = self.leading.clone();
        record.push(self.product.clone());
        record.push(format_difference(self.difference.get()));
        record
    }
}

/// Resultado de normalizar una tabla
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    pub header: Vec<String>,
    pub rows: Vec<NormalizedRow>,
    /// Filas de datos descartadas por no tener celda de productos
    pub dropped: usize,
}

impl Normalized {
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        std::iter::once(self.header.clone()).chain(self.rows.iter().map(NormalizedRow::to_record))
    }
}

/// Normalizador de filas de Promicsyst
#[derive(Debug, Clone, Copy, Default)]
pub struct RowNormalizer {
    pub column: ProductColumn,
    pub policy: FallbackPolicy,
}

impl RowNormalizer {
    pub fn new(column: ProductColumn) -> Self {
        Self {
            column,
            policy: FallbackPolicy::default(),
        }
    }

    /// Normaliza las filas; la primera es el encabezado. `None` si no hay filas.
    pub fn normalize(&self, rows: &[Vec<String>]) -> Option<Normalized> {
        let (header, data) = rows.split_first()?;

        let mut new_header: Vec<String> = header[..header.len().saturating_sub(1)].to_vec();
        new_header.push(PRODUCT_HEADER.to_string());
        new_header.push(DIFFERENCE_HEADER.to_string());

        let mut out = Normalized {
            header: new_header,
            ..Default::default()
        };

        for row in data.iter().filter(|r| !r.is_empty()) {
            let row: Vec<String> = row.iter().map(|cell| clean_cell(cell)).collect();

            let Some(index) = self.column.locate(&row) else {
                out.dropped += 1;
                continue;
            };

            for line in row[index].split('\n').map(str::trim).filter(|l| !l.is_empty()) {
                let ProductLine { name, difference } = parse_product_line(line, &self.policy);
                out.rows.push(NormalizedRow {
                    leading: row[..index].to_vec(),
                    product: name,
                    difference,
                });
            }
        }

        Some(out)
    }
}

/// Quita `<p>` / `</p>` y los espacios de los extremos
fn clean_cell(cell: &str) -> String {
    cell.replace("<p>", "").replace("</p>", "").trim().to_string()
}

/// Resumen de un archivo procesado
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeReport {
    pub output_path: PathBuf,
    /// Filas de datos escritas (sin contar el encabezado)
    pub rows_written: usize,
    pub dropped: usize,
    /// Primeras filas escritas, para la vista previa
    pub preview: Vec<Vec<String>>,
}

/// Lee `input`, normaliza y escribe el resultado en `output_dir` con el mismo nombre
pub fn process_file(input: &Path, output_dir: &Path, normalizer: &RowNormalizer) -> Result<NormalizeReport> {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "salida.csv".to_string());

    let rows = read_raw_rows(input, DELIMITER)?;
    let Some(normalized) = normalizer.normalize(&rows) else {
        warn!("El archivo {} está vacío", file_name);
        return Err(ReportError::EmptyInput { file: file_name });
    };

    if normalized.dropped > 0 {
        warn!("{} filas sin productos descartadas", normalized.dropped);
    }
    if normalized.rows.is_empty() {
        warn!("{}: no se encontró ninguna fila con productos", file_name);
    }

    std::fs::create_dir_all(output_dir).map_err(|e| ReportError::save(output_dir, e))?;
    let output_path = output_dir.join(&file_name);
    write_records(&output_path, normalized.records())?;

    info!("Archivo procesado y guardado en {}", output_path.display());
    info!("Total de filas procesadas: {}", normalized.rows.len());

    Ok(NormalizeReport {
        rows_written: normalized.rows.len(),
        dropped: normalized.dropped,
        preview: normalized.records().take(crate::PREVIEW_ROWS + 1).collect(),
        output_path,
    })
}

fn write_records(path: &Path, records: impl Iterator<Item = Vec<String>>) -> Result<()> {
    let write = || -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .delimiter(DELIMITER)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .flexible(true)
            .from_path(path)?;
        for record in records {
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    };
    write().map_err(|e| ReportError::save(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn normalize(data: &[&[&str]]) -> Normalized {
        RowNormalizer::default().normalize(&rows(data)).unwrap()
    }

    #[test]
    fn one_row_per_product_line() {
        let out = normalize(&[&["A", "B", "C"], &["1", "2", "Widget (5)\nGadget (-3)"]]);
        assert_eq!(out.header, vec!["A", "B", "Producto", "Diferencia"]);
        let records: Vec<_> = out.records().skip(1).collect();
        assert_eq!(
            records,
            vec![
                vec!["1", "2", "Widget", "5.0"],
                vec!["1", "2", "Gadget", "-3.0"],
            ]
        );
    }

    #[test]
    fn first_matching_cell_is_the_product_cell() {
        let out = normalize(&[&["A", "B", "C"], &["1", "Nota (1)", "Widget (5)"]]);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].leading, vec!["1"]);
        assert_eq!(out.rows[0].product, "Nota");
    }

    #[test]
    fn header_gains_one_column() {
        let out = normalize(&[&["A", "B", "C", "D"]]);
        assert_eq!(out.header.len(), 5);
        assert!(out.rows.is_empty());
    }

    #[test]
    fn rows_without_groups_are_dropped() {
        let out = normalize(&[
            &["A", "B"],
            &["1", "Widget (5)"],
            &["2", "sin diferencia"],
        ]);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn cells_after_product_cell_are_not_copied() {
        let out = normalize(&[&["A", "B", "C"], &["1", "Widget (5)", "extra"]]);
        assert_eq!(out.rows[0].to_record(), vec!["1", "Widget", "5.0"]);
    }

    #[test]
    fn html_paragraphs_and_blank_lines_are_cleaned() {
        let out = normalize(&[
            &["A", "B"],
            &["  <p>1</p> ", "<p>Widget (5)</p>\n\n  \nGadget (2)"],
        ]);
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].leading, vec!["1"]);
        assert_eq!(out.rows[0].product, "Widget");
        assert_eq!(out.rows[1].product, "Gadget");
    }

    #[test]
    fn malformed_line_next_to_valid_one_gives_zero() {
        let out = normalize(&[&["A", "B"], &["1", "Widget (abc)\nGadget (2)"]]);
        assert_eq!(out.rows[0].product, "Widget");
        assert_eq!(out.rows[0].difference, Parsed::Fallback(0.0));
        assert_eq!(out.rows[1].difference, Parsed::Value(2.0));
    }

    #[test]
    fn empty_rows_are_skipped_silently() {
        let out = normalize(&[&["A", "B"], &[], &["1", "Widget (5)"]]);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.dropped, 0);
    }

    #[test]
    fn no_rows_means_no_output() {
        assert!(RowNormalizer::default().normalize(&[]).is_none());
    }

    #[test]
    fn fixed_column_index() {
        let normalizer = RowNormalizer::new(ProductColumn::Index(2));
        let out = normalizer
            .normalize(&rows(&[
                &["A", "B", "C"],
                &["1", "Nota (1)", "Widget (5)"],
                &["2", "corta"],
                &["3", "x", "Sin número"],
            ]))
            .unwrap();
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].leading, vec!["1", "Nota (1)"]);
        assert_eq!(out.rows[1].difference, Parsed::Fallback(0.0));
        assert_eq!(out.dropped, 1);
    }

    #[test]
    fn output_fed_back_drops_every_row() {
        let first = normalize(&[&["A", "B", "C"], &["1", "2", "Widget (5)\nGadget (-3)"]]);
        let again: Vec<Vec<String>> = first.records().collect();
        let second = RowNormalizer::default().normalize(&again).unwrap();
        assert!(second.rows.is_empty());
        assert_eq!(second.dropped, 2);
    }
}
