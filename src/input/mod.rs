//! Lectura de archivos de entrada (CSV y hojas de cálculo)

mod spreadsheet;

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::ReaderBuilder;

use crate::error::{ReportError, Result};

/// Valor de una celda con su tipo original
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Bool(bool),
    Empty,
}

impl Cell {
    /// Celda de texto; el texto vacío se considera celda vacía
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Self::Empty } else { Self::Text(s) }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // 100.0 -> "100"
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Empty => Ok(()),
        }
    }
}

/// Tabla con encabezados y filas de celdas
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Celda de una fila; las filas cortas devuelven celda vacía
    pub fn cell<'a>(&self, row: &'a [Cell], column: usize) -> &'a Cell {
        static EMPTY: Cell = Cell::Empty;
        row.get(column).unwrap_or(&EMPTY)
    }
}

/// Formato de archivo según la extensión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Spreadsheet,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xls" | "xlsx" | "xlsm" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(ReportError::UnsupportedFileType(format!(".{}", ext))),
        }
    }
}

/// Lee todas las filas de un archivo delimitado sin interpretar encabezados
pub fn read_raw_rows(path: &Path, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Lee una tabla con encabezados desde CSV u hoja de cálculo
pub fn read_table(path: &Path) -> Result<Table> {
    match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv_table(path),
        InputFormat::Spreadsheet => spreadsheet::read_first_sheet(path),
    }
}

fn read_csv_table(path: &Path) -> Result<Table> {
    let mut rows = read_raw_rows(path, b',')?.into_iter();
    let Some(headers) = rows.next() else {
        return Ok(Table::default());
    };

    let mut rows: Vec<Vec<Cell>> = rows
        .map(|row| row.into_iter().map(Cell::text).collect())
        .collect();
    infer_numeric_columns(&mut rows, headers.len());

    Ok(Table { headers, rows })
}

/// Convierte en número las columnas cuyas celdas no vacías son todas numéricas
fn infer_numeric_columns(rows: &mut [Vec<Cell>], width: usize) {
    let parse = |cell: &Cell| cell.as_text().and_then(|s| s.trim().parse::<f64>().ok());

    for col in 0..width {
        let cells = || rows.iter().filter_map(|row| row.get(col)).filter(|c| **c != Cell::Empty);
        let numeric = cells().next().is_some() && cells().all(|c| parse(c).is_some());
        if !numeric {
            continue;
        }
        for row in rows.iter_mut() {
            if let Some(cell) = row.get_mut(col) {
                if let Some(n) = parse(cell) {
                    *cell = Cell::Number(n);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn raw_rows_keep_quoted_newlines() {
        let file = temp_file(".csv", "A;B\n1;\"Widget (5)\nGadget (-3)\"\n");
        let rows = read_raw_rows(file.path(), b';').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1", "Widget (5)\nGadget (-3)"]);
    }

    #[test]
    fn raw_rows_allow_ragged_lengths() {
        let file = temp_file(".csv", "A;B;C\n1\n1;2;3;4\n");
        let rows = read_raw_rows(file.path(), b';').unwrap();
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn csv_table_maps_blank_cells_to_empty() {
        let file = temp_file(".csv", "Nro de pedido,Artículos\n100,\n101,\"1 Puyazo, 2 Churrasco\"\n");
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.column("Artículos"), Some(1));
        assert_eq!(table.rows[0][1], Cell::Empty);
        assert_eq!(table.rows[1][1].as_text(), Some("1 Puyazo, 2 Churrasco"));
    }

    #[test]
    fn numeric_columns_become_numbers() {
        let file = temp_file(".csv", "Nro de pedido,Fecha del pedido,Artículos\n100,2024-01-01,2\n101,2024-01-02,Puyazo\n,2024-01-03,\n");
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.rows[0][0], Cell::Number(100.0));
        assert_eq!(table.rows[1][0], Cell::Number(101.0));
        assert_eq!(table.rows[2][0], Cell::Empty);
        assert_eq!(table.rows[0][1], Cell::text("2024-01-01"));
        // columna mixta: "2" sigue siendo texto
        assert_eq!(table.rows[0][2], Cell::text("2"));
    }

    #[test]
    fn headers_are_not_trimmed() {
        let file = temp_file(".csv", "Nro de pedido, Artículos\n1,Puyazo\n");
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.column("Artículos"), None);
        assert_eq!(table.column(" Artículos"), Some(1));
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(InputFormat::from_path(Path::new("a.CSV")).unwrap(), InputFormat::Csv);
        assert_eq!(InputFormat::from_path(Path::new("a.Xlsx")).unwrap(), InputFormat::Spreadsheet);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = InputFormat::from_path(Path::new("pedidos.txt")).unwrap_err();
        assert!(matches!(err, ReportError::UnsupportedFileType(ext) if ext == ".txt"));
    }

    #[test]
    fn number_cells_print_without_trailing_zero() {
        assert_eq!(Cell::Number(100.0).to_string(), "100");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::text("").to_string(), "");
    }

    #[test]
    fn short_rows_read_as_empty() {
        let table = Table {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec![Cell::text("1")]],
        };
        assert_eq!(table.cell(&table.rows[0], 1), &Cell::Empty);
    }
}
