//! Lectura de la primera hoja de un libro (xls, xlsx, ods)

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use super::{Cell, Table};
use crate::error::Result;

pub(super) fn read_first_sheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Table::default());
    };
    let range = range?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };

    Ok(Table {
        headers: header_row
            .iter()
            .map(|c| to_cell(c).to_string())
            .collect(),
        rows: rows.map(|row| row.iter().map(to_cell).collect()).collect(),
    })
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::String(s) => Cell::text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}
