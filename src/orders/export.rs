//! Hoja "Detalle" en Excel

use std::path::Path;

use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet, XlsxError};

use super::item::LineItem;
use crate::error::{ReportError, Result};
use crate::input::Cell;

pub const SHEET_NAME: &str = "Detalle";

pub const COLUMNS: [&str; 7] = [
    "Numero de pedido",
    "Fecha",
    "Producto",
    "Cantidad",
    "Precio unitario (C$)",
    "Subtotal (C$)",
    "Entregado",
];

/// Escribe las líneas de detalle en `path`
pub fn write_detail(path: &Path, items: &[LineItem]) -> Result<()> {
    build_workbook(items)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|e| ReportError::save(path, e))
}

fn build_workbook(items: &[LineItem]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold().set_border(FormatBorder::Thin);
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, item) in items.iter().enumerate() {
        let row = i as u32 + 1;
        write_cell(sheet, row, 0, &item.order_id)?;
        write_cell(sheet, row, 1, &item.date)?;
        sheet.write_string(row, 2, &item.product)?;
        sheet.write_number(row, 3, f64::from(item.quantity))?;
        // precio desconocido -> celda en blanco
        if let Some(price) = item.unit_price {
            sheet.write_number(row, 4, price)?;
        }
        if let Some(subtotal) = item.subtotal {
            sheet.write_number(row, 5, subtotal)?;
        }
        write_cell(sheet, row, 6, &item.status)?;
    }

    Ok(workbook)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> std::result::Result<(), XlsxError> {
    match cell {
        Cell::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        Cell::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        Cell::Empty => {}
        Cell::Text(_) | Cell::DateTime(_) => {
            sheet.write_string(row, col, cell.to_string())?;
        }
    }
    Ok(())
}
