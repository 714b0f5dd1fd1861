//! Procesador de reportes orderDetails de PedidosYa

mod export;
mod item;
mod pricing;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{ReportError, Result};
use crate::fallback::FallbackPolicy;
use crate::input::{Cell, Table, read_table};

pub use export::{COLUMNS, SHEET_NAME, write_detail};
pub use item::{ItemFragment, LineItem, parse_item, split_items, title_case};
pub use pricing::{PriceRule, PriceTable};

pub const ORDER_ID_COLUMN: &str = "Nro de pedido";
pub const DATE_COLUMN: &str = "Fecha del pedido";
pub const ITEMS_COLUMN: &str = "Artículos";
pub const STATUS_COLUMN: &str = "Estado del pedido";

const REQUIRED_COLUMNS: [&str; 3] = [ORDER_ID_COLUMN, DATE_COLUMN, ITEMS_COLUMN];

/// Sufijo del archivo generado
pub const OUTPUT_SUFFIX: &str = "_procesado";

/// Resultado de expandir una tabla de pedidos
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detail {
    pub items: Vec<LineItem>,
}

impl Detail {
    /// Suma de los subtotales conocidos; los precios desconocidos no cuentan
    pub fn total(&self) -> f64 {
        self.items.iter().filter_map(|i| i.subtotal).sum()
    }

    pub fn unknown_prices(&self) -> usize {
        self.items.iter().filter(|i| i.unit_price.is_none()).count()
    }
}

/// Expande pedidos en líneas de detalle con precio
#[derive(Debug, Clone, Default)]
pub struct LineItemExpander {
    prices: PriceTable,
    policy: FallbackPolicy,
}

impl LineItemExpander {
    pub fn new(prices: PriceTable) -> Self {
        Self {
            prices,
            policy: FallbackPolicy::default(),
        }
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Una línea por artículo de cada pedido
    pub fn expand(&self, table: &Table) -> Result<Detail> {
        let mut required = [0usize; 3];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = table
                .column(name)
                .ok_or_else(|| ReportError::MissingColumn(name.to_string()))?;
        }
        let [id_col, date_col, items_col] = required;
        // columna opcional; sin ella "Entregado" queda vacío
        let status_col = table.column(STATUS_COLUMN);

        let mut detail = Detail::default();
        for row in &table.rows {
            let Some(list) = table.cell(row, items_col).as_text().filter(|s| !s.trim().is_empty()) else {
                continue;
            };

            let order_id = table.cell(row, id_col);
            let date = table.cell(row, date_col);
            let status = status_col.map_or(&Cell::Empty, |c| table.cell(row, c));

            for fragment in split_items(list) {
                let item = LineItem::resolve(parse_item(fragment, &self.policy), &self.prices, order_id, date, status);
                if item.unit_price.is_none() {
                    warn!("Pedido {}: sin precio para '{}'", order_id, item.product);
                }
                detail.items.push(item);
            }
        }

        if detail.items.is_empty() {
            return Err(ReportError::EmptyResult);
        }
        Ok(detail)
    }
}

/// Resumen de un reporte procesado
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersReport {
    pub output_path: PathBuf,
    pub items: usize,
    pub unknown_prices: usize,
    pub total: f64,
    pub preview: Vec<Vec<String>>,
}

/// `pedidos.csv` -> `pedidos_procesado.xlsx` en la misma carpeta
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.xlsx", stem, OUTPUT_SUFFIX))
}

/// Lee el reporte, lo expande y escribe el Excel
pub fn process_file(input: &Path, expander: &LineItemExpander) -> Result<OrdersReport> {
    let table = read_table(input)?;
    let detail = expander.expand(&table)?;

    let output_path = output_path_for(input);
    write_detail(&output_path, &detail.items)?;

    let total = detail.total();
    info!("Archivo generado: {}", output_path.display());
    info!("{} artículos, total general: C$ {:.2}", detail.items.len(), total);

    Ok(OrdersReport {
        items: detail.items.len(),
        unknown_prices: detail.unknown_prices(),
        total,
        preview: preview(&detail),
        output_path,
    })
}

fn preview(detail: &Detail) -> Vec<Vec<String>> {
    let header = COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows = detail.items.iter().take(crate::PREVIEW_ROWS).map(|item| {
        vec![
            item.order_id.to_string(),
            item.date.to_string(),
            item.product.clone(),
            item.quantity.to_string(),
            item.unit_price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
            item.subtotal.map(|s| format!("{:.2}", s)).unwrap_or_default(),
            item.status.to_string(),
        ]
    });
    std::iter::once(header).chain(rows).collect()
}
