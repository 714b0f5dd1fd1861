//! Artículos de un pedido: "2 Pollo asado entero, Puyazo"

use crate::fallback::{FallbackPolicy, Parsed};
use crate::input::Cell;

use super::pricing::PriceTable;

/// Fragmento de la lista de artículos con cantidad y nombre
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFragment {
    pub quantity: Parsed<u32>,
    pub name: String,
}

/// Separa la lista de artículos por comas, sin fragmentos vacíos
pub fn split_items(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Interpreta un fragmento ya recortado
///
/// Si el primer token es un entero positivo y queda resto, es la cantidad.
/// En cualquier otro caso la cantidad es la de la política y el nombre es el
/// fragmento completo.
pub fn parse_item(fragment: &str, policy: &FallbackPolicy) -> ItemFragment {
    if let Some((head, rest)) = fragment.split_once(char::is_whitespace) {
        let rest = rest.trim();
        if let quantity @ Parsed::Value(_) = policy.quantity(head) {
            if !rest.is_empty() {
                return ItemFragment {
                    quantity,
                    name: rest.to_string(),
                };
            }
        }
    }

    ItemFragment {
        quantity: Parsed::Fallback(policy.quantity),
        name: fragment.to_string(),
    }
}

/// Mayúscula al inicio de cada palabra, minúsculas en el resto.
/// Una letra inicia palabra si el carácter anterior no es una letra ("2lt" -> "2Lt").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Línea de detalle con precio resuelto
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub order_id: Cell,
    pub date: Cell,
    pub product: String,
    pub quantity: u32,
    pub unit_price: Option<f64>,
    pub subtotal: Option<f64>,
    pub status: Cell,
}

impl LineItem {
    pub fn resolve(fragment: ItemFragment, prices: &PriceTable, order_id: &Cell, date: &Cell, status: &Cell) -> Self {
        let quantity = fragment.quantity.get();
        let unit_price = prices.find_price(&fragment.name);
        Self {
            order_id: order_id.clone(),
            date: date.clone(),
            product: title_case(&fragment.name),
            quantity,
            unit_price,
            subtotal: unit_price.map(|p| f64::from(quantity) * p),
            status: status.clone(),
        }
    }
}
