//! Lista de precios
//!
//! Búsqueda lineal en orden: gana el primer fragmento contenido en el nombre,
//! así que los fragmentos más específicos deben ir antes que los generales.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fragmento de nombre (en minúsculas) y su precio unitario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRule {
    pub fragment: String,
    pub price: f64,
}

impl PriceRule {
    pub fn new(fragment: &str, price: f64) -> Self {
        Self {
            fragment: fragment.to_lowercase(),
            price,
        }
    }
}

/// Precios por defecto de Pollos Asados KM9
const DEFAULT_PRICES: &[(&str, f64)] = &[
    ("pollo asado entero", 300.0),
    // variante que a veces trae PedidosYa
    ("pollo asados entero", 300.0),
    ("pollo asado medio", 150.0),
    ("medio pollo asado", 150.0),
    ("pollo rostizado entero", 340.0),
    ("medio rostizado", 170.0),
    ("puyazo", 200.0),
    ("churrasco", 200.0),
    ("cerdo asado", 160.0),
    ("carne asada", 180.0),
    ("gaseosa 355 ml", 30.0),
    ("gaseosa 2 lt", 70.0),
    ("coca cola 2lt", 70.0),
    ("gaseosa 3 lt", 90.0),
    ("coca cola 3lt", 90.0),
    ("nachos supremos de res", 150.0),
];

/// Lista ordenada e inmutable de reglas de precio
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    rules: Vec<PriceRule>,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRICES
                .iter()
                .map(|(fragment, price)| PriceRule::new(fragment, *price))
                .collect(),
        )
    }
}

impl PriceTable {
    pub fn new(rules: Vec<PriceRule>) -> Self {
        Self { rules }
    }

    /// Lee una lista de precios en JSON: `[{"fragment": "puyazo", "price": 200}]`
    pub fn from_json(json: &str) -> Result<Self> {
        let rules: Vec<PriceRule> = serde_json::from_str(json)?;
        Ok(Self::new(
            rules
                .into_iter()
                .map(|r| PriceRule::new(&r.fragment, r.price))
                .collect(),
        ))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn rules(&self) -> &[PriceRule] {
        &self.rules
    }

    /// Precio unitario del producto, `None` si ningún fragmento coincide
    pub fn find_price(&self, name: &str) -> Option<f64> {
        let name = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| name.contains(&rule.fragment))
            .map(|rule| rule.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_fragment_inside_name() {
        let table = PriceTable::default();
        assert_eq!(table.find_price("Pollo asado entero"), Some(300.0));
        assert_eq!(table.find_price("PUYAZO con tortilla"), Some(200.0));
        assert_eq!(table.find_price("Coca Cola 2lt"), Some(70.0));
    }

    #[test]
    fn unknown_product_has_no_price() {
        assert_eq!(PriceTable::default().find_price("Gallo pinto"), None);
    }

    #[test]
    fn first_rule_wins() {
        let table = PriceTable::new(vec![
            PriceRule::new("pollo asado medio", 150.0),
            PriceRule::new("pollo", 99.0),
        ]);
        assert_eq!(table.find_price("pollo asado medio"), Some(150.0));
        assert_eq!(table.find_price("pollo frito"), Some(99.0));

        let reversed = PriceTable::new(vec![
            PriceRule::new("pollo", 99.0),
            PriceRule::new("pollo asado medio", 150.0),
        ]);
        assert_eq!(reversed.find_price("pollo asado medio"), Some(99.0));
    }

    #[test]
    fn json_keeps_order_and_lowercases() {
        let table = PriceTable::from_json(
            r#"[{"fragment": "Tajadas", "price": 45}, {"fragment": "taja", "price": 10.5}]"#,
        )
        .unwrap();
        assert_eq!(table.rules()[0].fragment, "tajadas");
        assert_eq!(table.find_price("Tajadas con queso"), Some(45.0));
        assert_eq!(table.find_price("tajaditas"), Some(10.5));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(PriceTable::from_json("{ no es json").is_err());
    }
}
