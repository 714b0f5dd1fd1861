//! Extracción de "Producto (diferencia)" de una línea

use std::sync::LazyLock;

use regex::Regex;

use crate::fallback::{FallbackPolicy, Parsed};

/// Grupo entre paréntesis con un decimal con signo: `(5)`, `(-3)`, `(2.5)`
static DIFFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([-0-9.]+)\)").expect("regex de diferencia inválida"));

/// Cualquier grupo entre paréntesis
static PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("regex de paréntesis inválida"));

/// Producto extraído de una línea
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine {
    pub name: String,
    pub difference: Parsed<f64>,
}

/// ¿Contiene el texto un grupo de diferencia?
pub fn has_difference(text: &str) -> bool {
    DIFFERENCE_RE.is_match(text)
}

/// Analiza una línea ya recortada
pub fn parse_product_line(line: &str, policy: &FallbackPolicy) -> ProductLine {
    let raw = DIFFERENCE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    ProductLine {
        name: PARENS_RE.replace_all(line, "").trim().to_string(),
        difference: policy.difference(raw),
    }
}

/// Formato de la diferencia en el CSV de salida: `5.0`, `-3.0`, `2.5`
pub fn format_difference(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ProductLine {
        parse_product_line(line, &FallbackPolicy::default())
    }

    #[test]
    fn extracts_name_and_difference() {
        let line = parse("Widget (5)");
        assert_eq!(line.name, "Widget");
        assert_eq!(line.difference, Parsed::Value(5.0));
    }

    #[test]
    fn negative_and_decimal_values() {
        assert_eq!(parse("Gadget (-3)").difference.get(), -3.0);
        assert_eq!(parse("Queso (0.25)").difference.get(), 0.25);
    }

    #[test]
    fn all_groups_are_removed_from_name() {
        let line = parse("Pollo (grande) asado (2)");
        assert_eq!(line.name, "Pollo  asado");
        assert_eq!(line.difference.get(), 2.0);
    }

    #[test]
    fn first_numeric_group_wins() {
        assert_eq!(parse("Combo (3) (7)").difference.get(), 3.0);
    }

    #[test]
    fn malformed_group_degrades_to_zero() {
        assert_eq!(parse("Widget (abc)").difference, Parsed::Fallback(0.0));
        assert_eq!(parse("Widget (1.2.3)").difference, Parsed::Fallback(0.0));
        assert_eq!(parse("Widget (abc)").name, "Widget");
    }

    #[test]
    fn detection_requires_numeric_group() {
        assert!(has_difference("a (1)"));
        assert!(has_difference("a (-)"));
        assert!(!has_difference("a (abc)"));
        assert!(!has_difference("sin grupo"));
    }

    #[test]
    fn difference_formatting() {
        assert_eq!(format_difference(5.0), "5.0");
        assert_eq!(format_difference(-3.0), "-3.0");
        assert_eq!(format_difference(2.5), "2.5");
        assert_eq!(format_difference(0.0), "0.0");
    }

    #[test]
    fn extreme_differences_print_in_plain_decimal() {
        assert_eq!(format_difference(1e16), "10000000000000000");
        assert_eq!(format_difference(0.00001), "0.00001");
    }
}
