//! Configuración por variables de entorno (`.env` incluido)

use std::path::PathBuf;

use crate::normalizer::ProductColumn;

pub const INPUT_DIR_VAR: &str = "REPORT_FIXER_INPUT_DIR";
pub const OUTPUT_DIR_VAR: &str = "REPORT_FIXER_OUTPUT_DIR";
pub const PRICE_LIST_VAR: &str = "REPORT_FIXER_PRICE_LIST";
pub const PRODUCT_COLUMN_VAR: &str = "REPORT_FIXER_PRODUCT_COLUMN";

/// Configuración de la aplicación
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Carpeta donde se abre el diálogo de selección
    pub input_dir: PathBuf,
    /// Carpeta de salida de FixPromicsyst
    pub output_dir: PathBuf,
    /// Lista de precios en JSON que reemplaza a la incluida
    pub price_list: Option<PathBuf>,
    /// Columna de productos de Promicsyst
    pub product_column: ProductColumn,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("csv"),
            output_dir: PathBuf::from("output"),
            price_list: None,
            product_column: ProductColumn::AutoDetect,
        }
    }
}

impl Settings {
    /// Lee la configuración del entorno del proceso
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lee la configuración con una función de búsqueda arbitraria
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let product_column = match non_empty(PRODUCT_COLUMN_VAR) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(index) => ProductColumn::Index(index),
                Err(_) => {
                    tracing::warn!("{} inválido ({}), se usa detección automática", PRODUCT_COLUMN_VAR, raw);
                    ProductColumn::AutoDetect
                }
            },
            None => defaults.product_column,
        };

        Self {
            input_dir: non_empty(INPUT_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.input_dir),
            output_dir: non_empty(OUTPUT_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.output_dir),
            price_list: non_empty(PRICE_LIST_VAR).map(PathBuf::from),
            product_column,
        }
    }

    /// Crea las carpetas de entrada y salida si no existen
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.input_dir)?;
        std::fs::create_dir_all(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(Settings::from_lookup(lookup(&[])), Settings::default());
    }

    #[test]
    fn reads_every_variable() {
        let settings = Settings::from_lookup(lookup(&[
            (INPUT_DIR_VAR, "entrada"),
            (OUTPUT_DIR_VAR, " salida "),
            (PRICE_LIST_VAR, "precios.json"),
            (PRODUCT_COLUMN_VAR, "3"),
        ]));
        assert_eq!(settings.input_dir, PathBuf::from("entrada"));
        assert_eq!(settings.output_dir, PathBuf::from("salida"));
        assert_eq!(settings.price_list, Some(PathBuf::from("precios.json")));
        assert_eq!(settings.product_column, ProductColumn::Index(3));
    }

    #[test]
    fn invalid_column_means_auto_detect() {
        let settings = Settings::from_lookup(lookup(&[(PRODUCT_COLUMN_VAR, "última")]));
        assert_eq!(settings.product_column, ProductColumn::AutoDetect);
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = Settings::from_lookup(lookup(&[(OUTPUT_DIR_VAR, "  "), (PRICE_LIST_VAR, "")]));
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.price_list, None);
    }
}
