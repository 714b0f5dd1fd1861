//! Política de valores por defecto para números mal formados
//!
//! Un número que no se puede leer nunca aborta el proceso: se sustituye por el
//! valor por defecto de la política y el resultado queda marcado como
//! [`Parsed::Fallback`].

use tracing::debug;

/// Resultado de leer un valor numérico
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed<T> {
    /// Se leyó el valor del texto
    Value(T),
    /// El texto no era válido y se aplicó el valor por defecto
    Fallback(T),
}

impl<T: Copy> Parsed<T> {
    pub fn get(&self) -> T {
        match *self {
            Self::Value(v) | Self::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Valores por defecto usados cuando un número no se puede leer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackPolicy {
    /// Diferencia de un producto de Promicsyst sin número válido
    pub difference: f64,
    /// Cantidad de un artículo de PedidosYa sin cantidad válida
    pub quantity: u32,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            difference: 0.0,
            quantity: 1,
        }
    }
}

impl FallbackPolicy {
    /// Lee la diferencia encerrada entre paréntesis (`None` si no había grupo)
    pub fn difference(&self, raw: Option<&str>) -> Parsed<f64> {
        match raw.map(|s| s.parse::<f64>()) {
            Some(Ok(v)) => Parsed::Value(v),
            _ => {
                debug!("Diferencia inválida {:?}, se usa {}", raw, self.difference);
                Parsed::Fallback(self.difference)
            }
        }
    }

    /// Lee una cantidad entera positiva
    pub fn quantity(&self, raw: &str) -> Parsed<u32> {
        match raw.parse::<u32>() {
            Ok(q) if q >= 1 => Parsed::Value(q),
            _ => {
                debug!("Cantidad inválida {:?}, se usa {}", raw, self.quantity);
                Parsed::Fallback(self.quantity)
            }
        }
    }
}
