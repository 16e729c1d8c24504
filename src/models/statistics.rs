//! Estadísticas de consumo por vehículo

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Resumen de consumo de un vehículo.
///
/// Los campos de MPG son `None` cuando no hay datos suficientes; nunca se
/// usa un valor centinela.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelStatistics {
    // Totales
    pub total_fillups: i64,
    pub total_distance: i64,
    pub total_fuel_used: Decimal,
    pub total_spent: Decimal,

    // Consumo
    pub average_mpg: Option<Decimal>,
    pub best_mpg: Option<Decimal>,
    pub worst_mpg: Option<Decimal>,

    // Precio
    pub average_price_per_unit: Option<Decimal>,
}

impl FuelStatistics {
    /// Estadísticas de un vehículo sin repostajes
    pub fn empty() -> Self {
        Self {
            total_fillups: 0,
            total_distance: 0,
            total_fuel_used: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            average_mpg: None,
            best_mpg: None,
            worst_mpg: None,
            average_price_per_unit: None,
        }
    }
}
