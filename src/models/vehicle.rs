//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus enums de unidades.
//! Mapea exactamente a la tabla `vehicles` del schema PostgreSQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Unidad de combustible - mapea al ENUM fuel_unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "fuel_unit", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelUnit {
    Gallons,
    Liters,
}

/// Unidad de distancia - mapea al ENUM distance_unit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "distance_unit", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DistanceUnit {
    Miles,
    Kilometers,
}

/// Vehicle principal - las unidades son inmutables tras la creación
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub fuel_unit: FuelUnit,
    pub distance_unit: DistanceUnit,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&FuelUnit::Gallons).unwrap(), "\"GALLONS\"");
        assert_eq!(serde_json::to_string(&DistanceUnit::Kilometers).unwrap(), "\"KILOMETERS\"");

        let unit: FuelUnit = serde_json::from_str("\"LITERS\"").unwrap();
        assert_eq!(unit, FuelUnit::Liters);
    }
}
