//! Modelo de Fillup
//!
//! Un repostaje de un vehículo. El odómetro es la clave de orden para el
//! cálculo de consumo; `filled_at` solo se usa para mostrar.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Fillup principal - mapea exactamente a la tabla fillups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Fillup {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub filled_at: DateTime<Utc>,
    pub odometer: i64,
    pub fuel_volume: Decimal,
    pub price_per_unit: Decimal,
    pub total_cost: Decimal,
    /// Depósito no lleno hasta arriba
    pub is_partial: bool,
    /// El usuario no registró un repostaje anterior
    pub is_missed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos para insertar un nuevo fillup
#[derive(Debug, Clone)]
pub struct NewFillup {
    pub vehicle_id: Uuid,
    pub filled_at: DateTime<Utc>,
    pub odometer: i64,
    pub fuel_volume: Decimal,
    pub price_per_unit: Decimal,
    pub total_cost: Decimal,
    pub is_partial: bool,
    pub is_missed: bool,
}

impl NewFillup {
    /// Repostaje completo con precio unitario derivado del total
    pub fn full(vehicle_id: Uuid, odometer: i64, fuel_volume: Decimal, total_cost: Decimal) -> Self {
        let price_per_unit = if fuel_volume > Decimal::ZERO {
            total_cost / fuel_volume
        } else {
            Decimal::ZERO
        };

        Self {
            vehicle_id,
            filled_at: Utc::now(),
            odometer,
            fuel_volume,
            price_per_unit,
            total_cost,
            is_partial: false,
            is_missed: false,
        }
    }

    pub fn partial(mut self) -> Self {
        self.is_partial = true;
        self
    }

    pub fn missed(mut self) -> Self {
        self.is_missed = true;
        self
    }

    pub fn at(mut self, filled_at: DateTime<Utc>) -> Self {
        self.filled_at = filled_at;
        self
    }

    /// Materializar el fillup con id y timestamps nuevos
    pub fn into_fillup(self) -> Fillup {
        let now = Utc::now();
        Fillup {
            id: Uuid::new_v4(),
            vehicle_id: self.vehicle_id,
            filled_at: self.filled_at,
            odometer: self.odometer,
            fuel_volume: self.fuel_volume,
            price_per_unit: self.price_per_unit,
            total_cost: self.total_cost,
            is_partial: self.is_partial,
            is_missed: self.is_missed,
            created_at: now,
            updated_at: now,
        }
    }
}
