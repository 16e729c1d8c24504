use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Fillup, NewFillup};
use crate::repositories::FillupChanges;
use crate::utils::validation::validate_positive_decimal;

// Request para registrar un repostaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFillupRequest {
    pub vehicle_id: Uuid,

    pub filled_at: DateTime<Utc>,

    #[validate(range(min = 1))]
    pub odometer: i64,

    #[validate(custom = "validate_positive_decimal")]
    pub fuel_volume: Decimal,

    #[validate(custom = "validate_positive_decimal")]
    pub price_per_unit: Decimal,

    #[validate(custom = "validate_positive_decimal")]
    pub total_cost: Decimal,

    #[serde(default)]
    pub is_partial: bool,

    #[serde(default)]
    pub is_missed: bool,
}

impl From<CreateFillupRequest> for NewFillup {
    fn from(request: CreateFillupRequest) -> Self {
        Self {
            vehicle_id: request.vehicle_id,
            filled_at: request.filled_at,
            odometer: request.odometer,
            fuel_volume: request.fuel_volume,
            price_per_unit: request.price_per_unit,
            total_cost: request.total_cost,
            is_partial: request.is_partial,
            is_missed: request.is_missed,
        }
    }
}

// Request para actualizar un repostaje (el vehículo no se puede cambiar)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFillupRequest {
    pub filled_at: Option<DateTime<Utc>>,

    #[validate(range(min = 1))]
    pub odometer: Option<i64>,

    #[validate(custom = "validate_positive_decimal")]
    pub fuel_volume: Option<Decimal>,

    #[validate(custom = "validate_positive_decimal")]
    pub price_per_unit: Option<Decimal>,

    #[validate(custom = "validate_positive_decimal")]
    pub total_cost: Option<Decimal>,

    pub is_partial: Option<bool>,
    pub is_missed: Option<bool>,
}

impl From<UpdateFillupRequest> for FillupChanges {
    fn from(request: UpdateFillupRequest) -> Self {
        Self {
            filled_at: request.filled_at,
            odometer: request.odometer,
            fuel_volume: request.fuel_volume,
            price_per_unit: request.price_per_unit,
            total_cost: request.total_cost,
            is_partial: request.is_partial,
            is_missed: request.is_missed,
        }
    }
}

// Query para listados recientes
#[derive(Debug, Deserialize)]
pub struct RecentFillupsQuery {
    pub limit: Option<i64>,
}

// Response de repostaje con MPG calculado (null si no aplica)
#[derive(Debug, Serialize)]
pub struct FillupResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub filled_at: DateTime<Utc>,
    pub odometer: i64,
    pub fuel_volume: Decimal,
    pub price_per_unit: Decimal,
    pub total_cost: Decimal,
    pub is_partial: bool,
    pub is_missed: bool,
    pub mpg: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FillupResponse {
    pub fn new(fillup: Fillup, mpg: Option<Decimal>) -> Self {
        Self {
            id: fillup.id,
            vehicle_id: fillup.vehicle_id,
            filled_at: fillup.filled_at,
            odometer: fillup.odometer,
            fuel_volume: fillup.fuel_volume,
            price_per_unit: fillup.price_per_unit,
            total_cost: fillup.total_cost,
            is_partial: fillup.is_partial,
            is_missed: fillup.is_missed,
            mpg,
            created_at: fillup.created_at,
            updated_at: fillup.updated_at,
        }
    }
}
