use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{DistanceUnit, FuelStatistics, FuelUnit, Vehicle};
use crate::repositories::{NewVehicle, VehicleChanges};
use crate::utils::validation::validate_not_blank;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub make: String,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(length(max = 17))]
    pub vin: Option<String>,

    pub fuel_unit: FuelUnit,
    pub distance_unit: DistanceUnit,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            name: request.name,
            make: request.make,
            model: request.model,
            year: request.year,
            vin: request.vin,
            fuel_unit: request.fuel_unit,
            distance_unit: request.distance_unit,
        }
    }
}

// Request para actualizar un vehículo (las unidades son inmutables)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100), custom = "validate_not_blank")]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(max = 17))]
    pub vin: Option<String>,
}

impl From<UpdateVehicleRequest> for VehicleChanges {
    fn from(request: UpdateVehicleRequest) -> Self {
        Self {
            name: request.name,
            make: request.make,
            model: request.model,
            year: request.year,
            vin: request.vin,
        }
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
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

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            fuel_unit: vehicle.fuel_unit,
            distance_unit: vehicle.distance_unit,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

// Response de estadísticas; los MPG ausentes se serializan como null
#[derive(Debug, Serialize)]
pub struct VehicleStatsResponse {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub total_fillups: i64,
    pub total_distance: i64,
    pub total_fuel_used: Decimal,
    pub total_spent: Decimal,
    pub average_mpg: Option<Decimal>,
    pub best_mpg: Option<Decimal>,
    pub worst_mpg: Option<Decimal>,
    pub average_price_per_unit: Option<Decimal>,
}

impl VehicleStatsResponse {
    pub fn new(vehicle: &Vehicle, stats: FuelStatistics) -> Self {
        Self {
            vehicle_id: vehicle.id,
            vehicle_name: vehicle.name.clone(),
            total_fillups: stats.total_fillups,
            total_distance: stats.total_distance,
            total_fuel_used: stats.total_fuel_used,
            total_spent: stats.total_spent,
            average_mpg: stats.average_mpg,
            best_mpg: stats.best_mpg,
            worst_mpg: stats.worst_mpg,
            average_price_per_unit: stats.average_price_per_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_vehicle_validation() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "name": "Daily",
            "make": "Honda",
            "model": "Civic",
            "year": 1850,
            "vin": "1HGCM82633A0043521234",
            "fuel_unit": "GALLONS",
            "distance_unit": "MILES"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("year"));
        assert!(fields.contains_key("vin"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "name": "   ",
            "make": "Honda",
            "model": "Civic",
            "year": 2020,
            "fuel_unit": "LITERS",
            "distance_unit": "KILOMETERS"
        }))
        .unwrap();

        assert!(request.validate().unwrap_err().field_errors().contains_key("name"));
    }

    #[test]
    fn test_blank_fields_are_rejected_on_update() {
        let request: UpdateVehicleRequest = serde_json::from_value(json!({
            "name": "   ",
            "make": "\t",
            "model": "Civic"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("make"));
        assert!(!fields.contains_key("model"));
    }

    #[test]
    fn test_update_without_fields_is_valid() {
        let request: UpdateVehicleRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_stats_response_serializes_null_mpg() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: "Daily".to_string(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2020,
            vin: None,
            fuel_unit: FuelUnit::Gallons,
            distance_unit: DistanceUnit::Miles,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let body = serde_json::to_value(VehicleStatsResponse::new(&vehicle, FuelStatistics::empty())).unwrap();
        assert_eq!(body["total_fillups"], json!(0));
        assert!(body["average_mpg"].is_null());
        assert!(body["best_mpg"].is_null());
        assert!(body["worst_mpg"].is_null());
        assert!(body["average_price_per_unit"].is_null());
    }
}
