use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{DistanceUnit, FuelUnit, Vehicle};
use crate::utils::errors::{db_error, not_found_error, AppResult};

/// Datos para crear un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub fuel_unit: FuelUnit,
    pub distance_unit: DistanceUnit,
}

/// Cambios parciales; las unidades no se pueden modificar
#[derive(Debug, Default, Clone)]
pub struct VehicleChanges {
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub vin: Option<String>,
}

#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_vehicle: NewVehicle) -> AppResult<Vehicle> {
        let now = Utc::now();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, name, make, model, year, vin, fuel_unit, distance_unit, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(new_vehicle.name)
        .bind(new_vehicle.make)
        .bind(new_vehicle.model)
        .bind(new_vehicle.year)
        .bind(new_vehicle.vin)
        .bind(new_vehicle.fuel_unit)
        .bind(new_vehicle.distance_unit)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating vehicle", e))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding vehicle", e))?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing vehicles", e))?;

        Ok(vehicles)
    }

    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("checking vehicle", e))?;

        Ok(result.0)
    }

    pub async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, make = $3, model = $4, year = $5, vin = $6, updated_at = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(changes.name.unwrap_or(current.name))
        .bind(changes.make.unwrap_or(current.make))
        .bind(changes.model.unwrap_or(current.model))
        .bind(changes.year.unwrap_or(current.year))
        .bind(changes.vin.or(current.vin))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating vehicle", e))?;

        Ok(vehicle)
    }

    /// Eliminar un vehículo; sus fillups se borran en cascada (FK ON DELETE CASCADE)
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting vehicle", e))?;

        Ok(result.rows_affected() > 0)
    }
}
