use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Fillup, NewFillup};
use crate::repositories::fillup_ledger::FillupLedger;
use crate::utils::errors::{db_error, not_found_error, AppResult};

/// Cambios parciales sobre un fillup existente
#[derive(Debug, Default, Clone)]
pub struct FillupChanges {
    pub filled_at: Option<DateTime<Utc>>,
    pub odometer: Option<i64>,
    pub fuel_volume: Option<Decimal>,
    pub price_per_unit: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub is_partial: Option<bool>,
    pub is_missed: Option<bool>,
}

#[derive(Clone)]
pub struct FillupRepository {
    pool: PgPool,
}

impl FillupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_fillup: NewFillup) -> AppResult<Fillup> {
        let now = Utc::now();

        let fillup = sqlx::query_as::<_, Fillup>(
            r#"
            INSERT INTO fillups (id, vehicle_id, filled_at, odometer, fuel_volume, price_per_unit, total_cost, is_partial, is_missed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(new_fillup.vehicle_id)
        .bind(new_fillup.filled_at)
        .bind(new_fillup.odometer)
        .bind(new_fillup.fuel_volume)
        .bind(new_fillup.price_per_unit)
        .bind(new_fillup.total_cost)
        .bind(new_fillup.is_partial)
        .bind(new_fillup.is_missed)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating fillup", e))?;

        Ok(fillup)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Fillup>> {
        let fillup = sqlx::query_as::<_, Fillup>("SELECT * FROM fillups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding fillup", e))?;

        Ok(fillup)
    }

    /// Historial del vehículo por fecha, más reciente primero
    pub async fn find_by_vehicle_date_desc(&self, vehicle_id: Uuid) -> AppResult<Vec<Fillup>> {
        let fillups = sqlx::query_as::<_, Fillup>(
            "SELECT * FROM fillups WHERE vehicle_id = $1 ORDER BY filled_at DESC"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing fillups", e))?;

        Ok(fillups)
    }

    pub async fn find_recent_by_vehicle(&self, vehicle_id: Uuid, limit: i64) -> AppResult<Vec<Fillup>> {
        let fillups = sqlx::query_as::<_, Fillup>(
            "SELECT * FROM fillups WHERE vehicle_id = $1 ORDER BY filled_at DESC LIMIT $2"
        )
        .bind(vehicle_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing recent fillups", e))?;

        Ok(fillups)
    }

    /// Último repostaje por fecha (para validar la progresión del odómetro)
    pub async fn find_most_recent_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<Fillup>> {
        let fillup = sqlx::query_as::<_, Fillup>(
            "SELECT * FROM fillups WHERE vehicle_id = $1 ORDER BY filled_at DESC LIMIT 1"
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding most recent fillup", e))?;

        Ok(fillup)
    }

    pub async fn update(&self, id: Uuid, changes: FillupChanges) -> AppResult<Fillup> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fillup", &id.to_string()))?;

        let fillup = sqlx::query_as::<_, Fillup>(
            r#"
            UPDATE fillups
            SET filled_at = $2, odometer = $3, fuel_volume = $4, price_per_unit = $5, total_cost = $6,
                is_partial = $7, is_missed = $8, updated_at = $9
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(changes.filled_at.unwrap_or(current.filled_at))
        .bind(changes.odometer.unwrap_or(current.odometer))
        .bind(changes.fuel_volume.unwrap_or(current.fuel_volume))
        .bind(changes.price_per_unit.unwrap_or(current.price_per_unit))
        .bind(changes.total_cost.unwrap_or(current.total_cost))
        .bind(changes.is_partial.unwrap_or(current.is_partial))
        .bind(changes.is_missed.unwrap_or(current.is_missed))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating fillup", e))?;

        Ok(fillup)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM fillups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting fillup", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl FillupLedger for FillupRepository {
    async fn ordered(&self, vehicle_id: Uuid) -> AppResult<Vec<Fillup>> {
        let fillups = sqlx::query_as::<_, Fillup>(
            "SELECT * FROM fillups WHERE vehicle_id = $1 ORDER BY odometer ASC, created_at ASC"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading ordered fillups", e))?;

        Ok(fillups)
    }

    async fn last_full_before(&self, vehicle_id: Uuid, odometer: i64) -> AppResult<Option<Fillup>> {
        let anchor = sqlx::query_as::<_, Fillup>(
            r#"
            SELECT * FROM fillups
            WHERE vehicle_id = $1 AND odometer < $2 AND is_partial = false
            ORDER BY odometer DESC, created_at DESC
            LIMIT 1
            "#
        )
        .bind(vehicle_id)
        .bind(odometer)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding anchor fillup", e))?;

        Ok(anchor)
    }

    async fn is_recorded(&self, fillup: &Fillup) -> AppResult<bool> {
        let recorded: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM fillups WHERE id = $1 AND vehicle_id = $2 AND odometer = $3)"
        )
        .bind(fillup.id)
        .bind(fillup.vehicle_id)
        .bind(fillup.odometer)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("checking recorded fillup", e))?;

        Ok(recorded)
    }

    async fn sum_fuel_in_range(
        &self,
        vehicle_id: Uuid,
        low_exclusive: i64,
        high_inclusive: i64,
    ) -> AppResult<Decimal> {
        let total: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(fuel_volume), 0) FROM fillups
            WHERE vehicle_id = $1 AND odometer > $2 AND odometer <= $3
            "#
        )
        .bind(vehicle_id)
        .bind(low_exclusive)
        .bind(high_inclusive)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("summing fuel volume", e))?;

        Ok(total)
    }
}
