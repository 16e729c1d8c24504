//! Contrato de consultas ordenadas sobre los repostajes de un vehículo
//!
//! El cálculo de consumo solo depende de este trait, de modo que puede
//! ejecutarse contra PostgreSQL o contra un ledger en memoria.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::Fillup;
use crate::utils::errors::AppResult;

#[async_trait::async_trait]
pub trait FillupLedger: Send + Sync {
    /// Todos los repostajes del vehículo, ordenados por odómetro ascendente
    async fn ordered(&self, vehicle_id: Uuid) -> AppResult<Vec<Fillup>>;

    /// Repostaje completo (no parcial) con el mayor odómetro estrictamente
    /// menor que `odometer`
    async fn last_full_before(&self, vehicle_id: Uuid, odometer: i64) -> AppResult<Option<Fillup>>;

    /// Si el ledger contiene este repostaje (mismo id, vehículo y odómetro)
    async fn is_recorded(&self, fillup: &Fillup) -> AppResult<bool>;

    /// Suma de combustible con odómetro en `(low_exclusive, high_inclusive]`.
    /// Devuelve cero si no hay repostajes en el rango.
    async fn sum_fuel_in_range(
        &self,
        vehicle_id: Uuid,
        low_exclusive: i64,
        high_inclusive: i64,
    ) -> AppResult<Decimal>;
}
