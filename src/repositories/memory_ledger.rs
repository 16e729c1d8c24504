//! Ledger en memoria
//!
//! Implementación de `FillupLedger` sobre un `Vec` protegido por `RwLock`.
//! Recorre el historial completo en cada consulta; pensado para tests y
//! herramientas, no para producción.

use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Fillup, NewFillup};
use crate::repositories::fillup_ledger::FillupLedger;
use crate::utils::errors::AppResult;

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    fillups: RwLock<Vec<Fillup>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insertar un repostaje y devolverlo materializado
    pub async fn insert(&self, new_fillup: NewFillup) -> Fillup {
        let fillup = new_fillup.into_fillup();
        self.fillups.write().await.push(fillup.clone());
        fillup
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        let mut fillups = self.fillups.write().await;
        let before = fillups.len();
        fillups.retain(|f| f.id != id);
        fillups.len() != before
    }

    pub async fn len(&self) -> usize {
        self.fillups.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fillups.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl FillupLedger for InMemoryLedger {
    async fn ordered(&self, vehicle_id: Uuid) -> AppResult<Vec<Fillup>> {
        let mut fillups: Vec<Fillup> = self
            .fillups
            .read()
            .await
            .iter()
            .filter(|f| f.vehicle_id == vehicle_id)
            .cloned()
            .collect();

        // sort_by_key es estable: empates de odómetro quedan en orden de inserción
        fillups.sort_by_key(|f| f.odometer);
        Ok(fillups)
    }

    async fn last_full_before(&self, vehicle_id: Uuid, odometer: i64) -> AppResult<Option<Fillup>> {
        let fillups = self.fillups.read().await;
        // max_by_key devuelve el último máximo: en empates gana el más reciente
        let anchor = fillups
            .iter()
            .filter(|f| f.vehicle_id == vehicle_id && !f.is_partial && f.odometer < odometer)
            .max_by_key(|f| f.odometer)
            .cloned();
        Ok(anchor)
    }

    async fn is_recorded(&self, fillup: &Fillup) -> AppResult<bool> {
        let fillups = self.fillups.read().await;
        Ok(fillups.iter().any(|f| {
            f.id == fillup.id && f.vehicle_id == fillup.vehicle_id && f.odometer == fillup.odometer
        }))
    }

    async fn sum_fuel_in_range(
        &self,
        vehicle_id: Uuid,
        low_exclusive: i64,
        high_inclusive: i64,
    ) -> AppResult<Decimal> {
        let fillups = self.fillups.read().await;
        let total = fillups
            .iter()
            .filter(|f| {
                f.vehicle_id == vehicle_id && f.odometer > low_exclusive && f.odometer <= high_inclusive
            })
            .map(|f| f.fuel_volume)
            .sum();
        Ok(total)
    }
}
