//! Servicio de consumo de combustible
//!
//! Calcula el MPG (distancia / combustible) de cada repostaje y las
//! estadísticas agregadas de un vehículo. Todas las lecturas pasan por un
//! `FillupLedger`; el servicio no guarda estado propio.
//!
//! Reglas del cálculo de MPG:
//! - el volumen de combustible debe ser positivo, incluso para repostajes
//!   parciales o perdidos (error `InvalidInput`)
//! - un repostaje parcial o marcado como perdido no tiene MPG
//! - el ancla es el último repostaje completo con odómetro estrictamente
//!   menor; sin ancla no hay MPG
//! - el combustible es la suma de todos los repostajes en
//!   `(ancla, actual]`, que incluye los parciales intermedios y el actual;
//!   un fillup con ancla que no está en el ledger es `InvalidInput`

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Fillup, FuelStatistics};
use crate::repositories::FillupLedger;
use crate::utils::errors::{AppError, AppResult};

/// Decimales del MPG
pub const MPG_SCALE: u32 = 2;

/// Decimales del precio medio por unidad
pub const PRICE_SCALE: u32 = 3;

fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

pub struct EconomyService<L> {
    ledger: L,
}

impl<L: FillupLedger> EconomyService<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Calcular el MPG de un repostaje ya registrado en el ledger.
    ///
    /// `Ok(None)` significa "sin datos suficientes" y es un estado normal.
    pub async fn compute_mpg(&self, fillup: &Fillup) -> AppResult<Option<Decimal>> {
        // La validación va antes de cualquier atajo
        if fillup.fuel_volume <= Decimal::ZERO {
            return Err(AppError::InvalidInput("fuel volume must be positive".to_string()));
        }

        if fillup.is_partial || fillup.is_missed {
            return Ok(None);
        }

        let anchor = match self.ledger.last_full_before(fillup.vehicle_id, fillup.odometer).await? {
            Some(anchor) => anchor,
            None => {
                debug!("⛽ Fillup {} sin ancla (odómetro {})", fillup.id, fillup.odometer);
                return Ok(None);
            }
        };

        // La suma del rango solo es válida si el propio fillup está en él
        if !self.ledger.is_recorded(fillup).await? {
            return Err(AppError::InvalidInput(format!(
                "fillup {} at odometer {} is not recorded for vehicle {}",
                fillup.id, fillup.odometer, fillup.vehicle_id
            )));
        }

        let distance = fillup.odometer - anchor.odometer;
        let fuel = self
            .ledger
            .sum_fuel_in_range(fillup.vehicle_id, anchor.odometer, fillup.odometer)
            .await?;

        let mpg = Decimal::from(distance)
            .checked_div(fuel)
            .map(|value| round_half_up(value, MPG_SCALE))
            .ok_or_else(|| AppError::Internal("MPG division overflow".to_string()))?;

        debug!(
            "⛽ MPG fillup {}: {} / {} = {} (ancla {})",
            fillup.id, distance, fuel, mpg, anchor.id
        );

        Ok(Some(mpg))
    }

    /// Estadísticas agregadas de un vehículo a partir de su historial ordenado
    pub async fn compute_statistics(&self, vehicle_id: Uuid) -> AppResult<FuelStatistics> {
        let fillups = self.ledger.ordered(vehicle_id).await?;

        let (first, last) = match (fillups.first(), fillups.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(FuelStatistics::empty()),
        };

        let total_fillups = fillups.len() as i64;
        let total_distance = last.odometer - first.odometer;
        let total_fuel_used: Decimal = fillups.iter().map(|f| f.fuel_volume).sum();
        let total_spent: Decimal = fillups.iter().map(|f| f.total_cost).sum();
        let price_sum: Decimal = fillups.iter().map(|f| f.price_per_unit).sum();
        let average_price_per_unit = round_half_up(price_sum / Decimal::from(total_fillups), PRICE_SCALE);

        let mut mpg_values = Vec::new();
        for fillup in &fillups {
            if let Some(mpg) = self.compute_mpg(fillup).await? {
                mpg_values.push(mpg);
            }
        }

        let average_mpg = if mpg_values.is_empty() {
            None
        } else {
            let sum: Decimal = mpg_values.iter().copied().sum();
            Some(round_half_up(sum / Decimal::from(mpg_values.len() as i64), MPG_SCALE))
        };

        debug!(
            "📊 Estadísticas vehículo {}: {} fillups, {} valores MPG",
            vehicle_id,
            total_fillups,
            mpg_values.len()
        );

        Ok(FuelStatistics {
            total_fillups,
            total_distance,
            total_fuel_used,
            total_spent,
            average_mpg,
            best_mpg: mpg_values.iter().max().copied(),
            worst_mpg: mpg_values.iter().min().copied(),
            average_price_per_unit: Some(average_price_per_unit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewFillup;
    use crate::repositories::InMemoryLedger;

    fn d(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    fn service() -> EconomyService<InMemoryLedger> {
        EconomyService::new(InMemoryLedger::new())
    }

    #[tokio::test]
    async fn test_first_fillup_has_no_mpg() {
        let service = service();
        let vehicle = Uuid::new_v4();
        let first = service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;

        assert_eq!(service.compute_mpg(&first).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_partial_fillup_has_no_mpg() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        let partial = service
            .ledger()
            .insert(NewFillup::full(vehicle, 10300, d(5, 0), d(17, 0)).partial())
            .await;

        assert_eq!(service.compute_mpg(&partial).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missed_fillup_has_no_mpg() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        let missed = service
            .ledger()
            .insert(NewFillup::full(vehicle, 10600, d(10, 0), d(35, 0)).missed())
            .await;

        assert_eq!(service.compute_mpg(&missed).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missed_fillup_still_anchors_next() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        service.ledger().insert(NewFillup::full(vehicle, 10600, d(10, 0), d(35, 0)).missed()).await;
        let next = service.ledger().insert(NewFillup::full(vehicle, 10900, d(10, 0), d(35, 0))).await;

        assert_eq!(service.compute_mpg(&next).await.unwrap(), Some(d(3000, 2)));
    }

    #[tokio::test]
    async fn test_returns_none_when_all_previous_were_partial() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(5, 0), d(17, 0)).partial()).await;
        service.ledger().insert(NewFillup::full(vehicle, 10100, d(4, 0), d(14, 0)).partial()).await;
        let current = service.ledger().insert(NewFillup::full(vehicle, 10300, d(10, 0), d(35, 0))).await;

        assert_eq!(service.compute_mpg(&current).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_zero_fuel_volume_is_invalid_even_when_partial() {
        let service = service();
        let vehicle = Uuid::new_v4();

        for fillup in [
            NewFillup::full(vehicle, 10000, Decimal::ZERO, d(1, 0)).into_fillup(),
            NewFillup::full(vehicle, 10000, Decimal::ZERO, d(1, 0)).partial().into_fillup(),
            NewFillup::full(vehicle, 10000, d(-1, 0), d(1, 0)).missed().into_fillup(),
        ] {
            let err = service.compute_mpg(&fillup).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)), "unexpected error: {:?}", err);
        }
    }

    #[tokio::test]
    async fn test_lower_odometer_insert_appears_as_first() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        service.ledger().insert(NewFillup::full(vehicle, 10300, d(10, 0), d(35, 0))).await;
        let older = service.ledger().insert(NewFillup::full(vehicle, 9500, d(10, 0), d(35, 0))).await;

        assert_eq!(service.compute_mpg(&older).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_out_of_order_insert_becomes_new_anchor() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        let latest = service.ledger().insert(NewFillup::full(vehicle, 10400, d(10, 0), d(35, 0))).await;
        assert_eq!(service.compute_mpg(&latest).await.unwrap(), Some(d(4000, 2)));

        service.ledger().insert(NewFillup::full(vehicle, 10200, d(8, 0), d(28, 0))).await;
        assert_eq!(service.compute_mpg(&latest).await.unwrap(), Some(d(2000, 2)));
    }

    #[tokio::test]
    async fn test_unrecorded_fillup_is_invalid_input() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        let detached = NewFillup::full(vehicle, 10300, d(10, 0), d(35, 0)).into_fillup();

        let err = service.compute_mpg(&detached).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_unrecorded_fillup_with_partial_in_range_is_invalid_input() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        service.ledger().insert(NewFillup::full(vehicle, 10150, d(5, 0), d(17, 0)).partial()).await;
        let detached = NewFillup::full(vehicle, 10300, d(10, 0), d(35, 0)).into_fillup();

        let err = service.compute_mpg(&detached).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_stale_odometer_is_invalid_input() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        let mut stale = service.ledger().insert(NewFillup::full(vehicle, 10300, d(10, 0), d(35, 0))).await;
        stale.odometer = 10400;

        let err = service.compute_mpg(&stale).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_compute_mpg_is_repeatable() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 10000, d(10, 0), d(35, 0))).await;
        let current = service.ledger().insert(NewFillup::full(vehicle, 10257, d(9, 0), d(31, 0))).await;

        let first = service.compute_mpg(&current).await.unwrap();
        let second = service.compute_mpg(&current).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Some(d(2856, 2)));
    }

    #[tokio::test]
    async fn test_various_distances_and_volumes() {
        let cases = [
            (10000, 10300, d(100, 1), d(3000, 2)),
            (20000, 20450, d(152, 1), d(2961, 2)),
            (0, 1, d(3, 0), d(33, 2)),
            (5000, 5333, d(120, 1), d(2775, 2)),
        ];

        for (previous, current, fuel, expected) in cases {
            let service = service();
            let vehicle = Uuid::new_v4();
            service.ledger().insert(NewFillup::full(vehicle, previous, d(10, 0), d(35, 0))).await;
            let fillup = service.ledger().insert(NewFillup::full(vehicle, current, fuel, d(35, 0))).await;

            assert_eq!(service.compute_mpg(&fillup).await.unwrap(), Some(expected));
        }
    }

    #[tokio::test]
    async fn test_half_up_rounding() {
        // 1 / 8 = 0.125 -> 0.13
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(vehicle, 100, d(1, 0), d(3, 0))).await;
        let fillup = service.ledger().insert(NewFillup::full(vehicle, 101, d(8, 0), d(24, 0))).await;

        assert_eq!(service.compute_mpg(&fillup).await.unwrap(), Some(d(13, 2)));
    }

    #[tokio::test]
    async fn test_statistics_totals_and_average_price() {
        let service = service();
        let vehicle = Uuid::new_v4();
        let mut first = NewFillup::full(vehicle, 10000, d(10, 0), d(3500, 2));
        first.price_per_unit = d(3500, 3);
        let mut second = NewFillup::full(vehicle, 10300, d(10, 0), d(3600, 2));
        second.price_per_unit = d(3600, 3);
        let mut third = NewFillup::full(vehicle, 10500, d(8, 0), d(2900, 2));
        third.price_per_unit = d(3625, 3);
        for fillup in [first, second, third] {
            service.ledger().insert(fillup).await;
        }

        let stats = service.compute_statistics(vehicle).await.unwrap();
        assert_eq!(stats.total_fillups, 3);
        assert_eq!(stats.total_distance, 500);
        assert_eq!(stats.total_fuel_used, d(28, 0));
        assert_eq!(stats.total_spent, d(10000, 2));
        // (3.500 + 3.600 + 3.625) / 3 = 3.575
        assert_eq!(stats.average_price_per_unit, Some(d(3575, 3)));
        // 30.00 y 25.00
        assert_eq!(stats.average_mpg, Some(d(2750, 2)));
        assert_eq!(stats.best_mpg, Some(d(3000, 2)));
        assert_eq!(stats.worst_mpg, Some(d(2500, 2)));
    }

    #[tokio::test]
    async fn test_statistics_ignore_other_vehicles() {
        let service = service();
        let vehicle = Uuid::new_v4();
        service.ledger().insert(NewFillup::full(Uuid::new_v4(), 10000, d(10, 0), d(35, 0))).await;

        assert_eq!(service.compute_statistics(vehicle).await.unwrap(), FuelStatistics::empty());
    }
}
