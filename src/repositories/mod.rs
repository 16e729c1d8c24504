//! Repositorios
//!
//! Acceso a datos sobre PostgreSQL y el contrato de ledger consumido por el
//! cálculo de consumo.

pub mod fillup_ledger;
pub mod fillup_repository;
pub mod memory_ledger;
pub mod vehicle_repository;

pub use fillup_ledger::FillupLedger;
pub use fillup_repository::{FillupChanges, FillupRepository};
pub use memory_ledger::InMemoryLedger;
pub use vehicle_repository::{NewVehicle, VehicleChanges, VehicleRepository};
