//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL.

pub mod fillup;
pub mod statistics;
pub mod vehicle;

pub use fillup::{Fillup, NewFillup};
pub use statistics::FuelStatistics;
pub use vehicle::{DistanceUnit, FuelUnit, Vehicle};
