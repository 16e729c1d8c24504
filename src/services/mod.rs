//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el cálculo
//! de consumo y las estadísticas por vehículo.

pub mod economy_service;

pub use economy_service::EconomyService;
