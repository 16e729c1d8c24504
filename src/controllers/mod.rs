//! Controllers
//!
//! Orquestan repositorios y servicios para cada recurso de la API.

pub mod fillup_controller;
pub mod vehicle_controller;
