//! Fuel Ledger
//!
//! Registro de repostajes por vehículo y cálculo de consumo (MPG).

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
