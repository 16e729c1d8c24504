//! Middleware del sistema
//!
//! Este módulo contiene el middleware HTTP compartido por todas las rutas.

pub mod cors;
