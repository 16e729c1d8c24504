//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializadas con serde.

pub mod api_response;
pub mod fillup_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
