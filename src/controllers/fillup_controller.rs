use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::fillup_dto::{CreateFillupRequest, FillupResponse, UpdateFillupRequest};
use crate::dto::ApiResponse;
use crate::models::{Fillup, NewFillup};
use crate::repositories::{FillupRepository, VehicleRepository};
use crate::services::EconomyService;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::clamp_limit;

/// Máximo de repostajes en el listado reciente
pub const MAX_RECENT_FILLUPS: i64 = 50;

pub struct FillupController {
    repository: FillupRepository,
    vehicles: VehicleRepository,
    economy: EconomyService<FillupRepository>,
}

impl FillupController {
    pub fn new(pool: PgPool) -> Self {
        let repository = FillupRepository::new(pool.clone());
        Self {
            economy: EconomyService::new(repository.clone()),
            vehicles: VehicleRepository::new(pool),
            repository,
        }
    }

    async fn to_response(&self, fillup: Fillup) -> AppResult<FillupResponse> {
        let mpg = self.economy.compute_mpg(&fillup).await?;
        Ok(FillupResponse::new(fillup, mpg))
    }

    async fn to_responses(&self, fillups: Vec<Fillup>) -> AppResult<Vec<FillupResponse>> {
        let mut responses = Vec::with_capacity(fillups.len());
        for fillup in fillups {
            responses.push(self.to_response(fillup).await?);
        }
        Ok(responses)
    }

    async fn ensure_vehicle(&self, vehicle_id: Uuid) -> AppResult<()> {
        if !self.vehicles.exists(vehicle_id).await? {
            return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateFillupRequest) -> AppResult<ApiResponse<FillupResponse>> {
        request.validate()?;
        self.ensure_vehicle(request.vehicle_id).await?;

        // El odómetro debe avanzar respecto al último repostaje por fecha
        if let Some(previous) = self.repository.find_most_recent_by_vehicle(request.vehicle_id).await? {
            if request.odometer <= previous.odometer {
                return Err(AppError::InvalidOdometer {
                    new: request.odometer,
                    previous: previous.odometer,
                });
            }
        }

        let fillup = self.repository.create(NewFillup::from(request)).await?;
        info!(
            "⛽ Fillup {} registrado para vehículo {} (odómetro {})",
            fillup.id, fillup.vehicle_id, fillup.odometer
        );

        let response = self.to_response(fillup).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Fillup created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<FillupResponse> {
        let fillup = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Fillup", &id.to_string()))?;

        self.to_response(fillup).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateFillupRequest) -> AppResult<ApiResponse<FillupResponse>> {
        request.validate()?;

        let fillup = self.repository.update(id, request.into()).await?;
        info!("✏️ Fillup {} actualizado", fillup.id);

        let response = self.to_response(fillup).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Fillup updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Fillup", &id.to_string()));
        }

        info!("🗑️ Fillup {} eliminado", id);
        Ok(ApiResponse::message("Fillup deleted successfully".to_string()))
    }

    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<FillupResponse>> {
        self.ensure_vehicle(vehicle_id).await?;
        let fillups = self.repository.find_by_vehicle_date_desc(vehicle_id).await?;
        self.to_responses(fillups).await
    }

    pub async fn list_recent(&self, vehicle_id: Uuid, limit: Option<i64>) -> AppResult<Vec<FillupResponse>> {
        self.ensure_vehicle(vehicle_id).await?;
        let limit = clamp_limit(limit, MAX_RECENT_FILLUPS);
        let fillups = self.repository.find_recent_by_vehicle(vehicle_id, limit).await?;
        self.to_responses(fillups).await
    }
}
