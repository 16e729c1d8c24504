use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse, VehicleStatsResponse};
use crate::dto::ApiResponse;
use crate::models::Vehicle;
use crate::repositories::{FillupRepository, VehicleRepository};
use crate::services::EconomyService;
use crate::utils::errors::{not_found_error, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
    economy: EconomyService<FillupRepository>,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            economy: EconomyService::new(FillupRepository::new(pool)),
        }
    }

    async fn find(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<ApiResponse<VehicleResponse>> {
        request.validate()?;

        let vehicle = self.repository.create(request.into()).await?;
        info!("🚗 Vehículo {} creado ({})", vehicle.id, vehicle.name);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<VehicleResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn list(&self) -> AppResult<Vec<VehicleResponse>> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<ApiResponse<VehicleResponse>> {
        request.validate()?;

        let vehicle = self.repository.update(id, request.into()).await?;
        info!("✏️ Vehículo {} actualizado", vehicle.id);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<ApiResponse<()>> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        info!("🗑️ Vehículo {} eliminado junto con sus fillups", id);
        Ok(ApiResponse::message("Vehicle deleted successfully".to_string()))
    }

    pub async fn stats(&self, id: Uuid) -> AppResult<VehicleStatsResponse> {
        let vehicle = self.find(id).await?;
        let stats = self.economy.compute_statistics(vehicle.id).await?;
        Ok(VehicleStatsResponse::new(&vehicle, stats))
    }
}
