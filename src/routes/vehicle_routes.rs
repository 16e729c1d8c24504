use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fillup_controller::FillupController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::fillup_dto::{FillupResponse, RecentFillupsQuery};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse, VehicleStatsResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/stats", get(get_vehicle_stats))
        .route("/:id/fillups", get(list_vehicle_fillups))
        .route("/:id/fillups/recent", get(list_recent_fillups))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn get_vehicle_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleStatsResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.stats(id).await?;
    Ok(Json(response))
}

async fn list_vehicle_fillups(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<FillupResponse>>, AppError> {
    let controller = FillupController::new(state.pool.clone());
    let response = controller.list_by_vehicle(id).await?;
    Ok(Json(response))
}

async fn list_recent_fillups(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RecentFillupsQuery>,
) -> Result<Json<Vec<FillupResponse>>, AppError> {
    let controller = FillupController::new(state.pool.clone());
    let response = controller.list_recent(id, query.limit).await?;
    Ok(Json(response))
}
