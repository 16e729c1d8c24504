use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::fillup_controller::FillupController;
use crate::dto::fillup_dto::{CreateFillupRequest, FillupResponse, UpdateFillupRequest};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fillup_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_fillup))
        .route("/:id", get(get_fillup).put(update_fillup).delete(delete_fillup))
}

async fn create_fillup(
    State(state): State<AppState>,
    Json(request): Json<CreateFillupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FillupResponse>>), AppError> {
    let controller = FillupController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_fillup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FillupResponse>, AppError> {
    let controller = FillupController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_fillup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFillupRequest>,
) -> Result<Json<ApiResponse<FillupResponse>>, AppError> {
    let controller = FillupController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_fillup(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FillupController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
