use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use slotbook_core::models::{
    operator::{CreateOperatorRequest, CreateOperatorResponse},
    response::ApiResponse,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// `POST /operator/add`
#[axum::debug_handler]
pub async fn add_operator(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateOperatorRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CreateOperatorResponse>>, AppError> {
    let Json(payload) = payload?;

    let operator_id = state.service.register_operator(&payload.name).await?;

    Ok(Json(ApiResponse::ok(
        "Operator successfully added",
        CreateOperatorResponse { operator_id },
    )))
}
