use super::error::ApiResult;
use super::{ApiError, AppState};
use crate::pipeline::{OrderAck, PlaceOrderRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

/// `POST /place-order`
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> ApiResult<Json<OrderAck>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let ack = state.pipeline.place_order(request).await?;
    Ok(Json(ack))
}
