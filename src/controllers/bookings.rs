use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/reset", post(reset_bookings))
}

// POST /api/bookings
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
struct BookSeatsRequest {
    #[validate(length(min = 1, message = "At least one seat must be selected"))]
    seat_ids: Vec<i64>,
    #[validate(length(min = 1, message = "Name is required"))]
    booked_by: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookSeatsResponse {
    message: String,
    booked_seats: Vec<i64>,
}

async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BookSeatsRequest>,
) -> Result<Json<BookSeatsResponse>, AppError> {
    req.validate()?;
    if req.seat_ids.iter().any(|&id| id <= 0) {
        return Err(AppError::validation(
            "Seat ids must be positive",
            Some("seatIds"),
        ));
    }

    let booked = state.registry.book_seats(&req.seat_ids, &req.booked_by).await?;
    info!("Booked {} seats for {}", booked.len(), req.booked_by);

    Ok(Json(BookSeatsResponse {
        message: "Booking successful".to_string(),
        booked_seats: booked,
    }))
}

// POST /api/reset
async fn reset_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cleared = state.registry.reset_all().await?;
    info!("Cleared bookings on {} seats", cleared);
    Ok(Json(serde_json::json!({ "message": "All bookings cleared" })))
}
