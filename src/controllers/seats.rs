use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::finder;
use crate::models::Seat;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(list_seats))
        .route("/seats/find", get(find_seats))
}

// GET /api/seats
async fn list_seats(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Seat>>, AppError> {
    let seats = state.registry.list_seats().await?;
    Ok(Json(seats))
}

// GET /api/seats/find?section=Royal&count=3
#[derive(Debug, Deserialize, Validate)]
struct FindSeatsQuery {
    #[validate(length(min = 1, message = "Invalid section or count"))]
    section: String,
    #[validate(range(min = 1, message = "Invalid section or count"))]
    count: u32,
}

async fn find_seats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FindSeatsQuery>,
) -> Result<Json<Vec<Seat>>, AppError> {
    params.validate()?;

    let seats = state.registry.seats_in_section(&params.section).await?;
    let block = finder::find_best_block(&seats, params.count as usize).ok_or_else(|| {
        AppError::NotFound("No continuous block available in selected tier".to_string())
    })?;
    Ok(Json(block.to_vec()))
}
