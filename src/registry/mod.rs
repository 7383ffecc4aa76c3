//! The seat registry: the persisted seat collection and its sole mutation
//! gateway. All writes go through `book_seats` / `reset_all`; booking runs in
//! a single transaction so a seat can never be booked twice.

pub mod postgres;
pub mod seed;
pub mod sqlite;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::Seat;
use seed::SeedLayout;

#[async_trait]
pub trait SeatRegistry: Send + Sync {
    /// All seats ordered by (section, row, number).
    async fn list_seats(&self) -> Result<Vec<Seat>, AppError>;

    /// Seats of one section, ordered by (row, number). Empty for an unknown
    /// section.
    async fn seats_in_section(&self, section: &str) -> Result<Vec<Seat>, AppError>;

    /// Inserts the layout when the registry holds no seats; otherwise a
    /// no-op. Returns the number of seats inserted.
    async fn seed_if_empty(&self, layout: &SeedLayout) -> Result<u64, AppError>;

    /// Books every listed seat for `booked_by`, or fails without mutating
    /// anything. Already-booked seats produce a `Conflict` naming each one;
    /// unknown ids produce a `Validation` error.
    async fn book_seats(&self, seat_ids: &[i64], booked_by: &str) -> Result<Vec<i64>, AppError>;

    /// Clears every booking. Returns the number of seats touched.
    async fn reset_all(&self) -> Result<u64, AppError>;
}

/// Opens a registry for the given database URL. Postgres URLs get the
/// Postgres backend; anything else is treated as a SQLite path, which is
/// what the tests use (`sqlite::memory:`).
pub async fn connect(url: &str, pool_size: u32) -> Result<Arc<dyn SeatRegistry>, AppError> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        Ok(Arc::new(
            postgres::PostgresSeatRegistry::connect(url, pool_size).await?,
        ))
    } else {
        Ok(Arc::new(sqlite::SqliteSeatRegistry::connect(url).await?))
    }
}

/// Sorted, deduplicated booking request ids.
pub(crate) fn normalize_ids(seat_ids: &[i64]) -> Vec<i64> {
    seat_ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}

pub(crate) fn conflict_message(already_booked: &[&Seat]) -> String {
    let labels: Vec<String> = already_booked.iter().map(|s| s.label()).collect();
    format!("Seats {} are already booked.", labels.join(", "))
}

pub(crate) fn unknown_ids_error(requested: &[i64], found: &[Seat]) -> AppError {
    let found_ids: BTreeSet<i64> = found.iter().map(|s| s.id).collect();
    let missing: Vec<String> = requested
        .iter()
        .filter(|&&id| !found_ids.contains(&id))
        .map(|id| id.to_string())
        .collect();
    AppError::validation(
        format!("Unknown seat ids: {}", missing.join(", ")),
        Some("seatIds"),
    )
}
