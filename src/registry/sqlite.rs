use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::Seat;

use super::seed::SeedLayout;
use super::{conflict_message, normalize_ids, unknown_ids_error, SeatRegistry};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS seats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    section TEXT NOT NULL,
    "row" TEXT NOT NULL,
    "number" INTEGER NOT NULL,
    is_booked BOOLEAN NOT NULL DEFAULT FALSE,
    booked_by TEXT,
    UNIQUE (section, "row", "number")
)
"#;

pub struct SqliteSeatRegistry {
    pool: SqlitePool,
}

impl SqliteSeatRegistry {
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // A single connection keeps an in-memory database shared and
        // serializes writers, matching the one-writer model of SQLite.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .connect_with(options)
            .await?;
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[async_trait]
impl SeatRegistry for SqliteSeatRegistry {
    async fn list_seats(&self) -> Result<Vec<Seat>, AppError> {
        let seats = sqlx::query_as::<_, Seat>(
            r#"SELECT id, section, "row", "number", is_booked, booked_by
               FROM seats
               ORDER BY section, "row", "number""#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn seats_in_section(&self, section: &str) -> Result<Vec<Seat>, AppError> {
        let seats = sqlx::query_as::<_, Seat>(
            r#"SELECT id, section, "row", "number", is_booked, booked_by
               FROM seats
               WHERE section = ?
               ORDER BY "row", "number""#,
        )
        .bind(section)
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn seed_if_empty(&self, layout: &SeedLayout) -> Result<u64, AppError> {
        let mut tx = self.pool.begin().await?;

        let occupied = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM seats)")
            .fetch_one(&mut *tx)
            .await?;
        if occupied {
            return Ok(0);
        }

        let mut inserted = 0u64;
        for seat in layout.seats() {
            sqlx::query(r#"INSERT INTO seats (section, "row", "number") VALUES (?, ?, ?)"#)
                .bind(&seat.section)
                .bind(&seat.row)
                .bind(seat.number)
                .execute(&mut *tx)
                .await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn book_seats(&self, seat_ids: &[i64], booked_by: &str) -> Result<Vec<i64>, AppError> {
        if seat_ids.is_empty() {
            return Err(AppError::validation(
                "At least one seat must be selected",
                Some("seatIds"),
            ));
        }
        let ids = normalize_ids(seat_ids);

        let mut tx = self.pool.begin().await?;

        let select = format!(
            r#"SELECT id, section, "row", "number", is_booked, booked_by
               FROM seats WHERE id IN ({}) ORDER BY id"#,
            placeholders(ids.len())
        );
        let mut query = sqlx::query_as::<_, Seat>(&select);
        for id in &ids {
            query = query.bind(id);
        }
        let current = query.fetch_all(&mut *tx).await?;

        if current.len() != ids.len() {
            return Err(unknown_ids_error(&ids, &current));
        }

        let already_booked: Vec<&Seat> = current.iter().filter(|s| s.is_booked).collect();
        if !already_booked.is_empty() {
            return Err(AppError::Conflict(conflict_message(&already_booked)));
        }

        let update = format!(
            "UPDATE seats SET is_booked = TRUE, booked_by = ?
             WHERE id IN ({}) AND is_booked = FALSE",
            placeholders(ids.len())
        );
        let mut query = sqlx::query(&update).bind(booked_by);
        for id in &ids {
            query = query.bind(id);
        }
        let result = query.execute(&mut *tx).await?;
        if result.rows_affected() != ids.len() as u64 {
            // A writer slipped in between the check and the update.
            return Err(AppError::Conflict(
                "Seats were booked by another request.".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(ids)
    }

    async fn reset_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE seats SET is_booked = FALSE, booked_by = NULL")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
