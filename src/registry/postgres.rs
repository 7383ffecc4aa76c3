use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::error::AppError;
use crate::models::Seat;

use super::seed::SeedLayout;
use super::{conflict_message, normalize_ids, unknown_ids_error, SeatRegistry};

pub struct PostgresSeatRegistry {
    pool: PgPool,
}

impl PostgresSeatRegistry {
    pub async fn connect(url: &str, pool_size: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;

        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;
        info!("Migrations completed");

        Ok(Self { pool })
    }
}

#[async_trait]
impl SeatRegistry for PostgresSeatRegistry {
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
               WHERE section = $1
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
            sqlx::query(r#"INSERT INTO seats (section, "row", "number") VALUES ($1, $2, $3)"#)
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

        // Lock in id order so overlapping bookings cannot deadlock.
        let current = sqlx::query_as::<_, Seat>(
            r#"SELECT id, section, "row", "number", is_booked, booked_by
               FROM seats
               WHERE id = ANY($1)
               ORDER BY id
               FOR UPDATE"#,
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?;

        if current.len() != ids.len() {
            return Err(unknown_ids_error(&ids, &current));
        }

        let already_booked: Vec<&Seat> = current.iter().filter(|s| s.is_booked).collect();
        if !already_booked.is_empty() {
            return Err(AppError::Conflict(conflict_message(&already_booked)));
        }

        sqlx::query(
            "UPDATE seats SET is_booked = TRUE, booked_by = $1
             WHERE id = ANY($2) AND is_booked = FALSE",
        )
        .bind(booked_by)
        .bind(&ids)
        .execute(&mut *tx)
        .await?;

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
