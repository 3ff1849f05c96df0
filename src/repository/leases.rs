//! Leases repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{lease::Lease, schedule::ScheduleValidationResult},
};

#[derive(Clone)]
pub struct LeasesRepository {
    pool: Pool<Postgres>,
}

impl LeasesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get lease by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Lease> {
        sqlx::query_as::<_, Lease>("SELECT * FROM leases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Lease {} not found", id)))
    }

    /// Store the weekly occupancy derived from a validated selection
    pub async fn update_schedule(
        &self,
        id: &str,
        schedule: &ScheduleValidationResult,
    ) -> AppResult<Lease> {
        let selected_days: Vec<i16> = schedule.selected_days.iter().map(|&d| i16::from(d)).collect();

        sqlx::query_as::<_, Lease>(
            r#"
            UPDATE leases
            SET nights_per_week = $2, check_in_day = $3, check_out_day = $4,
                selected_days = $5, modif_date = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(i16::from(schedule.nights_count))
        .bind(schedule.check_in_day.map(i16::from))
        .bind(schedule.check_out_day.map(i16::from))
        .bind(selected_days)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Lease {} not found", id)))
    }
}
