//! Listings repository (booking constraints only)

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::lease::Listing,
};

#[derive(Clone)]
pub struct ListingsRepository {
    pool: Pool<Postgres>,
}

impl ListingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get listing by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            r#"
            SELECT id, name, minimum_nights, maximum_nights, days_available, crea_date
            FROM listings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {} not found", id)))
    }
}
