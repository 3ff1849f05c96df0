//! Pricing tier selections repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::pricing::TierSelection,
};

#[derive(Clone)]
pub struct PricingRepository {
    pool: Pool<Postgres>,
}

impl PricingRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Store a tier selection; when it belongs to a date-change request the
    /// request takes the chosen tier's price in the same transaction.
    pub async fn record_selection(&self, selection: &TierSelection) -> AppResult<TierSelection> {
        let mut tx = self.pool.begin().await?;

        if let Some(ref request_id) = selection.date_change_request_id {
            let result = sqlx::query(
                r#"
                UPDATE date_change_requests
                SET price_cents = $2, selected_tier = $3, modif_date = $4
                WHERE id = $1
                "#,
            )
            .bind(request_id)
            .bind(selection.price_cents)
            .bind(&selection.tier_id)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound(format!(
                    "Date change request {} not found",
                    request_id
                )));
            }
        }

        let row = sqlx::query_as::<_, TierSelection>(
            r#"
            INSERT INTO pricing_tier_selections (
                id, tier_id, price_cents, base_price_cents, anchor_price_cents,
                urgency_multiplier, date_change_request_id, session_id, user_agent,
                referrer, selected_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(selection.id)
        .bind(&selection.tier_id)
        .bind(selection.price_cents)
        .bind(selection.base_price_cents)
        .bind(selection.anchor_price_cents)
        .bind(selection.urgency_multiplier)
        .bind(&selection.date_change_request_id)
        .bind(&selection.session_id)
        .bind(&selection.user_agent)
        .bind(&selection.referrer)
        .bind(selection.selected_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }
}
