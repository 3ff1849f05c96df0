//! Payment records repository
//!
//! Payment records are append-only. Writing a schedule inserts every cycle
//! and updates the parent lease in one transaction, so a schedule is either
//! fully stored or not stored at all.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::payment::PaymentRecord,
};

/// Storage the payment schedule service writes through
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRecordStore: Send + Sync {
    async fn lease_exists(&self, lease_id: &str) -> AppResult<bool>;

    /// Insert all records and set the lease aggregate, all-or-nothing
    async fn insert_schedule(
        &self,
        lease_id: &str,
        records: &[PaymentRecord],
        total_compensation: Decimal,
    ) -> AppResult<()>;

    async fn list_for_lease(&self, lease_id: &str) -> AppResult<Vec<PaymentRecord>>;
}

#[derive(Clone)]
pub struct PaymentRecordsRepository {
    pool: Pool<Postgres>,
}

impl PaymentRecordsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn sync_error(step: &str, e: sqlx::Error) -> AppError {
    AppError::Sync(format!("{} failed: {}", step, e))
}

#[async_trait]
impl PaymentRecordStore for PaymentRecordsRepository {
    async fn lease_exists(&self, lease_id: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM leases WHERE id = $1)")
            .bind(lease_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_schedule(
        &self,
        lease_id: &str,
        records: &[PaymentRecord],
        total_compensation: Decimal,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| sync_error("Opening transaction", e))?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            r#"
            INSERT INTO payment_records (
                id, lease_id, cycle_number, scheduled_date,
                rent_amount, maintenance_fee, total_amount, damage_deposit
            )
            "#,
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(record.id.clone())
                .push_bind(record.lease_id.clone())
                .push_bind(record.cycle_number)
                .push_bind(record.scheduled_date)
                .push_bind(record.rent_amount)
                .push_bind(record.maintenance_fee)
                .push_bind(record.total_amount)
                .push_bind(record.damage_deposit);
        });
        builder
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| sync_error("Payment record batch insert", e))?;

        let ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        let updated = sqlx::query(
            r#"
            UPDATE leases
            SET total_compensation = $2, payment_record_ids = $3, modif_date = $4
            WHERE id = $1
            "#,
        )
        .bind(lease_id)
        .bind(total_compensation)
        .bind(&ids)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(|e| sync_error("Lease update", e))?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls the inserts back
            return Err(AppError::NotFound(format!("Lease {} not found", lease_id)));
        }

        tx.commit()
            .await
            .map_err(|e| sync_error("Commit", e))?;
        Ok(())
    }

    async fn list_for_lease(&self, lease_id: &str) -> AppResult<Vec<PaymentRecord>> {
        let rows = sqlx::query_as::<_, PaymentRecord>(
            r#"
            SELECT * FROM payment_records
            WHERE lease_id = $1
            ORDER BY crea_date, cycle_number
            "#,
        )
        .bind(lease_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
