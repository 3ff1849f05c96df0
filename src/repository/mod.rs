//! Repository layer for database operations

pub mod leases;
pub mod listings;
pub mod payments;
pub mod pricing;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub leases: leases::LeasesRepository,
    pub listings: listings::ListingsRepository,
    pub payments: payments::PaymentRecordsRepository,
    pub pricing: pricing::PricingRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            leases: leases::LeasesRepository::new(pool.clone()),
            listings: listings::ListingsRepository::new(pool.clone()),
            payments: payments::PaymentRecordsRepository::new(pool.clone()),
            pricing: pricing::PricingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
