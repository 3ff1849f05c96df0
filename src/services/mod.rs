//! Business logic services

pub mod ids;
pub mod payments;
pub mod pricing;
pub mod rate_limit;
pub mod redis;
pub mod schedules;

use std::{sync::Arc, time::Duration};

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub schedules: schedules::SchedulesService,
    pub payments: payments::PaymentsService,
    pub pricing: pricing::PricingService,
    /// Absent when rate limiting is disabled
    pub rate_limiter: Option<rate_limit::RateLimiter>,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        config: &AppConfig,
        counter_store: Arc<dyn rate_limit::CounterStore>,
    ) -> AppResult<Self> {
        let ids = ids::SnowflakeIdGenerator::new(config.ids.instance_id)?;

        let rate_limiter = config.rate_limit.enabled.then(|| {
            rate_limit::RateLimiter::new(
                counter_store,
                config.rate_limit.max_requests,
                Duration::from_secs(config.rate_limit.window_seconds),
            )
        });

        Ok(Self {
            schedules: schedules::SchedulesService::new(
                repository.clone(),
                config.scheduling.soft_constraint_policy,
            ),
            payments: payments::PaymentsService::new(
                Arc::new(repository.payments.clone()),
                Arc::new(ids),
            ),
            pricing: pricing::PricingService::new(repository.clone()),
            rate_limiter,
            repository,
        })
    }

    /// Check the database answers
    pub async fn ping_database(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
