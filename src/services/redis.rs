//! Redis service for shared request counters

use redis::{Client, Pipeline};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisService {
    client: Client,
}

impl RedisService {
    /// Create a new Redis service
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    /// Increment a windowed counter; the window starts with the first hit
    pub async fn increment_window(&self, key: &str, ttl_seconds: u64) -> AppResult<u64> {
        let mut conn = self.get_connection().await?;

        let (count,): (u64,) = window_pipeline(key, ttl_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to increment counter in Redis: {}", e)))?;

        Ok(count)
    }

    /// Get a Redis connection (for advanced operations)
    pub async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))
    }
}

/// Create the counter with its expiry if absent, then count the hit, in one transaction
fn window_pipeline(key: &str, ttl_seconds: u64) -> Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0)
        .arg("NX")
        .arg("EX")
        .arg(ttl_seconds.max(1))
        .ignore()
        .incr(key, 1u64);
    pipe
}
