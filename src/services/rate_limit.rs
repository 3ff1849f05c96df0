//! Fixed-window request rate limiting
//!
//! The counter backend is injected: an in-process map for single instances,
//! or Redis when several instances share one budget.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};

use super::redis::RedisService;

/// Windowed hit counters keyed by client
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Count one hit for `key` and return the hits in the current window.
    /// A window opens on the first hit and lasts `ttl`.
    async fn increment(&self, key: &str, ttl: Duration) -> AppResult<u64>;
}

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Windows {
    counters: HashMap<String, (u64, Instant)>,
    last_sweep: Instant,
}

/// In-process counters. Expired windows restart on the next hit and are
/// swept from the map at most once per sweep interval.
pub struct MemoryCounterStore {
    windows: Mutex<Windows>,
    sweep_interval: Duration,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::with_sweep_interval(SWEEP_INTERVAL)
    }
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sweep_interval(sweep_interval: Duration) -> Self {
        Self {
            windows: Mutex::new(Windows {
                counters: HashMap::new(),
                last_sweep: Instant::now(),
            }),
            sweep_interval,
        }
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> AppResult<u64> {
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .map_err(|_| AppError::Internal("Rate limit counters poisoned".to_string()))?;

        if now.duration_since(windows.last_sweep) >= self.sweep_interval {
            windows.counters.retain(|_, (_, expires_at)| *expires_at > now);
            windows.last_sweep = now;
        }

        let entry = windows
            .counters
            .entry(key.to_string())
            .or_insert((0, now + ttl));
        if entry.1 <= now {
            *entry = (0, now + ttl);
        }
        entry.0 += 1;
        Ok(entry.0)
    }
}

/// Counters shared through Redis
pub struct RedisCounterStore {
    redis: RedisService,
    prefix: String,
}

impl RedisCounterStore {
    pub fn new(redis: RedisService) -> Self {
        Self {
            redis,
            prefix: "ratelimit".to_string(),
        }
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn increment(&self, key: &str, ttl: Duration) -> AppResult<u64> {
        let key = format!("{}:{}", self.prefix, key);
        self.redis.increment_window(&key, ttl.as_secs().max(1)).await
    }
}

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    max_requests: u64,
    window: Duration,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CounterStore>, max_requests: u64, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
        }
    }

    /// Count a request from `client`, failing once its window budget is spent
    pub async fn check(&self, client: &str) -> AppResult<()> {
        let hits = self.store.increment(client, self.window).await?;
        if hits > self.max_requests {
            tracing::warn!(client = %client, hits, "Rate limit exceeded");
            return Err(AppError::RateLimited(format!(
                "More than {} requests in {} seconds",
                self.max_requests,
                self.window.as_secs()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn limiter(max_requests: u64, window: Duration) -> RateLimiter {
        RateLimiter::new(Arc::new(MemoryCounterStore::new()), max_requests, window)
    }

    #[test]
    fn test_allows_up_to_budget() {
        let limiter = limiter(3, Duration::from_secs(60));
        for _ in 0..3 {
            assert!(block_on(limiter.check("10.0.0.1")).is_ok());
        }
        let err = block_on(limiter.check("10.0.0.1")).unwrap_err();
        assert!(matches!(err, AppError::RateLimited(_)));
    }

    #[test]
    fn test_clients_are_counted_separately() {
        let limiter = limiter(1, Duration::from_secs(60));
        assert!(block_on(limiter.check("a")).is_ok());
        assert!(block_on(limiter.check("b")).is_ok());
        assert!(block_on(limiter.check("a")).is_err());
    }

    #[test]
    fn test_window_expires() {
        let limiter = limiter(1, Duration::from_millis(20));
        assert!(block_on(limiter.check("a")).is_ok());
        assert!(block_on(limiter.check("a")).is_err());
        std::thread::sleep(Duration::from_millis(40));
        assert!(block_on(limiter.check("a")).is_ok());
    }

    #[test]
    fn test_expired_windows_are_evicted() {
        let store = MemoryCounterStore::with_sweep_interval(Duration::from_millis(10));
        block_on(store.increment("old", Duration::from_millis(10))).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        block_on(store.increment("new", Duration::from_secs(60))).unwrap();
        assert_eq!(store.windows.lock().unwrap().counters.len(), 1);
    }

    #[test]
    fn test_no_sweep_before_interval() {
        let store = MemoryCounterStore::new();
        block_on(store.increment("old", Duration::from_millis(10))).unwrap();
        std::thread::sleep(Duration::from_millis(20));
        block_on(store.increment("new", Duration::from_secs(60))).unwrap();
        assert_eq!(store.windows.lock().unwrap().counters.len(), 2);
    }

    #[test]
    fn test_expired_key_restarts_count() {
        let store = MemoryCounterStore::new();
        let ttl = Duration::from_millis(10);
        assert_eq!(block_on(store.increment("a", ttl)).unwrap(), 1);
        assert_eq!(block_on(store.increment("a", ttl)).unwrap(), 2);
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(block_on(store.increment("a", ttl)).unwrap(), 1);
    }
}
