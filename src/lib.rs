//! Weekstay booking server
//!
//! Weekly booking schedule validation, lease payment schedules and anchored
//! pricing tiers for flexible-term rentals, served as a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod calculators;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
