//! Lease and listing rows read or written by the calculators' callers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::schedule::ListingConstraints;

/// Lease model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: String,
    pub listing_id: Option<String>,
    pub nights_per_week: Option<i16>,
    pub check_in_day: Option<i16>,
    pub check_out_day: Option<i16>,
    pub selected_days: Option<Vec<i16>>,
    /// Aggregate of the latest generated payment schedule
    pub total_compensation: Option<Decimal>,
    pub payment_record_ids: Vec<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Listing model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub minimum_nights: Option<i16>,
    pub maximum_nights: Option<i16>,
    pub days_available: Option<Vec<i16>>,
    pub crea_date: Option<DateTime<Utc>>,
}

impl Listing {
    pub fn constraints(&self) -> ListingConstraints {
        ListingConstraints {
            minimum_nights: self.minimum_nights.map(i32::from),
            maximum_nights: self.maximum_nights.map(i32::from),
            days_available: self
                .days_available
                .as_ref()
                .map(|days| days.iter().map(|&d| i32::from(d)).collect()),
        }
    }
}
