//! Payment schedule models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{RentalType, WeekPattern};

// ---------------------------------------------------------------------------
// Lease terms (validated calculator input)
// ---------------------------------------------------------------------------

/// Rate and duration, by rental type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Billing {
    Nightly {
        span_weeks: u32,
        pattern: WeekPattern,
        four_week_rent: Decimal,
    },
    Weekly {
        span_weeks: u32,
        pattern: WeekPattern,
        four_week_rent: Decimal,
    },
    Monthly {
        span_months: Decimal,
        rent_per_month: Decimal,
    },
}

impl Billing {
    pub fn rental_type(&self) -> RentalType {
        match self {
            Billing::Nightly { .. } => RentalType::Nightly,
            Billing::Weekly { .. } => RentalType::Weekly,
            Billing::Monthly { .. } => RentalType::Monthly,
        }
    }
}

/// Lease terms the payment schedule is computed from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseTerms {
    pub move_in_date: NaiveDate,
    pub billing: Billing,
    /// Charged in full on every cycle
    pub maintenance_fee: Decimal,
    /// Attached to cycle 1 only
    pub damage_deposit: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Calculated schedule
// ---------------------------------------------------------------------------

/// One billing cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCycle {
    /// 1-indexed
    pub cycle_number: u32,
    pub scheduled_date: NaiveDate,
    pub rent_amount: Decimal,
    pub maintenance_fee: Decimal,
    /// rent_amount + maintenance_fee
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage_deposit: Option<Decimal>,
}

/// Ordered billing cycles of a lease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub rental_type: RentalType,
    pub cycles: Vec<PaymentCycle>,
    /// Sum of rent and maintenance over all cycles, deposit excluded
    pub total_compensation_amount: Decimal,
}

// ---------------------------------------------------------------------------
// Requests / responses
// ---------------------------------------------------------------------------

/// Payment schedule request, as received from callers
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleRequest {
    /// Required when the schedule is persisted
    pub lease_id: Option<String>,
    /// Nightly, Weekly or Monthly
    pub rental_type: Option<String>,
    /// Move-in date (YYYY-MM-DD)
    pub move_in_date: Option<String>,
    /// Nightly / Weekly duration
    pub reservation_span_weeks: Option<i64>,
    /// Monthly duration, fractions allowed
    pub reservation_span_months: Option<Decimal>,
    /// Weekly pattern ("Every week", "One week on/one off", ...)
    pub week_pattern: Option<String>,
    /// Rent per four-week block (Nightly / Weekly)
    pub four_week_rent: Option<Decimal>,
    /// Rent per month (Monthly)
    pub rent_per_month: Option<Decimal>,
    pub maintenance_fee: Option<Decimal>,
    pub damage_deposit: Option<Decimal>,
}

/// Result of persisting a payment schedule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleResult {
    pub payment_record_ids: Vec<String>,
    pub total_compensation: Decimal,
    pub record_count: usize,
    pub lease_id: String,
}

// ---------------------------------------------------------------------------
// PaymentRecord
// ---------------------------------------------------------------------------

/// Persisted payment cycle of a lease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub lease_id: String,
    pub cycle_number: i32,
    pub scheduled_date: NaiveDate,
    pub rent_amount: Decimal,
    pub maintenance_fee: Decimal,
    pub total_amount: Decimal,
    pub damage_deposit: Option<Decimal>,
    pub crea_date: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    pub fn from_cycle(id: String, lease_id: &str, cycle: &PaymentCycle) -> Self {
        Self {
            id,
            lease_id: lease_id.to_string(),
            cycle_number: cycle.cycle_number as i32,
            scheduled_date: cycle.scheduled_date,
            rent_amount: cycle.rent_amount,
            maintenance_fee: cycle.maintenance_fee,
            total_amount: cycle.total_amount,
            damage_deposit: cycle.damage_deposit,
            crea_date: None,
        }
    }
}
