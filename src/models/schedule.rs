//! Booking schedule models (weekday selections, listing constraints, validation results)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

pub const DAYS_PER_WEEK: u8 = 7;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Name of a weekday index (0=Sunday, 6=Saturday)
pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES[(day % DAYS_PER_WEEK) as usize]
}

// ---------------------------------------------------------------------------
// WeekdaySet
// ---------------------------------------------------------------------------

/// A set of weekday indices stored as a 7-bit mask (bit 0 = Sunday)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const FULL_WEEK: WeekdaySet = WeekdaySet(0x7F);

    /// Build a set from raw indices; any index outside 0..=6 is rejected.
    /// Duplicates collapse.
    pub fn from_indices<I>(indices: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = i32>,
    {
        let mut bits = 0u8;
        for index in indices {
            if !(0..DAYS_PER_WEEK as i32).contains(&index) {
                return Err(AppError::Validation(format!(
                    "Invalid day index {} (expected 0=Sunday through 6=Saturday)",
                    index
                )));
            }
            bits |= 1 << index;
        }
        Ok(WeekdaySet(bits))
    }

    /// The run Sunday..Sunday+n-1
    pub fn first_n(n: u32) -> Self {
        let n = n.min(DAYS_PER_WEEK as u32);
        WeekdaySet(((1u16 << n) - 1) as u8)
    }

    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, day: u8) -> bool {
        day < DAYS_PER_WEEK && self.0 & (1 << day) != 0
    }

    pub fn difference(self, other: WeekdaySet) -> WeekdaySet {
        WeekdaySet(self.0 & !other.0)
    }

    /// Shift every day back by `r` days around the week: `{(d - r) mod 7}`
    pub fn rotate_back(self, r: u8) -> Self {
        let r = r % DAYS_PER_WEEK;
        let bits = (self.0 >> r) | (self.0 << (DAYS_PER_WEEK - r));
        WeekdaySet(bits & Self::FULL_WEEK.0)
    }

    /// Days in ascending order
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..DAYS_PER_WEEK).filter(move |&d| self.contains(d))
    }

    pub fn first(self) -> Option<u8> {
        self.iter().next()
    }

    pub fn last(self) -> Option<u8> {
        self.iter().last()
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Listing constraints
// ---------------------------------------------------------------------------

/// Booking constraints a host sets on a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingConstraints {
    /// Host's preferred minimum nights per week
    pub minimum_nights: Option<i32>,
    /// Host's preferred maximum nights per week
    pub maximum_nights: Option<i32>,
    /// Weekday indices the listing can be booked on
    pub days_available: Option<Vec<i32>>,
}

// ---------------------------------------------------------------------------
// Validation result
// ---------------------------------------------------------------------------

/// How host min/max-nights preferences are enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SoftConstraintPolicy {
    /// Host preferences invalidate the selection when violated
    Strict,
    /// Host preferences are reported as warnings only
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleRule {
    NoDaysSelected,
    NotContiguous,
    AbsoluteMinimum,
    AbsoluteMaximum,
    MinimumNights,
    MaximumNights,
    DaysNotAvailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One failed schedule rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleViolation {
    pub rule: ScheduleRule,
    pub message: String,
    pub severity: Severity,
}

/// Outcome of validating a weekday selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleValidationResult {
    /// No error-severity violation present
    pub valid: bool,
    /// Violations in evaluation order, errors and warnings alike
    pub errors: Vec<ScheduleViolation>,
    pub nights_count: u8,
    pub is_contiguous: bool,
    /// Absent when nothing is selected
    pub check_in_day: Option<u8>,
    pub check_out_day: Option<u8>,
    pub unused_nights: u8,
    /// Selected days in ascending order
    pub selected_days: Vec<u8>,
}

impl ScheduleValidationResult {
    pub fn warnings(&self) -> impl Iterator<Item = &ScheduleViolation> {
        self.errors.iter().filter(|v| v.severity == Severity::Warning)
    }

    pub fn fatal_errors(&self) -> impl Iterator<Item = &ScheduleViolation> {
        self.errors.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn has_rule(&self, rule: ScheduleRule) -> bool {
        self.errors.iter().any(|v| v.rule == rule)
    }
}

/// Schedule validation request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateScheduleRequest {
    pub selected_day_indices: Vec<i32>,
    /// Inline listing constraints
    pub listing: Option<ListingConstraints>,
    /// Load constraints from a stored listing instead of `listing`
    pub listing_id: Option<String>,
    /// Override the deployment's soft constraint policy
    pub policy: Option<SoftConstraintPolicy>,
}

/// Request to record a weekday selection on a lease
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordScheduleRequest {
    pub selected_day_indices: Vec<i32>,
    pub policy: Option<SoftConstraintPolicy>,
}
