//! Rounding and date helpers shared by the calculators

use chrono::{Duration, NaiveDate};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use crate::error::{AppError, AppResult};

/// Round down to the cent. Amounts billed to guests never round up.
pub fn floor_to_cent(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToNegativeInfinity)
}

/// `amount * numerator / denominator`, floored to the cent
pub fn prorate(amount: Decimal, numerator: u32, denominator: u32) -> AppResult<Decimal> {
    if denominator == 0 {
        return Ok(Decimal::ZERO);
    }
    amount
        .checked_mul(Decimal::from(numerator))
        .and_then(|scaled| scaled.checked_div(Decimal::from(denominator)))
        .map(floor_to_cent)
        .ok_or_else(|| {
            AppError::Calculation(format!(
                "Prorating {} by {}/{} overflowed",
                amount, numerator, denominator
            ))
        })
}

/// Nearest whole cent, halves away from zero
pub fn round_to_cents(value: Decimal) -> AppResult<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::Calculation(format!("{} does not fit in cents", value)))
}

/// Round to 2 decimals and convert for display
pub fn round_percentage(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Integer ceiling division for positive operands
pub fn div_ceil(value: u32, divisor: u32) -> u32 {
    (value + divisor - 1) / divisor
}

pub fn add_days(date: NaiveDate, days: i64) -> AppResult<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
        .ok_or_else(|| AppError::Calculation(format!("{} + {} days is out of range", date, days)))
}

/// Parse a YYYY-MM-DD date field
pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (use YYYY-MM-DD)", field)))
}
