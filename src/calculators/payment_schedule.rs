//! Payment schedule calculation
//!
//! Billing runs on fixed intervals that ignore calendar months: every 28 days
//! for nightly and weekly leases (a four-week block) and every 31 days for
//! monthly leases. The first charge falls two days after move-in. Only the
//! last cycle can be partial, and its rent is prorated and rounded down.

use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{RentalType, WeekPattern},
        payment::{Billing, LeaseTerms, PaymentCycle, PaymentSchedule, PaymentScheduleRequest},
    },
};

use super::common::{add_days, div_ceil, floor_to_cent, parse_date, prorate};

/// Grace period between move-in and the first charge
pub const FIRST_PAYMENT_OFFSET_DAYS: i64 = 2;
pub const WEEKS_PER_BLOCK: u32 = 4;
pub const DAYS_PER_MONTH_CYCLE: u32 = 31;
/// Longest reservation accepted, ten years either way
pub const MAX_SPAN_WEEKS: i64 = 520;
pub const MAX_SPAN_MONTHS: i64 = 120;

/// Largest amount a `NUMERIC(12, 2)` money column holds
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Turn a raw request into lease terms, rejecting anything the calculator
/// cannot bill.
pub fn parse_terms(request: &PaymentScheduleRequest) -> AppResult<LeaseTerms> {
    let rental_type: RentalType = request
        .rental_type
        .as_deref()
        .ok_or_else(|| AppError::Validation("rentalType is required".to_string()))?
        .parse()
        .map_err(AppError::Validation)?;

    let move_in_date = parse_date(
        request
            .move_in_date
            .as_deref()
            .ok_or_else(|| AppError::Validation("moveInDate is required".to_string()))?,
        "moveInDate",
    )?;

    let billing = match rental_type {
        RentalType::Monthly => {
            let span_months = request
                .reservation_span_months
                .ok_or_else(|| {
                    AppError::Validation("reservationSpanMonths is required for Monthly".to_string())
                })?;
            if span_months <= Decimal::ZERO {
                return Err(AppError::Validation(
                    "reservationSpanMonths must be positive".to_string(),
                ));
            }
            if span_months > Decimal::from(MAX_SPAN_MONTHS) {
                return Err(AppError::Validation(format!(
                    "reservationSpanMonths cannot exceed {}",
                    MAX_SPAN_MONTHS
                )));
            }
            let rent_per_month = required_amount(request.rent_per_month, "rentPerMonth", rental_type)?;
            Billing::Monthly {
                span_months,
                rent_per_month,
            }
        }
        RentalType::Weekly | RentalType::Nightly => {
            let span_weeks = request.reservation_span_weeks.ok_or_else(|| {
                AppError::Validation(format!("reservationSpanWeeks is required for {}", rental_type))
            })?;
            if span_weeks <= 0 {
                return Err(AppError::Validation(
                    "reservationSpanWeeks must be positive".to_string(),
                ));
            }
            if span_weeks > MAX_SPAN_WEEKS {
                return Err(AppError::Validation(format!(
                    "reservationSpanWeeks cannot exceed {}",
                    MAX_SPAN_WEEKS
                )));
            }
            let span_weeks = span_weeks as u32;
            let pattern = match (&request.week_pattern, rental_type) {
                (Some(pattern), _) => pattern.parse::<WeekPattern>().map_err(AppError::Validation)?,
                (None, RentalType::Nightly) => WeekPattern::EveryWeek,
                (None, _) => {
                    return Err(AppError::Validation(
                        "weekPattern is required for Weekly".to_string(),
                    ))
                }
            };
            let four_week_rent = required_amount(request.four_week_rent, "fourWeekRent", rental_type)?;

            if rental_type == RentalType::Weekly {
                Billing::Weekly {
                    span_weeks,
                    pattern,
                    four_week_rent,
                }
            } else {
                Billing::Nightly {
                    span_weeks,
                    pattern,
                    four_week_rent,
                }
            }
        }
    };

    let maintenance_fee =
        checked_amount(request.maintenance_fee.unwrap_or(Decimal::ZERO), "maintenanceFee")?;

    let damage_deposit = request
        .damage_deposit
        .map(|d| checked_amount(d, "damageDeposit"))
        .transpose()?
        .map(floor_to_cent)
        .filter(|d| !d.is_zero());

    Ok(LeaseTerms {
        move_in_date,
        billing,
        maintenance_fee,
        damage_deposit,
    })
}

fn required_amount(
    value: Option<Decimal>,
    field: &str,
    rental_type: RentalType,
) -> AppResult<Decimal> {
    let amount = value.ok_or_else(|| {
        AppError::Validation(format!("{} is required for {}", field, rental_type))
    })?;
    checked_amount(amount, field)
}

/// Money input must be non-negative and fit the stored precision
fn checked_amount(amount: Decimal, field: &str) -> AppResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(AppError::Validation(format!("{} cannot be negative", field)));
    }
    if amount > max_amount() {
        return Err(AppError::Validation(format!(
            "{} cannot exceed {}",
            field,
            max_amount()
        )));
    }
    Ok(amount)
}

/// Rent of each cycle, in order
fn cycle_rents(billing: &Billing) -> AppResult<Vec<Decimal>> {
    match billing {
        Billing::Weekly {
            span_weeks,
            pattern,
            four_week_rent,
        }
        | Billing::Nightly {
            span_weeks,
            pattern,
            four_week_rent,
        } => {
            let full_blocks = span_weeks / WEEKS_PER_BLOCK;
            let remaining_weeks = span_weeks % WEEKS_PER_BLOCK;

            let mut rents = vec![*four_week_rent; full_blocks as usize];
            if remaining_weeks > 0 {
                rents.push(prorate(
                    *four_week_rent,
                    pattern.chargeable_in_first(remaining_weeks),
                    pattern.chargeable_in_first(WEEKS_PER_BLOCK),
                )?);
            }
            Ok(rents)
        }
        Billing::Monthly {
            span_months,
            rent_per_month,
        } => {
            let total_days = monthly_span_days(*span_months)?;
            let cycles = div_ceil(total_days, DAYS_PER_MONTH_CYCLE);
            let last_cycle_days = total_days - (cycles - 1) * DAYS_PER_MONTH_CYCLE;

            let mut rents = vec![*rent_per_month; (cycles - 1) as usize];
            if last_cycle_days == DAYS_PER_MONTH_CYCLE {
                rents.push(*rent_per_month);
            } else {
                rents.push(prorate(*rent_per_month, last_cycle_days, DAYS_PER_MONTH_CYCLE)?);
            }
            Ok(rents)
        }
    }
}

/// Occupied days of a monthly lease, counting a started day as a whole day
fn monthly_span_days(span_months: Decimal) -> AppResult<u32> {
    (span_months * Decimal::from(DAYS_PER_MONTH_CYCLE))
        .ceil()
        .to_u32()
        .filter(|&days| days > 0)
        .ok_or_else(|| AppError::Calculation(format!("Invalid monthly span {}", span_months)))
}

/// Compute the dated, priced billing cycles of a lease
pub fn calculate_payment_schedule(terms: &LeaseTerms) -> AppResult<PaymentSchedule> {
    let rental_type = terms.billing.rental_type();
    let interval = rental_type.cycle_days();
    let first_payment = add_days(terms.move_in_date, FIRST_PAYMENT_OFFSET_DAYS)?;
    let maintenance_fee = floor_to_cent(terms.maintenance_fee);

    let rents = cycle_rents(&terms.billing)?;
    if rents.is_empty() {
        return Err(AppError::Calculation(format!(
            "{} lease produced no payment cycles",
            rental_type
        )));
    }

    let mut cycles = Vec::with_capacity(rents.len());
    let mut total_compensation = Decimal::ZERO;

    for (index, rent) in rents.into_iter().enumerate() {
        let scheduled_date = add_days(first_payment, index as i64 * interval)?;
        let rent_amount = floor_to_cent(rent);
        let total_amount = rent_amount
            .checked_add(maintenance_fee)
            .ok_or_else(|| AppError::Calculation("Cycle total overflowed".to_string()))?;
        total_compensation = total_compensation
            .checked_add(total_amount)
            .ok_or_else(|| AppError::Calculation("Total compensation overflowed".to_string()))?;

        cycles.push(PaymentCycle {
            cycle_number: index as u32 + 1,
            scheduled_date,
            rent_amount,
            maintenance_fee,
            total_amount,
            damage_deposit: if index == 0 { terms.damage_deposit } else { None },
        });
    }

    if total_compensation > max_amount() {
        return Err(AppError::Validation(format!(
            "Total compensation {} exceeds {}",
            total_compensation,
            max_amount()
        )));
    }

    Ok(PaymentSchedule {
        rental_type,
        cycles,
        total_compensation_amount: total_compensation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_request(weeks: i64, pattern: &str, rent: &str) -> PaymentScheduleRequest {
        PaymentScheduleRequest {
            rental_type: Some("Weekly".to_string()),
            move_in_date: Some("2024-03-01".to_string()),
            reservation_span_weeks: Some(weeks),
            week_pattern: Some(pattern.to_string()),
            four_week_rent: Some(dec(rent)),
            ..Default::default()
        }
    }

    fn schedule(request: &PaymentScheduleRequest) -> PaymentSchedule {
        calculate_payment_schedule(&parse_terms(request).unwrap()).unwrap()
    }

    #[test]
    fn test_twelve_weeks_is_three_full_cycles() {
        let schedule = schedule(&weekly_request(12, "Every week", "1800"));

        assert_eq!(schedule.rental_type, RentalType::Weekly);
        assert_eq!(schedule.cycles.len(), 3);
        assert_eq!(schedule.cycles[0].scheduled_date, date(2024, 3, 3));
        assert_eq!(schedule.cycles[1].scheduled_date, date(2024, 3, 31));
        assert_eq!(schedule.cycles[2].scheduled_date, date(2024, 4, 28));
        for cycle in &schedule.cycles {
            assert_eq!(cycle.rent_amount, dec("1800"));
        }
        assert_eq!(schedule.total_compensation_amount, dec("5400"));
    }

    #[test]
    fn test_partial_block_every_week() {
        let schedule = schedule(&weekly_request(13, "Every week", "1800"));
        assert_eq!(schedule.cycles.len(), 4);
        assert_eq!(schedule.cycles[3].rent_amount, dec("450"));
    }

    #[test]
    fn test_partial_block_one_on_one_off() {
        // 6 weeks: one full block, then weeks on/off of the second block
        let six_weeks = schedule(&weekly_request(6, "One week on/one off", "1000"));
        assert_eq!(six_weeks.cycles.len(), 2);
        assert_eq!(six_weeks.cycles[1].rent_amount, dec("500"));

        let seven_weeks = schedule(&weekly_request(7, "One week on/one off", "1000"));
        assert_eq!(seven_weeks.cycles[1].rent_amount, dec("1000"));
    }

    #[test]
    fn test_partial_block_two_on_two_off() {
        let five_weeks = schedule(&weekly_request(5, "Two weeks on/two off", "1000"));
        assert_eq!(five_weeks.cycles[1].rent_amount, dec("500"));

        let seven_weeks = schedule(&weekly_request(7, "Two weeks on/two off", "1000"));
        assert_eq!(seven_weeks.cycles[1].rent_amount, dec("1000"));
    }

    #[test]
    fn test_partial_block_one_on_three_off() {
        let schedule = schedule(&weekly_request(5, "One week on/three off", "700"));
        assert_eq!(schedule.cycles.len(), 2);
        assert_eq!(schedule.cycles[1].rent_amount, dec("700"));
    }

    #[test]
    fn test_proration_rounds_down() {
        let schedule = schedule(&weekly_request(1, "Every week", "1000.03"));
        assert_eq!(schedule.cycles.len(), 1);
        assert_eq!(schedule.cycles[0].rent_amount, dec("250.00"));
    }

    #[test]
    fn test_maintenance_and_deposit() {
        let mut request = weekly_request(8, "Every week", "1800");
        request.maintenance_fee = Some(dec("50"));
        request.damage_deposit = Some(dec("500"));
        let schedule = schedule(&request);

        assert_eq!(schedule.cycles[0].damage_deposit, Some(dec("500")));
        assert_eq!(schedule.cycles[1].damage_deposit, None);
        assert_eq!(schedule.cycles[0].total_amount, dec("1850"));
        assert_eq!(schedule.total_compensation_amount, dec("3700"));
    }

    #[test]
    fn test_nightly_defaults_to_every_week() {
        let request = PaymentScheduleRequest {
            rental_type: Some("Nightly".to_string()),
            move_in_date: Some("2024-01-10".to_string()),
            reservation_span_weeks: Some(2),
            four_week_rent: Some(dec("2000")),
            ..Default::default()
        };
        let schedule = schedule(&request);
        assert_eq!(schedule.cycles.len(), 1);
        assert_eq!(schedule.cycles[0].scheduled_date, date(2024, 1, 12));
        assert_eq!(schedule.cycles[0].rent_amount, dec("1000"));
    }

    #[test]
    fn test_monthly_full_and_partial() {
        let request = PaymentScheduleRequest {
            rental_type: Some("Monthly".to_string()),
            move_in_date: Some("2024-01-30".to_string()),
            reservation_span_months: Some(dec("2.5")),
            rent_per_month: Some(dec("3100")),
            maintenance_fee: Some(dec("100")),
            ..Default::default()
        };
        let schedule = schedule(&request);

        // 2.5 months = 77.5 days, billed as 78 days over 31-day cycles
        assert_eq!(schedule.cycles.len(), 3);
        assert_eq!(schedule.cycles[0].scheduled_date, date(2024, 2, 1));
        assert_eq!(schedule.cycles[1].scheduled_date, date(2024, 3, 3));
        assert_eq!(schedule.cycles[2].scheduled_date, date(2024, 4, 3));
        assert_eq!(schedule.cycles[0].rent_amount, dec("3100"));
        assert_eq!(schedule.cycles[2].rent_amount, dec("1600"));
        assert_eq!(schedule.total_compensation_amount, dec("8100"));
    }

    #[test]
    fn test_monthly_whole_months() {
        let request = PaymentScheduleRequest {
            rental_type: Some("monthly".to_string()),
            move_in_date: Some("2024-05-01".to_string()),
            reservation_span_months: Some(dec("3")),
            rent_per_month: Some(dec("2500")),
            ..Default::default()
        };
        let schedule = schedule(&request);
        assert_eq!(schedule.cycles.len(), 3);
        assert!(schedule.cycles.iter().all(|c| c.rent_amount == dec("2500")));
    }

    #[test]
    fn test_rejects_bad_requests() {
        let mut request = weekly_request(4, "Every week", "1800");
        request.rental_type = Some("Yearly".to_string());
        assert!(matches!(parse_terms(&request), Err(AppError::Validation(_))));

        let mut request = weekly_request(4, "Every week", "1800");
        request.rental_type = None;
        assert!(parse_terms(&request).is_err());

        assert!(parse_terms(&weekly_request(0, "Every week", "1800")).is_err());
        assert!(parse_terms(&weekly_request(4, "Every other week", "1800")).is_err());

        let mut request = weekly_request(4, "Every week", "1800");
        request.four_week_rent = None;
        assert!(parse_terms(&request).is_err());

        let request = PaymentScheduleRequest {
            rental_type: Some("Monthly".to_string()),
            move_in_date: Some("2024-05-01".to_string()),
            reservation_span_months: Some(dec("3")),
            four_week_rent: Some(dec("2500")),
            ..Default::default()
        };
        assert!(parse_terms(&request).is_err());
    }

    #[test]
    fn test_rejects_amounts_beyond_storage() {
        let request = weekly_request(7, "Every week", "50000000000000000000000000000");
        assert!(matches!(parse_terms(&request), Err(AppError::Validation(_))));

        let request = weekly_request(7, "Every week", "10000000000");
        assert!(matches!(parse_terms(&request), Err(AppError::Validation(_))));

        let mut request = weekly_request(4, "Every week", "1800");
        request.maintenance_fee = Some(dec("10000000000"));
        assert!(matches!(parse_terms(&request), Err(AppError::Validation(_))));

        let mut request = weekly_request(4, "Every week", "1800");
        request.damage_deposit = Some(dec("10000000000"));
        assert!(matches!(parse_terms(&request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_total_beyond_storage_is_rejected() {
        // Each block fits, the sum over ten years does not
        let terms = parse_terms(&weekly_request(520, "Every week", "9999999999.99")).unwrap();
        assert!(matches!(
            calculate_payment_schedule(&terms),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_deposit_is_floored_to_the_cent() {
        let mut request = weekly_request(4, "Every week", "1800");
        request.damage_deposit = Some(dec("123.456"));
        let floored = schedule(&request);
        assert_eq!(floored.cycles[0].damage_deposit, Some(dec("123.45")));

        request.damage_deposit = Some(dec("0.004"));
        let below_a_cent = schedule(&request);
        assert_eq!(below_a_cent.cycles[0].damage_deposit, None);
    }

    #[test]
    fn test_weekly_requires_pattern() {
        let mut request = weekly_request(4, "Every week", "1800");
        request.week_pattern = None;
        assert!(parse_terms(&request).is_err());
    }
}
