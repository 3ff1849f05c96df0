//! Weekday selection validation

use crate::{
    error::AppResult,
    models::schedule::{
        day_name, ListingConstraints, ScheduleRule, ScheduleValidationResult, ScheduleViolation,
        Severity, SoftConstraintPolicy, WeekdaySet, DAYS_PER_WEEK,
    },
};

use super::schedule_rules;

/// Platform-wide bounds; listings cannot relax them
pub const ABSOLUTE_MIN_NIGHTS: u8 = 2;
pub const ABSOLUTE_MAX_NIGHTS: u8 = 7;

/// Nights represented by a weekday selection.
///
/// Nights are the gaps between selected days, except for a full week where
/// the stay is continuous and every day is also a night.
pub fn nights_count(days: WeekdaySet) -> u8 {
    let selected = days.len() as u8;
    if selected == DAYS_PER_WEEK {
        DAYS_PER_WEEK
    } else {
        selected.saturating_sub(1)
    }
}

/// Host constraints with day indices already checked
#[derive(Debug, Clone, Copy, Default)]
struct HostConstraints {
    minimum_nights: Option<i32>,
    maximum_nights: Option<i32>,
    days_available: Option<WeekdaySet>,
}

impl HostConstraints {
    fn parse(listing: &ListingConstraints) -> AppResult<Self> {
        let days_available = match &listing.days_available {
            Some(days) => Some(WeekdaySet::from_indices(days.iter().copied())?),
            None => None,
        };
        Ok(Self {
            minimum_nights: listing.minimum_nights,
            maximum_nights: listing.maximum_nights,
            days_available,
        })
    }
}

/// Validates weekday selections under one soft constraint policy
#[derive(Debug, Clone, Copy)]
pub struct ScheduleValidator {
    policy: SoftConstraintPolicy,
}

impl ScheduleValidator {
    pub fn new(policy: SoftConstraintPolicy) -> Self {
        Self { policy }
    }

    /// Validate raw day indices. Out-of-range indices are rejected as a
    /// validation error; rule failures are reported in the result.
    pub fn validate(
        &self,
        selected_day_indices: &[i32],
        listing: Option<&ListingConstraints>,
    ) -> AppResult<ScheduleValidationResult> {
        let days = WeekdaySet::from_indices(selected_day_indices.iter().copied())?;
        let host = listing.map(HostConstraints::parse).transpose()?;
        Ok(self.evaluate(days, host.unwrap_or_default()))
    }

    fn soft_severity(&self) -> Severity {
        match self.policy {
            SoftConstraintPolicy::Strict => Severity::Error,
            SoftConstraintPolicy::Advisory => Severity::Warning,
        }
    }

    /// Every rule is evaluated; nothing short-circuits
    fn evaluate(&self, days: WeekdaySet, host: HostConstraints) -> ScheduleValidationResult {
        let mut errors = Vec::new();
        let nights = nights_count(days);
        let is_contiguous = schedule_rules::is_contiguous(days);

        if days.is_empty() {
            errors.push(violation(
                ScheduleRule::NoDaysSelected,
                "Please select at least one day".to_string(),
                Severity::Error,
            ));
        }

        if !is_contiguous {
            errors.push(violation(
                ScheduleRule::NotContiguous,
                "Selected days must be consecutive (Saturday wraps to Sunday)".to_string(),
                Severity::Error,
            ));
        }

        if nights < ABSOLUTE_MIN_NIGHTS {
            errors.push(violation(
                ScheduleRule::AbsoluteMinimum,
                format!(
                    "A booking needs at least {} nights per week (selected {})",
                    ABSOLUTE_MIN_NIGHTS, nights
                ),
                Severity::Error,
            ));
        }

        if nights > ABSOLUTE_MAX_NIGHTS {
            errors.push(violation(
                ScheduleRule::AbsoluteMaximum,
                format!(
                    "A booking cannot exceed {} nights per week (selected {})",
                    ABSOLUTE_MAX_NIGHTS, nights
                ),
                Severity::Error,
            ));
        }

        if let Some(minimum) = host.minimum_nights {
            if i32::from(nights) < minimum {
                errors.push(violation(
                    ScheduleRule::MinimumNights,
                    format!(
                        "Host prefers at least {} nights per week (selected {})",
                        minimum, nights
                    ),
                    self.soft_severity(),
                ));
            }
        }

        if let Some(maximum) = host.maximum_nights {
            if i32::from(nights) > maximum {
                errors.push(violation(
                    ScheduleRule::MaximumNights,
                    format!(
                        "Host prefers at most {} nights per week (selected {})",
                        maximum, nights
                    ),
                    self.soft_severity(),
                ));
            }
        }

        if let Some(available) = host.days_available {
            let unavailable = days.difference(available);
            if !unavailable.is_empty() {
                let names: Vec<&str> = unavailable.iter().map(day_name).collect();
                errors.push(violation(
                    ScheduleRule::DaysNotAvailable,
                    format!("Not available on {}", names.join(", ")),
                    Severity::Error,
                ));
            }
        }

        let (check_in_day, check_out_day) = match schedule_rules::check_in_out(days) {
            Some((check_in, check_out)) => (Some(check_in), Some(check_out)),
            None => (None, None),
        };

        ScheduleValidationResult {
            valid: !errors.iter().any(|v| v.severity == Severity::Error),
            errors,
            nights_count: nights,
            is_contiguous,
            check_in_day,
            check_out_day,
            unused_nights: DAYS_PER_WEEK - nights,
            selected_days: days.to_vec(),
        }
    }
}

fn violation(rule: ScheduleRule, message: String, severity: Severity) -> ScheduleViolation {
    ScheduleViolation {
        rule,
        message,
        severity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advisory() -> ScheduleValidator {
        ScheduleValidator::new(SoftConstraintPolicy::Advisory)
    }

    fn strict() -> ScheduleValidator {
        ScheduleValidator::new(SoftConstraintPolicy::Strict)
    }

    #[test]
    fn test_weekday_run() {
        let result = advisory().validate(&[1, 2, 3, 4, 5, 6], None).unwrap();
        assert!(result.valid);
        assert!(result.is_contiguous);
        assert_eq!(result.nights_count, 5);
        assert_eq!(result.check_in_day, Some(1));
        assert_eq!(result.check_out_day, Some(6));
        assert_eq!(result.unused_nights, 2);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_wraparound_weekend() {
        let result = advisory().validate(&[5, 6, 0, 1], None).unwrap();
        assert!(result.valid);
        assert!(result.is_contiguous);
        assert_eq!(result.nights_count, 3);
        assert_eq!(result.check_in_day, Some(5));
        assert_eq!(result.check_out_day, Some(1));
        assert_eq!(result.selected_days, vec![0, 1, 5, 6]);
    }

    #[test]
    fn test_gapped_selection() {
        let result = advisory().validate(&[1, 3, 5], None).unwrap();
        assert!(!result.valid);
        assert!(!result.is_contiguous);
        assert!(result.has_rule(ScheduleRule::NotContiguous));
    }

    #[test]
    fn test_full_week_counts_seven_nights() {
        let result = advisory().validate(&[0, 1, 2, 3, 4, 5, 6], None).unwrap();
        assert!(result.valid);
        assert_eq!(result.nights_count, 7);
        assert_eq!(result.unused_nights, 0);
        assert_eq!(result.check_in_day, Some(0));
        assert_eq!(result.check_out_day, Some(6));
    }

    #[test]
    fn test_six_days_is_five_nights() {
        let result = advisory().validate(&[0, 1, 2, 3, 4, 5], None).unwrap();
        assert_eq!(result.nights_count, 5);
    }

    #[test]
    fn test_empty_selection_collects_all_failures() {
        let result = advisory().validate(&[], None).unwrap();
        assert!(!result.valid);
        assert!(result.is_contiguous);
        assert_eq!(result.nights_count, 0);
        assert_eq!(result.unused_nights, 7);
        assert_eq!(result.check_in_day, None);
        let rules: Vec<ScheduleRule> = result.errors.iter().map(|v| v.rule).collect();
        assert_eq!(
            rules,
            vec![ScheduleRule::NoDaysSelected, ScheduleRule::AbsoluteMinimum]
        );
    }

    #[test]
    fn test_two_days_is_below_platform_minimum() {
        let result = advisory().validate(&[2, 3], None).unwrap();
        assert_eq!(result.nights_count, 1);
        assert!(!result.valid);
        assert!(result.has_rule(ScheduleRule::AbsoluteMinimum));
    }

    #[test]
    fn test_rule_order_is_stable() {
        let listing = ListingConstraints {
            minimum_nights: Some(4),
            maximum_nights: None,
            days_available: Some(vec![1, 2, 3]),
        };
        let result = advisory().validate(&[1, 3, 5], Some(&listing)).unwrap();
        let rules: Vec<ScheduleRule> = result.errors.iter().map(|v| v.rule).collect();
        assert_eq!(
            rules,
            vec![
                ScheduleRule::NotContiguous,
                ScheduleRule::MinimumNights,
                ScheduleRule::DaysNotAvailable,
            ]
        );
    }

    #[test]
    fn test_host_minimum_is_warning_when_advisory() {
        let listing = ListingConstraints {
            minimum_nights: Some(4),
            ..Default::default()
        };
        let result = advisory().validate(&[1, 2, 3], Some(&listing)).unwrap();
        assert!(result.valid);
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.errors[0].rule, ScheduleRule::MinimumNights);
        assert_eq!(result.errors[0].severity, Severity::Warning);
    }

    #[test]
    fn test_host_maximum_is_error_when_strict() {
        let listing = ListingConstraints {
            maximum_nights: Some(3),
            ..Default::default()
        };
        let result = strict().validate(&[0, 1, 2, 3, 4, 5], Some(&listing)).unwrap();
        assert!(!result.valid);
        assert_eq!(result.fatal_errors().count(), 1);
        assert_eq!(result.errors[0].rule, ScheduleRule::MaximumNights);
    }

    #[test]
    fn test_days_not_available_is_always_fatal() {
        let listing = ListingConstraints {
            days_available: Some(vec![1, 2, 3, 4, 5]),
            ..Default::default()
        };
        let result = advisory().validate(&[5, 6, 0], Some(&listing)).unwrap();
        assert!(!result.valid);
        let violation = &result.errors[0];
        assert_eq!(violation.rule, ScheduleRule::DaysNotAvailable);
        assert_eq!(violation.message, "Not available on Sunday, Saturday");
    }

    #[test]
    fn test_malformed_indices_are_rejected() {
        assert!(advisory().validate(&[1, 9], None).is_err());
        let listing = ListingConstraints {
            days_available: Some(vec![8]),
            ..Default::default()
        };
        assert!(advisory().validate(&[1, 2], Some(&listing)).is_err());
    }
}
