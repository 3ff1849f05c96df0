//! Pure booking calculations
//!
//! Everything here is synchronous and free of I/O: identical input always
//! gives identical output, so callers may run these from any task.

pub mod common;
pub mod payment_schedule;
pub mod pricing_tiers;
pub mod schedule_rules;
pub mod schedule_validator;

pub use payment_schedule::{calculate_payment_schedule, parse_terms};
pub use pricing_tiers::calculate_pricing_tiers;
pub use schedule_rules::{check_in_out, is_contiguous};
pub use schedule_validator::{nights_count, ScheduleValidator};
