//! Data models for Weekstay

pub mod enums;
pub mod lease;
pub mod payment;
pub mod pricing;
pub mod schedule;

// Re-export commonly used types
pub use enums::{RentalType, TierId, WeekPattern};
pub use lease::{Lease, Listing};
pub use payment::{Billing, LeaseTerms, PaymentCycle, PaymentRecord, PaymentSchedule};
pub use pricing::{PricingTier, PricingTierResult, TierSelection};
pub use schedule::{
    ListingConstraints, ScheduleRule, ScheduleValidationResult, ScheduleViolation, Severity,
    SoftConstraintPolicy, WeekdaySet,
};
