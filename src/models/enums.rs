//! Shared domain enums

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RentalType
// ---------------------------------------------------------------------------

/// Billing model of a lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RentalType {
    Nightly,
    Weekly,
    Monthly,
}

impl RentalType {
    /// Days between two consecutive payment dates
    pub fn cycle_days(self) -> i64 {
        match self {
            RentalType::Monthly => 31,
            RentalType::Nightly | RentalType::Weekly => 28,
        }
    }
}

impl FromStr for RentalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nightly" => Ok(RentalType::Nightly),
            "weekly" => Ok(RentalType::Weekly),
            "monthly" => Ok(RentalType::Monthly),
            _ => Err(format!("Unknown rental type '{}'", s)),
        }
    }
}

impl std::fmt::Display for RentalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RentalType::Nightly => "Nightly",
            RentalType::Weekly => "Weekly",
            RentalType::Monthly => "Monthly",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// WeekPattern
// ---------------------------------------------------------------------------

/// Which weeks of each four-week block a weekly lease occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WeekPattern {
    #[serde(rename = "Every week")]
    EveryWeek,
    #[serde(rename = "One week on/one off")]
    OneOnOneOff,
    #[serde(rename = "Two weeks on/two off")]
    TwoOnTwoOff,
    #[serde(rename = "One week on/three off")]
    OneOnThreeOff,
}

impl WeekPattern {
    /// Chargeable weeks of a four-week block, first week first
    pub fn chargeable_weeks(self) -> [bool; 4] {
        match self {
            WeekPattern::EveryWeek => [true, true, true, true],
            WeekPattern::OneOnOneOff => [true, false, true, false],
            WeekPattern::TwoOnTwoOff => [true, true, false, false],
            WeekPattern::OneOnThreeOff => [true, false, false, false],
        }
    }

    /// Number of chargeable weeks among the first `weeks` weeks of a block
    pub fn chargeable_in_first(self, weeks: u32) -> u32 {
        self.chargeable_weeks()
            .iter()
            .take(weeks as usize)
            .filter(|&&on| on)
            .count() as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekPattern::EveryWeek => "Every week",
            WeekPattern::OneOnOneOff => "One week on/one off",
            WeekPattern::TwoOnTwoOff => "Two weeks on/two off",
            WeekPattern::OneOnThreeOff => "One week on/three off",
        }
    }
}

impl FromStr for WeekPattern {
    type Err = String;

    /// Accepts the canonical labels and their long forms
    /// ("One week on, one week off"), ignoring case and punctuation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "everyweek" => Ok(WeekPattern::EveryWeek),
            "oneweekononeoff" | "oneweekononeweekoff" => Ok(WeekPattern::OneOnOneOff),
            "twoweeksontwooff" | "twoweeksontwoweeksoff" => Ok(WeekPattern::TwoOnTwoOff),
            "oneweekonthreeoff" | "oneweekonthreeweeksoff" => Ok(WeekPattern::OneOnThreeOff),
            _ => Err(format!("Unknown week pattern '{}'", s)),
        }
    }
}

impl std::fmt::Display for WeekPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TierId
// ---------------------------------------------------------------------------

/// Pricing tier identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Budget,
    Recommended,
    Premium,
}

impl TierId {
    pub fn as_str(self) -> &'static str {
        match self {
            TierId::Budget => "budget",
            TierId::Recommended => "recommended",
            TierId::Premium => "premium",
        }
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rental_type_from_str() {
        assert_eq!("Weekly".parse::<RentalType>(), Ok(RentalType::Weekly));
        assert_eq!(" monthly ".parse::<RentalType>(), Ok(RentalType::Monthly));
        assert!("yearly".parse::<RentalType>().is_err());
    }

    #[test]
    fn test_week_pattern_aliases() {
        assert_eq!("Every week".parse::<WeekPattern>(), Ok(WeekPattern::EveryWeek));
        assert_eq!(
            "One week on, one week off".parse::<WeekPattern>(),
            Ok(WeekPattern::OneOnOneOff)
        );
        assert_eq!(
            "two weeks on/two off".parse::<WeekPattern>(),
            Ok(WeekPattern::TwoOnTwoOff)
        );
        assert!("every other day".parse::<WeekPattern>().is_err());
    }

    #[test]
    fn test_chargeable_in_first() {
        assert_eq!(WeekPattern::EveryWeek.chargeable_in_first(3), 3);
        assert_eq!(WeekPattern::OneOnOneOff.chargeable_in_first(2), 1);
        assert_eq!(WeekPattern::OneOnOneOff.chargeable_in_first(3), 2);
        assert_eq!(WeekPattern::TwoOnTwoOff.chargeable_in_first(4), 2);
        assert_eq!(WeekPattern::OneOnThreeOff.chargeable_in_first(1), 1);
    }
}
