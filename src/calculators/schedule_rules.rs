//! Circular-week contiguity rules
//!
//! A selection is contiguous when some rotation of the week turns it into an
//! unbroken run starting on Sunday. Runs that cross Saturday → Sunday need no
//! special casing: `{5, 6, 0, 1}` rotated back by 5 is `{0, 1, 2, 3}`.

use crate::models::schedule::{WeekdaySet, DAYS_PER_WEEK};

/// Rotation `r` such that `days.rotate_back(r)` is the run `{0..len-1}`.
///
/// The smallest such rotation is returned, so a full week starts on Sunday.
pub fn run_start(days: WeekdaySet) -> Option<u8> {
    let run = WeekdaySet::first_n(days.len());
    (0..DAYS_PER_WEEK).find(|&r| days.rotate_back(r) == run)
}

/// Empty and single-day selections are contiguous
pub fn is_contiguous(days: WeekdaySet) -> bool {
    run_start(days).is_some()
}

/// Check-in and check-out weekdays of a selection.
///
/// For a contiguous run the check-in is the first day after the gap and the
/// check-out the last day before it. Non-contiguous selections fall back to
/// the lowest and highest index.
pub fn check_in_out(days: WeekdaySet) -> Option<(u8, u8)> {
    if days.is_empty() {
        return None;
    }

    match run_start(days) {
        Some(start) => {
            let end = (start as u32 + days.len() - 1) % DAYS_PER_WEEK as u32;
            Some((start, end as u8))
        }
        None => Some((days.first()?, days.last()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(days: &[i32]) -> WeekdaySet {
        WeekdaySet::from_indices(days.iter().copied()).unwrap()
    }

    #[test]
    fn test_trivial_selections_are_contiguous() {
        assert!(is_contiguous(WeekdaySet::EMPTY));
        for day in 0..7 {
            assert!(is_contiguous(set(&[day])));
        }
    }

    #[test]
    fn test_plain_runs() {
        assert!(is_contiguous(set(&[1, 2, 3, 4, 5, 6])));
        assert!(is_contiguous(set(&[0, 1])));
        assert!(is_contiguous(WeekdaySet::FULL_WEEK));
    }

    #[test]
    fn test_wraparound_runs() {
        assert!(is_contiguous(set(&[5, 6, 0, 1])));
        assert!(is_contiguous(set(&[6, 0])));
        assert!(is_contiguous(set(&[0, 2, 3, 4, 5, 6])));
    }

    #[test]
    fn test_gaps() {
        assert!(!is_contiguous(set(&[1, 3, 5])));
        assert!(!is_contiguous(set(&[0, 3])));
        assert!(!is_contiguous(set(&[0, 1, 5])));
        assert!(!is_contiguous(set(&[0, 1, 3, 4])));
    }

    #[test]
    fn test_check_in_out_plain_run() {
        assert_eq!(check_in_out(set(&[1, 2, 3, 4, 5, 6])), Some((1, 6)));
        assert_eq!(check_in_out(set(&[3])), Some((3, 3)));
    }

    #[test]
    fn test_check_in_out_wraparound() {
        assert_eq!(check_in_out(set(&[5, 6, 0, 1])), Some((5, 1)));
        assert_eq!(check_in_out(set(&[6, 0])), Some((6, 0)));
    }

    #[test]
    fn test_check_in_out_full_week_and_edges() {
        assert_eq!(check_in_out(WeekdaySet::FULL_WEEK), Some((0, 6)));
        assert_eq!(check_in_out(WeekdaySet::EMPTY), None);
        assert_eq!(check_in_out(set(&[1, 3, 5])), Some((1, 5)));
    }
}
