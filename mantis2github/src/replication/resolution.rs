//! Mantis status and resolution codes that decide whether an issue closes.
//!
//! Only the suspended (80) and won't fix (90) status codes close the GitHub
//! issue. Other codes that read like terminal states (20 fixed, 40 unable to
//! reproduce, ...) leave it open.

use crate::issues::StateReason;

/// Status code: suspended.
pub const STATUS_SUSPENDED: u32 = 80;

/// Status code: won't fix.
pub const STATUS_WONT_FIX: u32 = 90;

/// Resolution code: fixed.
pub const RESOLUTION_FIXED: u32 = 20;

/// Returns the close reason for a status/resolution pair, or `None` if the
/// issue stays open.
#[must_use]
pub fn close_reason(status: u32, resolution: Option<u32>) -> Option<StateReason> {
    match status {
        STATUS_SUSPENDED | STATUS_WONT_FIX => Some(if resolution == Some(RESOLUTION_FIXED) {
            StateReason::Completed
        } else {
            StateReason::NotPlanned
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suspended_and_fixed_is_completed() {
        assert_eq!(close_reason(80, Some(20)), Some(StateReason::Completed));
        assert_eq!(close_reason(90, Some(20)), Some(StateReason::Completed));
    }

    #[test]
    fn closing_without_fix_is_not_planned() {
        assert_eq!(close_reason(80, Some(30)), Some(StateReason::NotPlanned));
        assert_eq!(close_reason(90, Some(50)), Some(StateReason::NotPlanned));
        assert_eq!(close_reason(90, None), Some(StateReason::NotPlanned));
    }

    #[test]
    fn other_statuses_stay_open() {
        for status in [10, 20, 30, 40, 50, 60, 70] {
            for resolution in [None, Some(10), Some(20), Some(90)] {
                assert_eq!(close_reason(status, resolution), None, "{status}/{resolution:?}");
            }
        }
    }
}
