//! Cup arithmetic for a single event.

use crate::action::ResultType;

/// Effect of one event on one rack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CupsDelta {
    pub before: u32,
    pub after: u32,
    /// Requested change; `after` is `before - delta` clamped to the rack.
    pub delta: i32,
}

/// Computes clamped cup changes. Holds no state besides the rack size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CupsLedger {
    rack_size: u32,
}

impl CupsLedger {
    pub const fn new(rack_size: u32) -> Self {
        Self { rack_size }
    }

    /// Requested change for a result: makes remove one cup, misses none,
    /// pulls their signed magnitude with zero read as one.
    pub fn delta_for(result_type: ResultType, count: Option<i32>) -> i32 {
        if result_type.is_make() {
            1
        } else if result_type.is_pull() {
            match count.unwrap_or(1) {
                0 => 1,
                n => n,
            }
        } else {
            0
        }
    }

    /// Applies a result to a rack currently holding `remaining` cups.
    pub fn apply(&self, result_type: ResultType, count: Option<i32>, remaining: u32) -> CupsDelta {
        self.settle(remaining, Self::delta_for(result_type, count))
    }

    /// Applies an already-known delta, as stored on a logged event.
    pub fn settle(&self, before: u32, delta: i32) -> CupsDelta {
        let before = before.min(self.rack_size);
        let after = (i64::from(before) - i64::from(delta)).clamp(0, i64::from(self.rack_size));
        CupsDelta {
            before,
            // Clamped to 0..=rack_size, which fits in u32.
            after: after as u32,
            delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGER: CupsLedger = CupsLedger::new(100);

    #[test]
    fn make_removes_one_cup() {
        let delta = LEDGER.apply(ResultType::TopIso, None, 40);
        assert_eq!(
            delta,
            CupsDelta {
                before: 40,
                after: 39,
                delta: 1
            }
        );
    }

    #[test]
    fn make_ignores_count() {
        assert_eq!(LEDGER.apply(ResultType::BottomRegular, Some(5), 40).after, 39);
    }

    #[test]
    fn miss_changes_nothing() {
        let delta = LEDGER.apply(ResultType::Miss, None, 12);
        assert_eq!((delta.before, delta.after, delta.delta), (12, 12, 0));
    }

    #[test]
    fn make_into_empty_rack_stays_at_zero() {
        let delta = LEDGER.apply(ResultType::TopRegular, None, 0);
        assert_eq!((delta.before, delta.after, delta.delta), (0, 0, 1));
    }

    #[test]
    fn zero_pull_counts_as_one() {
        assert_eq!(LEDGER.apply(ResultType::PullHome, Some(0), 10).after, 9);
        assert_eq!(LEDGER.apply(ResultType::PullHome, None, 10).after, 9);
    }

    #[test]
    fn pulls_clamp_both_ways() {
        assert_eq!(LEDGER.apply(ResultType::PullAway, Some(250), 10).after, 0);
        let back = LEDGER.apply(ResultType::PullAway, Some(-30), 90);
        assert_eq!((back.after, back.delta), (100, -30));
        assert_eq!(LEDGER.apply(ResultType::PullAway, Some(i32::MIN), 0).after, 100);
        assert_eq!(LEDGER.apply(ResultType::PullAway, Some(i32::MAX), 100).after, 0);
    }

    #[test]
    fn settle_clamps_out_of_range_before() {
        let delta = LEDGER.settle(140, 1);
        assert_eq!((delta.before, delta.after), (100, 99));
    }
}
