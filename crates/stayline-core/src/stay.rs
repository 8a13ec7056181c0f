//! # Stay Windows
//!
//! Half-open stay intervals and the overlap predicate that the whole
//! availability engine hangs off.
//!
//! ## Half-Open Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A stay occupies [check_in, check_out) - check-in day included,        │
//! │  check-out day excluded.                                                │
//! │                                                                         │
//! │  Jan 10           Jan 12           Jan 14                              │
//! │    ├── stay A ──────┤                                                  │
//! │                     ├── stay B ──────┤                                 │
//! │                                                                         │
//! │  A.check_out == B.check_in → NOT an overlap.                           │
//! │  Checkout morning, new check-in the same day, is allowed.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two windows `[a1, a2)` and `[b1, b2)` overlap **iff** `a1 < b2 && a2 > b1`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Stay Window
// =============================================================================

/// A validated half-open stay interval `[check_in, check_out)`.
///
/// Construction enforces `check_out > check_in`, so every `StayWindow` in
/// the system spans at least one night. Zero-night and inverted windows are
/// rejected at the boundary, never silently defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StayWindow {
    #[ts(as = "String")]
    check_in: DateTime<Utc>,
    #[ts(as = "String")]
    check_out: DateTime<Utc>,
}

impl StayWindow {
    /// Creates a stay window, rejecting `check_out <= check_in`.
    pub fn new(
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::StayWindowOrder);
        }
        Ok(StayWindow {
            check_in,
            check_out,
        })
    }

    /// Check-in instant (inclusive bound).
    #[inline]
    pub const fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    /// Check-out instant (exclusive bound).
    #[inline]
    pub const fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Whether two stay windows collide.
    ///
    /// Standard half-open interval test: `a1 < b2 && a2 > b1`. Symmetric,
    /// and back-to-back stays (`a.check_out == b.check_in`) do NOT overlap.
    #[inline]
    pub fn overlaps(&self, other: &StayWindow) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Whether an instant falls inside the window.
    ///
    /// `check_in <= t < check_out`: the test the status reconciliation
    /// applies with `t = now` to decide "occupied right now".
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.check_in <= instant && instant < self.check_out
    }

    /// Number of nights spanned, rounded up to whole nights.
    ///
    /// Midnight-to-midnight windows give the calendar night count; a stay
    /// that runs into a partial day still occupies that night.
    pub fn nights(&self) -> i64 {
        let seconds = (self.check_out - self.check_in).num_seconds();
        (seconds + 86_399) / 86_400
    }
}

// =============================================================================
// Occupancy Checks
// =============================================================================

/// A reservation's claim on a room unit, as seen by the overlap predicate.
///
/// `unit_id` is `None` while the reservation has not been assigned a
/// physical unit; such reservations never block anything.
#[derive(Debug, Clone)]
pub struct UnitHold {
    pub unit_id: Option<String>,
    pub window: StayWindow,
}

/// Whether a room unit is free for a target window, given the holds on it.
///
/// A unit is available **iff** no assigned reservation on that unit
/// overlaps the target. Holds without a unit assignment are skipped
/// entirely; a stay that has no physical unit yet cannot block one.
pub fn unit_is_free<'a, I>(unit_id: &str, target: &StayWindow, holds: I) -> bool
where
    I: IntoIterator<Item = &'a UnitHold>,
{
    !holds.into_iter().any(|hold| {
        hold.unit_id.as_deref() == Some(unit_id) && hold.window.overlaps(target)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn window(from: u32, to: u32) -> StayWindow {
        StayWindow::new(day(from), day(to)).unwrap()
    }

    #[test]
    fn test_rejects_zero_night_window() {
        assert!(matches!(
            StayWindow::new(day(10), day(10)),
            Err(ValidationError::StayWindowOrder)
        ));
    }

    #[test]
    fn test_rejects_inverted_window() {
        assert!(StayWindow::new(day(12), day(10)).is_err());
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (window(10, 12), window(11, 14)),
            (window(10, 12), window(12, 14)),
            (window(1, 31), window(15, 16)),
            (window(10, 12), window(20, 22)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }
    }

    #[test]
    fn test_back_to_back_never_overlaps() {
        // [d1, d2) then [d2, d3): checkout day equals next check-in day
        let first = window(10, 12);
        let second = window(12, 14);
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = window(1, 31);
        let inner = window(10, 12);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(window(10, 13).overlaps(&window(12, 15)));
        assert!(!window(10, 12).overlaps(&window(13, 15)));
    }

    #[test]
    fn test_contains_is_half_open() {
        let stay = window(10, 12);
        assert!(stay.contains(day(10)));
        assert!(stay.contains(day(11)));
        // Exclusive upper bound: the unit is free again at checkout
        assert!(!stay.contains(day(12)));
        assert!(!stay.contains(day(9)));
    }

    #[test]
    fn test_nights() {
        assert_eq!(window(10, 12).nights(), 2);
        assert_eq!(window(10, 11).nights(), 1);
        // Partial final day still counts as a night
        let stay = StayWindow::new(
            day(10),
            Utc.with_ymd_and_hms(2024, 1, 12, 11, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_unit_is_free_skips_unassigned_holds() {
        let target = window(10, 12);
        let holds = vec![UnitHold {
            unit_id: None,
            window: window(10, 12),
        }];
        // Same dates, but the hold has no physical unit: cannot block
        assert!(unit_is_free("unit-1", &target, &holds));
    }

    #[test]
    fn test_unit_is_free_blocked_by_overlap() {
        let target = window(10, 12);
        let holds = vec![
            UnitHold {
                unit_id: Some("unit-1".to_string()),
                window: window(11, 14),
            },
            UnitHold {
                unit_id: Some("unit-2".to_string()),
                window: window(10, 12),
            },
        ];
        assert!(!unit_is_free("unit-1", &target, &holds));
        // Other units' holds are ignored
        assert!(unit_is_free("unit-3", &target, &holds));
    }

    #[test]
    fn test_unit_free_for_back_to_back_stay() {
        let target = window(12, 14);
        let holds = vec![UnitHold {
            unit_id: Some("unit-1".to_string()),
            window: window(10, 12),
        }];
        assert!(unit_is_free("unit-1", &target, &holds));
    }
}
