//! # Revenue KPI Arithmetic
//!
//! Pure computation of the standard hospitality revenue metrics from
//! pre-aggregated sums. The data layer gathers the sums; this module owns
//! the definitions.
//!
//! ## Definitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  occupied_room_nights   = Σ nights × rooms        (matching stays)     │
//! │  revenue                = Σ rate × nights × rooms                      │
//! │  available_room_nights  = total units × days in range                  │
//! │                                                                         │
//! │  ADR        = revenue / occupied_room_nights                           │
//! │  occupancy  = occupied_room_nights / available_room_nights             │
//! │  RevPAR     = ADR × occupancy  =  revenue / available_room_nights      │
//! │  RevADR     = (revenue − distribution cost) / available_room_nights    │
//! │                                                                         │
//! │  Every ratio with a zero denominator is 0 - never NaN, never a panic.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is integer (cents and basis points); amounts are exact to
//! two decimals by construction. Raw sums stay available unrounded on the
//! report for further computation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Basis points per whole (100% = 10_000 bps).
const BPS_SCALE: i64 = 10_000;

// =============================================================================
// Inputs
// =============================================================================

/// Pre-aggregated sums for one hotel and reporting range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiInputs {
    /// `Σ nights × rooms` over reservations matching the range.
    pub occupied_room_nights: i64,

    /// `Σ per_day_rate × nights × rooms` over the same reservations.
    pub revenue: Money,

    /// Commission expenses in the range (distribution cost).
    pub distribution_cost: Money,

    /// All physical units of the hotel, regardless of status.
    pub total_units: i64,

    /// Inclusive calendar days in the reporting range.
    pub days_in_range: i64,
}

// =============================================================================
// Report
// =============================================================================

/// Computed revenue metrics for one hotel and reporting range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct KpiReport {
    /// Raw sum: occupied room-nights.
    pub occupied_room_nights: i64,

    /// Raw product: available room-nights (units × days).
    pub available_room_nights: i64,

    /// Raw sum: gross reservation revenue.
    pub revenue: Money,

    /// Raw sum: commission expenses deducted by RevADR.
    pub distribution_cost: Money,

    /// Average Daily Rate: revenue per occupied room-night.
    pub adr: Money,

    /// Occupancy in basis points (3333 = 33.33%).
    pub occupancy_bps: i64,

    /// Revenue per available room-night.
    pub revpar: Money,

    /// RevPAR net of distribution cost.
    pub revadr: Money,
}

impl KpiReport {
    /// Computes the full metric set from pre-aggregated sums.
    pub fn compute(inputs: KpiInputs) -> KpiReport {
        let available_room_nights = inputs.total_units * inputs.days_in_range;

        let adr = inputs.revenue.div_rounded(inputs.occupied_room_nights);

        let occupancy_bps = if available_room_nights == 0 {
            0
        } else {
            // Round half away, matching Money::div_rounded
            (inputs.occupied_room_nights * BPS_SCALE + available_room_nights / 2)
                / available_room_nights
        };

        // ADR × occupancy collapses algebraically to revenue / available,
        // which avoids compounding two roundings.
        let revpar = inputs.revenue.div_rounded(available_room_nights);

        let revadr = (inputs.revenue - inputs.distribution_cost).div_rounded(available_room_nights);

        KpiReport {
            occupied_room_nights: inputs.occupied_room_nights,
            available_room_nights,
            revenue: inputs.revenue,
            distribution_cost: inputs.distribution_cost,
            adr,
            occupancy_bps,
            revpar,
            revadr,
        }
    }

    /// Occupancy as a display percentage (33.33 for 3333 bps).
    #[inline]
    pub fn occupancy_percent(&self) -> f64 {
        self.occupancy_bps as f64 / 100.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 units, 2-day range, one stay at 1000.00 × 2 nights × 1 room.
    #[test]
    fn test_two_day_single_stay() {
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 2,
            revenue: Money::from_cents(200_000),
            distribution_cost: Money::zero(),
            total_units: 3,
            days_in_range: 2,
        });

        assert_eq!(report.occupied_room_nights, 2);
        assert_eq!(report.available_room_nights, 6);
        assert_eq!(report.adr.cents(), 100_000); // 1000.00
        assert_eq!(report.occupancy_bps, 3333); // 33.33%
        assert_eq!(report.revpar.cents(), 33_333); // 333.33
        assert_eq!(report.occupancy_percent(), 33.33);
    }

    #[test]
    fn test_zero_occupied_room_nights() {
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 0,
            revenue: Money::zero(),
            distribution_cost: Money::zero(),
            total_units: 3,
            days_in_range: 7,
        });

        assert_eq!(report.adr.cents(), 0);
        assert_eq!(report.occupancy_bps, 0);
        assert_eq!(report.revpar.cents(), 0);
        assert_eq!(report.revadr.cents(), 0);
    }

    #[test]
    fn test_zero_available_room_nights() {
        // Hotel with no onboarded units yet
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 2,
            revenue: Money::from_cents(200_000),
            distribution_cost: Money::from_cents(10_000),
            total_units: 0,
            days_in_range: 2,
        });

        assert_eq!(report.available_room_nights, 0);
        assert_eq!(report.occupancy_bps, 0);
        assert_eq!(report.revpar.cents(), 0);
        assert_eq!(report.revadr.cents(), 0);
        // ADR has its own denominator and still computes
        assert_eq!(report.adr.cents(), 100_000);
    }

    #[test]
    fn test_distribution_cost_deduction() {
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 2,
            revenue: Money::from_cents(200_000),
            distribution_cost: Money::from_cents(50_000),
            total_units: 3,
            days_in_range: 2,
        });

        // (2000.00 − 500.00) / 6 = 250.00
        assert_eq!(report.revadr.cents(), 25_000);
        // Gross RevPAR unchanged
        assert_eq!(report.revpar.cents(), 33_333);
    }

    #[test]
    fn test_revadr_can_go_negative() {
        // Commission exceeding revenue is a loss, reported as such
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 1,
            revenue: Money::from_cents(10_000),
            distribution_cost: Money::from_cents(40_000),
            total_units: 1,
            days_in_range: 3,
        });

        assert_eq!(report.revadr.cents(), -10_000);
        assert!(report.revadr.is_negative());
    }

    #[test]
    fn test_full_occupancy() {
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 6,
            revenue: Money::from_cents(600_000),
            distribution_cost: Money::zero(),
            total_units: 3,
            days_in_range: 2,
        });

        assert_eq!(report.occupancy_bps, BPS_SCALE);
        assert_eq!(report.adr.cents(), 100_000);
        // At 100% occupancy RevPAR equals ADR
        assert_eq!(report.revpar, report.adr);
    }
}
