//! # Revenue Reporting
//!
//! Gathers the per-range sums (occupied room-nights, revenue, distribution
//! cost, unit count) and hands them to the pure KPI arithmetic in
//! stayline-core.
//!
//! ## Range Semantics
//! Reporting ranges are inclusive calendar days: `start` is normalized to
//! 00:00:00 and `end` to 23:59:59 of its day. Reservation matching uses the
//! boundary-inclusive test `check_in <= range_end AND check_out >=
//! range_start`, a reporting aggregate that is deliberately looser than the
//! half-open booking overlap.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::expense::ExpenseRepository;
use crate::repository::reservation::ReservationRepository;
use crate::repository::room::RoomRepository;
use stayline_core::{KpiInputs, KpiReport, Money, ValidationError};

// =============================================================================
// Reporting Range
// =============================================================================

/// A validated inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportingRange {
    /// Builds a range, rejecting `end < start`. Single-day ranges
    /// (`start == end`) are fine.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::RangeOrder);
        }
        Ok(ReportingRange { start, end })
    }

    /// 00:00:00 UTC on the first day.
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// 23:59:59 UTC on the last day.
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc() + Duration::seconds(86_399)
    }

    /// Inclusive calendar days spanned (a single day counts 1).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

// =============================================================================
// Reporter
// =============================================================================

/// Computes revenue KPIs for a hotel and reporting range.
#[derive(Debug, Clone)]
pub struct RevenueReporter {
    pool: SqlitePool,
}

impl RevenueReporter {
    /// Creates a new RevenueReporter.
    pub fn new(pool: SqlitePool) -> Self {
        RevenueReporter { pool }
    }

    /// Gathers sums and computes the KPI report. Pure read.
    pub async fn kpis(&self, hotel_id: &str, range: &ReportingRange) -> DbResult<KpiReport> {
        let reservations = ReservationRepository::new(self.pool.clone());
        let rooms = RoomRepository::new(self.pool.clone());
        let expenses = ExpenseRepository::new(self.pool.clone());

        let matching = reservations
            .in_reporting_range(hotel_id, range.start_instant(), range.end_instant())
            .await?;

        let mut occupied_room_nights = 0i64;
        let mut revenue = Money::zero();
        for reservation in &matching {
            occupied_room_nights += reservation.room_nights();
            revenue += reservation.revenue();
        }

        let total_units = rooms.count_units_for_hotel(hotel_id).await?;

        let distribution_cents = expenses
            .distribution_cost(hotel_id, range.start_instant(), range.end_instant())
            .await?;

        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights,
            revenue,
            distribution_cost: Money::from_cents(distribution_cents),
            total_units,
            days_in_range: range.days(),
        });

        debug!(
            hotel_id = %hotel_id,
            reservations = matching.len(),
            occupied_room_nights,
            revenue = %report.revenue,
            "Computed revenue KPIs"
        );

        Ok(report)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::reservation::NewReservation;
    use chrono::TimeZone;
    use stayline_core::stay::StayWindow;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn window(from: u32, to: u32) -> StayWindow {
        StayWindow::new(
            Utc.with_ymd_and_hms(2024, 1, from, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, to, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    async fn seed_hotel_with_units(db: &Database, units: usize) -> String {
        let hotel = db.hotels().create("Harbor View", "UTC").await.unwrap();
        let room = db
            .rooms()
            .create_room(&hotel.id, "Deluxe", "CP", 2)
            .await
            .unwrap();
        for i in 0..units {
            db.rooms()
                .create_unit(&room.id, &hotel.id, &format!("10{}", i + 1), 1)
                .await
                .unwrap();
        }
        hotel.id
    }

    async fn add_stay(db: &Database, hotel_id: &str, from: u32, to: u32, nights: i64) {
        db.reservations()
            .create(
                hotel_id,
                NewReservation {
                    guest_name: "A. Guest".to_string(),
                    window: window(from, to),
                    nights,
                    rooms: 1,
                    per_day_rate_cents: 100_000,
                    room_unit_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();
    }

    #[test]
    fn test_range_validation_and_days() {
        assert!(ReportingRange::new(date(12), date(10)).is_err());

        let single = ReportingRange::new(date(10), date(10)).unwrap();
        assert_eq!(single.days(), 1);

        let two = ReportingRange::new(date(10), date(11)).unwrap();
        assert_eq!(two.days(), 2);
    }

    #[test]
    fn test_range_normalization() {
        let range = ReportingRange::new(date(10), date(11)).unwrap();
        assert_eq!(
            range.start_instant(),
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(
            range.end_instant(),
            Utc.with_ymd_and_hms(2024, 1, 11, 23, 59, 59).unwrap()
        );
    }

    /// 3 units, 2-day range, one stay: rate 1000.00 × 2 nights × 1 room.
    #[tokio::test]
    async fn test_kpis_for_two_day_range() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hotel_id = seed_hotel_with_units(&db, 3).await;
        add_stay(&db, &hotel_id, 10, 12, 2).await;

        let range = ReportingRange::new(date(10), date(11)).unwrap();
        let report = db.reporting().kpis(&hotel_id, &range).await.unwrap();

        assert_eq!(report.occupied_room_nights, 2);
        assert_eq!(report.available_room_nights, 6);
        assert_eq!(report.adr.cents(), 100_000); // 1000.00
        assert_eq!(report.occupancy_bps, 3333); // 33.33%
        assert_eq!(report.revpar.cents(), 33_333); // 333.33
    }

    #[tokio::test]
    async fn test_boundary_touching_stay_is_included() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hotel_id = seed_hotel_with_units(&db, 3).await;
        // Checks out at midnight on the range's first day
        add_stay(&db, &hotel_id, 8, 10, 2).await;

        let range = ReportingRange::new(date(10), date(11)).unwrap();
        let report = db.reporting().kpis(&hotel_id, &range).await.unwrap();

        // The reporting overlap is boundary-inclusive, unlike the booking one
        assert_eq!(report.occupied_room_nights, 2);
    }

    #[tokio::test]
    async fn test_stay_outside_range_is_excluded() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hotel_id = seed_hotel_with_units(&db, 3).await;
        add_stay(&db, &hotel_id, 20, 22, 2).await;

        let range = ReportingRange::new(date(10), date(11)).unwrap();
        let report = db.reporting().kpis(&hotel_id, &range).await.unwrap();

        assert_eq!(report.occupied_room_nights, 0);
        assert_eq!(report.revenue.cents(), 0);
    }

    #[tokio::test]
    async fn test_distribution_cost_matches_commission_categories() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hotel_id = seed_hotel_with_units(&db, 3).await;
        add_stay(&db, &hotel_id, 10, 12, 2).await;

        let incurred = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let ota = db
            .expenses()
            .create_category(&hotel_id, "OTA COMMISSION")
            .await
            .unwrap();
        let utilities = db
            .expenses()
            .create_category(&hotel_id, "Utilities")
            .await
            .unwrap();
        db.expenses()
            .create_expense(&hotel_id, &ota.id, 30_000, incurred, None)
            .await
            .unwrap();
        db.expenses()
            .create_expense(&hotel_id, &utilities.id, 99_999, incurred, None)
            .await
            .unwrap();

        let range = ReportingRange::new(date(10), date(11)).unwrap();
        let report = db.reporting().kpis(&hotel_id, &range).await.unwrap();

        // Only the commission category counts, matched case-insensitively
        assert_eq!(report.distribution_cost.cents(), 30_000);
        // RevADR = (2000.00 − 300.00) / 6 = 283.33
        assert_eq!(report.revadr.cents(), 28_333);
    }

    #[tokio::test]
    async fn test_hotel_with_no_units_reports_zeros() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let hotel_id = seed_hotel_with_units(&db, 0).await;
        add_stay(&db, &hotel_id, 10, 12, 2).await;

        let range = ReportingRange::new(date(10), date(11)).unwrap();
        let report = db.reporting().kpis(&hotel_id, &range).await.unwrap();

        assert_eq!(report.available_room_nights, 0);
        assert_eq!(report.occupancy_bps, 0);
        assert_eq!(report.revpar.cents(), 0);
        assert_eq!(report.revadr.cents(), 0);
    }
}
