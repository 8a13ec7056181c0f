//! # Live Availability Engine
//!
//! Answers "how many / which room units of type X under rate plan Y are
//! free between check-in and check-out" for a hotel.
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Live Availability Query (read-only)                        │
//! │                                                                         │
//! │  1. Validate inputs (AvailabilityQuery::new)  → ValidationError        │
//! │  2. Resolve Room (hotel, type, rate plan)     → NotFound if absent     │
//! │  3. Load the room's unit ids                                           │
//! │  4. Load unit ids with an overlapping reservation                      │
//! │  5. free = units − occupied                                            │
//! │                                                                         │
//! │  No locks, no status reads: this is a consistent snapshot, not a       │
//! │  hold. Booking goes through the transactional assignment, which        │
//! │  re-checks the predicate before writing.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cached `room_units.status` flag is deliberately ignored here. It is
//! a display hint maintained by the reconciliation job; trusting it for
//! booking decisions would admit staleness bugs.

use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::reservation::ReservationRepository;
use crate::repository::room::RoomRepository;
use stayline_core::stay::StayWindow;
use stayline_core::validation::{validate_rate_type, validate_room_type, validate_uuid};
use stayline_core::{Room, RoomUnit, ValidationError};

// =============================================================================
// Query
// =============================================================================

/// A validated availability request.
///
/// Construction performs all input validation, so a query in hand means
/// nothing was missing or malformed. Engine errors after this point are
/// NotFound or data-access failures, never bad input.
#[derive(Debug, Clone)]
pub struct AvailabilityQuery {
    hotel_id: String,
    room_type: String,
    rate_type: String,
    window: StayWindow,
}

impl AvailabilityQuery {
    /// Validates and builds an availability query.
    pub fn new(
        hotel_id: &str,
        room_type: &str,
        rate_type: &str,
        window: StayWindow,
    ) -> Result<Self, ValidationError> {
        validate_uuid("hotel_id", hotel_id)?;
        validate_room_type(room_type)?;
        validate_rate_type(rate_type)?;

        Ok(AvailabilityQuery {
            hotel_id: hotel_id.to_string(),
            room_type: room_type.trim().to_string(),
            rate_type: rate_type.trim().to_string(),
            window,
        })
    }

    /// The requested stay window.
    #[inline]
    pub fn window(&self) -> &StayWindow {
        &self.window
    }
}

// =============================================================================
// Report
// =============================================================================

/// Result of one availability computation.
///
/// Carries the full partition (free + occupied) so callers and tests can
/// verify `|free| + |occupied| == |total|` with the two sets disjoint.
#[derive(Debug, Clone)]
pub struct AvailabilityReport {
    /// The resolved room type / rate plan.
    pub room: Room,

    /// Units with no overlapping reservation, ordered by room number.
    pub free_units: Vec<RoomUnit>,

    /// Unit ids with at least one overlapping reservation.
    pub occupied_unit_ids: Vec<String>,

    /// Total physical units under the room.
    pub total_units: usize,
}

impl AvailabilityReport {
    /// Number of free units (what the booking engine's result page shows).
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free_units.len()
    }

    /// Door numbers of the free units (what the assignment picker lists).
    pub fn free_room_numbers(&self) -> Vec<String> {
        self.free_units
            .iter()
            .map(|u| u.room_number.clone())
            .collect()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Computes live room-unit availability from reservations.
#[derive(Debug, Clone)]
pub struct AvailabilityEngine {
    pool: SqlitePool,
}

impl AvailabilityEngine {
    /// Creates a new AvailabilityEngine.
    pub fn new(pool: SqlitePool) -> Self {
        AvailabilityEngine { pool }
    }

    /// Computes the free/occupied partition for a query.
    ///
    /// ## Errors
    /// * `NotFound` - no room matches (hotel, room type, rate plan); the
    ///   reservation fetch never runs in that case
    pub async fn availability(&self, query: &AvailabilityQuery) -> DbResult<AvailabilityReport> {
        let rooms = RoomRepository::new(self.pool.clone());
        let reservations = ReservationRepository::new(self.pool.clone());

        let room = rooms
            .find_room(&query.hotel_id, &query.room_type, &query.rate_type)
            .await?
            .ok_or_else(|| {
                DbError::not_found(
                    "Room",
                    format!("{}/{}", query.room_type, query.rate_type),
                )
            })?;

        let units = rooms.units_for_room(&room.id).await?;
        let unit_ids: Vec<String> = units.iter().map(|u| u.id.clone()).collect();

        let occupied_unit_ids = reservations
            .overlapping_unit_ids(&unit_ids, &query.window)
            .await?;
        let occupied: HashSet<&str> = occupied_unit_ids.iter().map(String::as_str).collect();

        let total_units = units.len();
        let free_units: Vec<RoomUnit> = units
            .into_iter()
            .filter(|u| !occupied.contains(u.id.as_str()))
            .collect();

        debug!(
            room = %room.name,
            rate_type = %room.rate_type,
            total = total_units,
            free = free_units.len(),
            occupied = occupied_unit_ids.len(),
            "Computed availability"
        );

        Ok(AvailabilityReport {
            room,
            free_units,
            occupied_unit_ids,
            total_units,
        })
    }

    /// Number of free units for a query.
    pub async fn free_unit_count(&self, query: &AvailabilityQuery) -> DbResult<usize> {
        Ok(self.availability(query).await?.free_count())
    }

    /// Door numbers of the free units for a query.
    pub async fn free_room_numbers(&self, query: &AvailabilityQuery) -> DbResult<Vec<String>> {
        Ok(self.availability(query).await?.free_room_numbers())
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
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn window(from: u32, to: u32) -> StayWindow {
        StayWindow::new(day(from), day(to)).unwrap()
    }

    struct Fixture {
        db: Database,
        hotel_id: String,
        unit_ids: Vec<String>,
    }

    /// Hotel with room "Deluxe"/"CP" and units 101, 102, 103; a
    /// reservation occupies unit 101 for [Jan 10, Jan 12).
    async fn seed() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let hotel = db.hotels().create("Harbor View", "UTC").await.unwrap();
        let room = db
            .rooms()
            .create_room(&hotel.id, "Deluxe", "CP", 2)
            .await
            .unwrap();

        let mut unit_ids = Vec::new();
        for number in ["101", "102", "103"] {
            let unit = db
                .rooms()
                .create_unit(&room.id, &hotel.id, number, 1)
                .await
                .unwrap();
            unit_ids.push(unit.id);
        }

        let reservation = db
            .reservations()
            .create(
                &hotel.id,
                NewReservation {
                    guest_name: "A. Guest".to_string(),
                    window: window(10, 12),
                    nights: 2,
                    rooms: 1,
                    per_day_rate_cents: 100_000,
                    room_unit_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        db.reservations()
            .assign_unit(&hotel.id, &reservation.id, &unit_ids[0])
            .await
            .unwrap();

        Fixture {
            db,
            hotel_id: hotel.id,
            unit_ids,
        }
    }

    fn query(fixture: &Fixture, from: u32, to: u32) -> AvailabilityQuery {
        AvailabilityQuery::new(&fixture.hotel_id, "Deluxe", "CP", window(from, to)).unwrap()
    }

    #[tokio::test]
    async fn test_overlapping_stay_excludes_unit() {
        let fixture = seed().await;

        let report = fixture
            .db
            .availability()
            .availability(&query(&fixture, 10, 12))
            .await
            .unwrap();

        assert_eq!(report.free_count(), 2);
        let numbers = report.free_room_numbers();
        assert!(!numbers.contains(&"101".to_string()));
        assert_eq!(numbers, vec!["102".to_string(), "103".to_string()]);
    }

    #[tokio::test]
    async fn test_back_to_back_checkin_sees_all_units() {
        let fixture = seed().await;

        // Starts exactly at the existing reservation's checkout
        let count = fixture
            .db
            .availability()
            .free_unit_count(&query(&fixture, 12, 14))
            .await
            .unwrap();

        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn test_free_and_occupied_partition_the_units() {
        let fixture = seed().await;

        let report = fixture
            .db
            .availability()
            .availability(&query(&fixture, 9, 11))
            .await
            .unwrap();

        assert_eq!(
            report.free_count() + report.occupied_unit_ids.len(),
            report.total_units
        );
        for unit in &report.free_units {
            assert!(!report.occupied_unit_ids.contains(&unit.id));
        }
    }

    #[tokio::test]
    async fn test_unknown_room_is_not_found() {
        let fixture = seed().await;

        let q =
            AvailabilityQuery::new(&fixture.hotel_id, "Suite", "EP", window(10, 12)).unwrap();
        let err = fixture.db.availability().availability(&q).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unassigned_reservation_blocks_nothing() {
        let fixture = seed().await;

        // Same dates as the assigned reservation, but no unit
        fixture
            .db
            .reservations()
            .create(
                &fixture.hotel_id,
                NewReservation {
                    guest_name: "B. Guest".to_string(),
                    window: window(10, 12),
                    nights: 2,
                    rooms: 1,
                    per_day_rate_cents: 90_000,
                    room_unit_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        let count = fixture
            .db
            .availability()
            .free_unit_count(&query(&fixture, 10, 12))
            .await
            .unwrap();

        // Still only unit 101 blocked
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_assignment_conflict_is_rejected() {
        let fixture = seed().await;

        let second = fixture
            .db
            .reservations()
            .create(
                &fixture.hotel_id,
                NewReservation {
                    guest_name: "C. Guest".to_string(),
                    window: window(11, 13),
                    nights: 2,
                    rooms: 1,
                    per_day_rate_cents: 95_000,
                    room_unit_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        // Unit 101 already holds [Jan 10, Jan 12); [Jan 11, Jan 13) collides
        let err = fixture
            .db
            .reservations()
            .assign_unit(&fixture.hotel_id, &second.id, &fixture.unit_ids[0])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::BookingConflict { .. }));

        // The reservation is untouched and a free unit still works
        let assigned = fixture
            .db
            .reservations()
            .assign_unit(&fixture.hotel_id, &second.id, &fixture.unit_ids[1])
            .await
            .unwrap();
        assert_eq!(assigned.room_unit_id.as_deref(), Some(fixture.unit_ids[1].as_str()));
    }

    #[tokio::test]
    async fn test_back_to_back_assignment_is_allowed() {
        let fixture = seed().await;

        let followup = fixture
            .db
            .reservations()
            .create(
                &fixture.hotel_id,
                NewReservation {
                    guest_name: "D. Guest".to_string(),
                    window: window(12, 14),
                    nights: 2,
                    rooms: 1,
                    per_day_rate_cents: 95_000,
                    room_unit_id: None,
                    notes: None,
                },
            )
            .await
            .unwrap();

        // Checkout Jan 12, new check-in Jan 12: same-day turnover is fine
        let assigned = fixture
            .db
            .reservations()
            .assign_unit(&fixture.hotel_id, &followup.id, &fixture.unit_ids[0])
            .await
            .unwrap();
        assert_eq!(assigned.room_unit_id.as_deref(), Some(fixture.unit_ids[0].as_str()));
    }

    #[test]
    fn test_query_validation_rejects_missing_fields() {
        let w = window(10, 12);

        assert!(AvailabilityQuery::new("not-a-uuid", "Deluxe", "CP", w).is_err());
        assert!(AvailabilityQuery::new(
            "550e8400-e29b-41d4-a716-446655440000",
            "",
            "CP",
            w
        )
        .is_err());
        assert!(AvailabilityQuery::new(
            "550e8400-e29b-41d4-a716-446655440000",
            "Deluxe",
            "",
            w
        )
        .is_err());
    }
}
