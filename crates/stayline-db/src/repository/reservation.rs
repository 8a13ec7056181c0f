//! # Reservation Repository
//!
//! Database operations for stays: inserts, the overlap queries behind the
//! availability engine and the reconciliation job, and the transactional
//! unit assignment.
//!
//! ## Assignment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Transactional Unit Assignment                          │
//! │                                                                         │
//! │  1. BEGIN                                                              │
//! │  2. Load reservation (hotel-scoped)      → NotFound if absent          │
//! │  3. Load target unit (hotel-scoped)      → NotFound if absent          │
//! │  4. Load the unit's other reservations                                 │
//! │  5. Re-check the overlap predicate IN the transaction                  │
//! │     └── collision → ROLLBACK, BookingConflict (HTTP 409, retryable)    │
//! │  6. UPDATE reservations SET room_unit_id                               │
//! │  7. COMMIT                                                             │
//! │                                                                         │
//! │  Two concurrent bookings for the last unit serialize on the write;    │
//! │  the loser's re-check sees the winner's row and aborts cleanly.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stayline_core::stay::{unit_is_free, StayWindow, UnitHold};
use stayline_core::Reservation;

/// Columns fetched for every reservation read.
const RESERVATION_COLUMNS: &str = "id, hotel_id, room_unit_id, guest_name, \
     check_in, check_out, nights, rooms, per_day_rate_cents, notes, \
     created_at, updated_at";

// =============================================================================
// New Reservation Parameters
// =============================================================================

/// Validated input for creating a reservation.
///
/// Callers validate fields (guest name, counts, rate, window ordering) at
/// the API boundary before constructing this.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub guest_name: String,
    pub window: StayWindow,
    pub nights: i64,
    pub rooms: i64,
    pub per_day_rate_cents: i64,
    pub room_unit_id: Option<String>,
    pub notes: Option<String>,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Creates a reservation.
    ///
    /// The unit assignment is optional here; assigning later goes through
    /// [`assign_unit`](Self::assign_unit) so the overlap re-check runs.
    pub async fn create(&self, hotel_id: &str, new: NewReservation) -> DbResult<Reservation> {
        let now = Utc::now();
        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            room_unit_id: new.room_unit_id,
            guest_name: new.guest_name,
            check_in: new.window.check_in(),
            check_out: new.window.check_out(),
            nights: new.nights,
            rooms: new.rooms,
            per_day_rate_cents: new.per_day_rate_cents,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };

        debug!(
            id = %reservation.id,
            guest = %reservation.guest_name,
            check_in = %reservation.check_in,
            check_out = %reservation.check_out,
            "Creating reservation"
        );

        sqlx::query(
            r#"
            INSERT INTO reservations (
                id, hotel_id, room_unit_id, guest_name,
                check_in, check_out, nights, rooms, per_day_rate_cents,
                notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&reservation.id)
        .bind(&reservation.hotel_id)
        .bind(&reservation.room_unit_id)
        .bind(&reservation.guest_name)
        .bind(reservation.check_in)
        .bind(reservation.check_out)
        .bind(reservation.nights)
        .bind(reservation.rooms)
        .bind(reservation.per_day_rate_cents)
        .bind(&reservation.notes)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Gets a reservation by ID, scoped to a hotel.
    pub async fn get_by_id(
        &self,
        hotel_id: &str,
        id: &str,
    ) -> DbResult<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1 AND hotel_id = ?2"
        ))
        .bind(id)
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    /// Unit ids (from the given set) that have at least one reservation
    /// overlapping the stay window.
    ///
    /// The half-open overlap test in SQL: `check_in < target_out AND
    /// check_out > target_in`. Unassigned reservations are excluded; a
    /// stay without a physical unit cannot block one.
    pub async fn overlapping_unit_ids(
        &self,
        unit_ids: &[String],
        window: &StayWindow,
    ) -> DbResult<Vec<String>> {
        if unit_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut qb: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
            "SELECT DISTINCT room_unit_id FROM reservations \
             WHERE room_unit_id IS NOT NULL AND check_in < ",
        );
        qb.push_bind(window.check_out());
        qb.push(" AND check_out > ");
        qb.push_bind(window.check_in());
        qb.push(" AND room_unit_id IN (");
        let mut ids = qb.separated(", ");
        for id in unit_ids {
            ids.push_bind(id);
        }
        qb.push(")");

        let occupied: Vec<String> = qb.build_query_scalar().fetch_all(&self.pool).await?;

        Ok(occupied)
    }

    /// Unit ids occupied at a given instant, across ALL hotels.
    ///
    /// The reconciliation job's "currently booked set":
    /// `check_in <= now AND check_out > now AND room_unit_id IS NOT NULL`.
    pub async fn units_occupied_at(&self, instant: DateTime<Utc>) -> DbResult<Vec<String>> {
        let occupied: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT room_unit_id
            FROM reservations
            WHERE room_unit_id IS NOT NULL
              AND check_in <= ?1
              AND check_out > ?1
            "#,
        )
        .bind(instant)
        .fetch_all(&self.pool)
        .await?;

        Ok(occupied)
    }

    /// Reservations matching a reporting range for a hotel.
    ///
    /// Boundary-inclusive on purpose (`check_in <= range_end AND check_out
    /// >= range_start`): a stay checking out on the range start still
    /// belongs in that day's report. Looser than the booking overlap test,
    /// which must keep back-to-back stays apart.
    pub async fn in_reporting_range(
        &self,
        hotel_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> DbResult<Vec<Reservation>> {
        let reservations = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE hotel_id = ?1 AND check_in <= ?2 AND check_out >= ?3 \
             ORDER BY check_in"
        ))
        .bind(hotel_id)
        .bind(range_end)
        .bind(range_start)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    /// Assigns a physical unit to a reservation, re-checking the overlap
    /// predicate inside the transaction.
    ///
    /// ## Errors
    /// * `NotFound` - reservation or unit absent (or other hotel's)
    /// * `BookingConflict` - another reservation claimed the unit for an
    ///   overlapping window; retry with a fresh availability query
    pub async fn assign_unit(
        &self,
        hotel_id: &str,
        reservation_id: &str,
        unit_id: &str,
    ) -> DbResult<Reservation> {
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1 AND hotel_id = ?2"
        ))
        .bind(reservation_id)
        .bind(hotel_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Reservation", reservation_id))?;

        // Unit must exist and belong to the same hotel; cross-tenant ids
        // are indistinguishable from unknown ones.
        let unit_exists: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM room_units WHERE id = ?1 AND hotel_id = ?2",
        )
        .bind(unit_id)
        .bind(hotel_id)
        .fetch_one(&mut *tx)
        .await?;

        if unit_exists == 0 {
            return Err(DbError::not_found("RoomUnit", unit_id));
        }

        let window = reservation.window().map_err(|e| DbError::CorruptRow {
            entity: "Reservation".to_string(),
            id: reservation.id.clone(),
            reason: e.to_string(),
        })?;

        let others = sqlx::query_as::<_, Reservation>(&format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE room_unit_id = ?1 AND id <> ?2"
        ))
        .bind(unit_id)
        .bind(&reservation.id)
        .fetch_all(&mut *tx)
        .await?;

        let mut holds = Vec::with_capacity(others.len());
        for other in &others {
            let hold_window = other.window().map_err(|e| DbError::CorruptRow {
                entity: "Reservation".to_string(),
                id: other.id.clone(),
                reason: e.to_string(),
            })?;
            holds.push(UnitHold {
                unit_id: other.room_unit_id.clone(),
                window: hold_window,
            });
        }

        if !unit_is_free(unit_id, &window, &holds) {
            // Dropping the transaction rolls it back
            return Err(DbError::booking_conflict(unit_id));
        }

        let now = Utc::now();
        sqlx::query(
            "UPDATE reservations SET room_unit_id = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(&reservation.id)
        .bind(unit_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(
            reservation_id = %reservation.id,
            unit_id = %unit_id,
            "Assigned unit to reservation"
        );

        Ok(Reservation {
            room_unit_id: Some(unit_id.to_string()),
            updated_at: now,
            ..reservation
        })
    }
}
