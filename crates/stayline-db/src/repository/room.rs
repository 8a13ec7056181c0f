//! # Room Repository
//!
//! Database operations for room types and their physical units.
//!
//! ## Status Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Who writes room_units.status?                          │
//! │                                                                         │
//! │  Reconciliation job (stayline-recon)                                   │
//! │     └── mark_booked() / release_stale_booked()                         │
//! │         booked ↔ available, never touches maintenance                  │
//! │                                                                         │
//! │  Maintenance workflow (API)                                            │
//! │     └── set_maintenance()        → maintenance + release timestamp     │
//! │     └── release_expired_maintenance() (run by the reconciler)          │
//! │                                                                         │
//! │  Nobody else. The availability engine READS reservations, not status.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use stayline_core::{Room, RoomUnit, UnitStatus};

/// Repository for room and room-unit database operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Creates a new RoomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    // =========================================================================
    // Rooms (type + rate plan)
    // =========================================================================

    /// Creates a room type / rate plan row.
    pub async fn create_room(
        &self,
        hotel_id: &str,
        name: &str,
        rate_type: &str,
        max_guests: i64,
    ) -> DbResult<Room> {
        let now = Utc::now();
        let room = Room {
            id: Uuid::new_v4().to_string(),
            hotel_id: hotel_id.to_string(),
            name: name.to_string(),
            rate_type: rate_type.to_string(),
            max_guests,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %room.id, name = %room.name, rate_type = %room.rate_type, "Creating room");

        sqlx::query(
            r#"
            INSERT INTO rooms (id, hotel_id, name, rate_type, max_guests, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&room.id)
        .bind(&room.hotel_id)
        .bind(&room.name)
        .bind(&room.rate_type)
        .bind(room.max_guests)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(room)
    }

    /// Resolves the unique room for (hotel, room type, rate plan).
    ///
    /// The UNIQUE constraint on (hotel_id, name, rate_type) guarantees at
    /// most one row, so the availability lookup never has to disambiguate.
    pub async fn find_room(
        &self,
        hotel_id: &str,
        room_type: &str,
        rate_type: &str,
    ) -> DbResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, hotel_id, name, rate_type, max_guests, created_at, updated_at
            FROM rooms
            WHERE hotel_id = ?1 AND name = ?2 AND rate_type = ?3
            "#,
        )
        .bind(hotel_id)
        .bind(room_type)
        .bind(rate_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    /// Gets a room by ID, scoped to a hotel.
    pub async fn get_room(&self, hotel_id: &str, room_id: &str) -> DbResult<Option<Room>> {
        let room = sqlx::query_as::<_, Room>(
            r#"
            SELECT id, hotel_id, name, rate_type, max_guests, created_at, updated_at
            FROM rooms
            WHERE id = ?1 AND hotel_id = ?2
            "#,
        )
        .bind(room_id)
        .bind(hotel_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(room)
    }

    // =========================================================================
    // Room Units
    // =========================================================================

    /// Creates a physical room unit under a room type.
    pub async fn create_unit(
        &self,
        room_id: &str,
        hotel_id: &str,
        room_number: &str,
        floor: i64,
    ) -> DbResult<RoomUnit> {
        let now = Utc::now();
        let unit = RoomUnit {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.to_string(),
            hotel_id: hotel_id.to_string(),
            room_number: room_number.to_string(),
            floor,
            status: UnitStatus::Available,
            maintenance_until: None,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %unit.id, room_number = %unit.room_number, "Creating room unit");

        sqlx::query(
            r#"
            INSERT INTO room_units (
                id, room_id, hotel_id, room_number, floor,
                status, maintenance_until, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&unit.id)
        .bind(&unit.room_id)
        .bind(&unit.hotel_id)
        .bind(&unit.room_number)
        .bind(unit.floor)
        .bind(unit.status)
        .bind(unit.maintenance_until)
        .bind(unit.created_at)
        .bind(unit.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(unit)
    }

    /// Gets a room unit by ID.
    pub async fn get_unit(&self, id: &str) -> DbResult<Option<RoomUnit>> {
        let unit = sqlx::query_as::<_, RoomUnit>(
            r#"
            SELECT id, room_id, hotel_id, room_number, floor,
                   status, maintenance_until, created_at, updated_at
            FROM room_units
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(unit)
    }

    /// All units of one room type, ordered by room number.
    pub async fn units_for_room(&self, room_id: &str) -> DbResult<Vec<RoomUnit>> {
        let units = sqlx::query_as::<_, RoomUnit>(
            r#"
            SELECT id, room_id, hotel_id, room_number, floor,
                   status, maintenance_until, created_at, updated_at
            FROM room_units
            WHERE room_id = ?1
            ORDER BY room_number
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }

    /// Lists a hotel's units, optionally filtered by cached status.
    ///
    /// This is the consumer of the reconciliation job's cached hint: fast
    /// front-desk listings ("show me everything currently booked") without
    /// recomputing occupancy per unit.
    pub async fn list_units(
        &self,
        hotel_id: &str,
        status: Option<UnitStatus>,
    ) -> DbResult<Vec<RoomUnit>> {
        let units = match status {
            Some(status) => {
                sqlx::query_as::<_, RoomUnit>(
                    r#"
                    SELECT id, room_id, hotel_id, room_number, floor,
                           status, maintenance_until, created_at, updated_at
                    FROM room_units
                    WHERE hotel_id = ?1 AND status = ?2
                    ORDER BY room_number
                    "#,
                )
                .bind(hotel_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, RoomUnit>(
                    r#"
                    SELECT id, room_id, hotel_id, room_number, floor,
                           status, maintenance_until, created_at, updated_at
                    FROM room_units
                    WHERE hotel_id = ?1
                    ORDER BY room_number
                    "#,
                )
                .bind(hotel_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(units)
    }

    /// Total physical units of a hotel, regardless of status.
    ///
    /// The KPI denominator: available room-nights = this × days in range.
    pub async fn count_units_for_hotel(&self, hotel_id: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM room_units WHERE hotel_id = ?1")
                .bind(hotel_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    // =========================================================================
    // Maintenance Holds
    // =========================================================================

    /// Places a unit in maintenance with a durable release timestamp.
    ///
    /// The release record lives in the row (not an in-process timer), so a
    /// restart cannot lose the hold and the reconciliation job can release
    /// it from any instance.
    pub async fn set_maintenance(
        &self,
        unit_id: &str,
        until: DateTime<Utc>,
    ) -> DbResult<()> {
        let now = Utc::now();

        debug!(unit_id = %unit_id, until = %until, "Placing unit in maintenance");

        let result = sqlx::query(
            r#"
            UPDATE room_units SET
                status = 'maintenance',
                maintenance_until = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(unit_id)
        .bind(until)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("RoomUnit", unit_id));
        }

        Ok(())
    }

    /// Releases maintenance holds whose release timestamp has passed.
    ///
    /// Returns the number of units returned to inventory.
    pub async fn release_expired_maintenance(&self, now: DateTime<Utc>) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE room_units SET
                status = 'available',
                maintenance_until = NULL,
                updated_at = ?1
            WHERE status = 'maintenance'
              AND maintenance_until IS NOT NULL
              AND maintenance_until <= ?1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    // Status Reconciliation Bulk Updates
    // =========================================================================

    /// Marks the given units booked.
    ///
    /// Never promotes a maintenance unit to booked: maintenance is owned by
    /// its workflow and outranks occupancy in the cached hint.
    pub async fn mark_booked(&self, unit_ids: &[String]) -> DbResult<u64> {
        if unit_ids.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();

        let mut qb: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE room_units SET status = 'booked', updated_at = ");
        qb.push_bind(now);
        qb.push(" WHERE status <> 'maintenance' AND id IN (");
        let mut ids = qb.separated(", ");
        for id in unit_ids {
            ids.push_bind(id);
        }
        qb.push(")");

        let result = qb.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Releases booked units that are NOT in the currently-occupied set.
    ///
    /// Only rows in 'booked' are touched: this is the mechanism's own
    /// state, so maintenance holds and already-available units pass
    /// through untouched.
    pub async fn release_stale_booked(&self, occupied_unit_ids: &[String]) -> DbResult<u64> {
        let now = Utc::now();

        let mut qb: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("UPDATE room_units SET status = 'available', updated_at = ");
        qb.push_bind(now);
        qb.push(" WHERE status = 'booked'");

        if !occupied_unit_ids.is_empty() {
            qb.push(" AND id NOT IN (");
            let mut ids = qb.separated(", ");
            for id in occupied_unit_ids {
                ids.push_bind(id);
            }
            qb.push(")");
        }

        let result = qb.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}
