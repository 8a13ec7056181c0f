//! # Domain Types
//!
//! Core domain types used throughout Stayline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Hotel 1 ──* Room 1 ──* RoomUnit 1 ──* Reservation                     │
//! │                                        (via room_unit_id, nullable     │
//! │                                         until a unit is assigned)      │
//! │                                                                         │
//! │  Hotel 1 ──* ExpenseCategory 1 ──* Expense                             │
//! │                                                                         │
//! │  Every row carries hotel_id; every query filters on it so one          │
//! │  tenant can never observe another tenant's inventory.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business key: (room type + rate plan, room number, etc.) - human-readable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::stay::StayWindow;

// =============================================================================
// Hotel
// =============================================================================

/// A tenant property. Exists mostly as the scoping row every other entity
/// hangs off.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    /// IANA timezone label for front-desk display. Core logic works in UTC.
    pub timezone: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Room
// =============================================================================

/// A sellable room type / rate plan combination within a hotel.
///
/// Not a physical room: "Deluxe/CP" is one Room even when the hotel has
/// twelve Deluxe units. `(hotel_id, name, rate_type)` is unique, so lookups
/// resolve to at most one row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Room {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Hotel this room type belongs to.
    pub hotel_id: String,

    /// Room type name shown to guests ("Deluxe", "Suite").
    pub name: String,

    /// Rate plan code ("CP", "EP", "MAP").
    pub rate_type: String,

    /// Maximum guests per unit of this type.
    pub max_guests: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Room Unit
// =============================================================================

/// Cached occupancy state of a physical room unit.
///
/// A display/filter hint maintained by the reconciliation job; booking
/// decisions never read it and always recompute from reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum UnitStatus {
    /// No live reservation holds the unit.
    Available,
    /// A reservation covers the unit right now.
    Booked,
    /// Held out of inventory by the maintenance workflow. The
    /// reconciliation job never overrides this state.
    Maintenance,
}

impl Default for UnitStatus {
    fn default() -> Self {
        UnitStatus::Available
    }
}

/// One physical, numbered, bookable room instance belonging to a Room.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RoomUnit {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Room type/rate plan this unit sells under.
    pub room_id: String,

    /// Hotel this unit belongs to.
    pub hotel_id: String,

    /// Door number ("101", "T-204"). Unique within the hotel.
    pub room_number: String,

    /// Floor the unit is on.
    pub floor: i64,

    /// Cached occupancy hint, owned by the reconciliation job.
    pub status: UnitStatus,

    /// When a maintenance hold expires and the unit returns to inventory.
    /// `None` unless `status == Maintenance`. Durable, so holds survive
    /// process restarts.
    #[ts(as = "Option<String>")]
    pub maintenance_until: Option<DateTime<Utc>>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Reservation
// =============================================================================

/// A booked stay, optionally bound to a specific room unit.
///
/// Occupies `[check_in, check_out)` on its unit; see [`StayWindow`] for the
/// half-open semantics. While `room_unit_id` is `None` the reservation
/// blocks nothing.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Reservation {
    pub id: String,
    pub hotel_id: String,
    pub room_unit_id: Option<String>,
    pub guest_name: String,
    #[ts(as = "String")]
    pub check_in: DateTime<Utc>,
    #[ts(as = "String")]
    pub check_out: DateTime<Utc>,
    /// Stay length in nights. Stored rather than derived so reporting sums
    /// match what was quoted at booking time.
    pub nights: i64,
    /// Number of rooms covered (multi-room bookings).
    pub rooms: i64,
    /// Nightly rate in cents.
    pub per_day_rate_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// The stay window this reservation occupies.
    ///
    /// Errors only on a corrupt row (`check_out <= check_in` is rejected at
    /// the API boundary before insert).
    pub fn window(&self) -> Result<StayWindow, ValidationError> {
        StayWindow::new(self.check_in, self.check_out)
    }

    /// Nightly rate as Money.
    #[inline]
    pub fn per_day_rate(&self) -> Money {
        Money::from_cents(self.per_day_rate_cents)
    }

    /// Room-nights this reservation contributes to occupancy sums.
    #[inline]
    pub const fn room_nights(&self) -> i64 {
        self.nights * self.rooms
    }

    /// Gross revenue this reservation contributes: rate × nights × rooms.
    #[inline]
    pub fn revenue(&self) -> Money {
        self.per_day_rate().per_stay(self.nights, self.rooms)
    }
}

// =============================================================================
// Expenses
// =============================================================================

/// Grouping label for expenses. Categories whose name contains
/// "commission" (case-insensitive) count as distribution cost.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ExpenseCategory {
    pub id: String,
    pub hotel_id: String,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A cost record. Read-only from the availability core's perspective; only
/// the KPI aggregation consumes these.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub hotel_id: String,
    pub category_id: String,
    pub amount_cents: i64,
    #[ts(as = "String")]
    pub incurred_at: DateTime<Utc>,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_reservation() -> Reservation {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Reservation {
            id: "res-1".to_string(),
            hotel_id: "hotel-1".to_string(),
            room_unit_id: None,
            guest_name: "A. Guest".to_string(),
            check_in: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            check_out: Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap(),
            nights: 2,
            rooms: 3,
            per_day_rate_cents: 100_000,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_reservation_derived_values() {
        let res = sample_reservation();
        assert_eq!(res.room_nights(), 6);
        assert_eq!(res.revenue().cents(), 600_000);
        assert!(res.window().is_ok());
    }

    #[test]
    fn test_unit_status_serde_round_trip() {
        let json = serde_json::to_string(&UnitStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
        let back: UnitStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, UnitStatus::Maintenance);
    }

    #[test]
    fn test_default_unit_status_is_available() {
        assert_eq!(UnitStatus::default(), UnitStatus::Available);
    }
}
