//! # Validation Module
//!
//! Input validation for the availability and booking surfaces.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (apps/api)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: required params, stay-window ordering                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (room type/rate, room number)                  │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Bad input fails here BEFORE anything is fetched: the availability     │
//! │  query never touches reservations with a malformed request.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_ROOMS_PER_RESERVATION, MAX_STAY_NIGHTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Extracts a required request parameter.
///
/// Absent or blank values are a `ValidationError`, never silently
/// defaulted. Returns the trimmed value.
///
/// ## Example
/// ```rust
/// use stayline_core::validation::require_param;
///
/// assert_eq!(require_param("room_type", Some(" Deluxe ")).unwrap(), "Deluxe");
/// assert!(require_param("room_type", None).is_err());
/// assert!(require_param("room_type", Some("  ")).is_err());
/// ```
pub fn require_param(field: &str, value: Option<&str>) -> ValidationResult<String> {
    let value = value.unwrap_or("").trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(value.to_string())
}

/// Validates a room type name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 100 characters
pub fn validate_room_type(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "room_type".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "room_type".to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates a rate plan code ("CP", "EP", "MAP", ...).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
/// - Alphanumeric, hyphens and underscores only
pub fn validate_rate_type(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "rate_type".to_string(),
        });
    }

    if code.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "rate_type".to_string(),
            max: 20,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "rate_type".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a guest name.
pub fn validate_guest_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "guest_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "guest_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a nightly rate in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary stays)
pub fn validate_rate_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "per_day_rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the room count of a reservation.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ROOMS_PER_RESERVATION
pub fn validate_room_count(rooms: i64) -> ValidationResult<()> {
    if rooms <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "rooms".to_string(),
        });
    }

    if rooms > MAX_ROOMS_PER_RESERVATION {
        return Err(ValidationError::OutOfRange {
            field: "rooms".to_string(),
            min: 1,
            max: MAX_ROOMS_PER_RESERVATION,
        });
    }

    Ok(())
}

/// Validates a stay length in nights.
///
/// The night count is quoted at booking time and stored on the
/// reservation, so it is validated like any other caller input.
pub fn validate_nights(nights: i64) -> ValidationResult<()> {
    if nights <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "nights".to_string(),
        });
    }

    if nights > MAX_STAY_NIGHTS {
        return Err(ValidationError::OutOfRange {
            field: "nights".to_string(),
            min: 1,
            max: MAX_STAY_NIGHTS,
        });
    }

    Ok(())
}

/// Validates a guest capacity.
pub fn validate_max_guests(max_guests: i64) -> ValidationResult<()> {
    if max_guests <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "max_guests".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_param() {
        assert_eq!(require_param("room_type", Some("Deluxe")).unwrap(), "Deluxe");
        assert_eq!(require_param("room_type", Some("  Deluxe ")).unwrap(), "Deluxe");

        assert!(require_param("room_type", None).is_err());
        assert!(require_param("room_type", Some("")).is_err());
        assert!(require_param("room_type", Some("   ")).is_err());
    }

    #[test]
    fn test_validate_rate_type() {
        assert!(validate_rate_type("CP").is_ok());
        assert!(validate_rate_type("half-board").is_ok());

        assert!(validate_rate_type("").is_err());
        assert!(validate_rate_type("has space").is_err());
        assert!(validate_rate_type(&"A".repeat(30)).is_err());
    }

    #[test]
    fn test_validate_room_type() {
        assert!(validate_room_type("Deluxe").is_ok());
        assert!(validate_room_type("").is_err());
        assert!(validate_room_type(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_rate_cents() {
        assert!(validate_rate_cents(0).is_ok());
        assert!(validate_rate_cents(100_000).is_ok());
        assert!(validate_rate_cents(-100).is_err());
    }

    #[test]
    fn test_validate_room_count() {
        assert!(validate_room_count(1).is_ok());
        assert!(validate_room_count(50).is_ok());

        assert!(validate_room_count(0).is_err());
        assert!(validate_room_count(-1).is_err());
        assert!(validate_room_count(51).is_err());
    }

    #[test]
    fn test_validate_nights() {
        assert!(validate_nights(1).is_ok());
        assert!(validate_nights(365).is_ok());

        assert!(validate_nights(0).is_err());
        assert!(validate_nights(366).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("hotel_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("hotel_id", "").is_err());
        assert!(validate_uuid("hotel_id", "not-a-uuid").is_err());
    }
}
