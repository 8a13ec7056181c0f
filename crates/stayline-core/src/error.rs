//! # Error Types
//!
//! Domain-specific error types for stayline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stayline-core errors (this file)                                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stayline-db errors (separate crate)                                   │
//! │  └── DbError          - Database failures, NotFound, BookingConflict   │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What HTTP callers see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → ApiError → Caller                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bounds, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs. A request that
/// fails here never reaches the data layer.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Check-out must be strictly after check-in.
    ///
    /// Zero-night windows (`check_in == check_out`) are invalid input: a
    /// stay always spans at least one night.
    #[error("check_out must be after check_in")]
    StayWindowOrder,

    /// A reporting range where the end date precedes the start date.
    #[error("end_date must not be before start_date")]
    RangeOrder,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "room_type".to_string(),
        };
        assert_eq!(err.to_string(), "room_type is required");

        let err = ValidationError::OutOfRange {
            field: "rooms".to_string(),
            min: 1,
            max: 50,
        };
        assert_eq!(err.to_string(), "rooms must be between 1 and 50");

        let err = ValidationError::StayWindowOrder;
        assert_eq!(err.to_string(), "check_out must be after check_in");
    }
}
