//! # Request Handlers
//!
//! One module per API area:
//!
//! - [`availability`] - Free-unit count and room-number listings
//! - [`kpi`] - Revenue metrics for a date range
//! - [`reservations`] - Reservation create + transactional unit assignment
//! - [`units`] - Cached-status unit listings, maintenance holds
//! - [`onboarding`] - Hotel / room / unit creation
//! - [`health`] - Liveness probe

pub mod availability;
pub mod health;
pub mod kpi;
pub mod onboarding;
pub mod reservations;
pub mod units;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use stayline_core::ValidationError;

/// Parses a timestamp parameter.
///
/// Accepts RFC 3339 ("2024-01-10T15:00:00Z") or a plain calendar day
/// ("2024-01-10", interpreted as midnight UTC; the form the booking UI
/// sends).
pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, ValidationError> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Ok(instant.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected an RFC 3339 timestamp or YYYY-MM-DD".to_string(),
    })
}

/// Parses a calendar-day parameter ("2024-01-10").
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let parsed = parse_timestamp("check_in", "2024-01-10T15:30:00Z").unwrap();
        assert_eq!(
            parsed,
            Utc.with_ymd_and_hms(2024, 1, 10, 15, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_plain_date() {
        let parsed = parse_timestamp("check_in", "2024-01-10").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("check_in", "tomorrow").is_err());
        assert!(parse_timestamp("check_in", "10/01/2024").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("start_date", "2024-01-10").is_ok());
        assert!(parse_date("start_date", "not-a-date").is_err());
        assert!(parse_date("start_date", "").is_err());
    }
}
