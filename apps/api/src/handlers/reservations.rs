//! Reservation endpoints.
//!
//! Creation never binds a physical unit; the assignment endpoint does,
//! inside a transaction that re-checks the overlap predicate. A booking UI
//! therefore calls: availability → create → assign-unit, and handles 409
//! on the last step by re-querying.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use stayline_core::stay::StayWindow;
use stayline_core::validation::{
    require_param, validate_guest_name, validate_nights, validate_rate_cents,
    validate_room_count, validate_uuid,
};
use stayline_core::Reservation;
use stayline_db::repository::reservation::NewReservation;

use super::parse_timestamp;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub guest_name: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    /// Defaults to the window's night count when omitted.
    pub nights: Option<i64>,
    /// Defaults to 1.
    pub rooms: Option<i64>,
    pub per_day_rate_cents: Option<i64>,
    pub notes: Option<String>,
}

/// POST /hotels/{hotel_id}/reservations
pub async fn create(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<Reservation>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;

    let guest_name = require_param("guest_name", request.guest_name.as_deref())?;
    validate_guest_name(&guest_name)?;

    let check_in = require_param("check_in", request.check_in.as_deref())?;
    let check_out = require_param("check_out", request.check_out.as_deref())?;
    let window = StayWindow::new(
        parse_timestamp("check_in", &check_in)?,
        parse_timestamp("check_out", &check_out)?,
    )?;

    let nights = request.nights.unwrap_or_else(|| window.nights());
    validate_nights(nights)?;

    let rooms = request.rooms.unwrap_or(1);
    validate_room_count(rooms)?;

    let per_day_rate_cents = request.per_day_rate_cents.ok_or_else(|| {
        ApiError::Validation("per_day_rate_cents is required".to_string())
    })?;
    validate_rate_cents(per_day_rate_cents)?;

    let reservation = state
        .db
        .reservations()
        .create(
            &hotel_id,
            NewReservation {
                guest_name,
                window,
                nights,
                rooms,
                per_day_rate_cents,
                room_unit_id: None,
                notes: request.notes,
            },
        )
        .await?;

    Ok(Json(reservation))
}

#[derive(Debug, Deserialize)]
pub struct AssignUnitRequest {
    pub room_unit_id: Option<String>,
}

/// POST /hotels/{hotel_id}/reservations/{reservation_id}/assign-unit
///
/// Responds 409 when another reservation claimed the unit for an
/// overlapping window; the caller re-queries availability and retries.
pub async fn assign_unit(
    State(state): State<AppState>,
    Path((hotel_id, reservation_id)): Path<(String, String)>,
    Json(request): Json<AssignUnitRequest>,
) -> Result<Json<Reservation>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;
    validate_uuid("reservation_id", &reservation_id)?;

    let unit_id = require_param("room_unit_id", request.room_unit_id.as_deref())?;
    validate_uuid("room_unit_id", &unit_id)?;

    let reservation = state
        .db
        .reservations()
        .assign_unit(&hotel_id, &reservation_id, &unit_id)
        .await?;

    Ok(Json(reservation))
}
