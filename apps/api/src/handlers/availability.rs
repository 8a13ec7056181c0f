//! Live availability endpoints.
//!
//! Both endpoints take the same query parameters and differ only in the
//! shape of the answer: a count for the booking engine's result page, the
//! room-number list for the assignment picker.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use stayline_core::stay::StayWindow;
use stayline_core::validation::require_param;
use stayline_db::AvailabilityQuery;

use super::parse_timestamp;
use crate::error::ApiError;
use crate::AppState;

/// Raw query parameters; every field is required, but absence must come
/// back as a descriptive 400, not a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub room_type: Option<String>,
    pub rate_type: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}

fn build_query(hotel_id: &str, params: &AvailabilityParams) -> Result<AvailabilityQuery, ApiError> {
    let room_type = require_param("room_type", params.room_type.as_deref())?;
    let rate_type = require_param("rate_type", params.rate_type.as_deref())?;
    let check_in = require_param("check_in", params.check_in.as_deref())?;
    let check_out = require_param("check_out", params.check_out.as_deref())?;

    let window = StayWindow::new(
        parse_timestamp("check_in", &check_in)?,
        parse_timestamp("check_out", &check_out)?,
    )?;

    Ok(AvailabilityQuery::new(
        hotel_id, &room_type, &rate_type, window,
    )?)
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub num_of_rooms: usize,
}

/// GET /hotels/{hotel_id}/availability/count
pub async fn count(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<CountResponse>, ApiError> {
    let query = build_query(&hotel_id, &params)?;

    let num_of_rooms = state.db.availability().free_unit_count(&query).await?;

    Ok(Json(CountResponse { num_of_rooms }))
}

#[derive(Debug, Serialize)]
pub struct RoomNumbersResponse {
    pub room_numbers: Vec<String>,
}

/// GET /hotels/{hotel_id}/availability/room-numbers
pub async fn room_numbers(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<RoomNumbersResponse>, ApiError> {
    let query = build_query(&hotel_id, &params)?;

    let room_numbers = state.db.availability().free_room_numbers(&query).await?;

    Ok(Json(RoomNumbersResponse { room_numbers }))
}
