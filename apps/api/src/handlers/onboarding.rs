//! Onboarding endpoints: hotels, room types, physical units.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use stayline_core::validation::{
    require_param, validate_max_guests, validate_rate_type, validate_room_type, validate_uuid,
};
use stayline_core::{Hotel, Room, RoomUnit};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateHotelRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
}

/// POST /hotels
pub async fn create_hotel(
    State(state): State<AppState>,
    Json(request): Json<CreateHotelRequest>,
) -> Result<Json<Hotel>, ApiError> {
    let name = require_param("name", request.name.as_deref())?;
    let timezone = request
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or("UTC");

    let hotel = state.db.hotels().create(&name, timezone).await?;

    Ok(Json(hotel))
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: Option<String>,
    pub rate_type: Option<String>,
    /// Defaults to 2.
    pub max_guests: Option<i64>,
}

/// POST /hotels/{hotel_id}/rooms
pub async fn create_room(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;

    let name = require_param("name", request.name.as_deref())?;
    validate_room_type(&name)?;

    let rate_type = require_param("rate_type", request.rate_type.as_deref())?;
    validate_rate_type(&rate_type)?;

    let max_guests = request.max_guests.unwrap_or(2);
    validate_max_guests(max_guests)?;

    let room = state
        .db
        .rooms()
        .create_room(&hotel_id, &name, &rate_type, max_guests)
        .await?;

    Ok(Json(room))
}

#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    pub room_number: Option<String>,
    /// Defaults to 0 (ground floor).
    pub floor: Option<i64>,
}

/// POST /hotels/{hotel_id}/rooms/{room_id}/units
pub async fn create_unit(
    State(state): State<AppState>,
    Path((hotel_id, room_id)): Path<(String, String)>,
    Json(request): Json<CreateUnitRequest>,
) -> Result<Json<RoomUnit>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;
    validate_uuid("room_id", &room_id)?;

    let room_number = require_param("room_number", request.room_number.as_deref())?;
    let floor = request.floor.unwrap_or(0);

    // The room must exist under this hotel before units can hang off it
    let room = state
        .db
        .rooms()
        .get_room(&hotel_id, &room_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Room not found: {room_id}")))?;

    let unit = state
        .db
        .rooms()
        .create_unit(&room.id, &hotel_id, &room_number, floor)
        .await?;

    Ok(Json(unit))
}
