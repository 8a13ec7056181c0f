//! Room-unit listings and maintenance holds.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use stayline_core::validation::{require_param, validate_uuid};
use stayline_core::{RoomUnit, UnitStatus};

use super::parse_timestamp;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListUnitsParams {
    /// Filter on the cached status flag ("available", "booked",
    /// "maintenance"). Omit for all units.
    pub status: Option<UnitStatus>,
}

/// GET /hotels/{hotel_id}/units?status=booked
///
/// This listing reads the cached status hint maintained by the
/// reconciliation loop, so it is at most about a cycle stale. Fine for a
/// front-desk board; booking flows use the availability endpoints instead.
pub async fn list_units(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<ListUnitsParams>,
) -> Result<Json<Vec<RoomUnit>>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;

    let units = state.db.rooms().list_units(&hotel_id, params.status).await?;

    Ok(Json(units))
}

#[derive(Debug, Deserialize)]
pub struct MaintenanceRequest {
    /// When the hold expires and the reconciler returns the unit to
    /// inventory.
    pub until: Option<String>,
}

/// PUT /hotels/{hotel_id}/units/{unit_id}/maintenance
pub async fn set_maintenance(
    State(state): State<AppState>,
    Path((hotel_id, unit_id)): Path<(String, String)>,
    Json(request): Json<MaintenanceRequest>,
) -> Result<Json<RoomUnit>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;
    validate_uuid("unit_id", &unit_id)?;

    let until = require_param("until", request.until.as_deref())?;
    let until = parse_timestamp("until", &until)?;

    // Hotel scoping: a unit id from another hotel reads as unknown
    let unit = state
        .db
        .rooms()
        .get_unit(&unit_id)
        .await?
        .filter(|u| u.hotel_id == hotel_id)
        .ok_or_else(|| ApiError::NotFound(format!("RoomUnit not found: {unit_id}")))?;

    state.db.rooms().set_maintenance(&unit.id, until).await?;

    let updated = state
        .db
        .rooms()
        .get_unit(&unit.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("RoomUnit not found: {unit_id}")))?;

    Ok(Json(updated))
}
