//! Route table for the Stayline API.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{availability, health, kpi, onboarding, reservations, units};
use crate::AppState;

/// Builds the application router.
///
/// Hotel identity arrives as a path parameter; the authenticating proxy in
/// front of this service is responsible for matching it to the caller's
/// token.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Onboarding
        .route("/hotels", post(onboarding::create_hotel))
        .route("/hotels/{hotel_id}/rooms", post(onboarding::create_room))
        .route(
            "/hotels/{hotel_id}/rooms/{room_id}/units",
            post(onboarding::create_unit),
        )
        // Unit listings (cached status hint) and maintenance holds
        .route("/hotels/{hotel_id}/units", get(units::list_units))
        .route(
            "/hotels/{hotel_id}/units/{unit_id}/maintenance",
            put(units::set_maintenance),
        )
        // Live availability
        .route(
            "/hotels/{hotel_id}/availability/count",
            get(availability::count),
        )
        .route(
            "/hotels/{hotel_id}/availability/room-numbers",
            get(availability::room_numbers),
        )
        // Revenue KPIs
        .route("/hotels/{hotel_id}/kpis", get(kpi::kpis))
        // Reservations
        .route(
            "/hotels/{hotel_id}/reservations",
            post(reservations::create),
        )
        .route(
            "/hotels/{hotel_id}/reservations/{reservation_id}/assign-unit",
            post(reservations::assign_unit),
        )
        .with_state(state)
}
