//! Revenue KPI endpoint.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use stayline_core::validation::{require_param, validate_uuid};
use stayline_core::{KpiReport, Money};
use stayline_db::reporting::ReportingRange;

use super::parse_date;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct KpiParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Monetary figures as 2-decimal numbers for display, raw sums alongside.
#[derive(Debug, Serialize)]
pub struct KpiResponse {
    pub occupied_room_nights: i64,
    pub available_room_nights: i64,
    pub revenue: f64,
    pub revenue_cents: i64,
    pub distribution_cost: f64,
    pub distribution_cost_cents: i64,
    pub adr: f64,
    pub occupancy_percent: f64,
    pub revpar: f64,
    pub revadr: f64,
}

fn display_amount(amount: Money) -> f64 {
    amount.cents() as f64 / 100.0
}

impl From<KpiReport> for KpiResponse {
    fn from(report: KpiReport) -> Self {
        KpiResponse {
            occupied_room_nights: report.occupied_room_nights,
            available_room_nights: report.available_room_nights,
            revenue: display_amount(report.revenue),
            revenue_cents: report.revenue.cents(),
            distribution_cost: display_amount(report.distribution_cost),
            distribution_cost_cents: report.distribution_cost.cents(),
            adr: display_amount(report.adr),
            occupancy_percent: report.occupancy_percent(),
            revpar: display_amount(report.revpar),
            revadr: display_amount(report.revadr),
        }
    }
}

/// GET /hotels/{hotel_id}/kpis?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
pub async fn kpis(
    State(state): State<AppState>,
    Path(hotel_id): Path<String>,
    Query(params): Query<KpiParams>,
) -> Result<Json<KpiResponse>, ApiError> {
    validate_uuid("hotel_id", &hotel_id)?;
    let start = require_param("start_date", params.start_date.as_deref())?;
    let end = require_param("end_date", params.end_date.as_deref())?;

    let range = ReportingRange::new(
        parse_date("start_date", &start)?,
        parse_date("end_date", &end)?,
    )?;

    let report = state.db.reporting().kpis(&hotel_id, &range).await?;

    Ok(Json(report.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stayline_core::KpiInputs;

    #[test]
    fn test_response_rounds_to_two_decimals() {
        let report = KpiReport::compute(KpiInputs {
            occupied_room_nights: 2,
            revenue: Money::from_cents(200_000),
            distribution_cost: Money::zero(),
            total_units: 3,
            days_in_range: 2,
        });

        let response = KpiResponse::from(report);

        assert_eq!(response.adr, 1000.00);
        assert_eq!(response.occupancy_percent, 33.33);
        assert_eq!(response.revpar, 333.33);
        assert_eq!(response.revenue_cents, 200_000);
    }
}
