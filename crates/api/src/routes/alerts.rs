//! Low-stock alert route handlers.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;

use stockwatch_core::CompanyId;

use crate::error::AppError;
use crate::models::alert::AlertResponse;
use crate::services::alerts::AlertCalculator;
use crate::state::AppState;

/// Build the alerts router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/companies/{company_id}/alerts/low-stock",
        get(low_stock),
    )
}

/// List the company's products at risk of stockout.
///
/// A company with nothing at risk (or no inventory at all) gets an empty
/// list, not an error.
///
/// # Errors
///
/// Any data-access failure aborts the whole request; the caller sees an
/// opaque 500 with no partial results.
#[instrument(skip(state))]
pub async fn low_stock(
    State(state): State<AppState>,
    Path(company_id): Path<CompanyId>,
) -> Result<Json<AlertResponse>, AppError> {
    let calculator = AlertCalculator::new(
        state.pool(),
        state.thresholds(),
        state.config().alerts.window_days,
    );

    let response = calculator.low_stock_alerts(company_id).await?;
    Ok(Json(response))
}
