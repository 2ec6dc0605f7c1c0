//! CSV download and chart data

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use matprice_common::display::{chart_series, ChartPoint, EXPORT_FILE_NAME};

use super::ApiError;
use crate::AppState;

/// GET /api/export
///
/// Full record set in the backing file's CSV format, as an attachment.
pub async fn export_csv(State(state): State<AppState>) -> Result<Response, ApiError> {
    let csv = state
        .with_store(|store| -> matprice_common::Result<String> {
            store.load()?.to_csv_string()
        })
        .await??;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /api/chart
///
/// Price per m² by product, for the bar chart.
pub async fn chart_data(State(state): State<AppState>) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    let set = state.with_store(|store| store.load()).await??;
    Ok(Json(chart_series(&set)))
}
