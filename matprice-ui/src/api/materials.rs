//! Material table API
//!
//! - GET  /api/materials: all records, raw and formatted, in display order
//! - POST /api/materials: "Calculate and Save" (calculate, then append)
//! - PUT  /api/materials: "Save Changes" from the table editor (overwrite)

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use matprice_common::display::{display_columns, format_row, ColumnSpec};
use matprice_common::{calculate, MaterialInput, MaterialRecord, Notice, RecordSet};

use super::ApiError;
use crate::AppState;

/// Table data response
#[derive(Debug, Serialize)]
pub struct MaterialsResponse {
    pub total_rows: usize,
    /// Columns in display order
    pub columns: Vec<ColumnSpec>,
    /// Non-canonical columns found in the file, carried in each row's `extra`
    pub extra_columns: Vec<String>,
    /// Raw records, as edited and sent back by the table editor
    pub rows: Vec<MaterialRecord>,
    /// Rendered cells, one row per record, in column order
    pub formatted: Vec<Vec<String>>,
}

/// Result of "Calculate and Save"
#[derive(Debug, Serialize)]
pub struct AddMaterialResponse {
    pub record: MaterialRecord,
    /// Sidebar summary, e.g. "2.40 qm"
    pub summary: Vec<String>,
    pub notice: Notice,
}

/// Result of "Save Changes"
#[derive(Debug, Serialize)]
pub struct SaveChangesResponse {
    pub saved: bool,
    pub total_rows: usize,
    pub notice: Notice,
}

/// GET /api/materials
pub async fn list_materials(
    State(state): State<AppState>,
) -> Result<Json<MaterialsResponse>, ApiError> {
    let set = state.with_store(|store| store.load()).await??;
    let formatted = set.records().iter().map(format_row).collect();

    Ok(Json(MaterialsResponse {
        total_rows: set.len(),
        columns: display_columns(),
        extra_columns: set.extra_columns().to_vec(),
        formatted,
        rows: set.into_records(),
    }))
}

/// POST /api/materials
///
/// Store failures propagate as an error response.
pub async fn add_material(
    State(state): State<AppState>,
    Json(input): Json<MaterialInput>,
) -> Result<Json<AddMaterialResponse>, ApiError> {
    let breakdown = calculate(&input);
    let record = MaterialRecord::with_breakdown(&input, &breakdown);

    let to_append = record.clone();
    let notice = state
        .with_store(move |store| -> matprice_common::Result<Notice> {
            let outcome = store.append(to_append)?;
            Ok(Notice::appended(outcome, store.path()))
        })
        .await??;
    info!("{}", notice);

    Ok(Json(AddMaterialResponse {
        record,
        summary: breakdown.summary_lines(),
        notice,
    }))
}

/// PUT /api/materials
///
/// Writes the edited table verbatim. Extra columns keep their order from
/// the current file. A write failure is reported in the notice instead of
/// failing the request.
pub async fn save_changes(
    State(state): State<AppState>,
    Json(records): Json<Vec<MaterialRecord>>,
) -> Result<Json<SaveChangesResponse>, ApiError> {
    let total_rows = records.len();

    let (saved, notice) = state
        .with_store(move |store| {
            let column_order = store
                .load()
                .map(|current| current.extra_columns().to_vec())
                .unwrap_or_default();
            let set = RecordSet::with_extra_columns(records, column_order);

            match store.overwrite(&set) {
                Ok(()) => (true, Notice::overwritten(store.path())),
                Err(e) => {
                    warn!("Save changes failed for {}: {}", store.path().display(), e);
                    (false, Notice::overwrite_failed(store.path(), &e))
                }
            }
        })
        .await?;
    info!("{}", notice);

    Ok(Json(SaveChangesResponse {
        saved,
        total_rows,
        notice,
    }))
}
