//! matprice-ui library - material price comparison web UI
//!
//! Serves the input form, editable table, chart and CSV export over a
//! single CSV-backed record store.

use std::sync::Arc;

use axum::Router;
use matprice_common::RecordStore;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub mod api;

use api::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Backing CSV store; the lock serializes file access within this process
    pub store: Arc<Mutex<RecordStore>>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: RecordStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Run a store operation on the blocking pool while holding the store lock
    ///
    /// File I/O stays off the async workers; the lock is released when the
    /// operation finishes.
    pub async fn with_store<F, T>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&RecordStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| ApiError::Task(format!("Task join error: {}", e)))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route(
            "/api/materials",
            get(api::list_materials)
                .post(api::add_material)
                .put(api::save_changes),
        )
        .route("/api/export", get(api::export_csv))
        .route("/api/chart", get(api::chart_data));

    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
