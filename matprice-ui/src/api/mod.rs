//! HTTP API handlers for matprice-ui

pub mod error;
pub mod export;
pub mod health;
pub mod materials;
pub mod ui;

pub use error::ApiError;
pub use export::{chart_data, export_csv};
pub use health::health_routes;
pub use materials::{add_material, list_materials, save_changes};
pub use ui::{serve_app_js, serve_index};
