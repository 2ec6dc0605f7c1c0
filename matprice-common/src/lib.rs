//! # matprice Common Library
//!
//! Shared code for the material price comparison tool:
//! - Material record model and column layout
//! - Price calculation (area, price per unit, price per square meter)
//! - CSV-backed record store
//! - Display formatting and user notices
//! - Configuration loading

pub mod calculator;
pub mod config;
pub mod display;
pub mod error;
pub mod material;
pub mod notice;
pub mod store;

pub use calculator::{calculate, PriceBreakdown};
pub use error::{Error, Result};
pub use material::{MaterialInput, MaterialRecord};
pub use notice::Notice;
pub use store::{AppendOutcome, RecordSet, RecordStore};
