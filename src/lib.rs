//! surveillance-dashboard: reactive view pipeline for a disease-surveillance
//! dashboard.
//!
//! Raw region records are normalized to ISO alpha-3 codes once, held in a
//! read-only store, and turned into four linked chart specs whenever the
//! region-name or region-code selector changes. Drawing the specs is left to
//! a `ChartRenderer` backend.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{DashboardConfig, FilterOutcome, ReactiveController};
pub use crate::core::DatasetStore;
pub use error::{DashboardError, DashboardResult};
