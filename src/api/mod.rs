mod config;
mod controller;
mod dashboard;
mod json_contract;
mod selection;
mod validation;
mod view_builder;
mod view_set;

pub use config::DashboardConfig;
pub use controller::{ControllerState, FilterOutcome, ReactiveController};
pub use dashboard::{Dashboard, DispatchOutcome, DispatchSummary, FilterEvent};
pub use json_contract::{VIEW_SET_JSON_SCHEMA_V1, ViewSetJsonContractV1};
pub use selection::{FilterSelection, SelectorOptions};
pub use view_builder::{build_global_map, build_region_bar, build_time_series, build_top_donut};
pub use view_set::ViewSet;
