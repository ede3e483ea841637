use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::DatasetStore;
use crate::error::DashboardResult;

use super::view_builder::{
    build_global_map, build_region_bar, build_time_series, build_top_donut,
};
use super::{DashboardConfig, FilterSelection, SelectorOptions, ViewSet};

/// Lifecycle of the controller between input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// Waiting for the next filter change.
    #[default]
    Idle,
    /// Building chart specs for the current filter change.
    Updating,
}

/// Result of one filter-change cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Fresh figures for all four outputs.
    Update(Box<ViewSet>),
    /// A selector was cleared: leave the displayed figures untouched.
    NoUpdate,
}

impl FilterOutcome {
    #[must_use]
    pub fn is_update(&self) -> bool {
        matches!(self, Self::Update(_))
    }

    #[must_use]
    pub fn into_view_set(self) -> Option<ViewSet> {
        match self {
            Self::Update(views) => Some(*views),
            Self::NoUpdate => None,
        }
    }
}

/// Single entry point invoked whenever a selector value changes.
///
/// Holds a shared read-only store; each call runs to completion before the
/// next one can start (`&mut self`), so the last completed call is the one
/// whose figures are on screen.
#[derive(Debug, Clone)]
pub struct ReactiveController {
    store: Arc<DatasetStore>,
    config: DashboardConfig,
    state: ControllerState,
    selection: Option<FilterSelection>,
    completed_cycles: u64,
}

impl ReactiveController {
    pub fn new(store: Arc<DatasetStore>, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        debug!(
            records = store.len(),
            top_n = config.top_n,
            "init reactive controller"
        );
        Ok(Self {
            store,
            config,
            state: ControllerState::Idle,
            selection: None,
            completed_cycles: 0,
        })
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Selection of the last completed update, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&FilterSelection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    #[must_use]
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn selector_options(&self) -> SelectorOptions {
        SelectorOptions::from_store(&self.store, self.config.default_selection.clone())
    }

    /// Reacts to a change of either selector.
    ///
    /// Returns `NoUpdate` when either value is absent or blank. Otherwise builds
    /// the time series, global map, region bar and donut in that order and
    /// returns them together; if any builder fails, nothing is returned and the
    /// previous selection stays in effect.
    pub fn on_filter_change(
        &mut self,
        region_name: Option<&str>,
        region_code3: Option<&str>,
    ) -> DashboardResult<FilterOutcome> {
        let Some(selection) = FilterSelection::from_inputs(region_name, region_code3) else {
            debug!(
                has_region_name = region_name.is_some_and(|v| !v.trim().is_empty()),
                has_region_code3 = region_code3.is_some_and(|v| !v.trim().is_empty()),
                "filter change suppressed: selector value missing"
            );
            return Ok(FilterOutcome::NoUpdate);
        };

        self.state = ControllerState::Updating;
        let result = self.build_views(&selection);
        self.state = ControllerState::Idle;

        match result {
            Ok(views) => {
                self.completed_cycles += 1;
                debug!(
                    region_name = %selection.region_name,
                    region_code3 = %selection.region_code3,
                    time_series_points = views.time_series.data_len(),
                    region_bar_points = views.region_bar.data_len(),
                    cycle = self.completed_cycles,
                    "filter change applied"
                );
                self.selection = Some(selection);
                Ok(FilterOutcome::Update(Box::new(views)))
            }
            Err(err) => {
                warn!(
                    error = %err,
                    region_name = %selection.region_name,
                    region_code3 = %selection.region_code3,
                    "update cycle aborted"
                );
                Err(err)
            }
        }
    }

    /// Convenience wrapper for a complete selection.
    pub fn apply(&mut self, selection: &FilterSelection) -> DashboardResult<FilterOutcome> {
        self.on_filter_change(
            Some(selection.region_name.as_str()),
            Some(selection.region_code3.as_str()),
        )
    }

    fn build_views(&self, selection: &FilterSelection) -> DashboardResult<ViewSet> {
        let store = self.store.as_ref();
        Ok(ViewSet {
            time_series: build_time_series(store, &selection.region_name, &self.config)?,
            global_map: build_global_map(store, &self.config)?,
            region_bar: build_region_bar(store, &selection.region_code3, &self.config)?,
            top_donut: build_top_donut(store, &self.config)?,
        })
    }
}
