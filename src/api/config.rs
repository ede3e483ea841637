use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::render::{ColorScale, MapProjection, Theme};

use super::FilterSelection;
use super::validation::{
    validate_color_scale, validate_donut_hole, validate_labels, validate_top_n,
};

/// Presentation and startup configuration of the dashboard views.
///
/// Serializable so hosts can keep it next to the dataset instead of inventing
/// an ad-hoc format. Every field has a default, so a partial JSON document is
/// enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Measure name used in titles and axis labels.
    #[serde(default = "default_metric_label")]
    pub metric_label: String,
    /// Shorter measure name used by the map colorbar and slice hover labels.
    #[serde(default = "default_map_metric_label")]
    pub map_metric_label: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub color_scale: ColorScale,
    #[serde(default)]
    pub map_projection: MapProjection,
    #[serde(default = "default_donut_hole")]
    pub donut_hole: f64,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_selection")]
    pub default_selection: FilterSelection,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metric_label: default_metric_label(),
            map_metric_label: default_map_metric_label(),
            theme: Theme::default(),
            color_scale: ColorScale::default(),
            map_projection: MapProjection::default(),
            donut_hole: default_donut_hole(),
            top_n: default_top_n(),
            default_selection: default_selection(),
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_metric_labels(
        mut self,
        metric_label: impl Into<String>,
        map_metric_label: impl Into<String>,
    ) -> Self {
        self.metric_label = metric_label.into();
        self.map_metric_label = map_metric_label.into();
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_color_scale(mut self, color_scale: ColorScale) -> Self {
        self.color_scale = color_scale;
        self
    }

    #[must_use]
    pub fn with_map_projection(mut self, projection: MapProjection) -> Self {
        self.map_projection = projection;
        self
    }

    /// Sets the hollow-center ratio of the donut chart.
    #[must_use]
    pub fn with_donut_hole(mut self, hole: f64) -> Self {
        self.donut_hole = hole;
        self
    }

    /// Sets how many region codes the donut chart keeps.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the selector values shown before the first user input.
    #[must_use]
    pub fn with_default_selection(mut self, selection: FilterSelection) -> Self {
        self.default_selection = selection;
        self
    }

    pub fn validate(&self) -> DashboardResult<()> {
        validate_labels(&self.metric_label, &self.map_metric_label)?;
        validate_color_scale(&self.color_scale)?;
        validate_donut_hole(self.donut_hole)?;
        validate_top_n(self.top_n)
    }

    /// Serializes config into pretty JSON.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_metric_label() -> String {
    "Confirmed Leptospirosis Cases".to_owned()
}

fn default_map_metric_label() -> String {
    "Confirmed Cases".to_owned()
}

fn default_donut_hole() -> f64 {
    0.4
}

fn default_top_n() -> usize {
    5
}

fn default_selection() -> FilterSelection {
    FilterSelection::new("Austria", "AUT")
}
