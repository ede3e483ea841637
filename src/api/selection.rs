use serde::{Deserialize, Serialize};

use crate::core::DatasetStore;

/// Current values of the region-name and region-code selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    pub region_name: String,
    pub region_code3: String,
}

impl FilterSelection {
    #[must_use]
    pub fn new(region_name: impl Into<String>, region_code3: impl Into<String>) -> Self {
        Self {
            region_name: region_name.into(),
            region_code3: region_code3.into(),
        }
    }

    /// Builds a selection from raw selector values.
    ///
    /// Returns `None` when either value is absent, empty or whitespace only.
    /// Present values are kept verbatim; they are compared against the store
    /// as exact keys, never interpolated into anything.
    #[must_use]
    pub fn from_inputs(region_name: Option<&str>, region_code3: Option<&str>) -> Option<Self> {
        let region_name = region_name.filter(|value| !value.trim().is_empty())?;
        let region_code3 = region_code3.filter(|value| !value.trim().is_empty())?;
        Some(Self::new(region_name, region_code3))
    }
}

/// Choices offered by the two selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorOptions {
    pub region_names: Vec<String>,
    pub region_codes3: Vec<String>,
    pub default_selection: FilterSelection,
}

impl SelectorOptions {
    /// Collects distinct selector values in first-seen store order.
    #[must_use]
    pub fn from_store(store: &DatasetStore, default_selection: FilterSelection) -> Self {
        Self {
            region_names: store
                .distinct_region_names()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            region_codes3: store
                .distinct_region_codes3()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            default_selection,
        }
    }

    /// `true` when both default values are offered by the selectors.
    #[must_use]
    pub fn default_is_available(&self) -> bool {
        self.region_names
            .iter()
            .any(|name| *name == self.default_selection.region_name)
            && self
                .region_codes3
                .iter()
                .any(|code| *code == self.default_selection.region_code3)
    }
}
