use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

use super::{FilterSelection, SelectorOptions, ViewSet};

pub const VIEW_SET_JSON_SCHEMA_V1: u32 = 1;

/// Versioned payload handed to an out-of-process renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSetJsonContractV1 {
    pub schema_version: u32,
    #[serde(default)]
    pub selection: Option<FilterSelection>,
    pub views: ViewSet,
}

impl ViewSet {
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize view set json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(
        &self,
        selection: Option<&FilterSelection>,
    ) -> DashboardResult<String> {
        let payload = ViewSetJsonContractV1 {
            schema_version: VIEW_SET_JSON_SCHEMA_V1,
            selection: selection.cloned(),
            views: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize view set contract v1: {e}"))
        })
    }

    /// Accepts either a bare view set or a v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        if let Ok(views) = serde_json::from_str::<ViewSet>(input) {
            return Ok(views);
        }
        let payload: ViewSetJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse view set json payload: {e}"))
        })?;
        if payload.schema_version != VIEW_SET_JSON_SCHEMA_V1 {
            return Err(DashboardError::InvalidData(format!(
                "unsupported view set schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.views)
    }
}

impl SelectorOptions {
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize selector options: {e}"))
        })
    }
}
