use indexmap::IndexMap;

use crate::api::ViewSet;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{ChartRenderer, ChartSpec, FigureSlot};

/// Keeps the latest JSON document per output surface.
///
/// Used when drawing happens out of process: the host ships each document to
/// a browser-side charting library.
#[derive(Debug, Default)]
pub struct JsonRenderer {
    documents: IndexMap<FigureSlot, String>,
}

impl JsonRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self, slot: FigureSlot) -> Option<&str> {
        self.documents.get(&slot).map(String::as_str)
    }

    #[must_use]
    pub fn documents(&self) -> &IndexMap<FigureSlot, String> {
        &self.documents
    }
}

fn encode(slot: FigureSlot, spec: &ChartSpec) -> DashboardResult<String> {
    spec.validate()?;
    serde_json::to_string(spec).map_err(|e| {
        DashboardError::Render(format!(
            "failed to serialize `{}` figure: {e}",
            slot.element_id()
        ))
    })
}

impl ChartRenderer for JsonRenderer {
    fn render(&mut self, slot: FigureSlot, spec: &ChartSpec) -> DashboardResult<()> {
        let document = encode(slot, spec)?;
        self.documents.insert(slot, document);
        Ok(())
    }

    /// Serializes every figure first; `documents` changes only if all succeed.
    fn render_view_set(&mut self, views: &ViewSet) -> DashboardResult<()> {
        let mut staged = IndexMap::with_capacity(FigureSlot::ALL.len());
        for (slot, spec) in views.iter() {
            staged.insert(slot, encode(slot, spec)?);
        }
        self.documents.extend(staged);
        Ok(())
    }
}
