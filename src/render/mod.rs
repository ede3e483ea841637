mod chart_spec;
mod json_renderer;
mod null_renderer;
mod primitives;

pub use chart_spec::{
    ChartBody, ChartKind, ChartSpec, ChoroplethBody, ColorBar, DonutBody, DonutSlice,
    FigureSlot, MapLocation, MapProjection, SeriesPoint, SliceTextInfo, SliceTextPosition, Theme,
    TickPlacement, XySeries,
};
pub use json_renderer::JsonRenderer;
pub use null_renderer::NullRenderer;
pub use primitives::{Color, ColorScale, ColorStop};

use crate::api::ViewSet;
use crate::error::DashboardResult;

/// Contract implemented by any chart rendering backend.
///
/// Backends receive a fully built, validated `ChartSpec` so drawing code stays
/// isolated from record filtering and aggregation.
pub trait ChartRenderer {
    fn render(&mut self, slot: FigureSlot, spec: &ChartSpec) -> DashboardResult<()>;

    /// Replaces all four figures at once.
    ///
    /// On error no slot may show a figure from `views`. The default validates
    /// every spec before drawing any of them; backends whose `render` can fail
    /// after validation must override this and stage their output.
    fn render_view_set(&mut self, views: &ViewSet) -> DashboardResult<()> {
        for (_, spec) in views.iter() {
            spec.validate()?;
        }
        for (slot, spec) in views.iter() {
            self.render(slot, spec)?;
        }
        Ok(())
    }
}
