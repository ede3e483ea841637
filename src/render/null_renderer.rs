use crate::error::DashboardResult;
use crate::render::{ChartRenderer, ChartSpec, FigureSlot};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates every spec so tests catch malformed figures before a
/// real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub rendered_count: usize,
    pub last_slot: Option<FigureSlot>,
    pub last_data_len: usize,
}

impl ChartRenderer for NullRenderer {
    fn render(&mut self, slot: FigureSlot, spec: &ChartSpec) -> DashboardResult<()> {
        spec.validate()?;
        self.rendered_count += 1;
        self.last_slot = Some(slot);
        self.last_data_len = spec.data_len();
        Ok(())
    }
}
