use serde::{Deserialize, Serialize};

use crate::render::{ChartSpec, FigureSlot};

/// The four figures produced by one update cycle.
///
/// Always refreshed together; there is no way to build a `ViewSet` with a
/// figure missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSet {
    pub time_series: ChartSpec,
    pub global_map: ChartSpec,
    pub region_bar: ChartSpec,
    pub top_donut: ChartSpec,
}

impl ViewSet {
    #[must_use]
    pub fn get(&self, slot: FigureSlot) -> &ChartSpec {
        match slot {
            FigureSlot::TimeSeries => &self.time_series,
            FigureSlot::GlobalMap => &self.global_map,
            FigureSlot::RegionBar => &self.region_bar,
            FigureSlot::TopDonut => &self.top_donut,
        }
    }

    /// Figures in refresh order.
    pub fn iter(&self) -> impl Iterator<Item = (FigureSlot, &ChartSpec)> {
        FigureSlot::ALL.into_iter().map(|slot| (slot, self.get(slot)))
    }

    #[must_use]
    pub fn into_tuple(self) -> (ChartSpec, ChartSpec, ChartSpec, ChartSpec) {
        (
            self.time_series,
            self.global_map,
            self.region_bar,
            self.top_donut,
        )
    }
}
