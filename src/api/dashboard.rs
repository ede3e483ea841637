use tracing::{debug, warn};

use crate::error::DashboardResult;
use crate::render::ChartRenderer;

use super::{FilterOutcome, ReactiveController, SelectorOptions, ViewSet};

/// Input event emitted by one of the two selectors.
///
/// `None` means the selector was cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    RegionNameChanged(Option<String>),
    RegionCodeChanged(Option<String>),
}

/// What happened to the displayed figures for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Rendered,
    Suppressed,
}

/// Counters for a batch of dispatched events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
    pub rendered: usize,
    pub suppressed: usize,
    pub failed: usize,
}

/// Event-dispatch layer between selector widgets and the renderer.
///
/// Tracks the current selector values, forwards every change to the
/// controller and pushes complete view sets to the renderer. Figures on
/// screen only change when a whole update succeeds.
pub struct Dashboard<R: ChartRenderer> {
    controller: ReactiveController,
    renderer: R,
    region_name: Option<String>,
    region_code3: Option<String>,
    displayed: Option<ViewSet>,
}

impl<R: ChartRenderer> Dashboard<R> {
    /// Seeds both selectors with the configured default selection.
    #[must_use]
    pub fn new(controller: ReactiveController, renderer: R) -> Self {
        let defaults = controller.config().default_selection.clone();
        Self {
            controller,
            renderer,
            region_name: Some(defaults.region_name),
            region_code3: Some(defaults.region_code3),
            displayed: None,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &ReactiveController {
        &self.controller
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn selector_options(&self) -> SelectorOptions {
        self.controller.selector_options()
    }

    #[must_use]
    pub fn region_name(&self) -> Option<&str> {
        self.region_name.as_deref()
    }

    #[must_use]
    pub fn region_code3(&self) -> Option<&str> {
        self.region_code3.as_deref()
    }

    /// Figures currently on screen.
    #[must_use]
    pub fn displayed(&self) -> Option<&ViewSet> {
        self.displayed.as_ref()
    }

    /// Runs an update with the current selector values, as on first page load.
    pub fn refresh(&mut self) -> DashboardResult<DispatchOutcome> {
        let outcome = self
            .controller
            .on_filter_change(self.region_name.as_deref(), self.region_code3.as_deref())?;
        self.present(outcome)
    }

    /// Applies one selector event and refreshes the figures.
    pub fn handle(&mut self, event: FilterEvent) -> DashboardResult<DispatchOutcome> {
        match event {
            FilterEvent::RegionNameChanged(value) => self.region_name = value,
            FilterEvent::RegionCodeChanged(value) => self.region_code3 = value,
        }
        self.refresh()
    }

    /// Processes events strictly in arrival order.
    ///
    /// A failed update is logged and skipped; the figures from the last
    /// successful update stay on screen.
    pub fn dispatch<I>(&mut self, events: I) -> DispatchSummary
    where
        I: IntoIterator<Item = FilterEvent>,
    {
        let mut summary = DispatchSummary::default();
        for event in events {
            match self.handle(event) {
                Ok(DispatchOutcome::Rendered) => summary.rendered += 1,
                Ok(DispatchOutcome::Suppressed) => summary.suppressed += 1,
                Err(err) => {
                    warn!(error = %err, "skipping failed dashboard update");
                    summary.failed += 1;
                }
            }
        }
        debug!(
            rendered = summary.rendered,
            suppressed = summary.suppressed,
            failed = summary.failed,
            "dispatched filter events"
        );
        summary
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn present(&mut self, outcome: FilterOutcome) -> DashboardResult<DispatchOutcome> {
        let Some(views) = outcome.into_view_set() else {
            return Ok(DispatchOutcome::Suppressed);
        };
        self.renderer.render_view_set(&views)?;
        self.displayed = Some(views);
        Ok(DispatchOutcome::Rendered)
    }
}
