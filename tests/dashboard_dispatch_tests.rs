use std::collections::HashMap;
use std::sync::Arc;

use surveillance_dashboard::api::{
    Dashboard, DashboardConfig, DispatchOutcome, DispatchSummary, FilterEvent, FilterSelection,
    ReactiveController, ViewSet,
};
use surveillance_dashboard::core::{DatasetStore, RawRecord};
use surveillance_dashboard::error::{DashboardError, DashboardResult};
use surveillance_dashboard::render::{
    ChartRenderer, ChartSpec, FigureSlot, JsonRenderer, NullRenderer,
};

fn controller() -> ReactiveController {
    let store = DatasetStore::load(vec![
        RawRecord::new("Austria", "AT", 1, 5.0),
        RawRecord::new("Austria", "AT", 2, 9.0),
        RawRecord::new("Germany", "DE", 1, 20.0),
    ]);
    ReactiveController::new(Arc::new(store), DashboardConfig::default()).expect("controller")
}

/// Fails every render into `failing_slot` while `armed` is set.
///
/// `shown` holds the title currently drawn in each slot.
#[derive(Debug, Default)]
struct FlakyRenderer {
    armed: bool,
    failing_slot: Option<FigureSlot>,
    shown: HashMap<FigureSlot, String>,
    commits: usize,
}

impl FlakyRenderer {
    fn draw(&self, slot: FigureSlot, spec: &ChartSpec) -> DashboardResult<String> {
        if self.armed && self.failing_slot == Some(slot) {
            return Err(DashboardError::Render("backend unavailable".to_owned()));
        }
        Ok(spec.title.clone())
    }

    fn shown(&self, slot: FigureSlot) -> &str {
        self.shown.get(&slot).map_or("", String::as_str)
    }
}

impl ChartRenderer for FlakyRenderer {
    fn render(&mut self, slot: FigureSlot, spec: &ChartSpec) -> DashboardResult<()> {
        let title = self.draw(slot, spec)?;
        self.shown.insert(slot, title);
        Ok(())
    }

    fn render_view_set(&mut self, views: &ViewSet) -> DashboardResult<()> {
        let mut staged = Vec::new();
        for (slot, spec) in views.iter() {
            staged.push((slot, self.draw(slot, spec)?));
        }
        self.shown.extend(staged);
        self.commits += 1;
        Ok(())
    }
}

#[test]
fn refresh_renders_default_selection_into_every_slot() {
    let mut dashboard = Dashboard::new(controller(), NullRenderer::default());

    assert_eq!(dashboard.region_name(), Some("Austria"));
    assert_eq!(dashboard.region_code3(), Some("AUT"));
    assert_eq!(dashboard.refresh().expect("refresh"), DispatchOutcome::Rendered);

    let renderer = dashboard.renderer();
    assert_eq!(renderer.rendered_count, 4);
    assert_eq!(renderer.last_slot, Some(FigureSlot::TopDonut));
    assert!(dashboard.displayed().is_some());
}

#[test]
fn cleared_selector_keeps_previous_figures() {
    let mut dashboard = Dashboard::new(controller(), NullRenderer::default());
    dashboard.refresh().expect("initial render");
    let before = dashboard.displayed().cloned();

    let outcome = dashboard
        .handle(FilterEvent::RegionNameChanged(None))
        .expect("cleared selector is not an error");

    assert_eq!(outcome, DispatchOutcome::Suppressed);
    assert_eq!(dashboard.displayed().cloned(), before);
    assert_eq!(dashboard.renderer().rendered_count, 4);
}

#[test]
fn events_apply_in_order_and_last_update_wins() {
    let mut dashboard = Dashboard::new(controller(), JsonRenderer::new());

    let summary = dashboard.dispatch([
        FilterEvent::RegionNameChanged(Some("Germany".to_owned())),
        FilterEvent::RegionCodeChanged(None),
        FilterEvent::RegionCodeChanged(Some("DEU".to_owned())),
    ]);

    assert_eq!(
        summary,
        DispatchSummary {
            rendered: 2,
            suppressed: 1,
            failed: 0,
        }
    );
    let displayed = dashboard.displayed().expect("figures on screen");
    assert!(displayed.time_series.title.ends_with("in Germany"));
    assert!(displayed.region_bar.title.ends_with("RegionCode DEU"));
    assert_eq!(
        dashboard.controller().selection(),
        Some(&FilterSelection::new("Germany", "DEU"))
    );

    let document = dashboard
        .renderer()
        .document(FigureSlot::RegionBar)
        .expect("bar document");
    assert!(document.contains("RegionCode DEU"));
    assert_eq!(dashboard.renderer().documents().len(), 4);
}

#[test]
fn failed_render_keeps_last_successful_figures_in_every_slot() {
    let renderer = FlakyRenderer {
        failing_slot: Some(FigureSlot::RegionBar),
        ..FlakyRenderer::default()
    };
    let mut dashboard = Dashboard::new(controller(), renderer);
    dashboard.refresh().expect("initial render");
    let austria = dashboard.displayed().cloned().expect("austria figures");

    dashboard.renderer_mut().armed = true;
    let err = dashboard
        .handle(FilterEvent::RegionNameChanged(Some("Germany".to_owned())))
        .expect_err("renderer failure surfaces");

    assert!(matches!(err, DashboardError::Render(_)));
    assert_eq!(dashboard.displayed(), Some(&austria));
    assert_eq!(dashboard.region_name(), Some("Germany"));
    for (slot, spec) in austria.iter() {
        assert_eq!(dashboard.renderer().shown(slot), spec.title);
    }

    let summary = dashboard.dispatch([FilterEvent::RegionCodeChanged(Some("DEU".to_owned()))]);
    assert_eq!(summary.failed, 1);
    assert_eq!(dashboard.displayed(), Some(&austria));
    for (slot, spec) in austria.iter() {
        assert_eq!(dashboard.renderer().shown(slot), spec.title);
    }

    dashboard.renderer_mut().armed = false;
    dashboard.refresh().expect("backend recovered");
    let displayed = dashboard.displayed().expect("figures on screen");
    assert!(displayed.time_series.title.ends_with("in Germany"));
    assert_eq!(
        dashboard.renderer().shown(FigureSlot::TimeSeries),
        displayed.time_series.title
    );
    assert_eq!(dashboard.renderer().commits, 2);
}

#[test]
fn json_renderer_keeps_every_document_when_one_figure_is_rejected() {
    let mut dashboard = Dashboard::new(controller(), JsonRenderer::new());
    dashboard.refresh().expect("initial render");
    let before = dashboard.renderer().documents().clone();

    let mut germany = controller()
        .on_filter_change(Some("Germany"), Some("DEU"))
        .expect("update")
        .into_view_set()
        .expect("four views");
    germany.region_bar.title = String::new();
    let err = dashboard
        .renderer_mut()
        .render_view_set(&germany)
        .expect_err("empty title is rejected");

    assert!(matches!(err, DashboardError::InvalidData(_)));
    assert_eq!(dashboard.renderer().documents(), &before);
    assert!(
        dashboard
            .renderer()
            .document(FigureSlot::TimeSeries)
            .is_some_and(|document| document.contains("in Austria"))
    );
}
