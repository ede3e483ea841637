//! Pure builders for the four dashboard figures.
//!
//! Each builder reads the store, never mutates it, and validates its spec
//! before returning, so a half-built figure cannot reach a renderer.

use tracing::trace;

use crate::core::{DatasetStore, Record};
use crate::error::DashboardResult;
use crate::render::{
    ChartBody, ChartSpec, ChoroplethBody, ColorBar, DonutBody, DonutSlice, MapLocation,
    SeriesPoint, SliceTextInfo, SliceTextPosition, TickPlacement, XySeries,
};

use super::DashboardConfig;

const TIME_AXIS_LABEL: &str = "Time";

/// Line chart of the records whose region name equals `region_name`.
///
/// A name that matches nothing yields a valid spec with an empty series.
pub fn build_time_series(
    store: &DatasetStore,
    region_name: &str,
    config: &DashboardConfig,
) -> DashboardResult<ChartSpec> {
    let records = store.filter_by_region_name(region_name);
    trace!(region_name, points = records.len(), "build time series");
    finish(ChartSpec {
        title: format!("{} Over Time in {region_name}", config.metric_label),
        theme: config.theme,
        body: ChartBody::Line(xy_series(&records, config)),
    })
}

/// Choropleth of the whole store, one location per record.
///
/// Ignores the current selection.
pub fn build_global_map(
    store: &DatasetStore,
    config: &DashboardConfig,
) -> DashboardResult<ChartSpec> {
    let locations: Vec<MapLocation> = store
        .all()
        .iter()
        .map(|record| MapLocation {
            region_code3: record.region_code3.clone(),
            hover_name: record.region_name.clone(),
            value: record.num_value,
        })
        .collect();
    let color_range = value_range(locations.iter().filter_map(|location| location.value));
    trace!(locations = locations.len(), "build global map");

    finish(ChartSpec {
        title: format!("Global Overview of {}", config.metric_label),
        theme: config.theme,
        body: ChartBody::Choropleth(ChoroplethBody {
            value_label: config.map_metric_label.clone(),
            locations,
            color_scale: config.color_scale.clone(),
            color_range,
            color_bar: ColorBar {
                title: config.map_metric_label.clone(),
                ticks: TickPlacement::Outside,
            },
            projection: config.map_projection,
        }),
    })
}

/// Bar chart of the records whose alpha-3 code equals `region_code3`.
pub fn build_region_bar(
    store: &DatasetStore,
    region_code3: &str,
    config: &DashboardConfig,
) -> DashboardResult<ChartSpec> {
    let records = store.filter_by_region_code3(region_code3);
    trace!(region_code3, points = records.len(), "build region bar");
    finish(ChartSpec {
        title: format!("{} Over Time in RegionCode {region_code3}", config.metric_label),
        theme: config.theme,
        body: ChartBody::Bar(xy_series(&records, config)),
    })
}

/// Donut of the `config.top_n` region codes with the largest totals.
///
/// Ignores the current selection.
pub fn build_top_donut(
    store: &DatasetStore,
    config: &DashboardConfig,
) -> DashboardResult<ChartSpec> {
    let top = store.top_n_by_region_code3(config.top_n);
    let totals: Vec<f64> = top.iter().map(|entry| entry.total).collect();
    let percents = share_percents(&totals);
    let slices = top
        .into_iter()
        .zip(percents)
        .map(|(entry, percent)| DonutSlice {
            percent,
            label: entry.region_code3,
            value: entry.total,
        })
        .collect();

    finish(ChartSpec {
        title: format!("Top {} RegionCodes by {}", config.top_n, config.metric_label),
        theme: config.theme,
        body: ChartBody::Donut(DonutBody {
            value_label: config.map_metric_label.clone(),
            hole: config.donut_hole,
            slices,
            text_info: SliceTextInfo::PercentAndLabel,
            text_position: SliceTextPosition::Inside,
        }),
    })
}

fn finish(spec: ChartSpec) -> DashboardResult<ChartSpec> {
    spec.validate()?;
    Ok(spec)
}

fn xy_series(records: &[&Record], config: &DashboardConfig) -> XySeries {
    XySeries {
        x_label: TIME_AXIS_LABEL.to_owned(),
        y_label: config.metric_label.clone(),
        points: records
            .iter()
            .map(|record| SeriesPoint::new(record.time.clone(), record.num_value))
            .collect(),
    }
}

fn value_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |range, value| match range {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// Percent share of each value in their sum.
///
/// Values are scaled by the largest magnitude first so totals near
/// `f64::MAX` do not overflow. A zero sum yields zero shares.
fn share_percents(values: &[f64]) -> Vec<f64> {
    let scale = values.iter().fold(0.0_f64, |max, value| max.max(value.abs()));
    if scale == 0.0 {
        return vec![0.0; values.len()];
    }
    let scaled: Vec<f64> = values.iter().map(|value| value / scale).collect();
    let total: f64 = scaled.iter().sum();
    if total == 0.0 {
        return vec![0.0; values.len()];
    }
    scaled.iter().map(|value| value / total * 100.0).collect()
}
