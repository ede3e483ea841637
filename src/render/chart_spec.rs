use serde::{Deserialize, Serialize};

use crate::core::TimeValue;
use crate::error::{DashboardError, DashboardResult};
use crate::render::ColorScale;

/// Output surface a chart spec is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureSlot {
    TimeSeries,
    GlobalMap,
    RegionBar,
    TopDonut,
}

impl FigureSlot {
    /// Slots in refresh order.
    pub const ALL: [Self; 4] = [
        Self::TimeSeries,
        Self::GlobalMap,
        Self::RegionBar,
        Self::TopDonut,
    ];

    /// Stable element id of the output surface.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::TimeSeries => "visual",
            Self::GlobalMap => "world_map",
            Self::RegionBar => "bar_chart",
            Self::TopDonut => "donut_plot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Choropleth,
    Bar,
    Donut,
}

/// Styling template the renderer applies to a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    PlotlyDark,
    Plotly,
    PlotlyWhite,
}

impl Theme {
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::PlotlyDark => "plotly_dark",
            Self::Plotly => "plotly",
            Self::PlotlyWhite => "plotly_white",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapProjection {
    #[default]
    NaturalEarth,
    Equirectangular,
    Orthographic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPlacement {
    #[default]
    Outside,
    Inside,
}

/// Per-slice text content of a donut chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceTextInfo {
    #[default]
    PercentAndLabel,
    Percent,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceTextPosition {
    #[default]
    Inside,
    Outside,
}

/// One sample of a line or bar series; `value: None` is drawn as a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: TimeValue,
    pub value: Option<f64>,
}

impl SeriesPoint {
    #[must_use]
    pub fn new(time: impl Into<TimeValue>, value: impl Into<Option<f64>>) -> Self {
        Self {
            time: time.into(),
            value: value.into(),
        }
    }
}

/// Time-indexed series shared by line and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XySeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
    pub region_code3: String,
    pub hover_name: String,
    /// `None` leaves the region uncolored.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorBar {
    pub title: String,
    pub ticks: TickPlacement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethBody {
    pub value_label: String,
    pub locations: Vec<MapLocation>,
    pub color_scale: ColorScale,
    /// Value range mapped onto the color scale; `None` when no location has a value.
    pub color_range: Option<(f64, f64)>,
    pub color_bar: ColorBar,
    pub projection: MapProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
    /// Share of the donut total in percent.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutBody {
    pub value_label: String,
    /// Hollow-center radius ratio in `[0, 1)`.
    pub hole: f64,
    pub slices: Vec<DonutSlice>,
    pub text_info: SliceTextInfo,
    pub text_position: SliceTextPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Line(XySeries),
    Choropleth(ChoroplethBody),
    Bar(XySeries),
    Donut(DonutBody),
}

/// Renderer-agnostic description of one figure.
///
/// Specs are plain values: built fresh per update cycle and never shared
/// mutably between figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub theme: Theme,
    pub body: ChartBody,
}

impl ChartSpec {
    #[must_use]
    pub fn kind(&self) -> ChartKind {
        match self.body {
            ChartBody::Line(_) => ChartKind::Line,
            ChartBody::Choropleth(_) => ChartKind::Choropleth,
            ChartBody::Bar(_) => ChartKind::Bar,
            ChartBody::Donut(_) => ChartKind::Donut,
        }
    }

    /// Number of data points (series points, map locations or slices).
    #[must_use]
    pub fn data_len(&self) -> usize {
        match &self.body {
            ChartBody::Line(series) | ChartBody::Bar(series) => series.points.len(),
            ChartBody::Choropleth(map) => map.locations.len(),
            ChartBody::Donut(donut) => donut.slices.len(),
        }
    }

    #[must_use]
    pub fn series(&self) -> Option<&XySeries> {
        match &self.body {
            ChartBody::Line(series) | ChartBody::Bar(series) => Some(series),
            ChartBody::Choropleth(_) | ChartBody::Donut(_) => None,
        }
    }

    #[must_use]
    pub fn choropleth(&self) -> Option<&ChoroplethBody> {
        match &self.body {
            ChartBody::Choropleth(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn donut(&self) -> Option<&DonutBody> {
        match &self.body {
            ChartBody::Donut(donut) => Some(donut),
            _ => None,
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.title.trim().is_empty() {
            return Err(DashboardError::InvalidData(
                "chart title must not be empty".to_owned(),
            ));
        }
        match &self.body {
            ChartBody::Line(series) | ChartBody::Bar(series) => validate_series(series),
            ChartBody::Choropleth(map) => validate_choropleth(map),
            ChartBody::Donut(donut) => validate_donut(donut),
        }
    }
}

fn validate_series(series: &XySeries) -> DashboardResult<()> {
    for point in &series.points {
        if !point.time.is_finite() {
            return Err(DashboardError::InvalidData(
                "series time must be finite".to_owned(),
            ));
        }
        if point.value.is_some_and(|value| !value.is_finite()) {
            return Err(DashboardError::InvalidData(
                "series value must be finite".to_owned(),
            ));
        }
    }
    Ok(())
}

fn validate_choropleth(map: &ChoroplethBody) -> DashboardResult<()> {
    map.color_scale.validate()?;
    for location in &map.locations {
        if location.region_code3.len() != 3 {
            return Err(DashboardError::InvalidData(format!(
                "map location `{}` must be an alpha-3 code",
                location.region_code3
            )));
        }
        if location.value.is_some_and(|value| !value.is_finite()) {
            return Err(DashboardError::InvalidData(
                "map location value must be finite".to_owned(),
            ));
        }
    }
    let has_values = map.locations.iter().any(|location| location.value.is_some());
    match map.color_range {
        Some((min, max)) if !min.is_finite() || !max.is_finite() || min > max => Err(
            DashboardError::InvalidData("map color range must be finite and ordered".to_owned()),
        ),
        None if has_values => Err(DashboardError::InvalidData(
            "map with values needs a color range".to_owned(),
        )),
        _ => Ok(()),
    }
}

fn validate_donut(donut: &DonutBody) -> DashboardResult<()> {
    if !donut.hole.is_finite() || !(0.0..1.0).contains(&donut.hole) {
        return Err(DashboardError::InvalidData(
            "donut hole must be finite and in [0, 1)".to_owned(),
        ));
    }
    for slice in &donut.slices {
        if slice.label.is_empty() {
            return Err(DashboardError::InvalidData(
                "donut slice label must not be empty".to_owned(),
            ));
        }
        if !slice.value.is_finite() || !slice.percent.is_finite() {
            return Err(DashboardError::InvalidData(
                "donut slice values must be finite".to_owned(),
            ));
        }
    }
    Ok(())
}
