use crate::error::{DashboardError, DashboardResult};
use crate::render::ColorScale;

pub(super) fn validate_labels(metric_label: &str, map_metric_label: &str) -> DashboardResult<()> {
    if metric_label.trim().is_empty() || map_metric_label.trim().is_empty() {
        return Err(DashboardError::InvalidData(
            "metric labels must not be empty".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_color_scale(color_scale: &ColorScale) -> DashboardResult<()> {
    if color_scale.name.trim().is_empty() {
        return Err(DashboardError::InvalidData(
            "color scale name must not be empty".to_owned(),
        ));
    }
    color_scale.validate()?;
    if color_scale
        .stops
        .first()
        .is_some_and(|stop| stop.position != 0.0)
        || color_scale
            .stops
            .last()
            .is_some_and(|stop| stop.position != 1.0)
    {
        return Err(DashboardError::InvalidData(
            "color scale must span positions 0 through 1".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_donut_hole(hole: f64) -> DashboardResult<()> {
    if !hole.is_finite() || !(0.0..1.0).contains(&hole) {
        return Err(DashboardError::InvalidData(
            "donut hole must be finite and in [0, 1)".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_top_n(top_n: usize) -> DashboardResult<()> {
    if top_n == 0 {
        return Err(DashboardError::InvalidData(
            "top-n slice count must be > 0".to_owned(),
        ));
    }
    Ok(())
}
