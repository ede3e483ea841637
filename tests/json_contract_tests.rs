use std::sync::Arc;

use surveillance_dashboard::api::{
    DashboardConfig, FilterSelection, ReactiveController, VIEW_SET_JSON_SCHEMA_V1, ViewSet,
};
use surveillance_dashboard::core::{DatasetStore, RawRecord};
use surveillance_dashboard::render::{MapProjection, Theme};

fn views() -> (ViewSet, FilterSelection) {
    let store = DatasetStore::load(vec![
        RawRecord::new("Austria", "AT", 2019, 5.0),
        RawRecord::new("Austria", "AT", "2020-W03", 9.0),
        RawRecord::new("Germany", "DE", 2019, 20.0),
    ]);
    let mut controller =
        ReactiveController::new(Arc::new(store), DashboardConfig::default()).expect("controller");
    let views = controller
        .on_filter_change(Some("Austria"), Some("AUT"))
        .expect("update")
        .into_view_set()
        .expect("views");
    let selection = controller.selection().cloned().expect("selection");
    (views, selection)
}

#[test]
fn dashboard_config_json_roundtrip() {
    let config = DashboardConfig::default()
        .with_theme(Theme::Plotly)
        .with_map_projection(MapProjection::Equirectangular)
        .with_top_n(3)
        .with_default_selection(FilterSelection::new("Germany", "DEU"));

    let json = config.to_json_pretty().expect("config should serialize");
    let restored = DashboardConfig::from_json_str(&json).expect("config should deserialize");

    assert_eq!(restored, config);
}

#[test]
fn partial_config_json_falls_back_to_defaults() {
    let config = DashboardConfig::from_json_str(r#"{ "top_n": 3, "theme": "plotly_white" }"#)
        .expect("partial config");

    assert_eq!(config.top_n, 3);
    assert_eq!(config.theme, Theme::PlotlyWhite);
    assert_eq!(config.metric_label, "Confirmed Leptospirosis Cases");
    assert_eq!(config.default_selection, FilterSelection::new("Austria", "AUT"));
}

#[test]
fn invalid_config_json_is_rejected() {
    assert!(DashboardConfig::from_json_str(r#"{ "top_n": 0 }"#).is_err());
    assert!(DashboardConfig::from_json_str(r#"{ "donut_hole": -0.1 }"#).is_err());
    assert!(DashboardConfig::from_json_str(r#"{ "metric_label": " " }"#).is_err());
    assert!(DashboardConfig::from_json_str("not json").is_err());
}

#[test]
fn view_set_contract_roundtrips() {
    let (views, selection) = views();

    let json = views
        .to_json_contract_v1_pretty(Some(&selection))
        .expect("contract should serialize");
    let payload: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(payload["schema_version"], VIEW_SET_JSON_SCHEMA_V1);
    assert_eq!(payload["selection"]["region_code3"], "AUT");
    assert_eq!(payload["views"]["top_donut"]["body"]["kind"], "donut");
    assert_eq!(payload["views"]["global_map"]["theme"], "plotly_dark");

    let restored = ViewSet::from_json_compat_str(&json).expect("contract should parse");
    assert_eq!(restored, views);
}

#[test]
fn bare_view_set_json_is_accepted() {
    let (views, _) = views();
    let json = views.to_json_pretty().expect("views should serialize");
    let restored = ViewSet::from_json_compat_str(&json).expect("bare json should parse");
    assert_eq!(restored, views);
}

#[test]
fn unknown_contract_version_is_rejected() {
    let (views, _) = views();
    let json = views
        .to_json_contract_v1_pretty(None)
        .expect("contract should serialize")
        .replacen("\"schema_version\": 1", "\"schema_version\": 7", 1);

    let err = ViewSet::from_json_compat_str(&json).expect_err("version 7 is unknown");
    assert!(err.to_string().contains("unsupported view set schema version"));
}

#[test]
fn time_values_keep_their_shape_in_json() {
    let (views, _) = views();
    let json = views.to_json_pretty().expect("views should serialize");
    let payload: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    let points = &payload["time_series"]["body"]["points"];
    assert_eq!(points[0]["time"], 2019.0);
    assert_eq!(points[1]["time"], "2020-W03");
}
