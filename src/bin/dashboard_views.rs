use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use surveillance_dashboard::api::{DashboardConfig, FilterOutcome, ReactiveController};
use surveillance_dashboard::core::{DatasetStore, read_csv_path};
use surveillance_dashboard::telemetry::init_default_tracing;
use tracing::info;

const USAGE: &str = "usage: dashboard_views --input <csv> [--region-name <name>] [--region-code <alpha3>] [--config <json>] [--output <path>] [--list-options]";

#[derive(Debug, Default)]
struct CliArgs {
    input: PathBuf,
    region_name: Option<String>,
    region_code: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    list_options: bool,
}

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            DashboardConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => DashboardConfig::default(),
    };

    let raw_records = read_csv_path(&args.input).map_err(|err| err.to_string())?;
    let store = DatasetStore::load(raw_records);
    let report = store.load_report();
    info!(
        raw = report.raw,
        retained = report.retained,
        dropped_unmapped = report.dropped_unmapped,
        missing_values = report.missing_values,
        saturated_totals = report.saturated_totals,
        "dataset ready"
    );

    let mut controller =
        ReactiveController::new(Arc::new(store), config).map_err(|err| err.to_string())?;

    if args.list_options {
        let options = controller
            .selector_options()
            .to_json_pretty()
            .map_err(|err| err.to_string())?;
        return emit(args.output.as_ref(), &options);
    }

    let defaults = controller.config().default_selection.clone();
    let region_name = args.region_name.unwrap_or(defaults.region_name);
    let region_code = args.region_code.unwrap_or(defaults.region_code3);

    match controller
        .on_filter_change(Some(region_name.as_str()), Some(region_code.as_str()))
        .map_err(|err| err.to_string())?
    {
        FilterOutcome::Update(views) => {
            let payload = views
                .to_json_contract_v1_pretty(controller.selection())
                .map_err(|err| err.to_string())?;
            emit(args.output.as_ref(), &payload)
        }
        FilterOutcome::NoUpdate => Err("region name and region code must not be blank".to_owned()),
    }
}

fn emit(output: Option<&PathBuf>, payload: &str) -> Result<(), String> {
    match output {
        Some(path) => fs::write(path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs::default();
    let mut input = None::<PathBuf>;

    while let Some(flag) = args.next() {
        let mut value_for = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value_for("--input")?)),
            "--region-name" => parsed.region_name = Some(value_for("--region-name")?),
            "--region-code" => parsed.region_code = Some(value_for("--region-code")?),
            "--config" => parsed.config = Some(PathBuf::from(value_for("--config")?)),
            "--output" => parsed.output = Some(PathBuf::from(value_for("--output")?)),
            "--list-options" => parsed.list_options = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`\n{USAGE}")),
        }
    }

    parsed.input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    Ok(parsed)
}
