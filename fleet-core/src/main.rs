//! src/main.rs
//! Demo driver: load a JSON fleet fixture, apply filters from the command
//! line and print what the dashboard would show.
//!
//! ```text
//! fleet <records.json> [--config PATH] [--search TERM] [--category NAME]
//!       [--status V] [--type V] [--manufacturer V] [--year V]
//!       [--sort name|manufacturer|year|status|type] [--desc]
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use fleet_core::{
    Config, FleetError, Logger,
    controller::FilterAction,
    model::{EquipmentRecord, FilterState, SortKey, SortOrder, equipment::load_records},
    query::{QueryExecutor, summarize},
};

#[derive(Debug, Default)]
struct CliArgs {
    records: PathBuf,
    config: Option<PathBuf>,
    actions: Vec<FilterAction>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut records: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| -> Result<String> {
            args.next().with_context(|| format!("{flag} expects a value"))
        };

        match arg.as_str() {
            "--config" => cli.config = Some(PathBuf::from(value("--config")?)),
            "--search" => cli.actions.push(FilterAction::search(&value("--search")?)),
            "--category" => cli.actions.push(FilterAction::category(&value("--category")?)),
            "--status" | "--type" | "--manufacturer" | "--year" => {
                let facet = arg.trim_start_matches("--");
                cli.actions.push(FilterAction::toggle(facet, value(&arg)?.as_str()));
            }
            "--sort" => {
                let key: SortKey = value("--sort")?.parse()?;
                cli.actions.push(FilterAction::SetSortBy(key));
            }
            "--desc" => cli.actions.push(FilterAction::SetSortOrder(SortOrder::Descending)),
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            path => {
                if records.replace(PathBuf::from(path)).is_some() {
                    bail!("only one records file may be given");
                }
            }
        }
    }

    cli.records = records.context("usage: fleet <records.json> [filters]")?;
    Ok(cli)
}

/// Config plus the load failure, if any. The failure is reported by the
/// caller once logging is up; defaults stand in for the broken file.
fn load_config(path: Option<&PathBuf>) -> (Config, Option<FleetError>) {
    let loaded = match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

fn main() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;
    let (config, config_error) = load_config(cli.config.as_ref());

    Logger::try_init_tracing(&config.logging).context("Failed to initialize logging")?;
    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e.trace());
    }
    info!(view = %config.view.mode, "Starting fleet query");

    let records: Arc<[EquipmentRecord]> = load_records(&cli.records)
        .with_context(|| format!("Failed to load {}", cli.records.display()))?
        .into();

    let mut state = FilterState::from_config(&config.query);
    state.apply_all(cli.actions);

    let mut executor = QueryExecutor::new();
    let visible = executor.visible(&records, &state);
    let options = executor.facet_options(&records);
    let summary = summarize(&state);

    println!(
        "{} of {} records (sort: {} {})",
        visible.len(),
        records.len(),
        state.sort_by(),
        state.sort_order()
    );
    for record in visible.iter() {
        println!(
            "  [{}] {:<24} {:<14} {:<16} {:>4} {}",
            record.id,
            record.name_str(),
            record.type_str(),
            record.manufacturer_str(),
            record.known_year().map(|y| y.to_string()).unwrap_or_default(),
            record.status_str(),
        );
    }

    if !summary.is_empty() {
        let chips: Vec<String> = summary.chips.iter().map(|chip| chip.label()).collect();
        println!("{} active filters: {}", summary.count, chips.join(", "));
    }

    for facet in fleet_core::model::Facet::ALL {
        let values: Vec<String> = options
            .get(facet)
            .iter()
            .map(|option| format!("{} ({})", option.value, option.count))
            .collect();
        println!("{}: {}", facet.label(), values.join(", "));
    }

    info!("Fleet query finished");
    Ok(())
}
