use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use dockmaster::analysis::reporting;
use dockmaster::cli::cli::Args;
use dockmaster::config::zone_config::ZoneConfig;
use dockmaster::core::batch::{evaluate_candidate, suggest_batch, BatchOutcome};
use dockmaster::core::matcher::find_nearest_waypoint;
use dockmaster::core::zone_id::validate_zone_id;
use dockmaster::data::candidates_loader::load_candidates;
use dockmaster::data::dataset_loader::load_dataset;
use dockmaster::data::poi::Coordinate;
use dockmaster::data::suggestions_loader::load_pending;
use dockmaster::models::suggestion::Suggestion;
use dockmaster::models::waypoint::Waypoint;
use dockmaster::utils::csv_export::SuggestionExporter;
use dockmaster::utils::logging;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())?;

    if let Some(raw) = args.check_id() {
        let normalized = validate_zone_id(raw)?;
        println!("{}", normalized);
        return Ok(());
    }

    let config = match args.config() {
        Some(path) => ZoneConfig::load(path)
            .with_context(|| format!("failed to load zone config from {}", path))?,
        None => ZoneConfig::default(),
    };

    let dataset = load_dataset(args.waypoints())
        .with_context(|| format!("failed to load waypoints from {}", args.waypoints()))?;
    let waypoints = dataset.waypoints;

    let pending = match args.pending() {
        Some(path) => load_pending(path)
            .with_context(|| format!("failed to load suggestions from {}", path))?,
        None => Vec::new(),
    };

    let outcomes = if let Some(path) = args.batch() {
        let candidates = load_candidates(path)
            .with_context(|| format!("failed to load candidates from {}", path))?;
        run_batch(&candidates, &waypoints, &pending, &config, args.json())?
    } else if let Some((x, y)) = args.candidate() {
        vec![run_single(Coordinate::new(x, y), &waypoints, &pending, &config, args.json())?]
    } else {
        bail!("nothing to do: pass --x and --y, --batch <csv> or --check-id <id>");
    };

    if let Some(dir) = args.csv_output() {
        let exporter = SuggestionExporter::new(dir)
            .with_context(|| format!("failed to create export directory under {}", dir))?;
        let path = exporter.export_suggestions(&outcomes)
            .context("failed to write suggestions.csv")?;
        if !args.json() {
            println!("\nSuggestions exported to {}", path.display());
        }
    }

    logging::print_timing_report();
    Ok(())
}

fn run_single(
    candidate: Coordinate,
    waypoints: &[Waypoint],
    pending: &[Suggestion],
    config: &ZoneConfig,
    json: bool,
) -> anyhow::Result<BatchOutcome> {
    let outcome = evaluate_candidate(&candidate, waypoints, pending, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(outcome);
    }

    reporting::print_candidate_header(&outcome.candidate, outcome.book_area);
    match &outcome.rejection {
        Some(rejection) => reporting::print_rejection(rejection),
        None => {
            reporting::print_suggestions(&outcome.suggestions);
            reporting::print_nearest_match(find_nearest_waypoint(&candidate, waypoints, config).as_ref());
        }
    }
    Ok(outcome)
}

fn run_batch(
    candidates: &[Coordinate],
    waypoints: &[Waypoint],
    pending: &[Suggestion],
    config: &ZoneConfig,
    json: bool,
) -> anyhow::Result<Vec<BatchOutcome>> {
    info!(candidates = candidates.len(), "evaluating candidate batch");

    let progress = ProgressBar::new(candidates.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} candidates")?,
    );

    let outcomes = suggest_batch(candidates, waypoints, pending, config, || progress.inc(1));
    progress.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        reporting::print_batch_summary(&outcomes);
    }
    Ok(outcomes)
}
