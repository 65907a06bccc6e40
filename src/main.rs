mod analysis;
mod api;
mod config;
mod display;
mod error;
mod team;

use analysis::summary::Rounding;
use analysis::timeseries::{StatField, StatsTransformer};
use anyhow::Context;
use api::client::{read_json_file, StatsApiClient};
use api::models::{MetadataDto, SummonerStatsDto};
use clap::{Parser, Subcommand};
use config::Config;
use display::output::{
    display_error, display_info, display_lookup_result, display_metadata, display_series,
    display_stats_summary, display_success, display_teams, display_warning,
};
use error::AppError;
use indicatif::ProgressBar;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{mpsc, Arc};
use team::lookup::{spawn_lookup, LookupDispatcher, LookupTracker};
use team::roster::ChampionRoster;
use team::{Side, TeamComposition};

#[derive(Parser, Debug)]
#[command(name = "LoL Stats")]
#[command(about = "Summoner stat trends and team composition lookups", long_about = None)]
struct Args {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show daily stat trends for a summoner
    Stats {
        /// Summoner name
        summoner: String,

        /// Read the stats payload from a JSON file instead of the server
        #[arg(long)]
        file: Option<PathBuf>,

        /// Metric to print as a series (default: first metric)
        #[arg(short, long)]
        metric: Option<String>,

        /// Which stat column to plot
        #[arg(long, value_enum, default_value_t = StatField::Absolute)]
        field: StatField,

        /// Round positive deltas the way the old stats page did
        #[arg(long)]
        legacy_rounding: bool,

        /// Fail on malformed date keys instead of skipping them
        #[arg(long)]
        strict_dates: bool,

        /// Print the transformed series as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show dataset metadata and the champion roster
    Metadata {
        /// Read metadata from a JSON file instead of the server
        #[arg(long)]
        file: Option<PathBuf>,

        /// List every champion
        #[arg(long)]
        roster: bool,
    },

    /// Build ally/enemy teams and look up matching games
    Team {
        /// Ally champion names, comma separated
        #[arg(short, long, value_delimiter = ',')]
        allies: Vec<String>,

        /// Enemy champion names, comma separated
        #[arg(short, long, value_delimiter = ',')]
        enemies: Vec<String>,

        /// Ally champions to remove after adding
        #[arg(long, value_delimiter = ',')]
        remove_allies: Vec<String>,

        /// Enemy champions to remove after adding
        #[arg(long, value_delimiter = ',')]
        remove_enemies: Vec<String>,

        /// Read champion metadata from a JSON file instead of the server
        #[arg(long)]
        metadata_file: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    log::debug!("Using backend {}", config.base_url);

    match args.command {
        Command::Stats {
            summoner,
            file,
            metric,
            field,
            legacy_rounding,
            strict_dates,
            json,
        } => {
            let rounding = if legacy_rounding {
                Rounding::Legacy
            } else {
                Rounding::Uniform
            };
            run_stats(
                config,
                &summoner,
                file.as_deref(),
                metric.as_deref(),
                field,
                rounding,
                strict_dates,
                json,
            )
            .with_context(|| format!("could not show stats for {}", summoner))
        }
        Command::Metadata { file, roster } => {
            let client = StatsApiClient::new(config);
            let meta = load_metadata(&client, file.as_deref()).context("could not load metadata")?;
            display_metadata(&meta, roster);
            Ok(())
        }
        Command::Team {
            allies,
            enemies,
            remove_allies,
            remove_enemies,
            metadata_file,
        } => {
            let mut edits: Vec<(Side, String, bool)> = Vec::new();
            edits.extend(allies.into_iter().map(|n| (Side::Ally, n, true)));
            edits.extend(enemies.into_iter().map(|n| (Side::Enemy, n, true)));
            edits.extend(remove_allies.into_iter().map(|n| (Side::Ally, n, false)));
            edits.extend(remove_enemies.into_iter().map(|n| (Side::Enemy, n, false)));

            run_team(config, edits, metadata_file.as_deref()).context("team lookup failed")
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_stats(
    config: Config,
    summoner: &str,
    file: Option<&Path>,
    metric: Option<&str>,
    field: StatField,
    rounding: Rounding,
    strict_dates: bool,
    json: bool,
) -> anyhow::Result<()> {
    let payload: SummonerStatsDto = match file {
        Some(path) => {
            display_info(&format!("Loading stats from {}", path.display()));
            read_json_file(path)?
        }
        None => {
            display_info(&format!("Fetching stats for {} from {}", summoner, config.base_url));
            StatsApiClient::new(config).get_summoner_stats(summoner)?
        }
    };
    let payload = payload.into_known(summoner)?;

    let player_name = match &payload.player {
        Some(player) if !player.name.is_empty() => {
            log::debug!("Summoner {} has id {}", player.name, player.summoner_id);
            player.name.clone()
        }
        _ => summoner.to_string(),
    };

    let daily = payload.daily();
    let transformer = StatsTransformer::new(field);
    let view = if strict_dates {
        transformer.transform(&daily)?
    } else {
        let view = transformer.transform_lenient(&daily);
        if !view.skipped.is_empty() {
            display_warning(&format!(
                "Skipped {} snapshot(s) with malformed dates: {}",
                view.skipped.len(),
                view.skipped.join(", ")
            ));
        }
        view
    };

    if json {
        let out = serde_json::to_string_pretty(&view)
            .map_err(|e| AppError::JsonError(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    display_success(&format!(
        "Loaded {} metrics over {} days",
        view.metric_names.len(),
        view.dates.len()
    ));
    display_stats_summary(&view, &player_name, rounding);

    if let Some(active) = metric.or(view.default_metric()) {
        let chart = view.chart(active)?;
        display_series(&chart);
    }

    Ok(())
}

fn load_metadata(client: &StatsApiClient, file: Option<&Path>) -> Result<MetadataDto, AppError> {
    match file {
        Some(path) => {
            display_info(&format!("Loading metadata from {}", path.display()));
            read_json_file(path)
        }
        None => {
            display_info("Fetching champion metadata...");
            client.get_metadata()
        }
    }
}

fn run_team(
    config: Config,
    edits: Vec<(Side, String, bool)>,
    metadata_file: Option<&Path>,
) -> anyhow::Result<()> {
    let client = Arc::new(StatsApiClient::new(config));
    let meta = load_metadata(&client, metadata_file)?;
    let roster = ChampionRoster::from(&meta);
    display_success(&format!("Loaded {} champions", roster.len()));

    if roster.is_empty() {
        return Err(AppError::LookupFailed("metadata contains no champions".to_string()).into());
    }

    let tracker = Rc::new(RefCell::new(LookupTracker::new()));
    let (request_tx, request_rx) = mpsc::channel();
    let (outcome_tx, outcome_rx) = mpsc::channel();

    let mut composition = TeamComposition::new(roster);
    composition.subscribe(Box::new(LookupDispatcher::new(tracker.clone(), request_tx)));

    let mut handles = Vec::new();
    for (side, name, add) in edits {
        let outcome = if add {
            composition.validate(side, &name).map(|c| format!("Added {} to the {} team", c.name, side))
        } else {
            composition.remove(side, &name).map(|c| format!("Removed {} from the {} team", c.name, side))
        };

        match outcome {
            Ok(message) => display_success(&message),
            Err(e) => display_warning(&e.to_string()),
        }

        for request in request_rx.try_iter() {
            handles.push(spawn_lookup(client.clone(), request, outcome_tx.clone()));
        }
    }
    drop(outcome_tx);

    if handles.is_empty() {
        display_teams(&composition);
        display_info("No team changes, nothing to look up");
        return Ok(());
    }

    let pb = ProgressBar::new(handles.len() as u64);
    pb.set_message("Waiting for lookups");
    let mut latest_error = None;

    for outcome in outcome_rx.iter() {
        pb.inc(1);
        let mut lookups = tracker.borrow_mut();
        match outcome.result {
            Ok(result) => {
                lookups.accept(outcome.seq, result);
            }
            Err(e) if lookups.is_current(outcome.seq) => latest_error = Some(e),
            Err(e) => log::debug!("Ignoring failed stale lookup #{}: {}", outcome.seq, e),
        }
    }
    pb.finish_with_message("✓ Lookups complete");

    for handle in handles {
        if handle.join().is_err() {
            log::warn!("A lookup worker panicked");
        }
    }

    display_teams(&composition);

    let lookups = tracker.borrow();
    match (lookups.current(), latest_error) {
        (Some(result), _) => display_lookup_result(result),
        (None, Some(e)) => return Err(e.into()),
        (None, None) => display_warning("No lookup result received"),
    }

    Ok(())
}
