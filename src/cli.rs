use crate::aggregate::ViewMode;
use crate::dashboard::{Dashboard, DashboardConfig};
use crate::data::{CoachData, DataPaths, DEFAULT_MATCHES_FILE, DEFAULT_SUMMARY_FILE};
use crate::report::DashboardReport;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "coach-plus-minus",
    version,
    about = "Plus/minus rating of football coaches: actual vs. expected points"
)]
pub struct Cli {
    /// Directory holding both CSV datasets
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// File name of the per-match expected points table
    #[arg(long, default_value = DEFAULT_MATCHES_FILE)]
    pub matches_file: String,

    /// File name of the per coach-season summary table
    #[arg(long, default_value = DEFAULT_SUMMARY_FILE)]
    pub summary_file: String,

    /// League to include (repeatable). Defaults to the big five
    #[arg(long = "league", value_name = "LEAGUE")]
    pub leagues: Vec<String>,

    /// Include every league present in the data
    #[arg(long, conflicts_with = "leagues")]
    pub all_leagues: bool,

    /// Season to include (repeatable). Defaults to all seasons
    #[arg(long = "season", value_name = "SEASON")]
    pub seasons: Vec<String>,

    /// Aggregate the table over each coach's career
    #[arg(long)]
    pub aggregate_table: bool,

    /// Aggregate the scatter chart over each coach's career
    #[arg(long)]
    pub aggregate_scatter: bool,

    /// Coach_ID whose expected points trajectory is shown
    #[arg(long)]
    pub coach: Option<String>,

    /// Minimum recorded matches for a coach-season to be selectable
    #[arg(long, default_value_t = crate::trajectory::DEFAULT_MIN_MATCHES)]
    pub min_matches: usize,

    /// Print JSON report and exit (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Print text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Table rows printed in text mode
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// Export the JSON report
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Export the table view as CSV
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Write logs to this file (the only log output while the TUI is running)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        !self.json && !self.text && cfg!(feature = "tui")
    }

    pub fn data_paths(&self) -> DataPaths {
        DataPaths::new(&self.data_dir, &self.matches_file, &self.summary_file)
    }
}

pub fn run(args: Cli) -> Result<()> {
    let data = CoachData::load(&args.data_paths()).context("failed to load coach data")?;
    let cfg = build_config(&args, &data);

    if args.is_interactive() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(&args, &data, cfg);
        }
    }

    // Non-interactive runs must not silently swap the requested coach.
    if let Some(id) = args.coach.as_deref() {
        let options = crate::trajectory::eligible_coach_ids(data.matches(), cfg.min_matches);
        if !options.iter().any(|o| o == id) {
            return Err(anyhow::anyhow!(
                "coach {id:?} is unknown or has fewer than {} matches",
                cfg.min_matches
            ));
        }
    }

    let dash = Dashboard::new(&data, cfg);
    handle_exports(&args, &dash)?;

    let stdout = std::io::stdout();
    let mut out = std::io::LineWriter::new(stdout.lock());
    if args.json {
        let report = DashboardReport::new(&dash);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        let summary = crate::text_summary::build_text_summary(&dash, args.limit);
        for line in summary.lines {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Build the initial dashboard settings from CLI arguments.
pub fn build_config(args: &Cli, data: &CoachData) -> DashboardConfig {
    let mut cfg = DashboardConfig::defaults_for(data);
    if args.all_leagues {
        cfg.selection.leagues = data.leagues().into_iter().collect();
    } else if !args.leagues.is_empty() {
        cfg.selection.leagues = args.leagues.iter().cloned().collect();
    }
    if !args.seasons.is_empty() {
        cfg.selection.seasons = args.seasons.iter().cloned().collect();
    }
    if args.aggregate_table {
        cfg.table_mode = ViewMode::Aggregated;
    }
    if args.aggregate_scatter {
        cfg.scatter_mode = ViewMode::Aggregated;
    }
    cfg.coach = args.coach.clone();
    cfg.min_matches = args.min_matches;
    cfg
}

/// Handle export operations (JSON and CSV) for text and JSON modes.
fn handle_exports(args: &Cli, dash: &Dashboard) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        crate::export::export_json(p, &DashboardReport::new(dash))?;
    }
    if let Some(p) = args.export_csv.as_deref() {
        crate::export::export_csv(p, dash.table())?;
    }
    Ok(())
}
