//! Text summary builder for CLI output.
//!
//! Formats the table, the scatter overview and the selected trajectory as
//! human-readable lines for text mode.

use crate::aggregate::ViewMode;
use crate::dashboard::Dashboard;
use crate::model::CoachRow;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary of the current dashboard views. `limit` caps the table rows.
pub(crate) fn build_text_summary(dash: &Dashboard, limit: usize) -> TextSummary {
    let mut lines = Vec::new();
    let sel = dash.selection();

    lines.push(format!("Leagues: {}", join_or_none(sel.leagues.iter())));
    lines.push(format!("Seasons: {}", join_or_none(sel.seasons.iter())));
    lines.push(String::new());

    let table = dash.table();
    let sort = dash.sort();
    lines.push(format!(
        "Coaches ({}, {} rows, sorted by {} {})",
        dash.table_mode().label(),
        table.len(),
        sort.key.label(),
        if sort.descending { "desc" } else { "asc" }
    ));
    if table.is_empty() {
        lines.push("  No coaches match the current filters.".into());
    } else {
        lines.push(table_header(dash.table_mode()));
        for row in table.iter().take(limit) {
            lines.push(table_line(row, dash.table_mode()));
        }
        if table.len() > limit {
            lines.push(format!("  ... {} more", table.len() - limit));
        }
    }
    lines.push(String::new());

    let scatter = dash.scatter();
    if scatter.is_empty() {
        lines.push(format!("Scatter ({}): no points", dash.scatter_mode().label()));
    } else {
        lines.push(format!(
            "Scatter ({}): {} points, {} overachieved, {} underachieved, y range {:.1} to {:.1}",
            dash.scatter_mode().label(),
            scatter.points.len(),
            scatter.overachievers(),
            scatter.underachievers(),
            scatter.y_bounds[0],
            scatter.y_bounds[1],
        ));
    }

    match dash.trajectory() {
        Some(t) => {
            lines.push(format!(
                "Trajectory {}: {} matches, start {:.1}, latest {:.1} ({:+.1})",
                t.coach_id,
                t.points.len(),
                t.baseline,
                t.last_points().unwrap_or(t.baseline),
                t.drift().unwrap_or(0.0),
            ));
        }
        None => lines.push(format!(
            "Trajectory: no coach has at least {} matches",
            dash.min_matches()
        )),
    }

    TextSummary { lines }
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let v: Vec<&str> = items.map(String::as_str).collect();
    if v.is_empty() {
        "(none)".into()
    } else {
        v.join(", ")
    }
}

fn table_header(mode: ViewMode) -> String {
    match mode {
        ViewMode::PerSeason => format!(
            "  {:<28} {:<20} {:<10} {:>7} {:>11} {:>7} {:>10}",
            "Name", "League", "Season", "Matches", "Expectation", "Result", "Difference"
        ),
        ViewMode::Aggregated => format!(
            "  {:<28} {:>7} {:>11} {:>7} {:>10}",
            "Name", "Matches", "Expectation", "Result", "Difference"
        ),
    }
}

fn table_line(row: &CoachRow, mode: ViewMode) -> String {
    match mode {
        ViewMode::PerSeason => format!(
            "  {:<28} {:<20} {:<10} {:>7} {:>11.1} {:>7.1} {:>10.1}",
            row.name,
            row.league.as_deref().unwrap_or("-"),
            row.season.as_deref().unwrap_or("-"),
            row.matches,
            row.expectation,
            row.result,
            row.difference
        ),
        ViewMode::Aggregated => format!(
            "  {:<28} {:>7} {:>11.1} {:>7.1} {:>10.1}",
            row.name, row.matches, row.expectation, row.result, row.difference
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::sample_data;
    use crate::dashboard::{DashboardConfig, DashboardEvent};

    #[test]
    fn one_line_per_row_with_one_decimal() {
        let data = sample_data();
        let dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        let summary = build_text_summary(&dash, 25);
        let rows: Vec<&String> = summary
            .lines
            .iter()
            .filter(|l| l.contains("ENG-Premier League") || l.contains("ITA-Serie A") || l.contains("GER-Bundesliga"))
            .filter(|l| !l.starts_with("Leagues"))
            .collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].contains("55.0"));
        assert!(rows[0].trim_end().ends_with("5.0"));
        assert!(summary.lines.iter().any(|l| l.starts_with("Trajectory Alpha-United-2021")));
    }

    #[test]
    fn limit_truncates_and_empty_filters_are_reported() {
        let data = sample_data();
        let mut dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        let summary = build_text_summary(&dash, 1);
        assert!(summary.lines.iter().any(|l| l.contains("... 3 more")));

        dash.apply(&data, DashboardEvent::ClearLeagues);
        let summary = build_text_summary(&dash, 25);
        assert!(summary.lines.iter().any(|l| l == "Leagues: (none)"));
        assert!(summary
            .lines
            .iter()
            .any(|l| l.contains("No coaches match the current filters.")));
        assert!(summary.lines.iter().any(|l| l.ends_with("no points")));
    }
}
