//! Per-season vs. career views of the filtered summary rows, and table sorting.

use crate::model::{CoachRow, CoachSeasonSummary};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ViewMode {
    #[default]
    PerSeason,
    Aggregated,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::PerSeason => ViewMode::Aggregated,
            ViewMode::Aggregated => ViewMode::PerSeason,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::PerSeason => "per season",
            ViewMode::Aggregated => "aggregated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortKey {
    #[default]
    Difference,
    Matches,
    Expectation,
    Result,
    Name,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Difference => SortKey::Matches,
            SortKey::Matches => SortKey::Expectation,
            SortKey::Expectation => SortKey::Result,
            SortKey::Result => SortKey::Name,
            SortKey::Name => SortKey::Difference,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Difference => "Difference",
            SortKey::Matches => "Matches",
            SortKey::Expectation => "Expectation",
            SortKey::Result => "Result",
            SortKey::Name => "Name",
        }
    }
}

/// Sort column plus direction for the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSort {
    pub key: SortKey,
    pub descending: bool,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            key: SortKey::Difference,
            descending: true,
        }
    }
}

/// Build display rows from filtered summaries, sorted by Difference descending.
pub fn build_rows(rows: &[&CoachSeasonSummary], mode: ViewMode) -> Vec<CoachRow> {
    let mut out = match mode {
        ViewMode::PerSeason => rows.iter().map(|r| CoachRow::from(*r)).collect(),
        ViewMode::Aggregated => aggregate_by_name(rows),
    };
    sort_rows(&mut out, TableSort::default());
    out
}

/// Sum Matches, Expectation, Result and Difference per coach name.
/// League, season and Coach_ID do not survive the grouping.
pub fn aggregate_by_name(rows: &[&CoachSeasonSummary]) -> Vec<CoachRow> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<CoachRow> = Vec::new();
    for r in rows {
        match index.get(r.name.as_str()) {
            Some(&i) => {
                let acc = &mut out[i];
                acc.matches += u64::from(r.matches);
                acc.expectation += r.expectation;
                acc.result += r.result;
                acc.difference += r.difference;
            }
            None => {
                index.insert(r.name.as_str(), out.len());
                out.push(CoachRow {
                    name: r.name.clone(),
                    league: None,
                    season: None,
                    coach_id: None,
                    matches: u64::from(r.matches),
                    expectation: r.expectation,
                    result: r.result,
                    difference: r.difference,
                });
            }
        }
    }
    out
}

/// Sort by the chosen key; ties fall back to Name, Season and League ascending.
pub fn sort_rows(rows: &mut [CoachRow], sort: TableSort) {
    rows.sort_by(|a, b| {
        let primary = match sort.key {
            SortKey::Difference => a.difference.total_cmp(&b.difference),
            SortKey::Matches => a.matches.cmp(&b.matches),
            SortKey::Expectation => a.expectation.total_cmp(&b.expectation),
            SortKey::Result => a.result.total_cmp(&b.result),
            SortKey::Name => a.name.cmp(&b.name),
        };
        let primary = if sort.descending {
            primary.reverse()
        } else {
            primary
        };
        primary.then_with(|| tie_break(a, b))
    });
}

fn tie_break(a: &CoachRow, b: &CoachRow) -> Ordering {
    a.name
        .cmp(&b.name)
        .then_with(|| a.season.cmp(&b.season))
        .then_with(|| a.league.cmp(&b.league))
}
