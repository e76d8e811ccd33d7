use crate::model::{CoachSeasonSummary, BIG_FIVE};
use serde::Serialize;
use std::collections::BTreeSet;

/// League and season multi-selection applied to the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub leagues: BTreeSet<String>,
    pub seasons: BTreeSet<String>,
}

impl Selection {
    pub fn new<L, S>(leagues: L, seasons: S) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            leagues: leagues.into_iter().map(Into::into).collect(),
            seasons: seasons.into_iter().map(Into::into).collect(),
        }
    }

    /// Big five leagues and every season present.
    pub fn with_defaults(all_seasons: &[String]) -> Self {
        Self::new(BIG_FIVE, all_seasons.iter().cloned())
    }

    pub fn matches(&self, row: &CoachSeasonSummary) -> bool {
        self.leagues.contains(&row.league) && self.seasons.contains(&row.season)
    }

    pub fn toggle_league(&mut self, league: &str) {
        toggle(&mut self.leagues, league);
    }

    pub fn toggle_season(&mut self, season: &str) {
        toggle(&mut self.seasons, season);
    }

    pub fn reset_leagues(&mut self) {
        self.leagues = BIG_FIVE.iter().map(|l| l.to_string()).collect();
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Rows whose league and season are both selected, in input order.
pub fn apply<'a>(rows: &'a [CoachSeasonSummary], sel: &Selection) -> Vec<&'a CoachSeasonSummary> {
    rows.iter().filter(|r| sel.matches(r)).collect()
}
