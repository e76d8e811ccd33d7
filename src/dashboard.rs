//! Explicit dashboard state and the views derived from it.
//!
//! Every user action is a [`DashboardEvent`]. Applying one mutates the state and
//! re-derives only the views that depend on what changed. The loaded data is
//! never owned here; callers pass the same read-only [`CoachData`] to every call.

use crate::aggregate::{self, SortKey, TableSort, ViewMode};
use crate::data::CoachData;
use crate::filter::{self, Selection};
use crate::model::CoachRow;
use crate::scatter::ScatterPlot;
use crate::trajectory::{self, Trajectory};

/// Initial settings, usually taken from the command line.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub selection: Selection,
    pub table_mode: ViewMode,
    pub scatter_mode: ViewMode,
    pub coach: Option<String>,
    pub min_matches: usize,
}

impl DashboardConfig {
    pub fn defaults_for(data: &CoachData) -> Self {
        Self {
            selection: Selection::with_defaults(&data.seasons()),
            table_mode: ViewMode::PerSeason,
            scatter_mode: ViewMode::PerSeason,
            coach: None,
            min_matches: trajectory::DEFAULT_MIN_MATCHES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    ToggleLeague(String),
    ToggleSeason(String),
    SelectAllLeagues,
    ClearLeagues,
    ResetLeagues,
    SelectAllSeasons,
    ClearSeasons,
    SetTableMode(ViewMode),
    SetScatterMode(ViewMode),
    SetSortKey(SortKey),
    ReverseSort,
    SelectCoach(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Stale {
    table: bool,
    scatter: bool,
    trajectory: bool,
}

pub struct Dashboard {
    selection: Selection,
    table_mode: ViewMode,
    scatter_mode: ViewMode,
    sort: TableSort,
    min_matches: usize,
    coach_options: Vec<String>,
    coach: Option<String>,

    table: Vec<CoachRow>,
    scatter: ScatterPlot,
    trajectory: Option<Trajectory>,
}

impl Dashboard {
    pub fn new(data: &CoachData, cfg: DashboardConfig) -> Self {
        let coach_options = trajectory::eligible_coach_ids(data.matches(), cfg.min_matches);
        let coach = match cfg.coach {
            Some(id) if coach_options.contains(&id) => Some(id),
            Some(id) => {
                tracing::warn!(coach_id = %id, "requested coach is not selectable, using the first eligible one");
                coach_options.first().cloned()
            }
            None => coach_options.first().cloned(),
        };
        let mut dash = Self {
            selection: cfg.selection,
            table_mode: cfg.table_mode,
            scatter_mode: cfg.scatter_mode,
            sort: TableSort::default(),
            min_matches: cfg.min_matches,
            coach_options,
            coach,
            table: Vec::new(),
            scatter: ScatterPlot::empty(cfg.scatter_mode),
            trajectory: None,
        };
        dash.refresh(
            data,
            Stale {
                table: true,
                scatter: true,
                trajectory: true,
            },
        );
        dash
    }

    pub fn apply(&mut self, data: &CoachData, ev: DashboardEvent) {
        let filters = Stale {
            table: true,
            scatter: true,
            trajectory: false,
        };
        let stale = match ev {
            DashboardEvent::ToggleLeague(l) => {
                self.selection.toggle_league(&l);
                filters
            }
            DashboardEvent::ToggleSeason(s) => {
                self.selection.toggle_season(&s);
                filters
            }
            DashboardEvent::SelectAllLeagues => {
                self.selection.leagues = data.leagues().into_iter().collect();
                filters
            }
            DashboardEvent::ClearLeagues => {
                self.selection.leagues.clear();
                filters
            }
            DashboardEvent::ResetLeagues => {
                self.selection.reset_leagues();
                filters
            }
            DashboardEvent::SelectAllSeasons => {
                self.selection.seasons = data.seasons().into_iter().collect();
                filters
            }
            DashboardEvent::ClearSeasons => {
                self.selection.seasons.clear();
                filters
            }
            DashboardEvent::SetTableMode(m) => {
                self.table_mode = m;
                Stale {
                    table: true,
                    ..Stale::default()
                }
            }
            DashboardEvent::SetScatterMode(m) => {
                self.scatter_mode = m;
                Stale {
                    scatter: true,
                    ..Stale::default()
                }
            }
            DashboardEvent::SetSortKey(k) => {
                self.sort.key = k;
                aggregate::sort_rows(&mut self.table, self.sort);
                Stale::default()
            }
            DashboardEvent::ReverseSort => {
                self.sort.descending = !self.sort.descending;
                aggregate::sort_rows(&mut self.table, self.sort);
                Stale::default()
            }
            DashboardEvent::SelectCoach(id) => {
                if self.coach_options.contains(&id) {
                    self.coach = Some(id);
                    Stale {
                        trajectory: true,
                        ..Stale::default()
                    }
                } else {
                    tracing::debug!(coach_id = %id, "ignoring selection of ineligible coach");
                    Stale::default()
                }
            }
        };
        self.refresh(data, stale);
    }

    fn refresh(&mut self, data: &CoachData, stale: Stale) {
        if stale.table || stale.scatter {
            let filtered = filter::apply(data.summary(), &self.selection);
            if stale.table {
                let mut rows = aggregate::build_rows(&filtered, self.table_mode);
                aggregate::sort_rows(&mut rows, self.sort);
                tracing::debug!(rows = rows.len(), mode = self.table_mode.label(), "table view rebuilt");
                self.table = rows;
            }
            if stale.scatter {
                let rows = aggregate::build_rows(&filtered, self.scatter_mode);
                self.scatter = ScatterPlot::build(&rows, self.scatter_mode);
                tracing::debug!(points = self.scatter.points.len(), mode = self.scatter_mode.label(), "scatter view rebuilt");
            }
        }
        if stale.trajectory {
            self.trajectory = self
                .coach
                .as_deref()
                .and_then(|id| trajectory::coach_trajectory(data.matches(), id));
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn table_mode(&self) -> ViewMode {
        self.table_mode
    }

    pub fn scatter_mode(&self) -> ViewMode {
        self.scatter_mode
    }

    pub fn sort(&self) -> TableSort {
        self.sort
    }

    pub fn min_matches(&self) -> usize {
        self.min_matches
    }

    pub fn table(&self) -> &[CoachRow] {
        &self.table
    }

    pub fn scatter(&self) -> &ScatterPlot {
        &self.scatter
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn coach_options(&self) -> &[String] {
        &self.coach_options
    }

    #[cfg(test)]
    pub fn coach(&self) -> Option<&str> {
        self.coach.as_deref()
    }

    pub fn coach_index(&self) -> Option<usize> {
        let current = self.coach.as_deref()?;
        self.coach_options.iter().position(|c| c == current)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{CoachSeasonSummary, MatchRecord};

    pub(crate) fn sample_data() -> CoachData {
        let summary = vec![
            summary("Alpha", "ENG-Premier League", "2020-2021", 38, 5.0),
            summary("Alpha", "ENG-Premier League", "2021-2022", 38, -2.0),
            summary("Beta", "ITA-Serie A", "2021-2022", 20, 4.0),
            summary("Gamma", "POR-Liga Portugal", "2021-2022", 34, 9.0),
            summary("Delta", "GER-Bundesliga", "2020-2021", 12, -6.5),
        ];
        let mut matches = Vec::new();
        for i in 1..=12 {
            matches.push(MatchRecord {
                coach_id: "Alpha-United-2021".into(),
                matches: i,
                points: 60.0 + f64::from(i) * 0.25,
            });
        }
        for i in 1..=5 {
            matches.push(MatchRecord {
                coach_id: "Beta-Roma-2021".into(),
                matches: i,
                points: 50.0,
            });
        }
        for i in (1..=10).rev() {
            matches.push(MatchRecord {
                coach_id: "Delta-Mainz-2020".into(),
                matches: i,
                points: 40.0 - f64::from(i),
            });
        }
        CoachData::from_parts(matches, summary)
    }

    fn summary(name: &str, league: &str, season: &str, matches: u32, diff: f64) -> CoachSeasonSummary {
        CoachSeasonSummary {
            name: name.into(),
            league: league.into(),
            season: season.into(),
            coach_id: Some(format!("{name}-{season}")),
            matches,
            expectation: 50.0,
            result: 50.0 + diff,
            difference: diff,
        }
    }

    #[test]
    fn defaults_filter_to_big_five() {
        let data = sample_data();
        let dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        let names: Vec<&str> = dash.table().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Alpha", "Delta"]);
        assert_eq!(dash.scatter().points.len(), 4);
        assert_eq!(
            dash.coach_options(),
            &["Alpha-United-2021".to_string(), "Delta-Mainz-2020".to_string()]
        );
        assert_eq!(dash.coach(), Some("Alpha-United-2021"));
        assert_eq!(dash.trajectory().map(|t| t.baseline), Some(60.25));
    }

    #[test]
    fn table_toggle_does_not_touch_scatter() {
        let data = sample_data();
        let mut dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        let scatter_before = dash.scatter().clone();
        dash.apply(&data, DashboardEvent::SetTableMode(ViewMode::Aggregated));
        assert_eq!(dash.table().len(), 3);
        assert_eq!(dash.table()[0].name, "Beta");
        assert_eq!(dash.table()[1].name, "Alpha");
        assert_eq!(dash.table()[1].difference, 3.0);
        assert_eq!(dash.scatter(), &scatter_before);
    }

    #[test]
    fn scatter_toggle_does_not_touch_table() {
        let data = sample_data();
        let mut dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        let table_before = dash.table().to_vec();
        dash.apply(&data, DashboardEvent::SetScatterMode(ViewMode::Aggregated));
        assert_eq!(dash.scatter().points.len(), 3);
        assert_eq!(dash.scatter().mode, ViewMode::Aggregated);
        assert_eq!(dash.table(), table_before.as_slice());
    }

    #[test]
    fn clearing_leagues_empties_table_and_scatter_but_keeps_trajectory() {
        let data = sample_data();
        let mut dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        dash.apply(&data, DashboardEvent::ClearLeagues);
        assert!(dash.table().is_empty());
        assert!(dash.scatter().is_empty());
        assert!(dash.trajectory().is_some());

        dash.apply(&data, DashboardEvent::SelectAllLeagues);
        assert_eq!(dash.table().len(), 5);
        assert_eq!(dash.table()[0].name, "Gamma");
    }

    #[test]
    fn ineligible_coach_selection_is_ignored() {
        let data = sample_data();
        let mut dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        dash.apply(&data, DashboardEvent::SelectCoach("Beta-Roma-2021".into()));
        assert_eq!(dash.coach(), Some("Alpha-United-2021"));
        dash.apply(&data, DashboardEvent::SelectCoach("Delta-Mainz-2020".into()));
        assert_eq!(dash.coach_index(), Some(1));
        let t = dash.trajectory().unwrap();
        assert_eq!(t.points.first().map(|p| p.0), Some(1.0));
        assert_eq!(t.baseline, 39.0);
    }

    #[test]
    fn sort_changes_keep_row_set() {
        let data = sample_data();
        let mut dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        dash.apply(&data, DashboardEvent::SetSortKey(SortKey::Matches));
        let m: Vec<u64> = dash.table().iter().map(|r| r.matches).collect();
        assert_eq!(m, vec![38, 38, 20, 12]);
        dash.apply(&data, DashboardEvent::ReverseSort);
        let m: Vec<u64> = dash.table().iter().map(|r| r.matches).collect();
        assert_eq!(m, vec![12, 20, 38, 38]);
        dash.apply(&data, DashboardEvent::ToggleSeason("2020-2021".into()));
        assert_eq!(dash.table().len(), 2);
        assert!(!dash.sort().descending);
    }

    #[test]
    fn requested_coach_outside_options_falls_back() {
        let data = sample_data();
        let mut cfg = DashboardConfig::defaults_for(&data);
        cfg.coach = Some("Beta-Roma-2021".into());
        let dash = Dashboard::new(&data, cfg);
        assert_eq!(dash.coach(), Some("Alpha-United-2021"));
    }
}
