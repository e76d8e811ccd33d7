//! Loading of the two precomputed coach datasets.
//!
//! Both files are read once, synchronously, before anything is rendered. Any
//! failure is fatal: there is no partial load and no retry.

use crate::model::{CoachSeasonSummary, MatchRecord};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MATCHES_FILE: &str = "streamlit_22-12-17.csv";
pub const DEFAULT_SUMMARY_FILE: &str = "coaches_summary_22-12.17.csv";

const MATCH_COLUMNS: [&str; 3] = ["Coach_ID", "Matches", "Points"];
const SUMMARY_COLUMNS: [&str; 7] = [
    "Name",
    "League",
    "Season",
    "Matches",
    "Expectation",
    "Result",
    "Difference",
];

#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} is missing required column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{} line {line}: {source}", path.display())]
    Row {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Locations of the two input files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub matches: PathBuf,
    pub summary: PathBuf,
}

impl DataPaths {
    pub fn new(dir: impl AsRef<Path>, matches_file: &str, summary_file: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            matches: dir.join(matches_file),
            summary: dir.join(summary_file),
        }
    }
}

/// Both tables, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct CoachData {
    matches: Vec<MatchRecord>,
    summary: Vec<CoachSeasonSummary>,
}

impl CoachData {
    pub fn load(paths: &DataPaths) -> Result<Self, DataError> {
        let matches: Vec<MatchRecord> = read_table(&paths.matches, &MATCH_COLUMNS)?;
        tracing::info!(rows = matches.len(), path = %paths.matches.display(), "loaded match table");
        let summary: Vec<CoachSeasonSummary> = read_table(&paths.summary, &SUMMARY_COLUMNS)?;
        tracing::info!(rows = summary.len(), path = %paths.summary.display(), "loaded summary table");
        Ok(Self { matches, summary })
    }

    #[cfg(test)]
    pub fn from_parts(matches: Vec<MatchRecord>, summary: Vec<CoachSeasonSummary>) -> Self {
        Self { matches, summary }
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn summary(&self) -> &[CoachSeasonSummary] {
        &self.summary
    }

    /// Distinct leagues in order of first appearance.
    pub fn leagues(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for row in &self.summary {
            if !out.iter().any(|l| l == &row.league) {
                out.push(row.league.clone());
            }
        }
        out
    }

    /// Distinct seasons, sorted ascending.
    pub fn seasons(&self) -> Vec<String> {
        let mut out: Vec<String> = self.summary.iter().map(|r| r.season.clone()).collect();
        out.sort();
        out.dedup();
        out
    }
}

fn read_table<T: DeserializeOwned>(
    path: &Path,
    required: &[&'static str],
) -> Result<Vec<T>, DataError> {
    if !path.is_file() {
        return Err(DataError::Missing {
            path: path.to_path_buf(),
        });
    }
    let mut rdr = csv::Reader::from_path(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let headers = rdr.headers().map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    for &column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut rows = Vec::new();
    for rec in rdr.deserialize::<T>() {
        match rec {
            Ok(row) => rows.push(row),
            Err(source) => {
                let line = source.position().map(|p| p.line()).unwrap_or(0);
                return Err(DataError::Row {
                    path: path.to_path_buf(),
                    line,
                    source,
                });
            }
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MATCHES: &str = "\
Coach_ID,Matches,Points
Alpha-United-2021,1,60.2
Alpha-United-2021,2,61.0
";

    const SUMMARY: &str = "\
,Name,League,Season,Coach_ID,Matches,Expectation,Result,Difference
0,Alpha,ENG-Premier League,2021-2022,Alpha-United-2021,38,60.2,66.0,5.8
1,Beta,ITA-Serie A,2020-2021,Beta-Roma-2020,20,30.0,28.5,-1.5
2,Gamma,ENG-Premier League,2020-2021,Gamma-City-2020,38,70.0,70.0,0.0
";

    fn write_pair(dir: &Path, matches: &str, summary: &str) -> DataPaths {
        fs::write(dir.join(DEFAULT_MATCHES_FILE), matches).unwrap();
        fs::write(dir.join(DEFAULT_SUMMARY_FILE), summary).unwrap();
        DataPaths::new(dir, DEFAULT_MATCHES_FILE, DEFAULT_SUMMARY_FILE)
    }

    #[test]
    fn loads_both_tables_and_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(dir.path(), MATCHES, SUMMARY);
        let data = CoachData::load(&paths).unwrap();
        assert_eq!(data.matches().len(), 2);
        assert_eq!(data.summary().len(), 3);
        assert_eq!(
            data.summary()[0].coach_id.as_deref(),
            Some("Alpha-United-2021")
        );
        assert_eq!(data.summary()[1].difference, -1.5);
    }

    #[test]
    fn distinct_leagues_and_sorted_seasons() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(dir.path(), MATCHES, SUMMARY);
        let data = CoachData::load(&paths).unwrap();
        assert_eq!(data.leagues(), vec!["ENG-Premier League", "ITA-Serie A"]);
        assert_eq!(data.seasons(), vec!["2020-2021", "2021-2022"]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_SUMMARY_FILE), SUMMARY).unwrap();
        let paths = DataPaths::new(dir.path(), DEFAULT_MATCHES_FILE, DEFAULT_SUMMARY_FILE);
        let err = CoachData::load(&paths).unwrap_err();
        assert!(matches!(err, DataError::Missing { .. }));
    }

    #[test]
    fn missing_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(
            dir.path(),
            MATCHES,
            "Name,League,Season,Matches,Expectation,Result\nA,L,2021,1,1.0,2.0\n",
        );
        let err = CoachData::load(&paths).unwrap_err();
        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "Difference"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(
            dir.path(),
            "Coach_ID,Matches,Points\nX,1,50.0\nX,2,not-a-number\n",
            SUMMARY,
        );
        let err = CoachData::load(&paths).unwrap_err();
        match err {
            DataError::Row { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_numbers_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(
            dir.path(),
            MATCHES,
            "Name,League,Season,Matches,Expectation,Result,Difference\n\
             A,L,2021,38,50.0,50.0,NaN\n\
             B,L,2021,38,50.0,51.0,1.0\n",
        );
        match CoachData::load(&paths).unwrap_err() {
            DataError::Row { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        let paths = write_pair(
            dir.path(),
            "Coach_ID,Matches,Points\nX,1,50.0\nX,2,inf\n",
            SUMMARY,
        );
        match CoachData::load(&paths).unwrap_err() {
            DataError::Row { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_match_count_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(
            dir.path(),
            MATCHES,
            "Name,League,Season,Matches,Expectation,Result,Difference\n\
             A,L,2021,3000000000,50.0,50.0,0.0\n",
        );
        assert!(matches!(
            CoachData::load(&paths).unwrap_err(),
            DataError::Row { line: 2, .. }
        ));
    }

    #[test]
    fn header_only_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_pair(
            dir.path(),
            "Coach_ID,Matches,Points\n",
            "Name,League,Season,Matches,Expectation,Result,Difference\n",
        );
        let data = CoachData::load(&paths).unwrap();
        assert!(data.matches().is_empty());
        assert!(data.summary().is_empty());
        assert!(data.seasons().is_empty());
    }
}
