use serde::{Deserialize, Deserializer, Serialize};

/// Leagues selected by default in the league filter.
pub const BIG_FIVE: [&str; 5] = [
    "FRA-Ligue 1",
    "ESP-La Liga",
    "GER-Bundesliga",
    "ITA-Serie A",
    "ENG-Premier League",
];

/// One match of a coach-season trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Coach_ID")]
    pub coach_id: String,
    #[serde(rename = "Matches", deserialize_with = "de_count")]
    pub matches: u32,
    #[serde(rename = "Points", deserialize_with = "de_finite")]
    pub points: f64,
}

/// One coach in one season of one league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachSeasonSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "League")]
    pub league: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Coach_ID", default)]
    pub coach_id: Option<String>,
    #[serde(rename = "Matches", deserialize_with = "de_count")]
    pub matches: u32,
    #[serde(rename = "Expectation", deserialize_with = "de_finite")]
    pub expectation: f64,
    #[serde(rename = "Result", deserialize_with = "de_finite")]
    pub result: f64,
    #[serde(rename = "Difference", deserialize_with = "de_finite")]
    pub difference: f64,
}

/// A displayed table row: either one coach-season or the career sum of one coach.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "League")]
    pub league: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<String>,
    #[serde(rename = "Coach_ID")]
    pub coach_id: Option<String>,
    #[serde(rename = "Matches")]
    pub matches: u64,
    #[serde(rename = "Expectation")]
    pub expectation: f64,
    #[serde(rename = "Result")]
    pub result: f64,
    #[serde(rename = "Difference")]
    pub difference: f64,
}

impl CoachRow {
    /// Label used for chart points: the Coach_ID for a season row, the name otherwise.
    pub fn label(&self) -> &str {
        self.coach_id.as_deref().unwrap_or(&self.name)
    }
}

impl From<&CoachSeasonSummary> for CoachRow {
    fn from(s: &CoachSeasonSummary) -> Self {
        Self {
            name: s.name.clone(),
            league: Some(s.league.clone()),
            season: Some(s.season.clone()),
            coach_id: s.coach_id.clone(),
            matches: u64::from(s.matches),
            expectation: s.expectation,
            result: s.result,
            difference: s.difference,
        }
    }
}

/// Upper bound for a match count or match index read from disk.
pub const MAX_MATCH_COUNT: u32 = 10_000;

// NaN and infinities would break table ordering and chart bounds.
fn de_finite<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(serde::de::Error::custom(format!("non-finite value: {v}")))
    }
}

// Match counts are sometimes written as integral floats ("34.0") by upstream tooling.
fn de_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<u32>() {
        if v <= MAX_MATCH_COUNT {
            return Ok(v);
        }
    }
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=f64::from(MAX_MATCH_COUNT)).contains(&v) => {
            Ok(v as u32)
        }
        _ => Err(serde::de::Error::custom(format!(
            "invalid match count: {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_coach_id() {
        let mut row = CoachRow {
            name: "A".into(),
            league: None,
            season: None,
            coach_id: Some("A-Club-2021".into()),
            matches: 1,
            expectation: 0.0,
            result: 0.0,
            difference: 0.0,
        };
        assert_eq!(row.label(), "A-Club-2021");
        row.coach_id = None;
        assert_eq!(row.label(), "A");
    }

    #[test]
    fn match_count_accepts_integral_float() {
        let data = "Coach_ID,Matches,Points\nX,34.0,51.5\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: MatchRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(rec.matches, 34);
    }

    #[test]
    fn match_count_rejects_out_of_range() {
        for raw in ["10001", "3000000000", "-1", "1e12"] {
            let data = format!("Coach_ID,Matches,Points\nX,{raw},51.5\n");
            let mut rdr = csv::Reader::from_reader(data.as_bytes());
            let rec: Result<MatchRecord, _> = rdr.deserialize().next().unwrap();
            assert!(rec.is_err(), "{raw} accepted");
        }
    }

    #[test]
    fn float_columns_reject_nan_and_infinity() {
        for raw in ["NaN", "inf", "-inf"] {
            let data = format!(
                "Name,League,Season,Matches,Expectation,Result,Difference\nA,L,2021,38,50.0,50.0,{raw}\n"
            );
            let mut rdr = csv::Reader::from_reader(data.as_bytes());
            let rec: Result<CoachSeasonSummary, _> = rdr.deserialize().next().unwrap();
            assert!(rec.is_err(), "{raw} accepted");
        }
    }

    #[test]
    fn match_count_rejects_fraction() {
        let data = "Coach_ID,Matches,Points\nX,3.5,51.5\n";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: Result<MatchRecord, _> = rdr.deserialize().next().unwrap();
        assert!(rec.is_err());
    }
}
