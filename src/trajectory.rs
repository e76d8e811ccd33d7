use crate::model::MatchRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Minimum number of recorded matches before a coach-season is offered.
pub const DEFAULT_MIN_MATCHES: usize = 10;

/// Half-height of the y window drawn around the season-start expectation.
pub const Y_WINDOW: f64 = 20.0;

/// Expected-points trajectory of a single coach-season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub coach_id: String,
    /// (match index, updated expected points), ordered by match index.
    pub points: Vec<(f64, f64)>,
    /// Expected points at season start.
    pub baseline: f64,
}

impl Trajectory {
    pub fn x_bounds(&self) -> [f64; 2] {
        let first = self.points.first().map(|(x, _)| *x).unwrap_or(0.0);
        let last = self.points.last().map(|(x, _)| *x).unwrap_or(first);
        if last > first {
            [first, last]
        } else {
            [first, first + 1.0]
        }
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [self.baseline - Y_WINDOW, self.baseline + Y_WINDOW]
    }

    pub fn last_points(&self) -> Option<f64> {
        self.points.last().map(|(_, y)| *y)
    }

    /// Change of the expectation from season start to the latest match.
    pub fn drift(&self) -> Option<f64> {
        self.last_points().map(|y| y - self.baseline)
    }
}

/// Distinct Coach_IDs with at least `min_matches` rows, in order of first appearance.
pub fn eligible_coach_ids(matches: &[MatchRecord], min_matches: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for m in matches {
        let c = counts.entry(m.coach_id.as_str()).or_insert(0);
        if *c == 0 {
            order.push(m.coach_id.as_str());
        }
        *c += 1;
    }
    order
        .into_iter()
        .filter(|id| counts.get(id).copied().unwrap_or(0) >= min_matches)
        .map(str::to_string)
        .collect()
}

/// Match rows of one Coach_ID ordered by match index; `None` if the ID is unknown.
pub fn coach_trajectory(matches: &[MatchRecord], coach_id: &str) -> Option<Trajectory> {
    let mut rows: Vec<&MatchRecord> = matches.iter().filter(|m| m.coach_id == coach_id).collect();
    if rows.is_empty() {
        return None;
    }
    rows.sort_by_key(|m| m.matches);
    let points: Vec<(f64, f64)> = rows
        .iter()
        .map(|m| (f64::from(m.matches), m.points))
        .collect();
    let baseline = points[0].1;
    Some(Trajectory {
        coach_id: coach_id.to_string(),
        points,
        baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(id: &str, n: u32, start: f64) -> Vec<MatchRecord> {
        (1..=n)
            .map(|i| MatchRecord {
                coach_id: id.to_string(),
                matches: i,
                points: start + f64::from(i) * 0.5,
            })
            .collect()
    }

    #[test]
    fn selector_excludes_short_series() {
        let mut rows = series("Short-Club-2022", 9, 40.0);
        rows.extend(series("Long-Club-2022", 10, 50.0));
        rows.extend(series("Longer-Club-2021", 30, 60.0));
        let ids = eligible_coach_ids(&rows, DEFAULT_MIN_MATCHES);
        assert_eq!(ids, vec!["Long-Club-2022", "Longer-Club-2021"]);
        for id in &ids {
            let n = rows.iter().filter(|r| &r.coach_id == id).count();
            assert!(n >= DEFAULT_MIN_MATCHES);
        }
    }

    #[test]
    fn interleaved_rows_keep_first_seen_order() {
        let mut rows = Vec::new();
        let a = series("A", 10, 0.0);
        let b = series("B", 10, 0.0);
        for (x, y) in b.into_iter().zip(a) {
            rows.push(x);
            rows.push(y);
        }
        assert_eq!(eligible_coach_ids(&rows, 10), vec!["B", "A"]);
    }

    #[test]
    fn trajectory_is_ordered_and_anchored_at_first_match() {
        let mut rows = series("X", 12, 45.0);
        rows.reverse();
        rows.extend(series("Y", 12, 10.0));
        let t = coach_trajectory(&rows, "X").unwrap();
        assert_eq!(t.points.len(), 12);
        assert!(t.points.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(t.baseline, 45.5);
        assert_eq!(t.y_bounds(), [25.5, 65.5]);
        assert_eq!(t.x_bounds(), [1.0, 12.0]);
        assert_eq!(t.drift(), Some(5.5));
    }

    #[test]
    fn unknown_coach_has_no_trajectory() {
        let rows = series("X", 12, 45.0);
        assert!(coach_trajectory(&rows, "Nobody").is_none());
    }
}
