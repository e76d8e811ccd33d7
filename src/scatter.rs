//! Geometry of the matches vs. over/underachievement scatter chart.
//!
//! Everything here is plain data; the TUI only paints what [`ScatterPlot`] describes.

use crate::aggregate::ViewMode;
use crate::model::CoachRow;
use serde::Serialize;

/// Vertical padding of the shaded bands beyond the data extremes.
const BAND_PAD: f64 = 3.0;

pub const OVER_LABEL: &str = "Overachieved expectations";
pub const UNDER_LABEL: &str = "Underachieved expectations";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub label: String,
    pub matches: f64,
    /// Difference rounded to one decimal.
    pub difference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BandKind {
    Over,
    Under,
}

/// Horizontal band between `y0` and `y1` spanning the whole x range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub kind: BandKind,
    pub y0: f64,
    pub y1: f64,
}

impl Band {
    pub fn low(&self) -> f64 {
        self.y0.min(self.y1)
    }

    pub fn high(&self) -> f64 {
        self.y0.max(self.y1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub kind: BandKind,
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPlot {
    pub mode: ViewMode,
    pub points: Vec<ScatterPoint>,
    pub bands: Vec<Band>,
    pub annotations: Vec<Annotation>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ScatterPlot {
    pub fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            points: Vec::new(),
            bands: Vec::new(),
            annotations: Vec::new(),
            x_bounds: [0.0, 1.0],
            y_bounds: [-BAND_PAD, BAND_PAD],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn build(rows: &[CoachRow], mode: ViewMode) -> Self {
        if rows.is_empty() {
            return Self::empty(mode);
        }

        let points: Vec<ScatterPoint> = rows
            .iter()
            .map(|r| ScatterPoint {
                label: match mode {
                    ViewMode::Aggregated => r.name.clone(),
                    ViewMode::PerSeason => r.label().to_string(),
                },
                matches: r.matches as f64,
                difference: round1(r.difference),
            })
            .collect();

        let min_x = rows.iter().map(|r| r.matches).min().unwrap_or(0);
        let max_x = rows.iter().map(|r| r.matches).max().unwrap_or(0);
        let min_y = rows.iter().map(|r| r.difference).fold(f64::INFINITY, f64::min);
        let max_y = rows
            .iter()
            .map(|r| r.difference)
            .fold(f64::NEG_INFINITY, f64::max);

        let bands = vec![
            Band {
                kind: BandKind::Under,
                y0: 0.0,
                y1: min_y - BAND_PAD,
            },
            Band {
                kind: BandKind::Over,
                y0: 0.0,
                y1: max_y + BAND_PAD,
            },
        ];

        // Aggregated careers span more matches, so labels sit further in.
        let (dx, dy) = match mode {
            ViewMode::Aggregated => (18.0, 3.0),
            ViewMode::PerSeason => (4.0, 1.0),
        };
        let ann_x = min_x as f64 + dx;
        let annotations = vec![
            Annotation {
                kind: BandKind::Over,
                text: OVER_LABEL,
                x: ann_x,
                y: max_y - dy,
            },
            Annotation {
                kind: BandKind::Under,
                text: UNDER_LABEL,
                x: ann_x,
                y: min_y + dy,
            },
        ];

        let y_lo = bands.iter().map(Band::low).fold(0.0, f64::min);
        let y_hi = bands.iter().map(Band::high).fold(0.0, f64::max);

        Self {
            mode,
            points,
            bands,
            annotations,
            x_bounds: [0.0, max_x as f64 + 1.0],
            y_bounds: [y_lo, y_hi],
        }
    }

    pub fn overachievers(&self) -> usize {
        self.points.iter().filter(|p| p.difference > 0.0).count()
    }

    pub fn underachievers(&self) -> usize {
        self.points.iter().filter(|p| p.difference < 0.0).count()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
