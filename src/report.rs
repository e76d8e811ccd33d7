//! Serializable snapshot of every dashboard view, used by `--json` and JSON export.

use crate::aggregate::{TableSort, ViewMode};
use crate::dashboard::Dashboard;
use crate::filter::Selection;
use crate::model::CoachRow;
use crate::scatter::ScatterPlot;
use crate::trajectory::Trajectory;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct DashboardReport<'a> {
    pub generated_at: String,
    pub selection: &'a Selection,
    pub table_mode: ViewMode,
    pub scatter_mode: ViewMode,
    pub sort: TableSort,
    pub min_matches: usize,
    pub table: &'a [CoachRow],
    pub scatter: &'a ScatterPlot,
    pub coach_options: &'a [String],
    pub trajectory: Option<&'a Trajectory>,
}

impl<'a> DashboardReport<'a> {
    pub fn new(dash: &'a Dashboard) -> Self {
        Self {
            generated_at: now_local()
                .format(&Rfc3339)
                .unwrap_or_else(|_| String::from("unknown")),
            selection: dash.selection(),
            table_mode: dash.table_mode(),
            scatter_mode: dash.scatter_mode(),
            sort: dash.sort(),
            min_matches: dash.min_matches(),
            table: dash.table(),
            scatter: dash.scatter(),
            coach_options: dash.coach_options(),
            trajectory: dash.trajectory(),
        }
    }
}

/// Local time if the offset can be determined, UTC otherwise.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Human-readable stamp such as "Dec 17, 2022 09:30 PM".
pub fn display_stamp(t: OffsetDateTime) -> String {
    let fmt = format_description!("[month repr:short] [day], [year] [hour repr:12]:[minute] [period]");
    t.format(fmt).unwrap_or_else(|_| t.to_string())
}

/// Stamp safe to embed in a file name, such as "20221217-213000".
pub fn file_stamp(t: OffsetDateTime) -> String {
    let fmt = format_description!("[year][month][day]-[hour][minute][second]");
    t.format(fmt).unwrap_or_else(|_| String::from("export"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::sample_data;
    use crate::dashboard::DashboardConfig;
    use time::macros::datetime;

    #[test]
    fn stamps_format_as_expected() {
        let t = datetime!(2022-12-17 21:30:05 UTC);
        assert_eq!(display_stamp(t), "Dec 17, 2022 09:30 PM");
        assert_eq!(file_stamp(t), "20221217-213005");
    }

    #[test]
    fn report_serializes_all_views() {
        let data = sample_data();
        let dash = Dashboard::new(&data, DashboardConfig::defaults_for(&data));
        let v = serde_json::to_value(DashboardReport::new(&dash)).unwrap();
        assert_eq!(v["table"].as_array().map(|a| a.len()), Some(4));
        assert_eq!(v["table"][0]["Name"], "Alpha");
        assert_eq!(v["table_mode"], "PerSeason");
        assert_eq!(v["sort"]["key"], "Difference");
        assert_eq!(v["trajectory"]["coach_id"], "Alpha-United-2021");
        assert_eq!(v["scatter"]["points"].as_array().map(|a| a.len()), Some(4));
        assert_eq!(v["selection"]["leagues"].as_array().map(|a| a.len()), Some(5));
    }
}
