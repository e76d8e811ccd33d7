use crate::dashboard::Dashboard;
use crate::data::CoachData;
use ratatui::{
    style::Color,
    style::Style,
    text::{Line, Span},
};

pub const TAB_TABLE: usize = 0;
pub const TAB_SCATTER: usize = 1;
pub const TAB_TRAJECTORY: usize = 2;
pub const TAB_HELP: usize = 3;
pub const TAB_COUNT: usize = 4;

/// Pane receiving the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Leagues,
    Seasons,
    Main,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Leagues => Focus::Seasons,
            Focus::Seasons => Focus::Main,
            Focus::Main => Focus::Leagues,
        }
    }
}

pub struct UiState {
    pub tab: usize,
    pub focus: Focus,
    pub info: String,
    pub last_updated: String,

    // Filter options as offered in the sidebar
    pub league_options: Vec<String>,
    pub season_options: Vec<String>,
    pub league_cursor: usize,
    pub season_cursor: usize,

    pub table_selected: usize,
    pub scatter_selected: usize,
    pub last_exported_path: Option<String>,

    pub dashboard: Dashboard,
}

impl UiState {
    pub fn new(data: &CoachData, dashboard: Dashboard, last_updated: String) -> Self {
        Self {
            tab: TAB_TABLE,
            focus: Focus::Main,
            info: String::new(),
            last_updated,
            league_options: data.leagues(),
            season_options: data.seasons(),
            league_cursor: 0,
            season_cursor: 0,
            table_selected: 0,
            scatter_selected: 0,
            last_exported_path: None,
            dashboard,
        }
    }

    /// Keep row cursors inside the current views after a filter or mode change.
    pub fn clamp_cursors(&mut self) {
        let rows = self.dashboard.table().len();
        self.table_selected = self.table_selected.min(rows.saturating_sub(1));
        let points = self.dashboard.scatter().points.len();
        self.scatter_selected = self.scatter_selected.min(points.saturating_sub(1));
    }
}

/// First visible index of a scrolled list so that `selected` stays in view.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

pub fn push_wrapped_status_kv(
    out: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    status_area_width: u16,
) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    // Account for borders (2 chars on each side)
    let usable_width = status_area_width.saturating_sub(4).max(1);
    let label_text = format!("{label}:");
    let label_width = label_text.chars().count() as u16;

    let value_chars: Vec<char> = value.chars().collect();
    let mut remaining = value_chars.as_slice();
    let mut first = true;

    while !remaining.is_empty() {
        let line_width = if first {
            usable_width.saturating_sub(label_width + 1).max(1)
        } else {
            usable_width.saturating_sub(2).max(1)
        };

        let chars_to_take = (remaining.len() as u16).min(line_width) as usize;
        let (line_chars, rest) = remaining.split_at(chars_to_take);
        let line_text: String = line_chars.iter().collect();

        if first {
            out.push(Line::from(vec![
                Span::styled(label_text.clone(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(line_text),
            ]));
            first = false;
        } else {
            out.push(Line::from(vec![Span::raw("  "), Span::raw(line_text)]));
        }

        remaining = rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 10), 0);
        assert_eq!(scroll_offset(9, 10), 0);
        assert_eq!(scroll_offset(10, 10), 1);
        assert_eq!(scroll_offset(25, 10), 16);
        assert_eq!(scroll_offset(3, 0), 0);
    }

    #[test]
    fn wrapped_kv_splits_long_values() {
        let mut out = Vec::new();
        push_wrapped_status_kv(&mut out, "Info", "abcdefghijklmnopqrstuvwxyz", 20);
        assert!(out.len() > 1);
        let mut none = Vec::new();
        push_wrapped_status_kv(&mut none, "Info", "   ", 20);
        assert!(none.is_empty());
    }

    #[test]
    fn focus_cycles() {
        assert_eq!(Focus::Leagues.next().next().next(), Focus::Leagues);
    }
}
