mod charts;
mod export;
mod help;
mod state;

use crate::aggregate::ViewMode;
use crate::cli::Cli;
use crate::dashboard::{Dashboard, DashboardConfig, DashboardEvent};
use crate::data::CoachData;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Terminal,
};
use state::{Focus, UiState, TAB_COUNT, TAB_HELP, TAB_SCATTER, TAB_TABLE, TAB_TRAJECTORY};
use std::{io, time::Duration};

const MAX_STATUS_LINES: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

pub fn run(args: &Cli, data: &CoachData, cfg: DashboardConfig) -> Result<()> {
    let dashboard = Dashboard::new(data, cfg);
    let loaded_at = crate::report::display_stamp(crate::report::now_local());
    let mut state = UiState::new(data, dashboard, loaded_at);
    state.info = format!(
        "Loaded {} coach-seasons and {} match rows from {}",
        data.summary().len(),
        data.matches().len(),
        args.data_dir.display()
    );
    // UiState is owned by this loop only; the data is borrowed read-only throughout.

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let res = match Terminal::new(backend).context("create terminal") {
        Ok(mut terminal) => {
            terminal.clear().ok();
            event_loop(&mut terminal, data, &mut state)
        }
        Err(e) => Err(e),
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data: &CoachData,
    state: &mut UiState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal
                .draw(|f| draw(f.area(), f, state))
                .context("draw frame")?;
            dirty = false;
        }

        // Redraw on resize as well as on key presses.
        if event::poll(Duration::from_millis(250)).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(k)) => {
                    if k.kind != KeyEventKind::Press {
                        continue;
                    }
                    if handle_key(state, data, k) == KeyOutcome::Quit {
                        tracing::info!("quit requested");
                        return Ok(());
                    }
                    dirty = true;
                }
                Ok(Event::Resize(_, _)) => dirty = true,
                Ok(_) => {}
                Err(e) => return Err(e).context("read terminal event"),
            }
        }
    }
}

fn handle_key(state: &mut UiState, data: &CoachData, k: KeyEvent) -> KeyOutcome {
    match (k.modifiers, k.code) {
        (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            return KeyOutcome::Quit;
        }
        (_, KeyCode::Tab) => {
            state.tab = (state.tab + 1) % TAB_COUNT;
        }
        (_, KeyCode::BackTab) => {
            state.tab = (state.tab + TAB_COUNT - 1) % TAB_COUNT;
        }
        (_, KeyCode::Char('?')) => {
            state.tab = TAB_HELP;
        }
        (_, KeyCode::Char('f')) => {
            state.focus = state.focus.next();
        }
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => move_cursor(state, data, -1),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => move_cursor(state, data, 1),
        (_, KeyCode::PageUp) => move_cursor(state, data, -10),
        (_, KeyCode::PageDown) => move_cursor(state, data, 10),
        (_, KeyCode::Char(' ')) | (_, KeyCode::Enter) => match state.focus {
            Focus::Leagues => {
                if let Some(l) = state.league_options.get(state.league_cursor).cloned() {
                    apply(state, data, DashboardEvent::ToggleLeague(l));
                }
            }
            Focus::Seasons => {
                if let Some(s) = state.season_options.get(state.season_cursor).cloned() {
                    apply(state, data, DashboardEvent::ToggleSeason(s));
                }
            }
            Focus::Main => {}
        },
        (_, KeyCode::Char('a')) => match state.focus {
            Focus::Seasons => apply(state, data, DashboardEvent::SelectAllSeasons),
            _ => apply(state, data, DashboardEvent::SelectAllLeagues),
        },
        (_, KeyCode::Char('n')) => match state.focus {
            Focus::Seasons => apply(state, data, DashboardEvent::ClearSeasons),
            _ => apply(state, data, DashboardEvent::ClearLeagues),
        },
        (_, KeyCode::Char('b')) => {
            apply(state, data, DashboardEvent::ResetLeagues);
            state.info = "Leagues reset to the big five".into();
        }
        (_, KeyCode::Char('g')) => match state.tab {
            TAB_TABLE => {
                let m = state.dashboard.table_mode().toggled();
                apply(state, data, DashboardEvent::SetTableMode(m));
                state.info = format!("Table: {}", m.label());
            }
            TAB_SCATTER => {
                let m = state.dashboard.scatter_mode().toggled();
                apply(state, data, DashboardEvent::SetScatterMode(m));
                state.info = format!("Scatter: {}", m.label());
            }
            _ => {}
        },
        (_, KeyCode::Char('o')) => {
            let key = state.dashboard.sort().key.next();
            apply(state, data, DashboardEvent::SetSortKey(key));
            state.info = format!("Sorted by {}", key.label());
        }
        (_, KeyCode::Char('r')) => {
            apply(state, data, DashboardEvent::ReverseSort);
        }
        (_, KeyCode::Char('e')) => match export::export_table_csv(state.dashboard.table()) {
            Ok(p) => {
                state.last_exported_path = Some(p.to_string_lossy().to_string());
                state.info = format!("Exported CSV: {} (press 'y' to copy path)", p.display());
            }
            Err(e) => state.info = format!("CSV export failed: {e:#}"),
        },
        (_, KeyCode::Char('x')) => match export::export_report_json(&state.dashboard) {
            Ok(p) => {
                state.last_exported_path = Some(p.to_string_lossy().to_string());
                state.info = format!("Exported JSON: {} (press 'y' to copy path)", p.display());
            }
            Err(e) => state.info = format!("JSON export failed: {e:#}"),
        },
        (_, KeyCode::Char('y')) => {
            if let Some(path) = state.last_exported_path.clone() {
                state.info = match export::copy_to_clipboard(&path) {
                    Ok(()) => format!("✓ Copied to clipboard: {path}"),
                    Err(e) => format!("Clipboard copy failed: {e:#}"),
                };
            } else {
                state.info = "No exported file path to copy. Export a file first (e/x)".into();
            }
        }
        _ => {}
    }
    KeyOutcome::Continue
}

fn apply(state: &mut UiState, data: &CoachData, ev: DashboardEvent) {
    state.dashboard.apply(data, ev);
    state.clamp_cursors();
}

fn move_cursor(state: &mut UiState, data: &CoachData, delta: isize) {
    fn step(cur: usize, len: usize, delta: isize) -> usize {
        if len == 0 {
            return 0;
        }
        cur.saturating_add_signed(delta).min(len - 1)
    }

    match state.focus {
        Focus::Leagues => {
            state.league_cursor = step(state.league_cursor, state.league_options.len(), delta);
        }
        Focus::Seasons => {
            state.season_cursor = step(state.season_cursor, state.season_options.len(), delta);
        }
        Focus::Main => match state.tab {
            TAB_TABLE => {
                state.table_selected =
                    step(state.table_selected, state.dashboard.table().len(), delta);
            }
            TAB_SCATTER => {
                state.scatter_selected = step(
                    state.scatter_selected,
                    state.dashboard.scatter().points.len(),
                    delta,
                );
            }
            TAB_TRAJECTORY => {
                let options = state.dashboard.coach_options();
                let cur = state.dashboard.coach_index().unwrap_or(0);
                let next = step(cur, options.len(), delta);
                let next_id = options.get(next).cloned();
                if let Some(id) = next_id {
                    apply(state, data, DashboardEvent::SelectCoach(id));
                }
            }
            _ => {}
        },
    }
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    // Long export paths and load errors wrap instead of being cut off.
    let mut status_lines: Vec<Line<'static>> = Vec::new();
    state::push_wrapped_status_kv(&mut status_lines, "Info", &state.info, area.width);
    let status_height = (status_lines.len() as u16).clamp(1, MAX_STATUS_LINES) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(status_height),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from("Table"),
        Line::from("Scatter"),
        Line::from("Trajectory"),
        Line::from("Help"),
    ])
    .select(state.tab)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Plus/Minus Rating of Coaches"),
    )
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)].as_ref())
        .split(chunks[1]);

    draw_sidebar(body[0], f, state);
    match state.tab {
        TAB_TABLE => draw_table(body[1], f, state),
        TAB_SCATTER => charts::draw_scatter(body[1], f, state),
        TAB_TRAJECTORY => charts::draw_trajectory(body[1], f, state),
        _ => help::draw_help(body[1], f),
    }

    let status = Paragraph::new(status_lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);
}

fn draw_sidebar(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6),
                Constraint::Percentage(50),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    let dash = &state.dashboard;
    let mut header: Vec<Line<'static>> = Vec::new();
    state::push_wrapped_status_kv(&mut header, "Last updated", &state.last_updated, area.width);
    header.push(Line::from(vec![
        Span::styled("Table: ", Style::default().fg(Color::Gray)),
        Span::raw(dash.table_mode().label()),
    ]));
    header.push(Line::from(vec![
        Span::styled("Scatter: ", Style::default().fg(Color::Gray)),
        Span::raw(dash.scatter_mode().label()),
    ]));
    f.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title("Filters")),
        parts[0],
    );

    let sel = dash.selection();
    draw_option_list(
        parts[1],
        f,
        "League",
        &state.league_options,
        |o| sel.leagues.contains(o),
        state.league_cursor,
        state.focus == Focus::Leagues,
    );
    draw_option_list(
        parts[2],
        f,
        "Season",
        &state.season_options,
        |o| sel.seasons.contains(o),
        state.season_cursor,
        state.focus == Focus::Seasons,
    );
}

fn draw_option_list(
    area: Rect,
    f: &mut ratatui::Frame,
    title: &str,
    options: &[String],
    is_selected: impl Fn(&str) -> bool,
    cursor: usize,
    focused: bool,
) {
    let visible = area.height.saturating_sub(2) as usize;
    let offset = state::scroll_offset(cursor, visible);
    let chosen = options.iter().filter(|o| is_selected(o.as_str())).count();

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, o)| {
            let on = is_selected(o.as_str());
            let mark = if on { "[x] " } else { "[ ] " };
            let style = if focused && i == cursor {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if on {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{mark}{o}"), style))
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("{title} ({chosen}/{})", options.len()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_table(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let dash = &state.dashboard;
    let rows = dash.table();
    let mode = dash.table_mode();
    let sort = dash.sort();
    let title = format!(
        "Coaches: {} ({} rows, sorted by {} {})",
        mode.label(),
        rows.len(),
        sort.key.label(),
        if sort.descending { "↓" } else { "↑" }
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    if rows.is_empty() {
        let empty = Paragraph::new("No coaches match the current filters.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let (headers, widths): (Vec<&str>, Vec<Constraint>) = match mode {
        ViewMode::PerSeason => (
            vec![
                "Name",
                "League",
                "Season",
                "Coach_ID",
                "Matches",
                "Expectation",
                "Result",
                "Difference",
            ],
            vec![
                Constraint::Min(18),
                Constraint::Length(20),
                Constraint::Length(10),
                Constraint::Min(18),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(11),
            ],
        ),
        ViewMode::Aggregated => (
            vec!["Name", "Matches", "Expectation", "Result", "Difference"],
            vec![
                Constraint::Min(24),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(8),
                Constraint::Length(11),
            ],
        ),
    };

    // Borders and header row
    let visible = area.height.saturating_sub(3) as usize;
    let offset = state::scroll_offset(state.table_selected, visible);
    let focused = state.focus == Focus::Main;

    let body: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, r)| {
            let diff_color = if r.difference >= 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            let mut cells = vec![Cell::from(r.name.clone())];
            if mode == ViewMode::PerSeason {
                cells.push(Cell::from(r.league.clone().unwrap_or_default()));
                cells.push(Cell::from(r.season.clone().unwrap_or_default()));
                cells.push(Cell::from(r.coach_id.clone().unwrap_or_default()));
            }
            cells.push(Cell::from(format!("{:>7}", r.matches)));
            cells.push(Cell::from(format!("{:>11.1}", r.expectation)));
            cells.push(Cell::from(format!("{:>7.1}", r.result)));
            cells.push(
                Cell::from(format!("{:>10.1}", r.difference))
                    .style(Style::default().fg(diff_color)),
            );
            let row = Row::new(cells);
            if focused && i == state.table_selected {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(headers.into_iter().map(Cell::from))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let table = Table::new(body, widths).header(header).block(block);
    f.render_widget(table, area);
}
