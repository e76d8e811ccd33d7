use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(format!("{:width$}{what}", "", width = pad)),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("This tool compares the actual points of clubs to the expected points at the"),
        Line::from("start of the season. Over- or underperformance is ascribed to the coaches."),
        Line::from(""),
        Line::from("Keybinds:"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(" / "),
            Span::styled("Ctrl-C", Style::default().fg(Color::Magenta)),
            Span::raw("  Quit"),
        ]),
        key_line("tab", 9, "Switch tabs"),
        key_line("?", 11, "Show this help"),
        key_line("f", 11, "Cycle focus: leagues, seasons, main view"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("↑/↓", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("j/k", Style::default().fg(Color::Magenta)),
            Span::raw("  Move in the focused pane"),
        ]),
        Line::from(""),
        Line::from("Filters:"),
        key_line("space", 7, "Toggle league/season under the cursor"),
        key_line("a", 11, "Select all leagues (or seasons when focused)"),
        key_line("n", 11, "Select none"),
        key_line("b", 11, "Reset leagues to the big five"),
        Line::from(""),
        Line::from("Table and scatter:"),
        key_line("g", 11, "Toggle aggregated numbers for the current tab"),
        key_line("o", 11, "Cycle table sort column"),
        key_line("r", 11, "Reverse sort direction"),
        Line::from(""),
        Line::from("Trajectory:"),
        key_line("↑/↓", 9, "Choose a Coach_ID (coach-club-season)"),
        Line::from(""),
        Line::from("Export:"),
        key_line("e", 11, "Export table as CSV"),
        key_line("x", 11, "Export all views as JSON"),
        key_line("y", 11, "Copy exported path to clipboard"),
    ])
    .wrap(Wrap { trim: false })
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
