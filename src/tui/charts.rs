use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::state::{self, Focus, UiState};
use crate::scatter::{BandKind, ScatterPlot};

const POINT_COLOR: Color = Color::Rgb(0, 76, 255);
const OVER_FILL: Color = Color::Rgb(0, 70, 0);
const UNDER_FILL: Color = Color::Rgb(80, 0, 0);

/// Helper function to draw a line on a canvas
pub fn draw_line(
    ctx: &mut ratatui::widgets::canvas::Context,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
) {
    ctx.draw(&CanvasLine {
        x1,
        y1,
        x2,
        y2,
        color,
    });
}

/// Inputs for a line chart with a one-line metrics footer inside the same border.
pub struct ChartRenderParams<'a> {
    pub area: Rect,
    pub datasets: Vec<Dataset<'a>>,
    pub x_axis: Axis<'a>,
    pub y_axis: Axis<'a>,
    pub title: Line<'a>,
    pub metrics: Option<Line<'a>>,
}

/// Render a chart with its metrics line inside the same bordered box
pub fn render_chart_with_metrics_inside(f: &mut Frame, params: ChartRenderParams) {
    let ChartRenderParams {
        area,
        datasets,
        x_axis,
        y_axis,
        title,
        metrics,
    } = params;

    let inner = inner_area(area);

    // Split inner area into chart (top) and metrics (bottom)
    let chart_metrics = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)].as_ref())
        .split(inner);

    let chart = Chart::new(datasets).x_axis(x_axis).y_axis(y_axis);
    f.render_widget(chart, chart_metrics[0]);

    if let Some(metrics) = metrics {
        f.render_widget(
            Paragraph::new(metrics).alignment(Alignment::Center),
            chart_metrics[1],
        );
    }

    // Render the border with title around the whole area
    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(block, area);
}

fn inner_area(area: Rect) -> Rect {
    if area.width > 2 && area.height > 2 {
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    } else {
        area
    }
}

pub fn draw_scatter(area: Rect, f: &mut Frame, state: &UiState) {
    let plot = state.dashboard.scatter();
    let title = Line::from(vec![
        Span::raw("Over-/underachievement of expected points ("),
        Span::styled(
            state.dashboard.scatter_mode().label(),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(")"),
    ]);

    if plot.is_empty() {
        let empty = Paragraph::new("No coaches match the current filters.")
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let inner = inner_area(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(inner);

    // Y labels on the left, canvas on the right
    let plot_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Min(0)].as_ref())
        .split(rows[0]);

    let label_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // max
            Constraint::Min(0),    // spacer (fills middle)
            Constraint::Length(1), // min
        ])
        .split(plot_row[0]);
    f.render_widget(
        Paragraph::new(format!("{:>6.1}", plot.y_bounds[1])).style(Style::default().fg(Color::Gray)),
        label_layout[0],
    );
    f.render_widget(
        Paragraph::new(format!("{:>6.1}", plot.y_bounds[0])).style(Style::default().fg(Color::Gray)),
        label_layout[2],
    );

    let selected = state
        .scatter_selected
        .min(plot.points.len().saturating_sub(1));
    let highlight = state.focus == Focus::Main;
    let canvas_height = plot_row[1].height;
    paint_scatter(f, plot_row[1], plot, selected, highlight, canvas_height);

    // X axis labels
    let x_labels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Min(0)].as_ref())
        .split(rows[1]);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{:.0}", plot.x_bounds[0]), Style::default().fg(Color::Gray)),
            Span::raw("  Number of matches  "),
            Span::styled(format!("{:.0}", plot.x_bounds[1]), Style::default().fg(Color::Gray)),
        ]))
        .alignment(Alignment::Center),
        x_labels[1],
    );

    // Stand-in for hover: details of the point under the cursor
    let footer = match plot.points.get(selected) {
        Some(p) if highlight => Line::from(vec![
            Span::styled("▶ ", Style::default().fg(Color::Yellow)),
            Span::raw(p.label.clone()),
            Span::styled("  matches ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{:.0}", p.matches)),
            Span::styled("  diff ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:+.1}", p.difference),
                Style::default().fg(if p.difference >= 0.0 {
                    Color::Green
                } else {
                    Color::Red
                }),
            ),
        ]),
        _ => Line::from(vec![
            Span::raw(format!("{} points  ", plot.points.len())),
            Span::styled(
                format!("{} over", plot.overachievers()),
                Style::default().fg(Color::Green),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("{} under", plot.underachievers()),
                Style::default().fg(Color::Red),
            ),
        ]),
    };
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), rows[2]);

    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(block, area);
}

fn paint_scatter(
    f: &mut Frame,
    area: Rect,
    plot: &ScatterPlot,
    selected: usize,
    highlight: bool,
    rows: u16,
) {
    let [x0, x1] = plot.x_bounds;
    let [y0, y1] = plot.y_bounds;
    // Braille cells are 4 dots tall; hatch every other dot row.
    let dots = (f64::from(rows.max(1)) * 4.0).max(1.0);
    let hatch = ((y1 - y0) / dots * 2.0).max(f64::EPSILON);

    let coords: Vec<(f64, f64)> = plot.points.iter().map(|p| (p.matches, p.difference)).collect();
    let current: Vec<(f64, f64)> = if highlight {
        coords.get(selected).copied().into_iter().collect()
    } else {
        Vec::new()
    };

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([x0, x1])
        .y_bounds([y0, y1])
        .paint(|ctx| {
            for band in &plot.bands {
                let color = match band.kind {
                    BandKind::Over => OVER_FILL,
                    BandKind::Under => UNDER_FILL,
                };
                let mut y = band.low();
                while y <= band.high() {
                    draw_line(ctx, x0, y, x1, y, color);
                    y += hatch;
                }
            }
            ctx.layer();

            draw_line(ctx, x0, 0.0, x1, 0.0, Color::White);
            ctx.draw(&Points {
                coords: &coords,
                color: POINT_COLOR,
            });
            if !current.is_empty() {
                ctx.layer();
                ctx.draw(&Points {
                    coords: &current,
                    color: Color::Yellow,
                });
            }

            for ann in &plot.annotations {
                let color = match ann.kind {
                    BandKind::Over => Color::Green,
                    BandKind::Under => Color::Red,
                };
                ctx.print(ann.x, ann.y, Line::styled(ann.text, Style::default().fg(color)));
            }
        });
    f.render_widget(canvas, area);
}

pub fn draw_trajectory(area: Rect, f: &mut Frame, state: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(36)].as_ref())
        .split(area);

    draw_coach_list(cols[1], f, state);

    let Some(t) = state.dashboard.trajectory() else {
        let msg = format!(
            "No coach-season has at least {} recorded matches.",
            state.dashboard.min_matches()
        );
        let empty = Paragraph::new(msg).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tracking performance"),
        );
        f.render_widget(empty, cols[0]);
        return;
    };

    let [x0, x1] = t.x_bounds();
    let [y0, y1] = t.y_bounds();
    let baseline_points = [(x0, t.baseline), (x1, t.baseline)];

    let datasets = vec![
        Dataset::default()
            .name("Expected points at season start")
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::DarkGray))
            .data(&baseline_points),
        Dataset::default()
            .name(t.coach_id.as_str())
            .graph_type(GraphType::Line)
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::White))
            .data(&t.points),
    ];

    let x_axis = Axis::default()
        .title("Match")
        .style(Style::default().fg(Color::Gray))
        .bounds([x0, x1])
        .labels(vec![
            Span::raw(format!("{x0:.0}")),
            Span::raw(format!("{:.0}", (x0 + x1) / 2.0)),
            Span::raw(format!("{x1:.0}")),
        ]);
    let y_axis = Axis::default()
        .title("Updated expected points")
        .style(Style::default().fg(Color::Gray))
        .bounds([y0, y1])
        .labels(vec![
            Span::raw(format!("{y0:.0}")),
            Span::raw(format!("{:.0}", t.baseline)),
            Span::raw(format!("{y1:.0}")),
        ]);

    let drift = t.drift().unwrap_or(0.0);
    let drift_color = if drift >= 0.0 { Color::Green } else { Color::Red };
    let metrics = Line::from(vec![
        Span::styled("start", Style::default().fg(Color::Gray)),
        Span::raw(format!(" {:.1} ", t.baseline)),
        Span::styled("latest", Style::default().fg(Color::Gray)),
        Span::raw(format!(" {:.1} ", t.last_points().unwrap_or(t.baseline))),
        Span::styled("change", Style::default().fg(Color::Gray)),
        Span::styled(format!(" {drift:+.1} "), Style::default().fg(drift_color)),
        Span::styled("matches", Style::default().fg(Color::Gray)),
        Span::raw(format!(" {}", t.points.len())),
    ]);

    render_chart_with_metrics_inside(
        f,
        ChartRenderParams {
            area: cols[0],
            datasets,
            x_axis,
            y_axis,
            title: Line::from(vec![
                Span::raw("Tracking performance: "),
                Span::styled(t.coach_id.as_str(), Style::default().fg(Color::Yellow)),
            ]),
            metrics: Some(metrics),
        },
    );
}

fn draw_coach_list(area: Rect, f: &mut Frame, state: &UiState) {
    let options = state.dashboard.coach_options();
    let current = state.dashboard.coach_index().unwrap_or(0);
    let visible = area.height.saturating_sub(2) as usize;
    let offset = state::scroll_offset(current, visible);
    let focused = state.focus == Focus::Main;

    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, id)| {
            if i == current {
                let style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Yellow)
                };
                Line::from(Span::styled(id.as_str(), style))
            } else {
                Line::from(id.as_str())
            }
        })
        .collect();

    let title = format!("Coach_ID ({}/{})", current + 1, options.len());
    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(Paragraph::new(lines).block(block), area);
}
