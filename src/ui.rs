use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::metric::Metric;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Widget},
    Frame,
};

/// Screen regions: metric bar, chart, table, status bar
struct Panes {
    metrics: Rect,
    chart: Rect,
    table: Rect,
    status: Rect,
}

fn panes(area: Rect) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Metric selector
            Constraint::Min(3),    // Chart + table
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
        .split(rows[1]);

    Panes {
        metrics: rows[0],
        chart: columns[0],
        table: columns[1],
        status: rows[2],
    }
}

fn chart_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Where the Braille canvas lands for a terminal of the given size
pub fn chart_canvas_area(area: Rect) -> Rect {
    chart_block().inner(panes(area).chart)
}

pub fn render(frame: &mut Frame, app: &App) {
    let panes = panes(frame.area());
    render_metric_bar(frame, app, panes.metrics);
    render_chart(frame, app, panes.chart);
    render_table(frame, app, panes.table);
    render_status_bar(frame, app, panes.status);
}

fn render_metric_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(" Metric ", Style::default().fg(Color::DarkGray))];
    for (i, metric) in Metric::ALL.into_iter().enumerate() {
        let selected = app.metric == Some(metric);
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}:{} ", i + 1, metric.label()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let title = app
        .metric
        .map_or_else(|| " Bubble Map ".to_string(), |m| format!(" {} ", m.header()));
    let block = chart_block().title(Span::styled(
        title,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (w, h) = (inner.width as usize, inner.height as usize);
    let mut coast = BrailleCanvas::new(w, h);
    let mut viewport = app.viewport.clone();
    viewport.width = coast.dot_width();
    viewport.height = coast.dot_height();

    app.backdrop.draw(&mut coast, &viewport);

    let mut bubbles = BrailleCanvas::new(w, h);
    let mut focus = BrailleCanvas::new(w, h);
    if let Some(chart) = &app.chart {
        chart.draw(&mut bubbles, &viewport);
        chart.draw_point(&mut focus, &viewport, app.hovered.unwrap_or(app.selected_row));
    }

    frame.render_widget(
        ChartWidget {
            layers: [
                (coast, Color::DarkGray),
                (bubbles, Color::Green),
                (focus, Color::Yellow),
            ],
        },
        inner,
    );

    if let Some(tooltip) = app.tooltip() {
        let width = tooltip.title.chars().count().max(tooltip.label.chars().count()) as u16 + 4;
        let popup = Rect {
            x: inner.x,
            y: inner.y,
            width: width.min(inner.width),
            height: 4.min(inner.height),
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(tooltip.title, Style::default().add_modifier(Modifier::BOLD))),
                Line::from(tooltip.label),
            ])
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Yellow))),
            popup,
        );
    }
}

/// Braille layers painted back to front, each in its own colour
struct ChartWidget {
    layers: [(BrailleCanvas, Color); 3],
}

impl Widget for ChartWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (canvas, color) in &self.layers {
            for (col, row, ch) in canvas.glyphs() {
                if col >= area.width as usize || row >= area.height as usize {
                    continue;
                }
                let (x, y) = (area.x + col as u16, area.y + row as u16);
                buf[(x, y)].set_char(ch).set_fg(*color);
            }
        }
    }
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" Data ({}) ", app.table.len()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    if app.table.headers.is_empty() {
        frame.render_widget(Paragraph::new(" No data").block(block), area);
        return;
    }

    let widths: Vec<Constraint> = if app.table.headers.len() == 2 {
        vec![Constraint::Fill(1), Constraint::Length(16)]
    } else {
        vec![
            Constraint::Fill(2),
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Length(15),
        ]
    };

    let header = Row::new(app.table.headers.iter().cloned())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let rows = app.table.rows.iter().map(|cells| Row::new(cells.iter().cloned()));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow));

    let mut state = TableState::default().with_selected(Some(app.selected_row));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled(" Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" (", dim),
        Span::styled(app.lod_level(), Style::default().fg(Color::Magenta)),
        Span::styled(") ", dim),
        Span::styled(
            if app.backdrop.visible { "[C]oast " } else { "[c]oast " },
            Style::default().fg(if app.backdrop.visible { Color::Green } else { Color::DarkGray }),
        ),
        Span::styled("| ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
    ];

    match &app.error {
        Some(message) => {
            spans.push(Span::styled(" | ", dim));
            spans.push(Span::styled(message.clone(), Style::default().fg(Color::Red)));
        }
        None => spans.push(Span::styled(
            " | 1-6/tab:metric hjkl:pan +/-:zoom ↑↓:row r:reset q:quit",
            dim,
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
