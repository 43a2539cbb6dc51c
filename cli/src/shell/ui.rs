use chrono::DateTime;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table, Wrap},
};

use sugarlog_core::models::{APP_TITLE, Notification, PlotView, Severity, TableView};

use super::state::{App, Field, Screen};
use crate::commands::format_level;

const ACCENT: Color = Color::Cyan;
const SERIES: Color = Color::Magenta;

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.size());

    match &app.screen {
        Screen::Form => render_form(f, app, chunks[0]),
        Screen::Table { view, scroll } => render_table(f, view, *scroll, chunks[0]),
        Screen::Plot(plot) => render_plot(f, plot, chunks[0]),
    }
    render_status(f, app, chunks[1]);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(APP_TITLE)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    for (field, row) in Field::ALL.into_iter().zip(rows.iter()) {
        let focused = app.focus == field;
        let border = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(app.field(field)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(field.label())
                .border_style(border),
        );
        f.render_widget(input, *row);

        if focused {
            let typed = u16::try_from(app.field(field).chars().count()).unwrap_or(u16::MAX);
            let x = row.x.saturating_add(1).saturating_add(typed);
            f.set_cursor(x.min(row.right().saturating_sub(2)), row.y + 1);
        }
    }

    let help = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Enter / Ctrl-A", Style::default().fg(ACCENT)),
            Span::raw("  Add Data"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl-V / F2", Style::default().fg(ACCENT)),
            Span::raw("     View Data"),
        ]),
        Line::from(vec![
            Span::styled("Ctrl-P / F3", Style::default().fg(ACCENT)),
            Span::raw("     Plot Data"),
        ]),
        Line::from(vec![
            Span::styled("Tab / Esc", Style::default().fg(ACCENT)),
            Span::raw("       Next field / Quit"),
        ]),
    ]);
    f.render_widget(help, rows[3]);
}

fn render_table(f: &mut Frame, view: &TableView, scroll: usize, area: Rect) {
    let header = Row::new(view.headers.to_vec())
        .style(Style::default().add_modifier(Modifier::BOLD).fg(ACCENT));
    let rows: Vec<Row> = view
        .rows
        .iter()
        .skip(scroll)
        .map(|r| Row::new(vec![r.timestamp.to_string(), format_level(r.level)]))
        .collect();

    let table = Table::new(rows, [Constraint::Length(18), Constraint::Min(10)])
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view.title)
                .border_style(Style::default().fg(ACCENT)),
        );
    f.render_widget(table, area);
}

pub(super) fn render_plot(f: &mut Frame, plot: &PlotView, area: Rect) {
    let data = plot.series();
    let series = Style::default().fg(SERIES);
    let datasets = vec![
        Dataset::default()
            .name(plot.y_label)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(series)
            .data(&data),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(series.add_modifier(Modifier::BOLD))
            .data(&data),
    ];

    let [x0, x1] = plot.x_bounds();
    let [y0, y1] = plot.y_bounds();
    let x_labels = [x0, (x0 + x1) / 2.0, x1]
        .into_iter()
        .map(|x| Span::raw(axis_time_label(x)))
        .collect();
    let y_labels = [y0, (y0 + y1) / 2.0, y1]
        .into_iter()
        .map(|y| Span::raw(format!("{y:.0}")))
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(plot.title)
                .border_style(Style::default().fg(ACCENT)),
        )
        .x_axis(
            Axis::default()
                .title(plot.x_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([x0, x1])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(plot.y_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([y0, y1])
                .labels(y_labels),
        );
    f.render_widget(chart, area);
}

/// Label for a chart x coordinate (Unix seconds).
#[allow(clippy::cast_possible_truncation)]
pub(super) fn axis_time_label(x: f64) -> String {
    DateTime::from_timestamp(x.round() as i64, 0)
        .map(|dt| dt.naive_utc().format("%m-%d-%Y %H:%M").to_string())
        .unwrap_or_default()
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let hint = match app.screen {
        Screen::Form => None,
        Screen::Table { .. } => Some("↑/↓ scroll · Esc back"),
        Screen::Plot(_) => Some("Esc back"),
    };
    let line = match (&app.notice, hint) {
        (Some(n), _) => notice_line(n),
        (None, Some(h)) => Line::from(Span::styled(h, Style::default().fg(Color::DarkGray))),
        (None, None) => Line::from(""),
    };
    let status = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}

fn notice_line(n: &Notification) -> Line<'_> {
    let color = match n.severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    };
    Line::from(vec![
        Span::styled(
            format!("{}: ", n.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(n.message.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use sugarlog_core::service::SugarService;
    use tempfile::TempDir;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_axis_time_label() {
        // 2024-03-01 08:00 UTC
        assert_eq!(axis_time_label(1_709_280_000.0), "03-01-2024 08:00");
    }

    #[test]
    fn test_render_form_shows_labels() {
        let dir = TempDir::new().unwrap();
        let svc = SugarService::new(&dir.path().join("sugarlog.db")).unwrap();
        let app = App::new(svc);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains(APP_TITLE));
        assert!(text.contains("Date (MM-DD-YYYY)"));
        assert!(text.contains("Time (HH:MM 24-hour format)"));
        assert!(text.contains("Add Data"));
    }

    #[test]
    fn test_render_plot_titles() {
        let dir = TempDir::new().unwrap();
        let svc = SugarService::new(&dir.path().join("sugarlog.db")).unwrap();
        svc.add_entry("03-01-2024", "08:00", "95");
        svc.add_entry("03-02-2024", "07:30", "120");
        let sugarlog_core::service::Outcome::Render(plot) = svc.plot_entries() else {
            panic!("expected plot");
        };

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_plot(f, &plot, area);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Blood Sugar Level Monitoring"));
        assert!(text.contains("Date & Time"));
    }
}
