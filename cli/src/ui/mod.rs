mod chart;
mod help;
mod status_bar;
mod summary;
pub mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::{App, AppView};
use crate::theme::ThemeColors;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Rows for the summary panel: borders plus five text lines.
const SUMMARY_HEIGHT: u16 = 7;
const CHART_MIN: u16 = 8;

pub fn render(frame: &mut Frame, app: &App) {
    let theme = ThemeColors::default();
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(SUMMARY_HEIGHT + CHART_MIN),
            Constraint::Length(1),
        ])
        .split(area);

    status_bar::render_title_bar(frame, outer_chunks[0], app, &theme);
    status_bar::render_status_bar(frame, outer_chunks[2], app, &theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(SUMMARY_HEIGHT), Constraint::Min(CHART_MIN)])
        .split(outer_chunks[1]);

    summary::render(frame, chunks[0], app, &theme);
    chart::render(frame, chunks[1], app, &theme);

    match app.view {
        AppView::Help => help::render_help(frame, app, &theme),
        AppView::Main => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use chrono::{Duration as ChronoDuration, Utc};
    use heatwatch_energy::Trigger;
    use ratatui::{backend::TestBackend, Terminal};
    use rusqlite::Connection;

    use crate::config::UserConfig;
    use crate::data::SqliteSource;

    fn app_with_readings(dir: &Path, rows: &[(i64, f64)]) -> App {
        let path = dir.join("ct.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE housectdata (DateTime TEXT NOT NULL, ct3 REAL);")
            .unwrap();
        for (minutes_ago, ct3) in rows {
            let ts = (Utc::now() - ChronoDuration::minutes(*minutes_ago))
                .naive_utc()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string();
            conn.execute(
                "INSERT INTO housectdata (DateTime, ct3) VALUES (?1, ?2)",
                rusqlite::params![ts, ct3],
            )
            .unwrap();
        }
        let config = UserConfig {
            database: path.clone(),
            ..UserConfig::default()
        };
        let source = SqliteSource::open(&path, config.table_layout()).unwrap();
        App::with_source(config, source)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn renders_summary_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_readings(dir.path(), &[(120, 300.0), (60, 300.0), (0, 450.0)]);
        app.refresh(Trigger::Tick);

        let text = screen(&app);
        assert!(text.contains("CT3 readings"));
        assert!(text.contains("Number of Days"));
        assert!(text.contains("Total kWh:"));
        assert!(text.contains("Last updated:"));
    }

    #[test]
    fn renders_before_first_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_with_readings(dir.path(), &[]);

        let text = screen(&app);
        assert!(text.contains("Total kWh: 0.00  Total Cost: $0.00"));
        assert!(text.contains("No readings"));
    }

    #[test]
    fn help_overlay_lists_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_readings(dir.path(), &[]);
        app.view = AppView::Help;

        let text = screen(&app);
        assert!(text.contains("Refresh now"));
    }
}
