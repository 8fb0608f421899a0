use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::input::keys;
use crate::theme::ThemeColors;

use super::utils::format_duration;

pub fn render_title_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let version = super::VERSION;

    let left_spans = vec![
        Span::styled(" heatwatch ", theme.accent_style()),
        Span::styled(format!("v{}", version), theme.muted_style()),
    ];

    let db_name = app
        .source()
        .path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| app.source().path().display().to_string());
    let right_text = format!("{} · {} ", db_name, app.config.channel);

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, theme.muted_style()));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let left_hints: [(&str, &str); 4] = [
        (keys::DAYS, "days"),
        (keys::REFRESH, "refresh"),
        (keys::HELP, "help"),
        (keys::QUIT, "quit"),
    ];

    let mut left_spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in left_hints.iter().enumerate() {
        if i > 0 {
            left_spans.push(Span::styled(" │ ", theme.border_style()));
        }
        left_spans.push(Span::styled(*key, theme.accent_style()));
        left_spans.push(Span::styled(format!(" {}", desc), theme.muted_style()));
    }

    let (status, status_color) = if app.last_error.is_some() {
        ("error", theme.danger)
    } else {
        ("ok", theme.success)
    };

    let right_spans: Vec<Span> = vec![
        Span::styled("refresh every ", theme.muted_style()),
        Span::styled(format_duration(app.refresh_interval.as_secs()), theme.fg_style()),
        Span::styled(" │ ", theme.border_style()),
        Span::styled(status, Style::default().fg(status_color)),
        Span::raw(" "),
    ];

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);

    left_spans.push(Span::raw(" ".repeat(padding)));
    left_spans.extend(right_spans);

    let bar = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(theme.bg))
        .alignment(Alignment::Left);

    frame.render_widget(bar, area);
}
