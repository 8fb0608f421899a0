use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use heatwatch_energy::{EnergySummary, Lookback, MAX_LOOKBACK_DAYS, MIN_LOOKBACK_DAYS};

use crate::app::App;
use crate::theme::ThemeColors;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let block = Block::default()
        .title(Span::styled(
            " Energy ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(Style::default().bg(theme.bg));

    let summary = app
        .snapshot
        .as_ref()
        .map(|s| s.summary)
        .unwrap_or_default();

    let mut lines = vec![
        days_line(app.days, app.stride(), theme),
        summary_line(&summary, theme),
        Line::from(Span::styled(
            counts_text(app),
            theme.muted_style(),
        )),
        Line::from(Span::styled(
            app.last_updated
                .clone()
                .unwrap_or_else(|| "Waiting for first refresh".to_string()),
            theme.muted_style(),
        )),
    ];

    if let Some(err) = &app.last_error {
        lines.push(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(theme.danger).add_modifier(Modifier::BOLD)),
            Span::styled(err.clone(), Style::default().fg(theme.danger)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn days_line(days: Lookback, stride: usize, theme: &ThemeColors) -> Line<'static> {
    let at_min = days.days() == MIN_LOOKBACK_DAYS;
    let at_max = days.days() == MAX_LOOKBACK_DAYS;
    let arrow = |enabled: bool, symbol: &'static str| {
        if enabled {
            Span::styled(symbol, theme.accent_style())
        } else {
            Span::styled(symbol, theme.border_style())
        }
    };

    Line::from(vec![
        Span::styled("Number of Days: ", theme.muted_style()),
        arrow(!at_min, "◀ "),
        Span::styled(
            days.days().to_string(),
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        arrow(!at_max, " ▶"),
        Span::styled(format!("   every {} reading", ordinal(stride)), theme.muted_style()),
    ])
}

fn summary_line(summary: &EnergySummary, theme: &ThemeColors) -> Line<'static> {
    let value = Style::default().fg(theme.fg).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled("Total kWh: ", theme.muted_style()),
        Span::styled(summary.kwh_label(), value),
        Span::styled("  Total Cost: ", theme.muted_style()),
        Span::styled(summary.cost_label(), value),
    ])
}

fn counts_text(app: &App) -> String {
    match &app.snapshot {
        Some(s) => format!(
            "{} readings since {}, {} plotted",
            s.fetched,
            s.window_start
                .with_timezone(&app.timezone)
                .format("%Y-%m-%d %H:%M %Z"),
            s.sampled.len()
        ),
        None => String::new(),
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(8), "8th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn empty_summary_reads_zero() {
        let line = summary_line(&EnergySummary::default(), &ThemeColors::default());
        assert_eq!(line_text(&line), "Total kWh: 0.00  Total Cost: $0.00");
    }

    #[test]
    fn summary_line_matches_display_text() {
        let summary = EnergySummary::new(0.3, 0.19);
        let line = summary_line(&summary, &ThemeColors::default());
        assert_eq!(line_text(&line), summary.to_string());
        assert_eq!(line_text(&line), "Total kWh: 0.30  Total Cost: $0.06");
    }
}
