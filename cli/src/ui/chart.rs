use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::ThemeColors;

/// Headroom above the peak so the trace never touches the border.
const Y_HEADROOM: f64 = 1.1;

pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &ThemeColors) {
    let peak = app.snapshot.as_ref().and_then(|s| s.sampled.peak());

    let mut title = vec![Span::styled(
        " CT3 readings ",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(peak) = peak {
        title.push(Span::styled(format!("peak {:.0} ", peak), theme.muted_style()));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .style(Style::default().bg(theme.bg));

    let Some(sampled) = app.snapshot.as_ref().map(|s| &s.sampled) else {
        render_empty(frame, area, block, theme);
        return;
    };
    let Some((first, last)) = sampled.time_bounds() else {
        render_empty(frame, area, block, theme);
        return;
    };

    let data = sampled.plot_points();
    let (min_x, max_x) = x_bounds(&data);
    let max_y = y_max(peak.unwrap_or(0.0));

    let dataset = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.graph_line))
        .data(&data);

    let mid = first + (last - first) / 2;
    let x_labels = vec![
        Span::styled(time_label(first, sampled.timezone), theme.muted_style()),
        Span::styled(time_label(mid, sampled.timezone), theme.muted_style()),
        Span::styled(time_label(last, sampled.timezone), theme.muted_style()),
    ];

    let y_labels = vec![
        Span::styled("0", theme.muted_style()),
        Span::styled(format!("{:.0}", max_y / 2.0), theme.muted_style()),
        Span::styled(format!("{:.0}", max_y), theme.muted_style()),
    ];

    let x_axis = Axis::default()
        .style(theme.muted_style())
        .bounds([min_x, max_x])
        .labels(x_labels);

    let y_axis = Axis::default()
        .style(theme.muted_style())
        .bounds([0.0, max_y])
        .labels(y_labels);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .style(Style::default().bg(theme.bg));

    frame.render_widget(chart, area);
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block, theme: &ThemeColors) {
    let message = Paragraph::new(Span::styled("No readings in window", theme.muted_style()))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(message, area);
}

/// X bounds in unix seconds. A single point gets a one-minute span.
fn x_bounds(data: &[(f64, f64)]) -> (f64, f64) {
    let min = data.first().map_or(0.0, |p| p.0);
    let max = data.last().map_or(0.0, |p| p.0);
    if max > min {
        (min, max)
    } else {
        (min - 30.0, min + 30.0)
    }
}

fn y_max(peak: f64) -> f64 {
    if peak > 0.0 {
        peak * Y_HEADROOM
    } else {
        1.0
    }
}

fn time_label(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn single_point_gets_a_span() {
        assert_eq!(x_bounds(&[(100.0, 5.0)]), (70.0, 130.0));
        assert_eq!(x_bounds(&[(100.0, 5.0), (200.0, 5.0)]), (100.0, 200.0));
    }

    #[test]
    fn flat_zero_series_still_has_a_y_range() {
        assert_eq!(y_max(0.0), 1.0);
        assert!((y_max(400.0) - 440.0).abs() < 1e-9);
    }

    #[test]
    fn labels_use_display_zone() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 0).unwrap();
        assert_eq!(time_label(at, chrono_tz::America::New_York), "01-15 12:30");
    }
}
