use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::{keys, KEY_BINDINGS};
use crate::theme::ThemeColors;

use super::utils::centered_rect;

pub fn render_help(frame: &mut Frame, app: &App, theme: &ThemeColors) {
    let content_height = KEY_BINDINGS.len() as u16 + 12;
    let area = centered_rect(frame.area(), 55, content_height);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .style(Style::default().bg(theme.dialog_bg));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(KEY_BINDINGS.len() as u16 + 1),
            Constraint::Min(1),
        ])
        .margin(1)
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "heatwatch - Heat Pump Energy Monitor",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} on {} · {}",
                app.config.channel,
                app.config.table,
                app.timezone.name()
            ),
            theme.muted_style(),
        )),
    ])
    .centered();

    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|binding| {
            Line::from(vec![
                Span::styled(
                    format!("{:15}", binding.key),
                    Style::default()
                        .fg(theme.highlight)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(binding.description, theme.fg_style()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let notes = vec![
        Line::from(Span::styled(
            "Long windows plot and total every Nth reading.",
            theme.muted_style(),
        )),
        Line::from(Span::styled(
            format!("Press {} or {} to close", keys::HELP, keys::ESC),
            theme.muted_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(notes), chunks[2]);
}
