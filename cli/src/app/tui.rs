//! TUI (Terminal User Interface) runtime loop.
//!
//! This module contains the terminal setup, event loop, and teardown
//! logic for running the dashboard.

use std::io;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{info, trace};

use heatwatch_energy::Trigger;

use crate::config::UserConfig;
use crate::input;
use crate::ui;

use super::App;

/// Sets up the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen buffer.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restores the terminal to its normal state.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Entry point for running the dashboard.
///
/// The database is opened before the terminal is touched so a bad path is
/// reported on a normal screen.
pub fn run_tui(user_config: UserConfig) -> Result<()> {
    let app = App::new(user_config)?;
    let mut terminal = setup_terminal()?;
    let result = run_tui_loop(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

/// The main TUI event loop.
///
/// Refreshes on the timer and whenever an action queues one, redraws only
/// when something changed, and runs until the user quits.
fn run_tui_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let mut needs_redraw = true;
    let mut last_tick = Instant::now();
    let mut tick_count: u64 = 0;

    loop {
        let interval = app.refresh_interval;
        let elapsed = last_tick.elapsed();

        if elapsed >= interval {
            tick_count += 1;
            last_tick = Instant::now();
            app.request_refresh(Trigger::Tick);
        }

        if let Some(trigger) = app.take_pending() {
            let started = Instant::now();
            app.refresh(trigger);
            trace!(
                tick_count,
                trigger = trigger.label(),
                duration_ms = started.elapsed().as_millis() as u64,
                "TUI refresh handled"
            );
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|frame| ui::render(frame, &app))?;
            needs_redraw = false;
        }

        let poll_timeout = interval.saturating_sub(last_tick.elapsed());
        if event::poll(poll_timeout.max(Duration::from_millis(10)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = input::handle_key(&app, key);
                    if !app.handle_action(action) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
    }

    info!(ticks = tick_count, "Dashboard closed");
    Ok(())
}
