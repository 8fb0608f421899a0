//! Action handling methods for App.

use tracing::{debug, info};

use heatwatch_energy::Trigger;

use super::types::{Action, AppView};
use super::App;

impl App {
    /// Main action handler.
    ///
    /// Returns `false` if the application should quit, `true` otherwise.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::None => {}

            Action::ToggleHelp => {
                self.view = match self.view {
                    AppView::Help => AppView::Main,
                    AppView::Main => AppView::Help,
                };
            }

            Action::Refresh => {
                info!("Manual refresh requested");
                self.request_refresh(Trigger::Tick);
            }

            Action::IncreaseDays
            | Action::DecreaseDays
            | Action::IncreaseDaysPage
            | Action::DecreaseDaysPage
            | Action::MinDays
            | Action::MaxDays => {
                self.handle_days_action(action);
            }
        }
        true
    }

    /// Moves the lookback window. Only a real change triggers a reload.
    fn handle_days_action(&mut self, action: Action) {
        let Some(delta) = action.days_delta() else {
            return;
        };

        let next = self.days.step(delta);
        if next == self.days {
            return;
        }

        debug!(from = self.days.days(), to = next.days(), "Lookback changed");
        self.days = next;
        self.request_refresh(Trigger::WindowChanged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use rusqlite::Connection;

    use heatwatch_energy::Lookback;

    use crate::config::UserConfig;
    use crate::data::SqliteSource;

    fn app(dir: &Path) -> App {
        let path = dir.join("ct.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE housectdata (DateTime TEXT NOT NULL, ct3 REAL);")
            .unwrap();
        let config = UserConfig {
            database: path.clone(),
            ..UserConfig::default()
        };
        let source = SqliteSource::open(&path, config.table_layout()).unwrap();
        let mut app = App::with_source(config, source);
        app.take_pending();
        app
    }

    #[test]
    fn quit_stops_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        assert!(!app.handle_action(Action::Quit));
        assert!(app.handle_action(Action::None));
    }

    #[test]
    fn help_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.view, AppView::Help);
        app.handle_action(Action::ToggleHelp);
        assert_eq!(app.view, AppView::Main);
    }

    #[test]
    fn days_change_requests_window_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        app.handle_action(Action::IncreaseDays);
        assert_eq!(app.days.days(), 2);
        assert_eq!(app.take_pending(), Some(Trigger::WindowChanged));

        app.handle_action(Action::IncreaseDaysPage);
        assert_eq!(app.days.days(), 12);

        app.handle_action(Action::MaxDays);
        assert_eq!(app.days, Lookback::MAX);

        app.handle_action(Action::MinDays);
        assert_eq!(app.days, Lookback::MIN);
    }

    #[test]
    fn days_at_bound_does_not_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        app.handle_action(Action::DecreaseDays);
        assert_eq!(app.days, Lookback::MIN);
        assert_eq!(app.take_pending(), None);
    }

    #[test]
    fn manual_refresh_is_a_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path());

        app.handle_action(Action::IncreaseDays);
        app.handle_action(Action::Refresh);
        assert_eq!(app.take_pending(), Some(Trigger::Tick));
    }
}
