use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, App, AppView};

pub mod keys {
    pub const HELP: &str = "?";
    pub const QUIT: &str = "q";
    pub const REFRESH: &str = "r";
    pub const DAYS: &str = "-/+";
    pub const ESC: &str = "Esc";
}

pub fn handle_key(app: &App, key: KeyEvent) -> Action {
    match app.view {
        AppView::Main => handle_main_keys(key),
        AppView::Help => handle_help_keys(key),
    }
}

fn handle_main_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('?') | KeyCode::Char('/') => Action::ToggleHelp,
        KeyCode::Char('=') | KeyCode::Char('+') | KeyCode::Right => Action::IncreaseDays,
        KeyCode::Char('-') | KeyCode::Left => Action::DecreaseDays,
        KeyCode::PageUp => Action::IncreaseDaysPage,
        KeyCode::PageDown => Action::DecreaseDaysPage,
        KeyCode::Home => Action::MinDays,
        KeyCode::End => Action::MaxDays,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}

fn handle_help_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::ToggleHelp,
        _ => Action::None,
    }
}

pub struct KeyBinding {
    pub key: &'static str,
    pub description: &'static str,
}

pub const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: "+/→",
        description: "Look back one more day",
    },
    KeyBinding {
        key: "-/←",
        description: "Look back one less day",
    },
    KeyBinding {
        key: "PgUp/PgDn",
        description: "Look back 10 days more/less",
    },
    KeyBinding {
        key: "Home/End",
        description: "Jump to 1/100 days",
    },
    KeyBinding {
        key: keys::REFRESH,
        description: "Refresh now",
    },
    KeyBinding {
        key: keys::HELP,
        description: "Toggle help",
    },
    KeyBinding {
        key: keys::QUIT,
        description: "Quit",
    },
];
