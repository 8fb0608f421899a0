//! Core types and constants for the TUI application.

/// Days moved by a page step on the lookback control.
pub const DAYS_PAGE_STEP: i32 = 10;

/// Actions that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    IncreaseDays,
    DecreaseDays,
    IncreaseDaysPage,
    DecreaseDaysPage,
    MinDays,
    MaxDays,
    Refresh,
    None,
}

impl Action {
    /// Change in lookback days this action asks for, if it is a days action.
    pub fn days_delta(self) -> Option<i32> {
        match self {
            Action::IncreaseDays => Some(1),
            Action::DecreaseDays => Some(-1),
            Action::IncreaseDaysPage => Some(DAYS_PAGE_STEP),
            Action::DecreaseDaysPage => Some(-DAYS_PAGE_STEP),
            Action::MinDays => Some(i32::MIN),
            Action::MaxDays => Some(i32::MAX),
            _ => None,
        }
    }
}

/// Current view/modal state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Main,
    Help,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_actions_have_deltas() {
        assert_eq!(Action::IncreaseDays.days_delta(), Some(1));
        assert_eq!(Action::DecreaseDays.days_delta(), Some(-1));
        assert_eq!(Action::IncreaseDaysPage.days_delta(), Some(10));
        assert_eq!(Action::DecreaseDaysPage.days_delta(), Some(-10));
    }

    #[test]
    fn other_actions_have_no_delta() {
        assert_eq!(Action::Refresh.days_delta(), None);
        assert_eq!(Action::ToggleHelp.days_delta(), None);
        assert_eq!(Action::Quit.days_delta(), None);
        assert_eq!(Action::None.days_delta(), None);
    }

    #[test]
    fn app_view_default_is_main() {
        assert_eq!(AppView::default(), AppView::Main);
    }
}
