//! Dashboard palette.

use ratatui::style::{Color, Style};

/// Colors used by the UI widgets.
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    pub bg: Color,
    pub dialog_bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
    pub success: Color,
    pub danger: Color,
    pub border: Color,
    /// The CT3 trace.
    pub graph_line: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: Color::Rgb(0x16, 0x16, 0x1e),
            dialog_bg: Color::Rgb(0x23, 0x23, 0x2d),
            fg: Color::Rgb(0xe6, 0xe6, 0xf0),
            accent: Color::Rgb(0x8a, 0xb4, 0xf8),
            highlight: Color::Rgb(0xff, 0xcb, 0x6b),
            muted: Color::Rgb(0x80, 0x80, 0x8c),
            success: Color::Rgb(0x81, 0xc7, 0x84),
            danger: Color::Rgb(0xef, 0x53, 0x50),
            border: Color::Rgb(0x3c, 0x3c, 0x50),
            graph_line: Color::Rgb(0x17, 0xb8, 0x97),
        }
    }
}

impl ThemeColors {
    #[inline]
    pub fn fg_style(&self) -> Style {
        Style::default().fg(self.fg)
    }

    #[inline]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    #[inline]
    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    #[inline]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
