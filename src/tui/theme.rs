use ratatui::style::{Color, Modifier, Style};

use crate::domain::TextStyle;

/// Explicit theme value carried on the UI state. Rendering derives every
/// color from the palette; there is no global theme flag anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Concrete colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub title: Color,
    pub notice: Color,
    pub border: Color,
    pub accent: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Palette {
    /// Pure mapping from theme to colors.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                background: Color::White,
                text: Color::Black,
                title: Color::Blue,
                notice: Color::Red,
                border: Color::DarkGray,
                accent: Color::Cyan,
                status_fg: Color::White,
                status_bg: Color::DarkGray,
            },
            Theme::Dark => Palette {
                background: Color::Black,
                text: Color::White,
                title: Color::LightCyan,
                notice: Color::LightRed,
                border: Color::Gray,
                accent: Color::Cyan,
                status_fg: Color::Black,
                status_bg: Color::Gray,
            },
        }
    }

    /// Style for a render event's text block.
    pub fn text_style(&self, style: TextStyle) -> Style {
        match style {
            TextStyle::Title => Style::default()
                .fg(self.title)
                .add_modifier(Modifier::BOLD),
            TextStyle::Body => Style::default().fg(self.text),
        }
    }

    pub fn notice_style(&self) -> Style {
        Style::default()
            .fg(self.notice)
            .add_modifier(Modifier::ITALIC)
    }
}
