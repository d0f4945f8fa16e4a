//! Ratatui styles derived from the core palette.

use ratatui::style::{Color, Modifier, Style};

use crate::core::theme::{Palette, Rgb, Theme};

const ERROR_RED: Color = Color::Rgb(0xef, 0x44, 0x44);

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// The palette as ratatui colours, plus the composed styles components use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Styles {
    pub bg: Color,
    pub sidebar: Color,
    pub card: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub primary_bg: Color,
    pub primary_text: Color,
}

impl Styles {
    pub fn for_theme(theme: Theme) -> Self {
        Self::from_palette(theme.palette())
    }

    pub fn from_palette(p: Palette) -> Self {
        Self {
            bg: color(p.bg),
            sidebar: color(p.sidebar),
            card: color(p.card),
            border: color(p.border),
            text: color(p.text),
            muted: color(p.muted),
            primary_bg: color(p.primary_bg),
            primary_text: color(p.primary_text),
        }
    }

    /// Page background with default text colour.
    pub fn page(&self) -> Style {
        Style::default().bg(self.bg).fg(self.text)
    }

    pub fn sidebar(&self) -> Style {
        Style::default().bg(self.sidebar).fg(self.text)
    }

    pub fn card(&self) -> Style {
        Style::default().bg(self.card).fg(self.text)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn heading(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    /// Border of the focused widget.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.focused_border()
        } else {
            self.unfocused_border()
        }
    }

    /// The filled "primary" button (New chat).
    pub fn primary_button(&self) -> Style {
        Style::default()
            .bg(self.primary_bg)
            .fg(self.primary_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row / focused button.
    pub fn selected(&self) -> Style {
        self.text().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(ERROR_RED)
    }
}
