//! # Theme
//!
//! Light/dark switch and the colour palette each mode maps to.
//! Colours are plain RGB triples so this module stays UI-agnostic;
//! the TUI adapter turns them into ratatui styles.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Every colour slot the renderer paints with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub sidebar: Rgb,
    pub card: Rgb,
    pub border: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    /// Background of the primary ("New chat") button.
    pub primary_bg: Rgb,
    pub primary_text: Rgb,
}

const DARK: Palette = Palette {
    bg: Rgb(0x0f, 0x0f, 0x0f),
    sidebar: Rgb(0x17, 0x17, 0x17),
    card: Rgb(0x1f, 0x1f, 0x1f),
    border: Rgb(0x2a, 0x2a, 0x2a),
    text: Rgb(0xff, 0xff, 0xff),
    muted: Rgb(0xb3, 0xb3, 0xb3),
    primary_bg: Rgb(0xff, 0xff, 0xff),
    primary_text: Rgb(0x00, 0x00, 0x00),
};

const LIGHT: Palette = Palette {
    bg: Rgb(0xff, 0xff, 0xff),
    sidebar: Rgb(0xf7, 0xf7, 0xf8),
    card: Rgb(0xff, 0xff, 0xff),
    border: Rgb(0xe5, 0xe5, 0xe5),
    text: Rgb(0x00, 0x00, 0x00),
    muted: Rgb(0x55, 0x55, 0x55),
    primary_bg: Rgb(0x00, 0x00, 0x00),
    primary_text: Rgb(0xff, 0xff, 0xff),
};

impl Theme {
    /// Flips light ↔ dark.
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}
