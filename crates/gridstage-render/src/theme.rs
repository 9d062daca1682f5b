#![forbid(unsafe_code)]

//! Named colors, consumed verbatim by rendering.
//!
//! No logic depends on theme values beyond pass-through; swapping the
//! palette never changes layout or lifecycle behavior.

use serde::{Deserialize, Serialize};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// The named colors the composer hands to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub grid_cell: Color,
    pub grid_header: Color,
    pub panel: Color,
    pub panel_active: Color,
    pub panel_pending: Color,
    pub text: Color,
    pub accent: Color,
    pub progress: Color,
    pub menu: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(16, 18, 24),
            grid_cell: Color::rgb(52, 58, 70),
            grid_header: Color::rgb(90, 98, 115),
            panel: Color::rgb(38, 42, 54),
            panel_active: Color::rgb(58, 66, 86),
            panel_pending: Color::rgb(44, 48, 58),
            text: Color::rgb(222, 226, 235),
            accent: Color::rgb(94, 155, 255),
            progress: Color::rgb(114, 199, 140),
            menu: Color::rgb(30, 33, 42),
        }
    }
}
