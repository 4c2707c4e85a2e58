//! Text measurement.
//!
//! Exact widths depend on the host's font rendering, so the engine only sees
//! the [`TextMeasure`] trait. [`ProportionalMeasure`] approximates a sans-serif
//! face from a character-width table; [`FixedWidthMeasure`] is a deterministic
//! stand-in for tests.

use unicode_width::UnicodeWidthChar;

use crate::config::Configuration;
use crate::render::defaults;
use crate::types::Px;

/// Measures the rendered width of a text segment, in chart units.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> Px;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, text: &str) -> Px {
        Px(self(text))
    }
}

/// Proportional character widths for printable ASCII, in hundredths of the
/// average character width.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Average character width relative to the font size
const CHARWID_PER_EM: f64 = 0.08 / 0.14;

/// Units for one terminal column of a non-ASCII glyph
const UNITS_PER_COLUMN: u32 = 100;

/// Text length in hundredths of the average character width.
pub fn proportional_text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                // Combining marks are zero-width; CJK glyphs take two columns
                c.width().unwrap_or(0) as u32 * UNITS_PER_COLUMN
            }
        })
        .sum()
}

/// Width table measure for a single font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalMeasure {
    pub font_size: Px,
}

impl ProportionalMeasure {
    pub fn new(font_size: Px) -> Self {
        Self { font_size }
    }

    /// Default font size scaled by the configured font scale.
    pub fn from_config(config: &Configuration) -> Self {
        Self::new(defaults::FONT_SIZE * (config.font_scale / 100.0))
    }
}

impl Default for ProportionalMeasure {
    fn default() -> Self {
        Self::new(defaults::FONT_SIZE)
    }
}

impl TextMeasure for ProportionalMeasure {
    fn text_width(&self, text: &str) -> Px {
        let units = proportional_text_length(text) as f64;
        self.font_size * (units * 0.01 * CHARWID_PER_EM)
    }
}

/// Every character is `Px(self.0)` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWidthMeasure(pub f64);

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TextMeasure for FixedWidthMeasure {
    fn text_width(&self, text: &str) -> Px {
        Px(text.chars().count() as f64 * self.0)
    }
}
