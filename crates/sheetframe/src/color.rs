//! Color resolution
//!
//! Every color a style carries is normalized to a [`HexColor`], six
//! uppercase hex digits with no alpha. Inputs may be hex strings, RGB
//! triples, palette names or workbook colors that still need a theme or
//! palette to become concrete.

use std::fmt;

use ahash::AHashMap;
use lazy_regex::regex_is_match;
use once_cell::sync::Lazy;
use sheetframe_core::style::{DEFAULT_THEME, INDEXED_PALETTE};
use sheetframe_core::Color;

use crate::error::{FrameError, Result};

/// Palette names and their slot in the indexed palette
static NAMED_COLORS: Lazy<AHashMap<&'static str, usize>> = Lazy::new(|| {
    [
        ("black", 0),
        ("white", 1),
        ("red", 2),
        ("bright_green", 3),
        ("blue", 4),
        ("yellow", 5),
        ("pink", 6),
        ("turquoise", 7),
        ("dark_red", 16),
        ("green", 17),
        ("dark_blue", 18),
        ("dark_yellow", 19),
        ("violet", 20),
        ("teal", 21),
        ("grey_25", 22),
        ("grey_50", 23),
        ("periwinkle", 24),
        ("plum", 25),
        ("ivory", 26),
        ("light_turquoise", 27),
        ("dark_purple", 28),
        ("coral", 29),
        ("ocean_blue", 30),
        ("ice_blue", 31),
        ("sky_blue", 40),
        ("light_green", 42),
        ("light_yellow", 43),
        ("pale_blue", 44),
        ("rose", 45),
        ("lavender", 46),
        ("tan", 47),
        ("light_blue", 48),
        ("aqua", 49),
        ("lime", 50),
        ("gold", 51),
        ("light_orange", 52),
        ("orange", 53),
        ("blue_grey", 54),
        ("grey_40", 55),
        ("dark_teal", 56),
        ("sea_green", 57),
        ("dark_green", 58),
        ("olive_green", 59),
        ("brown", 60),
        ("indigo", 62),
        ("grey_80", 63),
    ]
    .into_iter()
    .collect()
});

/// A color in canonical form: `RRGGBB`, uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor(String);

impl HexColor {
    /// Parse `RRGGBB` or `AARRGGBB`, with or without a leading `#`
    ///
    /// The alpha of an eight digit value is dropped.
    pub fn parse(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !regex_is_match!(r"^([0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$", digits) {
            return Err(FrameError::InvalidColor(hex.to_string()));
        }
        let rgb = &digits[digits.len() - 6..];
        Ok(HexColor(rgb.to_ascii_uppercase()))
    }

    /// The six hex digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let byte = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (byte(0), byte(2), byte(4))
    }

    /// The workbook model color for this value
    pub fn to_color(&self) -> Color {
        let (r, g, b) = self.to_rgb();
        Color::rgb(r, g, b)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can be resolved to a [`HexColor`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorInput {
    /// Palette name or hex string, `#` optional
    Text(String),
    /// RGB triple; components must be within `0..=255`
    Rgb(i64, i64, i64),
    /// Already canonical
    Hex(HexColor),
    /// Workbook color, resolved against the default theme and palette
    Workbook(Color),
}

impl From<&str> for ColorInput {
    fn from(value: &str) -> Self {
        ColorInput::Text(value.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(value: String) -> Self {
        ColorInput::Text(value)
    }
}

impl From<(u8, u8, u8)> for ColorInput {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        ColorInput::Rgb(r as i64, g as i64, b as i64)
    }
}

impl From<HexColor> for ColorInput {
    fn from(value: HexColor) -> Self {
        ColorInput::Hex(value)
    }
}

impl From<&HexColor> for ColorInput {
    fn from(value: &HexColor) -> Self {
        ColorInput::Hex(value.clone())
    }
}

impl From<Color> for ColorInput {
    fn from(value: Color) -> Self {
        ColorInput::Workbook(value)
    }
}

/// Resolve a color input to its canonical form
///
/// `None` passes through. Names are looked up case-insensitively before
/// the text is tried as hex.
pub fn resolve_color(input: Option<&ColorInput>) -> Result<Option<HexColor>> {
    let Some(input) = input else {
        return Ok(None);
    };
    let hex = match input {
        ColorInput::Hex(hex) => hex.clone(),
        ColorInput::Text(text) => match NAMED_COLORS.get(text.to_ascii_lowercase().as_str()) {
            Some(&slot) => palette_hex(slot, None)?,
            None => HexColor::parse(text)?,
        },
        ColorInput::Rgb(r, g, b) => {
            let channel = |c: i64| {
                u8::try_from(c)
                    .map_err(|_| FrameError::InvalidColor(format!("({}, {}, {})", r, g, b)))
            };
            rgb_to_hex(channel(*r)?, channel(*g)?, channel(*b)?)
        }
        ColorInput::Workbook(color) => resolve_workbook_color(color, None, None)?,
    };
    Ok(Some(hex))
}

/// Resolve a workbook color to hex
///
/// Theme colors use `theme` (lt1, dk1, lt2, dk2, accent1..6) or the builtin
/// office theme; indexed colors use `palette` or the default 64 entries.
pub fn resolve_workbook_color(
    color: &Color,
    theme: Option<&[(u8, u8, u8)]>,
    palette: Option<&[(u8, u8, u8)]>,
) -> Result<HexColor> {
    match color {
        Color::Rgb { r, g, b } | Color::Argb { r, g, b, .. } => Ok(rgb_to_hex(*r, *g, *b)),
        Color::Theme { index, tint } => {
            let table = theme.unwrap_or(&DEFAULT_THEME);
            let base = table
                .get(*index as usize)
                .copied()
                .ok_or_else(|| FrameError::InvalidColor(format!("theme color {}", index)))?;
            let (r, g, b) = Color::apply_tint(base, *tint as f64 / 100.0);
            Ok(rgb_to_hex(r, g, b))
        }
        Color::Indexed(index) => palette_hex(*index as usize, palette),
        Color::Auto => Err(FrameError::InvalidColor("automatic color".to_string())),
    }
}

fn palette_hex(slot: usize, palette: Option<&[(u8, u8, u8)]>) -> Result<HexColor> {
    // 64 and 65 are the system foreground and background
    let table = palette.unwrap_or(&INDEXED_PALETTE);
    let (r, g, b) = table
        .get(slot)
        .copied()
        .ok_or_else(|| FrameError::InvalidColor(format!("indexed color {}", slot)))?;
    Ok(rgb_to_hex(r, g, b))
}

/// Split hex into components
pub fn hex_to_rgb(hex: &str) -> Result<(u8, u8, u8)> {
    Ok(HexColor::parse(hex)?.to_rgb())
}

/// Join components into canonical hex
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> HexColor {
    HexColor(format!("{:02X}{:02X}{:02X}", r, g, b))
}

/// Names accepted by [`resolve_color`] besides hex
pub fn palette_names() -> impl Iterator<Item = &'static str> {
    NAMED_COLORS.keys().copied()
}
