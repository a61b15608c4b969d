//! Workbook color representation

use std::fmt;

/// The default Office theme, in theme-index order
/// (lt1, dk1, lt2, dk2, accent1..accent6)
pub const DEFAULT_THEME: [(u8, u8, u8); 10] = [
    (0xFF, 0xFF, 0xFF),
    (0x00, 0x00, 0x00),
    (0xEE, 0xEC, 0xE1),
    (0x1F, 0x49, 0x7D),
    (0x4F, 0x81, 0xBD),
    (0xC0, 0x50, 0x4D),
    (0x9B, 0xBB, 0x59),
    (0x80, 0x64, 0xA2),
    (0x4B, 0xAC, 0xC6),
    (0xF7, 0x96, 0x46),
];

/// The legacy 64-entry indexed palette
///
/// Indices 64 and 65 are the system foreground/background and have no
/// fixed value.
pub const INDEXED_PALETTE: [(u8, u8, u8); 64] = [
    (0, 0, 0),       // 0: Black
    (255, 255, 255), // 1: White
    (255, 0, 0),     // 2: Red
    (0, 255, 0),     // 3: Bright Green
    (0, 0, 255),     // 4: Blue
    (255, 255, 0),   // 5: Yellow
    (255, 0, 255),   // 6: Pink
    (0, 255, 255),   // 7: Turquoise
    (0, 0, 0),       // 8
    (255, 255, 255), // 9
    (255, 0, 0),     // 10
    (0, 255, 0),     // 11
    (0, 0, 255),     // 12
    (255, 255, 0),   // 13
    (255, 0, 255),   // 14
    (0, 255, 255),   // 15
    (128, 0, 0),     // 16: Dark Red
    (0, 128, 0),     // 17: Green
    (0, 0, 128),     // 18: Dark Blue
    (128, 128, 0),   // 19: Dark Yellow
    (128, 0, 128),   // 20: Violet
    (0, 128, 128),   // 21: Teal
    (192, 192, 192), // 22: Gray 25%
    (128, 128, 128), // 23: Gray 50%
    (153, 153, 255), // 24: Periwinkle
    (153, 51, 102),  // 25: Plum
    (255, 255, 204), // 26: Ivory
    (204, 255, 255), // 27: Light Turquoise
    (102, 0, 102),   // 28: Dark Purple
    (255, 128, 128), // 29: Coral
    (0, 102, 204),   // 30: Ocean Blue
    (204, 204, 255), // 31: Ice Blue
    (0, 0, 128),     // 32
    (255, 0, 255),   // 33
    (255, 255, 0),   // 34
    (0, 255, 255),   // 35
    (128, 0, 128),   // 36
    (128, 0, 0),     // 37
    (0, 128, 128),   // 38
    (0, 0, 255),     // 39
    (0, 204, 255),   // 40: Sky Blue
    (204, 255, 255), // 41
    (204, 255, 204), // 42: Light Green
    (255, 255, 153), // 43: Light Yellow
    (153, 204, 255), // 44: Pale Blue
    (255, 153, 204), // 45: Rose
    (204, 153, 255), // 46: Lavender
    (255, 204, 153), // 47: Tan
    (51, 102, 255),  // 48: Light Blue
    (51, 204, 204),  // 49: Aqua
    (153, 204, 0),   // 50: Lime
    (255, 204, 0),   // 51: Gold
    (255, 153, 0),   // 52: Light Orange
    (255, 102, 0),   // 53: Orange
    (102, 102, 153), // 54: Blue Gray
    (150, 150, 150), // 55: Gray 40%
    (0, 51, 102),    // 56: Dark Teal
    (51, 153, 102),  // 57: Sea Green
    (0, 51, 0),      // 58: Dark Green
    (51, 51, 0),     // 59: Olive Green
    (153, 51, 0),    // 60: Brown
    (153, 51, 102),  // 61
    (51, 51, 153),   // 62: Indigo
    (51, 51, 51),    // 63: Gray 80%
];

/// A color as stored in a workbook
///
/// Theme and indexed colors are references; they only become concrete RGB
/// values against a theme table or palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Automatic/default color
    #[default]
    Auto,

    /// RGB color (no alpha)
    Rgb { r: u8, g: u8, b: u8 },

    /// ARGB color with alpha channel
    Argb { a: u8, r: u8, g: u8, b: u8 },

    /// Theme color with tint
    Theme {
        /// Theme color index (0-9)
        index: u8,
        /// Tint (-1.0 to 1.0, stored as a percentage)
        tint: i8,
    },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Parse `RRGGBB` or `AARRGGBB`, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            6 => Some(Color::Rgb {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
            }),
            8 => Some(Color::Argb {
                a: byte(0)?,
                r: byte(2)?,
                g: byte(4)?,
                b: byte(6)?,
            }),
            _ => None,
        }
    }

    /// ARGB hex string as written to XLSX, e.g. `FFFF0000`
    ///
    /// Theme and indexed colors are resolved against the default tables.
    pub fn to_argb_hex(&self) -> String {
        match self {
            Color::Argb { a, r, g, b } => format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            other => {
                let (r, g, b) = other.to_rgb();
                format!("FF{:02X}{:02X}{:02X}", r, g, b)
            }
        }
    }

    /// Concrete RGB using the default theme and palette
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Auto => (0, 0, 0),
            Color::Rgb { r, g, b } | Color::Argb { r, g, b, .. } => (*r, *g, *b),
            Color::Theme { index, tint } => {
                let base = DEFAULT_THEME
                    .get(*index as usize)
                    .copied()
                    .unwrap_or((0, 0, 0));
                Self::apply_tint(base, *tint as f64 / 100.0)
            }
            Color::Indexed(i) => Self::indexed_rgb(*i).unwrap_or((0, 0, 0)),
        }
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self, Color::Auto)
    }

    /// Look up an entry of the default indexed palette
    pub fn indexed_rgb(index: u8) -> Option<(u8, u8, u8)> {
        INDEXED_PALETTE.get(index as usize).copied()
    }

    /// Lighten (positive tint) or darken (negative tint) a color
    ///
    /// `tint` is in `-1.0..=1.0`.
    pub fn apply_tint(color: (u8, u8, u8), tint: f64) -> (u8, u8, u8) {
        let apply = |c: u8| -> u8 {
            let c = c as f64;
            let result = if tint < 0.0 {
                c * (1.0 + tint)
            } else {
                c + (255.0 - c) * tint
            };
            result.round().clamp(0.0, 255.0) as u8
        };

        (apply(color.0), apply(color.1), apply(color.2))
    }

    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Color = Color::Rgb { r: 255, g: 0, b: 0 };
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Auto => write!(f, "auto"),
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Argb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b),
            Color::Theme { index, tint } => write!(f, "theme({}, {}%)", index, tint),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(
            Color::from_hex("80FFFFFF"),
            Some(Color::Argb {
                a: 128,
                r: 255,
                g: 255,
                b: 255
            })
        );
        assert_eq!(Color::from_hex("FF00"), None);
        assert_eq!(Color::from_hex("GG0000"), None);
    }

    #[test]
    fn test_argb_hex() {
        assert_eq!(Color::RED.to_argb_hex(), "FFFF0000");
        assert_eq!(Color::Indexed(4).to_argb_hex(), "FF0000FF");
        assert_eq!(Color::theme(4, 0).to_argb_hex(), "FF4F81BD");
    }

    #[test]
    fn test_palette_tail() {
        assert_eq!(Color::indexed_rgb(63), Some((51, 51, 51)));
        assert_eq!(Color::indexed_rgb(64), None);
    }

    #[test]
    fn test_tint() {
        assert_eq!(Color::apply_tint((100, 100, 100), 0.5), (178, 178, 178));
        assert_eq!(Color::apply_tint((100, 100, 100), -0.5), (50, 50, 50));
        assert_eq!(Color::apply_tint((10, 20, 30), 0.0), (10, 20, 30));
    }
}
