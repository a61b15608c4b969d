//! Flat style records
//!
//! A [`Style`] bundles every formatting attribute a frame can assign to a
//! cell. Two styles are equal when their formatting is equal; the name is
//! only the key the workbook stores them under.

use std::hash::{Hash, Hasher};

use sheetframe_core::style::builtins;
use sheetframe_core::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NamedStyle, NumberFormat, PatternType, Protection, Underline,
    VerticalAlignment,
};

use crate::color::{resolve_color, resolve_workbook_color, ColorInput, HexColor};
use crate::error::Result;
use crate::options::{NumberFormats, Options};

/// One border edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Side {
    /// Line style; `None` draws nothing
    pub style: Option<BorderLineStyle>,
    /// Line color; `None` is automatic
    pub color: Option<HexColor>,
}

impl Side {
    /// A drawn edge
    pub fn new(style: BorderLineStyle, color: Option<HexColor>) -> Self {
        Self {
            style: Some(style),
            color,
        }
    }
}

/// A named, flat style definition
#[derive(Debug, Clone)]
pub struct Style {
    pub name: String,
    pub number_format: String,
    pub font_name: String,
    pub font_size: f64,
    pub font_color: Option<HexColor>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strikethrough: bool,
    /// Pattern used when `fill_color` is set
    pub fill_pattern: PatternType,
    pub fill_color: Option<HexColor>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
    pub vertical_alignment: Option<VerticalAlignment>,
    pub indent: u8,
    pub wrap_text: bool,
    pub shrink_to_fit: bool,
    pub locked: bool,
    pub hidden: bool,
    pub left: Side,
    pub right: Side,
    pub top: Side,
    pub bottom: Side,
}

impl Style {
    /// A style with workbook defaults: `General`, Calibri 11, no fill,
    /// no borders, locked
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            number_format: NumberFormats::GENERAL.to_string(),
            font_name: "Calibri".to_string(),
            font_size: 11.0,
            font_color: None,
            bold: false,
            italic: false,
            underline: Underline::None,
            strikethrough: false,
            fill_pattern: PatternType::Solid,
            fill_color: None,
            horizontal_alignment: None,
            vertical_alignment: None,
            indent: 0,
            wrap_text: false,
            shrink_to_fit: false,
            locked: true,
            hidden: false,
            left: Side::default(),
            right: Side::default(),
            top: Side::default(),
            bottom: Side::default(),
        }
    }

    /// The builtin `Normal` style renamed `Default`
    pub fn default_style() -> Self {
        Options::default().default_style()
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = format.into();
        self
    }

    pub fn with_font<S: Into<String>>(mut self, name: S, size: f64) -> Self {
        self.font_name = name.into();
        self.font_size = size;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_font_color(mut self, color: HexColor) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Solid fill
    pub fn with_fill_color(mut self, color: HexColor) -> Self {
        self.fill_pattern = PatternType::Solid;
        self.fill_color = Some(color);
        self
    }

    pub fn with_horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal_alignment = Some(align);
        self
    }

    pub fn with_vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.vertical_alignment = Some(align);
        self
    }

    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Same line on all four edges
    pub fn with_border(mut self, line: BorderLineStyle, color: Option<HexColor>) -> Self {
        let side = Side::new(line, color);
        self.left = side.clone();
        self.right = side.clone();
        self.top = side.clone();
        self.bottom = side;
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// A copy with `changes` applied
    ///
    /// Colors in the change set are resolved here, so an unparseable color
    /// fails the whole edit.
    pub fn apply(&self, changes: &StyleChanges) -> Result<Style> {
        let mut style = self.clone();

        if let Some(name) = &changes.name {
            style.name = name.clone();
        }
        if let Some(format) = &changes.number_format {
            style.number_format = format.clone();
        }
        if let Some(font) = &changes.font_name {
            style.font_name = font.clone();
        }
        if let Some(size) = changes.font_size {
            style.font_size = size;
        }
        if let Some(color) = &changes.font_color {
            style.font_color = resolve_color(color.as_ref())?;
        }
        if let Some(bold) = changes.bold {
            style.bold = bold;
        }
        if let Some(italic) = changes.italic {
            style.italic = italic;
        }
        if let Some(underline) = changes.underline {
            style.underline = underline;
        }
        if let Some(strike) = changes.strikethrough {
            style.strikethrough = strike;
        }
        if let Some(pattern) = changes.fill_pattern {
            style.fill_pattern = pattern;
        }
        if let Some(color) = &changes.fill_color {
            style.fill_color = resolve_color(color.as_ref())?;
        }
        if let Some(align) = changes.horizontal_alignment {
            style.horizontal_alignment = align;
        }
        if let Some(align) = changes.vertical_alignment {
            style.vertical_alignment = align;
        }
        if let Some(indent) = changes.indent {
            style.indent = indent;
        }
        if let Some(wrap) = changes.wrap_text {
            style.wrap_text = wrap;
        }
        if let Some(shrink) = changes.shrink_to_fit {
            style.shrink_to_fit = shrink;
        }
        if let Some(locked) = changes.locked {
            style.locked = locked;
        }
        if let Some(hidden) = changes.hidden {
            style.hidden = hidden;
        }

        // all-sides changes first, per-side changes win
        if let Some(line) = changes.border_style {
            for side in style.sides_mut() {
                side.style = line;
            }
        }
        if let Some(color) = &changes.border_color {
            let color = resolve_color(color.as_ref())?;
            for side in style.sides_mut() {
                side.color = color.clone();
            }
        }
        for (side, change) in [
            (&mut style.left, &changes.left),
            (&mut style.right, &changes.right),
            (&mut style.top, &changes.top),
            (&mut style.bottom, &changes.bottom),
        ] {
            if let Some(change) = change {
                side.style = change.style;
                side.color = resolve_color(change.color.as_ref())?;
            }
        }

        Ok(style)
    }

    fn sides_mut(&mut self) -> [&mut Side; 4] {
        [
            &mut self.left,
            &mut self.right,
            &mut self.top,
            &mut self.bottom,
        ]
    }

    /// The workbook named style for this definition
    pub fn to_external(&self) -> NamedStyle {
        let color = |c: &Option<HexColor>| c.as_ref().map(HexColor::to_color).unwrap_or(Color::Auto);
        let edge = |side: &Side| {
            side.style
                .filter(|line| *line != BorderLineStyle::None)
                .map(|line| BorderEdge::new(line, color(&side.color)))
        };

        let fill = match (&self.fill_color, self.fill_pattern) {
            (None, _) | (Some(_), PatternType::None) => FillStyle::None,
            (Some(c), PatternType::Solid) => FillStyle::Solid { color: c.to_color() },
            (Some(c), pattern) => FillStyle::Pattern {
                pattern,
                foreground: c.to_color(),
                background: Color::Auto,
            },
        };

        let style = sheetframe_core::Style {
            font: FontStyle {
                name: self.font_name.clone(),
                size: self.font_size,
                bold: self.bold,
                italic: self.italic,
                underline: self.underline,
                strikethrough: self.strikethrough,
                color: color(&self.font_color),
            },
            fill,
            border: BorderStyle {
                left: edge(&self.left),
                right: edge(&self.right),
                top: edge(&self.top),
                bottom: edge(&self.bottom),
            },
            alignment: Alignment {
                horizontal: self.horizontal_alignment,
                vertical: self.vertical_alignment,
                wrap_text: self.wrap_text,
                shrink_to_fit: self.shrink_to_fit,
                indent: self.indent,
            },
            number_format: NumberFormat::from_code(&self.number_format),
            protection: Protection {
                locked: self.locked,
                hidden: self.hidden,
            },
        };

        let named = NamedStyle::new(self.name.clone(), style);
        match builtins::builtin_id(&self.name) {
            Some(id) => named.with_builtin_id(id),
            None => named,
        }
    }

    /// Flatten a workbook named style, resolving its colors against `theme`
    pub fn from_external(named: &NamedStyle, theme: &[(u8, u8, u8)]) -> Result<Style> {
        let color = |c: &Color| -> Result<Option<HexColor>> {
            match c {
                Color::Auto => Ok(None),
                other => resolve_workbook_color(other, Some(theme), None).map(Some),
            }
        };
        let side = |edge: &Option<BorderEdge>| -> Result<Side> {
            Ok(match edge {
                Some(edge) => Side {
                    style: Some(edge.style),
                    color: color(&edge.color)?,
                },
                None => Side::default(),
            })
        };

        let core = &named.style;
        let (fill_pattern, fill_color) = match &core.fill {
            FillStyle::None => (PatternType::Solid, None),
            FillStyle::Solid { color: c } => (PatternType::Solid, color(c)?),
            FillStyle::Pattern {
                pattern,
                foreground,
                ..
            } => (*pattern, color(foreground)?),
        };

        Ok(Style {
            name: named.name.clone(),
            number_format: core.number_format.format_string().to_string(),
            font_name: core.font.name.clone(),
            font_size: core.font.size,
            font_color: color(&core.font.color)?,
            bold: core.font.bold,
            italic: core.font.italic,
            underline: core.font.underline,
            strikethrough: core.font.strikethrough,
            fill_pattern,
            fill_color,
            horizontal_alignment: core.alignment.horizontal,
            vertical_alignment: core.alignment.vertical,
            indent: core.alignment.indent,
            wrap_text: core.alignment.wrap_text,
            shrink_to_fit: core.alignment.shrink_to_fit,
            locked: core.protection.locked,
            hidden: core.protection.hidden,
            left: side(&core.border.left)?,
            right: side(&core.border.right)?,
            top: side(&core.border.top)?,
            bottom: side(&core.border.bottom)?,
        })
    }

    /// Attributes compared by equality and hashing, name excluded
    fn key(&self) -> StyleKey<'_> {
        StyleKey {
            number_format: &self.number_format,
            font: (
                &self.font_name,
                self.font_size.to_bits(),
                &self.font_color,
                self.bold,
                self.italic,
                self.underline,
                self.strikethrough,
            ),
            fill: (self.fill_pattern, &self.fill_color),
            alignment: (
                self.horizontal_alignment,
                self.vertical_alignment,
                self.indent,
                self.wrap_text,
                self.shrink_to_fit,
            ),
            protection: (self.locked, self.hidden),
            sides: [&self.left, &self.right, &self.top, &self.bottom],
        }
    }
}

#[derive(PartialEq, Eq, Hash)]
struct StyleKey<'a> {
    number_format: &'a str,
    font: (&'a str, u64, &'a Option<HexColor>, bool, bool, Underline, bool),
    fill: (PatternType, &'a Option<HexColor>),
    alignment: (
        Option<HorizontalAlignment>,
        Option<VerticalAlignment>,
        u8,
        bool,
        bool,
    ),
    protection: (bool, bool),
    sides: [&'a Side; 4],
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Style {}

impl Hash for Style {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

// ==================== Derived defaults ====================

fn derived(base: &Style, suffix: &str) -> Style {
    let mut style = base.clone();
    style.name = format!("{}{}", base.name, suffix);
    style
}

fn thin_borders(style: &mut Style) {
    for side in style.sides_mut() {
        side.style = Some(BorderLineStyle::Thin);
    }
}

/// Bold, boxed, text-formatted and centered
pub fn default_header_style(base: &Style) -> Style {
    let mut style = derived(base, " Header");
    style.bold = true;
    thin_borders(&mut style);
    style.number_format = NumberFormats::TEXT.to_string();
    style.horizontal_alignment = Some(HorizontalAlignment::Center);
    style
}

/// Bold and boxed
pub fn default_index_style(base: &Style) -> Style {
    let mut style = derived(base, " Index");
    style.bold = true;
    thin_borders(&mut style);
    style
}

pub fn default_number_style(base: &Style) -> Style {
    let mut style = derived(base, " Number");
    style.horizontal_alignment = Some(HorizontalAlignment::Right);
    style.number_format = NumberFormats::GENERAL.to_string();
    style
}

pub fn default_date_style(base: &Style, options: &Options) -> Style {
    let mut style = derived(base, " Date");
    style.horizontal_alignment = Some(HorizontalAlignment::Right);
    style.number_format = options.date_format.clone();
    style
}

pub fn default_datetime_style(base: &Style, options: &Options) -> Style {
    let mut style = derived(base, " Datetime");
    style.horizontal_alignment = Some(HorizontalAlignment::Right);
    style.number_format = options.datetime_format.clone();
    style
}

/// Left aligned when the format spells out units, right aligned otherwise
pub fn default_timedelta_style(base: &Style, options: &Options) -> Style {
    let mut style = derived(base, " Timedelta");
    style.number_format = options.timedelta_format.clone();
    let textual = ["year", "day", "hour", "min", "sec"]
        .iter()
        .any(|unit| style.number_format.contains(unit));
    style.horizontal_alignment = Some(if textual {
        HorizontalAlignment::Left
    } else {
        HorizontalAlignment::Right
    });
    style
}

// ==================== Change sets ====================

/// Replacement for one border edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SideChange {
    pub style: Option<BorderLineStyle>,
    pub color: Option<ColorInput>,
}

/// A set of attribute edits applied on top of an existing style
///
/// Unset fields leave the attribute alone. For clearable attributes the
/// inner `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct StyleChanges {
    pub name: Option<String>,
    pub number_format: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub font_color: Option<Option<ColorInput>>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<Underline>,
    pub strikethrough: Option<bool>,
    pub fill_pattern: Option<PatternType>,
    pub fill_color: Option<Option<ColorInput>>,
    pub horizontal_alignment: Option<Option<HorizontalAlignment>>,
    pub vertical_alignment: Option<Option<VerticalAlignment>>,
    pub indent: Option<u8>,
    pub wrap_text: Option<bool>,
    pub shrink_to_fit: Option<bool>,
    pub locked: Option<bool>,
    pub hidden: Option<bool>,
    /// Line style for all four edges
    pub border_style: Option<Option<BorderLineStyle>>,
    /// Line color for all four edges
    pub border_color: Option<Option<ColorInput>>,
    pub left: Option<SideChange>,
    pub right: Option<SideChange>,
    pub top: Option<SideChange>,
    pub bottom: Option<SideChange>,
}

impl StyleChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether applying this set changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }

    pub fn with_font_name<S: Into<String>>(mut self, font: S) -> Self {
        self.font_name = Some(font.into());
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_color<C: Into<ColorInput>>(mut self, color: C) -> Self {
        self.font_color = Some(Some(color.into()));
        self
    }

    pub fn without_font_color(mut self) -> Self {
        self.font_color = Some(None);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn with_strikethrough(mut self, strike: bool) -> Self {
        self.strikethrough = Some(strike);
        self
    }

    pub fn with_fill_pattern(mut self, pattern: PatternType) -> Self {
        self.fill_pattern = Some(pattern);
        self
    }

    pub fn with_fill_color<C: Into<ColorInput>>(mut self, color: C) -> Self {
        self.fill_color = Some(Some(color.into()));
        self
    }

    pub fn without_fill_color(mut self) -> Self {
        self.fill_color = Some(None);
        self
    }

    pub fn with_horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal_alignment = Some(Some(align));
        self
    }

    pub fn with_vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.vertical_alignment = Some(Some(align));
        self
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn with_wrap_text(mut self, wrap: bool) -> Self {
        self.wrap_text = Some(wrap);
        self
    }

    pub fn with_shrink_to_fit(mut self, shrink: bool) -> Self {
        self.shrink_to_fit = Some(shrink);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    pub fn with_border_style(mut self, line: BorderLineStyle) -> Self {
        self.border_style = Some(Some(line));
        self
    }

    pub fn with_border_color<C: Into<ColorInput>>(mut self, color: C) -> Self {
        self.border_color = Some(Some(color.into()));
        self
    }

    pub fn with_left(mut self, line: Option<BorderLineStyle>, color: Option<ColorInput>) -> Self {
        self.left = Some(SideChange { style: line, color });
        self
    }

    pub fn with_right(mut self, line: Option<BorderLineStyle>, color: Option<ColorInput>) -> Self {
        self.right = Some(SideChange { style: line, color });
        self
    }

    pub fn with_top(mut self, line: Option<BorderLineStyle>, color: Option<ColorInput>) -> Self {
        self.top = Some(SideChange { style: line, color });
        self
    }

    pub fn with_bottom(mut self, line: Option<BorderLineStyle>, color: Option<ColorInput>) -> Self {
        self.bottom = Some(SideChange { style: line, color });
        self
    }
}

impl PartialEq for StyleChanges {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.number_format == other.number_format
            && self.font_name == other.font_name
            && self.font_size.map(f64::to_bits) == other.font_size.map(f64::to_bits)
            && self.font_color == other.font_color
            && self.bold == other.bold
            && self.italic == other.italic
            && self.underline == other.underline
            && self.strikethrough == other.strikethrough
            && self.fill_pattern == other.fill_pattern
            && self.fill_color == other.fill_color
            && self.horizontal_alignment == other.horizontal_alignment
            && self.vertical_alignment == other.vertical_alignment
            && self.indent == other.indent
            && self.wrap_text == other.wrap_text
            && self.shrink_to_fit == other.shrink_to_fit
            && self.locked == other.locked
            && self.hidden == other.hidden
            && self.border_style == other.border_style
            && self.border_color == other.border_color
            && self.left == other.left
            && self.right == other.right
            && self.top == other.top
            && self.bottom == other.bottom
    }
}

impl Eq for StyleChanges {}

impl Hash for StyleChanges {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.number_format.hash(state);
        self.font_name.hash(state);
        self.font_size.map(f64::to_bits).hash(state);
        self.font_color.hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.underline.hash(state);
        self.strikethrough.hash(state);
        self.fill_pattern.hash(state);
        self.fill_color.hash(state);
        self.horizontal_alignment.hash(state);
        self.vertical_alignment.hash(state);
        self.indent.hash(state);
        self.wrap_text.hash(state);
        self.shrink_to_fit.hash(state);
        self.locked.hash(state);
        self.hidden.hash(state);
        self.border_style.hash(state);
        self.border_color.hash(state);
        self.left.hash(state);
        self.right.hash(state);
        self.top.hash(state);
        self.bottom.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use pretty_assertions::assert_eq;
    use sheetframe_core::style::DEFAULT_THEME;

    #[test]
    fn test_equality_ignores_name() {
        let a = Style::new("A").with_bold(true);
        let b = Style::new("B").with_bold(true);
        assert_eq!(a, b);
        assert_ne!(a, Style::new("A"));
    }

    #[test]
    fn test_default_style() {
        let style = Style::default_style();
        assert_eq!(style.name, "Default");
        assert_eq!(style.font_name, "Calibri");
        assert_eq!(style.font_size, 11.0);
        assert_eq!(style.fill_color, None);
        assert!(style.locked);
        assert!(!style.hidden);
    }

    #[test]
    fn test_apply_changes() {
        let base = Style::default_style();
        let changes = StyleChanges::new()
            .with_bold(true)
            .with_font_color("red")
            .with_border_style(BorderLineStyle::Thin)
            .with_bottom(Some(BorderLineStyle::Double), Some("0000FF".into()));
        let edited = base.apply(&changes).unwrap();

        assert!(edited.bold);
        assert_eq!(edited.font_color.as_ref().map(HexColor::as_str), Some("FF0000"));
        assert_eq!(edited.left.style, Some(BorderLineStyle::Thin));
        assert_eq!(edited.bottom.style, Some(BorderLineStyle::Double));
        assert_eq!(edited.bottom.color.as_ref().map(HexColor::as_str), Some("0000FF"));
        assert_eq!(edited.name, "Default");
    }

    #[test]
    fn test_apply_invalid_color() {
        let changes = StyleChanges::new().with_fill_color("nope");
        assert!(matches!(
            Style::default_style().apply(&changes),
            Err(FrameError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_clear_color() {
        let base = Style::new("x").with_font_color(HexColor::parse("FF0000").unwrap());
        let cleared = base.apply(&StyleChanges::new().without_font_color()).unwrap();
        assert_eq!(cleared.font_color, None);
    }

    #[test]
    fn test_external_roundtrip() {
        let style = Style::new("Fancy")
            .with_bold(true)
            .with_fill_color(HexColor::parse("D9D9D9").unwrap())
            .with_border(BorderLineStyle::Thin, None)
            .with_number_format("0.00")
            .with_horizontal_alignment(HorizontalAlignment::Right);
        let external = style.to_external();
        assert_eq!(external.name, "Fancy");
        assert_eq!(external.builtin_id, None);
        assert_eq!(external.style.number_format, NumberFormat::BuiltIn(2));

        let back = Style::from_external(&external, &DEFAULT_THEME).unwrap();
        assert_eq!(back, style);
        assert_eq!(back.name, "Fancy");
    }

    #[test]
    fn test_no_fill_without_color() {
        let external = Style::new("plain").to_external();
        assert!(external.style.fill.is_none());
    }

    #[test]
    fn test_builtin_from_external() {
        let good = builtins::get("Good").unwrap();
        let style = Style::from_external(&good, &DEFAULT_THEME).unwrap();
        assert_eq!(style.font_color.as_ref().map(HexColor::as_str), Some("006100"));
        assert_eq!(style.fill_color.as_ref().map(HexColor::as_str), Some("C6EFCE"));
        assert_eq!(style.to_external().builtin_id, good.builtin_id);
    }

    #[test]
    fn test_derived_defaults() {
        let options = Options::default();
        let base = Style::default_style();

        let header = default_header_style(&base);
        assert_eq!(header.name, "Default Header");
        assert!(header.bold);
        assert_eq!(header.number_format, "@");
        assert_eq!(header.horizontal_alignment, Some(HorizontalAlignment::Center));
        assert_eq!(header.top.style, Some(BorderLineStyle::Thin));

        let index = default_index_style(&base);
        assert_eq!(index.name, "Default Index");
        assert_eq!(index.number_format, "General");

        let number = default_number_style(&base);
        assert_eq!(number.horizontal_alignment, Some(HorizontalAlignment::Right));

        let date = default_date_style(&base, &options);
        assert_eq!(date.number_format, "MM/DD/YYYY");
        let datetime = default_datetime_style(&base, &options);
        assert_eq!(datetime.name, "Default Datetime");
        assert_eq!(datetime.number_format, "MM/DD/YYYY HH:MM:SS");
    }

    #[test]
    fn test_timedelta_alignment() {
        let base = Style::default_style();
        let numeric = default_timedelta_style(&base, &Options::default());
        assert_eq!(numeric.number_format, "0.00");
        assert_eq!(numeric.horizontal_alignment, Some(HorizontalAlignment::Right));

        let options = Options::default().with_timedelta_format(NumberFormats::TIMEDELTA_DAYS);
        let textual = default_timedelta_style(&base, &options);
        assert_eq!(textual.horizontal_alignment, Some(HorizontalAlignment::Left));
    }

    #[test]
    fn test_changes_hash_eq() {
        use ahash::AHashSet;
        let a = StyleChanges::new().with_bold(true).with_font_size(12.0);
        let b = StyleChanges::new().with_font_size(12.0).with_bold(true);
        let mut set = AHashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
        assert!(StyleChanges::new().is_empty());
        assert!(!b.is_empty());
    }
}
