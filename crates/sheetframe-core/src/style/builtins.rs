//! Application builtin cell styles
//!
//! Definitions follow the default Office theme. A builtin is added to a
//! workbook the first time a cell refers to it by name.

use super::{
    BorderEdge, BorderLineStyle, BorderStyle, Color, NamedStyle, NumberFormat, Style,
    Underline,
};

/// Names of all builtin styles with their `builtinId`
pub const BUILTIN_IDS: [(&str, u32); 31] = [
    ("Normal", 0),
    ("Comma", 3),
    ("Currency", 4),
    ("Percent", 5),
    ("Comma [0]", 6),
    ("Currency [0]", 7),
    ("Hyperlink", 8),
    ("Followed Hyperlink", 9),
    ("Note", 10),
    ("Warning Text", 11),
    ("Title", 15),
    ("Headline 1", 16),
    ("Headline 2", 17),
    ("Headline 3", 18),
    ("Headline 4", 19),
    ("Input", 20),
    ("Output", 21),
    ("Calculation", 22),
    ("Check Cell", 23),
    ("Linked Cell", 24),
    ("Total", 25),
    ("Good", 26),
    ("Bad", 27),
    ("Neutral", 28),
    ("Accent1", 29),
    ("Accent2", 33),
    ("Accent3", 37),
    ("Accent4", 41),
    ("Accent5", 45),
    ("Accent6", 49),
    ("Explanatory Text", 53),
];

fn hex(rgb: u32) -> Color {
    Color::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn font_fill(font: u32, fill: u32) -> Style {
    Style::new().font_color(hex(font)).fill_color(hex(fill))
}

fn boxed(style: Style, line: BorderLineStyle, color: u32) -> Style {
    style.border(BorderStyle::all(line, hex(color)))
}

fn bottom(style: Style, line: BorderLineStyle, color: u32) -> Style {
    let mut style = style;
    style.border.bottom = Some(BorderEdge::new(line, hex(color)));
    style
}

/// The workbook default style
pub fn normal() -> NamedStyle {
    NamedStyle::new("Normal", Style::new()).with_builtin_id(0)
}

/// Look up a builtin style by name
pub fn get(name: &str) -> Option<NamedStyle> {
    let id = builtin_id(name)?;
    let style = match name {
        "Normal" => Style::new(),
        "Comma" => Style::new().number_format(number_format(NumberFormat::ID_COMMA)),
        "Comma [0]" => Style::new().number_format(number_format(NumberFormat::ID_COMMA_INT)),
        "Currency" => Style::new().number_format(number_format(NumberFormat::ID_CURRENCY)),
        "Currency [0]" => Style::new().number_format(number_format(NumberFormat::ID_CURRENCY_INT)),
        "Percent" => Style::new().number_format(number_format(NumberFormat::ID_PERCENT_INT)),
        "Hyperlink" => {
            let mut style = Style::new().font_color(hex(0x0563C1));
            style.font.underline = Underline::Single;
            style
        }
        "Followed Hyperlink" => {
            let mut style = Style::new().font_color(hex(0x954F72));
            style.font.underline = Underline::Single;
            style
        }
        "Note" => boxed(
            Style::new().fill_color(hex(0xFFFFCC)),
            BorderLineStyle::Thin,
            0xB2B2B2,
        ),
        "Warning Text" => Style::new().font_color(hex(0xFF0000)),
        "Title" => Style::new()
            .font_name("Cambria")
            .font_size(18.0)
            .bold(true)
            .font_color(hex(0x1F497D)),
        "Headline 1" => bottom(
            Style::new().font_size(15.0).bold(true).font_color(hex(0x1F497D)),
            BorderLineStyle::Thick,
            0x4F81BD,
        ),
        "Headline 2" => bottom(
            Style::new().font_size(13.0).bold(true).font_color(hex(0x1F497D)),
            BorderLineStyle::Thick,
            0xA7BFDE,
        ),
        "Headline 3" => bottom(
            Style::new().bold(true).font_color(hex(0x1F497D)),
            BorderLineStyle::Medium,
            0x95B3D7,
        ),
        "Headline 4" => Style::new().bold(true).font_color(hex(0x1F497D)),
        "Input" => boxed(font_fill(0x3F3F76, 0xFFCC99), BorderLineStyle::Thin, 0x7F7F7F),
        "Output" => boxed(
            font_fill(0x3F3F3F, 0xF2F2F2).bold(true),
            BorderLineStyle::Thin,
            0x3F3F3F,
        ),
        "Calculation" => boxed(
            font_fill(0xFA7D00, 0xF2F2F2).bold(true),
            BorderLineStyle::Thin,
            0x7F7F7F,
        ),
        "Check Cell" => boxed(
            font_fill(0xFFFFFF, 0xA5A5A5).bold(true),
            BorderLineStyle::Double,
            0x3F3F3F,
        ),
        "Linked Cell" => bottom(
            Style::new().font_color(hex(0xFA7D00)),
            BorderLineStyle::Double,
            0xFF8001,
        ),
        "Total" => Style::new().bold(true).border(
            BorderStyle::default()
                .with_top(BorderLineStyle::Thin, hex(0x4F81BD))
                .with_bottom(BorderLineStyle::Double, hex(0x4F81BD)),
        ),
        "Good" => font_fill(0x006100, 0xC6EFCE),
        "Bad" => font_fill(0x9C0006, 0xFFC7CE),
        "Neutral" => font_fill(0x9C6500, 0xFFEB9C),
        "Accent1" => font_fill(0xFFFFFF, 0x4F81BD),
        "Accent2" => font_fill(0xFFFFFF, 0xC0504D),
        "Accent3" => font_fill(0xFFFFFF, 0x9BBB59),
        "Accent4" => font_fill(0xFFFFFF, 0x8064A2),
        "Accent5" => font_fill(0xFFFFFF, 0x4BACC6),
        "Accent6" => font_fill(0xFFFFFF, 0xF79646),
        "Explanatory Text" => {
            let mut style = Style::new().font_color(hex(0x7F7F7F));
            style.font.italic = true;
            style
        }
        _ => return None,
    };
    Some(NamedStyle::new(name, style).with_builtin_id(id))
}

fn number_format(id: u32) -> &'static str {
    NumberFormat::builtin_format_string(id).unwrap_or("General")
}

/// The `builtinId` for a builtin style name
pub fn builtin_id(name: &str) -> Option<u32> {
    BUILTIN_IDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}

/// Names of all builtin styles
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTIN_IDS.iter().map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FillStyle;

    #[test]
    fn test_every_name_has_definition() {
        for name in names() {
            let style = get(name).unwrap_or_else(|| panic!("missing builtin {name}"));
            assert_eq!(style.builtin_id, builtin_id(name));
        }
        assert_eq!(names().count(), 31);
    }

    #[test]
    fn test_good_colors() {
        let good = get("Good").unwrap();
        assert_eq!(good.style.font.color, Color::rgb(0x00, 0x61, 0x00));
        assert_eq!(good.style.fill, FillStyle::solid(Color::rgb(0xC6, 0xEF, 0xCE)));
    }

    #[test]
    fn test_unknown() {
        assert!(get("Heading 1").is_none());
    }
}
