//! Property tests for color resolution, the style registry, width
//! estimation and slicing.

use proptest::prelude::*;
use sheetframe::prelude::*;
use sheetframe::{estimate_width, resolve_color, ColumnKind, StyleRegistry};

fn counter(name: &str) -> u64 {
    name.rsplit_once('[')
        .and_then(|(_, rest)| rest.strip_suffix(']'))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

fn style_strategy() -> impl Strategy<Value = Style> {
    (any::<bool>(), any::<bool>(), 6.0f64..30.0, prop::option::of(any::<(u8, u8, u8)>())).prop_map(
        |(bold, italic, size, color)| {
            let mut style = Style::new("s").with_bold(bold).with_italic(italic);
            style.font_size = size;
            if let Some((r, g, b)) = color {
                style = style.with_fill_color(sheetframe::color::rgb_to_hex(r, g, b));
            }
            style
        },
    )
}

proptest! {
    #[test]
    fn resolve_color_is_idempotent_for_triples(rgb in any::<(u8, u8, u8)>()) {
        let once = resolve_color(Some(&ColorInput::from(rgb))).unwrap().unwrap();
        let twice = resolve_color(Some(&ColorInput::Hex(once.clone()))).unwrap().unwrap();
        prop_assert_eq!(&once, &twice);
        let from_text = resolve_color(Some(&ColorInput::from(once.as_str()))).unwrap().unwrap();
        prop_assert_eq!(once, from_text);
    }

    #[test]
    fn resolve_color_is_idempotent_for_hex(hex in "#?([0-9a-fA-F]{6}|[0-9a-fA-F]{8})") {
        let once = resolve_color(Some(&ColorInput::from(hex.as_str()))).unwrap().unwrap();
        let twice = resolve_color(Some(&ColorInput::from(once.as_str()))).unwrap().unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn out_of_range_triples_are_rejected(r in 256i64..10_000, g in 0i64..256) {
        let result = resolve_color(Some(&ColorInput::Rgb(g, r, g)));
        prop_assert!(matches!(result, Err(FrameError::InvalidColor(_))));
    }

    #[test]
    fn equal_definitions_under_different_names(style in style_strategy()) {
        let mut registry = StyleRegistry::new();
        let a = registry.add(style.clone().with_name("First")).unwrap();
        let b = registry.add(style.with_name("Second")).unwrap();
        prop_assert_ne!(a, b);
        prop_assert_eq!(registry.get(a), registry.get(b));
    }

    #[test]
    fn different_definition_under_used_name_fails(style in style_strategy()) {
        let mut registry = StyleRegistry::new();
        registry.add(style.clone().with_name("Taken")).unwrap();
        let changed = style.clone().with_name("Taken").with_bold(!style.bold);
        prop_assert!(matches!(
            registry.add(changed),
            Err(FrameError::StyleNameConflict(name)) if name == "Taken"
        ));
    }

    #[test]
    fn renames_strictly_increase(base in "[a-z][a-z ]{0,12}", rounds in 1usize..8) {
        let mut registry = StyleRegistry::new();
        let mut style = Style::new(base.trim_end());
        registry.add(style.clone()).unwrap();
        let mut last = 0;
        for _ in 0..rounds {
            let name = registry.rename(&mut style);
            prop_assert!(!registry.contains(&name));
            let n = counter(&name);
            prop_assert!(n > last);
            last = n;
            registry.add(style.clone()).unwrap();
        }
    }

    #[test]
    fn auto_fit_is_monotone_and_clamped(
        words in prop::collection::vec("[a-z]{0,40}", 1..10),
        extra in "[a-z]{0,80}",
    ) {
        let fit = AutoFit::default();
        let values: Vec<Value> = words.iter().map(|w| Value::from(w.as_str())).collect();
        let base = estimate_width(&values, ColumnKind::Str, &["General"], None, &fit);
        prop_assert!(base >= fit.min_width && base <= fit.max_width);

        let mut longer = values.clone();
        longer.push(Value::from(extra.as_str()));
        let grown = estimate_width(&longer, ColumnKind::Str, &["General"], None, &fit);
        prop_assert!(grown >= base);
        prop_assert!(grown <= fit.max_width);
    }

    #[test]
    fn slice_then_export_matches_export_then_extract(
        rows in 1usize..6,
        cols in 1usize..5,
        bold in prop::collection::vec(any::<bool>(), 30),
        r0 in 0usize..6,
        c0 in 0usize..5,
    ) {
        let r0 = r0 % rows;
        let c0 = c0 % cols;
        let columns: Vec<(String, Vec<Value>)> = (0..cols)
            .map(|c| (format!("c{}", c), (0..rows).map(|r| Value::Int((r * cols + c) as i64)).collect()))
            .collect();
        let data = DataFrame::new(columns).unwrap();
        let mut frame = StyledFrame::new(data, FrameOptions::default()).unwrap();
        for r in 0..rows {
            for c in 0..cols {
                if bold[r * cols + c] {
                    frame
                        .by_position(r, c)
                        .unwrap()
                        .edit(StyleChanges::new().with_bold(true))
                        .unwrap();
                }
            }
            frame.set_row_height(r, 15.0 + r as f64).unwrap();
        }
        for c in 0..cols {
            frame.set_column_width(c, 10.0 + c as f64).unwrap();
        }

        let plain = ExportOptions::new()
            .with_write_options(WriteOptions::default().with_index(false).with_header(false));

        let mut whole = ExcelWriter::new("whole.xlsx").unwrap();
        frame.to_excel(&mut whole, &plain).unwrap();
        let sub = frame.iloc(r0..rows, c0..cols).unwrap();
        let mut part = ExcelWriter::new("part.xlsx").unwrap();
        sub.to_excel(&mut part, &plain).unwrap();

        let whole_sheet = whole.book().worksheet(0).unwrap();
        let part_sheet = part.book().worksheet(0).unwrap();
        for r in 0..rows - r0 {
            let (pr, wr) = (r as u32, (r + r0) as u32);
            prop_assert_eq!(part_sheet.row_height(pr), whole_sheet.row_height(wr));
            for c in 0..cols - c0 {
                let (pc, wc) = (c as u16, (c + c0) as u16);
                prop_assert_eq!(part_sheet.get_value_at(pr, pc), whole_sheet.get_value_at(wr, wc));
                let part_style = part_sheet.cell_style_at(pr, pc).unwrap();
                let whole_style = whole_sheet.cell_style_at(wr, wc).unwrap();
                prop_assert_eq!(
                    &part.book().named_style(part_style).unwrap().style,
                    &whole.book().named_style(whole_style).unwrap().style
                );
                if r == 0 {
                    prop_assert_eq!(part_sheet.column_width(pc), whole_sheet.column_width(wc));
                }
            }
        }
    }
}
