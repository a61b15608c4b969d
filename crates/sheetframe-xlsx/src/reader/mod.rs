//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{attr_flag, attr_string, attr_u32, read_styles_xml, ParsedStyles};
use crate::theme;
use sheetframe_core::{
    AutoFilter, CellAddress, CellRange, CellValue, Hyperlink, SheetProtection, Table,
    TableColumn, TableStyleInfo, Workbook, Worksheet,
};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode control characters in XML,
/// e.g. `_x000d_` for CR and `_x005f_` for an escaped underscore.
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut decoded = None;
        let consumed_x = chars.peek() == Some(&'x');

        if consumed_x {
            chars.next();
            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }
            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next();
                decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
            }
        }

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                // Not an escape: re-emit what was consumed
                result.push('_');
                if consumed_x {
                    result.push('x');
                }
                result.push_str(&hex_chars);
            }
        }
    }

    result
}

/// One `<Relationship>` of a `.rels` part
#[derive(Debug, Clone)]
struct Relationship {
    rel_type: String,
    /// Archive path, or the raw target for external relationships
    target: String,
    external: bool,
}

impl Relationship {
    fn is(&self, kind: &str) -> bool {
        self.rel_type.rsplit('/').next() == Some(kind)
    }
}

/// Resolve a relationship target against the directory of its source part
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut parts: Vec<&str> = base_dir.split('/').filter(|p| !p.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// `.rels` path of a part (`xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`)
fn rels_path_for(part: &str) -> (String, String) {
    match part.rsplit_once('/') {
        Some((dir, file)) => (format!("{}/_rels/{}.rels", dir, file), dir.to_string()),
        None => (format!("_rels/{}.rels", part), String::new()),
    }
}

/// Worksheet elements that refer to other parts, resolved after the sheet
#[derive(Debug, Default)]
struct PendingSheetRefs {
    /// (row, col, r:id, hyperlink without target)
    hyperlinks: Vec<(u32, u16, Option<String>, Hyperlink)>,
    table_ids: Vec<String>,
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let styles = Self::read_styles(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let workbook_rels = Self::read_rels(&mut archive, "xl/_rels/workbook.xml.rels", "xl")?
            .ok_or_else(|| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut workbook = Workbook::empty();

        for named in styles.named_styles.iter().cloned() {
            if named.name == "Normal" {
                workbook.named_styles_mut().set_normal(named.style);
            } else if let Err(e) = workbook.add_named_style(named) {
                log::warn!("skipping cell style: {e}");
            }
        }

        if let Some(rel) = workbook_rels.values().find(|r| r.is("theme")) {
            let target = rel.target.clone();
            match archive.by_name(&target) {
                Ok(file) => {
                    if let Some(colors) = theme::read_theme_colors(file)? {
                        workbook.set_theme_colors(colors);
                    }
                }
                Err(_) => log::warn!("theme part {target} is missing"),
            }
        }

        if let Some(rel) = workbook_rels.values().find(|r| r.is("vbaProject")) {
            let target = rel.target.clone();
            if let Ok(mut file) = archive.by_name(&target) {
                let mut data = Vec::new();
                file.read_to_end(&mut data)?;
                workbook.set_vba_project(Some(data));
            }
        }

        for (name, r_id) in &sheet_info {
            let Some(rel) = workbook_rels.get(r_id) else {
                log::warn!("sheet {name:?} has no relationship {r_id}; skipped");
                continue;
            };
            let path = rel.target.clone();

            let mut sheet = Worksheet::new(name.as_str());
            let pending =
                Self::read_worksheet(&mut archive, &path, &mut sheet, &shared_strings, &styles)?;
            Self::resolve_sheet_refs(&mut archive, &path, &mut sheet, pending)?;
            workbook.add_existing_worksheet(sheet)?;
        }

        if workbook.sheet_count() == 0 {
            workbook.add_worksheet_with_name("Sheet1")?;
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs are not part of the cell text
        let mut in_rph = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_rph = true,
                    b"t" if in_si && !in_rph => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_rph = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<ParsedStyles> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file),
            Err(_) => Ok(ParsedStyles::default()),
        }
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    if let (Some(name), Some(r_id)) =
                        (attr_string(&e, b"name"), attr_string(&e, b"r:id"))
                    {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read a `.rels` part; `None` when the part does not exist
    fn read_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        base_dir: &str,
    ) -> XlsxResult<Option<HashMap<String, Relationship>>> {
        let file = match archive.by_name(path) {
            Ok(f) => f,
            Err(_) => return Ok(None),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_string(&e, b"Id");
                    let target = attr_string(&e, b"Target");
                    let rel_type = attr_string(&e, b"Type");
                    let external = attr_string(&e, b"TargetMode")
                        .map(|m| m.eq_ignore_ascii_case("External"))
                        .unwrap_or(false);

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        let target = if external {
                            target
                        } else {
                            resolve_target(base_dir, &target)
                        };
                        rels.insert(
                            id,
                            Relationship {
                                rel_type,
                                target,
                                external,
                            },
                        );
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Some(rels))
    }

    /// Read a worksheet from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        styles: &ParsedStyles,
    ) -> XlsxResult<PendingSheetRefs> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut pending = PendingSheetRefs::default();

        // Current cell state
        let mut current_cell_ref: Option<String> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_cell_style: Option<u32> = None;
        let mut current_value: Option<String> = None;
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            buf.clear();
            let (e, is_empty) = match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => (e, false),
                Ok(Event::Empty(e)) => (e, true),
                Ok(Event::End(e)) => {
                    match e.name().as_ref() {
                        b"c" => {
                            if let Some(cell_ref) = current_cell_ref.take() {
                                Self::process_cell(
                                    worksheet,
                                    &cell_ref,
                                    current_cell_type.as_deref(),
                                    current_value.as_deref(),
                                    current_cell_style,
                                    shared_strings,
                                    styles,
                                )?;
                            }
                            in_cell = false;
                        }
                        b"v" => in_value = false,
                        b"is" => in_inline_str = false,
                        b"t" => in_inline_text = false,
                        _ => {}
                    }
                    continue;
                }
                Ok(Event::Text(e)) => {
                    if in_value || in_inline_text {
                        if let Ok(text) = e.unescape() {
                            current_value.get_or_insert_with(String::new).push_str(&text);
                        }
                    }
                    continue;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => continue,
            };

            match e.name().as_ref() {
                b"sheetView" => {
                    if attr_flag(&e, b"rightToLeft").unwrap_or(false) {
                        worksheet.set_right_to_left(true);
                    }
                }
                b"col" => Self::read_col(&e, worksheet),
                b"row" => Self::read_row(&e, worksheet),
                b"c" => {
                    current_cell_ref = attr_string(&e, b"r");
                    current_cell_type = attr_string(&e, b"t");
                    current_cell_style = attr_u32(&e, b"s");
                    current_value = None;
                    in_cell = !is_empty;

                    if is_empty {
                        if let Some(cell_ref) = current_cell_ref.take() {
                            Self::process_cell(
                                worksheet,
                                &cell_ref,
                                current_cell_type.as_deref(),
                                None,
                                current_cell_style,
                                shared_strings,
                                styles,
                            )?;
                        }
                    }
                }
                b"v" if in_cell && !is_empty => in_value = true,
                b"is" if in_cell && !is_empty => in_inline_str = true,
                b"t" if in_inline_str && !is_empty => in_inline_text = true,
                b"sheetProtection" => {
                    if attr_flag(&e, b"sheet").unwrap_or(false) {
                        worksheet.set_protection(Some(SheetProtection {
                            sheet: true,
                            allow_auto_filter: attr_flag(&e, b"autoFilter") == Some(false),
                        }));
                    }
                }
                b"autoFilter" => {
                    if let Some(range) = attr_string(&e, b"ref").and_then(|r| parse_ref(&r)) {
                        worksheet.set_auto_filter(Some(AutoFilter::new(range)));
                    }
                }
                b"hyperlink" => {
                    if let Some(addr) = attr_string(&e, b"ref")
                        .and_then(|r| parse_ref(&r))
                        .map(|range| range.start)
                    {
                        let link = Hyperlink {
                            target: None,
                            location: attr_string(&e, b"location"),
                            tooltip: attr_string(&e, b"tooltip"),
                            display: attr_string(&e, b"display"),
                        };
                        pending
                            .hyperlinks
                            .push((addr.row, addr.col, attr_string(&e, b"r:id"), link));
                    }
                }
                b"tablePart" => {
                    if let Some(r_id) = attr_string(&e, b"r:id") {
                        pending.table_ids.push(r_id);
                    }
                }
                _ => {}
            }
        }

        Ok(pending)
    }

    fn read_col(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let (Some(min), Some(max)) = (attr_u32(e, b"min"), attr_u32(e, b"max")) else {
            return;
        };
        let custom_width = attr_flag(e, b"customWidth").unwrap_or(false);
        let width = attr_string(e, b"width").and_then(|w| w.parse::<f64>().ok());
        let hidden = attr_flag(e, b"hidden").unwrap_or(false);

        // Whole-sheet `max` values would allocate every column
        let max = max.min(sheetframe_core::MAX_COLS as u32);
        for n in min.max(1)..=max {
            let col = (n - 1) as u16;
            if custom_width {
                if let Some(w) = width {
                    worksheet.set_column_width(col, w);
                }
            }
            if hidden {
                worksheet.set_column_hidden(col, true);
            }
        }
    }

    fn read_row(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let Some(row_num) = attr_u32(e, b"r") else {
            return;
        };
        let row_idx = row_num.saturating_sub(1);
        if attr_flag(e, b"customHeight").unwrap_or(false) {
            if let Some(h) = attr_string(e, b"ht").and_then(|s| s.parse::<f64>().ok()) {
                worksheet.set_row_height(row_idx, h);
            }
        }
        if attr_flag(e, b"hidden").unwrap_or(false) {
            worksheet.set_row_hidden(row_idx, true);
        }
    }

    /// Process a cell and add it to the worksheet
    fn process_cell(
        worksheet: &mut Worksheet,
        cell_ref: &str,
        cell_type: Option<&str>,
        value: Option<&str>,
        style_idx: Option<u32>,
        shared_strings: &[String],
        styles: &ParsedStyles,
    ) -> XlsxResult<()> {
        let addr = CellAddress::parse(cell_ref).map_err(|e| {
            XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, e))
        })?;

        if let Some(value) = value {
            let cell_value = match cell_type {
                Some("s") => {
                    let idx: usize = value.trim().parse().map_err(|_| {
                        XlsxError::Parse(format!("Invalid shared string index: {}", value))
                    })?;
                    let s = shared_strings.get(idx).ok_or_else(|| {
                        XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                    })?;
                    CellValue::String(s.clone())
                }
                Some("b") => {
                    let v = value.trim();
                    CellValue::Boolean(v == "1" || v.eq_ignore_ascii_case("true"))
                }
                Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),
                None | Some("n") => match value.trim().parse::<f64>() {
                    Ok(n) => CellValue::Number(n),
                    Err(_) => CellValue::String(value.to_string()),
                },
                // Errors and unknown types keep their text
                Some(_) => CellValue::String(value.to_string()),
            };
            worksheet.set_cell_value_at(addr.row, addr.col, cell_value)?;
        }

        if let Some(s) = style_idx.filter(|&s| s != 0) {
            match styles.name_for_xf(s) {
                Some("Normal") => {}
                Some(name) => worksheet.set_cell_style_at(addr.row, addr.col, name)?,
                None => log::warn!("{cell_ref}: style index {s} has no named style"),
            }
        }

        Ok(())
    }

    /// Attach hyperlinks and tables that live in other parts
    fn resolve_sheet_refs<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        sheet_path: &str,
        worksheet: &mut Worksheet,
        pending: PendingSheetRefs,
    ) -> XlsxResult<()> {
        if pending.hyperlinks.is_empty() && pending.table_ids.is_empty() {
            return Ok(());
        }

        let (rels_path, base_dir) = rels_path_for(sheet_path);
        let rels = Self::read_rels(archive, &rels_path, &base_dir)?.unwrap_or_default();

        for (row, col, r_id, mut link) in pending.hyperlinks {
            if let Some(rel) = r_id.as_ref().and_then(|id| rels.get(id)) {
                link.target = Some(rel.target.clone());
            }
            if link.target.is_none() && link.location.is_none() {
                log::warn!("hyperlink at row {} col {} has no target; skipped", row + 1, col + 1);
                continue;
            }
            worksheet.set_hyperlink_at(row, col, link)?;
        }

        for r_id in pending.table_ids {
            let Some(rel) = rels.get(&r_id).filter(|r| !r.external) else {
                log::warn!("table relationship {r_id} not found in {rels_path}");
                continue;
            };
            let target = rel.target.clone();
            match archive.by_name(&target) {
                Ok(file) => {
                    if let Some(table) = read_table_xml(file)? {
                        worksheet.push_table(table);
                    }
                }
                Err(_) => log::warn!("table part {target} is missing"),
            }
        }

        Ok(())
    }
}

fn parse_ref(reference: &str) -> Option<CellRange> {
    let reference = reference.split_whitespace().next()?;
    if reference.contains(':') {
        CellRange::parse(reference).ok()
    } else {
        CellAddress::parse(reference)
            .ok()
            .map(|a| CellRange::new(a, a))
    }
}

/// Read `xl/tables/tableN.xml`
fn read_table_xml<R: Read>(reader: R) -> XlsxResult<Option<Table>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut name = None;
    let mut display_name = None;
    let mut range = None;
    let mut auto_filter = false;
    let mut columns = Vec::new();
    let mut style = TableStyleInfo {
        name: None,
        ..TableStyleInfo::default()
    };
    // autoFilter elements nested in columns are not the table's
    let mut depth = 0usize;

    loop {
        buf.clear();
        let (e, is_empty) = match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => (e, false),
            Ok(Event::Empty(e)) => (e, true),
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
                continue;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => continue,
        };

        match e.name().as_ref() {
            b"table" => {
                name = attr_string(&e, b"name");
                display_name = attr_string(&e, b"displayName");
                range = attr_string(&e, b"ref").and_then(|r| parse_ref(&r));
            }
            b"autoFilter" if depth == 1 => auto_filter = true,
            b"tableColumn" => {
                if let Some(col_name) = attr_string(&e, b"name") {
                    columns.push(TableColumn::new(col_name));
                }
            }
            b"tableStyleInfo" => {
                style.name = attr_string(&e, b"name");
                style.show_first_column = attr_flag(&e, b"showFirstColumn").unwrap_or(false);
                style.show_last_column = attr_flag(&e, b"showLastColumn").unwrap_or(false);
                style.show_row_stripes = attr_flag(&e, b"showRowStripes").unwrap_or(false);
                style.show_column_stripes = attr_flag(&e, b"showColumnStripes").unwrap_or(false);
            }
            _ => {}
        }
        if !is_empty {
            depth += 1;
        }
    }

    let (Some(name), Some(range)) = (name, range) else {
        log::warn!("table part without name or ref; skipped");
        return Ok(None);
    };
    Ok(Some(Table {
        display_name: display_name.unwrap_or_else(|| name.clone()),
        name,
        range,
        columns,
        style,
        auto_filter,
    }))
}
