//! XLSX writer

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{escape_xml, XlsxStyleTable};
use crate::theme;
use sheetframe_core::{
    CellAddress, CellData, CellValue, Hyperlink, Table, Workbook, Worksheet, DEFAULT_COLUMN_WIDTH,
};

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Options controlling how a workbook is packaged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XlsxWriterOptions {
    /// Write the macro-enabled (`.xlsm`) main content type and keep the
    /// workbook's VBA project
    pub macro_enabled: bool,
}

impl XlsxWriterOptions {
    /// Options matching a file name's extension (`.xlsm` is macro-enabled)
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        let macro_enabled = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("xlsm"))
            .unwrap_or(false);
        Self { macro_enabled }
    }
}

/// Shared string table built in first-use order
#[derive(Debug, Default)]
struct SharedStrings<'a> {
    strings: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    total: usize,
}

impl<'a> SharedStrings<'a> {
    fn build(workbook: &'a Workbook) -> Self {
        let mut table = Self::default();
        for sheet in workbook.worksheets() {
            for (_, _, cell) in sheet.iter_cells() {
                if let CellValue::String(s) = &cell.value {
                    table.intern(s);
                }
            }
        }
        table
    }

    fn intern(&mut self, s: &'a str) -> usize {
        self.total += 1;
        if let Some(&i) = self.index.get(s) {
            return i;
        }
        let i = self.strings.len();
        self.strings.push(s);
        self.index.insert(s, i);
        i
    }

    fn get(&self, s: &str) -> Option<usize> {
        self.index.get(s).copied()
    }
}

/// Relationship ids of one worksheet's parts
#[derive(Debug, Default)]
struct SheetParts {
    /// (row, col) -> rId of an external hyperlink
    hyperlink_ids: BTreeMap<(u32, u16), usize>,
    /// Workbook-wide table numbers with their rIds
    table_ids: Vec<(usize, usize)>,
}

impl SheetParts {
    fn has_rels(&self) -> bool {
        !self.hyperlink_ids.is_empty() || !self.table_ids.is_empty()
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path; `.xlsm` paths are written macro-enabled
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let options = XlsxWriterOptions::for_path(&path);
        let file = File::create(path)?;
        Self::write_with_options(workbook, file, &options)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        Self::write_with_options(workbook, writer, &XlsxWriterOptions::default())
    }

    /// Write a workbook to a writer with explicit packaging options
    pub fn write_with_options<W: Write + Seek>(
        workbook: &Workbook,
        writer: W,
        options: &XlsxWriterOptions,
    ) -> XlsxResult<()> {
        if workbook.sheet_count() == 0 {
            return Err(XlsxError::EmptyWorkbook);
        }

        let mut zip = zip::ZipWriter::new(writer);

        let style_table = XlsxStyleTable::build(workbook);
        let shared = SharedStrings::build(workbook);
        let vba = if options.macro_enabled {
            workbook.vba_project()
        } else {
            None
        };

        // Hyperlink and table relationship ids per sheet; table numbers are
        // global across the workbook.
        let mut next_table = 1;
        let parts: Vec<SheetParts> = workbook
            .worksheets()
            .map(|sheet| {
                let mut parts = SheetParts::default();
                let mut rid = 1;
                for (row, col, link) in sheet.hyperlinks() {
                    if link.is_external() {
                        parts.hyperlink_ids.insert((row, col), rid);
                        rid += 1;
                    }
                }
                for _ in sheet.tables() {
                    parts.table_ids.push((next_table, rid));
                    next_table += 1;
                    rid += 1;
                }
                parts
            })
            .collect();

        Self::write_content_types(&mut zip, workbook, &parts, options, vba.is_some())?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook, vba.is_some())?;
        Self::write_styles_xml(&mut zip, &style_table)?;
        Self::write_theme(&mut zip, workbook)?;
        Self::write_shared_strings(&mut zip, &shared)?;

        for (i, (sheet, sheet_parts)) in workbook.worksheets().zip(&parts).enumerate() {
            Self::write_worksheet(&mut zip, sheet, i, sheet_parts, &style_table, &shared)?;

            if sheet_parts.has_rels() {
                Self::write_worksheet_rels(&mut zip, sheet, i, sheet_parts)?;
            }
            for (table, (table_no, _)) in sheet.tables().iter().zip(&sheet_parts.table_ids) {
                Self::write_table(&mut zip, table, *table_no)?;
            }
        }

        if let Some(data) = vba {
            zip.start_file("xl/vbaProject.bin", zip::write::SimpleFileOptions::default())?;
            zip.write_all(data)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        parts: &[SheetParts],
        options: &XlsxWriterOptions,
        has_vba: bool,
    ) -> XlsxResult<()> {
        zip.start_file("[Content_Types].xml", zip::write::SimpleFileOptions::default())?;

        let main_type = if options.macro_enabled {
            "application/vnd.ms-excel.sheet.macroEnabled.main+xml"
        } else {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"
        };

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>"#,
        );
        if has_vba {
            content.push_str(
                r#"
    <Default Extension="bin" ContentType="application/vnd.ms-office.vbaProject"/>"#,
            );
        }
        content.push_str(&format!(
            r#"
    <Override PartName="/xl/workbook.xml" ContentType="{}"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
            main_type
        ));

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        for (table_no, _) in parts.iter().flat_map(|p| p.table_ids.iter()) {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/tables/table{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.table+xml"/>"#,
                table_no
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        zip.start_file("_rels/.rels", zip::write::SimpleFileOptions::default())?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("xl/workbook.xml", zip::write::SimpleFileOptions::default())?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}">
    <bookViews>
        <workbookView activeTab="0"/>
    </bookViews>
    <sheets>"#,
            MAIN_NS, REL_NS
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }
        content.push_str("\n    </sheets>");

        // Sheet-level auto-filters need the hidden filter database name
        let filters: Vec<String> = workbook
            .worksheets()
            .enumerate()
            .filter_map(|(i, sheet)| {
                sheet.auto_filter().map(|filter| {
                    format!(
                        r#"
        <definedName name="_xlnm._FilterDatabase" localSheetId="{}" hidden="1">{}!{}</definedName>"#,
                        i,
                        escape_xml(&quote_sheet_name(sheet.name())),
                        filter.range.to_absolute()
                    )
                })
            })
            .collect();
        if !filters.is_empty() {
            content.push_str("\n    <definedNames>");
            for f in filters {
                content.push_str(&f);
            }
            content.push_str("\n    </definedNames>");
        }

        content.push_str("\n</workbook>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        has_vba: bool,
    ) -> XlsxResult<()> {
        zip.start_file(
            "xl/_rels/workbook.xml.rels",
            zip::write::SimpleFileOptions::default(),
        )?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let base = workbook.sheet_count();
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
            base + 1,
            base + 2,
            base + 3
        ));
        if has_vba {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.microsoft.com/office/2006/relationships/vbaProject" Target="vbaProject.bin"/>"#,
                base + 4
            ));
        }

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        style_table: &XlsxStyleTable,
    ) -> XlsxResult<()> {
        zip.start_file("xl/styles.xml", zip::write::SimpleFileOptions::default())?;
        zip.write_all(style_table.to_styles_xml().as_bytes())?;
        Ok(())
    }

    fn write_theme<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        zip.start_file("xl/theme/theme1.xml", zip::write::SimpleFileOptions::default())?;
        zip.write_all(theme::to_theme_xml(workbook.theme_colors()).as_bytes())?;
        Ok(())
    }

    fn write_shared_strings<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        shared: &SharedStrings<'_>,
    ) -> XlsxResult<()> {
        zip.start_file("xl/sharedStrings.xml", zip::write::SimpleFileOptions::default())?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            MAIN_NS,
            shared.total,
            shared.strings.len()
        );
        for s in &shared.strings {
            content.push_str("\n    <si>");
            content.push_str(&text_element(s));
            content.push_str("</si>");
        }
        content.push_str("\n</sst>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
        parts: &SheetParts,
        style_table: &XlsxStyleTable,
        shared: &SharedStrings<'_>,
    ) -> XlsxResult<()> {
        zip.start_file(
            format!("xl/worksheets/sheet{}.xml", index + 1),
            zip::write::SimpleFileOptions::default(),
        )?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}" xmlns:r="{}">"#,
            MAIN_NS, REL_NS
        );

        let dimension = sheet
            .dimension()
            .map(|r| {
                if r.start == r.end {
                    r.start.to_a1_string()
                } else {
                    r.to_string()
                }
            })
            .unwrap_or_else(|| "A1".to_string());
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));

        let tab_selected = if index == 0 { " tabSelected=\"1\"" } else { "" };
        let rtl = if sheet.is_right_to_left() {
            " rightToLeft=\"1\""
        } else {
            ""
        };
        content.push_str(&format!(
            "\n    <sheetViews>\n        <sheetView{}{} workbookViewId=\"0\"/>\n    </sheetViews>",
            tab_selected, rtl
        ));
        content.push_str(&format!(
            "\n    <sheetFormatPr defaultRowHeight=\"{}\"/>",
            sheetframe_core::DEFAULT_ROW_HEIGHT
        ));

        Self::write_cols(&mut content, sheet);
        Self::write_sheet_data(&mut content, sheet, style_table, shared);

        if let Some(protection) = sheet.protection().filter(|p| p.sheet) {
            let filter = if protection.allow_auto_filter {
                " autoFilter=\"0\""
            } else {
                ""
            };
            content.push_str(&format!(
                "\n    <sheetProtection sheet=\"1\" objects=\"1\" scenarios=\"1\"{}/>",
                filter
            ));
        }

        if let Some(filter) = sheet.auto_filter() {
            content.push_str(&format!("\n    <autoFilter ref=\"{}\"/>", filter.range));
        }

        Self::write_hyperlinks(&mut content, sheet, parts);

        if !parts.table_ids.is_empty() {
            content.push_str(&format!(
                "\n    <tableParts count=\"{}\">",
                parts.table_ids.len()
            ));
            for (_, rid) in &parts.table_ids {
                content.push_str(&format!("\n        <tablePart r:id=\"rId{}\"/>", rid));
            }
            content.push_str("\n    </tableParts>");
        }

        content.push_str("\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_cols(content: &mut String, sheet: &Worksheet) {
        let cols: Vec<_> = sheet
            .columns()
            .filter(|(_, c)| c.has_custom_settings())
            .collect();
        if cols.is_empty() {
            return;
        }

        content.push_str("\n    <cols>");
        for (col, column) in cols {
            let n = col as u32 + 1;
            let mut attrs = format!(
                " min=\"{}\" max=\"{}\" width=\"{}\"",
                n,
                n,
                column.width.unwrap_or(DEFAULT_COLUMN_WIDTH)
            );
            if column.width.is_some() {
                attrs.push_str(" customWidth=\"1\"");
            }
            if column.hidden {
                attrs.push_str(" hidden=\"1\"");
            }
            content.push_str(&format!("\n        <col{}/>", attrs));
        }
        content.push_str("\n    </cols>");
    }

    fn write_sheet_data(
        content: &mut String,
        sheet: &Worksheet,
        style_table: &XlsxStyleTable,
        shared: &SharedStrings<'_>,
    ) {
        // Rows with cells or with custom dimensions, sparse and row-major
        let mut rows: BTreeMap<u32, Vec<(u16, &CellData)>> = BTreeMap::new();
        for (row, col, cell) in sheet.iter_cells() {
            rows.entry(row).or_default().push((col, cell));
        }
        for (row, dims) in sheet.rows() {
            if dims.has_custom_settings() {
                rows.entry(row).or_default();
            }
        }

        if rows.is_empty() {
            content.push_str("\n    <sheetData/>");
            return;
        }

        content.push_str("\n    <sheetData>");
        for (row, cells) in rows {
            let mut attrs = format!(" r=\"{}\"", row + 1);
            if let Some(dims) = sheet.row(row) {
                if let Some(height) = dims.height {
                    attrs.push_str(&format!(" ht=\"{}\" customHeight=\"1\"", height));
                }
                if dims.hidden {
                    attrs.push_str(" hidden=\"1\"");
                }
            }

            if cells.is_empty() {
                content.push_str(&format!("\n        <row{}/>", attrs));
                continue;
            }

            content.push_str(&format!("\n        <row{}>", attrs));
            for (col, cell) in cells {
                Self::write_cell(content, row, col, cell, style_table, shared);
            }
            content.push_str("\n        </row>");
        }
        content.push_str("\n    </sheetData>");
    }

    fn write_cell(
        content: &mut String,
        row: u32,
        col: u16,
        cell: &CellData,
        style_table: &XlsxStyleTable,
        shared: &SharedStrings<'_>,
    ) {
        let cell_ref = CellAddress::new(row, col).to_a1_string();
        let xf_id = style_table.xf_id_for(cell.style.as_deref());
        let style_attr = if xf_id != 0 {
            format!(" s=\"{}\"", xf_id)
        } else {
            String::new()
        };

        match &cell.value {
            CellValue::Number(n) if n.is_finite() => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}><v>{}</v></c>",
                    cell_ref, style_attr, n
                ));
            }
            CellValue::Number(n) => {
                log::warn!("{cell_ref}: {n} cannot be stored; writing an empty cell");
                content.push_str(&format!("\n            <c r=\"{}\"{}/>", cell_ref, style_attr));
            }
            CellValue::String(s) => match shared.get(s) {
                Some(i) => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"s\"><v>{}</v></c>",
                    cell_ref, style_attr, i
                )),
                None => content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is>{}</is></c>",
                    cell_ref,
                    style_attr,
                    text_element(s)
                )),
            },
            CellValue::Boolean(b) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    style_attr,
                    if *b { 1 } else { 0 }
                ));
            }
            CellValue::Empty => {
                // Preserve style-only and hyperlink-only cells
                if xf_id != 0 || cell.hyperlink.is_some() {
                    content.push_str(&format!("\n            <c r=\"{}\"{}/>", cell_ref, style_attr));
                }
            }
        }
    }

    fn write_hyperlinks(content: &mut String, sheet: &Worksheet, parts: &SheetParts) {
        let links: Vec<(u32, u16, &Hyperlink)> = sheet.hyperlinks().collect();
        if links.is_empty() {
            return;
        }

        content.push_str("\n    <hyperlinks>");
        for (row, col, link) in links {
            let mut attrs = format!(" ref=\"{}\"", CellAddress::new(row, col).to_a1_string());
            if let Some(rid) = parts.hyperlink_ids.get(&(row, col)) {
                attrs.push_str(&format!(" r:id=\"rId{}\"", rid));
            }
            if let Some(location) = &link.location {
                attrs.push_str(&format!(" location=\"{}\"", escape_xml(location)));
            }
            if let Some(tooltip) = &link.tooltip {
                attrs.push_str(&format!(" tooltip=\"{}\"", escape_xml(tooltip)));
            }
            if let Some(display) = &link.display {
                attrs.push_str(&format!(" display=\"{}\"", escape_xml(display)));
            }
            content.push_str(&format!("\n        <hyperlink{}/>", attrs));
        }
        content.push_str("\n    </hyperlinks>");
    }

    /// Write worksheet relationships file (hyperlinks and tables)
    fn write_worksheet_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        sheet_index: usize,
        parts: &SheetParts,
    ) -> XlsxResult<()> {
        zip.start_file(
            format!("xl/worksheets/_rels/sheet{}.xml.rels", sheet_index + 1),
            zip::write::SimpleFileOptions::default(),
        )?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for ((row, col), rid) in &parts.hyperlink_ids {
            let target = sheet
                .hyperlink_at(*row, *col)
                .and_then(|l| l.target.as_deref())
                .unwrap_or_default();
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{}" TargetMode="External"/>"#,
                rid,
                escape_xml(target)
            ));
        }

        for (table_no, rid) in &parts.table_ids {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/table" Target="../tables/table{}.xml"/>"#,
                rid, table_no
            ));
        }

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_table<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        table: &Table,
        table_no: usize,
    ) -> XlsxResult<()> {
        zip.start_file(
            format!("xl/tables/table{}.xml", table_no),
            zip::write::SimpleFileOptions::default(),
        )?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<table xmlns="{}" id="{}" name="{}" displayName="{}" ref="{}" totalsRowShown="0">"#,
            MAIN_NS,
            table_no,
            escape_xml(&table.name),
            escape_xml(&table.display_name),
            table.range
        );

        if table.auto_filter {
            content.push_str(&format!("\n    <autoFilter ref=\"{}\"/>", table.range));
        }

        content.push_str(&format!(
            "\n    <tableColumns count=\"{}\">",
            table.columns.len()
        ));
        for (i, column) in table.columns.iter().enumerate() {
            content.push_str(&format!(
                "\n        <tableColumn id=\"{}\" name=\"{}\"/>",
                i + 1,
                escape_xml(&column.name)
            ));
        }
        content.push_str("\n    </tableColumns>");

        let style = &table.style;
        let name_attr = style
            .name
            .as_ref()
            .map(|n| format!(" name=\"{}\"", escape_xml(n)))
            .unwrap_or_default();
        content.push_str(&format!(
            "\n    <tableStyleInfo{} showFirstColumn=\"{}\" showLastColumn=\"{}\" showRowStripes=\"{}\" showColumnStripes=\"{}\"/>",
            name_attr,
            style.show_first_column as u8,
            style.show_last_column as u8,
            style.show_row_stripes as u8,
            style.show_column_stripes as u8
        ));

        content.push_str("\n</table>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// `<t>` element, preserving leading/trailing whitespace
fn text_element(s: &str) -> String {
    let preserve = s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace);
    if preserve {
        format!("<t xml:space=\"preserve\">{}</t>", escape_xml(s))
    } else {
        format!("<t>{}</t>", escape_xml(s))
    }
}

/// Quote a sheet name for use in a formula reference when needed
fn quote_sheet_name(name: &str) -> String {
    let plain = name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if plain {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut s = String::new();
        file.read_to_string(&mut s).unwrap();
        s
    }

    fn write(workbook: &Workbook, options: &XlsxWriterOptions) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        XlsxWriter::write_with_options(workbook, &mut buf, options).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_options_from_extension() {
        assert!(XlsxWriterOptions::for_path("a/b.XLSM").macro_enabled);
        assert!(!XlsxWriterOptions::for_path("a/b.xlsx").macro_enabled);
        assert!(!XlsxWriterOptions::for_path("noext").macro_enabled);
    }

    #[test]
    fn test_macro_enabled_content_type() {
        let mut wb = Workbook::new();
        wb.set_vba_project(Some(vec![1, 2, 3]));
        let bytes = write(&wb, &XlsxWriterOptions { macro_enabled: true });
        let types = part(&bytes, "[Content_Types].xml");
        assert!(types.contains("macroEnabled.main+xml"));
        assert!(types.contains("vbaProject"));

        let bytes = write(&wb, &XlsxWriterOptions::default());
        let types = part(&bytes, "[Content_Types].xml");
        assert!(types.contains("spreadsheetml.sheet.main+xml"));
        assert!(!types.contains("vbaProject"));
    }

    #[test]
    fn test_shared_strings_deduplicated() {
        let mut wb = Workbook::new();
        let sheet = wb.worksheet_mut(0).unwrap();
        sheet.set_cell_value("A1", "x").unwrap();
        sheet.set_cell_value("A2", "x").unwrap();
        sheet.set_cell_value("A3", " y").unwrap();
        let bytes = write(&wb, &XlsxWriterOptions::default());
        let sst = part(&bytes, "xl/sharedStrings.xml");
        assert!(sst.contains("count=\"3\" uniqueCount=\"2\""));
        assert!(sst.contains("<t xml:space=\"preserve\"> y</t>"));
    }

    #[test]
    fn test_empty_workbook_rejected() {
        let wb = Workbook::empty();
        let mut buf = Cursor::new(Vec::new());
        assert!(matches!(
            XlsxWriter::write(&wb, &mut buf),
            Err(XlsxError::EmptyWorkbook)
        ));
    }

    #[test]
    fn test_quote_sheet_name() {
        assert_eq!(quote_sheet_name("Sheet1"), "Sheet1");
        assert_eq!(quote_sheet_name("My Sheet"), "'My Sheet'");
        assert_eq!(quote_sheet_name("it's"), "'it''s'");
    }
}
