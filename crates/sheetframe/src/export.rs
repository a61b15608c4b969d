//! Export onto a worksheet
//!
//! Exporting runs in two phases. [`ExportPlan`] resolves everything that
//! can fail on bad input (sheet name, layout bounds, style merge, table
//! name, hidden columns, fitted widths) without touching the destination.
//! Applying the plan then writes data, styles and sheet settings.

use std::path::Path;

use ahash::{AHashMap, AHashSet};
use sheetframe_core::{
    AutoFilter, CellRange, NamedStyle, SheetProtection, Table, TableStyleInfo, Workbook,
    Worksheet,
};

use crate::access::LabelSel;
use crate::autofit::FittedWidths;
use crate::data::{column_offset, row_offset};
use crate::error::{FrameError, Result};
use crate::frame::{LinkColumn, StyledFrame};
use crate::grid::Region;
use crate::options::{ExportOptions, TableOptions};
use crate::registry::{next_free_name, StyleId, StyleRegistry};
use crate::style::Style;
use crate::writer::ExcelWriter;

/// Where the frame lands on the sheet, 0-based
#[derive(Debug, Clone, Copy)]
struct Layout {
    index_col: Option<u16>,
    first_col: u16,
    header_row: Option<u32>,
    first_row: u32,
}

/// Named styles to bring into the destination workbook
#[derive(Debug, Default)]
struct StyleMerge {
    /// Name each used style is written under
    names: AHashMap<StyleId, String>,
    /// Builtins the workbook does not have yet
    builtins: Vec<String>,
    /// Definitions to add, renamed ones included
    added: Vec<NamedStyle>,
}

/// Everything an export needs, validated up front
#[derive(Debug)]
struct ExportPlan {
    layout: Layout,
    index_label: Option<String>,
    styles: StyleMerge,
    column_widths: Vec<f64>,
    index_width: f64,
    hidden: Vec<u16>,
    table: Option<Table>,
    filter: Option<CellRange>,
}

impl StyledFrame {
    /// Export into `writer`
    ///
    /// The workbook is saved only when `options.save` is `Some(true)`.
    pub fn to_excel(&self, writer: &mut ExcelWriter, options: &ExportOptions) -> Result<()> {
        let save = options.save.unwrap_or(false);
        self.export(writer, options, save)
    }

    /// Export into a new workbook at `path`
    ///
    /// The workbook is saved unless `options.save` is `Some(false)`.
    pub fn to_excel_path<P: AsRef<Path>>(
        &self,
        path: P,
        options: &ExportOptions,
    ) -> Result<ExcelWriter> {
        let mut writer = ExcelWriter::new(path)?;
        let save = options.save.unwrap_or(true);
        self.export(&mut writer, options, save)?;
        Ok(writer)
    }

    fn export(&self, writer: &mut ExcelWriter, options: &ExportOptions, save: bool) -> Result<()> {
        if self.table.is_some() && !options.write.header {
            return Err(FrameError::MissingHeaderForTable);
        }

        if let Some(columns) = &options.write.columns {
            let sub = self.loc(LabelSel::All, LabelSel::Many(columns.clone()))?;
            let mut options = options.clone();
            options.write.columns = None;
            return sub.export(writer, &options, save);
        }

        log::info!(
            "exporting {}x{} frame to sheet {:?}",
            self.data.n_rows(),
            self.data.n_cols(),
            options.sheet_name
        );

        let plan = self.plan(writer.book(), options)?;
        self.apply(writer.book_mut(), options, plan)?;

        if save {
            writer.save()?;
        }
        Ok(())
    }

    fn plan(&self, book: &Workbook, options: &ExportOptions) -> Result<ExportPlan> {
        let write = &options.write;
        let (n_rows, n_cols) = self.data.shape();

        let exists = book.sheet_index(&options.sheet_name).is_some();
        if !exists {
            book.validate_sheet_name(&options.sheet_name)?;
        }

        let layout = Layout {
            index_col: write.index.then_some(write.start_col),
            first_col: column_offset(write.start_col, usize::from(write.index))?,
            header_row: write.header.then_some(write.start_row),
            first_row: row_offset(write.start_row, usize::from(write.header))?,
        };
        let last_col = match n_cols {
            0 => None,
            n => Some(column_offset(layout.first_col, n - 1)?),
        };
        if n_rows > 0 {
            row_offset(layout.first_row, n_rows - 1)?;
        }

        let mut index_label = write
            .index_label
            .clone()
            .or_else(|| self.data.index().name().map(str::to_string))
            .filter(|label| !label.is_empty());
        if write.header && write.index && index_label.is_none() && self.table.is_some() {
            index_label = Some("index".to_string());
        }

        let styles = self.merge_styles(book);

        let mut column_widths = self.column_widths.clone();
        let mut index_width = self.index_width;
        if let Some(fit) = &options.auto_fit {
            let mut fit = fit.clone();
            fit.index = write.index;
            fit.include_header = write.header;
            let FittedWidths { columns, index } = self.fit_widths(&fit)?;
            for (col, width) in columns {
                column_widths[col] = width;
            }
            if let Some(width) = index {
                index_width = width;
            }
        }

        let hidden = options
            .columns_to_hide
            .iter()
            .map(|key| self.sheet_column(key, usize::from(layout.first_col)))
            .collect::<Result<Vec<_>>>()?;

        let left = layout.index_col.or(last_col.map(|_| layout.first_col));
        let table = match (&self.table, last_col) {
            (None, _) => None,
            (Some(_), None) => {
                return Err(FrameError::invalid("cannot format a frame without columns as a table"))
            }
            (Some(table), Some(last_col)) => Some(self.plan_table(
                book,
                options,
                table,
                index_label.as_deref(),
                CellRange::from_indices(
                    write.start_row,
                    left.unwrap_or(layout.first_col),
                    row_offset(write.start_row, n_rows)?,
                    last_col,
                ),
            )?),
        };

        let filter = match (options.add_filters && table.is_none(), left) {
            (true, Some(left)) => Some(CellRange::from_indices(
                write.start_row,
                left,
                write.start_row,
                last_col.unwrap_or(left),
            )),
            _ => None,
        };

        Ok(ExportPlan {
            layout,
            index_label,
            styles,
            column_widths,
            index_width,
            hidden,
            table,
            filter,
        })
    }

    /// Decide the destination name of every style the export writes
    ///
    /// A name already in the workbook is reused when the definitions match
    /// and replaced by the next free numbered name otherwise.
    fn merge_styles(&self, book: &Workbook) -> StyleMerge {
        let used: AHashSet<StyleId> = self
            .grid
            .iter()
            .chain(self.header.ids().iter().copied())
            .chain(self.index.ids().iter().copied())
            .collect();
        let theme = book.theme_colors();
        let mut merge = StyleMerge::default();
        let mut planned: AHashSet<String> = AHashSet::new();

        for (id, style) in self.registry.iter() {
            let builtin = self.registry.is_builtin(id);
            if builtin && !used.contains(&id) {
                continue;
            }
            let name = match book.named_style(&style.name) {
                None => {
                    if builtin {
                        merge.builtins.push(style.name.clone());
                    } else {
                        merge.added.push(style.to_external());
                    }
                    planned.insert(style.name.clone());
                    style.name.clone()
                }
                Some(existing) => {
                    let same = Style::from_external(existing, theme)
                        .map(|current| &current == style)
                        .unwrap_or(false);
                    if same {
                        style.name.clone()
                    } else {
                        let renamed = next_free_name(&style.name, |n| {
                            book.named_styles().contains(n)
                                || self.registry.contains(n)
                                || planned.contains(n)
                        });
                        log::debug!(
                            "style {:?} differs from the workbook's, writing it as {:?}",
                            style.name,
                            renamed
                        );
                        let mut copy = style.clone();
                        copy.name = renamed.clone();
                        merge.added.push(copy.to_external());
                        planned.insert(renamed.clone());
                        renamed
                    }
                }
            };
            merge.names.insert(id, name);
        }
        merge
    }

    fn plan_table(
        &self,
        book: &Workbook,
        options: &ExportOptions,
        table: &TableOptions,
        index_label: Option<&str>,
        range: CellRange,
    ) -> Result<Table> {
        // tables on a sheet being replaced go away with it
        let taken = |name: &str| {
            book.worksheets()
                .filter(|ws| !(options.replace_sheet && ws.name() == options.sheet_name))
                .flat_map(Worksheet::tables)
                .any(|t| t.name.eq_ignore_ascii_case(name))
        };

        let name = match &table.name {
            Some(name) if taken(name) => {
                return Err(FrameError::invalid(format!(
                    "table name {} is already used in the workbook",
                    name
                )))
            }
            Some(name) => name.clone(),
            None => {
                let mut n = 1usize;
                loop {
                    let candidate = format!("Table{}", n);
                    if !taken(&candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            }
        };

        let mut headers = Vec::with_capacity(self.data.n_cols() + 1);
        if options.write.index {
            headers.push(index_label.unwrap_or("index").to_string());
        }
        headers.extend(self.data.columns().labels().iter().map(|l| l.to_string()));

        log::debug!("table {} over {:?}", name, range);
        Ok(Table::new(name, range, headers).with_style(TableStyleInfo {
            name: table.style.clone(),
            show_first_column: table.first_column,
            show_last_column: table.last_column,
            show_row_stripes: table.row_stripes,
            show_column_stripes: table.col_stripes,
        }))
    }

    fn apply(&self, book: &mut Workbook, options: &ExportOptions, plan: ExportPlan) -> Result<()> {
        let ExportPlan {
            layout,
            index_label,
            styles,
            column_widths,
            index_width,
            hidden,
            table,
            filter,
        } = plan;
        let (n_rows, n_cols) = self.data.shape();

        if options.replace_sheet && book.sheet_index(&options.sheet_name).is_some() {
            log::debug!("replacing sheet {:?}", options.sheet_name);
            book.remove_worksheet_by_name(&options.sheet_name)?;
        }
        let sheet_index = match book.sheet_index(&options.sheet_name) {
            Some(i) => i,
            None => book.add_worksheet_with_name(&options.sheet_name)?,
        };

        let StyleMerge {
            names,
            builtins,
            added,
        } = styles;
        for name in &builtins {
            book.named_styles_mut().add_builtin(name)?;
        }
        for style in added {
            book.add_named_style(style)?;
        }

        let sheet = book
            .worksheet_mut(sheet_index)
            .ok_or_else(|| FrameError::invalid(format!("sheet {} vanished", options.sheet_name)))?;

        self.data.write_to(sheet, &options.write, index_label.as_deref())?;
        sheet.set_right_to_left(options.right_to_left);

        let name_of = |id: StyleId| written_name(&names, &self.registry, id);

        if let Some(col) = layout.index_col {
            if let (Some(row), Some(&first)) = (layout.header_row, self.header.ids().first()) {
                sheet.set_cell_style_at(row, col, name_of(first))?;
            }
            for r in 0..n_rows {
                let row = row_offset(layout.first_row, r)?;
                sheet.set_cell_style_at(row, col, name_of(self.index.get(r, 0)))?;
            }
            sheet.set_column_width(col, index_width);
        }

        if let Some(row) = layout.header_row {
            for (c, id) in self.header.ids().iter().enumerate() {
                sheet.set_cell_style_at(row, column_offset(layout.first_col, c)?, name_of(*id))?;
            }
            sheet.set_row_height(row, self.header_height);
        }

        for c in 0..n_cols {
            let col = column_offset(layout.first_col, c)?;
            for (r, id) in self.grid.column(c).enumerate() {
                sheet.set_cell_style_at(row_offset(layout.first_row, r)?, col, name_of(id))?;
            }
        }

        for (column, r, link) in self.hyperlinks.iter() {
            if r >= n_rows {
                continue;
            }
            let col = match column {
                LinkColumn::Index => match layout.index_col {
                    Some(col) => col,
                    None => continue,
                },
                LinkColumn::Label(label) => match self.data.columns().position(label) {
                    Some(p) => column_offset(layout.first_col, p)?,
                    None => continue,
                },
            };
            sheet.set_hyperlink_at(row_offset(layout.first_row, r)?, col, link.clone())?;
        }

        for (c, width) in column_widths.iter().enumerate() {
            sheet.set_column_width(column_offset(layout.first_col, c)?, *width);
        }
        for (r, height) in self.row_heights.iter().enumerate() {
            sheet.set_row_height(row_offset(layout.first_row, r)?, *height);
        }

        if let Some(range) = filter {
            sheet.set_auto_filter(Some(AutoFilter::new(range)));
        }
        for col in hidden {
            sheet.set_column_hidden(col, true);
        }
        if options.protect_sheet {
            sheet.set_protection(Some(SheetProtection {
                sheet: true,
                allow_auto_filter: true,
            }));
        }

        if let Some(table) = table {
            book.add_table(sheet_index, table)?;
        }
        Ok(())
    }
}

fn written_name<'a>(
    names: &'a AHashMap<StyleId, String>,
    registry: &'a StyleRegistry,
    id: StyleId,
) -> &'a str {
    names
        .get(&id)
        .map(String::as_str)
        .unwrap_or_else(|| registry.name(id))
}
