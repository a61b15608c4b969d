//! Workbook type - the main document structure

use crate::error::{Error, Result};
use crate::style::{NamedStyle, NamedStyleCollection, DEFAULT_THEME};
use crate::table::Table;
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Holds the worksheets, the named styles cells refer to and the theme
/// color table used to resolve theme colors.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Named cell styles
    named_styles: NamedStyleCollection,
    /// Theme colors (lt1, dk1, lt2, dk2, accent1..accent6)
    theme_colors: Vec<(u8, u8, u8)>,
    /// Raw `xl/vbaProject.bin` of a macro-enabled workbook
    vba_project: Option<Vec<u8>>,
}

impl Workbook {
    /// Create a new workbook with one worksheet named "Sheet1"
    pub fn new() -> Self {
        let mut wb = Self::empty();
        wb.worksheets.push(Worksheet::new("Sheet1"));
        wb
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            named_styles: NamedStyleCollection::new(),
            theme_colors: DEFAULT_THEME.to_vec(),
            vba_project: None,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Get a mutable worksheet by name
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| ws.name() == name)
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(self.worksheets.len() - 1)
    }

    /// Add an existing worksheet to the workbook
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    /// Remove a worksheet by index
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        Ok(self.worksheets.remove(index))
    }

    /// Remove a worksheet by name
    pub fn remove_worksheet_by_name(&mut self, name: &str) -> Result<Worksheet> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        self.remove_worksheet(index)
    }

    /// Rename a worksheet
    pub fn rename_worksheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.validate_sheet_name_excluding(new_name, Some(index))?;
        self.worksheets[index].set_name(new_name);
        Ok(())
    }

    // ==================== Named Styles ====================

    /// Register a named style; the name must be unused
    pub fn add_named_style(&mut self, style: NamedStyle) -> Result<usize> {
        self.named_styles.add(style)
    }

    /// Look up a named style
    pub fn named_style(&self, name: &str) -> Option<&NamedStyle> {
        self.named_styles.get(name)
    }

    /// All named styles in registration order
    pub fn named_styles(&self) -> &NamedStyleCollection {
        &self.named_styles
    }

    /// Mutable access to the named styles
    pub fn named_styles_mut(&mut self) -> &mut NamedStyleCollection {
        &mut self.named_styles
    }

    // ==================== Theme ====================

    /// Theme colors in theme-index order
    pub fn theme_colors(&self) -> &[(u8, u8, u8)] {
        &self.theme_colors
    }

    /// Replace the theme colors
    pub fn set_theme_colors(&mut self, colors: Vec<(u8, u8, u8)>) {
        self.theme_colors = colors;
    }

    // ==================== Tables ====================

    /// Names of every table in the workbook
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.worksheets
            .iter()
            .flat_map(|ws| ws.tables().iter().map(|t| t.name.as_str()))
    }

    /// Whether a table name is in use anywhere (case-insensitive)
    pub fn has_table(&self, name: &str) -> bool {
        self.table_names().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Add a table to a sheet; table names are unique across the workbook
    pub fn add_table(&mut self, sheet_index: usize, table: Table) -> Result<()> {
        if self.has_table(&table.name) {
            return Err(Error::DuplicateTableName(table.name));
        }
        let count = self.worksheets.len();
        let sheet = self
            .worksheets
            .get_mut(sheet_index)
            .ok_or(Error::SheetOutOfBounds(sheet_index, count))?;
        sheet.push_table(table);
        Ok(())
    }

    // ==================== Macros ====================

    /// Raw VBA project, when loaded from a macro-enabled file
    pub fn vba_project(&self) -> Option<&[u8]> {
        self.vba_project.as_deref()
    }

    /// Set the raw VBA project
    pub fn set_vba_project(&mut self, data: Option<Vec<u8>>) {
        self.vba_project = data;
    }

    /// Validate a sheet name
    pub fn validate_sheet_name(&self, name: &str) -> Result<()> {
        self.validate_sheet_name_excluding(name, None)
    }

    /// Validate a sheet name, optionally excluding a sheet from duplicate check
    fn validate_sheet_name_excluding(
        &self,
        name: &str,
        exclude_index: Option<usize>,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        let name_lower = name.to_lowercase();
        let taken = self
            .worksheets
            .iter()
            .enumerate()
            .any(|(i, ws)| Some(i) != exclude_index && ws.name().to_lowercase() == name_lower);
        if taken {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CellRange, Style};

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");
        assert_eq!(wb.named_styles().len(), 1);
        assert_eq!(wb.theme_colors()[4], (0x4F, 0x81, 0xBD));
    }

    #[test]
    fn test_sheet_names() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("Data").unwrap();
        assert!(matches!(
            wb.add_worksheet_with_name("DATA"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert!(wb.add_worksheet_with_name("a/b").is_err());
        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name(&"x".repeat(32)).is_err());
    }

    #[test]
    fn test_remove_by_name() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();
        let removed = wb.remove_worksheet_by_name("Data").unwrap();
        assert_eq!(removed.name(), "Data");
        assert!(matches!(
            wb.remove_worksheet_by_name("Data"),
            Err(Error::SheetNotFound(_))
        ));
    }

    #[test]
    fn test_named_styles() {
        let mut wb = Workbook::new();
        wb.add_named_style(NamedStyle::new("Bold", Style::new().bold(true)))
            .unwrap();
        assert!(wb.named_style("Bold").unwrap().style.font.bold);
        assert!(wb
            .add_named_style(NamedStyle::new("Bold", Style::new()))
            .is_err());
    }

    #[test]
    fn test_table_names_unique_across_sheets() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Other").unwrap();
        let range = CellRange::parse("A1:B3").unwrap();
        let table = Table::new("Table1", range, vec!["a".into(), "b".into()]);
        wb.add_table(0, table.clone()).unwrap();
        assert!(matches!(
            wb.add_table(1, table),
            Err(Error::DuplicateTableName(_))
        ));
        assert_eq!(wb.table_names().collect::<Vec<_>>(), vec!["Table1"]);
    }
}
