//! Export destination
//!
//! An [`ExcelWriter`] owns the workbook a styled frame is exported into and
//! the path it is saved to. Several frames can be exported into one writer
//! before a single save.

use std::path::{Path, PathBuf};

use sheetframe_core::Workbook;
use sheetframe_xlsx::{XlsxReader, XlsxWriter};

use crate::error::{FrameError, Result};

/// Extensions a destination may have, matched case-insensitively
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".xlsx", ".xlsm"];

/// A workbook bound to an `.xlsx`/`.xlsm` path
#[derive(Debug, Clone)]
pub struct ExcelWriter {
    path: PathBuf,
    book: Workbook,
}

impl ExcelWriter {
    /// Start an empty workbook destined for `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        check_extension(&path)?;
        Ok(Self {
            path,
            book: Workbook::empty(),
        })
    }

    /// Like [`ExcelWriter::new`], but start from the workbook already at
    /// `path` when there is one
    pub fn load_existing<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut writer = Self::new(path)?;
        if writer.path.is_file() {
            log::info!("loading existing workbook {}", writer.path.display());
            writer.book = XlsxReader::read_file(&writer.path)?;
        }
        Ok(writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn book(&self) -> &Workbook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut Workbook {
        &mut self.book
    }

    pub fn into_book(self) -> Workbook {
        self.book
    }

    /// Whether the destination is a macro-enabled workbook
    pub fn is_macro_enabled(&self) -> bool {
        extension(&self.path).eq_ignore_ascii_case(".xlsm")
    }

    /// Write the workbook to its path
    pub fn save(&self) -> Result<()> {
        log::info!(
            "saving {} sheet(s) to {}",
            self.book.sheet_count(),
            self.path.display()
        );
        XlsxWriter::write_file(&self.book, &self.path)?;
        Ok(())
    }
}

/// `.ext` of a path, empty when it has none
fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

fn check_extension(path: &Path) -> Result<()> {
    let ext = extension(path);
    if SUPPORTED_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(&ext))
    {
        Ok(())
    } else {
        Err(FrameError::UnsupportedFileExtension(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert!(ExcelWriter::new("out.xlsx").is_ok());
        assert!(ExcelWriter::new("OUT.XLSM").unwrap().is_macro_enabled());
        assert!(!ExcelWriter::new("out.xlsx").unwrap().is_macro_enabled());

        let err = ExcelWriter::new("out.csv").unwrap_err();
        assert!(matches!(&err, FrameError::UnsupportedFileExtension(e) if e == ".csv"));
        assert_eq!(
            err.to_string(),
            "Unsupported file extension .csv. Use .xlsx/.xlsm"
        );
        assert!(matches!(
            ExcelWriter::new("no_extension"),
            Err(FrameError::UnsupportedFileExtension(_))
        ));
    }

    #[test]
    fn test_starts_empty() {
        let writer = ExcelWriter::new("out.xlsx").unwrap();
        assert_eq!(writer.book().sheet_count(), 0);
        assert_eq!(writer.path(), Path::new("out.xlsx"));
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ExcelWriter::load_existing(dir.path().join("new.xlsx")).unwrap();
        assert_eq!(writer.book().sheet_count(), 0);
    }
}
