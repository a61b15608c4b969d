//! Cell hyperlinks

/// A hyperlink attached to a cell
///
/// External links carry a `target` (URL, file path, mailto); links into the
/// workbook carry a `location` such as `Sheet2!A1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    /// External target
    pub target: Option<String>,
    /// Location inside the workbook
    pub location: Option<String>,
    /// Tooltip shown on hover
    pub tooltip: Option<String>,
    /// Display text
    pub display: Option<String>,
}

impl Hyperlink {
    /// Link to an external target
    pub fn external<S: Into<String>>(target: S) -> Self {
        Self {
            target: Some(target.into()),
            ..Default::default()
        }
    }

    /// Link to a location inside the workbook
    pub fn internal<S: Into<String>>(location: S) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    /// Set the tooltip
    pub fn with_tooltip<S: Into<String>>(mut self, tooltip: S) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Set the display text
    pub fn with_display<S: Into<String>>(mut self, display: S) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Whether the link needs a package relationship
    pub fn is_external(&self) -> bool {
        self.target.is_some()
    }
}
