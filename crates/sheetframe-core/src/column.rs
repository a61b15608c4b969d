//! Column metadata

/// Column dimension settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Column {
    /// Custom width in character units (None = default)
    pub width: Option<f64>,
    /// Column is hidden
    pub hidden: bool,
}

impl Column {
    /// Set width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Set hidden
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Check if this column has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.width.is_some() || self.hidden
    }
}
