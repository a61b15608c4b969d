//! Named styles and the per-workbook collection of them

use super::{builtins, Style};
use crate::error::{Error, Result};
use ahash::AHashMap;

/// A style registered in a workbook under a unique name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStyle {
    /// Unique name within the workbook
    pub name: String,
    /// Formatting
    pub style: Style,
    /// Id of the application builtin this style stands for
    pub builtin_id: Option<u32>,
}

impl NamedStyle {
    /// Create a user-defined named style
    pub fn new<S: Into<String>>(name: S, style: Style) -> Self {
        Self {
            name: name.into(),
            style,
            builtin_id: None,
        }
    }

    /// Mark as an application builtin
    pub fn with_builtin_id(mut self, id: u32) -> Self {
        self.builtin_id = Some(id);
        self
    }
}

/// Named styles of a workbook, in registration order
///
/// `Normal` always sits at index 0, matching the first `cellStyleXfs`
/// entry of a saved workbook.
#[derive(Debug, Clone)]
pub struct NamedStyleCollection {
    styles: Vec<NamedStyle>,
    index_map: AHashMap<String, usize>,
}

impl NamedStyleCollection {
    /// Create a collection holding only `Normal`
    pub fn new() -> Self {
        let mut collection = Self {
            styles: Vec::with_capacity(16),
            index_map: AHashMap::with_capacity(16),
        };
        let normal = builtins::normal();
        collection.index_map.insert(normal.name.clone(), 0);
        collection.styles.push(normal);
        collection
    }

    /// Register a style, failing if the name is taken
    pub fn add(&mut self, style: NamedStyle) -> Result<usize> {
        if self.index_map.contains_key(&style.name) {
            return Err(Error::DuplicateNamedStyle(style.name));
        }
        let idx = self.styles.len();
        self.index_map.insert(style.name.clone(), idx);
        self.styles.push(style);
        Ok(idx)
    }

    /// Register the application builtin `name` unless already present
    ///
    /// Returns `Ok(false)` when the name is already registered.
    pub fn add_builtin(&mut self, name: &str) -> Result<bool> {
        if self.contains(name) {
            return Ok(false);
        }
        let style = builtins::get(name).ok_or_else(|| Error::NamedStyleNotFound(name.to_string()))?;
        self.add(style)?;
        Ok(true)
    }

    /// Replace the definition of `Normal`
    pub fn set_normal(&mut self, style: Style) {
        self.styles[0].style = style;
    }

    /// Look up a style by name
    pub fn get(&self, name: &str) -> Option<&NamedStyle> {
        self.index_map.get(name).map(|&idx| &self.styles[idx])
    }

    /// Position of a style (its `xfId`)
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_map.get(name).copied()
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index_map.contains_key(name)
    }

    /// Iterate over styles in registration order
    pub fn iter(&self) -> impl Iterator<Item = &NamedStyle> {
        self.styles.iter()
    }

    /// Iterate over the registered names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|s| s.name.as_str())
    }

    /// Number of styles, `Normal` included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether only `Normal` is registered
    pub fn is_empty(&self) -> bool {
        self.styles.len() <= 1
    }
}

impl Default for NamedStyleCollection {
    fn default() -> Self {
        Self::new()
    }
}
