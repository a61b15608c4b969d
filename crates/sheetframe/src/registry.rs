//! Named style registry
//!
//! Styles live in an arena and are addressed by [`StyleId`]; names map to
//! ids. The registry starts out holding the application builtins so cells
//! can refer to `Good`, `Bad`, `Title`, ... by name.

use ahash::AHashMap;
use sheetframe_core::style::{builtins, DEFAULT_THEME};

use crate::error::{FrameError, Result};
use crate::style::{Style, StyleChanges};

/// Handle to a registered style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(u32);

impl StyleId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Memo of one bulk edit: `(source style, changes)` to the resulting style
pub type EditCache = AHashMap<(StyleId, StyleChanges), StyleId>;

#[derive(Debug, Clone)]
struct Entry {
    style: Style,
    builtin: bool,
}

/// Name to style map scoped to one styled frame
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    entries: Vec<Entry>,
    by_name: AHashMap<String, StyleId>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    /// A registry holding the builtin styles
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(64),
            by_name: AHashMap::with_capacity(64),
        };
        for name in builtins::names() {
            let Some(named) = builtins::get(name) else {
                continue;
            };
            match Style::from_external(&named, &DEFAULT_THEME) {
                Ok(style) => {
                    registry.insert(style, true);
                }
                Err(e) => log::warn!("skipping builtin style {}: {}", name, e),
            }
        }
        registry
    }

    fn insert(&mut self, style: Style, builtin: bool) -> StyleId {
        let id = StyleId(self.entries.len() as u32);
        self.by_name.insert(style.name.clone(), id);
        self.entries.push(Entry { style, builtin });
        id
    }

    /// Register a style
    ///
    /// Re-registering an equal definition under a used name returns the
    /// existing handle; a different definition is a conflict.
    pub fn add(&mut self, style: Style) -> Result<StyleId> {
        if let Some(&id) = self.by_name.get(&style.name) {
            if self.get(id) == &style {
                return Ok(id);
            }
            return Err(FrameError::StyleNameConflict(style.name));
        }
        Ok(self.insert(style, false))
    }

    pub fn resolve_name(&self, name: &str) -> Result<StyleId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FrameError::UnknownStyle(name.to_string()))
    }

    /// The style behind a handle issued by this registry
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another registry with more entries.
    pub fn get(&self, id: StyleId) -> &Style {
        &self.entries[id.index()].style
    }

    pub fn name(&self, id: StyleId) -> &str {
        &self.get(id).name
    }

    pub fn style(&self, name: &str) -> Result<&Style> {
        self.resolve_name(name).map(|id| self.get(id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn is_builtin(&self, id: StyleId) -> bool {
        self.entries[id.index()].builtin
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every registered style, builtins first
    pub fn iter(&self) -> impl Iterator<Item = (StyleId, &Style)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| (StyleId(i as u32), &e.style))
    }

    /// Styles registered on top of the builtins, in insertion order
    pub fn user_styles(&self) -> impl Iterator<Item = (StyleId, &Style)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.builtin)
            .map(|(i, e)| (StyleId(i as u32), &e.style))
    }

    /// Give `style` the next free numbered name and return it
    pub fn rename(&self, style: &mut Style) -> String {
        let name = next_free_name(&style.name, |n| self.contains(n));
        style.name = name.clone();
        name
    }

    /// Apply `changes` to the style behind `id` and register the result
    ///
    /// Without an explicit name the result gets a numbered copy of the
    /// source name. `cache` must live for one bulk assignment only.
    pub fn edit(
        &mut self,
        id: StyleId,
        changes: &StyleChanges,
        cache: &mut EditCache,
    ) -> Result<StyleId> {
        if changes.is_empty() {
            return Ok(id);
        }
        let key = (id, changes.clone());
        if let Some(&hit) = cache.get(&key) {
            return Ok(hit);
        }

        let source = self.get(id);
        let mut edited = source.apply(changes)?;

        let result = if changes.name.is_some() {
            match self.by_name.get(&edited.name) {
                Some(&existing) if self.get(existing) == &edited => existing,
                Some(_) => return Err(FrameError::StyleNameConflict(edited.name)),
                None => self.insert(edited, false),
            }
        } else if &edited == source {
            id
        } else {
            self.rename(&mut edited);
            self.insert(edited, false)
        };

        cache.insert(key, result);
        Ok(result)
    }
}

/// Split a trailing `[n]` counter off a style name
///
/// A missing or malformed counter yields the whole name and 0.
pub(crate) fn split_counter(name: &str) -> (&str, u64) {
    if !name.ends_with(']') {
        return (name, 0);
    }
    let Some(open) = name.rfind('[') else {
        return (name, 0);
    };
    match name[open + 1..name.len() - 1].parse::<u64>() {
        Ok(n) => (&name[..open], n),
        Err(_) => (name, 0),
    }
}

/// First `base[n]` after the current counter for which `taken` is false
pub fn next_free_name(style_name: &str, taken: impl Fn(&str) -> bool) -> String {
    let (base, counter) = split_counter(style_name);
    (counter + 1..)
        .map(|i| format!("{}[{}]", base, i))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| format!("{}[{}]", base, counter + 1))
}
