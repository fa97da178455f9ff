//! Inline style declaration parsing.
//!
//! Converts `style` attribute strings into an ordered property map. Parsing is
//! lenient: declarations without a colon keep their property with no value,
//! empty declarations are skipped, and nothing here ever fails.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered map of CSS property to (optional) value.
///
/// Keys keep first-insertion order; re-inserting a property overwrites its
/// value in place, the way assigning to a JS object key does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, Option<String>)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, overwriting any previous value for it.
    pub fn insert(&mut self, property: impl Into<String>, value: Option<String>) {
        let property = property.into();
        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Value of a property. `None` both when absent and when present without value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .and_then(|(_, value)| value.as_deref())
    }

    /// Whether the property is present at all (with or without value).
    pub fn contains(&self, property: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == property)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse an inline style declaration string.
///
/// Returns `None` for empty input. Each `;`-separated declaration is split on
/// its first `:` and both halves trimmed. A declaration with no `:` is kept
/// with no value. Declarations that are blank, or whose property is blank,
/// are skipped. Later duplicates win.
pub fn parse_style(declarations: &str) -> Option<StyleMap> {
    if declarations.is_empty() {
        return None;
    }

    let mut style = StyleMap::new();
    for declaration in declarations.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }

        let (property, value) = match declaration.split_once(':') {
            Some((property, value)) => (property.trim(), Some(value.trim().to_string())),
            None => (declaration, None),
        };

        if property.is_empty() {
            tracing::trace!(target: "lectern::style", declaration, "skipping declaration without property");
            continue;
        }

        style.insert(property, value);
    }

    Some(style)
}
