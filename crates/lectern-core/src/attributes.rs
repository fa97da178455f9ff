//! Element attribute extraction.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::node::NodeView;
use crate::style::{StyleMap, parse_style};

/// Attribute forced onto elements that carry a `slot` attribute.
pub const CONTENT_EDITABLE: &str = "contenteditable";

/// Ordered attribute map. Keys are unique; later inserts overwrite in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Extract an element's attributes, splitting out its parsed inline style.
///
/// Every attribute is copied verbatim except `style`, which is returned
/// separately as a `StyleMap`. An element with a `slot` attribute (any value)
/// additionally gets `contenteditable="true"`.
pub fn extract_attributes<N: NodeView>(node: &N) -> (Attributes, Option<StyleMap>) {
    let mut attributes = Attributes::new();
    let mut style = None;

    for (key, value) in node.attributes() {
        if key.eq_ignore_ascii_case("style") {
            style = parse_style(&value);
        } else {
            attributes.insert(key, value);
        }
    }

    if attributes.contains("slot") {
        attributes.insert(CONTENT_EDITABLE, "true");
    }

    (attributes, style)
}
