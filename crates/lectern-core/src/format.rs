//! Formatting state and per-node formatting detection.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::config::DEFAULT_CONTAINERS;
use crate::node::{NodeKind, NodeView};

/// Block alignment of the content under the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl ContentAlign {
    /// Parse a `text-align` value. Logical `start`/`end` map to left/right.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "start" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" | "end" => Some(Self::Right),
            "justify" => Some(Self::Justify),
            _ => None,
        }
    }

    /// The `execCommand` name applying this alignment.
    pub fn command(self) -> &'static str {
        match self {
            Self::Left => "justifyLeft",
            Self::Center => "justifyCenter",
            Self::Right => "justifyRight",
            Self::Justify => "justifyFull",
        }
    }

    /// Icon class used by toolbar buttons.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Left => "left-align",
            Self::Center => "center-align",
            Self::Right => "right-align",
            Self::Justify => "justify-align",
        }
    }
}

/// Formatting flags for the current selection anchor.
///
/// Always recomputed from scratch for a selection; never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: ContentAlign,
    pub ordered_list: bool,
    pub unordered_list: bool,
    pub color: Option<String>,
    /// Set when the anchor's container is a heading; disables bold and lists.
    pub title_disabled: bool,
}

/// Set of structural container tag names, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSet {
    names: Vec<SmolStr>,
}

impl Default for ContainerSet {
    fn default() -> Self {
        Self::parse(DEFAULT_CONTAINERS)
    }
}

impl ContainerSet {
    /// Parse a comma-separated tag list such as `"h1,h2,div"`.
    pub fn parse(list: &str) -> Self {
        let names = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| SmolStr::new(name.to_ascii_lowercase()))
            .collect();
        Self { names }
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.names.iter().any(|name| name.eq_ignore_ascii_case(tag))
    }

    /// Whether `node` is an element whose tag is a container.
    pub fn matches<N: NodeView>(&self, node: &N) -> bool {
        node.is_element() && self.contains_tag(&node.node_name())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(SmolStr::as_str)
    }
}

// === Detection ===

/// Headings disable title-incompatible affordances.
pub fn is_title<N: NodeView>(node: &N) -> bool {
    ["h1", "h2", "h3", "h4", "h5", "h6"]
        .iter()
        .any(|tag| node.has_tag(tag))
}

/// Document-level roots where ancestor walks stop.
pub fn is_document_root<N: NodeView>(node: &N) -> bool {
    matches!(node.kind(), NodeKind::Document | NodeKind::Other)
        || node.has_tag("html")
        || node.has_tag("body")
}

pub fn is_bold<N: NodeView>(node: &N) -> bool {
    if node.has_tag("b") || node.has_tag("strong") {
        return true;
    }
    node.style_property("font-weight")
        .is_some_and(|weight| match weight.trim() {
            "bold" | "bolder" => true,
            numeric => numeric.parse::<u16>().is_ok_and(|w| w >= 600),
        })
}

pub fn is_italic<N: NodeView>(node: &N) -> bool {
    if node.has_tag("i") || node.has_tag("em") {
        return true;
    }
    node.style_property("font-style")
        .is_some_and(|style| matches!(style.trim(), "italic" | "oblique"))
}

pub fn is_underline<N: NodeView>(node: &N) -> bool {
    if node.has_tag("u") {
        return true;
    }
    ["text-decoration", "text-decoration-line"]
        .iter()
        .filter_map(|property| node.style_property(property))
        .any(|decoration| decoration.contains("underline"))
}

pub fn alignment<N: NodeView>(node: &N) -> Option<ContentAlign> {
    node.style_property("text-align")
        .and_then(|value| ContentAlign::from_css(&value))
}

/// Foreground color: inline style first, then a legacy `<font color>`.
pub fn color<N: NodeView>(node: &N) -> Option<String> {
    if let Some(color) = node.style_property("color") {
        return Some(color);
    }
    if node.has_tag("font") {
        return node.attribute("color").filter(|color| !color.is_empty());
    }
    None
}
