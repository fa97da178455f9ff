//! Node abstraction shared by the serializer and the selection inspector.
//!
//! `NodeView` is the seam between toolbar logic and whatever tree backs the
//! document. The in-memory `MarkupTree` implements it natively; the browser
//! crate implements it over live `web_sys::Node` handles. Everything built on
//! top (serialization, ancestor walks, link detection) is written once against
//! this trait.

use crate::style::parse_style;

/// Coarse node classification, mirroring the DOM node types the toolbar cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    /// The document itself (or a fragment root standing in for it).
    Document,
    /// Comments, processing instructions, doctypes.
    Other,
}

/// Read-only view over a node in a document tree.
///
/// Implementations are cheap handles (an index into an arena, a JS object
/// reference) so they are `Clone` and returned by value.
pub trait NodeView: Clone {
    /// The node's classification.
    fn kind(&self) -> NodeKind;

    /// The node name. Elements report their tag name in whatever case the
    /// backing tree uses; callers compare case-insensitively.
    fn node_name(&self) -> String;

    /// The parent node, if attached.
    fn parent(&self) -> Option<Self>;

    /// Child nodes in document order.
    fn children(&self) -> Vec<Self>;

    /// Concatenated text of this node and its descendants.
    fn text_content(&self) -> String;

    /// All attributes in source order. Empty for non-elements.
    fn attributes(&self) -> Vec<(String, String)>;

    /// Whether `other` is this very node.
    fn is_same_node(&self, other: &Self) -> bool;

    // === Provided ===

    /// Look up a single attribute.
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Inline style property value, if set and non-empty.
    ///
    /// The default reads the `style` attribute. Live DOM implementations
    /// override this to go through the element's style declaration.
    fn style_property(&self, property: &str) -> Option<String> {
        let declarations = self.attribute("style")?;
        let style = parse_style(&declarations)?;
        style
            .get(property)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn is_text(&self) -> bool {
        self.kind() == NodeKind::Text
    }

    fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    /// Whether this is an element with the given tag name (case-insensitive).
    fn has_tag(&self, tag: &str) -> bool {
        self.is_element() && self.node_name().eq_ignore_ascii_case(tag)
    }

    /// The parent, if it is an element.
    fn parent_element(&self) -> Option<Self> {
        self.parent().filter(|parent| parent.is_element())
    }

    /// Whether `other` is this node or one of its descendants.
    fn contains(&self, other: &Self) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.is_same_node(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }
}
