//! Serialization of markup trees into typed nodes.
//!
//! Walks any `NodeView` tree and produces an owned, ordered tree of
//! `SerializedNode`s that a presentation layer can rebuild elsewhere. The
//! input is never mutated; every call produces a fresh tree.
//!
//! # Rules
//!
//! - Text nodes become `Text` with their content verbatim (no trimming, no escaping).
//! - Elements become `Element` with lowercase tag, extracted attributes, parsed
//!   inline style and serialized children in document order.
//! - An element without children gets its text content as a single child (if any).
//! - The designated root is not represented: its serialized children are returned.
//! - Comments and other non-text, non-element nodes are skipped.
//!
//! The walk keeps its own stack of open elements, so nesting depth is bounded
//! by memory rather than by the call stack. Dropping a `SerializedNode` tree is
//! iterative for the same reason.

use serde::Serialize;
use smol_str::SmolStr;

use crate::attributes::{Attributes, extract_attributes};
use crate::node::{NodeKind, NodeView};
use crate::style::StyleMap;

/// A serialized node: either text or an element with children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SerializedNode {
    Text {
        content: String,
    },
    Element {
        tag: SmolStr,
        attributes: Attributes,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<StyleMap>,
        children: Vec<SerializedNode>,
    },
}

impl SerializedNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    /// An element with no attributes, style or children.
    pub fn element(tag: impl Into<SmolStr>) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: Attributes::new(),
            style: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            attributes.insert(key, value);
        }
        self
    }

    pub fn with_style(mut self, new_style: StyleMap) -> Self {
        if let Self::Element { style, .. } = &mut self {
            *style = Some(new_style);
        }
        self
    }

    pub fn with_child(mut self, child: SerializedNode) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Element { .. } => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            Self::Text { .. } => None,
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Self::Element { attributes, .. } => Some(attributes),
            Self::Text { .. } => None,
        }
    }

    pub fn style(&self) -> Option<&StyleMap> {
        match self {
            Self::Element { style, .. } => style.as_ref(),
            Self::Text { .. } => None,
        }
    }

    /// Children of an element; empty for text.
    pub fn children(&self) -> &[SerializedNode] {
        match self {
            Self::Element { children, .. } => children,
            Self::Text { .. } => &[],
        }
    }
}

impl Drop for SerializedNode {
    fn drop(&mut self) {
        let Self::Element { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Self::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

/// Result of serializing a node: a single node, or the children of a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Serialized {
    Node(SerializedNode),
    Children(Vec<SerializedNode>),
}

impl Serialized {
    /// Flatten into a list of nodes.
    pub fn into_children(self) -> Vec<SerializedNode> {
        match self {
            Self::Node(node) => vec![node],
            Self::Children(children) => children,
        }
    }
}

/// Serialize a node.
///
/// With `is_root`, the node itself is treated as the fragment wrapper supplied
/// by the caller and only its children are returned. A document node is
/// always treated as a root. Returns `None` for skipped node kinds.
pub fn serialize<N: NodeView>(node: &N, is_root: bool) -> Option<Serialized> {
    match node.kind() {
        NodeKind::Text => {
            return Some(Serialized::Node(SerializedNode::text(node.text_content())));
        }
        NodeKind::Other => {
            tracing::trace!(target: "lectern::serialize", name = %node.node_name(), "skipping node");
            return None;
        }
        NodeKind::Element | NodeKind::Document => {}
    }

    let content = if node.children().is_empty() {
        leaf_content(node)
    } else {
        serialize_children(node)
    };

    if is_root || node.kind() == NodeKind::Document {
        return Some(Serialized::Children(content));
    }
    Some(Serialized::Node(element_node(node, content)))
}

/// An element whose children are still being serialized.
struct Frame<N> {
    node: N,
    pending: std::vec::IntoIter<N>,
    built: Vec<SerializedNode>,
}

impl<N: NodeView> Frame<N> {
    fn open(node: N, children: Vec<N>) -> Self {
        Self {
            node,
            pending: children.into_iter(),
            built: Vec::new(),
        }
    }
}

/// Serialize every child of `node` in document order, dropping skipped kinds.
pub fn serialize_children<N: NodeView>(node: &N) -> Vec<SerializedNode> {
    let mut stack = vec![Frame::open(node.clone(), node.children())];

    while let Some(frame) = stack.last_mut() {
        if let Some(child) = frame.pending.next() {
            match child.kind() {
                NodeKind::Text => frame.built.push(SerializedNode::text(child.text_content())),
                NodeKind::Element => {
                    let children = child.children();
                    if children.is_empty() {
                        let content = leaf_content(&child);
                        frame.built.push(element_node(&child, content));
                    } else {
                        stack.push(Frame::open(child, children));
                    }
                }
                NodeKind::Document | NodeKind::Other => {
                    tracing::trace!(target: "lectern::serialize", name = %child.node_name(), "skipping node");
                }
            }
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        match stack.last_mut() {
            Some(parent) => parent.built.push(element_node(&done.node, done.built)),
            None => return done.built,
        }
    }

    Vec::new()
}

fn leaf_content<N: NodeView>(node: &N) -> Vec<SerializedNode> {
    let text = node.text_content();
    if text.is_empty() {
        Vec::new()
    } else {
        vec![SerializedNode::text(text)]
    }
}

fn element_node<N: NodeView>(node: &N, children: Vec<SerializedNode>) -> SerializedNode {
    let (attributes, style) = extract_attributes(node);
    SerializedNode::Element {
        tag: SmolStr::new(node.node_name().to_ascii_lowercase()),
        attributes,
        style,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupTree;
    use crate::style::parse_style;

    fn serialize_root(html: &str) -> Vec<SerializedNode> {
        let tree = MarkupTree::parse_fragment(html);
        serialize(&tree.root(), true).unwrap().into_children()
    }

    #[test]
    fn test_root_wrapper_returns_children() {
        let tree = MarkupTree::parse_fragment("<div><b>Hi</b> there</div>");
        let div = tree.node(tree.find_element("div").unwrap());
        let Some(Serialized::Children(children)) = serialize(&div, true) else {
            panic!("root should serialize to children");
        };
        assert_eq!(
            children,
            vec![
                SerializedNode::element("b").with_child(SerializedNode::text("Hi")),
                SerializedNode::text(" there"),
            ]
        );
    }

    #[test]
    fn test_root_serialization_snapshot() {
        let nodes = serialize_root("<b>Hi</b> there");
        insta::assert_yaml_snapshot!(nodes, @r###"
        - type: element
          tag: b
          attributes: {}
          children:
            - type: text
              content: Hi
        - type: text
          content: " there"
        "###);
    }

    #[test]
    fn test_non_root_element_is_wrapped() {
        let tree = MarkupTree::parse_fragment(r#"<p class="lead">x</p>"#);
        let p = tree.node(tree.find_element("p").unwrap());
        let Some(Serialized::Node(node)) = serialize(&p, false) else {
            panic!("element should serialize to a node");
        };
        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.attributes().unwrap().get("class"), Some("lead"));
        assert_eq!(node.children(), &[SerializedNode::text("x")]);
    }

    #[test]
    fn test_text_is_verbatim() {
        let nodes = serialize_root("  <i> a &lt;b&gt; </i>\n");
        assert_eq!(nodes[0], SerializedNode::text("  "));
        assert_eq!(nodes[1].children(), &[SerializedNode::text(" a <b> ")]);
        assert_eq!(nodes[2], SerializedNode::text("\n"));
    }

    #[test]
    fn test_style_and_slot_normalization() {
        let nodes =
            serialize_root(r#"<h1 slot="title" style="color: red; font-size:2em">T</h1>"#);
        let expected = SerializedNode::element("h1")
            .with_attribute("slot", "title")
            .with_attribute("contenteditable", "true")
            .with_style(parse_style("color: red; font-size: 2em").unwrap())
            .with_child(SerializedNode::text("T"));
        assert_eq!(nodes, vec![expected]);
    }

    #[test]
    fn test_leafless_elements() {
        let nodes = serialize_root(r#"<img src="a.png"><span></span>"#);
        assert_eq!(
            nodes,
            vec![
                SerializedNode::element("img").with_attribute("src", "a.png"),
                SerializedNode::element("span"),
            ]
        );
    }

    #[test]
    fn test_deep_nesting_preserves_order() {
        let nodes = serialize_root("<ul><li>a<b>b</b>c</li><li><i><u>d</u></i></li></ul>");
        assert_eq!(nodes.len(), 1);
        let items = nodes[0].children();
        assert_eq!(items.len(), 2);
        let first: Vec<_> = items[0]
            .children()
            .iter()
            .map(|c| c.as_text().map(str::to_string).or(c.tag().map(str::to_string)))
            .collect();
        assert_eq!(
            first,
            vec![
                Some("a".to_string()),
                Some("b".to_string()),
                Some("c".to_string())
            ]
        );
        let u = &items[1].children()[0].children()[0];
        assert_eq!(u.tag(), Some("u"));
        assert_eq!(u.children(), &[SerializedNode::text("d")]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let nodes = serialize_root("<p>a<!-- c -->b</p>");
        assert_eq!(
            nodes[0].children(),
            &[SerializedNode::text("a"), SerializedNode::text("b")]
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let tree = MarkupTree::parse_fragment(r#"<div slot="x">y</div>"#);
        let _ = serialize(&tree.root(), true);
        let div = tree.node(tree.find_element("div").unwrap());
        assert_eq!(div.attribute("contenteditable"), None);
    }

    #[test]
    fn test_deeply_nested_fragment() {
        let depth = 50_000;
        let html = format!("{}x", "<span>".repeat(depth));
        let nodes = serialize_root(&html);
        assert_eq!(nodes.len(), 1);

        let mut levels = 0;
        let mut current = &nodes[0];
        while let Some(tag) = current.tag() {
            assert_eq!(tag, "span");
            levels += 1;
            current = &current.children()[0];
        }
        assert_eq!(levels, depth);
        assert_eq!(current.as_text(), Some("x"));
    }

    #[test]
    fn test_empty_fragment() {
        assert!(serialize_root("").is_empty());
    }
}
