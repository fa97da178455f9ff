//! In-memory markup tree and HTML fragment parsing.
//!
//! `MarkupTree` is a small arena of nodes with parent links, enough to stand in
//! for a DOM fragment outside the browser. Fragments go through html5ever's
//! tree builder in a `div` context, so implied end tags, void elements and
//! misnested markup come out the way a browser's `innerHTML` would build them.

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData as DomData, RcDom};
use smol_str::SmolStr;

use crate::node::{NodeKind, NodeView};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Index of a node inside a `MarkupTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeData {
    Document,
    Element {
        name: SmolStr,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document tree.
///
/// Slot 0 is always the document root. Detached nodes keep their slot but are
/// no longer reachable from the root.
#[derive(Debug, Clone)]
pub struct MarkupTree {
    slots: Vec<Slot>,
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTree {
    /// Create an empty tree holding only the document root.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse an HTML fragment. Top-level fragment nodes become children of the root.
    pub fn parse_fragment(html: &str) -> Self {
        let context = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from("div"),
        );
        let dom = html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
            .one(html);

        let mut tree = Self::new();
        // Fragment parsing wraps the result in a synthetic `<html>` element.
        let Some(wrapper) = dom.document.children.borrow().first().cloned() else {
            return tree;
        };

        let mut pending: Vec<(Handle, NodeId)> = wrapper
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), Self::root_id()))
            .collect();

        while let Some((handle, parent)) = pending.pop() {
            match &handle.data {
                DomData::Element { name, attrs, .. } => {
                    let attrs: Vec<(String, String)> = attrs
                        .borrow()
                        .iter()
                        .map(|attr| {
                            let key = match &attr.name.prefix {
                                Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                                None => attr.name.local.to_string(),
                            };
                            (key, attr.value.to_string())
                        })
                        .collect();
                    let id = tree.append_element(parent, &name.local, attrs);
                    pending.extend(
                        handle
                            .children
                            .borrow()
                            .iter()
                            .rev()
                            .map(|child| (child.clone(), id)),
                    );
                }
                DomData::Text { contents } => {
                    tree.append_text(parent, &contents.borrow());
                }
                DomData::Comment { contents } => {
                    tree.push_child(parent, NodeData::Comment(contents.to_string()));
                }
                _ => {
                    tracing::trace!(target: "lectern::markup", "skipping doctype or processing instruction");
                }
            }
        }

        tree
    }

    /// Id of the document root.
    pub fn root_id() -> NodeId {
        NodeId(0)
    }

    /// Handle to the document root.
    pub fn root(&self) -> MarkupNode<'_> {
        self.node(Self::root_id())
    }

    /// Handle to an arbitrary node.
    pub fn node(&self, id: NodeId) -> MarkupNode<'_> {
        MarkupNode { tree: self, id }
    }

    /// Append an element under `parent`.
    pub fn append_element<K, V>(
        &mut self,
        parent: NodeId,
        name: &str,
        attrs: impl IntoIterator<Item = (K, V)>,
    ) -> NodeId
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attrs = attrs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.push_child(
            parent,
            NodeData::Element {
                name: SmolStr::new(name.to_ascii_lowercase()),
                attrs,
            },
        )
    }

    /// Append text under `parent`, merging with a trailing text sibling.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(&last) = self.slots[parent.0].children.last() {
            if let NodeData::Text(existing) = &mut self.slots[last.0].data {
                existing.push_str(text);
                return last;
            }
        }
        self.push_child(parent, NodeData::Text(text.to_string()))
    }

    /// Replace a node with a single text node carrying its text content.
    ///
    /// Returns the id of the new text node, or `None` if `id` is detached.
    pub fn replace_with_text(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.slots.get(id.0)?.parent?;
        let text = self.node(id).text_content();
        let position = self.slots[parent.0]
            .children
            .iter()
            .position(|child| *child == id)?;

        let text_id = NodeId(self.slots.len());
        self.slots.push(Slot {
            data: NodeData::Text(text),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children[position] = text_id;
        self.slots[id.0].parent = None;
        Some(text_id)
    }

    /// Set (or overwrite) an attribute on an element. No-op for non-elements.
    pub fn set_attribute(&mut self, id: NodeId, key: &str, value: &str) {
        if let Some(Slot {
            data: NodeData::Element { attrs, .. },
            ..
        }) = self.slots.get_mut(id.0)
        {
            match attrs.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => attrs.push((key.to_string(), value.to_string())),
            }
        }
    }

    /// First element (document order) with the given tag name.
    pub fn find_element(&self, name: &str) -> Option<NodeId> {
        self.descendants(Self::root_id())
            .into_iter()
            .find(|id| self.element_name(*id).is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }

    /// First text node (document order) whose content contains `needle`.
    pub fn find_text(&self, needle: &str) -> Option<NodeId> {
        self.descendants(Self::root_id()).into_iter().find(|id| {
            matches!(&self.slots[id.0].data, NodeData::Text(text) if text.contains(needle))
        })
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.slots[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.slots[next.0].children.iter().rev().copied());
        }
        out
    }

    fn element_name(&self, id: NodeId) -> Option<&str> {
        match &self.slots.get(id.0)?.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    fn push_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        id
    }
}

/// Borrowed handle to a node in a `MarkupTree`.
#[derive(Debug, Clone, Copy)]
pub struct MarkupNode<'a> {
    tree: &'a MarkupTree,
    id: NodeId,
}

impl<'a> MarkupNode<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn slot(&self) -> &'a Slot {
        &self.tree.slots[self.id.0]
    }
}

impl PartialEq for MarkupNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl NodeView for MarkupNode<'_> {
    fn kind(&self) -> NodeKind {
        match self.slot().data {
            NodeData::Document => NodeKind::Document,
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Other,
        }
    }

    fn node_name(&self) -> String {
        match &self.slot().data {
            NodeData::Document => "#document".to_string(),
            NodeData::Element { name, .. } => name.to_string(),
            NodeData::Text(_) => "#text".to_string(),
            NodeData::Comment(_) => "#comment".to_string(),
        }
    }

    fn parent(&self) -> Option<Self> {
        self.slot().parent.map(|id| self.tree.node(id))
    }

    fn children(&self) -> Vec<Self> {
        self.slot()
            .children
            .iter()
            .map(|id| self.tree.node(*id))
            .collect()
    }

    fn text_content(&self) -> String {
        match &self.slot().data {
            NodeData::Text(text) | NodeData::Comment(text) => text.clone(),
            NodeData::Document | NodeData::Element { .. } => self
                .tree
                .descendants(self.id)
                .into_iter()
                .filter_map(|id| match &self.tree.slots[id.0].data {
                    NodeData::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    fn attributes(&self) -> Vec<(String, String)> {
        match &self.slot().data {
            NodeData::Element { attrs, .. } => attrs.clone(),
            _ => Vec::new(),
        }
    }

    fn is_same_node(&self, other: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(nodes: &[MarkupNode<'_>]) -> Vec<String> {
        nodes.iter().map(|n| n.node_name()).collect()
    }

    #[test]
    fn test_parse_nested_fragment() {
        let tree = MarkupTree::parse_fragment("<div><b>Hi</b> there</div>");
        let top = tree.root().children();
        assert_eq!(names(&top), vec!["div"]);
        let inner = top[0].children();
        assert_eq!(names(&inner), vec!["b", "#text"]);
        assert_eq!(inner[1].text_content(), " there");
        assert_eq!(top[0].text_content(), "Hi there");
    }

    #[test]
    fn test_void_elements_take_no_children() {
        let tree = MarkupTree::parse_fragment(r#"<p>a<br>b<img src="x.png">c</p>"#);
        let p = tree.node(tree.find_element("p").unwrap());
        assert_eq!(names(&p.children()), vec!["#text", "br", "#text", "img", "#text"]);
        let img = tree.node(tree.find_element("img").unwrap());
        assert_eq!(img.attribute("src").as_deref(), Some("x.png"));
    }

    #[test]
    fn test_self_closing_flag_only_applies_to_void_elements() {
        let tree = MarkupTree::parse_fragment("<br/><x-icon/><span>after</span>");
        let top = tree.root().children();
        assert_eq!(names(&top), vec!["br", "x-icon"]);
        assert_eq!(names(&top[1].children()), vec!["span"]);
    }

    #[test]
    fn test_implied_end_tags_make_siblings() {
        let tree = MarkupTree::parse_fragment("<ul><li>one<li>two");
        let top = tree.root().children();
        assert_eq!(names(&top), vec!["ul"]);
        let items = top[0].children();
        assert_eq!(names(&items), vec!["li", "li"]);
        assert_eq!(items[0].text_content(), "one");
        assert_eq!(items[1].text_content(), "two");

        let tree = MarkupTree::parse_fragment("<p>one<p>two");
        let top = tree.root().children();
        assert_eq!(names(&top), vec!["p", "p"]);
        assert_eq!(names(&top[0].children()), vec!["#text"]);
        assert_eq!(top[1].text_content(), "two");
    }

    #[test]
    fn test_block_inside_paragraph_closes_it() {
        let tree = MarkupTree::parse_fragment("<p>lead<div>block</div>");
        assert_eq!(names(&tree.root().children()), vec!["p", "div"]);
    }

    #[test]
    fn test_deep_nesting_text_content() {
        let depth = 50_000;
        let html = format!("{}x", "<span>".repeat(depth));
        let tree = MarkupTree::parse_fragment(&html);
        assert_eq!(tree.root().text_content(), "x");
        assert_eq!(tree.node(tree.find_element("span").unwrap()).text_content(), "x");
    }

    #[test]
    fn test_stray_end_tag_is_ignored() {
        let tree = MarkupTree::parse_fragment("a</span>b");
        let top = tree.root().children();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].text_content(), "ab");
    }

    #[test]
    fn test_character_references_are_decoded() {
        let tree = MarkupTree::parse_fragment("<p>fish &amp; chips&nbsp;!</p>");
        let p = tree.node(tree.find_element("p").unwrap());
        assert_eq!(p.text_content(), "fish & chips\u{a0}!");
    }

    #[test]
    fn test_comments_are_kept_but_excluded_from_text() {
        let tree = MarkupTree::parse_fragment("<p>a<!-- note -->b</p>");
        let p = tree.node(tree.find_element("p").unwrap());
        let kinds: Vec<_> = p.children().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::Text, NodeKind::Other, NodeKind::Text]);
        assert_eq!(p.text_content(), "ab");
    }

    #[test]
    fn test_replace_with_text_unwraps_element() {
        let mut tree = MarkupTree::parse_fragment(r#"<p>go <a href="/x">here</a> now</p>"#);
        let a = tree.find_element("a").unwrap();
        let text = tree.replace_with_text(a).unwrap();
        assert_eq!(tree.node(text).text_content(), "here");
        assert!(tree.find_element("a").is_none());
        let p = tree.node(tree.find_element("p").unwrap());
        assert_eq!(p.text_content(), "go here now");
    }

    #[test]
    fn test_builder_api() {
        let mut tree = MarkupTree::new();
        let div = tree.append_element(MarkupTree::root_id(), "DIV", [("class", "box")]);
        tree.append_text(div, "a");
        tree.append_text(div, "b");
        tree.set_attribute(div, "class", "wide");
        let node = tree.node(div);
        assert_eq!(node.node_name(), "div");
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.attribute("class").as_deref(), Some("wide"));
    }
}
