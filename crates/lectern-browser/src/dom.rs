//! `NodeView` over live DOM nodes.

use lectern_core::{NodeKind, NodeView, parse_style};
use wasm_bindgen::JsCast;

/// A live DOM node handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode(pub web_sys::Node);

impl DomNode {
    pub fn as_node(&self) -> &web_sys::Node {
        &self.0
    }

    pub fn as_element(&self) -> Option<&web_sys::Element> {
        self.0.dyn_ref::<web_sys::Element>()
    }
}

impl From<web_sys::Node> for DomNode {
    fn from(node: web_sys::Node) -> Self {
        DomNode(node)
    }
}

impl From<web_sys::Element> for DomNode {
    fn from(element: web_sys::Element) -> Self {
        DomNode(element.into())
    }
}

impl NodeView for DomNode {
    fn kind(&self) -> NodeKind {
        match self.0.node_type() {
            web_sys::Node::ELEMENT_NODE => NodeKind::Element,
            web_sys::Node::TEXT_NODE | web_sys::Node::CDATA_SECTION_NODE => NodeKind::Text,
            web_sys::Node::DOCUMENT_NODE | web_sys::Node::DOCUMENT_FRAGMENT_NODE => {
                NodeKind::Document
            }
            _ => NodeKind::Other,
        }
    }

    fn node_name(&self) -> String {
        self.0.node_name()
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_node().map(DomNode)
    }

    fn children(&self) -> Vec<Self> {
        let nodes = self.0.child_nodes();
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .map(DomNode)
            .collect()
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn attributes(&self) -> Vec<(String, String)> {
        let Some(element) = self.as_element() else {
            return Vec::new();
        };
        element
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter_map(|name| {
                let value = element.get_attribute(&name)?;
                Some((name, value))
            })
            .collect()
    }

    fn is_same_node(&self, other: &Self) -> bool {
        self.0.is_same_node(Some(&other.0))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.as_element()?.get_attribute(name)
    }

    fn style_property(&self, property: &str) -> Option<String> {
        if let Some(element) = self.0.dyn_ref::<web_sys::HtmlElement>() {
            return element
                .style()
                .get_property_value(property)
                .ok()
                .filter(|value| !value.is_empty());
        }

        // SVG and other non-HTML elements: read the attribute.
        let style = parse_style(&self.attribute("style")?)?;
        style
            .get(property)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(Some(&other.0))
    }
}
