//! Slide element building.
//!
//! A stored slide is a template name, an id, free-form markup content and a
//! few slide-level attributes. `build_slide_element` wraps the serialized
//! content under the template's root tag; unknown templates produce nothing.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::markup::MarkupTree;
use crate::node::NodeView;
use crate::serialize::{SerializedNode, serialize};
use crate::style::{StyleMap, parse_style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideTemplate {
    Title,
    Content,
    Split,
    Gif,
}

impl SlideTemplate {
    /// Match a stored template name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "split" => Some(Self::Split),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Tag of the presentation component rendering this template.
    pub fn root_tag(self) -> &'static str {
        match self {
            Self::Title => "lectern-slide-title",
            Self::Content => "lectern-slide-content",
            Self::Split => "lectern-slide-split",
            Self::Gif => "lectern-slide-gif",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideAttributes {
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

/// A slide as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub id: Option<String>,
    pub template: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attributes: Option<SlideAttributes>,
}

/// Template root carrying slide-level attributes and the serialized content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideElement {
    pub tag: SmolStr,
    pub slide_id: Option<String>,
    pub style: Option<StyleMap>,
    pub src: Option<String>,
    pub children: Vec<SerializedNode>,
}

impl SlideElement {
    /// Flatten into a plain element node; `slide_id` and `src` become attributes.
    pub fn into_node(self) -> SerializedNode {
        let mut node = SerializedNode::element(self.tag);
        if let Some(id) = self.slide_id {
            node = node.with_attribute("slide_id", id);
        }
        if let Some(src) = self.src {
            node = node.with_attribute("src", src);
        }
        if let Some(style) = self.style {
            node = node.with_style(style);
        }
        self.children
            .into_iter()
            .fold(node, |node, child| node.with_child(child))
    }
}

/// Wrap the children of `content_root` under the template's root tag.
///
/// `content_root` is the caller's fragment wrapper and is not itself part of
/// the output.
pub fn build_slide_element<N: NodeView>(
    template: &str,
    content_root: &N,
    slide_id: Option<&str>,
    attributes: Option<&SlideAttributes>,
) -> Option<SlideElement> {
    let Some(template) = SlideTemplate::from_name(template) else {
        tracing::debug!(target: "lectern::serialize", template, "unknown slide template");
        return None;
    };

    let children = serialize(content_root, true)
        .map(|serialized| serialized.into_children())
        .unwrap_or_default();

    let style = attributes
        .and_then(|attributes| attributes.style.as_deref())
        .and_then(parse_style);
    let src = attributes
        .and_then(|attributes| attributes.src.as_deref())
        .filter(|src| !src.is_empty())
        .map(str::to_string);

    Some(SlideElement {
        tag: SmolStr::new_static(template.root_tag()),
        slide_id: slide_id.map(str::to_string),
        style,
        src,
        children,
    })
}

/// Parse a stored slide's markup and build its element.
pub fn parse_slide(slide: &Slide) -> Option<SlideElement> {
    let tree = MarkupTree::parse_fragment(slide.content.as_deref().unwrap_or_default());
    build_slide_element(
        &slide.template,
        &tree.root(),
        slide.id.as_deref(),
        slide.attributes.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(template: &str, content: &str) -> Slide {
        Slide {
            id: Some("s1".into()),
            template: template.into(),
            content: Some(content.into()),
            attributes: None,
        }
    }

    #[test]
    fn test_unknown_template_is_none() {
        assert!(parse_slide(&slide("bogus", "<p>x</p>")).is_none());
        assert!(parse_slide(&slide("", "<p>x</p>")).is_none());
    }

    #[test]
    fn test_template_match_ignores_case() {
        for (name, tag) in [
            ("title", "lectern-slide-title"),
            ("CONTENT", "lectern-slide-content"),
            ("Split", "lectern-slide-split"),
            ("gif", "lectern-slide-gif"),
        ] {
            let element = parse_slide(&slide(name, "")).unwrap();
            assert_eq!(element.tag, tag);
            assert!(element.children.is_empty());
        }
    }

    #[test]
    fn test_slide_attributes() {
        let slide = Slide {
            attributes: Some(SlideAttributes {
                style: Some("background: black; color: white".into()),
                src: Some("https://example.com/a.gif".into()),
            }),
            ..slide("gif", r#"<h1 slot="title">Hi</h1>"#)
        };
        let element = parse_slide(&slide).unwrap();
        assert_eq!(element.slide_id.as_deref(), Some("s1"));
        assert_eq!(element.src.as_deref(), Some("https://example.com/a.gif"));
        assert_eq!(element.style.as_ref().unwrap().get("color"), Some("white"));
        assert_eq!(
            element.children[0].attributes().unwrap().get("contenteditable"),
            Some("true")
        );
    }

    #[test]
    fn test_into_node_snapshot() {
        let element = parse_slide(&slide(
            "title",
            r#"<h1 slot="title">Deck</h1><p>by <b>me</b></p>"#,
        ))
        .unwrap();
        insta::assert_yaml_snapshot!(element.into_node(), @r###"
        type: element
        tag: lectern-slide-title
        attributes:
          slide_id: s1
        children:
          - type: element
            tag: h1
            attributes:
              slot: title
              contenteditable: "true"
            children:
              - type: text
                content: Deck
          - type: element
            tag: p
            attributes: {}
            children:
              - type: text
                content: "by "
              - type: element
                tag: b
                attributes: {}
                children:
                  - type: text
                    content: me
        "###);
    }

    #[test]
    fn test_deserialize_slide() {
        let slide: Slide = serde_json::from_str(
            r#"{"id":"a","template":"content","content":"<p>x</p>","attributes":{"style":"color: red"}}"#,
        )
        .unwrap();
        assert_eq!(slide.attributes.unwrap().src, None);
        let slide: Slide = serde_json::from_str(r#"{"template":"split"}"#).unwrap();
        assert!(parse_slide(&slide).unwrap().children.is_empty());
    }
}
