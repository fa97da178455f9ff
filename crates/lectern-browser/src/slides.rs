//! Slide parsing against the live document.
//!
//! The browser's own HTML parser reads the stored markup, so the element
//! tree matches what the page would render.

use lectern_core::{Slide, SlideElement, build_slide_element};

use crate::dom::DomNode;

/// Parse a stored slide with the document's parser.
///
/// Returns `None` for unknown templates and when no document is available.
pub fn parse_slide(slide: &Slide) -> Option<SlideElement> {
    let document = web_sys::window()?.document()?;
    let container = document.create_element("div").ok()?;
    container.set_inner_html(slide.content.as_deref().unwrap_or_default());

    build_slide_element(
        &slide.template,
        &DomNode::from(container),
        slide.id.as_deref(),
        slide.attributes.as_ref(),
    )
}
