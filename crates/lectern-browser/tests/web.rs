//! WASM browser tests for lectern-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use lectern_browser::slides::parse_slide;
use lectern_browser::{
    ContainerSet, ContentAlign, DomNode, InlineEditor, NodeKind, NodeView, Slide, ToolbarConfig,
    ToolbarState, compute_format_state, find_link, platform, serialize_children,
};

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(html: &str) -> web_sys::HtmlElement {
    let container: web_sys::HtmlElement = document().create_element("div").unwrap().dyn_into().unwrap();
    container.set_inner_html(html);
    document().body().unwrap().append_child(&container).unwrap();
    container
}

fn first(container: &web_sys::HtmlElement, selector: &str) -> DomNode {
    DomNode::from(container.query_selector(selector).unwrap().unwrap())
}

// === NodeView tests ===

#[wasm_bindgen_test]
fn test_dom_node_kinds() {
    let container = fixture("<p>text</p>");
    let p = first(&container, "p");
    assert_eq!(p.kind(), NodeKind::Element);
    assert_eq!(p.children()[0].kind(), NodeKind::Text);
    assert_eq!(DomNode(document().into()).kind(), NodeKind::Document);
    container.remove();
}

#[wasm_bindgen_test]
fn test_dom_style_property() {
    let container = fixture(r#"<span style="color: blue; text-align: center">x</span>"#);
    let span = first(&container, "span");
    assert_eq!(span.style_property("color").as_deref(), Some("blue"));
    assert_eq!(span.style_property("font-weight"), None);
    container.remove();
}

// === Serialization tests ===

#[wasm_bindgen_test]
fn test_serialize_live_dom() {
    let container = fixture(r#"<h1 slot="title">Deck</h1><!-- note --><p style="color: red">a<b>b</b></p>"#);
    let nodes = serialize_children(&DomNode::from(web_sys::Element::from(container.clone())));

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].tag(), Some("h1"));
    assert_eq!(
        nodes[0].attributes().unwrap().get("contenteditable"),
        Some("true")
    );
    assert_eq!(nodes[1].style().unwrap().get("color"), Some("red"));
    assert_eq!(nodes[1].children()[0].as_text(), Some("a"));
    container.remove();
}

#[wasm_bindgen_test]
fn test_parse_slide() {
    let slide = Slide {
        id: Some("intro".into()),
        template: "Content".into(),
        content: Some("<p>Hello</p>".into()),
        attributes: None,
    };
    let element = parse_slide(&slide).unwrap();
    assert_eq!(element.tag, "lectern-slide-content");
    assert_eq!(element.slide_id.as_deref(), Some("intro"));
    assert_eq!(element.children[0].tag(), Some("p"));

    let unknown = Slide {
        template: "poster".into(),
        ..slide
    };
    assert!(parse_slide(&unknown).is_none());
}

// === Selection inspection tests ===

#[wasm_bindgen_test]
fn test_format_state_on_live_dom() {
    let container = fixture(
        r#"<div style="color: blue"><p style="text-align: center"><i><u>styled</u></i></p></div>"#,
    );
    let text = first(&container, "u").children()[0].clone();
    let state = compute_format_state(&ContainerSet::default(), Some(&text));

    assert!(state.italic && state.underline && !state.bold);
    assert_eq!(state.align, ContentAlign::Center);
    assert_eq!(state.color.as_deref(), Some("blue"));
    container.remove();
}

#[wasm_bindgen_test]
fn test_find_link_on_live_dom() {
    let container = fixture(r#"<p><a href="https://example.com">link</a> <b>bold</b></p>"#);
    let text = first(&container, "a").children()[0].clone();
    let link = find_link(&text).unwrap();
    assert_eq!(link.node_name(), "A");

    let bold = first(&container, "b").children()[0].clone();
    assert!(find_link(&bold).is_none());
    container.remove();
}

// === Editor tests ===

#[wasm_bindgen_test]
fn test_mount_renders_idle_toolbar() {
    let host = fixture("");
    let editor = InlineEditor::mount(host.clone(), ToolbarConfig::default()).unwrap();

    assert_eq!(editor.snapshot().state, ToolbarState::Idle);
    let tools = host.query_selector(".lectern-tools").unwrap().unwrap();
    assert_eq!(tools.class_name(), editor.snapshot().class_name);

    drop(editor);
    assert!(host.query_selector(".lectern-tools").unwrap().is_none());
    host.remove();
}

#[wasm_bindgen_test]
fn test_platform_is_cached() {
    assert!(std::ptr::eq(platform(), platform()));
}
