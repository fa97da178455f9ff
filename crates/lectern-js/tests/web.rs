//! WASM browser tests for lectern-js.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use js_sys::{Array, Map, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use lectern_js::{JsInlineEditor, JsSlide, JsSlideAttributes, parse_slide};

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key).as_string()
}

#[wasm_bindgen_test]
fn test_parse_slide_maps_are_plain_objects() {
    let value = parse_slide(JsSlide {
        id: Some("intro".into()),
        template: "title".into(),
        content: Some(r#"<h1 slot="title" style="color: red">Deck</h1>"#.into()),
        attributes: Some(JsSlideAttributes {
            style: Some("background: black".into()),
            src: None,
        }),
    })
    .unwrap();

    assert_eq!(get_string(&value, "type").as_deref(), Some("element"));
    assert_eq!(get_string(&value, "tag").as_deref(), Some("lectern-slide-title"));

    let root_attributes = get(&value, "attributes");
    assert!(!root_attributes.is_instance_of::<Map>());
    assert_eq!(get_string(&root_attributes, "slide_id").as_deref(), Some("intro"));
    let root_style = get(&value, "style");
    assert!(!root_style.is_instance_of::<Map>());
    assert_eq!(get_string(&root_style, "background").as_deref(), Some("black"));

    let children: Array = get(&value, "children").dyn_into().unwrap();
    assert_eq!(children.length(), 1);
    let heading = children.get(0);
    let attributes = get(&heading, "attributes");
    assert!(!attributes.is_instance_of::<Map>());
    assert_eq!(get_string(&attributes, "slot").as_deref(), Some("title"));
    assert_eq!(get_string(&attributes, "contenteditable").as_deref(), Some("true"));
    assert_eq!(get_string(&get(&heading, "style"), "color").as_deref(), Some("red"));
}

#[wasm_bindgen_test]
fn test_parse_slide_unknown_template_is_null() {
    let value = parse_slide(JsSlide {
        id: None,
        template: "poster".into(),
        content: None,
        attributes: None,
    })
    .unwrap();
    assert!(value.is_null());
}

#[wasm_bindgen_test]
fn test_snapshot_is_plain_object() {
    let document = web_sys::window().unwrap().document().unwrap();
    let host: web_sys::HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    document.body().unwrap().append_child(&host).unwrap();

    let editor = JsInlineEditor::new(host.clone(), JsValue::UNDEFINED).unwrap();
    let snapshot = editor.get_snapshot().unwrap();
    assert!(snapshot.is_object());
    assert!(!snapshot.is_instance_of::<Map>());
    assert!(get_string(&snapshot, "className").is_some_and(|name| name.contains("lectern-tools")));

    drop(editor);
    host.remove();
}
