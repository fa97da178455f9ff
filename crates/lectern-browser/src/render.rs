//! Toolbar DOM rendering.
//!
//! Builds the active panel from a `ToolbarSnapshot`: plain buttons for the
//! selection and alignment panels, or one collaborator widget element for the
//! link, color and image panels. Event wiring is left to the editor.

use gloo_utils::format::JsValueSerdeExt;
use lectern_core::toolbar::{alignment_actions, selection_actions};
use lectern_core::{
    ActionButton, ActionKind, AnchorLink, HostError, Selection, ToolbarConfig, ToolbarMode,
    ToolbarSnapshot,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::dom::DomNode;

/// Link creation and editing widget.
pub const LINK_WIDGET: &str = "lectern-link-actions";
/// Palette color picker widget.
pub const COLOR_WIDGET: &str = "lectern-color";
/// Image resize and float widget.
pub const IMAGE_WIDGET: &str = "lectern-image-actions";

/// State the collaborator widgets are handed.
pub struct WidgetContext<'a> {
    pub config: &'a ToolbarConfig,
    pub selection: Option<&'a Selection<DomNode, web_sys::Range>>,
    pub anchor_link: Option<&'a AnchorLink<DomNode, web_sys::Range>>,
    pub anchor_target: Option<&'a DomNode>,
}

/// What was rendered into the toolbar.
pub enum Panel {
    Buttons(Vec<(HtmlElement, ActionKind)>),
    Widget(HtmlElement, ToolbarMode),
}

/// Replace the toolbar's content with the panel for `snapshot`.
pub fn render_panel(
    document: &Document,
    tools: &HtmlElement,
    snapshot: &ToolbarSnapshot,
    context: &WidgetContext<'_>,
) -> Result<Panel, HostError> {
    tools.set_class_name(&snapshot.class_name);
    tools.set_inner_html("");

    let mode = snapshot.mode();
    let panel = match mode {
        ToolbarMode::Selection => {
            let actions = selection_actions(snapshot, context.config);
            Panel::Buttons(render_buttons(document, tools, &actions, snapshot.mobile)?)
        }
        ToolbarMode::Alignment => {
            let actions = alignment_actions(&snapshot.format);
            Panel::Buttons(render_buttons(document, tools, &actions, snapshot.mobile)?)
        }
        ToolbarMode::Link | ToolbarMode::Color | ToolbarMode::Image => {
            let widget = render_widget(document, mode, context)?;
            tools.append_child(&widget).map_err(dom_error)?;
            Panel::Widget(widget, mode)
        }
    };
    Ok(panel)
}

fn render_buttons(
    document: &Document,
    tools: &HtmlElement,
    buttons: &[ActionButton],
    mobile: bool,
) -> Result<Vec<(HtmlElement, ActionKind)>, HostError> {
    let mut rendered = Vec::with_capacity(buttons.len());
    for button in buttons {
        if button.separated {
            let separator = document.create_element("span").map_err(dom_error)?;
            separator.set_class_name("lectern-separator");
            tools.append_child(&separator).map_err(dom_error)?;
        }

        let element: HtmlElement = document
            .create_element("button")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| HostError::Dom("button is not an html element".into()))?;
        element.set_class_name(&button_class(button, mobile));
        if button.disabled {
            element.set_attribute("disabled", "").map_err(dom_error)?;
        }
        if let ActionKind::Custom(action) = &button.kind {
            element.set_attribute("data-action", action).map_err(dom_error)?;
        }
        if let Some(color) = &button.color {
            element
                .style()
                .set_property("--lectern-action-color", color)
                .map_err(dom_error)?;
        }
        element.set_text_content(button_label(&button.kind));

        tools.append_child(&element).map_err(dom_error)?;
        rendered.push((element, button.kind.clone()));
    }
    Ok(rendered)
}

fn button_class(button: &ActionButton, mobile: bool) -> String {
    let mut class = format!("lectern-action {}", button.css_class);
    if button.active {
        class.push_str(" active");
    }
    if mobile {
        class.push_str(" mobile");
    }
    class
}

fn button_label(kind: &ActionKind) -> Option<&str> {
    match kind {
        ActionKind::Bold => Some("B"),
        ActionKind::Italic => Some("I"),
        ActionKind::Underline => Some("U"),
        ActionKind::Custom(action) => Some(action),
        _ => None,
    }
}

fn render_widget(
    document: &Document,
    mode: ToolbarMode,
    context: &WidgetContext<'_>,
) -> Result<HtmlElement, HostError> {
    let tag = match mode {
        ToolbarMode::Link => LINK_WIDGET,
        ToolbarMode::Color => COLOR_WIDGET,
        _ => IMAGE_WIDGET,
    };
    let widget: HtmlElement = document
        .create_element(tag)
        .map_err(dom_error)?
        .dyn_into()
        .map_err(|_| HostError::Dom(format!("{tag} is not an html element")))?;

    match mode {
        ToolbarMode::Link => {
            set_property(&widget, "toolbarMode", &JsValue::from_str("link"))?;
            if let Some(link) = context.anchor_link {
                set_property(&widget, "anchorLink", &anchor_link_value(link)?)?;
            }
            if let Some(selection) = context.selection {
                set_property(&widget, "selection", &selection_value(selection)?)?;
            }
        }
        ToolbarMode::Color => {
            let palette = JsValue::from_serde(&context.config.palette)
                .map_err(|err| HostError::Dom(err.to_string()))?;
            set_property(&widget, "palette", &palette)?;
        }
        _ => {
            let config = context.config;
            widget
                .set_attribute("img-property-width", &config.img_property_width)
                .and_then(|_| widget.set_attribute("img-property-css-float", &config.img_property_css_float))
                .and_then(|_| widget.set_attribute("img-anchor", &config.img_anchor))
                .and_then(|_| widget.set_attribute("containers", &config.containers))
                .map_err(dom_error)?;
            if let Some(target) = context.anchor_target {
                set_property(&widget, "anchorTarget", target.as_node())?;
            }
        }
    }

    Ok(widget)
}

/// `{range, text, element}` for JS consumers.
pub fn anchor_link_value(link: &AnchorLink<DomNode, web_sys::Range>) -> Result<JsValue, HostError> {
    let object = js_sys::Object::new();
    set_property(&object, "range", &link.range)?;
    set_property(&object, "text", &JsValue::from_str(&link.text))?;
    let element = link
        .element
        .as_ref()
        .map(|element| JsValue::from(element.as_node().clone()))
        .unwrap_or(JsValue::NULL);
    set_property(&object, "element", &element)?;
    Ok(object.into())
}

/// `{anchorNode, text, range}` for JS consumers.
pub fn selection_value(selection: &Selection<DomNode, web_sys::Range>) -> Result<JsValue, HostError> {
    let object = js_sys::Object::new();
    let anchor = selection
        .anchor
        .as_ref()
        .map(|anchor| JsValue::from(anchor.as_node().clone()))
        .unwrap_or(JsValue::NULL);
    set_property(&object, "anchorNode", &anchor)?;
    set_property(&object, "text", &JsValue::from_str(&selection.text))?;
    let range = selection
        .range
        .clone()
        .map(JsValue::from)
        .unwrap_or(JsValue::NULL);
    set_property(&object, "range", &range)?;
    Ok(object.into())
}

fn set_property(target: &JsValue, key: &str, value: &JsValue) -> Result<(), HostError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(dom_error)
}

fn dom_error(err: JsValue) -> HostError {
    HostError::Dom(format!("{err:?}"))
}
