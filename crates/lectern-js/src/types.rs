//! Types exposed to JavaScript via wasm-bindgen.

use lectern_core::{ContentAlign, Slide, SlideAttributes, ToolbarCommand, ToolbarEvent};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// A stored slide.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsSlide {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<JsSlideAttributes>,
}

/// Slide-level attributes: an inline style string and a media source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsSlideAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl From<JsSlide> for Slide {
    fn from(slide: JsSlide) -> Self {
        Slide {
            id: slide.id,
            template: slide.template,
            content: slide.content,
            attributes: slide.attributes.map(|attributes| SlideAttributes {
                style: attributes.style,
                src: attributes.src,
            }),
        }
    }
}

/// Toolbar command issued from a custom UI.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum JsToolbarCommand {
    Bold,
    Italic,
    Underline,
    Align { align: JsAlign },
    OrderedList,
    UnorderedList,
    ToggleLink,
    OpenColorPicker,
    OpenAlignment,
    PickColor { hex: String },
    CustomAction { action: String },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "lowercase")]
pub enum JsAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl From<JsAlign> for ContentAlign {
    fn from(align: JsAlign) -> Self {
        match align {
            JsAlign::Left => ContentAlign::Left,
            JsAlign::Center => ContentAlign::Center,
            JsAlign::Right => ContentAlign::Right,
            JsAlign::Justify => ContentAlign::Justify,
        }
    }
}

impl JsToolbarCommand {
    pub fn into_event<N>(self) -> ToolbarEvent<N> {
        let command = match self {
            Self::Bold => ToolbarCommand::Bold,
            Self::Italic => ToolbarCommand::Italic,
            Self::Underline => ToolbarCommand::Underline,
            Self::Align { align } => ToolbarCommand::Align(align.into()),
            Self::OrderedList => ToolbarCommand::OrderedList,
            Self::UnorderedList => ToolbarCommand::UnorderedList,
            Self::ToggleLink => ToolbarCommand::ToggleLink,
            Self::OpenColorPicker => ToolbarCommand::OpenColorPicker,
            Self::OpenAlignment => ToolbarCommand::OpenAlignment,
            Self::PickColor { hex } => return ToolbarEvent::ColorPicked(hex),
            Self::CustomAction { action } => return ToolbarEvent::CustomAction(action),
        };
        ToolbarEvent::Command(command)
    }
}

/// Convert to a JS value with maps as plain objects, so attribute and style
/// maps read as `node.attributes.slot` rather than through `Map#get`.
pub(crate) fn to_js_value<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
