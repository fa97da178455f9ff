//! Slide parsing for JavaScript.

use lectern_browser::slides;
use wasm_bindgen::prelude::*;

use crate::types::{JsSlide, to_js_value};

/// Parse a stored slide into its template element tree.
///
/// Returns `null` for unknown templates.
#[wasm_bindgen(js_name = parseSlide)]
pub fn parse_slide(slide: JsSlide) -> Result<JsValue, JsError> {
    let Some(element) = slides::parse_slide(&slide.into()) else {
        return Ok(JsValue::NULL);
    };
    to_js_value(&element.into_node())
}
