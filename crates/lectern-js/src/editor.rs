//! The inline toolbar as a JavaScript class.

use lectern_browser::{InlineEditor, ToolbarConfig, ToolbarEvent};
use wasm_bindgen::prelude::*;

use crate::types::{JsToolbarCommand, to_js_value};

/// Inline formatting toolbar mounted on a host element.
///
/// The host element receives `stickyToolbarActivated`, `imgDidChange`,
/// `linkCreated` and `customAction` events.
#[wasm_bindgen]
pub struct JsInlineEditor {
    editor: InlineEditor,
}

#[wasm_bindgen]
impl JsInlineEditor {
    /// Mount a toolbar inside `element`. `config` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(element: web_sys::HtmlElement, config: JsValue) -> Result<JsInlineEditor, JsError> {
        let config: ToolbarConfig = if config.is_undefined() || config.is_null() {
            ToolbarConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?
        };

        let editor = InlineEditor::mount(element, config)
            .map_err(|e| JsError::new(&format!("Mount failed: {}", e)))?;
        Ok(Self { editor })
    }

    /// Restrict pointer tracking to `root`; pass `null` for the whole document.
    #[wasm_bindgen(js_name = attachTo)]
    pub fn attach_to(&self, root: Option<web_sys::Node>) -> Result<(), JsError> {
        self.editor
            .attach_to(root)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Return the toolbar to idle.
    pub fn reset(&self, clear_selection: bool, blur: bool) {
        self.editor.reset(clear_selection, blur);
    }

    /// Run a toolbar command as if its button were pressed.
    #[wasm_bindgen(js_name = executeCommand)]
    pub fn execute_command(&self, command: JsToolbarCommand) {
        self.editor.handle(command.into_event());
    }

    /// Re-evaluate the current selection.
    pub fn refresh(&self) {
        self.editor.handle(ToolbarEvent::SelectionChange);
    }

    /// Current toolbar state, format and classes.
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> Result<JsValue, JsError> {
        to_js_value(&self.editor.snapshot())
    }
}
