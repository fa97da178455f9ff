//! `ToolbarHost` over the live document.
//!
//! Synchronous effects (selection, `execCommand`, placement) happen right
//! away. Effects that need callbacks into the editor (timers, viewport
//! listeners, outgoing DOM events) are queued as `HostRequest`s and carried
//! out by the editor once the state machine has returned.

use lectern_core::{
    FormatCommand, HostError, Notification, STICKY_SCROLL_PROPERTY, Selection, TimerToken,
    ToolbarHost, ToolbarPosition, ToolbarSize, Viewport,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument, HtmlElement, Window};

use crate::dom::DomNode;
use crate::platform::platform;

pub type BrowserNotification = Notification<DomNode, web_sys::Range>;

/// Deferred effect for the editor to perform.
#[derive(Debug)]
pub enum HostRequest {
    Schedule(TimerToken),
    ViewportListeners(bool),
    Notify(BrowserNotification),
}

pub struct BrowserHost {
    window: Window,
    document: Document,
    /// The editor's host element; outgoing events and the sticky property live here.
    element: HtmlElement,
    /// The positioned toolbar container.
    tools: HtmlElement,
    attach_to: Option<web_sys::Node>,
    requests: Vec<HostRequest>,
}

impl BrowserHost {
    pub fn new(element: HtmlElement, tools: HtmlElement) -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::MissingContext("window"))?;
        let document = window
            .document()
            .ok_or(HostError::MissingContext("document"))?;
        Ok(Self {
            window,
            document,
            element,
            tools,
            attach_to: None,
            requests: Vec::new(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn tools(&self) -> &HtmlElement {
        &self.tools
    }

    pub fn attach_to(&self) -> Option<&web_sys::Node> {
        self.attach_to.as_ref()
    }

    pub fn set_attach_to(&mut self, root: Option<web_sys::Node>) {
        self.attach_to = root;
    }

    pub fn take_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    fn live_selection(&self) -> Option<web_sys::Selection> {
        self.window.get_selection().ok().flatten()
    }
}

impl ToolbarHost for BrowserHost {
    type Node = DomNode;
    type Range = web_sys::Range;

    fn selection(&self) -> Option<Selection<DomNode, web_sys::Range>> {
        let selection = self.live_selection()?;
        let range = if selection.range_count() > 0 {
            selection.get_range_at(0).ok()
        } else {
            None
        };
        Some(Selection {
            anchor: selection.anchor_node().map(DomNode),
            text: String::from(selection.to_string()),
            range,
        })
    }

    fn active_element(&self) -> Option<DomNode> {
        self.document.active_element().map(DomNode::from)
    }

    fn is_toolbar(&self, node: &DomNode) -> bool {
        self.element.contains(Some(node.as_node()))
    }

    fn is_connected(&self, node: &DomNode) -> bool {
        node.as_node().is_connected()
    }

        fn within_attachment(&self, target: Option<&DomNode>) -> bool {
        match &self.attach_to {
            None => true,
            Some(root) => target.is_some_and(|target| root.contains(Some(target.as_node()))),
        }
    }

    fn exec_command(&mut self, command: &FormatCommand) -> Result<(), HostError> {
        let document = self
            .document
            .dyn_ref::<HtmlDocument>()
            .ok_or(HostError::MissingContext("html document"))?;

        let applied = match command.value() {
            Some(value) => document.exec_command_with_show_ui_and_value(command.name(), false, value),
            None => document.exec_command(command.name()),
        }
        .map_err(|err| HostError::Dom(format!("{err:?}")))?;

        if applied {
            Ok(())
        } else {
            Err(HostError::Command {
                command: command.name().to_string(),
            })
        }
    }

    fn unwrap_link(&mut self, link: &DomNode) -> Result<(), HostError> {
        let parent = link.as_node().parent_node().ok_or("link is detached")?;
        let text = self.document.create_text_node(&link.as_node().text_content().unwrap_or_default());
        parent
            .insert_before(&text, Some(link.as_node()))
            .and_then(|_| parent.remove_child(link.as_node()))
            .map_err(|err| HostError::Dom(format!("{err:?}")))?;
        Ok(())
    }

    fn clear_selection(&mut self) {
        if let Some(selection) = self.live_selection() {
            if let Err(err) = selection.remove_all_ranges() {
                tracing::warn!(target: "lectern::browser", ?err, "could not clear selection");
            }
        }
    }

    fn blur_active_element(&mut self) {
        if let Some(active) = self
            .document
            .active_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        {
            let _ = active.blur();
        }
    }

    fn toolbar_size(&self) -> ToolbarSize {
        ToolbarSize {
            width: f64::from(self.tools.offset_width()),
            height: f64::from(self.tools.offset_height()),
        }
    }

    fn viewport(&self) -> Viewport {
        // iOS reports the zoomed layout viewport in innerWidth.
        let width = if platform().ios {
            self.window
                .screen()
                .ok()
                .and_then(|screen| screen.width().ok())
                .map(f64::from)
        } else {
            self.window.inner_width().ok().and_then(|w| w.as_f64())
        };
        let height = self.window.inner_height().ok().and_then(|h| h.as_f64());
        Viewport {
            width: width.unwrap_or_default(),
            height: height.unwrap_or_default(),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn place_toolbar(&mut self, position: ToolbarPosition) {
        let style = self.tools.style();
        let placed = style
            .set_property("top", &format!("{}px", position.top))
            .and_then(|_| style.set_property("left", &format!("{}px", position.left)));
        if let Err(err) = placed {
            tracing::warn!(target: "lectern::browser", ?err, "could not place toolbar");
        }
    }

    fn set_sticky_scroll(&mut self, value: &str) {
        if let Err(err) = self.element.style().set_property(STICKY_SCROLL_PROPERTY, value) {
            tracing::warn!(target: "lectern::browser", ?err, "could not set sticky scroll");
        }
    }

    fn set_viewport_listeners(&mut self, attached: bool) {
        self.requests.push(HostRequest::ViewportListeners(attached));
    }

    fn schedule(&mut self, token: TimerToken) {
        self.requests.push(HostRequest::Schedule(token));
    }

    fn notify(&mut self, notification: BrowserNotification) {
        self.requests.push(HostRequest::Notify(notification));
    }
}
