//! The mounted inline editor.
//!
//! Owns a `ToolbarStateMachine<BrowserHost>` behind `Rc<RefCell<_>>` and
//! feeds it DOM events. Listener and timer handles are owned here and
//! dropped to unregister; replaced handles are released on a later task so a
//! callback never drops itself mid-call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use gloo_utils::format::JsValueSerdeExt;
use lectern_core::{
    HostError, Notification, PointerEvent, PointerKind, TimerKind, TimerToken, ToolbarConfig,
    ToolbarEvent, ToolbarMode, ToolbarSnapshot, ToolbarStateMachine,
};
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, CustomEventInit, Event, EventTarget, HtmlElement, MouseEvent, TouchEvent};

use crate::dom::DomNode;
use crate::host::{BrowserHost, BrowserNotification, HostRequest};
use crate::platform::platform;
use crate::render::{Panel, WidgetContext, anchor_link_value, render_panel, selection_value};

/// Outgoing DOM event names.
pub const STICKY_TOOLBAR_ACTIVATED: &str = "stickyToolbarActivated";
pub const IMG_DID_CHANGE: &str = "imgDidChange";
pub const LINK_CREATED: &str = "linkCreated";
pub const CUSTOM_ACTION: &str = "customAction";

/// Events the collaborator widgets raise on themselves.
const LINK_MODIFIED: &str = "linkModified";
const COLOR_CHANGE: &str = "colorChange";
const IMG_MODIFIED: &str = "imgModified";

const TARGET: &str = "lectern::browser";

struct EditorInner {
    machine: ToolbarStateMachine<BrowserHost>,
    host: BrowserHost,
    _selection_listener: Option<EventListener>,
    _keep_selection: Option<EventListener>,
    pointer_listeners: Vec<EventListener>,
    viewport_listeners: Vec<EventListener>,
    panel_listeners: Vec<EventListener>,
    timers: HashMap<TimerKind, Timeout>,
    rendered: Option<ToolbarSnapshot>,
}

/// An inline toolbar mounted on a host element.
///
/// Dropping the editor unregisters every listener and cancels pending timers.
pub struct InlineEditor {
    inner: Rc<RefCell<EditorInner>>,
}

impl InlineEditor {
    /// Mount the toolbar inside `element`.
    pub fn mount(element: HtmlElement, config: ToolbarConfig) -> Result<Self, HostError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(HostError::MissingContext("document"))?;

        let tools: HtmlElement = document
            .create_element("div")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| HostError::Dom("toolbar is not an html element".into()))?;
        tools.set_class_name("lectern-tools");
        element.append_child(&tools).map_err(dom_error)?;

        let host = BrowserHost::new(element, tools.clone())?;
        let machine = ToolbarStateMachine::new(config, platform().mobile);

        let inner = Rc::new(RefCell::new(EditorInner {
            machine,
            host,
            _selection_listener: None,
            _keep_selection: None,
            pointer_listeners: Vec::new(),
            viewport_listeners: Vec::new(),
            panel_listeners: Vec::new(),
            timers: HashMap::new(),
            rendered: None,
        }));

        // Keep focus and the text selection when toolbar buttons are pressed.
        let keep_selection = EventListener::new_with_options(
            &tools,
            "mousedown",
            EventListenerOptions::enable_prevent_default(),
            |event| {
                let on_widget = event
                    .target()
                    .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                    .is_some_and(|element| element.closest("input, textarea").ok().flatten().is_some());
                if !on_widget {
                    event.prevent_default();
                }
            },
        );

        {
            let weak = Rc::downgrade(&inner);
            let selection_listener = EventListener::new(&document, "selectionchange", move |_| {
                dispatch(&weak, ToolbarEvent::SelectionChange);
            });

            let mut state = inner.borrow_mut();
            state._selection_listener = Some(selection_listener);
            state._keep_selection = Some(keep_selection);
        }

        bind_pointer_listeners(&inner, &document)?;
        render(&inner);

        tracing::debug!(target: TARGET, "inline editor mounted");
        Ok(Self { inner })
    }

    /// Restrict pointer tracking to `root`, or the whole document with `None`.
    pub fn attach_to(&self, root: Option<web_sys::Node>) -> Result<(), HostError> {
        let target: EventTarget = {
            let mut state = self.inner.borrow_mut();
            state.host.set_attach_to(root.clone());
            match root {
                Some(root) => root.into(),
                None => state.host.document().clone().into(),
            }
        };
        bind_pointer_listeners(&self.inner, &target)
    }

    /// Return the toolbar to idle.
    pub fn reset(&self, clear_selection: bool, blur: bool) {
        dispatch(
            &Rc::downgrade(&self.inner),
            ToolbarEvent::Reset {
                clear_selection,
                blur,
            },
        );
    }

    /// Feed an event to the state machine, as if it came from the DOM.
    pub fn handle(&self, event: ToolbarEvent<DomNode>) {
        dispatch(&Rc::downgrade(&self.inner), event);
    }

    pub fn snapshot(&self) -> ToolbarSnapshot {
        self.inner.borrow().machine.snapshot()
    }

    pub fn element(&self) -> HtmlElement {
        self.inner.borrow().host.element().clone()
    }
}

impl Drop for InlineEditor {
    fn drop(&mut self) {
        if let Ok(state) = self.inner.try_borrow() {
            state.host.tools().remove();
        }
    }
}

fn bind_pointer_listeners(
    inner: &Rc<RefCell<EditorInner>>,
    target: &EventTarget,
) -> Result<(), HostError> {
    let mut listeners = Vec::with_capacity(2);
    for event_type in ["mousedown", "touchstart"] {
        let weak = Rc::downgrade(inner);
        listeners.push(EventListener::new(target, event_type, move |event| {
            if let Some(pointer) = pointer_event(event) {
                dispatch(&weak, ToolbarEvent::PointerDown(pointer));
            }
        }));
    }

    let mut state = inner
        .try_borrow_mut()
        .map_err(|_| HostError::Dom("editor is busy".into()))?;
    let previous = std::mem::replace(&mut state.pointer_listeners, listeners);
    release_later(previous);
    Ok(())
}

/// Unify mouse and touch input; touches report their first changed point.
fn pointer_event(event: &Event) -> Option<PointerEvent<DomNode>> {
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        .map(DomNode);

    if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        let touch = touch_event.changed_touches().item(0)?;
        return Some(PointerEvent {
            target,
            client_x: f64::from(touch.client_x()),
            client_y: f64::from(touch.client_y()),
            kind: PointerKind::Touch,
        });
    }

    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(PointerEvent {
        target,
        client_x: f64::from(mouse.client_x()),
        client_y: f64::from(mouse.client_y()),
        kind: PointerKind::Mouse,
    })
}

fn dispatch(weak: &Weak<RefCell<EditorInner>>, event: ToolbarEvent<DomNode>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let (notifications, element) = {
        // Host effects such as execCommand can fire selectionchange synchronously.
        let Ok(mut guard) = inner.try_borrow_mut() else {
            tracing::trace!(target: TARGET, ?event, "dropping re-entrant event");
            return;
        };
        let state = &mut *guard;
        state.machine.handle(&mut state.host, event);

        let mut notifications = Vec::new();
        for request in state.host.take_requests() {
            match request {
                HostRequest::Schedule(token) => state.schedule(weak, token),
                HostRequest::ViewportListeners(attached) => {
                    state.set_viewport_listeners(weak, attached)
                }
                HostRequest::Notify(notification) => notifications.push(notification),
            }
        }
        (notifications, state.host.element().clone())
    };

    render(&inner);

    for notification in notifications {
        if let Err(err) = emit(&element, notification) {
            tracing::warn!(target: TARGET, %err, "could not emit toolbar event");
        }
    }
}

impl EditorInner {
    fn schedule(&mut self, weak: &Weak<RefCell<EditorInner>>, token: TimerToken) {
        let weak = weak.clone();
        let millis = u32::try_from(token.kind.delay().as_millis()).unwrap_or(u32::MAX);
        let timeout = Timeout::new(millis, move || {
            dispatch(&weak, ToolbarEvent::TimerFired(token));
        });
        if let Some(previous) = self.timers.insert(token.kind, timeout) {
            release_later(previous);
        }
    }

    fn set_viewport_listeners(&mut self, weak: &Weak<RefCell<EditorInner>>, attached: bool) {
        release_later(std::mem::take(&mut self.viewport_listeners));
        if !attached {
            return;
        }

        let window = self.host.window().clone();
        let scroll = {
            let weak = weak.clone();
            EventListener::new(&window, "scroll", move |_| dispatch(&weak, ToolbarEvent::Scroll))
        };
        let resize = {
            let weak = weak.clone();
            EventListener::new(&window, "resize", move |_| dispatch(&weak, ToolbarEvent::Resize))
        };
        self.viewport_listeners = vec![scroll, resize];
    }
}

/// Drop `value` on a later task.
fn release_later<T: 'static>(value: T) {
    Timeout::new(0, move || drop(value)).forget();
}

fn render(inner: &Rc<RefCell<EditorInner>>) {
    let weak = Rc::downgrade(inner);
    let Ok(mut guard) = inner.try_borrow_mut() else {
        return;
    };
    let state = &mut *guard;

    let snapshot = state.machine.snapshot();
    if state.rendered.as_ref() == Some(&snapshot) {
        return;
    }

    let context = WidgetContext {
        config: state.machine.config(),
        selection: state.machine.selection(),
        anchor_link: state.machine.anchor_link(),
        anchor_target: state
            .machine
            .anchor_event()
            .and_then(|event| event.target.as_ref()),
    };
    let panel = match render_panel(state.host.document(), state.host.tools(), &snapshot, &context) {
        Ok(panel) => panel,
        Err(err) => {
            tracing::error!(target: TARGET, %err, "toolbar render failed");
            return;
        }
    };

    let previous = std::mem::replace(&mut state.panel_listeners, panel_listeners(&weak, panel));
    release_later(previous);
    state.rendered = Some(snapshot);
}

fn panel_listeners(weak: &Weak<RefCell<EditorInner>>, panel: Panel) -> Vec<EventListener> {
    match panel {
        Panel::Buttons(buttons) => buttons
            .into_iter()
            .map(|(button, kind)| {
                let weak = weak.clone();
                EventListener::new(&button, "click", move |event| {
                    event.stop_propagation();
                    dispatch(&weak, kind.event());
                })
            })
            .collect(),
        Panel::Widget(widget, ToolbarMode::Link) => {
            let modified = {
                let weak = weak.clone();
                EventListener::new(&widget, LINK_MODIFIED, move |event| {
                    event.stop_propagation();
                    let clear_selection = event_detail(event).as_bool().unwrap_or(false);
                    dispatch(&weak, ToolbarEvent::LinkModified { clear_selection });
                })
            };
            let created = {
                let weak = weak.clone();
                EventListener::new(&widget, LINK_CREATED, move |event| {
                    event.stop_propagation();
                    match event_detail(event).dyn_into::<web_sys::Node>() {
                        Ok(link) => dispatch(&weak, ToolbarEvent::LinkCreated(DomNode(link))),
                        Err(_) => tracing::warn!(target: TARGET, "linkCreated without a node"),
                    }
                })
            };
            vec![modified, created]
        }
        Panel::Widget(widget, ToolbarMode::Color) => {
            let weak = weak.clone();
            vec![EventListener::new(&widget, COLOR_CHANGE, move |event| {
                event.stop_propagation();
                match event_detail(event).into_serde::<ColorDetail>() {
                    Ok(detail) => dispatch(&weak, ToolbarEvent::ColorPicked(detail.hex)),
                    Err(err) => tracing::warn!(target: TARGET, %err, "unreadable color change"),
                }
            })]
        }
        Panel::Widget(widget, _) => {
            let weak = weak.clone();
            vec![EventListener::new(&widget, IMG_MODIFIED, move |event| {
                event.stop_propagation();
                match event_detail(event).dyn_into::<web_sys::Node>() {
                    Ok(image) => dispatch(&weak, ToolbarEvent::ImageModified(DomNode(image))),
                    Err(_) => tracing::warn!(target: TARGET, "imgModified without a node"),
                }
            })]
        }
    }
}

#[derive(Deserialize)]
struct ColorDetail {
    hex: String,
}

fn event_detail(event: &Event) -> JsValue {
    event
        .dyn_ref::<CustomEvent>()
        .map(CustomEvent::detail)
        .unwrap_or(JsValue::UNDEFINED)
}

fn emit(element: &HtmlElement, notification: BrowserNotification) -> Result<(), HostError> {
    let (name, detail) = match notification {
        Notification::StickyToolbarActivated(sticky) => {
            (STICKY_TOOLBAR_ACTIVATED, JsValue::from_bool(sticky))
        }
        Notification::ImageChanged(image) => (IMG_DID_CHANGE, image.0.into()),
        Notification::LinkCreated(link) => (LINK_CREATED, link.0.into()),
        Notification::CustomAction(custom) => {
            let object = js_sys::Object::new();
            let selection = match &custom.selection {
                Some(selection) => selection_value(selection)?,
                None => JsValue::NULL,
            };
            let anchor_link = match &custom.anchor_link {
                Some(link) => anchor_link_value(link)?,
                None => JsValue::NULL,
            };
            for (key, value) in [
                ("action", JsValue::from_str(&custom.action)),
                ("selection", selection),
                ("anchorLink", anchor_link),
            ] {
                js_sys::Reflect::set(&object, &JsValue::from_str(key), &value).map_err(dom_error)?;
            }
            (CUSTOM_ACTION, object.into())
        }
    };

    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(name, &init).map_err(dom_error)?;
    element.dispatch_event(&event).map_err(dom_error)?;
    tracing::trace!(target: TARGET, name, "emitted toolbar event");
    Ok(())
}

fn dom_error(err: JsValue) -> HostError {
    HostError::Dom(format!("{err:?}"))
}
