//! The selection-driven toolbar state machine.
//!
//! `ToolbarStateMachine` owns every piece of mutable toolbar state: the held
//! selection, the captured anchor link, the computed `FormatState`, the
//! active mode and the pending pointer event. All input arrives through
//! `handle` as a `ToolbarEvent`; all effects go out through the
//! `ToolbarHost`. Delayed effects are `TimerToken`s that the host hands back
//! as `ToolbarEvent::TimerFired`, and each one re-checks the state it was
//! armed for before acting.

mod actions;


pub use actions::{ActionButton, ActionKind, alignment_actions, selection_actions, tools_class};

use serde::{Deserialize, Serialize};

use crate::config::ToolbarConfig;
use crate::format::{ContainerSet, ContentAlign, FormatState};
use crate::host::{
    AnchorLink, CustomAction, FormatCommand, Notification, PointerEvent, Selection, ToolbarHost,
};
use crate::inspect::{compute_format_state, find_link};
use crate::node::NodeView;
use crate::position::{position_toolbar, sticky_scroll_value};
use crate::timer::{CoalescingTimers, TimerKind, TimerToken};

/// Which command panel the toolbar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarMode {
    #[default]
    Selection,
    Link,
    Color,
    Image,
    Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "mode", rename_all = "lowercase")]
pub enum ToolbarState {
    #[default]
    Idle,
    Activated(ToolbarMode),
}

impl ToolbarState {
    pub fn is_activated(&self) -> bool {
        matches!(self, ToolbarState::Activated(_))
    }

    pub fn mode(&self) -> Option<ToolbarMode> {
        match self {
            ToolbarState::Idle => None,
            ToolbarState::Activated(mode) => Some(*mode),
        }
    }
}

/// Commands issued from toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    Bold,
    Italic,
    Underline,
    Align(ContentAlign),
    OrderedList,
    UnorderedList,
    ToggleLink,
    OpenColorPicker,
    OpenAlignment,
}

impl ToolbarCommand {
    fn format_command(self) -> Option<FormatCommand> {
        match self {
            ToolbarCommand::Bold => Some(FormatCommand::Bold),
            ToolbarCommand::Italic => Some(FormatCommand::Italic),
            ToolbarCommand::Underline => Some(FormatCommand::Underline),
            ToolbarCommand::Align(align) => Some(FormatCommand::Justify(align)),
            ToolbarCommand::OrderedList => Some(FormatCommand::InsertOrderedList),
            ToolbarCommand::UnorderedList => Some(FormatCommand::InsertUnorderedList),
            ToolbarCommand::ToggleLink
            | ToolbarCommand::OpenColorPicker
            | ToolbarCommand::OpenAlignment => None,
        }
    }
}

/// Everything the state machine reacts to.
#[derive(Debug, Clone)]
pub enum ToolbarEvent<N> {
    PointerDown(PointerEvent<N>),
    SelectionChange,
    Scroll,
    Resize,
    TimerFired(TimerToken),
    Command(ToolbarCommand),
    /// The link widget finished; reset, optionally clearing the selection.
    LinkModified { clear_selection: bool },
    /// The link widget created an anchor element.
    LinkCreated(N),
    /// The image widget changed an image-bearing node.
    ImageModified(N),
    /// The color widget picked a hex value.
    ColorPicked(String),
    CustomAction(String),
    Reset { clear_selection: bool, blur: bool },
}

/// Read-only view of the toolbar for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarSnapshot {
    pub state: ToolbarState,
    pub format: FormatState,
    pub link: bool,
    /// Debounced visual activation.
    pub displayed: bool,
    pub mobile: bool,
    pub sticky: bool,
    pub class_name: String,
}

impl ToolbarSnapshot {
    /// The panel to render. Idle toolbars keep the selection panel.
    pub fn mode(&self) -> ToolbarMode {
        self.state.mode().unwrap_or_default()
    }
}

pub struct ToolbarStateMachine<H: ToolbarHost> {
    config: ToolbarConfig,
    containers: ContainerSet,
    mobile: bool,
    state: ToolbarState,
    format: FormatState,
    link: bool,
    displayed: bool,
    selection: Option<Selection<H::Node, H::Range>>,
    anchor_link: Option<AnchorLink<H::Node, H::Range>>,
    anchor_event: Option<PointerEvent<H::Node>>,
    timers: CoalescingTimers,
    viewport_listeners: bool,
    sticky_announced: bool,
}

impl<H: ToolbarHost> ToolbarStateMachine<H> {
    /// Create an idle toolbar. `platform_mobile` is used unless the config forces `mobile`.
    pub fn new(config: ToolbarConfig, platform_mobile: bool) -> Self {
        let containers = config.containers();
        let mobile = config.is_mobile(platform_mobile);
        Self {
            config,
            containers,
            mobile,
            state: ToolbarState::Idle,
            format: FormatState::default(),
            link: false,
            displayed: false,
            selection: None,
            anchor_link: None,
            anchor_event: None,
            timers: CoalescingTimers::new(),
            viewport_listeners: false,
            sticky_announced: false,
        }
    }

    pub fn config(&self) -> &ToolbarConfig {
        &self.config
    }

    pub fn state(&self) -> ToolbarState {
        self.state
    }

    pub fn format(&self) -> &FormatState {
        &self.format
    }

    pub fn is_link(&self) -> bool {
        self.link
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn is_sticky(&self) -> bool {
        self.config.is_sticky(self.mobile)
    }

    pub fn selection(&self) -> Option<&Selection<H::Node, H::Range>> {
        self.selection.as_ref()
    }

    pub fn anchor_link(&self) -> Option<&AnchorLink<H::Node, H::Range>> {
        self.anchor_link.as_ref()
    }

    pub fn anchor_event(&self) -> Option<&PointerEvent<H::Node>> {
        self.anchor_event.as_ref()
    }

    pub fn viewport_listeners_attached(&self) -> bool {
        self.viewport_listeners
    }

    pub fn snapshot(&self) -> ToolbarSnapshot {
        let sticky = self.is_sticky();
        ToolbarSnapshot {
            state: self.state,
            format: self.format.clone(),
            link: self.link,
            displayed: self.displayed,
            mobile: self.mobile,
            sticky,
            class_name: tools_class(self.displayed, self.mobile, sticky),
        }
    }

    /// Process one event.
    pub fn handle(&mut self, host: &mut H, event: ToolbarEvent<H::Node>) {
        match event {
            ToolbarEvent::PointerDown(event) => self.pointer_down(host, event),
            ToolbarEvent::SelectionChange => self.selection_change(host),
            ToolbarEvent::Scroll => {
                if self.viewport_listeners {
                    self.sample_sticky_scroll(host);
                }
            }
            ToolbarEvent::Resize => {
                if self.viewport_listeners {
                    tracing::debug!(target: "lectern::toolbar", "resize while sticky");
                    self.reset(host, true, true);
                }
            }
            ToolbarEvent::TimerFired(token) => self.timer_fired(host, token),
            ToolbarEvent::Command(command) => self.command(host, command),
            ToolbarEvent::LinkModified { clear_selection } => {
                self.reset(host, clear_selection, false)
            }
            ToolbarEvent::LinkCreated(anchor) => host.notify(Notification::LinkCreated(anchor)),
            ToolbarEvent::ImageModified(node) => {
                host.notify(Notification::ImageChanged(node));
                self.reset(host, true, false);
            }
            ToolbarEvent::ColorPicked(hex) => self.select_color(host, hex),
            ToolbarEvent::CustomAction(action) => {
                tracing::debug!(target: "lectern::toolbar", %action, "custom action");
                host.notify(Notification::CustomAction(CustomAction {
                    action,
                    selection: self.selection.clone(),
                    anchor_link: self.anchor_link.clone(),
                }));
            }
            ToolbarEvent::Reset {
                clear_selection,
                blur,
            } => self.reset(host, clear_selection, blur),
        }
    }

    /// Return to `Idle`. Safe to call repeatedly.
    pub fn reset(&mut self, host: &mut H, clear_selection: bool, blur: bool) {
        if clear_selection {
            host.clear_selection();
        }

        self.set_tools_activated(host, false);

        self.state = ToolbarState::Idle;
        self.format = FormatState::default();
        self.selection = None;
        self.anchor_link = None;
        self.link = false;

        // Image activation re-checks state when it fires instead.
        self.timers.cancel(TimerKind::DisplayActivation);
        self.timers.cancel(TimerKind::StickyScroll);

        if self.viewport_listeners {
            host.set_viewport_listeners(false);
            self.viewport_listeners = false;
        }

        if blur {
            host.blur_active_element();
        }
    }

    // === Pointer ===

    fn pointer_down(&mut self, host: &mut H, event: PointerEvent<H::Node>) {
        match self.state {
            ToolbarState::Activated(ToolbarMode::Image) => {
                let inside = event
                    .target
                    .as_ref()
                    .is_some_and(|target| host.is_toolbar(target));
                if inside {
                    return;
                }
                // The press that closes the image widget may start a new selection.
                self.reset(host, false, false);
            }
            ToolbarState::Activated(_) => {
                // Once shown, the toolbar keeps its anchor until reset.
                if !self.displayed {
                    self.anchor_event = Some(event);
                }
                return;
            }
            ToolbarState::Idle => {}
        }

        self.timers.cancel(TimerKind::ImageActivation);
        self.anchor_event = Some(event);

        if self.config.img_editable && self.anchor_image(host) {
            self.reset(host, true, false);
            let token = self.timers.arm(TimerKind::ImageActivation);
            host.schedule(token);
        }
    }

    /// Whether the last press landed on an image that is still in the document.
    fn anchor_image(&self, host: &H) -> bool {
        self.anchor_event
            .as_ref()
            .and_then(|event| event.target.as_ref())
            .is_some_and(|target| target.has_tag(&self.config.img_anchor) && host.is_connected(target))
    }

    // === Selection ===

    fn selection_change(&mut self, host: &mut H) {
        if let Some(active) = host.active_element() {
            if !self.containers.matches(&active) {
                if !host.is_toolbar(&active) {
                    self.reset(host, false, false);
                }
                return;
            }
        }

        if self.state == ToolbarState::Activated(ToolbarMode::Image) {
            if !self.anchor_image(host) {
                tracing::debug!(target: "lectern::toolbar", "image anchor gone");
                self.reset(host, false, false);
            }
            return;
        }

        self.display_tools(host);
    }

    fn display_tools(&mut self, host: &mut H) {
        let Some(target) = self.anchor_event.as_ref().map(|event| event.target.clone()) else {
            tracing::trace!(target: "lectern::toolbar", "selection change without anchor event");
            self.reset(host, false, false);
            return;
        };

        if !host.within_attachment(target.as_ref()) {
            self.reset(host, false, false);
            return;
        }

        let Some(selection) = host.selection().filter(|selection| !selection.is_blank()) else {
            self.reset(host, false, false);
            return;
        };

        self.format = compute_format_state(&self.containers, selection.anchor.as_ref());
        self.link = selection.anchor.as_ref().and_then(find_link).is_some();

        if !self.state.is_activated() {
            self.state = ToolbarState::Activated(ToolbarMode::Selection);
        }
        tracing::debug!(target: "lectern::toolbar", state = ?self.state, link = self.link, "tools activated");
        self.set_tools_activated(host, true);

        self.anchor_link = selection.range.clone().map(|range| AnchorLink {
            range,
            text: selection.text.clone(),
            element: host.active_element(),
        });
        let has_range = selection.range.is_some();
        self.selection = Some(selection);

        if has_range {
            self.place(host);
        }
    }

    fn set_tools_activated(&mut self, host: &mut H, activated: bool) {
        if activated {
            let token = self.timers.arm(TimerKind::DisplayActivation);
            host.schedule(token);
        } else {
            self.displayed = false;
        }

        if self.is_sticky() && self.sticky_announced != activated {
            self.sticky_announced = activated;
            host.notify(Notification::StickyToolbarActivated(activated));
        }
    }

    // === Placement ===

    fn place(&mut self, host: &mut H) {
        let Some(point) = self.anchor_event.as_ref().map(PointerEvent::point) else {
            return;
        };

        if self.is_sticky() {
            self.sample_sticky_scroll(host);
            if !self.viewport_listeners {
                host.set_viewport_listeners(true);
                self.viewport_listeners = true;
            }
            return;
        }

        let position = position_toolbar(point, host.toolbar_size(), host.viewport(), self.mobile);
        tracing::trace!(target: "lectern::toolbar", ?position, "placing toolbar");
        host.place_toolbar(position);
    }

    fn sample_sticky_scroll(&mut self, host: &mut H) {
        let token = self.timers.arm(TimerKind::StickyScroll);
        host.schedule(token);
    }

    fn timer_fired(&mut self, host: &mut H, token: TimerToken) {
        if !self.timers.fire(token) {
            tracing::trace!(target: "lectern::toolbar", ?token, "stale timer");
            return;
        }

        match token.kind {
            TimerKind::DisplayActivation => {
                if self.state.is_activated() {
                    self.displayed = true;
                }
            }
            TimerKind::ImageActivation => {
                if self.state == ToolbarState::Idle && self.anchor_image(host) {
                    self.state = ToolbarState::Activated(ToolbarMode::Image);
                    self.format.color = None;
                    self.set_tools_activated(host, true);
                    self.place(host);
                }
            }
            TimerKind::StickyScroll => {
                if self.viewport_listeners {
                    host.set_sticky_scroll(&sticky_scroll_value(host.scroll_y()));
                }
            }
        }
    }

    // === Commands ===

    fn command(&mut self, host: &mut H, command: ToolbarCommand) {
        if let Some(format) = command.format_command() {
            self.exec_guarded(host, &format);
            if format.is_list() {
                self.reset(host, true, false);
            } else {
                self.refresh_format(host);
            }
            return;
        }

        match command {
            ToolbarCommand::ToggleLink => {
                if self.link {
                    self.remove_link(host);
                    self.reset(host, true, false);
                } else {
                    self.switch_mode(ToolbarMode::Link);
                }
            }
            ToolbarCommand::OpenColorPicker => self.switch_mode(ToolbarMode::Color),
            ToolbarCommand::OpenAlignment => self.switch_mode(ToolbarMode::Alignment),
            _ => {}
        }
    }

    fn switch_mode(&mut self, mode: ToolbarMode) {
        if self.state.is_activated() {
            self.state = ToolbarState::Activated(mode);
        }
    }

    /// Run a command only against a held selection with a range and text.
    fn exec_guarded(&mut self, host: &mut H, command: &FormatCommand) -> bool {
        let actionable = self
            .selection
            .as_ref()
            .is_some_and(Selection::is_actionable);
        if !actionable {
            tracing::trace!(target: "lectern::toolbar", command = command.name(), "ignoring command without selection");
            return false;
        }

        match host.exec_command(command) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(target: "lectern::toolbar", command = command.name(), %err, "format command failed");
                false
            }
        }
    }

    fn refresh_format(&mut self, host: &mut H) {
        if self.selection.is_none() {
            return;
        }
        let anchor = host
            .selection()
            .and_then(|selection| selection.anchor)
            .or_else(|| self.selection.as_ref().and_then(|s| s.anchor.clone()));
        self.format = compute_format_state(&self.containers, anchor.as_ref());
    }

    fn remove_link(&mut self, host: &mut H) {
        let Some(link) = self
            .selection
            .as_ref()
            .and_then(|selection| selection.anchor.as_ref())
            .and_then(find_link)
        else {
            return;
        };

        if let Err(err) = host.unwrap_link(&link) {
            tracing::warn!(target: "lectern::toolbar", %err, "could not remove link");
        }
    }

    fn select_color(&mut self, host: &mut H, hex: String) {
        if self.selection.is_none() {
            return;
        }
        self.format.color = Some(hex.clone());
        self.exec_guarded(host, &FormatCommand::ForeColor(hex));
        self.reset(host, true, false);
    }
}
