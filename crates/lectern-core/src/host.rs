//! Host abstraction for the toolbar state machine.
//!
//! `ToolbarHost` is everything the state machine needs from the environment:
//! the live selection, focus, formatting commands, placement, timers and
//! notification delivery. The browser crate implements it over `web_sys`;
//! tests implement it over a `MarkupTree`.

use crate::error::HostError;
use crate::format::ContentAlign;
use crate::node::NodeView;
use crate::position::{PointerPoint, ToolbarPosition, ToolbarSize, Viewport};
use crate::timer::TimerToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// A pointer-down or touch-start delivered to the toolbar.
#[derive(Debug, Clone)]
pub struct PointerEvent<N> {
    pub target: Option<N>,
    pub client_x: f64,
    pub client_y: f64,
    pub kind: PointerKind,
}

impl<N> PointerEvent<N> {
    pub fn point(&self) -> PointerPoint {
        PointerPoint {
            x: self.client_x,
            y: self.client_y,
        }
    }
}

/// Snapshot of the document selection.
#[derive(Debug, Clone)]
pub struct Selection<N, R> {
    pub anchor: Option<N>,
    /// The selected text as the document reports it.
    pub text: String,
    /// First range, if the selection has any.
    pub range: Option<R>,
}

impl<N, R> Selection<N, R> {
    /// Empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether formatting commands may run against this selection.
    pub fn is_actionable(&self) -> bool {
        self.range.is_some() && !self.text.is_empty()
    }
}

/// Range, text and focused element captured when the toolbar activates.
#[derive(Debug, Clone)]
pub struct AnchorLink<N, R> {
    pub range: R,
    pub text: String,
    pub element: Option<N>,
}

/// Document formatting commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Justify(ContentAlign),
    InsertOrderedList,
    InsertUnorderedList,
    ForeColor(String),
}

impl FormatCommand {
    /// The `execCommand` name.
    pub fn name(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Justify(align) => align.command(),
            FormatCommand::InsertOrderedList => "insertOrderedList",
            FormatCommand::InsertUnorderedList => "insertUnorderedList",
            FormatCommand::ForeColor(_) => "foreColor",
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            FormatCommand::ForeColor(color) => Some(color),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            FormatCommand::InsertOrderedList | FormatCommand::InsertUnorderedList
        )
    }
}

/// Payload of a custom action button press.
#[derive(Debug, Clone)]
pub struct CustomAction<N, R> {
    pub action: String,
    pub selection: Option<Selection<N, R>>,
    pub anchor_link: Option<AnchorLink<N, R>>,
}

/// Outbound notifications.
#[derive(Debug, Clone)]
pub enum Notification<N, R> {
    StickyToolbarActivated(bool),
    ImageChanged(N),
    LinkCreated(N),
    CustomAction(CustomAction<N, R>),
}

/// Environment the toolbar runs in.
pub trait ToolbarHost {
    type Node: NodeView;
    type Range: Clone + std::fmt::Debug;

    /// The current document selection, if the document exposes one.
    fn selection(&self) -> Option<Selection<Self::Node, Self::Range>>;

    /// The focused element.
    fn active_element(&self) -> Option<Self::Node>;

    /// Whether `node` is the toolbar host element.
    fn is_toolbar(&self, node: &Self::Node) -> bool;

    /// Whether `node` is still part of the document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Whether a pointer target lies inside the attachment root.
    ///
    /// Without a configured root the whole document counts.
    fn within_attachment(&self, target: Option<&Self::Node>) -> bool;

    /// Apply a formatting command to the live selection.
    fn exec_command(&mut self, command: &FormatCommand) -> Result<(), HostError>;

    /// Replace a link element with a text node carrying its text.
    fn unwrap_link(&mut self, link: &Self::Node) -> Result<(), HostError>;

    fn clear_selection(&mut self);

    fn blur_active_element(&mut self);

    fn toolbar_size(&self) -> ToolbarSize;

    fn viewport(&self) -> Viewport;

    fn scroll_y(&self) -> f64;

    fn place_toolbar(&mut self, position: ToolbarPosition);

    /// Write the sticky scroll custom property.
    fn set_sticky_scroll(&mut self, value: &str);

    /// Attach or detach the viewport scroll and resize listeners.
    fn set_viewport_listeners(&mut self, attached: bool);

    /// Deliver `token` back as `ToolbarEvent::TimerFired` after its delay.
    fn schedule(&mut self, token: TimerToken);

    fn notify(&mut self, notification: Notification<Self::Node, Self::Range>);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(text: &str, range: Option<u32>) -> Selection<(), u32> {
        Selection {
            anchor: None,
            text: text.to_string(),
            range,
        }
    }

    #[test]
    fn test_blank_selection() {
        assert!(selection("", Some(0)).is_blank());
        assert!(selection(" \n\t", Some(0)).is_blank());
        assert!(!selection(" a ", Some(0)).is_blank());
    }

    #[test]
    fn test_actionable_needs_range_and_text() {
        assert!(selection("a", Some(0)).is_actionable());
        assert!(!selection("a", None).is_actionable());
        assert!(!selection("", Some(0)).is_actionable());
        assert!(selection(" ", Some(0)).is_actionable());
    }

    #[test]
    fn test_command_names() {
        assert_eq!(FormatCommand::Justify(ContentAlign::Right).name(), "justifyRight");
        assert_eq!(
            FormatCommand::ForeColor("#fff".into()).value(),
            Some("#fff")
        );
        assert!(FormatCommand::InsertOrderedList.is_list());
        assert!(!FormatCommand::Bold.is_list());
    }
}
