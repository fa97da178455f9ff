//! lectern-core: Pure Rust inline-toolbar logic without framework dependencies.
//!
//! This crate provides:
//! - `NodeView` trait for abstracting over document trees (in-memory or live DOM)
//! - `MarkupTree` - arena-backed tree with an HTML fragment parser
//! - Slide serialization: style maps, attribute extraction, typed node trees
//! - `ToolbarStateMachine<H>` - selection-driven toolbar, generic over `ToolbarHost`
//! - Selection inspection and toolbar positioning as pure functions

pub mod attributes;
pub mod config;
pub mod error;
pub mod format;
pub mod host;
pub mod inspect;
pub mod markup;
pub mod node;
pub mod position;
pub mod serialize;
pub mod slide;
pub mod style;
pub mod timer;
pub mod toolbar;

pub use attributes::{Attributes, CONTENT_EDITABLE, extract_attributes};
pub use config::{DEFAULT_CONTAINERS, PaletteColor, ToolbarConfig};
pub use error::HostError;
pub use format::{ContainerSet, ContentAlign, FormatState};
pub use host::{
    AnchorLink, CustomAction, FormatCommand, Notification, PointerEvent, PointerKind, Selection,
    ToolbarHost,
};
pub use inspect::{compute_format_state, find_link};
pub use markup::{MarkupNode, MarkupTree, NodeId};
pub use node::{NodeKind, NodeView};
pub use position::{
    PointerPoint, STICKY_SCROLL_PROPERTY, ToolbarPosition, ToolbarSize, Viewport, position_toolbar,
};
pub use serialize::{Serialized, SerializedNode, serialize, serialize_children};
pub use slide::{Slide, SlideAttributes, SlideElement, SlideTemplate, build_slide_element, parse_slide};
pub use smol_str::SmolStr;
pub use style::{StyleMap, parse_style};
pub use timer::{CoalescingTimers, TimerKind, TimerToken};
pub use toolbar::{
    ActionButton, ActionKind, ToolbarCommand, ToolbarEvent, ToolbarMode, ToolbarSnapshot,
    ToolbarState, ToolbarStateMachine,
};
