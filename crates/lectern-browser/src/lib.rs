//! Browser DOM layer for the lectern inline toolbar.
//!
//! This crate drives `lectern-core`'s toolbar state machine from live DOM
//! events. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `dom`: `NodeView` over `web_sys::Node`
//! - `host`: `ToolbarHost` over the window and document
//! - `editor`: listener and timer ownership, outgoing toolbar events
//! - `render`: toolbar buttons and collaborator widgets
//! - `slides`: slide parsing with the browser's HTML parser
//! - `platform`: Browser/OS detection for mobile and iOS behavior
//!
//! # Re-exports
//!
//! This crate re-exports `lectern-core` for convenience, so consumers
//! only need to depend on `lectern-browser`.

// Re-export core crate
pub use lectern_core;
pub use lectern_core::*;

pub mod dom;
pub mod editor;
pub mod host;
pub mod platform;
pub mod render;
pub mod slides;

pub use dom::DomNode;
pub use editor::InlineEditor;
pub use host::{BrowserHost, BrowserNotification, HostRequest};

// Platform detection
pub use platform::{Platform, platform};
