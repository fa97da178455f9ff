//! Floating toolbar placement.

use serde::Serialize;

/// Vertical gap between the pointer and the toolbar on desktop.
pub const DESKTOP_OFFSET: f64 = 10.0;
/// Vertical gap on mobile, leaving room for the native selection handles.
pub const MOBILE_OFFSET: f64 = 40.0;
/// Custom property carrying the sampled scroll offset in sticky mode.
pub const STICKY_SCROLL_PROPERTY: &str = "--lectern-inline-editor-sticky-scroll";

/// Client coordinates of the pointer or touch that anchored the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPoint {
    pub x: f64,
    pub y: f64,
}

/// Rendered size of the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToolbarSize {
    pub width: f64,
    pub height: f64,
}

/// Visible viewport size. A zero width means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ToolbarPosition {
    pub top: f64,
    pub left: f64,
}

/// Place the toolbar under the pointer.
///
/// When the viewport width is known, `left` is pulled back so the toolbar's
/// right edge never passes the viewport edge.
pub fn position_toolbar(
    point: PointerPoint,
    size: ToolbarSize,
    viewport: Viewport,
    mobile: bool,
) -> ToolbarPosition {
    let offset = if mobile { MOBILE_OFFSET } else { DESKTOP_OFFSET };
    let mut left = point.x;

    if viewport.width > 0.0 && left + size.width > viewport.width {
        left = viewport.width - size.width;
    }

    ToolbarPosition {
        top: point.y + offset,
        left,
    }
}

/// Value written to `STICKY_SCROLL_PROPERTY` for a scroll offset.
pub fn sticky_scroll_value(scroll_y: f64) -> String {
    format!("{scroll_y}px")
}
