//! Selection inspection: formatting state of the anchor's ancestor chain.
//!
//! Both functions are pure over a `NodeView` and return fresh values.

use crate::format::{self, ContainerSet, FormatState};
use crate::node::NodeView;

/// Compute the formatting state for a selection anchor.
///
/// Walks upward from the anchor (or its parent, for a text anchor). Bold,
/// italic, underline and list membership are true if any node on the walk
/// has them; alignment and color are taken from the nearest node that sets
/// them. The first container ends the walk and is only consulted for the
/// title flag and, if none was found below it, the color. `HTML`, `BODY` and
/// the document root end the walk without being inspected.
pub fn compute_format_state<N: NodeView>(containers: &ContainerSet, anchor: Option<&N>) -> FormatState {
    let mut state = FormatState::default();

    let Some(anchor) = anchor else {
        return state;
    };

    let mut current = if anchor.is_text() {
        anchor.parent()
    } else {
        Some(anchor.clone())
    };
    let mut align = None;

    while let Some(node) = current {
        if format::is_document_root(&node) {
            break;
        }

        if containers.matches(&node) {
            state.title_disabled = format::is_title(&node);
            if state.color.is_none() {
                state.color = format::color(&node);
            }
            break;
        }

        state.bold |= format::is_bold(&node);
        state.italic |= format::is_italic(&node);
        state.underline |= format::is_underline(&node);
        state.ordered_list |= node.has_tag("ol");
        state.unordered_list |= node.has_tag("ul");

        if align.is_none() {
            align = format::alignment(&node);
        }
        if state.color.is_none() {
            state.color = format::color(&node);
        }

        current = node.parent();
    }

    state.align = align.unwrap_or_default();

    tracing::trace!(target: "lectern::inspect", ?state, "computed format state");
    state
}

/// The `<a>` element the anchor sits in, if any.
///
/// Only the anchor itself (or its parent, for a text anchor) is checked.
pub fn find_link<N: NodeView>(anchor: &N) -> Option<N> {
    let candidate = if anchor.is_text() {
        anchor.parent()?
    } else {
        anchor.clone()
    };
    candidate.has_tag("a").then_some(candidate)
}
