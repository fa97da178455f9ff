//! Button models for the selection and alignment panels.

use serde::Serialize;

use super::{ToolbarCommand, ToolbarEvent, ToolbarSnapshot};
use crate::config::ToolbarConfig;
use crate::format::{ContentAlign, FormatState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ActionKind {
    Bold,
    Italic,
    Underline,
    /// Opens the alignment panel.
    Alignment,
    Color,
    OrderedList,
    UnorderedList,
    Link,
    Align(ContentAlign),
    Custom(String),
}

impl ActionKind {
    /// The event a press of this button produces.
    pub fn event<N>(&self) -> ToolbarEvent<N> {
        let command = match self {
            ActionKind::Bold => ToolbarCommand::Bold,
            ActionKind::Italic => ToolbarCommand::Italic,
            ActionKind::Underline => ToolbarCommand::Underline,
            ActionKind::Alignment => ToolbarCommand::OpenAlignment,
            ActionKind::Color => ToolbarCommand::OpenColorPicker,
            ActionKind::OrderedList => ToolbarCommand::OrderedList,
            ActionKind::UnorderedList => ToolbarCommand::UnorderedList,
            ActionKind::Link => ToolbarCommand::ToggleLink,
            ActionKind::Align(align) => ToolbarCommand::Align(*align),
            ActionKind::Custom(action) => return ToolbarEvent::CustomAction(action.clone()),
        };
        ToolbarEvent::Command(command)
    }
}

/// One rendered toolbar button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionButton {
    pub kind: ActionKind,
    pub active: bool,
    pub disabled: bool,
    /// Icon or style class.
    pub css_class: String,
    /// A separator is drawn before this button.
    pub separated: bool,
    /// Swatch color shown on the color button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ActionButton {
    fn new(kind: ActionKind, css_class: impl Into<String>) -> Self {
        Self {
            kind,
            active: false,
            disabled: false,
            css_class: css_class.into(),
            separated: false,
            color: None,
        }
    }

    fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn separated(mut self) -> Self {
        self.separated = true;
        self
    }
}

/// Buttons of the default selection panel, in display order.
pub fn selection_actions(snapshot: &ToolbarSnapshot, config: &ToolbarConfig) -> Vec<ActionButton> {
    let format = &snapshot.format;
    let mut buttons = vec![
        ActionButton::new(ActionKind::Bold, "bold")
            .active(format.bold)
            .disabled(format.title_disabled),
        ActionButton::new(ActionKind::Italic, "italic").active(format.italic),
        ActionButton::new(ActionKind::Underline, "underline").active(format.underline),
        ActionButton::new(ActionKind::Alignment, format.align.css_class())
            .active(format.align != ContentAlign::Justify)
            .separated(),
        ActionButton {
            color: format.color.clone(),
            ..ActionButton::new(ActionKind::Color, "pick-color")
        },
    ];

    if config.list {
        buttons.push(
            ActionButton::new(ActionKind::OrderedList, "ordered-list")
                .active(format.ordered_list)
                .disabled(format.title_disabled),
        );
        buttons.push(
            ActionButton::new(ActionKind::UnorderedList, "unordered-list")
                .active(format.unordered_list)
                .disabled(format.title_disabled),
        );
    }

    buttons.push(
        ActionButton::new(ActionKind::Link, "link")
            .active(snapshot.link)
            .separated(),
    );

    for action in config.custom_action_names() {
        buttons.push(ActionButton::new(ActionKind::Custom(action.clone()), action).separated());
    }

    buttons
}

/// Buttons of the alignment panel.
pub fn alignment_actions(format: &FormatState) -> Vec<ActionButton> {
    [ContentAlign::Left, ContentAlign::Center, ContentAlign::Right]
        .into_iter()
        .map(|align| {
            ActionButton::new(ActionKind::Align(align), align.css_class()).active(format.align == align)
        })
        .collect()
}

/// Class list of the toolbar container.
pub fn tools_class(displayed: bool, mobile: bool, sticky: bool) -> String {
    let mut classes = vec!["lectern-tools"];
    if displayed {
        classes.push("lectern-tools-activated");
    }
    if mobile {
        classes.push("lectern-tools-mobile");
    }
    if sticky {
        classes.push("lectern-tools-sticky");
    }
    classes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolbar::{ToolbarMode, ToolbarState};

    fn snapshot(format: FormatState, link: bool) -> ToolbarSnapshot {
        ToolbarSnapshot {
            state: ToolbarState::Activated(ToolbarMode::Selection),
            format,
            link,
            displayed: true,
            mobile: false,
            sticky: false,
            class_name: tools_class(true, false, false),
        }
    }

    fn kinds(buttons: &[ActionButton]) -> Vec<ActionKind> {
        buttons.iter().map(|b| b.kind.clone()).collect()
    }

    #[test]
    fn test_selection_panel_layout() {
        let config = ToolbarConfig {
            custom_actions: Some("share,quote".into()),
            ..Default::default()
        };
        let buttons = selection_actions(&snapshot(FormatState::default(), false), &config);
        assert_eq!(
            kinds(&buttons),
            vec![
                ActionKind::Bold,
                ActionKind::Italic,
                ActionKind::Underline,
                ActionKind::Alignment,
                ActionKind::Color,
                ActionKind::OrderedList,
                ActionKind::UnorderedList,
                ActionKind::Link,
                ActionKind::Custom("share".into()),
                ActionKind::Custom("quote".into()),
            ]
        );
    }

    #[test]
    fn test_list_buttons_can_be_hidden() {
        let config = ToolbarConfig {
            list: false,
            ..Default::default()
        };
        let buttons = selection_actions(&snapshot(FormatState::default(), false), &config);
        assert!(!kinds(&buttons).contains(&ActionKind::OrderedList));
    }

    #[test]
    fn test_title_disables_bold_and_lists() {
        let format = FormatState {
            title_disabled: true,
            italic: true,
            color: Some("red".into()),
            ..Default::default()
        };
        let buttons = selection_actions(&snapshot(format, true), &ToolbarConfig::default());
        let disabled: Vec<_> = buttons.iter().filter(|b| b.disabled).map(|b| b.kind.clone()).collect();
        assert_eq!(
            disabled,
            vec![ActionKind::Bold, ActionKind::OrderedList, ActionKind::UnorderedList]
        );
        assert!(buttons[1].active);
        assert_eq!(buttons[4].color.as_deref(), Some("red"));
        assert!(buttons.iter().any(|b| b.kind == ActionKind::Link && b.active));
    }

    #[test]
    fn test_alignment_panel_marks_current() {
        let format = FormatState {
            align: ContentAlign::Center,
            ..Default::default()
        };
        let active: Vec<_> = alignment_actions(&format)
            .into_iter()
            .filter(|b| b.active)
            .map(|b| b.css_class)
            .collect();
        assert_eq!(active, vec!["center-align"]);
    }

    #[test]
    fn test_button_events() {
        let event: ToolbarEvent<()> = ActionKind::Custom("share".into()).event();
        assert!(matches!(event, ToolbarEvent::CustomAction(ref a) if a == "share"));
        let event: ToolbarEvent<()> = ActionKind::Align(ContentAlign::Right).event();
        assert!(matches!(
            event,
            ToolbarEvent::Command(ToolbarCommand::Align(ContentAlign::Right))
        ));
    }

    #[test]
    fn test_tools_class() {
        assert_eq!(tools_class(false, false, false), "lectern-tools");
        assert_eq!(
            tools_class(true, true, true),
            "lectern-tools lectern-tools-activated lectern-tools-mobile lectern-tools-sticky"
        );
    }
}
