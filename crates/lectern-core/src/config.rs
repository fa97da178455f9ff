//! Toolbar configuration.

use serde::{Deserialize, Serialize};

use crate::format::ContainerSet;

/// Structural tags that bound the formatting walk unless configured otherwise.
pub const DEFAULT_CONTAINERS: &str = "h1,h2,h3,h4,h5,h6,div";

/// A named swatch offered by the color widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub hex: String,
    pub name: String,
}

impl PaletteColor {
    fn new(hex: &str, name: &str) -> Self {
        Self {
            hex: hex.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_palette() -> Vec<PaletteColor> {
    vec![
        PaletteColor::new("#8ED1FC", "Light blue"),
        PaletteColor::new("#0693E3", "Blue"),
        PaletteColor::new("#7BDCB5", "Light green"),
        PaletteColor::new("#00D084", "Green"),
        PaletteColor::new("#FCB900", "Yellow"),
        PaletteColor::new("#FF6900", "Orange"),
        PaletteColor::new("#EB144C", "Red"),
        PaletteColor::new("#F78DA7", "Pink"),
        PaletteColor::new("#ABB8C3", "Grey"),
        PaletteColor::new("#000000", "Black"),
        PaletteColor::new("#FFFFFF", "White"),
    ]
}

/// Options recognized by the inline editor.
///
/// Deserializes from the camelCase object handed over by JS; every field is
/// optional there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolbarConfig {
    /// Comma-separated container tag names.
    pub containers: String,
    /// Force mobile behavior. Auto-detected from the platform when unset.
    pub mobile: Option<bool>,
    pub sticky_desktop: bool,
    pub sticky_mobile: bool,
    pub img_editable: bool,
    /// Node name of elements that switch the toolbar into image mode.
    pub img_anchor: String,
    pub img_property_width: String,
    pub img_property_css_float: String,
    /// Show the list buttons.
    pub list: bool,
    /// Comma-separated custom action identifiers.
    pub custom_actions: Option<String>,
    pub palette: Vec<PaletteColor>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            containers: DEFAULT_CONTAINERS.to_string(),
            mobile: None,
            sticky_desktop: false,
            sticky_mobile: false,
            img_editable: false,
            img_anchor: "img".to_string(),
            img_property_width: "width".to_string(),
            img_property_css_float: "float".to_string(),
            list: true,
            custom_actions: None,
            palette: default_palette(),
        }
    }
}

impl ToolbarConfig {
    pub fn containers(&self) -> ContainerSet {
        ContainerSet::parse(&self.containers)
    }

    /// Trimmed, non-empty custom action names in declaration order.
    pub fn custom_action_names(&self) -> Vec<String> {
        self.custom_actions
            .as_deref()
            .map(|actions| {
                actions
                    .split(',')
                    .map(str::trim)
                    .filter(|action| !action.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Resolve the mobile flag against what the platform reports.
    pub fn is_mobile(&self, platform_mobile: bool) -> bool {
        self.mobile.unwrap_or(platform_mobile)
    }

    /// Whether sticky positioning applies on this kind of device.
    pub fn is_sticky(&self, mobile: bool) -> bool {
        (self.sticky_desktop && !mobile) || (self.sticky_mobile && mobile)
    }
}
