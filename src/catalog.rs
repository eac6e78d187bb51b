//! Node template catalog.
//!
//! A [`TemplateCatalog`] is the static list of node kinds the editor can
//! instantiate, grouped into categories for the sidebar and context menu.
//! The built-in catalog covers the triggers, actions, logic and device nodes
//! of the macro editor; custom catalogs can be loaded from JSON:
//!
//! ```json
//! {
//!   "categories": [
//!     { "id": "input", "title": "Input Nodes", "icon": "fas fa-sign-in-alt", "color": "#81c784" }
//!   ],
//!   "templates": [
//!     {
//!       "name": "Time Trigger",
//!       "category": "input",
//!       "icon": "fas fa-clock",
//!       "inputs": [],
//!       "outputs": [{ "name": "tick", "data_type": "flow" }]
//!     }
//!   ]
//! }
//! ```

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use slint::Color;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// Data carried by a pin. Connections require identical tags on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// Control-flow trigger rather than a value
    Flow,
    String,
    Number,
    Bool,
    Time,
    Key,
    Device,
}

impl DataType {
    pub const ALL: [DataType; 7] = [
        DataType::Flow,
        DataType::String,
        DataType::Number,
        DataType::Bool,
        DataType::Time,
        DataType::Key,
        DataType::Device,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Flow => "flow",
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Bool => "bool",
            DataType::Time => "time",
            DataType::Key => "key",
            DataType::Device => "device",
        }
    }

    /// Stroke colour for pins and connections of this type.
    pub fn color(&self) -> Color {
        match self {
            DataType::Flow => Color::from_rgb_u8(255, 255, 255),
            DataType::String => Color::from_rgb_u8(129, 199, 132),
            DataType::Number => Color::from_rgb_u8(100, 181, 246),
            DataType::Bool => Color::from_rgb_u8(244, 67, 54),
            DataType::Time => Color::from_rgb_u8(255, 152, 0),
            DataType::Key => Color::from_rgb_u8(255, 235, 59),
            DataType::Device => Color::from_rgb_u8(186, 104, 200),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and type of one pin in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSpec {
    pub name: String,
    pub data_type: DataType,
}

impl PinSpec {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Static definition of a node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub name: String,
    pub category: String,
    pub icon: String,
    #[serde(default)]
    pub inputs: Vec<PinSpec>,
    #[serde(default)]
    pub outputs: Vec<PinSpec>,
}

/// Sidebar grouping for templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCategory {
    pub id: String,
    pub title: String,
    pub icon: String,
    /// Accent colour as `#rrggbb`
    pub color: String,
}

impl NodeCategory {
    /// Parse the accent colour. Returns `None` for anything but `#rrggbb`.
    pub fn accent(&self) -> Option<Color> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(hex, 16).ok()?;
        Some(Color::from_rgb_u8(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }
}

/// Immutable collection of categories and templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    #[serde(default)]
    categories: Vec<NodeCategory>,
    #[serde(default)]
    templates: Vec<NodeTemplate>,
}

impl TemplateCatalog {
    /// Build a catalog, checking template names are unique and every
    /// template points at a known category.
    pub fn new(
        categories: Vec<NodeCategory>,
        templates: Vec<NodeTemplate>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self {
            categories,
            templates,
        };
        catalog.check()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: TemplateCatalog = serde_json::from_str(json)?;
        catalog.check()?;
        log::debug!(
            "loaded catalog with {} templates in {} categories",
            catalog.templates.len(),
            catalog.categories.len()
        );
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn check(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for template in &self.templates {
            if !seen.insert(template.name.as_str()) {
                return Err(CatalogError::DuplicateTemplate(template.name.clone()));
            }
            if self.category(&template.category).is_none() {
                return Err(CatalogError::UnknownCategory {
                    template: template.name.clone(),
                    category: template.category.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&NodeTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn category(&self, id: &str) -> Option<&NodeCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[NodeCategory] {
        &self.categories
    }

    pub fn templates(&self) -> &[NodeTemplate] {
        &self.templates
    }

    /// Templates of one category, in catalog order.
    pub fn templates_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a NodeTemplate> + 'a {
        self.templates.iter().filter(move |t| t.category == category)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// The macro editor's stock node set.
    pub fn builtin() -> Self {
        use DataType::*;

        let categories = vec![
            category("input", "Input Nodes", "fas fa-sign-in-alt", "#81c784"),
            category("output", "Output Nodes", "fas fa-sign-out-alt", "#f44336"),
            category("logic", "Logic Nodes", "fas fa-cogs", "#ff9800"),
            category("device_info", "Device Info", "fas fa-info-circle", "#ba68c8"),
            category("device_output", "Device Output", "fas fa-broadcast-tower", "#64b5f6"),
        ];

        let templates = vec![
            // Triggers
            template("Time Trigger", "input", "fas fa-clock", &[], &[("tick", Flow), ("timestamp", Time)]),
            template("Key Trigger", "input", "fas fa-keyboard", &[], &[("key", Key), ("device", Device), ("action", String)]),
            template("Mouse Trigger", "input", "fas fa-mouse", &[], &[("button", String), ("click_type", String), ("position", String)]),
            template("Window Focus", "input", "fas fa-window-maximize", &[], &[("app_name", String), ("window_title", String), ("focused", Bool)]),
            template("Device Connect", "input", "fa-brands fa-usb", &[], &[("device", Device), ("connected", Bool)]),
            template("System Event", "input", "fas fa-desktop", &[], &[("event_type", String), ("timestamp", Time)]),
            // Actions
            template("Pass to OS", "output", "fas fa-share", &[("trigger", Flow)], &[]),
            template("Block Input", "output", "fas fa-ban", &[("trigger", Flow)], &[]),
            template("Send Notification", "output", "fas fa-bell", &[("title", String), ("message", String), ("trigger", Flow)], &[]),
            template("Show Overlay", "output", "fas fa-layer-group", &[("text", String), ("timeout", Number), ("trigger", Flow)], &[]),
            template("Run Script", "output", "fas fa-code", &[("script_path", String), ("trigger", Flow)], &[]),
            template("Open App", "output", "fas fa-external-link-alt", &[("path", String), ("trigger", Flow)], &[]),
            template("Write to File", "output", "fas fa-file-alt", &[("path", String), ("content", String), ("trigger", Flow)], &[]),
            // Logic
            template("Condition", "logic", "fas fa-code-branch", &[("condition", Bool), ("input", Flow)], &[("true", Flow), ("false", Flow)]),
            template("Switch/Case", "logic", "fas fa-random", &[("value", String), ("input", Flow)], &[("case_1", Flow), ("case_2", Flow), ("default", Flow)]),
            template("Wait/Delay", "logic", "fas fa-hourglass-half", &[("time_ms", Number), ("input", Flow)], &[("output", Flow)]),
            template("Loop", "logic", "fas fa-redo", &[("count", Number), ("input", Flow)], &[("iteration", Flow), ("complete", Flow)]),
            template("Compare", "logic", "fas fa-balance-scale", &[("value_a", Number), ("value_b", Number)], &[("result", Bool)]),
            template("Math", "logic", "fas fa-calculator", &[("a", Number), ("b", Number)], &[("result", Number)]),
            template("String Join/Split", "logic", "fas fa-text-width", &[("input_a", String), ("input_b", String), ("separator", String)], &[("result", String)]),
            template("Convert Type", "logic", "fas fa-exchange-alt", &[("input", String)], &[("string", String), ("number", Number), ("bool", Bool)]),
            // Device info
            template("Device Name", "device_info", "fas fa-tag", &[("device", Device)], &[("name", String)]),
            template("Polling Rate", "device_info", "fas fa-tachometer-alt", &[("device", Device)], &[("rate_hz", Number)]),
            template("Vendor/Product ID", "device_info", "fas fa-fingerprint", &[("device", Device)], &[("vendor_id", String), ("product_id", String)]),
            template("Device Type", "device_info", "fas fa-microchip", &[("device", Device)], &[("type", String)]),
            template("Connected State", "device_info", "fas fa-plug", &[("device", Device)], &[("connected", Bool)]),
            // Device output
            template("Set LED Color", "device_output", "fas fa-lightbulb", &[("device", Device), ("key", Key), ("color", String), ("trigger", Flow)], &[]),
            template("Vibrate Device", "device_output", "fas fa-mobile-alt", &[("device", Device), ("intensity", Number), ("duration", Number), ("trigger", Flow)], &[]),
            template("Play Sound", "device_output", "fas fa-volume-up", &[("device", Device), ("frequency", Number), ("duration", Number), ("trigger", Flow)], &[]),
        ];

        Self {
            categories,
            templates,
        }
    }
}

fn category(id: &str, title: &str, icon: &str, color: &str) -> NodeCategory {
    NodeCategory {
        id: id.into(),
        title: title.into(),
        icon: icon.into(),
        color: color.into(),
    }
}

fn template(
    name: &str,
    category: &str,
    icon: &str,
    inputs: &[(&str, DataType)],
    outputs: &[(&str, DataType)],
) -> NodeTemplate {
    NodeTemplate {
        name: name.into(),
        category: category.into(),
        icon: icon.into(),
        inputs: pin_specs(inputs),
        outputs: pin_specs(outputs),
    }
}

fn pin_specs(specs: &[(&str, DataType)]) -> Vec<PinSpec> {
    specs
        .iter()
        .map(|&(name, data_type)| PinSpec::new(name, data_type))
        .collect()
}
