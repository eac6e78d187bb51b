//! Editor configuration.
//!
//! Every field has a default matching the stock editor, so a config document
//! only needs the values it changes:
//!
//! ```json
//! { "viewport": { "max_scale": 2.0 }, "placement": { "seed": 7 } }
//! ```

use crate::error::ConfigError;
use crate::geometry::NodeLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zoom limits and wheel step factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Scale multiplier for one wheel step towards the user
    pub zoom_in_factor: f32,
    /// Scale multiplier for one wheel step away from the user
    pub zoom_out_factor: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 3.0,
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
        }
    }
}

/// Where new nodes land.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Canvas position used when `add_node` gets no explicit position
    pub default_x: f32,
    pub default_y: f32,
    /// Upper bound of the random offset added on each axis
    pub jitter: f32,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            default_x: 200.0,
            default_y: 200.0,
            jitter: 100.0,
            seed: None,
        }
    }
}

/// Connection curve shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Minimum horizontal distance of the bezier control points
    pub min_control_offset: f32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            min_control_offset: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub viewport: ViewportConfig,
    pub layout: NodeLayout,
    pub placement: PlacementConfig,
    pub connection: ConnectionConfig,
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.viewport;
        let p = &self.placement;
        let l = &self.layout;
        for (name, value) in [
            ("viewport.min_scale", v.min_scale),
            ("viewport.max_scale", v.max_scale),
            ("viewport.zoom_in_factor", v.zoom_in_factor),
            ("viewport.zoom_out_factor", v.zoom_out_factor),
            ("placement.default_x", p.default_x),
            ("placement.default_y", p.default_y),
            ("placement.jitter", p.jitter),
            ("connection.min_control_offset", self.connection.min_control_offset),
            ("layout.width", l.width),
            ("layout.header_height", l.header_height),
            ("layout.base_height", l.base_height),
            ("layout.pin_top_padding", l.pin_top_padding),
            ("layout.pin_spacing", l.pin_spacing),
            ("layout.pin_radius", l.pin_radius),
            ("layout.pin_hit_slack", l.pin_hit_slack),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} is not finite ({})", name, value)));
            }
        }

        if !(v.min_scale > 0.0 && v.min_scale <= v.max_scale) {
            return Err(ConfigError::Invalid(format!(
                "scale range [{}, {}] is empty or not positive",
                v.min_scale, v.max_scale
            )));
        }
        if v.zoom_in_factor <= 1.0 || v.zoom_out_factor <= 0.0 || v.zoom_out_factor >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom factors must satisfy in > 1 and 0 < out < 1 (got {} / {})",
                v.zoom_in_factor, v.zoom_out_factor
            )));
        }
        if p.jitter < 0.0 {
            return Err(ConfigError::Invalid("placement jitter is negative".into()));
        }
        if self.connection.min_control_offset < 0.0 {
            return Err(ConfigError::Invalid("min control offset is negative".into()));
        }

        for (name, value) in [
            ("width", l.width),
            ("base_height", l.base_height),
            ("pin_spacing", l.pin_spacing),
            ("pin_radius", l.pin_radius),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::Invalid(format!("layout.{} must be positive", name)));
            }
        }
        for (name, value) in [
            ("header_height", l.header_height),
            ("pin_top_padding", l.pin_top_padding),
            ("pin_hit_slack", l.pin_hit_slack),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Invalid(format!("layout.{} is negative", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_editor() {
        let config = EditorConfig::default();
        assert_eq!(config.viewport.min_scale, 0.1);
        assert_eq!(config.viewport.max_scale, 3.0);
        assert_eq!(config.placement.default_x, 200.0);
        assert_eq!(config.placement.jitter, 100.0);
        assert_eq!(config.connection.min_control_offset, 50.0);
        assert_eq!(config.layout.width, 180.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EditorConfig::from_json(r#"{ "viewport": { "max_scale": 2.0 }, "placement": { "seed": 7 } }"#)
                .expect("config should parse");
        assert_eq!(config.viewport.max_scale, 2.0);
        assert_eq!(config.viewport.min_scale, 0.1);
        assert_eq!(config.placement.seed, Some(7));
        assert_eq!(config.placement.jitter, 100.0);
    }

    #[test]
    fn test_empty_json_is_default() {
        let config = EditorConfig::from_json("{}").expect("config should parse");
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_invalid_scale_range() {
        let err = EditorConfig::from_json(r#"{ "viewport": { "min_scale": 4.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_zoom_factor() {
        let err = EditorConfig::from_json(r#"{ "viewport": { "zoom_out_factor": 1.2 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EditorConfig::from_json("{ viewport"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overflowing_jitter_rejected() {
        // 1e39 does not fit in an f32 and parses as infinity
        let err = EditorConfig::from_json(r#"{ "placement": { "jitter": 1e39 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_overflowing_max_scale_rejected() {
        let err = EditorConfig::from_json(r#"{ "viewport": { "max_scale": 1e39 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        for json in [
            r#"{ "layout": { "pin_spacing": 0.0 } }"#,
            r#"{ "layout": { "width": -180.0 } }"#,
            r#"{ "layout": { "pin_hit_slack": -1.0 } }"#,
            r#"{ "layout": { "pin_radius": 1e39 } }"#,
        ] {
            assert!(
                matches!(EditorConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{} should be rejected",
                json
            );
        }
    }
}
