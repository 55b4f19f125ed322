//! Configuration types and defaults for the TOC scrollspy
//!
//! Defaults target the Just the Docs theme: a `.sticky-toc` sidebar inside a
//! layout that may scroll `.main-content-wrap` instead of the window.

use serde::{Deserialize, Serialize};

// =============================================================================
// Panel Scroll Policy
// =============================================================================

/// How the TOC panel follows the active link once it drifts out of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PanelScrollPolicy {
    /// Leave the panel alone while the link sits inside the padded comfort
    /// zone; otherwise scroll so the link is vertically centered.
    #[default]
    Center,
    /// Scroll just enough to bring a clipped link flush with the nearest edge.
    NearestEdge,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Scrollspy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollSpyConfig {
    /// Selector for the TOC panel. Default: `.sticky-toc`
    pub panel_selector: String,
    /// Selector for trackable links inside the panel. Default: `a[href^="#"]`
    pub link_selector: String,
    /// Selector for the optional wrapper that is marked alongside the link. Default: `li`
    pub list_item_selector: String,
    /// Class toggled on the active link and list item. Default: `is-active`
    pub active_class: String,
    /// Activation line, in pixels below the viewport top. Default: 110
    pub activation_offset: f64,
    /// Comfort zone kept between the active link and the panel edges. Default: 40
    pub edge_padding: f64,
    /// Overflow (px) below which the panel counts as non-scrollable. Default: 1
    pub overflow_tolerance: f64,
    /// Panel auto-scroll policy. Default: center
    pub scroll_policy: PanelScrollPolicy,
    /// Layout containers that may scroll instead of the window
    pub scroll_containers: Vec<String>,
    /// Media query for the reduced-motion preference
    pub reduced_motion_query: String,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            panel_selector: ".sticky-toc".to_string(),
            link_selector: "a[href^=\"#\"]".to_string(),
            list_item_selector: "li".to_string(),
            active_class: "is-active".to_string(),
            activation_offset: 110.0,
            edge_padding: 40.0,
            overflow_tolerance: 1.0,
            scroll_policy: PanelScrollPolicy::Center,
            scroll_containers: vec![
                ".main-content-wrap".to_string(),
                ".main".to_string(),
                ".site-wrap".to_string(),
            ],
            reduced_motion_query: "(prefers-reduced-motion: reduce)".to_string(),
        }
    }
}

impl ScrollSpyConfig {
    /// Just the Docs layout (same as default)
    pub fn just_the_docs() -> Self {
        Self::default()
    }

    /// Minimal panel movement: nearest-edge scrolling, no comfort zone
    pub fn nearest_edge() -> Self {
        Self {
            scroll_policy: PanelScrollPolicy::NearestEdge,
            edge_padding: 0.0,
            ..Self::default()
        }
    }

    /// Check that selectors and class names are usable and offsets are sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        let selectors = [
            ("panelSelector", &self.panel_selector),
            ("linkSelector", &self.link_selector),
            ("listItemSelector", &self.list_item_selector),
            ("reducedMotionQuery", &self.reduced_motion_query),
        ];
        for (field, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptySelector(field));
            }
        }
        if let Some(pos) = self.scroll_containers.iter().position(|s| s.trim().is_empty()) {
            return Err(ConfigError::EmptyContainer(pos));
        }

        let class = self.active_class.trim();
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidClass(self.active_class.clone()));
        }

        let lengths = [
            ("edgePadding", self.edge_padding),
            ("overflowTolerance", self.overflow_tolerance),
        ];
        for (field, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }
        // activation line may sit above the viewport, it just has to be a number
        if !self.activation_offset.is_finite() {
            return Err(ConfigError::NonFinite("activationOffset"));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptySelector(&'static str),
    EmptyContainer(usize),
    InvalidClass(String),
    NegativeValue { field: &'static str, value: f64 },
    NonFinite(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EmptySelector(field) => write!(f, "{} must not be empty", field),
            ConfigError::EmptyContainer(idx) => {
                write!(f, "scrollContainers[{}] must not be empty", idx)
            }
            ConfigError::InvalidClass(class) => {
                write!(f, "activeClass must be a single class name, got {:?}", class)
            }
            ConfigError::NegativeValue { field, value } => {
                write!(f, "{} must be a non-negative number, got {}", field, value)
            }
            ConfigError::NonFinite(field) => write!(f, "{} must be a finite number", field),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_theme() {
        let config = ScrollSpyConfig::default();
        assert_eq!(config.panel_selector, ".sticky-toc");
        assert_eq!(config.active_class, "is-active");
        assert_eq!(config.activation_offset, 110.0);
        assert_eq!(config.edge_padding, 40.0);
        assert_eq!(config.scroll_policy, PanelScrollPolicy::Center);
        assert_eq!(config.scroll_containers.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nearest_edge_preset() {
        let config = ScrollSpyConfig::nearest_edge();
        assert_eq!(config.scroll_policy, PanelScrollPolicy::NearestEdge);
        assert_eq!(config.edge_padding, 0.0);
        assert_eq!(config.active_class, "is-active");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ScrollSpyConfig = serde_json::from_str(
            r#"{ "activationOffset": 64, "scrollPolicy": "nearestEdge" }"#,
        )
        .unwrap();

        assert_eq!(config.activation_offset, 64.0);
        assert_eq!(config.scroll_policy, PanelScrollPolicy::NearestEdge);
        assert_eq!(config.panel_selector, ".sticky-toc");
        assert_eq!(config.edge_padding, 40.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ScrollSpyConfig {
            panel_selector: "  ".to_string(),
            ..ScrollSpyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySelector("panelSelector")));

        let config = ScrollSpyConfig {
            active_class: "is active".to_string(),
            ..ScrollSpyConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidClass(_))));

        let config = ScrollSpyConfig {
            edge_padding: -4.0,
            ..ScrollSpyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeValue { field: "edgePadding", .. })
        ));

        let config = ScrollSpyConfig {
            scroll_containers: vec![".main".to_string(), String::new()],
            ..ScrollSpyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyContainer(1)));
    }

    #[test]
    fn test_negative_activation_offset_is_allowed() {
        let config = ScrollSpyConfig {
            activation_offset: -20.0,
            ..ScrollSpyConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = ScrollSpyConfig {
            activation_offset: f64::NAN,
            ..ScrollSpyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("activationOffset")));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NegativeValue { field: "edgePadding", value: -1.0 };
        assert_eq!(err.to_string(), "edgePadding must be a non-negative number, got -1");
    }
}
