use std::fmt;

use serde::Deserialize;

use crate::layout::{NAV_EDGE_DEFAULT, NAV_GAP_DEFAULT};
use crate::transform::{
    ZoomLimits, DOUBLE_CLICK_SCALE_DEFAULT, ZOOM_MAX_DEFAULT, ZOOM_MIN_DEFAULT, ZOOM_STEP_DEFAULT,
};
use crate::viewer::ZoomSettings;

pub const DEFAULT_CONTAINERS: &[&str] = &[".moment-images", ".markdown-content"];
pub const DEFAULT_REFERRER_POLICY: &str = "strict-origin-when-cross-origin";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Labels {
    pub prev: String,
    pub next: String,
    pub close: String,
    pub load_failed: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            prev: "Previous".to_string(),
            next: "Next".to_string(),
            close: "Close".to_string(),
            load_failed: "Failed to load image".to_string(),
        }
    }
}

/// Page-level tuning, read from `window.__MIZUKI_LIGHTBOX__` when present.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LightboxConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    pub double_click_scale: f64,
    pub nav_gap: f64,
    pub nav_edge: f64,
    pub containers: Vec<String>,
    pub labels: Labels,
    pub referrer_policy: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN_DEFAULT,
            zoom_max: ZOOM_MAX_DEFAULT,
            zoom_step: ZOOM_STEP_DEFAULT,
            double_click_scale: DOUBLE_CLICK_SCALE_DEFAULT,
            nav_gap: NAV_GAP_DEFAULT,
            nav_edge: NAV_EDGE_DEFAULT,
            containers: DEFAULT_CONTAINERS.iter().map(|s| s.to_string()).collect(),
            labels: Labels::default(),
            referrer_policy: DEFAULT_REFERRER_POLICY.to_string(),
        }
    }
}

impl LightboxConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        let finite = [
            ("zoomMin", self.zoom_min),
            ("zoomMax", self.zoom_max),
            ("zoomStep", self.zoom_step),
            ("doubleClickScale", self.double_click_scale),
            ("navGap", self.nav_gap),
            ("navEdge", self.nav_edge),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        // Identity and every reset sit at scale 1.
        if self.zoom_min != ZOOM_MIN_DEFAULT {
            return Err(ConfigError::ZoomMin { min: self.zoom_min });
        }
        if self.zoom_max < self.zoom_min {
            return Err(ConfigError::ZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        if self.zoom_step <= 1.0 {
            return Err(ConfigError::ZoomStep {
                step: self.zoom_step,
            });
        }
        if self.double_click_scale <= self.zoom_min || self.double_click_scale > self.zoom_max {
            return Err(ConfigError::DoubleClickScale {
                scale: self.double_click_scale,
            });
        }
        Ok(self)
    }

    pub fn zoom_settings(&self) -> ZoomSettings {
        ZoomSettings {
            limits: ZoomLimits {
                min: self.zoom_min,
                max: self.zoom_max,
            },
            step: self.zoom_step,
            double_click_scale: self.double_click_scale,
        }
    }

    /// Comma-joined selector list for `Element::closest`.
    pub fn container_selector(&self) -> Option<String> {
        let selectors: Vec<&str> = self
            .containers
            .iter()
            .map(|selector| selector.trim())
            .filter(|selector| !selector.is_empty())
            .collect();
        if selectors.is_empty() {
            None
        } else {
            Some(selectors.join(", "))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFinite { field: &'static str },
    ZoomMin { min: f64 },
    ZoomRange { min: f64, max: f64 },
    ZoomStep { step: f64 },
    DoubleClickScale { scale: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite { field } => write!(f, "{field} must be a finite number"),
            ConfigError::ZoomMin { min } => {
                write!(f, "zoom minimum {min} is unsupported, it must be {ZOOM_MIN_DEFAULT}")
            }
            ConfigError::ZoomRange { min, max } => {
                write!(f, "zoom range {min}..{max} is empty or not positive")
            }
            ConfigError::ZoomStep { step } => write!(f, "zoom step {step} must be greater than 1"),
            ConfigError::DoubleClickScale { scale } => {
                write!(f, "double-click scale {scale} is outside the zoom range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: LightboxConfig =
            serde_json::from_str(r#"{"zoomMax": 4, "labels": {"close": "关闭"}}"#).expect("parse");
        assert_eq!(config.zoom_max, 4.0);
        assert_eq!(config.zoom_step, ZOOM_STEP_DEFAULT);
        assert_eq!(config.labels.close, "关闭");
        assert_eq!(config.labels.prev, "Previous");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let config = LightboxConfig {
            zoom_max: 0.5,
            ..LightboxConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZoomRange { .. })));

        let config = LightboxConfig {
            zoom_step: 1.0,
            ..LightboxConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZoomStep { .. })));

        let config = LightboxConfig {
            nav_gap: f64::INFINITY,
            ..LightboxConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "navGap" })
        );
    }

    #[test]
    fn zoom_minimum_other_than_one_is_rejected() {
        for min in [0.5, 2.0] {
            let config = LightboxConfig {
                zoom_min: min,
                double_click_scale: 3.0,
                ..LightboxConfig::default()
            };
            assert_eq!(config.validate(), Err(ConfigError::ZoomMin { min }));
        }
        let parsed: LightboxConfig = serde_json::from_str(r#"{"zoomMin": 2}"#).expect("parse");
        assert!(parsed.validate().is_err());
        assert!(LightboxConfig::default().validate().is_ok());
    }

    #[test]
    fn container_selector_skips_blanks() {
        let config = LightboxConfig {
            containers: vec![" .gallery ".into(), "".into(), "article".into()],
            ..LightboxConfig::default()
        };
        assert_eq!(config.container_selector().as_deref(), Some(".gallery, article"));
        let config = LightboxConfig {
            containers: Vec::new(),
            ..LightboxConfig::default()
        };
        assert_eq!(config.container_selector(), None);
    }
}
