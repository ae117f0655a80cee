//! Configuration overrides loaded from TOML
//!
//! ```toml
//! color_scheme = "dark"
//! transition_ms = 150
//! debounce_ms = 300
//! tooltip_offset = 8.0
//! font_size = 15.0
//! ```
//!
//! Every key is optional; unknown keys are rejected so typos surface early.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::theme::ColorScheme;

/// Default gap between a tooltip and its anchor, in px
pub const DEFAULT_TOOLTIP_OFFSET: f32 = 6.0;

/// Default text-field debounce delay
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    pub color_scheme: Option<ColorScheme>,
    pub transition_ms: Option<u64>,
    pub debounce_ms: Option<u64>,
    pub tooltip_offset: Option<f32>,
    pub font_size: Option<f32>,
}

impl ConfigOverrides {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let overrides: Self = toml::from_str(source)?;
        tracing::debug!(?overrides, "loaded config overrides");
        Ok(overrides)
    }

    /// Layer `other` on top of `self`; set fields in `other` win
    pub fn merge(self, other: Self) -> Self {
        Self {
            color_scheme: other.color_scheme.or(self.color_scheme),
            transition_ms: other.transition_ms.or(self.transition_ms),
            debounce_ms: other.debounce_ms.or(self.debounce_ms),
            tooltip_offset: other.tooltip_offset.or(self.tooltip_offset),
            font_size: other.font_size.or(self.font_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_overrides() {
        let overrides = ConfigOverrides::from_toml_str(
            r#"
            color_scheme = "dark"
            transition_ms = 150
            debounce_ms = 300
            tooltip_offset = 8.0
            font_size = 15.0
            "#,
        )
        .unwrap();
        assert_eq!(overrides.color_scheme, Some(ColorScheme::Dark));
        assert_eq!(overrides.transition_ms, Some(150));
        assert_eq!(overrides.debounce_ms, Some(300));
        assert_eq!(overrides.tooltip_offset, Some(8.0));
        assert_eq!(overrides.font_size, Some(15.0));
    }

    #[test]
    fn test_empty_source_is_default() {
        assert_eq!(ConfigOverrides::from_toml_str("").unwrap(), ConfigOverrides::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = ConfigOverrides::from_toml_str("transiton_ms = 10").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }

    #[test]
    fn test_merge_prefers_later() {
        let base = ConfigOverrides {
            transition_ms: Some(100),
            debounce_ms: Some(250),
            ..Default::default()
        };
        let top = ConfigOverrides {
            transition_ms: Some(50),
            ..Default::default()
        };
        let merged = base.merge(top);
        assert_eq!(merged.transition_ms, Some(50));
        assert_eq!(merged.debounce_ms, Some(250));
    }
}
