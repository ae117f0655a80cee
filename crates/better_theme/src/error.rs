//! Configuration errors

use thiserror::Error;

/// Mistakes in how the integrating application configured the provider
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("plugin `{name}` is required but was not registered")]
    MissingPlugin { name: String },

    #[error("plugin `{name}` is not a `{expected}`")]
    PluginTypeMismatch {
        name: String,
        expected: &'static str,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),
}
