//! better theming
//!
//! Design tokens, light/dark themes and the [`ThemeContext`] provider that
//! widgets receive explicitly.
//!
//! # Example
//!
//! ```rust
//! use better_theme::{ColorToken, SpacingToken, ThemeContext};
//!
//! let ctx = ThemeContext::from_toml_str("transition_ms = 150").unwrap();
//! assert_eq!(ctx.transition_ms(), 150);
//! let _primary = ctx.color(ColorToken::Primary);
//! assert_eq!(ctx.spacing(SpacingToken::Space2), 8.0);
//! ```

pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod plugins;
pub mod registry;
pub mod theme;
pub mod themes;
pub mod tokens;

pub use color::Color;
pub use config::ConfigOverrides;
pub use context::ThemeContext;
pub use error::ConfigError;
pub use plugins::{LinkTarget, Plugin, PluginRegistry, RouterPlugin};
pub use registry::{AssetData, AssetRegistry, IconData, IconRegistry, Registry};
pub use theme::{ColorScheme, Theme, ThemeBundle};
pub use themes::BetterTheme;
pub use tokens::{
    AnimationTokens, ColorToken, ColorTokens, FontFamily, RadiusToken, RadiusTokens,
    SpacingToken, SpacingTokens, TypographyTokens,
};
