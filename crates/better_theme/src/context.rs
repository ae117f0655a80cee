//! Theme/config provider
//!
//! [`ThemeContext`] is handed to every widget constructor. It bundles the
//! active theme, caller overrides, icon and asset registries and the plugin
//! registry. There is no process-wide instance; hosts own the context and pass
//! it (usually behind an `Arc`) to whatever needs it.

use crate::color::Color;
use crate::config::{ConfigOverrides, DEFAULT_DEBOUNCE_MS, DEFAULT_TOOLTIP_OFFSET};
use crate::error::ConfigError;
use crate::plugins::PluginRegistry;
use crate::registry::{AssetData, AssetRegistry, IconData, IconRegistry};
use crate::theme::{ColorScheme, Theme, ThemeBundle};
use crate::themes::BetterTheme;
use crate::tokens::{ColorToken, FontFamily, RadiusToken, SpacingToken};

#[derive(Debug)]
pub struct ThemeContext {
    bundle: ThemeBundle,
    scheme: ColorScheme,
    overrides: ConfigOverrides,
    icons: IconRegistry,
    assets: AssetRegistry,
    plugins: PluginRegistry,
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(BetterTheme::bundle())
    }
}

impl ThemeContext {
    /// Context over `bundle` with the default icons and no plugins
    pub fn new(bundle: ThemeBundle) -> Self {
        Self {
            bundle,
            scheme: ColorScheme::default(),
            overrides: ConfigOverrides::default(),
            icons: IconRegistry::with_defaults(),
            assets: AssetRegistry::new("asset"),
            plugins: PluginRegistry::new(),
        }
    }

    /// Default theme with overrides parsed from TOML
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let overrides = ConfigOverrides::from_toml_str(source)?;
        Ok(Self::default().with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(scheme) = overrides.color_scheme {
            self.scheme = scheme;
        }
        self.overrides = self.overrides.merge(overrides);
        self
    }

    pub fn with_icons(mut self, icons: IconRegistry) -> Self {
        self.icons = icons;
        self
    }

    pub fn with_assets(mut self, assets: AssetRegistry) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_plugins(mut self, plugins: PluginRegistry) -> Self {
        self.plugins = plugins;
        self
    }

    // -------------------------------------------------------------------------
    // Scheme
    // -------------------------------------------------------------------------

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if self.scheme != scheme {
            tracing::debug!(?scheme, "color scheme changed");
            self.scheme = scheme;
        }
    }

    pub fn toggle_color_scheme(&mut self) {
        let next = match self.scheme {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        };
        self.set_color_scheme(next);
    }

    /// Token set for the active scheme
    pub fn theme(&self) -> &dyn Theme {
        self.bundle.for_scheme(self.scheme)
    }

    pub fn theme_name(&self) -> &str {
        &self.bundle.name
    }

    // -------------------------------------------------------------------------
    // Tokens
    // -------------------------------------------------------------------------

    pub fn color(&self, token: ColorToken) -> Color {
        self.theme().colors().get(token)
    }

    pub fn spacing(&self, token: SpacingToken) -> f32 {
        self.theme().spacing().get(token)
    }

    pub fn radius(&self, token: RadiusToken) -> f32 {
        self.theme().radii().get(token)
    }

    pub fn font_size(&self) -> f32 {
        self.overrides
            .font_size
            .unwrap_or_else(|| self.theme().typography().font_size)
    }

    pub fn font_family(&self) -> &FontFamily {
        &self.theme().typography().font_sans
    }

    /// Transition duration; popovers use it as their exit delay
    pub fn transition_ms(&self) -> u64 {
        self.overrides
            .transition_ms
            .unwrap_or_else(|| self.theme().animations().transition_ms)
    }

    pub fn tooltip_delay_ms(&self) -> u64 {
        self.theme().animations().tooltip_delay_ms
    }

    pub fn debounce_ms(&self) -> u64 {
        self.overrides.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    pub fn tooltip_offset(&self) -> f32 {
        self.overrides.tooltip_offset.unwrap_or(DEFAULT_TOOLTIP_OFFSET)
    }

    // -------------------------------------------------------------------------
    // Registries
    // -------------------------------------------------------------------------

    /// Icon by name; unknown names warn and return an empty icon
    pub fn icon(&self, name: &str) -> &IconData {
        self.icons.lookup(name)
    }

    /// Asset by name; unknown names warn and return an empty asset
    pub fn asset(&self, name: &str) -> &AssetData {
        self.assets.lookup(name)
    }

    pub fn icons_mut(&mut self) -> &mut IconRegistry {
        &mut self.icons
    }

    pub fn assets_mut(&mut self) -> &mut AssetRegistry {
        &mut self.assets
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }
}
