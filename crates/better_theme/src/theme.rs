//! Theme trait and light/dark bundles

use crate::tokens::{AnimationTokens, ColorTokens, RadiusTokens, SpacingTokens, TypographyTokens};

/// Light or dark appearance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// A complete set of design tokens
pub trait Theme: Send + Sync {
    fn name(&self) -> &str;
    fn color_scheme(&self) -> ColorScheme;
    fn colors(&self) -> &ColorTokens;
    fn typography(&self) -> &TypographyTokens;
    fn spacing(&self) -> &SpacingTokens;
    fn radii(&self) -> &RadiusTokens;
    fn animations(&self) -> &AnimationTokens;
}

/// A named pair of light and dark themes
pub struct ThemeBundle {
    pub name: String,
    pub light: Box<dyn Theme>,
    pub dark: Box<dyn Theme>,
}

impl ThemeBundle {
    pub fn new<L, D>(name: impl Into<String>, light: L, dark: D) -> Self
    where
        L: Theme + 'static,
        D: Theme + 'static,
    {
        Self {
            name: name.into(),
            light: Box::new(light),
            dark: Box::new(dark),
        }
    }

    pub fn for_scheme(&self, scheme: ColorScheme) -> &dyn Theme {
        match scheme {
            ColorScheme::Light => self.light.as_ref(),
            ColorScheme::Dark => self.dark.as_ref(),
        }
    }
}

impl std::fmt::Debug for ThemeBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeBundle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
