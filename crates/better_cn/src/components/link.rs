//! Link - router-aware anchor
//!
//! Links resolve their href through the router plugin registered on the
//! [`ThemeContext`]. A context without the plugin is an integration mistake
//! and building the link fails with [`ConfigError::MissingPlugin`].
//!
//! # Example
//!
//! ```rust
//! use better_cn::prelude::*;
//! use better_theme::{PluginRegistry, RouterPlugin};
//!
//! let mut plugins = PluginRegistry::new();
//! plugins.register(RouterPlugin::new().with_base_path("/app"));
//! let ctx = ThemeContext::default().with_plugins(plugins);
//!
//! let settings = cn::link(&ctx, "Settings", "/settings")?;
//! assert_eq!(settings.href(), Some("/app/settings"));
//!
//! let bare = ThemeContext::default();
//! assert!(cn::link(&bare, "Settings", "/settings").is_err());
//! # Ok::<(), better_theme::ConfigError>(())
//! ```

use std::sync::Arc;

use better_theme::{ConfigError, LinkTarget, RouterPlugin, ThemeContext};

use crate::field::Handler;

pub struct Link {
    label: String,
    target: LinkTarget,
    new_tab: bool,
    disabled: bool,
    on_click: Option<Handler>,
}

impl Link {
    /// Link to `href`, resolved by the router plugin
    pub fn new(ctx: &ThemeContext, label: impl Into<String>, href: &str) -> Result<Self, ConfigError> {
        let router = ctx.plugins().require::<RouterPlugin>(RouterPlugin::NAME)?;
        Ok(Self::resolved(label.into(), router.link(href)))
    }

    /// Link to `path` with encoded query parameters
    pub fn with_query<'a>(
        ctx: &ThemeContext,
        label: impl Into<String>,
        path: &str,
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        let router = ctx.plugins().require::<RouterPlugin>(RouterPlugin::NAME)?;
        let href = format!("{path}{}", router.query_string(params));
        Ok(Self::resolved(label.into(), router.link(&href)))
    }

    fn resolved(label: String, target: LinkTarget) -> Self {
        Self {
            label,
            new_tab: target.external,
            target,
            disabled: false,
            on_click: None,
        }
    }

    /// Open in a new tab (external links do by default)
    pub fn new_tab(mut self, new_tab: bool) -> Self {
        self.new_tab = new_tab;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolved href; `None` while disabled so the host renders plain text
    pub fn href(&self) -> Option<&str> {
        (!self.disabled).then_some(self.target.href.as_str())
    }

    pub fn is_external(&self) -> bool {
        self.target.external
    }

    pub fn opens_new_tab(&self) -> bool {
        self.new_tab
    }

    /// `rel` attribute for links opening a new tab
    pub fn rel(&self) -> Option<&'static str> {
        self.new_tab.then_some("noopener noreferrer")
    }

    /// Activation by the user. Returns `false` when disabled.
    pub fn click(&self) -> bool {
        if self.disabled {
            return false;
        }
        tracing::debug!(href = %self.target.href, external = self.target.external, "link activated");
        if let Some(on_click) = &self.on_click {
            on_click();
        }
        true
    }
}

impl std::fmt::Debug for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Link")
            .field("label", &self.label)
            .field("target", &self.target)
            .field("new_tab", &self.new_tab)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

pub fn link(ctx: &ThemeContext, label: impl Into<String>, href: &str) -> Result<Link, ConfigError> {
    Link::new(ctx, label, href)
}
