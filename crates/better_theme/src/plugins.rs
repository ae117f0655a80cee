//! Named optional plugins
//!
//! Features that depend on an integration (router-aware links, query-string
//! state) look their plugin up by name. A missing plugin is a configuration
//! mistake by the integrating application and surfaces as
//! [`ConfigError::MissingPlugin`].

use std::any::Any;

use indexmap::IndexMap;

use crate::error::ConfigError;

/// An optional integration registered with the provider
pub trait Plugin: Any + Send + Sync {
    fn name(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
}

/// Plugins in registration order
#[derive(Default)]
pub struct PluginRegistry {
    plugins: IndexMap<String, Box<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin under its own name, replacing any previous one
    pub fn register<P: Plugin>(&mut self, plugin: P) {
        let name = plugin.name().to_string();
        if self.plugins.insert(name.clone(), Box::new(plugin)).is_some() {
            tracing::warn!(%name, "plugin registered twice, keeping the latest");
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Plugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Fetch a plugin that a feature cannot work without
    pub fn require<P: Plugin>(&self, name: &str) -> Result<&P, ConfigError> {
        let plugin = self
            .plugins
            .get(name)
            .ok_or_else(|| ConfigError::MissingPlugin {
                name: name.to_string(),
            })?;
        plugin
            .as_any()
            .downcast_ref::<P>()
            .ok_or_else(|| ConfigError::PluginTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<P>(),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.plugins.keys()).finish()
    }
}

// =============================================================================
// ROUTER PLUGIN
// =============================================================================

/// Resolved target of a link
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    pub href: String,
    /// Leaves the application (full navigation, opens in a new tab by default)
    pub external: bool,
}

/// Router integration: link resolution and query-string helpers
#[derive(Clone, Debug, Default)]
pub struct RouterPlugin {
    base_path: String,
}

impl RouterPlugin {
    pub const NAME: &'static str = "react-router-dom";

    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix for in-app paths, e.g. `/app`
    pub fn with_base_path(mut self, base: impl Into<String>) -> Self {
        self.base_path = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Resolve an href the way a router `Link` would
    pub fn link(&self, href: &str) -> LinkTarget {
        let external = href.contains("://") || href.starts_with("mailto:") || href.starts_with("tel:");
        if external {
            return LinkTarget {
                href: href.to_string(),
                external,
            };
        }
        let href = if href.starts_with('/') {
            format!("{}{}", self.base_path, href)
        } else {
            href.to_string()
        };
        LinkTarget {
            href,
            external: false,
        }
    }

    /// Encode pairs as `?a=1&b=two%20words`; empty input yields an empty string
    pub fn query_string<'a>(&self, params: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
        let encoded: Vec<String> = params
            .into_iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        if encoded.is_empty() {
            String::new()
        } else {
            format!("?{}", encoded.join("&"))
        }
    }

    /// Decode a query string (leading `?` optional). Undecodable pairs are skipped.
    pub fn parse_query(&self, query: &str) -> Vec<(String, String)> {
        let query = query.strip_prefix('?').unwrap_or(query);
        query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                let k = urlencoding::decode(&k.replace('+', " ")).ok()?.into_owned();
                let v = urlencoding::decode(&v.replace('+', " ")).ok()?.into_owned();
                Some((k, v))
            })
            .collect()
    }

    /// Value of one query parameter
    pub fn query_param(&self, query: &str, name: &str) -> Option<String> {
        self.parse_query(query)
            .into_iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

impl Plugin for RouterPlugin {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
