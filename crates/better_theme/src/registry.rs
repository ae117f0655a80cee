//! Named icon and image-asset lookup tables
//!
//! Registries are read-only from the widgets' point of view. A lookup of an
//! unknown name is not an error: it logs a warning and yields an empty,
//! zero-sized entry so rendering continues with a blank slot.

use rustc_hash::FxHashMap;

/// SVG icon content (inner elements of a 24x24 viewBox by default)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IconData {
    pub width: f32,
    pub height: f32,
    /// Inner SVG elements
    pub body: String,
}

impl IconData {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            width: 24.0,
            height: 24.0,
            body: body.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Wrap the body in a stroked `<svg>` tag rendered at `size` px
    pub fn to_svg(&self, size: f32) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {} {}" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{}</svg>"#,
            self.width, self.height, self.body
        )
    }
}

/// An image asset reference
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetData {
    pub src: String,
    pub width: f32,
    pub height: f32,
}

impl AssetData {
    pub fn new(src: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }
}

/// Name-keyed lookup table with a degraded fallback
#[derive(Clone, Debug)]
pub struct Registry<V> {
    kind: &'static str,
    entries: FxHashMap<String, V>,
    fallback: V,
}

pub type IconRegistry = Registry<IconData>;
pub type AssetRegistry = Registry<AssetData>;

impl<V: Default> Registry<V> {
    /// Empty registry; `kind` names the entries in warnings ("icon", "asset")
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            entries: FxHashMap::default(),
            fallback: V::default(),
        }
    }
}

impl<V> Registry<V> {
    /// Add or replace an entry, returning the previous one
    pub fn register(&mut self, name: impl Into<String>, value: V) -> Option<V> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries.get(name)
    }

    /// Look up `name`, degrading to the empty entry with a warning
    pub fn lookup(&self, name: &str) -> &V {
        match self.entries.get(name) {
            Some(value) => value,
            None => {
                tracing::warn!(kind = self.kind, %name, "unknown {} requested, rendering empty", self.kind);
                &self.fallback
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IconRegistry {
    /// Registry preloaded with the icons built-in widgets use
    pub fn with_defaults() -> Self {
        let mut icons = Self::new("icon");
        icons.register("chevronDown", IconData::new(r#"<path d="m6 9 6 6 6-6"/>"#));
        icons.register("chevronUp", IconData::new(r#"<path d="m18 15-6-6-6 6"/>"#));
        icons.register("chevronLeft", IconData::new(r#"<path d="m15 18-6-6 6-6"/>"#));
        icons.register("chevronRight", IconData::new(r#"<path d="m9 18 6-6-6-6"/>"#));
        icons.register("x", IconData::new(r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#));
        icons.register("check", IconData::new(r#"<path d="M20 6 9 17l-5-5"/>"#));
        icons.register(
            "calendar",
            IconData::new(
                r#"<path d="M8 2v4"/><path d="M16 2v4"/><rect width="18" height="18" x="3" y="4" rx="2"/><path d="M3 10h18"/>"#,
            ),
        );
        icons.register(
            "info",
            IconData::new(r#"<circle cx="12" cy="12" r="10"/><path d="M12 16v-4"/><path d="M12 8h.01"/>"#),
        );
        icons.register(
            "warning",
            IconData::new(
                r#"<path d="m21.73 18-8-14a2 2 0 0 0-3.48 0l-8 14A2 2 0 0 0 4 21h16a2 2 0 0 0 1.73-3"/><path d="M12 9v4"/><path d="M12 17h.01"/>"#,
            ),
        );
        icons.register(
            "clock",
            IconData::new(r#"<circle cx="12" cy="12" r="10"/><polyline points="12 6 12 12 16 14"/>"#),
        );
        icons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_icon() {
        let icons = IconRegistry::with_defaults();
        let chevron = icons.lookup("chevronDown");
        assert!(!chevron.is_empty());
        let svg = chevron.to_svg(16.0);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="16""#));
        assert!(svg.contains("m6 9 6 6 6-6"));
    }

    #[test]
    fn test_missing_entry_degrades() {
        let icons = IconRegistry::with_defaults();
        let missing = icons.lookup("doesNotExist");
        assert!(missing.is_empty());
        assert_eq!(missing.width, 0.0);
        assert!(icons.get("doesNotExist").is_none());

        let assets = AssetRegistry::new("asset");
        let asset = assets.lookup("logo");
        assert_eq!(asset, &AssetData::default());
    }

    #[test]
    fn test_register_replaces() {
        let mut assets = AssetRegistry::new("asset");
        assert!(assets.register("logo", AssetData::new("/logo.png", 32.0, 32.0)).is_none());
        let previous = assets.register("logo", AssetData::new("/logo@2x.png", 64.0, 64.0));
        assert_eq!(previous.map(|a| a.src), Some("/logo.png".to_string()));
        assert_eq!(assets.lookup("logo").width, 64.0);
        assert_eq!(assets.names(), vec!["logo"]);
        assert_eq!(assets.len(), 1);
    }
}
