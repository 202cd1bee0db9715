//! Resolved templating settings

use crate::config::loader::ConfigStore;
use crate::constants::{
    keys, DEFAULT_CHARSET, DEFAULT_PARTIALS_PREFIX, DEFAULT_TEMPLATE_EXTENSION,
    DEFAULT_VIEWS_DIR,
};
use crate::renderer::resolve_layout;
use serde_json::Value;
use std::path::PathBuf;

/// Templating settings after every fallback chain has been applied.
///
/// Missing configuration is never an error: each field falls back to the
/// framework-wide key and then to a hardcoded default.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Root directory holding templates and partials.
    pub views: PathBuf,
    /// `templating.layout`
    pub layout: Option<String>,
    /// Framework-wide `layout`
    pub generic_layout: Option<String>,
    pub partials_prefix: String,
    pub charset: String,
    /// Compiled-template cache directory. `None` puts the engine in development mode.
    pub cache: Option<PathBuf>,
    pub minify: bool,
    /// Template file extension, without the leading dot.
    pub extension: String,
    /// Prefix applied by the `url` helper.
    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            views: PathBuf::from(DEFAULT_VIEWS_DIR),
            layout: None,
            generic_layout: None,
            partials_prefix: DEFAULT_PARTIALS_PREFIX.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
            cache: None,
            minify: false,
            extension: DEFAULT_TEMPLATE_EXTENSION.to_string(),
            base_url: String::new(),
        }
    }
}

impl Settings {
    /// Resolves every templating setting from `store`.
    pub fn from_store<S: ConfigStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();
        let (views, generic_views) = keys::VIEWS;
        let (layout, generic_layout) = keys::LAYOUT;
        let (url, generic_url) = keys::URL;

        Self {
            views: get_string(store, views)
                .or_else(|| get_string(store, generic_views))
                .map(PathBuf::from)
                .unwrap_or(defaults.views),
            layout: get_string(store, layout),
            generic_layout: get_string(store, generic_layout),
            partials_prefix: get_string(store, keys::PARTIALS_PREFIX)
                .unwrap_or(defaults.partials_prefix),
            charset: get_string(store, keys::CHARSET).unwrap_or(defaults.charset),
            cache: get_string(store, keys::CACHE).map(PathBuf::from),
            minify: get_bool(store, keys::MINIFY).unwrap_or(defaults.minify),
            extension: get_string(store, keys::EXTENSION)
                .map(|ext| ext.trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .unwrap_or(defaults.extension),
            base_url: get_string(store, url)
                .or_else(|| get_string(store, generic_url))
                .unwrap_or(defaults.base_url),
        }
    }

    /// Layout applied when the caller does not name one.
    pub fn default_layout(&self) -> &str {
        resolve_layout(None, self.layout.as_deref(), self.generic_layout.as_deref())
    }

    pub fn is_utf8(&self) -> bool {
        matches!(self.charset.to_ascii_lowercase().as_str(), "utf-8" | "utf8")
    }
}

/// Non-empty string value under `key`. Numbers are accepted by their display form.
fn get_string<S: ConfigStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn get_bool<S: ConfigStore + ?Sized>(store: &S, key: &str) -> Option<bool> {
    match store.get(key)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => Some(matches!(s.as_str(), "true" | "1" | "yes" | "on")),
        _ => None,
    }
}
