//! Bundles template sources into `<script>` tags for client-side rendering.
//!
//! Each tag is cached under a per-template key so repeated requests skip the
//! file read. Hosts back [`TemplateCache`] with whatever client-side store they
//! use (cookies, a session, ...).

use crate::config::Settings;
use crate::constants::EXPORT_CACHE_PREFIX;
use crate::error::Result;
use crate::ioutils::list_templates;
use crate::minify::minify;
use log::debug;
use std::collections::HashMap;

/// Key/value store for exported template tags.
pub trait TemplateCache {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process [`TemplateCache`].
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TemplateCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Cache key for a template: `handlebar_template_{name}` with every `__` collapsed to `_`.
pub fn cache_key(name: &str) -> String {
    format!("{EXPORT_CACHE_PREFIX}{name}").replace("__", "_")
}

/// Wraps a template source in a `text/x-handlebars-template` script tag.
pub fn script_tag(name: &str, source: &str, partial: bool) -> String {
    let partial_attr = if partial { r#" data-handlebars-type="partial""# } else { "" };
    format!(
        r#"<script type="text/x-handlebars-template" id="{name}" data-handlebars-template="{name}"{partial_attr}>{source}</script>"#
    )
}

/// Returns a script tag for every template directly inside the views root,
/// except the layout.
///
/// Partials are exposed without their prefix and marked with
/// `data-handlebars-type="partial"`. Cached tags are returned as stored.
pub fn collect_templates(settings: &Settings, cache: &mut dyn TemplateCache) -> Result<Vec<String>> {
    let layout = settings.default_layout();
    let prefix = settings.partials_prefix.as_str();
    let mut tags = Vec::new();

    for template in list_templates(&settings.views, &settings.extension, false)? {
        if template.name == layout {
            debug!("Skipping layout '{}' in template export", template.name);
            continue;
        }

        let key = cache_key(&template.name);
        if let Some(tag) = cache.get(&key) {
            debug!("Using cached export of '{}' ({key})", template.name);
            tags.push(tag);
            continue;
        }

        let source = std::fs::read_to_string(&template.path)?;
        let (name, partial) = match template.name.strip_prefix(prefix) {
            Some(_) if !prefix.is_empty() => (template.name.trim_start_matches(prefix), true),
            _ => (template.name.as_str(), false),
        };

        let mut tag = script_tag(name, &source, partial);
        if settings.minify {
            tag = minify(&tag);
        }
        cache.set(&key, &tag);
        tags.push(tag);
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_collapses_double_underscores() {
        assert_eq!(cache_key("index"), "handlebar_template_index");
        assert_eq!(cache_key("_nav"), "handlebar_template_nav");
        assert_eq!(cache_key("a__b"), "handlebar_template_a_b");
        assert_eq!(cache_key("__x"), "handlebar_template__x");
    }

    #[test]
    fn script_tag_markup() {
        assert_eq!(
            script_tag("nav", "<nav/>", true),
            r#"<script type="text/x-handlebars-template" id="nav" data-handlebars-template="nav" data-handlebars-type="partial"><nav/></script>"#
        );
        assert_eq!(
            script_tag("index", "{{title}}", false),
            r#"<script type="text/x-handlebars-template" id="index" data-handlebars-template="index">{{title}}</script>"#
        );
    }

    #[test]
    fn memory_cache_round_trip() {
        let mut cache = MemoryCache::new();
        assert!(cache.is_empty());
        cache.set("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.len(), 1);
    }
}
