use crate::config::Settings;
use crate::error::Result;
use crate::ioutils::list_templates;
use crate::minify::minify;
use crate::renderer::helpers::{CallbackHelper, HelperRegistry};
use crate::renderer::interface::TemplateRenderer;
use handlebars::Handlebars;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

/// Handlebars-based view engine bound to a views directory.
///
/// Options and helpers are fixed at construction; build a new engine to pick up
/// configuration changes. Templates added to the views directory after
/// construction are not seen.
pub struct ViewEngine {
    registry: Handlebars<'static>,
    helper_names: HashSet<String>,
    settings: Settings,
}

impl ViewEngine {
    /// Creates an engine with only the built-in helpers.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_helpers(settings, HelperRegistry::new())
    }

    /// Creates an engine with the built-in helpers plus `user_helpers`.
    ///
    /// A user helper named like a built-in replaces the built-in.
    pub fn with_helpers(settings: Settings, user_helpers: HelperRegistry) -> Result<Self> {
        let mut registry = Handlebars::new();

        if !settings.is_utf8() {
            warn!(
                "Charset '{}' is not supported, templates are read as UTF-8",
                settings.charset
            );
        }

        // Must be set before templates are registered for file reloading to apply.
        match &settings.cache {
            Some(cache_dir) => {
                std::fs::create_dir_all(cache_dir)?;
                debug!("Compiled templates are cached for the engine lifetime ({})", cache_dir.display());
            }
            None => registry.set_dev_mode(true),
        }

        register_views(&mut registry, &settings)?;

        let mut helpers = HelperRegistry::with_builtins(&settings.base_url);
        helpers.extend(user_helpers);
        for (name, helper) in helpers.iter() {
            registry.register_helper(name, Box::new(CallbackHelper::new(name, helper.clone())));
        }

        info!(
            "Handlebars engine ready: views '{}', {} templates, helpers {:?}",
            settings.views.display(),
            registry.get_templates().len(),
            helpers
        );
        let helper_names = helpers.names().map(str::to_string).collect();
        Ok(Self { registry, helper_names, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn has_helper(&self, name: &str) -> bool {
        self.helper_names.contains(name)
    }
}

/// Registers every template below the views root under its relative name.
///
/// Partials (file name starting with the partials prefix) are also registered
/// with the prefix stripped, unless a regular template already uses that name.
fn register_views(registry: &mut Handlebars<'static>, settings: &Settings) -> Result<()> {
    let templates = list_templates(&settings.views, &settings.extension, true)?;
    let names: HashSet<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    let prefix = settings.partials_prefix.as_str();

    for template in &templates {
        registry.register_template_file(&template.name, &template.path)?;
        debug!("Registered template '{}'", template.name);

        let Some(partial) = template.file_name().strip_prefix(prefix) else {
            continue;
        };
        if prefix.is_empty() || partial.is_empty() {
            continue;
        }

        let alias = format!("{}{}", template.parent(), partial);
        if names.contains(alias.as_str()) {
            warn!(
                "Partial '{}' is shadowed by template '{}': '{{{{> {}}}}}' renders the template, \
                 not the partial; use '{{{{> {}}}}}' to include the partial",
                template.name, alias, alias, template.name
            );
            continue;
        }
        registry.register_template_file(&alias, &template.path)?;
        debug!("Registered partial '{}' from '{}'", alias, template.name);
    }

    Ok(())
}

impl TemplateRenderer for ViewEngine {
    fn render_template(&self, name: &str, scope: &Value) -> Result<String> {
        let html = self.registry.render(name, scope)?;
        if self.settings.minify {
            return Ok(minify(&html));
        }
        Ok(html)
    }

    fn default_layout(&self) -> &str {
        self.settings.default_layout()
    }
}
