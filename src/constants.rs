//! Constants used throughout dispatch-handlebars

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["dispatch.json", "dispatch.yaml", "dispatch.yml"];

/// Views directory used when neither `templating.views` nor `views` is configured
pub const DEFAULT_VIEWS_DIR: &str = "views";

/// Layout template name used when no layout is configured
pub const DEFAULT_LAYOUT: &str = "layout";

/// File name prefix marking a template as a partial
pub const DEFAULT_PARTIALS_PREFIX: &str = "_";

/// Template file extension, without the leading dot
pub const DEFAULT_TEMPLATE_EXTENSION: &str = "handlebars";

/// Charset templates are read in; any other configured value only logs a warning
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Scope key the inner render is injected under when a layout is applied
pub const CONTENT_KEY: &str = "content";

/// Prefix of the cache key an exported template is stored under
pub const EXPORT_CACHE_PREFIX: &str = "handlebar_template_";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Configuration keys, each listed with the generic key it falls back to
pub mod keys {
    pub const VIEWS: (&str, &str) = ("templating.views", "views");
    pub const LAYOUT: (&str, &str) = ("templating.layout", "layout");
    pub const URL: (&str, &str) = ("templating.url", "url");
    pub const PARTIALS_PREFIX: &str = "templating.partials_prefix";
    pub const CHARSET: &str = "templating.charset";
    pub const CACHE: &str = "templating.cache";
    pub const MINIFY: &str = "templating.minify";
    pub const EXTENSION: &str = "templating.extension";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
