//! Handlebars views for the dispatch microframework.
//!
//! Templates live under a views directory as `*.handlebars` files. A view is
//! rendered with a scope and, unless disabled, wrapped in a layout template that
//! receives the view's output as `content`. Files whose name starts with `_` are
//! also available as partials without the prefix.
//!
//! ```no_run
//! use dispatch_handlebars::config::{Config, Settings};
//! use dispatch_handlebars::renderer::{Layout, TemplateRenderer, ViewEngine};
//! use serde_json::json;
//!
//! # fn main() -> dispatch_handlebars::error::Result<()> {
//! let config = Config::load("dispatch.json")?;
//! let engine = ViewEngine::new(Settings::from_store(&config))?;
//! let html = engine.render_to_string("index", &json!({ "title": "Home" }), &Layout::Default)?;
//! # Ok(())
//! # }
//! ```

/// Command-line front end.
pub mod cli;

/// Configuration loading and resolved templating settings.
pub mod config;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Client-side template bundling.
pub mod export;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Whitespace collapse for rendered HTML.
pub mod minify;

/// View engine, helpers and the layout pipeline.
pub mod renderer;
