//! View rendering: the Handlebars engine, its helpers and the layout pipeline.

pub mod engine;
pub mod helpers;
pub mod interface;
pub mod lazy;

pub use engine::ViewEngine;
pub use helpers::{HelperCall, HelperFn, HelperRegistry};
pub use interface::{resolve_layout, with_content, Layout, TemplateRenderer};
pub use lazy::LazyViewEngine;
