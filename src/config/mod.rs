//! Configuration handling for the templating layer
//!
//! This module contains the configuration system components:
//! - `loader`: key lookup over a configuration document and config file loading
//! - `settings`: the resolved templating settings with their fallback chains

pub mod loader;
pub mod settings;

pub use loader::{Config, ConfigStore};
pub use settings::Settings;
