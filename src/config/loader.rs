//! Configuration loading and key lookup

use crate::constants::CONFIG_FILENAMES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use log::debug;
use serde_json::{Map, Value};
use std::path::Path;

/// Read-only key lookup used to resolve templating settings.
pub trait ConfigStore {
    /// Returns the value stored under `key`, or `None` when it is absent.
    ///
    /// Null values count as absent.
    fn get(&self, key: &str) -> Option<Value>;
}

/// Configuration document backed by a JSON value.
///
/// Keys are dotted paths: `templating.views` first looks for a literal
/// `"templating.views"` entry at the top level, then walks `templating` → `views`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    root: Value,
}

impl Config {
    pub fn new() -> Self {
        Self { root: Value::Object(Map::new()) }
    }

    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Loads a configuration from a file, or from the first config file found in
    /// a directory (see `CONFIG_FILENAMES`).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Self::from_file(path);
        }

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = path.join(config_file_name);
            if config_file_path.exists() {
                return Self::from_file(&config_file_path);
            }
        }

        Err(Error::ConfigNotFound {
            config_dir: path.to_str_checked()?.to_string(),
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from '{}'", path.display());
        let content = std::fs::read_to_string(path)?;
        let root: Value = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        Ok(Self { root })
    }

    /// Sets `key` (a dotted path) to `value`, creating intermediate objects.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let mut node = &mut self.root;
        for segment in key.split('.') {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node = match node {
                Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                _ => unreachable!("non-object parents are replaced above"),
            };
        }
        *node = value.into();
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }
}

impl ConfigStore for Config {
    fn get(&self, key: &str) -> Option<Value> {
        let flat = self.root.as_object().and_then(|map| map.get(key));
        let nested = || {
            key.split('.')
                .try_fold(&self.root, |node, segment| Value::get(node, segment))
        };

        flat.or_else(nested).filter(|value| !value.is_null()).cloned()
    }
}

impl<S: ConfigStore + ?Sized> ConfigStore for &S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }
}
