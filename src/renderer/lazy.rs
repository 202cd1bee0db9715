use crate::config::{ConfigStore, Settings};
use crate::error::Result;
use crate::renderer::engine::ViewEngine;
use crate::renderer::helpers::HelperRegistry;
use crate::renderer::interface::{Layout, TemplateRenderer};
use log::info;
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::io::Write;

type EngineFactory = Box<dyn Fn() -> Result<ViewEngine> + Send + Sync>;

/// A [`ViewEngine`] built on first use.
///
/// Construction runs at most once even when the first renders race on several
/// threads. If construction fails the error is returned and the next call tries
/// again. Configuration is read when the engine is built; later changes to the
/// store have no effect.
///
/// ```no_run
/// use dispatch_handlebars::config::Config;
/// use dispatch_handlebars::renderer::{HelperRegistry, LazyViewEngine};
/// use once_cell::sync::Lazy;
///
/// static VIEWS: Lazy<LazyViewEngine> = Lazy::new(|| {
///     let config = Config::load("dispatch.json").unwrap_or_default();
///     LazyViewEngine::from_config(config, HelperRegistry::new())
/// });
/// ```
pub struct LazyViewEngine {
    engine: OnceCell<ViewEngine>,
    factory: EngineFactory,
}

impl LazyViewEngine {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<ViewEngine> + Send + Sync + 'static,
    {
        Self { engine: OnceCell::new(), factory: Box::new(factory) }
    }

    /// Builds the engine from `store` and `helpers` on first use.
    pub fn from_config<S>(store: S, helpers: HelperRegistry) -> Self
    where
        S: ConfigStore + Send + Sync + 'static,
    {
        Self::new(move || ViewEngine::with_helpers(Settings::from_store(&store), helpers.clone()))
    }

    /// Returns the engine, building it if this is the first call.
    pub fn engine(&self) -> Result<&ViewEngine> {
        self.engine.get_or_try_init(|| {
            info!("Building Handlebars engine");
            (self.factory)()
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }

    pub fn render_template(&self, name: &str, scope: &Value) -> Result<String> {
        self.engine()?.render_template(name, scope)
    }

    pub fn render_to_string(&self, name: &str, scope: &Value, layout: &Layout) -> Result<String> {
        self.engine()?.render_to_string(name, scope, layout)
    }

    pub fn render(
        &self,
        name: &str,
        scope: &Value,
        layout: &Layout,
        out: &mut dyn Write,
    ) -> Result<()> {
        self.engine()?.render(name, scope, layout, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn builds_engine_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.handlebars"), "{{upper name}}").unwrap();

        let builds = Arc::new(AtomicUsize::new(0));
        let views = dir.path().to_path_buf();
        let counter = Arc::clone(&builds);
        let lazy = LazyViewEngine::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ViewEngine::new(Settings { views: views.clone(), ..Settings::default() })
        });

        assert!(!lazy.is_initialized());
        let first = lazy.render_template("page", &json!({ "name": "a" })).unwrap();
        let second = lazy.render_template("page", &json!({ "name": "b" })).unwrap();

        assert_eq!((first.as_str(), second.as_str()), ("A", "B"));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(std::ptr::eq(lazy.engine().unwrap(), lazy.engine().unwrap()));
    }

    #[test]
    fn concurrent_first_use_builds_once() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.handlebars"), "ok").unwrap();

        let builds = Arc::new(AtomicUsize::new(0));
        let views = dir.path().to_path_buf();
        let counter = Arc::clone(&builds);
        let lazy = LazyViewEngine::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            ViewEngine::new(Settings { views: views.clone(), ..Settings::default() })
        });

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(lazy.render_template("page", &json!({})).unwrap(), "ok");
                });
            }
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_construction_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("views");
        let config = Config::from_value(json!({ "views": views.to_str().unwrap() }));
        let lazy = LazyViewEngine::from_config(config, HelperRegistry::new());

        assert!(lazy.render_template("page", &json!({})).is_err());
        assert!(!lazy.is_initialized());

        std::fs::create_dir(&views).unwrap();
        std::fs::write(views.join("page.handlebars"), "built").unwrap();
        assert_eq!(lazy.render_template("page", &json!({})).unwrap(), "built");
    }

    struct SharedConfig(Arc<Mutex<Config>>);

    impl ConfigStore for SharedConfig {
        fn get(&self, key: &str) -> Option<Value> {
            self.0.lock().unwrap().get(key)
        }
    }

    #[test]
    fn config_changes_after_first_render_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.handlebars"), "{{url path}}").unwrap();

        let config = Arc::new(Mutex::new(Config::from_value(json!({
            "views": dir.path().to_str().unwrap(),
            "url": "https://first.example",
        }))));
        let lazy = LazyViewEngine::from_config(SharedConfig(Arc::clone(&config)), HelperRegistry::new());
        let scope = json!({ "path": "/x" });

        assert_eq!(lazy.render_template("page", &scope).unwrap(), "https://first.example/x");

        config.lock().unwrap().set("url", "https://second.example");
        assert_eq!(lazy.render_template("page", &scope).unwrap(), "https://first.example/x");
    }
}
