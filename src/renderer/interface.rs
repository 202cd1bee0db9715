use crate::constants::{CONTENT_KEY, DEFAULT_LAYOUT};
use crate::error::Result;
use log::debug;
use serde_json::{Map, Value};
use std::io::Write;

/// Which layout, if any, wraps a rendered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Layout {
    /// Use the configured layout (`templating.layout`, then `layout`, then `"layout"`).
    #[default]
    Default,
    /// Write the inner render as is.
    Disabled,
    /// Wrap the view in the named layout template.
    Named(String),
}

impl From<bool> for Layout {
    /// `false` disables the layout, `true` keeps the configured one.
    fn from(enabled: bool) -> Self {
        if enabled {
            Layout::Default
        } else {
            Layout::Disabled
        }
    }
}

impl From<&str> for Layout {
    fn from(name: &str) -> Self {
        Layout::Named(name.to_string())
    }
}

impl From<String> for Layout {
    fn from(name: String) -> Self {
        Layout::Named(name)
    }
}

impl<T: Into<Layout>> From<Option<T>> for Layout {
    fn from(layout: Option<T>) -> Self {
        layout.map(Into::into).unwrap_or_default()
    }
}

/// Picks the layout name from the first source that is present.
///
/// Priority: the explicit argument, the templating-specific setting, the
/// framework-wide setting, and finally `"layout"`.
pub fn resolve_layout<'a>(
    explicit: Option<&'a str>,
    templating: Option<&'a str>,
    generic: Option<&'a str>,
) -> &'a str {
    explicit.or(templating).or(generic).unwrap_or(DEFAULT_LAYOUT)
}

/// Copies `scope` and sets `content` to the inner render, replacing any existing value.
///
/// A scope that is not an object cannot carry other keys, so the layout only sees `content`.
pub fn with_content(scope: &Value, content: String) -> Value {
    let mut layout_scope = match scope {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => {
            debug!("Dropping non-object scope {other} for layout render");
            Map::new()
        }
    };
    layout_scope.insert(CONTENT_KEY.to_string(), Value::String(content));
    Value::Object(layout_scope)
}

/// Trait for view rendering engines.
pub trait TemplateRenderer {
    /// Renders the template registered under `name` with the given scope.
    ///
    /// # Arguments
    /// * `name` - Template identifier relative to the views root, without extension
    /// * `scope` - Variables visible to the template
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template
    fn render_template(&self, name: &str, scope: &Value) -> Result<String>;

    /// Layout used for `Layout::Default`.
    fn default_layout(&self) -> &str;

    /// Renders a view and wraps it in its layout.
    ///
    /// The layout is rendered with `scope` plus `content` set to the inner output.
    /// Any error from either render is returned before anything is produced.
    fn render_to_string(&self, name: &str, scope: &Value, layout: &Layout) -> Result<String> {
        let content = self.render_template(name, scope)?;

        let layout_name = match layout {
            Layout::Disabled => return Ok(content),
            Layout::Named(layout_name) if !layout_name.is_empty() => layout_name.as_str(),
            Layout::Named(_) | Layout::Default => self.default_layout(),
        };

        debug!("Wrapping '{name}' in layout '{layout_name}'");
        self.render_template(layout_name, &with_content(scope, content))
    }

    /// Renders a view with its layout and writes the result to `out`.
    fn render(
        &self,
        name: &str,
        scope: &Value,
        layout: &Layout,
        out: &mut dyn Write,
    ) -> Result<()> {
        let html = self.render_to_string(name, scope, layout)?;
        out.write_all(html.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::cell::RefCell;

    /// Renders `name:` followed by the scope, and records every call.
    struct RecordingRenderer {
        default_layout: String,
        calls: RefCell<Vec<(String, Value)>>,
    }

    impl RecordingRenderer {
        fn new(default_layout: &str) -> Self {
            Self { default_layout: default_layout.to_string(), calls: RefCell::new(Vec::new()) }
        }
    }

    impl TemplateRenderer for RecordingRenderer {
        fn render_template(&self, name: &str, scope: &Value) -> Result<String> {
            self.calls.borrow_mut().push((name.to_string(), scope.clone()));
            if name == "missing" {
                return Err(Error::Other(anyhow::anyhow!("template '{name}' not found")));
            }
            Ok(format!("{name}:{scope}"))
        }

        fn default_layout(&self) -> &str {
            &self.default_layout
        }
    }

    #[test]
    fn disabled_layout_writes_inner_render_unchanged() {
        let renderer = RecordingRenderer::new("layout");
        let scope = json!({ "title": "Home" });

        let mut out = Vec::new();
        renderer.render("index", &scope, &Layout::Disabled, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), r#"index:{"title":"Home"}"#);
        assert_eq!(renderer.calls.borrow().len(), 1);
    }

    #[test]
    fn named_layout_receives_scope_and_content() {
        let renderer = RecordingRenderer::new("layout");
        let scope = json!({ "title": "Home", "content": "stale" });

        let html = renderer.render_to_string("index", &scope, &"L".into()).unwrap();

        let calls = renderer.calls.borrow();
        let (layout_name, layout_scope) = &calls[1];
        assert_eq!(layout_name, "L");
        assert_eq!(layout_scope["title"], json!("Home"));
        assert_eq!(layout_scope["content"], json!(r#"index:{"content":"stale","title":"Home"}"#));
        assert_eq!(html, format!("L:{layout_scope}"));
    }

    #[test]
    fn default_layout_comes_from_renderer() {
        let renderer = RecordingRenderer::new("site");
        renderer.render_to_string("index", &json!({}), &Layout::Default).unwrap();
        renderer.render_to_string("index", &json!({}), &Layout::Named(String::new())).unwrap();

        let calls = renderer.calls.borrow();
        assert_eq!(calls[1].0, "site");
        assert_eq!(calls[3].0, "site");
    }

    #[test]
    fn inner_failure_skips_layout_and_output() {
        let renderer = RecordingRenderer::new("layout");
        let mut out = Vec::new();

        let result = renderer.render("missing", &json!({}), &Layout::Default, &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
        assert_eq!(renderer.calls.borrow().len(), 1);
    }

    #[test]
    fn layout_failure_writes_nothing() {
        let renderer = RecordingRenderer::new("missing");
        let mut out = Vec::new();

        let result = renderer.render("index", &json!({}), &Layout::Default, &mut out);

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn resolve_layout_prefers_first_present_source() {
        let sources = [Some("explicit"), Some("templating"), Some("generic")];

        for mask in 0..8u8 {
            let pick = |bit: usize| sources[bit].filter(|_| mask & (1 << bit) != 0);
            let expected = (0..3).find_map(pick).unwrap_or("layout");

            assert_eq!(resolve_layout(pick(0), pick(1), pick(2)), expected, "mask {mask:03b}");
        }
    }

    #[test]
    fn with_content_overwrites_existing_key() {
        let scope = json!({ "content": "old", "user": { "name": "Ada" } });
        let layout_scope = with_content(&scope, "new".to_string());

        assert_eq!(layout_scope, json!({ "content": "new", "user": { "name": "Ada" } }));
        assert_eq!(scope["content"], json!("old"));
    }

    #[test]
    fn with_content_on_non_object_scope() {
        assert_eq!(with_content(&Value::Null, "x".into()), json!({ "content": "x" }));
        assert_eq!(with_content(&json!([1, 2]), "x".into()), json!({ "content": "x" }));
    }

    #[test]
    fn layout_conversions() {
        assert_eq!(Layout::from(false), Layout::Disabled);
        assert_eq!(Layout::from(true), Layout::Default);
        assert_eq!(Layout::from("site"), Layout::Named("site".into()));
        assert_eq!(Layout::from(None::<&str>), Layout::Default);
        assert_eq!(Layout::from(Some(false)), Layout::Disabled);
    }
}
