//! Named helper functions exposed to templates.
//!
//! Built-in helpers and user helpers share one [`HelperRegistry`]. Every entry
//! is adapted into a `handlebars` helper by [`CallbackHelper`], so a user
//! callback sees exactly what a built-in sees.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, PathAndJson, RenderContext, RenderError,
    RenderErrorReason, Renderable, ScopedJson, StringOutput,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Characters that start a new word for `capitalize`.
const WORD_DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x0B', '\x0C'];

/// Signature shared by all helpers.
pub type HelperFn = Arc<dyn Fn(&HelperCall<'_>) -> anyhow::Result<String> + Send + Sync>;

/// Everything a helper receives for one invocation.
#[derive(Debug)]
pub struct HelperCall<'a> {
    /// Name the helper was invoked under.
    pub name: &'a str,
    /// Rendered body of a block helper (`{{#name}}...{{/name}}`), `None` for inline calls.
    pub fragment: Option<String>,
    /// Scope the helper was invoked in.
    pub scope: &'a Value,
    /// Resolved positional arguments.
    pub args: Vec<Value>,
    /// Resolved `key=value` arguments.
    pub hash: Map<String, Value>,
    /// Arguments as written in the template, space separated.
    pub source: String,
}

impl HelperCall<'_> {
    /// First positional argument as text.
    ///
    /// Missing and null values give an empty string.
    pub fn arg_string(&self) -> String {
        self.args.first().map(value_to_string).unwrap_or_default()
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Uppercases the first character of every word, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut word_start = true;
    for c in value.chars() {
        if word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        word_start = WORD_DELIMITERS.contains(&c);
    }
    result
}

pub fn upper(value: &str) -> String {
    value.to_uppercase()
}

pub fn lower(value: &str) -> String {
    value.to_lowercase()
}

/// Prefixes `path` with the configured base URL.
pub fn url(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

/// Mapping from helper name to helper function, in registration order.
#[derive(Clone, Default)]
pub struct HelperRegistry {
    helpers: IndexMap<String, HelperFn>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `capitalize`, `upper`, `lower` and `url` helpers.
    pub fn with_builtins(base_url: &str) -> Self {
        let base_url = base_url.to_string();
        let mut registry = Self::new();
        registry
            .register("capitalize", |call| Ok(capitalize(&call.arg_string())))
            .register("upper", |call| Ok(upper(&call.arg_string())))
            .register("lower", |call| Ok(lower(&call.arg_string())))
            .register("url", move |call| Ok(url(&base_url, &call.arg_string())));
        registry
    }

    /// Adds a helper, replacing any helper already registered under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, helper: F) -> &mut Self
    where
        F: Fn(&HelperCall<'_>) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Arc::new(helper));
        self
    }

    /// Adds every helper of `other`. Entries of `other` win on name collisions.
    pub fn extend(&mut self, other: HelperRegistry) {
        self.helpers.extend(other.helpers);
    }

    pub fn get(&self, name: &str) -> Option<&HelperFn> {
        self.helpers.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HelperFn)> {
        self.helpers.iter().map(|(name, helper)| (name.as_str(), helper))
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

impl fmt::Debug for HelperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Adapts a [`HelperFn`] to the `handlebars` helper interface.
///
/// The returned string goes through the engine's escaping like any other value,
/// so `{{{helper}}}` is needed for raw HTML. The escaper encodes `=` and `` ` ``
/// as well as `<>"'&`, so `{{url "/x?a=b"}}` renders `/x?a&#x3D;b`; browsers
/// decode it inside attributes, but the text differs from `htmlspecialchars`.
pub(crate) struct CallbackHelper {
    name: String,
    callback: HelperFn,
}

impl CallbackHelper {
    pub(crate) fn new(name: &str, callback: HelperFn) -> Self {
        Self { name: name.to_string(), callback }
    }
}

fn param_source(param: &PathAndJson<'_>) -> String {
    param
        .relative_path()
        .cloned()
        .unwrap_or_else(|| param.value().to_string())
}

impl HelperDef for CallbackHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let fragment = match h.template() {
            Some(template) => {
                let mut out = StringOutput::new();
                template.render(r, ctx, rc, &mut out)?;
                let rendered = out
                    .into_string()
                    .map_err(|err| RenderErrorReason::Other(err.to_string()))?;
                Some(rendered)
            }
            None => None,
        };

        let call = HelperCall {
            name: &self.name,
            fragment,
            scope: ctx.data(),
            args: h.params().iter().map(|param| param.value().clone()).collect(),
            hash: h
                .hash()
                .iter()
                .map(|(key, param)| (key.to_string(), param.value().clone()))
                .collect(),
            source: h.params().iter().map(param_source).collect::<Vec<_>>().join(" "),
        };

        let rendered = (self.callback)(&call).map_err(|err| {
            RenderErrorReason::Other(format!("Helper '{}' failed: {err:#}", self.name))
        })?;
        Ok(ScopedJson::Derived(Value::String(rendered)))
    }
}
