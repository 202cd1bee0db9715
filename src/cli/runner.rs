use crate::{
    cli::{ConfigArgs, ExportArgs, RenderArgs},
    config::{Config, Settings},
    constants::{keys, STDIN_INDICATOR},
    error::Result,
    export::{collect_templates, MemoryCache},
    ext::PathExt,
    ioutils::read_from,
    renderer::{Layout, TemplateRenderer, ViewEngine},
};
use log::debug;
use serde_json::Value;
use std::io::Write;

/// Loads the config file (if any) and applies command-line overrides.
pub fn load_settings(args: &ConfigArgs) -> Result<Settings> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::new(),
    };

    if let Some(views) = &args.views {
        config.set(keys::VIEWS.0, views.to_str_checked()?);
    }
    if args.minify {
        config.set(keys::MINIFY, true);
    }

    let settings = Settings::from_store(&config);
    debug!("Resolved settings: {settings:?}");
    Ok(settings)
}

/// Parses the `--data` argument, reading stdin for `-`. No data gives an empty scope.
pub fn parse_scope(data: Option<&str>) -> Result<Value> {
    let raw = match data {
        None => return Ok(Value::Object(Default::default())),
        Some(STDIN_INDICATOR) => read_from(std::io::stdin())?,
        Some(json) => json.to_string(),
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Renders one view through the full layout pipeline.
pub fn run_render(args: &RenderArgs, out: &mut dyn Write) -> Result<()> {
    let engine = ViewEngine::new(load_settings(&args.config)?)?;
    let scope = parse_scope(args.data.as_deref())?;
    let layout = if args.no_layout {
        Layout::Disabled
    } else {
        Layout::from(args.layout.clone())
    };

    engine.render(&args.template, &scope, &layout, out)?;
    out.flush()?;
    Ok(())
}

/// Prints every exported template tag on its own line.
pub fn run_export(args: &ExportArgs, out: &mut dyn Write) -> Result<()> {
    let settings = load_settings(&args.config)?;
    let mut cache = MemoryCache::new();

    for tag in collect_templates(&settings, &mut cache)? {
        writeln!(out, "{tag}")?;
    }
    out.flush()?;
    Ok(())
}
