use crate::constants::verbosity;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Preview Handlebars views and export client-side templates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a view, wrapped in its layout, to stdout.
    Render(RenderArgs),

    /// Print the client-side `<script>` tag of every template.
    Export(ExportArgs),
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file, or a directory holding `dispatch.json`/`dispatch.yaml`/`dispatch.yml`.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Views directory (overrides `templating.views`).
    #[arg(long, value_name = "DIR")]
    pub views: Option<PathBuf>,

    /// Collapse whitespace in the output (overrides `templating.minify`).
    #[arg(long)]
    pub minify: bool,
}

/// Arguments for the render command.
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Template name relative to the views directory, without extension.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Scope as a JSON string or `-` to read from stdin.
    #[arg(short, long)]
    pub data: Option<String>,

    /// Layout to wrap the view in instead of the configured one.
    #[arg(short, long, conflicts_with = "no_layout")]
    pub layout: Option<String>,

    /// Render the view without a layout.
    #[arg(long = "no-layout")]
    pub no_layout: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the export command.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Parse command line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
