pub mod args;
pub mod runner;

pub use args::{
    get_log_level_from_verbose, parse_cli, Cli, Commands, ConfigArgs, ExportArgs, RenderArgs,
};
pub use runner::{run_export, run_render};

use crate::error::Result;

/// Dispatches a parsed command line, writing command output to stdout.
pub fn run(cli: &Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Render(args) => run_render(args, &mut out),
        Commands::Export(args) => run_export(args, &mut out),
    }
}
