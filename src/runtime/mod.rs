//! The `tunedex` command line: argument parsing, logging setup and commands.

mod cli;
mod commands;
mod format;
mod logging;
mod settings;

pub use cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init();
    let settings = settings::load_settings();
    commands::dispatch(cli.command, &settings)
}
