use std::process::ExitCode;

use clap::Parser;

mod runtime;

fn main() -> ExitCode {
    let cli = runtime::Cli::parse();
    match runtime::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tunedex: {e:#}");
            ExitCode::FAILURE
        }
    }
}
