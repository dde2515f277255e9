//! CloneX - Duplicate File Finder
//!
//! Entry point for the CloneX CLI application.

use clap::Parser;
use clonex::{cli::Cli, duplicates::FinderError, error::ExitCode, logging::init_logging};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match clonex::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);
            eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            if let Some(finder_err) = err.downcast_ref::<FinderError>() {
                eprintln!("   {}", finder_err.hint());
            }
            std::process::exit(exit_code.as_i32());
        }
    }
}
