//! d20roll - Command-line tool for rendering dice roll GIFs

use std::process::ExitCode;

use d20roll::cli;

fn main() -> ExitCode {
    cli::run()
}
