use std::process::ExitCode;

use clap::Parser;
use xverify::{exit_code, logging, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.verbose) {
        return exit_code(Err(err));
    }
    let mut stdout = std::io::stdout().lock();
    exit_code(run(&cli.command, &mut stdout))
}
