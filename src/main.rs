use clap::Parser;
use sqe::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.extra_validation() {
        return ExitCode::FAILURE;
    }

    if sqe::run_stdio(&cli) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
