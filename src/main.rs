use clap::Parser;
use linedeck::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
