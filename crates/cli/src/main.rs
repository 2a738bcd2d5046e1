//! `oas2tf` binary.

use clap::Parser;

use oas2tf_cli::Cli;

fn main() {
    let cli = Cli::parse();
    oas2tf_cli::logging::init(cli.verbose);
    std::process::exit(oas2tf_cli::run(cli));
}
