//! # sportcalc
//!
//! Command-line front end of `sportcalc_core`.

use clap::Parser;
use log::error;
use sportcalc_core::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr so JSON on stdout stays clean
    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level())
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(&cli) {
        error!("❌ {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let out = cli::run(cli)?;
    println!("{out}");
    Ok(())
}
