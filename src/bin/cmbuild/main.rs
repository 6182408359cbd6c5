//! cmbuild CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmbuild::util::Shell;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("cmbuild=debug")
    } else if cli.quiet {
        EnvFilter::new("cmbuild=warn")
    } else {
        EnvFilter::new("cmbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);

    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Flags(args) => commands::flags::execute(args, &shell),
        Commands::Clean(args) => commands::clean::execute(args, &shell),
        Commands::Toolchain(args) => commands::toolchain::execute(args),
        Commands::Artifacts(args) => commands::artifacts::execute(args, &shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
