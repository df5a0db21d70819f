mod cli;
mod commands;
mod config;
mod error;
mod model;
mod pipeline;
mod store;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::pipeline::Pipeline;
use crate::store::DocumentStore;

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.pipeline.json;
    let pipeline = Pipeline::new(
        DocumentStore::new(cli.pipeline.state_root.clone()),
        cli.pipeline.config(),
    );

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Input(args) => commands::input::run(&pipeline, args),
        Commands::Efficiency(args) => commands::efficiency::run(&pipeline, args, json),
        Commands::Monitor => commands::monitor::run(&pipeline, json),
        Commands::Recommend => commands::recommend::run(&pipeline, json),
        Commands::Summary => commands::summary::run(&pipeline, json),
        Commands::Run(args) => commands::run::run(&pipeline, args, json),
        Commands::Reset(args) => commands::reset::run(&pipeline, args),
        Commands::Status => commands::status::run(&pipeline),
        Commands::Menu => commands::menu::run(&pipeline),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
