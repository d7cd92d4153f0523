//! Hobbes CLI entry point

use anyhow::Result;
use clap::Parser;

use hobbes::cli::{Cli, Commands};
use hobbes::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ArtifactNames { filter } => commands::names::run(&cli.artifacts, &filter),
        Commands::Hash { root, directories } => commands::hash::run_hash(&root, &directories),
        Commands::HashApplication { filter } => {
            commands::hash::run_application(&cli.artifacts, &filter)
        }
        Commands::ShouldBuild { filter } => commands::status::run(&cli.artifacts, cli.local, &filter),
        Commands::DoBuilds { filter, force } => {
            commands::build::run(&cli.artifacts, cli.local, filter, force)
        }
        Commands::DoDeploys { filter } => {
            commands::deploy::run_units(&cli.artifacts, cli.local, filter)
        }
        Commands::DeployAssets { filter } => {
            commands::deploy::run_assets(&cli.artifacts, cli.local, filter)
        }
        Commands::DoCleanup { filter, exclude } => {
            commands::clean::run(&cli.artifacts, filter, exclude)
        }
    }
}
