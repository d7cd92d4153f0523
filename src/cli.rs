//! Command line interface definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build artifact cache and deployment tool
#[derive(Parser)]
#[command(name = "hobbes")]
#[command(version, about = "Caches build artifacts by content fingerprint and deploys them")]
pub struct Cli {
    /// Path to the artifacts configuration file
    #[arg(
        short = 'a',
        long = "artifacts",
        global = true,
        default_value = "./artifacts.json",
        value_name = "FILE"
    )]
    pub artifacts: PathBuf,

    /// Use the local repository backend regardless of configuration
    #[arg(long, global = true)]
    pub local: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the artifact names of the configured applications
    ArtifactNames {
        /// Only include the named applications (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,
    },

    /// Print the content fingerprint of directories under a project root
    Hash {
        /// Project root containing the git work tree
        root: PathBuf,

        /// Directories to fingerprint, relative to the root
        #[arg(required = true)]
        directories: Vec<String>,
    },

    /// Print the content fingerprint of every configured application
    HashApplication {
        /// Only include the named applications (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,
    },

    /// Show which applications are missing their artifact and need a build
    ShouldBuild {
        /// Only include the named applications (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,
    },

    /// Build the applications whose artifacts are absent from the repository
    DoBuilds {
        /// Only include the named applications (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,

        /// Rebuild even when the artifact already exists
        #[arg(long)]
        force: bool,
    },

    /// Fetch and unpack application artifacts into their deploy locations
    DoDeploys {
        /// Only include the named applications (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,
    },

    /// Fetch and unpack pre-built assets into their deploy locations
    DeployAssets {
        /// Only include the named assets (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,
    },

    /// Clear the deploy locations of configured assets
    DoCleanup {
        /// Only include the named assets (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        filter: Vec<String>,

        /// Leave the named assets untouched (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
}
