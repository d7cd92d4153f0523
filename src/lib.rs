//! Hobbes - a content-addressed build artifact cache
//!
//! Hobbes fingerprints an application's source directories through git,
//! names each build artifact after that fingerprint, and stores the packed
//! build output in a pluggable repository (local filesystem or S3). Builds
//! whose artifact already exists are skipped; deploys fetch the stored
//! archive and unpack it into the configured location.
//!
//! The crate is organized as:
//! - `config` — the `artifacts.json` model and loader
//! - `fingerprint` — git-based content hashing and artifact naming
//! - `archive` — deterministic tar.gz packing and unpacking
//! - `repository` — artifact storage backends behind a trait
//! - `ops` — build, deploy, and cleanup orchestrators
//! - `cli` / `commands` — the terminal surface

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod ops;
pub mod repository;

pub use config::{Asset, Config, Unit};
pub use error::{HobbesError, HobbesResult};
pub use fingerprint::{artifact_name, ContentHasher, GitContentHasher, ARCHIVE_EXTENSION};
pub use ops::{
    clean_assets, BuildOptions, BuildRunner, BuildStatus, CleanOptions, CleanOutcome,
    DeployOptions, DeployRunner, Deployment, PlannedBuild,
};
pub use repository::{ArtifactRepository, LocalRepository};
