//! Orchestrators
//!
//! Build, deploy, and cleanup flows. Each orchestrator takes an explicit
//! options struct per invocation; there is no process-wide mutable state.
//! All work is strictly sequential within one invocation.

pub mod build;
pub mod clean;
pub mod deploy;

pub use build::{BuildOptions, BuildRunner, BuildStatus, PlannedBuild};
pub use clean::{clean_assets, CleanOptions, CleanOutcome};
pub use deploy::{Deployment, DeployOptions, DeployRunner};
