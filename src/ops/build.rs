//! Build orchestrator
//!
//! Two-phase flow per invocation:
//! 1. `plan` — for each selected unit, compute the artifact identifier and
//!    query the repository; units whose artifact already exists are marked
//!    `ExistsSkipped` unless a rebuild is forced.
//! 2. `execute` — run the unit's build command with cwd = project root, pack
//!    the output directory into a temporary archive, and store it under the
//!    computed identifier. The temporary archive is removed on every exit
//!    path.
//!
//! At most one build command runs at a time, strictly in selection order.
//! A failed build or store is recorded on the unit and the batch continues;
//! planning errors (fingerprint, naming, backend) abort the invocation.

use std::process::{Command, Stdio};

use crate::archive;
use crate::config::{Config, Unit};
use crate::error::{HobbesError, HobbesResult};
use crate::fingerprint::{artifact_name, ContentHasher};
use crate::repository::ArtifactRepository;

/// Options for one build invocation
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Unit name filter (empty = all units), matched case-insensitively
    pub filter: Vec<String>,
    /// Build even when the artifact already exists in the repository
    pub force: bool,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Vec<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Lifecycle of one unit within a build invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    NotChecked,
    /// Artifact already in the repository and no force override — terminal
    ExistsSkipped,
    BuildPending,
    BuildRunning,
    BuildSucceeded,
    BuildFailed,
    /// Artifact packed and committed to the repository — terminal
    Stored,
    StoreFailed,
}

impl BuildStatus {
    /// True for states that count as a failed unit at batch exit
    pub fn is_failure(&self) -> bool {
        matches!(self, BuildStatus::BuildFailed | BuildStatus::StoreFailed)
    }
}

/// One unit's slot in the build plan, updated in place during execution
#[derive(Debug, Clone)]
pub struct PlannedBuild {
    pub unit_name: String,
    pub artifact_name: String,
    pub status: BuildStatus,
    /// Failure detail when status is `BuildFailed` or `StoreFailed`
    pub error: Option<String>,
}

impl PlannedBuild {
    pub fn needs_build(&self) -> bool {
        self.status == BuildStatus::BuildPending
    }
}

/// Build orchestrator over a configuration, content hasher, and repository
pub struct BuildRunner<'a> {
    config: &'a Config,
    hasher: &'a dyn ContentHasher,
    repository: &'a dyn ArtifactRepository,
}

impl<'a> BuildRunner<'a> {
    pub fn new(
        config: &'a Config,
        hasher: &'a dyn ContentHasher,
        repository: &'a dyn ArtifactRepository,
    ) -> Self {
        Self {
            config,
            hasher,
            repository,
        }
    }

    /// Decide, for every selected unit, whether a build is needed.
    ///
    /// Fingerprinting, naming, and backend errors here are fatal for the
    /// invocation; nothing has been built yet.
    pub fn plan(&self, options: &BuildOptions) -> HobbesResult<Vec<PlannedBuild>> {
        let mut plan = Vec::new();
        for unit in self.config.units_matching(&options.filter) {
            let artifact = artifact_name(self.config, self.hasher, &unit.name)?;
            let exists = self.repository.exists(&artifact)?;
            let status = if exists && !options.force {
                BuildStatus::ExistsSkipped
            } else {
                BuildStatus::BuildPending
            };
            plan.push(PlannedBuild {
                unit_name: unit.name.clone(),
                artifact_name: artifact,
                status,
                error: None,
            });
        }
        Ok(plan)
    }

    /// Build, pack, and store one pending unit, recording the outcome on the
    /// plan entry. Failures are recorded, not returned — the batch continues.
    pub fn execute(&self, planned: &mut PlannedBuild) {
        if !planned.needs_build() {
            return;
        }

        let unit = match self.config.unit(&planned.unit_name) {
            Ok(unit) => unit,
            Err(e) => {
                planned.status = BuildStatus::BuildFailed;
                planned.error = Some(e.to_string());
                return;
            }
        };

        planned.status = BuildStatus::BuildRunning;
        if let Err(e) = self.run_build_command(unit) {
            planned.status = BuildStatus::BuildFailed;
            planned.error = Some(e.to_string());
            return;
        }
        planned.status = BuildStatus::BuildSucceeded;

        match self.pack_and_store(unit, &planned.artifact_name) {
            Ok(()) => planned.status = BuildStatus::Stored,
            Err(e) => {
                planned.status = BuildStatus::StoreFailed;
                planned.error = Some(e.to_string());
            }
        }
    }

    /// Run the unit's opaque shell command with inherited stdio so build
    /// output stays visible.
    fn run_build_command(&self, unit: &Unit) -> HobbesResult<()> {
        let status = Command::new("sh")
            .arg("-c")
            .arg(&unit.command)
            .current_dir(self.config.root_dir())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;

        if !status.success() {
            return Err(HobbesError::CommandFailed {
                command: unit.command.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    /// Pack the unit's output directory to a temp archive and commit it.
    /// The NamedTempFile guard removes the archive on every exit path.
    fn pack_and_store(&self, unit: &Unit, artifact: &str) -> HobbesResult<()> {
        let temp = tempfile::Builder::new()
            .prefix("hobbes-")
            .suffix(".tar.gz")
            .tempfile()?;

        let output_dir = self.config.root_dir().join(&unit.output_directory);
        archive::pack(&output_dir, temp.path())?;
        self.repository.store(temp.path(), artifact)?;
        Ok(())
    }
}
