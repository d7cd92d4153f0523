//! Local filesystem repository backend
//!
//! Entries are plain files named by artifact identifier directly under a
//! root directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{HobbesError, HobbesResult};

use super::ArtifactRepository;

/// Repository backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entry_path(&self, artifact_name: &str) -> PathBuf {
        self.root.join(artifact_name)
    }
}

impl ArtifactRepository for LocalRepository {
    fn store(&self, artifact_path: &Path, artifact_name: &str) -> HobbesResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::copy(artifact_path, self.entry_path(artifact_name))?;
        Ok(())
    }

    fn exists(&self, artifact_name: &str) -> HobbesResult<bool> {
        Ok(self.entry_path(artifact_name).is_file())
    }

    fn retrieve(&self, artifact_name: &str, destination: &Path) -> HobbesResult<()> {
        let entry = self.entry_path(artifact_name);
        if !entry.is_file() {
            return Err(HobbesError::ArtifactMissing {
                name: artifact_name.to_string(),
            });
        }
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&entry, destination)?;
        Ok(())
    }
}
