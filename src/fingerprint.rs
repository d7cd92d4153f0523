//! Content fingerprinting
//!
//! Derives a deterministic fingerprint for a set of directories under a
//! project root, based on the version-control-tracked content listing rather
//! than a raw filesystem walk. Identical tracked content produces an
//! identical fingerprint regardless of mtimes, ownership, or untracked files.
//!
//! The hashing itself is delegated to the `git` binary: `git ls-files -s`
//! provides the (path, content identity) listing for the requested
//! directories and `git hash-object --stdin` collapses that listing into a
//! single hex hash. Uncommitted-but-staged content is therefore visible to
//! the fingerprint while untracked or ignored files are not.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::Config;
use crate::error::{HobbesError, HobbesResult};

/// Canonical archive extension for artifact identifiers
pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Abstract content hasher
///
/// Separated behind a trait so orchestrators can be exercised in tests
/// without invoking a real subprocess.
pub trait ContentHasher {
    /// Compute the fingerprint of `directories` (paths relative to `root`).
    ///
    /// `directories` must be non-empty and every entry must exist under
    /// `root`; the order of entries affects the hashed byte stream, so
    /// callers must keep it stable for reproducibility.
    fn hash_directories(&self, root: &Path, directories: &[String]) -> HobbesResult<String>;
}

/// Content hasher backed by the `git` binary on PATH
#[derive(Debug, Clone, Copy, Default)]
pub struct GitContentHasher;

impl GitContentHasher {
    pub fn new() -> Self {
        Self
    }
}

impl ContentHasher for GitContentHasher {
    fn hash_directories(&self, root: &Path, directories: &[String]) -> HobbesResult<String> {
        if directories.is_empty() {
            return Err(HobbesError::ConfigInvalid {
                message: "no directories to fingerprint".to_string(),
            });
        }
        if !root.is_dir() {
            return Err(HobbesError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }
        for dir in directories {
            let full = root.join(dir);
            if !full.is_dir() {
                return Err(HobbesError::DirectoryNotFound { path: full });
            }
        }

        let listing = Command::new("git")
            .arg("ls-files")
            .arg("-s")
            .arg("--")
            .args(directories)
            .current_dir(root)
            .output()
            .map_err(|e| HobbesError::GitFailed {
                message: format!("cannot run git ls-files: {e}"),
            })?;
        if !listing.status.success() {
            return Err(HobbesError::GitFailed {
                message: format!(
                    "git ls-files exited with {}: {}",
                    listing.status,
                    String::from_utf8_lossy(&listing.stderr).trim()
                ),
            });
        }

        let mut hasher = Command::new("git")
            .arg("hash-object")
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| HobbesError::GitFailed {
                message: format!("cannot run git hash-object: {e}"),
            })?;

        // stdin is piped, so take() always yields a handle
        if let Some(mut stdin) = hasher.stdin.take() {
            stdin.write_all(&listing.stdout)?;
        }

        let hashed = hasher.wait_with_output()?;
        if !hashed.status.success() {
            return Err(HobbesError::GitFailed {
                message: format!(
                    "git hash-object exited with {}: {}",
                    hashed.status,
                    String::from_utf8_lossy(&hashed.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&hashed.stdout)
            .trim_end()
            .to_string())
    }
}

/// Canonical artifact identifier for a unit:
/// `"{artifact_prefix}-{fingerprint}.tar.gz"`.
///
/// Deterministic for a given prefix and unchanged tracked content. Lookup
/// and fingerprint errors propagate verbatim.
pub fn artifact_name(
    config: &Config,
    hasher: &dyn ContentHasher,
    unit_name: &str,
) -> HobbesResult<String> {
    let unit = config.unit(unit_name)?;
    let fingerprint = hasher.hash_directories(config.root_dir(), &unit.directories)?;
    Ok(format!(
        "{}-{}.{}",
        unit.artifact_prefix, fingerprint, ARCHIVE_EXTENSION
    ))
}
