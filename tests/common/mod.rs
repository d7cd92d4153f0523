//! Test environment builder for isolated Hobbes testing.
//!
//! Provides `TestEnv` - an isolated project with a git work tree, a local
//! artifact repository, and a generated `artifacts.json`, plus helpers to
//! run Hobbes CLI commands against it.

// not every test binary uses every helper
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::json;
use tempfile::TempDir;

/// Result of running a Hobbes CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment: a git project with tracked sources, a local
/// repository directory, and an `artifacts.json` wired to both.
pub struct TestEnv {
    pub project_root: TempDir,
    pub repository_root: TempDir,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Get path of a stored artifact in the local repository
    pub fn repository_path(&self, name: &str) -> PathBuf {
        self.repository_root.path().join(name)
    }

    /// Names of all artifacts currently stored in the local repository
    pub fn stored_artifacts(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.repository_root.path())
            .expect("Failed to read repository")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Run hobbes CLI in this environment from project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_hobbes"))
            .current_dir(self.project_root.path())
            .args(args)
            .output()
            .expect("Failed to execute hobbes");

        self.output_to_result(output)
    }

    /// Convert Command output to TestResult
    fn output_to_result(&self, output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Stage every project file so git fingerprinting sees it
    pub fn git_add_all(&self) {
        let output = Command::new("git")
            .current_dir(self.project_root.path())
            .args(["add", "-A"])
            .output()
            .expect("Failed to run git add");
        assert!(output.status.success(), "git add failed");
    }

    /// Read a deployed file's content
    pub fn read_deployed_file(&self, relative_path: &str) -> String {
        let full_path = self.project_path(relative_path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read deployed file {relative_path}: {e}"))
    }
}

/// One buildable unit in the generated configuration
struct UnitSpec {
    name: String,
    directory: String,
    command: String,
}

/// One pre-built asset in the generated configuration
struct AssetSpec {
    name: String,
    filename: String,
    deploy_location: String,
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    units: Vec<UnitSpec>,
    assets: Vec<AssetSpec>,
    source_files: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            assets: Vec::new(),
            source_files: Vec::new(),
        }
    }

    /// Add a unit fingerprinting `directory`, building with `command` into
    /// `build/{name}`, deploying to `dist/{name}`.
    pub fn with_unit(mut self, name: &str, directory: &str, command: &str) -> Self {
        self.units.push(UnitSpec {
            name: name.to_string(),
            directory: directory.to_string(),
            command: command.to_string(),
        });
        self
    }

    /// Add a pre-built asset
    pub fn with_asset(mut self, name: &str, filename: &str, deploy_location: &str) -> Self {
        self.assets.push(AssetSpec {
            name: name.to_string(),
            filename: filename.to_string(),
            deploy_location: deploy_location.to_string(),
        });
        self
    }

    /// Add a tracked source file to the project
    pub fn with_source_file(mut self, path: &str, content: &str) -> Self {
        self.source_files
            .push((path.to_string(), content.to_string()));
        self
    }

    /// Build the TestEnv: create both temp trees, write sources, generate
    /// `artifacts.json`, and stage everything in a fresh git repository.
    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");
        let repository_root = TempDir::new().expect("Failed to create repository temp dir");

        for (path, content) in &self.source_files {
            let full_path = project_root.path().join(path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create source directory");
            }
            fs::write(&full_path, content).expect("Failed to write source file");
        }

        let config = json!({
            "application": "demo",
            "root_directory": "__DIR__",
            "repository": {
                "adapter": "local",
                "options": { "root": repository_root.path().to_string_lossy() }
            },
            "artifacts": self.units.iter().map(|u| json!({
                "name": u.name,
                "directories": [u.directory],
                "command": u.command,
                "output_directory": format!("build/{}", u.name),
                "deploy_location": format!("dist/{}", u.name),
                "artifact_prefix": u.name,
            })).collect::<Vec<_>>(),
            "assets": self.assets.iter().map(|a| json!({
                "name": a.name,
                "filename": a.filename,
                "deploy_location": a.deploy_location,
            })).collect::<Vec<_>>(),
        });
        fs::write(
            project_root.path().join("artifacts.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .expect("Failed to write artifacts.json");

        let init = Command::new("git")
            .current_dir(project_root.path())
            .args(["init", "-q"])
            .output()
            .expect("Failed to run git init");
        assert!(init.status.success(), "git init failed");

        let env = TestEnv {
            project_root,
            repository_root,
        };
        env.git_add_all();
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
