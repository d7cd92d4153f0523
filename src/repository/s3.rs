//! S3 repository backend
//!
//! Entries are objects keyed by `prefix/identifier` (or bare `identifier`
//! when no prefix is configured). The SDK is async; this backend owns a
//! current-thread runtime and blocks on each call, since invocations are
//! short-lived CLI runs.

use std::fs;
use std::path::Path;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tokio::runtime::Runtime;

use crate::error::{HobbesError, HobbesResult};

use super::ArtifactRepository;

/// Repository backed by an S3 bucket
#[derive(Debug)]
pub struct S3Repository {
    client: Client,
    bucket: String,
    path_prefix: Option<String>,
    runtime: Runtime,
}

impl S3Repository {
    /// Create a backend for `bucket` in `region`, optionally keying entries
    /// under `path_prefix` and authenticating with a named shared-config
    /// `profile`.
    pub fn new(
        region: &str,
        bucket: &str,
        path_prefix: Option<&str>,
        profile: Option<&str>,
    ) -> HobbesResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let region = Region::new(region.to_string());
        let sdk_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
            if let Some(profile) = profile.filter(|p| !p.is_empty()) {
                loader = loader.profile_name(profile);
            }
            loader.load().await
        });

        Ok(Self {
            client: Client::new(&sdk_config),
            bucket: bucket.to_string(),
            path_prefix: path_prefix
                .filter(|p| !p.is_empty())
                .map(|p| p.to_string()),
            runtime,
        })
    }

    fn key(&self, artifact_name: &str) -> String {
        object_key(self.path_prefix.as_deref(), artifact_name)
    }
}

/// Full object key for an artifact: `prefix/name` joined with exactly one
/// slash, or the bare name without a prefix.
fn object_key(path_prefix: Option<&str>, artifact_name: &str) -> String {
    match path_prefix {
        Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), artifact_name),
        None => artifact_name.to_string(),
    }
}

impl ArtifactRepository for S3Repository {
    fn store(&self, artifact_path: &Path, artifact_name: &str) -> HobbesResult<()> {
        let key = self.key(artifact_name);
        self.runtime.block_on(async {
            let body =
                ByteStream::from_path(artifact_path)
                    .await
                    .map_err(|e| HobbesError::Backend {
                        message: format!("cannot read {}: {e}", artifact_path.display()),
                    })?;
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(&key)
                .body(body)
                .send()
                .await
                .map_err(|e| HobbesError::Backend {
                    message: format!(
                        "failed to upload '{artifact_name}': {}",
                        DisplayErrorContext(&e)
                    ),
                })?;
            Ok(())
        })
    }

    fn exists(&self, artifact_name: &str) -> HobbesResult<bool> {
        let key = self.key(artifact_name);
        let result = self.runtime.block_on(
            self.client
                .head_object()
                .bucket(&self.bucket)
                .key(&key)
                .send(),
        );
        match result {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .map(HeadObjectError::is_not_found)
                    .unwrap_or(false) =>
            {
                Ok(false)
            }
            Err(err) => Err(HobbesError::Backend {
                message: format!(
                    "failed to check '{artifact_name}': {}",
                    DisplayErrorContext(&err)
                ),
            }),
        }
    }

    fn retrieve(&self, artifact_name: &str, destination: &Path) -> HobbesResult<()> {
        let key = self.key(artifact_name);
        let bytes = self.runtime.block_on(async {
            let output = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(&key)
                .send()
                .await
                .map_err(|err| {
                    if err
                        .as_service_error()
                        .map(GetObjectError::is_no_such_key)
                        .unwrap_or(false)
                    {
                        HobbesError::ArtifactMissing {
                            name: artifact_name.to_string(),
                        }
                    } else {
                        HobbesError::Backend {
                            message: format!(
                                "failed to download '{artifact_name}': {}",
                                DisplayErrorContext(&err)
                            ),
                        }
                    }
                })?;
            output.body.collect().await.map_err(|e| HobbesError::Backend {
                message: format!("failed to read '{artifact_name}' body: {e}"),
            })
        })?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(destination, bytes.into_bytes())?;
        Ok(())
    }
}
