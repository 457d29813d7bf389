/*!
 * Model artifact retrieval from object storage.
 *
 * Each model's bundle lives under `<endpoint>/<bucket>/<model>/` with a
 * `manifest.json` listing every file and its sha256 digest. Bundles are
 * synced before engine load at startup; files already present with a
 * matching digest are skipped. Failures surface as a `StorageError` and
 * downgrade only the affected model to Down status.
 */

use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Duration;

use crate::app_config::ArtifactStoreConfig;
use crate::errors::StorageError;
use crate::registry::ModelId;

/// One file within a model's artifact bundle
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    /// File name relative to the model directory
    pub name: String,

    /// Hex-encoded sha256 digest of the file contents
    pub sha256: String,
}

/// Manifest listing a model's artifact bundle
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactManifest {
    /// Files making up the bundle
    pub files: Vec<ManifestEntry>,
}

/// Client for the object storage holding model artifact bundles
pub struct ArtifactStore {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl ArtifactStore {
    /// Create a store client from configuration
    pub fn new(config: &ArtifactStoreConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(600))
                .build()
                .unwrap_or_default(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
        }
    }

    fn object_url(&self, model: ModelId, name: &str) -> String {
        format!("{}/{}/{}/{}", self.endpoint, self.bucket, model, name)
    }

    /// Fetch a model's manifest
    pub async fn fetch_manifest(&self, model: ModelId) -> Result<ArtifactManifest, StorageError> {
        let url = self.object_url(model, "manifest.json");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::RequestFailed(format!(
                "{} returned {}",
                url, status
            )));
        }

        let manifest: ArtifactManifest = response
            .json()
            .await
            .map_err(|e| StorageError::Manifest(e.to_string()))?;

        for entry in &manifest.files {
            if entry.name.is_empty() || entry.name.contains("..") || entry.name.starts_with('/') {
                return Err(StorageError::Manifest(format!(
                    "unsafe file name '{}'",
                    entry.name
                )));
            }
        }

        Ok(manifest)
    }

    /// Sync a model's bundle into the destination directory.
    ///
    /// Files already present with a matching digest are left untouched;
    /// everything else is downloaded, verified and moved into place.
    pub async fn sync_model(&self, model: ModelId, dest_dir: &Path) -> Result<(), StorageError> {
        let manifest = self.fetch_manifest(model).await?;
        tokio::fs::create_dir_all(dest_dir).await?;

        let mut downloaded = 0usize;
        for entry in &manifest.files {
            let dest = dest_dir.join(&entry.name);

            if dest.is_file() && file_digest(&dest).await?.eq_ignore_ascii_case(&entry.sha256) {
                debug!("Artifact '{}' for '{}' is current", entry.name, model);
                continue;
            }

            self.download_file(model, entry, &dest).await?;
            downloaded += 1;
        }

        info!(
            "Artifacts for '{}' synced ({} of {} files downloaded)",
            model,
            downloaded,
            manifest.files.len()
        );
        Ok(())
    }

    async fn download_file(
        &self,
        model: ModelId,
        entry: &ManifestEntry,
        dest: &Path,
    ) -> Result<(), StorageError> {
        let url = self.object_url(model, &entry.name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::RequestFailed(format!(
                "{} returned {}",
                url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| StorageError::RequestFailed(e.to_string()))?;

        let digest = format!("{:x}", Sha256::digest(&body));
        if !digest.eq_ignore_ascii_case(&entry.sha256) {
            return Err(StorageError::ChecksumMismatch {
                file: entry.name.clone(),
            });
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Stage to a .part file, rename into place once verified
        let partial = dest.with_extension("part");
        tokio::fs::write(&partial, &body).await?;
        tokio::fs::rename(&partial, dest).await?;

        debug!("Downloaded artifact '{}' for '{}'", entry.name, model);
        Ok(())
    }
}

/// Hex-encoded sha256 digest of a file on disk
async fn file_digest(path: &Path) -> Result<String, StorageError> {
    let contents = tokio::fs::read(path).await?;
    Ok(format!("{:x}", Sha256::digest(&contents)))
}
