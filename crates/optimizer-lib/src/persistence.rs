//! Artifact persistence for the fitted scaler and model
//!
//! Each artifact is a JSON envelope holding the serialized state as a string
//! payload plus its SHA-256 checksum. Writes go to a temp file which is
//! synced and renamed into place, so a crashed write never leaves a
//! truncated artifact under the final name.

use crate::error::{OptimizerError, Result};
use crate::training::{LogisticModel, ScalerState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Artifact key for the fitted scaler
pub const SCALER_ARTIFACT: &str = "scaler";

/// Artifact key for the fitted model
pub const MODEL_ARTIFACT: &str = "risk_model";

/// Envelope format written by this version
pub const FORMAT_VERSION: u32 = 1;

const ARTIFACT_EXTENSION: &str = "json";

/// On-disk wrapper around a serialized state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEnvelope {
    pub name: String,
    pub format_version: u32,
    /// Unix timestamp (seconds) of the write
    pub created_at: i64,
    /// SHA-256 hex digest of `payload`
    pub checksum: String,
    pub payload: String,
}

/// Summary of an artifact on disk
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactInfo {
    pub name: String,
    pub path: PathBuf,
    pub format_version: u32,
    pub created_at: i64,
    pub checksum: String,
    pub size_bytes: u64,
}

/// Directory holding the `scaler` and `risk_model` artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for an artifact key
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, ARTIFACT_EXTENSION))
    }

    pub fn save_scaler(&self, scaler: &ScalerState) -> Result<PathBuf> {
        self.save(SCALER_ARTIFACT, scaler)
    }

    pub fn save_model(&self, model: &LogisticModel) -> Result<PathBuf> {
        self.save(MODEL_ARTIFACT, model)
    }

    pub fn load_scaler(&self) -> Result<ScalerState> {
        self.load(SCALER_ARTIFACT)
    }

    pub fn load_model(&self) -> Result<LogisticModel> {
        self.load(MODEL_ARTIFACT)
    }

    /// Serialize `state` under `name`, replacing any previous artifact
    pub fn save<T: Serialize>(&self, name: &str, state: &T) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| OptimizerError::storage(&self.dir, e))?;

        let path = self.path_for(name);
        let payload = serde_json::to_string(state)
            .map_err(|e| OptimizerError::corrupt(&path, format!("failed to serialize: {}", e)))?;
        let envelope = ArtifactEnvelope {
            name: name.to_string(),
            format_version: FORMAT_VERSION,
            created_at: chrono::Utc::now().timestamp(),
            checksum: compute_checksum(payload.as_bytes()),
            payload,
        };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| OptimizerError::corrupt(&path, format!("failed to serialize: {}", e)))?;

        write_atomic(&path, &bytes)?;

        info!(
            artifact = %name,
            path = %path.display(),
            checksum = %envelope.checksum,
            "Artifact saved"
        );
        Ok(path)
    }

    /// Read and verify the artifact stored under `name`
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path_for(name);
        let envelope = self.read_envelope(name, &path)?;
        let state = serde_json::from_str(&envelope.payload)
            .map_err(|e| OptimizerError::corrupt(&path, format!("invalid payload: {}", e)))?;
        debug!(artifact = %name, path = %path.display(), "Artifact loaded");
        Ok(state)
    }

    /// Verify an artifact and describe it without decoding its payload
    pub fn inspect(&self, name: &str) -> Result<ArtifactInfo> {
        let path = self.path_for(name);
        let envelope = self.read_envelope(name, &path)?;
        let size_bytes = fs::metadata(&path)
            .map_err(|e| OptimizerError::storage(&path, e))?
            .len();
        Ok(ArtifactInfo {
            name: envelope.name,
            path,
            format_version: envelope.format_version,
            created_at: envelope.created_at,
            checksum: envelope.checksum,
            size_bytes,
        })
    }

    fn read_envelope(&self, name: &str, path: &Path) -> Result<ArtifactEnvelope> {
        let bytes = fs::read(path).map_err(|e| OptimizerError::storage(path, e))?;
        let envelope: ArtifactEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| OptimizerError::corrupt(path, format!("invalid envelope: {}", e)))?;

        if envelope.name != name {
            return Err(OptimizerError::corrupt(
                path,
                format!("expected artifact '{}', found '{}'", name, envelope.name),
            ));
        }
        if envelope.format_version != FORMAT_VERSION {
            return Err(OptimizerError::corrupt(
                path,
                format!(
                    "unsupported format version {} (expected {})",
                    envelope.format_version, FORMAT_VERSION
                ),
            ));
        }
        let computed = compute_checksum(envelope.payload.as_bytes());
        if computed != envelope.checksum {
            return Err(OptimizerError::corrupt(
                path,
                format!(
                    "checksum mismatch: expected {}, got {}",
                    envelope.checksum, computed
                ),
            ));
        }
        Ok(envelope)
    }
}

/// Write to a sibling temp file, sync, then rename over `path`
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path).map_err(|e| OptimizerError::storage(&temp_path, e))?;
    file.write_all(bytes)
        .and_then(|_| file.sync_all())
        .map_err(|e| OptimizerError::storage(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| OptimizerError::storage(path, e))?;
    Ok(())
}

/// Compute SHA256 checksum of data
fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
