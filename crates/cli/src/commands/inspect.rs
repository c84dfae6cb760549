//! Artifact inspection command

use anyhow::{Context, Result};
use chrono::{TimeZone, Utc};
use optimizer_lib::persistence::{ArtifactInfo, MODEL_ARTIFACT, SCALER_ARTIFACT};
use optimizer_lib::ArtifactStore;
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

use crate::output::{print_success, print_table, OutputFormat};

#[derive(Tabled, Serialize)]
struct ArtifactRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Version")]
    format_version: u32,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Checksum")]
    checksum: String,
    #[tabled(rename = "Size")]
    size_bytes: u64,
}

impl From<ArtifactInfo> for ArtifactRow {
    fn from(info: ArtifactInfo) -> Self {
        let created_at = Utc
            .timestamp_opt(info.created_at, 0)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| info.created_at.to_string());
        Self {
            name: info.name,
            path: info.path.display().to_string(),
            format_version: info.format_version,
            created_at,
            checksum: info.checksum,
            size_bytes: info.size_bytes,
        }
    }
}

/// Verify both artifacts in `model_dir` and describe them
pub fn show_artifacts(model_dir: &Path, format: OutputFormat) -> Result<()> {
    let store = ArtifactStore::new(model_dir);

    let mut rows = Vec::new();
    for name in [SCALER_ARTIFACT, MODEL_ARTIFACT] {
        let info = store
            .inspect(name)
            .with_context(|| format!("Artifact '{}' failed verification", name))?;
        rows.push(ArtifactRow::from(info));
    }

    print_table(&rows, format);
    if matches!(format, OutputFormat::Table) {
        print_success("All artifacts verified");
    }

    Ok(())
}
