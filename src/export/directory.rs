//! Export destination backed by a local directory.

use chrono::Utc;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use super::job::validate_description;
use super::{encode, ExportError, ExportRequest, JobHandle, JobState};

/// Writes each export to `<root>/[folder/]<description>.<ext>`.
///
/// The write happens during submission, so handles come back `Completed`.
#[derive(Debug, Clone)]
pub struct DirectoryExporter {
    root: PathBuf,
}

impl DirectoryExporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub async fn submit(&self, request: ExportRequest) -> Result<JobHandle, ExportError> {
        let payload = encode(&request.collection, request.format)?;

        let mut dir = self.root.clone();
        if let Some(folder) = &request.folder {
            validate_description(folder)?;
            dir.push(folder);
        }

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| ExportError::Io {
                path: dir.clone(),
                source,
            })?;

        let path = dir.join(request.file_name());
        tokio::fs::write(&path, &payload)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        info!(
            "Wrote {} ({} features, {} bytes)",
            path.display(),
            request.collection.len(),
            payload.len()
        );

        Ok(JobHandle {
            id: Uuid::new_v4().to_string(),
            description: request.description,
            format: request.format,
            destination: path.display().to_string(),
            state: JobState::Completed,
            submitted_at: Utc::now(),
        })
    }
}
