//! Export requests and job handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ExportError, ExportFormat};
use crate::models::FeatureCollection;

/// Longest description the export service accepts
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Check a job description against the export service's naming rule:
/// 1-100 characters of letters, digits, spaces, and `.,:;_-`. Names made
/// only of dots are refused, since `.` and `..` are path components.
pub fn validate_description(description: &str) -> Result<(), ExportError> {
    let valid_char = |c: char| c.is_ascii_alphanumeric() || " .,:;_-".contains(c);

    if description.is_empty()
        || description.chars().count() > MAX_DESCRIPTION_LEN
        || !description.chars().all(valid_char)
        || description.chars().all(|c| c == '.')
    {
        return Err(ExportError::InvalidDescription(description.to_string()));
    }
    Ok(())
}

/// A request to materialize a collection as a downloadable file.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub description: String,
    pub format: ExportFormat,
    /// Optional sub-folder at the destination
    pub folder: Option<String>,
    pub collection: FeatureCollection,
}

impl ExportRequest {
    pub fn new(
        collection: FeatureCollection,
        description: &str,
        format: ExportFormat,
    ) -> Result<Self, ExportError> {
        validate_description(description)?;
        Ok(Self {
            description: description.to_string(),
            format,
            folder: None,
            collection,
        })
    }

    pub fn with_folder(mut self, folder: Option<String>) -> Self {
        self.folder = folder;
        self
    }

    /// File name the artifact will carry at the destination
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.description, self.format.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    /// Accepted by the export service; completion is tracked there
    Submitted,
    /// Artifact already written
    Completed,
}

/// Handle for a submitted export job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobHandle {
    pub id: String,
    pub description: String,
    pub format: ExportFormat,
    /// Path or URL the job was handed to
    pub destination: String,
    pub state: JobState,
    pub submitted_at: DateTime<Utc>,
}
