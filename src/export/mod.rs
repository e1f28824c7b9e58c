//! Export of feature collections to a destination.
//!
//! An export encodes a collection as GeoJSON or CSV and hands it to a
//! destination: a local directory, or a remote export service that queues
//! the job. Submission returns a [`JobHandle`] immediately; nothing here
//! waits on, polls, or retries a job.

mod directory;
mod encode;
mod format;
mod job;
mod remote;

pub use directory::DirectoryExporter;
pub use encode::{encode, encode_csv, encode_geojson};
pub use format::ExportFormat;
pub use job::{validate_description, ExportRequest, JobHandle, JobState};
pub use remote::RemoteExporter;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::FeatureCollection;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export description '{0}': use 1-100 letters, digits, spaces or .,:;_-")]
    InvalidDescription(String),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid export service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("export request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the export service, passed through as-is
    #[error("export service returned {status}: {body}")]
    Service { status: u16, body: String },
}

/// Where export jobs go
#[derive(Debug, Clone)]
pub enum Exporter {
    Directory(DirectoryExporter),
    Remote(RemoteExporter),
}

impl Exporter {
    pub async fn submit(&self, request: ExportRequest) -> Result<JobHandle, ExportError> {
        match self {
            Exporter::Directory(e) => e.submit(request).await,
            Exporter::Remote(e) => e.submit(request).await,
        }
    }

    /// Human-readable destination for logs
    pub fn describe(&self) -> String {
        match self {
            Exporter::Directory(e) => e.root().display().to_string(),
            Exporter::Remote(e) => e.endpoint().to_string(),
        }
    }
}

/// Submit `collection` as an export job named `job_name`.
pub async fn export(
    exporter: &Exporter,
    collection: FeatureCollection,
    job_name: &str,
    format: ExportFormat,
) -> Result<JobHandle, ExportError> {
    let request = ExportRequest::new(collection, job_name, format)?;
    exporter.submit(request).await
}
