//! Feature collection sources.
//!
//! A dataset is named by a slash-separated id such as
//! `FAO/GAUL/2015/level2`. Sources resolve that id to a GeoJSON
//! FeatureCollection, either on disk or from a remote feature service.

use flate2::read::GzDecoder;
use reqwest::Client;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::http::{build_client, join_url};
use crate::models::{FeatureCollection, GeoJsonError};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("dataset '{dataset}' not found under {root}")]
    NotFound { dataset: String, root: PathBuf },

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset '{dataset}' is not a valid FeatureCollection: {source}")]
    Parse {
        dataset: String,
        #[source]
        source: GeoJsonError,
    },

    #[error("invalid source URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the feature service, passed through as-is
    #[error("feature service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Reads `<root>/<dataset>.geojson`, or `<root>/<dataset>.geojson.gz`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, dataset: &str) -> Option<PathBuf> {
        let base = dataset
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .fold(self.root.clone(), |path, part| path.join(part));

        let name = base.file_name()?.to_string_lossy().into_owned();

        ["geojson", "geojson.gz"]
            .iter()
            .map(|ext| base.with_file_name(format!("{}.{}", name, ext)))
            .find(|path| path.is_file())
    }

    pub fn load(&self, dataset: &str) -> Result<FeatureCollection, SourceError> {
        let path = self.resolve(dataset).ok_or_else(|| SourceError::NotFound {
            dataset: dataset.to_string(),
            root: self.root.clone(),
        })?;

        info!("Loading {} from {}", dataset, path.display());

        let file = File::open(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };

        FeatureCollection::from_geojson_reader(BufReader::new(reader)).map_err(|source| {
            SourceError::Parse {
                dataset: dataset.to_string(),
                source,
            }
        })
    }
}

/// Fetches `GET <base>/v1/collections/<dataset>` from a feature service.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteSource {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        // Fail early on a malformed base
        Url::parse(base_url)?;
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn load(&self, dataset: &str) -> Result<FeatureCollection, SourceError> {
        let url = join_url(&self.base_url, &["v1", "collections", dataset])?;
        info!("Fetching {} from {}", dataset, url);

        let mut builder = self.client.get(url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.text().await?;
        debug!("Received {} bytes for {}", raw.len(), dataset);

        FeatureCollection::from_geojson_str(&raw).map_err(|source| SourceError::Parse {
            dataset: dataset.to_string(),
            source,
        })
    }
}

/// Where feature collections come from
#[derive(Debug, Clone)]
pub enum Source {
    Directory(DirectorySource),
    Remote(RemoteSource),
}

impl Source {
    pub async fn load(&self, dataset: &str) -> Result<FeatureCollection, SourceError> {
        match self {
            Source::Directory(s) => s.load(dataset),
            Source::Remote(s) => s.load(dataset).await,
        }
    }

    /// Human-readable location for logs
    pub fn describe(&self) -> String {
        match self {
            Source::Directory(s) => s.root().display().to_string(),
            Source::Remote(s) => s.base_url().to_string(),
        }
    }
}
