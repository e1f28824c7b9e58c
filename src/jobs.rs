//! Export job definitions and the load -> filter -> project -> export run.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::datasets::{
    ADM0_NAME, ADM1_NAME, ADM2_NAME, CALIFORNIA, GAUL_LEVEL2, NORTHERN_CALIFORNIA_COUNTIES,
    TIGER_ZCTA5, UNITED_STATES, ZCTA5CE10,
};
use crate::export::{ExportError, ExportFormat, ExportRequest, Exporter, JobHandle};
use crate::filter::{filter, FilterError, Predicate};
use crate::projection::{project, ProjectionError, ProjectionSpec, GEOMETRY_SELECTOR};
use crate::source::{Source, SourceError};

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// One export job: which dataset, which features, which fields, which format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Job name; doubles as the export description and output file stem
    pub name: String,

    pub dataset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Predicate>,

    /// Attribute names to keep; `.geo` keeps geometry
    pub selectors: Vec<String>,

    pub format: ExportFormat,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

/// The three exports this tool was built for.
pub fn builtin_jobs() -> Vec<JobSpec> {
    vec![
        // County boundaries for northern and central California
        JobSpec {
            name: "ExportOfGeometries".to_string(),
            dataset: GAUL_LEVEL2.to_string(),
            filter: Some(Predicate::and(vec![
                Predicate::equals(ADM1_NAME, CALIFORNIA),
                Predicate::is_in(ADM2_NAME, NORTHERN_CALIFORNIA_COUNTIES),
            ])),
            selectors: vec![ADM2_NAME.to_string(), GEOMETRY_SELECTOR.to_string()],
            format: ExportFormat::GeoJson,
            folder: None,
        },
        JobSpec {
            name: "zipcodes_without_geometry".to_string(),
            dataset: TIGER_ZCTA5.to_string(),
            filter: None,
            selectors: vec![ZCTA5CE10.to_string()],
            format: ExportFormat::Csv,
            folder: None,
        },
        JobSpec {
            name: "counties_without_geometry".to_string(),
            dataset: GAUL_LEVEL2.to_string(),
            filter: Some(Predicate::equals(ADM0_NAME, UNITED_STATES)),
            selectors: vec![ADM2_NAME.to_string(), ADM1_NAME.to_string()],
            format: ExportFormat::Csv,
            folder: None,
        },
    ]
}

/// Run a single job and return the handle of the submitted export.
///
/// Errors stop the job at the failing stage; an empty filter result is
/// exported as an empty file.
pub async fn run_job(
    source: &Source,
    exporter: &Exporter,
    spec: &JobSpec,
) -> Result<JobHandle, JobError> {
    // Validate everything cheap before touching the source
    let projection = ProjectionSpec::from_selectors(&spec.selectors)?;
    crate::export::validate_description(&spec.name)?;

    let collection = source.load(&spec.dataset).await?;
    info!(
        "[{}] loaded {} features from {}",
        spec.name,
        collection.len(),
        spec.dataset
    );

    let collection = match &spec.filter {
        Some(predicate) => {
            let filtered = filter(&collection, predicate)?;
            info!(
                "[{}] {} of {} features match filter",
                spec.name,
                filtered.len(),
                collection.len()
            );
            filtered
        }
        None => collection,
    };

    if collection.is_empty() {
        warn!("[{}] no features to export", spec.name);
    }

    let projected = project(&collection, &projection)?;

    let request = ExportRequest::new(projected, &spec.name, spec.format)?
        .with_folder(spec.folder.clone());
    let handle = exporter.submit(request).await?;

    info!(
        "[{}] export job {} {:?} at {}",
        spec.name, handle.id, handle.state, handle.destination
    );

    Ok(handle)
}
