//! featex - filter geospatial feature collections and export them
//!
//! This library provides the feature model, attribute filtering, field
//! projection, and export destinations used by the `featex` binary.

pub mod datasets;
pub mod export;
pub mod filter;
mod http;
pub mod jobs;
pub mod models;
pub mod projection;
pub mod source;

pub use export::{export, ExportFormat, Exporter, JobHandle};
pub use filter::{filter, Predicate};
pub use models::{AttrValue, Feature, FeatureCollection};
pub use projection::{project, ProjectionSpec};
