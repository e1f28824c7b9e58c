//! Core data models: attribute values, features, and their GeoJSON form.

pub mod document;
pub mod feature;
pub mod value;

pub use document::GeoJsonError;
pub use feature::{Feature, FeatureCollection};
pub use value::AttrValue;
