//! Attribute-based feature filtering.

mod predicate;

pub use predicate::Predicate;

use thiserror::Error;
use tracing::debug;

use crate::models::FeatureCollection;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("predicate references unknown attribute '{attribute}' (schema: {schema:?})")]
    UnknownAttribute {
        attribute: String,
        schema: Vec<String>,
    },
}

/// Check that every attribute the predicate reads exists in the schema.
/// Collections whose schema is unknown accept any attribute.
pub fn validate(collection: &FeatureCollection, predicate: &Predicate) -> Result<(), FilterError> {
    if collection.schema_is_unknown() {
        return Ok(());
    }

    match predicate
        .fields()
        .into_iter()
        .find(|field| !collection.has_field(field))
    {
        Some(attribute) => Err(FilterError::UnknownAttribute {
            attribute: attribute.to_string(),
            schema: collection.schema().to_vec(),
        }),
        None => Ok(()),
    }
}

/// Return the features satisfying `predicate`.
///
/// The result keeps the source schema. Matching nothing yields an empty
/// collection, not an error.
pub fn filter(
    collection: &FeatureCollection,
    predicate: &Predicate,
) -> Result<FeatureCollection, FilterError> {
    validate(collection, predicate)?;

    let kept: Vec<_> = collection
        .features()
        .iter()
        .filter(|f| predicate.matches(f))
        .cloned()
        .collect();

    debug!("Filter kept {} of {} features", kept.len(), collection.len());

    Ok(
        FeatureCollection::with_schema(collection.schema().to_vec(), kept)
            .with_geometry(collection.has_geometry()),
    )
}
