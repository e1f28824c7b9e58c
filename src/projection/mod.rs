//! Field projection: keep named attributes, optionally drop geometry.

use thiserror::Error;
use tracing::debug;

use crate::models::{Feature, FeatureCollection};

/// Pseudo-selector that stands for the feature geometry
pub const GEOMETRY_SELECTOR: &str = ".geo";

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("projection retains neither attributes nor geometry")]
    EmptySchema,

    #[error("projection names unknown field '{0}'")]
    UnknownField(String),
}

/// Which attributes to keep, and whether geometry survives.
///
/// Only built through [`ProjectionSpec::new`], so a spec never keeps nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionSpec {
    fields: Vec<String>,
    retain_geometry: bool,
}

impl ProjectionSpec {
    /// Build a spec. Duplicate field names are collapsed; a spec that keeps
    /// nothing is rejected.
    pub fn new<S: AsRef<str>>(
        fields: &[S],
        retain_geometry: bool,
    ) -> Result<Self, ProjectionError> {
        let mut unique: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            let field = field.as_ref();
            if !unique.iter().any(|f| f == field) {
                unique.push(field.to_string());
            }
        }

        if unique.is_empty() && !retain_geometry {
            return Err(ProjectionError::EmptySchema);
        }

        Ok(Self {
            fields: unique,
            retain_geometry,
        })
    }

    /// Build a spec from selectors, where `.geo` selects the geometry.
    pub fn from_selectors<S: AsRef<str>>(selectors: &[S]) -> Result<Self, ProjectionError> {
        let retain_geometry = selectors.iter().any(|s| s.as_ref() == GEOMETRY_SELECTOR);
        let fields: Vec<&str> = selectors
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| *s != GEOMETRY_SELECTOR)
            .collect();
        Self::new(&fields, retain_geometry)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn retain_geometry(&self) -> bool {
        self.retain_geometry
    }
}

/// Restrict every feature to the spec's fields, dropping geometry unless
/// requested. The result schema is exactly the spec's field list, with
/// geometry as a column only when the spec retains it.
pub fn project(
    collection: &FeatureCollection,
    spec: &ProjectionSpec,
) -> Result<FeatureCollection, ProjectionError> {
    if !collection.schema_is_unknown() {
        if let Some(missing) = spec.fields.iter().find(|f| !collection.has_field(f)) {
            return Err(ProjectionError::UnknownField(missing.clone()));
        }
    }

    let features = collection
        .features()
        .iter()
        .map(|feature| Feature {
            id: feature.id.clone(),
            geometry: if spec.retain_geometry {
                feature.geometry.clone()
            } else {
                None
            },
            properties: feature
                .properties
                .iter()
                .filter(|(name, _)| spec.fields.contains(name))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        })
        .collect();

    debug!(
        "Projected {} features onto {:?} (geometry: {})",
        collection.len(),
        spec.fields,
        spec.retain_geometry
    );

    Ok(FeatureCollection::with_schema(spec.fields.clone(), features)
        .with_geometry(spec.retain_geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Geometry, Point};

    fn sample() -> FeatureCollection {
        FeatureCollection::new(vec![
            Feature::new(Some(Geometry::Point(Point::new(-122.2, 37.7))))
                .with("administrative1", "California")
                .with("administrative2", "Alameda"),
            Feature::new(Some(Geometry::Point(Point::new(-119.8, 39.5))))
                .with("administrative1", "Nevada")
                .with("administrative2", "Washoe"),
        ])
    }

    #[test]
    fn test_projection_scenario() {
        let spec = ProjectionSpec::new(&["administrative2"], false).unwrap();
        let result = project(&sample(), &spec).unwrap();

        for feature in result.features() {
            assert_eq!(feature.properties.len(), 1);
            assert!(feature.properties.contains_key("administrative2"));
            assert!(feature.geometry.is_none());
        }
        assert_eq!(result.schema(), &["administrative2"]);
        assert!(!result.has_geometry());
    }

    #[test]
    fn test_projection_is_idempotent() {
        let spec = ProjectionSpec::from_selectors(&["administrative2", ".geo"]).unwrap();
        let once = project(&sample(), &spec).unwrap();
        let twice = project(&once, &spec).unwrap();

        assert_eq!(once, twice);
        assert!(once.has_geometry());
    }

    #[test]
    fn test_geometry_only() {
        let spec = ProjectionSpec::from_selectors(&[".geo"]).unwrap();
        let result = project(&sample(), &spec).unwrap();

        assert!(result.schema().is_empty());
        assert!(result.features().iter().all(|f| f.properties.is_empty()));
        assert!(result.features().iter().all(|f| f.geometry.is_some()));
    }

    #[test]
    fn test_empty_spec_rejected() {
        let none: [&str; 0] = [];
        assert_eq!(
            ProjectionSpec::new(&none, false),
            Err(ProjectionError::EmptySchema)
        );
    }

    #[test]
    fn test_duplicate_fields_collapsed() {
        let spec = ProjectionSpec::new(&["a", "b", "a"], false).unwrap();
        assert_eq!(spec.fields(), &["a", "b"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let spec = ProjectionSpec::new(&["ZCTA5CE10"], false).unwrap();
        assert_eq!(
            project(&sample(), &spec),
            Err(ProjectionError::UnknownField("ZCTA5CE10".to_string()))
        );
    }

    #[test]
    fn test_empty_dataset_takes_projected_schema() {
        let spec = ProjectionSpec::from_selectors(&["ADM2_NAME", ".geo"]).unwrap();
        let result = project(&FeatureCollection::default(), &spec).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.schema(), &["ADM2_NAME"]);
        assert!(result.has_geometry());
    }

    #[test]
    fn test_geometry_dropped_from_schema() {
        let spec = ProjectionSpec::new(&["administrative1"], false).unwrap();
        let result = project(&sample(), &spec).unwrap();
        assert!(!result.has_geometry());
        assert!(!result.schema_is_unknown());
    }
}
