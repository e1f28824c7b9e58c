//! Features and feature collections.

use geo::Geometry;
use std::collections::BTreeMap;

use super::AttrValue;

static NULL: AttrValue = AttrValue::Null;

/// A geometry plus a mapping of named attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Source identifier, when the source provides one
    pub id: Option<String>,

    pub geometry: Option<Geometry<f64>>,

    pub properties: BTreeMap<String, AttrValue>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry<f64>>) -> Self {
        Self {
            id: None,
            geometry,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    /// Attribute value; missing attributes read as null
    pub fn get(&self, name: &str) -> &AttrValue {
        self.properties.get(name).unwrap_or(&NULL)
    }
}

/// A set of features sharing one schema.
///
/// The schema is the ordered list of attribute names the collection carries,
/// plus whether geometry is one of its columns. Operations never mutate a
/// collection; they return a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    schema: Vec<String>,
    geometry: bool,
    features: Vec<Feature>,
}

impl FeatureCollection {
    /// Build a collection, deriving the schema from property names in
    /// first-seen order.
    pub fn new(features: Vec<Feature>) -> Self {
        let mut schema: Vec<String> = Vec::new();
        for feature in &features {
            for name in feature.properties.keys() {
                if !schema.contains(name) {
                    schema.push(name.clone());
                }
            }
        }
        Self::with_schema(schema, features)
    }

    /// Build a collection with an explicit attribute schema. Geometry counts
    /// as part of the schema if any feature carries one.
    pub fn with_schema(schema: Vec<String>, features: Vec<Feature>) -> Self {
        let geometry = features.iter().any(|f| f.geometry.is_some());
        Self {
            schema,
            geometry,
            features,
        }
    }

    /// Declare whether geometry is part of the schema, regardless of data.
    pub fn with_geometry(mut self, geometry: bool) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.schema.iter().any(|f| f == name)
    }

    /// An empty collection with no declared attributes gives no evidence of
    /// what a dataset holds, so field checks against it are skipped.
    pub fn schema_is_unknown(&self) -> bool {
        self.schema.is_empty() && self.features.is_empty()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// True if geometry is part of the schema
    pub fn has_geometry(&self) -> bool {
        self.geometry
    }
}
