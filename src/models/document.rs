//! Reading and writing feature collections as GeoJSON documents.
//!
//! Parsing and geometry conversion go through the `geojson` crate and its
//! `geo-types` conversions; this module only maps properties to and from
//! [`AttrValue`]s.

use geo::Geometry;
use geojson::feature::Id;
use geojson::{GeoJson, JsonObject, JsonValue};
use std::io::Read;
use thiserror::Error;

use super::{AttrValue, Feature, FeatureCollection};

/// Failure to read a GeoJSON FeatureCollection
#[derive(Debug, Error)]
#[error("invalid GeoJSON: {0}")]
pub struct GeoJsonError(#[from] geojson::Error);

impl TryFrom<geojson::Feature> for Feature {
    type Error = geojson::Error;

    fn try_from(feature: geojson::Feature) -> Result<Self, Self::Error> {
        let geometry = feature
            .geometry
            .map(|g| Geometry::<f64>::try_from(g.value))
            .transpose()?;

        // Numeric ids are carried as strings
        let id = feature.id.map(|id| match id {
            Id::String(s) => s,
            Id::Number(n) => n.to_string(),
        });

        let properties = feature
            .properties
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k, AttrValue::from(v)))
            .collect();

        Ok(Self {
            id,
            geometry,
            properties,
        })
    }
}

impl FeatureCollection {
    /// Parse a GeoJSON FeatureCollection document.
    pub fn from_geojson_reader<R: Read>(reader: R) -> Result<Self, GeoJsonError> {
        Self::from_geojson(GeoJson::from_reader(reader).map_err(geojson::Error::from)?)
    }

    /// Parse a GeoJSON FeatureCollection document from a string.
    pub fn from_geojson_str(raw: &str) -> Result<Self, GeoJsonError> {
        Self::from_geojson(raw.parse::<GeoJson>()?)
    }

    fn from_geojson(document: GeoJson) -> Result<Self, GeoJsonError> {
        let collection = geojson::FeatureCollection::try_from(document)?;
        let features = collection
            .features
            .into_iter()
            .map(Feature::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(features))
    }

    /// Convert into a GeoJSON FeatureCollection, keeping only schema
    /// attributes on each feature.
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        let features = self
            .features()
            .iter()
            .map(|feature| {
                let properties: JsonObject = self
                    .schema()
                    .iter()
                    .filter_map(|name| {
                        let value = feature.properties.get(name)?;
                        Some((name.clone(), JsonValue::from(value)))
                    })
                    .collect();

                geojson::Feature {
                    bbox: None,
                    geometry: feature.geometry.as_ref().map(to_geojson_geometry),
                    id: feature.id.clone().map(Id::String),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}

pub fn to_geojson_geometry(geometry: &Geometry<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, Rect};

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 7,
                "geometry": {"type": "Point", "coordinates": [-122.27, 37.80]},
                "properties": {"ADM1_NAME": "California", "ADM2_NAME": "Alameda"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"ADM1_NAME": "Nevada", "ADM2_CODE": 3000}
            }
        ]
    }"#;

    #[test]
    fn test_parse_collection() {
        let collection = FeatureCollection::from_geojson_str(SAMPLE).unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.schema(), &["ADM1_NAME", "ADM2_NAME", "ADM2_CODE"]);
        assert_eq!(collection.features()[0].id.as_deref(), Some("7"));
        assert!(collection.features()[1].geometry.is_none());
        assert!(collection.has_geometry());
        assert!(collection.features()[1].get("ADM2_NAME").is_null());
        assert_eq!(
            collection.features()[1].get("ADM2_CODE"),
            &AttrValue::Int(3000)
        );
    }

    #[test]
    fn test_parse_polygon_with_elevation() {
        let raw = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},
            "geometry":{"type":"Polygon","coordinates":[[[0,0,12],[1,0,12],[1,1,12],[0,0,12]]]}}]}"#;
        let collection = FeatureCollection::from_geojson_str(raw).unwrap();

        match &collection.features()[0].geometry {
            Some(Geometry::Polygon(p)) => {
                assert_eq!(p.exterior().0.len(), 4);
                assert!(p.interiors().is_empty());
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_single_feature_is_not_a_collection() {
        let raw = r#"{"type":"Feature","geometry":null,"properties":{}}"#;
        assert!(FeatureCollection::from_geojson_str(raw).is_err());
    }

    #[test]
    fn test_to_geojson_keeps_schema_attributes_only() {
        let feature = Feature::new(None).with("a", "x").with("b", 1i64);
        let collection = FeatureCollection::with_schema(vec!["a".to_string()], vec![feature]);

        let document = collection.to_geojson();
        let properties = document.features[0].properties.as_ref().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(properties["a"], "x");
    }

    #[test]
    fn test_rect_written_as_polygon() {
        let rect = Geometry::Rect(Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }));
        let json = serde_json::to_value(to_geojson_geometry(&rect)).unwrap();
        assert_eq!(json["type"], "Polygon");
    }
}
