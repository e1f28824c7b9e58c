//! Encoding of feature collections into export payloads.

use crate::models::document::to_geojson_geometry;
use crate::models::{AttrValue, FeatureCollection};
use crate::projection::GEOMETRY_SELECTOR;

use super::{ExportError, ExportFormat};

/// Encode a collection in the requested format.
pub fn encode(
    collection: &FeatureCollection,
    format: ExportFormat,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::GeoJson => encode_geojson(collection),
        ExportFormat::Csv => encode_csv(collection),
    }
}

pub fn encode_geojson(collection: &FeatureCollection) -> Result<Vec<u8>, ExportError> {
    Ok(serde_json::to_vec(&collection.to_geojson())?)
}

/// One row per feature, schema columns in schema order. A trailing `.geo`
/// column holds GeoJSON geometry text when geometry is part of the schema,
/// even if no row has any.
pub fn encode_csv(collection: &FeatureCollection) -> Result<Vec<u8>, ExportError> {
    let with_geometry = collection.has_geometry();
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = collection.schema().iter().map(String::as_str).collect();
    if with_geometry {
        header.push(GEOMETRY_SELECTOR);
    }
    writer.write_record(&header)?;

    for feature in collection.features() {
        let mut row: Vec<String> = collection
            .schema()
            .iter()
            .map(|name| {
                feature
                    .properties
                    .get(name)
                    .map(AttrValue::to_string)
                    .unwrap_or_default()
            })
            .collect();

        if with_geometry {
            let geo = match &feature.geometry {
                Some(geometry) => serde_json::to_string(&to_geojson_geometry(geometry))?,
                None => String::new(),
            };
            row.push(geo);
        }

        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Encode(e.to_string()))
}
