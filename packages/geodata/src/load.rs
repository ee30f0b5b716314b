//! Loaders for the two startup input documents.
//!
//! The boundary document may be a bare geometry, a single feature, or a
//! feature collection; both `Polygon` and `MultiPolygon` geometries are
//! accepted. The accident document is a feature collection of points
//! whose properties are consumed verbatim — unknown vocabulary is kept,
//! not rejected, and degrades to default styling downstream.

use std::path::Path;

use accident_map_accident_models::AccidentRecord;
use geo::{MapCoords, MultiPolygon};
use geojson::{Feature, GeoJson};
use serde_json::Value as JsonValue;

use crate::GeodataError;
use crate::proj;

/// Loads the boundary polygon and projects it into the map frame.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid `GeoJSON`,
/// or contains no polygonal geometry.
pub fn load_boundary(path: &Path) -> Result<MultiPolygon<f64>, GeodataError> {
    let contents = std::fs::read_to_string(path)?;
    let geojson: GeoJson = contents.parse()?;

    let boundary = match geojson {
        GeoJson::Geometry(geometry) => to_multipolygon(geometry)?,
        GeoJson::Feature(feature) => {
            let geometry = feature.geometry.ok_or_else(|| GeodataError::Geometry {
                message: "boundary feature has no geometry".to_string(),
            })?;
            to_multipolygon(geometry)?
        }
        GeoJson::FeatureCollection(collection) => {
            let geometry = collection
                .features
                .into_iter()
                .find_map(|feature| feature.geometry)
                .ok_or_else(|| GeodataError::Geometry {
                    message: "boundary collection has no feature with geometry".to_string(),
                })?;
            to_multipolygon(geometry)?
        }
    };

    let projected = boundary.map_coords(|coord| {
        let [x, y] = proj::from_lon_lat(coord.x, coord.y);
        geo::Coord { x, y }
    });

    log::info!(
        "Loaded boundary with {} polygon(s) from {}",
        projected.0.len(),
        path.display()
    );

    Ok(projected)
}

/// Loads the accident point collection into projected records.
///
/// Features without point geometry are skipped with a warning; missing
/// attribute properties become empty strings (`None` for the optional
/// ones) so a sparse file still loads.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid `GeoJSON`,
/// or is not a feature collection.
pub fn load_accidents(path: &Path) -> Result<Vec<AccidentRecord>, GeodataError> {
    let contents = std::fs::read_to_string(path)?;
    let geojson: GeoJson = contents.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(GeodataError::Geometry {
            message: "accident document is not a feature collection".to_string(),
        });
    };

    let total = collection.features.len();
    let mut records = Vec::with_capacity(total);

    for feature in collection.features {
        let Some(position) = point_position(&feature) else {
            log::warn!("Skipping accident feature without point geometry");
            continue;
        };

        records.push(AccidentRecord {
            report_id: text_property(&feature, "report_id"),
            position,
            accident_type: text_property(&feature, "accident_type").unwrap_or_default(),
            severity: text_property(&feature, "severity").unwrap_or_default(),
            num_vehicles: text_property(&feature, "num_vehicles").unwrap_or_default(),
            num_casualties: text_property(&feature, "num_casualties").unwrap_or_default(),
            description: text_property(&feature, "description"),
            timestamp: text_property(&feature, "timestamp"),
        });
    }

    log::info!(
        "Loaded {} accident record(s) from {} ({} feature(s) skipped)",
        records.len(),
        path.display(),
        total - records.len()
    );

    Ok(records)
}

/// Extracts and projects a feature's point geometry.
fn point_position(feature: &Feature) -> Option<[f64; 2]> {
    let geometry = feature.geometry.as_ref()?;
    if let geojson::Value::Point(coords) = &geometry.value
        && coords.len() >= 2
    {
        return Some(proj::from_lon_lat(coords[0], coords[1]));
    }
    None
}

/// Reads a property as text, stringifying scalar non-string values the
/// way the original data surface delivered them.
fn text_property(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`], accepting both
/// `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Result<MultiPolygon<f64>, GeodataError> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Ok(mp),
        geo::Geometry::Polygon(p) => Ok(MultiPolygon(vec![p])),
        other => Err(GeodataError::Geometry {
            message: format!("expected polygonal boundary geometry, got {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_boundary_from_feature_collection() {
        let path = write_temp(
            "accident_map_boundary_fc.geojson",
            r#"{
              "type": "FeatureCollection",
              "features": [{
                "type": "Feature",
                "properties": {"name": "Kampala"},
                "geometry": {
                  "type": "Polygon",
                  "coordinates": [[[32.5,0.2],[32.7,0.2],[32.7,0.45],[32.5,0.45],[32.5,0.2]]]
                }
              }]
            }"#,
        );

        let boundary = load_boundary(&path).unwrap();
        assert_eq!(boundary.0.len(), 1);
        // Projected coordinates are meters, far outside the degree range.
        let first = boundary.0[0].exterior().0[0];
        assert!(first.x > 3_000_000.0);
    }

    #[test]
    fn rejects_non_polygonal_boundary() {
        let path = write_temp(
            "accident_map_boundary_point.geojson",
            r#"{"type": "Point", "coordinates": [32.6, 0.3]}"#,
        );

        let err = load_boundary(&path).unwrap_err();
        assert!(matches!(err, GeodataError::Geometry { .. }));
    }

    #[test]
    fn loads_accidents_and_skips_non_points() {
        let path = write_temp(
            "accident_map_accidents.geojson",
            r#"{
              "type": "FeatureCollection",
              "features": [
                {
                  "type": "Feature",
                  "properties": {
                    "accident_type": "Overturn",
                    "severity": "Severe",
                    "num_vehicles": 1,
                    "num_casualties": "3",
                    "description": "Truck overturned",
                    "timestamp": "2025-03-14 08:30"
                  },
                  "geometry": {"type": "Point", "coordinates": [32.58, 0.34]}
                },
                {
                  "type": "Feature",
                  "properties": {"accident_type": "Collision"},
                  "geometry": {
                    "type": "LineString",
                    "coordinates": [[32.5, 0.3], [32.6, 0.3]]
                  }
                }
              ]
            }"#,
        );

        let records = load_accidents(&path).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.accident_type, "Overturn");
        assert_eq!(record.severity, "Severe");
        // Numeric property stringified verbatim.
        assert_eq!(record.num_vehicles, "1");
        assert_eq!(record.num_casualties, "3");
        assert_eq!(record.description.as_deref(), Some("Truck overturned"));
        assert!(record.report_id.is_none());
    }

    #[test]
    fn missing_properties_degrade_to_empty() {
        let path = write_temp(
            "accident_map_accidents_sparse.geojson",
            r#"{
              "type": "FeatureCollection",
              "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [32.6, 0.35]}
              }]
            }"#,
        );

        let records = load_accidents(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].accident_type, "");
        assert!(records[0].timestamp.is_none());
    }
}
