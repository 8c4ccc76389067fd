//! # GeoJSON Attribute Source
//!
//! Reads GeoJSON layers into [`FeatureRecord`]s (id, location, raw
//! properties) and turns raw JSON properties into fully keyed
//! [`AttributeMap`]s, normalizing envelope fields with
//! [`build_pref_min_max`].
//!
//! Property encodings accepted for an uncertain quantity:
//! - bare value `12.5` → `(12.5, null, null)`
//! - array `[12.5, 10, 15]` → `(preferred, minimum, maximum[, category])`
//! - object `{"preferred": 12.5, "minimum": 10, "distribution": "uniform"}`
//!
//! ## Table of Contents
//! 1. FeatureRecord — Feature with id, location and raw properties
//! 2. GeoJSON import
//! 3. Property normalization

use geo::{LineString, Polygon};
use geojson::{feature::Id, Feature, GeoJson, Geometry, Value};
use serde_json::{Map, Value as Json};
use std::path::Path;

use crate::attributes::{AttributeMap, AttributeValue};
use crate::error::{FaultError, ImportError, Result};
use crate::geometry::{Location, SitePoint};
use crate::parameter::{build_pref_min_max, Scalar, TupleInput, UncertainValue};
use crate::schema::{RecordKind, TRIPLE};

// ============================================================================
// 1. FeatureRecord — Feature with id, location and raw properties
// ============================================================================

/// A GeoJSON feature ready to be read into a record
#[derive(Debug, Clone)]
pub struct FeatureRecord {
    /// Feature index within the source file
    pub index: usize,
    /// Record ID (feature id, `ID`/`id` property, or `<file-stem>-<index>`)
    pub id: String,
    /// Feature geometry
    pub location: Location,
    /// Raw feature properties
    pub properties: Map<String, Json>,
}

impl FeatureRecord {
    /// Normalize the raw properties for a record of `kind`
    pub fn attributes(&self, kind: RecordKind) -> Result<AttributeMap> {
        attributes_from_json(kind, &self.properties)
    }
}

// ============================================================================
// 2. GeoJSON import
// ============================================================================

/// Read every feature of a GeoJSON file
fn read_features(path: &Path) -> std::result::Result<Vec<Feature>, ImportError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ImportError::Io(path.to_path_buf(), e))?;

    let geojson: GeoJson = content
        .parse()
        .map_err(|e| ImportError::Parse(path.to_path_buf(), format!("{}", e)))?;

    Ok(match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![Feature {
            bbox: None,
            geometry: Some(g),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    })
}

/// Import point / line features as records. Features without geometry are
/// skipped; any other geometry kind is an error.
pub fn import_records(path: &Path) -> std::result::Result<Vec<FeatureRecord>, ImportError> {
    let features = read_features(path)?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "feature".to_string());

    let mut records = Vec::with_capacity(features.len());
    for (index, feature) in features.into_iter().enumerate() {
        let Some(geometry) = feature.geometry.as_ref() else {
            tracing::warn!("Skipping feature {} in {}: no geometry", index, path.display());
            continue;
        };
        let properties = feature.properties.clone().unwrap_or_default();
        let id = feature_id(&feature, &properties).unwrap_or_else(|| format!("{}-{}", stem, index));
        let location = location_of(&id, geometry).map_err(|source| ImportError::Feature {
            path: path.to_path_buf(),
            index,
            source,
        })?;
        tracing::debug!("Read feature `{}` ({}) from {}", id, location.kind(), path.display());
        records.push(FeatureRecord {
            index,
            id,
            location,
            properties,
        });
    }

    tracing::info!("Imported {} features from {}", records.len(), path.display());
    Ok(records)
}

/// First LineString feature of a file (a section trace)
pub fn import_line(path: &Path) -> std::result::Result<LineString<f64>, ImportError> {
    read_features(path)?
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .find_map(|g| match &g.value {
            Value::LineString(coords) => Some(line_of(coords)),
            _ => None,
        })
        .ok_or_else(|| ImportError::Parse(path.to_path_buf(), "no LineString feature".to_string()))
}

/// First Polygon feature of a file (a fault zone)
pub fn import_polygon(path: &Path) -> std::result::Result<Polygon<f64>, ImportError> {
    read_features(path)?
        .iter()
        .filter_map(|f| f.geometry.as_ref())
        .find_map(|g| match &g.value {
            Value::Polygon(rings) if !rings.is_empty() => Some(Polygon::new(
                line_of(&rings[0]),
                rings[1..].iter().map(|r| line_of(r)).collect(),
            )),
            _ => None,
        })
        .ok_or_else(|| ImportError::Parse(path.to_path_buf(), "no Polygon feature".to_string()))
}

/// Read a JSON object of attributes (a section or fault bundle)
pub fn import_attributes(
    path: &Path,
    kind: RecordKind,
) -> std::result::Result<AttributeMap, ImportError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ImportError::Io(path.to_path_buf(), e))?;
    let object: Map<String, Json> = serde_json::from_str(&content)
        .map_err(|e| ImportError::Parse(path.to_path_buf(), format!("{}", e)))?;
    Ok(attributes_from_json(kind, &object)?)
}

fn feature_id(feature: &Feature, properties: &Map<String, Json>) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => return Some(s.clone()),
        Some(Id::Number(n)) => return Some(n.to_string()),
        None => {}
    }
    properties
        .get("ID")
        .or_else(|| properties.get("id"))
        .and_then(|v| match v {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn location_of(id: &str, geometry: &Geometry) -> Result<Location> {
    match &geometry.value {
        Value::Point(coord) => {
            let mut point = SitePoint::new(coord[0], coord[1]);
            if let Some(depth) = coord.get(2) {
                point = point.with_depth(*depth);
            }
            Ok(Location::point(point))
        }
        Value::LineString(coords) => Ok(Location::line(line_of(coords))),
        other => Err(FaultError::Geometry {
            id: id.to_string(),
            expected: "point or line",
            found: geometry_kind(other),
        }),
    }
}

fn line_of(coords: &[Vec<f64>]) -> LineString<f64> {
    LineString::from(coords.iter().map(|c| (c[0], c[1])).collect::<Vec<_>>())
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "point",
        Value::MultiPoint(_) => "multipoint",
        Value::LineString(_) => "line",
        Value::MultiLineString(_) => "multiline",
        Value::Polygon(_) => "polygon",
        Value::MultiPolygon(_) => "multipolygon",
        Value::GeometryCollection(_) => "geometry collection",
    }
}

// ============================================================================
// 3. Property normalization
// ============================================================================

/// Convert raw JSON properties into an attribute mapping for `kind`.
///
/// Envelope fields are normalized with their schema arity; a JSON `null`
/// stays `Null` so the record constructor reports it. Plain fields keep
/// scalars as-is and accept envelopes (arrays as triples, or objects).
pub fn attributes_from_json(
    kind: RecordKind,
    properties: &Map<String, Json>,
) -> Result<AttributeMap> {
    let mut map = AttributeMap::new();
    for (key, value) in properties {
        let attribute = match (kind.envelope_arity(key), value) {
            (_, Json::Null) => AttributeValue::Null,
            (Some(arity), _) => AttributeValue::Uncertain(envelope_from_json(key, value, arity)?),
            (None, Json::Array(_) | Json::Object(_)) => {
                AttributeValue::Uncertain(envelope_from_json(key, value, TRIPLE)?)
            }
            (None, _) => AttributeValue::from(scalar_from_json(key, value)?),
        };
        if let AttributeValue::Uncertain(v) = &attribute {
            if !v.is_bracketed() {
                tracing::warn!("`{}` preferred value lies outside its bounds: {}", key, v);
            }
        }
        map.insert(key.as_str(), attribute);
    }
    Ok(map)
}

fn envelope_from_json(key: &str, value: &Json, arity: usize) -> Result<UncertainValue> {
    match value {
        Json::Array(items) => {
            let tuple = items
                .iter()
                .map(|item| scalar_from_json(key, item))
                .collect::<Result<Vec<_>>>()?;
            UncertainValue::parse(key, TupleInput::Tuple(tuple), arity)
        }
        Json::Object(_) => {
            let parsed: UncertainValue = serde_json::from_value(value.clone())
                .map_err(|e| FaultError::type_constraint(key, e))?;
            parsed.validate(key)?;
            Ok(parsed)
        }
        other => {
            let bare = TupleInput::Bare(scalar_from_json(key, other)?);
            let tuple = build_pref_min_max(key, bare, arity)?;
            UncertainValue::from_tuple(key, tuple)
        }
    }
}

fn scalar_from_json(key: &str, value: &Json) -> Result<Option<Scalar>> {
    match value {
        Json::Null => Ok(None),
        Json::Bool(b) => Ok(Some(Scalar::Flag(*b))),
        Json::Number(n) => n
            .as_f64()
            .map(|n| Some(Scalar::Number(n)))
            .ok_or_else(|| FaultError::expected(key, "a finite number", n)),
        Json::String(s) => Ok(Some(Scalar::Text(s.clone()))),
        nested => Err(FaultError::expected(key, "a scalar", nested)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::SpatialRecord;
    use crate::schema;
    use serde_json::json;
    use std::io::Write;

    fn object(value: Json) -> Map<String, Json> {
        match value {
            Json::Object(map) => map,
            _ => unreachable!("fixture is an object"),
        }
    }

    #[test]
    fn test_envelope_encodings() {
        let props = object(json!({
            "Dip Slip": 0.5,
            "Net Slip": [20.0, 15.0, 25.0],
            "Rake": {
                "preferred": 175.0,
                "minimum": 160.0,
                "maximum": 190.0,
                "distribution": "uniform"
            },
            "Slip Type": "dextral",
            "Slip Category": "A",
            "Notes": null
        }));
        let map = attributes_from_json(RecordKind::SlipRate, &props).unwrap();

        let dip_slip = map.uncertain(schema::DIP_SLIP).unwrap();
        assert_eq!(dip_slip, UncertainValue::new(0.5));
        let net = map.uncertain(schema::NET_SLIP).unwrap();
        assert_eq!(net.minimum, Some(Scalar::Number(15.0)));
        let rake = map.uncertain(schema::RAKE).unwrap();
        assert_eq!(rake.distribution.as_deref(), Some("uniform"));
        assert_eq!(map.uncertain(schema::SLIP_TYPE).unwrap().preferred, Scalar::from("dextral"));
        assert!(map.get(schema::SLIP_CATEGORY).unwrap().as_scalar().is_some());
        assert!(map.get(schema::NOTES).unwrap().is_null());
    }

    #[test]
    fn test_arity_follows_schema() {
        let props = object(json!({ "Recurrence Interval": [1000, 500, 2000] }));
        let err = attributes_from_json(RecordKind::Event, &props).unwrap_err();
        assert_eq!(
            err,
            FaultError::Shape {
                field: "Recurrence Interval".into(),
                expected: 4,
                found: 3,
            }
        );

        let props = object(json!({ "Recurrence Interval": [1000, 500, 2000, "B"] }));
        let map = attributes_from_json(RecordKind::Event, &props).unwrap();
        let recurrence = map.uncertain(schema::RECURRENCE_INTERVAL).unwrap();
        assert_eq!(recurrence.completeness, Some(Scalar::from("B")));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let props = object(json!({ "Net Slip": [20.0, 25.0, 15.0] }));
        let err = attributes_from_json(RecordKind::SlipRate, &props).unwrap_err();
        assert!(matches!(err, FaultError::Range { .. }));

        let props = object(json!({
            "Net Slip": { "preferred": 20.0, "minimum": 25.0, "maximum": 15.0 }
        }));
        let err = attributes_from_json(RecordKind::SlipRate, &props).unwrap_err();
        assert!(matches!(err, FaultError::Range { .. }));
    }

    #[test]
    fn test_plain_field_may_carry_envelope() {
        let props = object(json!({ "Dip": [60, 45, 75], "Strike": 92 }));
        let map = attributes_from_json(RecordKind::Geometry, &props).unwrap();
        assert!(map.get(schema::DIP).unwrap().as_uncertain().is_some());
        assert_eq!(map.get(schema::STRIKE).unwrap().as_f64(), Some(92.0));
    }

    #[test]
    fn test_accuracy_envelope_reaches_the_record() {
        let props = object(json!({
            "Scale": 25000,
            "Accuracy": [100, 50, 150],
            "Notes": "fan surface",
            "Fault Section": null,
            "Site Feature": "riser"
        }));
        let map = attributes_from_json(RecordKind::SlipRate, &props).unwrap();
        let location = Location::point(SitePoint::new(29.9, 40.7));
        let record = SpatialRecord::from_attributes("SR1", location, &map).unwrap();
        let accuracy = record.accuracy.as_uncertain().unwrap();
        assert_eq!(accuracy.maximum, Some(Scalar::Number(150.0)));
        assert_eq!(record.accuracy_value(), Some(100.0));
    }

    #[test]
    fn test_import_records_from_geojson() {
        let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
        write!(
            file,
            "{}",
            json!({
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": "SR1",
                      "geometry": { "type": "Point", "coordinates": [29.9, 40.7, 2.5] },
                      "properties": { "Scale": 25000 } },
                    { "type": "Feature",
                      "geometry": { "type": "Point", "coordinates": [30.0, 40.8] },
                      "properties": { "ID": "SR2" } },
                    { "type": "Feature",
                      "geometry": {
                          "type": "LineString",
                          "coordinates": [[29.0, 40.0], [30.0, 41.0]]
                      },
                      "properties": {} },
                    { "type": "Feature", "geometry": null, "properties": {} }
                ]
            })
        )
        .unwrap();

        let records = import_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "SR1");
        assert_eq!(records[0].location.as_point().unwrap().depth(), Some(2.5));
        assert_eq!(records[1].id, "SR2");
        assert!(records[2].id.ends_with("-2"));
        assert_eq!(records[2].location.kind(), "line");
    }

    #[test]
    fn test_polygon_features_are_not_observations() {
        let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
        write!(
            file,
            "{}",
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                },
                "properties": {}
            })
        )
        .unwrap();

        let err = import_records(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Feature {
                index: 0,
                source: FaultError::Geometry { found: "polygon", .. },
                ..
            }
        ));
        let polygon = import_polygon(file.path()).unwrap();
        assert_eq!(polygon.exterior().0.len(), 4);
    }
}
