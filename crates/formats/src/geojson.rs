use foundation::math::GeoPoint;
use scene::{Feature, PropertyValue};
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum GeoJsonError {
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {}

/// Decode a GeoJSON FeatureCollection into scene features.
///
/// Points and Polygons map directly; MultiPoint and MultiPolygon flatten
/// into one feature per member, each carrying the source feature's
/// properties. Numeric properties become `Number`, strings become `Text`,
/// everything else is dropped. Other geometry types are rejected.
pub fn features_from_geojson_str(payload: &str) -> Result<Vec<Feature>, GeoJsonError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| GeoJsonError::InvalidFeature {
        index: 0,
        reason: format!("JSON parse error: {e}"),
    })?;
    features_from_geojson_value(value)
}

pub fn features_from_geojson_value(value: Value) -> Result<Vec<Feature>, GeoJsonError> {
    let obj = value
        .as_object()
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;
    if ty != "FeatureCollection" {
        return Err(GeoJsonError::NotAFeatureCollection);
    }

    let features_val = obj
        .get("features")
        .and_then(|v| v.as_array())
        .ok_or(GeoJsonError::NotAFeatureCollection)?;

    let mut features = Vec::with_capacity(features_val.len());
    for (index, feat_val) in features_val.iter().enumerate() {
        let feat_obj = feat_val.as_object().ok_or(GeoJsonError::InvalidFeature {
            index,
            reason: "feature must be an object".to_string(),
        })?;

        let feat_type = feat_obj.get("type").and_then(|v| v.as_str()).ok_or(
            GeoJsonError::InvalidFeature {
                index,
                reason: "feature missing type".to_string(),
            },
        )?;
        if feat_type != "Feature" {
            return Err(GeoJsonError::InvalidFeature {
                index,
                reason: format!("unexpected feature type: {feat_type}"),
            });
        }

        let properties = feat_obj
            .get("properties")
            .and_then(|v| v.as_object())
            .map(decode_properties)
            .unwrap_or_default();

        let geometry_val = feat_obj
            .get("geometry")
            .and_then(|v| v.as_object())
            .ok_or(GeoJsonError::InvalidFeature {
                index,
                reason: "feature missing geometry".to_string(),
            })?;

        decode_geometry(index, geometry_val, &properties, &mut features)?;
    }
    Ok(features)
}

fn decode_properties(map: &Map<String, Value>) -> Vec<(String, PropertyValue)> {
    let mut properties = Vec::with_capacity(map.len());
    for (key, value) in map {
        let decoded = match value {
            Value::Number(n) => n.as_f64().map(PropertyValue::Number),
            Value::String(s) => Some(PropertyValue::Text(s.clone())),
            _ => None,
        };
        if let Some(decoded) = decoded {
            properties.push((key.clone(), decoded));
        }
    }
    properties
}

fn decode_geometry(
    index: usize,
    geometry: &Map<String, Value>,
    properties: &[(String, PropertyValue)],
    out: &mut Vec<Feature>,
) -> Result<(), GeoJsonError> {
    let geo_type = geometry.get("type").and_then(|v| v.as_str()).ok_or(
        GeoJsonError::InvalidFeature {
            index,
            reason: "geometry missing type".to_string(),
        },
    )?;
    let coords = geometry
        .get("coordinates")
        .ok_or(GeoJsonError::InvalidFeature {
            index,
            reason: "geometry missing coordinates".to_string(),
        })?;

    match geo_type {
        "Point" => {
            let position = decode_position(index, coords)?;
            out.push(Feature::point(position).with_properties(properties.to_vec()));
        }
        "MultiPoint" => {
            for position_val in as_array(index, coords)? {
                let position = decode_position(index, position_val)?;
                out.push(Feature::point(position).with_properties(properties.to_vec()));
            }
        }
        "Polygon" => {
            let rings = decode_rings(index, coords)?;
            out.push(Feature::polygon(rings).with_properties(properties.to_vec()));
        }
        "MultiPolygon" => {
            for polygon_val in as_array(index, coords)? {
                let rings = decode_rings(index, polygon_val)?;
                out.push(Feature::polygon(rings).with_properties(properties.to_vec()));
            }
        }
        other => {
            return Err(GeoJsonError::InvalidFeature {
                index,
                reason: format!("unsupported geometry type: {other}"),
            });
        }
    }
    Ok(())
}

fn as_array<'a>(index: usize, value: &'a Value) -> Result<&'a Vec<Value>, GeoJsonError> {
    value.as_array().ok_or(GeoJsonError::InvalidFeature {
        index,
        reason: "coordinates must be an array".to_string(),
    })
}

fn decode_rings(index: usize, value: &Value) -> Result<Vec<Vec<GeoPoint>>, GeoJsonError> {
    let mut rings = Vec::new();
    for ring_val in as_array(index, value)? {
        let mut ring = Vec::new();
        for position_val in as_array(index, ring_val)? {
            ring.push(decode_position(index, position_val)?);
        }
        rings.push(ring);
    }
    Ok(rings)
}

fn decode_position(index: usize, value: &Value) -> Result<GeoPoint, GeoJsonError> {
    let pair = as_array(index, value)?;
    if pair.len() < 2 {
        return Err(GeoJsonError::InvalidFeature {
            index,
            reason: "position needs lon and lat".to_string(),
        });
    }
    let lon = pair[0].as_f64().ok_or(GeoJsonError::InvalidFeature {
        index,
        reason: "longitude must be a number".to_string(),
    })?;
    let lat = pair[1].as_f64().ok_or(GeoJsonError::InvalidFeature {
        index,
        reason: "latitude must be a number".to_string(),
    })?;
    Ok(GeoPoint::new(lon, lat))
}
