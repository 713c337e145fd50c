use foundation::math::GeoPoint;

/// A single property value attached to a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            PropertyValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Number(_) => None,
            PropertyValue::Text(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureGeometry {
    /// Outer ring first, optional hole rings after.
    Polygon { rings: Vec<Vec<GeoPoint>> },
    Point { position: GeoPoint },
    /// The whole globe outline; carries no coordinates.
    Sphere,
}

/// An immutable decoded feature: geometry plus an open property map.
///
/// Built once per dataset load and never mutated afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: FeatureGeometry,
    pub properties: Vec<(String, PropertyValue)>,
}

impl Feature {
    pub fn polygon(rings: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            geometry: FeatureGeometry::Polygon { rings },
            properties: Vec::new(),
        }
    }

    pub fn point(position: GeoPoint) -> Self {
        Self {
            geometry: FeatureGeometry::Point { position },
            properties: Vec::new(),
        }
    }

    pub fn sphere() -> Self {
        Self {
            geometry: FeatureGeometry::Sphere,
            properties: Vec::new(),
        }
    }

    pub fn with_properties(mut self, properties: Vec<(String, PropertyValue)>) -> Self {
        self.properties = properties;
        self
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn number_property(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(PropertyValue::as_number)
    }

    pub fn point_position(&self) -> Option<GeoPoint> {
        match self.geometry {
            FeatureGeometry::Point { position } => Some(position),
            _ => None,
        }
    }
}
