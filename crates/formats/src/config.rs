use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(reason) => write!(f, "config parse error: {reason}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Host-supplied viewer settings. Every field has a default, so an empty
/// JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub center_lon_deg: f64,
    pub center_lat_deg: f64,
    pub projection_scale: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub region_collection: String,
    pub city_collection: String,
    pub weight_key: String,
    pub arc_weight_threshold: f64,
    pub sky_scale_factor: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            center_lon_deg: 139.0,
            center_lat_deg: 35.0,
            projection_scale: 300.0,
            zoom_min: 1.0,
            zoom_max: 24.0,
            region_collection: "countries".to_string(),
            city_collection: "cities".to_string(),
            weight_key: "POP_MAX".to_string(),
            arc_weight_threshold: 5_000_000.0,
            sky_scale_factor: 2.0,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(payload).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.projection_scale <= 0.0 {
            return Err(ConfigError::Invalid(
                "projection_scale must be positive".to_string(),
            ));
        }
        if self.zoom_min <= 0.0 || self.zoom_max < self.zoom_min {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds [{}, {}] out of order",
                self.zoom_min, self.zoom_max
            )));
        }
        if self.sky_scale_factor <= 1.0 {
            return Err(ConfigError::Invalid(
                "sky_scale_factor must exceed 1".to_string(),
            ));
        }
        Ok(())
    }
}
