/// Fill and stroke for one compositor layer. Colors are linear RGBA.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerStyle {
    pub fill: Option<[f32; 4]>,
    pub stroke: Option<[f32; 4]>,
    pub line_width: f32,
}

impl LayerStyle {
    pub const fn filled(color: [f32; 4]) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            line_width: 0.0,
        }
    }

    pub const fn stroked(color: [f32; 4], line_width: f32) -> Self {
        Self {
            fill: None,
            stroke: Some(color),
            line_width,
        }
    }

    pub const fn with_stroke(mut self, color: [f32; 4], line_width: f32) -> Self {
        self.stroke = Some(color);
        self.line_width = line_width;
        self
    }
}

/// Translucent dark sea disk.
pub const SEA_STYLE: LayerStyle = LayerStyle::filled([0.12, 0.12, 0.12, 0.5]);

/// Land fill comes from the population color scale; this is the outline.
pub const LAND_STROKE: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
pub const LAND_LINE_WIDTH: f32 = 0.1;

/// Land color ramp endpoints (dark to warm) for the sqrt scale.
pub const LAND_RAMP_LO: [f32; 4] = [0.08, 0.08, 0.08, 1.0];
pub const LAND_RAMP_HI: [f32; 4] = [0.85, 0.65, 0.13, 1.0];

/// Connector arcs: stroke only, no fill.
pub const ARC_STYLE: LayerStyle = LayerStyle::stroked([1.0, 1.0, 0.0, 1.0], 0.5);

/// City markers: filled yellow circles.
pub const CITY_STYLE: LayerStyle = LayerStyle::filled([1.0, 1.0, 0.0, 1.0]);
