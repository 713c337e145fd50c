/// Linear mapping from a value domain onto an output range, clamped.
///
/// City marker radii use domain = population extent, range = [0, 10] px.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if (d1 - d0).abs() < f64::EPSILON {
            return r0;
        }
        let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
        r0 + t * (r1 - r0)
    }
}

/// Square-root-normalized sequential color scale.
///
/// `position` maps the domain onto [0, 1] through a sqrt ease (small values
/// spread out, large values compress), then `color` interpolates the ramp.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SqrtColorScale {
    domain: (f64, f64),
    ramp_lo: [f32; 4],
    ramp_hi: [f32; 4],
}

impl SqrtColorScale {
    pub fn new(domain: (f64, f64), ramp_lo: [f32; 4], ramp_hi: [f32; 4]) -> Self {
        Self {
            domain,
            ramp_lo,
            ramp_hi,
        }
    }

    /// Position on the ramp in [0, 1].
    pub fn position(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        if (d1 - d0).abs() < f64::EPSILON {
            return 0.0;
        }
        ((value - d0) / (d1 - d0)).clamp(0.0, 1.0).sqrt()
    }

    pub fn color(&self, value: f64) -> [f32; 4] {
        let t = self.position(value) as f32;
        [
            self.ramp_lo[0] + t * (self.ramp_hi[0] - self.ramp_lo[0]),
            self.ramp_lo[1] + t * (self.ramp_hi[1] - self.ramp_lo[1]),
            self.ramp_lo[2] + t * (self.ramp_hi[2] - self.ramp_lo[2]),
            self.ramp_lo[3] + t * (self.ramp_hi[3] - self.ramp_lo[3]),
        ]
    }
}
