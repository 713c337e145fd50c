use super::{GeoPoint, Vec2};

/// Orthographic spherical projection.
///
/// Forward transform: rotate spherical coordinates by
/// `(rotate_lambda, rotate_phi, rotate_gamma)`, project the rotated point
/// onto the tangent plane, scale to pixels and offset by `translate`.
/// Rotating by `(-lon, -lat, 0)` makes `(lon, lat)` the visual center.
///
/// Points on the occluded hemisphere project to `None`; the horizon itself
/// (90° from center) is treated as visible so outlines stay closed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    /// Rotation angles in degrees: lambda, phi, gamma.
    pub rotate_deg: [f64; 3],
    /// Pixels per projection unit (globe radius in device pixels).
    pub scale: f64,
    /// Device-space origin of the projection center.
    pub translate: Vec2,
}

impl Orthographic {
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self {
            rotate_deg: [0.0, 0.0, 0.0],
            scale,
            translate,
        }
    }

    /// Projection whose visual center is `center`, gamma zero.
    pub fn centered_on(center: GeoPoint, scale: f64, translate: Vec2) -> Self {
        Self {
            rotate_deg: [-center.lon_deg, -center.lat_deg, 0.0],
            scale,
            translate,
        }
    }

    /// Same rotation and translate at a different scale.
    ///
    /// The arc synthesizer derives its elevated "sky" projection this way.
    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn with_rotation(self, lambda_deg: f64, phi_deg: f64, gamma_deg: f64) -> Self {
        Self {
            rotate_deg: [lambda_deg, phi_deg, gamma_deg],
            ..self
        }
    }

    /// The geographic point currently at the projection center.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(-self.rotate_deg[0], -self.rotate_deg[1])
    }

    pub fn project(&self, point: GeoPoint) -> Option<Vec2> {
        let (lambda, phi) = self.rotate_forward(
            point.lon_deg.to_radians(),
            point.lat_deg.to_radians(),
        );

        let cos_phi = phi.cos();
        let x = cos_phi * lambda.sin();
        let y = phi.sin();

        // Cosine of the angular distance from the projection center.
        let cos_c = cos_phi * lambda.cos();
        if cos_c < 0.0 {
            return None;
        }

        // Screen y grows downward.
        Some(Vec2::new(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        ))
    }

    /// Forward transform without the occlusion test.
    ///
    /// Points behind the globe land mirrored inside the disk. Only the
    /// degenerate-arc fallback wants this; everything else goes through
    /// `project`.
    pub fn project_unclipped(&self, point: GeoPoint) -> Vec2 {
        let (lambda, phi) = self.rotate_forward(
            point.lon_deg.to_radians(),
            point.lat_deg.to_radians(),
        );
        Vec2::new(
            self.translate.x + self.scale * phi.cos() * lambda.sin(),
            self.translate.y - self.scale * phi.sin(),
        )
    }

    pub fn invert(&self, coord: Vec2) -> Option<GeoPoint> {
        if self.scale <= 0.0 {
            return None;
        }
        let x = (coord.x - self.translate.x) / self.scale;
        let y = (self.translate.y - coord.y) / self.scale;

        let rho = (x * x + y * y).sqrt();
        if rho > 1.0 {
            return None;
        }

        let c = rho.clamp(-1.0, 1.0).asin();
        let (sin_c, cos_c) = (c.sin(), c.cos());
        let lambda = (x * sin_c).atan2(rho * cos_c);
        let phi = if rho < 1e-12 {
            0.0
        } else {
            (y * sin_c / rho).clamp(-1.0, 1.0).asin()
        };

        let (lon, lat) = self.rotate_inverse(lambda, phi);
        Some(GeoPoint::new(lon.to_degrees(), lat.to_degrees()))
    }

    /// Apply the lambda shift, then the phi/gamma rotation.
    fn rotate_forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let d_phi = self.rotate_deg[1].to_radians();
        let d_gamma = self.rotate_deg[2].to_radians();
        let lambda = lon + self.rotate_deg[0].to_radians();

        let cos_phi = lat.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = lat.sin();
        let k = z * d_phi.cos() + x * d_phi.sin();

        (
            (y * d_gamma.cos() - k * d_gamma.sin())
                .atan2(x * d_phi.cos() - z * d_phi.sin()),
            (k * d_gamma.cos() + y * d_gamma.sin()).clamp(-1.0, 1.0).asin(),
        )
    }

    /// Undo the phi/gamma rotation, then the lambda shift.
    fn rotate_inverse(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let d_phi = self.rotate_deg[1].to_radians();
        let d_gamma = self.rotate_deg[2].to_radians();

        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * d_gamma.cos() - y * d_gamma.sin();

        (
            (y * d_gamma.cos() + z * d_gamma.sin()).atan2(x * d_phi.cos() + k * d_phi.sin())
                - self.rotate_deg[0].to_radians(),
            (k * d_phi.cos() - x * d_phi.sin()).clamp(-1.0, 1.0).asin(),
        )
    }
}
