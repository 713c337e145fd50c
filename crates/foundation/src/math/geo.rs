use super::Vec3;

/// Geographic coordinates in degrees.
///
/// Longitude is kept in (-180, 180], latitude in [-90, 90].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon_deg: normalize_lon_deg(lon_deg),
            lat_deg: lat_deg.clamp(-90.0, 90.0),
        }
    }

    /// Unit vector on the sphere: x toward (0°, 0°), z toward the north pole.
    pub fn to_unit(self) -> Vec3 {
        let lon = self.lon_deg.to_radians();
        let lat = self.lat_deg.to_radians();
        Vec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    pub fn from_unit(v: Vec3) -> Self {
        let v = v.normalized();
        Self::new(
            v.y.atan2(v.x).to_degrees(),
            v.z.clamp(-1.0, 1.0).asin().to_degrees(),
        )
    }
}

/// Wrap a longitude into (-180, 180].
pub fn normalize_lon_deg(lon_deg: f64) -> f64 {
    if !lon_deg.is_finite() {
        return lon_deg;
    }
    let mut lon = (lon_deg + 180.0).rem_euclid(360.0) - 180.0;
    if lon == -180.0 {
        lon = 180.0;
    }
    lon
}

/// Minor-arc great-circle interpolation between two geographic points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GreatCircle {
    a: Vec3,
    b: Vec3,
    angle_rad: f64,
}

impl GreatCircle {
    pub fn between(a: GeoPoint, b: GeoPoint) -> Self {
        let ua = a.to_unit();
        let ub = b.to_unit();
        let angle_rad = ua.dot(ub).clamp(-1.0, 1.0).acos();
        Self {
            a: ua,
            b: ub,
            angle_rad,
        }
    }

    /// Central angle of the arc in radians.
    pub fn arc_angle_rad(&self) -> f64 {
        self.angle_rad
    }

    /// Sample the arc at fraction `t` (0 = start, 1 = end).
    ///
    /// Nearly coincident endpoints fall back to linear interpolation.
    /// Antipodal endpoints have no unique great circle; the path chosen is
    /// valid but arbitrary.
    pub fn at(&self, t: f64) -> GeoPoint {
        let sin_angle = self.angle_rad.sin();
        if sin_angle.abs() < 1e-9 {
            if self.angle_rad < 1.0 {
                // Coincident endpoints.
                return GeoPoint::from_unit(self.a);
            }
            // Antipodal: swing through an orthogonal waypoint.
            let axis = orthogonal_to(self.a);
            let half = slerp(self.a, axis, std::f64::consts::FRAC_PI_2, 2.0 * t);
            return GeoPoint::from_unit(half);
        }
        GeoPoint::from_unit(slerp(self.a, self.b, self.angle_rad, t))
    }
}

fn slerp(a: Vec3, b: Vec3, angle_rad: f64, t: f64) -> Vec3 {
    let sin_angle = angle_rad.sin();
    if sin_angle.abs() < 1e-9 {
        return a;
    }
    let ka = ((1.0 - t) * angle_rad).sin() / sin_angle;
    let kb = (t * angle_rad).sin() / sin_angle;
    (a.scale(ka) + b.scale(kb)).normalized()
}

fn orthogonal_to(v: Vec3) -> Vec3 {
    let axis = if v.z.abs() < 0.9 {
        Vec3::new(0.0, 0.0, 1.0)
    } else {
        Vec3::new(1.0, 0.0, 0.0)
    };
    v.cross(axis).normalized()
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, GreatCircle, normalize_lon_deg};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn normalizes_longitude_into_half_open_range() {
        assert_close(normalize_lon_deg(190.0), -170.0, 1e-12);
        assert_close(normalize_lon_deg(-190.0), 170.0, 1e-12);
        assert_close(normalize_lon_deg(360.0), 0.0, 1e-12);
        assert_close(normalize_lon_deg(-180.0), 180.0, 1e-12);
        assert_close(normalize_lon_deg(180.0), 180.0, 1e-12);
    }

    #[test]
    fn unit_vector_round_trip() {
        let p = GeoPoint::new(139.7494, 35.6869);
        let rt = GeoPoint::from_unit(p.to_unit());
        assert_close(rt.lon_deg, p.lon_deg, 1e-9);
        assert_close(rt.lat_deg, p.lat_deg, 1e-9);
    }

    #[test]
    fn equatorial_arc_midpoint() {
        let gc = GreatCircle::between(GeoPoint::new(0.0, 0.0), GeoPoint::new(90.0, 0.0));
        let mid = gc.at(0.5);
        assert_close(mid.lon_deg, 45.0, 1e-9);
        assert_close(mid.lat_deg, 0.0, 1e-9);
        assert_close(gc.arc_angle_rad(), std::f64::consts::FRAC_PI_2, 1e-12);
    }

    #[test]
    fn arc_endpoints_are_exact() {
        let a = GeoPoint::new(139.7494, 35.6869);
        let b = GeoPoint::new(0.1278, 51.5074);
        let gc = GreatCircle::between(a, b);
        let s = gc.at(0.0);
        let e = gc.at(1.0);
        assert_close(s.lon_deg, a.lon_deg, 1e-9);
        assert_close(s.lat_deg, a.lat_deg, 1e-9);
        assert_close(e.lon_deg, b.lon_deg, 1e-9);
        assert_close(e.lat_deg, b.lat_deg, 1e-9);
    }

    #[test]
    fn great_circle_midpoint_is_north_of_chord() {
        // Tokyo to London passes near the pole, well above both latitudes.
        let gc = GreatCircle::between(
            GeoPoint::new(139.7494, 35.6869),
            GeoPoint::new(0.1278, 51.5074),
        );
        let mid = gc.at(0.5);
        assert!(mid.lat_deg > 60.0, "midpoint latitude {}", mid.lat_deg);
    }

    #[test]
    fn antipodal_arc_stays_on_sphere() {
        let gc = GreatCircle::between(GeoPoint::new(0.0, 0.0), GeoPoint::new(180.0, 0.0));
        let mid = gc.at(0.5);
        let unit = mid.to_unit();
        assert_close(unit.length(), 1.0, 1e-9);
    }
}
