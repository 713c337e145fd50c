use foundation::math::{GeoPoint, GreatCircle, Orthographic, Vec2};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use scene::Feature;

/// Great-circle sample fractions for the two bezier control points.
const CTRL1_T: f64 = 0.33;
const CTRL2_T: f64 = 0.76;

/// A synthesized connector between two cities, in device space.
///
/// The bezier variant lifts its control points through the sky projection;
/// the segment variant is the degenerate fallback when a control point is
/// occluded. Paths live for one draw cycle only.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ArcPath {
    Bezier {
        start: Vec2,
        ctrl1: Vec2,
        ctrl2: Vec2,
        end: Vec2,
    },
    Segment {
        start: Vec2,
        end: Vec2,
    },
}

/// Synthesizes great-circle hops between qualifying point features.
///
/// Endpoints project through the primary projection; the two intermediate
/// great-circle samples project through a derived projection at
/// `sky_scale_factor` times the primary scale. The scale difference is what
/// lifts the curve off the globe surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSynthesizer {
    pub weight_key: String,
    pub weight_threshold: f64,
    pub sky_scale_factor: f64,
}

impl ArcSynthesizer {
    pub fn new(
        weight_key: impl Into<String>,
        weight_threshold: f64,
        sky_scale_factor: f64,
    ) -> Self {
        Self {
            weight_key: weight_key.into(),
            weight_threshold,
            sky_scale_factor,
        }
    }

    /// One arc attempt per qualifying source.
    ///
    /// The target is a normal draw centered near the head of the candidate
    /// list with the list length as deviation, floored to an index.
    /// Out-of-range, non-point and self draws produce no arc for that
    /// source. Callers seed the generator once per data load, so repeated
    /// draw cycles synthesize the same arc set.
    pub fn synthesize(
        &self,
        cities: &[Feature],
        projection: &Orthographic,
        rng: &mut StdRng,
    ) -> Vec<ArcPath> {
        if cities.is_empty() {
            return Vec::new();
        }
        let Ok(target_draw) = Normal::new(1.0, cities.len() as f64) else {
            return Vec::new();
        };
        let sky = projection.with_scale(projection.scale * self.sky_scale_factor);

        let mut arcs = Vec::new();
        for (index, feature) in cities.iter().enumerate() {
            let Some(source) = feature.point_position() else {
                continue;
            };
            let weight = feature.number_property(&self.weight_key).unwrap_or(0.0);
            if weight < self.weight_threshold {
                continue;
            }

            let drawn = target_draw.sample(rng).floor();
            if drawn < 0.0 || drawn >= cities.len() as f64 {
                continue;
            }
            let target_index = drawn as usize;
            if target_index == index {
                continue;
            }
            let Some(target) = cities[target_index].point_position() else {
                continue;
            };

            arcs.push(self.arc_between(source, target, projection, &sky));
        }
        arcs
    }

    /// A single hop, independent of target selection.
    pub fn arc_between(
        &self,
        source: GeoPoint,
        target: GeoPoint,
        projection: &Orthographic,
        sky: &Orthographic,
    ) -> ArcPath {
        let start = projection.project(source);
        let end = projection.project(target);

        let circle = GreatCircle::between(source, target);
        let ctrl1 = sky.project(circle.at(CTRL1_T));
        let ctrl2 = sky.project(circle.at(CTRL2_T));

        match (start, ctrl1, ctrl2, end) {
            (Some(start), Some(ctrl1), Some(ctrl2), Some(end)) => ArcPath::Bezier {
                start,
                ctrl1,
                ctrl2,
                end,
            },
            // Some projection fell on the occluded hemisphere: degrade to a
            // straight segment through the unclipped transform rather than
            // dropping the hop.
            _ => ArcPath::Segment {
                start: projection.project_unclipped(source),
                end: projection.project_unclipped(target),
            },
        }
    }
}
