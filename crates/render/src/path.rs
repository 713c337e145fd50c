use foundation::math::{GeoPoint, Orthographic, Vec2};
use scene::{Feature, FeatureGeometry};

/// One device-space drawing operation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PathOp {
    MoveTo(Vec2),
    LineTo(Vec2),
    BezierTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
    Circle { center: Vec2, radius: f64 },
}

/// An ordered op sequence for one feature, rebuilt every draw cycle.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawPath {
    pub ops: Vec<PathOp>,
}

impl DrawPath {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Turns features into drawable paths under one projection.
#[derive(Debug, Copy, Clone)]
pub struct PathGenerator<'a> {
    projection: &'a Orthographic,
}

impl<'a> PathGenerator<'a> {
    pub fn new(projection: &'a Orthographic) -> Self {
        Self { projection }
    }

    /// Path for a feature's geometry.
    ///
    /// Point markers come out with radius zero; the compositor owns marker
    /// sizing (see `marker`). An empty or fully occluded geometry yields an
    /// empty path, which callers skip silently.
    pub fn path_for(&self, feature: &Feature) -> DrawPath {
        match &feature.geometry {
            FeatureGeometry::Sphere => self.sphere_path(),
            FeatureGeometry::Polygon { rings } => self.polygon_path(rings),
            FeatureGeometry::Point { position } => self.marker(*position, 0.0),
        }
    }

    /// The visible globe disk, used as the sea layer.
    pub fn sphere_path(&self) -> DrawPath {
        DrawPath {
            ops: vec![PathOp::Circle {
                center: self.projection.translate,
                radius: self.projection.scale,
            }],
        }
    }

    /// A filled circle anchored at a projected geographic point.
    pub fn marker(&self, position: GeoPoint, radius: f64) -> DrawPath {
        let Some(center) = self.projection.project(position) else {
            return DrawPath::default();
        };
        DrawPath {
            ops: vec![PathOp::Circle { center, radius }],
        }
    }

    /// Project every ring vertex, moving on the first visible vertex and
    /// drawing lines to the following ones. Occluded vertices are dropped;
    /// the run after a gap restarts with a move, so horizon crossings leave
    /// small gaps instead of wrap-around strokes. Emits at most one op per
    /// vertex. Rings with fewer than three vertices are skipped.
    fn polygon_path(&self, rings: &[Vec<GeoPoint>]) -> DrawPath {
        let mut path = DrawPath::default();
        for ring in rings {
            if ring.len() < 3 {
                continue;
            }
            let mut pen_down = false;
            for vertex in ring {
                match self.projection.project(*vertex) {
                    Some(p) if pen_down => path.ops.push(PathOp::LineTo(p)),
                    Some(p) => {
                        path.ops.push(PathOp::MoveTo(p));
                        pen_down = true;
                    }
                    None => pen_down = false,
                }
            }
        }
        path
    }
}
