use foundation::math::{Orthographic, Vec2};

/// Rotation and scale of the orthographic projection.
///
/// Single writer (the `ViewCommand` reducer), many readers (the draw
/// cycle). `scale` is pixels per projection unit and is independent of the
/// post-projection `Transform2D` zoom.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionState {
    pub rotate_lambda_deg: f64,
    pub rotate_phi_deg: f64,
    pub rotate_gamma_deg: f64,
    pub scale: f64,
    pub translate: Vec2,
}

impl ProjectionState {
    /// State whose visual center is the given lon/lat.
    pub fn centered_on(lon_deg: f64, lat_deg: f64, scale: f64, translate: Vec2) -> Self {
        Self {
            rotate_lambda_deg: -lon_deg,
            rotate_phi_deg: -lat_deg,
            rotate_gamma_deg: 0.0,
            scale,
            translate,
        }
    }

    pub fn to_projection(&self) -> Orthographic {
        Orthographic::new(self.scale, self.translate).with_rotation(
            self.rotate_lambda_deg,
            self.rotate_phi_deg,
            self.rotate_gamma_deg,
        )
    }
}

/// Post-projection group transform produced by zoom gestures.
///
/// Applied as a context-level transform before command replay; it never
/// feeds back into `ProjectionState.scale`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_k: f64,
}

impl Transform2D {
    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_k: 1.0,
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

/// Allowed range for `Transform2D.scale_k`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 1.0, max: 24.0 }
    }
}

/// Discrete view mutations.
///
/// Every gesture becomes one of these and flows through
/// `ViewState::apply`, so a recorded command list replays
/// deterministically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewCommand {
    /// Absolute rotation; gamma is preserved.
    RotateTo { lambda_deg: f64, phi_deg: f64 },
    RotateBy { d_lambda_deg: f64, d_phi_deg: f64 },
    /// Zoom to an absolute factor, keeping `anchor` (device px) fixed.
    ZoomTo { scale_k: f64, anchor: Vec2 },
    Reset,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewState {
    pub projection: ProjectionState,
    pub transform: Transform2D,
    pub zoom_bounds: ZoomBounds,
    initial: ProjectionState,
}

impl ViewState {
    pub fn new(projection: ProjectionState, zoom_bounds: ZoomBounds) -> Self {
        Self {
            projection,
            transform: Transform2D::identity(),
            zoom_bounds,
            initial: projection,
        }
    }

    pub fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::RotateTo {
                lambda_deg,
                phi_deg,
            } => {
                self.projection.rotate_lambda_deg = lambda_deg;
                self.projection.rotate_phi_deg = phi_deg;
            }
            ViewCommand::RotateBy {
                d_lambda_deg,
                d_phi_deg,
            } => {
                self.projection.rotate_lambda_deg += d_lambda_deg;
                self.projection.rotate_phi_deg += d_phi_deg;
            }
            ViewCommand::ZoomTo { scale_k, anchor } => {
                let old_k = self.transform.scale_k;
                let new_k = scale_k.clamp(self.zoom_bounds.min, self.zoom_bounds.max);
                if old_k > 0.0 {
                    // Keep the anchor point stationary on screen.
                    let ratio = new_k / old_k;
                    self.transform.translate_x =
                        anchor.x - (anchor.x - self.transform.translate_x) * ratio;
                    self.transform.translate_y =
                        anchor.y - (anchor.y - self.transform.translate_y) * ratio;
                }
                self.transform.scale_k = new_k;
            }
            ViewCommand::Reset => {
                self.projection = self.initial;
                self.transform = Transform2D::identity();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectionState, Transform2D, ViewCommand, ViewState, ZoomBounds};
    use foundation::math::Vec2;

    fn view() -> ViewState {
        ViewState::new(
            ProjectionState::centered_on(139.0, 35.0, 300.0, Vec2::new(480.0, 360.0)),
            ZoomBounds::default(),
        )
    }

    #[test]
    fn rotate_to_preserves_gamma() {
        let mut v = view();
        v.projection.rotate_gamma_deg = 17.0;
        v.apply(ViewCommand::RotateTo {
            lambda_deg: 10.0,
            phi_deg: -20.0,
        });
        assert_eq!(v.projection.rotate_lambda_deg, 10.0);
        assert_eq!(v.projection.rotate_phi_deg, -20.0);
        assert_eq!(v.projection.rotate_gamma_deg, 17.0);
    }

    #[test]
    fn zoom_clamps_exactly_to_bounds() {
        let mut v = view();
        v.apply(ViewCommand::ZoomTo {
            scale_k: 100.0,
            anchor: Vec2::new(0.0, 0.0),
        });
        assert_eq!(v.transform.scale_k, 24.0);

        v.apply(ViewCommand::ZoomTo {
            scale_k: 0.01,
            anchor: Vec2::new(0.0, 0.0),
        });
        assert_eq!(v.transform.scale_k, 1.0);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut v = view();
        let anchor = Vec2::new(200.0, 100.0);
        v.apply(ViewCommand::ZoomTo {
            scale_k: 4.0,
            anchor,
        });

        // The content point under the anchor stays at the anchor on screen.
        let t = v.transform;
        let mapped_x = anchor.x * t.scale_k + t.translate_x;
        let mapped_y = anchor.y * t.scale_k + t.translate_y;
        assert!((mapped_x - anchor.x).abs() < 1e-9);
        assert!((mapped_y - anchor.y).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_initial_projection_and_identity_transform() {
        let mut v = view();
        v.apply(ViewCommand::RotateBy {
            d_lambda_deg: 45.0,
            d_phi_deg: 10.0,
        });
        v.apply(ViewCommand::ZoomTo {
            scale_k: 8.0,
            anchor: Vec2::new(10.0, 10.0),
        });
        v.apply(ViewCommand::Reset);

        assert_eq!(v.projection.rotate_lambda_deg, -139.0);
        assert_eq!(v.projection.rotate_phi_deg, -35.0);
        assert_eq!(v.transform, Transform2D::identity());
    }

    #[test]
    fn command_replay_is_deterministic() {
        let commands = [
            ViewCommand::RotateBy {
                d_lambda_deg: 3.0,
                d_phi_deg: -2.0,
            },
            ViewCommand::ZoomTo {
                scale_k: 2.5,
                anchor: Vec2::new(320.0, 240.0),
            },
            ViewCommand::RotateTo {
                lambda_deg: -90.0,
                phi_deg: 15.0,
            },
        ];

        let mut a = view();
        let mut b = view();
        for &cmd in &commands {
            a.apply(cmd);
        }
        for &cmd in &commands {
            b.apply(cmd);
        }
        assert_eq!(a, b);
    }
}
