use foundation::math::Vec2;

use crate::view::{ViewCommand, ViewState};

/// Wheel delta to zoom-factor exponent.
const WHEEL_ZOOM_RATE: f64 = 0.002;

#[derive(Debug, Copy, Clone, PartialEq)]
struct DragState {
    start_px: Vec2,
    /// Rotation captured at pointer-down: (lambda, -phi), the drag subject.
    subject: Vec2,
}

/// Maps pointer and wheel gestures onto view commands.
///
/// Drag: pointer-down captures the current rotation as the drag subject;
/// each move maps the cumulative pointer delta to an absolute
/// `RotateTo(x, -y)`, gamma untouched. Wheel: exponential factor on the
/// current zoom, emitted as `ZoomTo` anchored at the pointer.
///
/// This is the only writer of view state; every mutation goes through the
/// reducer so gestures can be replayed.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InteractionController {
    drag: Option<DragState>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, pos_px: Vec2, view: &ViewState) {
        self.drag = Some(DragState {
            start_px: pos_px,
            subject: Vec2::new(
                view.projection.rotate_lambda_deg,
                -view.projection.rotate_phi_deg,
            ),
        });
    }

    pub fn pointer_move(&mut self, pos_px: Vec2) -> Option<ViewCommand> {
        let drag = self.drag?;
        let x = drag.subject.x + (pos_px.x - drag.start_px.x);
        let y = drag.subject.y + (pos_px.y - drag.start_px.y);
        Some(ViewCommand::RotateTo {
            lambda_deg: x,
            phi_deg: -y,
        })
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Wheel/pinch zoom. Negative `delta_y` (wheel up) zooms in.
    pub fn wheel(&self, delta_y: f64, anchor: Vec2, view: &ViewState) -> ViewCommand {
        let factor = (-delta_y * WHEEL_ZOOM_RATE).exp();
        ViewCommand::ZoomTo {
            scale_k: view.transform.scale_k * factor,
            anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionController;
    use crate::view::{ProjectionState, ViewCommand, ViewState, ZoomBounds};
    use foundation::math::Vec2;

    fn view() -> ViewState {
        ViewState::new(
            ProjectionState::centered_on(139.0, 35.0, 300.0, Vec2::new(480.0, 360.0)),
            ZoomBounds::default(),
        )
    }

    #[test]
    fn move_without_down_is_ignored() {
        let mut ctrl = InteractionController::new();
        assert!(ctrl.pointer_move(Vec2::new(10.0, 10.0)).is_none());
        assert!(!ctrl.is_dragging());
    }

    #[test]
    fn drag_maps_pointer_delta_to_rotation() {
        let mut ctrl = InteractionController::new();
        let mut v = view();

        ctrl.pointer_down(Vec2::new(100.0, 100.0), &v);
        assert!(ctrl.is_dragging());

        // +30 px right, +10 px down: lambda grows, phi shrinks.
        let cmd = ctrl
            .pointer_move(Vec2::new(130.0, 110.0))
            .expect("dragging");
        v.apply(cmd);
        assert_eq!(v.projection.rotate_lambda_deg, -139.0 + 30.0);
        assert_eq!(v.projection.rotate_phi_deg, -35.0 - 10.0);

        ctrl.pointer_up();
        assert!(ctrl.pointer_move(Vec2::new(200.0, 200.0)).is_none());
    }

    #[test]
    fn drag_rotation_is_absolute_from_subject() {
        let mut ctrl = InteractionController::new();
        let mut v = view();
        ctrl.pointer_down(Vec2::new(0.0, 0.0), &v);

        // Two moves to the same position produce the same rotation.
        let first = ctrl.pointer_move(Vec2::new(50.0, 0.0)).expect("dragging");
        v.apply(first);
        let second = ctrl.pointer_move(Vec2::new(50.0, 0.0)).expect("dragging");
        assert_eq!(Some(first), Some(second));
    }

    #[test]
    fn wheel_up_zooms_in_wheel_down_zooms_out() {
        let ctrl = InteractionController::new();
        let mut v = view();

        let zoom_in = ctrl.wheel(-500.0, Vec2::new(480.0, 360.0), &v);
        let ViewCommand::ZoomTo { scale_k, .. } = zoom_in else {
            panic!("expected ZoomTo");
        };
        assert!(scale_k > 1.0);
        v.apply(zoom_in);

        let zoom_out = ctrl.wheel(500.0, Vec2::new(480.0, 360.0), &v);
        let ViewCommand::ZoomTo { scale_k, .. } = zoom_out else {
            panic!("expected ZoomTo");
        };
        assert!(scale_k < v.transform.scale_k);
    }

    #[test]
    fn repeated_wheel_out_pins_at_lower_bound() {
        let ctrl = InteractionController::new();
        let mut v = view();
        for _ in 0..50 {
            let cmd = ctrl.wheel(1000.0, Vec2::new(0.0, 0.0), &v);
            v.apply(cmd);
        }
        assert_eq!(v.transform.scale_k, 1.0);
    }
}
