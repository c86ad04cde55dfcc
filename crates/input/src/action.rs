/// A high-level camera action produced from pointer input.
///
/// Deltas are in logical pixels; the controls convert them to angles and
/// distances using the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Rotate around the orbit target.
    Orbit { dx: f32, dy: f32 },
    /// Slide the orbit target in screen space.
    Pan { dx: f32, dy: f32 },
    /// Move toward (negative) or away from (positive) the target.
    Zoom { delta: f32 },
}

impl CameraAction {
    /// True for actions that carry no movement.
    pub fn is_noop(&self) -> bool {
        match *self {
            CameraAction::Orbit { dx, dy } | CameraAction::Pan { dx, dy } => dx == 0.0 && dy == 0.0,
            CameraAction::Zoom { delta } => delta == 0.0,
        }
    }
}
