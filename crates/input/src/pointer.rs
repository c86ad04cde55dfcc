use crate::action::CameraAction;
use glam::Vec2;

/// Mouse buttons the camera cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Orbit.
    Primary,
    /// Pan.
    Secondary,
    /// Dolly by vertical drag.
    Middle,
}

/// Tracks held buttons and the last pointer position, turning raw pointer
/// events into [`CameraAction`]s.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    held: Option<PointerButton>,
    last: Option<Vec2>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A button went down. The first held button decides the drag mode.
    pub fn press(&mut self, button: PointerButton) {
        if self.held.is_none() {
            tracing::trace!(?button, "drag started");
            self.held = Some(button);
        }
    }

    pub fn release(&mut self, button: PointerButton) {
        if self.held == Some(button) {
            self.held = None;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.held.is_some()
    }

    /// Pointer moved to `pos` (logical pixels). Emits a drag action if a
    /// button is held and a previous position is known.
    pub fn move_to(&mut self, pos: Vec2) -> Option<CameraAction> {
        let previous = self.last.replace(pos);
        let delta = pos - previous?;
        let action = match self.held? {
            PointerButton::Primary => CameraAction::Orbit {
                dx: delta.x,
                dy: delta.y,
            },
            PointerButton::Secondary => CameraAction::Pan {
                dx: delta.x,
                dy: delta.y,
            },
            PointerButton::Middle => CameraAction::Zoom { delta: delta.y },
        };
        (!action.is_noop()).then_some(action)
    }

    /// Wheel scrolled by `delta_y`; positive scrolls toward the user.
    pub fn scroll(&mut self, delta_y: f32) -> Option<CameraAction> {
        let action = CameraAction::Zoom { delta: delta_y };
        (!action.is_noop()).then_some(action)
    }

    /// Pointer left the window: forget the position and any held button.
    pub fn reset(&mut self) {
        self.held = None;
        self.last = None;
    }
}
