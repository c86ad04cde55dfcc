//! Rendering adapter: renderer-agnostic interface plus the view-side state
//! that every backend shares.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - Camera aspect equals viewport width / height after every resize.
//! - Output pixel ratio never exceeds [`MAX_PIXEL_RATIO`].
//! - Orbit controls are ticked once per frame before the draw.

mod camera;
mod controls;
mod frame;
mod renderer;
mod viewport;

pub use camera::PerspectiveCamera;
pub use controls::OrbitControls;
pub use frame::{Clock, FrameLoop};
pub use renderer::{DebugTextRenderer, Renderer};
pub use viewport::{MAX_PIXEL_RATIO, Resize, SurfaceSize, Viewport, clamp_pixel_ratio};

pub fn crate_info() -> &'static str {
    "glasslab-render v0.1.0"
}
