//! Developer tooling: the material debug panel and a read-only scene inspector.
//!
//! # Invariants
//! - The panel edits the scene-owned material through its handle, so every
//!   mesh sharing it sees the change on the next draw.
//! - Slider values never leave their documented range.

mod inspector;
mod panel;

pub use inspector::{SceneInspector, SceneSummary};
pub use panel::MaterialPanel;

pub fn crate_info() -> &'static str {
    "glasslab-tools v0.1.0"
}
