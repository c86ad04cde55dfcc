//! Pointer input mapped to camera actions.
//!
//! # Invariants
//! - Consumers see [`CameraAction`]s, never raw window events.
//! - No action is produced without a button held, except wheel zoom.

pub mod action;
pub mod pointer;

pub use action::CameraAction;
pub use pointer::{PointerButton, PointerTracker};
