//! wgpu render backend for the glass demo.
//!
//! Draws the environment map as a full-screen background, then the scene
//! meshes with a transmissive physical shading model lit by the same map.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Geometry is uploaded once; materials and transforms are read every frame.
//! - Until an environment map is installed, background and lighting use a
//!   flat fallback radiance.

mod gpu;
mod shaders;

pub use gpu::{SurfaceFrame, WgpuRenderer};
