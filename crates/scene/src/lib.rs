//! Scene model for the glasslab demo: geometry, materials, the environment
//! slot, the demo scene and its per-frame animation.
//!
//! # Invariants
//! - Meshes share materials by handle; the scene is the single owner.
//! - Background and environment are installed together or not at all.
//! - Mesh rotation is a pure function of elapsed time.

pub mod animation;
pub mod builder;
pub mod environment;
pub mod geometry;
pub mod material;
pub mod scene;

pub use animation::spin_meshes;
pub use builder::DemoScene;
pub use environment::{EnvironmentMap, TextureMapping};
pub use geometry::{Geometry, GeometryKind, Vertex};
pub use material::{MaterialParam, PhysicalMaterial};
pub use scene::{Mesh, Scene};
