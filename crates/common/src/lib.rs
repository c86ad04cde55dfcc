//! Shared value types used across the glasslab crates.

mod types;

pub use types::{MaterialHandle, MeshId, Transform};
