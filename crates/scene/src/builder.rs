use crate::geometry::Geometry;
use crate::material::PhysicalMaterial;
use crate::scene::{Mesh, Scene};
use glam::Vec3;
use glasslab_common::{MaterialHandle, MeshId};

pub const SPHERE_RADIUS: f32 = 0.5;
pub const SPHERE_SEGMENTS: (u32, u32) = (64, 64);
pub const PLANE_SIZE: (f32, f32) = (1.0, 1.0);
pub const PLANE_SEGMENTS: (u32, u32) = (100, 100);
pub const TORUS_RADIUS: f32 = 0.5;
pub const TORUS_TUBE: f32 = 0.2;
pub const TORUS_SEGMENTS: (u32, u32) = (64, 128);

/// The demo scene plus handles to everything the app touches afterwards.
#[derive(Debug)]
pub struct DemoScene {
    pub scene: Scene,
    pub material: MaterialHandle,
    pub sphere: MeshId,
    pub plane: MeshId,
    pub torus: MeshId,
}

impl DemoScene {
    /// Sphere at the origin, plane at x=-2, torus at x=+2, all sharing one
    /// clear-glass material.
    pub fn build() -> Self {
        let mut scene = Scene::new();
        let material = scene.add_material(PhysicalMaterial::clear_glass());

        let sphere = scene.add(Mesh::new(
            "sphere",
            Geometry::sphere(SPHERE_RADIUS, SPHERE_SEGMENTS.0, SPHERE_SEGMENTS.1),
            material,
        ));
        let plane = scene.add(
            Mesh::new(
                "plane",
                Geometry::plane(
                    PLANE_SIZE.0,
                    PLANE_SIZE.1,
                    PLANE_SEGMENTS.0,
                    PLANE_SEGMENTS.1,
                ),
                material,
            )
            .with_position(Vec3::new(-2.0, 0.0, 0.0)),
        );
        let torus = scene.add(
            Mesh::new(
                "torus",
                Geometry::torus(TORUS_RADIUS, TORUS_TUBE, TORUS_SEGMENTS.0, TORUS_SEGMENTS.1),
                material,
            )
            .with_position(Vec3::new(2.0, 0.0, 0.0)),
        );

        tracing::info!(meshes = scene.mesh_count(), "demo scene built");

        Self {
            scene,
            material,
            sphere,
            plane,
            torus,
        }
    }

    pub fn mesh_ids(&self) -> [MeshId; 3] {
        [self.sphere, self.plane, self.torus]
    }
}
