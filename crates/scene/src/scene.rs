use crate::environment::EnvironmentMap;
use crate::geometry::Geometry;
use crate::material::PhysicalMaterial;
use glam::Vec3;
use glasslab_common::{MaterialHandle, MeshId, Transform};
use std::sync::Arc;

/// A renderable node: immutable geometry, a material handle, a transform.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    geometry: Geometry,
    pub material: MaterialHandle,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: Geometry, material: MaterialHandle) -> Self {
        Self {
            name: name.into(),
            geometry,
            material,
            transform: Transform::default(),
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

/// Scene container: owns meshes, materials and the optional environment.
///
/// # Invariants
/// - Materials are owned here; meshes refer to them by handle only.
/// - `background` and `environment` are either both unset or both set.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    materials: Vec<PhysicalMaterial>,
    background: Option<Arc<EnvironmentMap>>,
    environment: Option<Arc<EnvironmentMap>>,
    camera_registered: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return the handle meshes use to share it.
    pub fn add_material(&mut self, material: PhysicalMaterial) -> MaterialHandle {
        self.materials.push(material);
        MaterialHandle(self.materials.len() - 1)
    }

    /// Append a mesh. Insertion order is draw order.
    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        debug_assert!(
            mesh.material.0 < self.materials.len(),
            "mesh {} references unknown material {:?}",
            mesh.name,
            mesh.material
        );
        tracing::debug!(
            name = %mesh.name,
            triangles = mesh.geometry().triangle_count(),
            "mesh added to scene"
        );
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// Mark the viewing camera as part of the scene graph.
    pub fn register_camera(&mut self) {
        self.camera_registered = true;
    }

    pub fn has_camera(&self) -> bool {
        self.camera_registered
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&PhysicalMaterial> {
        self.materials.get(handle.0)
    }

    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut PhysicalMaterial> {
        self.materials.get_mut(handle.0)
    }

    /// The material a mesh renders with.
    pub fn material_of(&self, id: MeshId) -> Option<&PhysicalMaterial> {
        self.mesh(id).and_then(|m| self.material(m.material))
    }

    pub fn materials(&self) -> &[PhysicalMaterial] {
        &self.materials
    }

    /// Install an environment map as both background and lighting source.
    ///
    /// The first installation wins; later calls leave the scene untouched and
    /// return `false`.
    pub fn install_environment(&mut self, map: EnvironmentMap) -> bool {
        if self.environment.is_some() {
            tracing::debug!("environment already installed, ignoring");
            return false;
        }
        let map = Arc::new(map);
        self.background = Some(Arc::clone(&map));
        self.environment = Some(map);
        true
    }

    pub fn background(&self) -> Option<&Arc<EnvironmentMap>> {
        self.background.as_ref()
    }

    pub fn environment(&self) -> Option<&Arc<EnvironmentMap>> {
        self.environment.as_ref()
    }

    pub fn has_environment(&self) -> bool {
        self.environment.is_some()
    }
}
