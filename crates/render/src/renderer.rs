use crate::camera::PerspectiveCamera;
use glasslab_scene::Scene;
use std::fmt::Write;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the scene and camera and produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Draw the full scene through `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Text renderer: a human-readable dump of what a frame would draw.
///
/// Useful for logging and for exercising the frame loop without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} (meshes={}, camera={}, environment={}) ===",
            self.frames,
            scene.mesh_count(),
            if scene.has_camera() { "registered" } else { "none" },
            if scene.has_environment() { "set" } else { "unset" }
        );
        let _ = writeln!(
            out,
            "Camera: pos=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fov_degrees,
            camera.aspect
        );

        for mesh in scene.meshes() {
            let p = mesh.transform.position;
            let r = mesh.transform.rotation;
            let _ = write!(
                out,
                "  {:<8} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}) tris={}",
                mesh.name,
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                mesh.geometry().triangle_count()
            );
            if let Some(m) = scene.material(mesh.material) {
                let _ = write!(
                    out,
                    " material#{} metal={:.4} rough={:.4} trans={:.4} ior={:.4} thick={:.4}",
                    mesh.material.0, m.metalness, m.roughness, m.transmission, m.ior, m.thickness
                );
            }
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glasslab_scene::{DemoScene, EnvironmentMap};

    #[test]
    fn empty_scene() {
        let scene = Scene::new();
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &PerspectiveCamera::default());
        assert!(output.contains("meshes=0"));
        assert!(output.contains("environment=unset"));
        assert!(output.contains("camera=none"));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn demo_scene_lists_meshes_with_shared_material() {
        let mut demo = DemoScene::build();
        demo.scene.register_camera();
        demo.scene.material_mut(demo.material).unwrap().metalness = 0.4321;
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&demo.scene, &PerspectiveCamera::demo(1.0));

        assert!(output.contains("meshes=3"));
        assert!(output.contains("camera=registered"));
        for name in ["sphere", "plane", "torus"] {
            assert!(output.contains(name));
        }
        assert_eq!(output.matches("metal=0.4321").count(), 3);
        assert_eq!(output.matches("material#0").count(), 3);
    }

    #[test]
    fn environment_shows_once_installed() {
        let mut scene = Scene::new();
        scene.install_environment(EnvironmentMap::new(1, 1, vec![1.0; 4]));
        let output = DebugTextRenderer::new().render(&scene, &PerspectiveCamera::default());
        assert!(output.contains("environment=set"));
    }
}
