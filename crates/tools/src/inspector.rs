use glam::Vec3;
use glasslab_scene::Scene;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against the scene for the debug panel and logs.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene state.
    pub fn summary(scene: &Scene, elapsed: f32, camera_position: Vec3) -> SceneSummary {
        SceneSummary {
            mesh_count: scene.mesh_count(),
            material_count: scene.materials().len(),
            triangle_count: scene
                .meshes()
                .iter()
                .map(|m| m.geometry().triangle_count())
                .sum(),
            environment: scene
                .environment()
                .map(|env| (env.width, env.height)),
            elapsed,
            camera_position,
        }
    }

    /// Draw the summary as labels.
    pub fn show(ui: &mut egui::Ui, summary: &SceneSummary) {
        ui.label(format!(
            "Meshes: {}  Materials: {}  Triangles: {}",
            summary.mesh_count, summary.material_count, summary.triangle_count
        ));
        match summary.environment {
            Some((w, h)) => ui.label(format!("Environment: {w}x{h}")),
            None => ui.label("Environment: loading"),
        };
        ui.label(format!("Elapsed: {:.1}s", summary.elapsed));
        let p = summary.camera_position;
        ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
    }
}

/// Summary of scene state for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub mesh_count: usize,
    pub material_count: usize,
    pub triangle_count: usize,
    /// Environment dimensions once installed.
    pub environment: Option<(u32, u32)>,
    pub elapsed: f32,
    pub camera_position: Vec3,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: meshes={} materials={} triangles={} environment=",
            self.mesh_count, self.material_count, self.triangle_count
        )?;
        match self.environment {
            Some((w, h)) => write!(f, "{w}x{h}")?,
            None => f.write_str("none")?,
        }
        write!(f, " elapsed={:.2}s", self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glasslab_scene::{DemoScene, EnvironmentMap};

    #[test]
    fn summary_empty_scene() {
        let summary = SceneInspector::summary(&Scene::new(), 0.0, Vec3::ZERO);
        assert_eq!(summary.mesh_count, 0);
        assert_eq!(summary.triangle_count, 0);
        assert!(summary.environment.is_none());
    }

    #[test]
    fn summary_demo_scene() {
        let demo = DemoScene::build();
        let summary = SceneInspector::summary(&demo.scene, 1.5, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(summary.mesh_count, 3);
        assert_eq!(summary.material_count, 1);
        let expected: usize = demo
            .scene
            .meshes()
            .iter()
            .map(|m| m.geometry().triangle_count())
            .sum();
        assert_eq!(summary.triangle_count, expected);
        assert_eq!(summary.camera_position, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn summary_reports_environment() {
        let mut scene = Scene::new();
        scene.install_environment(EnvironmentMap::new(2, 1, vec![0.0; 8]));
        let summary = SceneInspector::summary(&scene, 0.0, Vec3::ZERO);
        assert_eq!(summary.environment, Some((2, 1)));
    }

    #[test]
    fn summary_display() {
        let summary = SceneInspector::summary(&Scene::new(), 2.0, Vec3::ZERO);
        let s = format!("{summary}");
        assert!(s.contains("meshes=0"));
        assert!(s.contains("environment=none"));
        assert!(s.contains("elapsed=2.00s"));
    }
}
