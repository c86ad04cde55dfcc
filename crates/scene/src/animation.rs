use crate::scene::Scene;

/// Angular speed about the vertical (Y) axis, radians per second.
pub const SPIN_Y: f32 = 0.1;
/// Angular speed about the horizontal (X) axis, radians per second.
pub const SPIN_X: f32 = -0.15;

/// Set every mesh's rotation from the elapsed time.
///
/// The rotation is a pure function of `elapsed`, so all meshes always share
/// the same orientation regardless of frame rate.
pub fn spin_meshes(scene: &mut Scene, elapsed: f32) {
    let y = elapsed * SPIN_Y;
    let x = elapsed * SPIN_X;
    for mesh in scene.meshes_mut() {
        mesh.transform.rotation.y = y;
        mesh.transform.rotation.x = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DemoScene;

    #[test]
    fn rest_at_time_zero() {
        let mut demo = DemoScene::build();
        spin_meshes(&mut demo.scene, 0.0);
        let r = demo.scene.mesh(demo.sphere).unwrap().transform.rotation;
        assert_eq!((r.x, r.y), (0.0, 0.0));
    }

    #[test]
    fn ten_seconds_in() {
        let mut demo = DemoScene::build();
        spin_meshes(&mut demo.scene, 10.0);
        let r = demo.scene.mesh(demo.sphere).unwrap().transform.rotation;
        assert!((r.x - -1.5).abs() < 1e-6);
        assert!((r.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn all_meshes_share_orientation() {
        let mut demo = DemoScene::build();
        for t in [0.0, 0.016, 1.0, 7.25, 120.5, 3600.0] {
            spin_meshes(&mut demo.scene, t);
            let rotations: Vec<_> = demo
                .scene
                .meshes()
                .iter()
                .map(|m| m.transform.rotation)
                .collect();
            assert!(rotations.windows(2).all(|w| w[0] == w[1]));
            assert_eq!(rotations[0].y, t * 0.1);
            assert_eq!(rotations[0].x, t * -0.15);
        }
    }

    #[test]
    fn positions_are_not_touched() {
        let mut demo = DemoScene::build();
        spin_meshes(&mut demo.scene, 42.0);
        let p = demo.scene.mesh(demo.torus).unwrap().transform.position;
        assert_eq!(p.x, 2.0);
    }
}
