use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::renderer::Renderer;
use glasslab_scene::{Scene, spin_meshes};
use std::time::Instant;

/// Monotonic elapsed-time source. Starts on the first read and is never reset.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Seconds since the first read, measured at `now`.
    ///
    /// A `now` earlier than the start reads as zero.
    pub fn elapsed_at(&mut self, now: Instant) -> f32 {
        let start = *self.start.get_or_insert(now);
        now.saturating_duration_since(start).as_secs_f32()
    }

    pub fn elapsed(&mut self) -> f32 {
        self.elapsed_at(Instant::now())
    }
}

/// The per-frame update-and-draw step.
///
/// Holds the clock and frame counter; the scene, camera, controls and
/// renderer are borrowed per call so the host event loop keeps ownership.
#[derive(Debug, Default)]
pub struct FrameLoop {
    clock: Clock,
    frames: u64,
    elapsed: f32,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame at time `now`: spin the meshes, tick the controls, draw.
    ///
    /// The controls are ticked every frame, with or without input, so damped
    /// motion keeps decaying. Scheduling the next frame is the caller's job.
    pub fn run_frame<R: Renderer>(
        &mut self,
        now: Instant,
        scene: &mut Scene,
        camera: &mut PerspectiveCamera,
        controls: &mut OrbitControls,
        renderer: &mut R,
    ) -> R::Output {
        let elapsed = self.clock.elapsed_at(now);
        spin_meshes(scene, elapsed);
        controls.update(camera);
        let output = renderer.render(scene, camera);

        self.elapsed = elapsed;
        self.frames += 1;
        tracing::trace!(frame = self.frames, elapsed, "frame complete");
        output
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Elapsed seconds as of the last frame.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DebugTextRenderer;
    use glam::Vec3;
    use glasslab_input::CameraAction;
    use glasslab_scene::DemoScene;
    use std::time::Duration;

    /// Captures what the draw call observed.
    #[derive(Default)]
    struct Recorder {
        rotations: Vec<Vec<Vec3>>,
        camera_positions: Vec<Vec3>,
    }

    impl Renderer for Recorder {
        type Output = ();

        fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
            self.rotations
                .push(scene.meshes().iter().map(|m| m.transform.rotation).collect());
            self.camera_positions.push(camera.position);
        }
    }

    #[test]
    fn clock_starts_on_first_read() {
        let mut clock = Clock::new();
        assert!(!clock.is_running());
        let t0 = Instant::now();
        assert_eq!(clock.elapsed_at(t0), 0.0);
        assert!(clock.is_running());
        let e = clock.elapsed_at(t0 + Duration::from_millis(1500));
        assert!((e - 1.5).abs() < 1e-6);
        // Earlier instants never go negative.
        assert_eq!(clock.elapsed_at(t0), 0.0);
    }

    #[test]
    fn first_frame_draws_rest_pose() {
        let mut demo = DemoScene::build();
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut controls = OrbitControls::damped(&camera);
        let mut recorder = Recorder::default();
        let mut frames = FrameLoop::new();

        frames.run_frame(
            Instant::now(),
            &mut demo.scene,
            &mut camera,
            &mut controls,
            &mut recorder,
        );

        assert_eq!(recorder.rotations[0], vec![Vec3::ZERO; 3]);
        assert_eq!(frames.frame_count(), 1);
    }

    #[test]
    fn rotation_follows_elapsed_time() {
        let mut demo = DemoScene::build();
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut controls = OrbitControls::damped(&camera);
        let mut recorder = Recorder::default();
        let mut frames = FrameLoop::new();
        let t0 = Instant::now();

        for secs in [0u64, 1, 10] {
            frames.run_frame(
                t0 + Duration::from_secs(secs),
                &mut demo.scene,
                &mut camera,
                &mut controls,
                &mut recorder,
            );
        }

        let at_ten = &recorder.rotations[2];
        assert!(at_ten.windows(2).all(|w| w[0] == w[1]));
        assert!((at_ten[0].x - -1.5).abs() < 1e-6);
        assert!((at_ten[0].y - 1.0).abs() < 1e-6);
        assert!((frames.elapsed() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn controls_tick_before_draw_even_without_input() {
        let mut demo = DemoScene::build();
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut controls = OrbitControls::damped(&camera);
        let mut recorder = Recorder::default();
        let mut frames = FrameLoop::new();
        let t0 = Instant::now();

        controls.handle(CameraAction::Orbit { dx: 80.0, dy: 0.0 }, &camera, 600.0);
        let start = camera.position;
        for i in 0..5u64 {
            frames.run_frame(
                t0 + Duration::from_millis(16 * i),
                &mut demo.scene,
                &mut camera,
                &mut controls,
                &mut recorder,
            );
        }

        // Every draw saw a camera already moved by that frame's update.
        assert_ne!(recorder.camera_positions[0], start);
        assert!(recorder
            .camera_positions
            .windows(2)
            .all(|w| w[0] != w[1]));
    }

    #[test]
    fn frame_loop_tolerates_missing_environment() {
        let mut demo = DemoScene::build();
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut controls = OrbitControls::damped(&camera);
        let mut renderer = DebugTextRenderer::new();
        let mut frames = FrameLoop::new();

        let out = frames.run_frame(
            Instant::now(),
            &mut demo.scene,
            &mut camera,
            &mut controls,
            &mut renderer,
        );
        assert!(out.contains("environment=unset"));
        assert!(out.contains("meshes=3"));
    }
}
