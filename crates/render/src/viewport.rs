use crate::camera::PerspectiveCamera;

/// Ceiling on device pixels per logical pixel for the output surface.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// The pixel ratio actually used for a display reporting `device_ratio`.
///
/// Non-positive or non-finite ratios fall back to 1.
pub fn clamp_pixel_ratio(device_ratio: f64) -> f64 {
    if device_ratio.is_finite() && device_ratio > 0.0 {
        device_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Size of the drawing surface in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Result of feeding a resize event to the [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    pub surface: SurfaceSize,
    /// False when the event repeated the current state.
    pub changed: bool,
}

/// Logical window size and pixel ratio driving the camera and surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    pixel_ratio: f64,
}

impl Viewport {
    /// `width`/`height` in logical pixels; zero is treated as one.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        (self.width / self.height) as f32
    }

    /// Physical surface size. Rounded, since logical sizes reported by the
    /// window system are physical sizes divided by the scale factor.
    pub fn surface_size(&self) -> SurfaceSize {
        SurfaceSize {
            width: ((self.width * self.pixel_ratio).round() as u32).max(1),
            height: ((self.height * self.pixel_ratio).round() as u32).max(1),
        }
    }

    /// Push the viewport's aspect into the camera and rebuild its projection.
    pub fn apply_to_camera(&self, camera: &mut PerspectiveCamera) {
        camera.aspect = self.aspect();
        camera.update_projection_matrix();
    }

    /// Handle a host resize: record the size, update the camera, and report
    /// the surface size to configure.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        device_pixel_ratio: f64,
        camera: &mut PerspectiveCamera,
    ) -> Resize {
        let next = Self::new(width, height, device_pixel_ratio);
        let changed = next != *self;
        *self = next;
        self.apply_to_camera(camera);
        if changed {
            tracing::debug!(
                width = self.width,
                height = self.height,
                pixel_ratio = self.pixel_ratio,
                "viewport resized"
            );
        }
        Resize {
            surface: self.surface_size(),
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_capped_at_two() {
        for r in [0.5, 1.0, 1.25, 2.0, 2.5, 3.0, 4.0] {
            assert_eq!(clamp_pixel_ratio(r), r.min(2.0));
        }
    }

    #[test]
    fn bogus_pixel_ratio_falls_back() {
        assert_eq!(clamp_pixel_ratio(0.0), 1.0);
        assert_eq!(clamp_pixel_ratio(-2.0), 1.0);
        assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
    }

    #[test]
    fn resize_sets_aspect() {
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut viewport = Viewport::new(100.0, 100.0, 1.0);
        viewport.resize(1920.0, 1080.0, 1.0, &mut camera);
        assert_eq!(camera.aspect, (1920.0f64 / 1080.0) as f32);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut viewport = Viewport::new(640.0, 480.0, 1.0);

        let first = viewport.resize(800.0, 600.0, 3.0, &mut camera);
        let projection = camera.projection_matrix();
        let snapshot = viewport;
        let second = viewport.resize(800.0, 600.0, 3.0, &mut camera);

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(first.surface, second.surface);
        assert_eq!(viewport, snapshot);
        assert_eq!(camera.projection_matrix(), projection);
        assert_eq!(camera.aspect, (800.0f64 / 600.0) as f32);
    }

    #[test]
    fn surface_uses_clamped_ratio() {
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut viewport = Viewport::new(1.0, 1.0, 1.0);
        let r = viewport.resize(800.0, 600.0, 3.0, &mut camera);
        assert_eq!(viewport.pixel_ratio(), 2.0);
        assert_eq!(r.surface, SurfaceSize { width: 1600, height: 1200 });

        let r = viewport.resize(800.0, 600.0, 1.5, &mut camera);
        assert_eq!(r.surface, SurfaceSize { width: 1200, height: 900 });
    }

    #[test]
    fn surface_matches_window_at_fractional_scale() {
        for scale in [1.1, 1.25, 1.5, 1.75, 2.0] {
            // One physical pixel is below the one-logical-pixel floor.
            for physical in 2u32..=600 {
                let logical = physical as f64 / scale;
                let viewport = Viewport::new(logical, logical, scale);
                let surface = viewport.surface_size();
                assert_eq!(
                    (surface.width, surface.height),
                    (physical, physical),
                    "scale {scale}"
                );
            }
        }
    }

    #[test]
    fn zero_size_is_clamped() {
        let mut camera = PerspectiveCamera::demo(1.0);
        let mut viewport = Viewport::new(800.0, 600.0, 1.0);
        let r = viewport.resize(0.0, 0.0, 1.0, &mut camera);
        assert_eq!(r.surface, SurfaceSize { width: 1, height: 1 });
        assert_eq!(camera.aspect, 1.0);
        assert!(camera.aspect.is_finite());
    }
}
