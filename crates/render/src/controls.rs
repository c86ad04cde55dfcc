use crate::camera::PerspectiveCamera;
use glam::Vec3;
use glasslab_input::CameraAction;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Spherical coordinates around the orbit target, Y up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y.
    phi: f32,
    /// Azimuth around Y, zero on +Z.
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Damped orbit controller.
///
/// Input accumulates pending rotation and pan; [`update`](Self::update)
/// applies a `damping_factor` share of it to the camera and decays the rest.
/// `update` must run every frame, input or not, or the motion freezes
/// mid-glide.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pending: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            pending: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    /// Controls orbiting the camera's current target.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        Self {
            target: camera.target,
            ..Self::default()
        }
    }

    /// Same as [`new`](Self::new) with damping switched on.
    pub fn damped(camera: &PerspectiveCamera) -> Self {
        Self {
            enable_damping: true,
            ..Self::new(camera)
        }
    }

    /// Queue a rotation of `angle` radians around the vertical axis.
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending.theta -= angle;
    }

    /// Queue a change of the polar angle by `angle` radians.
    pub fn rotate_up(&mut self, angle: f32) {
        self.pending.phi -= angle;
    }

    /// Scale the orbit radius by `1 / factor` on the next update.
    pub fn dolly_out(&mut self, factor: f32) {
        self.scale /= factor;
    }

    /// Scale the orbit radius by `factor` on the next update.
    pub fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Translate a pointer-level action into pending camera motion.
    ///
    /// `viewport_height` is in the same units as the action's deltas.
    pub fn handle(
        &mut self,
        action: CameraAction,
        camera: &PerspectiveCamera,
        viewport_height: f32,
    ) {
        let height = viewport_height.max(1.0);
        match action {
            CameraAction::Orbit { dx, dy } => {
                self.rotate_left(TAU * dx * self.rotate_speed / height);
                self.rotate_up(TAU * dy * self.rotate_speed / height);
            }
            CameraAction::Pan { dx, dy } => {
                let distance = (camera.position - self.target).length()
                    * (camera.fov_degrees.to_radians() / 2.0).tan();
                let left = 2.0 * dx * self.pan_speed * distance / height;
                let up = 2.0 * dy * self.pan_speed * distance / height;
                self.pan_offset += camera.right() * -left;
                self.pan_offset += camera.up() * up;
            }
            CameraAction::Zoom { delta } => {
                if delta < 0.0 {
                    self.dolly_in(self.zoom_scale());
                } else if delta > 0.0 {
                    self.dolly_out(self.zoom_scale());
                }
            }
        }
    }

    /// Apply pending motion to the camera. Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        if self.enable_damping {
            spherical.theta += self.pending.theta * self.damping_factor;
            spherical.phi += self.pending.phi * self.damping_factor;
        } else {
            spherical.theta += self.pending.theta;
            spherical.phi += self.pending.phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        spherical.radius =
            (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        if self.enable_damping {
            self.target += self.pan_offset * self.damping_factor;
        } else {
            self.target += self.pan_offset;
        }

        let old_position = camera.position;
        let old_target = camera.target;
        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.pending.theta *= decay;
            self.pending.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.pending = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        old_position.distance_squared(camera.position) > EPS
            || old_target.distance_squared(camera.target) > EPS
    }

    /// True while damped motion is still gliding.
    pub fn is_settling(&self) -> bool {
        self.pending.theta.abs() > EPS
            || self.pending.phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS * EPS
    }
}
