use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use crate::input::queue::InputEvent;
use crate::renderer::camera::{PerspectiveCamera, Viewport};

/// Keeps the camera off the poles, where azimuth becomes undefined.
const POLE_EPSILON: f32 = 1e-6;
/// Zoom multiplier per wheel notch at `zoom_speed = 1`.
const ZOOM_BASE: f32 = 0.95;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enabled: bool,
    /// Fraction of the pending rotation applied per update (0 = no damping).
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::MAX,
        }
    }
}

/// Radius / polar angle from +Y / azimuth around Y measured from +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_r = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_r * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_r * self.theta.cos(),
        )
    }
}

/// Orbit-drag camera navigation around a target point, with inertia.
///
/// Pointer drags and wheel notches accumulate into pending deltas;
/// `update` applies a damped share of them to the camera each frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub config: ControlsConfig,
    pub target: Vec3,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    drag_from: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig) -> Self {
        Self {
            config,
            target: Vec3::ZERO,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            drag_from: None,
        }
    }

    /// Feed one input event. Returns true when the event was consumed.
    pub fn handle(&mut self, event: &InputEvent, viewport: Viewport) -> bool {
        if !self.config.enabled {
            return false;
        }
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.drag_from = Some(Vec2::new(x, y));
                true
            }
            InputEvent::PointerMove { x, y, .. } => {
                let Some(from) = self.drag_from else {
                    return false;
                };
                let delta = Vec2::new(x, y) - from;
                // A drag across the full surface height is one full turn.
                let per_px = std::f32::consts::TAU / viewport.height * self.config.rotate_speed;
                self.pending_theta -= delta.x * per_px;
                self.pending_phi -= delta.y * per_px;
                self.drag_from = Some(Vec2::new(x, y));
                true
            }
            InputEvent::PointerUp { .. } => self.drag_from.take().is_some(),
            InputEvent::Wheel { delta_y } => {
                let step = ZOOM_BASE.powf(self.config.zoom_speed);
                if delta_y < 0.0 {
                    self.pending_scale *= step;
                } else if delta_y > 0.0 {
                    self.pending_scale /= step;
                }
                true
            }
            _ => false,
        }
    }

    /// Advance the camera by one frame of damped motion.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let mut spherical = Spherical::from_offset(camera.position - self.target);
        let damping = self.config.damping_factor;
        let share = if damping > 0.0 { damping } else { 1.0 };

        spherical.theta += self.pending_theta * share;
        spherical.phi += self.pending_phi * share;
        spherical.phi = spherical.phi.clamp(POLE_EPSILON, std::f32::consts::PI - POLE_EPSILON);
        // Inverted limits resolve to max_distance instead of panicking.
        spherical.radius = (spherical.radius * self.pending_scale)
            .max(self.config.min_distance)
            .min(self.config.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if damping > 0.0 {
            self.pending_theta *= 1.0 - damping;
            self.pending_phi *= 1.0 - damping;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.pending_scale = 1.0;
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new(ControlsConfig::default())
    }
}
