//! Scene lighting: one ambient term plus any number of point lights.
//!
//! Lights are persistent and stay until explicitly removed.
//! Only `Shading::Lambert` materials respond to them.

use glam::Vec3;
use crate::components::mesh::Color;

/// Omnidirectional light with a finite range.
///
/// Contribution falls off as `(1 - d / range)^decay` and is zero beyond `range`.
/// A `range` of 0 means unlimited (no falloff).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
    pub decay: f32,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            range,
            decay: 2.0,
        }
    }

    /// Intensity multiplier at distance `d` from the light.
    pub fn attenuation(&self, d: f32) -> f32 {
        if self.range <= 0.0 {
            return 1.0;
        }
        (1.0 - d / self.range).clamp(0.0, 1.0).powf(self.decay)
    }
}

/// Manages active lights and the ambient term for the scene.
///
/// The ambient defaults to white at full intensity, which leaves Lambert
/// surfaces at their albedo when no lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: Color,
    ambient_intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: Color::WHITE,
            ambient_intensity: 1.0,
        }
    }

    pub fn add(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    pub fn ambient(&self) -> (Color, f32) {
        (self.ambient, self.ambient_intensity)
    }

    /// Diffuse color of a surface point with albedo `albedo` and unit `normal`.
    pub fn lambert(&self, albedo: Color, point: Vec3, normal: Vec3) -> Color {
        let mut r = self.ambient.r * self.ambient_intensity;
        let mut g = self.ambient.g * self.ambient_intensity;
        let mut b = self.ambient.b * self.ambient_intensity;

        for light in &self.lights {
            let to_light = light.position - point;
            let d = to_light.length();
            let n_dot_l = if d > 1e-6 { normal.dot(to_light / d).max(0.0) } else { 1.0 };
            let k = light.intensity * light.attenuation(d) * n_dot_l;
            r += light.color.r * k;
            g += light.color.g * k;
            b += light.color.b * k;
        }

        Color::new(
            (albedo.r * r).clamp(0.0, 1.0),
            (albedo.g * g).clamp(0.0, 1.0),
            (albedo.b * b).clamp(0.0, 1.0),
        )
    }

    /// Position of the strongest light reaching `point`, if any reaches it.
    pub fn dominant_light(&self, point: Vec3) -> Option<Vec3> {
        self.lights
            .iter()
            .map(|l| (l.position, l.intensity * l.attenuation(l.position.distance(point))))
            .filter(|(_, k)| *k > 0.0)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, _)| p)
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}
