use serde::{Deserialize, Serialize};

/// Linear RGB color, components nominally in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`, clamping each channel.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Multiply every channel by `factor`, clamped to [0, 1].
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh geometry primitive, in the entity's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Sphere centered at the local origin.
    Sphere { radius: f32, segments: u32 },
    /// Flat annulus in the local XY plane, centered at the origin.
    Ring { inner_radius: f32, outer_radius: f32, segments: u32 },
}

impl Geometry {
    pub fn sphere(radius: f32) -> Self {
        Geometry::Sphere { radius, segments: 32 }
    }

    pub fn ring(inner_radius: f32, outer_radius: f32, segments: u32) -> Self {
        Geometry::Ring { inner_radius, outer_radius, segments }
    }
}

/// How a surface responds to scene lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Flat color, ignores lights.
    #[default]
    Unlit,
    /// Diffuse only: ambient plus point lights by surface orientation.
    Lambert,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub shading: Shading,
    /// Render both faces (only meaningful for flat geometry).
    pub double_sided: bool,
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self { color, shading: Shading::Unlit, double_sided: false }
    }

    pub fn lambert(color: Color) -> Self {
        Self { color, shading: Shading::Lambert, double_sided: false }
    }

    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }
}

/// Geometry plus material, the drawable surface of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self { geometry, material }
    }

    /// Bounding radius in local space.
    pub fn bounding_radius(&self) -> f32 {
        match self.geometry {
            Geometry::Sphere { radius, .. } => radius,
            Geometry::Ring { outer_radius, .. } => outer_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_keeps_channels() {
        let c = Color::from_hex(0x6b93d6);
        assert!((c.r - 0x6b as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xd6 as f32 / 255.0).abs() < 1e-6);
        assert_eq!(c.to_hex(), 0x6b93d6);
    }

    #[test]
    fn scaled_clamps_to_unit_range() {
        let c = Color::new(0.5, 0.8, 0.1).scaled(2.0);
        assert_eq!(c, Color::new(1.0, 1.0, 0.2));
    }

    #[test]
    fn ring_bounding_radius_is_outer() {
        let mesh = MeshComponent::new(Geometry::ring(7.95, 8.05, 64), Material::basic(Color::WHITE));
        assert!((mesh.bounding_radius() - 8.05).abs() < 1e-6);
    }
}
