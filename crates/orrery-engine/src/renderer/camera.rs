use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use crate::systems::raycast::Ray;

/// Size of the render surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Surface-local pixels to normalized device coordinates in [-1, 1],
    /// Y pointing up.
    pub fn to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.width) * 2.0 - 1.0,
            -(y / self.height) * 2.0 + 1.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// A world-space point projected onto the surface.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Surface-local pixel position.
    pub pos: Vec2,
    /// Distance in front of the camera along its view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// Perspective camera looking from `position` at `target`, Y up.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_deg,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Track a new surface size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Pixels per world unit at unit depth for a surface of `height` pixels.
    pub fn focal_length_px(&self, height: f32) -> f32 {
        (height * 0.5) / (self.fov_deg.to_radians() * 0.5).tan()
    }

    /// Project a world point to surface pixels. `None` when the point is
    /// behind the near plane or beyond the far plane.
    pub fn project(&self, world: Vec3, viewport: Viewport) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let scale = self.focal_length_px(viewport.height) / depth;
        Some(Projection {
            pos: Vec2::new(
                viewport.width * 0.5 + view.x * scale,
                viewport.height * 0.5 - view.y * scale,
            ),
            depth,
            scale,
        })
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 4.0 / 3.0, 0.1, 1000.0)
    }
}
