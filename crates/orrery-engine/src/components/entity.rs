use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::layer::RenderLayer;
use crate::components::mesh::MeshComponent;
use crate::components::points::PointsComponent;

/// Fat Entity: a single struct with optional components.
/// An entity without a mesh or points is an invisible group (pivot).
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities (and their descendants) are skipped when drawing and raycasting.
    pub active: bool,
    /// Parent in the scene graph; local transform is relative to it.
    pub parent: Option<EntityId>,
    /// Position relative to the parent.
    pub position: Vec3,
    /// Euler rotation in radians, applied X then Y then Z (intrinsic).
    pub rotation: Vec3,
    pub scale: Vec3,
    pub layer: RenderLayer,
    pub mesh: Option<MeshComponent>,
    pub points: Option<PointsComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            parent: None,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            layer: RenderLayer::default(),
            mesh: None,
            points: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_points(mut self, points: PointsComponent) -> Self {
        self.points = Some(points);
        self
    }

    pub fn local_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent transform.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.local_rotation(), self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn y_rotation_swings_x_axis_toward_negative_z() {
        let e = Entity::new(EntityId(1)).with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let p = e.local_matrix().transform_point3(Vec3::X);
        assert!(p.x.abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn negative_quarter_turn_about_x_lays_xy_plane_flat() {
        let e = Entity::new(EntityId(1)).with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0));
        let p = e.local_matrix().transform_point3(Vec3::Y);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn translation_applies_after_rotation() {
        let e = Entity::new(EntityId(1))
            .with_position(Vec3::new(5.0, 0.0, 0.0))
            .with_rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0));
        let p = e.local_matrix().transform_point3(Vec3::X);
        assert!((p.x - 4.0).abs() < 1e-5);
    }
}
