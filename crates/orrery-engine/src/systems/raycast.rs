//! Ray casting against scene meshes, for pointer picking.

use glam::{Vec2, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::Geometry;
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;

/// Half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the nearest sphere surface point, if hit.
    /// A ray starting inside the sphere hits the far surface.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        let t0 = -b - root;
        let t1 = -b + root;
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }
}

/// A ray hit on an entity's mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub entity: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// Picks meshes under a ray, limited to `[near, far]` along it.
#[derive(Debug, Clone)]
pub struct Raycaster {
    pub ray: Ray,
    pub near: f32,
    pub far: f32,
}

impl Raycaster {
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            near: 0.0,
            far: f32::INFINITY,
        }
    }

    /// Ray from the camera through `ndc` (normalized device coordinates).
    pub fn from_camera(camera: &PerspectiveCamera, ndc: Vec2) -> Self {
        Self::new(camera.ray_from_ndc(ndc))
    }

    /// Intersect the meshes of `candidates`, nearest first.
    /// Entities that are hidden, missing, or mesh-less are skipped.
    pub fn intersect_entities(&self, scene: &Scene, candidates: &[EntityId]) -> Vec<Intersection> {
        let mut hits: Vec<Intersection> = candidates
            .iter()
            .filter_map(|&id| self.intersect_entity(scene, id))
            .filter(|hit| hit.distance >= self.near && hit.distance <= self.far)
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    /// Nearest hit among `candidates`.
    pub fn nearest(&self, scene: &Scene, candidates: &[EntityId]) -> Option<Intersection> {
        self.intersect_entities(scene, candidates).into_iter().next()
    }

    fn intersect_entity(&self, scene: &Scene, id: EntityId) -> Option<Intersection> {
        let entity = scene.get(id)?;
        let mesh = entity.mesh.as_ref()?;
        if !scene.is_visible(id) {
            return None;
        }
        let world = scene.world_matrix(id)?;

        let distance = match mesh.geometry {
            Geometry::Sphere { radius, .. } => {
                let (scale, _, center) = world.to_scale_rotation_translation();
                self.ray.intersect_sphere(center, radius * scale.max_element())?
            }
            Geometry::Ring { inner_radius, outer_radius, .. } => {
                // Solve in local space where the ring lies in z = 0.
                let inverse = world.inverse();
                let origin = inverse.transform_point3(self.ray.origin);
                let direction = inverse.transform_vector3(self.ray.direction);
                if direction.z.abs() < 1e-9 {
                    return None;
                }
                let t_local = -origin.z / direction.z;
                if t_local < 0.0 {
                    return None;
                }
                let r = (origin + direction * t_local).truncate().length();
                if r < inner_radius || r > outer_radius {
                    return None;
                }
                let world_point = world.transform_point3(origin + direction * t_local);
                (world_point - self.ray.origin).length()
            }
        };

        Some(Intersection {
            entity: id,
            distance,
            point: self.ray.at(distance),
        })
    }
}
