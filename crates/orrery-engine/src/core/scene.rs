use glam::Mat4;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::mesh::Color;

/// Guard against accidental parent cycles when walking up the graph.
const MAX_DEPTH: usize = 32;

/// Scene graph stored as a flat Vec; hierarchy lives in `Entity::parent`.
/// Designed for small-to-medium entity counts (hundreds, not millions).
pub struct Scene {
    entities: Vec<Entity>,
    /// Clear color painted behind everything.
    pub background: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            background: Color::BLACK,
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        if let Some(parent) = entity.parent {
            if self.get(parent).is_none() {
                log::warn!("entity {:?} spawned with unknown parent {:?}", entity.id, parent);
            }
        }
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Local-to-world transform, composed up the parent chain.
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        let mut entity = self.get(id)?;
        let mut matrix = entity.local_matrix();
        for _ in 0..MAX_DEPTH {
            let Some(parent_id) = entity.parent else {
                return Some(matrix);
            };
            let Some(parent) = self.get(parent_id) else {
                return Some(matrix);
            };
            matrix = parent.local_matrix() * matrix;
            entity = parent;
        }
        log::warn!("scene graph deeper than {} levels at {:?}", MAX_DEPTH, id);
        Some(matrix)
    }

    /// An entity is visible when it and every ancestor are active.
    pub fn is_visible(&self, id: EntityId) -> bool {
        let mut current = self.get(id);
        for _ in 0..MAX_DEPTH {
            match current {
                None => return true,
                Some(e) if !e.active => return false,
                Some(e) => current = e.parent.and_then(|p| self.get(p)),
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
