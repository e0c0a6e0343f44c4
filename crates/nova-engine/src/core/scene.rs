use glam::Mat4;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Parent chains longer than this are treated as cycles and cut off.
const MAX_HIERARCHY_DEPTH: usize = 32;

/// Simple entity storage using a flat Vec.
/// Designed for small-to-medium entity counts (hundreds, not millions).
/// Parenting is by id lookup, so pivots and their children can be spawned in any order.
#[derive(Debug)]
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    /// Children keep their parent id and become orphans (rendered at the origin frame).
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.swap_remove(idx))
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Set the visibility flag of every listed entity.
    /// Done in one call so no rendered frame can observe a partial subset.
    pub fn set_visible_all(&mut self, ids: &[EntityId], visible: bool) {
        for entity in self.entities.iter_mut() {
            if ids.contains(&entity.id) {
                entity.visible = visible;
            }
        }
    }

    /// Whether the entity and every ancestor are visible.
    /// Unknown ids are not visible; a dangling parent id is treated as a root.
    pub fn is_visible_in_hierarchy(&self, id: EntityId) -> bool {
        let mut current = match self.get(id) {
            Some(e) => e,
            None => return false,
        };
        for _ in 0..MAX_HIERARCHY_DEPTH {
            if !current.visible {
                return false;
            }
            match current.parent.and_then(|p| self.get(p)) {
                Some(parent) => current = parent,
                None => return true,
            }
        }
        true
    }

    /// Local-to-world transform of an entity, composed through its pivots.
    pub fn world_matrix(&self, id: EntityId) -> Option<Mat4> {
        let mut current = self.get(id)?;
        let mut matrix = current.local_matrix();
        for _ in 0..MAX_HIERARCHY_DEPTH {
            match current.parent.and_then(|p| self.get(p)) {
                Some(parent) => {
                    matrix = parent.local_matrix() * matrix;
                    current = parent;
                }
                None => break,
            }
        }
        Some(matrix)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id).with_pos(Vec3::new(10.0, 20.0, 30.0)));
        let e = scene.get(id).unwrap();
        assert_eq!(e.pos, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn despawn_removes_entity() {
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id));
        assert_eq!(scene.len(), 1);
        scene.despawn(id);
        assert!(scene.is_empty());
        assert!(scene.despawn(id).is_none());
    }

    #[test]
    fn hidden_pivot_hides_children() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).hidden());
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)));
        assert!(!scene.is_visible_in_hierarchy(EntityId(2)));

        scene.set_visible_all(&[EntityId(1)], true);
        assert!(scene.is_visible_in_hierarchy(EntityId(2)));
        assert!(!scene.is_visible_in_hierarchy(EntityId(99)));
    }

    #[test]
    fn world_matrix_composes_pivot_rotation() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_rotation(Vec3::new(0.0, std::f32::consts::PI, 0.0)),
        );
        scene.spawn(
            Entity::new(EntityId(2))
                .with_parent(EntityId(1))
                .with_pos(Vec3::new(20.0, 3.0, 0.0)),
        );
        let world = scene.world_matrix(EntityId(2)).unwrap().transform_point3(Vec3::ZERO);
        assert!((world.x + 20.0).abs() < 1e-3);
        assert!((world.y - 3.0).abs() < 1e-3);
    }

    #[test]
    fn parent_cycle_terminates() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_parent(EntityId(2)));
        scene.spawn(Entity::new(EntityId(2)).with_parent(EntityId(1)));
        assert!(scene.world_matrix(EntityId(1)).is_some());
        assert!(scene.is_visible_in_hierarchy(EntityId(1)));
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Entity::new(EntityId(1)).with_tag("stars"));
        scene.spawn(Entity::new(EntityId(2)).with_tag("meteor"));
        assert_eq!(scene.find_by_tag("stars").unwrap().id, EntityId(1));
        assert_eq!(scene.find_by_tag("meteor").unwrap().id, EntityId(2));
        assert!(scene.find_by_tag("flash").is_none());
    }
}
