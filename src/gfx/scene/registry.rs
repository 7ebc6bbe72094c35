use crate::gfx::picking::InteractionManager;

use super::{object::Object, scene::Scene, ObjectId};

/// Objects spawned by the user, in spawn order
///
/// The registry is the single owner of "what is resident": everything in it
/// is attached to the scene, registered for picking and animated each frame.
/// [`add`](Self::add) and [`clear`](Self::clear) keep the three in step.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    resident: Vec<ObjectId>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `object`, registers it for picking and starts animating it
    pub fn add(
        &mut self,
        object: Object,
        scene: &mut Scene,
        interactions: &mut InteractionManager,
    ) -> ObjectId {
        let name = object.name.clone();
        let id = scene.attach(object);
        interactions.add(id);
        self.resident.push(id);

        log::info!("Added {} {} ({} resident)", name, id, self.resident.len());
        id
    }

    /// Detaches every resident object and returns how many were removed
    pub fn clear(&mut self, scene: &mut Scene, interactions: &mut InteractionManager) -> usize {
        let removed = self.resident.len();
        for id in self.resident.drain(..) {
            interactions.remove(id);
            if scene.detach(id).is_none() {
                log::warn!("Resident object {} was already detached", id);
            }
        }

        log::info!("Cleared {} objects", removed);
        removed
    }

    /// Advances the X and Y rotation of every resident object by `step` radians
    pub fn animate(&self, scene: &mut Scene, step: f32) {
        for &id in &self.resident {
            if let Some(object) = scene.get_mut(id) {
                object.rotate_xy(step, step);
            }
        }
    }

    pub fn ids(&self) -> &[ObjectId] {
        &self.resident
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.resident.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.resident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shapes::{create_box, create_room};

    #[test]
    fn test_add_links_scene_picking_and_animation() {
        let mut scene = Scene::default();
        let mut interactions = InteractionManager::new();
        let mut registry = SceneRegistry::new();

        let id = registry.add(create_box(1.0, 1.0, 1.0), &mut scene, &mut interactions);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(id));
        assert!(scene.contains(id));
        assert!(interactions.contains(id));

        registry.animate(&mut scene, 0.01);
        let rotation = scene.get(id).unwrap().rotation;
        assert!((rotation.x - 0.01).abs() < 1e-6);
        assert!((rotation.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut scene = Scene::default();
        let mut interactions = InteractionManager::new();
        let mut registry = SceneRegistry::new();

        for _ in 0..3 {
            registry.add(create_box(1.0, 1.0, 1.0), &mut scene, &mut interactions);
        }
        assert_eq!(registry.len(), 3);
        assert_eq!(scene.object_ids(), registry.ids());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut scene = Scene::default();
        let mut interactions = InteractionManager::new();
        let mut registry = SceneRegistry::new();

        let ids = vec![
            registry.add(create_box(1.0, 1.0, 1.0), &mut scene, &mut interactions),
            registry.add(create_room(10.0, 10.0, 10.0, 0.5), &mut scene, &mut interactions),
        ];

        assert_eq!(registry.clear(&mut scene, &mut interactions), 2);
        assert!(registry.is_empty());
        assert!(interactions.is_empty());
        assert_eq!(scene.object_count(), 0);
        for id in ids {
            assert!(!scene.contains(id));
            assert!(!interactions.contains(id));
        }

        // Clearing an empty registry is a no-op
        assert_eq!(registry.clear(&mut scene, &mut interactions), 0);
    }

    #[test]
    fn test_cleared_objects_stop_animating() {
        let mut scene = Scene::default();
        let mut interactions = InteractionManager::new();
        let mut registry = SceneRegistry::new();

        let id = registry.add(create_box(1.0, 1.0, 1.0), &mut scene, &mut interactions);
        registry.clear(&mut scene, &mut interactions);

        // Put the object back behind the registry's back; it must not rotate
        let stray = scene.attach(create_box(1.0, 1.0, 1.0));
        registry.animate(&mut scene, 0.01);
        assert_ne!(stray, id);
        assert_eq!(scene.get(stray).unwrap().rotation.x, 0.0);
    }
}
