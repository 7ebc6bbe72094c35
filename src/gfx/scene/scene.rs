use std::fmt;

use crate::{
    gfx::lights::Light,
    palette::{Color, NamedColor},
};

use super::object::Object;

/// Handle to an object attached to a [`Scene`]
///
/// Ids are never reused within one scene, so a stale id simply stops
/// resolving once its object is detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The renderable scene graph: background, lights and attached objects
pub struct Scene {
    pub background: Color,
    lights: Vec<Light>,
    objects: Vec<(ObjectId, Object)>,
    next_id: u64,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            lights: Vec::new(),
            objects: Vec::new(),
            next_id: 0,
        }
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Attaches an object and returns its new id
    pub fn attach(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Detaches an object, handing it back to the caller
    pub fn detach(&mut self, id: ObjectId) -> Option<Object> {
        let index = self.objects.iter().position(|(object_id, _)| *object_id == id)?;
        Some(self.objects.remove(index).1)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|(object_id, _)| *object_id == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects
            .iter()
            .find(|(object_id, _)| *object_id == id)
            .map(|(_, object)| object)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects
            .iter_mut()
            .find(|(object_id, _)| *object_id == id)
            .map(|(_, object)| object)
    }

    /// Attached objects in attachment order
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = (ObjectId, &mut Object)> {
        self.objects.iter_mut().map(|(id, object)| (*id, object))
    }

    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|(id, _)| *id).collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Objects plus lights, i.e. every direct child of the scene root
    pub fn child_count(&self) -> usize {
        self.objects.len() + self.lights.len()
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            light_count: self.lights.len(),
            mesh_count: self.objects.iter().map(|(_, o)| o.mesh_count()).sum(),
            total_triangles: self.objects.iter().map(|(_, o)| o.triangle_count()).sum(),
            total_vertices: self.objects.iter().map(|(_, o)| o.vertex_count()).sum(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(NamedColor::White.color())
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub light_count: usize,
    pub mesh_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::generate_box, lights::create_ambient_light};
    use crate::gfx::resources::material::Material;

    fn cube() -> Object {
        Object::with_mesh("box", generate_box(1.0, 1.0, 1.0), Material::default())
    }

    #[test]
    fn test_attach_and_detach() {
        let mut scene = Scene::default();
        let first = scene.attach(cube());
        let second = scene.attach(cube());
        assert_ne!(first, second);
        assert_eq!(scene.object_ids(), vec![first, second]);

        let detached = scene.detach(first).expect("first object is attached");
        assert_eq!(detached.name, "box");
        assert!(!scene.contains(first));
        assert!(scene.contains(second));
        assert!(scene.detach(first).is_none());

        // Ids are not recycled
        let third = scene.attach(cube());
        assert_ne!(third, first);
    }

    #[test]
    fn test_child_count_includes_lights() {
        let mut scene = Scene::default();
        scene.add_light(create_ambient_light());
        scene.attach(cube());
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.child_count(), 2);
    }

    #[test]
    fn test_statistics() {
        let mut scene = Scene::default();
        scene.attach(cube());
        scene.attach(cube());
        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 2);
        assert_eq!(stats.mesh_count, 2);
        assert_eq!(stats.total_triangles, 24);
        assert_eq!(stats.total_vertices, 48);
    }
}
