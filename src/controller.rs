//! # Playground Controller
//!
//! [`Playground`] owns everything the user can change: the scene, the
//! registry of spawned objects, picking state and the camera. The UI never
//! mutates it directly; it emits [`Command`]s that go through
//! [`Playground::apply`].

use cgmath::Vector3;

use crate::{
    config::PlaygroundConfig,
    gfx::{
        camera::CameraManager,
        lights::{create_ambient_light, create_point_light},
        picking::{InteractionEvent, InteractionManager},
        resources::material::Material,
        scene::{Object, ObjectId, Scene, SceneRegistry},
        shapes,
    },
    palette::NamedColor,
    ui::PanelState,
};

/// Shapes the panel can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Plane,
    Box,
    Cylinder,
    Cone,
    Torus,
    Room,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Plane,
        ShapeKind::Box,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Torus,
        ShapeKind::Room,
    ];
}

/// A user action issued by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddShape(ShapeKind),
    Clear,
    SetBackground(NamedColor),
}

/// Cursor the window should show after an interaction update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStyle {
    Default,
    Pointer,
}

pub struct Playground {
    config: PlaygroundConfig,
    pub scene: Scene,
    pub registry: SceneRegistry,
    pub interactions: InteractionManager,
    pub camera_manager: CameraManager,
    background: NamedColor,
}

impl Playground {
    /// Empty scene with an ambient light and, if configured, a point light
    pub fn new(config: PlaygroundConfig) -> Self {
        let aspect = config.window.width.max(1) as f32 / config.window.height.max(1) as f32;
        let background = config.scene.background;

        let mut scene = Scene::new(background.color());
        scene.add_light(create_ambient_light());
        if let Some((x, y, z)) = config.scene.point_light {
            scene.add_light(create_point_light(x, y, z));
            log::debug!("Point light at ({}, {}, {})", x, y, z);
        }

        let mut interactions = InteractionManager::new();
        interactions.set_screen_size(config.window.width, config.window.height);

        Self {
            camera_manager: CameraManager::from_config(&config.camera, aspect),
            scene,
            registry: SceneRegistry::new(),
            interactions,
            background,
            config,
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::AddShape(kind) => {
                let object = self.build_shape(kind);
                self.add(object);
            }
            Command::Clear => {
                self.clear();
            }
            Command::SetBackground(color) => self.set_background(color),
        }
    }

    fn build_shape(&self, kind: ShapeKind) -> Object {
        let scene = &self.config.scene;
        match kind {
            ShapeKind::Plane => shapes::create_plane(),
            ShapeKind::Box => {
                let (x, y, z) = scene.box_size;
                shapes::create_box(x, y, z)
            }
            ShapeKind::Cylinder => shapes::create_cylinder(),
            ShapeKind::Cone => shapes::create_cone(),
            ShapeKind::Torus => shapes::create_torus(),
            ShapeKind::Room => {
                let room = scene.room;
                shapes::create_room(room.width, room.depth, room.height, room.thickness)
            }
        }
    }

    pub fn add(&mut self, object: Object) -> ObjectId {
        self.registry
            .add(object, &mut self.scene, &mut self.interactions)
    }

    pub fn clear(&mut self) -> usize {
        self.registry.clear(&mut self.scene, &mut self.interactions)
    }

    pub fn set_background(&mut self, color: NamedColor) {
        self.background = color;
        self.scene.set_background(color.color());
        log::info!("Background set to {}", color);
    }

    pub fn background(&self) -> NamedColor {
        self.background
    }

    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    pub fn object_count_label(&self) -> String {
        format!("Objects: {}", self.object_count())
    }

    pub fn panel_state(&self) -> PanelState {
        PanelState {
            background: self.background,
            object_count_label: self.object_count_label(),
        }
    }

    /// Spins every resident object by the configured step
    pub fn advance_frame(&mut self) {
        self.registry
            .animate(&mut self.scene, self.config.scene.rotation_step);
    }

    /// Runs picking and applies hover and click reactions
    ///
    /// Returns the cursor to show when the hover state changed.
    pub fn update_interactions(&mut self) -> Option<CursorStyle> {
        let events = self
            .interactions
            .update(&self.camera_manager.camera, &self.scene);

        let mut cursor = None;
        for event in events {
            match event {
                InteractionEvent::Hover(id) => {
                    if let Some(object) = self.scene.get_mut(id) {
                        object.set_material(&Material::highlight());
                    }
                    cursor = Some(CursorStyle::Pointer);
                }
                InteractionEvent::Unhover(_) => {
                    cursor = Some(CursorStyle::Default);
                }
                InteractionEvent::Click(id) => {
                    if let Some(object) = self.scene.get(id) {
                        let Vector3 { x, y, z } = object.position;
                        log::info!("Clicked {} {} at ({:.2}, {:.2}, {:.2})", object.name, id, x, y, z);
                    }
                }
            }
        }
        cursor
    }

    /// Keeps the camera aspect and picking in step with the window
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera_manager.resize(width, height);
        self.interactions.set_screen_size(width, height);
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new(PlaygroundConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;

    fn center_pointer(playground: &mut Playground) {
        let window = &playground.config().window;
        let center = (window.width as f32 / 2.0, window.height as f32 / 2.0);
        playground.interactions.set_pointer(Some(center));
    }

    #[test]
    fn test_starts_with_ambient_light_only() {
        let playground = Playground::default();
        assert_eq!(playground.scene.lights().len(), 1);
        assert_eq!(playground.object_count(), 0);
        assert_eq!(playground.object_count_label(), "Objects: 0");
        assert_eq!(playground.scene.background, NamedColor::White.color());
    }

    #[test]
    fn test_configured_point_light_is_added() {
        let playground = Playground::new(PlaygroundConfig::default().with_point_light(5.0, 5.0, 5.0));
        assert_eq!(playground.scene.lights().len(), 2);
    }

    #[test]
    fn test_box_once() {
        let mut playground = Playground::default();
        playground.apply(Command::AddShape(ShapeKind::Box));

        assert_eq!(playground.object_count(), 1);
        assert_eq!(playground.object_count_label(), "Objects: 1");

        let id = playground.registry.ids()[0];
        assert!(playground.scene.contains(id));
        assert!(playground.interactions.contains(id));
    }

    #[test]
    fn test_box_three_times_then_clear() {
        let mut playground = Playground::default();
        for _ in 0..3 {
            playground.apply(Command::AddShape(ShapeKind::Box));
        }
        let ids = playground.registry.ids().to_vec();
        assert_eq!(ids.len(), 3);

        playground.apply(Command::Clear);

        assert_eq!(playground.object_count(), 0);
        assert_eq!(playground.object_count_label(), "Objects: 0");
        for id in ids {
            assert!(!playground.scene.contains(id));
            assert!(!playground.interactions.contains(id));
        }
    }

    #[test]
    fn test_every_shape_kind_spawns() {
        let mut playground = Playground::default();
        for kind in ShapeKind::ALL {
            playground.apply(Command::AddShape(kind));
        }
        assert_eq!(playground.object_count(), ShapeKind::ALL.len());

        let room = playground
            .scene
            .get(playground.registry.ids()[5])
            .expect("room is attached");
        assert_eq!(room.children.len(), 6);
    }

    #[test]
    fn test_set_background() {
        let mut playground = Playground::default();
        playground.apply(Command::SetBackground(NamedColor::Navy));

        assert_eq!(playground.background(), NamedColor::Navy);
        assert_eq!(playground.scene.background, Color::from_hex(0x000080));
        assert_eq!(playground.panel_state().background, NamedColor::Navy);
    }

    #[test]
    fn test_animation_stops_after_clear() {
        let mut playground = Playground::default();
        playground.apply(Command::AddShape(ShapeKind::Box));
        let id = playground.registry.ids()[0];

        playground.advance_frame();
        playground.advance_frame();
        let rotation = playground.scene.get(id).expect("attached").rotation;
        assert!((rotation.x - 0.02).abs() < 1e-6);
        assert!((rotation.y - 0.02).abs() < 1e-6);
        assert_eq!(rotation.z, 0.0);

        playground.apply(Command::Clear);
        playground.advance_frame();
        assert!(playground.registry.is_empty());
        assert!(playground.scene.get(id).is_none());
    }

    #[test]
    fn test_hover_highlights_and_sets_pointer() {
        let mut playground = Playground::default();
        playground.apply(Command::AddShape(ShapeKind::Box));
        let id = playground.registry.ids()[0];
        center_pointer(&mut playground);

        assert_eq!(playground.update_interactions(), Some(CursorStyle::Pointer));
        assert_eq!(playground.interactions.hovered(), Some(id));

        let object = playground.scene.get(id).expect("attached");
        let material = &object.mesh.as_ref().expect("box has a mesh").material;
        assert_eq!(material, &Material::highlight());

        // Staying on the same object emits nothing new
        assert_eq!(playground.update_interactions(), None);

        playground.interactions.set_pointer(None);
        assert_eq!(playground.update_interactions(), Some(CursorStyle::Default));
        assert_eq!(playground.interactions.hovered(), None);
    }

    #[test]
    fn test_pointer_in_torus_hole_hovers_nothing() {
        let mut playground = Playground::default();
        playground.apply(Command::AddShape(ShapeKind::Torus));
        let id = playground.registry.ids()[0];
        let before = playground
            .scene
            .get(id)
            .and_then(|torus| torus.mesh.as_ref())
            .map(|mesh| mesh.material.clone())
            .expect("torus has a mesh");
        center_pointer(&mut playground);

        assert_eq!(playground.update_interactions(), None);
        assert_eq!(playground.interactions.hovered(), None);

        let torus = playground.scene.get(id).expect("attached");
        assert_eq!(torus.mesh.as_ref().expect("torus has a mesh").material, before);
    }

    #[test]
    fn test_clear_while_hovering_resets_cursor() {
        let mut playground = Playground::default();
        playground.apply(Command::AddShape(ShapeKind::Box));
        center_pointer(&mut playground);
        assert_eq!(playground.update_interactions(), Some(CursorStyle::Pointer));

        playground.clear();

        assert_eq!(playground.update_interactions(), Some(CursorStyle::Default));
        assert_eq!(playground.update_interactions(), None);
    }

    #[test]
    fn test_hover_highlights_room_walls() {
        let mut playground = Playground::default();
        playground.apply(Command::AddShape(ShapeKind::Room));
        let id = playground.registry.ids()[0];
        center_pointer(&mut playground);

        // The camera sits inside the room, so the ray still hits its bounds
        assert_eq!(playground.update_interactions(), Some(CursorStyle::Pointer));
        let room = playground.scene.get(id).expect("attached");
        for wall in &room.children {
            let material = &wall.mesh.as_ref().expect("wall mesh").material;
            assert_eq!(material, &Material::highlight());
        }
    }
}
