//! Playground configuration
//!
//! Everything tunable lives in [`PlaygroundConfig`]. The binary reads it from
//! `playground.ron` when that file exists; every field is optional there and
//! falls back to its default.
//!
//! ```ron
//! (
//!     window: (width: 1600, vsync: false),
//!     scene: (background: navy, point_light: Some((5.0, 5.0, 5.0))),
//! )
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{PlaygroundError, Result},
    palette::NamedColor,
};

pub const DEFAULT_CONFIG_FILE: &str = "playground.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub font_size: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Shape Playground".to_string(),
            width: 1280,
            height: 800,
            vsync: true,
            font_size: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    /// Starting distance from the origin along +Z
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Fraction of pending motion applied per frame; None disables inertia
    pub damping: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            distance: 2.0,
            min_distance: 0.5,
            max_distance: 50.0,
            rotate_speed: 0.005,
            zoom_speed: 1.0,
            pan_speed: 0.01,
            damping: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomDimensions {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub thickness: f32,
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self {
            width: 10.0,
            depth: 10.0,
            height: 10.0,
            thickness: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub background: NamedColor,
    /// Radians added to X and Y rotation of every object per frame
    pub rotation_step: f32,
    pub box_size: (f32, f32, f32),
    pub room: RoomDimensions,
    /// Position of an optional white point light
    pub point_light: Option<(f32, f32, f32)>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: NamedColor::White,
            rotation_step: 0.01,
            box_size: (1.0, 1.0, 1.0),
            room: RoomDimensions::default(),
            point_light: None,
        }
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            scene: SceneConfig::default(),
        }
    }
}

impl PlaygroundConfig {
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| PlaygroundError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults
    ///
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let content = self.to_ron_string()?;
        std::fs::write(&path, content).map_err(|source| PlaygroundError::ConfigIo {
            path: path.clone(),
            source,
        })?;
        log::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Builder pattern: Set the starting background color
    pub fn with_background(mut self, background: NamedColor) -> Self {
        self.scene.background = background;
        self
    }

    pub fn with_rotation_step(mut self, step: f32) -> Self {
        self.scene.rotation_step = step;
        self
    }

    pub fn with_room(mut self, room: RoomDimensions) -> Self {
        self.scene.room = room;
        self
    }

    pub fn with_point_light(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scene.point_light = Some((x, y, z));
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.window.vsync = vsync;
        self
    }

    pub fn with_camera_damping(mut self, damping: Option<f32>) -> Self {
        self.camera.damping = damping;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.camera.fov_degrees, 75.0);
        assert_eq!(config.camera.distance, 2.0);
        assert_eq!(config.scene.rotation_step, 0.01);
        assert_eq!(config.scene.room, RoomDimensions::default());
        assert_eq!(config.scene.point_light, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config =
            PlaygroundConfig::from_ron_str("(scene: (background: navy), window: (vsync: false))")
                .expect("partial config parses");

        assert_eq!(config.scene.background, NamedColor::Navy);
        assert!(!config.window.vsync);
        assert_eq!(config.window.width, WindowConfig::default().width);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let config = PlaygroundConfig::default()
            .with_background(NamedColor::Teal)
            .with_point_light(1.0, 2.0, 3.0)
            .with_camera_damping(Some(0.2));

        let text = config.to_ron_string().expect("serializes");
        let parsed = PlaygroundConfig::from_ron_str(&text).expect("parses back");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_builders_set_fields() {
        let room = RoomDimensions {
            width: 4.0,
            depth: 4.0,
            height: 3.0,
            thickness: 0.25,
        };
        let config = PlaygroundConfig::default()
            .with_rotation_step(0.05)
            .with_room(room)
            .with_window_size(640, 480)
            .with_vsync(false);

        assert_eq!(config.scene.rotation_step, 0.05);
        assert_eq!(config.scene.room, room);
        assert_eq!((config.window.width, config.window.height), (640, 480));
        assert!(!config.window.vsync);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "shape-playground-config-{}.ron",
            std::process::id()
        ));
        let config = PlaygroundConfig::default()
            .with_background(NamedColor::Maroon)
            .with_window_size(800, 600);

        config.save(&path).expect("config is written");
        let loaded = PlaygroundConfig::load_or_default(&path).expect("config is read back");
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_to_missing_directory_reports_path() {
        let path = std::env::temp_dir()
            .join("shape-playground-no-such-dir")
            .join("playground.ron");
        let result = PlaygroundConfig::default().save(&path);
        assert!(matches!(result, Err(PlaygroundError::ConfigIo { path: p, .. }) if p == path));
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = PlaygroundConfig::from_ron_str("(scene: (colour: red))");
        assert!(matches!(result, Err(PlaygroundError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("shape-playground-missing-config.ron");
        let config = PlaygroundConfig::load_or_default(&path).expect("defaults");
        assert_eq!(config, PlaygroundConfig::default());
    }
}
