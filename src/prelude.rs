//! # Shape Playground Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use shape_playground::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = PlaygroundConfig::default().with_background(NamedColor::Navy);
//!     PlaygroundApp::new(config)?.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::PlaygroundApp;
pub use crate::config::PlaygroundConfig;
pub use crate::controller::{Command, Playground, ShapeKind};
pub use crate::error::{PlaygroundError, Result};

// Re-export graphics and scene types
pub use crate::gfx::camera::CameraManager;
pub use crate::gfx::lights::{create_ambient_light, create_point_light, Light};
pub use crate::gfx::scene::{Object, ObjectId, Scene, SceneRegistry};
pub use crate::gfx::shapes::{
    create_box, create_cone, create_cylinder, create_material, create_plane, create_room,
    create_torus,
};
pub use crate::palette::{random_color, Color, NamedColor};
