//! # Scene Management Module
//!
//! The scene graph the renderer draws, and the registry that decides which
//! objects live in it.
//!
//! ## Key Components
//!
//! - [`Scene`] - Background color, lights and attached objects
//! - [`Object`] - A mesh node, a group of children, or both
//! - [`SceneRegistry`] - The user-spawned objects; owns add and clear
//! - [`Vertex3D`] - Vertex layout shared with the shader
//!
//! Objects are created unattached by [`crate::gfx::shapes`] and only enter the
//! scene through [`SceneRegistry::add`].

pub mod object;
pub mod registry;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use object::{DrawMesh, Mesh, Object};
pub use registry::SceneRegistry;
pub use scene::{ObjectId, Scene, SceneStatistics};
pub use vertex::Vertex3D;
