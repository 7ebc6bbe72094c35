//! # Graphics Module
//!
//! Everything between the playground state and the GPU.
//!
//! ## Architecture Overview
//!
//! - **Camera System** ([`camera`]) - Orbit camera and its mouse and keyboard controls
//! - **Geometry** ([`geometry`]) - Procedural plane, box, cylinder, cone and torus meshes
//! - **Shapes** ([`shapes`]) - Ready-made objects with materials, including the room
//! - **Lights** ([`lights`]) - Ambient and point light factories
//! - **Picking** ([`picking`]) - Pointer rays, bounds tests and hover/click events
//! - **Rendering Pipeline** ([`rendering`]) - Pipelines, mesh uploads and frame rendering
//! - **Resource Management** ([`resources`]) - Materials, global uniforms and depth texture
//! - **Scene Management** ([`scene`]) - Object hierarchy, scene graph and the registry
//!
//! ## Usage
//!
//! ```no_run
//! use shape_playground::gfx::{scene::Scene, shapes};
//! use shape_playground::palette::NamedColor;
//!
//! let mut scene = Scene::new(NamedColor::White.color());
//! scene.attach(shapes::create_box(1.0, 1.0, 1.0));
//! ```

pub mod camera;
pub mod geometry;
pub mod lights;
pub mod picking;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shapes;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
