// src/lib.rs
//! Shape Playground
//!
//! A small 3D scene editor built on wgpu, winit and Dear ImGui: spawn
//! primitive shapes, watch them spin, orbit the camera, hover to highlight
//! and change the background color.

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod gfx;
pub mod palette;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::PlaygroundApp;
pub use config::PlaygroundConfig;
pub use controller::{Command, Playground, ShapeKind};
pub use error::{PlaygroundError, Result};
