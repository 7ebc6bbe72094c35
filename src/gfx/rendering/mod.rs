//! Core rendering functionality
//!
//! Handles render pipelines, per-mesh GPU resources and frame rendering.

pub mod gpu;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use gpu::{MeshGpuResources, MeshUniform};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::{RenderEngine, RenderStats};
