//! GPU resource management
//!
//! Materials, the depth buffer, and the uniforms shared by every draw call.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use material::{Material, Shading, Side};
pub use texture_resource::TextureResource;
