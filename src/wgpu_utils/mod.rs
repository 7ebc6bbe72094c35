//! WGPU utility functions and helpers
//!
//! Small typed wrappers around buffers and bind groups.

pub mod uniform_buffer;

pub use uniform_buffer::{single_uniform_bind_group, single_uniform_layout, UniformBuffer};
