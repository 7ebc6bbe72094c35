//! # Procedural Geometry Generation
//!
//! This module provides functions to generate the primitive shapes the
//! playground offers, so no model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Plane**: Flat rectangle in the XY plane facing +Z
//! - **Box**: Axis-aligned box with per-face normals
//! - **Cylinder / Cone**: Y-aligned frustum with independent top and bottom radii
//! - **Torus**: Ring in the XY plane
//!
//! All shapes are centered at the origin, Y up, counter-clockwise front faces.
//!
//! ## Usage
//!
//! ```rust
//! use shape_playground::gfx::geometry::{generate_box, generate_torus};
//!
//! let cube = generate_box(1.0, 1.0, 1.0);
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let torus = generate_torus(0.5, 0.2, 12, 45);
//! assert_eq!(torus.vertex_count(), 13 * 46);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
