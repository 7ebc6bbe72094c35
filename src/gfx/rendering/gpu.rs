//! Per-mesh GPU state
//!
//! Each mesh owns its vertex and index buffers plus a small uniform with its
//! world transform and material. Dropping the mesh frees all of it, so objects
//! removed from the scene release their GPU memory immediately.

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        resources::material::{Material, Shading},
        scene::object::Mesh,
    },
    wgpu_utils::{single_uniform_bind_group, UniformBuffer},
};

/// MUST match the `MeshUniform` struct in `shader.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniform {
    model: [[f32; 4]; 4],
    /// RGB plus the alpha the shader writes
    color: [f32; 4],
    /// x = 1 for lit shading, y = shininess
    params: [f32; 4],
}

impl MeshUniform {
    pub fn new(world: Matrix4<f32>, material: &Material) -> Self {
        let lit = match material.shading {
            Shading::Phong => 1.0,
            Shading::Basic => 0.0,
        };
        Self {
            model: world.into(),
            color: material.color.to_rgba(material.alpha()),
            params: [lit, material.shininess, 0.0, 0.0],
        }
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn is_lit(&self) -> bool {
        self.params[0] > 0.5
    }
}

pub type MeshUBO = UniformBuffer<MeshUniform>;

pub struct MeshGpuResources {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub uniform: MeshUBO,
    pub bind_group: wgpu::BindGroup,
    /// Camera distance of the mesh origin, refreshed every frame for sorting
    pub view_distance: f32,
}

impl MeshGpuResources {
    /// Uploads geometry and creates the per-mesh uniform
    pub fn upload(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, mesh: &Mesh) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform = MeshUBO::new(device);
        let bind_group = single_uniform_bind_group(device, "Mesh Bind Group", layout, &uniform);

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            uniform,
            bind_group,
            view_distance: 0.0,
        }
    }

    pub fn byte_size(&self) -> u64 {
        self.vertex_buffer.size() + self.index_buffer.size() + self.uniform.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::NamedColor;
    use cgmath::SquareMatrix;

    #[test]
    fn test_uniform_layout_size() {
        assert_eq!(std::mem::size_of::<MeshUniform>(), 96);
    }

    #[test]
    fn test_uniform_packs_material() {
        let glass = Material::phong(NamedColor::Blue.color()).with_opacity(0.3);
        let uniform = MeshUniform::new(Matrix4::identity(), &glass);
        assert_eq!(uniform.color(), [0.0, 0.0, 1.0, 0.3]);
        assert!(uniform.is_lit());

        let flat = Material::basic(NamedColor::Yellow.color());
        let uniform = MeshUniform::new(Matrix4::identity(), &flat);
        assert_eq!(uniform.color()[3], 1.0);
        assert!(!uniform.is_lit());
    }
}
