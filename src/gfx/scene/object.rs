use std::ops::Range;

use cgmath::{Matrix4, Rad, SquareMatrix, Vector3, Zero};

use crate::gfx::{
    geometry::GeometryData,
    picking::AABB,
    rendering::gpu::MeshGpuResources,
    resources::material::Material,
};

use super::vertex::Vertex3D;

/// Geometry plus the material it is drawn with
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    positions: Vec<[f32; 3]>,
    pub material: Material,
    /// None until the render engine uploads the mesh
    pub(crate) gpu_resources: Option<MeshGpuResources>,
}

impl Mesh {
    pub fn new(geometry: GeometryData, material: Material) -> Self {
        Self {
            vertices: geometry.to_vertices(),
            indices: geometry.indices,
            positions: geometry.vertices,
            material,
            gpu_resources: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Untransformed vertex positions, indexed by [`indices`](Self::indices)
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Bounds of the untransformed geometry
    pub fn bounds(&self) -> AABB {
        AABB::from_vertices(&self.positions)
    }

    pub fn is_uploaded(&self) -> bool {
        self.gpu_resources.is_some()
    }
}

/// A scene node: a mesh, a group of children, or both
///
/// Rotation is an XYZ Euler triple in radians; the local transform is
/// `T * Rx * Ry * Rz`.
pub struct Object {
    pub name: String,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub mesh: Option<Mesh>,
    pub children: Vec<Object>,
}

impl Object {
    /// Create a mesh node at the origin with no rotation
    pub fn with_mesh(name: impl Into<String>, geometry: GeometryData, material: Material) -> Self {
        Self {
            name: name.into(),
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            mesh: Some(Mesh::new(geometry, material)),
            children: Vec::new(),
        }
    }

    /// Create an empty group node
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vector3::zero(),
            rotation: Vector3::zero(),
            mesh: None,
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: Object) {
        self.children.push(child);
    }

    /// Set translation relative to the parent
    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    /// Advance the X and Y rotation components
    pub fn rotate_xy(&mut self, delta_x: f32, delta_y: f32) {
        self.rotation.x += delta_x;
        self.rotation.y += delta_y;
    }

    pub fn is_group(&self) -> bool {
        self.mesh.is_none()
    }

    pub fn local_transform(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
    }

    /// Visits every mesh in this subtree with its world transform
    pub fn visit_meshes<'a, F>(&'a self, parent: Matrix4<f32>, visit: &mut F)
    where
        F: FnMut(&'a Mesh, Matrix4<f32>),
    {
        let world = parent * self.local_transform();
        if let Some(mesh) = &self.mesh {
            visit(mesh, world);
        }
        for child in &self.children {
            child.visit_meshes(world, visit);
        }
    }

    pub fn visit_meshes_mut<F>(&mut self, parent: Matrix4<f32>, visit: &mut F)
    where
        F: FnMut(&mut Mesh, Matrix4<f32>),
    {
        let world = parent * self.local_transform();
        if let Some(mesh) = &mut self.mesh {
            visit(mesh, world);
        }
        for child in &mut self.children {
            child.visit_meshes_mut(world, visit);
        }
    }

    /// Replaces the material of this node and every descendant mesh
    pub fn set_material(&mut self, material: &Material) {
        self.visit_meshes_mut(Matrix4::identity(), &mut |mesh, _| {
            mesh.material = material.clone();
        });
    }

    /// Bounds of the whole subtree in this node's own frame, None for empty groups
    ///
    /// The node's own transform is not applied, so the result stays valid
    /// while the node moves or rotates.
    pub fn local_bounds(&self) -> Option<AABB> {
        let mut bounds = self.mesh.as_ref().map(Mesh::bounds);
        for child in &self.children {
            if let Some(child_bounds) = child.local_bounds() {
                let placed = child_bounds.transform(&child.local_transform());
                bounds = Some(match bounds {
                    Some(current) => current.union(&placed),
                    None => placed,
                });
            }
        }
        bounds
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.visit_meshes(Matrix4::identity(), &mut |_, _| count += 1);
        count
    }

    pub fn triangle_count(&self) -> u32 {
        let mut triangles = 0;
        self.visit_meshes(Matrix4::identity(), &mut |mesh, _| {
            triangles += mesh.index_count() / 3
        });
        triangles
    }

    pub fn vertex_count(&self) -> u32 {
        let mut vertices = 0;
        self.visit_meshes(Matrix4::identity(), &mut |mesh, _| {
            vertices += mesh.vertex_count()
        });
        vertices
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, gpu: &'a MeshGpuResources);
    fn draw_mesh_instanced(&mut self, gpu: &'a MeshGpuResources, instances: Range<u32>);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, gpu: &'b MeshGpuResources) {
        self.draw_mesh_instanced(gpu, 0..1);
    }

    fn draw_mesh_instanced(&mut self, gpu: &'b MeshGpuResources, instances: Range<u32>) {
        self.set_bind_group(1, &gpu.bind_group, &[]);
        self.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        self.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..gpu.index_count, 0, instances);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;
    use crate::palette::NamedColor;

    fn unit_box(name: &str) -> Object {
        Object::with_mesh(name, generate_box(1.0, 1.0, 1.0), Material::default())
    }

    #[test]
    fn test_new_objects_start_at_rest() {
        let object = unit_box("box");
        assert_eq!(object.position, Vector3::zero());
        assert_eq!(object.rotation, Vector3::zero());
        assert_eq!(object.local_transform(), Matrix4::identity());
        assert!(!object.is_group());
        assert!(!object.mesh.as_ref().unwrap().is_uploaded());
    }

    #[test]
    fn test_rotate_xy_accumulates() {
        let mut object = unit_box("box");
        for _ in 0..10 {
            object.rotate_xy(0.01, 0.01);
        }
        assert!((object.rotation.x - 0.1).abs() < 1e-6);
        assert!((object.rotation.y - 0.1).abs() < 1e-6);
        assert_eq!(object.rotation.z, 0.0);
    }

    #[test]
    fn test_group_bounds_cover_children() {
        let mut group = Object::group("pair");
        let mut left = unit_box("left");
        left.set_position(Vector3::new(-2.0, 0.0, 0.0));
        let mut right = unit_box("right");
        right.set_position(Vector3::new(2.0, 0.0, 0.0));
        group.add_child(left);
        group.add_child(right);

        assert!(group.is_group());
        assert_eq!(group.mesh_count(), 2);
        assert_eq!(group.triangle_count(), 24);

        let bounds = group.local_bounds().unwrap();
        assert!((bounds.min.x + 2.5).abs() < 1e-5);
        assert!((bounds.max.x - 2.5).abs() < 1e-5);
        assert!((bounds.max.y - 0.5).abs() < 1e-5);

        assert!(Object::group("empty").local_bounds().is_none());
    }

    #[test]
    fn test_set_material_reaches_descendants() {
        let mut group = Object::group("pair");
        group.add_child(unit_box("a"));
        group.add_child(unit_box("b"));

        let red = Material::phong(NamedColor::Red.color());
        group.set_material(&red);

        let mut colors = Vec::new();
        group.visit_meshes(Matrix4::identity(), &mut |mesh, _| colors.push(mesh.material.color));
        assert_eq!(colors, vec![NamedColor::Red.color(); 2]);
    }
}
