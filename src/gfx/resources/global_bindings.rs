//! Global uniform bindings for camera and lighting
//!
//! One uniform buffer shared by every draw call, bound at group 0.
//! MUST match the `Globals` struct in `shader.wgsl` exactly.

use crate::{
    gfx::{
        camera::OrbitCamera,
        lights::{Light, MAX_POINT_LIGHTS},
    },
    wgpu_utils::{single_uniform_bind_group, single_uniform_layout, UniformBuffer},
};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_proj: [[f32; 4]; 4],
    /// Camera position, w unused
    eye: [f32; 4],
    /// Sum of all ambient lights, w unused
    ambient: [f32; 4],
    point_positions: [[f32; 4]; MAX_POINT_LIGHTS],
    point_colors: [[f32; 4]; MAX_POINT_LIGHTS],
    /// x = number of point lights in use
    counts: [u32; 4],
}
// Total: 64 + 16 + 16 + 64 + 64 + 16 = 240 bytes

impl GlobalUBOContent {
    /// Packs the camera and up to [`MAX_POINT_LIGHTS`] point lights
    pub fn new(camera: &OrbitCamera, lights: &[Light]) -> Self {
        let mut content = Self {
            view_proj: camera.build_view_projection_matrix().into(),
            eye: [camera.eye.x, camera.eye.y, camera.eye.z, 1.0],
            ambient: [0.0; 4],
            point_positions: [[0.0; 4]; MAX_POINT_LIGHTS],
            point_colors: [[0.0; 4]; MAX_POINT_LIGHTS],
            counts: [0; 4],
        };

        let mut points = 0;
        for light in lights {
            let [r, g, b] = light.radiance();
            match light {
                Light::Ambient { .. } => {
                    content.ambient[0] += r;
                    content.ambient[1] += g;
                    content.ambient[2] += b;
                }
                Light::Point { position, .. } if points < MAX_POINT_LIGHTS => {
                    content.point_positions[points] = [position.x, position.y, position.z, 1.0];
                    content.point_colors[points] = [r, g, b, 1.0];
                    points += 1;
                }
                Light::Point { .. } => {
                    log::debug!("Ignoring point light beyond the first {}", MAX_POINT_LIGHTS);
                }
            }
        }
        content.counts[0] = points as u32;

        content
    }

    pub fn point_light_count(&self) -> u32 {
        self.counts[0]
    }

    pub fn ambient(&self) -> [f32; 3] {
        [self.ambient[0], self.ambient[1], self.ambient[2]]
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with this frame's camera and lights
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &OrbitCamera,
    lights: &[Light],
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lights));
}

/// Layout and bind group for the global uniform buffer
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = single_uniform_layout(
            device,
            "Global Bind Group Layout",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let bind_group =
            single_uniform_bind_group(device, "Global Bind Group", &bind_group_layout, ubo);

        Self {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lights::{create_ambient_light, create_point_light};
    use cgmath::{Vector3, Zero};

    fn camera() -> OrbitCamera {
        OrbitCamera::new(2.0, 0.0, 0.0, Vector3::zero(), 1.0)
    }

    #[test]
    fn test_layout_size() {
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 240);
    }

    #[test]
    fn test_lights_are_packed() {
        let lights = [
            create_ambient_light(),
            create_point_light(1.0, 2.0, 3.0),
            create_ambient_light(),
        ];
        let content = GlobalUBOContent::new(&camera(), &lights);

        assert_eq!(content.ambient(), [2.0, 2.0, 2.0]);
        assert_eq!(content.point_light_count(), 1);
        assert_eq!(content.point_positions[0], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(content.eye, [0.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_extra_point_lights_are_dropped() {
        let lights: Vec<Light> = (0..6)
            .map(|i| create_point_light(i as f32, 0.0, 0.0))
            .collect();
        let content = GlobalUBOContent::new(&camera(), &lights);

        assert_eq!(content.point_light_count(), MAX_POINT_LIGHTS as u32);
        assert_eq!(content.point_positions[3][0], 3.0);
    }
}
