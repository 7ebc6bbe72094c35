//! WGPU-based rendering engine
//!
//! Draws every mesh of the scene in one forward pass: opaque meshes first,
//! then translucent meshes sorted back to front, then the UI overlay.

use std::sync::Arc;

use cgmath::{InnerSpace, Matrix4, SquareMatrix};
use wgpu::{Device, TextureFormat};

use crate::{
    error::Result,
    gfx::{
        camera::OrbitCamera,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
            material::{Material, Side},
            texture_resource::TextureResource,
        },
        scene::{
            object::{DrawMesh, Mesh},
            scene::Scene,
        },
    },
    wgpu_utils::single_uniform_layout,
};

use super::{
    gpu::{MeshGpuResources, MeshUniform},
    pipeline_manager::{PipelineConfig, PipelineManager},
};

const SHADER: &str = "shader";

/// Per-frame draw statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draw_calls: u32,
    pub triangles: u32,
}

/// Pipeline used for a material: blending and face culling differ
pub fn pipeline_name(material: &Material) -> &'static str {
    match (material.transparent, material.is_double_sided()) {
        (false, false) => "Opaque",
        (false, true) => "OpaqueDoubleSided",
        (true, false) => "Transparent",
        (true, true) => "TransparentDoubleSided",
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    mesh_bind_group_layout: wgpu::BindGroupLayout,
    gpu_memory_bytes: u64,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Errors
    /// Fails when no surface, adapter or device can be created.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .unwrap_or(TextureFormat::Bgra8Unorm);
        let supports_immediate = surface_capabilities
            .present_modes
            .contains(&wgpu::PresentMode::Immediate);
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync, supports_immediate),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let mesh_bind_group_layout = single_uniform_layout(
            &device,
            "Mesh Bind Group Layout",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());
        pipeline_manager.load_shader(SHADER, include_str!("shader.wgsl"));

        let layouts = vec![
            global_bindings.bind_group_layout().clone(),
            mesh_bind_group_layout.clone(),
        ];
        for transparent in [false, true] {
            for side in [Side::Front, Side::Double] {
                let probe = Material {
                    transparent,
                    side,
                    ..Material::default()
                };
                let name = pipeline_name(&probe);
                let blend = if transparent {
                    wgpu::BlendState::ALPHA_BLENDING
                } else {
                    wgpu::BlendState::REPLACE
                };

                // Translucent meshes test against depth but never occlude each other
                pipeline_manager.register_pipeline(
                    name,
                    PipelineConfig::default()
                        .with_label(name)
                        .with_shader(SHADER)
                        .with_bind_group_layouts(layouts.clone())
                        .with_cull_mode((side == Side::Front).then_some(wgpu::Face::Back))
                        .with_depth(TextureResource::DEPTH_FORMAT, !transparent)
                        .with_color_target(format, Some(blend)),
                )?;
            }
        }

        log::info!(
            "Render engine ready: {}x{} {:?} {:?}",
            config.width,
            config.height,
            format,
            config.present_mode
        );

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            mesh_bind_group_layout,
            gpu_memory_bytes: 0,
        })
    }

    /// Uploads new meshes and refreshes every uniform for this frame
    pub fn prepare(&mut self, scene: &mut Scene, camera: &OrbitCamera) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera, scene.lights());

        let device = &self.device;
        let queue = &self.queue;
        let layout = &self.mesh_bind_group_layout;
        let eye = camera.eye;
        let mut bytes = self.global_ubo.size() + self.depth_texture.byte_size();

        for (_, object) in scene.objects_mut() {
            object.visit_meshes_mut(Matrix4::identity(), &mut |mesh: &mut Mesh, world| {
                if mesh.gpu_resources.is_none() {
                    let uploaded = MeshGpuResources::upload(device, layout, mesh);
                    log::debug!("Uploaded mesh: {} bytes", uploaded.byte_size());
                    mesh.gpu_resources = Some(uploaded);
                }

                let uniform = MeshUniform::new(world, &mesh.material);
                if let Some(gpu) = mesh.gpu_resources.as_mut() {
                    gpu.uniform.update_content(queue, uniform);
                    gpu.view_distance = (world.w.truncate() - eye).magnitude();
                    bytes += gpu.byte_size();
                }
            });
        }

        self.gpu_memory_bytes = bytes;
    }

    /// Renders a frame with an optional UI overlay
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn render_frame<F>(&mut self, scene: &Scene, ui_callback: Option<F>) -> Result<RenderStats>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(RenderStats::default());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring the next frame");
                return Ok(RenderStats::default());
            }
            Err(error) => return Err(error.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut opaque: Vec<(&Material, &MeshGpuResources)> = Vec::new();
        let mut transparent: Vec<(&Material, &MeshGpuResources)> = Vec::new();
        for (_, object) in scene.objects() {
            object.visit_meshes(Matrix4::identity(), &mut |mesh, _| {
                if let Some(gpu) = &mesh.gpu_resources {
                    if mesh.material.transparent {
                        transparent.push((&mesh.material, gpu));
                    } else {
                        opaque.push((&mesh.material, gpu));
                    }
                }
            });
        }
        transparent.sort_by(|a, b| b.1.view_distance.total_cmp(&a.1.view_distance));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let mut stats = RenderStats::default();
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.background.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

            let mut bound: Option<&'static str> = None;
            for (material, gpu) in opaque.into_iter().chain(transparent) {
                let name = pipeline_name(material);
                if bound != Some(name) {
                    let Some(pipeline) = self.pipeline_manager.get_pipeline(name) else {
                        log::warn!("Pipeline '{}' missing, skipping mesh", name);
                        continue;
                    };
                    render_pass.set_pipeline(pipeline);
                    bound = Some(name);
                }

                render_pass.draw_mesh(gpu);
                stats.draw_calls += 1;
                stats.triangles += gpu.index_count / 3;
            }
        }

        if let Some(ui_callback) = ui_callback {
            ui_callback(
                &self.device,
                &self.queue,
                &mut encoder,
                &surface_texture_view,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        Ok(stats)
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Bytes of GPU memory held by uniforms, mesh buffers and the depth buffer
    pub fn gpu_memory_bytes(&self) -> u64 {
        self.gpu_memory_bytes
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn present_mode(vsync: bool, supports_immediate: bool) -> wgpu::PresentMode {
    if !vsync && supports_immediate {
        wgpu::PresentMode::Immediate
    } else {
        wgpu::PresentMode::Fifo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::NamedColor;

    #[test]
    fn test_pipeline_selection() {
        let red = NamedColor::Red.color();
        assert_eq!(pipeline_name(&Material::phong(red)), "Opaque");
        assert_eq!(
            pipeline_name(&Material::basic(red).with_side(Side::Double)),
            "OpaqueDoubleSided"
        );
        assert_eq!(pipeline_name(&Material::highlight()), "Transparent");
        assert_eq!(
            pipeline_name(&Material::phong(red).with_opacity(0.5).with_side(Side::Double)),
            "TransparentDoubleSided"
        );
    }

    #[test]
    fn test_present_mode_falls_back_to_fifo() {
        assert_eq!(present_mode(true, true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false, true), wgpu::PresentMode::Immediate);
        assert_eq!(present_mode(false, false), wgpu::PresentMode::Fifo);
    }
}
