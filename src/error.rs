use std::path::PathBuf;

use crate::gfx::rendering::pipeline_manager::PipelineError;

/// Everything that can stop the playground from starting or running
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    #[error("failed to create a rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open the GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("render pipeline setup failed: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to read config '{}': {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] ron::Error),
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;
