use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Window, WindowAttributes, WindowId},
};

use crate::{
    config::PlaygroundConfig,
    controller::{Command, CursorStyle, Playground},
    error::{PlaygroundError, Result},
    gfx::rendering::RenderEngine,
    performance::PerformanceMonitor,
    ui::{playground_panel, UiManager},
};

pub struct PlaygroundApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    playground: Playground,
    monitor: PerformanceMonitor,
    /// Start-up failure that ended the event loop
    error: Option<PlaygroundError>,
}

impl PlaygroundApp {
    pub fn new(config: PlaygroundConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                ui_manager: None,
                playground: Playground::new(config),
                monitor: PerformanceMonitor::new(),
                error: None,
            },
        })
    }

    pub fn playground_mut(&mut self) -> &mut Playground {
        &mut self.app_state.playground
    }

    /// Runs until the window closes or Escape is pressed
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_config = &self.playground.config().window;
        let attributes = WindowAttributes::default()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let vsync = window_config.vsync;
        let font_size = window_config.font_size;

        let window = Arc::new(event_loop.create_window(attributes)?);
        let (width, height) = window.inner_size().into();

        let renderer =
            pollster::block_on(RenderEngine::new(window.clone(), width, height, vsync))?;
        let ui_manager = UiManager::new(
            renderer.device(),
            renderer.queue(),
            renderer.surface_format(),
            &window,
            font_size,
        );

        self.playground.resize(width, height);
        self.window = Some(window);
        self.render_engine = Some(renderer);
        self.ui_manager = Some(ui_manager);

        log::info!("Playground window ready ({}x{})", width, height);
        Ok(())
    }

    fn ui_wants_mouse(&self) -> bool {
        self.ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_mouse())
    }

    fn ui_wants_keyboard(&self) -> bool {
        self.ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_keyboard())
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;

        // Releases always reach the camera so a drag never sticks
        if pressed && self.ui_wants_mouse() {
            return;
        }
        if pressed && button == MouseButton::Left {
            self.playground.interactions.press_primary();
        }
        self.playground
            .camera_manager
            .process_mouse_button(button, state);
    }

    fn handle_key(&mut self, event: &KeyEvent, event_loop: &ActiveEventLoop) {
        if event.state == ElementState::Pressed
            && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
        {
            event_loop.exit();
            return;
        }
        if !self.ui_wants_keyboard() {
            self.playground
                .camera_manager
                .process_keyboard_event(event);
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(render_engine), Some(ui_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
        ) else {
            return;
        };
        let playground = &mut self.playground;
        let monitor = &mut self.monitor;

        monitor.begin_frame();

        playground.advance_frame();
        if let Some(cursor) = playground.update_interactions() {
            window.set_cursor(match cursor {
                CursorStyle::Default => CursorIcon::Default,
                CursorStyle::Pointer => CursorIcon::Pointer,
            });
        }
        playground.camera_manager.update();

        let panel_state = playground.panel_state();
        let mut commands: Vec<Command> = Vec::new();
        {
            let monitor = &*monitor;
            ui_manager.update_logic(window, |ui| {
                commands = playground_panel(ui, &panel_state);
                monitor.render_overlays(ui);
            });
        }

        render_engine.prepare(&mut playground.scene, &playground.camera_manager.camera);
        let draw_ui = |device: &wgpu::Device,
                       queue: &wgpu::Queue,
                       encoder: &mut wgpu::CommandEncoder,
                       view: &wgpu::TextureView| {
            ui_manager.render_display_only(device, queue, encoder, view);
        };
        let result = render_engine.render_frame(&playground.scene, Some(draw_ui));

        match result {
            Ok(stats) => monitor.update_render_stats(stats.draw_calls, stats.triangles),
            Err(error) => log::error!("Frame failed: {}", error),
        }
        monitor.set_gpu_memory(render_engine.gpu_memory_bytes());
        monitor.end_frame();

        for command in commands {
            playground.apply(command);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(error) = self.init_graphics(event_loop) {
            log::error!("Failed to start graphics: {}", error);
            self.error = Some(error);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        // UI sees every input first
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.handle_input(&window, window_id, &event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event, event_loop),
            WindowEvent::CursorMoved { position, .. } => {
                let pointer = if self.ui_wants_mouse() {
                    None
                } else {
                    Some((position.x as f32, position.y as f32))
                };
                self.playground.interactions.set_pointer(pointer);
            }
            WindowEvent::CursorLeft { .. } => {
                self.playground.interactions.set_pointer(None);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(button, state);
            }
            WindowEvent::Focused(false) => {
                self.playground.camera_manager.controller.release_buttons();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
                if let Some(ui_manager) = self.ui_manager.as_mut() {
                    ui_manager.update_display_size(width, height);
                }
                self.playground.resize(width, height);
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if self.window.is_none() || self.ui_wants_mouse() {
            return;
        }

        self.playground.camera_manager.process_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
