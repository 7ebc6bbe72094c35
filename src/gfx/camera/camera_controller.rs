use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;

/// Below this, leftover damped motion is dropped
const SETTLE_EPSILON: f32 = 1e-5;

/// Turns mouse and keyboard input into orbit, zoom and pan of an [`OrbitCamera`]
///
/// Input only accumulates deltas; they reach the camera in [`update`](Self::update),
/// which runs once per frame. With damping enabled part of each delta carries
/// over into following frames, so the camera glides to a stop.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Fraction of the pending motion applied per frame, None applies it all at once
    pub damping: Option<f32>,
    is_left_pressed: bool,
    is_right_pressed: bool,
    is_shift_held: bool,
    pending_rotate: (f32, f32),
    pending_pan: (f32, f32),
    pending_zoom: f32,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            damping: None,
            is_left_pressed: false,
            is_right_pressed: false,
            is_shift_held: false,
            pending_rotate: (0.0, 0.0),
            pending_pan: (0.0, 0.0),
            pending_zoom: 0.0,
        }
    }

    /// Builder pattern: Set the pan sensitivity
    pub fn with_pan_speed(mut self, pan_speed: f32) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    /// Builder pattern: Enable inertia, `factor` in (0, 1]
    pub fn with_damping(mut self, factor: Option<f32>) -> Self {
        self.damping = factor.map(|f| f.clamp(0.01, 1.0));
        self
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_left_pressed = pressed,
            MouseButton::Right => self.is_right_pressed = pressed,
            _ => (),
        }
    }

    /// Releases every held button, e.g. when the pointer is captured elsewhere
    pub fn release_buttons(&mut self) {
        self.is_left_pressed = false;
        self.is_right_pressed = false;
    }

    pub fn process_events(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::MouseWheel { delta } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 / 20.0
                    }
                };
                self.pending_zoom += scroll_amount * self.zoom_speed;
            }
            DeviceEvent::MouseMotion { delta } => {
                let (dx, dy) = (delta.0 as f32, delta.1 as f32);
                if self.is_panning() {
                    self.pending_pan.0 -= dx * self.pan_speed;
                    self.pending_pan.1 += dy * self.pan_speed;
                } else if self.is_rotating() {
                    self.pending_rotate.0 -= dx * self.rotate_speed;
                    self.pending_rotate.1 += dy * self.rotate_speed;
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                repeat: false,
                ..
            } => {
                if self.is_shift_held {
                    log::info!("Resetting camera to default position");
                    self.stop();
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Applies accumulated motion to the camera; call once per frame
    pub fn update(&mut self, camera: &mut OrbitCamera) {
        let factor = self.damping.unwrap_or(1.0);

        let (yaw, pitch) = scale(self.pending_rotate, factor);
        if yaw != 0.0 || pitch != 0.0 {
            camera.add_yaw(yaw);
            camera.add_pitch(pitch);
        }

        let pan = scale(self.pending_pan, factor);
        if pan != (0.0, 0.0) {
            camera.pan(pan);
        }

        let zoom = self.pending_zoom * factor;
        if zoom != 0.0 {
            camera.add_distance(zoom);
        }

        self.pending_rotate = settle(subtract(self.pending_rotate, (yaw, pitch)));
        self.pending_pan = settle(subtract(self.pending_pan, pan));
        self.pending_zoom = settle((self.pending_zoom - zoom, 0.0)).0;
    }

    /// Drops any motion not yet applied
    pub fn stop(&mut self) {
        self.pending_rotate = (0.0, 0.0);
        self.pending_pan = (0.0, 0.0);
        self.pending_zoom = 0.0;
    }

    /// True while camera motion is still being applied
    pub fn is_moving(&self) -> bool {
        self.pending_rotate != (0.0, 0.0) || self.pending_pan != (0.0, 0.0) || self.pending_zoom != 0.0
    }

    /// Returns true if currently panning
    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    /// Returns true if currently rotating
    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held && !self.is_right_pressed
    }
}

fn scale(delta: (f32, f32), factor: f32) -> (f32, f32) {
    (delta.0 * factor, delta.1 * factor)
}

fn subtract(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    (a.0 - b.0, a.1 - b.1)
}

fn settle(delta: (f32, f32)) -> (f32, f32) {
    if delta.0.abs() < SETTLE_EPSILON && delta.1.abs() < SETTLE_EPSILON {
        (0.0, 0.0)
    } else {
        delta
    }
}
