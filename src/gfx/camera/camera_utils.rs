use cgmath::{Vector3, Zero};
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton};

use crate::config::CameraConfig;

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

/// Camera plus the controls that drive it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Camera on the +Z axis looking at the origin, as described by `config`
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let camera = OrbitCamera::new(config.distance, 0.0, 0.0, Vector3::zero(), aspect)
            .with_fov(config.fov_degrees)
            .with_distance_bounds(Some(config.min_distance), Some(config.max_distance));
        let controller = CameraController::new(config.rotate_speed, config.zoom_speed)
            .with_pan_speed(config.pan_speed)
            .with_damping(config.damping);
        Self::new(camera, controller)
    }

    pub fn process_event(&mut self, event: &DeviceEvent) {
        self.controller.process_events(event);
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.controller.process_mouse_button(button, state);
    }

    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        self.controller
            .process_keyed_events(event, &mut self.camera);
    }

    /// Applies this frame's accumulated control input
    pub fn update(&mut self) {
        self.controller.update(&mut self.camera);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_places_camera() {
        let config = CameraConfig::default();
        let manager = CameraManager::from_config(&config, 16.0 / 9.0);
        assert_eq!(manager.camera.distance, config.distance);
        assert!((manager.camera.eye.z - config.distance).abs() < 1e-6);
        assert_eq!(manager.controller.damping, config.damping);
    }
}
