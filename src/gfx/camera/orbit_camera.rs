use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Default vertical field of view, in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;

/// Perspective camera orbiting a target point, Y up
///
/// With zero pitch and yaw the camera sits on the +Z axis looking at the target.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    home: OrbitPose,
}

/// Orbit parameters restored by [`OrbitCamera::reset_to_default`]
#[derive(Debug, Clone, Copy)]
struct OrbitPose {
    distance: f32,
    pitch: f32,
    yaw: f32,
    target: Vector3<f32>,
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Will be auto-calculted in `update()` nevertheless.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(DEFAULT_FOV_DEGREES).into(),
            znear: 0.1,
            zfar: 1000.0,
            home: OrbitPose {
                distance,
                pitch,
                yaw,
                target,
            },
        };
        camera.update();
        camera
    }

    /// Builder pattern: Set the vertical field of view
    pub fn with_fov(mut self, degrees: f32) -> Self {
        self.fovy = Deg(degrees.clamp(1.0, 179.0)).into();
        self
    }

    /// Builder pattern: Set the zoom limits and re-clamp the current distance
    pub fn with_distance_bounds(mut self, min: Option<f32>, max: Option<f32>) -> Self {
        self.bounds.min_distance = min;
        self.bounds.max_distance = max;
        self.set_distance(self.distance);
        self.home.distance = self.distance;
        self
    }

    /// Returns to the pose the camera was created with
    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.pitch = self.home.pitch;
        self.yaw = self.home.yaw;
        self.target = self.home.target;

        self.update();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Zooms proportionally to the current distance; positive delta moves away
    pub fn add_distance(&mut self, delta: f32) {
        self.set_distance(self.distance * (1.0 + delta * 0.1));
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale by distance for consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.eye += movement;
        self.target += movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            Point3::from_vec(self.eye),
            Point3::from_vec(self.target),
            self.up,
        )
    }

    /// OpenGL-style projection, clip z in [-1, 1]
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }

    /// View-projection for wgpu, clip z in [0, 1]
    pub fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * self.projection_matrix() * self.view_matrix()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: Some(0.1),
            max_distance: Some(100.0),
            min_pitch: -std::f32::consts::PI / 2.0 + 0.001,
            max_pitch: std::f32::consts::PI / 2.0 - 0.001,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose_looks_down_negative_z() {
        let camera = OrbitCamera::new(2.0, 0.0, 0.0, Vector3::zero(), 1.0);
        assert!((camera.eye - Vector3::new(0.0, 0.0, 2.0)).magnitude() < 1e-6);
        assert_eq!(camera.up, Vector3::unit_y());

        let fov: Deg<f32> = camera.fovy.into();
        assert!((fov.0 - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = OrbitCamera::new(2.0, 0.3, 0.7, Vector3::new(1.0, 0.0, 0.0), 1.5);
        let clip = camera.build_view_projection_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn test_pitch_and_distance_are_clamped() {
        let mut camera = OrbitCamera::new(2.0, 0.0, 0.0, Vector3::zero(), 1.0)
            .with_distance_bounds(Some(1.0), Some(10.0));

        camera.add_pitch(10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);

        camera.set_distance(50.0);
        assert_eq!(camera.distance, 10.0);
        camera.set_distance(0.0);
        assert_eq!(camera.distance, 1.0);
    }

    #[test]
    fn test_pan_moves_eye_and_target_together() {
        let mut camera = OrbitCamera::new(2.0, 0.0, 0.0, Vector3::zero(), 1.0);
        let offset = camera.eye - camera.target;
        camera.pan((1.0, 0.0));

        assert!(camera.target.x > 0.0);
        assert!((camera.eye - camera.target - offset).magnitude() < 1e-6);
    }

    #[test]
    fn test_reset_restores_initial_pose() {
        let mut camera = OrbitCamera::new(2.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.add_yaw(1.0);
        camera.add_distance(3.0);
        camera.pan((0.5, 0.5));

        camera.reset_to_default();
        assert_eq!(camera.target, Vector3::zero());
        assert_eq!(camera.distance, 2.0);
        assert!((camera.eye - Vector3::new(0.0, 0.0, 2.0)).magnitude() < 1e-6);
    }
}
