//! Scene lights
//!
//! The shader supports one accumulated ambient term plus up to
//! [`MAX_POINT_LIGHTS`] point lights; extra point lights are ignored.

use cgmath::Vector3;

use crate::palette::{Color, NamedColor};

pub const MAX_POINT_LIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Uniform light reaching every surface
    Ambient { color: Color, intensity: f32 },
    /// Omnidirectional light at a position, no distance falloff
    Point {
        color: Color,
        intensity: f32,
        position: Vector3<f32>,
    },
}

impl Light {
    /// Color scaled by intensity
    pub fn radiance(&self) -> [f32; 3] {
        let (color, intensity) = match self {
            Light::Ambient { color, intensity } | Light::Point { color, intensity, .. } => {
                (color, intensity)
            }
        };
        [color.r * intensity, color.g * intensity, color.b * intensity]
    }
}

/// White ambient light
pub fn create_ambient_light() -> Light {
    Light::Ambient {
        color: NamedColor::White.color(),
        intensity: 1.0,
    }
}

/// White point light at `(x, y, z)`
pub fn create_point_light(x: f32, y: f32, z: f32) -> Light {
    Light::Point {
        color: Color::from_hex(0xFFFFFF),
        intensity: 1.0,
        position: Vector3::new(x, y, z),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories() {
        assert_eq!(create_ambient_light().radiance(), [1.0, 1.0, 1.0]);

        match create_point_light(1.0, 2.0, 3.0) {
            Light::Point { position, color, .. } => {
                assert_eq!(position, Vector3::new(1.0, 2.0, 3.0));
                assert_eq!(color, NamedColor::White.color());
            }
            other => panic!("expected a point light, got {other:?}"),
        }
    }
}
