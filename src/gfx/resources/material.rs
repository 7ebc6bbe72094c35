//! Surface materials
//!
//! A material only describes how a mesh should be shaded; the renderer packs
//! it into the mesh's uniform every frame, so swapping an object's material
//! takes effect on the next draw without any GPU bookkeeping.

use crate::palette::{Color, NamedColor};

/// Lighting model used by the fragment shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    /// Ambient + point-light diffuse with a Blinn-Phong highlight
    Phong,
    /// Flat color, unaffected by lights
    Basic,
}

/// Which triangle faces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

/// Material definition
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    /// Transparent materials are alpha-blended and drawn after opaque ones
    pub transparent: bool,
    pub opacity: f32,
    pub side: Side,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::phong(NamedColor::White.color())
    }
}

impl Material {
    /// Lit material, front faces only
    pub fn phong(color: Color) -> Self {
        Self {
            shading: Shading::Phong,
            color,
            transparent: false,
            opacity: 1.0,
            side: Side::Front,
            shininess: 30.0,
        }
    }

    /// Unlit material, front faces only
    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Basic,
            ..Self::phong(color)
        }
    }

    /// Builder pattern: Enable blending with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set which faces are drawn
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Builder pattern: Set the specular exponent
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(0.0);
        self
    }

    /// The material every object switches to while the pointer hovers it
    pub fn highlight() -> Self {
        Self::phong(NamedColor::Red.color()).with_opacity(0.3)
    }

    /// Alpha actually written by the shader
    pub fn alpha(&self) -> f32 {
        if self.transparent {
            self.opacity
        } else {
            1.0
        }
    }

    pub fn is_double_sided(&self) -> bool {
        self.side == Side::Double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let material = Material::basic(NamedColor::Yellow.color()).with_side(Side::Double);
        assert_eq!(material.shading, Shading::Basic);
        assert!(material.is_double_sided());
        assert!(!material.transparent);
        assert_eq!(material.alpha(), 1.0);

        let glass = Material::phong(NamedColor::Blue.color()).with_opacity(1.7);
        assert!(glass.transparent);
        assert_eq!(glass.alpha(), 1.0);
        assert_eq!(glass.with_opacity(0.3).alpha(), 0.3);
    }

    #[test]
    fn test_shininess_is_never_negative() {
        let material = Material::phong(NamedColor::Teal.color()).with_shininess(64.0);
        assert_eq!(material.shininess, 64.0);
        assert_eq!(material.with_shininess(-5.0).shininess, 0.0);
    }

    #[test]
    fn test_highlight_is_red_translucent_phong() {
        let highlight = Material::highlight();
        assert_eq!(highlight.shading, Shading::Phong);
        assert_eq!(highlight.color, NamedColor::Red.color());
        assert!(highlight.transparent);
        assert_eq!(highlight.opacity, 0.3);
    }
}
