//! # Color Palette
//!
//! The sixteen basic named colors used by the playground, plus the random
//! color source that shape materials draw from.
//!
//! ```rust
//! use shape_playground::palette::{random_color, NamedColor};
//!
//! let background = NamedColor::White.color();
//! let material_color = random_color();
//! assert!(NamedColor::RANDOM_SUBSET
//!     .iter()
//!     .any(|named| named.color() == material_color));
//! # let _ = background;
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// RGBA array with the given alpha, as uploaded to the GPU
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

/// The sixteen named palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    White,
    Silver,
    Gray,
    Black,
    Red,
    Maroon,
    Yellow,
    Olive,
    Lime,
    Green,
    Aqua,
    Teal,
    Blue,
    Navy,
    Fuchsia,
    Purple,
}

impl NamedColor {
    /// Every palette entry, in palette order
    pub const ALL: [NamedColor; 16] = [
        NamedColor::White,
        NamedColor::Silver,
        NamedColor::Gray,
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Maroon,
        NamedColor::Yellow,
        NamedColor::Olive,
        NamedColor::Lime,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Teal,
        NamedColor::Blue,
        NamedColor::Navy,
        NamedColor::Fuchsia,
        NamedColor::Purple,
    ];

    /// Entries that [`random_color`] may return
    pub const RANDOM_SUBSET: [NamedColor; 7] = [
        NamedColor::Red,
        NamedColor::Yellow,
        NamedColor::Lime,
        NamedColor::Aqua,
        NamedColor::Teal,
        NamedColor::Blue,
        NamedColor::Fuchsia,
    ];

    pub fn hex(self) -> u32 {
        match self {
            NamedColor::White => 0xFFFFFF,
            NamedColor::Silver => 0xC0C0C0,
            NamedColor::Gray => 0x808080,
            NamedColor::Black => 0x000000,
            NamedColor::Red => 0xFF0000,
            NamedColor::Maroon => 0x800000,
            NamedColor::Yellow => 0xFFFF00,
            NamedColor::Olive => 0x808000,
            NamedColor::Lime => 0x00FF00,
            NamedColor::Green => 0x008000,
            NamedColor::Aqua => 0x00FFFF,
            NamedColor::Teal => 0x008080,
            NamedColor::Blue => 0x0000FF,
            NamedColor::Navy => 0x000080,
            NamedColor::Fuchsia => 0xFF00FF,
            NamedColor::Purple => 0x800080,
        }
    }

    pub fn color(self) -> Color {
        Color::from_hex(self.hex())
    }

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::White => "white",
            NamedColor::Silver => "silver",
            NamedColor::Gray => "gray",
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Maroon => "maroon",
            NamedColor::Yellow => "yellow",
            NamedColor::Olive => "olive",
            NamedColor::Lime => "lime",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Teal => "teal",
            NamedColor::Blue => "blue",
            NamedColor::Navy => "navy",
            NamedColor::Fuchsia => "fuchsia",
            NamedColor::Purple => "purple",
        }
    }

    /// Position of this entry in [`NamedColor::ALL`]
    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|named| *named == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no palette entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown palette color '{0}'")]
pub struct UnknownColor(pub String);

impl FromStr for NamedColor {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|named| named.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownColor(s.to_string()))
    }
}

/// Picks one of the [`NamedColor::RANDOM_SUBSET`] colors uniformly at random
pub fn random_color() -> Color {
    random_color_with(&mut rand::rng())
}

/// Same as [`random_color`] but drawing from the given generator
pub fn random_color_with<R: Rng + ?Sized>(rng: &mut R) -> Color {
    let index = rng.random_range(0..NamedColor::RANDOM_SUBSET.len());
    NamedColor::RANDOM_SUBSET[index].color()
}
