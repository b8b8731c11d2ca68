//! Axis-aligned rectangle and color primitives
//!
//! Vectors are `glam::Vec2`. Rectangles are stored as min/max corners and are
//! always built from a center point plus a size, so extents recovered from
//! them stay bit-consistent with what the collision and draw code expects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect2 {
    /// Build a rectangle centered on `center` with the given full size
    #[inline]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - 0.5 * size,
            max: center + 0.5 * size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + 0.5 * self.size()
    }

    /// Minkowski expansion: grow by `other`'s full extents, keeping this center
    pub fn grown_by(&self, other: &Rect2) -> Self {
        Self::from_center_size(self.center(), self.size() + other.size())
    }

    /// Strict containment; points on an edge are outside
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

/// Straight (non-premultiplied) color with components in [0, 1]
///
/// `a` is a blend weight against whatever is already in the buffer; it is
/// never stored in the output pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0, 1.0);
    pub const GREY: Color = Color::new(0.5, 0.5, 0.5, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Unpack the RGB bytes of a `0x??RRGGBB` word; alpha is set to 1
    pub fn from_rgb_u32(pixel: u32) -> Self {
        Self {
            r: ((pixel & 0x00FF_0000) >> 16) as f32 / 255.0,
            g: ((pixel & 0x0000_FF00) >> 8) as f32 / 255.0,
            b: (pixel & 0x0000_00FF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Unpack a `0xAARRGGBB` texel including its alpha byte
    pub fn from_argb_u32(pixel: u32) -> Self {
        Self {
            a: ((pixel & 0xFF00_0000) >> 24) as f32 / 255.0,
            ..Self::from_rgb_u32(pixel)
        }
    }

    /// Pack as `0x00RRGGBB`
    pub fn to_rgb_u32(&self) -> u32 {
        (channel_to_byte(self.r) << 16) | (channel_to_byte(self.g) << 8) | channel_to_byte(self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

#[inline]
fn channel_to_byte(c: f32) -> u32 {
    crate::round_float_to_int(c * 255.0).clamp(0, 255) as u32
}
