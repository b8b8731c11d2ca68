//! Software rendering module
//!
//! Everything draws into a borrowed `Framebuffer` of `0x00RRGGBB` pixels.

pub mod framebuffer;
pub mod raster;
pub mod scene;

pub use framebuffer::Framebuffer;
pub use raster::{ClipRect, blend_pixel, clip_rect, draw_bitmap, draw_rectangle};
pub use scene::{SceneStyle, direction_tint, draw_world};
