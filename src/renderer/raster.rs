//! Clipped, alpha-blended rectangle fill and sprite blit
//!
//! Both primitives clip the requested rectangle against the buffer in the
//! same order: far edges first, then the negative origin. Truncating against
//! the far edge before shifting the origin keeps a rectangle that hangs off
//! both sides from losing its left overhang twice.

use super::framebuffer::Framebuffer;
use crate::math::Color;
use crate::sprite::Sprite;

/// Visible part of a destination rectangle plus where it starts in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Columns cut off the left side
    pub src_x: usize,
    /// Rows cut off the bottom side
    pub src_y: usize,
}

/// Clip `(x, y, width, height)` to a `buffer_width` x `buffer_height` target.
///
/// Returns `None` when nothing is left to draw.
pub fn clip_rect(
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    buffer_width: i32,
    buffer_height: i32,
) -> Option<ClipRect> {
    let (mut x, mut width) = clip_span(x, width, buffer_width);
    let (mut y, mut height) = clip_span(y, height, buffer_height);

    let mut src_x = 0;
    if x < 0 {
        src_x = x.saturating_neg();
        width = width.saturating_add(x);
        x = 0;
    }
    if x.saturating_add(width) < 0 {
        width = 0;
    }

    let mut src_y = 0;
    if y < 0 {
        src_y = y.saturating_neg();
        height = height.saturating_add(y);
        y = 0;
    }
    if y.saturating_add(height) < 0 {
        height = 0;
    }

    if width <= 0 || height <= 0 {
        return None;
    }
    Some(ClipRect {
        x: x as usize,
        y: y as usize,
        width: width as usize,
        height: height as usize,
        src_x: src_x as usize,
        src_y: src_y as usize,
    })
}

/// Far-edge truncation for one axis
#[inline]
fn clip_span(start: i32, mut len: i32, limit: i32) -> (i32, i32) {
    if start > limit {
        len = 0;
    }
    if start.saturating_add(len) > limit {
        len = limit.saturating_sub(start);
    }
    (start, len)
}

/// Straight alpha blend of `src` over an existing `0x00RRGGBB` pixel
#[inline]
pub fn blend_pixel(src: Color, weight: f32, dst: u32) -> u32 {
    let old = Color::from_rgb_u32(dst);
    Color::new(
        weight * src.r + (1.0 - weight) * old.r,
        weight * src.g + (1.0 - weight) * old.g,
        weight * src.b + (1.0 - weight) * old.b,
        1.0,
    )
    .to_rgb_u32()
}

/// Fill a rectangle, blending `color` by its alpha
pub fn draw_rectangle(fb: &mut Framebuffer, x: i32, y: i32, width: i32, height: i32, color: Color) {
    let Some(clip) = clip_rect(x, y, width, height, fb.width() as i32, fb.height() as i32) else {
        return;
    };

    for row in clip.y..clip.y + clip.height {
        let line = &mut fb.row_mut(row)[clip.x..clip.x + clip.width];
        for pixel in line {
            *pixel = blend_pixel(color, color.a, *pixel);
        }
    }
}

/// Copy a sprite 1:1 onto the buffer with `(x, y)` as its bottom-left corner.
///
/// `width`/`height` select how much of the sprite to draw and are clamped to
/// its size. Each texel blends by its own alpha byte.
pub fn draw_bitmap(fb: &mut Framebuffer, x: i32, y: i32, width: i32, height: i32, sprite: &Sprite) {
    let width = width.min(sprite.width().min(i32::MAX as usize) as i32);
    let height = height.min(sprite.height().min(i32::MAX as usize) as i32);
    let Some(clip) = clip_rect(x, y, width, height, fb.width() as i32, fb.height() as i32) else {
        return;
    };

    let stride = sprite.width();
    let texels = sprite.pixels();
    for row in 0..clip.height {
        let src_start = (row + clip.src_y) * stride + clip.src_x;
        let src = &texels[src_start..src_start + clip.width];
        let dst = &mut fb.row_mut(clip.y + row)[clip.x..clip.x + clip.width];
        for (pixel, &texel) in dst.iter_mut().zip(src) {
            let texel = Color::from_argb_u32(texel);
            *pixel = blend_pixel(texel, texel.a, *pixel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: usize, height: usize, fill: u32) -> Vec<u32> {
        vec![fill; width * height]
    }

    #[test]
    fn test_clip_inside() {
        assert_eq!(
            clip_rect(1, 2, 3, 4, 10, 10),
            Some(ClipRect {
                x: 1,
                y: 2,
                width: 3,
                height: 4,
                src_x: 0,
                src_y: 0
            })
        );
    }

    #[test]
    fn test_clip_far_edges() {
        let clip = clip_rect(8, 9, 5, 5, 10, 10).unwrap();
        assert_eq!((clip.x, clip.y, clip.width, clip.height), (8, 9, 2, 1));
        assert_eq!(clip_rect(10, 0, 5, 5, 10, 10), None);
        assert_eq!(clip_rect(11, 0, 5, 5, 10, 10), None);
    }

    #[test]
    fn test_clip_negative_origin() {
        let clip = clip_rect(-2, -3, 5, 5, 10, 10).unwrap();
        assert_eq!((clip.x, clip.y, clip.width, clip.height), (0, 0, 3, 2));
        assert_eq!((clip.src_x, clip.src_y), (2, 3));
    }

    #[test]
    fn test_clip_overhang_on_both_sides() {
        let clip = clip_rect(-5, 0, 30, 1, 10, 10).unwrap();
        assert_eq!((clip.x, clip.width, clip.src_x), (0, 10, 5));
    }

    #[test]
    fn test_clip_fully_outside() {
        assert_eq!(clip_rect(-1000, 0, 100, 100, 10, 10), None);
        assert_eq!(clip_rect(0, -1000, 5, 5, 10, 10), None);
        assert_eq!(clip_rect(0, 0, 0, 5, 10, 10), None);
        assert_eq!(clip_rect(i32::MAX, 0, i32::MAX, 5, 10, 10), None);
        assert_eq!(clip_rect(i32::MIN, i32::MIN, 5, 5, 10, 10), None);
    }

    #[test]
    fn test_fill_opaque() {
        let mut pixels = buffer(4, 3, 0);
        let mut fb = Framebuffer::new(&mut pixels, 4, 3).unwrap();
        draw_rectangle(&mut fb, 1, 1, 2, 5, Color::RED);
        let expected = [
            0, 0, 0, 0, //
            0, 0x00FF_0000, 0x00FF_0000, 0, //
            0, 0x00FF_0000, 0x00FF_0000, 0, //
        ];
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_fill_blends_by_alpha() {
        let mut pixels = buffer(2, 2, 0);
        let mut fb = Framebuffer::new(&mut pixels, 2, 2).unwrap();
        draw_rectangle(&mut fb, 0, 0, 2, 2, Color::WHITE.with_alpha(0.5));
        assert!(pixels.iter().all(|&p| p == 0x0080_8080));
    }

    #[test]
    fn test_zero_alpha_leaves_pixels() {
        let mut pixels = buffer(3, 3, 0x0012_3456);
        let mut fb = Framebuffer::new(&mut pixels, 3, 3).unwrap();
        draw_rectangle(&mut fb, 0, 0, 3, 3, Color::GREEN.with_alpha(0.0));
        assert!(pixels.iter().all(|&p| p == 0x0012_3456));
    }

    #[test]
    fn test_fill_outside_writes_nothing() {
        let mut pixels = buffer(8, 8, 0x0001_0203);
        let mut fb = Framebuffer::new(&mut pixels, 8, 8).unwrap();
        draw_rectangle(&mut fb, -1000, 0, 100, 8, Color::RED);
        draw_rectangle(&mut fb, 8, 0, 4, 4, Color::RED);
        draw_rectangle(&mut fb, 0, 20, 4, 4, Color::RED);
        assert!(pixels.iter().all(|&p| p == 0x0001_0203));
    }

    #[test]
    fn test_fill_never_stores_alpha() {
        let mut pixels = buffer(1, 1, 0);
        let mut fb = Framebuffer::new(&mut pixels, 1, 1).unwrap();
        draw_rectangle(&mut fb, 0, 0, 1, 1, Color::new(0.2, 0.4, 0.6, 0.05));
        assert_eq!(pixels[0] >> 24, 0);
    }

    #[test]
    fn test_bitmap_opaque_copy() {
        let sprite = Sprite::new(2, 2, vec![0xFF11_2233, 0xFF44_5566, 0xFF77_8899, 0xFFAA_BBCC])
            .unwrap();
        let mut pixels = buffer(4, 4, 0x00FF_FFFF);
        let mut fb = Framebuffer::new(&mut pixels, 4, 4).unwrap();
        draw_bitmap(&mut fb, 1, 1, 2, 2, &sprite);

        assert_eq!(fb.get(1, 1), Some(0x0011_2233));
        assert_eq!(fb.get(2, 1), Some(0x0044_5566));
        assert_eq!(fb.get(1, 2), Some(0x0077_8899));
        assert_eq!(fb.get(2, 2), Some(0x00AA_BBCC));
        assert_eq!(fb.get(0, 0), Some(0x00FF_FFFF));
        assert_eq!(fb.get(3, 3), Some(0x00FF_FFFF));
    }

    #[test]
    fn test_bitmap_transparent_texels_keep_background() {
        let sprite = Sprite::new(2, 1, vec![0x00FF_0000, 0xFF00_00FF]).unwrap();
        let mut pixels = buffer(2, 1, 0x0000_FF00);
        let mut fb = Framebuffer::new(&mut pixels, 2, 1).unwrap();
        draw_bitmap(&mut fb, 0, 0, 2, 1, &sprite);
        assert_eq!(pixels, [0x0000_FF00, 0x0000_00FF]);
    }

    #[test]
    fn test_bitmap_clipped_left_and_bottom_samples_offset_texels() {
        // 3x3 sprite, texel value encodes its (x, y)
        let texels = (0..3u32)
            .flat_map(|y| (0..3u32).map(move |x| 0xFF00_0000 | (y << 8) | x))
            .collect();
        let sprite = Sprite::new(3, 3, texels).unwrap();
        let mut pixels = buffer(4, 4, 0);
        let mut fb = Framebuffer::new(&mut pixels, 4, 4).unwrap();
        draw_bitmap(&mut fb, -1, -2, 3, 3, &sprite);

        // Only sprite (1..3, 2..3) survives, landing at (0..2, 0)
        assert_eq!(fb.get(0, 0), Some(0x0000_0201));
        assert_eq!(fb.get(1, 0), Some(0x0000_0202));
        assert_eq!(fb.get(2, 0), Some(0));
        assert_eq!(fb.get(0, 1), Some(0));
    }

    #[test]
    fn test_bitmap_clipped_right_and_top() {
        let sprite = Sprite::placeholder(4, 4);
        let mut pixels = buffer(3, 3, 0);
        let mut fb = Framebuffer::new(&mut pixels, 3, 3).unwrap();
        draw_bitmap(&mut fb, 2, 2, 4, 4, &sprite);
        assert_eq!(fb.get(2, 2), Some(sprite.texel(0, 0).unwrap() & 0x00FF_FFFF));
        assert_eq!(fb.get(1, 2), Some(0));
    }

    #[test]
    fn test_bitmap_size_is_clamped_to_sprite() {
        let sprite = Sprite::new(1, 1, vec![0xFFFF_FFFF]).unwrap();
        let mut pixels = buffer(3, 3, 0);
        let mut fb = Framebuffer::new(&mut pixels, 3, 3).unwrap();
        draw_bitmap(&mut fb, 0, 0, 3, 3, &sprite);
        assert_eq!(pixels.iter().filter(|&&p| p != 0).count(), 1);
    }
}
