//! Borrowed 32-bit pixel buffer
//!
//! The memory belongs to whoever presents it; the renderer only reads and
//! writes pixels inside it. Pixels are `0x00RRGGBB`, row-major, with row 0
//! being the bottom scanline on screen.

use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Framebuffer<'a> {
    pixels: &'a mut [u32],
    width: usize,
    height: usize,
}

impl<'a> Framebuffer<'a> {
    /// Wrap `pixels` as a `width` x `height` image
    pub fn new(pixels: &'a mut [u32], width: usize, height: usize) -> Result<Self> {
        let fits_i32 = width <= i32::MAX as usize && height <= i32::MAX as usize;
        if !fits_i32 || width.checked_mul(height) != Some(pixels.len()) {
            return Err(Error::FramebufferSize {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        self.idx(x, y).map(|i| self.pixels[i])
    }

    pub fn set(&mut self, x: usize, y: usize, pixel: u32) {
        if let Some(i) = self.idx(x, y) {
            self.pixels[i] = pixel;
        }
    }

    /// One scanline, for the blitters
    #[inline]
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = y * self.width;
        &mut self.pixels[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_length() {
        let mut pixels = vec![0u32; 10];
        assert!(matches!(
            Framebuffer::new(&mut pixels, 4, 3),
            Err(Error::FramebufferSize { len: 10, .. })
        ));
    }

    #[test]
    fn test_get_set_bounds() {
        let mut pixels = vec![0u32; 6];
        let mut fb = Framebuffer::new(&mut pixels, 3, 2).unwrap();
        fb.set(2, 1, 0x00AB_CDEF);
        fb.set(3, 0, 0x00FF_FFFF);
        assert_eq!(fb.get(2, 1), Some(0x00AB_CDEF));
        assert_eq!(fb.get(3, 0), None);
        assert_eq!(pixels[5], 0x00AB_CDEF);
    }
}
