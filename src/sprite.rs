//! 32-bit bitmap sprites
//!
//! Only uncompressed 32 bpp `BM` files are accepted. Texels are kept as
//! `0xAARRGGBB` words, bottom row first, which matches the framebuffer's
//! row order so the blitter can copy rows without flipping.

use std::mem::size_of;
use std::path::Path;

use bytemuck::{Pod, Zeroable};

use crate::error::{Error, Result};

/// `BM` read as a little-endian u16
const BMP_MAGIC: u16 = 0x4D42;

/// Leading part of the file header plus the start of the info header
#[allow(dead_code)]
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct BitmapHeader {
    file_type: u16,
    file_size: u32,
    reserved1: u16,
    reserved2: u16,
    bitmap_offset: u32,
    size: u32,
    width: i32,
    height: i32,
    planes: u16,
    bits_per_pixel: u16,
}

/// An immutable image with straight alpha
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Sprite {
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(pixels.len()) {
            return Err(Error::SpriteFormat(format!(
                "{} texels do not make a {}x{} image",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Parse an in-memory `.bmp` file
    pub fn from_bmp_bytes(bytes: &[u8]) -> Result<Self> {
        let header_len = size_of::<BitmapHeader>();
        if bytes.len() < header_len {
            return Err(Error::SpriteFormat(format!(
                "file is {} bytes, shorter than the {}-byte header",
                bytes.len(),
                header_len
            )));
        }
        let header: BitmapHeader = bytemuck::pod_read_unaligned(&bytes[..header_len]);

        let file_type = u16::from_le(header.file_type);
        if file_type != BMP_MAGIC {
            return Err(Error::SpriteFormat(format!(
                "bad type tag {:#06x}",
                file_type
            )));
        }
        let bits_per_pixel = u16::from_le(header.bits_per_pixel);
        if bits_per_pixel != 32 {
            return Err(Error::SpriteFormat(format!(
                "{} bits per pixel, only 32 is supported",
                bits_per_pixel
            )));
        }

        let width = i32::from_le(header.width);
        let height = i32::from_le(header.height);
        if width <= 0 || height == 0 {
            return Err(Error::SpriteFormat(format!(
                "invalid dimensions {}x{}",
                width, height
            )));
        }
        // Negative height marks a top-down image
        let top_down = height < 0;
        let width = width as usize;
        let height = height.unsigned_abs() as usize;

        let offset = u32::from_le(header.bitmap_offset) as usize;
        let data = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .and_then(|len| bytes.get(offset..offset.checked_add(len)?))
            .ok_or_else(|| {
                Error::SpriteFormat(format!(
                    "pixel data for {}x{} at offset {} runs past the end of the file",
                    width, height, offset
                ))
            })?;

        let texels = data
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]));
        let pixels: Vec<u32> = if top_down {
            let rows: Vec<u32> = texels.collect();
            rows.chunks_exact(width).rev().flatten().copied().collect()
        } else {
            texels.collect()
        };

        Self::new(width, height, pixels)
    }

    /// Read and parse a `.bmp` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::SpriteIo {
            path: path.to_path_buf(),
            source,
        })?;
        let sprite = Self::from_bmp_bytes(&bytes)?;
        log::info!(
            "Loaded sprite {} ({}x{})",
            path.display(),
            sprite.width,
            sprite.height
        );
        Ok(sprite)
    }

    /// Opaque checkerboard used when no sprite file is available
    pub fn placeholder(width: usize, height: usize) -> Self {
        const CELL: usize = 8;
        let width = width.max(1);
        let height = height.max(1);
        let pixels = (0..height)
            .flat_map(|y| {
                (0..width).map(move |x| {
                    if (x / CELL + y / CELL) % 2 == 0 {
                        0xFFFF_00FF
                    } else {
                        0xFF20_2020
                    }
                })
            })
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Texels, bottom row first
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn texel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}
