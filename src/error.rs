//! Crate error type

use std::fmt;
use std::io;
use std::path::PathBuf;

use glam::Vec2;

/// Errors reported by the engine core
#[derive(Debug)]
pub enum Error {
    /// Spawning would exceed the fixed entity capacity
    CapacityExceeded { capacity: usize },
    /// Entity size must be finite and positive, and its center finite
    InvalidEntity { center: Vec2, size: Vec2 },
    /// Pixel slice length does not match `width * height`
    FramebufferSize {
        width: usize,
        height: usize,
        len: usize,
    },
    /// Sprite file could not be read
    SpriteIo { path: PathBuf, source: io::Error },
    /// Sprite bytes are not a supported bitmap
    SpriteFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded { capacity } => {
                write!(f, "entity capacity of {} exceeded", capacity)
            }
            Error::InvalidEntity { center, size } => {
                write!(f, "cannot spawn a {} entity at {}", size, center)
            }
            Error::FramebufferSize { width, height, len } => write!(
                f,
                "framebuffer of {}x{} needs {} pixels, got {}",
                width,
                height,
                width * height,
                len
            ),
            Error::SpriteIo { path, source } => {
                write!(f, "failed to read sprite {}: {}", path.display(), source)
            }
            Error::SpriteFormat(msg) => write!(f, "unsupported sprite: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::SpriteIo { source, .. } => Some(source),
            _ => None,
        }
    }
}
