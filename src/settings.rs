//! Engine settings
//!
//! Read from a JSON file next to the executable. Missing keys fall back to
//! their defaults, so a file only needs the values it changes.

use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_TICK_RATE_HZ, MAX_SUBSTEPS};
use crate::math::Color;
use crate::renderer::SceneStyle;

/// A static box placed at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpawn {
    pub center: Vec2,
    pub size: Vec2,
}

/// Engine settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub title: String,
    pub width: u32,
    pub height: u32,

    // === Assets ===
    /// 32 bpp bitmap drawn for the player
    pub sprite_path: PathBuf,

    // === Simulation ===
    /// Fixed ticks per wall-clock second
    pub tick_rate_hz: f32,
    /// Cap on ticks run for a single presented frame
    pub max_substeps: u32,
    /// Player center; its size comes from the sprite
    pub player_spawn: Vec2,
    pub boxes: Vec<BoxSpawn>,

    // === Drawing ===
    pub background: Color,
    pub box_color: Color,
    /// Tinted bounds overlay (player heading, blocked moves)
    pub show_overlay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Game :)".to_string(),
            width: 1280,
            height: 720,

            sprite_path: PathBuf::from("petro.bmp"),

            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            max_substeps: MAX_SUBSTEPS,
            player_spawn: Vec2::new(300.0, 300.0),
            boxes: vec![
                // Lower-left corner at the origin
                BoxSpawn {
                    center: Vec2::new(50.0, 50.0),
                    size: Vec2::new(100.0, 100.0),
                },
                BoxSpawn {
                    center: Vec2::new(640.0, 360.0),
                    size: Vec2::new(200.0, 40.0),
                },
                BoxSpawn {
                    center: Vec2::new(1000.0, 200.0),
                    size: Vec2::new(60.0, 260.0),
                },
            ],

            background: Color::BLACK,
            box_color: Color::RED,
            show_overlay: true,
        }
    }
}

impl Settings {
    /// File looked up when no path is given
    pub const DEFAULT_PATH: &'static str = "petro.json";

    /// Load settings, falling back to defaults on any problem
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            background: self.background,
            box_color: self.box_color,
            show_overlay: self.show_overlay,
        }
    }
}
