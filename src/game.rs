//! Frame driver
//!
//! Owns the world and the player sprite. The shell hands in the held keys
//! and a pixel buffer; the driver steps the simulation and redraws.

use glam::Vec2;

use crate::consts::SIM_DT;
use crate::error::Result;
use crate::renderer::{Framebuffer, SceneStyle, draw_world};
use crate::settings::Settings;
use crate::sim::{EntityKind, FixedTimestep, InputState, TickReport, World, intersects, tick};
use crate::sprite::Sprite;

pub struct Game {
    world: World,
    sprite: Sprite,
    style: SceneStyle,
    clock: FixedTimestep,
    /// Outcome of the most recent tick, kept for the overlay
    last_report: TickReport,
}

impl Game {
    pub fn new(world: World, sprite: Sprite, style: SceneStyle, clock: FixedTimestep) -> Self {
        Self {
            world,
            sprite,
            style,
            clock,
            last_report: TickReport::default(),
        }
    }

    /// Build the startup scene: one player sized like the sprite, then boxes
    pub fn from_settings(settings: &Settings, sprite: Sprite) -> Result<Self> {
        let mut world = World::new();
        let player_size = Vec2::new(sprite.width() as f32, sprite.height() as f32);
        let player = world.spawn(EntityKind::Player, settings.player_spawn, player_size)?;
        for spawn in &settings.boxes {
            world.spawn(EntityKind::Box, spawn.center, spawn.size)?;
        }

        if let Some(player) = world.get(player) {
            let stuck = world
                .iter()
                .skip(1)
                .any(|(_, other)| intersects(&player.bounds(), &other.bounds()));
            if stuck {
                log::warn!(
                    "Player spawn {} overlaps a box and will not be able to move",
                    settings.player_spawn
                );
            }
        }
        let clock = FixedTimestep::new(settings.tick_rate_hz, settings.max_substeps);
        log::info!(
            "Scene ready with {} entities, one tick every {:.4}s",
            world.len(),
            clock.step_secs()
        );

        Ok(Self::new(world, sprite, settings.scene_style(), clock))
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// Run one fixed simulation tick
    pub fn step(&mut self, input: &InputState) -> &TickReport {
        self.last_report = tick(&mut self.world, input, SIM_DT);
        &self.last_report
    }

    /// Draw the current state
    pub fn render(&self, fb: &mut Framebuffer) {
        draw_world(fb, &self.world, &self.sprite, &self.style, &self.last_report.blocked);
    }

    /// One tick then one redraw
    pub fn frame(&mut self, input: &InputState, fb: &mut Framebuffer) {
        self.step(input);
        self.render(fb);
    }

    /// Spend `elapsed_secs` of wall-clock time in fixed ticks, then redraw.
    ///
    /// Returns how many ticks ran.
    pub fn advance(&mut self, input: &InputState, elapsed_secs: f32, fb: &mut Framebuffer) -> u32 {
        let steps = self.clock.advance(elapsed_secs);
        for _ in 0..steps {
            self.step(input);
        }
        log::trace!("Frame ran {} ticks", steps);
        self.render(fb);
        steps
    }
}
