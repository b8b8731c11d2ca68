//! Per-frame draw list for the world

use super::framebuffer::Framebuffer;
use super::raster::{draw_bitmap, draw_rectangle};
use crate::consts::OVERLAY_ALPHA;
use crate::math::Color;
use crate::sim::{Direction, Entity, EntityId, EntityKind, World, classify};
use crate::sprite::Sprite;

/// Colors and toggles for drawing the world
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub background: Color,
    pub box_color: Color,
    /// Translucent bounds overlay over players and blocked entities
    pub show_overlay: bool,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            box_color: Color::RED,
            show_overlay: true,
        }
    }
}

/// Overlay color for a player's heading
pub fn direction_tint(direction: Direction) -> Color {
    let base = match direction {
        Direction::Up => Color::GREEN,
        Direction::Down => Color::WHITE,
        Direction::Left => Color::BLUE,
        Direction::Right => Color::YELLOW,
        Direction::Unknown => Color::GREY,
    };
    base.with_alpha(OVERLAY_ALPHA)
}

/// Overlay for an entity whose last move was rejected
pub const BLOCKED_TINT: Color = Color::new(0.5, 0.0, 0.0, OVERLAY_ALPHA);

/// Integer pixel rectangle `(x, y, width, height)` for an entity.
///
/// The origin is the bounds' min corner truncated toward zero; the extent is
/// the spawn size, also truncated.
#[inline]
pub fn pixel_rect(entity: &Entity) -> (i32, i32, i32, i32) {
    let min = entity.bounds().min;
    let size = entity.size();
    (min.x as i32, min.y as i32, size.x as i32, size.y as i32)
}

/// Clear the buffer and draw every entity in spawn order
pub fn draw_world(
    fb: &mut Framebuffer,
    world: &World,
    sprite: &Sprite,
    style: &SceneStyle,
    blocked: &[EntityId],
) {
    let (width, height) = (fb.width() as i32, fb.height() as i32);
    draw_rectangle(fb, 0, 0, width, height, style.background);

    for (id, entity) in world.iter() {
        let (x, y, w, h) = pixel_rect(entity);
        match entity.kind {
            EntityKind::Box => draw_rectangle(fb, x, y, w, h, style.box_color),
            EntityKind::Player => draw_bitmap(fb, x, y, w, h, sprite),
        }

        if !style.show_overlay {
            continue;
        }
        if blocked.contains(&id) {
            draw_rectangle(fb, x, y, w, h, BLOCKED_TINT);
        } else if entity.is_player() {
            draw_rectangle(fb, x, y, w, h, direction_tint(classify(entity.velocity)));
        }
    }
}
