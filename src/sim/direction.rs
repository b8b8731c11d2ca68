//! Cardinal direction classification from a velocity
//!
//! The heading is `asin(y)` of the normalized velocity, in degrees. That
//! only spans [-90, 90], so with the band table below a body moving
//! straight down or left still reads as `Right`. Only used for visual
//! feedback; physics never looks at it.

use glam::Vec2;

/// One of four screen directions, or `Unknown` for a non-finite angle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Unknown,
}

/// Heading of `velocity` in degrees; 0 for a stationary body
pub fn angle_from_velocity(velocity: Vec2) -> f32 {
    if velocity.length() == 0.0 {
        return 0.0;
    }
    velocity.normalize_or_zero().y.asin().to_degrees()
}

/// Map an angle in degrees onto the half-open direction bands
pub fn angle_to_direction(angle: f32) -> Direction {
    if angle > 45.0 && angle <= 135.0 {
        Direction::Up
    } else if angle <= 45.0 || angle > 315.0 {
        Direction::Right
    } else if angle > 135.0 && angle <= 225.0 {
        Direction::Left
    } else if angle > 225.0 && angle <= 315.0 {
        Direction::Down
    } else {
        Direction::Unknown
    }
}

/// Classify a velocity in one step
#[inline]
pub fn classify(velocity: Vec2) -> Direction {
    angle_to_direction(angle_from_velocity(velocity))
}
