//! Deterministic simulation module
//!
//! All motion and collision logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (by entity index)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod direction;
pub mod state;
pub mod tick;

pub use clock::FixedTimestep;
pub use collision::intersects;
pub use direction::{Direction, angle_from_velocity, angle_to_direction, classify};
pub use state::{Entity, EntityId, EntityKind, World};
pub use tick::{InputState, TickReport, input_force, integrate, tick};
