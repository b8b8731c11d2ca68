//! Simulation state: entities and the store that owns them
//!
//! Entities live in an ordered, append-only collection. An entity's index
//! is its identity; nothing is ever removed during a session.

use glam::Vec2;

use crate::consts::ENTITY_CAPACITY;
use crate::error::{Error, Result};
use crate::math::Rect2;

/// What a body is; players receive keyboard force, boxes do not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Box,
}

/// Index handle into the world's entity list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

/// A simulated body
///
/// Only `position` moves; `size` is fixed at spawn, so the bounds always
/// have exactly the extents the entity was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub velocity: Vec2,
    /// World-space center
    pub position: Vec2,
    size: Vec2,
}

impl Entity {
    pub fn new(kind: EntityKind, center: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            velocity: Vec2::ZERO,
            position: center,
            size,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    /// Full width and height given at spawn
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// World-space bounds at the current position
    #[inline]
    pub fn bounds(&self) -> Rect2 {
        Rect2::from_center_size(self.position, self.size)
    }

    /// Bounds this entity would have if centered on `position`
    #[inline]
    pub fn bounds_at(&self, position: Vec2) -> Rect2 {
        Rect2::from_center_size(position, self.size)
    }
}

/// Fixed-capacity entity store plus the tick counter
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(ENTITY_CAPACITY),
            time_ticks: 0,
        }
    }

    /// Add an entity at rest; fails once the store is full or when `size`
    /// is not a finite, positive extent
    pub fn spawn(&mut self, kind: EntityKind, center: Vec2, size: Vec2) -> Result<EntityId> {
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 || !center.is_finite() {
            return Err(Error::InvalidEntity { center, size });
        }
        if self.entities.len() >= ENTITY_CAPACITY {
            return Err(Error::CapacityExceeded {
                capacity: ENTITY_CAPACITY,
            });
        }
        let id = EntityId(self.entities.len());
        self.entities.push(Entity::new(kind, center, size));
        log::debug!("Spawned {:?} #{} at {}", kind, id.0, center);
        Ok(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().enumerate().map(|(i, e)| (EntityId(i), e))
    }

    /// First player in spawn order
    pub fn player(&self) -> Option<(EntityId, &Entity)> {
        self.iter().find(|(_, e)| e.is_player())
    }
}
