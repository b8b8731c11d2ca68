//! Fixed timestep simulation tick
//!
//! One call advances every entity once, in spawn order. Each entity sees the
//! others as they are at the moment it moves, so earlier entities have
//! already committed their new bounds by the time later ones are checked.

use glam::Vec2;

use super::collision::intersects;
use super::direction::{Direction, classify};
use super::state::{Entity, EntityId, World};
use crate::consts::*;

/// Held keys for a single tick, built by the shell from its event queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// +Y (W)
    pub up: bool,
    /// -Y (S)
    pub down: bool,
    /// -X (A)
    pub left: bool,
    /// +X (D)
    pub right: bool,
    /// Speed modifier (Q)
    pub boost: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Entities whose move was rejected by the collision gate
    pub blocked: Vec<EntityId>,
    /// Direction of the first player after its update
    pub player_direction: Option<Direction>,
}

/// Unit force from the held movement keys, scaled by the speed multiplier
pub fn input_force(input: &InputState) -> Vec2 {
    let mut force = Vec2::ZERO;
    if input.up {
        force += Vec2::Y;
    }
    if input.down {
        force -= Vec2::Y;
    }
    if input.right {
        force += Vec2::X;
    }
    if input.left {
        force -= Vec2::X;
    }

    let multiplier = if input.boost { BOOST_SPEED } else { BASE_SPEED };
    force.normalize_or_zero() * multiplier
}

/// Integrate one body without touching the world.
///
/// Returns the velocity and center it would have after this step.
/// Displacement uses the pre-update velocity.
pub fn integrate(entity: &Entity, force: Vec2, dt: f32) -> (Vec2, Vec2) {
    let acceleration = force - entity.velocity * DAMPING;
    let velocity = entity.velocity + acceleration * dt;
    let displacement = entity.velocity * dt + 0.5 * acceleration * dt * dt;
    (velocity, entity.position + displacement)
}

/// Advance the world by one fixed timestep
pub fn tick(world: &mut World, input: &InputState, dt: f32) -> TickReport {
    world.time_ticks += 1;

    let force = input_force(input);
    let mut report = TickReport::default();
    let entities = world.entities_mut();

    for i in 0..entities.len() {
        let entity = &entities[i];
        let entity_force = if entity.is_player() { force } else { Vec2::ZERO };
        let (velocity, position) = integrate(entity, entity_force, dt);
        let candidate = entity.bounds_at(position);

        let blocked = entities
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && intersects(&candidate, &other.bounds()));

        let entity = &mut entities[i];
        if blocked {
            // Full stop, no sliding
            entity.velocity = Vec2::ZERO;
            report.blocked.push(EntityId(i));
            log::debug!("Entity #{} blocked at {}", i, entity.position);
        } else {
            entity.velocity = velocity;
            entity.position = position;
        }

        if entity.is_player() && report.player_direction.is_none() {
            let direction = classify(entity.velocity);
            log::debug!("Player #{} heading {:?}", i, direction);
            report.player_direction = Some(direction);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rect2;
    use crate::sim::state::EntityKind;
    use proptest::prelude::*;

    fn held(up: bool, down: bool, left: bool, right: bool, boost: bool) -> InputState {
        InputState {
            up,
            down,
            left,
            right,
            boost,
        }
    }

    #[test]
    fn test_input_force_single_key() {
        assert_eq!(input_force(&held(true, false, false, false, false)), Vec2::Y);
        assert_eq!(input_force(&held(false, false, true, false, false)), -Vec2::X);
        assert_eq!(
            input_force(&held(false, true, false, false, true)),
            Vec2::new(0.0, -BOOST_SPEED)
        );
    }

    #[test]
    fn test_input_force_diagonal_is_unit_length() {
        let f = input_force(&held(true, false, false, true, false));
        assert!((f.length() - 1.0).abs() < 1e-6);
        let f = input_force(&held(true, false, false, true, true));
        assert!((f.length() - BOOST_SPEED).abs() < 1e-5);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        assert_eq!(input_force(&held(true, true, false, false, true)), Vec2::ZERO);
        assert_eq!(input_force(&InputState::default()), Vec2::ZERO);
    }

    #[test]
    fn test_player_accelerates_from_rest() {
        let mut world = World::new();
        let id = world
            .spawn(EntityKind::Player, Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0))
            .unwrap();

        let input = held(false, false, false, true, false);
        let report = tick(&mut world, &input, SIM_DT);
        assert!(report.blocked.is_empty());
        assert_eq!(report.player_direction, Some(Direction::Right));

        let player = world.get(id).unwrap();
        // a = 1, v' = 1, x' = x + 0 * dt + 0.5 * a * dt^2
        assert_eq!(player.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(player.bounds().center(), Vec2::new(100.5, 100.0));
        assert_eq!(player.bounds().width(), 10.0);
        assert_eq!(player.bounds().height(), 10.0);
    }

    #[test]
    fn test_damping_slows_a_coasting_body() {
        let mut world = World::new();
        let id = world
            .spawn(EntityKind::Box, Vec2::ZERO, Vec2::new(4.0, 4.0))
            .unwrap();
        world.get_mut(id).unwrap().velocity = Vec2::new(10.0, 0.0);

        tick(&mut world, &InputState::default(), SIM_DT);

        let body = world.get(id).unwrap();
        assert!((body.velocity.x - 9.5).abs() < 1e-5);
        assert!((body.bounds().center().x - 9.75).abs() < 1e-5);
    }

    #[test]
    fn test_boxes_ignore_input() {
        let mut world = World::new();
        let id = world
            .spawn(EntityKind::Box, Vec2::new(50.0, 50.0), Vec2::new(8.0, 8.0))
            .unwrap();
        let before = world.get(id).unwrap().bounds();

        tick(&mut world, &held(true, false, false, true, true), SIM_DT);

        assert_eq!(world.get(id).unwrap().bounds(), before);
        assert_eq!(world.get(id).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_collision_gate_rejects_move() {
        let mut world = World::new();
        let player = world
            .spawn(EntityKind::Player, Vec2::ZERO, Vec2::new(10.0, 10.0))
            .unwrap();
        // Left edge at x = 7; a boosted step to the right reaches x = 7.5
        let wall = world
            .spawn(EntityKind::Box, Vec2::new(12.0, 0.0), Vec2::new(10.0, 10.0))
            .unwrap();
        let before = world.get(player).unwrap().bounds();

        let report = tick(&mut world, &held(false, false, false, true, true), SIM_DT);

        assert_eq!(report.blocked, vec![player]);
        let p = world.get(player).unwrap();
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_eq!(p.bounds(), before);
        // The wall was overlapping nothing and stayed put
        assert_eq!(world.get(wall).unwrap().bounds().center(), Vec2::new(12.0, 0.0));
    }

    #[test]
    fn test_collision_gate_zeroes_existing_velocity() {
        let mut world = World::new();
        let mover = world
            .spawn(EntityKind::Box, Vec2::ZERO, Vec2::new(10.0, 10.0))
            .unwrap();
        world
            .spawn(EntityKind::Box, Vec2::new(16.0, 0.0), Vec2::new(10.0, 10.0))
            .unwrap();
        world.get_mut(mover).unwrap().velocity = Vec2::new(8.0, 0.0);
        let before = world.get(mover).unwrap().bounds();

        let report = tick(&mut world, &InputState::default(), SIM_DT);

        assert_eq!(report.blocked, vec![mover]);
        assert_eq!(world.get(mover).unwrap().velocity, Vec2::ZERO);
        assert_eq!(world.get(mover).unwrap().bounds(), before);
    }

    #[test]
    fn test_later_entities_see_committed_moves() {
        let mut world = World::new();
        // First box slides right into the gap; second box, sliding left into
        // the same gap, is then blocked by the first one's new bounds.
        let first = world
            .spawn(EntityKind::Box, Vec2::ZERO, Vec2::new(10.0, 10.0))
            .unwrap();
        let second = world
            .spawn(EntityKind::Box, Vec2::new(22.0, 0.0), Vec2::new(10.0, 10.0))
            .unwrap();
        world.get_mut(first).unwrap().velocity = Vec2::new(8.0, 0.0);
        world.get_mut(second).unwrap().velocity = Vec2::new(-8.0, 0.0);

        let report = tick(&mut world, &InputState::default(), SIM_DT);

        assert_eq!(report.blocked, vec![second]);
        assert!((world.get(first).unwrap().bounds().center().x - 7.8).abs() < 1e-5);
        assert_eq!(world.get(second).unwrap().bounds().center(), Vec2::new(22.0, 0.0));
        assert_eq!(world.get(second).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_moving_player_keeps_its_size() {
        let mut world = World::new();
        let size = Vec2::new(10.3, 7.7);
        let id = world
            .spawn(EntityKind::Player, Vec2::new(0.1, 0.3), size)
            .unwrap();
        let input = held(true, false, false, true, true);

        for _ in 0..2000 {
            tick(&mut world, &input, SIM_DT);
            let player = world.get(id).unwrap();
            assert_eq!(player.size(), size);
            assert_eq!(player.bounds(), Rect2::from_center_size(player.position, size));
        }
        assert!(world.get(id).unwrap().position.x > 1000.0);
    }

    #[test]
    fn test_tick_counter_advances() {
        let mut world = World::new();
        tick(&mut world, &InputState::default(), SIM_DT);
        tick(&mut world, &InputState::default(), SIM_DT);
        assert_eq!(world.time_ticks, 2);
    }

    proptest! {
        #[test]
        fn prop_resting_boxes_never_move(
            positions in proptest::collection::vec((-500i32..500, -500i32..500), 1..8),
            ticks in 1usize..50,
        ) {
            let mut world = World::new();
            for (x, y) in &positions {
                world
                    .spawn(EntityKind::Box, Vec2::new(*x as f32, *y as f32), Vec2::new(7.0, 3.0))
                    .unwrap();
            }
            let before: Vec<_> = world.entities().iter().map(|e| e.bounds()).collect();

            for _ in 0..ticks {
                tick(&mut world, &InputState { right: true, boost: true, ..Default::default() }, SIM_DT);
            }

            let after: Vec<_> = world.entities().iter().map(|e| e.bounds()).collect();
            prop_assert_eq!(before, after);
        }
    }
}
