//! Per-tick simulation update
//!
//! One synchronous pass per animation frame, fixed phase order: possession
//! toggle, vehicle kinematics + building resolution, player movement or
//! vehicle mirror, world-bounds clamp, camera follow. Each phase completes
//! before the next begins, so the renderer always observes a consistent
//! post-update state.

use std::f32::consts::FRAC_PI_2;

use glam::Vec2;

use super::input::TickInput;
use super::state::{Possession, WorldState};
use crate::consts::{
    EXIT_OFFSET, INTERACT_RADIUS, PLAYER_COLLIDE_RADIUS, VEHICLE_COLLIDE_RADIUS,
};
use crate::heading_vec;

/// Advance the world by one tick
pub fn tick(state: &mut WorldState, input: &TickInput) {
    if input.interact {
        toggle_vehicle(state);
    }

    state.time_ticks += 1;

    // Every vehicle moves, then resolves against every building. On overlap
    // the position reverts to the pre-update snapshot (heading does not) and
    // the speed inverts and halves - a bounce. Simultaneous overlaps
    // re-apply the bounce per building in roster order.
    for vehicle in &mut state.vehicles {
        let before = vehicle.pos;
        vehicle.update(input);
        for building in &state.buildings {
            if building.rect.overlaps_circle(vehicle.pos, VEHICLE_COLLIDE_RADIUS) {
                vehicle.pos = before;
                vehicle.speed *= -0.5;
            }
        }
    }

    match state.player.possession {
        // Passive passenger: mirror the vehicle transform
        Possession::Driving(id) => {
            if let Some(vehicle) = state.vehicles.get(id.0) {
                state.player.pos = vehicle.pos;
                state.player.heading = vehicle.heading;
            }
        }
        Possession::Walking => walk_player(state, input),
    }

    // Hard world boundary for the player only; vehicles may roam free
    state.player.pos = state
        .player
        .pos
        .clamp(Vec2::ZERO, Vec2::splat(state.world_size));

    state.camera.follow(state.player.pos);
}

/// Normalized 8-directional walking with revert-on-overlap.
///
/// With no movement intent the whole step is skipped and the previous
/// heading is held. On a building overlap only the position reverts; the
/// heading keeps the new facing.
fn walk_player(state: &mut WorldState, input: &TickInput) {
    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }

    let before = state.player.pos;
    let dir = dir.normalize();
    state.player.heading = dir.y.atan2(dir.x);
    state.player.pos += dir * state.player.max_speed;

    for building in &state.buildings {
        if building
            .rect
            .overlaps_circle(state.player.pos, PLAYER_COLLIDE_RADIUS)
        {
            state.player.pos = before;
        }
    }
}

/// Possession state machine: one interact press toggles between walking and
/// driving.
///
/// Entering requires the nearest vehicle strictly inside the interaction
/// radius and always stops it. Exiting places the player beside the vehicle,
/// perpendicular to its heading at the moment of exit.
fn toggle_vehicle(state: &mut WorldState) {
    match state.player.possession {
        Possession::Driving(id) => {
            if let Some(vehicle) = state.vehicles.get_mut(id.0) {
                vehicle.occupied = false;
                state.player.pos += heading_vec(vehicle.heading + FRAC_PI_2) * EXIT_OFFSET;
            }
            state.player.possession = Possession::Walking;
            log::info!("exited vehicle {}", id.0);
        }
        Possession::Walking => {
            let Some((id, dist)) = state.nearest_vehicle(state.player.pos) else {
                return;
            };
            if dist >= INTERACT_RADIUS {
                return;
            }
            if let Some(vehicle) = state.vehicles.get_mut(id.0) {
                vehicle.occupied = true;
                vehicle.speed = 0.0;
                state.player.possession = Possession::Driving(id);
                log::info!("entered vehicle {}", id.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Building, VehicleId};
    use crate::sim::Rect;
    use crate::tuning::WorldConfig;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    fn test_world() -> WorldState {
        let mut world = WorldState::new(&WorldConfig::default());
        world.camera.set_viewport(800.0, 600.0);
        world
    }

    #[test]
    fn test_vehicle_bounces_off_building() {
        let mut world = test_world();
        // Heading into the (100,100,200,300) building from the right
        world.vehicles[0].pos = Vec2::new(330.0, 250.0);
        world.vehicles[0].heading = PI;
        world.vehicles[0].speed = 5.0;

        tick(&mut world, &TickInput::default());

        // Position reverted to the pre-update snapshot, heading untouched,
        // speed inverted and halved (after one tick of coasting friction)
        assert_eq!(world.vehicles[0].pos, Vec2::new(330.0, 250.0));
        assert_eq!(world.vehicles[0].heading, PI);
        assert!((world.vehicles[0].speed - (-2.475)).abs() < 1e-4);
    }

    #[test]
    fn test_resolution_never_leaves_vehicle_inside_building() {
        let mut world = test_world();
        world.vehicles[0].pos = Vec2::new(330.0, 250.0);
        world.vehicles[0].heading = PI;
        world.vehicles[0].speed = 5.0;

        for _ in 0..100 {
            let before = world.vehicles[0].pos;
            tick(&mut world, &TickInput::default());
            let pos = world.vehicles[0].pos;
            let clear = world
                .buildings
                .iter()
                .all(|b| !b.rect.overlaps_circle(pos, crate::consts::VEHICLE_COLLIDE_RADIUS));
            assert!(clear || pos == before);
        }
    }

    #[test]
    fn test_double_overlap_compounds_bounce() {
        let mut world = test_world();
        // Second building overlapping the same contact point
        world.buildings.push(Building {
            rect: Rect::new(Vec2::new(290.0, 200.0), Vec2::new(100.0, 100.0)),
            color: [0.3, 0.3, 0.3, 1.0],
        });
        world.vehicles[0].pos = Vec2::new(330.0, 250.0);
        world.vehicles[0].heading = PI;
        world.vehicles[0].speed = 5.0;

        tick(&mut world, &TickInput::default());

        // Two overlapping buildings apply the bounce twice, so the speed
        // ends up positive at a quarter magnitude
        assert_eq!(world.vehicles[0].pos, Vec2::new(330.0, 250.0));
        assert!((world.vehicles[0].speed - 1.2375).abs() < 1e-4);
    }

    #[test]
    fn test_blocked_walk_reverts_position_not_heading() {
        let mut world = test_world();
        world.player.pos = Vec2::new(90.0, 90.0);
        world.player.heading = 2.0;

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut world, &right);

        // Move to (94,90) overlaps (100,100,200,300) at radius 16: position
        // reverts but the new facing sticks
        assert_eq!(world.player.pos, Vec2::new(90.0, 90.0));
        assert_eq!(world.player.heading, 0.0);
    }

    #[test]
    fn test_idle_walk_holds_transform() {
        let mut world = test_world();
        world.player.heading = 1.25;
        let pos = world.player.pos;

        tick(&mut world, &TickInput::default());

        assert_eq!(world.player.pos, pos);
        assert_eq!(world.player.heading, 1.25);
    }

    #[test]
    fn test_diagonal_walk_is_normalized() {
        let mut world = test_world();
        world.player.pos = Vec2::new(700.0, 700.0);
        let input = TickInput {
            down: true,
            right: true,
            ..Default::default()
        };

        tick(&mut world, &input);

        let delta = world.player.pos - Vec2::new(700.0, 700.0);
        assert!((delta.length() - world.player.max_speed).abs() < 1e-4);
        assert!((world.player.heading - std::f32::consts::FRAC_PI_4).abs() < 1e-5);
    }

    #[test]
    fn test_enter_nearest_vehicle_stops_it() {
        let mut world = test_world();
        world.player.pos = Vec2::new(590.0, 590.0);
        world.vehicles[0].speed = 3.0;

        let interact = TickInput {
            interact: true,
            ..Default::default()
        };
        tick(&mut world, &interact);

        assert_eq!(world.player.possession, Possession::Driving(VehicleId(0)));
        assert!(world.vehicles[0].occupied);
        assert_eq!(world.vehicles[0].speed, 0.0);
        // Mirror sync ran in the same tick
        assert_eq!(world.player.pos, world.vehicles[0].pos);
    }

    #[test]
    fn test_interact_out_of_range_is_noop() {
        let mut world = test_world();
        world.player.pos = Vec2::new(50.0, 1900.0);

        let interact = TickInput {
            interact: true,
            ..Default::default()
        };
        tick(&mut world, &interact);

        assert_eq!(world.player.possession, Possession::Walking);
        assert!(world.vehicles.iter().all(|v| !v.occupied));
    }

    #[test]
    fn test_exit_places_player_beside_vehicle() {
        let mut world = test_world();
        world.vehicles[0].occupied = true;
        world.player.possession = Possession::Driving(VehicleId(0));
        world.player.pos = world.vehicles[0].pos;

        let interact = TickInput {
            interact: true,
            ..Default::default()
        };
        tick(&mut world, &interact);

        assert_eq!(world.player.possession, Possession::Walking);
        assert!(!world.vehicles[0].occupied);
        // Heading 0 exits along +Y (heading + 90 degrees), 50 units out
        let expected = world.vehicles[0].pos + Vec2::new(0.0, EXIT_OFFSET);
        assert!(world.player.pos.distance(expected) < 1e-3);
    }

    #[test]
    fn test_driving_mirrors_vehicle_transform() {
        let mut world = test_world();
        world.vehicles[1].occupied = true;
        world.player.possession = Possession::Driving(VehicleId(1));

        let drive = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut world, &drive);
        }

        assert_eq!(world.player.pos, world.vehicles[1].pos);
        assert_eq!(world.player.heading, world.vehicles[1].heading);
        assert!(world.vehicles[1].speed > 0.0);
    }

    #[test]
    fn test_only_occupied_vehicle_reads_throttle() {
        let mut world = test_world();
        world.vehicles[0].occupied = true;
        world.player.possession = Possession::Driving(VehicleId(0));

        let drive = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut world, &drive);

        assert!(world.vehicles[0].speed > 0.0);
        assert_eq!(world.vehicles[1].speed, 0.0);
        assert_eq!(world.vehicles[2].speed, 0.0);
    }

    proptest! {
        #[test]
        fn prop_player_never_leaves_world(masks in proptest::collection::vec(0u8..32, 1..250)) {
            let mut world = test_world();
            for mask in masks {
                let input = TickInput {
                    up: mask & 1 != 0,
                    down: mask & 2 != 0,
                    left: mask & 4 != 0,
                    right: mask & 8 != 0,
                    interact: mask & 16 != 0,
                };
                tick(&mut world, &input);
                prop_assert!(world.player.pos.x >= 0.0 && world.player.pos.x <= world.world_size);
                prop_assert!(world.player.pos.y >= 0.0 && world.player.pos.y <= world.world_size);
            }
        }

        #[test]
        fn prop_coasting_vehicle_comes_to_rest(speed in 0.0f32..20.0) {
            let mut world = test_world();
            world.vehicles[2].speed = speed;
            let friction = world.vehicles[2].friction;
            let ticks = (speed / friction).ceil() as u32 + 1;
            for _ in 0..ticks {
                prop_assert!(world.vehicles[2].speed >= 0.0);
                tick(&mut world, &TickInput::default());
            }
            prop_assert_eq!(world.vehicles[2].speed, 0.0);
        }
    }
}
