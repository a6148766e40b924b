//! World state and entity types
//!
//! The world owns a fixed roster: one player, a handful of vehicles, a set
//! of static buildings, and the camera. Nothing is spawned or destroyed at
//! runtime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::input::TickInput;
use crate::consts::{CAMERA_SMOOTHING, STEER_MIN_SPEED};
use crate::heading_vec;
use crate::tuning::WorldConfig;

/// Handle into the world's vehicle roster.
///
/// The roster is fixed for the lifetime of the world, but lookups are still
/// validity-checked so the handle stays safe if vehicles ever become
/// removable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleId(pub usize);

/// Whether the player is on foot or behind the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Possession {
    /// On foot, normal walking kinematics
    Walking,
    /// Passive passenger of the referenced vehicle: the player transform
    /// mirrors the vehicle every tick and accumulates no physics of its own
    Driving(VehicleId),
}

/// A drivable car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub pos: Vec2,
    /// Heading in radians. Grows unbounded under steering; trig is periodic
    /// so no wrapping is needed.
    pub heading: f32,
    /// Signed scalar speed along the heading
    pub speed: f32,
    /// Speed gained per tick under throttle
    pub acceleration: f32,
    /// Passive speed decay per tick
    pub friction: f32,
    /// Forward speed cap; reverse is capped at half of this
    pub max_speed: f32,
    /// Heading change per tick at full steering input
    pub steering: f32,
    /// Body size, for rendering only - collision uses a circle proxy
    pub size: Vec2,
    pub color: [f32; 4],
    /// Set exclusively by the possession state machine
    pub occupied: bool,
}

impl Vehicle {
    /// Passive friction decay toward zero, snapping to exactly zero once the
    /// magnitude drops below the decay step (avoids oscillating around zero)
    fn coast(&mut self) {
        if self.speed > 0.0 {
            self.speed -= self.friction;
        }
        if self.speed < 0.0 {
            self.speed += self.friction;
        }
        if self.speed.abs() < self.friction {
            self.speed = 0.0;
        }
    }

    /// Advance one tick of vehicle kinematics, mutating in place.
    ///
    /// Unoccupied vehicles only coast. Occupied vehicles read throttle and
    /// steering intents; steering has a dead-zone so the car never rotates
    /// in place, and turns invert while reversing.
    pub fn update(&mut self, input: &TickInput) {
        if !self.occupied {
            self.coast();
            self.pos += heading_vec(self.heading) * self.speed;
            return;
        }

        if input.up {
            if self.speed < self.max_speed {
                self.speed += self.acceleration;
            }
        } else if input.down {
            if self.speed > -self.max_speed / 2.0 {
                self.speed -= self.acceleration;
            }
        } else {
            self.coast();
        }

        if self.speed.abs() > STEER_MIN_SPEED {
            let steer_dir = self.speed.signum();
            if input.left {
                self.heading -= self.steering * steer_dir;
            }
            if input.right {
                self.heading += self.steering * steer_dir;
            }
        }

        self.pos += heading_vec(self.heading) * self.speed;
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub heading: f32,
    /// Walking speed in world units per tick
    pub max_speed: f32,
    pub color: [f32; 4],
    pub possession: Possession,
}

impl Player {
    /// True while driving a vehicle
    pub fn in_vehicle(&self) -> bool {
        matches!(self.possession, Possession::Driving(_))
    }
}

/// A static obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// Eased follow camera.
///
/// Its position is the only state it carries across ticks - each tick it
/// moves a fixed fraction of the remaining distance to the target, so it
/// converges exponentially. Not clamped to world bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    /// Viewport size in logical pixels, updated on host resize
    pub viewport: Vec2,
}

impl Camera {
    pub const fn new(viewport: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            viewport,
        }
    }

    /// Ease toward centering `target` in the viewport
    pub fn follow(&mut self, target: Vec2) {
        let want = target - self.viewport / 2.0;
        self.pos += (want - self.pos) * CAMERA_SMOOTHING;
    }

    /// Resize the viewport without moving the camera (easing catches up)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Side length of the square world
    pub world_size: f32,
    pub player: Player,
    pub vehicles: Vec<Vehicle>,
    pub buildings: Vec<Building>,
    pub camera: Camera,
    /// Tick counter
    pub time_ticks: u64,
}

impl WorldState {
    /// Build the world from a layout config (see [`crate::tuning`])
    pub fn new(config: &WorldConfig) -> Self {
        let vehicles = config
            .vehicles
            .iter()
            .map(|spawn| Vehicle {
                pos: Vec2::new(spawn.x, spawn.y),
                heading: 0.0,
                speed: 0.0,
                acceleration: config.vehicle.acceleration,
                friction: config.vehicle.friction,
                max_speed: config.vehicle.max_speed,
                steering: config.vehicle.steering,
                size: Vec2::new(config.vehicle.width, config.vehicle.height),
                color: spawn.color,
                occupied: false,
            })
            .collect();

        let buildings = config
            .buildings
            .iter()
            .map(|spec| Building {
                rect: Rect::new(Vec2::new(spec.x, spec.y), Vec2::new(spec.width, spec.height)),
                color: spec.color,
            })
            .collect();

        Self {
            world_size: config.world_size,
            player: Player {
                pos: Vec2::new(config.player.spawn_x, config.player.spawn_y),
                heading: 0.0,
                max_speed: config.player.max_speed,
                color: config.player.color,
                possession: Possession::Walking,
            },
            vehicles,
            buildings,
            camera: Camera::new(Vec2::ZERO),
            time_ticks: 0,
        }
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.0)
    }

    /// Closest vehicle to `pos` and its distance, in roster order on ties
    pub fn nearest_vehicle(&self, pos: Vec2) -> Option<(VehicleId, f32)> {
        self.vehicles
            .iter()
            .enumerate()
            .map(|(i, v)| (VehicleId(i), v.pos.distance(pos)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::WorldConfig;

    fn test_vehicle() -> Vehicle {
        let config = WorldConfig::default();
        let mut world = WorldState::new(&config);
        world.vehicles.remove(0)
    }

    #[test]
    fn test_friction_decays_to_exact_zero() {
        let mut v = test_vehicle();
        v.speed = 5.0;
        // ceil(5.0 / 0.05) ticks to rest, without overshooting sign
        let ticks = (v.speed / v.friction).ceil() as u32;
        for _ in 0..ticks {
            assert!(v.speed >= 0.0);
            v.update(&TickInput::default());
        }
        assert_eq!(v.speed, 0.0);
    }

    #[test]
    fn test_throttle_respects_caps() {
        let mut v = test_vehicle();
        v.occupied = true;

        let forward = TickInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..200 {
            v.update(&forward);
        }
        assert!(v.speed <= v.max_speed + v.acceleration);

        let reverse = TickInput {
            down: true,
            ..Default::default()
        };
        for _ in 0..200 {
            v.update(&reverse);
        }
        assert!(v.speed >= -v.max_speed / 2.0 - v.acceleration);
    }

    #[test]
    fn test_steering_dead_zone() {
        let mut v = test_vehicle();
        v.occupied = true;
        v.speed = 0.05; // below the 0.1 dead-zone

        let left = TickInput {
            left: true,
            ..Default::default()
        };
        let heading = v.heading;
        v.update(&left);
        assert_eq!(v.heading, heading);
    }

    #[test]
    fn test_steering_inverts_in_reverse() {
        let mut v = test_vehicle();
        v.occupied = true;
        let left = TickInput {
            left: true,
            ..Default::default()
        };

        v.speed = 2.0;
        let from_forward = {
            let mut fwd = v.clone();
            fwd.update(&left);
            fwd.heading
        };
        assert!(from_forward < 0.0);

        v.speed = -2.0;
        v.update(&left);
        assert!(v.heading > 0.0);
    }

    #[test]
    fn test_unoccupied_ignores_throttle() {
        let mut v = test_vehicle();
        let forward = TickInput {
            up: true,
            ..Default::default()
        };
        v.update(&forward);
        assert_eq!(v.speed, 0.0);
    }

    #[test]
    fn test_camera_converges_geometrically() {
        let mut cam = Camera::new(Vec2::ZERO);
        cam.pos = Vec2::new(1000.0, 0.0);
        let target = Vec2::ZERO;

        let n = 20;
        for _ in 0..n {
            cam.follow(target);
        }
        let expected = 1000.0 * 0.9f32.powi(n);
        assert!((cam.pos.x - expected).abs() < 1e-2);
    }

    #[test]
    fn test_camera_centers_target() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0));
        // Converged camera puts the target at the viewport center
        for _ in 0..500 {
            cam.follow(Vec2::new(500.0, 440.0));
        }
        assert!((cam.pos.x - 100.0).abs() < 1e-3);
        assert!((cam.pos.y - 140.0).abs() < 1e-3);
    }

    #[test]
    fn test_viewport_change_does_not_teleport_camera() {
        let mut cam = Camera::new(Vec2::new(800.0, 600.0));
        cam.pos = Vec2::new(250.0, 90.0);
        cam.set_viewport(1920.0, 1080.0);
        assert_eq!(cam.pos, Vec2::new(250.0, 90.0));
    }

    #[test]
    fn test_nearest_vehicle() {
        let config = WorldConfig::default();
        let world = WorldState::new(&config);
        // Default roster: (600,600), (1000,400), (1200,1500)
        let (id, dist) = world.nearest_vehicle(Vec2::new(990.0, 400.0)).unwrap();
        assert_eq!(id, VehicleId(1));
        assert!((dist - 10.0).abs() < 1e-3);
    }
}
