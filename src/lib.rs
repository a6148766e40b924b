//! Joyride - a top-down open-world driving sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, possession)
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven world layout and physics balance

pub mod renderer;
pub mod sim;
pub mod tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation cadence the tuning constants assume. The host loop runs
    /// one tick per animation frame; there is no delta-time parameter.
    pub const TICKS_PER_SECOND: f32 = 60.0;

    /// Default side length of the square world, in world units
    pub const WORLD_SIZE: f32 = 2000.0;

    /// Max distance at which the interact key grabs a vehicle
    pub const INTERACT_RADIUS: f32 = 80.0;
    /// Side-exit displacement when leaving a vehicle
    pub const EXIT_OFFSET: f32 = 50.0;

    /// Circle-proxy radius for vehicle vs building tests
    pub const VEHICLE_COLLIDE_RADIUS: f32 = 30.0;
    /// Circle-proxy radius for player vs building tests
    pub const PLAYER_COLLIDE_RADIUS: f32 = 16.0;

    /// Fraction of the remaining distance the camera covers per tick
    pub const CAMERA_SMOOTHING: f32 = 0.1;

    /// Below this speed magnitude steering input is ignored
    pub const STEER_MIN_SPEED: f32 = 0.1;
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}
