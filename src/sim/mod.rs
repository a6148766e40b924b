//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick cadence only
//! - Stable iteration order (roster order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use input::TickInput;
pub use state::{Building, Camera, Player, Possession, Vehicle, VehicleId, WorldState};
pub use tick::tick;
