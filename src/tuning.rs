//! Data-driven world layout and physics tuning
//!
//! Compiled-in defaults describe the stock city; a host page can override
//! any subset through an inline JSON block (missing fields keep their
//! defaults). All values are fixed at world init - nothing here is
//! runtime-reconfigurable.

use serde::{Deserialize, Serialize};

use crate::consts::WORLD_SIZE;

/// Per-vehicle physics constants, in world units per tick
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    pub acceleration: f32,
    pub friction: f32,
    pub max_speed: f32,
    pub steering: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.2,
            friction: 0.05,
            max_speed: 8.0,
            steering: 0.04,
            width: 60.0,
            height: 30.0,
        }
    }
}

/// Player walking tuning and spawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_speed: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub color: [f32; 4],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 4.0,
            spawn_x: 500.0,
            spawn_y: 540.0,
            color: [0.945, 0.769, 0.059, 1.0],
        }
    }
}

/// A vehicle spawn point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSpawn {
    pub x: f32,
    pub y: f32,
    pub color: [f32; 4],
}

/// A building footprint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [f32; 4],
}

/// Complete world layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub world_size: f32,
    pub player: PlayerTuning,
    pub vehicle: VehicleTuning,
    pub vehicles: Vec<VehicleSpawn>,
    pub buildings: Vec<BuildingSpec>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            player: PlayerTuning::default(),
            vehicle: VehicleTuning::default(),
            vehicles: vec![
                VehicleSpawn {
                    x: 600.0,
                    y: 600.0,
                    color: [0.906, 0.298, 0.235, 1.0],
                },
                VehicleSpawn {
                    x: 1000.0,
                    y: 400.0,
                    color: [0.204, 0.596, 0.863, 1.0],
                },
                VehicleSpawn {
                    x: 1200.0,
                    y: 1500.0,
                    color: [0.608, 0.349, 0.714, 1.0],
                },
            ],
            buildings: vec![
                BuildingSpec {
                    x: 100.0,
                    y: 100.0,
                    width: 200.0,
                    height: 300.0,
                    color: [0.267, 0.267, 0.267, 1.0],
                },
                BuildingSpec {
                    x: 1000.0,
                    y: 1000.0,
                    width: 400.0,
                    height: 200.0,
                    color: [0.290, 0.290, 0.290, 1.0],
                },
                BuildingSpec {
                    x: 600.0,
                    y: 100.0,
                    width: 300.0,
                    height: 300.0,
                    color: [0.239, 0.239, 0.239, 1.0],
                },
                BuildingSpec {
                    x: 100.0,
                    y: 1000.0,
                    width: 300.0,
                    height: 400.0,
                    color: [0.333, 0.333, 0.333, 1.0],
                },
                BuildingSpec {
                    x: 1500.0,
                    y: 600.0,
                    width: 200.0,
                    height: 600.0,
                    color: [0.173, 0.243, 0.314, 1.0],
                },
            ],
        }
    }
}

impl WorldConfig {
    /// Parse a (possibly partial) layout override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
