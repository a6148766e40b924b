//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for fixed scene elements (entity colors live in the layout config)
pub mod colors {
    /// Backdrop outside the world square
    pub const GRASS_APRON: [f32; 4] = [0.176, 0.353, 0.153, 1.0];
    /// World ground
    pub const GRASS: [f32; 4] = [0.204, 0.416, 0.180, 1.0];
    pub const ROAD: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const ROAD_LINE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const VEHICLE_ROOF: [f32; 4] = [1.0, 1.0, 1.0, 0.2];
    pub const VEHICLE_WINDOW: [f32; 4] = [0.678, 0.847, 0.902, 1.0];
    pub const HEADLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Direction indicator on the player disc
    pub const PLAYER_FACE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const MINIMAP_BG: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const MINIMAP_FRAME: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const MINIMAP_BUILDING: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
}
