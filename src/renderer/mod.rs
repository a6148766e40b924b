//! WebGPU renderer
//!
//! Consumes a read-only simulation snapshot once per tick and never mutates
//! it. World geometry is rebuilt on the CPU each frame and drawn in a single
//! colored-triangle pass; the minimap is appended in screen space.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
