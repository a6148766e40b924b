//! Shape tessellation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned rectangle from its top-left corner
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let a = pos;
    let b = pos + Vec2::new(size.x, 0.0);
    let c = pos + size;
    let d = pos + Vec2::new(0.0, size.y);

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Rectangle in a rotated local frame.
///
/// The rect is centered at `offset` in a frame rotated by `angle` around
/// `origin` - the same local-space layout the vehicle body parts use.
pub fn oriented_rect(
    origin: Vec2,
    offset: Vec2,
    size: Vec2,
    angle: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let half = size / 2.0;
    let (sin, cos) = angle.sin_cos();
    let to_world = |local: Vec2| {
        let p = offset + local;
        origin + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
    };

    let a = to_world(Vec2::new(-half.x, -half.y));
    let b = to_world(Vec2::new(half.x, -half.y));
    let c = to_world(Vec2::new(half.x, half.y));
    let d = to_world(Vec2::new(-half.x, half.y));

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(a.x, a.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Filled circle as a triangle fan
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
