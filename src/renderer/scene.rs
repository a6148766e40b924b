//! Scene assembly
//!
//! Builds two vertex batches per frame from the simulation snapshot: the
//! world batch (camera-relative) and the minimap batch (fixed screen
//! position). Draw order is back to front; alpha blending handles the
//! translucent overlays.

use glam::Vec2;

use super::shapes::{circle, oriented_rect, rect};
use super::vertex::{Vertex, colors};
use crate::consts::PLAYER_COLLIDE_RADIUS;
use crate::sim::{Vehicle, WorldState};

/// Road grid layout, matching the stock city
const ROAD_SPACING: f32 = 500.0;
const ROAD_WIDTH: f32 = 150.0;
const DASH_LENGTH: f32 = 20.0;
const DASH_GAP: f32 = 20.0;
const DASH_WIDTH: f32 = 2.0;

/// Minimap panel, in logical screen pixels
pub const MINIMAP_SIZE: f32 = 180.0;
pub const MINIMAP_PADDING: f32 = 20.0;

/// World-space batch: ground, roads, buildings, vehicles, player
pub fn build_world(state: &WorldState) -> Vec<Vertex> {
    let mut verts = Vec::new();
    let size = state.world_size;

    verts.extend(rect(Vec2::ZERO, Vec2::splat(size), colors::GRASS));

    // Road strips, then the dashed center lines over the crossings
    let mut along = 0.0;
    while along <= size {
        verts.extend(rect(
            Vec2::new(along - ROAD_WIDTH / 2.0, 0.0),
            Vec2::new(ROAD_WIDTH, size),
            colors::ROAD,
        ));
        verts.extend(rect(
            Vec2::new(0.0, along - ROAD_WIDTH / 2.0),
            Vec2::new(size, ROAD_WIDTH),
            colors::ROAD,
        ));
        along += ROAD_SPACING;
    }
    let mut along = 0.0;
    while along <= size {
        let mut dash = 0.0;
        while dash < size {
            verts.extend(rect(
                Vec2::new(along - DASH_WIDTH / 2.0, dash),
                Vec2::new(DASH_WIDTH, DASH_LENGTH),
                colors::ROAD_LINE,
            ));
            verts.extend(rect(
                Vec2::new(dash, along - DASH_WIDTH / 2.0),
                Vec2::new(DASH_LENGTH, DASH_WIDTH),
                colors::ROAD_LINE,
            ));
            dash += DASH_LENGTH + DASH_GAP;
        }
        along += ROAD_SPACING;
    }

    for building in &state.buildings {
        verts.extend(rect(building.rect.pos, building.rect.size, building.color));
    }

    for vehicle in &state.vehicles {
        vehicle_body(&mut verts, vehicle);
    }

    // The player is only drawn on foot; while driving the vehicle is the avatar
    if !state.player.in_vehicle() {
        verts.extend(circle(
            state.player.pos,
            PLAYER_COLLIDE_RADIUS,
            state.player.color,
            24,
        ));
        verts.extend(oriented_rect(
            state.player.pos,
            Vec2::new(12.0, 0.0),
            Vec2::new(8.0, 8.0),
            state.player.heading,
            colors::PLAYER_FACE,
        ));
    }

    verts
}

/// A vehicle as oriented quads: body, roof, windows, headlights
fn vehicle_body(verts: &mut Vec<Vertex>, vehicle: &Vehicle) {
    let pos = vehicle.pos;
    let heading = vehicle.heading;
    let half = vehicle.size / 2.0;

    verts.extend(oriented_rect(
        pos,
        Vec2::ZERO,
        vehicle.size,
        heading,
        vehicle.color,
    ));
    verts.extend(oriented_rect(
        pos,
        Vec2::new(5.0, 0.0),
        Vec2::new(30.0, 20.0),
        heading,
        colors::VEHICLE_ROOF,
    ));
    // Front and rear windows
    verts.extend(oriented_rect(
        pos,
        Vec2::new(17.5, 0.0),
        Vec2::new(5.0, 24.0),
        heading,
        colors::VEHICLE_WINDOW,
    ));
    verts.extend(oriented_rect(
        pos,
        Vec2::new(-17.5, 0.0),
        Vec2::new(5.0, 24.0),
        heading,
        colors::VEHICLE_WINDOW,
    ));
    // Headlights at the nose corners
    verts.extend(oriented_rect(
        pos,
        Vec2::new(half.x - 2.5, -half.y + 5.0),
        Vec2::new(5.0, 6.0),
        heading,
        colors::HEADLIGHT,
    ));
    verts.extend(oriented_rect(
        pos,
        Vec2::new(half.x - 2.5, half.y - 5.0),
        Vec2::new(5.0, 6.0),
        heading,
        colors::HEADLIGHT,
    ));
}

/// Screen-space batch: minimap panel in the top-left corner
pub fn build_minimap(state: &WorldState) -> Vec<Vertex> {
    let mut verts = Vec::new();
    let origin = Vec2::splat(MINIMAP_PADDING);
    let scale = MINIMAP_SIZE / state.world_size;

    verts.extend(rect(origin, Vec2::splat(MINIMAP_SIZE), colors::MINIMAP_BG));

    // Frame: four 2 px strips around the panel
    let frame = 2.0;
    verts.extend(rect(
        origin - Vec2::splat(frame),
        Vec2::new(MINIMAP_SIZE + 2.0 * frame, frame),
        colors::MINIMAP_FRAME,
    ));
    verts.extend(rect(
        origin + Vec2::new(-frame, MINIMAP_SIZE),
        Vec2::new(MINIMAP_SIZE + 2.0 * frame, frame),
        colors::MINIMAP_FRAME,
    ));
    verts.extend(rect(
        origin + Vec2::new(-frame, 0.0),
        Vec2::new(frame, MINIMAP_SIZE),
        colors::MINIMAP_FRAME,
    ));
    verts.extend(rect(
        origin + Vec2::new(MINIMAP_SIZE, 0.0),
        Vec2::new(frame, MINIMAP_SIZE),
        colors::MINIMAP_FRAME,
    ));

    for building in &state.buildings {
        verts.extend(rect(
            origin + building.rect.pos * scale,
            building.rect.size * scale,
            colors::MINIMAP_BUILDING,
        ));
    }

    for vehicle in &state.vehicles {
        verts.extend(rect(
            origin + vehicle.pos * scale - Vec2::new(2.0, 1.0),
            Vec2::new(4.0, 2.0),
            vehicle.color,
        ));
    }

    verts.extend(circle(
        origin + state.player.pos * scale,
        3.0,
        state.player.color,
        12,
    ));

    verts
}
