//! Axis-aligned overlap tests and bounds clamping
//!
//! All entities are center-positioned boxes, so every check reduces to the
//! same half-extent comparison.

use glam::Vec2;

use super::state::Bounds;

/// Overlap test for two center-positioned boxes.
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    let a_half = a_size * 0.5;
    let b_half = b_size * 0.5;
    a_pos.x - a_half.x < b_pos.x + b_half.x
        && a_pos.x + a_half.x > b_pos.x - b_half.x
        && a_pos.y - a_half.y < b_pos.y + b_half.y
        && a_pos.y + a_half.y > b_pos.y - b_half.y
}

/// Clamp a box center so the whole box stays inside the bounds.
pub fn clamp_to_bounds(pos: Vec2, size: Vec2, bounds: &Bounds) -> Vec2 {
    let half = size * 0.5;
    Vec2::new(
        pos.x.clamp(half.x, bounds.width - half.x),
        pos.y.clamp(half.y, bounds.height - half.y),
    )
}
