//! Collision geometry used by the character body.

use bevy::prelude::*;

use super::shapes::{Aabb, Collider, ColliderTag, Ramp, Segment};

/// Smallest horizontal span used when interpolating along a ramp edge.
pub const MIN_EDGE_SPAN: f32 = 1e-4;

/// Horizontal distance inside which narrow colliders are checked at all.
pub const NEAR_RANGE: f32 = 100.0;

/// Does a segment touch or cross the box?
pub fn segment_intersects_box(segment: &Segment, body: &Aabb) -> bool {
    if body.contains_point(segment.a) || body.contains_point(segment.b) {
        return true;
    }
    body.edges().iter().any(|edge| edge.intersects(segment))
}

/// Cheap horizontal-proximity early-out before a full overlap test.
///
/// Wide colliders always pass, narrow ones only when their left edge is
/// within reach of the body.
pub fn within_near_range(body: &Aabb, other: &Aabb) -> bool {
    let range = NEAR_RANGE.max(body.w);
    (body.pos.x - other.pos.x).abs() < range || other.w >= NEAR_RANGE
}

/// Ramp edge the body currently rests against, sorted left to right.
///
/// Only the two edges meeting at the ramp's topmost vertex count, and vertical
/// edges never do. When the body straddles both, the edge under its center wins.
pub fn ramp_edge_contact(body: &Aabb, ramp: &Ramp) -> Option<Segment> {
    let cx = body.center().x;
    let mut fallback = None;
    for edge in ramp.top_edges() {
        if edge.is_vertical() || !segment_intersects_box(&edge, body) {
            continue;
        }
        let sorted = edge.sorted_by_x();
        if cx >= sorted.a.x && cx <= sorted.b.x {
            return Some(sorted);
        }
        fallback.get_or_insert(sorted);
    }
    fallback
}

/// Signed slope of an edge in radians. Positive means rising to the right.
pub fn surface_angle(edge: &Segment) -> f32 {
    let e = edge.sorted_by_x();
    (-(e.b.y - e.a.y)).atan2(e.b.x - e.a.x)
}

/// Surface height of `edge` under `x`, clamped to the edge's endpoints.
pub fn snap_height(edge: &Segment, x: f32) -> f32 {
    let e = edge.sorted_by_x();
    let span = (e.b.x - e.a.x).max(MIN_EDGE_SPAN);
    let progress = ((x - e.a.x) / span).clamp(0.0, 1.0);
    e.a.y + (e.b.y - e.a.y) * progress
}

/// Vertical gap between the body's feet and the nearest surface below its
/// center. `f32::INFINITY` when nothing is below.
pub fn distance_to_ground(body: &Aabb, candidates: &[&Collider]) -> f32 {
    let cx = body.center().x;
    let feet = body.bottom();
    let mut nearest = f32::INFINITY;

    for collider in candidates {
        match collider {
            Collider::Box(b) if b.tag == ColliderTag::Static => {
                let shape = &b.shape;
                if cx >= shape.left() && cx <= shape.right() && shape.top() >= feet {
                    nearest = nearest.min(shape.top() - feet);
                }
            }
            Collider::Ramp(ramp) => {
                for edge in ramp.edges() {
                    if edge.is_vertical() {
                        continue;
                    }
                    match edge.y_at(cx) {
                        Some(y) if y >= feet => nearest = nearest.min(y - feet),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    nearest
}

/// Is the point inside any box carrying `tag`?
pub fn point_in_tagged(point: Vec2, candidates: &[&Collider], tag: ColliderTag) -> bool {
    candidates
        .iter()
        .filter_map(|c| c.box_with_tag(tag))
        .any(|shape| shape.contains_point(point))
}

/// Does the body overlap any box carrying `tag`?
pub fn overlaps_tagged(body: &Aabb, candidates: &[&Collider], tag: ColliderTag) -> bool {
    candidates
        .iter()
        .filter_map(|c| c.box_with_tag(tag))
        .any(|shape| within_near_range(body, shape) && body.overlaps(shape))
}
