//! Physics domain: collider shapes, geometric tests and the broad-phase query.

mod collision;
mod query;
mod shapes;


pub use collision::{
    MIN_EDGE_SPAN, NEAR_RANGE, distance_to_ground, overlaps_tagged, point_in_tagged,
    ramp_edge_contact, segment_intersects_box, snap_height, surface_angle, within_near_range,
};
pub use query::{CollisionQuery, FlatColliderSet};
pub use shapes::{Aabb, BoxCollider, Collider, ColliderTag, Ramp, Segment, ShapeError};
