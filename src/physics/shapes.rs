//! Static collider shapes: boxes, ramp triangles and line segments.
//!
//! World space is y-down: `pos` is the top-left corner of a box and a
//! larger `y` is lower on screen.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Error raised when building a collider from malformed geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeError {
    NonPositiveExtent { w: f32, h: f32 },
    DegenerateRamp { points: [Vec2; 3] },
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::NonPositiveExtent { w, h } => {
                write!(f, "box extents must be positive, got {}x{}", w, h)
            }
            ShapeError::DegenerateRamp { points } => {
                write!(f, "ramp points are collinear: {:?}", points)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Gameplay role of a static collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ColliderTag {
    /// Solid ground, ceilings and walls the body cannot pass.
    Static,
    /// Non-solid zone that enables wall jumps and plasma climbing.
    Wall,
    Ramp,
    /// Touching it kills the runner.
    Death,
    Decoration,
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(pos: Vec2, w: f32, h: f32) -> Result<Self, ShapeError> {
        if w > 0.0 && h > 0.0 {
            Ok(Self { pos, w, h })
        } else {
            Err(ShapeError::NonPositiveExtent { w, h })
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.w / 2.0, self.pos.y + self.h / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Strict overlap test. Boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Inclusive overlap test, used for broad-phase filtering.
    pub fn touches(&self, other: &Aabb) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Top, right, bottom and left edges, in that order.
    pub fn edges(&self) -> [Segment; 4] {
        let tl = self.pos;
        let tr = Vec2::new(self.right(), self.top());
        let br = Vec2::new(self.right(), self.bottom());
        let bl = Vec2::new(self.left(), self.bottom());
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }

    /// Grow the box by `margin` on the left/right and `up`/`down` vertically.
    pub fn expanded(&self, margin: f32, up: f32, down: f32) -> Aabb {
        Aabb {
            pos: Vec2::new(self.pos.x - margin, self.pos.y - up),
            w: self.w + margin * 2.0,
            h: self.h + up + down,
        }
    }
}

/// Line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Same segment with endpoints ordered left to right.
    pub fn sorted_by_x(&self) -> Segment {
        if self.a.x <= self.b.x {
            *self
        } else {
            Segment::new(self.b, self.a)
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.a.x == self.b.x
    }

    /// Proper or touching intersection. Parallel segments never intersect.
    pub fn intersects(&self, other: &Segment) -> bool {
        let r = self.b - self.a;
        let s = other.b - other.a;
        let denom = r.perp_dot(s);
        if denom == 0.0 {
            return false;
        }
        let qp = other.a - self.a;
        let t = qp.perp_dot(s) / denom;
        let u = qp.perp_dot(r) / denom;
        (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
    }

    /// Y of the segment at `x`, or `None` when `x` lies outside its span.
    pub fn y_at(&self, x: f32) -> Option<f32> {
        let seg = self.sorted_by_x();
        if x < seg.a.x || x > seg.b.x {
            return None;
        }
        if seg.is_vertical() {
            return Some(seg.a.y.min(seg.b.y));
        }
        let t = (x - seg.a.x) / (seg.b.x - seg.a.x);
        Some(seg.a.y + (seg.b.y - seg.a.y) * t)
    }
}

/// Triangular sloped collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    points: [Vec2; 3],
}

impl Ramp {
    pub fn new(p1: Vec2, p2: Vec2, p3: Vec2) -> Result<Self, ShapeError> {
        let area2 = (p2 - p1).perp_dot(p3 - p1);
        if area2.abs() <= f32::EPSILON {
            return Err(ShapeError::DegenerateRamp {
                points: [p1, p2, p3],
            });
        }
        Ok(Self {
            points: [p1, p2, p3],
        })
    }

    pub fn points(&self) -> [Vec2; 3] {
        self.points
    }

    /// Index of the topmost vertex (smallest y; first one wins on ties).
    fn apex_index(&self) -> usize {
        let mut best = 0;
        for i in 1..3 {
            if self.points[i].y < self.points[best].y {
                best = i;
            }
        }
        best
    }

    pub fn apex(&self) -> Vec2 {
        self.points[self.apex_index()]
    }

    /// The two edges adjoining the topmost vertex. The base edge is left out.
    pub fn top_edges(&self) -> [Segment; 2] {
        let i = self.apex_index();
        let apex = self.points[i];
        [
            Segment::new(apex, self.points[(i + 1) % 3]),
            Segment::new(apex, self.points[(i + 2) % 3]),
        ]
    }

    pub fn edges(&self) -> [Segment; 3] {
        let [p1, p2, p3] = self.points;
        [
            Segment::new(p1, p2),
            Segment::new(p2, p3),
            Segment::new(p3, p1),
        ]
    }

    pub fn bounds(&self) -> Aabb {
        let min = self.points[0].min(self.points[1]).min(self.points[2]);
        let max = self.points[0].max(self.points[1]).max(self.points[2]);
        // Flat triangles still get a usable extent for broad-phase tests.
        Aabb {
            pos: min,
            w: (max.x - min.x).max(f32::EPSILON),
            h: (max.y - min.y).max(f32::EPSILON),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub shape: Aabb,
    pub tag: ColliderTag,
}

impl BoxCollider {
    pub fn new(x: f32, y: f32, w: f32, h: f32, tag: ColliderTag) -> Result<Self, ShapeError> {
        Ok(Self {
            shape: Aabb::new(Vec2::new(x, y), w, h)?,
            tag,
        })
    }
}

/// Any static level collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Box(BoxCollider),
    Ramp(Ramp),
}

impl Collider {
    pub fn tag(&self) -> ColliderTag {
        match self {
            Collider::Box(b) => b.tag,
            Collider::Ramp(_) => ColliderTag::Ramp,
        }
    }

    pub fn bounds(&self) -> Aabb {
        match self {
            Collider::Box(b) => b.shape,
            Collider::Ramp(r) => r.bounds(),
        }
    }

    pub fn as_box(&self) -> Option<&BoxCollider> {
        match self {
            Collider::Box(b) => Some(b),
            Collider::Ramp(_) => None,
        }
    }

    pub fn as_ramp(&self) -> Option<&Ramp> {
        match self {
            Collider::Ramp(r) => Some(r),
            Collider::Box(_) => None,
        }
    }

    /// Solid boxes take part in rectangle resolution.
    pub fn solid_box(&self) -> Option<&Aabb> {
        match self {
            Collider::Box(b) if b.tag == ColliderTag::Static => Some(&b.shape),
            _ => None,
        }
    }

    pub fn box_with_tag(&self, tag: ColliderTag) -> Option<&Aabb> {
        match self {
            Collider::Box(b) if b.tag == tag => Some(&b.shape),
            _ => None,
        }
    }
}
