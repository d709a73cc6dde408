//! Broad-phase collider lookup.

use super::shapes::{Aabb, Collider};

/// Source of candidate colliders for a region of the level.
///
/// Implementations may return more colliders than strictly overlap the region;
/// the body runs its own narrow-phase tests.
pub trait CollisionQuery {
    fn query(&self, region: &Aabb) -> Vec<&Collider>;
}

/// Flat list of colliders, scanned linearly.
#[derive(Debug, Clone, Default)]
pub struct FlatColliderSet {
    colliders: Vec<Collider>,
}

impl FlatColliderSet {
    pub fn new(colliders: Vec<Collider>) -> Self {
        Self { colliders }
    }

    pub fn push(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter()
    }
}

impl CollisionQuery for FlatColliderSet {
    fn query(&self, region: &Aabb) -> Vec<&Collider> {
        self.colliders
            .iter()
            .filter(|c| c.bounds().touches(region))
            .collect()
    }
}

impl FromIterator<Collider> for FlatColliderSet {
    fn from_iter<I: IntoIterator<Item = Collider>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
