use crate::geometry::PlacementTransform;

/// Trait for types that can detect collisions between `Self` and `T`.
pub trait CollidesWith<T> {
    fn collides_with(&self, other: &T) -> bool;
}

/// Trait for types that can compute the minimum distance between `Self` and `T`.
pub trait DistanceTo<T> {
    /// Minimum distance between two primitives. Will be 0 in case of a collision.
    fn distance_to(&self, other: &T) -> f64;

    /// Squared version of [DistanceTo::distance_to]
    fn sq_distance_to(&self, other: &T) -> f64;
}

/// Trait for types that can be modified by a [`PlacementTransform`].
pub trait Transformable: Clone {
    /// Applies a transformation to `self`.
    fn transform(&mut self, t: &PlacementTransform) -> &mut Self;

    /// Applies a transformation to a clone.
    fn transform_clone(&self, t: &PlacementTransform) -> Self {
        let mut clone = self.clone();
        clone.transform(t);
        clone
    }
}
