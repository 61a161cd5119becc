//! Placement of a spline inside its host scene.
//!
//! Control points are stored in the spline's local space. Evaluated points are
//! mapped through the full transform, velocities only through its linear part
//! (rotation and scale), never translated.

use super::Point;

/// Transform of the object owning a spline.
pub trait Placement<P: Point> {
    /// Map a local position into the embedding space.
    fn transform_point(&self, point: P) -> P;

    /// Map a local direction into the embedding space, ignoring translation.
    fn transform_vector(&self, vector: P) -> P;
}

/// Spline lives directly in the embedding space.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Identity;

impl<P: Point> Placement<P> for Identity {
    #[inline]
    fn transform_point(&self, point: P) -> P {
        point
    }

    #[inline]
    fn transform_vector(&self, vector: P) -> P {
        vector
    }
}

/// Pure offset of the owning object.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Translation<P>(pub P);

impl<P: Point> Placement<P> for Translation<P> {
    fn transform_point(&self, point: P) -> P {
        point + self.0
    }

    fn transform_vector(&self, vector: P) -> P {
        vector
    }
}

/// Uniform scale about the local origin followed by a translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaleTranslation<P: Point> {
    pub scale: P::Scalar,
    pub translation: P,
}

impl<P: Point> ScaleTranslation<P> {
    pub fn new(scale: P::Scalar, translation: P) -> Self {
        ScaleTranslation { scale, translation }
    }
}

impl<P: Point> Placement<P> for ScaleTranslation<P> {
    fn transform_point(&self, point: P) -> P {
        point * self.scale + self.translation
    }

    fn transform_vector(&self, vector: P) -> P {
        vector * self.scale
    }
}

impl<P: Point, L: Placement<P>> Placement<P> for &L {
    fn transform_point(&self, point: P) -> P {
        (**self).transform_point(point)
    }

    fn transform_vector(&self, vector: P) -> P {
        (**self).transform_vector(vector)
    }
}
