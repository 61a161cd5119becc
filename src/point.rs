use core::ops::{Add, Mul, Sub};

use num_traits::{Float, One, Zero};

/// Trait defined over generic points P which themselves are generic over their Scalar type.
/// Many libraries already provide Point-types and the mathematical operations
/// that we need for working with curves, so that implementing methods requires mostly wrapping.
/// Keeping the trait as minimal as possible to make integration with other libraries easy
pub trait Point:
    Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<<Self as Point>::Scalar, Output = Self>
    + Copy
    + PartialEq
    + Default
{
    type Scalar: Float + Default;
    const DIM: usize;

    /// Returns the component of the Point on its axis corresponding to index e.g. [0, 1, 2] -> [x, y, z]
    fn axis(&self, index: usize) -> Self::Scalar;

    /// Overwrites the component on the axis at `index`
    fn set_axis(&mut self, index: usize, value: Self::Scalar);

    /// Returns the squared L2 Norm of the Point interpreted as a Vector
    fn squared_length(&self) -> Self::Scalar;

    /// Unit vector along the axis at `index`
    fn unit_axis(index: usize) -> Self {
        let mut p = Self::default();
        p.set_axis(index, Self::Scalar::one());
        p
    }

    /// L2 Norm of the Point interpreted as a Vector
    fn length(&self) -> Self::Scalar {
        self.squared_length().sqrt()
    }

    fn distance(&self, other: Self) -> Self::Scalar {
        (*self - other).length()
    }

    /// Returns the vector scaled to unit length, or the zero vector if it has no length.
    fn normalized(&self) -> Self {
        let len = self.length();
        if len > Self::Scalar::zero() {
            *self * len.recip()
        } else {
            Self::default()
        }
    }
}
