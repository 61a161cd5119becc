//! Glam adapter implementations.
//!
//! Enable this adapter with the `glam` feature to use glam vectors as a `Point`
//! and glam affine transforms as the `Placement` of a spline. Add `glam` as a
//! direct dependency to construct the values in your own code.
//!
//! # Example
//! ```rust,no_run
//! use glam::{Affine3A, Quat, Vec3};
//! use anchorline::{BezierSpline, ControlPointMode};
//!
//! let placement = Affine3A::from_rotation_translation(Quat::from_rotation_y(1.0), Vec3::new(0.0, 2.0, 0.0));
//! let mut rail = BezierSpline::<Vec3, _>::with_placement(placement);
//! rail.add_curve();
//! rail.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
//!
//! let world = rail.point(0.25);
//! let heading = rail.direction(0.25);
//! # let _ = (world, heading);
//! ```

use glam::{Affine2, Affine3A, DAffine2, DAffine3, DVec2, DVec3, Vec2, Vec3, Vec3A};

use crate::placement::Placement;
use crate::point::Point;

macro_rules! impl_glam_point {
    ($vec:ty, $scalar:ty, $dim:expr) => {
        impl Point for $vec {
            type Scalar = $scalar;
            const DIM: usize = $dim;

            fn axis(&self, index: usize) -> $scalar {
                self[index]
            }

            fn set_axis(&mut self, index: usize, value: $scalar) {
                self[index] = value;
            }

            fn squared_length(&self) -> $scalar {
                self.length_squared()
            }
        }
    };
}

impl_glam_point!(Vec2, f32, 2);
impl_glam_point!(Vec3, f32, 3);
impl_glam_point!(Vec3A, f32, 3);
impl_glam_point!(DVec2, f64, 2);
impl_glam_point!(DVec3, f64, 3);

impl Placement<Vec3> for Affine3A {
    fn transform_point(&self, point: Vec3) -> Vec3 {
        self.transform_point3(point)
    }

    fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.transform_vector3(vector)
    }
}

impl Placement<Vec3A> for Affine3A {
    fn transform_point(&self, point: Vec3A) -> Vec3A {
        self.transform_point3a(point)
    }

    fn transform_vector(&self, vector: Vec3A) -> Vec3A {
        self.transform_vector3a(vector)
    }
}

impl Placement<DVec3> for DAffine3 {
    fn transform_point(&self, point: DVec3) -> DVec3 {
        self.transform_point3(point)
    }

    fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.transform_vector3(vector)
    }
}

impl Placement<Vec2> for Affine2 {
    fn transform_point(&self, point: Vec2) -> Vec2 {
        self.transform_point2(point)
    }

    fn transform_vector(&self, vector: Vec2) -> Vec2 {
        self.transform_vector2(vector)
    }
}

impl Placement<DVec2> for DAffine2 {
    fn transform_point(&self, point: DVec2) -> DVec2 {
        self.transform_point2(point)
    }

    fn transform_vector(&self, vector: DVec2) -> DVec2 {
        self.transform_vector2(vector)
    }
}
