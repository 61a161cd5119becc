//! # anchorline
//!
//! An editable piecewise cubic Bézier spline for authoring camera paths, rails and
//! guide curves inside an editor.
//!
//! A [`BezierSpline`] stores `3 * curves + 1` control points. Every third point is an
//! anchor shared by two neighbouring segments, the points in between are handles.
//! Each anchor has a [`ControlPointMode`]:
//!
//! - `Free`: the handles move independently
//! - `Aligned`: the handles stay collinear through the anchor
//! - `Mirrored`: the handles stay collinear and equidistant
//!
//! Editing a point or a mode re-enforces the mode of the affected anchor. A spline can be
//! closed into a loop, in which case the first and last anchor are kept identical.
//!
//! Points are generic over the small [`Point`] trait. [`PointN`] is provided, glam
//! vectors are supported with the `glam` feature.
//!
//! ```rust
//! use anchorline::{BezierSpline, ControlPointMode, Point, PointN};
//!
//! let mut spline: BezierSpline<PointN<f64, 3>> = BezierSpline::new();
//! spline.add_curve();
//! spline.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
//! spline.set_control_point(2, PointN::new([3.0, 1.0, 0.0])).unwrap();
//!
//! // the handle on the other side of the anchor was reflected
//! assert_eq!(spline.control_point(4).unwrap(), PointN::new([5.0, -1.0, 0.0]));
//! assert_eq!(spline.point(0.5), PointN::new([4.0, 0.0, 0.0]));
//! assert!(spline.direction(0.25).length() > 0.99);
//! ```
#![no_std]

extern crate alloc;

pub mod adapters;
mod bezier_spline;
mod cubic_bezier;
pub mod debug_draw;
mod error;
mod mode;
mod placement;
mod point;
mod point_generic;
mod quadratic_bezier;
mod snapshot;
mod spline;

pub use bezier_spline::{Anchor, BezierSpline, SplineConfig};
pub use cubic_bezier::CubicBezier;
pub use error::{SplineError, SplineResult};
pub use mode::ControlPointMode;
pub use placement::{Identity, Placement, ScaleTranslation, Translation};
pub use point::Point;
pub use point_generic::PointN;
pub use quadratic_bezier::QuadraticBezier;
pub use snapshot::SplineSnapshot;
pub use spline::Spline;

/// Tolerance for comparing squared distances
#[cfg(test)]
pub(crate) const EPSILON: f64 = 1e-10;
