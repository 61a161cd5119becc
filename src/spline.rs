/// spline.rs
/// Trait for common abstractions over the curve types (single cubic segment, editable spline)
use super::Point;

pub trait Spline<P: Point> {
    /// Evaluate a point on the curve at `t` in `[0, 1]`
    fn eval(&self, t: P::Scalar) -> P;
}
