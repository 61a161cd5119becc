use num_traits::One;

use super::Point;

/// A quadratic Bezier curve defined by a start point, one control point and an end point.
/// Within this crate it mostly shows up as the derivative (hodograph) of a `CubicBezier`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadraticBezier<P> {
    pub(crate) start: P,
    pub(crate) ctrl: P,
    pub(crate) end: P,
}

impl<P> QuadraticBezier<P>
where
    P: Point,
{
    pub fn new(start: P, ctrl: P, end: P) -> Self {
        QuadraticBezier { start, ctrl, end }
    }

    pub fn start(&self) -> P {
        self.start
    }

    pub fn ctrl(&self) -> P {
        self.ctrl
    }

    pub fn end(&self) -> P {
        self.end
    }

    /// Evaluate the curve at t by direct evaluation of the Bernstein polynomial
    pub fn eval(&self, t: P::Scalar) -> P {
        let one = P::Scalar::one();
        let two = one + one;
        let one_t = one - t;

        self.start * (one_t * one_t) + self.ctrl * (two * one_t * t) + self.end * (t * t)
    }

    /// Evaluate the curve at t using the De Casteljau algorithm
    pub fn eval_casteljau(&self, t: P::Scalar) -> P {
        let ctrl_1ab = self.start + (self.ctrl - self.start) * t;
        let ctrl_1bc = self.ctrl + (self.end - self.ctrl) * t;
        ctrl_1ab + (ctrl_1bc - ctrl_1ab) * t
    }
}
