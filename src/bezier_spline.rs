//! Editable piecewise cubic Bezier spline.
//!
//! Control points are stored as one flat list where every third point is an anchor
//! shared by two neighbouring segments and the points in between are handles.
//! Each anchor carries a [`ControlPointMode`] which is enforced on its handles
//! whenever a point or mode next to it is edited.

use num_traits::{Float, NumCast, One, ToPrimitive, Zero};
use tinyvec::TinyVec;

use super::{ControlPointMode, CubicBezier, Identity, Placement, Point, Spline, SplineError, SplineResult};

/// Inline capacity for control points before spilling to the heap (five segments)
pub(crate) type PointStore<P> = TinyVec<[P; 16]>;
/// Inline capacity for anchor modes, matching `PointStore`
pub(crate) type ModeStore = TinyVec<[ControlPointMode; 8]>;

/// Removing a curve is refused below this many control points, so one segment always remains
const MIN_POINTS_FOR_REMOVAL: usize = 6;

/// Runtime configuration of a spline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SplineConfig<P> {
    /// Offset between the points generated by `add_curve`, starting at the last point
    pub extension_step: P,
}

impl<P: Point> Default for SplineConfig<P> {
    fn default() -> Self {
        SplineConfig {
            extension_step: P::unit_axis(0),
        }
    }
}

/// One anchor of the spline with the handles on either side of it.
///
/// `handle_in` is `None` on the first anchor and `handle_out` is `None` on the last one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Anchor<P> {
    /// Index of the anchor in the flat control point list
    pub index: usize,
    pub position: P,
    pub handle_in: Option<P>,
    pub handle_out: Option<P>,
    pub mode: ControlPointMode,
}

/// A piecewise cubic Bezier spline made of `curve_count()` segments sharing their end points.
///
/// Invariants kept by every mutation:
/// - `control_point_count() == 3 * curve_count() + 1` and `curve_count() >= 1`
/// - one mode per anchor
/// - while looping the last anchor equals the first one in position and mode
///
/// Generic parameters:
/// P: Generic points 'P' as defined by the Point trait
/// L: Placement of the owning object, applied to evaluated points and velocities
#[derive(Clone, Debug, PartialEq)]
pub struct BezierSpline<P: Point, L = Identity> {
    points: PointStore<P>,
    modes: ModeStore,
    looped: bool,
    placement: L,
    config: SplineConfig<P>,
}

impl<P: Point> BezierSpline<P, Identity> {
    /// Create the default single segment spline placed at the origin.
    pub fn new() -> Self {
        Self::with_placement(Identity)
    }
}

impl<P: Point> Default for BezierSpline<P, Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point, L: Placement<P>> Spline<P> for BezierSpline<P, L> {
    fn eval(&self, t: P::Scalar) -> P {
        self.point(t)
    }
}

/// Cast a count into the scalar type of the points
fn scalar<S: Float>(value: usize) -> S {
    <S as NumCast>::from(value).unwrap_or_else(S::max_value)
}

impl<P, L> BezierSpline<P, L>
where
    P: Point,
    L: Placement<P>,
{
    /// Create the default single segment spline owned by an object at `placement`.
    pub fn with_placement(placement: L) -> Self {
        let mut spline = BezierSpline {
            points: TinyVec::default(),
            modes: TinyVec::default(),
            looped: false,
            placement,
            config: SplineConfig::default(),
        };
        spline.reset();
        spline
    }

    /// Replace the runtime configuration.
    pub fn with_config(mut self, config: SplineConfig<P>) -> Self {
        self.config = config;
        self
    }

    /// Assemble a spline from raw parts, validation is up to the caller.
    pub(crate) fn from_parts(points: PointStore<P>, modes: ModeStore, looped: bool, placement: L) -> Self {
        let spline = BezierSpline {
            points,
            modes,
            looped,
            placement,
            config: SplineConfig::default(),
        };
        spline.debug_check_invariants();
        spline
    }

    pub fn config(&self) -> &SplineConfig<P> {
        &self.config
    }

    pub fn placement(&self) -> &L {
        &self.placement
    }

    /// Move the owning object. Control points stay in local space.
    pub fn set_placement(&mut self, placement: L) {
        self.placement = placement;
    }

    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    pub fn curve_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    /// All control points in local space, anchors at multiples of 3.
    pub fn control_points(&self) -> &[P] {
        &self.points
    }

    /// All anchor modes, one per anchor.
    pub fn modes(&self) -> &[ControlPointMode] {
        &self.modes
    }

    pub fn is_loop(&self) -> bool {
        self.looped
    }

    pub fn control_point(&self, index: usize) -> SplineResult<P> {
        self.check_index(index)?;
        Ok(self.points[index])
    }

    /// Mode of the anchor a control point belongs to.
    /// An anchor and its two flanking handles share one mode.
    pub fn control_point_mode(&self, index: usize) -> SplineResult<ControlPointMode> {
        self.check_index(index)?;
        Ok(self.modes[(index + 1) / 3])
    }

    /// Iterate over the anchors together with their flanking handles.
    pub fn anchors(&self) -> impl Iterator<Item = Anchor<P>> + '_ {
        let last = self.points.len() - 1;
        self.modes.iter().enumerate().map(move |(mode_index, &mode)| {
            let index = mode_index * 3;
            Anchor {
                index,
                position: self.points[index],
                handle_in: if index > 0 { Some(self.points[index - 1]) } else { None },
                handle_out: if index < last { Some(self.points[index + 1]) } else { None },
                mode,
            }
        })
    }

    /// Iterate over the cubic segments in local space.
    pub fn segments(&self) -> impl Iterator<Item = CubicBezier<P>> + '_ {
        self.points
            .windows(4)
            .step_by(3)
            .map(|w| CubicBezier::new(w[0], w[1], w[2], w[3]))
    }

    /// Move a control point.
    ///
    /// Moving an anchor drags both of its handles along by the same offset, so the
    /// tangent at the anchor is kept. While looping the first and last anchor move together.
    /// Afterwards the anchor's mode is enforced on the opposite handle.
    pub fn set_control_point(&mut self, index: usize, point: P) -> SplineResult<()> {
        self.check_index(index)?;
        self.move_control_point(index, point);
        self.debug_check_invariants();
        Ok(())
    }

    /// Set the mode of the anchor a control point belongs to and enforce it.
    pub fn set_control_point_mode(&mut self, index: usize, mode: ControlPointMode) -> SplineResult<()> {
        self.check_index(index)?;
        let mode_index = (index + 1) / 3;
        self.modes[mode_index] = mode;
        if self.looped {
            let last = self.modes.len() - 1;
            if mode_index == 0 {
                self.modes[last] = mode;
            } else if mode_index == last {
                self.modes[0] = mode;
            }
        }
        self.enforce_mode(index);
        self.debug_check_invariants();
        Ok(())
    }

    /// Close or open the curve.
    ///
    /// Closing copies the first anchor's mode onto the last one and snaps the last anchor
    /// onto the first. Opening leaves all points where they are.
    pub fn set_loop(&mut self, looped: bool) {
        self.looped = looped;
        if looped {
            let last = self.modes.len() - 1;
            self.modes[last] = self.modes[0];
            let first = self.points[0];
            self.move_control_point(0, first);
        }
        log::debug!("spline loop {}", if looped { "closed" } else { "opened" });
        self.debug_check_invariants();
    }

    /// Append a segment after the last anchor.
    ///
    /// The three new points are laid out in steps of `SplineConfig::extension_step`
    /// from the last point and the new anchor inherits the last mode.
    pub fn add_curve(&mut self) {
        let step = self.config.extension_step;
        let mut point = self.points[self.points.len() - 1];
        for _ in 0..3 {
            point = point + step;
            self.points.push(point);
        }

        let last_mode = self.modes[self.modes.len() - 1];
        self.modes.push(last_mode);
        self.enforce_mode(self.points.len() - 4);

        if self.looped {
            self.close_loop();
            self.enforce_mode(0);
        }
        log::debug!("added curve, spline now has {} curves", self.curve_count());
        self.debug_check_invariants();
    }

    /// Drop the last segment.
    ///
    /// Returns `false` and leaves the spline untouched if only one segment is left.
    pub fn remove_last_curve(&mut self) -> bool {
        if self.points.len() < MIN_POINTS_FOR_REMOVAL {
            log::debug!("refusing to remove the only curve of the spline");
            return false;
        }

        let len = self.points.len();
        self.points.truncate(len - 3);
        self.modes.pop();
        // the new last anchor used to be interior, take over the shared endpoint
        self.close_loop();
        self.enforce_mode(self.points.len() - 1);
        log::debug!("removed curve, spline now has {} curves", self.curve_count());
        self.debug_check_invariants();
        true
    }

    /// Discard all points and modes and start over with the default single segment.
    pub fn reset(&mut self) {
        let x = P::unit_axis(0);
        self.points.clear();
        for i in 1..=4 {
            self.points.push(x * scalar::<P::Scalar>(i));
        }
        self.modes.clear();
        self.modes.push(ControlPointMode::Free);
        self.modes.push(ControlPointMode::Free);
        self.looped = false;
        log::debug!("spline reset to default curve");
    }

    /// Point on the curve at `t` in `[0, 1]` mapped through the placement.
    /// `t` is clamped, `t >= 1` evaluates the end of the last segment.
    pub fn point(&self, t: P::Scalar) -> P {
        self.placement.transform_point(self.local_point(t))
    }

    /// Point on the curve at `t` in the spline's local space.
    pub fn local_point(&self, t: P::Scalar) -> P {
        let (segment, t) = self.segment_at(t);
        segment.eval(t)
    }

    /// First derivative of the curve at `t`, mapped as a direction (no translation).
    pub fn velocity(&self, t: P::Scalar) -> P {
        let (segment, t) = self.segment_at(t);
        self.placement.transform_vector(segment.velocity(t))
    }

    /// Unit direction of travel at `t`.
    /// Where the velocity vanishes (e.g. a handle sitting on its anchor) this is the zero vector.
    pub fn direction(&self, t: P::Scalar) -> P {
        self.velocity(t).normalized()
    }

    /// Resolve global `t` into the segment containing it and the parameter within that segment
    fn segment_at(&self, t: P::Scalar) -> (CubicBezier<P>, P::Scalar) {
        let zero = P::Scalar::zero();
        let one = P::Scalar::one();
        let count = self.curve_count();

        let (segment, local) = if t >= one {
            (count - 1, one)
        } else {
            // NaN fails the comparison and is treated as the start
            let t = if t > zero { t } else { zero };
            let scaled = t * scalar::<P::Scalar>(count);
            let index = scaled.floor().to_usize().unwrap_or(0);
            if index >= count {
                (count - 1, one)
            } else {
                (index, scaled - scalar::<P::Scalar>(index))
            }
        };

        let i = segment * 3;
        let p = &self.points;
        (CubicBezier::new(p[i], p[i + 1], p[i + 2], p[i + 3]), local)
    }

    fn check_index(&self, index: usize) -> SplineResult<()> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(SplineError::IndexOutOfRange {
                index,
                count: self.points.len(),
            })
        }
    }

    fn translate(&mut self, index: usize, delta: P) {
        self.points[index] = self.points[index] + delta;
    }

    /// Unchecked body of `set_control_point`
    fn move_control_point(&mut self, index: usize, point: P) {
        let last = self.points.len() - 1;
        if index % 3 == 0 {
            let delta = point - self.points[index];
            if self.looped {
                if index == 0 {
                    self.translate(1, delta);
                    self.translate(last - 1, delta);
                    self.points[last] = point;
                } else if index == last {
                    self.points[0] = point;
                    self.translate(1, delta);
                    self.translate(index - 1, delta);
                } else {
                    self.translate(index - 1, delta);
                    self.translate(index + 1, delta);
                }
            } else {
                if index > 0 {
                    self.translate(index - 1, delta);
                }
                if index < last {
                    self.translate(index + 1, delta);
                }
            }
        }
        self.points[index] = point;
        self.enforce_mode(index);
    }

    /// Make the handle opposite to `index` obey the mode of the anchor `index` belongs to.
    ///
    /// The handle on the side of `index` (or the one before the anchor if `index` is the
    /// anchor itself) stays fixed. The other handle is placed on the reflection of the fixed
    /// one through the anchor. `Mirrored` takes the reflected length, `Aligned` keeps the
    /// enforced handle's current length.
    fn enforce_mode(&mut self, index: usize) {
        let mode_index = (index + 1) / 3;
        let mode = self.modes[mode_index];
        let is_endpoint = mode_index == 0 || mode_index == self.modes.len() - 1;
        if !mode.is_constrained() || (!self.looped && is_endpoint) {
            return;
        }

        let len = self.points.len();
        let middle = mode_index * 3;
        // handle indices around the anchor, wrapping over the shared endpoint of a loop
        let before = if middle == 0 { len - 2 } else { middle - 1 };
        let after = if middle + 1 >= len { 1 } else { middle + 1 };
        let (fixed, enforced) = if index <= middle { (before, after) } else { (after, before) };

        let anchor = self.points[middle];
        let mut tangent = anchor - self.points[fixed];
        if mode == ControlPointMode::Aligned {
            tangent = tangent.normalized() * anchor.distance(self.points[enforced]);
        }
        log::trace!("enforcing {} mode at anchor {}: handle {} follows {}", mode, middle, enforced, fixed);
        self.points[enforced] = anchor + tangent;
    }

    /// Copy the first anchor onto the last one while looping
    fn close_loop(&mut self) {
        if !self.looped {
            return;
        }
        let last = self.points.len() - 1;
        self.points[last] = self.points[0];
        let last_mode = self.modes.len() - 1;
        self.modes[last_mode] = self.modes[0];
    }

    fn debug_check_invariants(&self) {
        debug_assert!(self.points.len() >= 4 && (self.points.len() - 1) % 3 == 0);
        debug_assert_eq!(self.modes.len(), self.curve_count() + 1);
        debug_assert!(
            !self.looped
                || (self.points[0] == self.points[self.points.len() - 1]
                    && self.modes[0] == self.modes[self.modes.len() - 1])
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointN, ScaleTranslation, Translation, EPSILON};
    use alloc::vec::Vec;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    type P3 = PointN<f64, 3>;

    fn p(x: f64, y: f64, z: f64) -> P3 {
        PointN::new([x, y, z])
    }

    fn dot(a: P3, b: P3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    fn cross(a: P3, b: P3) -> P3 {
        p(a[1] * b[2] - a[2] * b[1], a[2] * b[0] - a[0] * b[2], a[0] * b[1] - a[1] * b[0])
    }

    fn assert_points_eq(a: P3, b: P3) {
        assert!((a - b).squared_length() < EPSILON, "{:?} != {:?}", a, b);
    }

    /// Asserts the handles around the anchor at `middle` point in opposite directions
    fn assert_collinear_through(spline: &BezierSpline<P3>, before: usize, middle: usize, after: usize) {
        let pts = spline.control_points();
        let a = pts[before] - pts[middle];
        let b = pts[after] - pts[middle];
        assert!(cross(a, b).squared_length() < 1e-9, "handles not collinear: {:?} {:?}", a, b);
        assert!(dot(a, b) <= 1e-9, "handles on the same side: {:?} {:?}", a, b);
    }

    /// Deterministic pseudo random coordinates for property style tests
    struct Lcg(u64);

    impl Lcg {
        fn next(&mut self) -> f64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 10.0 - 5.0
        }

        fn point(&mut self) -> P3 {
            p(self.next(), self.next(), self.next())
        }
    }

    fn two_curves() -> BezierSpline<P3> {
        let mut spline = BezierSpline::new();
        spline.add_curve();
        spline
    }

    #[test]
    fn default_curve() {
        let spline: BezierSpline<P3> = BezierSpline::new();
        assert_eq!(
            spline.control_points(),
            &[p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(3.0, 0.0, 0.0), p(4.0, 0.0, 0.0)]
        );
        assert_eq!(spline.modes(), &[ControlPointMode::Free, ControlPointMode::Free]);
        assert_eq!(spline.curve_count(), 1);
        assert_eq!(spline.control_point_count(), 4);
        assert!(!spline.is_loop());
        assert_eq!(spline.point(0.0), p(1.0, 0.0, 0.0));
        assert_eq!(spline.point(1.0), p(4.0, 0.0, 0.0));
    }

    #[test]
    fn endpoints_map_exactly_through_placement() {
        let offset = p(10.0, -2.0, 0.5);
        let mut spline: BezierSpline<P3, _> = BezierSpline::with_placement(Translation(offset));
        spline.add_curve();
        spline.add_curve();
        spline.set_control_point(4, p(5.0, 3.0, 1.0)).unwrap();
        let pts = spline.control_points();
        assert_eq!(spline.point(0.0), pts[0] + offset);
        assert_eq!(spline.point(1.0), pts[pts.len() - 1] + offset);
        assert_eq!(spline.local_point(1.0), pts[pts.len() - 1]);
    }

    #[test]
    fn parameter_is_clamped() {
        let spline = two_curves();
        assert_eq!(spline.point(-3.0), spline.point(0.0));
        assert_eq!(spline.point(7.5), spline.point(1.0));
        assert_eq!(spline.point(f64::NAN), spline.point(0.0));
    }

    #[test]
    fn parameter_selects_segment() {
        let mut spline = two_curves();
        spline.set_control_point(4, p(5.0, 2.0, 0.0)).unwrap();
        let second = spline.segments().nth(1).unwrap();
        assert_points_eq(spline.point(0.75), second.eval(0.5));
        assert_points_eq(spline.point(0.5), spline.control_points()[3]);

        let first = spline.segments().next().unwrap();
        assert_points_eq(spline.point(0.25), first.eval(0.5));
    }

    #[test]
    fn velocity_ignores_translation() {
        let spline: BezierSpline<P3, _> = BezierSpline::with_placement(Translation(p(10.0, 10.0, 10.0)));
        // evenly spaced collinear handles give a constant speed of 3
        for t in [0.0, 0.3, 0.6, 1.0] {
            assert_points_eq(spline.velocity(t), p(3.0, 0.0, 0.0));
            assert_points_eq(spline.direction(t), p(1.0, 0.0, 0.0));
        }

        let scaled: BezierSpline<P3, _> = BezierSpline::with_placement(ScaleTranslation::new(2.0, p(1.0, 1.0, 1.0)));
        assert_points_eq(scaled.velocity(0.5), p(6.0, 0.0, 0.0));
        assert_points_eq(scaled.point(0.0), p(3.0, 1.0, 1.0));
    }

    #[test]
    fn direction_of_vanishing_velocity_is_zero() {
        let mut spline: BezierSpline<P3> = BezierSpline::new();
        spline.set_control_point(1, p(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(spline.velocity(0.0), P3::default());
        assert_eq!(spline.direction(0.0), P3::default());
    }

    #[test]
    fn out_of_range_indices_fail() {
        let mut spline = two_curves();
        let before = spline.clone();
        let err = SplineError::IndexOutOfRange { index: 7, count: 7 };
        assert_eq!(spline.control_point(7), Err(err));
        assert_eq!(spline.control_point_mode(7), Err(err));
        assert_eq!(spline.set_control_point(7, p(0.0, 0.0, 0.0)), Err(err));
        assert_eq!(spline.set_control_point_mode(7, ControlPointMode::Mirrored), Err(err));
        assert_eq!(spline, before);
        assert_eq!(spline.control_point(6), Ok(p(7.0, 0.0, 0.0)));
    }

    #[test]
    fn mode_is_shared_around_each_anchor() {
        let mut spline = two_curves();
        spline.add_curve();
        spline.set_control_point_mode(3, ControlPointMode::Aligned).unwrap();
        spline.set_control_point_mode(7, ControlPointMode::Mirrored).unwrap();
        for i in 0..spline.control_point_count() {
            assert_eq!(spline.control_point_mode(i).unwrap(), spline.modes()[(i + 1) / 3]);
        }
        assert_eq!(spline.control_point_mode(2).unwrap(), ControlPointMode::Aligned);
        assert_eq!(spline.control_point_mode(4).unwrap(), ControlPointMode::Aligned);
        assert_eq!(spline.control_point_mode(5).unwrap(), ControlPointMode::Mirrored);
        assert_eq!(spline.control_point_mode(7).unwrap(), ControlPointMode::Mirrored);
        assert_eq!(spline.control_point_mode(1).unwrap(), ControlPointMode::Free);
        assert_eq!(spline.control_point_mode(8).unwrap(), ControlPointMode::Free);
    }

    #[test]
    fn moving_an_anchor_drags_its_handles() {
        let mut spline = two_curves();
        let delta = p(0.5, 2.0, -1.0);
        let before: Vec<P3> = spline.control_points().to_vec();
        spline.set_control_point(3, before[3] + delta).unwrap();
        let after = spline.control_points();
        assert_eq!(after[2], before[2] + delta);
        assert_eq!(after[3], before[3] + delta);
        assert_eq!(after[4], before[4] + delta);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[5], before[5]);
    }

    #[test]
    fn moving_an_open_endpoint_drags_one_handle() {
        let mut spline = two_curves();
        let delta = p(0.0, 1.0, 0.0);
        let before: Vec<P3> = spline.control_points().to_vec();
        spline.set_control_point(0, before[0] + delta).unwrap();
        spline.set_control_point(6, before[6] + delta).unwrap();
        let after = spline.control_points();
        assert_eq!(after[1], before[1] + delta);
        assert_eq!(after[5], before[5] + delta);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[4], before[4]);
    }

    #[test]
    fn mirrored_handle_reflects() {
        let mut spline = two_curves();
        spline.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
        spline.set_control_point(2, p(3.0, 1.0, 0.0)).unwrap();
        let pts = spline.control_points();
        assert_eq!(pts[4], pts[3] * 2.0 - pts[2]);
        assert_eq!(pts[4], p(5.0, -1.0, 0.0));
        assert_relative_eq!(pts[3].distance(pts[4]), pts[3].distance(pts[2]));
    }

    #[test]
    fn mirrored_handle_follows_right_side_edits() {
        let mut spline = two_curves();
        spline.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
        spline.set_control_point(4, p(6.0, 0.0, 2.0)).unwrap();
        let pts = spline.control_points();
        assert_eq!(pts[4], p(6.0, 0.0, 2.0));
        assert_points_eq(pts[2], p(2.0, 0.0, -2.0));
    }

    #[test]
    fn aligned_handle_keeps_its_length() {
        let mut spline = two_curves();
        spline.set_control_point_mode(3, ControlPointMode::Aligned).unwrap();
        let anchor = spline.control_points()[3];
        let length = anchor.distance(spline.control_points()[4]);

        spline.set_control_point(2, p(2.0, 2.0, 0.0)).unwrap();
        let pts = spline.control_points();
        assert_relative_eq!(anchor.distance(pts[4]), length, epsilon = 1e-12);
        assert_collinear_through(&spline, 2, 3, 4);
        let expected = anchor + (anchor - p(2.0, 2.0, 0.0)).normalized() * length;
        assert_points_eq(pts[4], expected);
    }

    #[test]
    fn aligned_handle_collapses_onto_anchor_without_reference() {
        let mut spline = two_curves();
        spline.set_control_point_mode(3, ControlPointMode::Aligned).unwrap();
        let anchor = spline.control_points()[3];

        spline.set_control_point(2, anchor).unwrap();
        let pts = spline.control_points();
        assert_eq!(pts[2], anchor);
        assert_eq!(pts[4], anchor);
        assert!(pts.iter().all(|pt| (0..3).all(|axis| !pt[axis].is_nan())));
        assert!(!spline.point(0.5)[0].is_nan());
    }

    #[test]
    fn aligned_and_mirrored_differ_on_unequal_handles() {
        let mut aligned = two_curves();
        aligned.set_control_point(4, p(7.0, 0.0, 0.0)).unwrap();
        let mut mirrored = aligned.clone();

        aligned.set_control_point_mode(3, ControlPointMode::Aligned).unwrap();
        mirrored.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
        // enforcing from the anchor keeps the left handle and adjusts the right one
        assert_points_eq(aligned.control_points()[4], p(7.0, 0.0, 0.0));
        assert_points_eq(mirrored.control_points()[4], p(5.0, 0.0, 0.0));

        aligned.set_control_point(2, p(4.0, 1.0, 0.0)).unwrap();
        mirrored.set_control_point(2, p(4.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(aligned.control_points()[3].distance(aligned.control_points()[4]), 3.0, epsilon = 1e-12);
        assert_relative_eq!(mirrored.control_points()[3].distance(mirrored.control_points()[4]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn open_endpoints_are_never_enforced() {
        let mut spline = two_curves();
        let before: Vec<P3> = spline.control_points().to_vec();
        spline.set_control_point_mode(0, ControlPointMode::Mirrored).unwrap();
        spline.set_control_point_mode(6, ControlPointMode::Mirrored).unwrap();
        assert_eq!(spline.control_points(), before.as_slice());
        spline.set_control_point(1, p(0.0, 5.0, 0.0)).unwrap();
        assert_eq!(spline.control_points()[5], before[5]);
    }

    #[test]
    fn constrained_modes_hold_after_random_edits() {
        let mut rng = Lcg(42);
        for mode in [ControlPointMode::Aligned, ControlPointMode::Mirrored] {
            let mut spline = two_curves();
            spline.add_curve();
            for anchor in [3, 6] {
                spline.set_control_point_mode(anchor, mode).unwrap();
            }
            for _ in 0..200 {
                let index = ((rng.next() + 5.0) * 100.0) as usize % spline.control_point_count();
                spline.set_control_point(index, rng.point()).unwrap();
                for middle in [3, 6] {
                    let pts = spline.control_points();
                    let (a, b) = (pts[middle - 1] - pts[middle], pts[middle + 1] - pts[middle]);
                    if a.squared_length() < 1e-12 || b.squared_length() < 1e-12 {
                        continue;
                    }
                    assert_collinear_through(&spline, middle - 1, middle, middle + 1);
                    if mode == ControlPointMode::Mirrored {
                        assert_abs_diff_eq!(a.length(), b.length(), epsilon = 1e-9);
                    }
                }
            }
        }
    }

    #[test]
    fn add_and_remove_curves() {
        let mut spline: BezierSpline<P3> = BezierSpline::new();
        spline.set_control_point_mode(3, ControlPointMode::Aligned).unwrap();
        spline.add_curve();
        assert_eq!(spline.curve_count(), 2);
        assert_eq!(spline.control_point_count(), 7);
        assert_eq!(spline.modes(), &[ControlPointMode::Free, ControlPointMode::Aligned, ControlPointMode::Aligned]);
        assert_eq!(&spline.control_points()[4..], &[p(5.0, 0.0, 0.0), p(6.0, 0.0, 0.0), p(7.0, 0.0, 0.0)]);

        assert!(spline.remove_last_curve());
        assert_eq!(spline.curve_count(), 1);
        assert_eq!(spline.control_point_count(), 4);
        assert_eq!(spline.modes().len(), 2);

        let before = spline.clone();
        assert!(!spline.remove_last_curve());
        assert_eq!(spline, before);
    }

    #[test]
    fn add_curve_uses_configured_step() {
        let mut spline: BezierSpline<P3> = BezierSpline::new().with_config(SplineConfig {
            extension_step: p(0.0, 0.0, 2.0),
        });
        spline.add_curve();
        assert_eq!(
            &spline.control_points()[4..],
            &[p(4.0, 0.0, 2.0), p(4.0, 0.0, 4.0), p(4.0, 0.0, 6.0)]
        );
    }

    #[test]
    fn add_curve_enforces_the_new_joint() {
        let mut spline: BezierSpline<P3> = BezierSpline::new();
        spline.set_control_point(2, p(3.0, 1.0, 0.0)).unwrap();
        spline.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
        spline.add_curve();
        let pts = spline.control_points();
        assert_eq!(pts[4], pts[3] * 2.0 - pts[2]);
    }

    #[test]
    fn storage_spills_for_long_splines() {
        let mut spline: BezierSpline<P3> = BezierSpline::new();
        for _ in 0..20 {
            spline.add_curve();
        }
        assert_eq!(spline.curve_count(), 21);
        assert_eq!(spline.control_point_count(), 64);
        assert_eq!(spline.modes().len(), 22);
        assert_eq!(spline.point(1.0), p(64.0, 0.0, 0.0));
        for _ in 0..30 {
            spline.remove_last_curve();
        }
        assert_eq!(spline.curve_count(), 1);
    }

    #[test]
    fn closing_the_loop_snaps_the_end() {
        let mut spline = two_curves();
        spline.set_control_point_mode(6, ControlPointMode::Aligned).unwrap();
        spline.set_loop(true);
        assert!(spline.is_loop());
        let pts = spline.control_points();
        assert_eq!(pts[6], pts[0]);
        assert_eq!(spline.modes()[2], spline.modes()[0]);
        assert_eq!(spline.point(1.0), spline.point(0.0));

        spline.set_control_point(0, p(0.0, 3.0, 0.0)).unwrap();
        assert_eq!(spline.control_points()[6], p(0.0, 3.0, 0.0));
    }

    #[test]
    fn looped_endpoint_moves_both_neighbours() {
        let mut spline = two_curves();
        spline.set_loop(true);
        let before: Vec<P3> = spline.control_points().to_vec();
        let delta = p(1.0, 1.0, 0.0);

        spline.set_control_point(6, before[6] + delta).unwrap();
        let after = spline.control_points();
        assert_eq!(after[0], before[0] + delta);
        assert_eq!(after[6], before[6] + delta);
        assert_eq!(after[1], before[1] + delta);
        assert_eq!(after[5], before[5] + delta);
    }

    #[test]
    fn looped_mode_wraps_and_is_enforced() {
        let mut spline = two_curves();
        spline.set_control_point(5, p(6.0, -1.0, 0.0)).unwrap();
        spline.set_loop(true);
        spline.set_control_point_mode(6, ControlPointMode::Mirrored).unwrap();
        assert_eq!(spline.modes()[0], ControlPointMode::Mirrored);
        assert_eq!(spline.modes()[2], ControlPointMode::Mirrored);

        // editing the handle before the shared anchor reflects into the first handle
        spline.set_control_point(5, p(0.0, -2.0, 0.0)).unwrap();
        let pts = spline.control_points();
        assert_eq!(pts[1], pts[0] * 2.0 - pts[5]);

        // and the other way around
        spline.set_control_point(1, p(1.0, 0.0, 4.0)).unwrap();
        let pts = spline.control_points();
        assert_eq!(pts[5], pts[0] * 2.0 - pts[1]);
    }

    #[test]
    fn add_curve_keeps_the_loop_closed() {
        let mut spline = two_curves();
        spline.set_loop(true);
        spline.set_control_point_mode(0, ControlPointMode::Mirrored).unwrap();
        spline.add_curve();
        let pts = spline.control_points();
        let last = pts.len() - 1;
        assert_eq!(spline.curve_count(), 3);
        assert_eq!(pts[last], pts[0]);
        assert_eq!(spline.modes()[3], ControlPointMode::Mirrored);
        assert_points_eq(pts[1], pts[0] * 2.0 - pts[last - 1]);
    }

    #[test]
    fn remove_curve_keeps_the_loop_closed() {
        let mut spline = two_curves();
        spline.add_curve();
        spline.set_control_point_mode(6, ControlPointMode::Aligned).unwrap();
        spline.set_loop(true);
        assert!(spline.remove_last_curve());
        let pts = spline.control_points();
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[6], pts[0]);
        assert_eq!(spline.modes()[2], spline.modes()[0]);
    }

    #[test]
    fn opening_the_loop_keeps_points() {
        let mut spline = two_curves();
        spline.set_loop(true);
        let closed: Vec<P3> = spline.control_points().to_vec();
        spline.set_loop(false);
        assert_eq!(spline.control_points(), closed.as_slice());

        spline.set_control_point(0, p(-1.0, 0.0, 0.0)).unwrap();
        assert_eq!(spline.control_points()[6], closed[6]);
    }

    #[test]
    fn loop_invariant_survives_random_edits() {
        let mut rng = Lcg(7);
        let mut spline = two_curves();
        spline.set_loop(true);
        for step in 0..300 {
            let index = ((rng.next() + 5.0) * 100.0) as usize % spline.control_point_count();
            match step % 7 {
                0 => spline.add_curve(),
                1 => {
                    spline.remove_last_curve();
                }
                2 => {
                    let mode = ControlPointMode::ALL[index % 3];
                    spline.set_control_point_mode(index, mode).unwrap();
                }
                _ => spline.set_control_point(index, rng.point()).unwrap(),
            }
            let pts = spline.control_points();
            assert_eq!(pts.len(), 3 * spline.curve_count() + 1);
            assert_eq!(spline.modes().len(), spline.curve_count() + 1);
            assert_eq!(pts[0], pts[pts.len() - 1]);
            assert_eq!(spline.modes()[0], spline.modes()[spline.modes().len() - 1]);
        }
    }

    #[test]
    fn reset_restores_default() {
        let mut spline = two_curves();
        spline.set_loop(true);
        spline.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
        spline.reset();
        assert_eq!(spline, BezierSpline::new());
    }

    #[test]
    fn anchors_view() {
        let mut spline = two_curves();
        spline.set_control_point_mode(3, ControlPointMode::Mirrored).unwrap();
        let anchors: Vec<Anchor<P3>> = spline.anchors().collect();
        assert_eq!(anchors.len(), 3);
        assert_eq!(anchors[0].handle_in, None);
        assert_eq!(anchors[0].handle_out, Some(p(2.0, 0.0, 0.0)));
        assert_eq!(anchors[1].index, 3);
        assert_eq!(anchors[1].position, p(4.0, 0.0, 0.0));
        assert_eq!(anchors[1].handle_in, Some(p(3.0, 0.0, 0.0)));
        assert_eq!(anchors[1].handle_out, Some(p(5.0, 0.0, 0.0)));
        assert_eq!(anchors[1].mode, ControlPointMode::Mirrored);
        assert_eq!(anchors[2].handle_out, None);
    }

    #[test]
    fn spline_trait_eval() {
        let spline = two_curves();
        let curve: &dyn Spline<P3> = &spline;
        assert_eq!(curve.eval(0.5), p(4.0, 0.0, 0.0));
    }
}
