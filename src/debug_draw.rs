//! Debug drawing of a spline through an editor supplied sink.
//!
//! The spline never draws itself. Editors implement [`GizmoSink`] on top of their
//! immediate mode gizmo API and call [`draw_gizmos`] while the spline is selected.

use alloc::vec::Vec;

use num_traits::{Float, NumCast, One, ToPrimitive, Zero};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{BezierSpline, Placement, Point};

/// RGBA color, components in `[0, 1]`
pub type Tint = [f32; 4];

pub const WHITE: Tint = [1.0, 1.0, 1.0, 1.0];

/// How a spline is drawn while selected.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebugDrawSettings<S> {
    pub enabled: bool,
    pub tint: Tint,
    pub sphere_radius: S,
    /// Spacing of the samples relative to the number of control points
    pub density: S,
}

impl<S: Float> Default for DebugDrawSettings<S> {
    fn default() -> Self {
        DebugDrawSettings {
            enabled: true,
            tint: WHITE,
            sphere_radius: <S as NumCast>::from(0.03).unwrap_or_else(S::zero),
            density: <S as NumCast>::from(0.2).unwrap_or_else(S::zero),
        }
    }
}

/// Receiver of draw commands, implemented by the host editor.
pub trait GizmoSink<P: Point> {
    fn draw_sphere(&mut self, center: P, radius: P::Scalar, tint: Tint);
}

/// A recorded sphere draw command.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Gizmo<P: Point> {
    pub center: P,
    pub radius: P::Scalar,
    pub tint: Tint,
}

/// Collects the commands instead of drawing them, e.g. for hosts that batch their draws.
impl<P: Point> GizmoSink<P> for Vec<Gizmo<P>> {
    fn draw_sphere(&mut self, center: P, radius: P::Scalar, tint: Tint) {
        self.push(Gizmo { center, radius, tint });
    }
}

/// Upper bound on the spheres drawn for one spline
pub const MAX_GIZMO_SAMPLES: usize = 4096;

/// Draw small spheres along the curve in the embedding space.
///
/// Samples are spaced `density / control_point_count` apart in `t`, starting one step
/// after the curve start. The last sample is always the curve end. At most
/// [`MAX_GIZMO_SAMPLES`] spheres are drawn, denser settings are spread evenly instead.
/// Returns the number of spheres drawn.
pub fn draw_gizmos<P, L, G>(spline: &BezierSpline<P, L>, settings: &DebugDrawSettings<P::Scalar>, sink: &mut G) -> usize
where
    P: Point,
    L: Placement<P>,
    G: GizmoSink<P> + ?Sized,
{
    let count = spline.control_point_count();
    if !settings.enabled || count == 0 {
        return 0;
    }

    let zero = P::Scalar::zero();
    let one = P::Scalar::one();
    let mut step = settings.density / <P::Scalar as NumCast>::from(count).unwrap_or_else(P::Scalar::max_value);
    if !(step > zero) {
        log::warn!("debug draw density must be positive, skipping spline gizmos");
        return 0;
    }

    let mut samples = (one / step).ceil().to_usize().unwrap_or(usize::MAX).max(1);
    if samples > MAX_GIZMO_SAMPLES {
        log::warn!(
            "debug draw density too fine ({} samples), drawing {} instead",
            samples,
            MAX_GIZMO_SAMPLES
        );
        samples = MAX_GIZMO_SAMPLES;
        step = one / <P::Scalar as NumCast>::from(samples).unwrap_or_else(P::Scalar::one);
    }

    for i in 1..=samples {
        let progress = if i == samples {
            one
        } else {
            (step * <P::Scalar as NumCast>::from(i).unwrap_or_else(P::Scalar::one)).min(one)
        };
        sink.draw_sphere(spline.point(progress), settings.sphere_radius, settings.tint);
    }
    samples
}
