//! Flat persistence view of a spline.
//!
//! Hosts store the control points, the modes and the loop flag verbatim and hand
//! them back through [`BezierSpline::from_snapshot`]. Restoring validates the
//! structure but does not re-enforce any mode.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tinyvec::TinyVec;

use crate::bezier_spline::{ModeStore, PointStore};
use super::{BezierSpline, ControlPointMode, Identity, Placement, Point, SplineError, SplineResult};

/// Order preserving copy of a spline's state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SplineSnapshot<P> {
    pub points: Vec<P>,
    pub modes: Vec<ControlPointMode>,
    #[cfg_attr(feature = "serde", serde(rename = "loop", default))]
    pub looped: bool,
}

impl<P: Point> SplineSnapshot<P> {
    /// Check the structural invariants of a spline against this snapshot.
    pub fn validate(&self) -> SplineResult<()> {
        let count = self.points.len();
        if count < 4 || (count - 1) % 3 != 0 {
            return Err(SplineError::InvalidPointCount(count));
        }

        let expected = (count - 1) / 3 + 1;
        if self.modes.len() != expected {
            return Err(SplineError::ModeCountMismatch {
                expected,
                found: self.modes.len(),
            });
        }

        if self.looped && (self.points[0] != self.points[count - 1] || self.modes[0] != self.modes[expected - 1]) {
            return Err(SplineError::LoopNotClosed);
        }
        Ok(())
    }
}

impl<P, L> BezierSpline<P, L>
where
    P: Point,
    L: Placement<P>,
{
    /// Copy the flat point list, mode list and loop flag.
    pub fn snapshot(&self) -> SplineSnapshot<P> {
        SplineSnapshot {
            points: self.control_points().to_vec(),
            modes: self.modes().to_vec(),
            looped: self.is_loop(),
        }
    }

    /// Restore a spline owned by an object at `placement`.
    pub fn from_snapshot_with_placement(snapshot: &SplineSnapshot<P>, placement: L) -> SplineResult<Self> {
        if let Err(err) = snapshot.validate() {
            log::warn!("rejected spline snapshot: {}", err);
            return Err(err);
        }

        let mut points: PointStore<P> = TinyVec::default();
        points.extend(snapshot.points.iter().copied());
        let mut modes: ModeStore = TinyVec::default();
        modes.extend(snapshot.modes.iter().copied());
        log::debug!(
            "restored spline with {} curves (loop: {})",
            (snapshot.points.len() - 1) / 3,
            snapshot.looped
        );
        Ok(BezierSpline::from_parts(points, modes, snapshot.looped, placement))
    }
}

impl<P: Point> BezierSpline<P, Identity> {
    /// Restore a spline placed at the origin.
    pub fn from_snapshot(snapshot: &SplineSnapshot<P>) -> SplineResult<Self> {
        Self::from_snapshot_with_placement(snapshot, Identity)
    }
}
