//! Error types for spline editing and restoring.

use thiserror::Error;

/// Errors returned by index based accessors and snapshot restoring.
///
/// All of these are contract violations by the caller, there are no transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplineError {
    /// Control point index outside `[0, count)`.
    #[error("control point index {index} out of range (control point count is {count})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of control points at the time of the call.
        count: usize,
    },

    /// Point list length is not `3 * curves + 1` with at least one curve.
    #[error("invalid control point count {0} (expected 3 * curves + 1, at least 4)")]
    InvalidPointCount(usize),

    /// Mode list length does not match the number of anchors.
    #[error("mode count {found} does not match anchor count {expected}")]
    ModeCountMismatch {
        /// Number of anchors implied by the point list.
        expected: usize,
        /// Number of modes supplied.
        found: usize,
    },

    /// A looped spline whose first and last anchor (or mode) differ.
    #[error("looped spline has differing first and last anchors")]
    LoopNotClosed,
}

/// Result type for spline operations.
pub type SplineResult<T> = core::result::Result<T, SplineError>;
