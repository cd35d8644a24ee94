use thiserror::Error;

/// Errors produced by the ODS geometry engine.
///
/// All variants except [`OdsError::OutOfFieldOfView`] are fatal: a degenerate
/// rig or camera is a configuration problem, not a transient condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OdsError {
    /// A geometric query ran before its required setup step.
    #[error("{0} is not initialized")]
    NotInitialized(String),
    /// Input had the wrong number of components.
    #[error("expected a {expected}D input, got {got} components")]
    InvalidDimension { expected: usize, got: usize },
    /// Closed-form geometry hit a zero denominator or an out-of-domain argument.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
    /// Queried angle lies outside half the horizontal field of view.
    ///
    /// Reported as a warning; callers continue with the extrapolated result.
    #[error("angle {theta:.4} rad exceeds half field of view {half_fov:.4} rad")]
    OutOfFieldOfView { theta: f64, half_fov: f64 },
    /// Exhaustive sampling found no qualifying points.
    #[error("sampling failed: {0}")]
    SamplingFailure(String),
    /// Calibration record cannot describe a usable pinhole camera.
    #[error("invalid calibration for {camera}: {reason}")]
    InvalidCalibration { camera: String, reason: String },
    /// Calibration map lacks a camera in the `cam0..cam{N-1}` sequence.
    #[error("calibration has no entry named {0}")]
    MissingCamera(String),
    /// Rig topology does not match the cameras it is applied to.
    #[error("invalid rig topology: {0}")]
    InvalidTopology(String),
}

/// Convenience alias used across the ODS crates.
pub type Result<T, E = OdsError> = std::result::Result<T, E>;
