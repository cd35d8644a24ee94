//! Calibration records and the calibrated pinhole camera.
//!
//! A camera is built in two steps:
//!
//! 1. [`CalibrationRecord`]: the raw per-camera entry of a kalibr-style
//!    calibration map (serde).
//! 2. [`CameraModel`]: validated, with derived intrinsics inverse and field of
//!    view. Only the per-eye center-of-projection and ODS position fields can
//!    change after construction.

mod calibration;
mod camera;

pub use calibration::*;
pub use camera::*;
