//! Core math and geometry primitives for ODS panorama synthesis.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec2`, `Pt3`, `Mat4`, ...),
//! - spherical/equirectangular coordinate conversions ([`spherical`]),
//! - the calibrated pinhole camera used by the rig ([`CameraModel`]),
//! - the shared error taxonomy ([`OdsError`]).
//!
//! Camera pipeline:
//! `pixel -> K^{-1} -> ray (camera frame) -> T_cn_cnm1 -> (theta, phi) -> panorama`
//!
//! Lens distortion coefficients are carried through but not applied.

/// Error taxonomy shared by all ODS crates.
pub mod error;
/// Linear algebra type aliases and helpers.
pub mod math;
/// Calibration records and the pinhole camera model.
pub mod models;
/// Spherical angles and normalized panorama coordinates.
pub mod spherical;

pub use error::*;
pub use math::*;
pub use models::*;
pub use spherical::SphericalAngle;
