//! Equirectangular reprojection of calibrated camera images.
//!
//! Each source pixel is pushed through the camera's ray model into the rig
//! frame, converted to spherical angles and scattered into the output
//! panorama. Pixels landing outside the output are dropped.

mod reproject;

pub use reproject::*;
