//! High-level entry crate for ODS panorama geometry.
//!
//! Builds omnidirectional-stereo geometry from a ring of calibrated cameras:
//!
//! 1. cameras from a kalibr-style calibration map ([`core::CameraModel`]),
//! 2. absolute planar positions and the viewing circle ([`rig::CameraRig`]),
//! 3. per-eye panorama columns through viewing-circle tangent points
//!    ([`rig::ViewingCircleProjector`]),
//! 4. equirectangular reprojection of camera images ([`render::Reprojector`]).
//!
//! ```no_run
//! use ods::prelude::*;
//! use ods::pipeline::build_ods_rig;
//!
//! # fn main() -> anyhow::Result<()> {
//! let calibration: RigCalibration = /* deserialized by the caller */
//! # RigCalibration::new();
//! let rig = build_ods_rig(&calibration, RigTopology::ten_camera_ring(), 0.062)?;
//! for cam in &rig {
//!     println!(
//!         "{}: left {:.3}, right {:.3}",
//!         cam.name(),
//!         cam.ods_position(Eye::Left),
//!         cam.ods_position(Eye::Right)
//!     );
//! }
//! # Ok(())
//! # }
//! ```

/// Driver-facing helpers with `anyhow` error context.
pub mod pipeline;

/// Math types, spherical mapping, calibration records and the camera model.
pub mod core {
    pub use ods_core::*;
}

/// Rig topology, layout resolution, circle fitting and tangent-point projection.
pub mod rig {
    pub use ods_rig::*;
}

/// Equirectangular reprojection of camera images.
pub mod render {
    pub use ods_render::*;
}

/// Convenient re-exports for common use cases.
///
/// Import with `use ods::prelude::*;` to get started quickly.
pub mod prelude {
    pub use crate::core::{
        CalibrationRecord, CameraModel, Eye, OdsError, Pt2, Pt3, RigCalibration, SphericalAngle,
        Vec3,
    };
    pub use crate::pipeline::{build_ods_rig, build_rig, render_camera, ImageSource};
    pub use crate::render::{Reprojector, ReprojectionStats};
    pub use crate::rig::{CameraRig, RigTopology, ViewingCircle, ViewingCircleProjector};
}
