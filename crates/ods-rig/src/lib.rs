//! Camera rig layout and viewing-circle geometry for ODS rendering.
//!
//! - [`RigTopology`]: which physical slot each calibrated camera occupies and
//!   which three slots define the viewing circle.
//! - [`CameraRig`]: resolves absolute planar camera positions from chained
//!   relative extrinsics and fits the [`ViewingCircle`].
//! - [`ViewingCircleProjector`]: maps points to per-eye panorama columns via
//!   viewing-circle tangent points.
//!
//! All planar quantities live in the rig's (x, z) ground plane and are stored
//! as [`ods_core::Pt2`] with `y` holding the z coordinate.

mod circle;
mod projector;
mod rig;
mod topology;

pub use circle::*;
pub use projector::*;
pub use rig::*;
pub use topology::*;
