//! Viewing-circle tangent-point projection.
//!
//! For a point `P` outside the viewing circle, each eye sees `P` along the
//! ray that is tangent to the circle. The tangent point's azimuth around the
//! circle center gives the panorama column of `P` for that eye.

use ods_core::spherical::{theta_to_normalized_x, unit_vector};
use ods_core::{Eye, OdsError, Pt2, Pt3, Real, Result, Vec2};

use crate::{CameraRig, ViewingCircle};

/// Angle at `point` between the line to `center` and the tangent to the
/// viewing circle of diameter `ipd`: `asin((ipd / 2) / |point - center|)`.
///
/// # Errors
/// [`OdsError::DegenerateGeometry`] if `ipd` is not a positive finite
/// length, or if `point` lies inside the circle (`ipd / 2 > distance`) or on
/// its center.
pub fn tangent_angle(center: &Pt2, point: &Pt2, ipd: Real) -> Result<Real> {
    check_ipd(ipd)?;
    let dist = (point - center).norm();
    let half_ipd = ipd / 2.0;
    if dist == 0.0 {
        return Err(OdsError::DegenerateGeometry(format!(
            "point ({}, {}) coincides with the viewing circle center",
            point.x, point.y
        )));
    }
    if half_ipd > dist {
        return Err(OdsError::DegenerateGeometry(format!(
            "half IPD {half_ipd} exceeds distance {dist} from ({}, {}) to center ({}, {})",
            point.x, point.y, center.x, center.y
        )));
    }
    Ok((half_ipd / dist).asin())
}

fn check_ipd(ipd: Real) -> Result<()> {
    if ipd > 0.0 && ipd.is_finite() {
        Ok(())
    } else {
        Err(OdsError::DegenerateGeometry(format!(
            "interpupillary distance must be positive, got {ipd}"
        )))
    }
}

/// Point on the viewing circle where the tangent ray from `source` touches it.
///
/// The vector `center - source` is rotated by `-theta` for the right eye and
/// `+theta` for the left eye, using
///
/// ```text
/// x' =  x cos(a) + z sin(a)
/// z' = -x sin(a) + z cos(a)
/// ```
///
/// then rescaled to the tangent length `sqrt(dist² - (ipd/2)²)`.
pub fn tangent_point(center: &Pt2, source: &Pt2, ipd: Real, eye: Eye) -> Result<Pt2> {
    let theta = tangent_angle(center, source, ipd)?;
    let v: Vec2 = center - source;
    let a = match eye {
        Eye::Right => -theta,
        Eye::Left => theta,
    };
    let (sin_a, cos_a) = a.sin_cos();
    let rotated = Vec2::new(v.x * cos_a + v.y * sin_a, -v.x * sin_a + v.y * cos_a);
    let half_ipd = ipd / 2.0;
    let side = (v.norm_squared() - half_ipd * half_ipd).sqrt();
    Ok(source + unit_vector(&rotated)? * side)
}

/// Azimuth of `point` around `center` in the (x, z) plane: `atan2(dz, dx)`.
pub fn panorama_angle(point: &Pt2, center: &Pt2) -> Real {
    let v = point - center;
    v.y.atan2(v.x)
}

/// Normalized panorama column of a tangent point.
pub fn panorama_column(tangent: &Pt2, center: &Pt2) -> Real {
    theta_to_normalized_x(panorama_angle(tangent, center))
}

/// Ground-plane (x, z) projection of a 3D point.
pub fn planar(p: &Pt3) -> Pt2 {
    Pt2::new(p.x, p.z)
}

/// Projects points onto per-eye panorama columns for a fixed viewing circle
/// and interpupillary distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingCircleProjector {
    circle: ViewingCircle,
    ipd: Real,
}

impl ViewingCircleProjector {
    pub fn new(circle: ViewingCircle, ipd: Real) -> Result<Self> {
        check_ipd(ipd)?;
        Ok(Self { circle, ipd })
    }

    /// Projector for a rig whose geometry has been resolved.
    pub fn from_rig(rig: &CameraRig, ipd: Real) -> Result<Self> {
        Self::new(rig.viewing_circle()?, ipd)
    }

    pub fn circle(&self) -> &ViewingCircle {
        &self.circle
    }

    pub fn ipd(&self) -> Real {
        self.ipd
    }

    pub fn tangent_point(&self, source: &Pt2, eye: Eye) -> Result<Pt2> {
        tangent_point(&self.circle.center, source, self.ipd, eye)
    }

    /// Azimuth of the tangent point for `point` as seen by `eye`.
    pub fn point_to_panorama_angle(&self, point: &Pt2, eye: Eye) -> Result<Real> {
        let tangent = self.tangent_point(point, eye)?;
        Ok(panorama_angle(&tangent, &self.circle.center))
    }

    /// Normalized panorama column of `point` as seen by `eye`.
    pub fn point_to_panorama_column(&self, point: &Pt2, eye: Eye) -> Result<Real> {
        let tangent = self.tangent_point(point, eye)?;
        Ok(panorama_column(&tangent, &self.circle.center))
    }

    /// Same as [`Self::point_to_panorama_column`] for a 3D point, using its
    /// (x, z) ground-plane projection.
    pub fn point3_to_panorama_column(&self, point: &Pt3, eye: Eye) -> Result<Real> {
        self.point_to_panorama_column(&planar(point), eye)
    }
}
