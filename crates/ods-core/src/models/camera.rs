use log::warn;
use serde::{Deserialize, Serialize};

use super::CalibrationRecord;
use crate::spherical::{ray_orientation, radians_to_degrees, unnormalize_x, SphericalAngle};
use crate::{to_homogeneous, try_from_homogeneous, Mat3, Mat4, OdsError, Real, Result, Vec3};

/// Eye selector for stereo quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// `-1` for the left eye, `+1` for the right eye.
    pub fn sign(self) -> Real {
        match self {
            Eye::Left => -1.0,
            Eye::Right => 1.0,
        }
    }
}

/// Per-eye center of projection: the viewing-circle tangent direction
/// expressed relative to the optical axis, and the image column it hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CenterOfProjection {
    pub relative_angle: Real,
    pub column: Real,
}

/// A calibrated pinhole camera of the rig.
///
/// The intrinsics matrix stores the principal point as a fraction of the
/// resolution, not in pixels:
///
/// ```text
/// [ fx   0   cx / w ]
/// [  0  fy   cy / h ]
/// [  0   0      1   ]
/// ```
///
/// The extrinsic transform is relative to the previous camera in calibration
/// order (identity for the reference camera).
#[derive(Debug, Clone)]
pub struct CameraModel {
    name: String,
    resolution: [u32; 2],
    intrinsics: Mat3,
    intrinsics_inverse: Mat3,
    extrinsics: Mat4,
    distortion: Vec<Real>,
    overlaps: Vec<usize>,
    fx: Real,
    fy: Real,
    favg: Real,
    fov_x: Real,
    cop_left: CenterOfProjection,
    cop_right: CenterOfProjection,
    ods_left: Real,
    ods_right: Real,
}

impl CameraModel {
    /// Validate a calibration record and build the camera from it.
    ///
    /// # Errors
    /// [`OdsError::InvalidCalibration`] for a zero resolution, non-finite or
    /// zero focal lengths, or a singular intrinsics matrix.
    pub fn from_calibration(name: impl Into<String>, record: &CalibrationRecord) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| OdsError::InvalidCalibration {
            camera: name.clone(),
            reason,
        };

        let [width, height] = record.resolution;
        if width == 0 || height == 0 {
            return Err(invalid(format!("resolution {width}x{height} is empty")));
        }
        let [fx, fy, cx, cy] = record.intrinsics;
        if !(fx.is_finite() && fy.is_finite()) || fx == 0.0 || fy == 0.0 {
            return Err(invalid(format!("focal lengths fx={fx}, fy={fy} are unusable")));
        }

        let intrinsics = Mat3::new(
            fx,
            0.0,
            cx / Real::from(width),
            0.0,
            fy,
            cy / Real::from(height),
            0.0,
            0.0,
            1.0,
        );
        let intrinsics_inverse = intrinsics
            .try_inverse()
            .ok_or_else(|| invalid("intrinsics matrix is singular".to_string()))?;

        Ok(Self {
            name,
            resolution: record.resolution,
            intrinsics,
            intrinsics_inverse,
            extrinsics: record.relative_extrinsics(),
            distortion: record.distortion_coeffs.clone(),
            overlaps: record.cam_overlaps.clone(),
            fx,
            fy,
            favg: (fx + fy) / 2.0,
            fov_x: 2.0 * Real::from(width).atan2(fx),
            cop_left: CenterOfProjection::default(),
            cop_right: CenterOfProjection::default(),
            ods_left: 0.0,
            ods_right: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `[width, height]` in pixels.
    pub fn resolution(&self) -> [u32; 2] {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    pub fn height(&self) -> u32 {
        self.resolution[1]
    }

    pub fn intrinsics(&self) -> &Mat3 {
        &self.intrinsics
    }

    pub fn inverse_intrinsics(&self) -> &Mat3 {
        &self.intrinsics_inverse
    }

    /// Transform from the previous camera's frame into this camera's frame.
    pub fn extrinsics(&self) -> &Mat4 {
        &self.extrinsics
    }

    pub fn distortion(&self) -> &[Real] {
        &self.distortion
    }

    pub fn overlaps(&self) -> &[usize] {
        &self.overlaps
    }

    pub fn fx(&self) -> Real {
        self.fx
    }

    pub fn fy(&self) -> Real {
        self.fy
    }

    pub fn favg(&self) -> Real {
        self.favg
    }

    /// Horizontal field of view in radians, `2 * atan2(width, fx)`.
    pub fn field_of_view(&self) -> Real {
        self.fov_x
    }

    pub fn field_of_view_degrees(&self) -> Real {
        radians_to_degrees(self.fov_x)
    }

    /// Camera-frame direction through pixel `(x, y)`: `K^{-1} [x, y, 1]^T`.
    ///
    /// The result is not normalized and no distortion correction is applied.
    pub fn ray_for_pixel(&self, x: Real, y: Real) -> Vec3 {
        self.intrinsics_inverse * Vec3::new(x, y, 1.0)
    }

    /// Apply a 4×4 transform to a ray treated as a homogeneous point and
    /// divide by the resulting `w`.
    ///
    /// # Errors
    /// [`OdsError::DegenerateGeometry`] if the transformed `w` is zero.
    pub fn transform_ray_to_frame(&self, ray: &Vec3, extrinsics: &Mat4) -> Result<Vec3> {
        let h = extrinsics * to_homogeneous(ray);
        try_from_homogeneous(&h).ok_or_else(|| {
            OdsError::DegenerateGeometry(format!(
                "{}: ray {:?} maps to a point at infinity",
                self.name,
                ray.as_slice()
            ))
        })
    }

    /// Spherical orientation of pixel `(x, y)` after applying this camera's
    /// own extrinsic transform.
    pub fn pixel_orientation(&self, x: Real, y: Real) -> Result<SphericalAngle> {
        let ray = self.ray_for_pixel(x, y);
        let ray = self.transform_ray_to_frame(&ray, &self.extrinsics)?;
        ray_orientation(&ray)
    }

    /// Image column hit by a direction `theta` radians off the optical axis.
    ///
    /// `offset_by_width` selects the right half of the image
    /// (`0.5 + tan|theta|`), otherwise the left half (`0.5 - tan|theta|`). The
    /// normalized value is clipped to `[0, 1]` before scaling by the width.
    ///
    /// Angles beyond half the field of view only produce a warning; the
    /// extrapolated column is still returned.
    pub fn incident_column(&self, theta: Real, offset_by_width: bool) -> Real {
        let half_fov = self.fov_x / 2.0;
        if theta.abs() > half_fov {
            warn!(
                "{}: {}",
                self.name,
                OdsError::OutOfFieldOfView { theta, half_fov }
            );
        }
        let offset = theta.abs().tan();
        let norm = if offset_by_width {
            0.5 + offset
        } else {
            0.5 - offset
        };
        unnormalize_x(norm.clamp(0.0, 1.0), self.width())
    }

    /// Angle between the optical axis and the direction through `column`,
    /// using the mean focal length.
    pub fn relative_angle_of_column(&self, column: Real) -> Real {
        let half_width = Real::from(self.width()) / 2.0;
        (column - half_width).abs().atan2(self.favg)
    }

    /// Store the center-of-projection angle for `eye` and derive its column.
    ///
    /// The left eye looks through the right half of the image and vice versa.
    pub fn set_cop_relative_angle(&mut self, eye: Eye, theta: Real) {
        let column = self.incident_column(theta, eye == Eye::Left);
        *self.cop_mut(eye) = CenterOfProjection {
            relative_angle: theta,
            column,
        };
    }

    pub fn set_cop_relative_angle_left(&mut self, theta: Real) {
        self.set_cop_relative_angle(Eye::Left, theta);
    }

    pub fn set_cop_relative_angle_right(&mut self, theta: Real) {
        self.set_cop_relative_angle(Eye::Right, theta);
    }

    /// Override the center-of-projection column without touching its angle.
    pub fn set_cop_column(&mut self, eye: Eye, column: Real) {
        self.cop_mut(eye).column = column;
    }

    pub fn cop(&self, eye: Eye) -> CenterOfProjection {
        match eye {
            Eye::Left => self.cop_left,
            Eye::Right => self.cop_right,
        }
    }

    pub fn cop_relative_angle_left(&self) -> Real {
        self.cop_left.relative_angle
    }

    pub fn cop_relative_angle_right(&self) -> Real {
        self.cop_right.relative_angle
    }

    pub fn cop_column_left(&self) -> Real {
        self.cop_left.column
    }

    pub fn cop_column_right(&self) -> Real {
        self.cop_right.column
    }

    fn cop_mut(&mut self, eye: Eye) -> &mut CenterOfProjection {
        match eye {
            Eye::Left => &mut self.cop_left,
            Eye::Right => &mut self.cop_right,
        }
    }

    /// Normalized horizontal position of this camera in the ODS image of `eye`.
    pub fn ods_position(&self, eye: Eye) -> Real {
        match eye {
            Eye::Left => self.ods_left,
            Eye::Right => self.ods_right,
        }
    }

    pub fn set_ods_position(&mut self, eye: Eye, xnorm: Real) {
        match eye {
            Eye::Left => self.ods_left = xnorm,
            Eye::Right => self.ods_right = xnorm,
        }
    }
}
