//! Conversions between ray directions, spherical angles and normalized
//! equirectangular panorama coordinates.
//!
//! Conventions:
//! - `theta` is the azimuth around the vertical (y) axis, `theta ∈ [-π, π)`,
//!   measured from +z towards +x.
//! - `phi` is the elevation, `phi ∈ [-π/2, π/2]` for forward-facing rays.
//! - Normalized panorama coordinates `(xn, yn)` live in `[0, 1]²`, with
//!   `xn = 0` at `theta = -π` and `yn = 0` at `phi = π/2` (top row).
//!
//! Every function here is pure.

use std::f64::consts::{FRAC_PI_2, PI};

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

use crate::{OdsError, Real, Result, Vec2, Vec3};

/// Azimuth/elevation pair describing a viewing direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphericalAngle {
    /// Azimuth in radians.
    pub theta: Real,
    /// Elevation in radians.
    pub phi: Real,
}

impl SphericalAngle {
    /// Direction with azimuth `theta` and elevation `phi`, both in radians.
    pub fn new(theta: Real, phi: Real) -> Self {
        Self { theta, phi }
    }

    /// Normalized panorama coordinates of this direction.
    pub fn to_normalized_xy(&self) -> (Real, Real) {
        theta_phi_to_normalized_xy(self.theta, self.phi)
    }
}

/// Map normalized panorama coordinates to `(theta, phi)`.
pub fn normalized_xy_to_theta_phi(xn: Real, yn: Real) -> (Real, Real) {
    (normalized_x_to_theta(xn), normalized_y_to_phi(yn))
}

/// Inverse of [`normalized_xy_to_theta_phi`].
pub fn theta_phi_to_normalized_xy(theta: Real, phi: Real) -> (Real, Real) {
    (theta_to_normalized_x(theta), phi_to_normalized_y(phi))
}

/// Azimuth to normalized panorama column: `-π → 0`, `0 → 0.5`, `π → 1`.
pub fn theta_to_normalized_x(theta: Real) -> Real {
    (theta + PI) / (2.0 * PI)
}

/// Normalized panorama column to azimuth; inverse of [`theta_to_normalized_x`].
pub fn normalized_x_to_theta(xn: Real) -> Real {
    xn * 2.0 * PI - PI
}

/// Elevation to normalized panorama row, `π/2` mapping to the top row.
///
/// ```
/// use ods_core::spherical::{normalized_y_to_phi, phi_to_normalized_y};
///
/// assert_eq!(phi_to_normalized_y(std::f64::consts::FRAC_PI_2), 0.0);
/// assert_eq!(phi_to_normalized_y(0.0), 0.5);
/// assert!((normalized_y_to_phi(phi_to_normalized_y(0.3)) - 0.3).abs() < 1e-12);
/// ```
pub fn phi_to_normalized_y(phi: Real) -> Real {
    (FRAC_PI_2 - phi) / PI
}

/// Normalized panorama row to elevation; inverse of [`phi_to_normalized_y`].
pub fn normalized_y_to_phi(yn: Real) -> Real {
    FRAC_PI_2 - yn * PI
}

/// Scale a pixel column into `[0, 1]` by the image width.
pub fn normalize_x(x: Real, width: u32) -> Real {
    x / Real::from(width)
}

/// Scale a pixel row into `[0, 1]` by the image height.
pub fn normalize_y(y: Real, height: u32) -> Real {
    y / Real::from(height)
}

/// Scale a pixel coordinate into `[0, 1]²` by the image dimensions.
pub fn normalize_xy(x: Real, y: Real, width: u32, height: u32) -> (Real, Real) {
    (normalize_x(x, width), normalize_y(y, height))
}

/// Scale a normalized column back to pixels.
pub fn unnormalize_x(xn: Real, width: u32) -> Real {
    xn * Real::from(width)
}

/// Scale a normalized row back to pixels.
pub fn unnormalize_y(yn: Real, height: u32) -> Real {
    yn * Real::from(height)
}

/// Scale normalized coordinates back to pixels; inverse of [`normalize_xy`].
pub fn unnormalize_xy(xn: Real, yn: Real, width: u32, height: u32) -> (Real, Real) {
    (unnormalize_x(xn, width), unnormalize_y(yn, height))
}

/// Normalize a vector to unit length.
///
/// # Errors
/// [`OdsError::DegenerateGeometry`] when `v` has zero length, since its
/// direction is undefined.
pub fn unit_vector<const D: usize>(v: &SVector<Real, D>) -> Result<SVector<Real, D>> {
    v.try_normalize(0.0).ok_or_else(|| {
        OdsError::DegenerateGeometry(format!(
            "cannot normalize zero-length vector {:?}",
            v.as_slice()
        ))
    })
}

/// Angle in radians between two vectors.
///
/// The dot product of the unit vectors is clamped to `[-1, 1]` to absorb
/// rounding before `acos`.
pub fn angle_between<const D: usize>(v1: &SVector<Real, D>, v2: &SVector<Real, D>) -> Result<Real> {
    let u1 = unit_vector(v1)?;
    let u2 = unit_vector(v2)?;
    Ok(u1.dot(&u2).clamp(-1.0, 1.0).acos())
}

/// Extract `(theta, phi)` from a ray direction.
///
/// The ray is projected onto the (x, z) and (y, z) planes and each projection
/// is normalized on its own, so azimuth and elevation are estimated
/// independently: `theta = atan2(x̂, ẑ)` and `phi = atan2(ŷ, ẑ)`.
///
/// # Errors
/// [`OdsError::DegenerateGeometry`] if either planar projection is zero.
pub fn ray_orientation(ray: &Vec3) -> Result<SphericalAngle> {
    let xz = unit_vector(&Vec2::new(ray.x, ray.z))?;
    let yz = unit_vector(&Vec2::new(ray.y, ray.z))?;
    Ok(SphericalAngle {
        theta: xz.x.atan2(xz.y),
        phi: yz.x.atan2(yz.y),
    })
}

/// Convert radians to degrees.
pub fn radians_to_degrees(rad: Real) -> Real {
    rad.to_degrees()
}

/// Convert degrees to radians.
pub fn degrees_to_radians(deg: Real) -> Real {
    deg.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_xy_roundtrip() {
        let steps = 20;
        for i in 0..=steps {
            for j in 0..=steps {
                let xn = i as Real / steps as Real;
                let yn = j as Real / steps as Real;
                let (theta, phi) = normalized_xy_to_theta_phi(xn, yn);
                let (x2, y2) = theta_phi_to_normalized_xy(theta, phi);
                assert!((x2 - xn).abs() < 1e-6, "xn={xn} -> {x2}");
                assert!((y2 - yn).abs() < 1e-6, "yn={yn} -> {y2}");
            }
        }
    }

    #[test]
    fn theta_x_roundtrip() {
        for i in 0..=100 {
            let x = i as Real / 100.0;
            assert!((theta_to_normalized_x(normalized_x_to_theta(x)) - x).abs() < 1e-6);
        }
    }

    #[test]
    fn panorama_corners() {
        assert_eq!(normalized_xy_to_theta_phi(0.0, 0.0), (-PI, FRAC_PI_2));
        let (theta, phi) = normalized_xy_to_theta_phi(0.5, 0.5);
        assert!(theta.abs() < 1e-12 && phi.abs() < 1e-12);
    }

    #[test]
    fn pixel_normalization_is_affine() {
        let (xn, yn) = normalize_xy(480.0, 120.0, 960, 480);
        assert!((xn - 0.5).abs() < 1e-12);
        assert!((yn - 0.25).abs() < 1e-12);
        let (x, y) = unnormalize_xy(xn, yn, 960, 480);
        assert!((x - 480.0).abs() < 1e-9 && (y - 120.0).abs() < 1e-9);
    }

    #[test]
    fn unit_vector_rejects_zero() {
        let err = unit_vector(&Vec3::zeros()).unwrap_err();
        assert!(matches!(err, OdsError::DegenerateGeometry(_)));
    }

    #[test]
    fn unit_vector_has_unit_norm() {
        let u = unit_vector(&Vec3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn angle_between_clamps_parallel_vectors() {
        let v = Vec3::new(0.1, 0.2, 0.3);
        let a = angle_between(&v, &(v * 7.0)).unwrap();
        assert!(a.abs() < 1e-6, "a={a}");
        let b = angle_between(&Vec2::new(1.0, 0.0), &Vec2::new(0.0, 2.0)).unwrap();
        assert!((b - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn forward_ray_has_zero_orientation() {
        let a = ray_orientation(&Vec3::new(0.0, 0.0, 2.0)).unwrap();
        assert!(a.theta.abs() < 1e-12 && a.phi.abs() < 1e-12);
    }

    #[test]
    fn orientation_is_per_plane() {
        let a = ray_orientation(&Vec3::new(1.0, 1.0, 1.0)).unwrap();
        assert!((a.theta - PI / 4.0).abs() < 1e-12);
        assert!((a.phi - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn vertical_ray_is_degenerate() {
        assert!(ray_orientation(&Vec3::new(0.0, 1.0, 0.0)).is_err());
        assert!(ray_orientation(&Vec3::new(1.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn degree_conversion() {
        assert!((radians_to_degrees(PI) - 180.0).abs() < 1e-12);
        assert!((degrees_to_radians(90.0) - FRAC_PI_2).abs() < 1e-12);
    }
}
