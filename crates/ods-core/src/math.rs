//! Mathematical utilities and type definitions.
//!
//! This module provides fundamental types used throughout the workspace
//! and helpers for homogeneous coordinates and rigid transforms.

use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector2, Vector3, Vector4};

/// Scalar type used throughout the library (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// Homogeneous 3D vector with [`Real`] components.
pub type Vec4 = Vector4<Real>;
/// 2D point with [`Real`] coordinates.
pub type Pt2 = Point2<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;

/// Convert a 3D vector into homogeneous coordinates `(x, y, z, 1)`.
pub fn to_homogeneous(v: &Vec3) -> Vec4 {
    Vec4::new(v.x, v.y, v.z, 1.0)
}

/// Convert a homogeneous 4-vector back to 3D by dividing by `w`.
///
/// Returns `None` when `w` is zero (point at infinity).
pub fn try_from_homogeneous(v: &Vec4) -> Option<Vec3> {
    if v.w == 0.0 {
        return None;
    }
    Some(Vec3::new(v.x / v.w, v.y / v.w, v.z / v.w))
}

/// Split a 4×4 rigid transform into its rotation block and translation column.
pub fn rotation_translation(t: &Mat4) -> (Mat3, Vec3) {
    let r: Mat3 = t.fixed_view::<3, 3>(0, 0).into_owned();
    let tr: Vec3 = t.fixed_view::<3, 1>(0, 3).into_owned();
    (r, tr)
}

/// Optical center of a camera expressed in the parent frame of `t`.
///
/// For `t = [R | t]` mapping parent coordinates into the camera frame the
/// center is `-R^T t`.
pub fn camera_center(t: &Mat4) -> Vec3 {
    let (r, tr) = rotation_translation(t);
    -(r.transpose() * tr)
}
