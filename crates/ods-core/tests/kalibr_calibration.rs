//! Integration tests building cameras from a kalibr-style YAML calibration.

use ods_core::{
    cameras_from_calibration, spherical::theta_phi_to_normalized_xy, Eye, Mat4, RigCalibration,
};

const CALIBRATION: &str = r#"
cam0:
  camera_model: pinhole
  distortion_model: equidistant
  distortion_coeffs: [-0.012, 0.004, -0.001, 0.0002]
  intrinsics: [600.0, 600.0, 640.0, 480.0]
  resolution: [1280, 960]
  cam_overlaps: [1, 2]
  rostopic: /cam0/image_raw
cam1:
  camera_model: pinhole
  distortion_model: equidistant
  distortion_coeffs: [-0.011, 0.003, -0.001, 0.0001]
  intrinsics: [610.0, 605.0, 630.0, 470.0]
  resolution: [1280, 960]
  cam_overlaps: [0, 2]
  rostopic: /cam1/image_raw
  T_cn_cnm1:
  - [0.8660254037844387, 0.0, -0.5, 0.05]
  - [0.0, 1.0, 0.0, 0.0]
  - [0.5, 0.0, 0.8660254037844387, 0.01]
  - [0.0, 0.0, 0.0, 1.0]
"#;

fn calibration() -> RigCalibration {
    serde_yaml::from_str(CALIBRATION).expect("calibration should parse")
}

#[test]
fn reference_camera_has_identity_extrinsics() {
    let cams = cameras_from_calibration(&calibration()).unwrap();
    assert_eq!(cams.len(), 2);
    assert_eq!(*cams[0].extrinsics(), Mat4::identity());
    assert_eq!(cams[0].distortion().len(), 4);
    assert_eq!(cams[0].overlaps(), &[1, 2]);
}

#[test]
fn relative_extrinsics_are_loaded() {
    let cams = cameras_from_calibration(&calibration()).unwrap();
    let t = cams[1].extrinsics();
    assert!((t[(0, 3)] - 0.05).abs() < 1e-12);
    assert!((t[(2, 0)] - 0.5).abs() < 1e-12);
}

#[test]
fn principal_point_pixel_orientation() {
    let cams = cameras_from_calibration(&calibration()).unwrap();
    let cam = &cams[0];
    // The stored principal point is fractional, so pixel (0.5, 0.5) is on axis.
    let a = cam.pixel_orientation(0.5, 0.5).unwrap();
    assert!(a.theta.abs() < 1e-12 && a.phi.abs() < 1e-12);
    let (xn, yn) = theta_phi_to_normalized_xy(a.theta, a.phi);
    assert!((xn - 0.5).abs() < 1e-12 && (yn - 0.5).abs() < 1e-12);
}

#[test]
fn rotated_camera_shifts_azimuth() {
    let cams = cameras_from_calibration(&calibration()).unwrap();
    let cam = &cams[1];
    // Optical axis (0, 0, 1) rotated by the 30 degree yaw, plus translation.
    let k = cam.intrinsics();
    let a = cam.pixel_orientation(k[(0, 2)], k[(1, 2)]).unwrap();
    let x: f64 = -0.5 + 0.05;
    let z: f64 = 0.8660254037844387 + 0.01;
    assert!((a.theta - x.atan2(z)).abs() < 1e-9, "theta={}", a.theta);
}

#[test]
fn cop_column_for_zero_angle_is_half_width() {
    let mut cams = cameras_from_calibration(&calibration()).unwrap();
    cams[0].set_cop_relative_angle(Eye::Left, 0.0);
    assert_eq!(cams[0].cop_column_left(), 640.0);
}
