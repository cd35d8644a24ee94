use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CameraModel;
use crate::{Mat4, OdsError, Real, Result};

/// One camera entry of a kalibr-style calibration file.
///
/// Unknown keys (`camera_model`, `rostopic`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    /// Image size `[width, height]` in pixels.
    pub resolution: [u32; 2],
    /// `[fx, fy, cx, cy]` with the principal point in pixels.
    pub intrinsics: [Real; 4],
    /// Lens distortion coefficients. Carried through, never applied.
    #[serde(default)]
    pub distortion_coeffs: Vec<Real>,
    /// Indices of cameras whose fields of view overlap this one.
    #[serde(default)]
    pub cam_overlaps: Vec<usize>,
    /// Row-major transform from the previous camera's frame into this one.
    #[serde(
        rename = "T_cn_cnm1",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub t_cn_cnm1: Option<[[Real; 4]; 4]>,
}

impl CalibrationRecord {
    /// Relative extrinsic transform, identity when the record has none
    /// (the reference camera of the rig).
    pub fn relative_extrinsics(&self) -> Mat4 {
        match &self.t_cn_cnm1 {
            Some(rows) => Mat4::from_fn(|r, c| rows[r][c]),
            None => Mat4::identity(),
        }
    }
}

/// Calibration for a whole rig, keyed by camera name (`cam0`, `cam1`, ...).
pub type RigCalibration = BTreeMap<String, CalibrationRecord>;

/// Name of the `index`-th camera in a calibration map.
pub fn camera_name(index: usize) -> String {
    format!("cam{index}")
}

/// Build every camera of a rig calibration in calibration order.
///
/// Cameras are looked up as `cam0..cam{N-1}` where `N` is the number of
/// entries; a gap in the sequence is an error.
pub fn cameras_from_calibration(calibration: &RigCalibration) -> Result<Vec<CameraModel>> {
    (0..calibration.len())
        .map(|i| {
            let name = camera_name(i);
            let record = calibration
                .get(&name)
                .ok_or_else(|| OdsError::MissingCamera(name.clone()))?;
            CameraModel::from_calibration(name, record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(t: Option<[[Real; 4]; 4]>) -> CalibrationRecord {
        CalibrationRecord {
            resolution: [640, 480],
            intrinsics: [500.0, 500.0, 320.0, 240.0],
            distortion_coeffs: vec![0.0; 4],
            cam_overlaps: vec![1],
            t_cn_cnm1: t,
        }
    }

    #[test]
    fn missing_transform_defaults_to_identity() {
        assert_eq!(record(None).relative_extrinsics(), Mat4::identity());
    }

    #[test]
    fn transform_is_row_major() {
        let rows = [
            [1.0, 0.0, 0.0, 0.1],
            [0.0, 1.0, 0.0, 0.2],
            [0.0, 0.0, 1.0, 0.3],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let t = record(Some(rows)).relative_extrinsics();
        assert_eq!(t[(0, 3)], 0.1);
        assert_eq!(t[(1, 3)], 0.2);
        assert_eq!(t[(2, 3)], 0.3);
        assert_eq!(t[(3, 0)], 0.0);
    }

    #[test]
    fn json_shape_uses_kalibr_keys() {
        let json = r#"{
            "resolution": [640, 480],
            "intrinsics": [500.0, 510.0, 320.0, 240.0],
            "distortion_coeffs": [0.01, -0.002, 0.0, 0.0],
            "cam_overlaps": [1, 9],
            "T_cn_cnm1": [[1,0,0,0.1],[0,1,0,0],[0,0,1,0],[0,0,0,1]]
        }"#;
        let rec: CalibrationRecord = serde_json::from_str(json).expect("serde should succeed");
        assert_eq!(rec.resolution, [640, 480]);
        assert_eq!(rec.cam_overlaps, vec![1, 9]);
        assert_eq!(rec.relative_extrinsics()[(0, 3)], 0.1);
    }

    #[test]
    fn cameras_built_in_calibration_order() {
        let mut cal = RigCalibration::new();
        for i in 0..12 {
            cal.insert(camera_name(i), record(None));
        }
        let cams = cameras_from_calibration(&cal).unwrap();
        assert_eq!(cams.len(), 12);
        // BTreeMap order would put cam10 before cam2; calibration order must not.
        assert_eq!(cams[2].name(), "cam2");
        assert_eq!(cams[10].name(), "cam10");
    }

    #[test]
    fn gap_in_camera_names_is_reported() {
        let mut cal = RigCalibration::new();
        cal.insert(camera_name(0), record(None));
        cal.insert(camera_name(2), record(None));
        let err = cameras_from_calibration(&cal).unwrap_err();
        assert_eq!(err, OdsError::MissingCamera("cam1".to_string()));
    }
}
