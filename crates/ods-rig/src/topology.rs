use ods_core::{OdsError, Result};
use serde::{Deserialize, Serialize};

/// Physical slot of each camera of the 10-camera ring, in calibration order.
const TEN_CAMERA_RING_SLOTS: [usize; 10] = [0, 1, 2, 3, 8, 9, 7, 6, 4, 5];
/// Slots of the 10-camera ring used to fit its viewing circle.
const TEN_CAMERA_RING_CIRCLE_FIT: [usize; 3] = [0, 2, 8];

/// Rig-specific layout data that cannot be derived from the calibration.
///
/// Calibration order (the order of `cam0..camN`) and physical installation
/// order may differ; `slot_order[i]` is the physical slot of calibration
/// camera `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RigTopology {
    /// Permutation from calibration index to physical position slot.
    pub slot_order: Vec<usize>,
    /// Position slots of the three cameras the viewing circle is fitted through.
    pub circle_fit: [usize; 3],
}

impl RigTopology {
    /// Build and validate a topology.
    pub fn new(slot_order: Vec<usize>, circle_fit: [usize; 3]) -> Result<Self> {
        let topology = Self {
            slot_order,
            circle_fit,
        };
        topology.validate()?;
        Ok(topology)
    }

    /// Calibration order equals installation order; the circle is fitted
    /// through slots `0`, `n/3` and `2n/3`.
    pub fn identity(num_cameras: usize) -> Result<Self> {
        Self::new(
            (0..num_cameras).collect(),
            [0, num_cameras / 3, 2 * num_cameras / 3],
        )
    }

    /// Layout of the 10-camera ring the calibration files were recorded on.
    pub fn ten_camera_ring() -> Self {
        Self {
            slot_order: TEN_CAMERA_RING_SLOTS.to_vec(),
            circle_fit: TEN_CAMERA_RING_CIRCLE_FIT,
        }
    }

    pub fn num_cameras(&self) -> usize {
        self.slot_order.len()
    }

    /// Physical slot of the camera at `calibration_index`.
    pub fn slot(&self, calibration_index: usize) -> Option<usize> {
        self.slot_order.get(calibration_index).copied()
    }

    /// Check that `slot_order` is a permutation and the circle-fit slots are
    /// three distinct, in-range slots.
    pub fn validate(&self) -> Result<()> {
        let n = self.slot_order.len();
        if n < 3 {
            return Err(OdsError::InvalidTopology(format!(
                "need at least 3 cameras to fit a viewing circle, got {n}"
            )));
        }
        let mut seen = vec![false; n];
        for (i, &slot) in self.slot_order.iter().enumerate() {
            if slot >= n || seen[slot] {
                return Err(OdsError::InvalidTopology(format!(
                    "slot_order is not a permutation of 0..{n} (camera {i} -> slot {slot})"
                )));
            }
            seen[slot] = true;
        }
        let [a, b, c] = self.circle_fit;
        if a >= n || b >= n || c >= n {
            return Err(OdsError::InvalidTopology(format!(
                "circle_fit slots {:?} out of range for {n} cameras",
                self.circle_fit
            )));
        }
        if a == b || b == c || a == c {
            return Err(OdsError::InvalidTopology(format!(
                "circle_fit slots {:?} must be distinct",
                self.circle_fit
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_camera_ring_is_valid() {
        let t = RigTopology::ten_camera_ring();
        t.validate().unwrap();
        assert_eq!(t.num_cameras(), 10);
        assert_eq!(t.slot(4), Some(8));
        assert_eq!(t.slot(10), None);
    }

    #[test]
    fn identity_spreads_fit_slots() {
        let t = RigTopology::identity(9).unwrap();
        assert_eq!(t.circle_fit, [0, 3, 6]);
        assert_eq!(t.slot(5), Some(5));
    }

    #[test]
    fn too_few_cameras() {
        assert!(matches!(
            RigTopology::identity(2),
            Err(OdsError::InvalidTopology(_))
        ));
    }

    #[test]
    fn rejects_non_permutation() {
        assert!(RigTopology::new(vec![0, 1, 1, 2], [0, 1, 2]).is_err());
        assert!(RigTopology::new(vec![0, 1, 4], [0, 1, 2]).is_err());
    }

    #[test]
    fn rejects_bad_fit_slots() {
        assert!(RigTopology::new(vec![0, 1, 2], [0, 1, 3]).is_err());
        assert!(RigTopology::new(vec![0, 1, 2], [0, 1, 1]).is_err());
    }

    #[test]
    fn serde_roundtrip_shape() {
        let json = r#"{ "slot_order": [0, 2, 1], "circle_fit": [0, 1, 2] }"#;
        let t: RigTopology = serde_json::from_str(json).expect("serde should succeed");
        t.validate().unwrap();
        assert_eq!(t.slot(1), Some(2));
    }
}
