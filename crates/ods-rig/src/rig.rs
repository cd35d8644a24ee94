use std::ops::Index;

use log::debug;
use ods_core::{
    camera_center, cameras_from_calibration, CameraModel, Eye, OdsError, Pt2, Real, Result,
    RigCalibration,
};

use crate::{fit_circle_to_3_points, RigTopology, ViewingCircle, ViewingCircleProjector};

/// Planar camera layout and fitted viewing circle of a resolved rig.
#[derive(Debug, Clone, PartialEq)]
pub struct RigGeometry {
    /// Absolute (x, z) camera positions indexed by physical slot.
    pub positions: Vec<Pt2>,
    pub circle: ViewingCircle,
}

/// Ordered ring of calibrated cameras.
///
/// Camera `i`'s extrinsics are relative to camera `i - 1`; camera 0 defines
/// the rig frame. Geometry is resolved explicitly with
/// [`CameraRig::resolve_geometry`]; position and circle queries fail with
/// [`OdsError::NotInitialized`] until then, and adding a camera discards the
/// resolved geometry.
#[derive(Debug, Clone)]
pub struct CameraRig {
    cameras: Vec<CameraModel>,
    topology: RigTopology,
    geometry: Option<RigGeometry>,
}

impl CameraRig {
    pub fn new(topology: RigTopology) -> Self {
        Self {
            cameras: Vec::new(),
            topology,
            geometry: None,
        }
    }

    pub fn from_cameras(cameras: Vec<CameraModel>, topology: RigTopology) -> Self {
        Self {
            cameras,
            topology,
            geometry: None,
        }
    }

    /// Build all cameras `cam0..cam{N-1}` of a calibration map.
    pub fn from_calibration(calibration: &RigCalibration, topology: RigTopology) -> Result<Self> {
        Ok(Self::from_cameras(
            cameras_from_calibration(calibration)?,
            topology,
        ))
    }

    pub fn add_camera(&mut self, camera: CameraModel) {
        self.cameras.push(camera);
        self.geometry = None;
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CameraModel> {
        self.cameras.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CameraModel> {
        self.cameras.iter()
    }

    pub fn cameras(&self) -> &[CameraModel] {
        &self.cameras
    }

    pub fn topology(&self) -> &RigTopology {
        &self.topology
    }

    fn check_topology(&self) -> Result<()> {
        if self.cameras.is_empty() {
            return Err(OdsError::NotInitialized(
                "camera rig (no cameras added)".to_string(),
            ));
        }
        self.topology.validate()?;
        if self.topology.num_cameras() != self.cameras.len() {
            return Err(OdsError::InvalidTopology(format!(
                "topology describes {} cameras, rig has {}",
                self.topology.num_cameras(),
                self.cameras.len()
            )));
        }
        Ok(())
    }

    /// Absolute planar (x, z) positions of all cameras, indexed by slot.
    ///
    /// The reference camera's slot gets `(origin.x, origin.z)`. For every
    /// later camera `i` (calibration order) the local centers
    /// `-R^T t` of camera `i - 1` and camera `i` are summed, and the result is
    /// written to slot `topology.slot_order[i]`.
    ///
    /// # Errors
    /// - [`OdsError::InvalidDimension`] unless `origin` has 3 components.
    /// - [`OdsError::NotInitialized`] / [`OdsError::InvalidTopology`] for an
    ///   empty rig or a topology that does not fit it.
    pub fn compute_absolute_positions(&self, origin: &[Real]) -> Result<Vec<Pt2>> {
        if origin.len() != 3 {
            return Err(OdsError::InvalidDimension {
                expected: 3,
                got: origin.len(),
            });
        }
        self.check_topology()?;

        let slots = &self.topology.slot_order;
        let mut positions = vec![Pt2::origin(); self.cameras.len()];
        positions[slots[0]] = Pt2::new(origin[0], origin[2]);

        for (i, pair) in self.cameras.windows(2).enumerate() {
            let reference = camera_center(pair[0].extrinsics());
            let local = camera_center(pair[1].extrinsics());
            let slot = slots[i + 1];
            positions[slot] = Pt2::new(reference.x + local.x, reference.z + local.z);
            debug!(
                "{} -> slot {}: ({:.4}, {:.4})",
                pair[1].name(),
                slot,
                positions[slot].x,
                positions[slot].y
            );
        }
        Ok(positions)
    }

    /// Fit the viewing circle through the topology's three circle-fit slots.
    ///
    /// The radius is the distance from camera 0's slot to the fitted center.
    pub fn fit_viewing_circle(&self, positions: &[Pt2]) -> Result<ViewingCircle> {
        let [a, b, c] = self.topology.circle_fit;
        let n = positions.len();
        if a >= n || b >= n || c >= n {
            return Err(OdsError::InvalidTopology(format!(
                "circle_fit slots {:?} out of range for {n} positions",
                self.topology.circle_fit
            )));
        }
        let center = fit_circle_to_3_points(&positions[a], &positions[b], &positions[c])
            .map_err(|err| match err {
                OdsError::DegenerateGeometry(msg) => OdsError::DegenerateGeometry(format!(
                    "viewing circle through slots {a}, {b}, {c}: {msg}"
                )),
                other => other,
            })?;
        let radius = (positions[self.topology.slot_order[0]] - center).norm();
        Ok(ViewingCircle { center, radius })
    }

    /// Compute positions and the viewing circle once and cache them.
    pub fn resolve_geometry(&mut self, origin: &[Real]) -> Result<&RigGeometry> {
        let positions = self.compute_absolute_positions(origin)?;
        let circle = self.fit_viewing_circle(&positions)?;
        debug!(
            "viewing circle: center ({:.4}, {:.4}), radius {:.4}",
            circle.center.x, circle.center.y, circle.radius
        );
        Ok(&*self.geometry.insert(RigGeometry { positions, circle }))
    }

    pub fn is_resolved(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn geometry(&self) -> Result<&RigGeometry> {
        self.geometry
            .as_ref()
            .ok_or_else(|| OdsError::NotInitialized("camera rig geometry".to_string()))
    }

    /// Absolute planar positions indexed by physical slot.
    pub fn positions(&self) -> Result<&[Pt2]> {
        Ok(&self.geometry()?.positions)
    }

    /// Planar position of the camera at `calibration_index`.
    pub fn position_of(&self, calibration_index: usize) -> Result<Pt2> {
        let geometry = self.geometry()?;
        let slot = self.topology.slot(calibration_index).ok_or_else(|| {
            OdsError::InvalidTopology(format!("no slot for camera {calibration_index}"))
        })?;
        Ok(geometry.positions[slot])
    }

    pub fn viewing_circle(&self) -> Result<ViewingCircle> {
        Ok(self.geometry()?.circle)
    }

    pub fn viewing_circle_center(&self) -> Result<Pt2> {
        Ok(self.geometry()?.circle.center)
    }

    pub fn viewing_circle_radius(&self) -> Result<Real> {
        Ok(self.geometry()?.circle.radius)
    }

    /// Store, for every camera and both eyes, the normalized panorama column
    /// its planar position projects to through the viewing circle.
    pub fn assign_ods_positions(&mut self, ipd: Real) -> Result<()> {
        let projector = ViewingCircleProjector::from_rig(self, ipd)?;
        let mut columns = Vec::with_capacity(self.cameras.len());
        for i in 0..self.cameras.len() {
            let position = self.position_of(i)?;
            columns.push((
                projector.point_to_panorama_column(&position, Eye::Left)?,
                projector.point_to_panorama_column(&position, Eye::Right)?,
            ));
        }
        for (camera, (left, right)) in self.cameras.iter_mut().zip(columns) {
            camera.set_ods_position(Eye::Left, left);
            camera.set_ods_position(Eye::Right, right);
        }
        Ok(())
    }
}

impl Index<usize> for CameraRig {
    type Output = CameraModel;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cameras[index]
    }
}

impl<'a> IntoIterator for &'a CameraRig {
    type Item = &'a CameraModel;
    type IntoIter = std::slice::Iter<'a, CameraModel>;

    fn into_iter(self) -> Self::IntoIter {
        self.cameras.iter()
    }
}
