//! Driver-facing helpers.
//!
//! These wrap the geometry crates with `anyhow` context so a driver can
//! report which stage of the pipeline failed.

use anyhow::{Context, Result};
use image::Pixel;
use log::{info, warn};
use ods_core::{Real, RigCalibration};
use ods_render::{Image8, Reprojector};
use ods_rig::{CameraRig, RigTopology};

/// Source of per-camera images for a named frame.
///
/// Implemented by the caller's image-loading layer.
pub trait ImageSource<P: Pixel<Subpixel = u8>> {
    /// Number of cameras the source has images for.
    fn num_images(&self) -> usize;

    /// Image of camera `camera` for `frame`.
    fn image(&self, camera: usize, frame: &str) -> Result<Image8<P>>;
}

/// Build the cameras of `calibration` and resolve the rig geometry around
/// `origin`.
pub fn build_rig(
    calibration: &RigCalibration,
    topology: RigTopology,
    origin: [Real; 3],
) -> Result<CameraRig> {
    let mut rig = CameraRig::from_calibration(calibration, topology)
        .context("failed to build cameras from calibration")?;
    let geometry = rig
        .resolve_geometry(&origin)
        .context("failed to resolve rig geometry")?;
    info!(
        "resolved {} cameras, viewing circle radius {:.4}",
        geometry.positions.len(),
        geometry.circle.radius
    );
    Ok(rig)
}

/// [`build_rig`] at the rig origin, followed by per-eye ODS positions for
/// every camera.
pub fn build_ods_rig(
    calibration: &RigCalibration,
    topology: RigTopology,
    ipd: Real,
) -> Result<CameraRig> {
    let mut rig = build_rig(calibration, topology, [0.0, 0.0, 0.0])?;
    rig.assign_ods_positions(ipd)
        .with_context(|| format!("failed to place cameras on the panorama for ipd {ipd}"))?;
    Ok(rig)
}

/// Reproject the image of camera `index` into a `width` × `height`
/// equirectangular panorama.
pub fn render_camera<P>(
    rig: &CameraRig,
    index: usize,
    image: &Image8<P>,
    width: u32,
    height: u32,
) -> Result<Image8<P>>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let camera = rig
        .get(index)
        .with_context(|| format!("rig has no camera {index} (has {})", rig.len()))?;
    if image.dimensions() != (camera.width(), camera.height()) {
        warn!(
            "{}: image is {}x{}, calibration is {}x{}",
            camera.name(),
            image.width(),
            image.height(),
            camera.width(),
            camera.height()
        );
    }
    let (panorama, stats) = Reprojector::new(camera).render(image, width, height);
    info!("{}: {:?}", camera.name(), stats);
    Ok(panorama)
}

/// Render every camera's image of `frame` into its own panorama.
pub fn render_frame<P, S>(
    rig: &CameraRig,
    images: &S,
    frame: &str,
    width: u32,
    height: u32,
) -> Result<Vec<Image8<P>>>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
    S: ImageSource<P>,
{
    anyhow::ensure!(
        images.num_images() == rig.len(),
        "image source has {} cameras, rig has {}",
        images.num_images(),
        rig.len()
    );
    (0..rig.len())
        .map(|i| {
            let image = images
                .image(i, frame)
                .with_context(|| format!("failed to load image of camera {i} for {frame}"))?;
            render_camera(rig, i, &image, width, height)
        })
        .collect()
}
