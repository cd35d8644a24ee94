use image::{ImageBuffer, Pixel};
use log::debug;
use ods_core::spherical::unnormalize_xy;
use ods_core::{CameraModel, OdsError, Real, Result};
use rayon::prelude::*;

/// 8-bit image buffer with any pixel layout (`Rgb<u8>`, `Luma<u8>`, ...).
pub type Image8<P> = ImageBuffer<P, Vec<u8>>;

/// Where a source pixel ends up in the output panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Pixel { x: u32, y: u32 },
    OutOfBounds,
    /// The pixel's ray could not be oriented: either the extrinsic sends it
    /// to infinity or one of its planar projections is zero.
    Degenerate,
}

/// Outcome counts of one reprojection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReprojectionStats {
    pub written: usize,
    pub out_of_bounds: usize,
    pub degenerate: usize,
}

/// Scatters the pixels of one camera into an equirectangular panorama.
#[derive(Debug, Clone, Copy)]
pub struct Reprojector<'a> {
    camera: &'a CameraModel,
}

impl<'a> Reprojector<'a> {
    pub fn new(camera: &'a CameraModel) -> Self {
        Self { camera }
    }

    pub fn camera(&self) -> &CameraModel {
        self.camera
    }

    /// Output coordinate of source pixel `(x, y)` in a `width` × `height`
    /// panorama, or `None` when it falls outside.
    pub fn target_pixel(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Option<(u32, u32)>> {
        let angle = self.camera.pixel_orientation(Real::from(x), Real::from(y))?;
        let (xn, yn) = angle.to_normalized_xy();
        let (xo, yo) = unnormalize_xy(xn, yn, width, height);
        let inside = xo >= 0.0 && yo >= 0.0 && xo < Real::from(width) && yo < Real::from(height);
        Ok(inside.then_some((xo as u32, yo as u32)))
    }

    /// Classify where source pixel `(x, y)` lands in a `width` × `height`
    /// panorama.
    pub fn target(&self, x: u32, y: u32, width: u32, height: u32) -> Target {
        match self.target_pixel(x, y, width, height) {
            Ok(Some((x, y))) => Target::Pixel { x, y },
            Ok(None) => Target::OutOfBounds,
            Err(err) => {
                debug_assert!(matches!(err, OdsError::DegenerateGeometry(_)));
                Target::Degenerate
            }
        }
    }

    /// Targets of one source row.
    fn map_row(&self, y: u32, source_width: u32, width: u32, height: u32) -> Vec<Target> {
        (0..source_width)
            .map(|x| self.target(x, y, width, height))
            .collect()
    }

    /// Scatter `source` into `output`.
    ///
    /// Targets are computed in parallel per source row; writes are then
    /// applied in raster order, so when several source pixels hit the same
    /// output pixel the last one in raster order wins. Output pixels that
    /// receive nothing keep their previous value.
    pub fn reproject_into<P>(
        &self,
        source: &Image8<P>,
        output: &mut Image8<P>,
    ) -> ReprojectionStats
    where
        P: Pixel<Subpixel = u8> + Send + Sync,
    {
        let (width, height) = output.dimensions();
        let source_width = source.width();
        let rows: Vec<Vec<Target>> = (0..source.height())
            .into_par_iter()
            .map(|y| self.map_row(y, source_width, width, height))
            .collect();

        let mut stats = ReprojectionStats::default();
        for (y, row) in (0u32..).zip(&rows) {
            for (x, target) in (0u32..).zip(row) {
                match *target {
                    Target::Pixel { x: xo, y: yo } => {
                        output.put_pixel(xo, yo, *source.get_pixel(x, y));
                        stats.written += 1;
                    }
                    Target::OutOfBounds => stats.out_of_bounds += 1,
                    Target::Degenerate => stats.degenerate += 1,
                }
            }
        }
        debug!(
            "{}: reprojected {}x{} -> {}x{}: {:?}",
            self.camera.name(),
            source.width(),
            source.height(),
            width,
            height,
            stats
        );
        stats
    }

    /// Render `source` into a fresh zero-initialized `width` × `height`
    /// panorama.
    pub fn render<P>(
        &self,
        source: &Image8<P>,
        width: u32,
        height: u32,
    ) -> (Image8<P>, ReprojectionStats)
    where
        P: Pixel<Subpixel = u8> + Send + Sync,
    {
        let mut output = ImageBuffer::new(width, height);
        let stats = self.reproject_into(source, &mut output);
        (output, stats)
    }
}

/// Scatter `source`, seen through `camera`, into `output`.
pub fn reproject<P>(
    camera: &CameraModel,
    source: &Image8<P>,
    output: &mut Image8<P>,
) -> ReprojectionStats
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    Reprojector::new(camera).reproject_into(source, output)
}
