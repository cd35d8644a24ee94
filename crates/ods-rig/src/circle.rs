use ods_core::{OdsError, Pt2, Real, Result};
use serde::{Deserialize, Serialize};

/// Slopes closer than this are treated as equal, and chords with a smaller
/// horizontal extent as vertical.
const EPS: Real = 1e-12;

/// Number of grid samples per axis in [`sample_circle_points`].
const SAMPLES_PER_AXIS: usize = 100;

/// Circle in the rig's (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewingCircle {
    pub center: Pt2,
    pub radius: Real,
}

/// Center of the circle through three points.
///
/// Intersects the perpendicular bisectors of chords `p1p2` and `p2p3`
/// (see Paul Bourke, "Equation of a circle from 3 points"):
///
/// ```text
/// m1 = (y2 - y1) / (x2 - x1)        m2 = (y3 - y2) / (x3 - x2)
/// cx = [m1 m2 (y1 - y3) + m2 (x1 + x2) - m1 (x2 + x3)] / [2 (m2 - m1)]
/// cy = -(cx - (x1 + x2) / 2) / m1 + (y1 + y2) / 2
/// ```
///
/// When `m1 == 0` the `p1p2` bisector is vertical and `cy` is taken from the
/// `p2p3` bisector instead.
///
/// # Errors
/// [`OdsError::DegenerateGeometry`] if either chord is vertical (including
/// duplicate points) or the points are collinear.
pub fn fit_circle_to_3_points(p1: &Pt2, p2: &Pt2, p3: &Pt2) -> Result<Pt2> {
    let dx1 = p2.x - p1.x;
    let dx2 = p3.x - p2.x;
    if dx1.abs() < EPS || dx2.abs() < EPS {
        return Err(OdsError::DegenerateGeometry(format!(
            "circle fit through ({}, {}), ({}, {}), ({}, {}): chord is vertical",
            p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        )));
    }
    let m1 = (p2.y - p1.y) / dx1;
    let m2 = (p3.y - p2.y) / dx2;
    if (m2 - m1).abs() < EPS {
        return Err(OdsError::DegenerateGeometry(format!(
            "circle fit through ({}, {}), ({}, {}), ({}, {}): points are collinear",
            p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        )));
    }

    let cx = (m1 * m2 * (p1.y - p3.y) + m2 * (p1.x + p2.x) - m1 * (p2.x + p3.x))
        / (2.0 * (m2 - m1));
    let cy = if m1.abs() >= EPS {
        -(cx - (p1.x + p2.x) / 2.0) / m1 + (p1.y + p2.y) / 2.0
    } else {
        -(cx - (p2.x + p3.x) / 2.0) / m2 + (p2.y + p3.y) / 2.0
    };
    Ok(Pt2::new(cx, cy))
}

/// Sample points of a circle on a regular grid.
///
/// The square `[center - radius, center + radius)` is scanned with
/// `SAMPLES_PER_AXIS` steps per axis; a grid point is kept when
/// `|dx² + dy² - radius²| <= threshold`.
///
/// # Errors
/// - [`OdsError::DegenerateGeometry`] for a non-positive radius.
/// - [`OdsError::SamplingFailure`] if no grid point qualifies.
pub fn sample_circle_points(center: &Pt2, radius: Real, threshold: Real) -> Result<Vec<Pt2>> {
    if !(radius > 0.0 && radius.is_finite()) {
        return Err(OdsError::DegenerateGeometry(format!(
            "cannot sample circle with radius {radius}"
        )));
    }
    let step = 2.0 * radius / SAMPLES_PER_AXIS as Real;
    let r2 = radius * radius;
    let mut points = Vec::new();
    for i in 0..SAMPLES_PER_AXIS {
        let dx = -radius + i as Real * step;
        for j in 0..SAMPLES_PER_AXIS {
            let dy = -radius + j as Real * step;
            if (dx * dx + dy * dy - r2).abs() <= threshold {
                points.push(Pt2::new(center.x + dx, center.y + dy));
            }
        }
    }
    if points.is_empty() {
        return Err(OdsError::SamplingFailure(format!(
            "no grid point within {threshold} of circle at ({}, {}) with radius {radius}",
            center.x, center.y
        )));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn right_angle_triangle() {
        let c = fit_circle_to_3_points(
            &Pt2::new(0.0, 0.0),
            &Pt2::new(1.0, 0.0),
            &Pt2::new(0.0, 1.0),
        )
        .unwrap();
        assert!((c.x - 0.5).abs() < 1e-4 && (c.y - 0.5).abs() < 1e-4, "c={c:?}");
        let r = (Pt2::new(0.0, 0.0) - c).norm();
        assert!((r - 0.5_f64.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn recovers_general_circle() {
        let center = Pt2::new(2.0, -1.0);
        let radius = 3.0;
        let on = |a: Real| Pt2::new(center.x + radius * a.cos(), center.y + radius * a.sin());
        let c = fit_circle_to_3_points(&on(0.3), &on(2.0), &on(4.0)).unwrap();
        assert!((c - center).norm() < 1e-9, "c={c:?}");
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let err = fit_circle_to_3_points(
            &Pt2::new(0.0, 0.0),
            &Pt2::new(1.0, 1.0),
            &Pt2::new(2.0, 2.0),
        )
        .unwrap_err();
        assert!(matches!(err, OdsError::DegenerateGeometry(_)));
    }

    #[test]
    fn vertical_chord_is_degenerate() {
        let err = fit_circle_to_3_points(
            &Pt2::new(0.0, 0.0),
            &Pt2::new(0.0, 1.0),
            &Pt2::new(1.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, OdsError::DegenerateGeometry(_)));
    }

    #[test]
    fn duplicate_points_are_degenerate() {
        let p = Pt2::new(0.3, 0.4);
        assert!(fit_circle_to_3_points(&p, &p, &Pt2::new(1.0, 0.0)).is_err());
    }

    #[test]
    fn sampled_points_lie_on_circle() {
        let center = Pt2::new(1.0, -2.0);
        let points = sample_circle_points(&center, 1.0, 1e-6).unwrap();
        assert!(points
            .iter()
            .any(|p| (p.x - 0.0).abs() < 1e-9 && (p.y + 2.0).abs() < 1e-9));
        for p in &points {
            assert!(((p - center).norm() - 1.0).abs() < 1e-5, "p={p:?}");
        }
    }

    #[test]
    fn unreachable_threshold_fails() {
        let err = sample_circle_points(&Pt2::origin(), 1.0, -1.0).unwrap_err();
        assert!(matches!(err, OdsError::SamplingFailure(_)));
    }

    #[test]
    fn zero_radius_is_degenerate() {
        let err = sample_circle_points(&Pt2::origin(), 0.0, 1e-5).unwrap_err();
        assert!(matches!(err, OdsError::DegenerateGeometry(_)));
    }
}
