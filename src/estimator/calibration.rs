//! Pixel-to-world perspective mapping from a four-point calibration.

use nalgebra::{Matrix3, SMatrix, SVector, Vector3};
use thiserror::Error;

/// Error type for calibration failures.
///
/// Calibration errors are fatal: a degenerate correspondence cannot be
/// repaired at runtime and must abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalibrationError {
    /// The four point correspondences do not determine an invertible
    /// projective transform.
    #[error("degenerate calibration points: {0}")]
    DegeneratePoints(&'static str),
}

/// Fixed projective transform from pixel space to world ground-plane space.
///
/// Built once at startup from four pixel points and their four real-world
/// counterparts (e.g. measured corners of a road segment in meters).
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct Calibration {
    matrix: Matrix3<f64>,
}

impl Calibration {
    /// Derive the 3x3 projective transform mapping each `pixel_points[i]`
    /// onto `world_points[i]`.
    ///
    /// Solves the standard 8-unknown linear system with `h33` pinned to 1.
    /// Fails when the pixel points are collinear or duplicated (the system
    /// is singular) or when the resulting matrix is not invertible (e.g.
    /// degenerate world points).
    pub fn new(
        pixel_points: [[f64; 2]; 4],
        world_points: [[f64; 2]; 4],
    ) -> Result<Self, CalibrationError> {
        if any_triple_collinear(&pixel_points) {
            return Err(CalibrationError::DegeneratePoints(
                "pixel points are collinear or duplicated",
            ));
        }

        let mut a = SMatrix::<f64, 8, 8>::zeros();
        let mut b = SVector::<f64, 8>::zeros();

        for (i, (src, dst)) in pixel_points.iter().zip(world_points.iter()).enumerate() {
            let [x, y] = *src;
            let [u, v] = *dst;

            a[(2 * i, 0)] = x;
            a[(2 * i, 1)] = y;
            a[(2 * i, 2)] = 1.0;
            a[(2 * i, 6)] = -x * u;
            a[(2 * i, 7)] = -y * u;
            b[2 * i] = u;

            a[(2 * i + 1, 3)] = x;
            a[(2 * i + 1, 4)] = y;
            a[(2 * i + 1, 5)] = 1.0;
            a[(2 * i + 1, 6)] = -x * v;
            a[(2 * i + 1, 7)] = -y * v;
            b[2 * i + 1] = v;
        }

        let h = a.lu().solve(&b).ok_or(CalibrationError::DegeneratePoints(
            "correspondence system is singular",
        ))?;

        let matrix = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);

        let det = matrix.determinant();
        if !det.is_finite() || det.abs() < 1e-12 {
            return Err(CalibrationError::DegeneratePoints(
                "transform is not invertible",
            ));
        }

        Ok(Self { matrix })
    }

    /// Project a pixel point onto the world ground plane.
    ///
    /// Pure and deterministic. Points whose homogeneous scale collapses to
    /// zero (the horizon line of the transform) map to the origin.
    #[inline]
    pub fn pixel_to_world(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.matrix * Vector3::new(x, y, 1.0);
        if p.z.abs() > f64::EPSILON {
            (p.x / p.z, p.y / p.z)
        } else {
            (0.0, 0.0)
        }
    }

    /// The derived 3x3 transform matrix.
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }
}

/// True when any three of the four points sit on one line (which also
/// covers duplicated points).
fn any_triple_collinear(points: &[[f64; 2]; 4]) -> bool {
    for i in 0..2 {
        for j in (i + 1)..3 {
            for k in (j + 1)..4 {
                let [x0, y0] = points[i];
                let [x1, y1] = points[j];
                let [x2, y2] = points[k];
                let cross = (x1 - x0) * (y2 - y0) - (y1 - y0) * (x2 - x0);
                let scale = ((x1 - x0).hypot(y1 - y0)) * ((x2 - x0).hypot(y2 - y0));
                if cross.abs() <= 1e-9 * scale.max(1.0) {
                    return true;
                }
            }
        }
    }
    false
}
