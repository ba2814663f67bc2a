//! Centripetal Catmull-Rom curves through 3D control points
//!
//! The curve passes through every control point. Open ends are extended by
//! reflecting the neighbouring point. Parameterisation uses the centripetal
//! knot spacing (`alpha = 0.5`), which avoids cusps and self-intersections
//! inside a segment.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};

const ARC_LENGTH_DIVISIONS: usize = 200;
const TANGENT_DELTA: f64 = 1e-4;

/// Cubic polynomial in Hermite form for one coordinate of one segment
#[derive(Debug, Clone, Copy)]
struct Cubic {
    c0: f64,
    c1: f64,
    c2: f64,
    c3: f64,
}

impl Cubic {
    fn nonuniform(x0: f64, x1: f64, x2: f64, x3: f64, dt0: f64, dt1: f64, dt2: f64) -> Self {
        // tangents at x1 and x2, rescaled to the [0, 1] segment parameter
        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;
        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn eval(&self, t: f64) -> f64 {
        let t2 = t * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t2 * t
    }
}

/// An open centripetal Catmull-Rom spline
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Point3<f64>>,
    arc_lengths: Vec<f64>,
}

impl CatmullRomCurve {
    /// Build a curve through at least two finite control points
    pub fn new(points: Vec<Point3<f64>>) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::invalid_parameter(
                "points",
                format!("curve needs at least 2 control points, got {}", points.len()),
            ));
        }
        if points.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(Error::invalid_parameter(
                "points",
                "control points must be finite",
            ));
        }
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths();
        Ok(curve)
    }

    /// Control points
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Approximate total length
    pub fn length(&self) -> f64 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in `[0, 1]` (uniform per segment)
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let pts = &self.points;
        let l = pts.len();
        let p = (l - 1) as f64 * t.clamp(0.0, 1.0);
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f64;
        if seg >= l - 1 {
            seg = l - 2;
            weight = 1.0;
        }

        let p0 = if seg > 0 {
            pts[seg - 1]
        } else {
            pts[0] + (pts[0] - pts[1])
        };
        let p1 = pts[seg];
        let p2 = pts[seg + 1];
        let p3 = if seg + 2 < l {
            pts[seg + 2]
        } else {
            pts[l - 1] + (pts[l - 1] - pts[l - 2])
        };

        let mut dt0 = (p1 - p0).norm().sqrt();
        let mut dt1 = (p2 - p1).norm().sqrt();
        let mut dt2 = (p3 - p2).norm().sqrt();
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let axis = |i: usize| {
            Cubic::nonuniform(p0[i], p1[i], p2[i], p3[i], dt0, dt1, dt2).eval(weight)
        };
        Point3::new(axis(0), axis(1), axis(2))
    }

    fn compute_arc_lengths(&self) -> Vec<f64> {
        let mut lengths = Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1);
        let mut last = self.point_at(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=ARC_LENGTH_DIVISIONS {
            let current = self.point_at(i as f64 / ARC_LENGTH_DIVISIONS as f64);
            sum += (current - last).norm();
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    /// Convert an arc-length fraction `u` into the curve parameter `t`
    pub fn u_to_t(&self, u: f64) -> f64 {
        let lengths = &self.arc_lengths;
        let total = self.length();
        if total <= 0.0 {
            return u.clamp(0.0, 1.0);
        }
        let target = u.clamp(0.0, 1.0) * total;
        // last index whose cumulative length does not exceed the target
        let i = lengths
            .partition_point(|&len| len <= target)
            .saturating_sub(1)
            .min(lengths.len() - 2);
        let before = lengths[i];
        let segment = lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        ((i as f64 + fraction) / (lengths.len() - 1) as f64).clamp(0.0, 1.0)
    }

    /// Point at arc-length fraction `u` in `[0, 1]`
    pub fn point_at_u(&self, u: f64) -> Point3<f64> {
        self.point_at(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u` (central difference)
    pub fn tangent_at_u(&self, u: f64) -> Vector3<f64> {
        let t = self.u_to_t(u);
        let t1 = (t - TANGENT_DELTA).max(0.0);
        let t2 = (t + TANGENT_DELTA).min(1.0);
        let d = self.point_at(t2) - self.point_at(t1);
        d.try_normalize(1e-12).unwrap_or_else(Vector3::zeros)
    }
}
