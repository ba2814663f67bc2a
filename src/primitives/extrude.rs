//! Extruded 2D profiles with holes
//!
//! A profile is extruded along +Z from `z = 0` to `z = depth`. Caps are
//! triangulated with earcut; side walls join the bottom and top copies of
//! each contour. Both layers share vertices with the walls, so the result is
//! closed even when the profile has holes.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Mesh, Vertex2D};
use crate::polygon_triangulation::{
    orient, signed_area, strip_closing_point, triangulate_with_holes,
};

/// A closed 2D outline with zero or more holes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Profile {
    /// Outer boundary, any orientation, optionally closed
    pub outline: Vec<Vertex2D>,
    /// Interior holes, any orientation
    pub holes: Vec<Vec<Vertex2D>>,
}

impl Profile {
    /// Profile from an outer boundary
    pub fn new(outline: Vec<Vertex2D>) -> Self {
        Self {
            outline,
            holes: Vec::new(),
        }
    }

    /// Add a hole
    pub fn with_hole(mut self, hole: Vec<Vertex2D>) -> Self {
        self.holes.push(hole);
        self
    }

    /// Filled area: outline area minus hole areas
    pub fn area(&self) -> f64 {
        signed_area(&self.outline).abs()
            - self
                .holes
                .iter()
                .map(|h| signed_area(h).abs())
                .sum::<f64>()
    }
}

/// Regular polygon approximating a circle, counter-clockwise from +X
pub fn circle(cx: f64, cy: f64, radius: f64, segments: usize) -> Vec<Vertex2D> {
    (0..segments)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / segments as f64;
            Vertex2D::new(cx + radius * a.cos(), cy + radius * a.sin())
        })
        .collect()
}

/// Rectangle centred on the origin with quadratic-curve corners
///
/// Each corner is a quadratic Bezier from the end of one edge to the start
/// of the next, with the sharp corner as control point.
pub fn rounded_rectangle(
    width: f64,
    height: f64,
    radius: f64,
    corner_segments: usize,
) -> Vec<Vertex2D> {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let r = radius.min(hw).min(hh).max(0.0);
    let corners = [
        ((hw - r, -hh), (hw, -hh), (hw, -hh + r)),
        ((hw, hh - r), (hw, hh), (hw - r, hh)),
        ((-hw + r, hh), (-hw, hh), (-hw, hh - r)),
        ((-hw, -hh + r), (-hw, -hh), (-hw + r, -hh)),
    ];

    let segments = corner_segments.max(1);
    let mut points = Vec::with_capacity(4 * (segments + 1));
    for (start, control, end) in corners {
        points.push(Vertex2D::new(start.0, start.1));
        for k in 1..=segments {
            let t = k as f64 / segments as f64;
            let (a, b, c) = ((1.0 - t) * (1.0 - t), 2.0 * (1.0 - t) * t, t * t);
            points.push(Vertex2D::new(
                a * start.0 + b * control.0 + c * end.0,
                a * start.1 + b * control.1 + c * end.1,
            ));
        }
    }
    dedup_consecutive(&mut points);
    points
}

fn dedup_consecutive(points: &mut Vec<Vertex2D>) {
    points.dedup_by(|a, b| (a.x - b.x).abs() < 1e-10 && (a.y - b.y).abs() < 1e-10);
}

/// Remove points lying on the segment between their neighbours
///
/// Earcut skips such points, which would leave the cap and the side walls
/// disagreeing about the boundary.
fn drop_collinear(points: &mut Vec<Vertex2D>) {
    let mut i = 0;
    while points.len() > 3 && i < points.len() {
        let n = points.len();
        let (prev, cur, next) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
        let cross = (cur.x - prev.x) * (next.y - cur.y) - (cur.y - prev.y) * (next.x - cur.x);
        if cross.abs() < 1e-12 {
            points.remove(i);
        } else {
            i += 1;
        }
    }
}

fn prepare_contour(points: &[Vertex2D], ccw: bool, name: &str) -> Result<Vec<Vertex2D>> {
    let mut contour = points.to_vec();
    dedup_consecutive(&mut contour);
    strip_closing_point(&mut contour);
    drop_collinear(&mut contour);
    if contour.len() < 3 {
        return Err(Error::invalid_parameter(
            name,
            format!("needs at least 3 distinct points, got {}", contour.len()),
        ));
    }
    if contour.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(Error::invalid_parameter(name, "contains non-finite coordinates"));
    }
    orient(&mut contour, ccw);
    Ok(contour)
}

/// Extrude a profile along +Z into a closed prism
pub fn extrude(profile: &Profile, depth: f64) -> Result<Mesh> {
    let depth = Error::check_dimension("depth", depth)?;
    let outline = prepare_contour(&profile.outline, true, "outline")?;
    if signed_area(&outline).abs() < 1e-12 {
        return Err(Error::DegenerateGeometry(
            "profile outline has zero area".to_string(),
        ));
    }
    let holes = profile
        .holes
        .iter()
        .map(|h| prepare_contour(h, false, "hole"))
        .collect::<Result<Vec<_>>>()?;

    let indices = triangulate_with_holes(&outline, &holes)?;

    let contours: Vec<&[Vertex2D]> = std::iter::once(outline.as_slice())
        .chain(holes.iter().map(Vec::as_slice))
        .collect();
    let all: Vec<Vertex2D> = contours.iter().flat_map(|c| c.iter().copied()).collect();
    let n = all.len();
    debug!(points = n, holes = holes.len(), depth, "extruding profile");

    let mut mesh = Mesh::with_capacity(2 * n, 2 * indices.len() / 3 + 2 * n);
    for p in &all {
        mesh.add_vertex(p.x, p.y, 0.0);
    }
    for p in &all {
        mesh.add_vertex(p.x, p.y, depth);
    }

    for tri in indices.chunks_exact(3) {
        let (a, mut b, mut c) = (tri[0], tri[1], tri[2]);
        if signed_area(&[all[a], all[b], all[c]]) < 0.0 {
            std::mem::swap(&mut b, &mut c);
        }
        mesh.add_triangle(n + a, n + b, n + c);
        mesh.add_triangle(c, b, a);
    }

    let mut start = 0;
    for contour in &contours {
        let len = contour.len();
        for i in 0..len {
            let p = start + i;
            let q = start + (i + 1) % len;
            mesh.add_triangle(p, q, n + q);
            mesh.add_triangle(p, n + q, n + p);
        }
        start += len;
    }
    Ok(mesh)
}
