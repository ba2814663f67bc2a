//! Capped tubes swept along a curve
//!
//! Rings are placed at equal arc-length steps and oriented with parallel
//! transport frames, so the tube does not twist around its centreline.

use std::f64::consts::TAU;

use nalgebra::{Rotation3, Unit, Vector3};
use tracing::debug;

use super::curve::CatmullRomCurve;
use crate::error::{Error, Result};
use crate::model::Mesh;

/// Orthonormal frame along a curve
#[derive(Debug, Clone, Copy)]
struct Frame {
    tangent: Vector3<f64>,
    normal: Vector3<f64>,
    binormal: Vector3<f64>,
}

fn transport_frames(curve: &CatmullRomCurve, segments: usize) -> Vec<Frame> {
    let tangents: Vec<Vector3<f64>> = (0..=segments)
        .map(|i| curve.tangent_at_u(i as f64 / segments as f64))
        .collect();

    // seed the first normal from the axis least aligned with the tangent
    let t0 = tangents[0];
    let axis = if t0.x.abs() <= t0.y.abs() && t0.x.abs() <= t0.z.abs() {
        Vector3::x()
    } else if t0.y.abs() <= t0.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };
    let side = t0.cross(&axis).normalize();
    let normal = t0.cross(&side);
    let mut frames = Vec::with_capacity(segments + 1);
    frames.push(Frame {
        tangent: t0,
        normal,
        binormal: t0.cross(&normal),
    });

    for i in 1..=segments {
        let prev = frames[i - 1];
        let tangent = tangents[i];
        let mut normal = prev.normal;
        let axis = prev.tangent.cross(&tangent);
        if axis.norm() > f64::EPSILON {
            let angle = prev.tangent.dot(&tangent).clamp(-1.0, 1.0).acos();
            let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle);
            normal = rotation * normal;
        }
        frames.push(Frame {
            tangent,
            normal,
            binormal: tangent.cross(&normal),
        });
    }
    frames
}

/// Closed tube of constant radius following `curve`
///
/// `tubular_segments` rings are spaced along the curve, each with
/// `radial_segments` vertices. Both ends are closed with flat fans.
pub fn tube(
    curve: &CatmullRomCurve,
    tubular_segments: usize,
    radius: f64,
    radial_segments: usize,
) -> Result<Mesh> {
    let radius = Error::check_dimension("radius", radius)?;
    let segments = Error::check_segments("tubular_segments", tubular_segments, 1)?;
    let radial = Error::check_segments("radial_segments", radial_segments, 3)?;
    if curve.length() < 1e-9 {
        return Err(Error::DegenerateGeometry(
            "tube centreline has zero length".to_string(),
        ));
    }
    debug!(radius, tubular_segments, radial_segments, length = curve.length(), "building tube");

    let frames = transport_frames(curve, segments);
    let mut mesh = Mesh::with_capacity((segments + 1) * radial + 2, 2 * radial * (segments + 1));
    for (i, frame) in frames.iter().enumerate() {
        let center = curve.point_at_u(i as f64 / segments as f64);
        for j in 0..radial {
            let v = TAU * j as f64 / radial as f64;
            let dir = frame.normal * v.cos() + frame.binormal * v.sin();
            mesh.add_vertex(
                center.x + radius * dir.x,
                center.y + radius * dir.y,
                center.z + radius * dir.z,
            );
        }
    }

    let index = |i: usize, j: usize| i * radial + (j % radial);
    for i in 0..segments {
        for j in 0..radial {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i + 1, j + 1);
            let d = index(i, j + 1);
            mesh.add_triangle(a, c, b);
            mesh.add_triangle(a, d, c);
        }
    }

    let start = curve.point_at_u(0.0);
    let start_center = mesh.add_vertex(start.x, start.y, start.z);
    for j in 0..radial {
        mesh.add_triangle(start_center, index(0, j + 1), index(0, j));
    }
    let end = curve.point_at_u(1.0);
    let end_center = mesh.add_vertex(end.x, end.y, end.z);
    for j in 0..radial {
        mesh.add_triangle(end_center, index(segments, j), index(segments, j + 1));
    }
    Ok(mesh)
}
