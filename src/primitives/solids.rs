//! Closed solids of revolution and boxes
//!
//! Conventions: Y is up. Boxes, cylinders, cones and spheres are centred on
//! the origin; cylinders and cones run along Y. Tori lie in the XY plane
//! around the Z axis. All triangles wind counter-clockwise seen from outside.

use std::f64::consts::{PI, TAU};

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Mesh;

/// Axis-aligned box centred on the origin
pub fn cuboid(width: f64, height: f64, depth: f64) -> Result<Mesh> {
    let hx = Error::check_dimension("width", width)? / 2.0;
    let hy = Error::check_dimension("height", height)? / 2.0;
    let hz = Error::check_dimension("depth", depth)? / 2.0;

    let mut mesh = Mesh::with_capacity(8, 12);
    for &(x, y, z) in &[
        (-hx, -hy, -hz),
        (hx, -hy, -hz),
        (hx, hy, -hz),
        (-hx, hy, -hz),
        (-hx, -hy, hz),
        (hx, -hy, hz),
        (hx, hy, hz),
        (-hx, hy, hz),
    ] {
        mesh.add_vertex(x, y, z);
    }
    for &(a, b, c) in &[
        (0, 2, 1),
        (0, 3, 2),
        (4, 5, 6),
        (4, 6, 7),
        (0, 1, 5),
        (0, 5, 4),
        (2, 3, 7),
        (2, 7, 6),
        (0, 4, 7),
        (0, 7, 3),
        (1, 2, 6),
        (1, 6, 5),
    ] {
        mesh.add_triangle(a, b, c);
    }
    Ok(mesh)
}

/// Truncated cone along Y, centred on the origin
///
/// A zero radius collapses that end to a single apex vertex. Caps share
/// their rim vertices with the side wall so the mesh is closed.
pub fn frustum(
    radius_top: f64,
    radius_bottom: f64,
    height: f64,
    radial_segments: usize,
) -> Result<Mesh> {
    let radius_top = Error::check_dimension("radius_top", radius_top)?;
    let radius_bottom = Error::check_dimension("radius_bottom", radius_bottom)?;
    let half = Error::check_dimension("height", height)? / 2.0;
    let n = Error::check_segments("radial_segments", radial_segments, 3)?;
    if radius_top == 0.0 && radius_bottom == 0.0 {
        return Err(Error::DegenerateGeometry(
            "frustum with both radii zero".to_string(),
        ));
    }
    debug!(radius_top, radius_bottom, height, radial_segments, "building frustum");

    let mut mesh = Mesh::with_capacity(2 * n + 2, 4 * n);
    let ring = |mesh: &mut Mesh, radius: f64, y: f64| -> Vec<usize> {
        if radius == 0.0 {
            return vec![mesh.add_vertex(0.0, y, 0.0)];
        }
        (0..n)
            .map(|i| {
                let theta = TAU * i as f64 / n as f64;
                mesh.add_vertex(radius * theta.cos(), y, radius * theta.sin())
            })
            .collect()
    };
    let top = ring(&mut mesh, radius_top, half);
    let bottom = ring(&mut mesh, radius_bottom, -half);
    let at = |ring: &[usize], i: usize| ring[i % ring.len()];

    for i in 0..n {
        let (b0, b1) = (at(&bottom, i), at(&bottom, i + 1));
        let (t0, t1) = (at(&top, i), at(&top, i + 1));
        if top.len() > 1 {
            mesh.add_triangle(b0, t0, t1);
        }
        if bottom.len() > 1 {
            mesh.add_triangle(b0, t1, b1);
        }
    }

    if top.len() > 1 {
        let center = mesh.add_vertex(0.0, half, 0.0);
        for i in 0..n {
            mesh.add_triangle(center, at(&top, i + 1), at(&top, i));
        }
    }
    if bottom.len() > 1 {
        let center = mesh.add_vertex(0.0, -half, 0.0);
        for i in 0..n {
            mesh.add_triangle(center, at(&bottom, i), at(&bottom, i + 1));
        }
    }
    Ok(mesh)
}

/// Cylinder along Y, centred on the origin
pub fn cylinder(radius: f64, height: f64, radial_segments: usize) -> Result<Mesh> {
    frustum(radius, radius, height, radial_segments)
}

/// Cone along Y with its apex at `+height / 2`
pub fn cone(radius: f64, height: f64, radial_segments: usize) -> Result<Mesh> {
    frustum(0.0, radius, height, radial_segments)
}

/// UV sphere centred on the origin with single-vertex poles on the Y axis
pub fn sphere(radius: f64, width_segments: usize, height_segments: usize) -> Result<Mesh> {
    let radius = Error::check_dimension("radius", radius)?;
    let w = Error::check_segments("width_segments", width_segments, 3)?;
    let h = Error::check_segments("height_segments", height_segments, 2)?;
    debug!(radius, width_segments, height_segments, "building sphere");

    let mut mesh = Mesh::with_capacity(w * (h - 1) + 2, 2 * w * (h - 1));
    let top = mesh.add_vertex(0.0, radius, 0.0);
    let rings: Vec<Vec<usize>> = (1..h)
        .map(|k| {
            let phi = PI * k as f64 / h as f64;
            (0..w)
                .map(|i| {
                    let theta = TAU * i as f64 / w as f64;
                    mesh.add_vertex(
                        radius * phi.sin() * theta.cos(),
                        radius * phi.cos(),
                        radius * phi.sin() * theta.sin(),
                    )
                })
                .collect()
        })
        .collect();
    let bottom = mesh.add_vertex(0.0, -radius, 0.0);

    let first = &rings[0];
    for i in 0..w {
        mesh.add_triangle(top, first[(i + 1) % w], first[i]);
    }
    for pair in rings.windows(2) {
        let (upper, lower) = (&pair[0], &pair[1]);
        for i in 0..w {
            let j = (i + 1) % w;
            mesh.add_triangle(lower[i], upper[i], upper[j]);
            mesh.add_triangle(lower[i], upper[j], lower[j]);
        }
    }
    let last = &rings[rings.len() - 1];
    for i in 0..w {
        mesh.add_triangle(bottom, last[i], last[(i + 1) % w]);
    }
    Ok(mesh)
}

/// Ring torus around the Z axis
///
/// `radius` is the distance from the centre to the tube centre, `tube` the
/// tube radius. `radial_segments` divide the tube cross-section and
/// `tubular_segments` divide the sweep around the ring.
pub fn torus(
    radius: f64,
    tube: f64,
    radial_segments: usize,
    tubular_segments: usize,
) -> Result<Mesh> {
    let radius = Error::check_dimension("radius", radius)?;
    let tube = Error::check_dimension("tube", tube)?;
    let nv = Error::check_segments("radial_segments", radial_segments, 3)?;
    let nu = Error::check_segments("tubular_segments", tubular_segments, 3)?;
    debug!(radius, tube, radial_segments, tubular_segments, "building torus");

    let mut mesh = Mesh::with_capacity(nu * nv, 2 * nu * nv);
    for j in 0..nu {
        let u = TAU * j as f64 / nu as f64;
        for i in 0..nv {
            let v = TAU * i as f64 / nv as f64;
            let r = radius + tube * v.cos();
            mesh.add_vertex(r * u.cos(), r * u.sin(), tube * v.sin());
        }
    }
    let index = |j: usize, i: usize| (j % nu) * nv + (i % nv);
    for j in 0..nu {
        for i in 0..nv {
            let a = index(j, i);
            let b = index(j + 1, i);
            let c = index(j + 1, i + 1);
            let d = index(j, i + 1);
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(a, c, d);
        }
    }
    Ok(mesh)
}

/// Volume of a right prism whose base is a regular `n`-gon inscribed in `radius`
///
/// Matches the tessellated volume of [`cylinder`] exactly and tends to
/// `pi * r^2 * h` as `n` grows.
pub fn polygon_prism_volume(radius: f64, height: f64, n: usize) -> f64 {
    let n = n as f64;
    0.5 * n * radius * radius * (TAU / n).sin() * height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_ops::{compute_mesh_signed_volume, is_closed_manifold};

    fn assert_solid(mesh: &Mesh, expected: f64, tolerance: f64) {
        assert!(is_closed_manifold(mesh), "mesh is not a closed manifold");
        let volume = compute_mesh_signed_volume(mesh);
        assert!(
            (volume - expected).abs() <= tolerance * expected,
            "volume {} differs from {} by more than {}",
            volume,
            expected,
            tolerance
        );
    }

    #[test]
    fn test_cuboid() {
        let mesh = cuboid(2.0, 3.0, 4.0).unwrap();
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert_solid(&mesh, 24.0, 1e-12);
    }

    #[test]
    fn test_cylinder_volume_matches_polygon_prism() {
        let mesh = cylinder(1.5, 22.0, 32).unwrap();
        assert_eq!(mesh.triangle_count(), 4 * 32);
        assert_solid(&mesh, polygon_prism_volume(1.5, 22.0, 32), 1e-9);
        assert_solid(&mesh, PI * 1.5 * 1.5 * 22.0, 0.01);
    }

    #[test]
    fn test_cone_has_apex() {
        let mesh = cone(0.4, 0.8, 4).unwrap();
        // apex + 4 rim + bottom centre
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.triangle_count(), 8);
        // square pyramid inscribed in r = 0.4
        assert_solid(&mesh, 2.0 * 0.4 * 0.4 * 0.8 / 3.0, 1e-9);
    }

    #[test]
    fn test_frustum_volume() {
        let (r1, r2, h) = (0.2625, 0.375, 0.3);
        let mesh = frustum(r1, r2, h, 64).unwrap();
        let exact = PI * h / 3.0 * (r1 * r1 + r1 * r2 + r2 * r2);
        assert_solid(&mesh, exact, 0.01);
    }

    #[test]
    fn test_sphere() {
        let mesh = sphere(0.85, 32, 32).unwrap();
        assert_eq!(mesh.vertices.len(), 32 * 31 + 2);
        assert_solid(&mesh, 4.0 / 3.0 * PI * 0.85f64.powi(3), 0.02);
    }

    #[test]
    fn test_coarse_sphere_is_closed() {
        let mesh = sphere(0.45, 8, 8).unwrap();
        assert!(is_closed_manifold(&mesh));
        assert!(compute_mesh_signed_volume(&mesh) > 0.0);
    }

    #[test]
    fn test_torus() {
        let (big, small) = (1.0, 0.2);
        let mesh = torus(big, small, 16, 64).unwrap();
        assert_solid(&mesh, 2.0 * PI * PI * big * small * small, 0.05);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            cylinder(-1.0, 2.0, 32),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(cuboid(1.0, f64::NAN, 1.0).is_err());
        assert!(sphere(1.0, 2, 8).is_err());
        assert!(torus(1.0, 0.1, 8, 2).is_err());
        assert!(matches!(
            frustum(0.0, 0.0, 1.0, 8),
            Err(Error::DegenerateGeometry(_))
        ));
    }
}
