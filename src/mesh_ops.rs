//! Triangle mesh measurements
//!
//! This module provides geometric measurements on meshes and composed groups:
//! - Signed volume (divergence theorem)
//! - World-space axis-aligned bounding boxes
//! - Face normals
//! - Closed-manifold checks for primitive output

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use crate::model::{Mesh, MeshGroup, Part};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from its corners
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box centred at `center` with extents `size`
    pub fn from_center_size(center: Point3<f64>, size: Vector3<f64>) -> Self {
        let half = size / 2.0;
        Self::new(center - half, center + half)
    }

    /// Smallest box containing every point, or `None` for an empty iterator
    pub fn from_points<I: IntoIterator<Item = Point3<f64>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| acc.including(&p)))
    }

    /// Grow the box to include a point
    pub fn including(self, p: &Point3<f64>) -> Self {
        Self::new(self.min.inf(p), self.max.sup(p))
    }

    /// Union of two boxes
    pub fn union(&self, other: &Aabb) -> Self {
        Self::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Extents along each axis
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Midpoint of the box
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Signed volume contribution of one triangle against the origin
fn tetra_volume(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
}

/// Compute the signed volume of a mesh using the divergence theorem
///
/// For a closed mesh with outward winding the volume is positive; negative
/// volume indicates inverted triangles. Triangles with out-of-range indices
/// are skipped.
pub fn compute_mesh_signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .filter_map(|t| mesh.corners(t))
        .map(|[a, b, c]| tetra_volume(&a, &b, &c))
        .sum()
}

/// Signed volume of a part in world space
pub fn compute_part_signed_volume(part: &Part) -> f64 {
    part.world_triangles()
        .map(|[a, b, c]| tetra_volume(&a, &b, &c))
        .sum()
}

/// Sum of the world-space signed volumes of every part
///
/// Overlapping parts are counted once per part, matching how the analytic
/// estimates add their solids.
pub fn compute_group_volume(group: &MeshGroup) -> f64 {
    group.parts.iter().map(compute_part_signed_volume).sum()
}

/// World-space bounding box of a part, or `None` if it has no triangles
pub fn compute_part_aabb(part: &Part) -> Option<Aabb> {
    Aabb::from_points(part.world_triangles().flatten())
}

/// Union of the world-space bounding boxes of all parts
///
/// Returns `None` for a group without triangles.
pub fn compute_group_aabb(group: &MeshGroup) -> Option<Aabb> {
    group
        .parts
        .iter()
        .filter_map(compute_part_aabb)
        .reduce(|acc, b| acc.union(&b))
}

/// Unit face normal `normalize((C - B) x (A - B))`
///
/// Returns the zero vector for degenerate triangles.
pub fn calculate_face_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    let cross = (c - b).cross(&(a - b));
    let magnitude = cross.norm();
    if magnitude > 0.0 {
        cross / magnitude
    } else {
        Vector3::zeros()
    }
}

/// Check that every edge is shared by exactly two triangles with opposite direction
///
/// This holds for a closed, consistently oriented mesh.
pub fn is_closed_manifold(mesh: &Mesh) -> bool {
    if mesh.triangles.is_empty() {
        return false;
    }
    let mut edges: HashMap<(usize, usize), u32> = HashMap::new();
    for t in &mesh.triangles {
        for edge in [(t.v1, t.v2), (t.v2, t.v3), (t.v3, t.v1)] {
            *edges.entry(edge).or_insert(0) += 1;
        }
    }
    edges
        .iter()
        .all(|(&(a, b), &count)| count == 1 && edges.get(&(b, a)) == Some(&1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Transform};

    fn create_cube_mesh() -> Mesh {
        let mut mesh = Mesh::new();
        for &(x, y, z) in &[
            (0.0, 0.0, 0.0),
            (10.0, 0.0, 0.0),
            (10.0, 10.0, 0.0),
            (0.0, 10.0, 0.0),
            (0.0, 0.0, 10.0),
            (10.0, 0.0, 10.0),
            (10.0, 10.0, 10.0),
            (0.0, 10.0, 10.0),
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
        mesh
    }

    #[test]
    fn test_signed_volume_cube() {
        let mesh = create_cube_mesh();
        assert!((compute_mesh_signed_volume(&mesh) - 1000.0).abs() < 1e-9);
        assert!(is_closed_manifold(&mesh));
    }

    #[test]
    fn test_signed_volume_inverted() {
        let mut mesh = create_cube_mesh();
        for t in &mut mesh.triangles {
            std::mem::swap(&mut t.v2, &mut t.v3);
        }
        assert!((compute_mesh_signed_volume(&mesh) + 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_mirrored_part_keeps_positive_volume() {
        let part = Part::new("cube", create_cube_mesh(), Color::WHITE)
            .with_transform(Transform::scaling(-1.0, 1.0, 1.0));
        assert!((compute_part_signed_volume(&part) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_group_aabb() {
        let mut group = MeshGroup::new();
        group.push(Part::new("a", create_cube_mesh(), Color::WHITE));
        group.push(
            Part::new("b", create_cube_mesh(), Color::WHITE)
                .with_transform(Transform::translation(-20.0, 5.0, 0.0)),
        );
        let aabb = compute_group_aabb(&group).unwrap();
        assert_eq!(aabb.min, Point3::new(-20.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 15.0, 10.0));
        assert_eq!(aabb.size(), Vector3::new(30.0, 15.0, 10.0));
        assert_eq!(aabb.center(), Point3::new(-5.0, 7.5, 5.0));
        assert!((compute_group_volume(&group) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_group_has_no_aabb() {
        assert!(compute_group_aabb(&MeshGroup::new()).is_none());
        assert_eq!(compute_mesh_signed_volume(&Mesh::new()), 0.0);
        assert!(!is_closed_manifold(&Mesh::new()));
    }

    #[test]
    fn test_calculate_face_normal() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        assert_eq!(calculate_face_normal(&a, &b, &c), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(calculate_face_normal(&a, &c, &b), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_calculate_face_normal_degenerate() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        let c = Point3::new(2.0, 2.0, 2.0);
        assert_eq!(calculate_face_normal(&a, &b, &c), Vector3::zeros());
    }

    #[test]
    fn test_open_mesh_is_not_manifold() {
        let mut mesh = create_cube_mesh();
        mesh.triangles.pop();
        assert!(!is_closed_manifold(&mesh));
    }
}
