//! Core mesh types: vertices, indexed triangles, parts and mesh groups

use nalgebra::Point3;

use super::color::Color;
use super::transform::Transform;

/// A vertex in 3D space (scene units, 1 unit = 1 cm)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate (up)
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The vertex as a nalgebra point
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

/// A 2D vertex used for profile outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex2D {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Vertex2D {
    /// Create a new 2D vertex
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A triangle defined by three vertex indices, wound counter-clockwise seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }
}

/// An indexed triangle mesh in local coordinates
#[derive(Debug, Clone)]
pub struct Mesh {
    /// List of vertices
    pub vertices: Vec<Vertex>,
    /// List of triangles
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a new mesh with pre-allocated capacity
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.vertices.push(Vertex::new(x, y, z));
        self.vertices.len() - 1
    }

    /// Append a triangle
    pub fn add_triangle(&mut self, v1: usize, v2: usize, v3: usize) {
        self.triangles.push(Triangle::new(v1, v2, v3));
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Resolve a triangle's corner positions, or `None` if an index is out of range
    pub fn corners(&self, triangle: &Triangle) -> Option<[Point3<f64>; 3]> {
        Some([
            self.vertices.get(triangle.v1)?.to_point(),
            self.vertices.get(triangle.v2)?.to_point(),
            self.vertices.get(triangle.v3)?.to_point(),
        ])
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, single-color piece of a composed object
///
/// The name is a stable identifier used to look up color overrides; it never
/// affects geometry. `transform` maps the local mesh into world coordinates.
#[derive(Debug, Clone)]
pub struct Part {
    /// Stable part name (e.g. "base", "stem")
    pub name: String,
    /// Display and export color
    pub color: Color,
    /// Local geometry
    pub mesh: Mesh,
    /// Local-to-world transform
    pub transform: Transform,
}

impl Part {
    /// Create a part at the origin with the identity transform
    pub fn new(name: impl Into<String>, mesh: Mesh, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            mesh,
            transform: Transform::identity(),
        }
    }

    /// Set the local-to-world transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Place this part inside a parent frame (`parent * self.transform`)
    pub fn placed_in(mut self, parent: &Transform) -> Self {
        self.transform = parent * &self.transform;
        self
    }

    /// Number of triangles in the part
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// World-space triangle corners in stored order
    ///
    /// When the transform mirrors space, the second and third corners are
    /// swapped so the right-hand normal still points out of the solid.
    pub fn world_triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        let mirrored = self.transform.is_mirroring();
        self.mesh.triangles.iter().filter_map(move |t| {
            let [a, b, c] = self.mesh.corners(t)?;
            let (a, b, c) = (
                self.transform.apply_point(&a),
                self.transform.apply_point(&b),
                self.transform.apply_point(&c),
            );
            Some(if mirrored { [a, c, b] } else { [a, b, c] })
        })
    }
}

/// An ordered collection of parts forming one composed object
#[derive(Debug, Clone, Default)]
pub struct MeshGroup {
    /// Parts in composition order (also the export order)
    pub parts: Vec<Part>,
}

impl MeshGroup {
    /// Create an empty group
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Append a part
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Move every part of `other` into this group, nested under `parent`
    pub fn extend_placed(&mut self, other: MeshGroup, parent: &Transform) {
        self.parts
            .extend(other.parts.into_iter().map(|p| p.placed_in(parent)));
    }

    /// True when the group holds no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total triangle count over all parts
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(Part::triangle_count).sum()
    }

    /// Parts carrying the given name
    pub fn parts_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Part> + 'a {
        self.parts.iter().filter(move |p| p.name == name)
    }

    /// Distinct part names in first-appearance order
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for part in &self.parts {
            if !names.contains(&part.name.as_str()) {
                names.push(&part.name);
            }
        }
        names
    }
}
