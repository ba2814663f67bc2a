//! Polygon triangulation for extruded profile caps
//!
//! Profiles are 2D outlines with optional holes. Caps are filled with the
//! `earcutr` library, a Rust port of MapBox's earcut.js. This module also
//! normalizes outline orientation so cap and side winding can be derived
//! from it: outlines counter-clockwise, holes clockwise.

use crate::model::Vertex2D;

/// Error type for polygon triangulation operations
#[derive(Debug, thiserror::Error)]
pub enum TriangulationError {
    /// Polygon has too few vertices to triangulate
    #[error("Polygon has too few vertices: {0} (minimum 3 required)")]
    TooFewVertices(usize),

    /// Invalid hole outline
    #[error("Invalid hole: {0}")]
    InvalidHole(String),

    /// Triangulation failed
    #[error("Triangulation failed: {0}")]
    TriangulationFailed(String),
}

/// Signed area of a closed polygon (shoelace formula)
///
/// Positive for counter-clockwise vertex order.
pub fn signed_area(polygon: &[Vertex2D]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = &polygon[(i + 1) % polygon.len()];
        twice_area += a.x * b.y - b.x * a.y;
    }
    twice_area / 2.0
}

/// Drop a trailing point that repeats the first one
///
/// Outlines traced with path commands usually end where they started.
pub fn strip_closing_point(polygon: &mut Vec<Vertex2D>) {
    while polygon.len() > 1 {
        let (first, last) = (polygon[0], polygon[polygon.len() - 1]);
        if (first.x - last.x).abs() < 1e-10 && (first.y - last.y).abs() < 1e-10 {
            polygon.pop();
        } else {
            break;
        }
    }
}

/// Reorder a polygon so it winds counter-clockwise (`ccw = true`) or clockwise
pub fn orient(polygon: &mut [Vertex2D], ccw: bool) {
    let area = signed_area(polygon);
    if (area > 0.0) != ccw && area != 0.0 {
        polygon.reverse();
    }
}

/// Triangulate a polygon with zero or more holes
///
/// Returns triangle indices into the combined vertex list: outline vertices
/// first, followed by each hole's vertices in order. The outer boundary
/// should wind counter-clockwise and holes clockwise.
///
/// # Errors
///
/// Returns an error if:
/// - The outer polygon has fewer than 3 vertices
/// - Any hole has fewer than 3 vertices
/// - The triangulation algorithm fails
///
/// # Example
///
/// ```
/// use studio3d::model::Vertex2D;
/// use studio3d::polygon_triangulation::triangulate_with_holes;
///
/// let outer = vec![
///     Vertex2D::new(0.0, 0.0),
///     Vertex2D::new(6.0, 0.0),
///     Vertex2D::new(6.0, 6.0),
///     Vertex2D::new(0.0, 6.0),
/// ];
/// let hole = vec![
///     Vertex2D::new(2.0, 2.0),
///     Vertex2D::new(2.0, 4.0),
///     Vertex2D::new(4.0, 4.0),
///     Vertex2D::new(4.0, 2.0),
/// ];
///
/// let indices = triangulate_with_holes(&outer, &[hole]).unwrap();
/// assert_eq!(indices.len() % 3, 0);
/// ```
pub fn triangulate_with_holes(
    outer: &[Vertex2D],
    holes: &[Vec<Vertex2D>],
) -> Result<Vec<usize>, TriangulationError> {
    if outer.len() < 3 {
        return Err(TriangulationError::TooFewVertices(outer.len()));
    }

    for (i, hole) in holes.iter().enumerate() {
        if hole.len() < 3 {
            return Err(TriangulationError::InvalidHole(format!(
                "Hole {} has only {} vertices (minimum 3 required)",
                i,
                hole.len()
            )));
        }
    }

    // Format: [outer_x0, outer_y0, ..., hole1_x0, hole1_y0, ..., hole2_x0, ...]
    let mut coords =
        Vec::with_capacity((outer.len() + holes.iter().map(|h| h.len()).sum::<usize>()) * 2);
    for vertex in outer {
        coords.push(vertex.x);
        coords.push(vertex.y);
    }

    let mut hole_indices = Vec::with_capacity(holes.len());
    let mut current_index = outer.len();
    for hole in holes {
        hole_indices.push(current_index);
        for vertex in hole {
            coords.push(vertex.x);
            coords.push(vertex.y);
        }
        current_index += hole.len();
    }

    let result = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| TriangulationError::TriangulationFailed(format!("Earcut error: {}", e)))?;

    if result.is_empty() {
        return Err(TriangulationError::TriangulationFailed(
            "Earcut returned no triangles".to_string(),
        ));
    }

    Ok(result)
}
