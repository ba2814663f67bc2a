//! Binary STL writing with per-triangle color
//!
//! Layout, little-endian throughout:
//!
//! | Offset | Size | Content |
//! |---|---|---|
//! | 0 | 80 | Free-text header, zero padded |
//! | 80 | 4 | Triangle count (`u32`) |
//! | 84 | 50 × n | Records: normal (3 × `f32`), three vertices (9 × `f32`), color (`u16`) |
//!
//! The color word is `0x8000 | B << 10 | G << 5 | R` with 5-bit channels.
//! Vertices are written in world space: each part's transform is applied
//! and the normal is recomputed from the transformed corners.

use std::io::Write;

use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::mesh_ops::calculate_face_normal;
use crate::model::MeshGroup;

/// Text placed at the start of the 80-byte header
pub const STL_HEADER_TEXT: &[u8] = b"Binary STL with color";

/// Size of the header plus triangle count
pub const STL_PREAMBLE_SIZE: usize = 84;

/// Size of one triangle record
pub const STL_RECORD_SIZE: usize = 50;

const HEADER_SIZE: usize = 80;

/// Exact byte size of the export for `triangles` triangles
pub fn stl_size(triangles: usize) -> usize {
    STL_PREAMBLE_SIZE + STL_RECORD_SIZE * triangles
}

fn put_f32s<W: Write>(writer: &mut W, values: [f64; 3]) -> Result<()> {
    for v in values {
        writer.write_all(&(v as f32).to_le_bytes())?;
    }
    Ok(())
}

/// Serialize a mesh group as colored binary STL
///
/// Triangles are emitted part by part in group order, each part in its
/// own triangle order.
#[instrument(skip_all, fields(parts = group.parts.len()))]
pub fn write_stl<W: Write>(group: &MeshGroup, mut writer: W) -> Result<()> {
    let total = group.triangle_count();
    let count = u32::try_from(total).map_err(|_| Error::TooManyTriangles(total))?;

    let mut header = [0u8; HEADER_SIZE];
    header[..STL_HEADER_TEXT.len()].copy_from_slice(STL_HEADER_TEXT);
    writer.write_all(&header)?;
    writer.write_all(&count.to_le_bytes())?;

    let mut written = 0usize;
    for part in &group.parts {
        let color = part.color.to_stl_color().to_le_bytes();
        for [a, b, c] in part.world_triangles() {
            let normal = calculate_face_normal(&a, &b, &c);
            put_f32s(&mut writer, [normal.x, normal.y, normal.z])?;
            for p in [a, b, c] {
                put_f32s(&mut writer, [p.x, p.y, p.z])?;
            }
            writer.write_all(&color)?;
            written += 1;
        }
    }

    // out-of-range indices are skipped by world_triangles
    if written != total {
        return Err(Error::DegenerateGeometry(format!(
            "{} of {} triangles reference missing vertices",
            total - written,
            total
        )));
    }

    writer.flush()?;
    debug!(triangles = total, bytes = stl_size(total), "wrote binary STL");
    Ok(())
}

/// Serialize a mesh group into an in-memory STL buffer
///
/// # Example
///
/// ```
/// use studio3d::{MeshGroup, writer::to_stl_bytes};
///
/// let bytes = to_stl_bytes(&MeshGroup::new()).unwrap();
/// assert_eq!(bytes.len(), 84);
/// assert_eq!(&bytes[80..84], &[0, 0, 0, 0]);
/// ```
pub fn to_stl_bytes(group: &MeshGroup) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(stl_size(group.triangle_count()));
    write_stl(group, &mut buffer)?;
    Ok(buffer)
}
