//! Binary STL reading
//!
//! Reads back the colored binary STL layout produced by
//! [`write_stl`](crate::writer::write_stl). Records without the color bit
//! set yield `None` for their color.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Color;
use crate::writer::{STL_PREAMBLE_SIZE, STL_RECORD_SIZE, stl_size};

/// One triangle record as stored in the file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlFacet {
    /// Stored unit normal
    pub normal: [f32; 3],
    /// Corner positions in stored order
    pub vertices: [[f32; 3]; 3],
    /// Raw attribute word
    pub attribute: u16,
}

impl StlFacet {
    /// Decoded color, if the record carries one
    pub fn color(&self) -> Option<Color> {
        Color::from_stl_color(self.attribute)
    }
}

/// A parsed binary STL file
#[derive(Debug, Clone, PartialEq)]
pub struct StlFile {
    /// Raw 80-byte header
    pub header: [u8; 80],
    /// Triangle records in file order
    pub facets: Vec<StlFacet>,
}

impl StlFile {
    /// Header text up to the first NUL byte
    pub fn header_text(&self) -> String {
        let end = self.header.iter().position(|&b| b == 0).unwrap_or(80);
        String::from_utf8_lossy(&self.header[..end]).into_owned()
    }
}

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn vec3_at(bytes: &[u8], offset: usize) -> [f32; 3] {
    [
        f32_at(bytes, offset),
        f32_at(bytes, offset + 4),
        f32_at(bytes, offset + 8),
    ]
}

/// Parse a binary STL buffer
///
/// The buffer must hold exactly the number of records its count field
/// announces.
pub fn parse_binary_stl(bytes: &[u8]) -> Result<StlFile> {
    if bytes.len() < STL_PREAMBLE_SIZE {
        return Err(Error::InvalidStl(format!(
            "buffer of {} bytes is shorter than the {}-byte header",
            bytes.len(),
            STL_PREAMBLE_SIZE
        )));
    }
    let mut header = [0u8; 80];
    header.copy_from_slice(&bytes[..80]);
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;

    let expected = stl_size(count);
    if bytes.len() != expected {
        return Err(Error::InvalidStl(format!(
            "count field announces {} triangles ({} bytes) but buffer has {} bytes",
            count,
            expected,
            bytes.len()
        )));
    }

    let facets = bytes[STL_PREAMBLE_SIZE..]
        .chunks_exact(STL_RECORD_SIZE)
        .map(|record| StlFacet {
            normal: vec3_at(record, 0),
            vertices: [vec3_at(record, 12), vec3_at(record, 24), vec3_at(record, 36)],
            attribute: u16::from_le_bytes([record[48], record[49]]),
        })
        .collect::<Vec<_>>();

    debug!(triangles = facets.len(), "parsed binary STL");
    Ok(StlFile { header, facets })
}
