//! Data structures for composed, colored triangle meshes

mod color;
mod core;
mod transform;

pub use color::Color;
pub use core::{Mesh, MeshGroup, Part, Triangle, Vertex, Vertex2D};
pub use transform::Transform;
