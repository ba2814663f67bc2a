//! Primitive builders
//!
//! Each builder validates its dimensions (finite and non-negative) and
//! returns a closed, outward-wound [`Mesh`](crate::model::Mesh) in local
//! coordinates at a fixed, caller-chosen tessellation. Projects wrap the
//! meshes in named, colored [`Part`](crate::model::Part)s and place them with
//! transforms.

mod curve;
mod extrude;
mod solids;
mod tube;

pub use curve::CatmullRomCurve;
pub use extrude::{Profile, circle, extrude, rounded_rectangle};
pub use solids::{cone, cuboid, cylinder, frustum, polygon_prism_volume, sphere, torus};
pub use tube::tube;
