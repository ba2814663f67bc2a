//! # studio3d
//!
//! Parametric geometry for a small catalog of 3D-printable objects.
//!
//! Each project turns a parameter vector into a composed group of named,
//! colored parts built from primitive solids. The group can be checked
//! against a printer's build volume, summarized as print time and filament
//! estimates, and exported as a colored binary STL file.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Closed, outward-wound primitives: boxes, cylinders, cones, spheres, tori,
//!   extruded outlines with holes and tubes swept along Catmull-Rom curves
//! - Four built-in projects: headphone stand, cherry ornament, paper towel
//!   holder and a sword-themed phone stand
//! - Build-volume check with off-centre handling
//! - Binary STL export with the 15-bit per-triangle color extension
//!
//! ## Example
//!
//! ```
//! use studio3d::{PrintProfile, ProjectCatalog, check_bounds, writer::to_stl_bytes};
//!
//! # fn main() -> studio3d::Result<()> {
//! let catalog = ProjectCatalog::default();
//! let project = catalog.resolve("headphone");
//! let settings = project.default_settings().with("holderWidth", 16.0);
//!
//! let group = project.create_geometry(&settings, &project.default_colors())?;
//! let profile = PrintProfile::default();
//! assert!(!check_bounds(&group, &profile.envelope).is_out_of_bounds());
//!
//! let volume = project.calculate_volume(&settings)?;
//! println!("{} cm³, {}", volume, profile.estimate_print_time(volume));
//!
//! let bytes = to_stl_bytes(&group)?;
//! assert_eq!(bytes.len(), 84 + 50 * group.triangle_count());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bounds;
pub mod error;
pub mod mesh_ops;
pub mod model;
pub mod params;
pub mod parser;
pub mod polygon_triangulation;
pub mod primitives;
pub mod profile;
pub mod project;
pub mod session;
pub mod writer;

pub use bounds::{BoundsReport, check_bounds, classify_aabb};
pub use error::{Error, Result};
pub use mesh_ops::{Aabb, compute_group_aabb, compute_group_volume};
pub use model::{Color, Mesh, MeshGroup, Part, Transform, Triangle, Vertex, Vertex2D};
pub use params::{Control, ControlGroup, ControlKind, ParamValue, PartColors, Settings};
pub use parser::{StlFacet, StlFile, parse_binary_stl};
pub use profile::{BuildEnvelope, FilamentEstimate, PrintProfile, PrintTime};
pub use project::{
    CherryOrnament, DEFAULT_PROJECT_ID, HeadphoneStand, MasterSwordStand, PaperTowelHolder,
    Project, ProjectCatalog,
};
pub use session::{Evaluation, ExportFile, Session};
pub use writer::{to_stl_bytes, write_stl};
