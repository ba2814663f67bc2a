//! Project definitions and the project catalog
//!
//! A project turns a parameter vector and a part-color map into a composed
//! [`MeshGroup`], and computes an analytic volume from the same parameters.
//! Projects are stateless and scale-unaware; a host applies any uniform model
//! scale to the settings before calling them.
//!
//! # Example
//!
//! ```
//! use studio3d::ProjectCatalog;
//!
//! let catalog = ProjectCatalog::with_defaults();
//! let project = catalog.resolve("cherry");
//! let settings = project.default_settings();
//! let group = project
//!     .create_geometry(&settings, &project.default_colors())
//!     .unwrap();
//! assert_eq!(group.part_names(), vec!["cherry", "stem", "cap", "loop"]);
//! assert!(project.calculate_volume(&settings).unwrap() > 0.0);
//! ```

mod cherry;
mod headphone;
mod paper_towel;
mod sword_stand;

use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::model::{Color, MeshGroup};
use crate::params::{ControlGroup, PartColors, Settings, validate_settings};

pub use cherry::CherryOrnament;
pub use headphone::HeadphoneStand;
pub use paper_towel::PaperTowelHolder;
pub use sword_stand::MasterSwordStand;

/// Id of the project used when a lookup fails
pub const DEFAULT_PROJECT_ID: &str = "headphone";

/// A parametric, printable object
///
/// `create_geometry` and `calculate_volume` are pure functions of their
/// inputs. Part names in the produced group are the keys of
/// [`default_colors`](Project::default_colors).
pub trait Project: Send + Sync {
    /// Stable catalog id
    fn id(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    /// Default parameter vector
    fn default_settings(&self) -> Settings;

    /// Default color of every part
    fn default_colors(&self) -> PartColors;

    /// Grouped UI controls
    fn controls(&self) -> Vec<ControlGroup>;

    /// Build the composed mesh group
    fn create_geometry(&self, settings: &Settings, colors: &PartColors) -> Result<MeshGroup>;

    /// Analytic volume in cm³
    fn calculate_volume(&self, settings: &Settings) -> Result<f64>;

    /// File name offered for the STL export
    fn export_filename(&self) -> &'static str;

    /// Part names this project produces
    fn part_names(&self) -> Vec<String> {
        self.default_colors()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// Check a settings map against the defaults and the control schema
    fn validate(&self, settings: &Settings) -> Result<()> {
        validate_settings(&self.default_settings(), &self.controls(), settings)
    }
}

/// Build a color table from `(part, 0xRRGGBB)` pairs
fn palette(pairs: &[(&str, u32)]) -> PartColors {
    let mut colors = PartColors::new();
    for &(part, rgb) in pairs {
        colors.set(
            part,
            Color::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        );
    }
    colors
}

/// Caller colors layered over the project defaults
fn merged_colors(colors: &PartColors, defaults: PartColors) -> PartColors {
    let mut merged = defaults;
    for (part, color) in colors.iter() {
        merged.set(part, color);
    }
    merged
}

/// Registry of projects, looked up by id
///
/// # Example
///
/// ```
/// use studio3d::ProjectCatalog;
///
/// let catalog = ProjectCatalog::default();
/// assert_eq!(catalog.ids(), vec!["headphone", "cherry", "paper-towel-holder", "master-sword-stand"]);
/// assert_eq!(catalog.resolve("no-such-project").id(), "headphone");
/// ```
#[derive(Clone)]
pub struct ProjectCatalog {
    projects: Vec<Arc<dyn Project>>,
}

impl ProjectCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
        }
    }

    /// Catalog holding the four built-in projects
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register(Arc::new(HeadphoneStand));
        catalog.register(Arc::new(CherryOrnament));
        catalog.register(Arc::new(PaperTowelHolder));
        catalog.register(Arc::new(MasterSwordStand));
        catalog
    }

    /// Register a project, replacing any project with the same id
    pub fn register(&mut self, project: Arc<dyn Project>) {
        if let Some(slot) = self.projects.iter_mut().find(|p| p.id() == project.id()) {
            *slot = project;
        } else {
            self.projects.push(project);
        }
    }

    /// Look up a project by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn Project>> {
        self.projects.iter().find(|p| p.id() == id).cloned()
    }

    /// Look up a project, falling back to the headphone stand for unknown ids
    pub fn resolve(&self, id: &str) -> Arc<dyn Project> {
        if let Some(project) = self.get(id) {
            return project;
        }
        warn!(id, fallback = DEFAULT_PROJECT_ID, "unknown project id");
        self.get(DEFAULT_PROJECT_ID)
            .or_else(|| self.projects.first().cloned())
            .unwrap_or_else(|| Arc::new(HeadphoneStand))
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<&'static str> {
        self.projects.iter().map(|p| p.id()).collect()
    }

    /// All registered projects
    pub fn projects(&self) -> &[Arc<dyn Project>] {
        &self.projects
    }
}

impl Default for ProjectCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
