//! Editing session for one project at a time
//!
//! A [`Session`] owns the live parameter vector, the part colors and the
//! uniform model scale for the selected project, plus the most recently built
//! mesh group. Any change to settings, colors or scale discards the built
//! group; nothing is cached across rebuilds.
//!
//! # Example
//!
//! ```
//! use studio3d::{PrintProfile, ProjectCatalog, Session};
//!
//! # fn main() -> studio3d::Result<()> {
//! let catalog = ProjectCatalog::default();
//! let mut session = Session::new(catalog.resolve("headphone"), PrintProfile::default());
//!
//! session.set_setting("height", 20.0)?;
//! let evaluation = session.evaluate()?;
//! assert!(!evaluation.bounds.is_out_of_bounds());
//!
//! let file = session.export()?;
//! assert_eq!(file.filename, "headphone-stand.stl");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::{info, instrument};

use crate::bounds::{BoundsReport, check_bounds};
use crate::error::{Error, Result};
use crate::model::{Color, MeshGroup};
use crate::params::{ParamValue, PartColors, Settings, validate_value};
use crate::profile::{FilamentEstimate, PrintProfile, PrintTime};
use crate::project::Project;
use crate::writer::to_stl_bytes;

/// Derived figures for the current build
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Analytic volume in cm³
    pub volume: f64,
    /// Estimated print duration
    pub print_time: PrintTime,
    /// Estimated filament weight and cost
    pub filament: FilamentEstimate,
    /// Build-volume check of the built mesh group
    pub bounds: BoundsReport,
}

/// A finished export, ready to be saved or downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested file name
    pub filename: String,
    /// Binary STL content
    pub bytes: Vec<u8>,
}

/// Live editing state for one project
pub struct Session {
    project: Arc<dyn Project>,
    profile: PrintProfile,
    settings: Settings,
    colors: PartColors,
    model_scale: f64,
    current: Option<MeshGroup>,
}

impl Session {
    /// Start a session on a project's defaults
    pub fn new(project: Arc<dyn Project>, profile: PrintProfile) -> Self {
        let settings = project.default_settings();
        let colors = project.default_colors();
        Self {
            project,
            profile,
            settings,
            colors,
            model_scale: 1.0,
            current: None,
        }
    }

    /// The selected project
    pub fn project(&self) -> &dyn Project {
        self.project.as_ref()
    }

    /// The print profile used for estimates and bounds
    pub fn profile(&self) -> &PrintProfile {
        &self.profile
    }

    /// Live, unscaled settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Live part colors
    pub fn colors(&self) -> &PartColors {
        &self.colors
    }

    /// Uniform model scale
    pub fn model_scale(&self) -> f64 {
        self.model_scale
    }

    /// The most recently built mesh group, if still current
    pub fn mesh_group(&self) -> Option<&MeshGroup> {
        self.current.as_ref()
    }

    fn invalidate(&mut self) {
        self.current = None;
    }

    /// Select another project, resetting settings, colors and scale
    pub fn switch_project(&mut self, project: Arc<dyn Project>) {
        info!(from = self.project.id(), to = project.id(), "switching project");
        self.settings = project.default_settings();
        self.colors = project.default_colors();
        self.project = project;
        self.model_scale = 1.0;
        self.invalidate();
    }

    /// Replace the print profile
    pub fn set_profile(&mut self, profile: PrintProfile) {
        self.profile = profile;
    }

    /// Change one setting after checking it against the project's schema
    pub fn set_setting(&mut self, key: &str, value: impl Into<ParamValue>) -> Result<()> {
        let value = value.into();
        validate_value(
            &self.project.default_settings(),
            &self.project.controls(),
            key,
            &value,
        )?;
        self.settings.set(key, value);
        self.invalidate();
        Ok(())
    }

    /// Replace the whole settings map
    pub fn replace_settings(&mut self, settings: Settings) -> Result<()> {
        self.project.validate(&settings)?;
        self.settings = settings;
        self.invalidate();
        Ok(())
    }

    /// Restore the project's default settings
    pub fn reset_settings(&mut self) {
        self.settings = self.project.default_settings();
        self.invalidate();
    }

    /// Recolor one part
    pub fn set_part_color(&mut self, part: &str, color: Color) -> Result<()> {
        if !self.colors.contains(part) {
            return Err(Error::UnknownPart(part.to_string()));
        }
        self.colors.set(part, color);
        self.invalidate();
        Ok(())
    }

    /// Apply one color to every part
    pub fn set_all_colors(&mut self, color: Color) {
        self.colors.set_all(color);
        self.invalidate();
    }

    /// Set the uniform scale applied to every numeric setting
    pub fn set_model_scale(&mut self, scale: f64) -> Result<()> {
        self.model_scale = Error::check_positive("modelScale", scale)?;
        self.invalidate();
        Ok(())
    }

    /// Settings with the model scale applied, as passed to the project
    pub fn scaled_settings(&self) -> Settings {
        self.settings.scaled(self.model_scale)
    }

    /// Build a fresh mesh group from the current state
    #[instrument(skip(self), fields(project = self.project.id()))]
    pub fn rebuild(&mut self) -> Result<&MeshGroup> {
        self.invalidate();
        let group = self
            .project
            .create_geometry(&self.scaled_settings(), &self.colors)?;
        info!(
            parts = group.parts.len(),
            triangles = group.triangle_count(),
            "rebuilt mesh group"
        );
        Ok(self.current.insert(group))
    }

    /// Volume, estimates and bounds for the current state
    ///
    /// Builds the mesh group first if none is current.
    pub fn evaluate(&mut self) -> Result<Evaluation> {
        if self.current.is_none() {
            self.rebuild()?;
        }
        let volume = self.project.calculate_volume(&self.scaled_settings())?;
        if !volume.is_finite() || volume < 0.0 {
            return Err(Error::invalid_parameter(
                "volume",
                format!("must be finite and non-negative, got {}", volume),
            ));
        }

        let bounds = match &self.current {
            Some(group) => check_bounds(group, &self.profile.envelope),
            None => return Err(Error::NothingToExport),
        };
        Ok(Evaluation {
            volume,
            print_time: self.profile.estimate_print_time(volume),
            filament: self.profile.estimate_filament(volume),
            bounds,
        })
    }

    /// Serialize the current mesh group as colored binary STL
    ///
    /// Out-of-bounds geometry is still exported; the caller decides whether
    /// to offer the file.
    #[instrument(skip(self), fields(project = self.project.id()))]
    pub fn export(&self) -> Result<ExportFile> {
        let group = self.current.as_ref().ok_or(Error::NothingToExport)?;
        let bytes = to_stl_bytes(group)?;
        info!(bytes = bytes.len(), "exported STL");
        Ok(ExportFile {
            filename: self.project.export_filename().to_string(),
            bytes,
        })
    }
}
