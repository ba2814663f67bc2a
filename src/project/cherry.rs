//! Cherry ornament: two cherries joined by curved stems under a hanging cap

use std::f64::consts::PI;

use nalgebra::Point3;
use tracing::debug;

use super::{Project, merged_colors, palette};
use crate::error::Result;
use crate::model::{Color, MeshGroup, Part, Transform};
use crate::params::{Control, ControlGroup, PartColors, Settings};
use crate::primitives::{CatmullRomCurve, frustum, sphere, torus, tube};

const CHERRY_SEGMENTS: usize = 32;
const DIMPLE_SEGMENTS: usize = 16;
const STEM_TUBULAR: usize = 20;
const MAIN_STEM_TUBULAR: usize = 8;
const STEM_RADIAL: usize = 8;
const CAP_SEGMENTS: usize = 16;
const TORUS_RADIAL: usize = 8;
const TORUS_TUBULAR: usize = 24;
const CONNECTOR_SEGMENTS: usize = 8;

/// Christmas ornament shaped as a pair of cherries
#[derive(Debug, Clone, Copy, Default)]
pub struct CherryOrnament;

struct Dimensions {
    cherry_radius: f64,
    cherry_spacing: f64,
    stem_length: f64,
    stem_thickness: f64,
    cap_radius: f64,
    cap_height: f64,
    loop_size: f64,
}

impl Dimensions {
    fn read(settings: &Settings) -> Result<Self> {
        Ok(Self {
            cherry_radius: settings.dimension("cherryRadius")?,
            cherry_spacing: settings.dimension("cherrySpacing")?,
            stem_length: settings.dimension("stemLength")?,
            stem_thickness: settings.dimension("stemThickness")?,
            cap_radius: settings.dimension("capRadius")?,
            cap_height: settings.dimension("capHeight")?,
            loop_size: settings.dimension("loopSize")?,
        })
    }

    /// Height where the two side stems meet
    fn junction_y(&self) -> f64 {
        self.cherry_radius * 2.0 + self.stem_length
    }

    /// Bottom of the cap
    fn cap_y(&self) -> f64 {
        self.junction_y() + self.stem_length * 0.3
    }

    /// Curved stem from the top of one cherry to the junction
    fn side_stem(&self, side: f64) -> Result<CatmullRomCurve> {
        let half = side * self.cherry_spacing / 2.0;
        let top = self.cherry_radius * 2.0;
        CatmullRomCurve::new(vec![
            Point3::new(half, top, 0.0),
            Point3::new(half * 0.7, top + self.stem_length * 0.3, 0.0),
            Point3::new(half * 0.3, top + self.stem_length * 0.6, 0.0),
            Point3::new(0.0, self.junction_y(), 0.0),
        ])
    }
}

impl Project for CherryOrnament {
    fn id(&self) -> &'static str {
        "cherry"
    }

    fn name(&self) -> &'static str {
        "Cherry Ornament"
    }

    fn default_settings(&self) -> Settings {
        Settings::new()
            .with("cherryRadius", 0.85)
            .with("cherrySpacing", 1.5)
            .with("stemLength", 1.875)
            .with("stemThickness", 0.1125)
            .with("capRadius", 0.375)
            .with("capHeight", 0.3)
            .with("loopSize", 0.3)
    }

    fn default_colors(&self) -> PartColors {
        palette(&[
            ("cherry", 0x8b0000),
            ("stem", 0x2d5016),
            ("cap", 0xd4af37),
            ("loop", 0xd4af37),
        ])
    }

    fn controls(&self) -> Vec<ControlGroup> {
        vec![
            ControlGroup::new(
                "Cherries",
                vec![
                    Control::range("cherryRadius", "Cherry Size", 0.8, 2.5, 0.1),
                    Control::range("cherrySpacing", "Cherry Spacing", 1.0, 4.0, 0.1),
                ],
            ),
            ControlGroup::new(
                "Stems",
                vec![
                    Control::range("stemLength", "Stem Length", 1.5, 5.0, 0.1),
                    Control::range("stemThickness", "Stem Thickness", 0.08, 0.3, 0.02),
                ],
            ),
            ControlGroup::new(
                "Ornament Cap",
                vec![
                    Control::range("capRadius", "Cap Size", 0.3, 1.0, 0.05),
                    Control::range("capHeight", "Cap Height", 0.2, 0.8, 0.05),
                    Control::range("loopSize", "Hanging Loop", 0.2, 0.8, 0.05),
                ],
            ),
        ]
    }

    fn create_geometry(&self, settings: &Settings, colors: &PartColors) -> Result<MeshGroup> {
        let d = Dimensions::read(settings)?;
        let colors = merged_colors(colors, self.default_colors());
        let color = |part: &str| colors.get_or(part, Color::WHITE);
        let half = d.cherry_spacing / 2.0;
        let mut group = MeshGroup::new();

        for side in [-1.0, 1.0] {
            let x = side * half;
            group.push(
                Part::new(
                    "cherry",
                    sphere(d.cherry_radius, CHERRY_SEGMENTS, CHERRY_SEGMENTS)?,
                    color("cherry"),
                )
                .with_transform(Transform::translation(x, d.cherry_radius, 0.0)),
            );
            // flattened dimple where the cherry meets the table
            group.push(
                Part::new(
                    "cherry",
                    sphere(d.cherry_radius * 0.12, DIMPLE_SEGMENTS, DIMPLE_SEGMENTS)?,
                    color("cherry"),
                )
                .with_transform(Transform::from_parts(
                    [x, d.cherry_radius * 0.08, 0.0],
                    [0.0; 3],
                    [1.0, 0.3, 1.0],
                )),
            );
        }

        for side in [-1.0, 1.0] {
            group.push(Part::new(
                "stem",
                tube(&d.side_stem(side)?, STEM_TUBULAR, d.stem_thickness, STEM_RADIAL)?,
                color("stem"),
            ));
        }
        let main_stem = CatmullRomCurve::new(vec![
            Point3::new(0.0, d.junction_y(), 0.0),
            Point3::new(0.0, d.cap_y(), 0.0),
        ])?;
        group.push(Part::new(
            "stem",
            tube(&main_stem, MAIN_STEM_TUBULAR, d.stem_thickness, STEM_RADIAL)?,
            color("stem"),
        ));

        let cap_y = d.cap_y();
        let cap_top = cap_y + d.cap_height;
        group.push(
            Part::new(
                "cap",
                frustum(d.cap_radius * 0.7, d.cap_radius, d.cap_height, CAP_SEGMENTS)?,
                color("cap"),
            )
            .with_transform(Transform::translation(0.0, cap_y + d.cap_height / 2.0, 0.0)),
        );
        for (radius, tube_radius, y) in [
            (d.cap_radius * 1.1, d.cap_radius * 0.15, cap_y),
            (d.cap_radius * 0.5, d.cap_radius * 0.1, cap_top),
        ] {
            group.push(
                Part::new(
                    "cap",
                    torus(radius, tube_radius, TORUS_RADIAL, TORUS_TUBULAR)?,
                    color("cap"),
                )
                .with_transform(Transform::from_parts([0.0, y, 0.0], [PI / 2.0, 0.0, 0.0], [1.0; 3])),
            );
        }

        group.push(
            Part::new(
                "loop",
                torus(d.loop_size, d.loop_size * 0.2, TORUS_RADIAL, TORUS_TUBULAR)?,
                color("loop"),
            )
            .with_transform(Transform::translation(0.0, cap_top + d.loop_size, 0.0)),
        );
        group.push(
            Part::new(
                "loop",
                frustum(
                    d.loop_size * 0.15,
                    d.loop_size * 0.2,
                    d.loop_size * 0.5,
                    CONNECTOR_SEGMENTS,
                )?,
                color("loop"),
            )
            .with_transform(Transform::translation(0.0, cap_top + d.loop_size * 0.25, 0.0)),
        );

        debug!(parts = group.parts.len(), triangles = group.triangle_count(), "built cherry ornament");
        Ok(group)
    }

    /// Spheres, stems as straight rods, the cap as a cylinder and the loop as a torus
    ///
    /// The dimples and the decorative cap rings are left out.
    fn calculate_volume(&self, settings: &Settings) -> Result<f64> {
        let d = Dimensions::read(settings)?;
        let cherries = 2.0 * (4.0 / 3.0) * PI * d.cherry_radius.powi(3);
        let stems = 3.0 * PI * d.stem_thickness.powi(2) * d.stem_length;
        let cap = PI * (d.cap_radius * 0.85).powi(2) * d.cap_height;
        let hanging_loop = 2.0 * PI * PI * (d.loop_size * 0.2).powi(2) * d.loop_size;
        Ok(cherries + stems + cap + hanging_loop)
    }

    fn export_filename(&self) -> &'static str {
        "new-braunfels-cherry-ornament.stl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::check_bounds;
    use crate::mesh_ops::{compute_group_aabb, compute_group_volume};
    use crate::profile::BuildEnvelope;

    #[test]
    fn test_default_volume() {
        let project = CherryOrnament;
        let volume = project.calculate_volume(&project.default_settings()).unwrap();
        assert!((volume - 5.486).abs() < 0.01, "volume {}", volume);
    }

    #[test]
    fn test_geometry_tracks_volume() {
        let project = CherryOrnament;
        let settings = project.default_settings();
        let group = project
            .create_geometry(&settings, &project.default_colors())
            .unwrap();
        // 2 cherries + 2 dimples, 3 stems, cap + 2 rings, loop + connector
        assert_eq!(group.parts.len(), 12);

        let mesh_volume = compute_group_volume(&group);
        let analytic = project.calculate_volume(&settings).unwrap();
        assert!(
            (mesh_volume - analytic).abs() < 0.1 * analytic,
            "mesh {} analytic {}",
            mesh_volume,
            analytic
        );
    }

    #[test]
    fn test_stems_meet_at_junction() {
        let d = Dimensions::read(&CherryOrnament.default_settings()).unwrap();
        let left = d.side_stem(-1.0).unwrap();
        let right = d.side_stem(1.0).unwrap();
        let end_l = left.point_at_u(1.0);
        let end_r = right.point_at_u(1.0);
        assert!((end_l - end_r).norm() < 1e-9);
        assert!((end_l.y - d.junction_y()).abs() < 1e-9);
    }

    #[test]
    fn test_ornament_is_small() {
        let project = CherryOrnament;
        let group = project
            .create_geometry(&project.default_settings(), &PartColors::new())
            .unwrap();
        let aabb = compute_group_aabb(&group).unwrap();
        assert!(aabb.min.y.abs() < 1e-9);
        assert!(aabb.size().y < 8.0);
        assert!(!check_bounds(&group, &BuildEnvelope::default()).is_out_of_bounds());
    }
}
