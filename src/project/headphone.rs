//! Headphone stand: round base, cylindrical stem and a top bar with stoppers

use std::f64::consts::PI;

use tracing::debug;

use super::{Project, merged_colors, palette};
use crate::error::Result;
use crate::model::{Color, MeshGroup, Part, Transform};
use crate::params::{Control, ControlGroup, PartColors, Settings};
use crate::primitives::{cuboid, cylinder};

const BASE_SEGMENTS: usize = 64;
const STEM_SEGMENTS: usize = 32;
const BAR_THICKNESS: f64 = 1.5;
const BAR_DEPTH: f64 = 4.0;
const STOPPER_WIDTH: f64 = 0.8;
const STOPPER_HEIGHT: f64 = 2.0;
const STOPPER_DEPTH: f64 = 4.5;

/// Desk stand for over-ear headphones
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadphoneStand;

struct Dimensions {
    height: f64,
    base_radius: f64,
    base_height: f64,
    stem_radius: f64,
    holder_width: f64,
}

impl Dimensions {
    fn read(settings: &Settings) -> Result<Self> {
        Ok(Self {
            height: settings.dimension("height")?,
            base_radius: settings.dimension("baseRadius")?,
            base_height: settings.dimension("baseHeight")?,
            stem_radius: settings.dimension("stemRadius")?,
            holder_width: settings.dimension("holderWidth")?,
        })
    }
}

impl Project for HeadphoneStand {
    fn id(&self) -> &'static str {
        "headphone"
    }

    fn name(&self) -> &'static str {
        "Headphone Stand"
    }

    fn default_settings(&self) -> Settings {
        Settings::new()
            .with("height", 22.0)
            .with("baseRadius", 6.0)
            .with("baseHeight", 1.2)
            .with("stemRadius", 1.5)
            .with("holderWidth", 14.0)
    }

    fn default_colors(&self) -> PartColors {
        palette(&[
            ("base", 0x475569),
            ("stem", 0x475569),
            ("holder", 0x475569),
            ("stoppers", 0x334155),
        ])
    }

    fn controls(&self) -> Vec<ControlGroup> {
        vec![
            ControlGroup::new(
                "Dimensions",
                vec![
                    Control::range("height", "Total Height", 10.0, 24.0, 0.5),
                    Control::range("stemRadius", "Stem Thickness", 0.5, 3.0, 0.1),
                ],
            ),
            ControlGroup::new(
                "Base",
                vec![
                    Control::range("baseRadius", "Base Radius", 4.0, 12.0, 0.5),
                    Control::range("baseHeight", "Base Height", 0.5, 3.0, 0.1),
                ],
            ),
            ControlGroup::new(
                "Holder",
                vec![Control::range("holderWidth", "Holder Width", 8.0, 24.0, 0.5)],
            ),
        ]
    }

    fn create_geometry(&self, settings: &Settings, colors: &PartColors) -> Result<MeshGroup> {
        let d = Dimensions::read(settings)?;
        let colors = merged_colors(colors, self.default_colors());
        let color = |part: &str| colors.get_or(part, Color::WHITE);
        let top = d.base_height + d.height;

        let mut group = MeshGroup::new();
        group.push(
            Part::new(
                "base",
                cylinder(d.base_radius, d.base_height, BASE_SEGMENTS)?,
                color("base"),
            )
            .with_transform(Transform::translation(0.0, d.base_height / 2.0, 0.0)),
        );
        group.push(
            Part::new(
                "stem",
                cylinder(d.stem_radius, d.height, STEM_SEGMENTS)?,
                color("stem"),
            )
            .with_transform(Transform::translation(0.0, d.base_height + d.height / 2.0, 0.0)),
        );
        group.push(
            Part::new(
                "holder",
                cuboid(d.holder_width, BAR_THICKNESS, BAR_DEPTH)?,
                color("holder"),
            )
            .with_transform(Transform::translation(0.0, top, 0.0)),
        );
        for side in [-1.0, 1.0] {
            group.push(
                Part::new(
                    "stoppers",
                    cuboid(STOPPER_WIDTH, STOPPER_HEIGHT, STOPPER_DEPTH)?,
                    color("stoppers"),
                )
                .with_transform(Transform::translation(
                    side * (d.holder_width / 2.0 + 0.2),
                    top + 0.5,
                    0.0,
                )),
            );
        }

        debug!(parts = group.parts.len(), triangles = group.triangle_count(), "built headphone stand");
        Ok(group)
    }

    fn calculate_volume(&self, settings: &Settings) -> Result<f64> {
        let d = Dimensions::read(settings)?;
        let base = PI * d.base_radius.powi(2) * d.base_height;
        let stem = PI * d.stem_radius.powi(2) * d.height;
        let bar = d.holder_width * BAR_THICKNESS * BAR_DEPTH;
        let stoppers = 2.0 * STOPPER_WIDTH * STOPPER_HEIGHT * STOPPER_DEPTH;
        Ok(base + stem + bar + stoppers)
    }

    fn export_filename(&self) -> &'static str {
        "headphone-stand.stl"
    }
}
