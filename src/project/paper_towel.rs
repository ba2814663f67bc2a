//! Under-cabinet paper towel holder, laid out as three printable pieces
//!
//! Two mirrored brackets (screw plate, support arm, rod socket) and a rod
//! with reduced-diameter pegs at both ends. The right bracket is the left
//! one mirrored through its local YZ plane.

use std::f64::consts::PI;

use tracing::debug;

use super::{Project, merged_colors, palette};
use crate::error::{Error, Result};
use crate::model::{Color, MeshGroup, Part, Transform};
use crate::params::{Control, ControlGroup, PartColors, Settings};
use crate::primitives::{Profile, circle, cuboid, cylinder, extrude, rounded_rectangle};

const PLATE_CORNER_RADIUS: f64 = 0.3;
const PLATE_CORNER_SEGMENTS: usize = 6;
const CIRCLE_SEGMENTS: usize = 24;
const ROD_SEGMENTS: usize = 32;
const SOCKET_WALL: f64 = 0.5;
const SOCKET_EXTRA: f64 = 0.3;
const BRACKET_OFFSET: [f64; 3] = [10.0, 0.0, -5.0];
const ROD_Z: f64 = 8.0;

/// Wall-mounted holder for a standard paper towel roll
#[derive(Debug, Clone, Copy, Default)]
pub struct PaperTowelHolder;

struct Dimensions {
    rod_length: f64,
    rod_diameter: f64,
    arm_height: f64,
    arm_width: f64,
    arm_thickness: f64,
    mount_width: f64,
    mount_depth: f64,
    mount_thickness: f64,
    hole_diameter: f64,
    hole_inset: f64,
    socket_depth: f64,
    tolerance: f64,
}

impl Dimensions {
    fn read(settings: &Settings) -> Result<Self> {
        let d = Self {
            rod_length: settings.dimension("rodLength")?,
            rod_diameter: settings.dimension("rodDiameter")?,
            arm_height: settings.dimension("armHeight")?,
            arm_width: settings.dimension("armWidth")?,
            arm_thickness: settings.dimension("armThickness")?,
            mount_width: settings.dimension("mountWidth")?,
            mount_depth: settings.dimension("mountDepth")?,
            mount_thickness: settings.dimension("mountThickness")?,
            hole_diameter: settings.dimension("holeDiameter")?,
            hole_inset: settings.dimension("holeInset")?,
            socket_depth: settings.dimension("socketDepth")?,
            tolerance: settings.dimension("tolerance")?,
        };
        d.check()?;
        Ok(d)
    }

    /// Reject combinations the plate, socket or rod cannot be built from
    fn check(&self) -> Result<()> {
        let hole_radius = self.hole_radius();
        if self.hole_inset <= hole_radius {
            return Err(Error::invalid_parameter(
                "holeInset",
                format!(
                    "screw holes of radius {} would cut the plate edge at inset {}",
                    hole_radius, self.hole_inset
                ),
            ));
        }
        let (hx, hz) = self.hole_offsets();
        if hx <= hole_radius || hz <= hole_radius {
            return Err(Error::invalid_parameter(
                "holeDiameter",
                "screw holes overlap on a plate this small",
            ));
        }
        if self.tolerance >= SOCKET_WALL {
            return Err(Error::invalid_parameter(
                "tolerance",
                format!("must be below the socket wall of {}", SOCKET_WALL),
            ));
        }
        if self.peg_radius() <= 0.0 {
            return Err(Error::invalid_parameter(
                "tolerance",
                "leaves no material for the rod pegs",
            ));
        }
        if self.main_rod_length() <= 0.0 {
            return Err(Error::invalid_parameter(
                "rodLength",
                "must exceed twice the socket depth",
            ));
        }
        Ok(())
    }

    fn hole_radius(&self) -> f64 {
        self.hole_diameter / 2.0
    }

    fn hole_offsets(&self) -> (f64, f64) {
        (
            self.mount_width / 2.0 - self.hole_inset,
            self.mount_depth / 2.0 - self.hole_inset,
        )
    }

    fn corner_radius(&self) -> f64 {
        PLATE_CORNER_RADIUS
            .min(self.mount_width / 2.0)
            .min(self.mount_depth / 2.0)
    }

    fn rod_radius(&self) -> f64 {
        self.rod_diameter / 2.0
    }

    fn socket_outer_radius(&self) -> f64 {
        self.rod_radius() + SOCKET_WALL
    }

    fn socket_inner_radius(&self) -> f64 {
        self.rod_radius() + self.tolerance
    }

    fn socket_length(&self) -> f64 {
        self.socket_depth + SOCKET_EXTRA
    }

    fn peg_radius(&self) -> f64 {
        self.rod_radius() - self.tolerance
    }

    fn main_rod_length(&self) -> f64 {
        self.rod_length - 2.0 * self.socket_depth
    }

    /// One bracket in its own frame, socket pointing toward +X
    fn bracket(&self, colors: &PartColors) -> Result<MeshGroup> {
        let color = |part: &str| colors.get_or(part, Color::WHITE);
        let mut bracket = MeshGroup::new();

        let (hx, hz) = self.hole_offsets();
        let mut plate = Profile::new(rounded_rectangle(
            self.mount_width,
            self.mount_depth,
            self.corner_radius(),
            PLATE_CORNER_SEGMENTS,
        ));
        for (x, z) in [(-hx, -hz), (hx, -hz), (-hx, hz), (hx, hz)] {
            plate = plate.with_hole(circle(x, z, self.hole_radius(), CIRCLE_SEGMENTS));
        }
        // extruded along +Z, then laid flat so the thickness runs up Y
        bracket.push(
            Part::new("mount", extrude(&plate, self.mount_thickness)?, color("mount"))
                .with_transform(Transform::rotation_x(-PI / 2.0)),
        );

        let arm_z = self.mount_depth / 2.0 - self.arm_thickness / 2.0;
        bracket.push(
            Part::new(
                "arms",
                cuboid(self.arm_width, self.arm_height, self.arm_thickness)?,
                color("arms"),
            )
            .with_transform(Transform::translation(
                0.0,
                self.mount_thickness + self.arm_height / 2.0,
                arm_z,
            )),
        );

        let outer = self.socket_outer_radius();
        let ring = Profile::new(circle(0.0, 0.0, outer, CIRCLE_SEGMENTS)).with_hole(circle(
            0.0,
            0.0,
            self.socket_inner_radius(),
            CIRCLE_SEGMENTS,
        ));
        let socket_y = self.mount_thickness + self.arm_height - outer - SOCKET_EXTRA;
        bracket.push(
            Part::new("arms", extrude(&ring, self.socket_length())?, color("arms"))
                .with_transform(Transform::from_parts(
                    [0.0, socket_y, arm_z],
                    [0.0, PI / 2.0, 0.0],
                    [1.0; 3],
                )),
        );
        Ok(bracket)
    }

    /// Rod along X centred on its own origin, pegs at both ends
    fn rod(&self, colors: &PartColors) -> Result<MeshGroup> {
        let color = colors.get_or("rod", Color::WHITE);
        let horizontal = Transform::rotation_z(PI / 2.0);
        let main = self.main_rod_length();
        let mut rod = MeshGroup::new();

        rod.push(
            Part::new("rod", cylinder(self.rod_radius(), main, ROD_SEGMENTS)?, color)
                .with_transform(horizontal),
        );
        for side in [-1.0, 1.0] {
            let x = side * (main / 2.0 + self.socket_depth / 2.0);
            rod.push(
                Part::new(
                    "rod",
                    cylinder(self.peg_radius(), self.socket_depth, ROD_SEGMENTS)?,
                    color,
                )
                .with_transform(Transform::translation(x, 0.0, 0.0) * horizontal),
            );
        }
        Ok(rod)
    }

    /// Area of the rounded plate outline
    fn plate_area(&self) -> f64 {
        // each quadratic corner trims r^2 / 6 off the sharp corner
        let r = self.corner_radius();
        self.mount_width * self.mount_depth - 4.0 * r * r / 6.0
    }
}

impl Project for PaperTowelHolder {
    fn id(&self) -> &'static str {
        "paper-towel-holder"
    }

    fn name(&self) -> &'static str {
        "Paper Towel Holder"
    }

    fn default_settings(&self) -> Settings {
        Settings::new()
            .with("rodLength", 30.0)
            .with("rodDiameter", 2.0)
            .with("armHeight", 5.0)
            .with("armWidth", 4.0)
            .with("armThickness", 1.2)
            .with("mountWidth", 6.0)
            .with("mountDepth", 6.0)
            .with("mountThickness", 0.6)
            .with("holeDiameter", 0.45)
            .with("holeInset", 1.2)
            .with("socketDepth", 1.5)
            .with("tolerance", 0.15)
    }

    fn default_colors(&self) -> PartColors {
        palette(&[("mount", 0x475569), ("arms", 0x475569), ("rod", 0x64748b)])
    }

    fn controls(&self) -> Vec<ControlGroup> {
        vec![
            ControlGroup::new(
                "Rod",
                vec![
                    Control::range("rodLength", "Rod Length", 25.0, 35.0, 0.5),
                    Control::range("rodDiameter", "Rod Diameter", 1.5, 3.0, 0.1),
                ],
            ),
            ControlGroup::new(
                "Arms",
                vec![
                    Control::range("armHeight", "Arm Height", 3.0, 8.0, 0.5),
                    Control::range("armWidth", "Arm Width", 3.0, 6.0, 0.5),
                    Control::range("armThickness", "Arm Thickness", 1.0, 2.0, 0.1),
                ],
            ),
            ControlGroup::new(
                "Mounting",
                vec![
                    Control::range("mountWidth", "Mount Width", 4.0, 10.0, 0.5),
                    Control::range("mountDepth", "Mount Depth", 4.0, 10.0, 0.5),
                    Control::range("mountThickness", "Mount Thickness", 0.4, 1.2, 0.1),
                    Control::range("holeDiameter", "Screw Hole Diameter", 0.3, 0.6, 0.05),
                ],
            ),
            ControlGroup::new(
                "Assembly",
                vec![
                    Control::range("socketDepth", "Socket Depth", 1.0, 2.5, 0.1),
                    Control::range("tolerance", "Fit Tolerance", 0.1, 0.3, 0.05),
                ],
            ),
        ]
    }

    fn create_geometry(&self, settings: &Settings, colors: &PartColors) -> Result<MeshGroup> {
        let d = Dimensions::read(settings)?;
        let colors = merged_colors(colors, self.default_colors());
        let [bx, by, bz] = BRACKET_OFFSET;

        let mut group = MeshGroup::new();
        group.extend_placed(d.bracket(&colors)?, &Transform::translation(-bx, by, bz));
        group.extend_placed(
            d.bracket(&colors)?,
            &(Transform::translation(bx, by, bz) * Transform::scaling(-1.0, 1.0, 1.0)),
        );
        group.extend_placed(
            d.rod(&colors)?,
            &Transform::translation(0.0, d.rod_radius(), ROD_Z),
        );

        debug!(parts = group.parts.len(), triangles = group.triangle_count(), "built paper towel holder");
        Ok(group)
    }

    /// Plates minus screw holes, arms, socket rings, rod and pegs
    fn calculate_volume(&self, settings: &Settings) -> Result<f64> {
        let d = Dimensions::read(settings)?;
        let plates = 2.0 * d.plate_area() * d.mount_thickness;
        let holes = 8.0 * PI * d.hole_radius().powi(2) * d.mount_thickness;
        let arms = 2.0 * d.arm_width * d.arm_height * d.arm_thickness;
        let sockets = 2.0
            * PI
            * (d.socket_outer_radius().powi(2) - d.socket_inner_radius().powi(2))
            * d.socket_length();
        let rod = PI * d.rod_radius().powi(2) * d.main_rod_length();
        let pegs = 2.0 * PI * d.peg_radius().powi(2) * d.socket_depth;
        Ok(plates - holes + arms + sockets + rod + pegs)
    }

    fn export_filename(&self) -> &'static str {
        "paper-towel-holder.stl"
    }
}
