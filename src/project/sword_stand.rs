//! Phone stand with a removable decorative sword
//!
//! The stand and the sword are built in their own frames and then composed
//! either assembled (sword standing in the stand's back slot) or laid flat
//! for printing. `printPiece` selects which pieces are produced. Neither flag
//! changes the geometry of a piece, only which pieces appear and where.

use std::f64::consts::PI;

use tracing::debug;

use super::{Project, merged_colors, palette};
use crate::error::{Error, Result};
use crate::model::{Color, MeshGroup, Part, Transform, Vertex2D};
use crate::params::{Control, ControlGroup, PartColors, Settings};
use crate::primitives::{Profile, cone, cuboid, cylinder, extrude, polygon_prism_volume, sphere};

const BASE_THICKNESS: f64 = 1.2;
const BACK_THICKNESS: f64 = 1.5;
const CHANNEL_HEIGHT: f64 = 0.5;
const TRIFORCE_DEPTH: f64 = 0.3;

const BLADE_LENGTH: f64 = 10.0;
const BLADE_WIDTH: f64 = 1.2;
const BLADE_THICKNESS: f64 = 0.3;
const HILT_LENGTH: f64 = 2.5;
const HILT_RADIUS: f64 = 0.3;
const HILT_SEGMENTS: usize = 8;
const POMMEL_SEGMENTS: usize = 8;
const GUARD_WIDTH: f64 = 3.0;
const GUARD_HEIGHT: f64 = 0.6;
const GUARD_DEPTH: f64 = 0.8;
const WING_LENGTH: f64 = 0.8;
const WING_SEGMENTS: usize = 4;
const PEG_LENGTH: f64 = 2.0;
const RIDGE_WIDTH: f64 = 0.15;
const MINI_TRIFORCE_SIZE: f64 = 0.3;
const MINI_TRIFORCE_DEPTH: f64 = 0.1;

/// Which pieces to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    All,
    Stand,
    Sword,
}

impl Piece {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "all" => Ok(Piece::All),
            "stand" => Ok(Piece::Stand),
            "sword" => Ok(Piece::Sword),
            other => Err(Error::invalid_parameter(
                "printPiece",
                format!("unknown piece '{}'", other),
            )),
        }
    }

    fn has_stand(self) -> bool {
        matches!(self, Piece::All | Piece::Stand)
    }

    fn has_sword(self) -> bool {
        matches!(self, Piece::All | Piece::Sword)
    }
}

/// Phone stand styled after a legendary sword in its pedestal
#[derive(Debug, Clone, Copy, Default)]
pub struct MasterSwordStand;

struct Dimensions {
    phone_width: f64,
    phone_depth: f64,
    stand_angle: f64,
    stand_width: f64,
    stand_depth: f64,
    stand_height: f64,
    lip_height: f64,
    slot_width: f64,
    flat_layout: bool,
    piece: Piece,
}

impl Dimensions {
    fn read(settings: &Settings) -> Result<Self> {
        Ok(Self {
            phone_width: settings.dimension("phoneWidth")?,
            phone_depth: settings.dimension("phoneDepth")?,
            stand_angle: settings.number("standAngle")?.to_radians(),
            stand_width: settings.dimension("standWidth")?,
            stand_depth: settings.dimension("standDepth")?,
            stand_height: settings.dimension("standHeight")?,
            lip_height: settings.dimension("lipHeight")?,
            slot_width: settings.dimension("swordSlotWidth")?,
            flat_layout: settings.flag("printLayout")?,
            piece: Piece::parse(settings.choice("printPiece")?)?,
        })
    }

    fn lip_depth(&self) -> f64 {
        self.phone_depth + 1.5
    }

    fn channel_size(&self) -> (f64, f64) {
        (self.phone_width + 0.5, self.phone_depth + 0.3)
    }

    fn triforce_size(&self) -> f64 {
        (self.stand_width * 0.25).min(2.0)
    }

    fn stand(&self, colors: &PartColors) -> Result<MeshGroup> {
        let color = |part: &str| colors.get_or(part, Color::WHITE);
        let (w, depth) = (self.stand_width, self.stand_depth);
        let mut stand = MeshGroup::new();

        stand.push(
            Part::new("stand", cuboid(w, BASE_THICKNESS, depth)?, color("stand"))
                .with_transform(Transform::translation(0.0, BASE_THICKNESS / 2.0, 0.0)),
        );

        let half_back = self.stand_height / 2.0;
        let back_z = -depth / 2.0 + BACK_THICKNESS / 2.0;
        stand.push(
            Part::new(
                "stand",
                cuboid(w, self.stand_height, BACK_THICKNESS)?,
                color("stand"),
            )
            .with_transform(Transform::from_parts(
                [
                    0.0,
                    BASE_THICKNESS + half_back * self.stand_angle.sin(),
                    back_z + half_back * self.stand_angle.cos() * 0.3,
                ],
                [-(PI / 2.0 - self.stand_angle), 0.0, 0.0],
                [1.0; 3],
            )),
        );

        let lip_depth = self.lip_depth();
        stand.push(
            Part::new("lip", cuboid(w, self.lip_height, lip_depth)?, color("lip"))
                .with_transform(Transform::translation(
                    0.0,
                    BASE_THICKNESS + self.lip_height / 2.0,
                    depth / 2.0 - lip_depth / 2.0 + 0.5,
                )),
        );

        // raised phone rest behind the lip
        let (channel_width, channel_depth) = self.channel_size();
        stand.push(
            Part::new(
                "stand",
                cuboid(channel_width, CHANNEL_HEIGHT, channel_depth)?,
                color("stand"),
            )
            .with_transform(Transform::translation(
                0.0,
                BASE_THICKNESS + CHANNEL_HEIGHT / 2.0,
                depth / 2.0 - lip_depth + channel_depth / 2.0 + 0.5,
            )),
        );

        let size = self.triforce_size();
        let triangle = extrude(&Profile::new(triangle_outline(size * 0.45)), TRIFORCE_DEPTH)?;
        let lip_mid = BASE_THICKNESS + self.lip_height / 2.0;
        for (x, y) in [
            (0.0, lip_mid + size * 0.35),
            (-size * 0.45, lip_mid - size * 0.15),
            (size * 0.45, lip_mid - size * 0.15),
        ] {
            stand.push(
                Part::new("triforce", triangle.clone(), color("triforce")).with_transform(
                    Transform::from_parts([x, y, depth / 2.0 + 0.2], [PI / 2.0, 0.0, 0.0], [1.0; 3]),
                ),
            );
        }
        Ok(stand)
    }

    /// Sword in its own frame: guard on the origin, hilt up, blade down
    fn sword(&self, colors: &PartColors) -> Result<MeshGroup> {
        let color = |part: &str| colors.get_or(part, Color::WHITE);
        let mut sword = MeshGroup::new();

        sword.push(
            Part::new(
                "sword_hilt",
                cuboid(self.slot_width, PEG_LENGTH, self.slot_width)?,
                color("sword_hilt"),
            )
            .with_transform(Transform::translation(0.0, -PEG_LENGTH / 2.0, 0.0)),
        );

        sword.push(
            Part::new(
                "sword_guard",
                cuboid(GUARD_WIDTH, GUARD_HEIGHT, GUARD_DEPTH)?,
                color("sword_guard"),
            )
            .with_transform(Transform::translation(0.0, GUARD_HEIGHT / 2.0, 0.0)),
        );
        let wing = cone(GUARD_DEPTH / 2.0, WING_LENGTH, WING_SEGMENTS)?;
        for side in [-1.0, 1.0] {
            sword.push(
                Part::new("sword_guard", wing.clone(), color("sword_guard")).with_transform(
                    Transform::from_parts(
                        [side * (GUARD_WIDTH / 2.0 + 0.3), GUARD_HEIGHT / 2.0, 0.0],
                        [0.0, 0.0, -side * PI / 2.0],
                        [1.0; 3],
                    ),
                ),
            );
        }

        sword.push(
            Part::new(
                "sword_hilt",
                cylinder(HILT_RADIUS, HILT_LENGTH, HILT_SEGMENTS)?,
                color("sword_hilt"),
            )
            .with_transform(Transform::translation(0.0, GUARD_HEIGHT + HILT_LENGTH / 2.0, 0.0)),
        );
        sword.push(
            Part::new(
                "sword_guard",
                sphere(HILT_RADIUS * 1.5, POMMEL_SEGMENTS, POMMEL_SEGMENTS)?,
                color("sword_guard"),
            )
            .with_transform(Transform::translation(
                0.0,
                GUARD_HEIGHT + HILT_LENGTH + HILT_RADIUS,
                0.0,
            )),
        );

        // outline drawn tip-up, turned to hang below the guard
        sword.push(
            Part::new(
                "sword_blade",
                extrude(&Profile::new(blade_outline()), BLADE_THICKNESS)?,
                color("sword_blade"),
            )
            .with_transform(Transform::from_parts(
                [0.0, -GUARD_HEIGHT / 2.0, -BLADE_THICKNESS / 2.0],
                [0.0, 0.0, PI],
                [1.0; 3],
            )),
        );
        sword.push(
            Part::new(
                "sword_blade",
                cuboid(RIDGE_WIDTH, BLADE_LENGTH * 0.8, BLADE_THICKNESS + 0.1)?,
                color("sword_blade"),
            )
            .with_transform(Transform::translation(
                0.0,
                -BLADE_LENGTH * 0.45 - GUARD_HEIGHT / 2.0,
                0.0,
            )),
        );
        sword.push(
            Part::new(
                "triforce",
                extrude(
                    &Profile::new(triangle_outline(MINI_TRIFORCE_SIZE)),
                    MINI_TRIFORCE_DEPTH,
                )?,
                color("triforce"),
            )
            // resting on the front face of the ridge
            .with_transform(Transform::translation(0.0, -2.0, (BLADE_THICKNESS + 0.1) / 2.0)),
        );
        Ok(sword)
    }

    fn stand_placement(&self) -> Transform {
        if self.flat_layout {
            let x = if self.piece.has_sword() { -8.0 } else { 0.0 };
            Transform::from_parts([x, self.stand_depth / 2.0, 0.0], [-PI / 2.0, 0.0, 0.0], [1.0; 3])
        } else {
            Transform::identity()
        }
    }

    fn sword_placement(&self) -> Transform {
        if self.flat_layout {
            let x = if self.piece.has_stand() { 6.0 } else { 0.0 };
            Transform::from_parts([x, 0.3, 0.0], [0.0, 0.0, PI / 2.0], [1.0; 3])
        } else {
            // upside down in the back slot
            let slot_y = BASE_THICKNESS + self.stand_height * 0.7;
            let slot_z = -self.stand_depth / 2.0 + 1.0;
            Transform::from_parts([0.0, slot_y, slot_z], [PI, 0.0, 0.0], [1.0; 3])
        }
    }

    fn stand_volume(&self) -> f64 {
        let w = self.stand_width;
        let base = w * BASE_THICKNESS * self.stand_depth;
        let back = w * self.stand_height * BACK_THICKNESS;
        let lip = w * self.lip_height * self.lip_depth();
        let (channel_width, channel_depth) = self.channel_size();
        let channel = channel_width * CHANNEL_HEIGHT * channel_depth;
        let triforce = 3.0 * triangle_area(self.triforce_size() * 0.45) * TRIFORCE_DEPTH;
        base + back + lip + channel + triforce
    }

    fn sword_volume(&self) -> f64 {
        let peg = self.slot_width.powi(2) * PEG_LENGTH;
        let guard = GUARD_WIDTH * GUARD_HEIGHT * GUARD_DEPTH;
        // square pyramids: base area 2r^2 for a square inscribed in radius r
        let wing_radius = GUARD_DEPTH / 2.0;
        let wings = 2.0 * (2.0 * wing_radius.powi(2) * WING_LENGTH / 3.0);
        let hilt = polygon_prism_volume(HILT_RADIUS, HILT_LENGTH, HILT_SEGMENTS);
        let pommel = 4.0 / 3.0 * PI * (HILT_RADIUS * 1.5).powi(3);
        let blade = blade_area() * BLADE_THICKNESS;
        let ridge = RIDGE_WIDTH * BLADE_LENGTH * 0.8 * (BLADE_THICKNESS + 0.1);
        let mini = triangle_area(MINI_TRIFORCE_SIZE) * MINI_TRIFORCE_DEPTH;
        peg + guard + wings + hilt + pommel + blade + ridge + mini
    }
}

/// Equilateral triangle with circumradius `size`, apex up
fn triangle_outline(size: f64) -> Vec<Vertex2D> {
    vec![
        Vertex2D::new(0.0, size),
        Vertex2D::new(-size * 0.866, -size * 0.5),
        Vertex2D::new(size * 0.866, -size * 0.5),
    ]
}

fn triangle_area(size: f64) -> f64 {
    // base 2 * 0.866 * size, height 1.5 * size
    0.866 * size * 1.5 * size
}

fn blade_outline() -> Vec<Vertex2D> {
    let half = BLADE_WIDTH / 2.0;
    vec![
        Vertex2D::new(-half, 0.0),
        Vertex2D::new(-half, BLADE_LENGTH * 0.85),
        Vertex2D::new(0.0, BLADE_LENGTH),
        Vertex2D::new(half, BLADE_LENGTH * 0.85),
        Vertex2D::new(half, 0.0),
    ]
}

fn blade_area() -> f64 {
    BLADE_WIDTH * BLADE_LENGTH * 0.85 + BLADE_WIDTH * BLADE_LENGTH * 0.15 / 2.0
}

impl Project for MasterSwordStand {
    fn id(&self) -> &'static str {
        "master-sword-stand"
    }

    fn name(&self) -> &'static str {
        "Master Sword Phone Stand"
    }

    fn default_settings(&self) -> Settings {
        Settings::new()
            .with("phoneWidth", 8.0)
            .with("phoneDepth", 1.2)
            .with("standAngle", 70.0)
            .with("standWidth", 10.0)
            .with("standDepth", 8.0)
            .with("standHeight", 12.0)
            .with("lipHeight", 1.5)
            .with("swordSlotWidth", 0.8)
            .with("printLayout", false)
            .with("printPiece", "all")
    }

    fn default_colors(&self) -> PartColors {
        palette(&[
            ("stand", 0x4a4a4a),
            ("lip", 0x4a4a4a),
            ("triforce", 0xffd700),
            ("sword_blade", 0xc0c0c0),
            ("sword_hilt", 0x4b0082),
            ("sword_guard", 0xffd700),
        ])
    }

    fn controls(&self) -> Vec<ControlGroup> {
        let stand_only = |control: Control| control.disabled_when("printPiece", "sword");
        vec![
            ControlGroup::new(
                "Layout",
                vec![
                    Control::toggle("printLayout", "Print Layout (Flat)"),
                    Control::select(
                        "printPiece",
                        "Piece to Print",
                        &[
                            ("all", "All Pieces"),
                            ("stand", "Stand Only"),
                            ("sword", "Sword Only"),
                        ],
                    ),
                ],
            ),
            ControlGroup::new(
                "Phone Size",
                vec![
                    stand_only(Control::range("phoneWidth", "Phone Width", 6.0, 12.0, 0.5)),
                    stand_only(Control::range("phoneDepth", "Phone Thickness", 0.8, 2.0, 0.1)),
                ],
            ),
            ControlGroup::new(
                "Stand",
                vec![
                    stand_only(
                        Control::range("standAngle", "Viewing Angle", 50.0, 85.0, 5.0).unit("°"),
                    ),
                    stand_only(Control::range("standWidth", "Stand Width", 8.0, 14.0, 0.5)),
                    stand_only(Control::range("standDepth", "Stand Depth", 6.0, 12.0, 0.5)),
                    stand_only(Control::range("lipHeight", "Lip Height", 1.0, 3.0, 0.25)),
                ],
            ),
        ]
    }

    fn create_geometry(&self, settings: &Settings, colors: &PartColors) -> Result<MeshGroup> {
        let d = Dimensions::read(settings)?;
        let colors = merged_colors(colors, self.default_colors());

        let mut group = MeshGroup::new();
        if d.piece.has_stand() {
            group.extend_placed(d.stand(&colors)?, &d.stand_placement());
        }
        if d.piece.has_sword() {
            group.extend_placed(d.sword(&colors)?, &d.sword_placement());
        }

        debug!(
            flat = d.flat_layout,
            piece = ?d.piece,
            parts = group.parts.len(),
            triangles = group.triangle_count(),
            "built master sword stand"
        );
        Ok(group)
    }

    /// Volume of the selected pieces; the layout flag does not change it
    fn calculate_volume(&self, settings: &Settings) -> Result<f64> {
        let d = Dimensions::read(settings)?;
        let mut volume = 0.0;
        if d.piece.has_stand() {
            volume += d.stand_volume();
        }
        if d.piece.has_sword() {
            volume += d.sword_volume();
        }
        Ok(volume)
    }

    fn export_filename(&self) -> &'static str {
        "master-sword-stand.stl"
    }
}
