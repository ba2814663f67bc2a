//! Integration tests for the build-volume check
//!
//! Covers exact fits, boxes just over each limit, off-centre placement and
//! the default state of every built-in project.

use studio3d::primitives::cuboid;
use studio3d::{
    BuildEnvelope, Color, MeshGroup, Part, PartColors, PrintProfile, ProjectCatalog, Transform,
    check_bounds,
};

fn box_at(size: [f64; 3], center: [f64; 3]) -> MeshGroup {
    let mut group = MeshGroup::new();
    group.push(
        Part::new("box", cuboid(size[0], size[1], size[2]).unwrap(), Color::WHITE)
            .with_transform(Transform::translation(center[0], center[1], center[2])),
    );
    group
}

fn a1() -> BuildEnvelope {
    PrintProfile::bambu_a1().envelope
}

#[test]
fn test_exact_fit_is_in_bounds() {
    let report = check_bounds(&box_at([25.6, 25.6, 25.6], [0.0, 12.8, 0.0]), &a1());
    assert!(!report.is_out_of_bounds());
    assert!((report.size().x - 25.6).abs() < 1e-9);
}

#[test]
fn test_each_axis_over_by_a_hair() {
    let eps = 1e-6;
    let report = check_bounds(&box_at([25.6 + eps, 10.0, 10.0], [0.0, 5.0, 0.0]), &a1());
    assert!(report.exceeds_width && !report.exceeds_height && !report.exceeds_depth);

    let report = check_bounds(&box_at([10.0, 25.6 + eps, 10.0], [0.0, 12.8, 0.0]), &a1());
    assert!(report.exceeds_height && !report.exceeds_width && !report.exceeds_depth);

    let report = check_bounds(&box_at([10.0, 10.0, 25.6 + eps], [0.0, 5.0, 0.0]), &a1());
    assert!(report.exceeds_depth && !report.exceeds_width && !report.exceeds_height);
}

#[test]
fn test_wide_box_reports_width_only() {
    let report = check_bounds(&box_at([26.0, 10.0, 10.0], [0.0, 5.0, 0.0]), &a1());
    assert!(report.is_out_of_bounds());
    assert!(report.exceeds_width);
    assert!(!report.exceeds_height);
    assert!(!report.exceeds_depth);
}

#[test]
fn test_off_centre_box() {
    // fits by size but hangs past the +x edge
    let report = check_bounds(&box_at([10.0, 10.0, 10.0], [9.0, 5.0, 0.0]), &a1());
    assert!(report.exceeds_width && !report.exceeds_depth);

    // touching the edge is allowed
    let report = check_bounds(&box_at([10.0, 10.0, 10.0], [0.0, 5.0, -7.8]), &a1());
    assert!(!report.is_out_of_bounds());
}

#[test]
fn test_height_ignores_vertical_position() {
    let report = check_bounds(&box_at([10.0, 20.0, 10.0], [0.0, 100.0, 0.0]), &a1());
    assert!(!report.exceeds_height);
}

#[test]
fn test_empty_group_is_in_bounds() {
    let report = check_bounds(&MeshGroup::new(), &a1());
    assert!(!report.is_out_of_bounds());
    assert!(report.aabb.is_none());
}

#[test]
fn test_project_defaults_against_a1() {
    let catalog = ProjectCatalog::default();
    for (id, out) in [
        ("headphone", false),
        ("cherry", false),
        ("paper-towel-holder", true),
        ("master-sword-stand", false),
    ] {
        let project = catalog.get(id).unwrap();
        let group = project
            .create_geometry(&project.default_settings(), &PartColors::new())
            .unwrap();
        assert_eq!(check_bounds(&group, &a1()).is_out_of_bounds(), out, "{}", id);
    }
}

#[test]
fn test_larger_envelope_accepts_towel_holder() {
    let catalog = ProjectCatalog::default();
    let project = catalog.get("paper-towel-holder").unwrap();
    let group = project
        .create_geometry(&project.default_settings(), &PartColors::new())
        .unwrap();
    let report = check_bounds(&group, &BuildEnvelope::cube(35.0));
    assert!(!report.is_out_of_bounds(), "{:?}", report.size());
}
