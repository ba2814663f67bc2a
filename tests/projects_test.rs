//! Integration tests for the project catalog
//!
//! Every project must produce closed parts with declared names, a positive
//! analytic volume that agrees with the built meshes, and a volume that
//! does not shrink when a size parameter grows.

use studio3d::mesh_ops::{compute_group_volume, is_closed_manifold};
use studio3d::params::ControlKind;
use studio3d::{PartColors, Project, ProjectCatalog, Settings};

/// Controls that reposition or carve geometry rather than add material
const CARVING_KEYS: &[&str] = &[
    "cherrySpacing",
    "holeDiameter",
    "tolerance",
    "socketDepth",
    "standAngle",
];

fn numeric_controls(project: &dyn Project) -> Vec<(&'static str, f64, f64)> {
    project
        .controls()
        .into_iter()
        .flat_map(|g| g.controls)
        .filter_map(|c| match c.kind {
            ControlKind::Range { min, max, .. } => Some((c.key, min, max)),
            _ => None,
        })
        .collect()
}

fn relative_gap(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs().max(1e-12)
}

#[test]
fn test_headphone_scenario_volume() {
    let catalog = ProjectCatalog::default();
    let project = catalog.resolve("headphone");
    let settings = Settings::new()
        .with("height", 22.0)
        .with("baseRadius", 6.0)
        .with("baseHeight", 1.2)
        .with("stemRadius", 1.5)
        .with("holderWidth", 14.0);
    let volume = project.calculate_volume(&settings).unwrap();
    assert!((volume - 389.6).abs() < 0.1, "volume {}", volume);
}

#[test]
fn test_default_volumes_positive_and_finite() {
    for project in ProjectCatalog::default().projects() {
        let volume = project
            .calculate_volume(&project.default_settings())
            .unwrap();
        assert!(volume.is_finite() && volume > 0.0, "{}: {}", project.id(), volume);
    }
}

#[test]
fn test_parts_closed_and_declared() {
    for project in ProjectCatalog::default().projects() {
        let group = project
            .create_geometry(&project.default_settings(), &PartColors::new())
            .unwrap();
        assert!(!group.is_empty());
        let declared = project.part_names();
        for part in &group.parts {
            assert!(declared.contains(&part.name), "{}: {}", project.id(), part.name);
            assert!(is_closed_manifold(&part.mesh), "{}: {}", project.id(), part.name);
        }
    }
}

#[test]
fn test_analytic_volume_tracks_geometry_at_defaults() {
    for project in ProjectCatalog::default().projects() {
        let settings = project.default_settings();
        let group = project.create_geometry(&settings, &PartColors::new()).unwrap();
        let mesh = compute_group_volume(&group);
        let analytic = project.calculate_volume(&settings).unwrap();
        assert!(
            relative_gap(mesh, analytic) < 0.10,
            "{}: mesh {} analytic {}",
            project.id(),
            mesh,
            analytic
        );
    }
}

#[test]
fn test_analytic_volume_tracks_geometry_at_range_ends() {
    for project in ProjectCatalog::default().projects() {
        for (key, min, max) in numeric_controls(project.as_ref()) {
            for value in [min, max] {
                let settings = project.default_settings().with(key, value);
                let group = project.create_geometry(&settings, &PartColors::new()).unwrap();
                let mesh = compute_group_volume(&group);
                let analytic = project.calculate_volume(&settings).unwrap();
                assert!(
                    relative_gap(mesh, analytic) < 0.15,
                    "{} {}={}: mesh {} analytic {}",
                    project.id(),
                    key,
                    value,
                    mesh,
                    analytic
                );
            }
        }
    }
}

#[test]
fn test_volume_monotonic_over_control_ranges() {
    const STEPS: usize = 8;
    for project in ProjectCatalog::default().projects() {
        for (key, min, max) in numeric_controls(project.as_ref()) {
            let volumes: Vec<f64> = (0..=STEPS)
                .map(|i| {
                    let value = min + (max - min) * i as f64 / STEPS as f64;
                    let settings = project.default_settings().with(key, value);
                    project.calculate_volume(&settings).unwrap()
                })
                .collect();
            for pair in volumes.windows(2) {
                let (before, after) = (pair[0], pair[1]);
                if CARVING_KEYS.contains(&key) {
                    assert!(
                        after >= before * 0.95,
                        "{} {}: {} -> {}",
                        project.id(),
                        key,
                        before,
                        after
                    );
                } else {
                    assert!(
                        after >= before - 1e-9,
                        "{} {}: {} -> {}",
                        project.id(),
                        key,
                        before,
                        after
                    );
                }
            }
        }
    }
}

#[test]
fn test_geometry_is_deterministic() {
    for project in ProjectCatalog::default().projects() {
        let settings = project.default_settings();
        let a = project.create_geometry(&settings, &PartColors::new()).unwrap();
        let b = project.create_geometry(&settings, &PartColors::new()).unwrap();
        assert_eq!(a.parts.len(), b.parts.len());
        for (pa, pb) in a.parts.iter().zip(&b.parts) {
            assert_eq!(pa.name, pb.name);
            assert_eq!(pa.mesh.vertices, pb.mesh.vertices);
            assert_eq!(pa.mesh.triangles, pb.mesh.triangles);
            assert_eq!(pa.transform, pb.transform);
        }
    }
}

#[test]
fn test_missing_setting_reported() {
    let catalog = ProjectCatalog::default();
    let project = catalog.resolve("cherry");
    let settings = Settings::new().with("cherryRadius", 1.0);
    let err = project.calculate_volume(&settings).unwrap_err();
    assert!(err.to_string().contains("[E1002]"));
}

#[test]
fn test_uniform_scale_grows_volume_cubically() {
    let catalog = ProjectCatalog::default();
    let project = catalog.resolve("headphone");
    let settings = project.default_settings();
    let base = project.calculate_volume(&settings).unwrap();
    let doubled = project.calculate_volume(&settings.scaled(2.0)).unwrap();
    // the stopper and bar cross-sections are fixed, so growth is below 8x
    assert!(doubled > 4.0 * base && doubled < 8.0 * base);
}
