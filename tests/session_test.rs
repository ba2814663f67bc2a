//! Integration tests for the editing session
//!
//! Walks through the usual edit cycle: pick a project, change settings,
//! evaluate, recolor, scale and export.

use studio3d::{
    Color, DEFAULT_PROJECT_ID, Error, PrintProfile, ProjectCatalog, Session, parse_binary_stl,
};

fn session(id: &str) -> Session {
    Session::new(ProjectCatalog::default().resolve(id), PrintProfile::default())
}

#[test]
fn test_unknown_project_falls_back_to_default() {
    let s = session("lava-lamp");
    assert_eq!(s.project().id(), DEFAULT_PROJECT_ID);
    assert_eq!(s.settings(), &s.project().default_settings());
}

#[test]
fn test_edit_evaluate_export_cycle() {
    let mut s = session("headphone");
    let before = s.evaluate().unwrap();

    s.set_setting("holderWidth", 16.0).unwrap();
    assert!(s.mesh_group().is_none());
    let after = s.evaluate().unwrap();
    assert!(after.volume > before.volume);
    assert!(after.print_time >= before.print_time);
    assert!(after.filament.weight_grams > before.filament.weight_grams);

    let file = s.export().unwrap();
    assert_eq!(file.filename, "headphone-stand.stl");
    let stl = parse_binary_stl(&file.bytes).unwrap();
    assert_eq!(stl.facets.len(), s.mesh_group().unwrap().triangle_count());
}

#[test]
fn test_recolor_reaches_export() {
    let mut s = session("cherry");
    let green = Color::from_hex("#00ff00").unwrap();
    s.set_part_color("cherry", green).unwrap();
    s.rebuild().unwrap();

    let cherry_triangles: usize = s
        .mesh_group()
        .unwrap()
        .parts_named("cherry")
        .map(|p| p.triangle_count())
        .sum();
    let stl = parse_binary_stl(&s.export().unwrap().bytes).unwrap();
    let green_records = stl
        .facets
        .iter()
        .filter(|f| f.attribute == green.to_stl_color())
        .count();
    assert_eq!(green_records, cherry_triangles);
}

#[test]
fn test_model_scale_changes_estimates() {
    let mut s = session("cherry");
    let small = s.evaluate().unwrap();
    s.set_model_scale(2.0).unwrap();
    let large = s.evaluate().unwrap();
    assert!(large.volume > 7.0 * small.volume && large.volume < 9.0 * small.volume);
    assert!((large.bounds.size().y - 2.0 * small.bounds.size().y).abs() < 1e-6);
}

#[test]
fn test_replace_settings_validates() {
    let mut s = session("master-sword-stand");
    let bad = s.settings().clone().with("printLayout", 2.0);
    assert!(matches!(
        s.replace_settings(bad),
        Err(Error::ParameterType { .. })
    ));

    let flat = s.settings().clone().with("printLayout", true);
    s.replace_settings(flat).unwrap();
    assert!(s.evaluate().is_ok());
}

#[test]
fn test_reset_restores_defaults() {
    let mut s = session("paper-towel-holder");
    s.set_setting("rodLength", 25.0).unwrap();
    let shorter = s.evaluate().unwrap().volume;
    s.reset_settings();
    let default = s.evaluate().unwrap().volume;
    assert!(default > shorter);
    assert_eq!(s.settings(), &s.project().default_settings());
}

#[test]
fn test_invalid_geometry_surfaces_on_evaluate() {
    let mut s = session("paper-towel-holder");
    s.set_setting("tolerance", 0.6).unwrap();
    assert!(matches!(
        s.evaluate(),
        Err(Error::InvalidParameter { .. })
    ));
    assert!(s.mesh_group().is_none());
}

#[test]
fn test_custom_profile() {
    let mut s = session("headphone");
    let volume = s.evaluate().unwrap().volume;
    s.set_profile(PrintProfile::default().with_print_rate(volume));
    assert_eq!(s.evaluate().unwrap().print_time.minutes, 60);
}

#[cfg(feature = "serde")]
#[test]
fn test_settings_round_trip_json() {
    let s = session("master-sword-stand");
    let json = serde_json::to_string(s.settings()).unwrap();
    let back: studio3d::Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, s.settings());
}
