//! Integration tests for colored binary STL export
//!
//! Each project is built at its defaults, written out, and read back to
//! check the record count, the stored normals and the per-part colors.

use studio3d::writer::{STL_HEADER_TEXT, stl_size};
use studio3d::{
    Color, Mesh, MeshGroup, Part, PrintProfile, ProjectCatalog, Session, Transform,
    parse_binary_stl, to_stl_bytes,
};

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(a: [f32; 3]) -> f32 {
    dot(a, a).sqrt()
}

#[test]
fn test_project_exports_read_back() {
    for project in ProjectCatalog::default().projects() {
        let group = project
            .create_geometry(&project.default_settings(), &project.default_colors())
            .unwrap();
        let bytes = to_stl_bytes(&group).unwrap();
        let expected: usize = group.parts.iter().map(|p| p.triangle_count()).sum();
        assert_eq!(bytes.len(), stl_size(expected), "{}", project.id());

        let stl = parse_binary_stl(&bytes).unwrap();
        assert_eq!(stl.header_text().as_bytes(), STL_HEADER_TEXT);
        assert_eq!(stl.facets.len(), expected);
    }
}

#[test]
fn test_stored_normals_are_unit_and_orthogonal() {
    for project in ProjectCatalog::default().projects() {
        let group = project
            .create_geometry(&project.default_settings(), &project.default_colors())
            .unwrap();
        let stl = parse_binary_stl(&to_stl_bytes(&group).unwrap()).unwrap();

        for facet in &stl.facets {
            let n = facet.normal;
            let length = norm(n);
            if length == 0.0 {
                continue;
            }
            assert!((length - 1.0).abs() < 1e-4, "{}: |n| = {}", project.id(), length);

            let [a, b, c] = facet.vertices;
            for edge in [sub(b, a), sub(c, b), sub(a, c)] {
                let edge_length = norm(edge);
                if edge_length > 0.0 {
                    assert!(
                        (dot(n, edge) / edge_length).abs() < 1e-3,
                        "{}: normal not orthogonal to edge",
                        project.id()
                    );
                }
            }
        }
    }
}

#[test]
fn test_colors_follow_part_order() {
    let catalog = ProjectCatalog::default();
    let project = catalog.resolve("master-sword-stand");
    let group = project
        .create_geometry(&project.default_settings(), &project.default_colors())
        .unwrap();
    let stl = parse_binary_stl(&to_stl_bytes(&group).unwrap()).unwrap();

    let expected: Vec<u16> = group
        .parts
        .iter()
        .flat_map(|p| std::iter::repeat_n(p.color.to_stl_color(), p.triangle_count()))
        .collect();
    let stored: Vec<u16> = stl.facets.iter().map(|f| f.attribute).collect();
    assert_eq!(stored, expected);
}

#[test]
fn test_empty_group_is_header_only() {
    let bytes = to_stl_bytes(&MeshGroup::new()).unwrap();
    assert_eq!(bytes.len(), 84);
    assert_eq!(&bytes[80..84], &[0, 0, 0, 0]);
    assert!(parse_binary_stl(&bytes).unwrap().facets.is_empty());
}

#[test]
fn test_color_word_packing() {
    assert_eq!(Color::from_rgb8(255, 0, 0).to_stl_color(), 0x801F);
    assert_eq!(Color::from_rgb8(0, 0, 255).to_stl_color(), 0xFC00);
    assert_eq!(Color::from_rgb8(0, 255, 0).to_stl_color(), 0x83E0);
    assert_eq!(Color::from_rgb8(0, 0, 0).to_stl_color(), 0x8000);
    assert_eq!(Color::WHITE.to_stl_color(), 0xFFFF);
}

#[test]
fn test_vertices_written_in_world_space() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(0.0, 0.0, 0.0);
    mesh.add_vertex(1.0, 0.0, 0.0);
    mesh.add_vertex(0.0, 1.0, 0.0);
    mesh.add_triangle(0, 1, 2);

    let mut group = MeshGroup::new();
    group.push(
        Part::new("tri", mesh, Color::WHITE).with_transform(Transform::from_parts(
            [5.0, 0.0, 0.0],
            [0.0, 0.0, std::f64::consts::FRAC_PI_2],
            [2.0, 2.0, 2.0],
        )),
    );
    let stl = parse_binary_stl(&to_stl_bytes(&group).unwrap()).unwrap();
    let [a, b, c] = stl.facets[0].vertices;
    let close = |p: [f32; 3], q: [f32; 3]| norm(sub(p, q)) < 1e-5;
    assert!(close(a, [5.0, 0.0, 0.0]));
    // scaled by 2 then turned a quarter about Z
    assert!(close(b, [5.0, 2.0, 0.0]));
    assert!(close(c, [3.0, 0.0, 0.0]));
    assert!(close(stl.facets[0].normal, [0.0, 0.0, 1.0]));
}

#[test]
fn test_session_export_of_out_of_bounds_project() {
    let catalog = ProjectCatalog::default();
    let mut session = Session::new(catalog.resolve("paper-towel-holder"), PrintProfile::default());
    let evaluation = session.evaluate().unwrap();
    assert!(evaluation.bounds.is_out_of_bounds());

    let file = session.export().unwrap();
    assert_eq!(file.filename, "paper-towel-holder.stl");
    let stl = parse_binary_stl(&file.bytes).unwrap();
    assert_eq!(stl.facets.len(), session.mesh_group().unwrap().triangle_count());
}
