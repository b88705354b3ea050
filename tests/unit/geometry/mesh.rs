use crate::foundation::core::Rgba;
use crate::geometry::mesh::{Mesh, ShapeMesh};

#[test]
fn default_meshes_are_empty() {
    assert!(Mesh::default().is_empty());
    assert!(ShapeMesh::default().is_empty());
}

#[test]
fn a_shape_with_either_half_is_not_empty() {
    let mesh = Mesh {
        positions: vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]],
        indices: vec![0, 1, 2],
        color: Rgba::new(1.0, 0.0, 0.0, 1.0),
    };
    assert!(!mesh.is_empty());

    let fill_only = ShapeMesh {
        fill: Some(mesh.clone()),
        stroke: None,
    };
    let stroke_only = ShapeMesh {
        fill: None,
        stroke: Some(mesh),
    };
    assert!(!fill_only.is_empty());
    assert!(!stroke_only.is_empty());
}
