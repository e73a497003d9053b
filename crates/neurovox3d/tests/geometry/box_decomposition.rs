use na::{Point3, Vector3};
use neurovox3d::bounding_volume::Aabb;
use neurovox3d::shape::TriMesh;
use neurovox3d::transformation::box_decomposition::{
    decompose_trimesh, decompose_trimeshes, DecompositionError, DecompositionParameters, FillMode,
};

fn cube(half_extent: f32) -> TriMesh {
    let aabb = Aabb::from_half_extents(Point3::origin(), Vector3::repeat(half_extent));
    let (vtx, idx) = aabb.to_trimesh();
    TriMesh::new(vtx, idx).unwrap()
}

fn octahedron() -> TriMesh {
    let vtx = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let idx = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    TriMesh::new(vtx, idx).unwrap()
}

#[test]
fn solid_cube_is_a_single_box() {
    let mesh = cube(1.5);
    let params = DecompositionParameters {
        resolution: 3,
        fill_mode: FillMode::Solid,
    };
    let boxes = decompose_trimesh(&mesh, &params).unwrap();

    assert_eq!(boxes.len(), 1);
    assert_relative_eq!(boxes[0].center, Point3::origin(), epsilon = 1.0e-5);
    assert_relative_eq!(boxes[0].size, Vector3::repeat(3.0));
}

#[test]
fn solid_cube_at_default_resolution() {
    let mesh = cube(1.0);
    let boxes = decompose_trimesh(&mesh, &DecompositionParameters::default()).unwrap();

    assert_eq!(boxes.len(), 1);
    assert_relative_eq!(boxes[0].center, Point3::origin(), epsilon = 1.0e-5);
    assert_relative_eq!(boxes[0].size, Vector3::repeat(2.0), epsilon = 1.0e-5);
}

#[test]
fn surface_of_a_cube_is_hollow() {
    let mesh = cube(1.5);
    let params = DecompositionParameters {
        resolution: 3,
        fill_mode: FillMode::SurfaceOnly,
    };
    let boxes = decompose_trimesh(&mesh, &params).unwrap();

    // The 26 boundary cells, merged into the six slabs of the shell.
    assert_eq!(boxes.len(), 6);
    let volume: f32 = boxes.iter().map(|b| b.volume()).sum();
    assert_relative_eq!(volume, 26.0);
    assert!(boxes
        .iter()
        .all(|b| !b.aabb().contains_local_point(&Point3::origin())));
}

#[test]
fn octahedron_is_covered() {
    let mesh = octahedron();
    let params = DecompositionParameters {
        resolution: 8,
        fill_mode: FillMode::Solid,
    };
    let boxes = decompose_trimesh(&mesh, &params).unwrap();

    let volume: f32 = boxes.iter().map(|b| b.volume()).sum();
    assert!(volume >= 4.0 / 3.0);
    assert!(volume <= 8.0);

    let mut rng = oorandom::Rand32::new(42);
    for _ in 0..1000 {
        let pt = Point3::new(
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
        );

        if pt.coords.lp_norm(1) <= 1.0 {
            assert!(
                boxes.iter().any(|b| b.aabb().contains_local_point(&pt)),
                "{pt:?} is not covered"
            );
        }
    }
}

#[test]
fn flat_mesh_cannot_be_decomposed() {
    let mesh = TriMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();

    assert!(matches!(
        decompose_trimesh(&mesh, &DecompositionParameters::default()),
        Err(DecompositionError::DegenerateBounds(_))
    ));
}

#[test]
fn several_meshes_share_one_grid() {
    let meshes = [cube(1.0), octahedron()];
    let together = decompose_trimeshes(&meshes, &DecompositionParameters::default()).unwrap();
    let cube_alone = decompose_trimesh(&meshes[0], &DecompositionParameters::default()).unwrap();

    // The octahedron lies inside of the cube.
    assert_eq!(together.len(), 1);
    assert_relative_eq!(together[0], cube_alone[0], epsilon = 1.0e-5);
}
