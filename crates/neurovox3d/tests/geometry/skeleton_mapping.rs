use na::{Point3, Vector3};
use neurovox3d::mapping::{
    build_map, MapBuildError, MappingAttachment, SkeletonMapping, SkeletonMesh, SurfaceMesh,
};

#[test]
fn three_point_skeleton() {
    let skeleton = SkeletonMesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ],
        vec![1.0; 3],
    );
    let surface = SurfaceMesh::new(
        vec![Point3::new(1.0, 1.0, 0.0)],
        vec![],
        vec![MappingAttachment::new(
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(1.9, 0.0, 0.0),
            0.5,
        )],
    );

    let mapping = build_map(&skeleton, &surface).unwrap();
    let entry = mapping.entry(0).unwrap();
    assert_eq!(entry.a, 0);
    assert_eq!(entry.b, 2);
}

/// A tube of `num_rings` rings of `num_sides` vertices around a straight skeleton
/// along `x`, with one skeleton vertex per ring.
fn tube(num_rings: usize, num_sides: usize) -> (SkeletonMesh, SurfaceMesh) {
    let skeleton_vertices: Vec<_> = (0..num_rings)
        .map(|i| Point3::new(i as f32, 0.0, 0.0))
        .collect();
    let diameters = vec![0.5; num_rings];

    let mut vertices = Vec::new();
    let mut mapping = Vec::new();
    for ring in 0..num_rings {
        for side in 0..num_sides {
            let angle = side as f32 / num_sides as f32 * core::f32::consts::TAU;
            let offset = Vector3::new(0.0, angle.cos(), angle.sin()) * 0.25;
            vertices.push(skeleton_vertices[ring] + offset);

            // Each surface vertex sits between its ring's skeleton vertex and the next one.
            let next = (ring + 1).min(num_rings - 1);
            mapping.push(MappingAttachment::new(
                skeleton_vertices[ring] + offset * 0.1,
                skeleton_vertices[next] + offset * 0.1,
                0.0,
            ));
        }
    }

    let mut indices = Vec::new();
    for ring in 0..num_rings - 1 {
        for side in 0..num_sides {
            let a = (ring * num_sides + side) as u32;
            let b = (ring * num_sides + (side + 1) % num_sides) as u32;
            let c = a + num_sides as u32;
            let d = b + num_sides as u32;
            indices.push([a, b, d]);
            indices.push([a, d, c]);
        }
    }

    (
        SkeletonMesh::new(skeleton_vertices, diameters),
        SurfaceMesh::new(vertices, indices, mapping),
    )
}

#[test]
fn hits_on_a_tube_resolve_to_the_closest_ring() {
    let (skeleton, surface) = tube(20, 12);
    let mapping = SkeletonMapping::build(&skeleton, &surface).unwrap();
    assert_eq!(mapping.len(), 240);

    for i in 0..surface.indices.len() {
        let tri = surface.triangle_vertices(i).unwrap();
        let [a, b, c] = tri.map(|id| surface.vertices[id]);
        let hit = Point3::from(a.coords * 0.7 + b.coords * 0.2 + c.coords * 0.1);

        let nearest = mapping.nearest_skeleton_vertex(&hit, tri).unwrap();
        let expected = hit.x.round() as usize;
        assert_eq!(nearest, expected, "triangle {i}: {tri:?}");
        assert_eq!(mapping.nearest_skeleton_vertex_to_point(&hit), Some(expected));
    }
}

#[test]
fn simulated_values_are_displayed_on_the_surface() {
    let (skeleton, surface) = tube(5, 4);
    let mapping = SkeletonMapping::build(&skeleton, &surface).unwrap();
    let potentials = [-70.0, -65.0, -40.0, 20.0, -10.0];
    let on_surface = mapping.interpolate_values(&potentials).unwrap();

    assert_eq!(on_surface.len(), surface.vertices.len());
    for (i, value) in on_surface.iter().enumerate() {
        assert_relative_eq!(*value, potentials[i / 4]);
    }
}

#[test]
fn missing_attachments_are_fatal() {
    let (skeleton, mut surface) = tube(3, 3);
    surface.mapping = None;

    let err = build_map(&skeleton, &surface).unwrap_err();
    assert_eq!(err, MapBuildError::MissingMapping);
    assert!(err.to_string().starts_with("map not built"));
}
