use na::{Point3, Vector3};
use neurovox3d::bounding_volume::Aabb;
use neurovox3d::transformation::box_decomposition::{merge, VoxelGrid};

#[test]
fn unit_cube_at_resolution_two() {
    let bounds = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
    let everywhere = |_: &Point3<f32>, _: &Vector3<f32>| true;
    let grid = VoxelGrid::decompose(&everywhere, &bounds, 2).unwrap();

    assert_eq!(grid.num_leaves(), 8);
    let mut positions: Vec<_> = grid
        .leaves()
        .map(|leaf| grid.forest()[leaf].grid_position().unwrap())
        .map(|p| (p.x, p.y, p.z))
        .collect();
    positions.sort();
    assert_eq!(
        positions,
        vec![
            (0, 0, 0),
            (0, 0, 1),
            (0, 1, 0),
            (0, 1, 1),
            (1, 0, 0),
            (1, 0, 1),
            (1, 1, 0),
            (1, 1, 1)
        ]
    );

    let boxes = merge(grid);
    assert_eq!(boxes.len(), 1);
    assert_relative_eq!(boxes[0].size, Vector3::new(1.0, 1.0, 1.0));
    assert_relative_eq!(boxes[0].center, Point3::new(0.5, 0.5, 0.5));
}

#[test]
fn nothing_to_decompose() {
    let bounds = Aabb::new(Point3::new(-2.0, 0.0, 1.0), Point3::new(3.0, 1.0, 4.0));
    let nowhere = |_: &Point3<f32>, _: &Vector3<f32>| false;
    let grid = VoxelGrid::decompose(&nowhere, &bounds, 5).unwrap();

    assert_eq!(grid.num_leaves(), 0);
    assert!(merge(grid).is_empty());
}

#[test]
fn hollow_shell_keeps_its_hole() {
    let bounds = Aabb::from_half_extents(Point3::origin(), Vector3::repeat(1.5));
    let shell = |center: &Point3<f32>, _: &Vector3<f32>| center.coords.amax() > 0.5;
    let mut grid = VoxelGrid::decompose(&shell, &bounds, 3).unwrap();
    assert_eq!(grid.num_leaves(), 26);

    let num_fusions = grid.merge_boxes();
    let boxes = grid.root_boxes();
    assert_eq!(num_fusions, 20);
    assert_eq!(boxes.len(), 6);

    let volume: f32 = boxes.iter().map(|b| b.volume()).sum();
    assert_relative_eq!(volume, 26.0);
    assert!(boxes
        .iter()
        .all(|b| !b.aabb().contains_local_point(&Point3::origin())));
}
