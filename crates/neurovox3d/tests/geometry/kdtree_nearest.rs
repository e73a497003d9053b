use na::Point3;
use neurovox3d::partitioning::KdTree;

fn brute_force(points: &[Point3<f32>], query: &Point3<f32>) -> f32 {
    points
        .iter()
        .map(|pt| na::distance(pt, query))
        .fold(f32::MAX, f32::min)
}

#[test]
fn clustered_points() {
    let mut rng = oorandom::Rand32::new(7);
    let mut points = Vec::new();

    // Dense clusters around a few centers, as found along a neuron skeleton.
    for cluster in 0..8 {
        let center = Point3::new(cluster as f32 * 10.0, (cluster % 3) as f32, 0.0);
        for _ in 0..100 {
            points.push(
                center
                    + na::Vector3::new(
                        rng.rand_float() - 0.5,
                        rng.rand_float() - 0.5,
                        rng.rand_float() - 0.5,
                    ) * 0.1,
            );
        }
    }

    let tree = KdTree::new(points.clone());
    assert_eq!(tree.len(), 800);

    for _ in 0..500 {
        let query = Point3::new(
            rng.rand_float() * 80.0 - 5.0,
            rng.rand_float() * 4.0 - 1.0,
            rng.rand_float() * 2.0 - 1.0,
        );
        let (id, dist) = tree.nearest_with_distance(&query).unwrap();
        assert_relative_eq!(dist, brute_force(&points, &query));
        assert_relative_eq!(na::distance(&points[id], &query), dist);
    }
}

#[test]
fn duplicated_points() {
    let points = vec![Point3::new(1.0, 1.0, 1.0); 10];
    let tree = KdTree::new(points);

    assert_eq!(tree.nearest(&Point3::origin()), Some(0));
}
