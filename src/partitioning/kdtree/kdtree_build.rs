use super::KdTree;
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use ordered_float::OrderedFloat;

impl KdTree {
    /// Builds a balanced k-d tree over the given points.
    ///
    /// Each subtree is split at the median of its points along the axis where they
    /// have the largest spread.
    pub fn new(points: Vec<Point<Real>>) -> Self {
        assert!(
            points.len() < u32::MAX as usize,
            "Too many points for a single k-d tree."
        );

        let mut order: Vec<u32> = (0..points.len() as u32).collect();
        let mut axes = vec![0u8; points.len()];
        build_range(&points, &mut order, &mut axes);

        Self {
            points,
            order,
            axes,
        }
    }
}

fn build_range(points: &[Point<Real>], order: &mut [u32], axes: &mut [u8]) {
    if order.is_empty() {
        return;
    }

    let mid = order.len() / 2;

    if order.len() > 1 {
        let spread = Aabb::from_points(order.iter().map(|i| points[*i as usize]));
        let axis = spread.extents().imax();

        let _ = order.select_nth_unstable_by_key(mid, |i| OrderedFloat(points[*i as usize][axis]));
        axes[mid] = axis as u8;
    }

    let (left_order, right_order) = order.split_at_mut(mid);
    let (left_axes, right_axes) = axes.split_at_mut(mid);
    build_range(points, left_order, left_axes);
    build_range(points, &mut right_order[1..], &mut right_axes[1..]);
}
