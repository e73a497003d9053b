use crate::math::{Point, Real};

/// A balanced k-d tree over a fixed set of 3D points.
///
/// The tree is stored implicitly: `order` is a permutation of the point indices such that,
/// for any subtree covering the range `start..end` of `order`, the point splitting that subtree
/// is stored at `start + (end - start) / 2`. Points of its left subtree are stored before it and
/// have a coordinate along the splitting axis smaller than or equal to the splitting point's.
/// Points of its right subtree are stored after it, with greater or equal coordinates.
///
/// The tree is read-only after construction. Building it is `O(n log n)` on average, and
/// nearest-neighbor queries run in `O(log n)` on average.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use neurovox3d::math::Point;
/// use neurovox3d::partitioning::KdTree;
///
/// let tree = KdTree::new(vec![
///     Point::new(0.0, 0.0, 0.0),
///     Point::new(1.0, 0.0, 0.0),
///     Point::new(2.0, 0.0, 0.0),
/// ]);
///
/// assert_eq!(tree.nearest(&Point::new(0.1, 0.0, 0.0)), Some(0));
/// assert_eq!(tree.nearest(&Point::new(1.9, 0.0, 0.0)), Some(2));
/// # }
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct KdTree {
    pub(super) points: Vec<Point<Real>>,
    pub(super) order: Vec<u32>,
    pub(super) axes: Vec<u8>,
}

impl KdTree {
    /// The points indexed by this tree, in their original order.
    #[inline]
    pub fn points(&self) -> &[Point<Real>] {
        &self.points
    }

    /// The number of points indexed by this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is this tree empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
