use super::KdTree;
use crate::math::{Point, Real};

/// The best candidate found so far by a nearest-neighbor search.
#[derive(Copy, Clone)]
struct Candidate {
    id: u32,
    sq_dist: Real,
}

impl KdTree {
    /// Index of the point nearest to `query`.
    ///
    /// If several points are at the same minimal distance, the one with the smallest index
    /// is returned. Returns `None` if the tree is empty or if `query` has a NaN coordinate.
    #[inline]
    pub fn nearest(&self, query: &Point<Real>) -> Option<usize> {
        self.nearest_with_distance(query).map(|(id, _)| id)
    }

    /// Index of the point nearest to `query`, together with its distance to `query`.
    ///
    /// See [`KdTree::nearest`] for the handling of ties.
    pub fn nearest_with_distance(&self, query: &Point<Real>) -> Option<(usize, Real)> {
        let mut best = Candidate {
            id: u32::MAX,
            sq_dist: Real::INFINITY,
        };

        self.nearest_in_range(0, self.order.len(), query, &mut best);

        if best.id == u32::MAX {
            None
        } else {
            Some((best.id as usize, best.sq_dist.sqrt()))
        }
    }

    fn nearest_in_range(&self, start: usize, end: usize, query: &Point<Real>, best: &mut Candidate) {
        if start >= end {
            return;
        }

        let mid = start + (end - start) / 2;
        let id = self.order[mid];
        let pivot = &self.points[id as usize];
        let sq_dist = na::distance_squared(pivot, query);

        // Starting from an infinite distance with an `u32::MAX` id lets the tie rule accept
        // a first pivot whose squared distance overflowed.
        if sq_dist < best.sq_dist || (sq_dist == best.sq_dist && id < best.id) {
            *best = Candidate { id, sq_dist };
        }

        let axis = self.axes[mid] as usize;
        let diff = query[axis] - pivot[axis];

        let (near, far) = if diff < 0.0 {
            ((start, mid), (mid + 1, end))
        } else {
            ((mid + 1, end), (start, mid))
        };

        self.nearest_in_range(near.0, near.1, query, best);

        // `<=` so that equidistant points with smaller indices are still found.
        if diff * diff <= best.sq_dist {
            self.nearest_in_range(far.0, far.1, query, best);
        }
    }
}
