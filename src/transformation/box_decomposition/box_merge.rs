use super::{BoxHandle, BoxNode, ColliderBox, VoxelGrid};
use crate::math::Point;

/// A direction along which boxes are merged with their neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MergeDirection {
    /// Towards increasing `x`.
    PosX,
    /// Towards increasing `y`.
    PosY,
    /// Towards increasing `z`.
    PosZ,
    /// Towards decreasing `x`.
    NegX,
    /// Towards decreasing `y`.
    NegY,
    /// Towards decreasing `z`.
    NegZ,
}

impl MergeDirection {
    /// All the directions, in the order they are swept by [`VoxelGrid::merge_boxes`].
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::PosY,
        Self::PosZ,
        Self::NegX,
        Self::NegY,
        Self::NegZ,
    ];

    /// The index of the axis this direction is parallel to.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Self::PosX | Self::NegX => 0,
            Self::PosY | Self::NegY => 1,
            Self::PosZ | Self::NegZ => 2,
        }
    }

    /// Does this direction point towards increasing coordinates?
    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// The two other axes, in increasing order.
    #[inline]
    fn orthogonal_axes(self) -> (usize, usize) {
        match self.axis() {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        }
    }
}

impl VoxelGrid {
    /// Greedily fuses adjacent boxes of this grid until no more fusion is possible.
    ///
    /// The directions of [`MergeDirection::ALL`] are swept repeatedly until a whole
    /// sweep performs no fusion. Two roots are fused only if they are adjacent
    /// along the swept direction and cover exactly the same range of cells along
    /// both other axes, so every root always covers a cuboid of cells.
    ///
    /// Returns the number of fusions performed. Since each fusion reduces the
    /// number of roots by one, this terminates after at most `num_leaves - 1` fusions.
    pub fn merge_boxes(&mut self) -> usize {
        let num_roots_before = self.num_roots();
        let mut num_fusions = 0;
        let mut num_sweeps = 0;

        loop {
            num_sweeps += 1;
            let fused: usize = MergeDirection::ALL
                .iter()
                .map(|dir| self.merge_along(*dir))
                .sum();

            if fused == 0 {
                break;
            }

            num_fusions += fused;
        }

        log::debug!(
            "Merged {} boxes into {} after {} sweeps ({} fusions).",
            num_roots_before,
            self.num_roots(),
            num_sweeps,
            num_fusions
        );

        num_fusions
    }

    /// Runs a single merge pass along `dir`.
    ///
    /// Every root existing before the pass, taken in creation order, is fused with
    /// its first compatible neighbor along `dir`, unless it has already been fused
    /// earlier during this pass. Returns the number of fusions.
    pub fn merge_along(&mut self, dir: MergeDirection) -> usize {
        let roots: Vec<BoxHandle> = self.forest.roots().collect();
        let mut num_fusions = 0;

        for root in roots {
            if !self.forest[root].is_root() {
                continue;
            }

            if let Some(neighbor) = self.find_merge_candidate(root, dir) {
                let _ = self.forest.fuse(root, neighbor);
                num_fusions += 1;
            }
        }

        num_fusions
    }

    /// Finds the first root adjacent to `root` along `dir` which can be fused with it.
    ///
    /// Only the cells just past the face of `root` pointing towards `dir` are
    /// checked, in lexicographic order.
    fn find_merge_candidate(&self, root: BoxHandle, dir: MergeDirection) -> Option<BoxHandle> {
        let node = &self.forest[root];
        let axis = dir.axis();
        let (u, v) = dir.orthogonal_axes();
        let mins = node.grid_mins();
        let maxs = node.grid_maxs();

        let layer = if dir.is_positive() {
            maxs[axis].checked_add(1).filter(|l| *l < self.resolution())?
        } else {
            mins[axis].checked_sub(1)?
        };

        for cu in mins[u]..=maxs[u] {
            for cv in mins[v]..=maxs[v] {
                let mut coords = Point::origin();
                coords[axis] = layer;
                coords[u] = cu;
                coords[v] = cv;

                let Some(leaf) = self.leaf_at(&coords) else {
                    continue;
                };

                let other = self.forest.root_of(leaf);
                if other != root && footprints_align(node, &self.forest[other], u, v) {
                    return Some(other);
                }
            }
        }

        None
    }

    /// The number of boxes not fused into another one.
    pub fn num_roots(&self) -> usize {
        self.forest.roots().count()
    }

    /// The boxes not fused into another one, in creation order.
    pub fn root_boxes(&self) -> Vec<ColliderBox> {
        self.forest
            .roots()
            .map(|root| {
                let node = &self.forest[root];
                ColliderBox::new(node.center(), node.size())
            })
            .collect()
    }
}

/// Do both boxes cover exactly the same range of cells along the axes `u` and `v`?
fn footprints_align(a: &BoxNode, b: &BoxNode, u: usize, v: usize) -> bool {
    [u, v].iter().all(|i| {
        a.grid_mins()[*i] == b.grid_mins()[*i] && a.grid_maxs()[*i] == b.grid_maxs()[*i]
    })
}

/// Merges the boxes of a voxel grid and returns the resulting collider boxes.
///
/// See [`VoxelGrid::merge_boxes`] for details on the merging strategy. An empty
/// grid results in an empty list.
pub fn merge(mut grid: VoxelGrid) -> Vec<ColliderBox> {
    let _ = grid.merge_boxes();
    grid.root_boxes()
}
