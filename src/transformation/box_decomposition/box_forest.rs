use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use core::ops::Index;
use smallvec::SmallVec;

const TRAVERSAL_STACK_SIZE: usize = 32;

/// The index of a box in a [`BoxForest`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoxHandle(pub(crate) u32);

impl BoxHandle {
    /// The index of this box in the node buffer of its forest.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A box of a [`BoxForest`].
///
/// A box is either a leaf (a single cell of the voxel grid) or the fusion of two
/// adjacent boxes. In both cases, it covers a cuboid range of grid cells.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoxNode {
    center: Point<Real>,
    size: Vector<Real>,
    grid_position: Option<Point<u32>>,
    grid_mins: Point<u32>,
    grid_maxs: Point<u32>,
    num_leaves: u32,
    children: Option<[BoxHandle; 2]>,
    parent: Option<BoxHandle>,
}

impl BoxNode {
    /// The world-space center of this box.
    ///
    /// For a fused box, this is the average of the centers of all its leaves.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        self.center
    }

    /// The world-space extents of this box.
    #[inline]
    pub fn size(&self) -> Vector<Real> {
        self.size
    }

    /// The world-space AABB of this box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, self.size / 2.0)
    }

    /// The grid cell of this box if it is a leaf.
    #[inline]
    pub fn grid_position(&self) -> Option<Point<u32>> {
        self.grid_position
    }

    /// The smallest grid coordinates covered by this box.
    #[inline]
    pub fn grid_mins(&self) -> Point<u32> {
        self.grid_mins
    }

    /// The largest grid coordinates covered by this box.
    #[inline]
    pub fn grid_maxs(&self) -> Point<u32> {
        self.grid_maxs
    }

    /// The number of grid cells covered by this box.
    #[inline]
    pub fn num_leaves(&self) -> u32 {
        self.num_leaves
    }

    /// The two boxes fused into this one, if this is not a leaf.
    #[inline]
    pub fn children(&self) -> Option<[BoxHandle; 2]> {
        self.children
    }

    /// The box this one has been fused into, if any.
    #[inline]
    pub fn parent(&self) -> Option<BoxHandle> {
        self.parent
    }

    /// Is this box a single grid cell?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Has this box not been fused into another one yet?
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// An arena of boxes organized as a binary merge forest.
///
/// Leaves are the occupied cells of a voxel grid. Fusing two roots allocates a
/// new node having them as children. Nodes are never removed, so handles stay
/// valid for the lifetime of the forest and creation order is the node order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BoxForest {
    nodes: Vec<BoxNode>,
    leaf_size: Vector<Real>,
}

impl BoxForest {
    /// Creates an empty forest whose leaves all have the extents `leaf_size`.
    pub fn new(leaf_size: Vector<Real>) -> Self {
        Self {
            nodes: Vec::new(),
            leaf_size,
        }
    }

    /// The extents shared by every leaf of this forest.
    #[inline]
    pub fn leaf_size(&self) -> Vector<Real> {
        self.leaf_size
    }

    /// The total number of boxes (leaves and fused boxes) of this forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Does this forest contain no box at all?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The box identified by `handle`, if it exists.
    #[inline]
    pub fn get(&self, handle: BoxHandle) -> Option<&BoxNode> {
        self.nodes.get(handle.index())
    }

    /// Iterates through all the boxes of this forest, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (BoxHandle, &BoxNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (BoxHandle(i as u32), node))
    }

    /// Iterates through the boxes that have not been fused, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = BoxHandle> + '_ {
        self.iter()
            .filter(|(_, node)| node.is_root())
            .map(|(handle, _)| handle)
    }

    /// Adds a leaf covering the cell `grid_position` and centered at `center`.
    pub fn push_leaf(&mut self, grid_position: Point<u32>, center: Point<Real>) -> BoxHandle {
        self.push(BoxNode {
            center,
            size: self.leaf_size,
            grid_position: Some(grid_position),
            grid_mins: grid_position,
            grid_maxs: grid_position,
            num_leaves: 1,
            children: None,
            parent: None,
        })
    }

    /// Fuses the two roots `a` and `b` into a new root box.
    ///
    /// The fused box covers the union of the grid footprints of `a` and `b`. It
    /// is only a cuboid if `a` and `b` are adjacent and share the same footprint
    /// along the two other axes.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`, or if any of them is not a root.
    pub fn fuse(&mut self, a: BoxHandle, b: BoxHandle) -> BoxHandle {
        assert_ne!(a, b, "A box cannot be fused with itself.");
        let node_a = self[a];
        let node_b = self[b];
        assert!(
            node_a.is_root() && node_b.is_root(),
            "Only root boxes can be fused."
        );

        let num_leaves = node_a.num_leaves + node_b.num_leaves;
        let weight_a = node_a.num_leaves as Real / num_leaves as Real;
        let weight_b = node_b.num_leaves as Real / num_leaves as Real;
        let center = Point::from(node_a.center.coords * weight_a + node_b.center.coords * weight_b);

        let grid_mins = node_a.grid_mins.inf(&node_b.grid_mins);
        let grid_maxs = node_a.grid_maxs.sup(&node_b.grid_maxs);
        let num_cells = (grid_maxs - grid_mins).map(|e| (e + 1) as Real);
        let size = num_cells.component_mul(&self.leaf_size);

        let fused = self.push(BoxNode {
            center,
            size,
            grid_position: None,
            grid_mins,
            grid_maxs,
            num_leaves,
            children: Some([a, b]),
            parent: None,
        });

        self.nodes[a.index()].parent = Some(fused);
        self.nodes[b.index()].parent = Some(fused);
        fused
    }

    /// The root of the tree containing `handle`.
    pub fn root_of(&self, mut handle: BoxHandle) -> BoxHandle {
        while let Some(parent) = self[handle].parent {
            handle = parent;
        }

        handle
    }

    /// Iterates through the leaves of the tree rooted at `handle`.
    pub fn leaves_of(&self, handle: BoxHandle) -> Leaves<'_> {
        Leaves::new(self, handle)
    }

    /// Iterates through the grid cells covered by the tree rooted at `handle`.
    pub fn covered_grid_positions(
        &self,
        handle: BoxHandle,
    ) -> impl Iterator<Item = Point<u32>> + '_ {
        self.leaves_of(handle)
            .filter_map(move |leaf| self[leaf].grid_position)
    }

    fn push(&mut self, node: BoxNode) -> BoxHandle {
        let handle = BoxHandle(self.nodes.len() as u32);
        self.nodes.push(node);
        handle
    }
}

impl Index<BoxHandle> for BoxForest {
    type Output = BoxNode;

    #[inline]
    fn index(&self, handle: BoxHandle) -> &BoxNode {
        &self.nodes[handle.index()]
    }
}

/// Iterator through the leaves of a tree of a [`BoxForest`], in depth-first order.
pub struct Leaves<'a> {
    forest: &'a BoxForest,
    stack: SmallVec<[BoxHandle; TRAVERSAL_STACK_SIZE]>,
}

impl<'a> Leaves<'a> {
    fn new(forest: &'a BoxForest, root: BoxHandle) -> Self {
        let mut stack = SmallVec::new();
        stack.push(root);
        Self { forest, stack }
    }
}

impl Iterator for Leaves<'_> {
    type Item = BoxHandle;

    fn next(&mut self) -> Option<BoxHandle> {
        while let Some(curr) = self.stack.pop() {
            match self.forest[curr].children {
                Some([left, right]) => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                None => return Some(curr),
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::BoxForest;
    use crate::math::{Point, Real, Vector};

    #[test]
    fn fuse_two_leaves() {
        let mut forest = BoxForest::new(Vector::repeat(0.5));
        let a = forest.push_leaf(Point::new(0, 0, 0), Point::new(0.25, 0.25, 0.25));
        let b = forest.push_leaf(Point::new(1, 0, 0), Point::new(0.75, 0.25, 0.25));
        let c = forest.push_leaf(Point::new(0, 1, 0), Point::new(0.25, 0.75, 0.25));
        let ab = forest.fuse(a, b);

        assert_eq!(forest.len(), 4);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![c, ab]);
        assert_eq!(forest.root_of(a), ab);
        assert_eq!(forest.root_of(c), c);
        assert_eq!(forest[ab].children(), Some([a, b]));
        assert_eq!(forest[ab].num_leaves(), 2);
        assert_eq!(forest[ab].grid_position(), None);
        assert_eq!(forest[ab].grid_mins(), Point::new(0, 0, 0));
        assert_eq!(forest[ab].grid_maxs(), Point::new(1, 0, 0));
        assert_relative_eq!(forest[ab].center(), Point::new(0.5, 0.25, 0.25));
        assert_relative_eq!(forest[ab].size(), Vector::new(1.0, 0.5, 0.5));
        assert_eq!(
            forest.covered_grid_positions(ab).collect::<Vec<_>>(),
            vec![Point::new(0, 0, 0), Point::new(1, 0, 0)]
        );
    }

    #[test]
    fn fused_center_is_the_average_of_leaf_centers() {
        let mut forest = BoxForest::new(Vector::repeat(1.0));
        let leaves: Vec<_> = (0..3)
            .map(|i| forest.push_leaf(Point::new(i, 0, 0), Point::new(i as Real, 0.0, 0.0)))
            .collect();
        let ab = forest.fuse(leaves[0], leaves[1]);
        let abc = forest.fuse(ab, leaves[2]);

        assert_relative_eq!(forest[abc].center(), Point::new(1.0, 0.0, 0.0));
        assert_relative_eq!(forest[abc].size(), Vector::new(3.0, 1.0, 1.0));
        assert_eq!(forest.leaves_of(abc).collect::<Vec<_>>(), leaves);
    }

    #[test]
    #[should_panic]
    fn fusing_a_non_root_panics() {
        let mut forest = BoxForest::new(Vector::repeat(1.0));
        let a = forest.push_leaf(Point::new(0, 0, 0), Point::new(0.5, 0.5, 0.5));
        let b = forest.push_leaf(Point::new(1, 0, 0), Point::new(1.5, 0.5, 0.5));
        let c = forest.push_leaf(Point::new(2, 0, 0), Point::new(2.5, 0.5, 0.5));
        let _ = forest.fuse(a, b);
        let _ = forest.fuse(b, c);
    }
}
