use super::{clamp_resolution, BoxForest, BoxHandle, DecompositionError, VolumeTest};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A dense cubic lattice of cells splitting an AABB, each cell being either
/// empty or occupied by a leaf box.
///
/// A voxel grid is the result of a decomposition. Its boxes are then merged with
/// [`VoxelGrid::merge_boxes`] (or [`merge`](super::merge)) into fewer, larger,
/// boxes. The grid keeps the cell-to-leaf lookup table alive until merging
/// completes since neighbor lookups go through it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VoxelGrid {
    bounds: Aabb,
    resolution: u32,
    cell_size: Vector<Real>,
    cells: Vec<Option<BoxHandle>>,
    pub(super) forest: BoxForest,
}

impl VoxelGrid {
    /// Splits `bounds` into `resolution³` cells and creates a leaf box for each
    /// cell intersecting `volume`.
    ///
    /// The resolution is clamped to `[MIN_RESOLUTION, MAX_RESOLUTION]`. Cells are
    /// tested, and their leaves created, with `x` as the outermost and `z` as the
    /// innermost loop.
    ///
    /// # Example
    ///
    /// ```
    /// # #[cfg(feature = "f32")] {
    /// use neurovox3d::bounding_volume::Aabb;
    /// use neurovox3d::math::{Point, Vector};
    /// use neurovox3d::transformation::box_decomposition::VoxelGrid;
    ///
    /// let bounds = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0));
    /// let everywhere = |_: &Point<f32>, _: &Vector<f32>| true;
    /// let grid = VoxelGrid::decompose(&everywhere, &bounds, 2).unwrap();
    ///
    /// assert_eq!(grid.num_leaves(), 8);
    /// assert_eq!(grid.cell_size(), Vector::repeat(0.5));
    /// # }
    /// ```
    pub fn decompose<V>(
        volume: &V,
        bounds: &Aabb,
        resolution: u32,
    ) -> Result<Self, DecompositionError>
    where
        V: VolumeTest + ?Sized,
    {
        let mut grid = Self::with_empty_cells(bounds, resolution)?;
        let half_extents = grid.cell_size / 2.0;
        let r = grid.resolution;

        for x in 0..r {
            for y in 0..r {
                for z in 0..r {
                    let coords = Point::new(x, y, z);
                    if volume.intersects_box(&grid.cell_center(&coords), &half_extents) {
                        grid.insert_leaf(coords);
                    }
                }
            }
        }

        grid.log_decomposition();
        Ok(grid)
    }

    /// Same as [`VoxelGrid::decompose`] but tests the cells in parallel.
    ///
    /// Leaves are still created sequentially, in the same order, so the result is
    /// identical to the one of [`VoxelGrid::decompose`].
    #[cfg(feature = "parallel")]
    pub fn decompose_par<V>(
        volume: &V,
        bounds: &Aabb,
        resolution: u32,
    ) -> Result<Self, DecompositionError>
    where
        V: VolumeTest + Sync + ?Sized,
    {
        let mut grid = Self::with_empty_cells(bounds, resolution)?;
        let half_extents = grid.cell_size / 2.0;

        let occupied: Vec<bool> = (0..grid.cells.len())
            .into_par_iter()
            .map(|i| {
                let coords = grid.cell_coords(i);
                volume.intersects_box(&grid.cell_center(&coords), &half_extents)
            })
            .collect();

        for (i, is_occupied) in occupied.into_iter().enumerate() {
            if is_occupied {
                grid.insert_leaf(grid.cell_coords(i));
            }
        }

        grid.log_decomposition();
        Ok(grid)
    }

    fn with_empty_cells(bounds: &Aabb, resolution: u32) -> Result<Self, DecompositionError> {
        if bounds.is_degenerate() {
            return Err(DecompositionError::DegenerateBounds(*bounds));
        }

        let clamped = clamp_resolution(resolution);
        if clamped != resolution {
            log::debug!(
                "Voxel grid resolution {} clamped to {}.",
                resolution,
                clamped
            );
        }

        let cell_size = bounds.extents() / clamped as Real;
        let num_cells = (clamped as usize).pow(3);

        Ok(Self {
            bounds: *bounds,
            resolution: clamped,
            cell_size,
            cells: vec![None; num_cells],
            forest: BoxForest::new(cell_size),
        })
    }

    fn insert_leaf(&mut self, coords: Point<u32>) {
        let center = self.cell_center(&coords);
        let leaf = self.forest.push_leaf(coords, center);
        let id = self.linear_index(&coords);
        self.cells[id] = Some(leaf);
    }

    fn log_decomposition(&self) {
        log::debug!(
            "Voxelized {} cells at resolution {}: {} occupied.",
            self.cells.len(),
            self.resolution,
            self.num_leaves()
        );
    }

    #[inline]
    fn linear_index(&self, coords: &Point<u32>) -> usize {
        let r = self.resolution as usize;
        (coords.x as usize * r + coords.y as usize) * r + coords.z as usize
    }

    #[cfg(feature = "parallel")]
    #[inline]
    fn cell_coords(&self, linear_index: usize) -> Point<u32> {
        let r = self.resolution as usize;
        Point::new(
            (linear_index / (r * r)) as u32,
            ((linear_index / r) % r) as u32,
            (linear_index % r) as u32,
        )
    }

    /// The number of cells along each edge of this grid.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The extents of a single cell of this grid.
    #[inline]
    pub fn cell_size(&self) -> Vector<Real> {
        self.cell_size
    }

    /// The AABB split by this grid.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// The number of occupied cells.
    pub fn num_leaves(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// The leaf box occupying the cell at `coords`, if any.
    ///
    /// Returns `None` if the cell is empty or if `coords` is outside of the grid.
    #[inline]
    pub fn leaf_at(&self, coords: &Point<u32>) -> Option<BoxHandle> {
        if coords.iter().any(|c| *c >= self.resolution) {
            return None;
        }

        self.cells[self.linear_index(coords)]
    }

    /// The world-space center of the cell at `coords`.
    #[inline]
    pub fn cell_center(&self, coords: &Point<u32>) -> Point<Real> {
        let offset = coords.coords.cast::<Real>().add_scalar(0.5);
        self.bounds.mins + self.cell_size.component_mul(&offset)
    }

    /// Iterates through the leaf boxes of this grid, in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = BoxHandle> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// The forest containing all the boxes of this grid.
    #[inline]
    pub fn forest(&self) -> &BoxForest {
        &self.forest
    }
}
