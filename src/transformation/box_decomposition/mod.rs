//! Decomposition of a volume into a compact set of axis-aligned boxes.
//!
//! The decomposition runs in two steps:
//!
//! 1. [`VoxelGrid::decompose`] splits an AABB into a cubic lattice of cells and
//!    keeps, as leaf boxes, the cells intersecting a [`VolumeTest`].
//! 2. [`VoxelGrid::merge_boxes`] greedily fuses adjacent boxes sharing the same
//!    footprint until no fusion is possible anymore.
//!
//! The resulting [`ColliderBox`]es cover exactly the occupied cells and can be
//! used as a compound collider approximating an arbitrary non-convex shape.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "f32")] {
//! use neurovox3d::bounding_volume::Aabb;
//! use neurovox3d::math::Point;
//! use neurovox3d::shape::TriMesh;
//! use neurovox3d::transformation::box_decomposition::{
//!     decompose_trimesh, DecompositionParameters,
//! };
//!
//! let cube = Aabb::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0));
//! let (vertices, indices) = cube.to_trimesh();
//! let mesh = TriMesh::new(vertices, indices).unwrap();
//!
//! let boxes = decompose_trimesh(&mesh, &DecompositionParameters::default()).unwrap();
//! assert_eq!(boxes.len(), 1);
//! assert!((boxes[0].center - cube.center()).norm() < 1.0e-5);
//! assert!((boxes[0].size - cube.extents()).norm() < 1.0e-5);
//! # }
//! ```

pub use self::box_forest::{BoxForest, BoxHandle, BoxNode, Leaves};
pub use self::box_merge::{merge, MergeDirection};
pub use self::parameters::{
    clamp_resolution, DecompositionParameters, FillMode, MAX_RESOLUTION, MIN_RESOLUTION,
};
pub use self::voxel_grid::VoxelGrid;
pub use self::volume_test::{TriMeshVolume, VolumeTest};

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::shape::TriMesh;
use approx::{AbsDiffEq, RelativeEq};

mod box_forest;
mod box_merge;
mod parameters;
mod voxel_grid;

/// Error indicating that a decomposition could not be performed.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum DecompositionError {
    /// The AABB to decompose has a zero, negative, or non-finite extent.
    #[error("cannot decompose the degenerate bounds {0:?}")]
    DegenerateBounds(Aabb),
    /// None of the meshes to decompose has any vertex.
    #[error("cannot decompose meshes without any vertex")]
    EmptyMesh,
}

/// An axis-aligned box resulting from a decomposition.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ColliderBox {
    /// The center of the box.
    pub center: Point<Real>,
    /// The full extents of the box along each axis.
    pub size: Vector<Real>,
}

impl ColliderBox {
    /// Creates a box from its center and full extents.
    #[inline]
    pub fn new(center: Point<Real>, size: Vector<Real>) -> Self {
        Self { center, size }
    }

    /// The half-extents of this box.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        self.size / 2.0
    }

    /// The AABB of this box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, self.half_extents())
    }

    /// The volume of this box.
    #[inline]
    pub fn volume(&self) -> Real {
        self.size.product()
    }
}

impl AbsDiffEq for ColliderBox {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        Real::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.center.abs_diff_eq(&other.center, epsilon)
            && self.size.abs_diff_eq(&other.size, epsilon)
    }
}

impl RelativeEq for ColliderBox {
    fn default_max_relative() -> Self::Epsilon {
        Real::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.center.relative_eq(&other.center, epsilon, max_relative)
            && self.size.relative_eq(&other.size, epsilon, max_relative)
    }
}

/// Decomposes a closed triangle mesh into boxes.
///
/// This voxelizes the AABB of the mesh with the given parameters, and merges
/// the resulting leaves. See [`decompose_trimeshes`] for shapes made of several
/// meshes.
pub fn decompose_trimesh(
    mesh: &TriMesh,
    params: &DecompositionParameters,
) -> Result<Vec<ColliderBox>, DecompositionError> {
    decompose_trimeshes(core::slice::from_ref(mesh), params)
}

/// Decomposes the volume delimited by several triangle meshes into boxes.
///
/// The voxel grid spans the AABB of all the meshes. With the `parallel`
/// feature enabled, the cells are tested in parallel.
pub fn decompose_trimeshes(
    meshes: &[TriMesh],
    params: &DecompositionParameters,
) -> Result<Vec<ColliderBox>, DecompositionError> {
    let bounds = Aabb::from_meshes(meshes).ok_or(DecompositionError::EmptyMesh)?;
    let volume = TriMeshVolume::new(meshes, params.fill_mode);

    #[cfg(feature = "parallel")]
    let grid = VoxelGrid::decompose_par(&volume, &bounds, params.resolution)?;
    #[cfg(not(feature = "parallel"))]
    let grid = VoxelGrid::decompose(&volume, &bounds, params.resolution)?;

    Ok(merge(grid))
}
