//! Axis Aligned Bounding Box.

use crate::bounding_volume::BoundingVolume;
use crate::math::{Point, Real, Vector, DIM};
use crate::shape::TriMesh;
use num::Bounded;

/// An Axis-Aligned Bounding Box (AABB).
///
/// An AABB is defined by its minimum and maximum corners. Its edges are always
/// parallel to the coordinate axes, which makes overlap tests a handful of
/// coordinate comparisons.
///
/// In this crate, AABBs describe the volume a decomposition works on (the bounds
/// of all the sub-meshes of a cell), the cells of the voxel lattice, and the
/// boxes produced by the merger.
///
/// # Invariant
///
/// `mins.x ≤ maxs.x`, `mins.y ≤ maxs.y` and `mins.z ≤ maxs.z`, except for the
/// [`Aabb::new_invalid`] AABB used as the neutral element of [`BoundingVolume::merge`].
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use neurovox3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5));
///
/// assert!(aabb.contains_local_point(&Point3::origin()));
/// assert_eq!(aabb.center(), Point3::origin());
/// assert_eq!(aabb.extents().x, 1.0);
/// assert_eq!(aabb.half_extents().x, 0.5);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    ///
    /// Each component of `mins` should be smaller than or equal to the
    /// corresponding component of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// Creates an invalid AABB with `mins` set to `Real::max_value()` and `maxs`
    /// set to `-Real::max_value()`.
    ///
    /// Merging any AABB into this one yields that AABB, which makes it the
    /// starting point of bounds accumulations.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::max_value()).into(),
            Vector::repeat(-Real::max_value()).into(),
        )
    }

    /// Creates a new AABB from its center and its half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Computes the smallest AABB enclosing all the given points.
    ///
    /// Returns [`Aabb::new_invalid`] if the iterator is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        super::aabb_utils::local_point_cloud_aabb(pts)
    }

    /// Computes the smallest AABB enclosing all the given triangle meshes.
    ///
    /// Meshes without vertices are ignored. Returns `None` if no mesh has any vertex.
    pub fn from_meshes<'a, I>(meshes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a TriMesh>,
    {
        super::aabb_utils::meshes_aabb(meshes)
    }

    /// The center of this AABB.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The half extents of this AABB.
    #[inline]
    pub fn half_extents(&self) -> Vector<Real> {
        let half: Real = na::convert::<f64, Real>(0.5);
        (self.maxs - self.mins) * half
    }

    /// The extents of this AABB.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// The volume of this AABB.
    #[inline]
    pub fn volume(&self) -> Real {
        let extents = self.extents();
        extents.x * extents.y * extents.z
    }

    /// Is this AABB degenerate?
    ///
    /// An AABB is degenerate if any of its extents is not strictly positive, or
    /// if any of its coordinates is not finite. Degenerate AABBs cannot be split
    /// into a voxel lattice.
    pub fn is_degenerate(&self) -> bool {
        let extents = self.extents();
        (0..DIM).any(|i| {
            !self.mins[i].is_finite()
                || !self.maxs[i].is_finite()
                || !extents[i].is_finite()
                || extents[i] <= 0.0
        })
    }

    /// Does this AABB contain the given point?
    ///
    /// Points exactly on the boundary are considered contained.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }

    /// Computes the intersection of this AABB and another one.
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let result = Aabb {
            mins: Point::from(self.mins.coords.sup(&other.mins.coords)),
            maxs: Point::from(self.maxs.coords.inf(&other.maxs.coords)),
        };

        for i in 0..DIM {
            if result.mins[i] > result.maxs[i] {
                return None;
            }
        }

        Some(result)
    }
}

impl BoundingVolume for Aabb {
    #[inline]
    fn center(&self) -> Point<Real> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &Aabb) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }

    #[inline]
    fn merge(&mut self, other: &Aabb) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    #[inline]
    fn merged(&self, other: &Aabb) -> Aabb {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }
}
