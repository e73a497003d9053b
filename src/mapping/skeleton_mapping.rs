use super::{MapBuildError, MappingAttachment, MappingQueryError, SkeletonMesh, SurfaceMesh};
use crate::math::{Point, Real};
use crate::partitioning::KdTree;
use arrayvec::ArrayVec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The skeleton segment a surface vertex is attached to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkeletonMapEntry {
    /// The first skeleton vertex.
    pub a: usize,
    /// The second skeleton vertex.
    pub b: usize,
    /// The position of the surface vertex along the segment `[a, b]`: `0` at `a`, `1` at `b`.
    pub lambda: Real,
}

impl SkeletonMapEntry {
    /// Linearly interpolates `value_a` (the value at `a`) and `value_b` (the value at `b`).
    #[inline]
    pub fn interpolate(&self, value_a: Real, value_b: Real) -> Real {
        value_a * (1.0 - self.lambda) + value_b * self.lambda
    }
}

/// The mapping from every vertex of a surface mesh to a segment of a skeleton.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use neurovox3d::math::Point;
/// use neurovox3d::mapping::{MappingAttachment, SkeletonMapping, SkeletonMesh, SurfaceMesh};
///
/// let skeleton = SkeletonMesh::new(
///     vec![Point::new(0.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0), Point::new(2.0, 0.0, 0.0)],
///     vec![0.5, 0.5, 0.5],
/// );
/// let surface = SurfaceMesh::new(
///     vec![Point::new(1.0, 0.5, 0.0)],
///     vec![],
///     vec![MappingAttachment::new(Point::new(0.1, 0.0, 0.0), Point::new(1.9, 0.0, 0.0), 0.5)],
/// );
///
/// let mapping = SkeletonMapping::build(&skeleton, &surface).unwrap();
/// let entry = mapping.entry(0).unwrap();
/// assert_eq!((entry.a, entry.b), (0, 2));
/// # }
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkeletonMapping {
    entries: Vec<SkeletonMapEntry>,
    diameters: Vec<Real>,
    tree: KdTree,
}

/// Builds the mapping between a skeleton and a surface mesh.
///
/// See [`SkeletonMapping::build`].
pub fn build_map(
    skeleton: &SkeletonMesh,
    surface: &SurfaceMesh,
) -> Result<SkeletonMapping, MapBuildError> {
    SkeletonMapping::build(skeleton, surface)
}

impl SkeletonMapping {
    /// Builds the mapping between a skeleton and a surface mesh.
    ///
    /// Each surface vertex is attached to the skeleton vertices nearest to the
    /// `start` and `end` points of its mapping attachment. Interpolation factors
    /// outside of `[0, 1]` are clamped.
    ///
    /// Fails if any mesh has no vertex, if an attachment is missing or does not
    /// have one element per vertex, or if a skeleton vertex or a mapping attachment
    /// is not finite.
    pub fn build(
        skeleton: &SkeletonMesh,
        surface: &SurfaceMesh,
    ) -> Result<Self, MapBuildError> {
        if skeleton.vertices.is_empty() {
            return Err(MapBuildError::EmptySkeleton);
        }

        if surface.vertices.is_empty() {
            return Err(MapBuildError::EmptySurface);
        }

        if let Some(i) = skeleton.vertices.iter().position(|pt| !is_finite(pt)) {
            return Err(MapBuildError::NonFiniteSkeletonVertex(i));
        }

        let diameters = skeleton
            .diameters
            .as_ref()
            .ok_or(MapBuildError::MissingDiameters)?;
        check_attachment_len("diameter", skeleton.vertices.len(), diameters.len())?;

        let mapping = surface
            .mapping
            .as_ref()
            .ok_or(MapBuildError::MissingMapping)?;
        check_attachment_len("mapping", surface.vertices.len(), mapping.len())?;

        for (i, attachment) in mapping.iter().enumerate() {
            if !attachment.lambda.is_finite() {
                return Err(MapBuildError::NonFiniteLambda(i));
            }

            if !is_finite(&attachment.start) || !is_finite(&attachment.end) {
                return Err(MapBuildError::NonFiniteEndpoint(i));
            }
        }

        let num_clamped = mapping
            .iter()
            .filter(|m| m.lambda < 0.0 || m.lambda > 1.0)
            .count();
        if num_clamped > 0 {
            log::debug!(
                "Clamped {} interpolation factors outside of [0, 1].",
                num_clamped
            );
        }

        let tree = KdTree::new(skeleton.vertices.clone());
        let resolve = |(i, attachment): (usize, &MappingAttachment)| -> Result<_, MapBuildError> {
            let a = tree
                .nearest(&attachment.start)
                .ok_or(MapBuildError::NonFiniteEndpoint(i))?;
            let b = tree
                .nearest(&attachment.end)
                .ok_or(MapBuildError::NonFiniteEndpoint(i))?;
            Ok(SkeletonMapEntry {
                a,
                b,
                lambda: attachment.lambda.clamp(0.0, 1.0),
            })
        };

        #[cfg(feature = "parallel")]
        let entries = mapping
            .par_iter()
            .enumerate()
            .map(resolve)
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel"))]
        let entries = mapping
            .iter()
            .enumerate()
            .map(resolve)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Mapped {} surface vertices onto {} skeleton vertices.",
            entries.len(),
            tree.len()
        );

        Ok(Self {
            entries,
            diameters: diameters.clone(),
            tree,
        })
    }

    /// The number of mapped surface vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Does this mapping have no entry?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The mapping of the given surface vertex.
    #[inline]
    pub fn entry(&self, surface_vertex: usize) -> Option<&SkeletonMapEntry> {
        self.entries.get(surface_vertex)
    }

    /// The mapping of every surface vertex, indexed by surface vertex.
    #[inline]
    pub fn entries(&self) -> &[SkeletonMapEntry] {
        &self.entries
    }

    /// The positions of the skeleton vertices.
    #[inline]
    pub fn skeleton_vertices(&self) -> &[Point<Real>] {
        self.tree.points()
    }

    /// The diameter of the cell at the given skeleton vertex.
    #[inline]
    pub fn skeleton_diameter(&self, skeleton_vertex: usize) -> Option<Real> {
        self.diameters.get(skeleton_vertex).copied()
    }

    /// The skeleton vertex nearest to a point hitting the given surface triangle.
    ///
    /// Only the (up to six) skeleton vertices the three triangle vertices are
    /// mapped to are considered. If several of them are equally near, the first
    /// one, in the order of `triangle` then `a` before `b`, is returned.
    pub fn nearest_skeleton_vertex(
        &self,
        hit_point: &Point<Real>,
        triangle: [usize; 3],
    ) -> Result<usize, MappingQueryError> {
        let mut candidates = ArrayVec::<usize, 6>::new();

        for surface_vertex in triangle {
            let entry = self
                .entry(surface_vertex)
                .ok_or(MappingQueryError::SurfaceVertexOutOfRange(surface_vertex))?;
            candidates.push(entry.a);
            candidates.push(entry.b);
        }

        let skeleton = self.skeleton_vertices();
        let mut nearest = candidates[0];
        let mut nearest_dist = na::distance_squared(hit_point, &skeleton[nearest]);

        for candidate in &candidates[1..] {
            let dist = na::distance_squared(hit_point, &skeleton[*candidate]);
            if dist < nearest_dist {
                nearest = *candidate;
                nearest_dist = dist;
            }
        }

        Ok(nearest)
    }

    /// The skeleton vertex nearest to `point`, among all the skeleton vertices.
    ///
    /// Returns `None` if `point` has a NaN coordinate.
    #[inline]
    pub fn nearest_skeleton_vertex_to_point(&self, point: &Point<Real>) -> Option<usize> {
        self.tree.nearest(point)
    }

    /// The point of the skeleton the given surface vertex is attached to.
    pub fn interpolated_position(
        &self,
        surface_vertex: usize,
    ) -> Result<Point<Real>, MappingQueryError> {
        let entry = self
            .entry(surface_vertex)
            .ok_or(MappingQueryError::SurfaceVertexOutOfRange(surface_vertex))?;
        let skeleton = self.skeleton_vertices();
        Ok(skeleton[entry.a].lerp(&skeleton[entry.b], entry.lambda))
    }

    /// Transfers values defined on the skeleton vertices to the surface vertices.
    ///
    /// `values` must have one element per skeleton vertex. The value of each
    /// surface vertex is interpolated between the values of its two skeleton vertices.
    pub fn interpolate_values(&self, values: &[Real]) -> Result<Vec<Real>, MappingQueryError> {
        if values.len() != self.tree.len() {
            return Err(MappingQueryError::ValueCountMismatch {
                expected: self.tree.len(),
                found: values.len(),
            });
        }

        let interpolate =
            |entry: &SkeletonMapEntry| entry.interpolate(values[entry.a], values[entry.b]);

        #[cfg(feature = "parallel")]
        let result = self.entries.par_iter().map(interpolate).collect();
        #[cfg(not(feature = "parallel"))]
        let result = self.entries.iter().map(interpolate).collect();

        Ok(result)
    }
}

fn check_attachment_len(
    attachment: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), MapBuildError> {
    if expected == found {
        Ok(())
    } else {
        Err(MapBuildError::AttachmentLengthMismatch {
            attachment,
            expected,
            found,
        })
    }
}

#[inline]
fn is_finite(pt: &Point<Real>) -> bool {
    pt.iter().all(|c| c.is_finite())
}
