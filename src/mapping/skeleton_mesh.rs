use crate::math::{Point, Real};

/// The skeleton of a cell: the 1D mesh the simulation runs on.
///
/// Only the vertices matter to the mapping. Attachments are stored as plain
/// arrays indexed by vertex.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SkeletonMesh {
    /// The positions of the skeleton vertices.
    pub vertices: Vec<Point<Real>>,
    /// The diameter of the cell at each skeleton vertex.
    pub diameters: Option<Vec<Real>>,
}

impl SkeletonMesh {
    /// A skeleton with the given vertices and per-vertex diameters.
    pub fn new(vertices: Vec<Point<Real>>, diameters: Vec<Real>) -> Self {
        Self {
            vertices,
            diameters: Some(diameters),
        }
    }
}

/// The mapping attachment of a single surface vertex.
///
/// The surface vertex interpolates between the skeleton vertices nearest to
/// `start` and to `end`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct MappingAttachment {
    /// A point near the first skeleton vertex.
    pub start: Point<Real>,
    /// A point near the second skeleton vertex.
    pub end: Point<Real>,
    /// The interpolation factor between both skeleton vertices, in `[0, 1]`.
    pub lambda: Real,
}

impl MappingAttachment {
    /// Creates a new mapping attachment.
    #[inline]
    pub fn new(start: Point<Real>, end: Point<Real>, lambda: Real) -> Self {
        Self { start, end, lambda }
    }
}

/// The triangulated surface of a cell.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    /// The positions of the surface vertices.
    pub vertices: Vec<Point<Real>>,
    /// The triangles of the surface.
    pub indices: Vec<[u32; 3]>,
    /// The mapping attachment of each surface vertex.
    pub mapping: Option<Vec<MappingAttachment>>,
}

impl SurfaceMesh {
    /// A surface mesh with the given triangles and per-vertex mapping attachments.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
        mapping: Vec<MappingAttachment>,
    ) -> Self {
        Self {
            vertices,
            indices,
            mapping: Some(mapping),
        }
    }

    /// The indices of the vertices of the `i`-th triangle, if it exists.
    #[inline]
    pub fn triangle_vertices(&self, i: usize) -> Option<[usize; 3]> {
        self.indices.get(i).map(|tri| tri.map(|id| id as usize))
    }
}
