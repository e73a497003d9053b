use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Triangle;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} which does not exist.")]
    IndexOutOfBounds {
        /// The index of the faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
    },
}

/// A triangle mesh.
///
/// This is the boundary of the volume being decomposed into boxes. For the
/// inside/outside tests to be meaningful, the mesh should be closed; open meshes
/// are still accepted and will only be voxelized along their surface.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TriMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
    aabb: Aabb,
}

impl TriMesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, TriMeshBuilderError> {
        if indices.is_empty() {
            return Err(TriMeshBuilderError::EmptyIndices);
        }

        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(TriMeshBuilderError::IndexOutOfBounds {
                    triangle: triangle as u32,
                    index: *index,
                });
            }
        }

        let aabb = Aabb::from_points(vertices.iter().copied());

        Ok(Self {
            vertices,
            indices,
            aabb,
        })
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.indices.iter().map(move |ids| {
            Triangle::new(
                self.vertices[ids[0] as usize],
                self.vertices[ids[1] as usize],
                self.vertices[ids[2] as usize],
            )
        })
    }

    /// The AABB of this mesh, in its local-space.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        self.aabb
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::Aabb;
    use crate::math::Point;
    use crate::shape::{TriMesh, TriMeshBuilderError};

    #[test]
    fn trimesh_error_empty_indices() {
        assert_eq!(
            TriMesh::new(vec![], vec![]).unwrap_err(),
            TriMeshBuilderError::EmptyIndices,
            "A triangle mesh with no triangles is invalid."
        );
    }

    #[test]
    fn trimesh_error_out_of_bounds_index() {
        let vertices = vec![Point::origin(), Point::new(1.0, 0.0, 0.0)];
        assert_eq!(
            TriMesh::new(vertices, vec![[0, 1, 2]]).unwrap_err(),
            TriMeshBuilderError::IndexOutOfBounds {
                triangle: 0,
                index: 2
            }
        );
    }

    #[test]
    fn trimesh_aabb() {
        let aabb = Aabb::new(Point::new(-1.0, 0.0, 2.0), Point::new(3.0, 1.0, 4.0));
        let (vtx, idx) = aabb.to_trimesh();
        let mesh = TriMesh::new(vtx, idx).unwrap();

        assert_eq!(mesh.num_triangles(), 12);
        assert_eq!(mesh.local_aabb(), aabb);
        assert!(relative_eq!(
            mesh.triangles().map(|tri| tri.area()).sum::<crate::math::Real>(),
            2.0 * (4.0 * 1.0 + 4.0 * 2.0 + 1.0 * 2.0)
        ));
    }
}
