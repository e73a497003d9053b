use crate::math::{Point, Real, Vector};
use crate::query::Ray;
use crate::shape::TriMesh;

/// Ray directions used by the parity test.
///
/// They are not aligned with the coordinate axes so that rays rarely cross the
/// edges and vertices of grid-aligned meshes.
fn parity_directions() -> [Vector<Real>; 3] {
    [
        Vector::new(0.5773, 0.5774, 0.5775),
        Vector::new(-0.6234, 0.4126, 0.6641),
        Vector::new(0.2871, -0.8112, 0.5094),
    ]
}

impl TriMesh {
    /// Tests if the given point is inside of this mesh.
    ///
    /// The mesh is assumed to be closed. The test counts the crossings between
    /// the mesh and three rays starting at `point`, and keeps the majority
    /// verdict so a ray grazing an edge cannot flip the result alone.
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        if !self.local_aabb().contains_local_point(point) {
            return false;
        }

        let votes = parity_directions()
            .iter()
            .filter(|dir| self.ray_parity(&Ray::new(*point, **dir)))
            .count();

        votes >= 2
    }

    /// Does the ray cross the boundary of this mesh an odd number of times?
    fn ray_parity(&self, ray: &Ray) -> bool {
        let mut num_crossings = 0usize;

        for triangle in self.triangles() {
            // Triangles entirely behind the ray origin cannot be hit.
            let tri_aabb = triangle.local_aabb();
            let behind = (0..3).any(|i| {
                (ray.dir[i] > 0.0 && tri_aabb.maxs[i] < ray.origin[i])
                    || (ray.dir[i] < 0.0 && tri_aabb.mins[i] > ray.origin[i])
            });

            if !behind && triangle.cast_local_ray(ray, Real::MAX).is_some() {
                num_crossings += 1;
            }
        }

        num_crossings % 2 == 1
    }
}

#[cfg(test)]
mod test {
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Vector};
    use crate::shape::TriMesh;

    #[test]
    fn point_inside_cube_mesh() {
        let aabb = Aabb::from_half_extents(Point::new(1.0, 2.0, 3.0), Vector::new(1.0, 0.5, 2.0));
        let (vtx, idx) = aabb.to_trimesh();
        let mesh = TriMesh::new(vtx, idx).unwrap();

        assert!(mesh.contains_local_point(&Point::new(1.0, 2.0, 3.0)));
        assert!(mesh.contains_local_point(&Point::new(0.1, 1.6, 4.9)));
        assert!(!mesh.contains_local_point(&Point::new(2.1, 2.0, 3.0)));
        assert!(!mesh.contains_local_point(&Point::new(-10.0, 0.0, 0.0)));
    }
}
