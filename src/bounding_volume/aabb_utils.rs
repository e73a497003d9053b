use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real};
use crate::shape::TriMesh;

/// Computes the AABB of a set of points.
///
/// Returns [`Aabb::new_invalid`] if `pts` is empty.
pub fn local_point_cloud_aabb<I>(pts: I) -> Aabb
where
    I: IntoIterator<Item = Point<Real>>,
{
    let mut it = pts.into_iter();

    let Some(p0) = it.next() else {
        return Aabb::new_invalid();
    };

    let mut min: Point<Real> = p0;
    let mut max: Point<Real> = p0;

    for pt in it {
        min = min.inf(&pt);
        max = max.sup(&pt);
    }

    Aabb::new(min, max)
}

/// Computes the AABB enclosing all the given meshes.
///
/// This is the bounds of a cell made of several sub-meshes (one per renderable
/// part). Returns `None` if no mesh has any vertex.
pub fn meshes_aabb<'a, I>(meshes: I) -> Option<Aabb>
where
    I: IntoIterator<Item = &'a TriMesh>,
{
    let mut result: Option<Aabb> = None;

    for mesh in meshes {
        if mesh.vertices().is_empty() {
            continue;
        }

        let aabb = mesh.local_aabb();
        match &mut result {
            Some(acc) => acc.merge(&aabb),
            None => result = Some(aabb),
        }
    }

    result
}
