use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector, DIM};
use crate::shape::Triangle;

/// Triangle vertices expressed relative to the AABB center.
#[inline]
fn centered_vertices(aabb: &Aabb, triangle: &Triangle) -> [Vector<Real>; 3] {
    let center = aabb.center();
    [triangle.a - center, triangle.b - center, triangle.c - center]
}

/// Separation between a centered box and the centered triangle along `axis`.
///
/// The result is positive if the projections are disjoint. It is scaled by the
/// norm of `axis`, which does not affect its sign.
#[inline]
fn separation_along_axis(
    half_extents: &Vector<Real>,
    vertices: &[Vector<Real>; 3],
    axis: &Vector<Real>,
) -> Real {
    let p0 = axis.dot(&vertices[0]);
    let p1 = axis.dot(&vertices[1]);
    let p2 = axis.dot(&vertices[2]);
    let radius = half_extents.dot(&axis.abs());

    let min = p0.min(p1).min(p2);
    let max = p0.max(p1).max(p2);

    (min - radius).max(-radius - max)
}

/// Finds the best separating axis among the face normals of the AABB.
///
/// Returns the largest separation found, together with the corresponding axis.
pub fn aabb_triangle_find_local_separating_normal_oneway(
    aabb1: &Aabb,
    triangle2: &Triangle,
) -> (Real, Vector<Real>) {
    let vertices = centered_vertices(aabb1, triangle2);
    let half_extents = aabb1.half_extents();
    let mut best_sep = -Real::MAX;
    let mut best_axis = Vector::zeros();

    for i in 0..DIM {
        let axis = Vector::ith(i, 1.0);
        let sep = separation_along_axis(&half_extents, &vertices, &axis);

        if sep > best_sep {
            best_sep = sep;
            best_axis = axis;
        }
    }

    (best_sep, best_axis)
}

/// Tests the normal of the triangle as a separating axis.
///
/// Degenerate triangles have no normal, and are never separated by it.
pub fn triangle_aabb_find_local_separating_normal_oneway(
    triangle1: &Triangle,
    aabb2: &Aabb,
) -> (Real, Vector<Real>) {
    let Some(normal) = triangle1.normal() else {
        return (-Real::MAX, Vector::zeros());
    };

    let vertices = centered_vertices(aabb2, triangle1);
    let sep = separation_along_axis(&aabb2.half_extents(), &vertices, &normal);
    (sep, *normal)
}

/// Tests the 9 cross products between the AABB axes and the triangle edges.
pub fn aabb_triangle_find_local_separating_edge_twoway(
    aabb1: &Aabb,
    triangle2: &Triangle,
) -> (Real, Vector<Real>) {
    let vertices = centered_vertices(aabb1, triangle2);
    let half_extents = aabb1.half_extents();
    let mut best_sep = -Real::MAX;
    let mut best_axis = Vector::zeros();

    for edge in triangle2.edges_scaled_directions() {
        for i in 0..DIM {
            let axis = Vector::<Real>::ith(i, 1.0).cross(&edge);

            if let Some(axis) = axis.try_normalize(crate::math::DEFAULT_EPSILON) {
                let sep = separation_along_axis(&half_extents, &vertices, &axis);

                if sep > best_sep {
                    best_sep = sep;
                    best_axis = axis;
                }
            }
        }
    }

    (best_sep, best_axis)
}
