use crate::bounding_volume::Aabb;
use crate::query::sat;
use crate::shape::Triangle;

/// Tests if an AABB intersects a triangle.
///
/// Touching shapes are considered intersecting.
pub fn intersection_test_aabb_triangle(aabb1: &Aabb, triangle2: &Triangle) -> bool {
    let sep1 = sat::aabb_triangle_find_local_separating_normal_oneway(aabb1, triangle2).0;
    if sep1 > 0.0 {
        return false;
    }

    let sep2 = sat::triangle_aabb_find_local_separating_normal_oneway(triangle2, aabb1).0;
    if sep2 > 0.0 {
        return false;
    }

    let sep3 = sat::aabb_triangle_find_local_separating_edge_twoway(aabb1, triangle2).0;
    sep3 <= 0.0
}
