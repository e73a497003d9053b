//! Application of the Separating Axis Theorem (SAT).
//!
//! Two convex shapes do not intersect if and only if there exists an axis onto
//! which their projections do not overlap. For a box and a triangle, testing
//! 13 candidate axes is sufficient: the 3 box face normals, the triangle
//! normal, and the 9 cross products between the box axes and the triangle
//! edges.

pub use self::sat_aabb_triangle::{
    aabb_triangle_find_local_separating_edge_twoway,
    aabb_triangle_find_local_separating_normal_oneway,
    triangle_aabb_find_local_separating_normal_oneway,
};

mod sat_aabb_triangle;
