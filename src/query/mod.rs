//! Non-persistent geometric queries.
//!
//! This module provides the few geometric primitives the box decomposition
//! relies on:
//!
//! * [`Ray`] and ray/triangle intersection, used by the point-in-mesh test
//!   [`TriMesh::contains_local_point`](crate::shape::TriMesh::contains_local_point).
//! * The separating-axis tests of the [`sat`] module, used by
//!   [`details::intersection_test_aabb_triangle`].

pub use self::ray::Ray;

mod point;
mod ray;
pub mod sat;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::intersection_test::intersection_test_aabb_triangle;
    pub use super::ray::local_ray_intersection_with_triangle;
}

mod intersection_test;
