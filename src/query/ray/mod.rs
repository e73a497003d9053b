//! Ray-casting related definitions and implementations.

pub use self::ray::Ray;
pub use self::ray_triangle::local_ray_intersection_with_triangle;

#[doc(hidden)]
pub mod ray;
mod ray_triangle;
