//! Triangle mesh generation from geometric shapes.
//!
//! A triangle mesh is represented as a pair of vectors:
//! `(Vec<Point<Real>>, Vec<[u32; 3]>)` containing vertices and triangle indices.
//! The triangles follow a counter-clockwise winding order when viewed from
//! outside the shape.

mod aabb_to_trimesh;
