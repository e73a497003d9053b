//! Point inclusion tests.

mod point_trimesh;
