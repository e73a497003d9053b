//! Transformation and decomposition of meshes.

/// Decomposition of a volume into a compact set of axis-aligned boxes.
pub mod box_decomposition;

mod to_trimesh;
