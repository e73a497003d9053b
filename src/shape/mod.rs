//! Shapes supported by neurovox.

pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError};

mod triangle;
mod trimesh;
