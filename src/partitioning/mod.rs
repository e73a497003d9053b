//! Spatial partitioning tools.

pub use self::kdtree::KdTree;

mod kdtree;
