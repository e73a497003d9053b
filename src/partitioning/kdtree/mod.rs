pub use kdtree_tree::KdTree;

mod kdtree_build;
mod kdtree_queries;
mod kdtree_tree;
