#[macro_use]
extern crate approx;
extern crate nalgebra as na;

mod box_decomposition;
mod decompose_merge_scenarios;
mod kdtree_nearest;
mod skeleton_mapping;
