//! UI components.

pub mod two_way_tree;
