//! Builds the left and right layout trees and picks the baseline tree.
//!
//! Both subtrees hang off the same root name and are laid out
//! independently. The baseline tree supplies `x0`, its smallest breadth
//! coordinate, which every rendered group is offset by so both sides share
//! one vertical origin.

use log::{debug, warn};

use super::hierarchy::LayoutTree;
use super::layout::TreeLayout;
use super::types::{NodeSpec, Side, TreeSpec};

/// Which tree anchors the vertical origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Baseline {
	/// Neither side has children; a root-only tree stands in.
	RootOnly,
	Left,
	Right,
}

/// Choose the baseline from the input child counts. Left wins ties.
pub fn select_baseline(left_children: usize, right_children: usize) -> Baseline {
	match (left_children, right_children) {
		(0, 0) => Baseline::RootOnly,
		(0, _) => Baseline::Right,
		(_, 0) => Baseline::Left,
		(l, r) if l >= r => Baseline::Left,
		_ => Baseline::Right,
	}
}

/// The laid-out trees of one diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct TwoWayTrees {
	left: Option<LayoutTree>,
	right: Option<LayoutTree>,
	root_only: Option<LayoutTree>,
	baseline: Baseline,
	x0: f64,
}

impl TwoWayTrees {
	pub fn build(spec: &TreeSpec, layout: &TreeLayout) -> Self {
		let duplicates = spec.duplicate_names();
		if !duplicates.is_empty() {
			warn!(
				"two-way-tree: duplicate node names {:?}; hover and lookup will hit the last drawn",
				duplicates
			);
		}

		let left = build_side(&spec.name, &spec.left_children, layout);
		let right = build_side(&spec.name, &spec.right_children, layout);
		let baseline = select_baseline(spec.left_children.len(), spec.right_children.len());
		let root_only = match baseline {
			Baseline::RootOnly => Some(layout.layout(&NodeSpec::leaf(spec.name.clone()))),
			_ => None,
		};

		let mut trees = Self {
			left,
			right,
			root_only,
			baseline,
			x0: 0.0,
		};
		trees.x0 = trees.baseline_tree().map_or(0.0, LayoutTree::min_x);
		debug!(
			"two-way-tree: built left={} right={} baseline={:?} x0={}",
			trees.left.as_ref().map_or(0, LayoutTree::len),
			trees.right.as_ref().map_or(0, LayoutTree::len),
			trees.baseline,
			trees.x0
		);
		trees
	}

	pub fn left(&self) -> Option<&LayoutTree> {
		self.left.as_ref()
	}

	pub fn right(&self) -> Option<&LayoutTree> {
		self.right.as_ref()
	}

	/// The synthesized root-only tree, present only when both sides are empty.
	pub fn root_only(&self) -> Option<&LayoutTree> {
		self.root_only.as_ref()
	}

	pub fn baseline(&self) -> Baseline {
		self.baseline
	}

	/// The tree selected by [`baseline`](Self::baseline). Always present.
	pub fn baseline_tree(&self) -> Option<&LayoutTree> {
		match self.baseline {
			Baseline::RootOnly => self.root_only.as_ref(),
			Baseline::Left => self.left.as_ref(),
			Baseline::Right => self.right.as_ref(),
		}
	}

	/// Smallest breadth coordinate of the baseline tree.
	pub fn x0(&self) -> f64 {
		self.x0
	}

	/// Trees to draw, in paint order: the root-only tree alone, or left then
	/// right.
	pub fn rendered(&self) -> Vec<(Side, &LayoutTree)> {
		if let Some(tree) = &self.root_only {
			return vec![(Side::Root, tree)];
		}
		self.left
			.iter()
			.map(|t| (Side::Left, t))
			.chain(self.right.iter().map(|t| (Side::Right, t)))
			.collect()
	}
}

fn build_side(root: &str, children: &[NodeSpec], layout: &TreeLayout) -> Option<LayoutTree> {
	if children.is_empty() {
		return None;
	}
	Some(layout.layout(&NodeSpec::with_children(root, children.to_vec())))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn leaves(prefix: &str, n: usize) -> Vec<NodeSpec> {
		(0..n).map(|i| NodeSpec::leaf(format!("{prefix}{i}"))).collect()
	}

	fn layout() -> TreeLayout {
		TreeLayout::new(30.0, 700.0)
	}

	#[test]
	fn baseline_policy() {
		assert_eq!(select_baseline(0, 0), Baseline::RootOnly);
		assert_eq!(select_baseline(0, 3), Baseline::Right);
		assert_eq!(select_baseline(2, 0), Baseline::Left);
		assert_eq!(select_baseline(3, 2), Baseline::Left);
		assert_eq!(select_baseline(2, 2), Baseline::Left);
		assert_eq!(select_baseline(1, 2), Baseline::Right);
	}

	#[test]
	fn empty_sides_produce_no_tree() {
		let trees = TwoWayTrees::build(&TreeSpec::new("root").with_left(leaves("l", 3)), &layout());
		assert!(trees.right().is_none());
		assert!(trees.root_only().is_none());
		assert_eq!(trees.baseline(), Baseline::Left);
		let left = trees.left().unwrap();
		assert_eq!(left.root().name, "root");
		assert_eq!(trees.x0(), left.min_x());
		assert_eq!(trees.x0(), -30.0);
	}

	#[test]
	fn both_sides_share_the_root_name() {
		let spec = TreeSpec::new("hub")
			.with_left(leaves("l", 2))
			.with_right(leaves("r", 5));
		let trees = TwoWayTrees::build(&spec, &layout());

		assert_eq!(trees.left().unwrap().root().name, "hub");
		assert_eq!(trees.right().unwrap().root().name, "hub");
		assert_eq!(trees.baseline(), Baseline::Right);
		assert_eq!(trees.x0(), -60.0);
		let sides: Vec<Side> = trees.rendered().into_iter().map(|(s, _)| s).collect();
		assert_eq!(sides, vec![Side::Left, Side::Right]);
	}

	#[test]
	fn larger_side_wins_by_child_count_not_node_count() {
		let deep = NodeSpec::with_children("deep", leaves("d", 10));
		let spec = TreeSpec::new("root")
			.with_left(vec![deep, NodeSpec::leaf("x")])
			.with_right(leaves("r", 3));
		let trees = TwoWayTrees::build(&spec, &layout());
		assert_eq!(trees.baseline(), Baseline::Right);
	}

	#[test]
	fn both_empty_synthesizes_root_only() {
		let trees = TwoWayTrees::build(&TreeSpec::new("root"), &layout());
		assert!(trees.left().is_none());
		assert!(trees.right().is_none());
		assert_eq!(trees.baseline(), Baseline::RootOnly);
		let base = trees.baseline_tree().unwrap();
		assert_eq!(base.len(), 1);
		assert_eq!(base.root().name, "root");
		assert_eq!(trees.x0(), 0.0);
		assert_eq!(trees.rendered().len(), 1);
		assert_eq!(trees.rendered()[0].0, Side::Root);
	}
}
