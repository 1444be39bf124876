//! Arena-backed layout tree.
//!
//! A [`LayoutTree`] owns its nodes in breadth-first order: the root is at
//! index 0 and every parent precedes its children. Node ids are indices into
//! that arena and are only meaningful within the tree that produced them.

use std::collections::VecDeque;

use super::types::NodeSpec;

/// Index of a node inside its [`LayoutTree`].
pub type NodeId = usize;

/// A positioned node.
///
/// `x` is the breadth coordinate (perpendicular to branching, drawn
/// vertically) and `y` the depth coordinate (distance from the root along
/// the branching axis).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutNode {
	pub name: String,
	/// Distance from the root in edges.
	pub depth: usize,
	/// Longest distance to a descendant leaf in edges.
	pub height: usize,
	pub x: f64,
	pub y: f64,
	pub parent: Option<NodeId>,
	pub children: Vec<NodeId>,
}

impl LayoutNode {
	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}
}

/// A laid-out hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTree {
	nodes: Vec<LayoutNode>,
	/// Breadth allocated per node.
	dx: f64,
	/// Spacing between depth levels.
	dy: f64,
	/// Soft `(height, width)` sizing hint the tree was laid out against.
	size_hint: (f64, f64),
}

impl LayoutTree {
	/// Build the unpositioned hierarchy for `root`. Coordinates are zero until
	/// the layout engine fills them in.
	pub(crate) fn from_spec(root: &NodeSpec) -> Self {
		let mut nodes: Vec<LayoutNode> = Vec::new();
		let mut queue: VecDeque<(&NodeSpec, Option<NodeId>, usize)> = VecDeque::new();
		queue.push_back((root, None, 0));

		while let Some((spec, parent, depth)) = queue.pop_front() {
			let id = nodes.len();
			nodes.push(LayoutNode {
				name: spec.name.clone(),
				depth,
				height: 0,
				x: 0.0,
				y: 0.0,
				parent,
				children: Vec::with_capacity(spec.children.len()),
			});
			if let Some(p) = parent {
				nodes[p].children.push(id);
			}
			for child in &spec.children {
				queue.push_back((child, Some(id), depth + 1));
			}
		}

		// Children always come after their parent, so a reverse sweep sees
		// every child's final height before its parent.
		for id in (1..nodes.len()).rev() {
			if let Some(p) = nodes[id].parent {
				let h = nodes[id].height + 1;
				if h > nodes[p].height {
					nodes[p].height = h;
				}
			}
		}

		Self {
			nodes,
			dx: 0.0,
			dy: 0.0,
			size_hint: (0.0, 0.0),
		}
	}

	pub(crate) fn set_spacing(&mut self, dx: f64, dy: f64, size_hint: (f64, f64)) {
		self.dx = dx;
		self.dy = dy;
		self.size_hint = size_hint;
	}

	pub(crate) fn nodes_mut(&mut self) -> &mut [LayoutNode] {
		&mut self.nodes
	}

	pub fn root(&self) -> &LayoutNode {
		&self.nodes[0]
	}

	pub fn node(&self, id: NodeId) -> Option<&LayoutNode> {
		self.nodes.get(id)
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Always false: a tree has at least its root.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Height of the root, i.e. the deepest level index.
	pub fn height(&self) -> usize {
		self.root().height
	}

	pub fn dx(&self) -> f64 {
		self.dx
	}

	pub fn dy(&self) -> f64 {
		self.dy
	}

	pub fn size_hint(&self) -> (f64, f64) {
		self.size_hint
	}

	/// All nodes in breadth-first order, root first.
	pub fn descendants(&self) -> impl Iterator<Item = (NodeId, &LayoutNode)> {
		self.nodes.iter().enumerate()
	}

	/// Parent/child pairs in descendant order of the child.
	pub fn links(&self) -> impl Iterator<Item = (&LayoutNode, &LayoutNode)> {
		self.nodes
			.iter()
			.filter_map(|child| child.parent.map(|p| (&self.nodes[p], child)))
	}

	/// Smallest breadth coordinate over every node.
	pub fn min_x(&self) -> f64 {
		self.nodes.iter().fold(f64::INFINITY, |acc, n| acc.min(n.x))
	}

	/// Largest breadth coordinate over every node.
	pub fn max_x(&self) -> f64 {
		self.nodes.iter().fold(f64::NEG_INFINITY, |acc, n| acc.max(n.x))
	}

	/// First node (in descendant order) carrying `name`.
	pub fn find(&self, name: &str) -> Option<NodeId> {
		self.nodes.iter().position(|n| n.name == name)
	}
}
