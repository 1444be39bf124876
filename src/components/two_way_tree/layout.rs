//! Tidy tree layout.
//!
//! Implements the linear-time Walker layout as improved by Buchheim, Jünger
//! and Leipert ("Improving Walker's Algorithm to Run in Linear Time", 2002).
//!
//! 1. **First walk (post-order):** give each node a preliminary breadth
//!    position, pushing each subtree right until its left contour clears the
//!    right contour of the subtrees already placed. Threads make contour
//!    traversal O(1) amortized.
//! 2. **Second walk (pre-order):** accumulate modifiers into final positions,
//!    with the root at breadth 0.
//! 3. **Sizing:** breadth is scaled by the per-node size `dx`, depth becomes
//!    `depth * dy` with `dy = depth_extent / (height + 1)`.
//!
//! Siblings are separated by one unit and cousins by two, so every pair of
//! nodes on the same level ends up at least `dx` apart.

use log::debug;

use super::hierarchy::LayoutTree;
use super::types::NodeSpec;

/// Virtual parent of the root; lets the root go through the same code path
/// as every other node.
const VIRTUAL_ROOT: usize = 0;

/// Layout configuration, shared by both subtrees of a diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeLayout {
	/// Breadth allocated per node.
	node_breadth: f64,
	/// Total depth budget shared out between levels.
	depth_extent: f64,
	/// Soft `(height, width)` hint; recorded, never used to clip.
	size_hint: (f64, f64),
}

impl TreeLayout {
	pub fn new(node_breadth: f64, depth_extent: f64) -> Self {
		Self {
			node_breadth,
			depth_extent,
			size_hint: (0.0, 0.0),
		}
	}

	pub fn with_size_hint(mut self, height: f64, width: f64) -> Self {
		self.size_hint = (height, width);
		self
	}

	/// Lay out the hierarchy rooted at `root`. Pure: the same input always
	/// yields the same coordinates.
	pub fn layout(&self, root: &NodeSpec) -> LayoutTree {
		let mut tree = LayoutTree::from_spec(root);
		let dx = self.node_breadth;
		let dy = self.depth_extent / (tree.height() + 1) as f64;

		let breadth = Walker::new(&tree).run();
		for (node, x) in tree.nodes_mut().iter_mut().zip(breadth) {
			node.x = x * dx;
			node.y = node.depth as f64 * dy;
		}
		tree.set_spacing(dx, dy, self.size_hint);

		let extent = tree.max_x() - tree.min_x();
		if self.size_hint.0 > 0.0 && extent > self.size_hint.0 {
			debug!(
				"two-way-tree: '{}' spans {:.0} breadth units, beyond the {:.0} hint",
				root.name, extent, self.size_hint.0
			);
		}
		tree
	}
}

/// Per-node working state of the Buchheim walk.
#[derive(Clone, Debug)]
struct WalkNode {
	parent: usize,
	children: Vec<usize>,
	/// Position among siblings.
	number: usize,
	/// Greatest distinct ancestor candidate.
	ancestor: usize,
	/// Default ancestor for the children of this node.
	default_ancestor: Option<usize>,
	prelim: f64,
	modifier: f64,
	change: f64,
	shift: f64,
	thread: Option<usize>,
}

impl WalkNode {
	fn new(index: usize, parent: usize, number: usize) -> Self {
		Self {
			parent,
			children: Vec::new(),
			number,
			ancestor: index,
			default_ancestor: None,
			prelim: 0.0,
			modifier: 0.0,
			change: 0.0,
			shift: 0.0,
			thread: None,
		}
	}
}

/// Walk arena: index 0 is the virtual root, `i + 1` mirrors layout node `i`.
struct Walker {
	nodes: Vec<WalkNode>,
}

impl Walker {
	fn new(tree: &LayoutTree) -> Self {
		let mut nodes = Vec::with_capacity(tree.len() + 1);
		nodes.push(WalkNode::new(VIRTUAL_ROOT, VIRTUAL_ROOT, 0));
		nodes[VIRTUAL_ROOT].children.push(1);

		for (id, node) in tree.descendants() {
			let parent = node.parent.map_or(VIRTUAL_ROOT, |p| p + 1);
			let number = node
				.parent
				.and_then(|p| tree.node(p))
				.and_then(|p| p.children.iter().position(|&c| c == id))
				.unwrap_or(0);
			let mut walk = WalkNode::new(id + 1, parent, number);
			walk.children = node.children.iter().map(|&c| c + 1).collect();
			nodes.push(walk);
		}
		Self { nodes }
	}

	/// Final breadth coordinates in layout node order, in node units.
	fn run(mut self) -> Vec<f64> {
		for v in self.post_order() {
			self.first_walk(v);
		}
		self.nodes[VIRTUAL_ROOT].modifier = -self.nodes[1].prelim;

		let mut breadth = vec![0.0; self.nodes.len() - 1];
		for v in self.pre_order() {
			let parent_mod = self.nodes[self.nodes[v].parent].modifier;
			breadth[v - 1] = self.nodes[v].prelim + parent_mod;
			self.nodes[v].modifier += parent_mod;
		}
		breadth
	}

	/// Real nodes, children left to right before their parent.
	fn post_order(&self) -> Vec<usize> {
		let mut pending = vec![1];
		let mut visited = Vec::with_capacity(self.nodes.len());
		while let Some(v) = pending.pop() {
			visited.push(v);
			pending.extend(self.nodes[v].children.iter().copied());
		}
		visited.reverse();
		visited
	}

	/// Real nodes, parent before children.
	fn pre_order(&self) -> Vec<usize> {
		let mut pending = vec![1];
		let mut visited = Vec::with_capacity(self.nodes.len());
		while let Some(v) = pending.pop() {
			visited.push(v);
			pending.extend(self.nodes[v].children.iter().rev().copied());
		}
		visited
	}

	fn separation(&self, a: usize, b: usize) -> f64 {
		if self.nodes[a].parent == self.nodes[b].parent {
			1.0
		} else {
			2.0
		}
	}

	fn next_left(&self, v: usize) -> Option<usize> {
		self.nodes[v].children.first().copied().or(self.nodes[v].thread)
	}

	fn next_right(&self, v: usize) -> Option<usize> {
		self.nodes[v].children.last().copied().or(self.nodes[v].thread)
	}

	fn left_sibling(&self, v: usize) -> Option<usize> {
		let number = self.nodes[v].number;
		if number == 0 {
			return None;
		}
		let parent = self.nodes[v].parent;
		self.nodes[parent].children.get(number - 1).copied()
	}

	fn first_walk(&mut self, v: usize) {
		let parent = self.nodes[v].parent;
		let left = self.left_sibling(v);

		if let (Some(&first), Some(&last)) =
			(self.nodes[v].children.first(), self.nodes[v].children.last())
		{
			self.execute_shifts(v);
			let midpoint = (self.nodes[first].prelim + self.nodes[last].prelim) / 2.0;
			if let Some(w) = left {
				self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
				self.nodes[v].modifier = self.nodes[v].prelim - midpoint;
			} else {
				self.nodes[v].prelim = midpoint;
			}
		} else if let Some(w) = left {
			self.nodes[v].prelim = self.nodes[w].prelim + self.separation(v, w);
		}

		let first_sibling = self.nodes[parent].children.first().copied().unwrap_or(v);
		let default_ancestor = self.nodes[parent].default_ancestor.unwrap_or(first_sibling);
		self.nodes[parent].default_ancestor = Some(self.apportion(v, left, default_ancestor));
	}

	/// Push `v`'s subtree right until it clears everything left of it, and
	/// thread the contours of the combined forest.
	fn apportion(&mut self, v: usize, left: Option<usize>, mut ancestor: usize) -> usize {
		let Some(w) = left else {
			return ancestor;
		};

		let parent = self.nodes[v].parent;
		let (mut vip, mut vop, mut vim) = (v, v, w);
		let mut vom = self.nodes[parent].children.first().copied().unwrap_or(v);
		let mut sip = self.nodes[vip].modifier;
		let mut sop = self.nodes[vop].modifier;
		let mut sim = self.nodes[vim].modifier;
		let mut som = self.nodes[vom].modifier;

		let (mut next_im, mut next_ip);
		loop {
			next_im = self.next_right(vim);
			next_ip = self.next_left(vip);
			let (Some(im), Some(ip)) = (next_im, next_ip) else {
				break;
			};
			vim = im;
			vip = ip;
			vom = self.next_left(vom).unwrap_or(vom);
			vop = self.next_right(vop).unwrap_or(vop);
			self.nodes[vop].ancestor = v;

			let shift = self.nodes[vim].prelim + sim - self.nodes[vip].prelim - sip
				+ self.separation(vim, vip);
			if shift > 0.0 {
				let wm = self.next_ancestor(vim, v, ancestor);
				self.move_subtree(wm, v, shift);
				sip += shift;
				sop += shift;
			}
			sim += self.nodes[vim].modifier;
			sip += self.nodes[vip].modifier;
			som += self.nodes[vom].modifier;
			sop += self.nodes[vop].modifier;
		}

		if let Some(im) = next_im {
			if self.next_right(vop).is_none() {
				self.nodes[vop].thread = Some(im);
				self.nodes[vop].modifier += sim - sop;
			}
		}
		if let Some(ip) = next_ip {
			if self.next_left(vom).is_none() {
				self.nodes[vom].thread = Some(ip);
				self.nodes[vom].modifier += sip - som;
				ancestor = v;
			}
		}
		ancestor
	}

	fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
		let candidate = self.nodes[vim].ancestor;
		if self.nodes[candidate].parent == self.nodes[v].parent {
			candidate
		} else {
			ancestor
		}
	}

	fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
		let subtrees = (self.nodes[wp].number - self.nodes[wm].number) as f64;
		let change = shift / subtrees;
		self.nodes[wp].change -= change;
		self.nodes[wp].shift += shift;
		self.nodes[wm].change += change;
		self.nodes[wp].prelim += shift;
		self.nodes[wp].modifier += shift;
	}

	/// Spread the shifts recorded by `move_subtree` over the intermediate
	/// children of `v`.
	fn execute_shifts(&mut self, v: usize) {
		let mut shift = 0.0;
		let mut change = 0.0;
		for i in (0..self.nodes[v].children.len()).rev() {
			let w = self.nodes[v].children[i];
			self.nodes[w].prelim += shift;
			self.nodes[w].modifier += shift;
			change += self.nodes[w].change;
			shift += self.nodes[w].shift + change;
		}
	}
}
