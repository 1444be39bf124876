//! Display list for a two-way tree.
//!
//! The scene is computed once from the laid-out trees and holds everything
//! needed to paint (canvas or SVG) and hit-test: one [`TreeGroup`] per
//! rendered subtree, each with its links and node marks in group-local
//! coordinates plus the translation placing the group on the stage.

use super::builder::TwoWayTrees;
use super::hierarchy::{LayoutNode, LayoutTree, NodeId};
use super::options::{RenderOptions, ViewBox};
use super::types::Side;

/// Label font size in user units.
pub const FONT_SIZE: f64 = 20.0;
/// Baseline shift of labels, in ems, to center text on the node.
pub const LABEL_DY_EM: f64 = 0.31;
/// Average glyph advance in ems, used for label hit boxes.
const GLYPH_WIDTH_EM: f64 = 0.6;
/// Link stroke width.
pub const LINK_WIDTH: f64 = 2.0;
/// Label halo stroke width.
pub const HALO_WIDTH: f64 = 3.0;

/// Extra depth offset of mirrored link endpoints.
const LEFT_LINK_OFFSET: f64 = 50.0;
/// Extra depth offset of mirrored nodes.
const LEFT_NODE_OFFSET: f64 = 115.0;
/// Label offset from a mirrored node.
const LEFT_LABEL_DX: f64 = 60.0;
/// Label offset from a direct node.
const RIGHT_LABEL_DX: f64 = 6.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, by: Point) -> Self {
		Self::new(self.x + by.x, self.y + by.y)
	}

	pub fn minus(self, by: Point) -> Self {
		Self::new(self.x - by.x, self.y - by.y)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
	Start,
	End,
}

impl TextAnchor {
	pub fn as_str(self) -> &'static str {
		match self {
			TextAnchor::Start => "start",
			TextAnchor::End => "end",
		}
	}
}

/// A node's text, positioned relative to the node.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
	pub text: String,
	/// Horizontal offset from the node position.
	pub dx: f64,
	pub anchor: TextAnchor,
}

impl Label {
	/// Approximate text box `(min, max)` for a label drawn at `at`.
	pub fn bounds(&self, at: Point) -> (Point, Point) {
		let width = self.text.chars().count() as f64 * FONT_SIZE * GLYPH_WIDTH_EM;
		let x = at.x + self.dx;
		let (x0, x1) = match self.anchor {
			TextAnchor::Start => (x, x + width),
			TextAnchor::End => (x - width, x),
		};
		let half = FONT_SIZE / 2.0;
		(Point::new(x0, at.y - half), Point::new(x1, at.y + half))
	}

	pub fn contains(&self, at: Point, p: Point) -> bool {
		let (min, max) = self.bounds(at);
		p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
	}
}

/// A drawn node. Nodes whose label is suppressed are still part of the
/// group but paint nothing and cannot be hovered or clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMark {
	pub node: NodeId,
	/// Identifier shared by every mark of the same name.
	pub id: String,
	pub position: Point,
	pub label: Option<Label>,
}

impl NodeMark {
	pub fn hit(&self, p: Point) -> bool {
		self.label
			.as_ref()
			.is_some_and(|label| label.contains(self.position, p))
	}
}

/// Horizontal cubic connector from parent to child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkPath {
	pub source: Point,
	pub target: Point,
}

impl LinkPath {
	/// Both control points sit at the horizontal midpoint, at the source and
	/// target heights respectively.
	pub fn control_points(&self) -> (Point, Point) {
		let mid = (self.source.x + self.target.x) / 2.0;
		(
			Point::new(mid, self.source.y),
			Point::new(mid, self.target.y),
		)
	}

	/// SVG path data.
	pub fn to_path_data(&self) -> String {
		let (c1, c2) = self.control_points();
		format!(
			"M{},{}C{},{},{},{},{},{}",
			self.source.x, self.source.y, c1.x, c1.y, c2.x, c2.y, self.target.x, self.target.y
		)
	}
}

/// One subtree's drawing group.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeGroup {
	pub side: Side,
	tree: LayoutTree,
	/// Shared placement of every group on the stage.
	pub origin: Point,
	/// Group-specific shift: a third of a level along depth, `x0` along
	/// breadth.
	pub offset: Point,
	pub links: Vec<LinkPath>,
	pub nodes: Vec<NodeMark>,
}

impl TreeGroup {
	/// Lay out the marks of `tree` drawn on `side`. `has_right` tells a left
	/// group whether a right group shares the root.
	pub fn build(tree: &LayoutTree, side: Side, has_right: bool, x0: f64, origin: Point) -> Self {
		let mirrored = side == Side::Left;
		let link_point = |n: &LayoutNode| {
			if mirrored {
				Point::new(-n.y - LEFT_LINK_OFFSET, n.x)
			} else {
				Point::new(n.y, n.x)
			}
		};

		let links = tree
			.links()
			.map(|(parent, child)| LinkPath {
				source: link_point(parent),
				target: link_point(child),
			})
			.collect();

		let nodes = tree
			.descendants()
			.map(|(id, n)| NodeMark {
				node: id,
				id: n.name.clone(),
				position: if mirrored {
					Point::new(-n.y - LEFT_NODE_OFFSET, n.x)
				} else {
					Point::new(n.y, n.x)
				},
				label: label_for(n, side, has_right),
			})
			.collect();

		Self {
			side,
			tree: tree.clone(),
			origin,
			offset: Point::new(tree.dy() / 3.0, x0),
			links,
			nodes,
		}
	}

	pub fn tree(&self) -> &LayoutTree {
		&self.tree
	}

	/// Stage-space point to group-local.
	pub fn to_local(&self, stage: Point) -> Point {
		stage.minus(self.origin).minus(self.offset)
	}

	/// Group-local point to stage-space.
	pub fn to_stage(&self, local: Point) -> Point {
		local.offset(self.offset).offset(self.origin)
	}

	/// Topmost mark under a stage-space point. Later marks paint over
	/// earlier ones, so they win.
	pub fn node_at(&self, stage: Point) -> Option<&NodeMark> {
		let local = self.to_local(stage);
		self.nodes.iter().rev().find(|mark| mark.hit(local))
	}

	pub fn mark(&self, name: &str) -> Option<&NodeMark> {
		self.nodes.iter().find(|mark| mark.id == name)
	}
}

/// Label visibility and placement.
///
/// Direct groups label every node, leaves start-aligned after the node and
/// internal nodes end-aligned before it. Mirrored groups flip the anchors,
/// and drop internal labels when a right group exists so the shared root
/// and its neighbors are not labeled twice.
fn label_for(node: &LayoutNode, side: Side, has_right: bool) -> Option<Label> {
	let leaf = node.is_leaf();
	let (dx, anchor) = match side {
		Side::Left => {
			if !leaf && has_right {
				return None;
			}
			let anchor = if leaf { TextAnchor::End } else { TextAnchor::Start };
			(LEFT_LABEL_DX, anchor)
		}
		Side::Right | Side::Root => {
			if leaf {
				(RIGHT_LABEL_DX, TextAnchor::Start)
			} else {
				(-RIGHT_LABEL_DX, TextAnchor::End)
			}
		}
	};
	Some(Label {
		text: node.name.clone(),
		dx,
		anchor,
	})
}

/// The complete drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	/// Canvas size in pixels.
	pub width: f64,
	pub height: f64,
	pub view_box: ViewBox,
	pub groups: Vec<TreeGroup>,
}

impl Scene {
	pub fn build(trees: &TwoWayTrees, options: &RenderOptions) -> Self {
		let (ox, oy) = options.tree_coordinate();
		let origin = Point::new(ox, oy);
		let has_right = trees.right().is_some();
		let groups = trees
			.rendered()
			.into_iter()
			.map(|(side, tree)| TreeGroup::build(tree, side, has_right, trees.x0(), origin))
			.collect();

		Self {
			width: options.content_width(),
			height: options.content_height(),
			view_box: options.view_box(),
			groups,
		}
	}

	/// Topmost mark under a stage-space point, with its group index.
	pub fn node_at(&self, stage: Point) -> Option<(usize, &NodeMark)> {
		self.groups
			.iter()
			.enumerate()
			.rev()
			.find_map(|(i, g)| g.node_at(stage).map(|mark| (i, mark)))
	}

	/// The layout node behind a mark.
	pub fn layout_node(&self, group: usize, node: NodeId) -> Option<&LayoutNode> {
		self.groups.get(group)?.tree().node(node)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::two_way_tree::layout::TreeLayout;
	use crate::components::two_way_tree::types::{NodeSpec, TreeSpec};

	fn scene_for(spec: TreeSpec) -> Scene {
		let options = RenderOptions::builder(spec).build().unwrap();
		let layout = TreeLayout::new(options.tree_based_x(), options.tree_based_y());
		let trees = TwoWayTrees::build(options.trees_data(), &layout);
		Scene::build(&trees, &options)
	}

	fn labels_with_id<'a>(scene: &'a Scene, id: &'a str) -> impl Iterator<Item = &'a NodeMark> {
		scene
			.groups
			.iter()
			.flat_map(|g| g.nodes.iter())
			.filter(move |mark| mark.id == id && mark.label.is_some())
	}

	fn nested() -> Vec<NodeSpec> {
		vec![
			NodeSpec::with_children("p", vec![NodeSpec::leaf("p1"), NodeSpec::leaf("p2")]),
			NodeSpec::leaf("q"),
		]
	}

	#[test]
	fn right_labels_follow_leafness() {
		let scene = scene_for(TreeSpec::new("root").with_right(nested()));
		let group = &scene.groups[0];
		assert_eq!(group.side, Side::Right);

		let root = group.mark("root").and_then(|m| m.label.as_ref()).unwrap();
		assert_eq!((root.dx, root.anchor), (-6.0, TextAnchor::End));
		let leaf = group.mark("q").and_then(|m| m.label.as_ref()).unwrap();
		assert_eq!((leaf.dx, leaf.anchor), (6.0, TextAnchor::Start));
	}

	#[test]
	fn left_internal_labels_hidden_when_right_exists() {
		let scene = scene_for(
			TreeSpec::new("root")
				.with_left(nested())
				.with_right(vec![NodeSpec::leaf("r")]),
		);
		let left = &scene.groups[0];
		assert_eq!(left.side, Side::Left);
		assert!(left.mark("root").unwrap().label.is_none());
		assert!(left.mark("p").unwrap().label.is_none());
		let leaf = left.mark("p1").and_then(|m| m.label.as_ref()).unwrap();
		assert_eq!((leaf.dx, leaf.anchor), (60.0, TextAnchor::End));
	}

	#[test]
	fn left_only_labels_everything_with_flipped_anchors() {
		let scene = scene_for(TreeSpec::new("root").with_left(nested()));
		let left = &scene.groups[0];
		let root = left.mark("root").and_then(|m| m.label.as_ref()).unwrap();
		assert_eq!(root.anchor, TextAnchor::Start);
		let leaf = left.mark("q").and_then(|m| m.label.as_ref()).unwrap();
		assert_eq!(leaf.anchor, TextAnchor::End);
	}

	#[test]
	fn left_group_mirrors_depth_only() {
		let scene = scene_for(TreeSpec::new("root").with_left(nested()));
		let group = &scene.groups[0];
		let tree = group.tree();
		let q = tree.find("q").and_then(|id| tree.node(id)).unwrap();

		let mark = group.mark("q").unwrap();
		assert_eq!(mark.position, Point::new(-q.y - 115.0, q.x));
		let link = group
			.links
			.iter()
			.find(|l| l.target == Point::new(-q.y - 50.0, q.x))
			.unwrap();
		assert_eq!(link.source, Point::new(-50.0, 0.0));
	}

	#[test]
	fn groups_share_origin_and_x0() {
		let scene = scene_for(
			TreeSpec::new("root")
				.with_left(vec![NodeSpec::leaf("a")])
				.with_right(vec![NodeSpec::leaf("b"), NodeSpec::leaf("c")]),
		);
		let (left, right) = (&scene.groups[0], &scene.groups[1]);
		assert_eq!(left.origin, Point::new(-200.0, 200.0));
		assert_eq!(left.origin, right.origin);
		assert_eq!(left.offset.y, right.offset.y);
		assert_eq!(right.offset.y, -15.0);
		assert!((right.offset.x - 350.0 / 3.0).abs() < 1e-9);
	}

	#[test]
	fn link_control_points_are_horizontal() {
		let link = LinkPath {
			source: Point::new(0.0, 0.0),
			target: Point::new(100.0, 40.0),
		};
		let (c1, c2) = link.control_points();
		assert_eq!(c1, Point::new(50.0, 0.0));
		assert_eq!(c2, Point::new(50.0, 40.0));
		assert_eq!(link.to_path_data(), "M0,0C50,0,50,40,100,40");
	}

	#[test]
	fn hit_testing_uses_label_boxes() {
		let scene = scene_for(TreeSpec::new("root").with_right(vec![NodeSpec::leaf("leaf")]));
		let group = &scene.groups[0];
		let mark = group.mark("leaf").unwrap();
		let inside = group.to_stage(mark.position.offset(Point::new(20.0, 0.0)));
		let (gi, hit) = scene.node_at(inside).unwrap();
		assert_eq!(gi, 0);
		assert_eq!(hit.id, "leaf");

		let before_label = group.to_stage(mark.position.offset(Point::new(-2.0, 0.0)));
		assert!(scene.node_at(before_label).map(|(_, m)| m.id.as_str()) != Some("leaf"));
	}

	#[test]
	fn suppressed_labels_are_not_hit() {
		let scene = scene_for(
			TreeSpec::new("root")
				.with_left(vec![NodeSpec::with_children("inner", vec![NodeSpec::leaf("x")])])
				.with_right(vec![NodeSpec::leaf("y")]),
		);
		let left = &scene.groups[0];
		let inner = left.mark("inner").unwrap();
		let p = left.to_stage(inner.position.offset(Point::new(70.0, 0.0)));
		assert!(scene.node_at(p).is_none_or(|(_, m)| m.id != "inner"));
		assert_eq!(labels_with_id(&scene, "inner").count(), 0);
		assert_eq!(labels_with_id(&scene, "root").count(), 1);
	}
}
