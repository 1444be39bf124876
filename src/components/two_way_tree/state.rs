//! Tree view state and interaction tracking.
//!
//! Wraps the immutable scene with the view transform for pan/zoom, the hover
//! highlight and the click callback. Every method takes screen-space
//! (canvas pixel) coordinates and reports whether a repaint is needed.

use log::{debug, info};

use super::builder::TwoWayTrees;
use super::hierarchy::{LayoutNode, NodeId};
use super::layout::TreeLayout;
use super::options::{NodeClickHandler, RenderOptions};
use super::scene::{Point, Scene};
use super::zoom::{ZoomBehavior, ZoomTransform, wheel_delta};

/// Pointer travel (pixels) beyond which a press becomes a pan, not a click.
const CLICK_TOLERANCE: f64 = 3.0;

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	/// Set once the pointer moved far enough to suppress the click.
	pub moved: bool,
	pub start: Point,
	pub transform_start: ZoomTransform,
}

/// Hovered identifier. Every label sharing it takes the focus color.
#[derive(Clone, Debug, Default)]
pub struct HighlightState {
	hovered: Option<String>,
}

impl HighlightState {
	/// Returns true if the hovered identifier changed.
	pub fn set_hover(&mut self, id: Option<&str>) -> bool {
		if self.hovered.as_deref() == id {
			return false;
		}
		self.hovered = id.map(str::to_owned);
		true
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn is_focused(&self, id: &str) -> bool {
		self.hovered.as_deref() == Some(id)
	}
}

/// Core view state combining the scene with interaction tracking.
///
/// Created once when the component mounts; only the transform, pan and
/// highlight change afterwards.
#[derive(Debug)]
pub struct TreeViewState {
	pub scene: Scene,
	pub zoom: ZoomBehavior,
	pub transform: ZoomTransform,
	pub pan: PanState,
	pub highlight: HighlightState,
	/// View box to canvas pixels.
	fit: ZoomTransform,
	on_node_click: Option<NodeClickHandler>,
}

impl TreeViewState {
	pub fn new(options: &RenderOptions) -> Self {
		let (height, width) = options.layout_size();
		let layout = TreeLayout::new(options.tree_based_x(), options.tree_based_y())
			.with_size_hint(height, width);
		let trees = TwoWayTrees::build(options.trees_data(), &layout);
		let scene = Scene::build(&trees, options);
		let fit = ZoomTransform::fit(&scene.view_box, scene.width, scene.height);
		info!(
			"two-way-tree: scene ready, {} group(s), {} node(s)",
			scene.groups.len(),
			scene.groups.iter().map(|g| g.nodes.len()).sum::<usize>()
		);

		Self {
			zoom: ZoomBehavior::new(scene.view_box),
			scene,
			transform: ZoomTransform::IDENTITY,
			pan: PanState::default(),
			highlight: HighlightState::default(),
			fit,
			on_node_click: options.on_node_click().cloned(),
		}
	}

	/// View box to canvas pixels.
	pub fn fit(&self) -> ZoomTransform {
		self.fit
	}

	pub fn screen_to_view(&self, sx: f64, sy: f64) -> Point {
		self.fit.invert(Point::new(sx, sy))
	}

	pub fn screen_to_stage(&self, sx: f64, sy: f64) -> Point {
		self.transform.invert(self.screen_to_view(sx, sy))
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<(usize, NodeId)> {
		self.scene
			.node_at(self.screen_to_stage(sx, sy))
			.map(|(group, mark)| (group, mark.node))
	}

	fn hovered_id_at(&self, sx: f64, sy: f64) -> Option<String> {
		self.scene
			.node_at(self.screen_to_stage(sx, sy))
			.map(|(_, mark)| mark.id.clone())
	}

	pub fn pointer_down(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			moved: false,
			start: self.screen_to_view(sx, sy),
			transform_start: self.transform,
		};
	}

	/// Pans while the pointer is down, otherwise updates hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) -> bool {
		if self.pan.active {
			let p = self.screen_to_view(sx, sy);
			let (dx, dy) = (p.x - self.pan.start.x, p.y - self.pan.start.y);
			if !self.pan.moved && dx.hypot(dy) * self.fit.k < CLICK_TOLERANCE {
				return false;
			}
			self.pan.moved = true;
			let next = self.zoom.pan_by(self.pan.transform_start, dx, dy);
			let changed = next != self.transform;
			self.transform = next;
			return changed;
		}

		let hovered = self.hovered_id_at(sx, sy);
		self.highlight.set_hover(hovered.as_deref())
	}

	pub fn pointer_up(&mut self) {
		self.pan.active = false;
	}

	pub fn pointer_leave(&mut self) -> bool {
		self.pan.active = false;
		self.pan.moved = false;
		self.highlight.set_hover(None)
	}

	/// Dispatch a click to the callback, unless it ended a pan. Returns true
	/// if the callback ran.
	pub fn click(&mut self, sx: f64, sy: f64) -> bool {
		match self.click_target(sx, sy) {
			Some((handler, node)) => {
				handler.call(&node);
				true
			}
			None => false,
		}
	}

	/// The callback and node a click at this point would dispatch to, without
	/// calling it. Lets the caller release its borrow of the state first, since
	/// host callbacks may throw.
	pub fn click_target(&mut self, sx: f64, sy: f64) -> Option<(NodeClickHandler, LayoutNode)> {
		if std::mem::take(&mut self.pan.moved) {
			return None;
		}
		let handler = self.on_node_click.clone()?;
		let (group, id) = self.node_at_position(sx, sy)?;
		let node = self.scene.layout_node(group, id)?;
		debug!("two-way-tree: click on '{}'", node.name);
		Some((handler, node.clone()))
	}

	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64, delta_mode: u32, ctrl: bool) -> bool {
		let factor = 2f64.powf(wheel_delta(delta_y, delta_mode, ctrl));
		self.zoom_at(sx, sy, factor)
	}

	/// Zoom in by two, or out by two with shift.
	pub fn double_click(&mut self, sx: f64, sy: f64, shift: bool) -> bool {
		self.zoom_at(sx, sy, if shift { 0.5 } else { 2.0 })
	}

	fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) -> bool {
		let pointer = self.screen_to_view(sx, sy);
		let next = self.zoom.scale_by(self.transform, factor, pointer);
		let changed = next != self.transform;
		self.transform = next;
		changed
	}
}
