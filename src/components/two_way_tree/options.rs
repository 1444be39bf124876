//! Render options.
//!
//! [`RenderOptions`] is an immutable value: build it once through
//! [`RenderOptionsBuilder`] (or from a deserialized [`OptionsConfig`]), which
//! validates every field, then read it through accessors.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use super::error::TreeError;
use super::hierarchy::LayoutNode;
use super::theme::{CssColor, Theme};
use super::types::TreeSpec;

/// Outer margins around the content area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

impl Default for Margins {
	fn default() -> Self {
		Self {
			top: 20.0,
			right: 120.0,
			bottom: 20.0,
			left: 120.0,
		}
	}
}

/// The user-space rectangle mapped onto the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
	pub min_x: f64,
	pub min_y: f64,
	pub width: f64,
	pub height: f64,
}

impl ViewBox {
	/// A view box of the given size centered on the origin.
	pub fn centered(width: f64, height: f64) -> Self {
		Self {
			min_x: -width / 2.0,
			min_y: -height / 2.0,
			width,
			height,
		}
	}

	pub fn max_x(&self) -> f64 {
		self.min_x + self.width
	}

	pub fn max_y(&self) -> f64 {
		self.min_y + self.height
	}
}

/// Callback invoked with the clicked node.
#[derive(Clone)]
pub struct NodeClickHandler(Rc<dyn Fn(&LayoutNode)>);

impl NodeClickHandler {
	pub fn new(f: impl Fn(&LayoutNode) + 'static) -> Self {
		Self(Rc::new(f))
	}

	pub fn call(&self, node: &LayoutNode) {
		(self.0)(node)
	}
}

impl fmt::Debug for NodeClickHandler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("NodeClickHandler(..)")
	}
}

/// Validated configuration for one two-way tree.
#[derive(Clone, Debug)]
pub struct RenderOptions {
	trees_data: TreeSpec,
	margins: Margins,
	view_box: Option<ViewBox>,
	content_width: f64,
	content_height: f64,
	tree_based_x: f64,
	tree_based_y: f64,
	tree_coordinate: (f64, f64),
	theme: Theme,
	on_node_click: Option<NodeClickHandler>,
}

impl RenderOptions {
	pub fn builder(trees_data: TreeSpec) -> RenderOptionsBuilder {
		RenderOptionsBuilder::new(trees_data)
	}

	/// Options from the deserialized JSON form. Color strings are taken as
	/// CSS colors; only a blank one fails construction.
	pub fn from_config(config: OptionsConfig) -> Result<Self, TreeError> {
		let defaults = Margins::default();
		let mut builder = RenderOptions::builder(config.trees_data).margins(Margins {
			top: config.margin_top.unwrap_or(defaults.top),
			right: config.margin_right.unwrap_or(defaults.right),
			bottom: config.margin_bottom.unwrap_or(defaults.bottom),
			left: config.margin_left.unwrap_or(defaults.left),
		});

		match config.view_box.as_deref() {
			None | Some([]) => {}
			Some(&[min_x, min_y, width, height]) => {
				builder = builder.view_box(ViewBox {
					min_x,
					min_y,
					width,
					height,
				});
			}
			Some(other) => {
				return Err(TreeError::invalid_option(
					"viewBox",
					format!("expected 4 numbers, got {}", other.len()),
				));
			}
		}

		if let Some(w) = config.content_width {
			builder = builder.content_width(w);
		}
		if let Some(h) = config.content_height {
			builder = builder.content_height(h);
		}
		if let Some(dx) = config.tree_based_x {
			builder = builder.tree_based_x(dx);
		}
		if let Some(dy) = config.tree_based_y {
			builder = builder.tree_based_y(dy);
		}
		if let Some([x, y]) = config.tree_coordinate {
			builder = builder.tree_coordinate(x, y);
		}

		let mut theme = Theme::default();
		let colors = [
			("lineColor", &config.line_color, &mut theme.line),
			("svgBackground", &config.svg_background, &mut theme.background),
			("nodeColor", &config.node_color, &mut theme.node),
			("focusNodeColor", &config.focus_node_color, &mut theme.focus),
		];
		for (name, value, slot) in colors {
			if let Some(value) = value {
				*slot = CssColor::new(value).ok_or_else(|| TreeError::InvalidColor {
					name,
					value: value.clone(),
				})?;
			}
		}

		builder.theme(theme).build()
	}

	/// Parse the JSON options object.
	pub fn from_json(json: &str) -> Result<Self, TreeError> {
		Self::from_config(serde_json::from_str(json)?)
	}

	pub fn trees_data(&self) -> &TreeSpec {
		&self.trees_data
	}

	pub fn margins(&self) -> Margins {
		self.margins
	}

	/// Explicit view box, or one of the content size centered on the origin.
	pub fn view_box(&self) -> ViewBox {
		self.view_box
			.unwrap_or_else(|| ViewBox::centered(self.content_width, self.content_height))
	}

	pub fn content_width(&self) -> f64 {
		self.content_width
	}

	pub fn content_height(&self) -> f64 {
		self.content_height
	}

	/// Breadth allocated per node.
	pub fn tree_based_x(&self) -> f64 {
		self.tree_based_x
	}

	/// Depth budget shared out between the levels of a subtree.
	pub fn tree_based_y(&self) -> f64 {
		self.tree_based_y
	}

	/// Offset applied to every subtree group.
	pub fn tree_coordinate(&self) -> (f64, f64) {
		self.tree_coordinate
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn on_node_click(&self) -> Option<&NodeClickHandler> {
		self.on_node_click.as_ref()
	}

	/// Attach a click callback to already-validated options, replacing any
	/// previous one.
	pub fn with_node_click(mut self, f: impl Fn(&LayoutNode) + 'static) -> Self {
		self.on_node_click = Some(NodeClickHandler::new(f));
		self
	}

	/// Soft `(height, width)` layout hint: content size minus margins.
	pub fn layout_size(&self) -> (f64, f64) {
		(
			self.content_height - self.margins.top - self.margins.bottom,
			self.content_width - self.margins.left - self.margins.right,
		)
	}
}

/// Builder for [`RenderOptions`]; every field starts at its default.
#[derive(Clone, Debug)]
pub struct RenderOptionsBuilder {
	options: RenderOptions,
}

impl RenderOptionsBuilder {
	fn new(trees_data: TreeSpec) -> Self {
		Self {
			options: RenderOptions {
				trees_data,
				margins: Margins::default(),
				view_box: None,
				content_width: 1920.0,
				content_height: 700.0,
				tree_based_x: 30.0,
				tree_based_y: 700.0,
				tree_coordinate: (-200.0, 200.0),
				theme: Theme::default(),
				on_node_click: None,
			},
		}
	}

	pub fn margins(mut self, margins: Margins) -> Self {
		self.options.margins = margins;
		self
	}

	pub fn view_box(mut self, view_box: ViewBox) -> Self {
		self.options.view_box = Some(view_box);
		self
	}

	pub fn content_width(mut self, width: f64) -> Self {
		self.options.content_width = width;
		self
	}

	pub fn content_height(mut self, height: f64) -> Self {
		self.options.content_height = height;
		self
	}

	pub fn tree_based_x(mut self, dx: f64) -> Self {
		self.options.tree_based_x = dx;
		self
	}

	pub fn tree_based_y(mut self, dy: f64) -> Self {
		self.options.tree_based_y = dy;
		self
	}

	pub fn tree_coordinate(mut self, x: f64, y: f64) -> Self {
		self.options.tree_coordinate = (x, y);
		self
	}

	pub fn theme(mut self, theme: Theme) -> Self {
		self.options.theme = theme;
		self
	}

	pub fn on_node_click(mut self, f: impl Fn(&LayoutNode) + 'static) -> Self {
		self.options.on_node_click = Some(NodeClickHandler::new(f));
		self
	}

	pub fn build(self) -> Result<RenderOptions, TreeError> {
		let o = &self.options;
		positive("contentWidth", o.content_width)?;
		positive("contentHeight", o.content_height)?;
		positive("treeBasedx", o.tree_based_x)?;
		positive("treeBasedy", o.tree_based_y)?;
		let m = o.margins;
		for (name, v) in [
			("marginTop", m.top),
			("marginRight", m.right),
			("marginBottom", m.bottom),
			("marginLeft", m.left),
		] {
			finite(name, v)?;
		}
		finite("treeCoordinate", o.tree_coordinate.0)?;
		finite("treeCoordinate", o.tree_coordinate.1)?;
		if let Some(vb) = o.view_box {
			finite("viewBox", vb.min_x)?;
			finite("viewBox", vb.min_y)?;
			positive("viewBox", vb.width)?;
			positive("viewBox", vb.height)?;
		}
		Ok(self.options)
	}
}

fn finite(name: &'static str, v: f64) -> Result<(), TreeError> {
	if v.is_finite() {
		Ok(())
	} else {
		Err(TreeError::invalid_option(name, format!("{v} is not finite")))
	}
}

fn positive(name: &'static str, v: f64) -> Result<(), TreeError> {
	finite(name, v)?;
	if v > 0.0 {
		Ok(())
	} else {
		Err(TreeError::invalid_option(name, format!("{v} must be positive")))
	}
}

/// JSON form of the options, keyed like the JavaScript options object.
/// Every field except `treesData` is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsConfig {
	pub trees_data: TreeSpec,
	pub margin_top: Option<f64>,
	pub margin_right: Option<f64>,
	pub margin_bottom: Option<f64>,
	pub margin_left: Option<f64>,
	/// `[]` or absent derives the view box from the content size.
	pub view_box: Option<Vec<f64>>,
	pub content_width: Option<f64>,
	pub content_height: Option<f64>,
	#[serde(rename = "treeBasedx")]
	pub tree_based_x: Option<f64>,
	#[serde(rename = "treeBasedy")]
	pub tree_based_y: Option<f64>,
	pub tree_coordinate: Option<[f64; 2]>,
	pub line_color: Option<String>,
	pub svg_background: Option<String>,
	pub node_color: Option<String>,
	pub focus_node_color: Option<String>,
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use super::*;

	#[test]
	fn defaults() {
		let o = RenderOptions::builder(TreeSpec::new("root")).build().unwrap();
		assert_eq!(o.content_width(), 1920.0);
		assert_eq!(o.content_height(), 700.0);
		assert_eq!(o.view_box(), ViewBox::centered(1920.0, 700.0));
		assert_eq!(o.layout_size(), (660.0, 1680.0));
		assert_eq!(o.tree_coordinate(), (-200.0, 200.0));
		assert!(o.on_node_click().is_none());
	}

	#[test]
	fn rejects_non_positive_spacing() {
		let err = RenderOptions::builder(TreeSpec::new("root"))
			.tree_based_x(0.0)
			.build()
			.unwrap_err();
		assert!(matches!(err, TreeError::InvalidOption { name: "treeBasedx", .. }));

		let err = RenderOptions::builder(TreeSpec::new("root"))
			.content_height(f64::NAN)
			.build()
			.unwrap_err();
		assert!(matches!(err, TreeError::InvalidOption { name: "contentHeight", .. }));
	}

	#[test]
	fn from_json_overrides_and_keeps_defaults() {
		let json = r##"{
			"treesData": { "name": "root", "rightChildren": [{ "name": "b" }] },
			"marginLeft": 10,
			"viewBox": [],
			"treeBasedx": 40,
			"treeCoordinate": [0, 0],
			"lineColor": "#000"
		}"##;
		let o = RenderOptions::from_json(json).unwrap();

		assert_eq!(o.trees_data().right_children.len(), 1);
		assert_eq!(o.margins().left, 10.0);
		assert_eq!(o.margins().right, 120.0);
		assert_eq!(o.tree_based_x(), 40.0);
		assert_eq!(o.tree_based_y(), 700.0);
		assert_eq!(o.tree_coordinate(), (0.0, 0.0));
		assert_eq!(o.theme().line.as_str(), "#000000");
		assert_eq!(o.theme().node, Theme::default().node);
	}

	#[test]
	fn explicit_view_box() {
		let json = r#"{ "treesData": { "name": "r" }, "viewBox": [0, 0, 800, 600] }"#;
		let o = RenderOptions::from_json(json).unwrap();
		assert_eq!(
			o.view_box(),
			ViewBox {
				min_x: 0.0,
				min_y: 0.0,
				width: 800.0,
				height: 600.0
			}
		);

		let json = r#"{ "treesData": { "name": "r" }, "viewBox": [0, 0, 800] }"#;
		assert!(matches!(
			RenderOptions::from_json(json),
			Err(TreeError::InvalidOption { name: "viewBox", .. })
		));
	}

	#[test]
	fn named_colors_pass_through() {
		let json = r#"{ "treesData": { "name": "r" }, "focusNodeColor": "hotpink", "nodeColor": "white" }"#;
		let o = RenderOptions::from_json(json).unwrap();
		assert_eq!(o.theme().focus.as_str(), "hotpink");
		assert_eq!(o.theme().node.as_str(), "white");
	}

	#[test]
	fn blank_color_is_reported_by_name() {
		let json = r#"{ "treesData": { "name": "r" }, "focusNodeColor": " " }"#;
		assert_eq!(
			RenderOptions::from_json(json).unwrap_err(),
			TreeError::InvalidColor {
				name: "focusNodeColor",
				value: " ".into()
			}
		);
	}

	#[test]
	fn click_handler_is_callable() {
		let hits = Rc::new(Cell::new(0));
		let counter = hits.clone();
		let o = RenderOptions::builder(TreeSpec::new("root"))
			.on_node_click(move |_| counter.set(counter.get() + 1))
			.build()
			.unwrap();

		let node = LayoutNode {
			name: "root".into(),
			depth: 0,
			height: 0,
			x: 0.0,
			y: 0.0,
			parent: None,
			children: Vec::new(),
		};
		if let Some(handler) = o.on_node_click() {
			handler.call(&node);
		}
		assert_eq!(hits.get(), 1);
	}
}
