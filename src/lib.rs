//! two-way-tree: Interactive two-way tree diagrams in the browser.
//!
//! This crate provides a WASM-based component that draws a single root with
//! a left and a right subtree branching from a shared axis, with pan/zoom,
//! hover highlight and a node click callback.

use leptos::mount::mount_to;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, HtmlScriptElement, Window};

pub mod components;

pub use components::two_way_tree::{
	LayoutNode, NodeSpec, RenderOptions, TreeError, TreeSpec, TwoWayTreeCanvas, render_svg,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("two-way-tree: logging initialized");
}

/// Mount a two-way tree into the element matching `target_selector`.
///
/// Layout is computed once here; to show new data, call again with new
/// options.
pub fn create(target_selector: &str, options: RenderOptions) -> Result<(), TreeError> {
	if target_selector.trim().is_empty() {
		return Err(TreeError::MissingTarget);
	}
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(TreeError::NoDocument)?;
	let not_found = || TreeError::TargetNotFound(target_selector.to_owned());
	let element = document
		.query_selector(target_selector)
		.ok()
		.flatten()
		.ok_or_else(not_found)?;
	let element: HtmlElement = element.dyn_into().map_err(|_| not_found())?;

	info!("two-way-tree: mounting into '{}'", target_selector);
	mount_to(element, move || view! { <TwoWayTreeCanvas options=options /> }).forget();
	Ok(())
}

/// JS entry point: `createTwoWayTree(selector, optionsJson, onNodeClick?)`.
///
/// The callback receives `{ name, x, y, depth }` for the clicked node. An
/// exception it throws is rethrown to the host.
#[wasm_bindgen(js_name = createTwoWayTree)]
pub fn create_from_js(
	selector: &str,
	options_json: &str,
	on_node_click: Option<js_sys::Function>,
) -> Result<(), JsValue> {
	let mut options = RenderOptions::from_json(options_json)?;
	if let Some(callback) = on_node_click {
		options = options.with_node_click(move |node| {
			if let Err(e) = callback.call1(&JsValue::NULL, &node_to_js(node)) {
				wasm_bindgen::throw_val(e);
			}
		});
	}
	create(selector, options)?;
	Ok(())
}

fn node_to_js(node: &LayoutNode) -> JsValue {
	let obj = js_sys::Object::new();
	let fields: [(&str, JsValue); 4] = [
		("name", node.name.as_str().into()),
		("x", node.x.into()),
		("y", node.y.into()),
		("depth", (node.depth as f64).into()),
	];
	for (key, value) in fields {
		let _ = js_sys::Reflect::set(&obj, &key.into(), &value);
	}
	obj.into()
}

/// Load tree options from a script element with id="tree-data".
/// Expected format: the options JSON, `{ "treesData": { ... }, ... }`.
fn load_tree_options() -> Option<RenderOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("tree-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match RenderOptions::from_json(&json_text) {
		Ok(options) => {
			let spec = options.trees_data();
			info!(
				"two-way-tree: loaded '{}' with {} left, {} right children",
				spec.name,
				spec.left_children.len(),
				spec.right_children.len()
			);
			Some(options)
		}
		Err(e) => {
			warn!("two-way-tree: failed to parse tree data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads tree options from the DOM and renders the two-way tree.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let body = match load_tree_options() {
		Some(options) => view! { <TwoWayTreeCanvas options=options /> }.into_any(),
		None => view! { <p class="tree-empty">"No tree data found."</p> }.into_any(),
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Two-Way Tree" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="two-way-tree">
			{body}
			<p class="subtitle">"Scroll or double-click to zoom. Drag to pan. Click a label to select it."</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_selector_is_rejected_before_touching_the_dom() {
		let options = RenderOptions::builder(TreeSpec::new("root")).build().unwrap();
		assert_eq!(create("", options.clone()), Err(TreeError::MissingTarget));
		assert_eq!(create("   ", options), Err(TreeError::MissingTarget));
	}
}
