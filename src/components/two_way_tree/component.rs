//! Leptos component wrapping the two-way tree canvas.
//!
//! The component creates an HTML canvas sized to the content area and wires
//! mouse/wheel event handlers for hover, click, panning and zooming. There is
//! no animation loop: the scene is static, so each handler repaints only when
//! the interaction state reports a change.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::html::Canvas;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::options::RenderOptions;
use super::render;
use super::state::TreeViewState;
use super::theme::Theme;

/// Bundles the view state with the drawing surface and colors.
struct TreeCanvasContext {
	state: TreeViewState,
	ctx: CanvasRenderingContext2d,
	theme: Theme,
}

impl TreeCanvasContext {
	fn paint(&self) {
		render::render(&self.state, &self.ctx, &self.theme);
	}
}

type SharedContext = Rc<RefCell<Option<TreeCanvasContext>>>;

/// Pointer position in canvas pixels. Accounts for CSS scaling of the canvas
/// element.
fn canvas_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	if rect.width() <= 0.0 || rect.height() <= 0.0 {
		return None;
	}
	let (sx, sy) = (
		canvas.width() as f64 / rect.width(),
		canvas.height() as f64 / rect.height(),
	);
	Some((
		(ev.client_x() as f64 - rect.left()) * sx,
		(ev.client_y() as f64 - rect.top()) * sy,
	))
}

fn set_cursor(canvas_ref: NodeRef<Canvas>, cursor: &str) {
	if let Some(canvas) = canvas_ref.get() {
		let canvas: HtmlCanvasElement = canvas.into();
		let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
	}
}

/// Renders an interactive two-way tree on a canvas element.
///
/// Layout runs once when the canvas mounts; to show different data, mount
/// a new component with new options.
#[component]
pub fn TwoWayTreeCanvas(options: RenderOptions) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let context: SharedContext = Rc::new(RefCell::new(None));
	let (width, height) = (options.content_width(), options.content_height());
	let context_init = context.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx,
			_ => {
				warn!("two-way-tree: canvas has no 2d context, tree left blank");
				return;
			}
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			warn!("two-way-tree: unexpected 2d context type");
			return;
		};

		let c = TreeCanvasContext {
			state: TreeViewState::new(&options),
			ctx,
			theme: options.theme().clone(),
		};
		c.paint();
		*context_init.borrow_mut() = Some(c);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(x, y);
			set_cursor(canvas_ref, "grabbing");
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.pointer_move(x, y) {
				c.paint();
			}
			let cursor = if c.state.pan.active {
				"grabbing"
			} else if c.state.highlight.hovered().is_some() {
				"pointer"
			} else {
				"grab"
			};
			set_cursor(canvas_ref, cursor);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
			set_cursor(canvas_ref, "grab");
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			if c.state.pointer_leave() {
				c.paint();
			}
			set_cursor(canvas_ref, "grab");
		}
	};

	// The callback runs after the borrow is released: host callbacks may throw.
	let context_cl = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		let target = match context_cl.borrow_mut().as_mut() {
			Some(c) => c.state.click_target(x, y),
			None => None,
		};
		if let Some((handler, node)) = target {
			handler.call(&node);
		}
	};

	let context_dc = context.clone();
	let on_dblclick = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_dc.borrow_mut() {
			if c.state.double_click(x, y, ev.shift_key()) {
				c.paint();
			}
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = canvas_position(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			if c.state.wheel(x, y, ev.delta_y(), ev.delta_mode(), ev.ctrl_key()) {
				c.paint();
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="two-way-tree-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:click=on_click
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; max-width: 100%; cursor: grab;"
		/>
	}
}
