//! Canvas rendering for the two-way tree.
//!
//! Paints the scene onto the context handed in by the component:
//! 1. Background (screen space)
//! 2. Per group, in paint order: links, then label halos and fills
//!
//! Groups are isolated with `save`/`restore`; they share only the view
//! transform, the tree coordinate and the `x0` baseline baked into each
//! group's offset.

use web_sys::CanvasRenderingContext2d;

use super::scene::{FONT_SIZE, HALO_WIDTH, LABEL_DY_EM, LINK_WIDTH, NodeMark, TreeGroup};
use super::state::TreeViewState;
use super::theme::Theme;

/// Renders the complete tree to the canvas.
pub fn render(state: &TreeViewState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_fill_style_str(theme.background.as_str());
	ctx.fill_rect(0.0, 0.0, state.scene.width, state.scene.height);

	let fit = state.fit();
	let view = state.transform;
	ctx.save();
	let _ = ctx.translate(fit.x, fit.y);
	let _ = ctx.scale(fit.k, fit.k);
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);

	for group in &state.scene.groups {
		draw_group(state, ctx, theme, group);
	}

	ctx.restore();
}

fn draw_group(
	state: &TreeViewState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	group: &TreeGroup,
) {
	ctx.save();
	let _ = ctx.translate(group.origin.x, group.origin.y);
	let _ = ctx.translate(group.offset.x, group.offset.y);

	draw_links(ctx, theme, group);

	ctx.set_font(&format!("{}px sans-serif", FONT_SIZE));
	ctx.set_text_baseline("alphabetic");
	ctx.set_line_join("round");
	for mark in &group.nodes {
		let focused = state.highlight.is_focused(&mark.id);
		draw_label(ctx, theme, mark, focused);
	}

	ctx.restore();
}

fn draw_links(ctx: &CanvasRenderingContext2d, theme: &Theme, group: &TreeGroup) {
	ctx.set_stroke_style_str(theme.line.as_str());
	ctx.set_line_width(LINK_WIDTH);
	ctx.begin_path();
	for link in &group.links {
		let (c1, c2) = link.control_points();
		ctx.move_to(link.source.x, link.source.y);
		ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, link.target.x, link.target.y);
	}
	ctx.stroke();
}

/// Halo stroke in the background color beneath the fill keeps labels legible
/// where they cross links.
fn draw_label(ctx: &CanvasRenderingContext2d, theme: &Theme, mark: &NodeMark, focused: bool) {
	let Some(label) = &mark.label else {
		return;
	};
	let x = mark.position.x + label.dx;
	let y = mark.position.y + LABEL_DY_EM * FONT_SIZE;
	ctx.set_text_align(label.anchor.as_str());

	ctx.set_stroke_style_str(theme.background.as_str());
	ctx.set_line_width(HALO_WIDTH);
	let _ = ctx.stroke_text(&label.text, x, y);

	ctx.set_fill_style_str(theme.label_color(focused).as_str());
	let _ = ctx.fill_text(&label.text, x, y);
}
