//! SVG export of a scene.
//!
//! Produces the same drawing as the canvas renderer as a standalone SVG
//! document: a background rect, then one `node-tree` group per subtree
//! holding a link group and a node group. Each node is a `<g>` whose `id` is
//! the node name, containing a halo `<text>` and a fill `<text>`.

use std::fmt::{self, Write};

use super::scene::{FONT_SIZE, HALO_WIDTH, LABEL_DY_EM, LINK_WIDTH, Scene, TreeGroup};
use super::theme::Theme;
use super::zoom::ZoomTransform;

/// Serialize `scene` under the view transform `view`. Labels whose id equals
/// `hovered` use the focus color.
pub fn render_svg(
	scene: &Scene,
	theme: &Theme,
	view: &ZoomTransform,
	hovered: Option<&str>,
) -> Result<String, fmt::Error> {
	let vb = &scene.view_box;
	let mut svg = String::new();
	writeln!(
		svg,
		r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
		scene.width, scene.height, vb.min_x, vb.min_y, vb.width, vb.height
	)?;
	writeln!(
		svg,
		r#"  <rect class="background" x="{}" y="{}" width="{}" height="{}" fill="{}" />"#,
		vb.min_x,
		vb.min_y,
		vb.width,
		vb.height,
		escape_xml(theme.background.as_str())
	)?;

	for group in &scene.groups {
		write_group(&mut svg, group, theme, view, hovered)?;
	}

	svg.push_str("</svg>\n");
	Ok(svg)
}

fn write_group(
	svg: &mut String,
	group: &TreeGroup,
	theme: &Theme,
	view: &ZoomTransform,
	hovered: Option<&str>,
) -> fmt::Result {
	writeln!(
		svg,
		r#"  <g class="node-tree" data-side="{}" transform="{} translate({},{})">"#,
		group.side.as_str(),
		view.to_svg(),
		group.origin.x,
		group.origin.y
	)?;
	writeln!(
		svg,
		r#"    <g font-size="{}" transform="translate({},{})">"#,
		FONT_SIZE, group.offset.x, group.offset.y
	)?;

	writeln!(
		svg,
		r#"      <g fill="none" stroke="{}" stroke-width="{}">"#,
		escape_xml(theme.line.as_str()),
		LINK_WIDTH
	)?;
	for link in &group.links {
		writeln!(svg, r#"        <path d="{}" />"#, link.to_path_data())?;
	}
	svg.push_str("      </g>\n");

	writeln!(
		svg,
		r#"      <g stroke-linejoin="round" stroke-width="{}">"#,
		HALO_WIDTH
	)?;
	for mark in &group.nodes {
		writeln!(
			svg,
			r#"        <g id="{}" transform="translate({},{})">"#,
			escape_xml(&mark.id),
			mark.position.x,
			mark.position.y
		)?;
		if let Some(label) = &mark.label {
			let fill = theme.label_color(hovered == Some(mark.id.as_str()));
			let text = escape_xml(&label.text);
			writeln!(
				svg,
				r#"          <text dy="{LABEL_DY_EM}em" x="{}" text-anchor="{}" fill="none" stroke="{}">{}</text>"#,
				label.dx,
				label.anchor.as_str(),
				escape_xml(theme.background.as_str()),
				text
			)?;
			writeln!(
				svg,
				r#"          <text cursor="pointer" dy="{LABEL_DY_EM}em" x="{}" text-anchor="{}" fill="{}">{}</text>"#,
				label.dx,
				label.anchor.as_str(),
				escape_xml(fill.as_str()),
				text
			)?;
		}
		svg.push_str("        </g>\n");
	}
	svg.push_str("      </g>\n");

	svg.push_str("    </g>\n  </g>\n");
	Ok(())
}

fn escape_xml(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	for ch in s.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&apos;"),
			_ => out.push(ch),
		}
	}
	out
}
