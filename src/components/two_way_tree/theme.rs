//! Colors for the two-way tree.
//!
//! Four colors cover the whole drawing: links, background, node labels and
//! the focus color applied to hovered labels. Option values are CSS color
//! strings; the canvas and SVG both take any CSS color, so unrecognized
//! values pass through untouched.

use std::fmt;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RGB`, `#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
			return match hex.len() {
				3 => Some(Color::rgb(
					channel(0, 1)? * 17,
					channel(1, 1)? * 17,
					channel(2, 1)? * 17,
				)),
				6 => Some(Color::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
				_ => None,
			};
		}

		let inner = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let nums: Vec<&str> = inner.split(',').map(str::trim).collect();
		let (r, g, b) = match nums.as_slice() {
			[r, g, b] | [r, g, b, _] => (r.parse().ok()?, g.parse().ok()?, b.parse().ok()?),
			_ => return None,
		};
		let a = match nums.get(3) {
			Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
			None => 1.0,
		};
		Some(Color::rgba(r, g, b, a))
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A CSS color value as handed to the canvas or written into SVG.
///
/// Hex and `rgb()`/`rgba()` values are normalized through [`Color`]; named
/// colors, `hsl()` and the rest are kept verbatim for the browser to resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct CssColor(String);

impl CssColor {
	/// `None` only for a blank value.
	pub fn new(value: &str) -> Option<Self> {
		let value = value.trim();
		if value.is_empty() {
			return None;
		}
		Some(match Color::parse(value) {
			Some(color) => color.into(),
			None => Self(value.to_owned()),
		})
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<Color> for CssColor {
	fn from(color: Color) -> Self {
		Self(color.to_css())
	}
}

impl fmt::Display for CssColor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Link stroke color.
	pub line: CssColor,
	/// Canvas background, also used for the label halo.
	pub background: CssColor,
	/// Label fill color.
	pub node: CssColor,
	/// Label fill color while its node is hovered.
	pub focus: CssColor,
}

impl Theme {
	/// Fill for a label, depending on whether its node is hovered.
	pub fn label_color(&self, focused: bool) -> &CssColor {
		if focused { &self.focus } else { &self.node }
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			line: Color::rgb(255, 255, 255).into(),
			background: Color::rgb(56, 89, 140).into(),
			node: Color::rgb(249, 161, 27).into(),
			focus: Color::rgb(255, 95, 46).into(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_forms() {
		assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(Color::parse("#38598c"), Some(Color::rgb(56, 89, 140)));
		assert_eq!(Color::parse("#38598"), None);
		assert_eq!(Color::parse("#zzzzzz"), None);
	}

	#[test]
	fn parses_functional_forms() {
		assert_eq!(Color::parse("rgb(1, 2, 3)"), Some(Color::rgb(1, 2, 3)));
		assert_eq!(
			Color::parse("rgba(1,2,3,0.5)"),
			Some(Color::rgba(1, 2, 3, 0.5))
		);
		assert_eq!(Color::parse("rgb(1, 2)"), None);
		assert_eq!(Color::parse("orange"), None);
	}

	#[test]
	fn css_round_trip_for_opaque_colors() {
		let c = Color::rgb(249, 161, 27);
		assert_eq!(c.to_css(), "#f9a11b");
		assert_eq!(Color::rgba(0, 0, 0, 0.25).to_css(), "rgba(0, 0, 0, 0.25)");
	}

	#[test]
	fn focus_only_when_hovered() {
		let theme = Theme::default();
		assert_eq!(theme.label_color(false), &theme.node);
		assert_eq!(theme.label_color(true).as_str(), "#ff5f2e");
	}

	#[test]
	fn css_colors_normalize_known_forms_and_keep_the_rest() {
		assert_eq!(CssColor::new("#FFF").unwrap().as_str(), "#ffffff");
		assert_eq!(CssColor::new("rgb(0, 0, 0)").unwrap().as_str(), "#000000");
		assert_eq!(CssColor::new(" white ").unwrap().as_str(), "white");
		assert_eq!(CssColor::new("hsl(200, 50%, 40%)").unwrap().as_str(), "hsl(200, 50%, 40%)");
		assert_eq!(CssColor::new("#11223344").unwrap().as_str(), "#11223344");
		assert_eq!(CssColor::new("  "), None);
	}
}
