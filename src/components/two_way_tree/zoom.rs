//! Pan and zoom.
//!
//! # Coordinate Spaces
//!
//! - **Screen-space**: canvas pixels, origin at the canvas top-left.
//! - **View-space**: view box user units. The view box is fitted into the
//!   canvas ("meet", centered), see [`ZoomTransform::fit`].
//! - **Stage-space**: what the subtree groups are drawn in. The zoom
//!   transform maps stage-space to view-space.
//!
//! Zooming and panning only ever replace the [`ZoomTransform`]; layout is
//! never recomputed.

use super::options::ViewBox;
use super::scene::Point;

/// Allowed zoom factor range.
pub const SCALE_EXTENT: (f64, f64) = (0.5, 8.0);

/// Uniform scale followed by translation: `p' = p * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ZoomTransform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl ZoomTransform {
	pub const IDENTITY: ZoomTransform = ZoomTransform {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};

	/// The transform fitting `view_box` into a `width` x `height` canvas,
	/// preserving aspect ratio and centering the slack.
	pub fn fit(view_box: &ViewBox, width: f64, height: f64) -> Self {
		let k = (width / view_box.width).min(height / view_box.height);
		Self {
			x: (width - view_box.width * k) / 2.0 - view_box.min_x * k,
			y: (height - view_box.height * k) / 2.0 - view_box.min_y * k,
			k,
		}
	}

	pub fn apply(&self, p: Point) -> Point {
		Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	pub fn invert(&self, p: Point) -> Point {
		Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	/// Translate in the transform's own (pre-scale) units.
	pub fn translate(&self, dx: f64, dy: f64) -> Self {
		Self {
			x: self.x + self.k * dx,
			y: self.y + self.k * dy,
			k: self.k,
		}
	}

	/// CSS/SVG transform list for this transform.
	pub fn to_svg(&self) -> String {
		format!("translate({},{}) scale({})", self.x, self.y, self.k)
	}
}

/// Wheel delta to zoom exponent, matching the browser wheel conventions:
/// pixel mode scrolls slowly, line mode faster, page mode a full step.
pub fn wheel_delta(delta_y: f64, delta_mode: u32, ctrl: bool) -> f64 {
	let unit = match delta_mode {
		0 => 0.002,
		1 => 0.05,
		_ => 1.0,
	};
	-delta_y * unit * if ctrl { 10.0 } else { 1.0 }
}

/// Zoom constraints for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomBehavior {
	pub scale_extent: (f64, f64),
	/// Visible view-space rectangle.
	pub extent: ViewBox,
	/// Stage-space rectangle the view must stay within.
	pub translate_extent: ViewBox,
}

impl ZoomBehavior {
	/// Bounded to the visible extent itself.
	pub fn new(extent: ViewBox) -> Self {
		Self {
			scale_extent: SCALE_EXTENT,
			extent,
			translate_extent: extent,
		}
	}

	/// Scale by `factor` keeping `pointer` (view-space) fixed.
	pub fn scale_by(&self, t: ZoomTransform, factor: f64, pointer: Point) -> ZoomTransform {
		let k = (t.k * factor).clamp(self.scale_extent.0, self.scale_extent.1);
		let anchor = t.invert(pointer);
		self.constrain(ZoomTransform {
			x: pointer.x - anchor.x * k,
			y: pointer.y - anchor.y * k,
			k,
		})
	}

	/// Move by a view-space delta.
	pub fn pan_by(&self, t: ZoomTransform, dx: f64, dy: f64) -> ZoomTransform {
		self.constrain(ZoomTransform {
			x: t.x + dx,
			y: t.y + dy,
			k: t.k,
		})
	}

	/// Shift `t` so the visible extent stays inside the translate extent; if
	/// the view is larger than the translate extent, center it.
	pub fn constrain(&self, t: ZoomTransform) -> ZoomTransform {
		let view_min = t.invert(Point::new(self.extent.min_x, self.extent.min_y));
		let view_max = t.invert(Point::new(self.extent.max_x(), self.extent.max_y()));
		let dx0 = view_min.x - self.translate_extent.min_x;
		let dx1 = view_max.x - self.translate_extent.max_x();
		let dy0 = view_min.y - self.translate_extent.min_y;
		let dy1 = view_max.y - self.translate_extent.max_y();
		t.translate(settle(dx0, dx1), settle(dy0, dy1))
	}
}

fn settle(d0: f64, d1: f64) -> f64 {
	if d1 > d0 {
		(d0 + d1) / 2.0
	} else if d0 < 0.0 {
		d0
	} else {
		d1.max(0.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn behavior() -> ZoomBehavior {
		ZoomBehavior::new(ViewBox::centered(1000.0, 500.0))
	}

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn fit_centers_the_view_box() {
		let vb = ViewBox::centered(1000.0, 500.0);
		let t = ZoomTransform::fit(&vb, 1000.0, 500.0);
		assert!(close(t.apply(Point::new(0.0, 0.0)), Point::new(500.0, 250.0)));

		// Wider canvas: height limits, horizontal slack split evenly.
		let t = ZoomTransform::fit(&vb, 2000.0, 500.0);
		assert_eq!(t.k, 1.0);
		assert!(close(t.apply(Point::new(-500.0, -250.0)), Point::new(500.0, 0.0)));
		assert!(close(t.invert(Point::new(1000.0, 250.0)), Point::new(0.0, 0.0)));
	}

	#[test]
	fn scale_is_clamped() {
		let z = behavior();
		let t = z.scale_by(ZoomTransform::IDENTITY, 100.0, Point::new(0.0, 0.0));
		assert_eq!(t.k, 8.0);
		let t = z.scale_by(ZoomTransform::IDENTITY, 0.01, Point::new(0.0, 0.0));
		assert_eq!(t.k, 0.5);
	}

	#[test]
	fn zoom_keeps_pointer_fixed() {
		let z = behavior();
		let pointer = Point::new(100.0, -50.0);
		let before = ZoomTransform::IDENTITY.invert(pointer);
		let t = z.scale_by(ZoomTransform::IDENTITY, 2.0, pointer);
		assert!(close(t.invert(pointer), before));
	}

	#[test]
	fn pan_cannot_leave_the_canvas_at_unit_scale() {
		let z = behavior();
		let t = z.pan_by(ZoomTransform::IDENTITY, 40.0, -30.0);
		assert_eq!(t, ZoomTransform::IDENTITY);
	}

	#[test]
	fn pan_is_bounded_when_zoomed_in() {
		let z = behavior();
		let t = z.scale_by(ZoomTransform::IDENTITY, 2.0, Point::new(0.0, 0.0));
		let moved = z.pan_by(t, 100.0, 0.0);
		assert_eq!(moved.x, 100.0);

		// Far past the left edge: the stage's left edge pins to the view's.
		let pinned = z.pan_by(t, 10_000.0, 0.0);
		let stage_left = pinned.invert(Point::new(-500.0, 0.0));
		assert!((stage_left.x - -500.0).abs() < 1e-9);
	}

	#[test]
	fn zoomed_out_view_is_centered() {
		let z = behavior();
		let t = z.scale_by(ZoomTransform::IDENTITY, 0.5, Point::new(300.0, 100.0));
		assert!(close(t.apply(Point::new(0.0, 0.0)), Point::new(0.0, 0.0)));
	}

	#[test]
	fn wheel_units() {
		assert!((wheel_delta(100.0, 0, false) - -0.2).abs() < 1e-12);
		assert!((wheel_delta(-3.0, 1, false) - 0.15).abs() < 1e-12);
		assert!((wheel_delta(1.0, 2, true) - -10.0).abs() < 1e-12);
	}
}
