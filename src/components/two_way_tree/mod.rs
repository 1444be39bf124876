//! Two-way tree visualization component.
//!
//! Draws one root with two independently laid-out subtrees branching from a
//! shared vertical axis, on an HTML canvas with:
//! - Tidy-tree layout per subtree, the left one mirrored along depth
//! - A shared breadth baseline taken from the larger subtree
//! - Pan and zoom, hover highlight and a node click callback
//! - SVG export of the same drawing
//!
//! # Example
//!
//! ```ignore
//! use two_way_tree::{NodeSpec, RenderOptions, TreeSpec, TwoWayTreeCanvas};
//!
//! let spec = TreeSpec::new("root")
//!     .with_left(vec![NodeSpec::leaf("a")])
//!     .with_right(vec![NodeSpec::leaf("b")]);
//! let options = RenderOptions::builder(spec)
//!     .on_node_click(|node| log::info!("clicked {}", node.name))
//!     .build()?;
//!
//! view! { <TwoWayTreeCanvas options=options /> }
//! ```

pub mod builder;
mod component;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod options;
mod render;
pub mod scene;
pub mod state;
pub mod svg;
pub mod theme;
mod types;
pub mod zoom;

pub use builder::{Baseline, TwoWayTrees};
pub use component::TwoWayTreeCanvas;
pub use error::TreeError;
pub use hierarchy::{LayoutNode, LayoutTree, NodeId};
pub use layout::TreeLayout;
pub use options::{Margins, OptionsConfig, RenderOptions, RenderOptionsBuilder, ViewBox};
pub use scene::Scene;
pub use state::TreeViewState;
pub use svg::render_svg;
pub use theme::{Color, CssColor, Theme};
pub use types::{NodeSpec, Side, TreeSpec};
