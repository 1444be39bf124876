//! Tree data structures for input to the two-way tree component.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

/// A node in one of the two subtrees.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NodeSpec {
	/// Display name. Doubles as the node identifier for hover lookup, so it
	/// should be unique across both subtrees.
	pub name: String,
	/// Ordered children. Absent or `null` in JSON means a leaf.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub children: Vec<NodeSpec>,
}

impl NodeSpec {
	/// A node without children.
	pub fn leaf(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			children: Vec::new(),
		}
	}

	/// A node with the given ordered children.
	pub fn with_children(name: impl Into<String>, children: Vec<NodeSpec>) -> Self {
		Self {
			name: name.into(),
			children,
		}
	}

	pub fn is_leaf(&self) -> bool {
		self.children.is_empty()
	}
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<NodeSpec>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<Vec<NodeSpec>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Complete input: a root name plus the children hanging off each side.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeSpec {
	pub name: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub left_children: Vec<NodeSpec>,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub right_children: Vec<NodeSpec>,
}

impl TreeSpec {
	/// A root with no children on either side.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			left_children: Vec::new(),
			right_children: Vec::new(),
		}
	}

	pub fn with_left(mut self, children: Vec<NodeSpec>) -> Self {
		self.left_children = children;
		self
	}

	pub fn with_right(mut self, children: Vec<NodeSpec>) -> Self {
		self.right_children = children;
		self
	}

	/// Names that occur more than once across both sides, in first-seen order.
	/// The root name is counted once even though both subtrees share it.
	pub fn duplicate_names(&self) -> Vec<String> {
		let mut seen: HashSet<&str> = HashSet::new();
		let mut reported: HashSet<&str> = HashSet::new();
		let mut duplicates = Vec::new();
		seen.insert(&self.name);

		let mut stack: Vec<&NodeSpec> = self
			.right_children
			.iter()
			.rev()
			.chain(self.left_children.iter().rev())
			.collect();
		while let Some(node) = stack.pop() {
			if !seen.insert(&node.name) && reported.insert(&node.name) {
				duplicates.push(node.name.clone());
			}
			stack.extend(node.children.iter().rev());
		}
		duplicates
	}
}

/// Which side of the shared root a subtree is drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
	/// Mirrored subtree extending away from the right one.
	Left,
	/// Subtree drawn in direct layout coordinates.
	Right,
	/// Root-only placeholder used when neither side has children.
	Root,
}

impl Side {
	pub fn as_str(self) -> &'static str {
		match self {
			Side::Left => "left",
			Side::Right => "right",
			Side::Root => "root",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deserializes_camel_case_with_missing_children() {
		let json = r#"{
			"name": "root",
			"leftChildren": [{ "name": "a", "children": [{ "name": "a1" }] }]
		}"#;
		let spec: TreeSpec = serde_json::from_str(json).unwrap();

		assert_eq!(spec.name, "root");
		assert!(spec.right_children.is_empty());
		assert_eq!(spec.left_children[0].children[0], NodeSpec::leaf("a1"));
		assert!(spec.left_children[0].children[0].is_leaf());
	}

	#[test]
	fn null_children_deserialize_as_leaves() {
		let json = r#"{
			"name": "root",
			"leftChildren": [{ "name": "a", "children": null }],
			"rightChildren": null
		}"#;
		let spec: TreeSpec = serde_json::from_str(json).unwrap();

		assert_eq!(spec.left_children, vec![NodeSpec::leaf("a")]);
		assert!(spec.right_children.is_empty());
	}

	#[test]
	fn reports_each_duplicate_once() {
		let spec = TreeSpec::new("root")
			.with_left(vec![
				NodeSpec::with_children("a", vec![NodeSpec::leaf("x")]),
				NodeSpec::leaf("x"),
			])
			.with_right(vec![NodeSpec::leaf("x"), NodeSpec::leaf("root")]);

		assert_eq!(spec.duplicate_names(), vec!["x".to_string(), "root".to_string()]);
	}

	#[test]
	fn unique_names_have_no_duplicates() {
		let spec = TreeSpec::new("root")
			.with_left(vec![NodeSpec::leaf("a")])
			.with_right(vec![NodeSpec::leaf("b")]);
		assert!(spec.duplicate_names().is_empty());
	}
}
