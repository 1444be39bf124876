use std::error::Error;
use std::fmt;

use wasm_bindgen::JsValue;

/// Errors raised while configuring or mounting a two-way tree.
///
/// All of them are construction-time failures; once mounted the component
/// never reports errors of its own.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeError {
	/// The mount target selector was empty.
	MissingTarget,
	/// No element matched the mount target selector.
	TargetNotFound(String),
	/// No browser window or document is available.
	NoDocument,
	/// A numeric option is out of range.
	InvalidOption { name: &'static str, reason: String },
	/// A color option was blank.
	InvalidColor { name: &'static str, value: String },
	/// The options JSON could not be deserialized.
	InvalidConfig(String),
}

impl TreeError {
	pub(crate) fn invalid_option(name: &'static str, reason: impl Into<String>) -> Self {
		Self::InvalidOption {
			name,
			reason: reason.into(),
		}
	}
}

impl fmt::Display for TreeError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TreeError::MissingTarget => write!(f, "selector is required"),
			TreeError::TargetNotFound(selector) => {
				write!(f, "no element matches selector '{selector}'")
			}
			TreeError::NoDocument => write!(f, "no browser document available"),
			TreeError::InvalidOption { name, reason } => write!(f, "invalid option {name}: {reason}"),
			TreeError::InvalidColor { name, value } => {
				write!(f, "invalid color for {name}: '{value}'")
			}
			TreeError::InvalidConfig(msg) => write!(f, "invalid options JSON: {msg}"),
		}
	}
}

impl Error for TreeError {}

impl From<serde_json::Error> for TreeError {
	fn from(e: serde_json::Error) -> Self {
		TreeError::InvalidConfig(e.to_string())
	}
}

impl From<TreeError> for JsValue {
	fn from(e: TreeError) -> Self {
		js_sys::Error::new(&e.to_string()).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_problem() {
		assert_eq!(TreeError::MissingTarget.to_string(), "selector is required");
		assert_eq!(
			TreeError::invalid_option("treeBasedx", "must be positive").to_string(),
			"invalid option treeBasedx: must be positive"
		);
		assert_eq!(
			TreeError::InvalidColor {
				name: "lineColor",
				value: "#ggg".into()
			}
			.to_string(),
			"invalid color for lineColor: '#ggg'"
		);
	}

	#[test]
	fn json_errors_become_config_errors() {
		let err: TreeError = serde_json::from_str::<u32>("nope").unwrap_err().into();
		assert!(matches!(err, TreeError::InvalidConfig(_)));
	}
}
