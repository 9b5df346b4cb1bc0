//! Error type shared by the enhancer and its browser backends.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Everything that can go wrong while enhancing the page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnhanceError {
	/// The document could not be reached or mutated.
	#[error("dom: {0}")]
	Dom(String),
	/// The rendering library script failed to load.
	#[error("failed to load rendering library from {url}: {reason}")]
	LibraryLoad {
		/// Script address that was injected.
		url: String,
		/// What the browser reported.
		reason: String,
	},
	/// The rendering library loaded but could not be instantiated.
	#[error("rendering library not available: {0}")]
	RendererConstruction(String),
	/// The renderer rejected the graph source.
	#[error("graph rendering failed: {0}")]
	Render(String),
	/// The enhancer configuration could not be parsed.
	#[error("invalid enhancer config: {0}")]
	Config(String),
}

/// Best-effort human readable text for a thrown JS value.
pub fn describe_js_error(value: &JsValue) -> String {
	if let Some(err) = value.dyn_ref::<js_sys::Error>() {
		return String::from(err.message());
	}
	value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
