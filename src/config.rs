//! Enhancer settings. Defaults reproduce the stock call-graph page.

use serde::{Deserialize, Serialize};

use crate::error::EnhanceError;

/// Pinned Viz.js build; the version lives in the address.
pub const DEFAULT_LIBRARY_URL: &str = "https://cdn.jsdelivr.net/npm/viz.js@2.1.2/viz.js";

/// Inline style applied to the rendered graphic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
	/// CSS `width`.
	pub width: String,
	/// CSS `margin`.
	pub margin: String,
	/// CSS `display`.
	pub display: String,
}

impl Default for Presentation {
	fn default() -> Self {
		Self {
			width: "90%".into(),
			margin: "20px auto".into(),
			display: "block".into(),
		}
	}
}

impl Presentation {
	/// Property/value pairs in the order they are applied.
	pub fn properties(&self) -> [(&'static str, &str); 3] {
		[
			("width", self.width.as_str()),
			("margin", self.margin.as_str()),
			("display", self.display.as_str()),
		]
	}
}

/// Where to find the source, where to put the output and how to fetch the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
	/// CSS selector of the element holding the DOT text. First match wins.
	pub source_selector: String,
	/// `id` given to the output container.
	pub container_id: String,
	/// Script address of the rendering library.
	pub library_url: String,
	/// Text shown in place of the graph when rendering fails.
	pub error_message: String,
	/// Style applied to the rendered graphic.
	pub presentation: Presentation,
}

impl Default for EnhancerConfig {
	fn default() -> Self {
		Self {
			source_selector: "pre".into(),
			container_id: "graph-container".into(),
			library_url: DEFAULT_LIBRARY_URL.into(),
			error_message: "Graph rendering failed".into(),
			presentation: Presentation::default(),
		}
	}
}

impl EnhancerConfig {
	/// Parse a JSON object; absent keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, EnhanceError> {
		serde_json::from_str(json).map_err(|e| EnhanceError::Config(e.to_string()))
	}
}
