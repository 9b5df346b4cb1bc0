use crate::error::EnhanceError;

/// DOT text read from the page. Passed to the renderer untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphSource(String);

impl GraphSource {
	/// Wrap text exactly as it was read.
	pub fn new(text: impl Into<String>) -> Self {
		Self(text.into())
	}

	/// The raw text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// What a renderer hands back for one source.
pub type RenderResult<G> = Result<G, EnhanceError>;

/// What a single `enhance` call ended up doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
	/// A previous call already ran; nothing was touched.
	AlreadyStarted,
	/// No element matched the source selector.
	NoSource,
	/// The document could not be queried or mutated.
	PageUnavailable,
	/// The library failed to load or construct. Source hidden, container empty.
	RendererUnavailable,
	/// The renderer rejected the source. Container shows the error message.
	RenderFailed,
	/// The graphic is in the container.
	Rendered,
}
