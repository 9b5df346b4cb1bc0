//! Replaces a `<pre>` of DOT source with the SVG viz.js renders from it.

mod dom;
pub mod enhancer;
mod types;
mod viz;

pub use dom::WebPage;
pub use enhancer::{Page, PageEnhancer, Renderer, RendererLoader};
pub use types::{GraphSource, Outcome, RenderResult};
pub use viz::{VizLoader, VizRenderer, load_script};

/// The enhancer wired to the live document and viz.js.
pub type WebEnhancer = PageEnhancer<WebPage, VizLoader>;
