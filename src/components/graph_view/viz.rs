use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlScriptElement};

use super::enhancer::{Renderer, RendererLoader};
use super::types::{GraphSource, RenderResult};
use crate::error::{EnhanceError, describe_js_error};

#[wasm_bindgen]
extern "C" {
	/// The global `Viz` class installed by the viz.js script.
	pub type Viz;

	#[wasm_bindgen(constructor, catch)]
	fn new() -> Result<Viz, JsValue>;

	#[wasm_bindgen(method, catch, js_name = renderSVGElement)]
	fn render_svg_element(this: &Viz, src: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Inject `<script src=url>` and resolve once it has loaded.
pub async fn load_script(document: &Document, url: &str) -> Result<(), EnhanceError> {
	let load_error = |reason: String| EnhanceError::LibraryLoad {
		url: url.to_string(),
		reason,
	};

	let script: HtmlScriptElement = document
		.create_element("script")
		.map_err(|e| load_error(describe_js_error(&e)))?
		.dyn_into()
		.map_err(|_| load_error("script element cast failed".into()))?;
	script.set_src(url);

	let promise = js_sys::Promise::new(&mut |resolve, reject| {
		let onload = Closure::once_into_js(move || {
			let _ = resolve.call0(&JsValue::UNDEFINED);
		});
		let onerror = Closure::once_into_js(move |_ev: web_sys::Event| {
			let _ = reject.call1(&JsValue::UNDEFINED, &JsValue::from_str("script error"));
		});
		script.set_onload(Some(onload.unchecked_ref()));
		script.set_onerror(Some(onerror.unchecked_ref()));
	});

	let body = document
		.body()
		.ok_or_else(|| load_error("document has no body".into()))?;
	body.append_child(&script)
		.map_err(|e| load_error(describe_js_error(&e)))?;

	JsFuture::from(promise)
		.await
		.map_err(|e| load_error(describe_js_error(&e)))?;
	debug!("loaded {url}");
	Ok(())
}

/// Fetches viz.js into the page and builds a [`VizRenderer`].
pub struct VizLoader {
	document: Document,
	url: String,
}

impl VizLoader {
	/// Loader for the script at `url`, injected into `document`.
	pub fn new(document: Document, url: impl Into<String>) -> Self {
		Self {
			document,
			url: url.into(),
		}
	}
}

impl RendererLoader for VizLoader {
	type Renderer = VizRenderer;

	async fn load(&self) -> Result<VizRenderer, EnhanceError> {
		load_script(&self.document, &self.url).await?;
		let viz =
			Viz::new().map_err(|e| EnhanceError::RendererConstruction(describe_js_error(&e)))?;
		Ok(VizRenderer { viz })
	}
}

/// Renders DOT to an SVG element through viz.js.
pub struct VizRenderer {
	viz: Viz,
}

impl Renderer for VizRenderer {
	type Graphic = Element;

	async fn render(&self, source: &GraphSource) -> RenderResult<Element> {
		let promise = self
			.viz
			.render_svg_element(source.as_str())
			.map_err(|e| EnhanceError::RendererConstruction(describe_js_error(&e)))?;
		let value = JsFuture::from(promise)
			.await
			.map_err(|e| EnhanceError::Render(describe_js_error(&e)))?;
		value
			.dyn_into::<Element>()
			.map_err(|_| EnhanceError::Render("renderer did not return an element".into()))
	}
}
