use leptos::prelude::*;
use log::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement};

use super::enhancer::Page;
use crate::config::Presentation;
use crate::error::{EnhanceError, describe_js_error};

/// The live browser document.
#[derive(Clone, Debug)]
pub struct WebPage {
	document: Document,
}

impl WebPage {
	/// Wrap the document of the current window.
	pub fn from_window() -> Result<Self, EnhanceError> {
		let document = web_sys::window()
			.ok_or_else(|| EnhanceError::Dom("no window".into()))?
			.document()
			.ok_or_else(|| EnhanceError::Dom("no document".into()))?;
		Ok(Self { document })
	}

	/// Wrap an explicit document.
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// The wrapped document.
	pub fn document(&self) -> &Document {
		&self.document
	}

	fn body(&self) -> Result<HtmlElement, EnhanceError> {
		self.document
			.body()
			.ok_or_else(|| EnhanceError::Dom("document has no body".into()))
	}
}

fn dom_error(what: &str, value: JsValue) -> EnhanceError {
	EnhanceError::Dom(format!("{what}: {}", describe_js_error(&value)))
}

/// Inline style of an HTML or SVG element.
fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
	if let Some(svg) = element.dyn_ref::<SvgElement>() {
		return Some(svg.style());
	}
	element.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

#[component]
fn RenderError(message: String) -> impl IntoView {
	view! { <p class="graph-error" style="color: red">{message}</p> }
}

impl Page for WebPage {
	type Element = Element;
	type Container = HtmlElement;
	type Graphic = Element;

	fn find_source(&self, selector: &str) -> Result<Option<Element>, EnhanceError> {
		self.document
			.query_selector(selector)
			.map_err(|e| dom_error("query_selector", e))
	}

	fn source_text(&self, element: &Element) -> String {
		element.text_content().unwrap_or_default()
	}

	fn hide(&self, element: &Element) -> Result<(), EnhanceError> {
		let style = inline_style(element)
			.ok_or_else(|| EnhanceError::Dom("source element has no inline style".into()))?;
		style
			.set_property("display", "none")
			.map_err(|e| dom_error("hide source", e))
	}

	fn create_container(&self, id: &str) -> Result<HtmlElement, EnhanceError> {
		let container: HtmlElement = self
			.document
			.create_element("div")
			.map_err(|e| dom_error("create container", e))?
			.dyn_into()
			.map_err(|_| EnhanceError::Dom("container is not an HtmlElement".into()))?;
		container.set_id(id);
		self.body()?
			.append_child(&container)
			.map_err(|e| dom_error("attach container", e))?;
		Ok(container)
	}

	fn attach_graphic(
		&self,
		container: &HtmlElement,
		graphic: Element,
		presentation: &Presentation,
	) -> Result<(), EnhanceError> {
		container
			.append_child(&graphic)
			.map_err(|e| dom_error("append graphic", e))?;
		let style = inline_style(&graphic)
			.ok_or_else(|| EnhanceError::Dom("rendered graphic has no inline style".into()))?;
		for (property, value) in presentation.properties() {
			style
				.set_property(property, value)
				.map_err(|e| dom_error("style graphic", e))?;
		}
		Ok(())
	}

	fn show_error(&self, container: &HtmlElement, message: &str) -> Result<(), EnhanceError> {
		container.set_inner_html("");
		let message = message.to_string();
		leptos::mount::mount_to(container.clone(), move || view! { <RenderError message=message /> })
			.forget();
		Ok(())
	}

	fn diagnostic(&self, error: &EnhanceError) {
		error!("{error}");
	}
}
