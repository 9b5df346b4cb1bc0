//! The page enhancement flow, independent of the browser.
//!
//! `PageEnhancer` drives a [`Page`] and a [`RendererLoader`] through a single
//! forward path: locate the source, hide it, add an empty container, acquire
//! the renderer, render, then either attach the graphic or show the error.
//! Every failure is reported once through [`Page::diagnostic`] and ends the
//! flow; none of them escape.

use std::cell::Cell;

use log::{debug, info};

use super::types::{GraphSource, Outcome, RenderResult};
use crate::config::{EnhancerConfig, Presentation};
use crate::error::EnhanceError;

/// Turns graph source into a graphic.
#[allow(async_fn_in_trait)]
pub trait Renderer {
	/// Rendered output, e.g. an SVG element.
	type Graphic;

	/// Render one source. The text is not inspected beforehand.
	///
	/// [`EnhanceError::RendererConstruction`] means the library could not be
	/// invoked at all; any other error is a rejection of the source.
	async fn render(&self, source: &GraphSource) -> RenderResult<Self::Graphic>;
}

/// Acquires and constructs a [`Renderer`].
#[allow(async_fn_in_trait)]
pub trait RendererLoader {
	/// The renderer produced on success.
	type Renderer: Renderer;

	/// Fetch the library if needed and build a renderer from it.
	async fn load(&self) -> Result<Self::Renderer, EnhanceError>;
}

/// The document the enhancer reads from and writes to.
pub trait Page {
	/// Handle to the source element.
	type Element;
	/// Handle to the output container.
	type Container;
	/// What can be attached into a container.
	type Graphic;

	/// First element matching `selector`, if any.
	fn find_source(&self, selector: &str) -> Result<Option<Self::Element>, EnhanceError>;
	/// Text content of the source element.
	fn source_text(&self, element: &Self::Element) -> String;
	/// Suppress display of the element without removing it.
	fn hide(&self, element: &Self::Element) -> Result<(), EnhanceError>;
	/// Create an empty container with `id` and attach it to the page.
	fn create_container(&self, id: &str) -> Result<Self::Container, EnhanceError>;
	/// Append `graphic` to the container and style it.
	fn attach_graphic(
		&self,
		container: &Self::Container,
		graphic: Self::Graphic,
		presentation: &Presentation,
	) -> Result<(), EnhanceError>;
	/// Replace the container's contents with a visible error message.
	fn show_error(&self, container: &Self::Container, message: &str) -> Result<(), EnhanceError>;
	/// Developer-facing log channel.
	fn diagnostic(&self, error: &EnhanceError);
}

/// Runs the enhancement at most once.
pub struct PageEnhancer<P, L> {
	page: P,
	loader: L,
	config: EnhancerConfig,
	started: Cell<bool>,
}

impl<P, L> PageEnhancer<P, L>
where
	P: Page,
	L: RendererLoader,
	L::Renderer: Renderer<Graphic = P::Graphic>,
{
	/// Build an enhancer; nothing touches the page until [`Self::enhance`].
	pub fn new(page: P, loader: L, config: EnhancerConfig) -> Self {
		Self {
			page,
			loader,
			config,
			started: Cell::new(false),
		}
	}

	/// The page this enhancer mutates.
	pub fn page(&self) -> &P {
		&self.page
	}

	/// The active configuration.
	pub fn config(&self) -> &EnhancerConfig {
		&self.config
	}

	/// Run the flow. Calls after the first return [`Outcome::AlreadyStarted`].
	pub async fn enhance(&self) -> Outcome {
		if self.started.replace(true) {
			debug!("graph enhancement already started, ignoring");
			return Outcome::AlreadyStarted;
		}
		let outcome = self.run().await;
		info!("graph enhancement finished: {outcome:?}");
		outcome
	}

	async fn run(&self) -> Outcome {
		let element = match self.page.find_source(&self.config.source_selector) {
			Ok(Some(element)) => element,
			Ok(None) => {
				debug!("no element matches {:?}", self.config.source_selector);
				return Outcome::NoSource;
			}
			Err(err) => return self.fail(Outcome::PageUnavailable, &err),
		};

		let source = GraphSource::new(self.page.source_text(&element));
		if let Err(err) = self.page.hide(&element) {
			return self.fail(Outcome::PageUnavailable, &err);
		}
		let container = match self.page.create_container(&self.config.container_id) {
			Ok(container) => container,
			Err(err) => return self.fail(Outcome::PageUnavailable, &err),
		};

		let renderer = match self.loader.load().await {
			Ok(renderer) => renderer,
			Err(err) => return self.fail(Outcome::RendererUnavailable, &err),
		};
		debug!("renderer ready, rendering {} bytes of source", source.as_str().len());

		match renderer.render(&source).await {
			Ok(graphic) => {
				match self
					.page
					.attach_graphic(&container, graphic, &self.config.presentation)
				{
					Ok(()) => Outcome::Rendered,
					Err(err) => self.fail(Outcome::PageUnavailable, &err),
				}
			}
			Err(err @ EnhanceError::RendererConstruction(_)) => {
				self.fail(Outcome::RendererUnavailable, &err)
			}
			Err(err) => {
				if let Err(dom_err) = self.page.show_error(&container, &self.config.error_message) {
					self.page.diagnostic(&dom_err);
				}
				self.fail(Outcome::RenderFailed, &err)
			}
		}
	}

	fn fail(&self, outcome: Outcome, err: &EnhanceError) -> Outcome {
		self.page.diagnostic(err);
		outcome
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[derive(Debug, Default)]
	struct FakeContainer {
		id: String,
		graphics: Vec<(String, Presentation)>,
		error: Option<String>,
	}

	#[derive(Default)]
	struct FakePage {
		source: Option<String>,
		bad_selector: bool,
		hidden: Cell<bool>,
		containers: RefCell<Vec<FakeContainer>>,
		diagnostics: RefCell<Vec<String>>,
	}

	impl FakePage {
		fn with_source(text: &str) -> Self {
			Self {
				source: Some(text.into()),
				..Self::default()
			}
		}
	}

	impl Page for FakePage {
		type Element = ();
		type Container = usize;
		type Graphic = String;

		fn find_source(&self, _selector: &str) -> Result<Option<()>, EnhanceError> {
			if self.bad_selector {
				return Err(EnhanceError::Dom("invalid selector".into()));
			}
			Ok(self.source.as_ref().map(|_| ()))
		}

		fn source_text(&self, _element: &()) -> String {
			self.source.clone().unwrap_or_default()
		}

		fn hide(&self, _element: &()) -> Result<(), EnhanceError> {
			self.hidden.set(true);
			Ok(())
		}

		fn create_container(&self, id: &str) -> Result<usize, EnhanceError> {
			let mut containers = self.containers.borrow_mut();
			containers.push(FakeContainer {
				id: id.into(),
				..FakeContainer::default()
			});
			Ok(containers.len() - 1)
		}

		fn attach_graphic(
			&self,
			container: &usize,
			graphic: String,
			presentation: &Presentation,
		) -> Result<(), EnhanceError> {
			self.containers.borrow_mut()[*container]
				.graphics
				.push((graphic, presentation.clone()));
			Ok(())
		}

		fn show_error(&self, container: &usize, message: &str) -> Result<(), EnhanceError> {
			let mut containers = self.containers.borrow_mut();
			let slot = &mut containers[*container];
			slot.graphics.clear();
			slot.error = Some(message.into());
			Ok(())
		}

		fn diagnostic(&self, error: &EnhanceError) {
			self.diagnostics.borrow_mut().push(error.to_string());
		}
	}

	#[derive(Clone, Copy)]
	enum Behavior {
		Resolve,
		Reject,
		FailConstruction,
		ThrowOnInvoke,
	}

	struct StubRenderer {
		behavior: Behavior,
		seen: Rc<RefCell<Vec<String>>>,
	}

	impl Renderer for StubRenderer {
		type Graphic = String;

		async fn render(&self, source: &GraphSource) -> RenderResult<String> {
			self.seen.borrow_mut().push(source.as_str().to_string());
			match self.behavior {
				Behavior::Reject => Err(EnhanceError::Render("syntax error in line 1".into())),
				Behavior::ThrowOnInvoke => Err(EnhanceError::RendererConstruction(
					"renderSVGElement is not a function".into(),
				)),
				_ => Ok(format!("<svg>{}</svg>", source.as_str())),
			}
		}
	}

	struct StubLoader {
		behavior: Behavior,
		loads: Cell<usize>,
		seen: Rc<RefCell<Vec<String>>>,
	}

	impl StubLoader {
		fn new(behavior: Behavior) -> Self {
			Self {
				behavior,
				loads: Cell::new(0),
				seen: Rc::default(),
			}
		}
	}

	impl RendererLoader for StubLoader {
		type Renderer = StubRenderer;

		async fn load(&self) -> Result<StubRenderer, EnhanceError> {
			self.loads.set(self.loads.get() + 1);
			if let Behavior::FailConstruction = self.behavior {
				return Err(EnhanceError::RendererConstruction("Viz is not defined".into()));
			}
			Ok(StubRenderer {
				behavior: self.behavior,
				seen: self.seen.clone(),
			})
		}
	}

	fn enhancer(page: FakePage, behavior: Behavior) -> PageEnhancer<FakePage, StubLoader> {
		PageEnhancer::new(page, StubLoader::new(behavior), EnhancerConfig::default())
	}

	#[test]
	fn test_missing_source_is_silent_noop() {
		let enhancer = enhancer(FakePage::default(), Behavior::Resolve);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::NoSource);

		let page = enhancer.page();
		assert!(!page.hidden.get());
		assert!(page.containers.borrow().is_empty());
		assert!(page.diagnostics.borrow().is_empty());
		assert_eq!(enhancer.loader.loads.get(), 0);
	}

	#[test]
	fn test_successful_render_fills_new_container() {
		let enhancer = enhancer(FakePage::with_source("digraph { A -> B }"), Behavior::Resolve);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::Rendered);

		let page = enhancer.page();
		assert!(page.hidden.get());
		let containers = page.containers.borrow();
		assert_eq!(containers.len(), 1);
		assert_eq!(containers[0].id, "graph-container");
		assert_eq!(containers[0].graphics.len(), 1);
		let (graphic, presentation) = &containers[0].graphics[0];
		assert_eq!(graphic, "<svg>digraph { A -> B }</svg>");
		assert_eq!(
			presentation.properties(),
			[("width", "90%"), ("margin", "20px auto"), ("display", "block")]
		);
		assert!(containers[0].error.is_none());
		assert!(page.diagnostics.borrow().is_empty());
	}

	#[test]
	fn test_render_rejection_shows_error_and_logs_once() {
		let enhancer = enhancer(FakePage::with_source("digraph {"), Behavior::Reject);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::RenderFailed);

		let page = enhancer.page();
		let containers = page.containers.borrow();
		assert_eq!(containers.len(), 1);
		assert!(containers[0].graphics.is_empty());
		assert_eq!(containers[0].error.as_deref(), Some("Graph rendering failed"));

		let diagnostics = page.diagnostics.borrow();
		assert_eq!(diagnostics.len(), 1);
		assert!(diagnostics[0].contains("syntax error"));
	}

	#[test]
	fn test_construction_failure_leaves_empty_container() {
		let enhancer = enhancer(FakePage::with_source("digraph { A -> B }"), Behavior::FailConstruction);
		assert_eq!(
			pollster::block_on(enhancer.enhance()),
			Outcome::RendererUnavailable
		);

		let page = enhancer.page();
		assert!(page.hidden.get());
		let containers = page.containers.borrow();
		assert_eq!(containers.len(), 1);
		assert!(containers[0].graphics.is_empty());
		assert!(containers[0].error.is_none());
		assert_eq!(page.diagnostics.borrow().len(), 1);
		assert!(enhancer.loader.seen.borrow().is_empty());
	}

	#[test]
	fn test_invocation_failure_is_logged_without_error_message() {
		let enhancer = enhancer(FakePage::with_source("digraph { A -> B }"), Behavior::ThrowOnInvoke);
		assert_eq!(
			pollster::block_on(enhancer.enhance()),
			Outcome::RendererUnavailable
		);

		let containers = enhancer.page().containers.borrow();
		assert_eq!(containers.len(), 1);
		assert!(containers[0].graphics.is_empty());
		assert!(containers[0].error.is_none());
		assert_eq!(enhancer.page().diagnostics.borrow().len(), 1);
	}

	#[test]
	fn test_loader_runs_at_most_once() {
		let enhancer = enhancer(FakePage::with_source("digraph { A -> B }"), Behavior::Resolve);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::Rendered);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::AlreadyStarted);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::AlreadyStarted);

		assert_eq!(enhancer.loader.loads.get(), 1);
		assert_eq!(enhancer.page().containers.borrow().len(), 1);
	}

	#[test]
	fn test_repeat_after_noop_does_not_retry() {
		let enhancer = enhancer(FakePage::default(), Behavior::Resolve);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::NoSource);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::AlreadyStarted);
		assert_eq!(enhancer.loader.loads.get(), 0);
	}

	#[test]
	fn test_empty_source_still_reaches_renderer() {
		let enhancer = enhancer(FakePage::with_source(""), Behavior::Resolve);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::Rendered);

		assert_eq!(*enhancer.loader.seen.borrow(), vec![String::new()]);
		let containers = enhancer.page().containers.borrow();
		assert_eq!(containers[0].graphics[0].0, "<svg></svg>");
	}

	#[test]
	fn test_source_is_passed_verbatim() {
		let text = "  digraph G {\n  \"a\" -> \"b\";\n}\n";
		let enhancer = enhancer(FakePage::with_source(text), Behavior::Resolve);
		pollster::block_on(enhancer.enhance());
		assert_eq!(*enhancer.loader.seen.borrow(), vec![text.to_string()]);
	}

	#[test]
	fn test_selector_error_is_reported_before_loading() {
		let page = FakePage {
			bad_selector: true,
			..FakePage::with_source("digraph {}")
		};
		let enhancer = enhancer(page, Behavior::Resolve);
		assert_eq!(pollster::block_on(enhancer.enhance()), Outcome::PageUnavailable);

		let page = enhancer.page();
		assert!(!page.hidden.get());
		assert!(page.containers.borrow().is_empty());
		assert_eq!(page.diagnostics.borrow().len(), 1);
		assert_eq!(enhancer.loader.loads.get(), 0);
	}

	#[test]
	fn test_custom_config_is_honored() {
		let config = EnhancerConfig {
			container_id: "callgraph".into(),
			error_message: "could not draw".into(),
			..EnhancerConfig::default()
		};
		let enhancer = PageEnhancer::new(
			FakePage::with_source("digraph {"),
			StubLoader::new(Behavior::Reject),
			config,
		);
		pollster::block_on(enhancer.enhance());

		let containers = enhancer.page().containers.borrow();
		assert_eq!(containers[0].id, "callgraph");
		assert_eq!(containers[0].error.as_deref(), Some("could not draw"));
	}
}
