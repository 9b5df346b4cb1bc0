//! Replaces the DOT call graph embedded in a page with its SVG rendering.

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

// Modules
pub mod call_graph;
pub mod components;
pub mod config;
pub mod error;
pub mod pages;

use crate::components::graph_view::{Outcome, PageEnhancer, VizLoader, WebEnhancer, WebPage};
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;

#[cfg(all(test, target_arch = "wasm32"))]
use wasm_bindgen_test as _;

thread_local! {
	static ENHANCER: RefCell<Option<Rc<WebEnhancer>>> = const { RefCell::new(None) };
}

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The page's single enhancer, built on first use. Later configs are ignored.
fn shared_enhancer(config: EnhancerConfig) -> Result<Rc<WebEnhancer>, EnhanceError> {
	ENHANCER.with(|slot| {
		let mut slot = slot.borrow_mut();
		if let Some(enhancer) = slot.as_ref() {
			debug!("enhancer already created, reusing it");
			return Ok(Rc::clone(enhancer));
		}
		let page = WebPage::from_window()?;
		let loader = VizLoader::new(page.document().clone(), config.library_url.clone());
		let enhancer = Rc::new(PageEnhancer::new(page, loader, config));
		*slot = Some(Rc::clone(&enhancer));
		Ok(enhancer)
	})
}

/// Enhance the current page and wait for the result. Only the first call on a
/// page does any work; later ones return [`Outcome::AlreadyStarted`].
pub async fn enhance_once(config: EnhancerConfig) -> Outcome {
	match shared_enhancer(config) {
		Ok(enhancer) => enhancer.enhance().await,
		Err(err) => {
			error!("{err}");
			Outcome::PageUnavailable
		}
	}
}

/// Enhance the current page once in the background. Safe to call repeatedly.
pub fn start(config: EnhancerConfig) {
	spawn_local(async move {
		enhance_once(config).await;
	});
}

/// JS entry point using the stock settings.
#[wasm_bindgen(js_name = enhanceCallGraph)]
pub fn enhance_call_graph() {
	init_logging();
	start(EnhancerConfig::default());
}

/// JS entry point taking a JSON config. Absent keys keep their defaults.
#[wasm_bindgen(js_name = enhanceCallGraphWith)]
pub fn enhance_call_graph_with(config: &str) -> Result<(), JsValue> {
	init_logging();
	let config = EnhancerConfig::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
	start(config);
	Ok(())
}
