#![allow(unused_crate_dependencies)]

use call_graph_view::config::EnhancerConfig;
use call_graph_view::pages::home::Home;
use leptos::prelude::*;

fn main() {
	call_graph_view::init_logging();
	leptos::mount::mount_to_body(|| view! { <Home /> });
	call_graph_view::start(EnhancerConfig::default());
}
