//! Landing page showing the sample call graph.

use leptos::prelude::*;

use crate::call_graph::CallGraph;

/// DOT source of the demo call graph.
pub fn sample_source() -> String {
	CallGraph::sample().to_dot()
}

/// Demo page: the call graph as raw DOT, replaced by SVG once enhanced.
#[component]
pub fn Home() -> impl IntoView {
	let dot = sample_source();

	view! {
		<div class="call-graph-page">
			<h1>"Method Call Graph"</h1>
			<p class="subtitle">
				"Classes in orange, project methods in pink, external methods in purple."
			</p>
			<pre class="dot-source">{dot}</pre>
		</div>
	}
}
