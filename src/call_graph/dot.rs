use std::fmt;

use super::CallGraph;

/// Graphviz rendering of a [`CallGraph`].
struct Dot<'a>(&'a CallGraph);

impl CallGraph {
	/// Serialize to DOT, legend included.
	pub fn to_dot(&self) -> String {
		Dot(self).to_string()
	}
}

struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("\"")?;
		for ch in self.0.chars() {
			match ch {
				'"' => f.write_str("\\\"")?,
				'\\' => f.write_str("\\\\")?,
				_ => write!(f, "{ch}")?,
			}
		}
		f.write_str("\"")
	}
}

impl fmt::Display for Dot<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let graph = self.0;
		writeln!(f, "digraph G {{")?;
		writeln!(f, "  rankdir=LR;")?;
		writeln!(f, "  node [shape=box, style=filled, fillcolor=mediumpurple];")?;

		for class in &graph.classes {
			writeln!(f, "  {} [shape=ellipse, fillcolor=orange];", Quoted(&class.name))?;
			for method in &class.methods {
				writeln!(f, "  {} [shape=box, fillcolor=pink];", Quoted(&method.name))?;
			}
		}

		for class in &graph.classes {
			for method in &class.methods {
				writeln!(f, "  {} -> {};", Quoted(&class.name), Quoted(&method.name))?;
				for call in &method.calls {
					writeln!(f, "  {} -> {};", Quoted(&method.name), Quoted(&call.name))?;
				}
			}
		}

		// Legend
		writeln!(f, "  subgraph cluster_legend {{")?;
		writeln!(f, "    label=\"Legend\";")?;
		writeln!(f, "    fontsize=14;")?;
		writeln!(f, "    color=black;")?;
		writeln!(f, "    style=dashed;")?;
		writeln!(
			f,
			"    legend_class [label=\"Class\", shape=box, style=filled, fillcolor=orange];"
		)?;
		writeln!(
			f,
			"    legend_method [label=\"Internal method\", shape=box, style=filled, fillcolor=pink];"
		)?;
		writeln!(
			f,
			"    legend_external [label=\"External method\", shape=box, style=filled, fillcolor=mediumpurple];"
		)?;
		writeln!(f, "    legend_class -> legend_method [label=\"Contains\"];")?;
		writeln!(f, "    legend_method -> legend_external [label=\"Calls\"];")?;
		writeln!(f, "  }}")?;
		writeln!(f, "}}")
	}
}
