//! Method call graph of an analyzed project, as shipped to the page.
//!
//! Classes, their methods and each method's calls keep insertion order so
//! the emitted DOT is stable for a given analysis.

use serde::{Deserialize, Serialize};

mod dot;

/// One invocation found in a method body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodCall {
	/// Simple name of the invoked method.
	pub name: String,
	/// Simple name of the type declaring it, empty when unresolved.
	pub declaring_class: String,
}

/// A method and the calls it makes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodNode {
	/// Simple method name.
	pub name: String,
	/// Calls in source order.
	pub calls: Vec<MethodCall>,
}

impl MethodNode {
	/// Record a call to `name` declared on `declaring_class`.
	pub fn call(&mut self, name: impl Into<String>, declaring_class: impl Into<String>) -> &mut Self {
		self.calls.push(MethodCall {
			name: name.into(),
			declaring_class: declaring_class.into(),
		});
		self
	}
}

/// A class and its methods.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassNode {
	/// Simple class name.
	pub name: String,
	/// Methods in declaration order.
	pub methods: Vec<MethodNode>,
}

impl ClassNode {
	/// The method called `name`, appended if absent.
	pub fn method(&mut self, name: &str) -> &mut MethodNode {
		let idx = match self.methods.iter().position(|m| m.name == name) {
			Some(idx) => idx,
			None => {
				self.methods.push(MethodNode {
					name: name.to_string(),
					calls: Vec::new(),
				});
				self.methods.len() - 1
			}
		};
		&mut self.methods[idx]
	}
}

/// Whole-project call graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraph {
	/// Classes in discovery order.
	pub classes: Vec<ClassNode>,
}

impl CallGraph {
	/// Empty graph.
	pub fn new() -> Self {
		Self::default()
	}

	/// The class called `name`, appended if absent.
	pub fn class(&mut self, name: &str) -> &mut ClassNode {
		let idx = match self.classes.iter().position(|c| c.name == name) {
			Some(idx) => idx,
			None => {
				self.classes.push(ClassNode {
					name: name.to_string(),
					methods: Vec::new(),
				});
				self.classes.len() - 1
			}
		};
		&mut self.classes[idx]
	}

	/// Two classes with one internal and two external calls each.
	pub fn sample() -> Self {
		let mut graph = Self::new();
		for class_name in ["ClassA", "ClassB"] {
			let class = graph.class(class_name);
			class
				.method("doSomething")
				.call("helperMethod", class_name)
				.call("externalMethod", "OtherClass");
			class.method("compute").call("println", "System");
		}
		graph
	}

	/// Number of recorded calls across all methods.
	pub fn call_count(&self) -> usize {
		self.classes
			.iter()
			.flat_map(|c| &c.methods)
			.map(|m| m.calls.len())
			.sum()
	}
}
