//! Page components.

pub mod graph_view;
