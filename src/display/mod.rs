//! Plain-text outlines of the page structure and the live dependency graph.
mod outline;

pub use outline::{format_graph, format_layout};
