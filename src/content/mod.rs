//! Tabs and the lazily built content tree.
pub mod tab;
pub mod tree;

pub use tab::{Tab, TabDef, TabSet};
pub use tree::{build_layout, build_tab, ContentNode, Layout, TabContent, TabHeader};
