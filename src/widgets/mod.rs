//! Reusable TUI widgets.

pub mod graph;
