//! Terminal User Interface (TUI) module.
//!
//! This module renders benchmark results as full-screen bar charts
//! using the `ratatui` library.

pub mod chart;

pub use chart::{charts_for, show, ChartModel};
