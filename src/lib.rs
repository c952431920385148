//! Automobile sales statistics dashboard.
//!
//! The binary is a thin eframe shell around this library: the data layer,
//! the chart adapter and the selection state are plain Rust and testable
//! without a window.

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
