//! UI rendering module for Crabby
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod forecast_view;
pub mod help_overlay;
pub mod search_bar;

pub use forecast_view::render;
