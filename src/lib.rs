//! Crabby Library
//!
//! Weather forecast normalization and the terminal UI built on it. The
//! library is shared by the binary and the integration tests.

pub mod app;
pub mod cli;
pub mod clock;
pub mod data;
pub mod forecast;
pub mod logging;
pub mod ui;
