//! `planefit` library crate.
//!
//! The binary (`planefit`) is a thin wrapper around this library so that:
//!
//! - the fitting core is testable without spawning processes or a terminal
//! - renderers stay swappable sinks with no path back into fitting

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
