pub mod api;
pub mod attempts;
pub mod chart;
pub mod config;
pub mod error;
pub mod judge;
pub mod library;
pub mod session;
pub mod simulate;
// cmd and reports belong to the binary (main.rs).
