//! `nbrun` library crate.
//!
//! Re-exports the runner modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod fetch;
pub mod kernel;
pub mod papermill;
pub mod runner;
pub mod webhook;
