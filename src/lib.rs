//! Subscribely site enhancements - Rust Implementation
//!
//! Progressive enhancements for the Subscribely marketing pages, compiled to
//! WASM and bound to the static markup once the document is ready.
//!
//! This library provides:
//! - Light/dark theme with localStorage persistence
//! - Mobile navigation toggle
//! - Monthly/annual pricing switch
//! - Interactive savings calculator
//! - CTA click tracking into the tag manager data layer

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
