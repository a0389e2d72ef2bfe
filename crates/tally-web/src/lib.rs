#![forbid(unsafe_code)]

//! Browser host for the Tally windowed list engine.
//!
//! On `wasm32`, [`DomScrollContainer`] and [`DomResizeObserver`] implement the
//! `tally-virtual` host traits for a DOM element, and [`TallyWindow`] exposes
//! a mounted list to JavaScript via `wasm-bindgen`.
//!
//! The JSON option/snapshot glue in [`options`] is target-independent.

pub mod options;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::{DomResizeObserver, DomScrollContainer, TallyWindow, resize_observer_supported};

pub use options::{OptionsError, WindowSnapshot, config_from_json};
