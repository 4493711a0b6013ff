//! Common utilities for the quill parser crates.
//!
//! This crate provides shared infrastructure used by the DOM and HTML crates:
//! - **Warning System** - deduplicated, colored terminal output for
//!   unsupported features and parse diagnostics

pub mod warning;
