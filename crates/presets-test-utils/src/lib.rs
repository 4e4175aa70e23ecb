//! Shared test utilities for the cmake-presets workspace.
//!
//! This crate provides preset-tree fixtures so that crate test suites don't
//! each hand-roll temporary directories. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`tree`]: [`PresetTree`] builder for on-disk preset documents

pub mod tree;

pub use tree::{PresetTree, preset};
