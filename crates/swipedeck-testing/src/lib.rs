//! Testing infrastructure for swipedeck tests.
//!
//! This crate provides utilities for writing deterministic tests:
//! - `ScriptedSource`: Candidate source with failure injection and fetch gating
//! - `fixtures`: Sample candidates and catalogue files
//! - `assertions`: Custom assertions for ordering and identity checks

pub mod assertions;
pub mod fixtures;
pub mod source;

pub use source::ScriptedSource;
