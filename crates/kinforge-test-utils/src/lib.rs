//! Shared test fixtures and utilities for kinforge crates.
//!
//! Provides small but complete model documents for every dialect, helpers
//! for writing them to disk, and assertions over compiled models.

pub mod assert;
pub mod files;
pub mod fixtures;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use assert::{assert_translation, body_names, joint_names};
pub use files::write_fixture;
pub use fixtures::{ARM_URDF, HOPPER_MJCF, WALKER_RLSIM};
