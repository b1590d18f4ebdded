//! Robot description compiler.
//!
//! Turns MJCF, URDF and rlsim documents into one canonical [`RobotModel`]:
//! a single-rooted [`KinematicTree`](kinforge_core::tree::KinematicTree) of
//! bodies with their joints, colliders, drawables and inertials, plus the
//! assets, actuators and contact exclusions declared beside it.
//!
//! - [`mjcf`]: nested-body builder with cascading class defaults
//! - [`urdf`] and [`rlsim`]: flat builders sharing [`topology`]
//! - [`geometry`] and [`transform`]: size conventions and pose encodings
//! - [`assets`]: per-model mesh, material and heightfield registry

pub mod assets;
pub mod context;
pub mod error;
pub mod geometry;
pub mod load;
pub mod mjcf;
pub mod rlsim;
pub mod topology;
pub mod transform;
pub mod urdf;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use assets::AssetRegistry;
pub use context::BuildContext;
pub use error::LoadError;
pub use kinforge_core::model::RobotModel;
pub use kinforge_core::types::Dialect;
pub use load::{load_file, load_str, load_tree, load_tree_in};
