// kinforge-core: kinematic-tree IR, config, math and errors for the kinforge robot-description compiler.

pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod tree;
pub mod types;

pub mod prelude {
    pub use crate::config::{AngleUnit, CompilerConfig, CoordinateMode, UpAxis};
    pub use crate::error::{ConfigError, Diagnostic, TopologyError};
    pub use crate::math::Transform;
    pub use crate::model::{Actuator, ActuatorKind, RobotModel};
    pub use crate::tree::{BodyId, KinematicBody, KinematicTree};
    pub use crate::types::{
        Collider, Dialect, Drawable, HeightfieldAsset, Inertial, JointLimits, JointType,
        KinematicJoint, MaterialAsset, MeshAsset, ShapeDescriptor, ShapeKind,
    };
}
