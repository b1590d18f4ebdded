//! The compiler's output: body tree plus everything registered beside it.

use std::fmt;

use crate::error::Diagnostic;
use crate::tree::KinematicTree;
use crate::types::{HeightfieldAsset, MaterialAsset, MeshAsset};

// ---------------------------------------------------------------------------
// Actuator
// ---------------------------------------------------------------------------

/// Control law of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorKind {
    /// Direct torque or force.
    Torque,
    /// Position servo.
    Position,
    /// Velocity servo.
    Velocity,
    /// Proportional-derivative controller.
    PdController,
}

impl ActuatorKind {
    /// Maps an actuator element name (`motor`, `position`, ...) onto a kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "motor" | "general" => Some(Self::Torque),
            "position" => Some(Self::Position),
            "velocity" => Some(Self::Velocity),
            "pd" => Some(Self::PdController),
            _ => None,
        }
    }
}

impl fmt::Display for ActuatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Torque => "torque",
            Self::Position => "position",
            Self::Velocity => "velocity",
            Self::PdController => "pd",
        })
    }
}

/// An actuator driving one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    pub name: String,
    pub kind: ActuatorKind,
    /// Name of the driven joint; `None` when the reference did not resolve.
    pub joint: Option<String>,
    pub ctrl_limits: [f32; 2],
    pub kp: f32,
    pub kv: f32,
    pub gear: Vec<f32>,
}

impl Actuator {
    pub fn new(name: impl Into<String>, kind: ActuatorKind, joint: Option<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            joint,
            ctrl_limits: [-1.0, 1.0],
            kp: 1.0,
            kv: 1.0,
            gear: vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        }
    }
}

// ---------------------------------------------------------------------------
// RobotModel
// ---------------------------------------------------------------------------

/// A compiled robot description.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotModel {
    pub name: String,
    pub tree: KinematicTree,
    pub meshes: Vec<MeshAsset>,
    pub materials: Vec<MaterialAsset>,
    pub heightfields: Vec<HeightfieldAsset>,
    pub actuators: Vec<Actuator>,
    /// Directly connected bodies (and explicit exclusions) that downstream
    /// physics should never test against each other.
    pub exclusion_pairs: Vec<(String, String)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RobotModel {
    /// Number of actuatable degrees of freedom.
    pub fn dof(&self) -> usize {
        self.tree.dof()
    }

    pub fn actuator(&self, name: &str) -> Option<&Actuator> {
        self.actuators.iter().find(|a| a.name == name)
    }

    pub fn mesh(&self, id: &str) -> Option<&MeshAsset> {
        self.meshes.iter().find(|m| m.id == id)
    }

    pub fn material(&self, name: &str) -> Option<&MaterialAsset> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Whether contacts between the two bodies are excluded, in either order.
    pub fn is_excluded(&self, a: &str, b: &str) -> bool {
        self.exclusion_pairs
            .iter()
            .any(|(p, c)| (p == a && c == b) || (p == b && c == a))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
