use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_joint_axis() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}
const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// AngleUnit / CoordinateMode
// ---------------------------------------------------------------------------

/// Unit of every angle written in a nested-body model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degree,
    Radian,
}

impl AngleUnit {
    /// Parses the `<compiler angle>` keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "degree" => Some(Self::Degree),
            "radian" => Some(Self::Radian),
            _ => None,
        }
    }

    /// Converts an angle in this unit into radians.
    pub fn to_radians(self, value: f32) -> f32 {
        match self {
            Self::Degree => value.to_radians(),
            Self::Radian => value,
        }
    }
}

/// Whether element poses in a nested-body model are relative to the parent
/// body or already expressed in the world frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    #[default]
    Local,
    Global,
}

impl CoordinateMode {
    /// Parses the `<compiler coordinate>` keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "local" => Some(Self::Local),
            "global" => Some(Self::Global),
            _ => None,
        }
    }
}

/// Vertical axis of an rlsim model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    X,
    Y,
    Z,
}

impl UpAxis {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }

    /// Re-orders a vector authored with this axis up into the z-up convention.
    pub const fn to_z_up(self, v: [f32; 3]) -> [f32; 3] {
        match self {
            Self::X => [v[1], v[2], v[0]],
            Self::Y => [v[2], v[0], v[1]],
            Self::Z => v,
        }
    }
}

// ---------------------------------------------------------------------------
// Dialect sections
// ---------------------------------------------------------------------------

/// Fallbacks for nested-body (MJCF) models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MjcfConfig {
    /// Angle unit used when the model has no `<compiler angle>`.
    #[serde(default)]
    pub angle: AngleUnit,

    /// Coordinate mode used when the model has no `<compiler coordinate>`.
    #[serde(default)]
    pub coordinate: CoordinateMode,

    /// Joint axis used when neither the joint nor any default sets one.
    #[serde(default = "default_joint_axis")]
    pub joint_axis: [f32; 3],

    /// Mesh directory used when the model has no `<compiler meshdir>`.
    #[serde(default)]
    pub meshdir: Option<String>,
}

impl Default for MjcfConfig {
    fn default() -> Self {
        Self {
            angle: AngleUnit::default(),
            coordinate: CoordinateMode::default(),
            joint_axis: default_joint_axis(),
            meshdir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrdfConfig {
    /// Create a torque actuator for every actuatable joint.
    #[serde(default = "default_true")]
    pub default_actuators: bool,
}

impl Default for UrdfConfig {
    fn default() -> Self {
        Self {
            default_actuators: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlsimConfig {
    /// Create a PD actuator for every actuatable joint.
    #[serde(default = "default_true")]
    pub default_actuators: bool,

    /// Overrides the model's own `WorldUp` entry.
    #[serde(default)]
    pub world_up: Option<UpAxis>,
}

impl Default for RlsimConfig {
    fn default() -> Self {
        Self {
            default_actuators: true,
            world_up: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Join relative mesh and heightfield paths onto the model's directory.
    #[serde(default = "default_true")]
    pub resolve_paths: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            resolve_paths: true,
        }
    }
}

// ---------------------------------------------------------------------------
// CompilerConfig
// ---------------------------------------------------------------------------

/// Compiler configuration, usually loaded from `kinforge.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default)]
    pub mjcf: MjcfConfig,
    #[serde(default)]
    pub urdf: UrdfConfig,
    #[serde(default)]
    pub rlsim: RlsimConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl CompilerConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axis = self.mjcf.joint_axis;
        if axis.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "mjcf.joint_axis".into(),
                message: "components must be finite".into(),
            });
        }
        if axis.iter().all(|c| c.abs() < f32::EPSILON) {
            return Err(ConfigError::InvalidValue {
                field: "mjcf.joint_axis".into(),
                message: "axis must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_mujoco_conventions() {
        let cfg = CompilerConfig::default();
        assert_eq!(cfg.mjcf.angle, AngleUnit::Degree);
        assert_eq!(cfg.mjcf.coordinate, CoordinateMode::Local);
        assert_eq!(cfg.mjcf.joint_axis, [0.0, 0.0, 1.0]);
        assert!(cfg.urdf.default_actuators);
        assert!(cfg.rlsim.default_actuators);
        assert!(cfg.assets.resolve_paths);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = CompilerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, CompilerConfig::default());
    }

    #[test]
    fn toml_sections_deserialize() {
        let toml_str = r#"
            [mjcf]
            angle = "radian"
            coordinate = "global"
            joint_axis = [1.0, 0.0, 0.0]
            meshdir = "meshes"

            [urdf]
            default_actuators = false

            [rlsim]
            world_up = "z"

            [assets]
            resolve_paths = false
        "#;
        let cfg = CompilerConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.mjcf.angle, AngleUnit::Radian);
        assert_eq!(cfg.mjcf.coordinate, CoordinateMode::Global);
        assert!((cfg.mjcf.joint_axis[0] - 1.0).abs() < f32::EPSILON);
        assert_eq!(cfg.mjcf.meshdir.as_deref(), Some("meshes"));
        assert!(!cfg.urdf.default_actuators);
        assert!(cfg.rlsim.default_actuators);
        assert_eq!(cfg.rlsim.world_up, Some(UpAxis::Z));
        assert!(!cfg.assets.resolve_paths);
    }

    #[test]
    fn zero_joint_axis_rejected() {
        let toml_str = "[mjcf]\njoint_axis = [0.0, 0.0, 0.0]\n";
        let err = CompilerConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn unknown_angle_keyword_is_a_toml_error() {
        let err = CompilerConfig::from_toml_str("[mjcf]\nangle = \"gradian\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CompilerConfig::from_file("/definitely/not/here/kinforge.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    // -- keyword helpers --

    #[test]
    fn angle_unit_converts() {
        assert!((AngleUnit::Degree.to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((AngleUnit::Radian.to_radians(1.5) - 1.5).abs() < f32::EPSILON);
        assert_eq!(AngleUnit::from_keyword("radian"), Some(AngleUnit::Radian));
        assert_eq!(CoordinateMode::from_keyword("global"), Some(CoordinateMode::Global));
        assert_eq!(CoordinateMode::from_keyword("world"), None);
    }

    #[test]
    fn y_up_vectors_become_z_up() {
        // Height along y moves onto z.
        assert_eq!(UpAxis::Y.to_z_up([1.0, 2.0, 3.0]), [3.0, 1.0, 2.0]);
        assert_eq!(UpAxis::X.to_z_up([1.0, 2.0, 3.0]), [2.0, 3.0, 1.0]);
        assert_eq!(UpAxis::Z.to_z_up([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    }
}
