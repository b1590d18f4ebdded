//! Value types of the kinematic-tree IR.
//!
//! Everything here is plain data (arrays, strings, rigid transforms) so that
//! physics adapters, renderers and bindings can copy values out without
//! holding references into the compiler's storage.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::math::Transform;
use crate::tree::BodyId;

// ---------------------------------------------------------------------------
// Defaults shared by every dialect
// ---------------------------------------------------------------------------

pub const DEFAULT_RGBA: [f32; 4] = [0.7, 0.5, 0.3, 1.0];
pub const DEFAULT_SPECULAR: [f32; 3] = [0.7, 0.5, 0.3];
pub const DEFAULT_SHININESS: f32 = 32.0;
pub const DEFAULT_DENSITY: f32 = 1000.0;
pub const DEFAULT_FRICTION: [f32; 3] = [1.0, 0.005, 0.0001];

// ---------------------------------------------------------------------------
// Dialect
// ---------------------------------------------------------------------------

/// Supported robot-description formats. Always chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Nested bodies (MuJoCo MJCF).
    Mjcf,
    /// Flat links and joints (URDF).
    Urdf,
    /// Simplified flat skeleton stored as JSON.
    Rlsim,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mjcf => "mjcf",
            Self::Urdf => "urdf",
            Self::Rlsim => "rlsim",
        })
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mjcf" | "mujoco" => Ok(Self::Mjcf),
            "urdf" => Ok(Self::Urdf),
            "rlsim" | "json" => Ok(Self::Rlsim),
            other => Err(format!("unknown dialect '{other}' (expected mjcf, urdf or rlsim)")),
        }
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// A mesh file registered under a logical id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshAsset {
    pub id: String,
    pub file: String,
    pub scale: [f32; 3],
}

impl MeshAsset {
    pub fn new(id: impl Into<String>, file: impl Into<String>, scale: [f32; 3]) -> Self {
        Self {
            id: id.into(),
            file: file.into(),
            scale,
        }
    }

    /// A reference that names a file directly: id and file are the same string.
    pub fn literal(file: &str) -> Self {
        Self::new(file, file, [1.0; 3])
    }
}

/// Named surface material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAsset {
    pub name: String,
    pub diffuse: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
}

impl MaterialAsset {
    /// A material with the given color and the default specular response.
    pub fn with_color(name: impl Into<String>, diffuse: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            diffuse,
            specular: DEFAULT_SPECULAR,
            shininess: DEFAULT_SHININESS,
        }
    }
}

/// Elevation-grid asset referenced by heightfield shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightfieldAsset {
    pub id: String,
    pub file: Option<String>,
    pub nrow: usize,
    pub ncol: usize,
    /// `[radius_x, radius_y, elevation_z, base_z]`.
    pub size: [f32; 4],
}

// ---------------------------------------------------------------------------
// ShapeKind / ShapeDescriptor
// ---------------------------------------------------------------------------

/// Primitive kind of a collider or drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Box,
    Plane,
    Sphere,
    Cylinder,
    Capsule,
    Ellipsoid,
    Mesh,
    Heightfield,
}

impl ShapeKind {
    /// Maps a dialect keyword (`box`, `hfield`, ...) onto a kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "box" => Some(Self::Box),
            "plane" => Some(Self::Plane),
            "sphere" => Some(Self::Sphere),
            "cylinder" => Some(Self::Cylinder),
            "capsule" => Some(Self::Capsule),
            "ellipsoid" => Some(Self::Ellipsoid),
            "mesh" => Some(Self::Mesh),
            "hfield" | "heightfield" => Some(Self::Heightfield),
            _ => None,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Plane => "plane",
            Self::Sphere => "sphere",
            Self::Cylinder => "cylinder",
            Self::Capsule => "capsule",
            Self::Ellipsoid => "ellipsoid",
            Self::Mesh => "mesh",
            Self::Heightfield => "hfield",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Canonical shape description.
///
/// `size` depends on `kind`:
/// - Box: full extents `(x, y, z)`
/// - Plane: `(width, depth, 0)`
/// - Sphere: radius on x; rlsim spheres keep their halved y and z
/// - Cylinder / Capsule: `(radius, length, 0)`
/// - Ellipsoid: radii
/// - Mesh: scale
/// - Heightfield: `(radius_x, radius_y, elevation_z)`
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub size: [f32; 3],
    pub mesh: Option<MeshAsset>,
    pub heightfield: Option<HeightfieldAsset>,
    pub local_transform: Transform,
    /// Set when the local frame was derived from two endpoints.
    pub derived_from_fromto: bool,
}

impl ShapeDescriptor {
    pub fn new(kind: ShapeKind, size: [f32; 3]) -> Self {
        Self {
            kind,
            size,
            mesh: None,
            heightfield: None,
            local_transform: Transform::identity(),
            derived_from_fromto: false,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, local_transform: Transform) -> Self {
        self.local_transform = local_transform;
        self
    }

    /// Enclosed volume, or `None` for kinds without one (plane, mesh, heightfield).
    pub fn volume(&self) -> Option<f32> {
        let [a, b, c] = self.size;
        match self.kind {
            ShapeKind::Box => Some(a * b * c),
            ShapeKind::Sphere => Some(4.0 / 3.0 * PI * a.powi(3)),
            ShapeKind::Ellipsoid => Some(4.0 / 3.0 * PI * a * b * c),
            ShapeKind::Cylinder => Some(PI * a * a * b),
            ShapeKind::Capsule => Some(PI * a * a * b + 4.0 / 3.0 * PI * a.powi(3)),
            ShapeKind::Plane | ShapeKind::Mesh | ShapeKind::Heightfield => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Collider / Drawable / Inertial
// ---------------------------------------------------------------------------

/// Collision geometry attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub name: String,
    pub shape: ShapeDescriptor,
    pub collision_group: i32,
    pub collision_mask: i32,
    /// Sliding, torsional and rolling friction.
    pub friction: [f32; 3],
    pub density: f32,
}

impl Collider {
    /// A collider with the default contact parameters.
    pub fn new(name: impl Into<String>, shape: ShapeDescriptor) -> Self {
        Self {
            name: name.into(),
            shape,
            collision_group: 1,
            collision_mask: 1,
            friction: DEFAULT_FRICTION,
            density: DEFAULT_DENSITY,
        }
    }
}

/// Render geometry attached to a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub name: String,
    pub shape: ShapeDescriptor,
    /// Ambient and diffuse color.
    pub rgba: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub material: Option<String>,
}

impl Drawable {
    /// A drawable with the default material colors.
    pub fn new(name: impl Into<String>, shape: ShapeDescriptor) -> Self {
        Self {
            name: name.into(),
            shape,
            rgba: DEFAULT_RGBA,
            specular: DEFAULT_SPECULAR,
            shininess: DEFAULT_SHININESS,
            material: None,
        }
    }

    /// Takes color, specular response and name from a registered material.
    pub fn apply_material(&mut self, material: &MaterialAsset) {
        self.rgba = material.diffuse;
        self.specular = material.specular;
        self.shininess = material.shininess;
        self.material = Some(material.name.clone());
    }
}

/// Inertial properties of a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Inertial {
    /// Frame of the inertia tensor relative to the body frame.
    pub local_transform: Transform,
    /// Mass in kilograms.
    pub mass: f32,
    /// Inertia tensor elements `[ixx, ixy, ixz, iyy, iyz, izz]`.
    pub inertia: [f32; 6],
}

impl Default for Inertial {
    fn default() -> Self {
        Self {
            local_transform: Transform::identity(),
            mass: 0.0,
            inertia: [0.0; 6],
        }
    }
}

impl Inertial {
    /// Symmetric 3×3 inertia matrix.
    pub fn matrix(&self) -> Matrix3<f32> {
        let [ixx, ixy, ixz, iyy, iyz, izz] = self.inertia;
        Matrix3::new(ixx, ixy, ixz, ixy, iyy, iyz, ixz, iyz, izz)
    }

    pub fn diagonal(&self) -> [f32; 3] {
        [self.inertia[0], self.inertia[3], self.inertia[5]]
    }
}

// ---------------------------------------------------------------------------
// JointType / JointLimits / KinematicJoint
// ---------------------------------------------------------------------------

/// Joint kind. The set is closed; adapters match on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JointType {
    /// Unconstrained 6-DOF joint.
    Free,
    /// No relative motion between parent and child.
    Fixed,
    /// Rotation about a single axis.
    Revolute,
    /// Translation along a single axis.
    Prismatic,
    /// Rotation about a point.
    Spherical,
    /// Motion within a plane.
    Planar,
}

impl JointType {
    /// Maps a keyword from any supported dialect onto a joint type.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "free" | "floating" | "none" => Some(Self::Free),
            "hinge" | "revolute" | "continuous" => Some(Self::Revolute),
            "slide" | "prismatic" => Some(Self::Prismatic),
            "ball" | "spherical" => Some(Self::Spherical),
            "fixed" | "world" => Some(Self::Fixed),
            "planar" => Some(Self::Planar),
            _ => None,
        }
    }

    /// Degrees of freedom this joint adds.
    pub const fn dof(self) -> usize {
        match self {
            Self::Free => 6,
            Self::Fixed => 0,
            Self::Revolute | Self::Prismatic => 1,
            Self::Spherical | Self::Planar => 3,
        }
    }

    /// Whether a default actuator makes sense for this joint.
    pub const fn is_actuated(self) -> bool {
        matches!(self, Self::Revolute | Self::Prismatic | Self::Spherical)
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Free => "free",
            Self::Fixed => "fixed",
            Self::Revolute => "revolute",
            Self::Prismatic => "prismatic",
            Self::Spherical => "spherical",
            Self::Planar => "planar",
        })
    }
}

/// Position limits. `lower > upper` means the joint is unlimited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    pub lower: f32,
    pub upper: f32,
}

impl JointLimits {
    pub const UNLIMITED: Self = Self {
        lower: 1.0,
        upper: -1.0,
    };

    /// Half a turn either way, in radians.
    pub const HALF_TURN: Self = Self {
        lower: -PI,
        upper: PI,
    };

    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    pub fn is_limited(&self) -> bool {
        self.lower <= self.upper
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

/// A joint owned by the body it moves.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicJoint {
    pub name: String,
    pub joint_type: JointType,
    pub axis: [f32; 3],
    pub limits: JointLimits,
    pub stiffness: f32,
    pub armature: f32,
    pub damping: f32,
    /// Reference position.
    pub reference: f32,
    /// Joint frame relative to the owning body.
    pub local_transform: Transform,
    /// Written by physics adapters each step.
    pub world_transform: Transform,
    /// Owning body, assigned when the tree is finalized.
    pub owner: Option<BodyId>,
}

impl KinematicJoint {
    pub fn new(name: impl Into<String>, joint_type: JointType) -> Self {
        Self {
            name: name.into(),
            joint_type,
            axis: [0.0, 0.0, 1.0],
            limits: JointLimits::UNLIMITED,
            stiffness: 0.0,
            armature: 0.0,
            damping: 0.0,
            reference: 0.0,
            local_transform: Transform::identity(),
            world_transform: Transform::identity(),
            owner: None,
        }
    }

    /// Joint frame rotation relative to the owning body.
    pub fn local_rotation(&self) -> UnitQuaternion<f32> {
        self.local_transform.rotation
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- keywords --

    #[test]
    fn joint_keywords_cover_all_dialects() {
        assert_eq!(JointType::from_keyword("hinge"), Some(JointType::Revolute));
        assert_eq!(JointType::from_keyword("continuous"), Some(JointType::Revolute));
        assert_eq!(JointType::from_keyword("slide"), Some(JointType::Prismatic));
        assert_eq!(JointType::from_keyword("ball"), Some(JointType::Spherical));
        assert_eq!(JointType::from_keyword("none"), Some(JointType::Free));
        assert_eq!(JointType::from_keyword("floating"), Some(JointType::Free));
        assert_eq!(JointType::from_keyword("world"), Some(JointType::Fixed));
        assert_eq!(JointType::from_keyword("planar"), Some(JointType::Planar));
        assert_eq!(JointType::from_keyword("screw"), None);
    }

    #[test]
    fn shape_keywords() {
        assert_eq!(ShapeKind::from_keyword("hfield"), Some(ShapeKind::Heightfield));
        assert_eq!(ShapeKind::from_keyword("capsule"), Some(ShapeKind::Capsule));
        assert_eq!(ShapeKind::from_keyword("cone"), None);
        assert_eq!(ShapeKind::Heightfield.to_string(), "hfield");
    }

    #[test]
    fn dialect_parses_case_insensitively() {
        assert_eq!("MJCF".parse::<Dialect>(), Ok(Dialect::Mjcf));
        assert_eq!("urdf".parse::<Dialect>(), Ok(Dialect::Urdf));
        assert_eq!("rlsim".parse::<Dialect>(), Ok(Dialect::Rlsim));
        assert!("sdf".parse::<Dialect>().is_err());
        assert_eq!(Dialect::Urdf.to_string(), "urdf");
    }

    // -- joints --

    #[test]
    fn unlimited_sentinel() {
        assert!(!JointLimits::UNLIMITED.is_limited());
        assert!(!JointLimits::default().is_limited());
        assert!(JointLimits::new(-1.0, 1.0).is_limited());
        assert!(JointLimits::HALF_TURN.is_limited());
    }

    #[test]
    fn dof_per_joint_type() {
        assert_eq!(JointType::Free.dof(), 6);
        assert_eq!(JointType::Fixed.dof(), 0);
        assert_eq!(JointType::Revolute.dof(), 1);
        assert_eq!(JointType::Spherical.dof(), 3);
        assert!(JointType::Prismatic.is_actuated());
        assert!(!JointType::Planar.is_actuated());
    }

    #[test]
    fn new_joint_is_unowned_and_unlimited() {
        let j = KinematicJoint::new("hip", JointType::Revolute);
        assert!(j.owner.is_none());
        assert!(!j.limits.is_limited());
        assert_eq!(j.local_transform, Transform::identity());
    }

    // -- shapes --

    #[test]
    fn volumes() {
        let b = ShapeDescriptor::new(ShapeKind::Box, [1.0, 2.0, 3.0]);
        assert!((b.volume().unwrap() - 6.0).abs() < 1e-5);

        let s = ShapeDescriptor::new(ShapeKind::Sphere, [1.0, 0.0, 0.0]);
        assert!((s.volume().unwrap() - 4.0 / 3.0 * PI).abs() < 1e-5);

        let c = ShapeDescriptor::new(ShapeKind::Capsule, [1.0, 2.0, 0.0]);
        assert!((c.volume().unwrap() - (2.0 * PI + 4.0 / 3.0 * PI)).abs() < 1e-4);

        let p = ShapeDescriptor::new(ShapeKind::Plane, [3.0, 3.0, 0.0]);
        assert!(p.volume().is_none());
    }

    // -- visuals / inertia --

    #[test]
    fn material_overrides_drawable_colors() {
        let mut d = Drawable::new("torso_visual", ShapeDescriptor::new(ShapeKind::Sphere, [0.1, 0.0, 0.0]));
        assert_eq!(d.rgba, DEFAULT_RGBA);
        let red = MaterialAsset::with_color("red", [1.0, 0.0, 0.0, 1.0]);
        d.apply_material(&red);
        assert_eq!(d.rgba, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(d.material.as_deref(), Some("red"));
        assert!((d.shininess - DEFAULT_SHININESS).abs() < f32::EPSILON);
    }

    #[test]
    fn inertia_matrix_is_symmetric() {
        let inertial = Inertial {
            inertia: [1.0, 0.1, 0.2, 2.0, 0.3, 3.0],
            ..Inertial::default()
        };
        let m = inertial.matrix();
        assert_eq!(m, m.transpose());
        assert_eq!(inertial.diagonal(), [1.0, 2.0, 3.0]);
        assert!((m[(0, 2)] - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn collider_defaults() {
        let c = Collider::new("foot", ShapeDescriptor::new(ShapeKind::Box, [0.1; 3]));
        assert_eq!(c.collision_group, 1);
        assert_eq!(c.collision_mask, 1);
        assert_eq!(c.friction, DEFAULT_FRICTION);
        assert!((c.density - DEFAULT_DENSITY).abs() < f32::EPSILON);
    }
}
