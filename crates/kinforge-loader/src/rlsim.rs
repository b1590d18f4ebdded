//! Simplified flat (rlsim) models.
//!
//! An rlsim document is JSON: a list of skeleton joints linked by parent
//! index, one `BodyDefs` entry per joint describing its collision shape, and
//! free-standing `DrawShapeDefs` attached to joints by index. Every joint
//! becomes a body carrying that joint, and the tree is rebuilt with the same
//! topology pass URDF uses.

use std::collections::HashMap;

use kinforge_core::config::UpAxis;
use kinforge_core::math::{from_euler, pose, Transform};
use kinforge_core::model::{Actuator, ActuatorKind, RobotModel};
use kinforge_core::tree::{KinematicBody, KinematicTree};
use kinforge_core::types::{Collider, Drawable, JointLimits, JointType, KinematicJoint};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::context::BuildContext;
use crate::error::LoadError;
use crate::geometry::rlsim_shape;
use crate::topology::{assemble, Connection};

/// rlsim joints rotate about x once re-ordered into z-up.
const DEFAULT_AXIS: [f32; 3] = [1.0, 0.0, 0.0];

const PD_KP: f32 = 50.0;
const PD_KV: f32 = 1.0;
/// Gear used when a joint declares no torque limit.
const FALLBACK_GEAR: f32 = 10.0;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Document {
    skeleton: Skeleton,
    body_defs: Vec<BodyDef>,
    draw_shape_defs: Vec<DrawShapeDef>,
    #[serde(default)]
    world_up: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Skeleton {
    joints: Vec<JointDef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JointDef {
    #[serde(default = "undefined")]
    name: String,
    #[serde(rename = "Type", default = "no_type")]
    kind: String,
    #[serde(default = "no_parent")]
    parent: i64,
    #[serde(default)]
    torque_lim: f32,
    #[serde(rename = "LimLow0", default)]
    lim_low: f32,
    #[serde(rename = "LimHigh0", default)]
    lim_high: f32,
    #[serde(flatten)]
    attach: Attach,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BodyDef {
    #[serde(default = "undefined")]
    name: String,
    #[serde(default = "box_shape")]
    shape: String,
    #[serde(default = "unit_mass")]
    mass: f32,
    #[serde(flatten)]
    params: Params,
    #[serde(flatten)]
    attach: Attach,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DrawShapeDef {
    #[serde(default = "undefined")]
    name: String,
    #[serde(default = "box_shape")]
    shape: String,
    #[serde(default = "no_parent")]
    parent_joint: i64,
    #[serde(flatten)]
    params: Params,
    #[serde(flatten)]
    attach: Attach,
    #[serde(flatten)]
    color: Color,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Attach {
    #[serde(default)]
    attach_x: f32,
    #[serde(default)]
    attach_y: f32,
    #[serde(default)]
    attach_z: f32,
    #[serde(default)]
    attach_theta_x: f32,
    #[serde(default)]
    attach_theta_y: f32,
    #[serde(default)]
    attach_theta_z: f32,
}

impl Attach {
    fn transform(&self, up: UpAxis) -> Transform {
        let position = up.to_z_up([self.attach_x, self.attach_y, self.attach_z]);
        let euler = up.to_z_up([self.attach_theta_x, self.attach_theta_y, self.attach_theta_z]);
        pose(position, from_euler(euler))
    }
}

#[derive(Debug, Deserialize)]
struct Params {
    #[serde(rename = "Param0", default = "param")]
    p0: f32,
    #[serde(rename = "Param1", default = "param")]
    p1: f32,
    #[serde(rename = "Param2", default = "param")]
    p2: f32,
}

impl Params {
    fn to_z_up(&self, up: UpAxis) -> [f32; 3] {
        up.to_z_up([self.p0, self.p1, self.p2])
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Color {
    #[serde(default = "red")]
    color_r: f32,
    #[serde(default = "green")]
    color_g: f32,
    #[serde(default = "blue")]
    color_b: f32,
    #[serde(default = "opaque")]
    color_a: f32,
}

fn undefined() -> String {
    "undefined".into()
}
fn no_type() -> String {
    "none".into()
}
fn box_shape() -> String {
    "box".into()
}
const fn no_parent() -> i64 {
    -1
}
const fn unit_mass() -> f32 {
    1.0
}
const fn param() -> f32 {
    0.1
}
const fn red() -> f32 {
    0.3
}
const fn green() -> f32 {
    0.4
}
const fn blue() -> f32 {
    0.5
}
const fn opaque() -> f32 {
    1.0
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Compiles an rlsim JSON document.
pub fn build(text: &str, mut ctx: BuildContext<'_>) -> Result<RobotModel, LoadError> {
    let document: Document = serde_json::from_str(text)?;
    let up = ctx.config.rlsim.world_up.unwrap_or_else(|| world_up(document.world_up.as_deref()));
    let name = ctx.model_name(None, "rlsim");

    let joints = &document.skeleton.joints;
    let count = joints.len();
    if document.body_defs.len() > count {
        return Err(LoadError::InvalidReference {
            entry: format!("body '{}'", document.body_defs[count].name),
            index: i64::try_from(count).unwrap_or(i64::MAX),
            count,
        });
    }

    let mut bodies = Vec::with_capacity(count);
    let mut connections = Vec::with_capacity(count);
    let mut torque_limits = HashMap::with_capacity(count);

    for (i, def) in joints.iter().enumerate() {
        let frame = def.attach.transform(up);
        let mut body = match document.body_defs.get(i) {
            Some(body_def) => body_with_collider(body_def, up, &mut ctx),
            None => {
                warn!(joint = %def.name, "joint without a body definition");
                KinematicBody::new(def.name.clone())
            }
        };
        body.relative_transform = frame;

        let joint = convert_joint(def);
        torque_limits.insert(joint.name.clone(), def.torque_lim);
        match parent_index(def.parent, count, &def.name)? {
            None => body.joints.push(joint),
            Some(parent) => connections.push(Connection {
                joint,
                parent: parent.body_name(joints, &document.body_defs),
                child: body.name.clone(),
                transform: frame,
            }),
        }
        bodies.push(body);
    }

    for shape in &document.draw_shape_defs {
        let Some(index) = parent_index(shape.parent_joint, count, &shape.name)? else {
            return Err(LoadError::InvalidReference {
                entry: format!("draw shape '{}'", shape.name),
                index: shape.parent_joint,
                count,
            });
        };
        let drawable = convert_draw_shape(shape, up, &mut ctx);
        bodies[index.0].drawables.push(drawable);
    }

    let root = assemble(bodies, connections, &mut ctx.exclusions)?;
    let tree = KinematicTree::new(root);
    let actuators = if ctx.config.rlsim.default_actuators {
        default_actuators(&tree, &torque_limits)
    } else {
        Vec::new()
    };

    debug!(model = %name, bodies = tree.len(), actuators = actuators.len(), "compiled rlsim model");
    Ok(ctx.finish(name, tree, actuators))
}

fn world_up(keyword: Option<&str>) -> UpAxis {
    match keyword {
        None => UpAxis::Y,
        Some(keyword) => UpAxis::from_keyword(keyword).unwrap_or_else(|| {
            warn!(keyword, "unknown WorldUp, assuming z-up");
            UpAxis::Z
        }),
    }
}

/// A validated joint index.
#[derive(Debug, Clone, Copy)]
struct JointIndex(usize);

impl JointIndex {
    /// Name of the body created for this joint.
    fn body_name(self, joints: &[JointDef], body_defs: &[BodyDef]) -> String {
        body_defs
            .get(self.0)
            .map_or_else(|| joints[self.0].name.clone(), |b| b.name.clone())
    }
}

/// `-1` means no parent; anything else must index an existing joint.
fn parent_index(raw: i64, count: usize, entry: &str) -> Result<Option<JointIndex>, LoadError> {
    if raw == -1 {
        return Ok(None);
    }
    match usize::try_from(raw) {
        Ok(index) if index < count => Ok(Some(JointIndex(index))),
        _ => Err(LoadError::InvalidReference {
            entry: entry.to_owned(),
            index: raw,
            count,
        }),
    }
}

fn body_with_collider(def: &BodyDef, up: UpAxis, ctx: &mut BuildContext<'_>) -> KinematicBody {
    let shape = rlsim_shape(&def.shape, def.params.to_z_up(up), &def.name, ctx)
        .with_transform(def.attach.transform(up));
    let mut collider = Collider::new(def.name.clone(), shape);
    if def.mass > 0.0 {
        if let Some(volume) = collider.shape.volume().filter(|v| *v > 0.0) {
            collider.density = def.mass / volume;
        }
    }
    let mut body = KinematicBody::new(def.name.clone());
    body.colliders.push(collider);
    body
}

fn convert_joint(def: &JointDef) -> KinematicJoint {
    let joint_type = JointType::from_keyword(&def.kind).unwrap_or_else(|| {
        warn!(joint = %def.name, keyword = %def.kind, "unknown joint type, using fixed");
        JointType::Fixed
    });
    let mut joint = KinematicJoint::new(def.name.clone(), joint_type);
    joint.axis = DEFAULT_AXIS;
    if (def.lim_high - def.lim_low).abs() > f32::EPSILON {
        joint.limits = JointLimits::new(def.lim_low, def.lim_high);
    }
    joint
}

fn convert_draw_shape(def: &DrawShapeDef, up: UpAxis, ctx: &mut BuildContext<'_>) -> Drawable {
    let shape = rlsim_shape(&def.shape, def.params.to_z_up(up), &def.name, ctx)
        .with_transform(def.attach.transform(up));
    let Color {
        color_r: r,
        color_g: g,
        color_b: b,
        color_a: a,
    } = def.color;
    let mut drawable = Drawable::new(def.name.clone(), shape);
    drawable.rgba = [r, g, b, a];
    drawable.specular = [r, g, b];
    drawable
}

/// One PD actuator per actuatable joint; the gear is the joint's torque limit.
fn default_actuators(tree: &KinematicTree, torque_limits: &HashMap<String, f32>) -> Vec<Actuator> {
    tree.joints()
        .filter(|(_, joint)| joint.joint_type.is_actuated())
        .map(|(_, joint)| {
            let limit = torque_limits.get(&joint.name).copied().unwrap_or(0.0);
            let gear = if limit > 0.0 {
                limit
            } else {
                warn!(joint = %joint.name, "joint has no torque limit, using gear {FALLBACK_GEAR}");
                FALLBACK_GEAR
            };
            let mut actuator = Actuator::new(
                joint.name.clone(),
                ActuatorKind::PdController,
                Some(joint.name.clone()),
            );
            actuator.kp = PD_KP;
            actuator.kv = PD_KV;
            actuator.gear = vec![gear];
            actuator
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kinforge_core::config::CompilerConfig;
    use kinforge_core::error::TopologyError;
    use kinforge_core::math::translation_of;
    use kinforge_core::types::ShapeKind;
    use std::f32::consts::PI;

    const WALKER: &str = r#"{
        "Skeleton": { "Joints": [
            { "Name": "root", "Type": "none", "Parent": -1 },
            { "Name": "hip", "Type": "revolute", "Parent": 0, "AttachY": -0.5,
              "LimLow0": -1.0, "LimHigh0": 1.0, "TorqueLim": 150 },
            { "Name": "knee", "Type": "revolute", "Parent": 1, "AttachY": -0.4 },
            { "Name": "shoulder", "Type": "spherical", "Parent": 0, "AttachY": 0.3, "TorqueLim": 60 }
        ]},
        "BodyDefs": [
            { "Name": "pelvis", "Shape": "sphere", "Mass": 4, "Param0": 0.2, "Param1": 0.2, "Param2": 0.2 },
            { "Name": "thigh", "Shape": "capsule", "Mass": 2, "Param0": 0.1, "Param1": 0.4, "Param2": 0.1 },
            { "Name": "shin", "Shape": "box", "Param0": 0.1, "Param1": 0.4, "Param2": 0.1 },
            { "Name": "arm", "Shape": "cylinder", "Mass": 0 }
        ],
        "DrawShapeDefs": [
            { "Name": "pelvis_vis", "Shape": "sphere", "ParentJoint": 0, "Param0": 0.2,
              "ColorR": 1, "ColorG": 0, "ColorB": 0 },
            { "Name": "shin_vis", "Shape": "box", "ParentJoint": 2 }
        ]
    }"#;

    fn compile_with(config: &CompilerConfig, text: &str) -> Result<RobotModel, LoadError> {
        build(text, BuildContext::new(config, None))
    }

    fn compile(text: &str) -> RobotModel {
        compile_with(&CompilerConfig::default(), text).unwrap()
    }

    // -- structure --

    #[test]
    fn joints_become_bodies() {
        let model = compile(WALKER);
        let names: Vec<&str> = model.tree.bodies().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["pelvis", "thigh", "shin", "arm"]);
        assert_eq!(model.tree.root().joints[0].name, "root");
        assert_eq!(model.tree.root().joints[0].joint_type, JointType::Free);
        let shin = model.tree.find("shin").unwrap();
        assert_eq!(shin.joints[0].name, "knee");
        assert_eq!(shin.joints[0].local_transform, Transform::identity());
        assert!(model.is_excluded("pelvis", "thigh"));
        assert!(model.is_excluded("thigh", "shin"));
    }

    #[test]
    fn y_up_is_reordered_into_z_up() {
        let model = compile(WALKER);
        let shin = model.tree.find("shin").unwrap();
        assert_relative_eq!(translation_of(&shin.world_transform)[2], -0.9, epsilon = 1e-6);

        // Param1 (height along y) lands on z.
        let box_size = shin.colliders[0].shape.size;
        assert_relative_eq!(box_size[2], 0.4);
        let thigh = &model.tree.find("thigh").unwrap().colliders[0].shape;
        assert_eq!(thigh.kind, ShapeKind::Capsule);
        assert_relative_eq!(thigh.size[0], 0.05);
        assert_relative_eq!(thigh.size[1], 0.4);
    }

    #[test]
    fn world_up_from_document_and_config() {
        let text = r#"{ "WorldUp": "z",
            "Skeleton": { "Joints": [ { "Name": "a" }, { "Name": "b", "Parent": 0, "AttachY": 1 } ] },
            "BodyDefs": [ { "Name": "a" }, { "Name": "b" } ], "DrawShapeDefs": [] }"#;
        let model = compile(text);
        let b = model.tree.find("b").unwrap();
        assert_relative_eq!(translation_of(&b.relative_transform)[1], 1.0);

        let mut config = CompilerConfig::default();
        config.rlsim.world_up = Some(UpAxis::Y);
        let model = compile_with(&config, text).unwrap();
        let b = model.tree.find("b").unwrap();
        assert_relative_eq!(translation_of(&b.relative_transform)[2], 1.0);
    }

    // -- colliders and drawables --

    #[test]
    fn density_matches_mass() {
        let model = compile(WALKER);
        let pelvis = &model.tree.root().colliders[0];
        let volume = 4.0 / 3.0 * PI * 0.1_f32.powi(3);
        assert_relative_eq!(pelvis.density, 4.0 / volume, max_relative = 1e-4);
        let arm = &model.tree.find("arm").unwrap().colliders[0];
        assert_relative_eq!(arm.density, kinforge_core::types::DEFAULT_DENSITY);
    }

    #[test]
    fn draw_shapes_attach_to_joint_bodies() {
        let model = compile(WALKER);
        let pelvis = model.tree.root();
        assert_eq!(pelvis.drawables[0].name, "pelvis_vis");
        assert_eq!(pelvis.drawables[0].rgba, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(pelvis.drawables[0].specular, [1.0, 0.0, 0.0]);
        let shin = model.tree.find("shin").unwrap();
        assert_eq!(shin.drawables[0].rgba, [0.3, 0.4, 0.5, 1.0]);
    }

    // -- joints and actuators --

    #[test]
    fn limits_only_when_distinct() {
        let model = compile(WALKER);
        let hip = model.tree.joint("hip").unwrap();
        assert_eq!(hip.limits, JointLimits::new(-1.0, 1.0));
        assert_eq!(hip.axis, DEFAULT_AXIS);
        assert!(!model.tree.joint("knee").unwrap().limits.is_limited());
    }

    #[test]
    fn pd_actuators_use_torque_limits() {
        let model = compile(WALKER);
        let names: Vec<&str> = model.actuators.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["hip", "knee", "shoulder"]);
        let hip = model.actuator("hip").unwrap();
        assert_eq!(hip.kind, ActuatorKind::PdController);
        assert_relative_eq!(hip.kp, PD_KP);
        assert_relative_eq!(hip.kv, PD_KV);
        assert_eq!(hip.gear, [150.0]);
        assert_eq!(model.actuator("knee").unwrap().gear, [FALLBACK_GEAR]);
    }

    // -- errors --

    #[test]
    fn two_roots_are_rejected() {
        let text = r#"{ "Skeleton": { "Joints": [ { "Name": "a" }, { "Name": "b" } ] },
            "BodyDefs": [ { "Name": "a" }, { "Name": "b" } ], "DrawShapeDefs": [] }"#;
        let err = compile_with(&CompilerConfig::default(), text).unwrap_err();
        assert!(matches!(err, LoadError::Topology(TopologyError::MultipleRoots(_))));
    }

    #[test]
    fn out_of_range_indices_are_fatal() {
        let text = r#"{ "Skeleton": { "Joints": [ { "Name": "a" }, { "Name": "b", "Parent": 7 } ] },
            "BodyDefs": [ { "Name": "a" }, { "Name": "b" } ], "DrawShapeDefs": [] }"#;
        let err = compile_with(&CompilerConfig::default(), text).unwrap_err();
        assert!(matches!(err, LoadError::InvalidReference { index: 7, count: 2, .. }));

        let text = r#"{ "Skeleton": { "Joints": [ { "Name": "a" } ] },
            "BodyDefs": [ { "Name": "a" } ], "DrawShapeDefs": [ { "Name": "v", "ParentJoint": 3 } ] }"#;
        let err = compile_with(&CompilerConfig::default(), text).unwrap_err();
        assert!(matches!(err, LoadError::InvalidReference { index: 3, .. }));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = compile_with(&CompilerConfig::default(), "{ \"Skeleton\": ").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        let err = compile_with(&CompilerConfig::default(), r#"{ "BodyDefs": [] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
