//! Integration test: compile the y-up walker rlsim document end to end.
//!
//! Joints of the flat skeleton become bodies, the y-up attach frames and
//! shape parameters are reordered into z-up, and every actuated joint gets a
//! PD actuator geared by its torque limit.

use approx::assert_relative_eq;
use kinforge_core::config::{CompilerConfig, UpAxis};
use kinforge_core::model::{ActuatorKind, RobotModel};
use kinforge_core::types::{Dialect, JointType, ShapeKind};
use kinforge_loader::load_str;
use kinforge_test_utils::{assert_translation, body_names, joint_names, WALKER_RLSIM};

fn walker() -> RobotModel {
    load_str(WALKER_RLSIM, Dialect::Rlsim, &CompilerConfig::default()).unwrap()
}

#[test]
fn skeleton_becomes_a_tree() {
    let model = walker();
    assert_eq!(model.name, "rlsim");
    assert_eq!(body_names(&model), ["pelvis", "thigh", "shin", "upper_arm"]);
    assert_eq!(joint_names(&model), ["root", "hip", "knee", "shoulder"]);
    assert_eq!(model.tree.joint("root").unwrap().joint_type, JointType::Free);
    assert_eq!(model.tree.joint("shoulder").unwrap().joint_type, JointType::Spherical);
    assert_eq!(model.dof(), 11);
    assert!(model.diagnostics.is_empty(), "{:?}", model.diagnostics);

    assert!(model.is_excluded("pelvis", "thigh"));
    assert!(model.is_excluded("shin", "thigh"));
    assert!(model.is_excluded("pelvis", "upper_arm"));
    assert!(!model.is_excluded("pelvis", "shin"));
}

#[test]
fn y_up_frames_become_z_up() {
    let model = walker();
    assert_translation(&model.tree.find("thigh").unwrap().world_transform, [0.0, 0.0, -0.1]);
    assert_translation(&model.tree.find("shin").unwrap().world_transform, [0.0, 0.0, -0.55]);
    assert_translation(&model.tree.find("upper_arm").unwrap().world_transform, [0.0, 0.1, 0.4]);
}

#[test]
fn z_up_override_keeps_frames() {
    let mut config = CompilerConfig::default();
    config.rlsim.world_up = Some(UpAxis::Z);
    let model = load_str(WALKER_RLSIM, Dialect::Rlsim, &config).unwrap();
    assert_translation(&model.tree.find("thigh").unwrap().world_transform, [0.0, -0.1, 0.0]);
}

#[test]
fn colliders_carry_shape_and_density() {
    let model = walker();
    let pelvis = &model.tree.root().colliders[0];
    assert_eq!(pelvis.shape.kind, ShapeKind::Box);
    assert_eq!(pelvis.shape.size, [0.3, 0.2, 0.2]);
    assert_relative_eq!(pelvis.density, 500.0, max_relative = 1e-4);

    let thigh = &model.tree.find("thigh").unwrap().colliders[0];
    assert_eq!(thigh.shape.kind, ShapeKind::Capsule);
    assert_relative_eq!(thigh.shape.size[0], 0.05);
    assert_relative_eq!(thigh.shape.size[1], 0.35);
    assert_translation(&thigh.shape.local_transform, [0.0, 0.0, -0.2]);
}

#[test]
fn draw_shapes_join_their_bodies() {
    let model = walker();
    let pelvis = &model.tree.root().drawables[0];
    assert_eq!(pelvis.name, "pelvis_vis");
    assert_eq!(pelvis.rgba, [0.9, 0.1, 0.1, 1.0]);

    let thigh = &model.tree.find("thigh").unwrap().drawables[0];
    assert_eq!(thigh.name, "thigh_vis");
    assert_eq!(thigh.rgba, [0.3, 0.4, 0.5, 1.0]);
    assert!(model.tree.find("shin").unwrap().drawables.is_empty());
}

#[test]
fn limits_and_axes() {
    let model = walker();
    let hip = model.tree.joint("hip").unwrap();
    assert_eq!(hip.axis, [1.0, 0.0, 0.0]);
    assert_relative_eq!(hip.limits.lower, -2.0);
    assert_relative_eq!(hip.limits.upper, 1.0);

    let knee = model.tree.joint("knee").unwrap();
    assert_relative_eq!(knee.limits.lower, 0.0);
    assert_relative_eq!(knee.limits.upper, 2.5);

    assert!(!model.tree.joint("shoulder").unwrap().limits.is_limited());
}

#[test]
fn pd_actuators_are_geared_by_torque_limit() {
    let model = walker();
    let gears: Vec<(&str, f32)> = model
        .actuators
        .iter()
        .map(|a| (a.name.as_str(), a.gear[0]))
        .collect();
    assert_eq!(gears, [("hip", 200.0), ("knee", 150.0), ("shoulder", 10.0)]);
    for actuator in &model.actuators {
        assert_eq!(actuator.kind, ActuatorKind::PdController);
        assert_relative_eq!(actuator.kp, 50.0);
        assert_relative_eq!(actuator.kv, 1.0);
    }
}
