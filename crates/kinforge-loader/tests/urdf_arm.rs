//! Integration test: compile the arm URDF model end to end.
//!
//! The links and joints are declared in no useful order; the compiler must
//! rebuild the chain `base_link -> upper_arm -> forearm -> gripper`, place
//! each joint on its child link and share mesh and material assets.

use approx::assert_relative_eq;
use kinforge_core::config::CompilerConfig;
use kinforge_core::model::{ActuatorKind, RobotModel};
use kinforge_core::types::{Dialect, JointType, ShapeKind};
use kinforge_loader::load_str;
use kinforge_test_utils::{assert_translation, body_names, joint_names, ARM_URDF};
use nalgebra::Vector3;

fn arm() -> RobotModel {
    load_str(ARM_URDF, Dialect::Urdf, &CompilerConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

#[test]
fn chain_is_rebuilt_top_down() {
    let model = arm();
    assert_eq!(model.name, "arm");
    assert_eq!(body_names(&model), ["base_link", "upper_arm", "forearm", "gripper"]);
    assert_eq!(joint_names(&model), ["shoulder", "elbow", "wrist"]);
    assert_eq!(model.tree.len(), 4);
    assert!(model.tree.root().joints.is_empty());
    assert!(model.diagnostics.is_empty(), "{:?}", model.diagnostics);

    let pairs: Vec<(&str, &str)> = model
        .exclusion_pairs
        .iter()
        .map(|(a, b)| (a.as_str(), b.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [("base_link", "upper_arm"), ("upper_arm", "forearm"), ("forearm", "gripper")]
    );
}

#[test]
fn joint_origins_place_child_links() {
    let model = arm();
    assert_translation(&model.tree.find("upper_arm").unwrap().world_transform, [0.0, 0.0, 0.1]);
    assert_translation(&model.tree.find("forearm").unwrap().world_transform, [0.0, 0.0, 0.5]);
    assert_translation(&model.tree.find("gripper").unwrap().world_transform, [0.0, 0.0, 0.8]);

    // The shoulder yaw turns everything below it a quarter turn.
    let forearm = model.tree.find("forearm").unwrap();
    let x = forearm.world_transform.rotation * Vector3::x();
    assert_relative_eq!(x.y, 1.0, epsilon = 1e-5);

    let wrist = model.tree.find("gripper").unwrap().joint("wrist").unwrap();
    assert_translation(&wrist.local_transform, [0.0, 0.0, 0.0]);
}

// ---------------------------------------------------------------------------
// Joints
// ---------------------------------------------------------------------------

#[test]
fn joint_kinds_and_limits() {
    let model = arm();
    let shoulder = model.tree.joint("shoulder").unwrap();
    assert_eq!(shoulder.joint_type, JointType::Revolute);
    assert_eq!(shoulder.axis, [0.0, 0.0, 1.0]);
    assert_relative_eq!(shoulder.limits.lower, -1.5);
    assert_relative_eq!(shoulder.limits.upper, 1.5);
    assert_relative_eq!(shoulder.damping, 0.2);

    let elbow = model.tree.joint("elbow").unwrap();
    assert_eq!(elbow.joint_type, JointType::Revolute);
    assert_eq!(elbow.axis, [0.0, 1.0, 0.0]);
    assert!(!elbow.limits.is_limited());

    assert_eq!(model.tree.joint("wrist").unwrap().joint_type, JointType::Fixed);
    assert_eq!(model.dof(), 2);
}

#[test]
fn actuatable_joints_get_torque_actuators() {
    let model = arm();
    let names: Vec<&str> = model.actuators.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["shoulder", "elbow"]);
    for actuator in &model.actuators {
        assert_eq!(actuator.kind, ActuatorKind::Torque);
        assert_eq!(actuator.joint.as_deref(), Some(actuator.name.as_str()));
        assert_eq!(actuator.gear, [2.0]);
    }
}

// ---------------------------------------------------------------------------
// Geometry and assets
// ---------------------------------------------------------------------------

#[test]
fn shared_mesh_is_registered_once() {
    let model = arm();
    assert_eq!(model.meshes.len(), 2);

    let upper = model.tree.find("upper_arm").unwrap();
    let visual = upper.drawables[0].shape.mesh.as_ref().unwrap();
    let collision = upper.colliders[0].shape.mesh.as_ref().unwrap();
    assert_eq!(visual, collision);
    assert_eq!(visual.file, "meshes/upper.stl");

    let gripper = &model.tree.find("gripper").unwrap().drawables[0];
    assert_eq!(gripper.shape.size, [0.001; 3]);
}

#[test]
fn visuals_and_collisions_keep_their_origins() {
    let model = arm();
    let forearm = model.tree.find("forearm").unwrap();
    assert_eq!(forearm.drawables[0].name, "forearm_visual_0");
    assert_eq!(forearm.drawables[0].shape.kind, ShapeKind::Cylinder);
    assert_eq!(forearm.colliders[0].name, "forearm_collision_0");
    assert_eq!(forearm.colliders[0].shape.kind, ShapeKind::Capsule);
    assert_eq!(forearm.colliders[0].shape.size, [0.03, 0.3, 0.0]);
    assert_translation(&forearm.colliders[0].shape.local_transform, [0.0, 0.0, 0.15]);

    let inertial = forearm.inertial.as_ref().unwrap();
    assert_relative_eq!(inertial.mass, 0.8);
    assert_eq!(inertial.diagonal(), [0.01, 0.01, 0.001]);
}

#[test]
fn named_and_embedded_materials() {
    let model = arm();
    assert_eq!(model.materials.len(), 2);

    let gripper = &model.tree.find("gripper").unwrap().drawables[0];
    assert_eq!(gripper.material.as_deref(), Some("blue"));
    assert_eq!(gripper.rgba, [0.0, 0.0, 0.8, 1.0]);

    let base = &model.tree.root().drawables[0];
    assert_eq!(base.material.as_deref(), Some("grey"));
    assert_eq!(base.rgba, [0.5, 0.5, 0.5, 1.0]);
}
