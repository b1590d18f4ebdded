//! Assertions over compiled models.

use approx::assert_relative_eq;
use kinforge_core::math::{translation_of, Transform};
use kinforge_core::model::RobotModel;

/// Body names in pre-order.
pub fn body_names(model: &RobotModel) -> Vec<String> {
    model.tree.bodies().map(|b| b.name.clone()).collect()
}

/// Joint names in pre-order of their owning bodies.
pub fn joint_names(model: &RobotModel) -> Vec<String> {
    model.tree.joints().map(|(_, j)| j.name.clone()).collect()
}

/// Asserts the translation part of `tf` component-wise.
pub fn assert_translation(tf: &Transform, expected: [f32; 3]) {
    let actual = translation_of(tf);
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(*a, e, epsilon = 1e-5);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
