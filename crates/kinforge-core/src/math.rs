//! Frame math shared by the normalizers and the tree builders.
//!
//! All transforms are rigid (`Isometry3<f32>`). Homogeneous 4×4 matrices are
//! only produced at the boundary through [`Isometry3::to_homogeneous`].

use std::f32::consts::PI;

use nalgebra::{Isometry3, Quaternion, Rotation3, Translation3, Unit, UnitQuaternion, Vector3};

/// Rigid transform from a child frame into its parent frame.
pub type Transform = Isometry3<f32>;

const EPS: f32 = 1e-6;

/// Builds a transform from a translation and a rotation.
pub fn pose(translation: [f32; 3], rotation: UnitQuaternion<f32>) -> Transform {
    Isometry3::from_parts(
        Translation3::new(translation[0], translation[1], translation[2]),
        rotation,
    )
}

/// Rotation from fixed-axis angles `[rx, ry, rz]` in radians, applied about
/// x, then y, then z (`R = Rz · Ry · Rx`, the URDF roll-pitch-yaw order).
pub fn from_euler(angles: [f32; 3]) -> UnitQuaternion<f32> {
    UnitQuaternion::from_euler_angles(angles[0], angles[1], angles[2])
}

/// Rotation from a quaternion stored scalar-first (`w x y z`).
///
/// Returns `None` for a zero quaternion.
pub fn from_wxyz(q: [f32; 4]) -> Option<UnitQuaternion<f32>> {
    let raw = Quaternion::new(q[0], q[1], q[2], q[3]);
    if raw.norm() < EPS {
        return None;
    }
    Some(UnitQuaternion::from_quaternion(raw))
}

/// Shortest-arc rotation taking direction `from` onto direction `to`.
///
/// Opposite directions rotate half a turn about an axis perpendicular to
/// `from`. A zero-length input yields the identity.
pub fn shortest_arc(from: [f32; 3], to: [f32; 3]) -> UnitQuaternion<f32> {
    let a = Vector3::from(from);
    let b = Vector3::from(to);
    if a.norm() < EPS || b.norm() < EPS {
        return UnitQuaternion::identity();
    }
    if let Some(q) = UnitQuaternion::rotation_between(&a, &b) {
        return q;
    }
    // Antiparallel: any axis orthogonal to `from` works.
    let helper = if a.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let axis = Unit::new_normalize(a.cross(&helper));
    UnitQuaternion::from_axis_angle(&axis, PI)
}

/// Rotation of `angle` radians about `axis`. A zero axis yields the identity.
pub fn from_axis_angle(axis: [f32; 3], angle: f32) -> UnitQuaternion<f32> {
    Unit::try_new(Vector3::from(axis), EPS).map_or_else(UnitQuaternion::identity, |axis| {
        UnitQuaternion::from_axis_angle(&axis, angle)
    })
}

/// Rotation whose local x and y axes point along `x_axis` and `y_axis`.
///
/// `y_axis` is orthogonalized against `x_axis` first. Returns `None` when the
/// two inputs are degenerate or parallel.
pub fn from_frame_axes(x_axis: [f32; 3], y_axis: [f32; 3]) -> Option<UnitQuaternion<f32>> {
    let x = Unit::try_new(Vector3::from(x_axis), EPS)?.into_inner();
    let raw_y = Vector3::from(y_axis);
    let y = Unit::try_new(raw_y - x * x.dot(&raw_y), EPS)?.into_inner();
    let z = x.cross(&y);
    let basis = Rotation3::from_basis_unchecked(&[x, y, z]);
    Some(UnitQuaternion::from_rotation_matrix(&basis))
}

/// Expresses `child_world` in the frame of `parent_world`.
pub fn relative(parent_world: &Transform, child_world: &Transform) -> Transform {
    parent_world.inverse() * child_world
}

/// Translation part of a transform as a plain array.
pub fn translation_of(tf: &Transform) -> [f32; 3] {
    let t = tf.translation.vector;
    [t.x, t.y, t.z]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
