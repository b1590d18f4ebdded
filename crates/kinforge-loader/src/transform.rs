//! Local transforms from position and rotation attributes.

use kinforge_core::config::AngleUnit;
use kinforge_core::math::{
    from_axis_angle, from_euler, from_frame_axes, from_wxyz, pose, shortest_arc, Transform,
};
use kinforge_xml::{Element, Scope};
use nalgebra::UnitQuaternion;

const Z_AXIS: [f32; 3] = [0.0, 0.0, 1.0];

/// Pose of an MJCF element in its parent's frame.
///
/// Position comes from `pos` (zero when absent). Rotation comes from the
/// first encoding present, in the order `euler`, `quat`, `zaxis`,
/// `axisangle`, `xyaxes`; encodings are never composed. An encoding with the
/// wrong number of values is skipped.
pub fn extract_transform(scope: &Scope<'_>, angle: AngleUnit) -> Transform {
    let pos = scope.get_vec3("pos", [0.0; 3]);
    pose(pos, extract_rotation(scope, angle))
}

pub fn extract_rotation(scope: &Scope<'_>, angle: AngleUnit) -> UnitQuaternion<f32> {
    if let Some([x, y, z]) = scope.vec3("euler") {
        return from_euler([
            angle.to_radians(x),
            angle.to_radians(y),
            angle.to_radians(z),
        ]);
    }
    if let Some(q) = scope.vec4("quat") {
        return from_wxyz(q).unwrap_or_else(UnitQuaternion::identity);
    }
    if let Some(z) = scope.vec3("zaxis") {
        return shortest_arc(Z_AXIS, z);
    }
    if let Some([x, y, z, a]) = scope.vec4("axisangle") {
        return from_axis_angle([x, y, z], angle.to_radians(a));
    }
    if let Some(v) = scope.float_array("xyaxes").filter(|v| v.len() == 6) {
        return from_frame_axes([v[0], v[1], v[2]], [v[3], v[4], v[5]])
            .unwrap_or_else(UnitQuaternion::identity);
    }
    UnitQuaternion::identity()
}

/// Pose of a URDF `<origin xyz rpy>` element; identity when absent.
pub fn origin_transform(origin: Option<Element<'_>>) -> Transform {
    origin.map_or_else(Transform::identity, |o| {
        pose(o.get_vec3("xyz", [0.0; 3]), from_euler(o.get_vec3("rpy", [0.0; 3])))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
