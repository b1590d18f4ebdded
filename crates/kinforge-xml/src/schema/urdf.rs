//! URDF element table.

use super::AttrType::{Float, FloatArray, String as Str};
use super::ElementSpec;

const GEOMETRY_KINDS: &[&str] = &["box", "sphere", "cylinder", "capsule", "mesh"];

pub(crate) static ELEMENTS: &[ElementSpec] = &[
    ElementSpec {
        name: "robot",
        children: &["link", "joint", "material", "transmission", "gazebo"],
        attributes: &[&[("name", Str), ("version", Str)]],
    },
    ElementSpec {
        name: "link",
        children: &["inertial", "visual", "collision"],
        attributes: &[&[("name", Str), ("type", Str)]],
    },
    ElementSpec {
        name: "inertial",
        children: &["origin", "mass", "inertia"],
        attributes: &[],
    },
    ElementSpec {
        name: "origin",
        children: &[],
        attributes: &[&[("xyz", FloatArray), ("rpy", FloatArray)]],
    },
    ElementSpec {
        name: "mass",
        children: &[],
        attributes: &[&[("value", Float)]],
    },
    ElementSpec {
        name: "inertia",
        children: &[],
        attributes: &[&[
            ("ixx", Float),
            ("ixy", Float),
            ("ixz", Float),
            ("iyy", Float),
            ("iyz", Float),
            ("izz", Float),
        ]],
    },
    ElementSpec {
        name: "visual",
        children: &["origin", "geometry", "material"],
        attributes: &[&[("name", Str)]],
    },
    ElementSpec {
        name: "collision",
        children: &["origin", "geometry"],
        attributes: &[&[("name", Str)]],
    },
    ElementSpec {
        name: "geometry",
        children: GEOMETRY_KINDS,
        attributes: &[],
    },
    ElementSpec {
        name: "box",
        children: &[],
        attributes: &[&[("size", FloatArray)]],
    },
    ElementSpec {
        name: "sphere",
        children: &[],
        attributes: &[&[("radius", Float)]],
    },
    ElementSpec {
        name: "cylinder",
        children: &[],
        attributes: &[&[("radius", Float), ("length", Float)]],
    },
    ElementSpec {
        name: "capsule",
        children: &[],
        attributes: &[&[("radius", Float), ("length", Float)]],
    },
    ElementSpec {
        name: "mesh",
        children: &[],
        attributes: &[&[("filename", Str), ("scale", FloatArray)]],
    },
    ElementSpec {
        name: "material",
        children: &["color", "texture"],
        attributes: &[&[("name", Str)]],
    },
    ElementSpec {
        name: "color",
        children: &[],
        attributes: &[&[("rgba", FloatArray)]],
    },
    ElementSpec {
        name: "texture",
        children: &[],
        attributes: &[&[("filename", Str)]],
    },
    ElementSpec {
        name: "joint",
        children: &[
            "origin", "parent", "child", "axis", "calibration", "dynamics", "limit", "mimic",
            "safety_controller", "hardwareInterface",
        ],
        attributes: &[&[("name", Str), ("type", Str)]],
    },
    ElementSpec {
        name: "parent",
        children: &[],
        attributes: &[&[("link", Str)]],
    },
    ElementSpec {
        name: "child",
        children: &[],
        attributes: &[&[("link", Str)]],
    },
    ElementSpec {
        name: "axis",
        children: &[],
        attributes: &[&[("xyz", FloatArray)]],
    },
    ElementSpec {
        name: "calibration",
        children: &[],
        attributes: &[&[("rising", Float), ("falling", Float)]],
    },
    ElementSpec {
        name: "dynamics",
        children: &[],
        attributes: &[&[("damping", Float), ("friction", Float)]],
    },
    ElementSpec {
        name: "limit",
        children: &[],
        attributes: &[&[
            ("lower", Float),
            ("upper", Float),
            ("effort", Float),
            ("velocity", Float),
        ]],
    },
    ElementSpec {
        name: "mimic",
        children: &[],
        attributes: &[&[("joint", Str), ("multiplier", Float), ("offset", Float)]],
    },
    ElementSpec {
        name: "safety_controller",
        children: &[],
        attributes: &[&[
            ("soft_lower_limit", Float),
            ("soft_upper_limit", Float),
            ("k_position", Float),
            ("k_velocity", Float),
        ]],
    },
    ElementSpec {
        name: "transmission",
        children: &["type", "joint", "actuator"],
        attributes: &[&[("name", Str)]],
    },
    ElementSpec {
        name: "type",
        children: &[],
        attributes: &[],
    },
    ElementSpec {
        name: "actuator",
        children: &["mechanicalReduction", "hardwareInterface"],
        attributes: &[&[("name", Str)]],
    },
    ElementSpec {
        name: "mechanicalReduction",
        children: &[],
        attributes: &[],
    },
    ElementSpec {
        name: "hardwareInterface",
        children: &[],
        attributes: &[],
    },
    ElementSpec {
        name: "gazebo",
        children: &[],
        attributes: &[&[("reference", Str)]],
    },
];
