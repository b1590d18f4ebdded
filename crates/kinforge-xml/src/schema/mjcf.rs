//! MJCF (MuJoCo) element table.

use super::AttrType::{Float, FloatArray, Int, IntArray, String as Str};
use super::ElementSpec;

// ---------------------------------------------------------------------------
// Attribute groups
// ---------------------------------------------------------------------------

const NAMED: &[(&str, super::AttrType)] = &[("name", Str), ("class", Str)];

const POSE: &[(&str, super::AttrType)] = &[
    ("pos", FloatArray),
    ("quat", FloatArray),
    ("euler", FloatArray),
    ("axisangle", FloatArray),
    ("xyaxes", FloatArray),
    ("zaxis", FloatArray),
];

const GEOM: &[(&str, super::AttrType)] = &[
    ("type", Str),
    ("size", FloatArray),
    ("fromto", FloatArray),
    ("contype", Int),
    ("conaffinity", Int),
    ("condim", Int),
    ("group", Int),
    ("priority", Int),
    ("friction", FloatArray),
    ("mass", Float),
    ("density", Float),
    ("solmix", Float),
    ("solref", FloatArray),
    ("solimp", FloatArray),
    ("margin", Float),
    ("gap", Float),
    ("material", Str),
    ("rgba", FloatArray),
    ("mesh", Str),
    ("hfield", Str),
    ("fitscale", Float),
    ("user", FloatArray),
];

const JOINT: &[(&str, super::AttrType)] = &[
    ("type", Str),
    ("axis", FloatArray),
    ("limited", Str),
    ("range", FloatArray),
    ("stiffness", Float),
    ("armature", Float),
    ("damping", Float),
    ("frictionloss", Float),
    ("ref", Float),
    ("springref", Float),
    ("margin", Float),
    ("group", Int),
    ("solreflimit", FloatArray),
    ("solimplimit", FloatArray),
    ("user", FloatArray),
];

const ACTUATOR: &[(&str, super::AttrType)] = &[
    ("joint", Str),
    ("ctrllimited", Str),
    ("ctrlrange", FloatArray),
    ("forcelimited", Str),
    ("forcerange", FloatArray),
    ("gear", FloatArray),
    ("kp", Float),
    ("kv", Float),
    ("gaintype", Str),
    ("biastype", Str),
    ("gainprm", FloatArray),
    ("biasprm", FloatArray),
    ("dyntype", Str),
    ("dynprm", FloatArray),
    ("tendon", Str),
    ("site", Str),
    ("group", Int),
];

const SITE: &[(&str, super::AttrType)] = &[
    ("type", Str),
    ("size", FloatArray),
    ("fromto", FloatArray),
    ("group", Int),
    ("material", Str),
    ("rgba", FloatArray),
];

const CAMERA: &[(&str, super::AttrType)] = &[
    ("mode", Str),
    ("target", Str),
    ("fovy", Float),
    ("ipd", Float),
];

const LIGHT: &[(&str, super::AttrType)] = &[
    ("mode", Str),
    ("target", Str),
    ("directional", Str),
    ("castshadow", Str),
    ("active", Str),
    ("dir", FloatArray),
    ("attenuation", FloatArray),
    ("cutoff", Float),
    ("exponent", Float),
    ("ambient", FloatArray),
    ("diffuse", FloatArray),
    ("specular", FloatArray),
];

const SENSOR: &[(&str, super::AttrType)] = &[
    ("site", Str),
    ("joint", Str),
    ("actuator", Str),
    ("objtype", Str),
    ("objname", Str),
    ("noise", Float),
    ("cutoff", Float),
];

const EQUALITY: &[(&str, super::AttrType)] = &[
    ("body1", Str),
    ("body2", Str),
    ("joint1", Str),
    ("joint2", Str),
    ("anchor", FloatArray),
    ("polycoef", FloatArray),
    ("active", Str),
    ("solref", FloatArray),
    ("solimp", FloatArray),
];

const ACTUATOR_KINDS: &[&str] = &["motor", "position", "velocity", "general"];

const SENSOR_KINDS: &[&str] = &[
    "touch", "accelerometer", "velocimeter", "gyro", "force", "torque", "jointpos", "jointvel",
    "actuatorfrc", "framepos", "framequat",
];

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

pub(crate) static ELEMENTS: &[ElementSpec] = &[
    ElementSpec {
        name: "mujoco",
        children: &[
            "compiler", "option", "size", "visual", "statistic", "default", "asset", "worldbody",
            "contact", "equality", "tendon", "actuator", "sensor", "keyframe", "custom",
        ],
        attributes: &[&[("model", Str)]],
    },
    ElementSpec {
        name: "compiler",
        children: &[],
        attributes: &[&[
            ("angle", Str),
            ("coordinate", Str),
            ("meshdir", Str),
            ("texturedir", Str),
            ("assetdir", Str),
            ("eulerseq", Str),
            ("inertiafromgeom", Str),
            ("balanceinertia", Str),
            ("autolimits", Str),
            ("boundmass", Float),
            ("boundinertia", Float),
            ("settotalmass", Float),
        ]],
    },
    ElementSpec {
        name: "option",
        children: &["flag"],
        attributes: &[&[
            ("timestep", Float),
            ("gravity", FloatArray),
            ("wind", FloatArray),
            ("density", Float),
            ("viscosity", Float),
            ("integrator", Str),
            ("cone", Str),
            ("jacobian", Str),
            ("solver", Str),
            ("iterations", Int),
            ("tolerance", Float),
        ]],
    },
    ElementSpec {
        name: "flag",
        children: &[],
        attributes: &[&[
            ("contact", Str),
            ("gravity", Str),
            ("warmstart", Str),
            ("energy", Str),
        ]],
    },
    ElementSpec {
        name: "size",
        children: &[],
        attributes: &[&[
            ("njmax", Int),
            ("nconmax", Int),
            ("nstack", Int),
            ("nuserdata", Int),
            ("nkey", Int),
            ("memory", Str),
        ]],
    },
    ElementSpec {
        name: "visual",
        children: &["global", "quality", "headlight", "map", "scale", "rgba"],
        attributes: &[],
    },
    ElementSpec {
        name: "global",
        children: &[],
        attributes: &[&[
            ("fovy", Float),
            ("ipd", Float),
            ("azimuth", Float),
            ("elevation", Float),
            ("offwidth", Int),
            ("offheight", Int),
        ]],
    },
    ElementSpec {
        name: "quality",
        children: &[],
        attributes: &[&[("shadowsize", Int), ("offsamples", Int), ("numslices", Int)]],
    },
    ElementSpec {
        name: "headlight",
        children: &[],
        attributes: &[&[
            ("ambient", FloatArray),
            ("diffuse", FloatArray),
            ("specular", FloatArray),
            ("active", Int),
        ]],
    },
    ElementSpec {
        name: "map",
        children: &[],
        attributes: &[&[("znear", Float), ("zfar", Float), ("haze", Float)]],
    },
    ElementSpec {
        name: "scale",
        children: &[],
        attributes: &[&[("forcewidth", Float), ("contactwidth", Float), ("framelength", Float)]],
    },
    ElementSpec {
        name: "rgba",
        children: &[],
        attributes: &[&[("haze", FloatArray), ("fog", FloatArray), ("com", FloatArray)]],
    },
    ElementSpec {
        name: "statistic",
        children: &[],
        attributes: &[&[
            ("meanmass", Float),
            ("meansize", Float),
            ("extent", Float),
            ("center", FloatArray),
        ]],
    },
    ElementSpec {
        name: "default",
        children: &[
            "default", "mesh", "material", "joint", "geom", "site", "camera", "light", "motor",
            "position", "velocity", "general",
        ],
        attributes: &[&[("class", Str)]],
    },
    ElementSpec {
        name: "asset",
        children: &["mesh", "material", "texture", "hfield", "skin"],
        attributes: &[],
    },
    ElementSpec {
        name: "mesh",
        children: &[],
        attributes: &[
            NAMED,
            &[
                ("file", Str),
                ("scale", FloatArray),
                ("refpos", FloatArray),
                ("refquat", FloatArray),
                ("vertex", FloatArray),
                ("face", IntArray),
            ],
        ],
    },
    ElementSpec {
        name: "material",
        children: &[],
        attributes: &[
            NAMED,
            &[
                ("texture", Str),
                ("texrepeat", FloatArray),
                ("texuniform", Str),
                ("emission", Float),
                ("specular", FloatArray),
                ("shininess", Float),
                ("reflectance", Float),
                ("rgba", FloatArray),
            ],
        ],
    },
    ElementSpec {
        name: "texture",
        children: &[],
        attributes: &[&[
            ("name", Str),
            ("type", Str),
            ("builtin", Str),
            ("file", Str),
            ("mark", Str),
            ("rgb1", FloatArray),
            ("rgb2", FloatArray),
            ("markrgb", FloatArray),
            ("random", Float),
            ("width", Int),
            ("height", Int),
            ("gridsize", IntArray),
            ("gridlayout", Str),
        ]],
    },
    ElementSpec {
        name: "hfield",
        children: &[],
        attributes: &[&[
            ("name", Str),
            ("file", Str),
            ("nrow", Int),
            ("ncol", Int),
            ("size", FloatArray),
        ]],
    },
    ElementSpec {
        name: "skin",
        children: &[],
        attributes: &[&[("name", Str), ("file", Str), ("material", Str), ("rgba", FloatArray)]],
    },
    ElementSpec {
        name: "worldbody",
        children: &["body", "geom", "site", "camera", "light"],
        attributes: &[],
    },
    ElementSpec {
        name: "body",
        children: &[
            "body", "inertial", "joint", "freejoint", "geom", "site", "camera", "light",
        ],
        attributes: &[
            &[("name", Str), ("childclass", Str), ("mocap", Str), ("user", FloatArray)],
            POSE,
        ],
    },
    ElementSpec {
        name: "inertial",
        children: &[],
        attributes: &[
            POSE,
            &[
                ("mass", Float),
                ("diaginertia", FloatArray),
                ("fullinertia", FloatArray),
            ],
        ],
    },
    ElementSpec {
        name: "joint",
        children: &[],
        attributes: &[NAMED, JOINT, &[("pos", FloatArray)]],
    },
    ElementSpec {
        name: "freejoint",
        children: &[],
        attributes: &[&[("name", Str), ("group", Int)]],
    },
    ElementSpec {
        name: "geom",
        children: &[],
        attributes: &[NAMED, POSE, GEOM],
    },
    ElementSpec {
        name: "site",
        children: &[],
        attributes: &[NAMED, POSE, SITE],
    },
    ElementSpec {
        name: "camera",
        children: &[],
        attributes: &[NAMED, POSE, CAMERA],
    },
    ElementSpec {
        name: "light",
        children: &[],
        attributes: &[NAMED, &[("pos", FloatArray)], LIGHT],
    },
    ElementSpec {
        name: "contact",
        children: &["pair", "exclude"],
        attributes: &[],
    },
    ElementSpec {
        name: "pair",
        children: &[],
        attributes: &[
            NAMED,
            &[
                ("geom1", Str),
                ("geom2", Str),
                ("condim", Int),
                ("friction", FloatArray),
                ("solref", FloatArray),
                ("solimp", FloatArray),
                ("margin", Float),
                ("gap", Float),
            ],
        ],
    },
    ElementSpec {
        name: "exclude",
        children: &[],
        attributes: &[&[("name", Str), ("body1", Str), ("body2", Str)]],
    },
    ElementSpec {
        name: "equality",
        children: &["connect", "weld", "joint"],
        attributes: &[],
    },
    ElementSpec {
        name: "connect",
        children: &[],
        attributes: &[NAMED, EQUALITY],
    },
    ElementSpec {
        name: "weld",
        children: &[],
        attributes: &[NAMED, EQUALITY, &[("relpose", FloatArray)]],
    },
    ElementSpec {
        name: "tendon",
        children: &["fixed", "spatial"],
        attributes: &[],
    },
    ElementSpec {
        name: "fixed",
        children: &["joint"],
        attributes: &[
            NAMED,
            &[("limited", Str), ("range", FloatArray), ("stiffness", Float), ("damping", Float)],
        ],
    },
    ElementSpec {
        name: "spatial",
        children: &["site", "geom"],
        attributes: &[
            NAMED,
            &[
                ("limited", Str),
                ("range", FloatArray),
                ("width", Float),
                ("rgba", FloatArray),
                ("material", Str),
            ],
        ],
    },
    ElementSpec {
        name: "actuator",
        children: ACTUATOR_KINDS,
        attributes: &[],
    },
    ElementSpec {
        name: "motor",
        children: &[],
        attributes: &[NAMED, ACTUATOR],
    },
    ElementSpec {
        name: "position",
        children: &[],
        attributes: &[NAMED, ACTUATOR],
    },
    ElementSpec {
        name: "velocity",
        children: &[],
        attributes: &[NAMED, ACTUATOR],
    },
    ElementSpec {
        name: "general",
        children: &[],
        attributes: &[NAMED, ACTUATOR],
    },
    ElementSpec {
        name: "sensor",
        children: SENSOR_KINDS,
        attributes: &[],
    },
    ElementSpec {
        name: "touch",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "accelerometer",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "velocimeter",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "gyro",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "force",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "torque",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "jointpos",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "jointvel",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "actuatorfrc",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "framepos",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "framequat",
        children: &[],
        attributes: &[NAMED, SENSOR],
    },
    ElementSpec {
        name: "keyframe",
        children: &["key"],
        attributes: &[],
    },
    ElementSpec {
        name: "key",
        children: &[],
        attributes: &[&[
            ("name", Str),
            ("time", Float),
            ("qpos", FloatArray),
            ("qvel", FloatArray),
            ("act", FloatArray),
            ("ctrl", FloatArray),
        ]],
    },
    ElementSpec {
        name: "custom",
        children: &["numeric", "text"],
        attributes: &[],
    },
    ElementSpec {
        name: "numeric",
        children: &[],
        attributes: &[&[("name", Str), ("size", Int), ("data", FloatArray)]],
    },
    ElementSpec {
        name: "text",
        children: &[],
        attributes: &[&[("name", Str), ("data", Str)]],
    },
];
