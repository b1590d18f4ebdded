//! Flat-link (URDF) models.
//!
//! Links become bodies and joints become [`Connection`]s; the tree is then
//! rebuilt by [`topology::assemble`](crate::topology::assemble).

use kinforge_core::model::{Actuator, ActuatorKind, RobotModel};
use kinforge_core::tree::{KinematicBody, KinematicTree};
use kinforge_core::types::{
    Collider, Drawable, Inertial, JointLimits, JointType, KinematicJoint, MaterialAsset,
    ShapeDescriptor,
};
use kinforge_xml::{Element, ElementTree, SchemaKind};
use tracing::{debug, warn};

use crate::context::BuildContext;
use crate::error::LoadError;
use crate::geometry::urdf_shape;
use crate::topology::{assemble, Connection};
use crate::transform::origin_transform;

/// URDF joints rotate or slide about x unless told otherwise.
const DEFAULT_AXIS: [f32; 3] = [1.0, 0.0, 0.0];

/// Gear ratio of generated torque actuators.
const DEFAULT_GEAR: f32 = 2.0;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compiles a URDF element tree.
pub fn build(tree: &ElementTree, mut ctx: BuildContext<'_>) -> Result<RobotModel, LoadError> {
    let kind = tree.schema().kind();
    if kind != SchemaKind::Urdf {
        return Err(LoadError::MissingElement {
            element: "robot".into(),
            context: format!("a {kind} document"),
        });
    }

    let robot = tree.root();
    let name = ctx.model_name(robot.string("name"), "robot");
    ctx.declare_names(robot.descendants().iter().filter_map(|e| e.string("name")));

    for material in robot.children_of_type("material") {
        declare_material(material, &mut ctx);
    }

    let bodies: Vec<KinematicBody> = robot
        .children_of_type("link")
        .map(|link| convert_link(link, &mut ctx))
        .collect();
    let connections = robot
        .children_of_type("joint")
        .map(|joint| convert_joint(joint, &mut ctx))
        .collect::<Result<Vec<_>, _>>()?;

    let root = assemble(bodies, connections, &mut ctx.exclusions)?;
    let kinematic_tree = KinematicTree::new(root);

    let actuators = if ctx.config.urdf.default_actuators {
        default_actuators(&kinematic_tree)
    } else {
        Vec::new()
    };

    debug!(
        model = %name,
        links = kinematic_tree.len(),
        actuators = actuators.len(),
        "compiled URDF model"
    );
    Ok(ctx.finish(name, kinematic_tree, actuators))
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

fn convert_link(link: Element<'_>, ctx: &mut BuildContext<'_>) -> KinematicBody {
    let name = link
        .string("name")
        .map_or_else(|| ctx.unnamed("link"), str::to_owned);
    let mut body = KinematicBody::new(name);
    body.inertial = link.first_child("inertial").map(convert_inertial);

    for (i, visual) in link.children_of_type("visual").enumerate() {
        let label = visual
            .string("name")
            .map_or_else(|| format!("{}_visual_{i}", body.name), str::to_owned);
        let Some(shape) = element_shape(visual, &label, ctx) else {
            continue;
        };
        let mut drawable = Drawable::new(label, shape);
        if let Some(material) = visual.first_child("material") {
            apply_visual_material(&mut drawable, material, ctx);
        }
        body.drawables.push(drawable);
    }

    for (i, collision) in link.children_of_type("collision").enumerate() {
        let label = collision
            .string("name")
            .map_or_else(|| format!("{}_collision_{i}", body.name), str::to_owned);
        if let Some(shape) = element_shape(collision, &label, ctx) {
            body.colliders.push(Collider::new(label, shape));
        }
    }
    body
}

/// Shape of a `<visual>` or `<collision>`, placed at its `<origin>`.
fn element_shape(
    element: Element<'_>,
    label: &str,
    ctx: &mut BuildContext<'_>,
) -> Option<ShapeDescriptor> {
    let shape = element
        .first_child("geometry")
        .and_then(|geometry| urdf_shape(geometry, label, ctx));
    match shape {
        Some(shape) => Some(shape.with_transform(origin_transform(element.first_child("origin")))),
        None => {
            ctx.warn_geometry(label, format!("<{}> without a usable geometry", element.kind()));
            None
        }
    }
}

fn convert_inertial(inertial: Element<'_>) -> Inertial {
    let inertia = inertial.first_child("inertia").map_or([0.0; 6], |i| {
        [
            i.get_float("ixx", 0.0),
            i.get_float("ixy", 0.0),
            i.get_float("ixz", 0.0),
            i.get_float("iyy", 0.0),
            i.get_float("iyz", 0.0),
            i.get_float("izz", 0.0),
        ]
    });
    Inertial {
        local_transform: origin_transform(inertial.first_child("origin")),
        mass: inertial
            .first_child("mass")
            .map_or(0.0, |m| m.get_float("value", 0.0)),
        inertia,
    }
}

fn convert_joint(joint: Element<'_>, ctx: &mut BuildContext<'_>) -> Result<Connection, LoadError> {
    let name = joint
        .string("name")
        .map_or_else(|| ctx.unnamed("joint"), str::to_owned);
    let link_of = |end: &str| {
        joint
            .first_child(end)
            .and_then(|e| e.string("link"))
            .map(str::to_owned)
            .ok_or_else(|| LoadError::MissingElement {
                element: end.to_owned(),
                context: format!("joint '{name}'"),
            })
    };
    let parent = link_of("parent")?;
    let child = link_of("child")?;

    let keyword = joint.get_string("type", "fixed");
    let joint_type = JointType::from_keyword(keyword).unwrap_or_else(|| {
        warn!(joint = %name, keyword, "unknown joint type, using fixed");
        JointType::Fixed
    });

    let mut data = KinematicJoint::new(name, joint_type);
    data.axis = joint
        .first_child("axis")
        .map_or(DEFAULT_AXIS, |a| a.get_vec3("xyz", DEFAULT_AXIS));
    // `<limit effort velocity>` and `<dynamics friction>` parse but have no
    // field on the joint; only the bounds and damping are carried.
    if matches!(keyword, "revolute" | "prismatic") {
        data.limits = convert_limits(joint.first_child("limit"));
    }
    if let Some(dynamics) = joint.first_child("dynamics") {
        data.damping = dynamics.get_float("damping", 0.0);
    }

    Ok(Connection {
        joint: data,
        parent,
        child,
        transform: origin_transform(joint.first_child("origin")),
    })
}

/// Equal bounds (including the 0/0 of an absent `<limit>`) mean unlimited.
fn convert_limits(limit: Option<Element<'_>>) -> JointLimits {
    let Some(limit) = limit else {
        return JointLimits::UNLIMITED;
    };
    let lower = limit.get_float("lower", 0.0);
    let upper = limit.get_float("upper", 0.0);
    if (lower - upper).abs() > f32::EPSILON {
        JointLimits::new(lower, upper)
    } else {
        JointLimits::UNLIMITED
    }
}

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// Registers a named material carrying a `<color>`. Returns the registered
/// entry, which is the first declaration when the name repeats.
fn declare_material(element: Element<'_>, ctx: &mut BuildContext<'_>) -> Option<MaterialAsset> {
    let name = element.string("name")?;
    if let Some(rgba) = color_of(element) {
        ctx.assets
            .register_material(MaterialAsset::with_color(name, rgba));
    }
    ctx.assets.material(name).cloned()
}

fn apply_visual_material(drawable: &mut Drawable, element: Element<'_>, ctx: &mut BuildContext<'_>) {
    match element.string("name") {
        Some(reference) => match declare_material(element, ctx) {
            Some(material) => drawable.apply_material(&material),
            None => match color_of(element) {
                Some(rgba) => drawable.rgba = rgba,
                None => ctx.warn_unresolved(&drawable.name, "material", reference),
            },
        },
        None => {
            if let Some(rgba) = color_of(element) {
                drawable.rgba = rgba;
            }
        }
    }
}

fn color_of(material: Element<'_>) -> Option<[f32; 4]> {
    material.first_child("color").and_then(|c| c.vec4("rgba"))
}

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// One torque actuator per actuatable joint, named after the joint.
fn default_actuators(tree: &KinematicTree) -> Vec<Actuator> {
    tree.joints()
        .filter(|(_, joint)| joint.joint_type.is_actuated())
        .map(|(_, joint)| {
            let mut actuator =
                Actuator::new(joint.name.clone(), ActuatorKind::Torque, Some(joint.name.clone()));
            actuator.kp = 0.0;
            actuator.kv = 0.0;
            actuator.gear = vec![DEFAULT_GEAR];
            actuator
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
