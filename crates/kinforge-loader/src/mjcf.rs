//! Nested-body (MJCF) models.
//!
//! The body hierarchy is read straight off the document: each `<body>`
//! becomes a [`KinematicBody`] with its geoms, joints and inertial, and
//! nested bodies become children. Every attribute goes through the default
//! tables, threading the nearest `childclass` down the hierarchy.

use std::path::Path;

use kinforge_core::config::{AngleUnit, CoordinateMode};
use kinforge_core::math::{relative, Transform};
use kinforge_core::model::{Actuator, ActuatorKind, RobotModel};
use kinforge_core::tree::{KinematicBody, KinematicTree};
use kinforge_core::types::{
    Collider, Drawable, HeightfieldAsset, Inertial, JointLimits, JointType, KinematicJoint,
    MaterialAsset, MeshAsset, DEFAULT_DENSITY, DEFAULT_RGBA, DEFAULT_SHININESS, DEFAULT_SPECULAR,
};
use kinforge_xml::{DefaultsTable, Element, ElementTree, SchemaKind};
use tracing::{debug, warn};

use crate::context::BuildContext;
use crate::error::LoadError;
use crate::geometry::extract_shape;
use crate::transform::extract_transform;

/// MuJoCo material shininess is normalized to `[0, 1]`.
const SHININESS_SCALE: f32 = 128.0;

/// Compiles an MJCF element tree.
///
/// Only the first `<body>` under `<worldbody>` is compiled; it becomes the
/// root of the tree.
pub fn build(tree: &ElementTree, mut ctx: BuildContext<'_>) -> Result<RobotModel, LoadError> {
    let kind = tree.schema().kind();
    if kind != SchemaKind::Mjcf {
        return Err(LoadError::MissingElement {
            element: "mujoco".into(),
            context: format!("a {kind} document"),
        });
    }

    let root = tree.root();
    let name = ctx.model_name(root.string("model"), "mjcf");
    ctx.declare_names(root.descendants().iter().filter_map(|e| e.string("name")));

    let compiler = root.first_child("compiler");
    let settings = Settings {
        angle: setting(compiler, "angle", AngleUnit::from_keyword, ctx.config.mjcf.angle),
        coordinate: setting(
            compiler,
            "coordinate",
            CoordinateMode::from_keyword,
            ctx.config.mjcf.coordinate,
        ),
        joint_axis: ctx.config.mjcf.joint_axis,
    };
    ctx.mesh_dir = compiler
        .and_then(|c| c.string("meshdir"))
        .map(str::to_owned)
        .or_else(|| ctx.config.mjcf.meshdir.clone());

    let defaults = DefaultsTable::collect(tree);
    let builder = Builder {
        defaults: &defaults,
        settings,
    };
    builder.collect_assets(root, &mut ctx);

    let worldbody = root
        .first_child("worldbody")
        .ok_or_else(|| LoadError::MissingElement {
            element: "worldbody".into(),
            context: format!("MJCF model '{name}'"),
        })?;
    let mut bodies = worldbody.children_of_type("body");
    let first = bodies.next().ok_or_else(|| LoadError::MissingElement {
        element: "body".into(),
        context: format!("<worldbody> of '{name}'"),
    })?;
    let skipped = bodies.count();
    if skipped > 0 {
        warn!(model = %name, skipped, "only the first body under <worldbody> is compiled");
    }

    let mut root_body = builder.body(first, None, None, &mut ctx);
    if settings.coordinate == CoordinateMode::Global {
        to_local(&mut root_body, &Transform::identity());
    }
    let kinematic_tree = KinematicTree::new(root_body);

    let actuators = builder.actuators(root, &kinematic_tree, &mut ctx);
    collect_contact_exclusions(root, &kinematic_tree, &mut ctx);

    debug!(
        model = %name,
        bodies = kinematic_tree.len(),
        actuators = actuators.len(),
        "compiled MJCF model"
    );
    Ok(ctx.finish(name, kinematic_tree, actuators))
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    angle: AngleUnit,
    coordinate: CoordinateMode,
    joint_axis: [f32; 3],
}

/// Reads a `<compiler>` keyword, falling back to the configured value.
fn setting<T>(
    compiler: Option<Element<'_>>,
    attribute: &str,
    parse: fn(&str) -> Option<T>,
    fallback: T,
) -> T {
    match compiler.and_then(|c| c.string(attribute)) {
        None => fallback,
        Some(keyword) => parse(keyword).unwrap_or_else(|| {
            warn!(attribute, keyword, "unknown <compiler> setting, using the configured one");
            fallback
        }),
    }
}

struct Builder<'d> {
    defaults: &'d DefaultsTable,
    settings: Settings,
}

impl Builder<'_> {
    // -- assets --

    fn collect_assets(&self, root: Element<'_>, ctx: &mut BuildContext<'_>) {
        for block in root.children_of_type("asset") {
            for asset in block.children() {
                match asset.kind() {
                    "mesh" => self.declare_mesh(asset, ctx),
                    "material" => self.declare_material(asset, ctx),
                    "hfield" => declare_heightfield(asset, ctx),
                    other => warn!(asset = other, "unsupported asset kind ignored"),
                }
            }
        }
    }

    fn declare_mesh(&self, element: Element<'_>, ctx: &mut BuildContext<'_>) {
        let scope = self.defaults.scope(element, None);
        let Some(file) = scope.string("file") else {
            let label = element.get_string("name", "mesh");
            ctx.warn_geometry(label, "mesh asset without a file, ignored");
            return;
        };
        let id = element.string("name").map_or_else(
            || {
                Path::new(file)
                    .file_stem()
                    .map_or_else(|| file.to_owned(), |s| s.to_string_lossy().into_owned())
            },
            str::to_owned,
        );
        let path = ctx.resolve_path(file, ctx.mesh_dir.as_deref());
        let scale = scope.get_vec3("scale", [1.0; 3]);
        ctx.assets.declare_mesh(MeshAsset::new(id, path, scale));
    }

    fn declare_material(&self, element: Element<'_>, ctx: &mut BuildContext<'_>) {
        let Some(name) = element.string("name") else {
            warn!("material without a name ignored");
            return;
        };
        let scope = self.defaults.scope(element, None);
        let specular = match scope.float_array("specular") {
            Some(&[s]) => [s; 3],
            Some(&[r, g, b]) => [r, g, b],
            _ => DEFAULT_SPECULAR,
        };
        let material = MaterialAsset {
            name: name.to_owned(),
            diffuse: scope.get_vec4("rgba", DEFAULT_RGBA),
            specular,
            shininess: scope
                .float("shininess")
                .map_or(DEFAULT_SHININESS, |s| s * SHININESS_SCALE),
        };
        if !ctx.assets.register_material(material) {
            debug!(material = name, "duplicate material ignored");
        }
    }

    // -- bodies --

    /// Builds `element` and its subtree. `relative_transform` holds the pose
    /// as written, which is a world pose in global coordinate mode.
    fn body<'t>(
        &self,
        element: Element<'t>,
        parent: Option<&str>,
        inherited_class: Option<&'t str>,
        ctx: &mut BuildContext<'_>,
    ) -> KinematicBody {
        let name = element
            .string("name")
            .map_or_else(|| ctx.unnamed("body"), str::to_owned);
        if let Some(parent) = parent {
            ctx.exclude(parent, &name);
        }

        let mut body = KinematicBody::new(name);
        body.relative_transform =
            extract_transform(&self.defaults.scope(element, inherited_class), self.settings.angle);
        let class = element.string("childclass").or(inherited_class);

        for child in element.children() {
            match child.kind() {
                "geom" => {
                    let (collider, drawable) = self.geom(child, class, ctx);
                    body.colliders.push(collider);
                    body.drawables.push(drawable);
                }
                "joint" => body.joints.push(self.joint(child, class, ctx)),
                "freejoint" => {
                    let name = child
                        .string("name")
                        .map_or_else(|| ctx.unnamed("joint"), str::to_owned);
                    body.joints.push(KinematicJoint::new(name, JointType::Free));
                }
                "inertial" => body.inertial = Some(self.inertial(child, &body.name, ctx)),
                "body" => {
                    let sub = self.body(child, Some(&body.name), class, ctx);
                    let placed = sub.relative_transform;
                    body.attach(sub, placed);
                }
                _ => {}
            }
        }
        body
    }

    fn geom(
        &self,
        element: Element<'_>,
        class: Option<&str>,
        ctx: &mut BuildContext<'_>,
    ) -> (Collider, Drawable) {
        let scope = self.defaults.scope(element, class);
        let mut shape = extract_shape(&scope, ctx);
        if !shape.derived_from_fromto {
            shape.local_transform = extract_transform(&scope, self.settings.angle);
        }
        let name = element
            .string("name")
            .map_or_else(|| ctx.unnamed("geom"), str::to_owned);

        let mut collider = Collider::new(name.clone(), shape.clone());
        collider.collision_group = scope
            .int("contype")
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(1);
        collider.collision_mask = scope
            .int("conaffinity")
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(1);
        if let Some(values) = scope.float_array("friction") {
            for (slot, value) in collider.friction.iter_mut().zip(values) {
                *slot = *value;
            }
        }
        collider.density = scope.get_float("density", DEFAULT_DENSITY);
        if let (Some(mass), Some(volume)) = (scope.float("mass"), shape.volume()) {
            if volume > 0.0 {
                collider.density = mass / volume;
            }
        }

        let mut drawable = Drawable::new(name, shape);
        let material = match scope.string("material") {
            Some(reference) => {
                let found = ctx.assets.material(reference).cloned();
                if found.is_none() {
                    ctx.warn_unresolved(&drawable.name, "material", reference);
                }
                found
            }
            None => None,
        };
        // Own rgba beats the material, which beats class rgba.
        if let Some(rgba) = element.vec4("rgba") {
            set_color(&mut drawable, rgba);
            drawable.material = material.map(|m| m.name);
        } else if let Some(material) = &material {
            drawable.apply_material(material);
        } else if let Some(rgba) = scope.vec4("rgba") {
            set_color(&mut drawable, rgba);
        }

        (collider, drawable)
    }

    fn joint(
        &self,
        element: Element<'_>,
        class: Option<&str>,
        ctx: &mut BuildContext<'_>,
    ) -> KinematicJoint {
        let scope = self.defaults.scope(element, class);
        let name = element
            .string("name")
            .map_or_else(|| ctx.unnamed("joint"), str::to_owned);
        let keyword = scope.get_string("type", "hinge");
        let joint_type = JointType::from_keyword(keyword).unwrap_or_else(|| {
            warn!(joint = %name, keyword, "unknown joint type, using hinge");
            JointType::Revolute
        });

        let angle = self.settings.angle;
        let rotational = matches!(joint_type, JointType::Revolute | JointType::Spherical);
        let convert = |value: f32| if rotational { angle.to_radians(value) } else { value };

        let mut joint = KinematicJoint::new(name, joint_type);
        joint.local_transform = extract_transform(&scope, angle);
        joint.axis = scope.get_vec3("axis", self.settings.joint_axis);

        let range = scope.vec2("range");
        let limited = match scope.get_string("limited", "auto") {
            "true" => true,
            "false" => false,
            _ => range.is_some(),
        };
        if limited {
            joint.limits = range.map_or(JointLimits::HALF_TURN, |[lower, upper]| {
                JointLimits::new(convert(lower), convert(upper))
            });
        }

        joint.stiffness = scope.get_float("stiffness", 0.0);
        joint.armature = scope.get_float("armature", 0.0);
        joint.damping = scope.get_float("damping", 0.0);
        joint.reference = convert(scope.get_float("ref", 0.0));
        joint
    }

    fn inertial(&self, element: Element<'_>, body: &str, ctx: &mut BuildContext<'_>) -> Inertial {
        let scope = self.defaults.scope(element, None);
        let inertia = if let Some([ixx, iyy, izz]) = scope.vec3("diaginertia") {
            [ixx, 0.0, 0.0, iyy, 0.0, izz]
        } else if let Some([ixx, iyy, izz, ixy, ixz, iyz]) =
            scope.get("fullinertia").and_then(|v| v.as_vec::<6>())
        {
            [ixx, ixy, ixz, iyy, iyz, izz]
        } else {
            ctx.warn_geometry(body, "inertial without diaginertia or fullinertia, using zeros");
            [0.0; 6]
        };
        Inertial {
            local_transform: extract_transform(&scope, self.settings.angle),
            mass: scope.get_float("mass", 1.0),
            inertia,
        }
    }

    // -- actuators --

    fn actuators(
        &self,
        root: Element<'_>,
        tree: &KinematicTree,
        ctx: &mut BuildContext<'_>,
    ) -> Vec<Actuator> {
        let mut actuators = Vec::new();
        for block in root.children_of_type("actuator") {
            for element in block.children() {
                let Some(kind) = ActuatorKind::from_keyword(element.kind()) else {
                    continue;
                };
                let scope = self.defaults.scope(element, None);
                let target = scope.string("joint");
                let name = element
                    .string("name")
                    .or(target)
                    .map_or_else(|| ctx.unnamed("actuator"), str::to_owned);

                let joint = match target {
                    Some(joint) if tree.joint(joint).is_some() => Some(joint.to_owned()),
                    other => {
                        ctx.warn_unresolved(&name, "joint", other.unwrap_or_default());
                        None
                    }
                };

                let mut actuator = Actuator::new(name, kind, joint);
                if scope.get_string("ctrllimited", "auto") != "false" {
                    if let Some(range) = scope.vec2("ctrlrange") {
                        actuator.ctrl_limits = range;
                    }
                }
                actuator.kp = scope.get_float("kp", actuator.kp);
                actuator.kv = scope.get_float("kv", actuator.kv);
                if let Some(gear) = scope.float_array("gear") {
                    actuator.gear = gear.to_vec();
                }
                actuators.push(actuator);
            }
        }
        actuators
    }
}

fn declare_heightfield(element: Element<'_>, ctx: &mut BuildContext<'_>) {
    let Some(id) = element.string("name") else {
        warn!("hfield without a name ignored");
        return;
    };
    let size = element.vec4("size").unwrap_or_else(|| {
        ctx.warn_geometry(id, "hfield needs 4 size values");
        [1.0, 1.0, 1.0, 0.1]
    });
    let count = |attribute: &str| {
        element
            .int(attribute)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0)
    };
    let heightfield = HeightfieldAsset {
        id: id.to_owned(),
        file: element.string("file").map(|f| ctx.resolve_path(f, None)),
        nrow: count("nrow"),
        ncol: count("ncol"),
        size,
    };
    ctx.assets.register_heightfield(heightfield);
}

/// Explicit color: diffuse from `rgba`, specular from its rgb part.
fn set_color(drawable: &mut Drawable, rgba: [f32; 4]) {
    drawable.rgba = rgba;
    drawable.specular = [rgba[0], rgba[1], rgba[2]];
}

/// `<contact><exclude body1 body2/>` pairs. Both bodies must exist.
fn collect_contact_exclusions(root: Element<'_>, tree: &KinematicTree, ctx: &mut BuildContext<'_>) {
    for contact in root.children_of_type("contact") {
        for exclude in contact.children_of_type("exclude") {
            let (Some(first), Some(second)) = (exclude.string("body1"), exclude.string("body2"))
            else {
                warn!("<exclude> needs body1 and body2");
                continue;
            };
            let label = exclude.get_string("name", "exclude");
            let mut resolved = true;
            for body in [first, second] {
                if tree.find(body).is_none() {
                    ctx.warn_unresolved(label, "body", body);
                    resolved = false;
                }
            }
            if resolved {
                ctx.exclude(first, second);
            }
        }
    }
}

/// Rewrites world poses (global coordinate mode) as parent-relative ones.
fn to_local(body: &mut KinematicBody, parent_world: &Transform) {
    let world = body.relative_transform;
    body.relative_transform = relative(parent_world, &world);
    for joint in &mut body.joints {
        joint.local_transform = relative(&world, &joint.local_transform);
    }
    for collider in &mut body.colliders {
        collider.shape.local_transform = relative(&world, &collider.shape.local_transform);
    }
    for drawable in &mut body.drawables {
        drawable.shape.local_transform = relative(&world, &drawable.shape.local_transform);
    }
    if let Some(inertial) = &mut body.inertial {
        inertial.local_transform = relative(&world, &inertial.local_transform);
    }
    for child in &mut body.children {
        to_local(child, &world);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
