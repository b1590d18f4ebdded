//! Canonical shape descriptors from dialect size conventions.
//!
//! Malformed sizes never abort a compile: each substitution is recorded as a
//! [`Diagnostic`](kinforge_core::error::Diagnostic) on the context and a
//! documented fallback is used instead.

use kinforge_core::math::{pose, shortest_arc};
use kinforge_core::types::{ShapeDescriptor, ShapeKind};
use kinforge_xml::{Element, Scope};
use nalgebra::Vector3;

use crate::context::BuildContext;

const Z_AXIS: [f32; 3] = [0.0, 0.0, 1.0];

const FALLBACK_PLANE: [f32; 3] = [3.0, 3.0, 0.0];
const FALLBACK_RADIUS: f32 = 0.1;
const FALLBACK_TUBE: [f32; 3] = [0.05, 0.1, 0.0];
const FALLBACK_BOX: [f32; 3] = [0.2, 0.2, 0.2];
const FALLBACK_ELLIPSOID: [f32; 3] = [0.1, 0.1, 0.1];

// ---------------------------------------------------------------------------
// MJCF geoms
// ---------------------------------------------------------------------------

/// Canonical shape of an MJCF `<geom>`, with every attribute read through
/// the defaults scope.
///
/// The type defaults to `sphere`. Cylinders and capsules given by `fromto`
/// carry a derived local frame (midpoint, +Z turned onto the segment) and
/// have `derived_from_fromto` set; every other shape leaves the local frame
/// at identity for the caller to fill in.
pub fn extract_shape(scope: &Scope<'_>, ctx: &mut BuildContext<'_>) -> ShapeDescriptor {
    let element = scope.element();
    let label = element.string("name").unwrap_or(element.kind());
    let keyword = scope.get_string("type", "sphere");
    let kind = ShapeKind::from_keyword(keyword).unwrap_or_else(|| {
        ctx.warn_geometry(label, format!("unsupported geom type '{keyword}', using a sphere"));
        ShapeKind::Sphere
    });
    let size = scope.float_array("size").unwrap_or(&[]);

    match kind {
        ShapeKind::Plane => ShapeDescriptor::new(kind, plane_size(size, label, ctx)),
        ShapeKind::Sphere => ShapeDescriptor::new(kind, [sphere_radius(size, label, ctx), 0.0, 0.0]),
        ShapeKind::Box => {
            let size = match size {
                &[x, y, z] => [2.0 * x, 2.0 * y, 2.0 * z],
                _ => {
                    ctx.warn_geometry(label, format!("box needs 3 half-extents, got {}", size.len()));
                    FALLBACK_BOX
                }
            };
            ShapeDescriptor::new(kind, size)
        }
        ShapeKind::Ellipsoid => {
            let size = match size {
                [a, b, c, ..] => [*a, *b, *c],
                _ => {
                    ctx.warn_geometry(label, format!("ellipsoid needs 3 radii, got {}", size.len()));
                    FALLBACK_ELLIPSOID
                }
            };
            ShapeDescriptor::new(kind, size)
        }
        ShapeKind::Cylinder | ShapeKind::Capsule => match scope.float_array("fromto") {
            Some(fromto) => segment_shape(kind, fromto, size, label, ctx),
            None => {
                let size = match size {
                    &[radius, half_length, ..] => [radius, 2.0 * half_length, 0.0],
                    _ => {
                        ctx.warn_geometry(
                            label,
                            format!("{kind} needs radius and half-length, got {} values", size.len()),
                        );
                        FALLBACK_TUBE
                    }
                };
                ShapeDescriptor::new(kind, size)
            }
        },
        ShapeKind::Mesh => match scope.string("mesh") {
            Some(reference) => {
                let mesh = ctx.register_mesh(reference);
                let mut shape = ShapeDescriptor::new(kind, mesh.scale);
                shape.mesh = Some(mesh);
                shape
            }
            None => {
                ctx.warn_geometry(label, "mesh geom without a mesh reference");
                ShapeDescriptor::new(kind, [1.0; 3])
            }
        },
        ShapeKind::Heightfield => {
            let reference = scope.string("hfield").unwrap_or_default();
            match ctx.assets.heightfield(reference).cloned() {
                Some(hfield) => {
                    let [rx, ry, elevation, _] = hfield.size;
                    let mut shape = ShapeDescriptor::new(kind, [rx, ry, elevation]);
                    shape.heightfield = Some(hfield);
                    shape
                }
                None => {
                    ctx.warn_unresolved(label, "hfield", reference);
                    ShapeDescriptor::new(kind, [1.0; 3])
                }
            }
        }
    }
}

fn plane_size(size: &[f32], label: &str, ctx: &mut BuildContext<'_>) -> [f32; 3] {
    match size {
        [] => {
            ctx.warn_geometry(label, "plane without size, using 3x3");
            FALLBACK_PLANE
        }
        [s] => [*s, *s, 0.0],
        [w, d, ..] => [*w, *d, 0.0],
    }
}

fn sphere_radius(size: &[f32], label: &str, ctx: &mut BuildContext<'_>) -> f32 {
    match size {
        [] => {
            ctx.warn_geometry(label, "sphere without radius, using 0.1");
            FALLBACK_RADIUS
        }
        [r] => *r,
        [r, ..] => {
            ctx.warn_geometry(label, format!("sphere takes 1 size value, got {}; using the first", size.len()));
            *r
        }
    }
}

/// Cylinder or capsule spanning the segment `fromto = (start, end)`.
fn segment_shape(
    kind: ShapeKind,
    fromto: &[f32],
    size: &[f32],
    label: &str,
    ctx: &mut BuildContext<'_>,
) -> ShapeDescriptor {
    let &[sx, sy, sz, ex, ey, ez, ..] = fromto else {
        ctx.warn_geometry(label, format!("fromto needs 6 values, got {}", fromto.len()));
        return ShapeDescriptor::new(kind, FALLBACK_TUBE);
    };
    let start = Vector3::new(sx, sy, sz);
    let end = Vector3::new(ex, ey, ez);
    let delta = end - start;
    let length = delta.norm();

    let radius = size.first().copied().unwrap_or_else(|| {
        ctx.warn_geometry(label, "fromto segment without radius, using a quarter of its length");
        0.25 * length
    });

    let mid = (start + end) * 0.5;
    let frame = pose([mid.x, mid.y, mid.z], shortest_arc(Z_AXIS, [delta.x, delta.y, delta.z]));
    let mut shape = ShapeDescriptor::new(kind, [radius, length, 0.0]).with_transform(frame);
    shape.derived_from_fromto = true;
    shape
}

// ---------------------------------------------------------------------------
// URDF geometry
// ---------------------------------------------------------------------------

/// Canonical shape of a URDF `<geometry>` element. Sizes are already full
/// extents and lengths. Returns `None` when the element holds no shape.
pub fn urdf_shape(
    geometry: Element<'_>,
    label: &str,
    ctx: &mut BuildContext<'_>,
) -> Option<ShapeDescriptor> {
    let shape = geometry.children().next()?;
    let descriptor = match shape.kind() {
        "box" => {
            let size = shape.vec3("size").unwrap_or_else(|| {
                ctx.warn_geometry(label, "box needs 3 extents");
                FALLBACK_BOX
            });
            ShapeDescriptor::new(ShapeKind::Box, size)
        }
        "sphere" => {
            let radius = shape.float("radius").unwrap_or_else(|| {
                ctx.warn_geometry(label, "sphere without radius, using 0.1");
                FALLBACK_RADIUS
            });
            ShapeDescriptor::new(ShapeKind::Sphere, [radius, 0.0, 0.0])
        }
        keyword @ ("cylinder" | "capsule") => {
            let kind = ShapeKind::from_keyword(keyword)?;
            let size = match (shape.float("radius"), shape.float("length")) {
                (Some(radius), Some(length)) => [radius, length, 0.0],
                _ => {
                    ctx.warn_geometry(label, format!("{keyword} needs radius and length"));
                    FALLBACK_TUBE
                }
            };
            ShapeDescriptor::new(kind, size)
        }
        "mesh" => {
            let Some(filename) = shape.string("filename") else {
                ctx.warn_geometry(label, "mesh without filename");
                return None;
            };
            let mesh = ctx.register_mesh(filename);
            let mut descriptor =
                ShapeDescriptor::new(ShapeKind::Mesh, shape.get_vec3("scale", [1.0; 3]));
            descriptor.mesh = Some(mesh);
            descriptor
        }
        _ => return None,
    };
    Some(descriptor)
}

// ---------------------------------------------------------------------------
// rlsim shapes
// ---------------------------------------------------------------------------

/// Canonical shape from an rlsim `Shape` keyword and its (already z-up)
/// `Param0..2` values.
///
/// Boxes take full extents. Cylinders and capsules take a diameter on x and
/// a height on z. Spheres halve all three; x carries the radius.
pub fn rlsim_shape(
    keyword: &str,
    params: [f32; 3],
    label: &str,
    ctx: &mut BuildContext<'_>,
) -> ShapeDescriptor {
    let [x, y, z] = params;
    match keyword {
        "box" => ShapeDescriptor::new(ShapeKind::Box, params),
        "capsule" => ShapeDescriptor::new(ShapeKind::Capsule, [0.5 * x, z, 0.0]),
        "cylinder" => ShapeDescriptor::new(ShapeKind::Cylinder, [0.5 * x, z, 0.0]),
        "sphere" => ShapeDescriptor::new(ShapeKind::Sphere, [0.5 * x, 0.5 * y, 0.5 * z]),
        other => {
            ctx.warn_geometry(label, format!("unsupported rlsim shape '{other}', using a box"));
            ShapeDescriptor::new(ShapeKind::Box, params)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
