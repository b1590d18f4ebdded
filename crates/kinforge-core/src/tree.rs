//! Owning body tree.
//!
//! A [`KinematicBody`] exclusively owns its child bodies. Back-references are
//! indices: once a tree is finalized with [`KinematicTree::new`], every body
//! carries a pre-order [`BodyId`], its parent's id and its joints' owner id.

use serde::{Deserialize, Serialize};

use crate::math::Transform;
use crate::types::{Collider, Drawable, Inertial, KinematicJoint};

/// Pre-order index of a body inside a finalized [`KinematicTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

// ---------------------------------------------------------------------------
// KinematicBody
// ---------------------------------------------------------------------------

/// A rigid body with its attached joints, geometry and subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub name: String,
    /// Assigned by [`KinematicTree::new`].
    pub id: Option<BodyId>,
    pub parent: Option<BodyId>,
    /// Pose in the parent's frame (the world frame for the root).
    pub relative_transform: Transform,
    /// Written by physics adapters each step.
    pub world_transform: Transform,
    pub joints: Vec<KinematicJoint>,
    pub colliders: Vec<Collider>,
    pub drawables: Vec<Drawable>,
    pub inertial: Option<Inertial>,
    pub children: Vec<KinematicBody>,
}

impl KinematicBody {
    /// A body with no geometry, joints or children at the identity pose.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            parent: None,
            relative_transform: Transform::identity(),
            world_transform: Transform::identity(),
            joints: Vec::new(),
            colliders: Vec::new(),
            drawables: Vec::new(),
            inertial: None,
            children: Vec::new(),
        }
    }

    /// Moves `child` under this body, placed at `relative` in this body's frame.
    pub fn attach(&mut self, mut child: KinematicBody, relative: Transform) {
        child.relative_transform = relative;
        self.children.push(child);
    }

    /// Like [`attach`](Self::attach), but places `child` before the existing children.
    pub fn attach_first(&mut self, mut child: KinematicBody, relative: Transform) {
        child.relative_transform = relative;
        self.children.insert(0, child);
    }

    /// Number of bodies in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_len).sum::<usize>()
    }

    /// Pre-order traversal of this subtree.
    pub fn iter(&self) -> BodyIter<'_> {
        BodyIter { stack: vec![self] }
    }

    /// First body in this subtree with the given name.
    pub fn find(&self, name: &str) -> Option<&KinematicBody> {
        self.iter().find(|b| b.name == name)
    }

    pub fn joint(&self, name: &str) -> Option<&KinematicJoint> {
        self.joints.iter().find(|j| j.name == name)
    }

    fn find_mut(&mut self, id: BodyId) -> Option<&mut KinematicBody> {
        if self.id == Some(id) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }
        None
    }
}

/// Pre-order iterator over a body subtree.
pub struct BodyIter<'a> {
    stack: Vec<&'a KinematicBody>,
}

impl<'a> Iterator for BodyIter<'a> {
    type Item = &'a KinematicBody;

    fn next(&mut self) -> Option<Self::Item> {
        let body = self.stack.pop()?;
        self.stack.extend(body.children.iter().rev());
        Some(body)
    }
}

// ---------------------------------------------------------------------------
// KinematicTree
// ---------------------------------------------------------------------------

/// A finalized, single-rooted body tree.
///
/// Membership is fixed once built: consumers may update world transforms
/// through [`KinematicTree::world_transform_mut`] and
/// [`KinematicTree::update_world_transforms`] but cannot add, remove or move
/// bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicTree {
    root: KinematicBody,
    len: usize,
}

impl KinematicTree {
    /// Finalizes `root`: assigns ids and back-references, then computes world
    /// transforms from the relative ones.
    pub fn new(mut root: KinematicBody) -> Self {
        let mut next = 0;
        assign_ids(&mut root, None, &mut next);
        let mut tree = Self { root, len: next };
        tree.update_world_transforms();
        tree
    }

    pub const fn root(&self) -> &KinematicBody {
        &self.root
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All bodies in pre-order, so `bodies().nth(id.0)` has that id.
    pub fn bodies(&self) -> BodyIter<'_> {
        self.root.iter()
    }

    pub fn get(&self, id: BodyId) -> Option<&KinematicBody> {
        self.bodies().nth(id.0)
    }

    pub fn find(&self, name: &str) -> Option<&KinematicBody> {
        self.root.find(name)
    }

    pub fn parent_of(&self, body: &KinematicBody) -> Option<&KinematicBody> {
        body.parent.and_then(|id| self.get(id))
    }

    /// Every joint with the body that owns it.
    pub fn joints(&self) -> impl Iterator<Item = (&KinematicBody, &KinematicJoint)> {
        self.bodies()
            .flat_map(|body| body.joints.iter().map(move |joint| (body, joint)))
    }

    pub fn joint(&self, name: &str) -> Option<&KinematicJoint> {
        self.joints().map(|(_, j)| j).find(|j| j.name == name)
    }

    pub fn dof(&self) -> usize {
        self.joints().map(|(_, j)| j.joint_type.dof()).sum()
    }

    /// Mutable access to one body's world-transform slot.
    pub fn world_transform_mut(&mut self, id: BodyId) -> Option<&mut Transform> {
        self.root.find_mut(id).map(|b| &mut b.world_transform)
    }

    /// Recomputes body and joint world transforms from the relative transforms.
    pub fn update_world_transforms(&mut self) {
        propagate(&mut self.root, &Transform::identity());
    }
}

fn assign_ids(body: &mut KinematicBody, parent: Option<BodyId>, next: &mut usize) {
    let id = BodyId(*next);
    *next += 1;
    body.id = Some(id);
    body.parent = parent;
    for joint in &mut body.joints {
        joint.owner = Some(id);
    }
    for child in &mut body.children {
        assign_ids(child, Some(id), next);
    }
}

fn propagate(body: &mut KinematicBody, parent_world: &Transform) {
    body.world_transform = parent_world * body.relative_transform;
    let world = body.world_transform;
    for joint in &mut body.joints {
        joint.world_transform = world * joint.local_transform;
    }
    for child in &mut body.children {
        propagate(child, &world);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{pose, translation_of};
    use crate::types::{JointType, KinematicJoint};
    use approx::assert_relative_eq;
    use nalgebra::UnitQuaternion;

    fn offset(z: f32) -> Transform {
        pose([0.0, 0.0, z], UnitQuaternion::identity())
    }

    /// base -> (upper -> lower, tail)
    fn sample() -> KinematicBody {
        let mut lower = KinematicBody::new("lower");
        lower.joints.push(KinematicJoint::new("knee", JointType::Revolute));

        let mut upper = KinematicBody::new("upper");
        upper.joints.push(KinematicJoint::new("hip", JointType::Spherical));
        upper.attach(lower, offset(0.5));

        let mut base = KinematicBody::new("base");
        base.attach(upper, offset(1.0));
        base.attach(KinematicBody::new("tail"), offset(-0.2));
        base
    }

    #[test]
    fn ids_follow_pre_order() {
        let tree = KinematicTree::new(sample());
        let names: Vec<&str> = tree.bodies().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["base", "upper", "lower", "tail"]);
        for (i, body) in tree.bodies().enumerate() {
            assert_eq!(body.id, Some(BodyId(i)));
        }
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().subtree_len(), 4);
    }

    #[test]
    fn parents_and_owners_are_back_referenced() {
        let tree = KinematicTree::new(sample());
        assert!(tree.root().parent.is_none());

        let lower = tree.find("lower").unwrap();
        assert_eq!(tree.parent_of(lower).unwrap().name, "upper");

        let (owner, knee) = tree.joints().find(|(_, j)| j.name == "knee").unwrap();
        assert_eq!(owner.name, "lower");
        assert_eq!(knee.owner, owner.id);
    }

    #[test]
    fn world_transforms_compose() {
        let tree = KinematicTree::new(sample());
        let lower = tree.find("lower").unwrap();
        assert_relative_eq!(translation_of(&lower.world_transform)[2], 1.5, epsilon = 1e-6);

        let knee = tree.joint("knee").unwrap();
        assert_relative_eq!(translation_of(&knee.world_transform)[2], 1.5, epsilon = 1e-6);

        let tail = tree.find("tail").unwrap();
        assert_relative_eq!(translation_of(&tail.world_transform)[2], -0.2, epsilon = 1e-6);
    }

    #[test]
    fn world_slot_is_writable_and_recomputable() {
        let mut tree = KinematicTree::new(sample());
        let id = tree.find("tail").unwrap().id.unwrap();
        *tree.world_transform_mut(id).unwrap() = offset(9.0);
        assert_relative_eq!(
            translation_of(&tree.get(id).unwrap().world_transform)[2],
            9.0,
            epsilon = 1e-6
        );

        tree.update_world_transforms();
        assert_relative_eq!(
            translation_of(&tree.get(id).unwrap().world_transform)[2],
            -0.2,
            epsilon = 1e-6
        );
        assert!(tree.world_transform_mut(BodyId(42)).is_none());
    }

    #[test]
    fn attach_first_prepends() {
        let mut base = sample();
        base.attach_first(KinematicBody::new("head"), offset(2.0));
        let names: Vec<&str> = base.children.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["head", "upper", "tail"]);
        assert_relative_eq!(translation_of(&base.children[0].relative_transform)[2], 2.0);
    }

    #[test]
    fn dof_sums_joints() {
        let tree = KinematicTree::new(sample());
        assert_eq!(tree.dof(), 4);
    }
}
