//! Tree reconstruction for flat dialects.
//!
//! Flat models declare bodies and joints independently and connect them
//! with an unordered list of `(joint, parent, child, transform)` edges. The
//! root is the one link that is never a child. A breadth-first walk from it
//! yields a top-down edge order; consuming edges bottom-up lets every child
//! subtree be complete before it is moved under its parent, so each body is
//! handed over exactly once.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use kinforge_core::error::TopologyError;
use kinforge_core::math::Transform;
use kinforge_core::tree::KinematicBody;
use kinforge_core::types::KinematicJoint;
use tracing::debug;

use crate::error::LoadError;

/// One parent/child edge of a flat model.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Joint moving `child`; its frame coincides with the child body.
    pub joint: KinematicJoint,
    pub parent: String,
    pub child: String,
    /// Child body frame in the parent body frame.
    pub transform: Transform,
}

/// The unique link that never appears as a child.
pub fn find_root(connections: &[Connection]) -> Result<String, TopologyError> {
    let children: HashSet<&str> = connections.iter().map(|c| c.child.as_str()).collect();
    let candidates: BTreeSet<&str> = connections
        .iter()
        .map(|c| c.parent.as_str())
        .filter(|name| !children.contains(name))
        .collect();

    let mut candidates = candidates.into_iter();
    match (candidates.next(), candidates.next()) {
        (None, _) => Err(TopologyError::NoRoot),
        (Some(root), None) => Ok(root.to_owned()),
        (Some(first), Some(second)) => {
            let mut names = vec![first.to_owned(), second.to_owned()];
            names.extend(candidates.map(str::to_owned));
            Err(TopologyError::MultipleRoots(names))
        }
    }
}

/// Connection indices in breadth-first order from `root`. Siblings keep
/// their declaration order.
///
/// Fails with [`TopologyError::NotATree`] if a link is reached twice or some
/// connection is unreachable from `root`.
pub fn top_down_order(connections: &[Connection], root: &str) -> Result<Vec<usize>, TopologyError> {
    let mut by_parent: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, c) in connections.iter().enumerate() {
        by_parent.entry(c.parent.as_str()).or_default().push(i);
    }

    let total = connections.len();
    let mut order = Vec::with_capacity(total);
    let mut reached: HashSet<&str> = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(link) = queue.pop_front() {
        for &i in by_parent.get(link).map_or(&[][..], Vec::as_slice) {
            let child = connections[i].child.as_str();
            if !reached.insert(child) {
                return Err(TopologyError::NotATree {
                    reached: order.len(),
                    total,
                });
            }
            order.push(i);
            queue.push_back(child);
        }
    }

    if order.len() != total {
        return Err(TopologyError::NotATree {
            reached: order.len(),
            total,
        });
    }
    Ok(order)
}

/// Moves independently built `bodies` into one tree following `connections`.
///
/// Every directly connected `(parent, child)` pair is appended to
/// `exclusions` in top-down order. Bodies that no connection reaches make
/// the model multi-rooted.
pub fn assemble(
    bodies: Vec<KinematicBody>,
    connections: Vec<Connection>,
    exclusions: &mut Vec<(String, String)>,
) -> Result<KinematicBody, LoadError> {
    let mut pool: HashMap<String, KinematicBody> = HashMap::with_capacity(bodies.len());
    for body in bodies {
        if pool.contains_key(&body.name) {
            return Err(LoadError::DuplicateLink(body.name));
        }
        pool.insert(body.name.clone(), body);
    }
    for c in &connections {
        for link in [&c.parent, &c.child] {
            if !pool.contains_key(link) {
                return Err(LoadError::UnknownLink {
                    joint: c.joint.name.clone(),
                    link: link.clone(),
                });
            }
        }
    }

    let root = if connections.is_empty() {
        sole_body(&pool)?
    } else {
        find_root(&connections)?
    };
    let order = top_down_order(&connections, &root)?;
    debug!(root = %root, connections = order.len(), "reconstructed flat topology");

    for &i in &order {
        exclusions.push((connections[i].parent.clone(), connections[i].child.clone()));
    }

    let mut slots: Vec<Option<Connection>> = connections.into_iter().map(Some).collect();
    for &i in order.iter().rev() {
        let Some(Connection {
            mut joint,
            parent,
            child,
            transform,
        }) = slots[i].take()
        else {
            continue;
        };
        let mut body = pool.remove(&child).ok_or_else(|| LoadError::UnknownLink {
            joint: joint.name.clone(),
            link: child.clone(),
        })?;
        joint.local_transform = Transform::identity();
        body.joints.push(joint);

        let parent_body = pool.get_mut(&parent).ok_or_else(|| LoadError::UnknownLink {
            joint: body.name.clone(),
            link: parent.clone(),
        })?;
        parent_body.attach_first(body, transform);
    }

    let root_body = pool.remove(&root).ok_or(TopologyError::NoRoot)?;
    if !pool.is_empty() {
        let mut names: Vec<String> = pool.into_keys().collect();
        names.push(root);
        names.sort();
        return Err(TopologyError::MultipleRoots(names).into());
    }
    Ok(root_body)
}

/// Root of a model without connections: its only body.
fn sole_body(pool: &HashMap<String, KinematicBody>) -> Result<String, TopologyError> {
    let mut names: Vec<&String> = pool.keys().collect();
    match names.len() {
        0 => Err(TopologyError::NoRoot),
        1 => Ok(names[0].clone()),
        _ => {
            names.sort();
            Err(TopologyError::MultipleRoots(names.into_iter().cloned().collect()))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
