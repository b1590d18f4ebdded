//! Arena-backed attributed element tree.
//!
//! Nodes live in one `Vec` owned by the [`ElementTree`] and refer to each
//! other by [`ElementId`]. Other components read nodes only through the
//! [`Element`] handle and its typed getters.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::XmlError;
use crate::schema::{AttrType, Schema};

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

/// An owned attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    Float(f32),
    IntArray(Vec<i64>),
    FloatArray(Vec<f32>),
    String(String),
}

impl AttrValue {
    /// Parses raw attribute text as `ty`. Returns `None` if any token fails.
    pub fn parse(ty: AttrType, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match ty {
            AttrType::Int => raw.parse().ok().map(Self::Int),
            AttrType::Float => raw.parse().ok().map(Self::Float),
            AttrType::IntArray => raw
                .split_whitespace()
                .map(|t| t.parse().ok())
                .collect::<Option<Vec<i64>>>()
                .map(Self::IntArray),
            AttrType::FloatArray => raw
                .split_whitespace()
                .map(|t| t.parse().ok())
                .collect::<Option<Vec<f32>>>()
                .map(Self::FloatArray),
            AttrType::String => Some(Self::String(raw.to_owned())),
        }
    }

    pub const fn attr_type(&self) -> AttrType {
        match self {
            Self::Int(_) => AttrType::Int,
            Self::Float(_) => AttrType::Float,
            Self::IntArray(_) => AttrType::IntArray,
            Self::FloatArray(_) => AttrType::FloatArray,
            Self::String(_) => AttrType::String,
        }
    }

    pub fn view(&self) -> AttrRef<'_> {
        match self {
            Self::Int(v) => AttrRef::Int(*v),
            Self::Float(v) => AttrRef::Float(*v),
            Self::IntArray(v) => AttrRef::IntArray(v),
            Self::FloatArray(v) => AttrRef::FloatArray(v),
            Self::String(v) => AttrRef::String(v),
        }
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<f32>> for AttrValue {
    fn from(v: Vec<f32>) -> Self {
        Self::FloatArray(v)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view().fmt(f)
    }
}

/// A borrowed attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttrRef<'a> {
    Int(i64),
    Float(f32),
    IntArray(&'a [i64]),
    FloatArray(&'a [f32]),
    String(&'a str),
}

impl<'a> AttrRef<'a> {
    pub const fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_float(self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_str(self) -> Option<&'a str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_float_array(self) -> Option<&'a [f32]> {
        match self {
            Self::FloatArray(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_int_array(self) -> Option<&'a [i64]> {
        match self {
            Self::IntArray(v) => Some(v),
            _ => None,
        }
    }

    /// Fixed-size vector view over either array kind. The length must be
    /// exactly `N`.
    pub fn as_vec<const N: usize>(self) -> Option<[f32; N]> {
        match self {
            Self::FloatArray(v) => v.try_into().ok(),
            Self::IntArray(v) if v.len() == N => {
                let mut out = [0.0; N];
                for (o, i) in out.iter_mut().zip(v) {
                    *o = *i as f32;
                }
                Some(out)
            }
            _ => None,
        }
    }

    pub fn to_value(self) -> AttrValue {
        match self {
            Self::Int(v) => AttrValue::Int(v),
            Self::Float(v) => AttrValue::Float(v),
            Self::IntArray(v) => AttrValue::IntArray(v.to_vec()),
            Self::FloatArray(v) => AttrValue::FloatArray(v.to_vec()),
            Self::String(v) => AttrValue::String(v.to_owned()),
        }
    }
}

impl fmt::Display for AttrRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::IntArray(v) => write_joined(f, v),
            Self::FloatArray(v) => write_joined(f, v),
            Self::String(v) => f.write_str(v),
        }
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

/// Attributes of one node, one map per value type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    ints: BTreeMap<String, i64>,
    floats: BTreeMap<String, f32>,
    int_arrays: BTreeMap<String, Vec<i64>>,
    float_arrays: BTreeMap<String, Vec<f32>>,
    strings: BTreeMap<String, String>,
}

impl Attributes {
    pub(crate) fn insert(&mut self, name: &str, value: AttrValue) {
        let name = name.to_owned();
        match value {
            AttrValue::Int(v) => {
                self.ints.insert(name, v);
            }
            AttrValue::Float(v) => {
                self.floats.insert(name, v);
            }
            AttrValue::IntArray(v) => {
                self.int_arrays.insert(name, v);
            }
            AttrValue::FloatArray(v) => {
                self.float_arrays.insert(name, v);
            }
            AttrValue::String(v) => {
                self.strings.insert(name, v);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<AttrRef<'_>> {
        if let Some(v) = self.ints.get(name) {
            return Some(AttrRef::Int(*v));
        }
        if let Some(v) = self.floats.get(name) {
            return Some(AttrRef::Float(*v));
        }
        if let Some(v) = self.int_arrays.get(name) {
            return Some(AttrRef::IntArray(v));
        }
        if let Some(v) = self.float_arrays.get(name) {
            return Some(AttrRef::FloatArray(v));
        }
        self.strings.get(name).map(|v| AttrRef::String(v))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.ints.len()
            + self.floats.len()
            + self.int_arrays.len()
            + self.float_arrays.len()
            + self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every attribute, grouped by value type and sorted by name within a group.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AttrRef<'_>)> {
        let ints = self.ints.iter().map(|(k, v)| (k.as_str(), AttrRef::Int(*v)));
        let floats = self.floats.iter().map(|(k, v)| (k.as_str(), AttrRef::Float(*v)));
        let int_arrays = self
            .int_arrays
            .iter()
            .map(|(k, v)| (k.as_str(), AttrRef::IntArray(v)));
        let float_arrays = self
            .float_arrays
            .iter()
            .map(|(k, v)| (k.as_str(), AttrRef::FloatArray(v)));
        let strings = self
            .strings
            .iter()
            .map(|(k, v)| (k.as_str(), AttrRef::String(v)));
        ints.chain(floats)
            .chain(int_arrays)
            .chain(float_arrays)
            .chain(strings)
    }
}

// ---------------------------------------------------------------------------
// ElementTree
// ---------------------------------------------------------------------------

/// Index of a node inside its [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    kind: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: Attributes,
}

/// A tree of attributed elements checked against one dialect's schema.
///
/// Parsing ([`crate::parse`]) is lenient. Mutation through [`ElementTree::add`]
/// and [`ElementTree::set_attribute`] is strict and rejects anything the
/// schema does not allow.
#[derive(Debug, Clone)]
pub struct ElementTree {
    schema: &'static Schema,
    nodes: Vec<Node>,
}

impl ElementTree {
    /// An empty tree holding only a root of type `root_kind`.
    pub fn new(schema: &'static Schema, root_kind: &str) -> Result<Self, XmlError> {
        if !schema.has_element(root_kind) {
            return Err(XmlError::UnknownElement(root_kind.to_owned()));
        }
        Ok(Self::with_root(schema, root_kind))
    }

    pub(crate) fn with_root(schema: &'static Schema, root_kind: &str) -> Self {
        Self {
            schema,
            nodes: vec![Node {
                kind: root_kind.to_owned(),
                parent: None,
                children: Vec::new(),
                attributes: Attributes::default(),
            }],
        }
    }

    pub const fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub const fn root_id(&self) -> ElementId {
        ElementId(0)
    }

    pub fn root(&self) -> Element<'_> {
        Element {
            tree: self,
            id: self.root_id(),
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: ElementId) -> Option<Element<'_>> {
        (id.0 < self.nodes.len()).then_some(Element { tree: self, id })
    }

    /// Appends a new `kind` child under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add(&mut self, parent: ElementId, kind: &str) -> Result<ElementId, XmlError> {
        if !self.schema.has_element(kind) {
            return Err(XmlError::UnknownElement(kind.to_owned()));
        }
        let parent_kind = &self.nodes[parent.0].kind;
        if !self.schema.allows_child(parent_kind, kind) {
            return Err(XmlError::NotAllowedChild {
                parent: parent_kind.clone(),
                child: kind.to_owned(),
            });
        }
        Ok(self.push_node(parent, kind))
    }

    /// Sets an attribute after checking the schema declares it with the
    /// value's type.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<AttrValue>,
    ) -> Result<(), XmlError> {
        let value = value.into();
        let node = &mut self.nodes[id.0];
        let Some(expected) = self.schema.attribute_type(&node.kind, name) else {
            return Err(XmlError::NotAllowedAttribute {
                element: node.kind.clone(),
                attribute: name.to_owned(),
            });
        };
        if value.attr_type() != expected {
            return Err(XmlError::AttributeType {
                element: node.kind.clone(),
                attribute: name.to_owned(),
                expected,
            });
        }
        node.attributes.insert(name, value);
        Ok(())
    }

    /// Parses `raw` with the schema's type for `name`, then sets it.
    pub fn set_attribute_str(&mut self, id: ElementId, name: &str, raw: &str) -> Result<(), XmlError> {
        let kind = &self.nodes[id.0].kind;
        let Some(ty) = self.schema.attribute_type(kind, name) else {
            return Err(XmlError::NotAllowedAttribute {
                element: kind.clone(),
                attribute: name.to_owned(),
            });
        };
        let value = AttrValue::parse(ty, raw).ok_or_else(|| XmlError::AttributeType {
            element: kind.clone(),
            attribute: name.to_owned(),
            expected: ty,
        })?;
        self.set_attribute(id, name, value)
    }

    /// Copies the subtree rooted at `id` into a new, independent tree.
    ///
    /// The copy is rebuilt through the checked write path, so a subtree that
    /// does not satisfy the schema is rejected.
    pub fn deep_copy(&self, id: ElementId) -> Result<ElementTree, XmlError> {
        let source = &self.nodes[id.0];
        let mut copy = ElementTree::new(self.schema, &source.kind)?;
        let root = copy.root_id();
        copy.copy_attributes(root, source)?;
        let mut pending: Vec<(ElementId, ElementId)> = source
            .children
            .iter()
            .rev()
            .map(|&child| (child, root))
            .collect();
        while let Some((from, to_parent)) = pending.pop() {
            let node = &self.nodes[from.0];
            let to = copy.add(to_parent, &node.kind)?;
            copy.copy_attributes(to, node)?;
            pending.extend(node.children.iter().rev().map(|&child| (child, to)));
        }
        Ok(copy)
    }

    fn copy_attributes(&mut self, to: ElementId, from: &Node) -> Result<(), XmlError> {
        for (name, value) in from.attributes.iter() {
            self.set_attribute(to, name, value.to_value())?;
        }
        Ok(())
    }

    /// Appends a node without schema checks. Used by the lenient parser.
    pub(crate) fn push_node(&mut self, parent: ElementId, kind: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(Node {
            kind: kind.to_owned(),
            parent: Some(parent),
            children: Vec::new(),
            attributes: Attributes::default(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn attributes_mut(&mut self, id: ElementId) -> &mut Attributes {
        &mut self.nodes[id.0].attributes
    }

    pub(crate) fn kind_of(&self, id: ElementId) -> &str {
        &self.nodes[id.0].kind
    }
}

impl PartialEq for ElementTree {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.nodes == other.nodes
    }
}

// ---------------------------------------------------------------------------
// Element handle
// ---------------------------------------------------------------------------

/// Read-only view of one node.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    tree: &'a ElementTree,
    id: ElementId,
}

impl fmt::Debug for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("kind", &self.kind())
            .field("id", &self.id)
            .finish()
    }
}

impl<'a> Element<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: ElementId) -> Element<'a> {
        Element { tree: self.tree, id }
    }

    pub const fn id(&self) -> ElementId {
        self.id
    }

    pub const fn tree(&self) -> &'a ElementTree {
        self.tree
    }

    pub fn kind(&self) -> &'a str {
        &self.node().kind
    }

    pub fn parent(&self) -> Option<Element<'a>> {
        self.node().parent.map(|id| self.at(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| Element { tree, id })
    }

    pub fn children_of_type(&self, kind: &'a str) -> impl Iterator<Item = Element<'a>> + 'a {
        self.children().filter(move |c| c.kind() == kind)
    }

    pub fn first_child(&self, kind: &str) -> Option<Element<'a>> {
        self.children().find(|c| c.kind() == kind)
    }

    pub fn has_child(&self, kind: &str) -> bool {
        self.first_child(kind).is_some()
    }

    /// Pre-order walk over this element's subtree, excluding `self`.
    pub fn descendants(&self) -> Vec<Element<'a>> {
        let mut out = Vec::new();
        let mut stack: Vec<Element<'a>> = self.children().collect();
        stack.reverse();
        while let Some(e) = stack.pop() {
            out.push(e);
            let before = stack.len();
            stack.extend(e.children());
            stack[before..].reverse();
        }
        out
    }

    pub fn attributes(&self) -> &'a Attributes {
        &self.node().attributes
    }

    pub fn attr(&self, name: &str) -> Option<AttrRef<'a>> {
        self.attributes().get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    // -- typed getters --

    pub fn int(&self, name: &str) -> Option<i64> {
        self.attr(name)?.as_int()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.attr(name)?.as_float()
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        self.attr(name)?.as_str()
    }

    pub fn float_array(&self, name: &str) -> Option<&'a [f32]> {
        self.attr(name)?.as_float_array()
    }

    pub fn int_array(&self, name: &str) -> Option<&'a [i64]> {
        self.attr(name)?.as_int_array()
    }

    pub fn vec2(&self, name: &str) -> Option<[f32; 2]> {
        self.attr(name)?.as_vec()
    }

    pub fn vec3(&self, name: &str) -> Option<[f32; 3]> {
        self.attr(name)?.as_vec()
    }

    pub fn vec4(&self, name: &str) -> Option<[f32; 4]> {
        self.attr(name)?.as_vec()
    }

    pub fn get_int(&self, name: &str, default: i64) -> i64 {
        self.int(name).unwrap_or(default)
    }

    pub fn get_float(&self, name: &str, default: f32) -> f32 {
        self.float(name).unwrap_or(default)
    }

    pub fn get_string(&self, name: &str, default: &'a str) -> &'a str {
        self.string(name).unwrap_or(default)
    }

    pub fn get_vec2(&self, name: &str, default: [f32; 2]) -> [f32; 2] {
        self.vec2(name).unwrap_or(default)
    }

    pub fn get_vec3(&self, name: &str, default: [f32; 3]) -> [f32; 3] {
        self.vec3(name).unwrap_or(default)
    }

    pub fn get_vec4(&self, name: &str, default: [f32; 4]) -> [f32; 4] {
        self.vec4(name).unwrap_or(default)
    }

    pub fn has_int(&self, name: &str) -> bool {
        self.int(name).is_some()
    }

    pub fn has_float(&self, name: &str) -> bool {
        self.float(name).is_some()
    }

    pub fn has_string(&self, name: &str) -> bool {
        self.string(name).is_some()
    }

    pub fn has_vec2(&self, name: &str) -> bool {
        self.vec2(name).is_some()
    }

    pub fn has_vec3(&self, name: &str) -> bool {
        self.vec3(name).is_some()
    }

    pub fn has_vec4(&self, name: &str) -> bool {
        self.vec4(name).is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn humanoid() -> ElementTree {
        let mut tree = ElementTree::new(Schema::mjcf(), "mujoco").unwrap();
        let world = tree.add(tree.root_id(), "worldbody").unwrap();
        let torso = tree.add(world, "body").unwrap();
        tree.set_attribute(torso, "name", "torso").unwrap();
        tree.set_attribute(torso, "pos", vec![0.0, 0.0, 1.4]).unwrap();
        let geom = tree.add(torso, "geom").unwrap();
        tree.set_attribute_str(geom, "size", "0.07 0.1").unwrap();
        tree.set_attribute_str(geom, "contype", "2").unwrap();
        tree
    }

    // -- values --

    #[test]
    fn parse_by_type() {
        assert_eq!(AttrValue::parse(AttrType::Int, " 3 "), Some(AttrValue::Int(3)));
        assert_eq!(AttrValue::parse(AttrType::Float, "0.5"), Some(AttrValue::Float(0.5)));
        assert_eq!(
            AttrValue::parse(AttrType::FloatArray, "1 2.5  -3"),
            Some(AttrValue::FloatArray(vec![1.0, 2.5, -3.0]))
        );
        assert_eq!(
            AttrValue::parse(AttrType::IntArray, "4 5"),
            Some(AttrValue::IntArray(vec![4, 5]))
        );
        assert_eq!(AttrValue::parse(AttrType::Float, "abc"), None);
        assert_eq!(AttrValue::parse(AttrType::FloatArray, "1 x 3"), None);
    }

    #[test]
    fn vectors_require_exact_dimension() {
        let v = AttrValue::FloatArray(vec![1.0, 2.0, 3.0]);
        assert_eq!(v.view().as_vec::<3>(), Some([1.0, 2.0, 3.0]));
        assert_eq!(v.view().as_vec::<2>(), None);
        assert_eq!(v.view().as_vec::<4>(), None);

        let ints = AttrValue::IntArray(vec![2, 3]);
        assert_eq!(ints.view().as_vec::<2>(), Some([2.0, 3.0]));
    }

    #[test]
    fn display_joins_arrays() {
        assert_eq!(AttrValue::FloatArray(vec![1.0, 0.5]).to_string(), "1 0.5");
        assert_eq!(AttrValue::from("hinge").to_string(), "hinge");
    }

    // -- write path --

    #[test]
    fn add_enforces_nesting() {
        let mut tree = humanoid();
        let geom = tree.root().descendants().iter().find(|e| e.kind() == "geom").unwrap().id();
        let err = tree.add(geom, "body").unwrap_err();
        assert!(matches!(err, XmlError::NotAllowedChild { ref parent, ref child } if parent == "geom" && child == "body"));

        let err = tree.add(tree.root_id(), "spaceship").unwrap_err();
        assert!(matches!(err, XmlError::UnknownElement(_)));
    }

    #[test]
    fn set_attribute_checks_declaration_and_type() {
        let mut tree = humanoid();
        let root = tree.root_id();
        let err = tree.set_attribute(root, "colour", "red").unwrap_err();
        assert!(matches!(err, XmlError::NotAllowedAttribute { .. }));

        let body = tree.root().descendants()[1].id();
        let err = tree.set_attribute(body, "pos", "up").unwrap_err();
        assert!(matches!(err, XmlError::AttributeType { expected: AttrType::FloatArray, .. }));

        let err = tree.set_attribute_str(body, "pos", "1 two 3").unwrap_err();
        assert!(err.is_schema_violation());
    }

    // -- getters --

    #[test]
    fn typed_getters_and_defaults() {
        let tree = humanoid();
        let torso = tree.root().descendants()[1];
        assert_eq!(torso.kind(), "body");
        assert_eq!(torso.string("name"), Some("torso"));
        assert_eq!(torso.vec3("pos"), Some([0.0, 0.0, 1.4]));
        assert!(torso.has_vec3("pos"));
        assert!(!torso.has_vec4("pos"));
        assert_eq!(torso.get_vec3("euler", [0.0; 3]), [0.0; 3]);
        assert_eq!(torso.get_string("childclass", "none"), "none");

        let geom = torso.first_child("geom").unwrap();
        assert_eq!(geom.vec2("size"), Some([0.07, 0.1]));
        assert_eq!(geom.float_array("size").map(<[f32]>::len), Some(2));
        assert_eq!(geom.get_int("contype", 1), 2);
        assert_eq!(geom.get_float("density", 1000.0), 1000.0);
        assert_eq!(geom.parent().unwrap().id(), torso.id());
    }

    #[test]
    fn descendants_are_pre_order() {
        let tree = humanoid();
        let kinds: Vec<&str> = tree.root().descendants().iter().map(Element::kind).collect();
        assert_eq!(kinds, ["worldbody", "body", "geom"]);
    }

    // -- deep copy --

    #[test]
    fn deep_copy_is_equal_and_independent() {
        let tree = humanoid();
        let mut copy = tree.deep_copy(tree.root_id()).unwrap();
        assert_eq!(copy, tree);

        let world = copy.root().first_child("worldbody").unwrap().id();
        copy.add(world, "body").unwrap();
        assert_ne!(copy, tree);
        assert_eq!(tree.len(), 4);
        assert_eq!(copy.len(), 5);
    }

    #[test]
    fn deep_copy_of_subtree() {
        let tree = humanoid();
        let torso = tree.root().descendants()[1];
        let copy = tree.deep_copy(torso.id()).unwrap();
        assert_eq!(copy.root().kind(), "body");
        assert_eq!(copy.root().string("name"), Some("torso"));
        assert!(copy.root().has_child("geom"));
    }

    #[test]
    fn deep_copy_rejects_schema_illegal_nodes() {
        let mut tree = humanoid();
        let geom = tree.root().descendants()[2].id();
        // Parser-side insertion bypasses the checks.
        tree.push_node(geom, "body");
        let err = tree.deep_copy(tree.root_id()).unwrap_err();
        assert!(matches!(err, XmlError::NotAllowedChild { .. }));
    }
}
