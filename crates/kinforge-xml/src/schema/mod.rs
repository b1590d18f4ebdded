//! Per-dialect schema tables.
//!
//! A schema maps every element type to the child types it may contain and
//! the attributes (with their value types) it may carry. Tables are built
//! once per process and are read-only afterwards.

mod mjcf;
mod urdf;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use once_cell::sync::Lazy;

// ---------------------------------------------------------------------------
// AttrType / SchemaKind
// ---------------------------------------------------------------------------

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrType {
    Int,
    Float,
    IntArray,
    FloatArray,
    String,
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::IntArray => "array_int",
            Self::FloatArray => "array_float",
            Self::String => "string",
        })
    }
}

/// Markup dialects that have a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Mjcf,
    Urdf,
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mjcf => "MJCF",
            Self::Urdf => "URDF",
        })
    }
}

// ---------------------------------------------------------------------------
// Static table format
// ---------------------------------------------------------------------------

type AttrGroup = &'static [(&'static str, AttrType)];

/// One row of a static schema table.
pub(crate) struct ElementSpec {
    pub name: &'static str,
    pub children: &'static [&'static str],
    /// Attribute groups, concatenated.
    pub attributes: &'static [AttrGroup],
}

// ---------------------------------------------------------------------------
// SchemaRule / Schema
// ---------------------------------------------------------------------------

/// Allowed children and attributes of one element type.
#[derive(Debug, Clone, Default)]
pub struct SchemaRule {
    pub children: HashSet<&'static str>,
    pub attributes: HashMap<&'static str, AttrType>,
}

#[derive(Debug)]
pub struct Schema {
    kind: SchemaKind,
    rules: HashMap<&'static str, SchemaRule>,
}

static MJCF_SCHEMA: Lazy<Schema> = Lazy::new(|| Schema::from_specs(SchemaKind::Mjcf, mjcf::ELEMENTS));
static URDF_SCHEMA: Lazy<Schema> = Lazy::new(|| Schema::from_specs(SchemaKind::Urdf, urdf::ELEMENTS));

impl Schema {
    fn from_specs(kind: SchemaKind, specs: &[ElementSpec]) -> Self {
        let mut rules: HashMap<&'static str, SchemaRule> = HashMap::with_capacity(specs.len());
        for spec in specs {
            let rule = rules.entry(spec.name).or_default();
            rule.children.extend(spec.children.iter().copied());
            for group in spec.attributes {
                rule.attributes.extend(group.iter().copied());
            }
        }
        Self { kind, rules }
    }

    pub fn mjcf() -> &'static Self {
        &MJCF_SCHEMA
    }

    pub fn urdf() -> &'static Self {
        &URDF_SCHEMA
    }

    pub fn for_kind(kind: SchemaKind) -> &'static Self {
        match kind {
            SchemaKind::Mjcf => Self::mjcf(),
            SchemaKind::Urdf => Self::urdf(),
        }
    }

    pub const fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn rule(&self, element: &str) -> Option<&SchemaRule> {
        self.rules.get(element)
    }

    pub fn has_element(&self, element: &str) -> bool {
        self.rules.contains_key(element)
    }

    pub fn attribute_type(&self, element: &str, attribute: &str) -> Option<AttrType> {
        self.rules.get(element)?.attributes.get(attribute).copied()
    }

    pub fn has_attribute(&self, element: &str, attribute: &str) -> bool {
        self.attribute_type(element, attribute).is_some()
    }

    /// Whether `child` may be nested directly inside `parent`.
    pub fn allows_child(&self, parent: &str, child: &str) -> bool {
        self.rules
            .get(parent)
            .is_some_and(|rule| rule.children.contains(child))
    }

    /// Element type names in sorted order.
    pub fn element_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.rules.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "schema {}", self.kind)?;
        for name in self.element_names() {
            let rule = &self.rules[name];
            writeln!(f, "  {name}")?;
            let attributes: BTreeMap<_, _> = rule.attributes.iter().collect();
            for (attr, ty) in attributes {
                writeln!(f, "    @{attr}: {ty}")?;
            }
            let mut children: Vec<_> = rule.children.iter().collect();
            children.sort_unstable();
            for child in children {
                writeln!(f, "    <{child}>")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
