//! Cascading defaults.
//!
//! Two flat tables are collected from a model's `<default>` blocks before
//! any other element is read:
//!
//! - a per-class table, `class -> element type -> attribute -> value`, from
//!   nested `<default class="...">` blocks;
//! - a no-class table, `element type -> attribute -> value`, from the
//!   children of top-level `<default>` blocks.
//!
//! Lookups go through [`Scope`], which applies the priority
//! explicit attribute > class default > no-class default > fallback.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::element::{AttrRef, AttrValue, Element, ElementTree};

type AttrTable = HashMap<String, AttrValue>;
type KindTable = HashMap<String, AttrTable>;

/// Attributes that never cascade.
const NON_INHERITABLE: &[&str] = &["name", "class"];

/// Read-only default tables of one parsed model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultsTable {
    by_class: HashMap<String, KindTable>,
    no_class: KindTable,
}

impl DefaultsTable {
    /// Collects both tables from the `<default>` children of the tree's root.
    pub fn collect(tree: &ElementTree) -> Self {
        let mut table = Self::default();
        let blocks: Vec<Element<'_>> = tree.root().children_of_type("default").collect();

        for block in &blocks {
            for nested in block.children_of_type("default") {
                table.collect_class(nested);
            }
        }
        for block in &blocks {
            for child in block.children().filter(|c| c.kind() != "default") {
                merge(table.no_class.entry(child.kind().to_owned()).or_default(), child);
            }
        }

        debug!(
            classes = table.by_class.len(),
            no_class_types = table.no_class.len(),
            "collected defaults"
        );
        table
    }

    fn collect_class(&mut self, block: Element<'_>) {
        match block.string("class") {
            Some(class) => {
                let kinds = self.by_class.entry(class.to_owned()).or_default();
                for child in block.children().filter(|c| c.kind() != "default") {
                    merge(kinds.entry(child.kind().to_owned()).or_default(), child);
                }
            }
            None => warn!("nested <default> without a class; its values are ignored"),
        }
        for nested in block.children_of_type("default") {
            self.collect_class(nested);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty() && self.no_class.is_empty()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.by_class.contains_key(class)
    }

    /// Class names in sorted order.
    pub fn classes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_class.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn class_value(&self, class: &str, kind: &str, attribute: &str) -> Option<&AttrValue> {
        self.by_class.get(class)?.get(kind)?.get(attribute)
    }

    pub fn no_class_value(&self, kind: &str, attribute: &str) -> Option<&AttrValue> {
        self.no_class.get(kind)?.get(attribute)
    }

    /// Lookup scope for `element`. `inherited_class` is the nearest enclosing
    /// `childclass`; an explicit `class` on the element takes precedence.
    pub fn scope<'a>(&'a self, element: Element<'a>, inherited_class: Option<&'a str>) -> Scope<'a> {
        Scope {
            defaults: self,
            element,
            class: element.string("class").or(inherited_class),
        }
    }
}

fn merge(table: &mut AttrTable, element: Element<'_>) {
    for (name, value) in element.attributes().iter() {
        if !NON_INHERITABLE.contains(&name) {
            table.insert(name.to_owned(), value.to_value());
        }
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// One element seen through the default tables.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    defaults: &'a DefaultsTable,
    element: Element<'a>,
    class: Option<&'a str>,
}

impl<'a> Scope<'a> {
    pub const fn element(&self) -> Element<'a> {
        self.element
    }

    /// Effective class used for lookups.
    pub const fn class(&self) -> Option<&'a str> {
        self.class
    }

    /// Resolves `attribute` with full priority order.
    pub fn get(&self, attribute: &str) -> Option<AttrRef<'a>> {
        if let Some(explicit) = self.element.attr(attribute) {
            return Some(explicit);
        }
        let kind = self.element.kind();
        self.class
            .and_then(|class| self.defaults.class_value(class, kind, attribute))
            .or_else(|| self.defaults.no_class_value(kind, attribute))
            .map(AttrValue::view)
    }

    pub fn has(&self, attribute: &str) -> bool {
        self.get(attribute).is_some()
    }

    pub fn int(&self, attribute: &str) -> Option<i64> {
        self.get(attribute)?.as_int()
    }

    pub fn float(&self, attribute: &str) -> Option<f32> {
        self.get(attribute)?.as_float()
    }

    pub fn string(&self, attribute: &str) -> Option<&'a str> {
        self.get(attribute)?.as_str()
    }

    pub fn float_array(&self, attribute: &str) -> Option<&'a [f32]> {
        self.get(attribute)?.as_float_array()
    }

    pub fn vec2(&self, attribute: &str) -> Option<[f32; 2]> {
        self.get(attribute)?.as_vec()
    }

    pub fn vec3(&self, attribute: &str) -> Option<[f32; 3]> {
        self.get(attribute)?.as_vec()
    }

    pub fn vec4(&self, attribute: &str) -> Option<[f32; 4]> {
        self.get(attribute)?.as_vec()
    }

    pub fn get_int(&self, attribute: &str, fallback: i64) -> i64 {
        self.int(attribute).unwrap_or(fallback)
    }

    pub fn get_float(&self, attribute: &str, fallback: f32) -> f32 {
        self.float(attribute).unwrap_or(fallback)
    }

    pub fn get_string(&self, attribute: &str, fallback: &'a str) -> &'a str {
        self.string(attribute).unwrap_or(fallback)
    }

    pub fn get_vec3(&self, attribute: &str, fallback: [f32; 3]) -> [f32; 3] {
        self.vec3(attribute).unwrap_or(fallback)
    }

    pub fn get_vec4(&self, attribute: &str, fallback: [f32; 4]) -> [f32; 4] {
        self.vec4(attribute).unwrap_or(fallback)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
