//! Markup text to [`ElementTree`].
//!
//! The read path is lenient: attributes the schema does not declare are
//! skipped, as are elements the schema does not allow under their parent
//! (together with their subtree). Unparsable values are dropped with a
//! warning. Only text that is not well-formed markup is an error.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::element::{AttrValue, ElementId, ElementTree};
use crate::error::XmlError;
use crate::schema::{Schema, SchemaKind};

impl SchemaKind {
    /// Name of the document element.
    pub const fn root_element(self) -> &'static str {
        match self {
            Self::Mjcf => "mujoco",
            Self::Urdf => "robot",
        }
    }
}

/// Parse markup text into an element tree checked against `kind`'s schema.
pub fn parse(kind: SchemaKind, text: &str) -> Result<ElementTree, XmlError> {
    let schema = Schema::for_kind(kind);
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut tree: Option<ElementTree> = None;
    // `None` marks a skipped subtree.
    let mut stack: Vec<Option<ElementId>> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            XmlError::MalformedMarkup(format!("at byte {}: {e}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(ref e) => {
                let id = open_element(schema, &mut tree, &stack, e)?;
                stack.push(id);
            }
            Event::Empty(ref e) => {
                open_element(schema, &mut tree, &stack, e)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(Some(open)) = stack.last() {
        let kind = tree.as_ref().map_or("?", |t| t.kind_of(*open));
        return Err(XmlError::MalformedMarkup(format!("unclosed element <{kind}>")));
    }
    if !stack.is_empty() {
        return Err(XmlError::MalformedMarkup("unclosed element".into()));
    }

    let tree = tree.ok_or_else(|| XmlError::MalformedMarkup("document has no root element".into()))?;
    debug!(dialect = %kind, nodes = tree.len(), "parsed element tree");
    Ok(tree)
}

/// Read and parse a markup file.
pub fn parse_file(kind: SchemaKind, path: impl AsRef<Path>) -> Result<ElementTree, XmlError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| XmlError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(kind, &text)
}

fn open_element(
    schema: &'static Schema,
    tree: &mut Option<ElementTree>,
    stack: &[Option<ElementId>],
    start: &BytesStart<'_>,
) -> Result<Option<ElementId>, XmlError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let Some(parent) = stack.last() else {
        if tree.is_some() {
            return Err(XmlError::MalformedMarkup(format!(
                "multiple root elements (second is <{name}>)"
            )));
        }
        let expected = schema.kind().root_element();
        if name != expected {
            return Err(XmlError::MalformedMarkup(format!(
                "expected <{expected}> document element, found <{name}>"
            )));
        }
        let new_tree = tree.insert(ElementTree::with_root(schema, &name));
        let root = new_tree.root_id();
        read_attributes(new_tree, root, start)?;
        return Ok(Some(root));
    };

    let (Some(parent), Some(tree)) = (parent, tree.as_mut()) else {
        return Ok(None);
    };
    let parent_kind = tree.kind_of(*parent);
    if !schema.allows_child(parent_kind, &name) {
        warn!(
            element = %name,
            parent = %parent_kind,
            "skipping element not allowed by the {} schema",
            schema.kind()
        );
        return Ok(None);
    }
    let id = tree.push_node(*parent, &name);
    read_attributes(tree, id, start)?;
    Ok(Some(id))
}

fn read_attributes(
    tree: &mut ElementTree,
    id: ElementId,
    start: &BytesStart<'_>,
) -> Result<(), XmlError> {
    let schema = tree.schema();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::MalformedMarkup(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let kind = tree.kind_of(id);
        let Some(ty) = schema.attribute_type(kind, &key) else {
            continue;
        };
        let raw = attr
            .unescape_value()
            .map_err(|e| XmlError::MalformedMarkup(e.to_string()))?;
        match AttrValue::parse(ty, &raw) {
            Some(value) => tree.attributes_mut(id).insert(&key, value),
            None => warn!(
                element = %kind,
                attribute = %key,
                value = %raw,
                "ignoring attribute that is not a valid {ty}"
            ),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
