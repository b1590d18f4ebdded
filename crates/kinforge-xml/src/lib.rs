//! Schema-validated attributed element trees for robot description markup.
//!
//! - [`schema`]: per-dialect element tables (allowed children, typed attributes)
//! - [`element`]: arena-backed [`ElementTree`] with typed getters
//! - [`parser`]: lenient markup reader built on `quick-xml`
//! - [`defaults`]: class and no-class default tables with scoped lookup

pub mod defaults;
pub mod element;
pub mod error;
pub mod parser;
pub mod schema;

pub use defaults::{DefaultsTable, Scope};
pub use element::{AttrRef, AttrValue, Attributes, Element, ElementId, ElementTree};
pub use error::XmlError;
pub use parser::{parse, parse_file};
pub use schema::{AttrType, Schema, SchemaKind, SchemaRule};
