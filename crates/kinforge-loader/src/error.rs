//! Fatal errors of the model compiler.

use std::path::PathBuf;

use kinforge_core::error::{ConfigError, TopologyError};
use kinforge_xml::XmlError;

/// Errors that abort compiling a model.
///
/// Recoverable problems (bad geometry sizes, dangling actuator references)
/// are not errors; they surface as [`kinforge_core::error::Diagnostic`]s on
/// the compiled model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read the model file.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Markup could not be parsed.
    #[error(transparent)]
    Markup(#[from] XmlError),

    /// An rlsim document is not valid JSON for the expected layout.
    #[error("rlsim parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A structurally required element is absent.
    #[error("missing <{element}> in {context}")]
    MissingElement { element: String, context: String },

    /// A joint names a link that was never declared.
    #[error("joint '{joint}' references undeclared link '{link}'")]
    UnknownLink { joint: String, link: String },

    /// Two links share one name.
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// An rlsim entry points at a joint index that does not exist.
    #[error("{entry} references joint index {index}, but the model has {count} joints")]
    InvalidReference {
        entry: String,
        index: i64,
        count: usize,
    },

    /// Connections do not describe a single rooted tree.
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// The compiler configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = LoadError::MissingElement {
            element: "worldbody".into(),
            context: "MJCF model 'arm'".into(),
        };
        assert_eq!(e.to_string(), "missing <worldbody> in MJCF model 'arm'");

        let e = LoadError::UnknownLink {
            joint: "elbow".into(),
            link: "forearm".into(),
        };
        assert_eq!(e.to_string(), "joint 'elbow' references undeclared link 'forearm'");

        let e = LoadError::InvalidReference {
            entry: "body 'foot'".into(),
            index: 7,
            count: 3,
        };
        assert!(e.to_string().contains("joint index 7"));
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let e: LoadError = TopologyError::NoRoot.into();
        assert_eq!(e.to_string(), TopologyError::NoRoot.to_string());

        let e: LoadError = XmlError::MalformedMarkup("eof".into()).into();
        assert_eq!(e.to_string(), "malformed markup: eof");
    }

    #[test]
    fn io_error_includes_path() {
        let e = LoadError::Io {
            path: PathBuf::from("/tmp/walker.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/walker.json"));
        assert!(msg.contains("not found"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<LoadError>();
    }
}
