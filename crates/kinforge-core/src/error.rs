use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Structural errors raised while reconstructing a tree from a flat list of
/// parent/child connections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("no root link: every link appears as the child of some joint")]
    NoRoot,

    #[error("multiple root links: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    #[error("connections do not form a single tree ({reached} of {total} connections reachable from the root)")]
    NotATree { reached: usize, total: usize },
}

/// Non-fatal problems found while compiling a model.
///
/// Each one is logged when it happens and also kept on the compiled model,
/// next to the locally substituted value that replaced the bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("malformed geometry on '{element}': {message}")]
    MalformedGeometry { element: String, message: String },

    #[error("'{referrer}' references unknown {kind} '{target}'")]
    UnresolvedReference {
        referrer: String,
        kind: String,
        target: String,
    },
}

impl Diagnostic {
    pub fn geometry(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedGeometry {
            element: element.into(),
            message: message.into(),
        }
    }

    pub fn unresolved(
        referrer: impl Into<String>,
        kind: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            referrer: referrer.into(),
            kind: kind.into(),
            target: target.into(),
        }
    }

    pub const fn is_geometry(&self) -> bool {
        matches!(self, Self::MalformedGeometry { .. })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiple_roots_lists_every_candidate() {
        let err = TopologyError::MultipleRoots(vec!["a".into(), "d".into()]);
        assert_eq!(err.to_string(), "multiple root links: a, d");
    }

    #[test]
    fn not_a_tree_reports_counts() {
        let err = TopologyError::NotATree {
            reached: 2,
            total: 4,
        };
        assert!(err.to_string().contains("2 of 4"));
    }

    #[test]
    fn diagnostic_messages_name_the_element() {
        let d = Diagnostic::geometry("torso_geom", "box needs 3 half-extents");
        assert!(d.is_geometry());
        assert!(d.to_string().contains("torso_geom"));

        let d = Diagnostic::unresolved("hip_motor", "joint", "hip");
        assert!(!d.is_geometry());
        assert_eq!(d.to_string(), "'hip_motor' references unknown joint 'hip'");
    }

    #[test]
    fn config_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ConfigError = io.into();
        assert!(err.to_string().starts_with("IO error"));
    }
}
