//! Entry points: compile a model from a file, a string or a parsed tree.

use std::path::Path;

use kinforge_core::config::CompilerConfig;
use kinforge_core::model::RobotModel;
use kinforge_core::types::Dialect;
use kinforge_xml::{parse, ElementTree, SchemaKind};
use tracing::info;

use crate::context::BuildContext;
use crate::error::LoadError;
use crate::{mjcf, rlsim, urdf};

/// Compile a model file. Relative asset paths resolve against the file's
/// directory, and the file stem names models that declare no name.
pub fn load_file(
    path: impl AsRef<Path>,
    dialect: Dialect,
    config: &CompilerConfig,
) -> Result<RobotModel, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut ctx = BuildContext::new(config, path.parent().map(Path::to_path_buf));
    ctx.name_hint = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    compile(&text, dialect, ctx)
}

/// Compile a model held in memory.
pub fn load_str(text: &str, dialect: Dialect, config: &CompilerConfig) -> Result<RobotModel, LoadError> {
    compile(text, dialect, BuildContext::new(config, None))
}

/// Compile an already parsed element tree; the dialect follows from the
/// tree's schema. The tree is only read, so one parsed document (or its
/// deep copies) can be compiled any number of times.
///
/// Relative asset paths stay relative to the working directory; use
/// [`load_tree_in`] for a tree read from a file elsewhere.
pub fn load_tree(tree: &ElementTree, config: &CompilerConfig) -> Result<RobotModel, LoadError> {
    build_tree(tree, BuildContext::new(config, None))
}

/// Like [`load_tree`], resolving relative asset paths against `base_dir`
/// the way [`load_file`] resolves them against the file's directory.
pub fn load_tree_in(
    tree: &ElementTree,
    base_dir: impl AsRef<Path>,
    config: &CompilerConfig,
) -> Result<RobotModel, LoadError> {
    build_tree(tree, BuildContext::new(config, Some(base_dir.as_ref().to_path_buf())))
}

fn build_tree(tree: &ElementTree, ctx: BuildContext<'_>) -> Result<RobotModel, LoadError> {
    ctx.config.validate()?;
    let model = match tree.schema().kind() {
        SchemaKind::Mjcf => mjcf::build(tree, ctx)?,
        SchemaKind::Urdf => urdf::build(tree, ctx)?,
    };
    Ok(report(model))
}

fn compile(text: &str, dialect: Dialect, ctx: BuildContext<'_>) -> Result<RobotModel, LoadError> {
    ctx.config.validate()?;
    let model = match dialect {
        Dialect::Mjcf => mjcf::build(&parse(SchemaKind::Mjcf, text)?, ctx)?,
        Dialect::Urdf => urdf::build(&parse(SchemaKind::Urdf, text)?, ctx)?,
        Dialect::Rlsim => rlsim::build(text, ctx)?,
    };
    Ok(report(model))
}

fn report(model: RobotModel) -> RobotModel {
    info!(
        model = %model.name,
        bodies = model.tree.len(),
        joints = model.tree.joints().count(),
        dof = model.dof(),
        diagnostics = model.diagnostics.len(),
        "compiled model"
    );
    model
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use kinforge_core::error::ConfigError;

    const ARM: &str = r#"<robot><link name="base"/><link name="tip"/>
        <joint name="j" type="revolute"><parent link="base"/><child link="tip"/></joint></robot>"#;

    #[test]
    fn string_dispatches_on_dialect() {
        let config = CompilerConfig::default();
        let model = load_str(ARM, Dialect::Urdf, &config).unwrap();
        assert_eq!(model.name, "robot");
        assert_eq!(model.tree.len(), 2);

        // The same text is not MJCF.
        assert!(load_str(ARM, Dialect::Mjcf, &config).is_err());
    }

    #[test]
    fn invalid_config_is_rejected_before_parsing() {
        let mut config = CompilerConfig::default();
        config.mjcf.joint_axis = [0.0; 3];
        let err = load_str(ARM, Dialect::Urdf, &config).unwrap_err();
        assert!(matches!(err, LoadError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn missing_file_is_io_error() {
        let config = CompilerConfig::default();
        let err = load_file("/definitely/not/here.urdf", Dialect::Urdf, &config).unwrap_err();
        assert!(matches!(err, LoadError::Io { ref path, .. } if path.ends_with("here.urdf")));
    }

    #[test]
    fn tree_dialect_comes_from_schema() {
        let config = CompilerConfig::default();
        let tree = parse(SchemaKind::Urdf, ARM).unwrap();
        let model = load_tree(&tree, &config).unwrap();
        assert_eq!(model.tree.root().name, "base");
    }

    #[test]
    fn tree_meshes_resolve_against_given_dir() {
        let config = CompilerConfig::default();
        let tree = parse(
            SchemaKind::Urdf,
            r#"<robot><link name="base"><visual><geometry><mesh filename="base.stl"/></geometry></visual></link></robot>"#,
        )
        .unwrap();

        let bare = load_tree(&tree, &config).unwrap();
        assert_eq!(bare.meshes[0].file, "base.stl");

        let placed = load_tree_in(&tree, "/robots/arm", &config).unwrap();
        assert_eq!(
            std::path::PathBuf::from(&placed.meshes[0].file),
            Path::new("/robots/arm/base.stl")
        );
    }
}
