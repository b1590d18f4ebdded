//! Per-model compilation state.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use kinforge_core::config::CompilerConfig;
use kinforge_core::error::Diagnostic;
use kinforge_core::model::{Actuator, RobotModel};
use kinforge_core::tree::KinematicTree;
use kinforge_core::types::MeshAsset;
use tracing::warn;

use crate::assets::AssetRegistry;

/// State owned by one compilation: assets, exclusion pairs and collected
/// diagnostics. Nothing in here is shared between models.
#[derive(Debug)]
pub struct BuildContext<'c> {
    pub config: &'c CompilerConfig,
    /// Directory relative asset paths are resolved against.
    pub base_dir: Option<PathBuf>,
    /// Subdirectory literal mesh files live in (MJCF `meshdir`).
    pub mesh_dir: Option<String>,
    /// Model name used when the document declares none (the file stem).
    pub name_hint: Option<String>,
    pub assets: AssetRegistry,
    pub exclusions: Vec<(String, String)>,
    pub diagnostics: Vec<Diagnostic>,
    unnamed: HashMap<&'static str, usize>,
    declared: HashSet<String>,
}

impl<'c> BuildContext<'c> {
    pub fn new(config: &'c CompilerConfig, base_dir: Option<PathBuf>) -> Self {
        Self {
            config,
            base_dir,
            mesh_dir: None,
            name_hint: None,
            assets: AssetRegistry::new(),
            exclusions: Vec::new(),
            diagnostics: Vec::new(),
            unnamed: HashMap::new(),
            declared: HashSet::new(),
        }
    }

    /// Declared model name, else the hint, else `fallback`.
    pub fn model_name(&self, declared: Option<&str>, fallback: &str) -> String {
        declared
            .or(self.name_hint.as_deref())
            .unwrap_or(fallback)
            .to_owned()
    }

    /// Records a malformed-geometry substitution.
    pub fn warn_geometry(&mut self, element: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(element, "{message}");
        self.diagnostics.push(Diagnostic::geometry(element, message));
    }

    /// Records a reference to something that does not exist.
    pub fn warn_unresolved(&mut self, referrer: &str, kind: &str, target: &str) {
        warn!(referrer, kind, target, "unresolved reference");
        self.diagnostics.push(Diagnostic::unresolved(referrer, kind, target));
    }

    /// Marks names the document declares so generated names avoid them.
    pub fn declare_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        self.declared.extend(names.into_iter().map(str::to_owned));
    }

    /// Generated name for an element without one, e.g. `geom_3`. Skips any
    /// declared name.
    pub fn unnamed(&mut self, prefix: &'static str) -> String {
        let counter = self.unnamed.entry(prefix).or_insert(0);
        loop {
            let name = format!("{prefix}_{counter}");
            *counter += 1;
            if !self.declared.contains(&name) {
                return name;
            }
        }
    }

    pub fn exclude(&mut self, a: &str, b: &str) {
        self.exclusions.push((a.to_owned(), b.to_owned()));
    }

    /// Maps a file reference from the model onto a path, joining relative
    /// references onto `subdir` and the model directory.
    pub fn resolve_path(&self, file: &str, subdir: Option<&str>) -> String {
        let path = Path::new(file);
        if !self.config.assets.resolve_paths || path.is_absolute() || file.contains("://") {
            return file.to_owned();
        }
        let mut out = self.base_dir.clone().unwrap_or_default();
        if let Some(subdir) = subdir {
            out.push(subdir);
        }
        out.push(path);
        out.to_string_lossy().into_owned()
    }

    /// Resolves a mesh reference through the registry, placing literal file
    /// names under the mesh directory.
    pub fn register_mesh(&mut self, raw: &str) -> MeshAsset {
        if let Some(known) = self.assets.mesh(raw) {
            return known.clone();
        }
        let file = self.resolve_path(raw, self.mesh_dir.as_deref());
        self.assets.register_mesh(raw, |_| file)
    }

    /// Packs the tree and everything collected beside it into a model.
    pub fn finish(self, name: String, tree: KinematicTree, actuators: Vec<Actuator>) -> RobotModel {
        let (meshes, materials, heightfields) = self.assets.into_parts();
        RobotModel {
            name,
            tree,
            meshes,
            materials,
            heightfields,
            actuators,
            exclusion_pairs: self.exclusions,
            diagnostics: self.diagnostics,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnamed_counters_are_per_prefix() {
        let config = CompilerConfig::default();
        let mut ctx = BuildContext::new(&config, None);
        assert_eq!(ctx.unnamed("geom"), "geom_0");
        assert_eq!(ctx.unnamed("geom"), "geom_1");
        assert_eq!(ctx.unnamed("body"), "body_0");
    }

    #[test]
    fn unnamed_skips_declared_names() {
        let config = CompilerConfig::default();
        let mut ctx = BuildContext::new(&config, None);
        ctx.declare_names(["link_0", "link_2"]);
        assert_eq!(ctx.unnamed("link"), "link_1");
        assert_eq!(ctx.unnamed("link"), "link_3");
    }

    #[test]
    fn warnings_become_diagnostics() {
        let config = CompilerConfig::default();
        let mut ctx = BuildContext::new(&config, None);
        ctx.warn_geometry("foot", "box needs 3 half-extents");
        ctx.warn_unresolved("knee_motor", "joint", "knee");
        assert_eq!(ctx.diagnostics.len(), 2);
        assert!(ctx.diagnostics[0].is_geometry());
    }

    #[test]
    fn model_name_prefers_declaration() {
        let config = CompilerConfig::default();
        let mut ctx = BuildContext::new(&config, None);
        assert_eq!(ctx.model_name(None, "robot"), "robot");
        ctx.name_hint = Some("arm".into());
        assert_eq!(ctx.model_name(None, "robot"), "arm");
        assert_eq!(ctx.model_name(Some("panda"), "robot"), "panda");
    }

    // -- paths --

    #[test]
    fn relative_paths_join_model_dir() {
        let config = CompilerConfig::default();
        let ctx = BuildContext::new(&config, Some(PathBuf::from("/robots/arm")));
        let joined = PathBuf::from(ctx.resolve_path("link.stl", Some("meshes")));
        assert_eq!(joined, Path::new("/robots/arm/meshes/link.stl"));
        assert_eq!(ctx.resolve_path("/abs/link.stl", Some("meshes")), "/abs/link.stl");
        assert_eq!(
            ctx.resolve_path("package://arm/link.stl", None),
            "package://arm/link.stl"
        );
    }

    #[test]
    fn path_resolution_can_be_disabled() {
        let mut config = CompilerConfig::default();
        config.assets.resolve_paths = false;
        let ctx = BuildContext::new(&config, Some(PathBuf::from("/robots")));
        assert_eq!(ctx.resolve_path("link.stl", Some("meshes")), "link.stl");
    }

    #[test]
    fn literal_meshes_land_in_mesh_dir() {
        let config = CompilerConfig::default();
        let mut ctx = BuildContext::new(&config, Some(PathBuf::from("/robots")));
        ctx.mesh_dir = Some("assets".into());
        let mesh = ctx.register_mesh("hand.stl");
        assert_eq!(mesh.id, "hand.stl");
        assert_eq!(PathBuf::from(&mesh.file), Path::new("/robots/assets/hand.stl"));
        assert_eq!(ctx.register_mesh("hand.stl"), mesh);
        assert_eq!(ctx.assets.meshes().len(), 1);
    }

    #[test]
    fn without_model_dir_paths_stay_relative() {
        let config = CompilerConfig::default();
        let ctx = BuildContext::new(&config, None);
        assert_eq!(ctx.resolve_path("link.stl", None), "link.stl");
    }
}
