//! Deduplicating registry of meshes, materials and heightfields.
//!
//! Every asset kind is keyed by its logical id. The first registration of an
//! id wins; later registrations of the same id are discarded without error
//! and without merging.

use std::collections::HashMap;

use kinforge_core::types::{HeightfieldAsset, MaterialAsset, MeshAsset};
use tracing::debug;

/// Append-only table of assets keyed by id, kept in registration order.
#[derive(Debug, Clone)]
struct Table<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Returns `false` when `id` was already registered.
    fn insert(&mut self, id: &str, value: T) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.index.insert(id.to_owned(), self.entries.len());
        self.entries.push(value);
        true
    }
}

/// Assets collected while compiling one model.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    meshes: Table<MeshAsset>,
    materials: Table<MaterialAsset>,
    heightfields: Table<HeightfieldAsset>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // -- meshes --

    /// Declares a mesh from an asset table. Returns `false` if the id was
    /// already taken, in which case the earlier entry is kept.
    pub fn declare_mesh(&mut self, mesh: MeshAsset) -> bool {
        let id = mesh.id.clone();
        let added = self.meshes.insert(&id, mesh);
        if !added {
            debug!(mesh = %id, "duplicate mesh id ignored");
        }
        added
    }

    /// Resolves a mesh reference.
    ///
    /// A reference naming a declared asset returns that asset. Anything else
    /// is a literal file name: it is registered under its own text as id,
    /// with `resolve` mapping it to the stored file path.
    pub fn register_mesh(&mut self, raw: &str, resolve: impl FnOnce(&str) -> String) -> MeshAsset {
        if let Some(known) = self.meshes.get(raw) {
            return known.clone();
        }
        let mesh = MeshAsset::new(raw, resolve(raw), [1.0; 3]);
        self.meshes.insert(raw, mesh.clone());
        mesh
    }

    pub fn mesh(&self, id: &str) -> Option<&MeshAsset> {
        self.meshes.get(id)
    }

    pub fn meshes(&self) -> &[MeshAsset] {
        &self.meshes.entries
    }

    // -- materials --

    /// Registers a named material. Returns `false` if the name was taken.
    pub fn register_material(&mut self, material: MaterialAsset) -> bool {
        let name = material.name.clone();
        self.materials.insert(&name, material)
    }

    pub fn material(&self, name: &str) -> Option<&MaterialAsset> {
        self.materials.get(name)
    }

    pub fn materials(&self) -> &[MaterialAsset] {
        &self.materials.entries
    }

    // -- heightfields --

    pub fn register_heightfield(&mut self, heightfield: HeightfieldAsset) -> bool {
        let id = heightfield.id.clone();
        self.heightfields.insert(&id, heightfield)
    }

    pub fn heightfield(&self, id: &str) -> Option<&HeightfieldAsset> {
        self.heightfields.get(id)
    }

    /// Consumes the registry, returning meshes, materials and heightfields
    /// in registration order.
    pub fn into_parts(self) -> (Vec<MeshAsset>, Vec<MaterialAsset>, Vec<HeightfieldAsset>) {
        (
            self.meshes.entries,
            self.materials.entries,
            self.heightfields.entries,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
