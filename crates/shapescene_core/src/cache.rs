//! Optional memoisation of decode and style resolution.
//!
//! Decoding and style resolution are pure, so their results can be reused
//! for every instance that shares a blob or a style. Transformation is never
//! cached: each instance bakes its own placement into its own copy.
//!
//! Both caches live for a single conversion run and are safe to share across
//! rayon workers. Two workers racing on the same key may both compute the
//! value; the results are identical, so the second insert is harmless.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex};

use crate::context::{GeometryLabel, StyleLabel};
use crate::material::{self, Material};
use crate::mesh::Mesh;
use crate::style::StyleRecord;
use crate::triangulation::{self, DecodeResult};

/// A thread-safe memo table.
#[derive(Debug)]
struct Memo<K, V> {
    entries: Mutex<HashMap<K, V>>,
    enabled: bool,
}

impl<K: Eq + Hash + Copy + fmt::Debug, V: Clone> Memo<K, V> {
    fn new(enabled: bool) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            enabled,
        }
    }

    fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        if !self.enabled {
            return compute();
        }

        if let Some(hit) = self.lock().get(&key) {
            log::debug!("Cache hit for {:?}", key);
            return hit.clone();
        }

        let value = compute();
        self.lock().insert(key, value.clone());
        value
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, V>> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Decoded meshes keyed by blob label.
#[derive(Debug)]
pub struct MeshCache {
    memo: Memo<GeometryLabel, DecodeResult<Arc<Mesh>>>,
}

impl MeshCache {
    /// Create a cache; a disabled cache decodes on every call.
    pub fn new(enabled: bool) -> Self {
        Self {
            memo: Memo::new(enabled),
        }
    }

    /// Decode `blob`, reusing an earlier result for the same label.
    pub fn decode(&self, geometry: GeometryLabel, blob: &[u8]) -> DecodeResult<Arc<Mesh>> {
        self.memo
            .get_or_insert_with(geometry, || triangulation::decode(blob).map(Arc::new))
    }

    /// Number of distinct blobs decoded so far.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Style materials keyed by style label.
#[derive(Debug)]
pub struct MaterialCache {
    memo: Memo<StyleLabel, Option<Material>>,
}

impl MaterialCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            memo: Memo::new(enabled),
        }
    }

    /// Material for a looked-up style, `None` if the style is unusable.
    pub fn material_for(&self, style: StyleLabel, record: Option<&StyleRecord>) -> Option<Material> {
        self.memo
            .get_or_insert_with(style, || record.and_then(material::material_from_style))
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
