//! Resolution Cache: per-occurrence memoization.
//!
//! Entries are keyed by an [`OccurrenceKey`] assigned by the front end and
//! stamped with the [`Generation`] of the model they were computed against and
//! a [`RequestFingerprint`] of the request. A lookup whose generation or
//! fingerprint differs from the stored one is a miss, so a rebuild never
//! needs to reach into the cache to stay correct. Explicit invalidation is
//! still offered for memory and for the "sibling changed" case.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Resolution;
use crate::base::{FileId, Name, TextRange};
use crate::meta::{Generation, OwnerKind};

/// The owning declaration subtree of an occurrence, as numbered by the front
/// end within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

/// Stable identity of one identifier occurrence in a front-end document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    pub document: FileId,
    pub scope: ScopeId,
    pub range: TextRange,
}

impl OccurrenceKey {
    pub fn new(document: FileId, scope: ScopeId, range: TextRange) -> Self {
        Self {
            document,
            scope,
            range,
        }
    }

    /// Whether `other` lives in the same owning declaration subtree.
    pub fn is_sibling_of(&self, other: &OccurrenceKey) -> bool {
        self.document == other.document && self.scope == other.scope
    }
}

/// Everything about a request that influences its result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestFingerprint {
    pub owner_kind: OwnerKind,
    pub owner_name: Name,
    pub feature: Name,
    pub include_inherited: bool,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    generation: Generation,
    fingerprint: RequestFingerprint,
    resolution: Resolution,
}

/// Occurrence-keyed resolution results.
///
/// Safe for concurrent readers. Writers to one key are expected to be
/// serialized by the front end that owns the occurrence.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<FxHashMap<OccurrenceKey, CacheEntry>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached result, if it was computed for the same request against
    /// the same model generation.
    pub fn get(
        &self,
        key: &OccurrenceKey,
        fingerprint: &RequestFingerprint,
        generation: Generation,
    ) -> Option<Resolution> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        if entry.generation != generation {
            tracing::trace!(
                "[CACHE] Stale entry for {:?} ({} != {})",
                key.range,
                entry.generation,
                generation
            );
            return None;
        }
        if entry.fingerprint != *fingerprint {
            tracing::trace!("[CACHE] Request changed at {:?}", key.range);
            return None;
        }
        Some(entry.resolution.clone())
    }

    pub fn put(
        &self,
        key: OccurrenceKey,
        fingerprint: RequestFingerprint,
        generation: Generation,
        resolution: Resolution,
    ) {
        self.entries.write().insert(
            key,
            CacheEntry {
                generation,
                fingerprint,
                resolution,
            },
        );
    }

    /// Drop one occurrence. Returns whether it was cached.
    pub fn invalidate(&self, key: &OccurrenceKey) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Drop every occurrence of one owning declaration subtree.
    pub fn invalidate_scope(&self, document: FileId, scope: ScopeId) -> usize {
        self.retain(|key| !(key.document == document && key.scope == scope))
    }

    /// Drop every occurrence of one document.
    pub fn invalidate_document(&self, document: FileId) -> usize {
        self.retain(|key| key.document != document)
    }

    /// Front-end callback for an edit at `key`.
    ///
    /// Resolving one occurrence may depend on its siblings (the owning type
    /// name comes from the header or `FROM` clause), so the whole subtree is
    /// dropped.
    pub fn on_occurrence_changed(&self, key: &OccurrenceKey) -> usize {
        let dropped = self.invalidate_scope(key.document, key.scope);
        tracing::debug!(
            "[CACHE] Edit in {} scope {}: dropped {} entries",
            key.document,
            key.scope.0,
            dropped
        );
        dropped
    }

    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write();
        tracing::debug!("[CACHE] Clearing {} entries", entries.len());
        entries.clear();
    }

    fn retain(&self, mut keep: impl FnMut(&OccurrenceKey) -> bool) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| keep(key));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
