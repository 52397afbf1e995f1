//! Feature Resolver: maps `(owner, feature)` to candidate declarations.
//!
//! Dispatch is a match on [`OwnerKind`]:
//!
//! - **Item**: own attributes and relation-derived roles, level by level up
//!   the inheritance chain (nearest type first). Nothing is deduplicated;
//!   shadowing and several matching ends are both reported.
//! - **Relation**: `source`/`target` (any case) name the relation's ends;
//!   any other feature is looked up on the link item.
//! - **Enum**: only `code` and `name`, matched exactly, resolving to the enum.
//!
//! An unknown owner or feature yields an empty [`Resolution`], never an error.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::cache::{OccurrenceKey, RequestFingerprint, ResolutionCache};
use super::candidate::{Resolution, ResolutionCandidate};
use super::error::ResolveError;
use super::walk::InheritanceWalker;
use crate::base::constants::{ENUM_FEATURES, SOURCE_FEATURE, TARGET_FEATURE};
use crate::base::{Name, eq_ignore_case};
use crate::meta::{MetaModel, OwnerKind};
use crate::model::MetaItem;

// ============================================================================
// REQUEST
// ============================================================================

/// One occurrence to resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRequest {
    pub owner_kind: OwnerKind,
    pub owner_name: Name,
    pub feature: Name,
    pub include_inherited: bool,
    /// Cache identity; requests without one are never cached.
    pub key: Option<OccurrenceKey>,
}

impl FeatureRequest {
    pub fn new(owner_kind: OwnerKind, owner_name: impl Into<Name>, feature: impl Into<Name>) -> Self {
        Self {
            owner_kind,
            owner_name: owner_name.into(),
            feature: feature.into(),
            include_inherited: false,
            key: None,
        }
    }

    pub fn item(owner_name: impl Into<Name>, feature: impl Into<Name>) -> Self {
        Self::new(OwnerKind::Item, owner_name, feature)
    }

    pub fn relation(owner_name: impl Into<Name>, feature: impl Into<Name>) -> Self {
        Self::new(OwnerKind::Relation, owner_name, feature)
    }

    pub fn enumeration(owner_name: impl Into<Name>, feature: impl Into<Name>) -> Self {
        Self::new(OwnerKind::Enum, owner_name, feature)
    }

    pub fn inherited(mut self) -> Self {
        self.include_inherited = true;
        self
    }

    pub fn with_key(mut self, key: OccurrenceKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn fingerprint(&self) -> RequestFingerprint {
        RequestFingerprint {
            owner_kind: self.owner_kind,
            owner_name: self.owner_name.clone(),
            feature: self.feature.clone(),
            include_inherited: self.include_inherited,
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Resolves feature requests against one published model.
#[derive(Debug, Clone, Copy)]
pub struct FeatureResolver<'a> {
    model: &'a MetaModel,
    cache: Option<&'a ResolutionCache>,
}

impl<'a> FeatureResolver<'a> {
    pub fn new(model: &'a MetaModel) -> Self {
        Self { model, cache: None }
    }

    pub fn with_cache(mut self, cache: &'a ResolutionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Resolve one request, consulting and filling the cache when the request
    /// has a key.
    ///
    /// A cancelled token yields an empty result and leaves the cache alone,
    /// both at entry and after computing.
    pub fn resolve(&self, request: &FeatureRequest, cancel: &CancellationToken) -> Resolution {
        if cancel.is_cancelled() {
            tracing::trace!("[RESOLVE] Cancelled before '{}'", request.feature);
            return Resolution::empty();
        }

        let cached = self.cache.zip(request.key);
        let fingerprint = cached.map(|_| request.fingerprint());
        if let (Some((cache, key)), Some(fingerprint)) = (cached, &fingerprint) {
            if let Some(hit) = cache.get(&key, fingerprint, self.model.generation()) {
                tracing::trace!("[RESOLVE] Cache hit for '{}'", request.feature);
                return hit;
            }
        }

        let resolution = self.resolve_uncached(request);

        if cancel.is_cancelled() {
            tracing::trace!("[RESOLVE] Cancelled after '{}'", request.feature);
            return Resolution::empty();
        }
        if let (Some((cache, key)), Some(fingerprint)) = (cached, fingerprint) {
            if !resolution.is_empty() {
                cache.put(key, fingerprint, self.model.generation(), resolution.clone());
            }
        }
        resolution
    }

    /// Resolve without touching the cache.
    pub fn resolve_uncached(&self, request: &FeatureRequest) -> Resolution {
        tracing::trace!(
            "[RESOLVE] {} '{}' feature '{}' (inherited: {})",
            request.owner_kind,
            request.owner_name,
            request.feature,
            request.include_inherited
        );
        let candidates = match request.owner_kind {
            OwnerKind::Item => self.resolve_on_item(&request.owner_name, &request.feature, request.include_inherited),
            OwnerKind::Relation => self.resolve_on_relation(&request.owner_name, &request.feature),
            OwnerKind::Enum => self.resolve_on_enum(&request.owner_name, &request.feature),
        };
        tracing::trace!("[RESOLVE] -> {} candidate(s)", candidates.len());
        Resolution::from(candidates)
    }

    /// Like [`resolve`](Self::resolve), but require exactly one candidate.
    pub fn resolve_single(
        &self,
        request: &FeatureRequest,
        cancel: &CancellationToken,
    ) -> Result<ResolutionCandidate, ResolveError> {
        let resolution = self.resolve(request, cancel);
        if cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        match resolution.len() {
            0 => Err(ResolveError::Unresolved {
                owner_kind: request.owner_kind,
                owner: request.owner_name.clone(),
                feature: request.feature.clone(),
            }),
            1 => Ok(resolution[0].clone()),
            count => Err(ResolveError::Ambiguous {
                owner_kind: request.owner_kind,
                owner: request.owner_name.clone(),
                feature: request.feature.clone(),
                count,
            }),
        }
    }

    fn resolve_on_item(&self, owner: &str, feature: &str, include_inherited: bool) -> Vec<ResolutionCandidate> {
        match self.model.find_item_by_name(owner) {
            Some(item) => self.collect_item_features(item, feature, include_inherited),
            None => {
                tracing::trace!("[RESOLVE] Unknown item '{}'", owner);
                Vec::new()
            }
        }
    }

    fn collect_item_features(
        &self,
        item: &Arc<MetaItem>,
        feature: &str,
        include_inherited: bool,
    ) -> Vec<ResolutionCandidate> {
        let depth = if include_inherited { usize::MAX } else { 1 };
        let mut candidates = Vec::new();
        for level in InheritanceWalker::new(self.model).ancestry(item).take(depth) {
            if let Some(attr) = level.attribute(feature) {
                candidates.push(ResolutionCandidate::Attribute(Arc::clone(attr)));
            }
            candidates.extend(
                self.model
                    .reference_ends_of(&level.name)
                    .iter()
                    .filter(|end| end.qualifier_matches(feature))
                    .map(|end| ResolutionCandidate::RelationEnd(Arc::clone(end))),
            );
        }
        candidates
    }

    fn resolve_on_relation(&self, owner: &str, feature: &str) -> Vec<ResolutionCandidate> {
        let Some(relation) = self.model.find_relation_by_name(owner) else {
            tracing::trace!("[RESOLVE] Unknown relation '{}'", owner);
            return Vec::new();
        };

        let end = if eq_ignore_case(feature, SOURCE_FEATURE) {
            Some(&relation.source)
        } else if eq_ignore_case(feature, TARGET_FEATURE) {
            Some(&relation.target)
        } else {
            None
        };
        if let Some(end) = end {
            if end.type_name.is_none() {
                tracing::trace!("[RESOLVE] Relation '{}' has no {} type", owner, end.side.as_str());
                return Vec::new();
            }
            return vec![ResolutionCandidate::RelationEnd(Arc::clone(end))];
        }

        match self.model.find_item_by_name(self.model.link_item_name()) {
            Some(link) => self.collect_item_features(link, feature, true),
            None => Vec::new(),
        }
    }

    fn resolve_on_enum(&self, owner: &str, feature: &str) -> Vec<ResolutionCandidate> {
        if !ENUM_FEATURES.contains(&feature) {
            return Vec::new();
        }
        self.model
            .find_enum_by_name(owner)
            .map(|meta| vec![ResolutionCandidate::Enum(Arc::clone(meta))])
            .unwrap_or_default()
    }

    pub fn model(&self) -> &'a MetaModel {
        self.model
    }
}
