//! AnalysisHost and Analysis: the context object the embedding application
//! owns.
//!
//! The `AnalysisHost` owns the declaration set, the published model and the
//! resolution cache, and hands out `Analysis` snapshots for querying. A
//! snapshot keeps the model it was taken from, so a rebuild never changes the
//! answers of a query already in flight.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new(EngineConfig::default());
//!
//! // Apply declaration changes
//! host.set_file_declarations(file_id, declarations);
//!
//! // Get a snapshot for queries
//! let analysis = host.analysis();
//! let candidates = analysis.resolve(&request, &cancel);
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::base::{EngineConfig, FileId};
use crate::decl::{Declaration, DeclarationError};
use crate::hir::{
    Diagnostic, FeatureRequest, FeatureResolver, OccurrenceKey, Resolution, ResolutionCache,
    ResolutionCandidate, ResolveError, codes,
};
use crate::meta::{Generation, MetaModel, MetaModelAccess, OwnerKind};
use crate::model::MergeConflict;
use crate::store::DeclarationStore;

/// Owns all mutable state of the engine.
///
/// Apply changes via `set_file_declarations()` and `remove_file()`,
/// then get a consistent snapshot via `analysis()`.
pub struct AnalysisHost {
    config: EngineConfig,
    /// Declarations per schema file, in registration order
    files: IndexMap<FileId, Vec<Declaration>>,
    model: Arc<MetaModelAccess>,
    cache: Arc<ResolutionCache>,
    /// Conflicts found by the last rebuild
    conflicts: Vec<MergeConflict>,
    /// Whether the model needs rebuilding
    index_dirty: bool,
}

impl Default for AnalysisHost {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AnalysisHost {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            model: Arc::new(MetaModelAccess::new(config.clone())),
            config,
            files: IndexMap::new(),
            cache: Arc::new(ResolutionCache::new()),
            conflicts: Vec::new(),
            index_dirty: false,
        }
    }

    /// Replace every declaration coming from `file`.
    ///
    /// Declarations that would be rejected by the store are returned and not
    /// kept; the rest are.
    pub fn set_file_declarations(
        &mut self,
        file: FileId,
        declarations: Vec<Declaration>,
    ) -> Vec<DeclarationError> {
        let (accepted, rejected): (Vec<_>, Vec<_>) = declarations
            .into_iter()
            .map(|decl| decl.validate().map(|()| decl))
            .partition(Result::is_ok);

        let accepted: Vec<Declaration> = accepted.into_iter().flatten().collect();
        let errors: Vec<DeclarationError> = rejected.into_iter().filter_map(Result::err).collect();
        tracing::debug!(
            "[HOST] {}: {} declarations, {} rejected",
            file,
            accepted.len(),
            errors.len()
        );

        self.files.insert(file, accepted);
        self.index_dirty = true;
        errors
    }

    /// Append one declaration to `file`.
    pub fn add_declaration(
        &mut self,
        file: FileId,
        declaration: impl Into<Declaration>,
    ) -> Result<(), DeclarationError> {
        let declaration = declaration.into();
        declaration.validate()?;
        self.files.entry(file).or_default().push(declaration);
        self.index_dirty = true;
        Ok(())
    }

    /// Remove every declaration coming from `file`.
    pub fn remove_file(&mut self, file: FileId) {
        if self.files.shift_remove(&file).is_some() {
            self.index_dirty = true;
        }
    }

    pub fn has_file(&self, file: FileId) -> bool {
        self.files.contains_key(&file)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Mark the model as needing a rebuild.
    pub fn mark_dirty(&mut self) {
        self.index_dirty = true;
    }

    /// Rebuild the model from all files and publish it.
    ///
    /// Called automatically by `analysis()` if the model is dirty.
    pub fn rebuild(&mut self) -> Generation {
        let mut store = DeclarationStore::with_config(&self.config);
        for declarations in self.files.values() {
            for declaration in declarations {
                // Already validated on the way in.
                if let Err(err) = store.register_or_merge(declaration.clone()) {
                    tracing::warn!("[HOST] {}", err);
                }
            }
        }

        let model = self.model.rebuild(&store);
        self.conflicts = store.conflicts().to_vec();
        self.cache.invalidate_all();
        self.index_dirty = false;

        tracing::debug!(
            "[HOST] Rebuilt {} from {} files ({} conflicts)",
            model.generation(),
            self.files.len(),
            self.conflicts.len()
        );
        model.generation()
    }

    /// Get a consistent snapshot for querying.
    ///
    /// If the model is dirty, it will be rebuilt first.
    pub fn analysis(&mut self) -> Analysis {
        if self.index_dirty {
            self.rebuild();
        }
        Analysis {
            model: self.model.snapshot(),
            cache: Arc::clone(&self.cache),
        }
    }

    /// Conflicts recorded by the last rebuild.
    pub fn conflicts(&self) -> &[MergeConflict] {
        &self.conflicts
    }

    /// Shared handle to the published model.
    pub fn model_access(&self) -> &Arc<MetaModelAccess> {
        &self.model
    }

    /// The cache, for front ends reporting edits.
    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// An immutable snapshot of the engine state.
///
/// All queries go through this struct to ensure consistent results. Cheap to
/// clone and safe to send to other threads.
#[derive(Clone)]
pub struct Analysis {
    model: Arc<MetaModel>,
    cache: Arc<ResolutionCache>,
}

impl Analysis {
    fn resolver(&self) -> FeatureResolver<'_> {
        FeatureResolver::new(&self.model).with_cache(&self.cache)
    }

    /// Resolve one occurrence.
    pub fn resolve(&self, request: &FeatureRequest, cancel: &CancellationToken) -> Resolution {
        self.resolver().resolve(request, cancel)
    }

    /// Resolve many occurrences in parallel, keeping request order.
    pub fn resolve_batch(&self, requests: &[FeatureRequest], cancel: &CancellationToken) -> Vec<Resolution> {
        requests
            .par_iter()
            .map(|request| self.resolve(request, cancel))
            .collect()
    }

    /// Strict resolution: exactly one declaration, or an error.
    pub fn goto_declaration(
        &self,
        request: &FeatureRequest,
        cancel: &CancellationToken,
    ) -> Result<ResolutionCandidate, ResolveError> {
        self.resolver().resolve_single(request, cancel)
    }

    /// Report every occurrence that does not resolve.
    ///
    /// With `strict`, occurrences with several candidates are reported too.
    /// Nothing is reported once `cancel` fires.
    pub fn check_occurrences(
        &self,
        requests: &[FeatureRequest],
        strict: bool,
        cancel: &CancellationToken,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for request in requests {
            if cancel.is_cancelled() {
                return Vec::new();
            }
            if self.owner_kind_of(&request.owner_name).is_none() {
                diagnostics.push(Diagnostic::error(
                    request.key,
                    codes::UNKNOWN_OWNER,
                    format!("unknown type '{}'", request.owner_name),
                ));
                continue;
            }
            let outcome = self.goto_declaration(request, cancel);
            let diagnostic = match &outcome {
                Err(err @ ResolveError::Ambiguous { .. }) if !strict => {
                    tracing::trace!("[HOST] Tolerating {}", err);
                    None
                }
                Err(err) => Diagnostic::from_resolve_error(request.key, err),
                Ok(_) => None,
            };
            diagnostics.extend(diagnostic);
        }
        diagnostics
    }

    pub fn owner_kind_of(&self, name: &str) -> Option<OwnerKind> {
        self.model.owner_kind_of(name)
    }

    /// Front-end callback for an edit at `key`.
    pub fn occurrence_changed(&self, key: &OccurrenceKey) {
        self.cache.on_occurrence_changed(key);
    }

    pub fn model(&self) -> &Arc<MetaModel> {
        &self.model
    }

    pub fn generation(&self) -> Generation {
        self.model.generation()
    }
}
