//! Rebuild-and-swap publication of the [`MetaModel`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::{Generation, MetaModel};
use crate::base::EngineConfig;
use crate::store::DeclarationStore;

/// The currently published [`MetaModel`], shared by all readers.
///
/// Readers take an `Arc` snapshot and never hold the lock while resolving.
/// A rebuild constructs the new model without the lock and then replaces the
/// pointer, so a reader sees either the old or the new model in full.
#[derive(Debug)]
pub struct MetaModelAccess {
    config: EngineConfig,
    current: RwLock<Arc<MetaModel>>,
    last_generation: AtomicU64,
}

impl MetaModelAccess {
    /// Start with an empty model at [`Generation::INITIAL`].
    pub fn new(config: EngineConfig) -> Self {
        let empty = MetaModel::empty(&config);
        Self {
            config,
            current: RwLock::new(Arc::new(empty)),
            last_generation: AtomicU64::new(Generation::INITIAL.0),
        }
    }

    /// The model as currently published.
    pub fn snapshot(&self) -> Arc<MetaModel> {
        Arc::clone(&self.current.read())
    }

    pub fn generation(&self) -> Generation {
        self.current.read().generation()
    }

    /// Build a new model from `store` and publish it.
    ///
    /// Returns the published snapshot. Concurrent rebuilds each get their own
    /// generation; an older build never replaces a newer one.
    pub fn rebuild(&self, store: &DeclarationStore) -> Arc<MetaModel> {
        let generation = Generation(self.last_generation.fetch_add(1, Ordering::AcqRel) + 1);
        let model = Arc::new(MetaModel::build(store, &self.config, generation));
        self.publish(Arc::clone(&model));
        model
    }

    fn publish(&self, model: Arc<MetaModel>) {
        let mut current = self.current.write();
        if model.generation() > current.generation() {
            tracing::debug!("[INDEX] Publishing {}", model.generation());
            *current = model;
        } else {
            tracing::debug!(
                "[INDEX] Dropping stale {} (current is {})",
                model.generation(),
                current.generation()
            );
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
