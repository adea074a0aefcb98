//! Multi-module elaboration with caching.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::{debug, warn};
use vela_ast::Module;
use vela_common::{ContentHash, Ident, Interner};
use vela_config::ElabConfig;
use vela_diagnostics::DiagnosticSink;
use vela_ir::{Arena, Entity, EntityId};

use crate::builder::{build_with_hash, module_hash};
use crate::errors::ElabError;

/// Owns the entities built during one session, keyed by module name.
///
/// Re-elaborating a module whose declaration is unchanged returns the cached
/// entity. A changed declaration under the same name replaces the cached one,
/// and a failed elaboration drops it, so [`entity`](Self::entity) always
/// reflects the last elaboration of that name.
///
/// Entity storage is append-only: an [`EntityId`] handed out earlier keeps
/// resolving to the entity it was issued for, and superseded entities stay in
/// memory until the session is dropped.
pub struct ElaborationSession<'a> {
    interner: &'a Interner,
    sink: &'a DiagnosticSink,
    config: ElabConfig,
    entities: Arena<EntityId, Entity>,
    by_name: HashMap<Ident, EntityId>,
    pool: Option<rayon::ThreadPool>,
}

impl<'a> ElaborationSession<'a> {
    /// Creates an empty session.
    pub fn new(interner: &'a Interner, config: ElabConfig, sink: &'a DiagnosticSink) -> Self {
        Self {
            interner,
            sink,
            config,
            entities: Arena::new(),
            by_name: HashMap::new(),
            pool: None,
        }
    }

    /// The configuration this session elaborates with.
    pub fn config(&self) -> &ElabConfig {
        &self.config
    }

    /// Elaborates one module, reusing the cached entity when its name and
    /// content hash match. Errors are also emitted to the sink.
    #[tracing::instrument(level = "debug", skip_all, fields(module = self.interner.resolve(module.name)))]
    pub fn elaborate(&mut self, module: &Module) -> Result<&Entity, ElabError> {
        let id = self
            .elaborate_id(module)
            .inspect_err(|err| self.sink.emit(err.to_diagnostic()))?;
        Ok(&self.entities[id])
    }

    /// Elaborates every module, in parallel when `elaborate.parallel` is set.
    ///
    /// Results are in input order. Each error is emitted to the sink, also
    /// in input order, and does not affect the other modules.
    #[tracing::instrument(level = "debug", skip_all, fields(modules = modules.len()))]
    pub fn elaborate_all(&mut self, modules: &[Module]) -> Vec<Result<EntityId, ElabError>> {
        // First occurrence of each uncached (name, hash); repeats resolve
        // through the cache once the first one is stored.
        let mut seen = HashSet::new();
        let pending: Vec<(usize, ContentHash)> = modules
            .iter()
            .enumerate()
            .filter_map(|(i, m)| match module_hash(m) {
                Ok(hash) if self.cached(m.name, hash).is_none() && seen.insert((m.name, hash)) => {
                    Some((i, hash))
                }
                _ => None,
            })
            .collect();

        let interner = self.interner;
        let config = &self.config;
        let build = |&(i, hash): &(usize, ContentHash)| {
            (i, build_with_hash(&modules[i], hash, interner, config))
        };
        let built: Vec<(usize, Result<Entity, ElabError>)> =
            match self.config.elaborate.parallel.then(|| Self::pool(&mut self.pool, config)) {
                Some(Some(pool)) => pool.install(|| pending.par_iter().map(build).collect()),
                _ => pending.iter().map(build).collect(),
            };
        let mut built: HashMap<usize, Result<Entity, ElabError>> = built.into_iter().collect();

        modules
            .iter()
            .enumerate()
            .map(|(i, module)| {
                let result = match built.remove(&i) {
                    Some(result) => self.record(module.name, result),
                    // Cache hit, repeat within the batch, or hashing failed.
                    None => self.elaborate_id(module),
                };
                if let Err(err) = &result {
                    self.sink.emit(err.to_diagnostic());
                }
                result
            })
            .collect()
    }

    /// The current entity for module `name`.
    pub fn entity(&self, name: Ident) -> Option<&Entity> {
        self.by_name.get(&name).map(|&id| &self.entities[id])
    }

    /// An entity by the id [`elaborate_all`](Self::elaborate_all) returned.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Number of modules with a current entity.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if nothing was elaborated.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// The current entities, in the order their modules were first built.
    pub fn into_entities(self) -> Vec<Entity> {
        let mut live: Vec<EntityId> = self.by_name.into_values().collect();
        live.sort();
        let mut live = live.into_iter().peekable();
        self.entities
            .into_iter()
            .filter_map(|(id, entity)| live.next_if_eq(&id).map(|_| entity))
            .collect()
    }

    fn cached(&self, name: Ident, hash: ContentHash) -> Option<EntityId> {
        self.by_name
            .get(&name)
            .copied()
            .filter(|&id| self.entities[id].content_hash == hash)
    }

    /// Single-module path shared by [`elaborate`](Self::elaborate) and cache
    /// hits in [`elaborate_all`](Self::elaborate_all). Does not emit.
    fn elaborate_id(&mut self, module: &Module) -> Result<EntityId, ElabError> {
        let hash = match module_hash(module) {
            Ok(hash) => hash,
            Err(err) => return self.record(module.name, Err(err)),
        };
        if let Some(id) = self.cached(module.name, hash) {
            debug!(hash = %hash, "cache hit");
            return Ok(id);
        }
        let built = build_with_hash(module, hash, self.interner, &self.config);
        self.record(module.name, built)
    }

    /// Makes `result` the current state of module `name`.
    fn record(
        &mut self,
        name: Ident,
        result: Result<Entity, ElabError>,
    ) -> Result<EntityId, ElabError> {
        match result {
            Ok(entity) => {
                let id = self.entities.alloc(entity);
                self.by_name.insert(name, id);
                Ok(id)
            }
            Err(err) => {
                if self.by_name.remove(&name).is_some() {
                    debug!("dropped cached entity after failed elaboration");
                }
                Err(err)
            }
        }
    }

    fn pool<'p>(
        slot: &'p mut Option<rayon::ThreadPool>,
        config: &ElabConfig,
    ) -> Option<&'p rayon::ThreadPool> {
        if slot.is_none() {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(config.elaborate.threads)
                .build()
            {
                Ok(pool) => *slot = Some(pool),
                Err(e) => {
                    warn!(error = %e, "failed to start worker pool, elaborating sequentially");
                    return None;
                }
            }
        }
        slot.as_ref()
    }
}
