use super::cache::PatternCache;
use super::error::EngineError;
use super::match_set::MatchSet;
use crate::core::catalog::registry::Catalog;
use crate::core::models::molecule::Molecule;
use crate::core::pattern::matcher::SubstructureMatcher;
use crate::core::pattern::oracle::PatternOracle;
use tracing::{debug, instrument, trace};

/// Runs every catalog pattern against a molecule through a [`PatternOracle`].
///
/// The collector owns its catalog together with the compiled-pattern cache, so the cache's
/// lifetime is that of the catalog it was built for. It is `Sync` whenever the oracle is,
/// and can serve many molecules from many threads.
#[derive(Debug)]
pub struct MatchCollector<O: PatternOracle = SubstructureMatcher> {
    catalog: Catalog,
    oracle: O,
    cache: PatternCache<O::Compiled>,
}

impl MatchCollector<SubstructureMatcher> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_oracle(catalog, SubstructureMatcher)
    }
}

impl<O: PatternOracle> MatchCollector<O> {
    pub fn with_oracle(catalog: Catalog, oracle: O) -> Self {
        let cache = PatternCache::new(catalog.len());
        Self {
            catalog,
            oracle,
            cache,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Compiles every pattern up front so later collection never writes to the cache.
    #[instrument(skip_all, name = "precompile_patterns")]
    pub fn precompile(&self) -> Result<(), EngineError> {
        for (index, descriptor) in self.catalog.iter().enumerate() {
            self.cache.get_or_compile(index, descriptor, &self.oracle)?;
        }
        debug!("Compiled patterns for {} catalog group(s).", self.catalog.len());
        Ok(())
    }

    pub fn compiled_groups(&self) -> usize {
        self.cache.compiled_count()
    }

    /// Builds the match set of `molecule`.
    ///
    /// Variants of one group are unioned with identical tuples collapsed; groups without
    /// any hit are left out.
    pub fn collect(&self, molecule: &Molecule) -> Result<MatchSet, EngineError> {
        let mut match_set = MatchSet::new();
        for (index, descriptor) in self.catalog.iter().enumerate() {
            let compiled = self.cache.get_or_compile(index, descriptor, &self.oracle)?;
            let hits = compiled
                .iter()
                .flat_map(|pattern| self.oracle.find_matches(pattern, molecule));
            match_set.extend(descriptor.id, hits);
            if let Some(tuples) = match_set.get(descriptor.id) {
                trace!("Group {} matched {} time(s).", descriptor.id, tuples.len());
            }
        }
        debug!(
            "Collected {} occurrence(s) across {} group(s).",
            match_set.occurrence_count(),
            match_set.entries().len()
        );
        Ok(match_set)
    }
}
