use super::error::EngineError;
use crate::core::catalog::descriptor::GroupDescriptor;
use crate::core::pattern::oracle::PatternOracle;
use std::sync::OnceLock;

/// Write-once store of compiled patterns, one slot per catalog descriptor.
///
/// Slots are filled lazily on first use or all at once by [`PatternCache::precompile`].
/// Once filled they are never modified, so the cache can be shared by concurrent readers.
#[derive(Debug)]
pub struct PatternCache<C> {
    slots: Vec<OnceLock<Vec<C>>>,
}

impl<C> PatternCache<C> {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceLock::new()).collect(),
        }
    }

    pub fn compiled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.get().is_some()).count()
    }

    pub fn get_or_compile<O>(
        &self,
        index: usize,
        descriptor: &GroupDescriptor,
        oracle: &O,
    ) -> Result<&[C], EngineError>
    where
        O: PatternOracle<Compiled = C>,
    {
        let slot = self.slots.get(index).ok_or_else(|| {
            EngineError::Internal(format!(
                "pattern cache has {} slots, requested slot {}",
                self.slots.len(),
                index
            ))
        })?;
        if let Some(compiled) = slot.get() {
            return Ok(compiled);
        }

        let compiled = descriptor
            .patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| {
                oracle.compile(pattern).map_err(|source| EngineError::Pattern {
                    group: descriptor.id,
                    pattern: i,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // A concurrent caller may have won the race; either value is equivalent.
        let _ = slot.set(compiled);
        slot.get().map(Vec::as_slice).ok_or_else(|| {
            EngineError::Internal(format!("pattern cache slot {index} is empty after compilation"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Molecule;
    use crate::core::pattern::PatternError;
    use crate::core::pattern::matcher::SubstructureMatcher;
    use crate::core::pattern::oracle::AtomTuple;
    use crate::core::pattern::query::{QueryAtom, QueryPattern};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOracle {
        compiled: AtomicUsize,
    }

    impl PatternOracle for CountingOracle {
        type Compiled = usize;

        fn compile(&self, pattern: &QueryPattern) -> Result<usize, PatternError> {
            self.compiled.fetch_add(1, Ordering::SeqCst);
            Ok(pattern.atoms.len())
        }

        fn find_matches(&self, _: &usize, _: &Molecule) -> Vec<AtomTuple> {
            Vec::new()
        }
    }

    fn group() -> GroupDescriptor {
        GroupDescriptor::new(
            1,
            "carbon",
            vec![
                QueryPattern::single(QueryAtom::element(Element::C)),
                QueryPattern::new(vec![QueryAtom::any(), QueryAtom::any()]),
            ],
        )
    }

    #[test]
    fn compiles_each_slot_only_once() {
        let oracle = CountingOracle {
            compiled: AtomicUsize::new(0),
        };
        let cache = PatternCache::new(1);
        let descriptor = group();
        assert_eq!(cache.get_or_compile(0, &descriptor, &oracle).unwrap(), &[1, 2]);
        assert_eq!(cache.get_or_compile(0, &descriptor, &oracle).unwrap(), &[1, 2]);
        assert_eq!(oracle.compiled.load(Ordering::SeqCst), 2);
        assert_eq!(cache.compiled_count(), 1);
    }

    #[test]
    fn out_of_range_slot_is_an_internal_error() {
        let cache: PatternCache<<SubstructureMatcher as PatternOracle>::Compiled> =
            PatternCache::new(0);
        let result = cache.get_or_compile(3, &group(), &SubstructureMatcher);
        assert!(matches!(result, Err(EngineError::Internal(_))));
    }

    #[test]
    fn compile_failure_names_group_and_pattern() {
        let cache = PatternCache::new(1);
        let descriptor = GroupDescriptor::new(
            9,
            "broken",
            vec![
                QueryPattern::single(QueryAtom::any()),
                QueryPattern::default(),
            ],
        );
        let result = cache.get_or_compile(0, &descriptor, &SubstructureMatcher);
        assert!(matches!(
            result,
            Err(EngineError::Pattern { pattern: 1, source: PatternError::Empty, .. })
        ));
        assert_eq!(cache.compiled_count(), 0);
    }
}
