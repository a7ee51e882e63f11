use super::PatternError;
use super::query::QueryPattern;
use crate::core::models::molecule::{AtomIndex, Molecule};

/// One occurrence location: matched atoms in pattern-atom order.
pub type AtomTuple = Vec<AtomIndex>;

/// Answers "which atom tuples of this molecule satisfy this pattern?".
///
/// Compilation is separated from matching so that callers can compile each pattern once
/// and share the compiled form across threads and molecules.
pub trait PatternOracle: Send + Sync {
    /// The compiled, reusable form of a pattern.
    type Compiled: Send + Sync;

    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the pattern cannot be expressed by this oracle.
    fn compile(&self, pattern: &QueryPattern) -> Result<Self::Compiled, PatternError>;

    /// Returns every match of `compiled` in `molecule`, unique by atom set, in a
    /// deterministic order.
    fn find_matches(&self, compiled: &Self::Compiled, molecule: &Molecule) -> Vec<AtomTuple>;
}
