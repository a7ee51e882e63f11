//! # Pattern Module
//!
//! Structural queries and the oracle that evaluates them against a molecule.
//!
//! ## Overview
//!
//! A [`query::QueryPattern`] is a small graph of atom and bond predicates, with nested
//! environment patterns playing the role of recursive SMARTS. The fragmentation engine never
//! evaluates patterns itself: it asks a [`oracle::PatternOracle`] for every atom tuple a
//! pattern matches. [`matcher::SubstructureMatcher`] is the built-in VF2-style oracle.

pub mod matcher;
pub mod oracle;
pub mod query;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PatternError {
    #[error("Pattern has no atoms")]
    Empty,
    #[error("Pattern bond {bond} references atom {atom}, but the pattern has only {atom_count} atoms")]
    BondOutOfRange {
        bond: usize,
        atom: usize,
        atom_count: usize,
    },
    #[error("Pattern bond {bond} connects an atom to itself")]
    SelfBond { bond: usize },
    #[error("Invalid environment on pattern atom {atom}: {source}")]
    Environment {
        atom: usize,
        source: Box<PatternError>,
    },
    #[error("Pattern compilation failed: {0}")]
    Compilation(String),
}
