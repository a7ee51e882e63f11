//! Input seams for structure parsers living outside this crate.
//!
//! Parsing linear structure notations is not part of this library. A parser plugs in by
//! implementing [`traits::MoleculeSource`], and the fragmentation workflows turn its
//! failures into a `ConstructionFailed` status instead of an error.

pub mod traits;
