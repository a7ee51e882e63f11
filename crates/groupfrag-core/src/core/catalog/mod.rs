//! # Catalog Module
//!
//! Ordered collections of group descriptors.
//!
//! A [`registry::Catalog`] keeps its descriptors in insertion order. That order is the
//! deterministic tie-break between groups of equal priority and the order in which match
//! sets are enumerated. Catalogs are loaded from TOML or taken from the embedded
//! Joback table via [`registry::Catalog::joback`].

pub mod descriptor;
pub mod registry;
