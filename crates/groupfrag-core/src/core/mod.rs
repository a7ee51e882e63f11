//! # Core Module
//!
//! Foundational data structures and pure computations for group-contribution analysis.
//!
//! ## Overview
//!
//! Everything in this module is free of orchestration state. A [`models::Molecule`] is an
//! immutable heavy-atom graph, a [`catalog::Catalog`] is an ordered list of group descriptors,
//! and [`properties`] reduces group counts into physical estimates.
//!
//! ## Architecture
//!
//! - **Molecular Models** ([`models`]) - Elements, atoms, bonds and the molecule graph
//! - **Structural Queries** ([`pattern`]) - Query patterns, the oracle seam and a VF2 matcher
//! - **Group Catalogs** ([`catalog`]) - Group descriptors and TOML catalog loading
//! - **Property Estimation** ([`properties`]) - Group constant tables and the Joback method
//! - **Input Seams** ([`io`]) - The interface external structure parsers implement

pub mod catalog;
pub mod io;
pub mod models;
pub mod pattern;
pub mod properties;
