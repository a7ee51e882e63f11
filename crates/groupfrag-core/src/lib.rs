//! # groupfrag Core Library
//!
//! A group-contribution library that decomposes organic molecules into tabulated structural
//! groups and turns the resulting group counts into thermophysical property estimates.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture so that each concern can be tested
//! and replaced on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Catalog`), the
//!   structural query language and its built-in matcher, the Joback contribution tables
//!   with their property formulas, and the Fedors and Wilson–Jasperson atom-increment
//!   estimators.
//!
//! - **[`engine`]: The Logic Core.** Collects pattern matches for a molecule and resolves them
//!   into a non-overlapping group assignment, either greedily by priority with a bounded
//!   suppression search, or by strict deduplication of contested atoms.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into complete
//!   procedures: fragmenting one molecule or a batch, and estimating Joback properties
//!   end to end.

pub mod core;
pub mod engine;
pub mod workflows;
