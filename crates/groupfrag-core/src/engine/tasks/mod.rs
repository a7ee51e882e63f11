//! Tasks that turn a match set into a group assignment.
//!
//! Each submodule is one step of the assignment pipeline: the greedy priority pass, coverage
//! and hydrogen verification, the bounded suppression search that retries the greedy pass,
//! and the deduplication used by strict-cover mode. Tasks read an
//! [`AssignmentContext`](super::context::AssignmentContext) and never touch the molecule.

pub mod coverage;
pub mod deduplication;
pub mod greedy_assignment;
pub mod suppression_search;
