//! # Engine Module
//!
//! This module implements the fragmentation engine: it finds every candidate group
//! occurrence in a molecule and selects a consistent, non-overlapping subset of them that
//! covers the whole molecule.
//!
//! ## Overview
//!
//! Fragmentation runs in two stages. The [`collector`] runs each catalog pattern through a
//! pattern oracle and gathers the hits into a [`match_set::MatchSet`], with compiled
//! patterns kept in a write-once [`cache`] shared by every molecule. The assignment
//! [`tasks`] then resolve overlaps, either greedily by priority with a bounded suppression
//! search, or by iterative deduplication in strict-cover mode.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search and deduplication bounds
//! - **State Tracking** ([`state`]) - Assignments, statuses and search bookkeeping
//! - **Progress Monitoring** ([`progress`]) - Phase and message callbacks for callers
//! - **Error Handling** ([`error`]) - Engine faults such as pattern compilation failures
//!
//! ## Key Capabilities
//!
//! - **Deterministic results** independent of thread count
//! - **Parallel search** over suppression sets behind the `parallel` feature
//! - **Shared pattern cache** so a collector can serve many threads at once
//! - **Status-based outcomes** where only true faults are returned as errors

pub(crate) mod cache;
pub mod collector;
pub mod config;
pub(crate) mod context;
pub mod error;
pub mod match_set;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
