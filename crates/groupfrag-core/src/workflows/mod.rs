//! # Workflows Module
//!
//! This module provides the high-level procedures that tie the fragmentation engine and
//! the property tables together.
//!
//! ## Overview
//!
//! Workflows are the entry points for callers of the library. Each one collects matches
//! for a molecule, resolves them into a group assignment, reports progress, and returns a
//! result whose status tells the caller whether the assignment can be trusted.
//!
//! ## Architecture
//!
//! - **Fragmentation** ([`fragment`]) - Priority and strict-cover fragmentation of single
//!   molecules, molecule sources, and batches.
//! - **Estimation** ([`estimate`]) - Strict fragmentation followed by Joback property
//!   estimation.
//!
//! ## Key Capabilities
//!
//! - **Status-based results** where construction and coverage failures are values
//! - **Parallel batches** with input order preserved
//! - **Progress monitoring** through phase and task events

pub mod estimate;
pub mod fragment;
