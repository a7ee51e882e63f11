//! # Properties Module
//!
//! Reduction of group counts into thermophysical property estimates.
//!
//! ## Overview
//!
//! Group contribution methods are linear in the group counts: each property is a
//! tabulated per-group constant, summed over occurrences and shifted or scaled by a method
//! specific formula. This module holds the constant tables ([`constants`]), the Joback
//! method built on them ([`joback`]), and temperature-dependent correlations
//! ([`correlation`]) that carry their own validity ranges.
//!
//! Two atom-increment methods sit beside Joback. [`fedors`] estimates critical volume and
//! [`wilson_jasperson`] estimates critical temperature and pressure from a boiling point.
//! Both read their corrections from [`functional_groups`] and ring perception.
//!
//! Missing data is never a fault. A group without a tabulated constant makes the affected
//! property `None` while every other property is still estimated.

pub mod constants;
pub mod correlation;
pub mod fedors;
pub mod functional_groups;
pub mod joback;
pub mod wilson_jasperson;
