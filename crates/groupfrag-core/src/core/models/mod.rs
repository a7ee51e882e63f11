//! # Molecular Models
//!
//! The heavy-atom molecular graph consumed by pattern matching and fragmentation.
//!
//! Hydrogens are never graph nodes. Each [`atom::Atom`] carries the number of hydrogens
//! attached to it, and ring membership is derived from the bond graph when a
//! [`molecule::Molecule`] is built. Ring-size information for methods that count rings
//! comes from [`rings::RingInfo`].

pub mod atom;
pub mod builder;
pub mod element;
pub mod molecule;
pub mod rings;
pub mod topology;
