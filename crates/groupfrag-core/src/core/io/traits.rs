use crate::core::models::builder::MoleculeBuilder;
use crate::core::models::molecule::{Molecule, MoleculeError};
use std::error::Error;

/// Defines the interface for anything that can produce a [`Molecule`].
///
/// Implementors wrap an external structure parser (e.g. a line-notation reader) or an
/// in-memory description of a graph.
pub trait MoleculeSource {
    /// The error type reported when no molecule can be constructed.
    type Error: Error;

    /// Constructs the molecular graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying description cannot be turned into a valid graph.
    fn construct(&self) -> Result<Molecule, Self::Error>;
}

impl MoleculeSource for MoleculeBuilder {
    type Error = MoleculeError;

    fn construct(&self) -> Result<Molecule, Self::Error> {
        self.clone().build()
    }
}

impl MoleculeSource for Molecule {
    type Error = std::convert::Infallible;

    fn construct(&self) -> Result<Molecule, Self::Error> {
        Ok(self.clone())
    }
}
