use super::PatternError;
use crate::core::models::element::Element;
use crate::core::models::topology::BondOrder;
use serde::Deserialize;

/// Constraint on the order of a matched bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BondMatch {
    Any,
    Single,
    Double,
    Triple,
    Aromatic,
    /// The implicit bond of SMARTS: single or aromatic.
    #[default]
    SingleOrAromatic,
}

impl BondMatch {
    pub fn accepts(self, order: BondOrder) -> bool {
        match self {
            Self::Any => true,
            Self::Single => order == BondOrder::Single,
            Self::Double => order == BondOrder::Double,
            Self::Triple => order == BondOrder::Triple,
            Self::Aromatic => order == BondOrder::Aromatic,
            Self::SingleOrAromatic => matches!(order, BondOrder::Single | BondOrder::Aromatic),
        }
    }
}

/// A conjunction of atom predicates; unset fields match anything.
///
/// `require` and `forbid` hold environment patterns anchored at their atom 0, which is
/// mapped onto the atom under test. An atom passes only if every `require` environment
/// is found around it and no `forbid` environment is.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct QueryAtom {
    pub element: Option<Element>,
    pub any_of: Vec<Element>,
    pub not_elements: Vec<Element>,
    pub aromatic: Option<bool>,
    /// Total attached hydrogens (SMARTS `H`).
    pub hydrogens: Option<u8>,
    /// Heavy neighbours plus hydrogens (SMARTS `X`).
    pub connectivity: Option<u8>,
    /// Heavy neighbours only (SMARTS `D`).
    pub degree: Option<u8>,
    pub in_ring: Option<bool>,
    pub charge: Option<i8>,
    pub require: Vec<QueryPattern>,
    pub forbid: Vec<QueryPattern>,
}

impl QueryAtom {
    /// An atom matching anything.
    pub fn any() -> Self {
        Self::default()
    }

    /// An aliphatic atom of the given element.
    pub fn aliphatic(element: Element) -> Self {
        Self {
            element: Some(element),
            aromatic: Some(false),
            ..Self::default()
        }
    }

    /// An atom of the given element regardless of aromaticity.
    pub fn element(element: Element) -> Self {
        Self {
            element: Some(element),
            ..Self::default()
        }
    }

    pub fn with_hydrogens(mut self, count: u8) -> Self {
        self.hydrogens = Some(count);
        self
    }

    pub fn with_connectivity(mut self, count: u8) -> Self {
        self.connectivity = Some(count);
        self
    }

    pub fn with_degree(mut self, count: u8) -> Self {
        self.degree = Some(count);
        self
    }

    pub fn with_ring(mut self, in_ring: bool) -> Self {
        self.in_ring = Some(in_ring);
        self
    }

    pub fn with_aromatic(mut self, aromatic: bool) -> Self {
        self.aromatic = Some(aromatic);
        self
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = Some(charge);
        self
    }

    pub fn excluding(mut self, element: Element) -> Self {
        self.not_elements.push(element);
        self
    }

    pub fn requiring(mut self, environment: QueryPattern) -> Self {
        self.require.push(environment);
        self
    }

    pub fn forbidding(mut self, environment: QueryPattern) -> Self {
        self.forbid.push(environment);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct QueryBond {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub order: BondMatch,
    #[serde(default)]
    pub in_ring: Option<bool>,
}

/// A structural query: a small graph of atom and bond predicates.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryPattern {
    pub atoms: Vec<QueryAtom>,
    pub bonds: Vec<QueryBond>,
}

impl QueryPattern {
    pub fn new(atoms: Vec<QueryAtom>) -> Self {
        Self {
            atoms,
            bonds: Vec::new(),
        }
    }

    pub fn single(atom: QueryAtom) -> Self {
        Self::new(vec![atom])
    }

    pub fn bond(mut self, from: usize, to: usize, order: BondMatch) -> Self {
        self.bonds.push(QueryBond {
            from,
            to,
            order,
            in_ring: None,
        });
        self
    }

    /// Checks the pattern and every nested environment for structural consistency.
    pub fn validate(&self) -> Result<(), PatternError> {
        if self.atoms.is_empty() {
            return Err(PatternError::Empty);
        }
        let atom_count = self.atoms.len();
        for (i, bond) in self.bonds.iter().enumerate() {
            for atom in [bond.from, bond.to] {
                if atom >= atom_count {
                    return Err(PatternError::BondOutOfRange {
                        bond: i,
                        atom,
                        atom_count,
                    });
                }
            }
            if bond.from == bond.to {
                return Err(PatternError::SelfBond { bond: i });
            }
        }
        for (i, atom) in self.atoms.iter().enumerate() {
            for environment in atom.require.iter().chain(&atom.forbid) {
                environment
                    .validate()
                    .map_err(|e| PatternError::Environment {
                        atom: i,
                        source: Box::new(e),
                    })?;
            }
        }
        Ok(())
    }
}
