//! Fedors critical volume estimation.
//!
//! Critical volume is a sum of atomic contributions with corrections for hydroxyl oxygens,
//! amine nitrogens, multiple bonds and rings (R. F. Fedors, AIChE J. 25, 202, 1979).

use super::functional_groups::FunctionalGroup;
use crate::core::models::element::Element;
use crate::core::models::molecule::Molecule;
use crate::core::models::rings::RingInfo;
use crate::core::models::topology::BondOrder;
use crate::core::pattern::PatternError;
use crate::core::pattern::oracle::PatternOracle;
use tracing::debug;

const BASE_VOLUME: f64 = 26.6;
const ALCOHOL_OXYGEN: f64 = 18.0;
const AMINE_NITROGEN: f64 = 47.422;
const DOUBLE_BOND: f64 = 5.028;
const TRIPLE_BOND: f64 = 0.7973;
const LINKED_RING: f64 = 35.524;

/// Contribution per atom, in cm^3/mol.
fn atom_contribution(element: Element) -> Option<f64> {
    match element {
        Element::C => Some(34.426),
        Element::H => Some(9.172),
        Element::O => Some(20.291),
        Element::N => Some(48.855),
        Element::F => Some(22.242),
        Element::Cl => Some(52.801),
        Element::Br => Some(71.774),
        Element::I => Some(96.402),
        Element::S => Some(50.866),
        _ => None,
    }
}

/// Contribution per ring of the given size, in cm^3/mol.
fn ring_contribution(size: usize) -> Option<f64> {
    match size {
        3 => Some(-15.824),
        4 => Some(-17.247),
        5 => Some(-39.126),
        6 => Some(-39.508),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FedorsEstimate {
    /// Critical volume in m^3/mol.
    pub critical_volume: f64,
    /// Some element has no tabulated contribution and was left out of the sum.
    pub unknown_atoms: bool,
    /// Some ring is not 3 to 6 membered and was left out of the sum.
    pub unrecognized_ring_size: bool,
}

impl FedorsEstimate {
    pub fn is_reliable(&self) -> bool {
        !self.unknown_atoms && !self.unrecognized_ring_size
    }
}

/// Estimates the critical volume of `molecule`.
///
/// # Errors
///
/// Returns [`PatternError`] if `oracle` cannot compile the hydroxyl or amine queries.
pub fn fedors<O: PatternOracle>(
    molecule: &Molecule,
    oracle: &O,
) -> Result<FedorsEstimate, PatternError> {
    let alcohols = FunctionalGroup::Alcohol.count(oracle, molecule)?;
    let amines = FunctionalGroup::Amine.count(oracle, molecule)?;

    let mut volume = BASE_VOLUME
        + alcohols as f64 * ALCOHOL_OXYGEN
        + amines as f64 * AMINE_NITROGEN;

    let mut unknown_atoms = false;
    for (element, count) in molecule.element_counts() {
        let count = match element {
            Element::O => count.saturating_sub(alcohols),
            Element::N => count.saturating_sub(amines),
            _ => count,
        };
        match atom_contribution(element) {
            Some(contribution) => volume += count as f64 * contribution,
            None => unknown_atoms = true,
        }
    }

    let rings = RingInfo::sssr(molecule);
    let mut unrecognized_ring_size = false;
    for ring in rings.rings() {
        match ring_contribution(ring.len()) {
            Some(contribution) => volume += contribution,
            None => unrecognized_ring_size = true,
        }
    }
    volume += rings.linked_ring_count(molecule) as f64 * LINKED_RING;

    for bond in molecule.bonds() {
        match bond.order {
            BondOrder::Double => volume += DOUBLE_BOND,
            BondOrder::Triple => volume += TRIPLE_BOND,
            BondOrder::Single | BondOrder::Aromatic => {}
        }
    }

    let estimate = FedorsEstimate {
        critical_volume: volume * 1e-6,
        unknown_atoms,
        unrecognized_ring_size,
    };
    if !estimate.is_reliable() {
        debug!(
            unknown_atoms,
            unrecognized_ring_size,
            "Fedors estimate left parts of the molecule out."
        );
    }
    Ok(estimate)
}
