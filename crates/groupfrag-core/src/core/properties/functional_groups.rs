use crate::core::models::element::Element;
use crate::core::models::molecule::{AtomIndex, Molecule};
use crate::core::pattern::PatternError;
use crate::core::pattern::oracle::PatternOracle;
use crate::core::pattern::query::{BondMatch, QueryAtom, QueryPattern};
use std::collections::BTreeSet;

/// Functional groups counted by the atom-increment methods as corrections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionalGroup {
    /// Hydroxyl on carbon, `C-OH`.
    Alcohol,
    /// Divalent oxygen between two carbons.
    Ether,
    /// Neutral trivalent nitrogen that is not part of an amide.
    Amine,
    Aldehyde,
    Ketone,
    CarboxylicAcid,
    Ester,
    Nitrile,
    Nitro,
    /// `Si-O-Si`.
    Siloxane,
    /// Halogen on carbon.
    Haloalkane,
}

impl FunctionalGroup {
    /// The alternative queries for this group; a match of any one counts.
    pub fn patterns(self) -> Vec<QueryPattern> {
        use BondMatch::{Any, Double, SingleOrAromatic, Triple};
        let carbon = || QueryAtom::element(Element::C);

        match self {
            Self::Alcohol => vec![
                QueryPattern::new(vec![
                    carbon(),
                    QueryAtom::element(Element::O)
                        .with_connectivity(2)
                        .with_hydrogens(1),
                ])
                .bond(0, 1, SingleOrAromatic),
            ],
            Self::Ether => vec![
                QueryPattern::new(vec![
                    QueryAtom::element(Element::O).with_degree(2),
                    carbon(),
                    carbon(),
                ])
                .bond(0, 1, SingleOrAromatic)
                .bond(0, 2, SingleOrAromatic),
            ],
            Self::Amine => {
                let hetero_neighbor = QueryPattern::new(vec![
                    QueryAtom::any(),
                    QueryAtom::any().excluding(Element::C),
                ])
                .bond(0, 1, Any);
                let amide = QueryPattern::new(vec![
                    QueryAtom::any(),
                    carbon(),
                    QueryAtom::element(Element::O),
                ])
                .bond(0, 1, Any)
                .bond(1, 2, Double);
                vec![QueryPattern::single(
                    QueryAtom::aliphatic(Element::N)
                        .with_connectivity(3)
                        .with_charge(0)
                        .forbidding(hetero_neighbor)
                        .forbidding(amide),
                )]
            }
            Self::Aldehyde => vec![
                QueryPattern::new(vec![
                    carbon().with_connectivity(3).with_hydrogens(1),
                    QueryAtom::element(Element::O),
                    carbon(),
                ])
                .bond(0, 1, Double)
                .bond(0, 2, SingleOrAromatic),
            ],
            Self::Ketone => vec![
                QueryPattern::new(vec![
                    carbon().with_connectivity(3),
                    QueryAtom::element(Element::O),
                    carbon(),
                    carbon(),
                ])
                .bond(0, 1, Double)
                .bond(0, 2, SingleOrAromatic)
                .bond(0, 3, SingleOrAromatic),
            ],
            Self::CarboxylicAcid => vec![
                QueryPattern::new(vec![
                    carbon().with_connectivity(3),
                    QueryAtom::element(Element::O),
                    QueryAtom::element(Element::O)
                        .with_connectivity(2)
                        .with_hydrogens(1),
                ])
                .bond(0, 1, Double)
                .bond(0, 2, SingleOrAromatic),
            ],
            Self::Ester => vec![
                QueryPattern::new(vec![
                    carbon().with_connectivity(3),
                    QueryAtom::element(Element::O),
                    QueryAtom::element(Element::O)
                        .with_connectivity(2)
                        .with_hydrogens(0),
                    carbon(),
                    carbon(),
                ])
                .bond(0, 1, Double)
                .bond(0, 2, SingleOrAromatic)
                .bond(2, 3, SingleOrAromatic)
                .bond(0, 4, SingleOrAromatic),
            ],
            Self::Nitrile => vec![
                QueryPattern::new(vec![
                    QueryAtom::element(Element::N).with_connectivity(1),
                    carbon().with_connectivity(2),
                ])
                .bond(0, 1, Triple),
            ],
            Self::Nitro => {
                let substituent = || QueryAtom::any().excluding(Element::O);
                vec![
                    QueryPattern::new(vec![
                        QueryAtom::element(Element::N)
                            .with_connectivity(3)
                            .with_charge(1),
                        QueryAtom::element(Element::O),
                        QueryAtom::element(Element::O).with_charge(-1),
                        substituent(),
                    ])
                    .bond(0, 1, Double)
                    .bond(0, 2, SingleOrAromatic)
                    .bond(0, 3, Any),
                    QueryPattern::new(vec![
                        QueryAtom::element(Element::N).with_connectivity(3),
                        QueryAtom::element(Element::O),
                        QueryAtom::element(Element::O),
                        substituent(),
                    ])
                    .bond(0, 1, Double)
                    .bond(0, 2, Double)
                    .bond(0, 3, Any),
                ]
            }
            Self::Siloxane => vec![
                QueryPattern::new(vec![
                    QueryAtom::element(Element::O),
                    QueryAtom::element(Element::Si),
                    QueryAtom::element(Element::Si),
                ])
                .bond(0, 1, SingleOrAromatic)
                .bond(0, 2, SingleOrAromatic),
            ],
            Self::Haloalkane => vec![
                QueryPattern::new(vec![
                    carbon(),
                    QueryAtom {
                        any_of: vec![Element::F, Element::Cl, Element::Br, Element::I],
                        ..QueryAtom::any()
                    },
                ])
                .bond(0, 1, SingleOrAromatic),
            ],
        }
    }

    /// Number of distinct atom sets of `molecule` matched by any of the group's patterns.
    pub fn count<O: PatternOracle>(
        self,
        oracle: &O,
        molecule: &Molecule,
    ) -> Result<usize, PatternError> {
        let mut seen: BTreeSet<Vec<AtomIndex>> = BTreeSet::new();
        for pattern in self.patterns() {
            let compiled = oracle.compile(&pattern)?;
            for mut tuple in oracle.find_matches(&compiled, molecule) {
                tuple.sort_unstable();
                seen.insert(tuple);
            }
        }
        Ok(seen.len())
    }
}
