use super::molecule::AtomIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub a: AtomIndex,
    pub b: AtomIndex,
    pub order: BondOrder,
    /// Whether the bond lies on at least one cycle of the molecular graph.
    pub in_ring: bool,
}

impl Bond {
    pub fn new(a: AtomIndex, b: AtomIndex, order: BondOrder) -> Self {
        Self {
            a,
            b,
            order,
            in_ring: false,
        }
    }

    pub fn contains(&self, atom: AtomIndex) -> bool {
        self.a == atom || self.b == atom
    }

    /// Returns the endpoint opposite to `atom`, if `atom` is an endpoint at all.
    pub fn partner(&self, atom: AtomIndex) -> Option<AtomIndex> {
        if self.a == atom {
            Some(self.b)
        } else if self.b == atom {
            Some(self.a)
        } else {
            None
        }
    }
}
