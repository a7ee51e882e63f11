use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical elements recognized in organic structures.
///
/// Variant names are the IUPAC symbols, which is also their serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    H,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Fe,
    Cu,
    Zn,
    Ge,
    As,
    Se,
    Br,
    Sn,
    I,
}

static SYMBOL_TO_ELEMENT: Map<&'static str, Element> = phf_map! {
    "H" => Element::H, "B" => Element::B, "C" => Element::C, "N" => Element::N,
    "O" => Element::O, "F" => Element::F, "Na" => Element::Na, "Mg" => Element::Mg,
    "Al" => Element::Al, "Si" => Element::Si, "P" => Element::P, "S" => Element::S,
    "Cl" => Element::Cl, "K" => Element::K, "Ca" => Element::Ca, "Fe" => Element::Fe,
    "Cu" => Element::Cu, "Zn" => Element::Zn, "Ge" => Element::Ge, "As" => Element::As,
    "Se" => Element::Se, "Br" => Element::Br, "Sn" => Element::Sn, "I" => Element::I,
};

/// Monoisotopic mass of the hydrogen-1 isotope, in daltons.
pub const HYDROGEN_MASS: f64 = 1.007_825_032_23;

impl Element {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::H => "H",
            Self::B => "B",
            Self::C => "C",
            Self::N => "N",
            Self::O => "O",
            Self::F => "F",
            Self::Na => "Na",
            Self::Mg => "Mg",
            Self::Al => "Al",
            Self::Si => "Si",
            Self::P => "P",
            Self::S => "S",
            Self::Cl => "Cl",
            Self::K => "K",
            Self::Ca => "Ca",
            Self::Fe => "Fe",
            Self::Cu => "Cu",
            Self::Zn => "Zn",
            Self::Ge => "Ge",
            Self::As => "As",
            Self::Se => "Se",
            Self::Br => "Br",
            Self::Sn => "Sn",
            Self::I => "I",
        }
    }

    pub fn atomic_number(self) -> u8 {
        match self {
            Self::H => 1,
            Self::B => 5,
            Self::C => 6,
            Self::N => 7,
            Self::O => 8,
            Self::F => 9,
            Self::Na => 11,
            Self::Mg => 12,
            Self::Al => 13,
            Self::Si => 14,
            Self::P => 15,
            Self::S => 16,
            Self::Cl => 17,
            Self::K => 19,
            Self::Ca => 20,
            Self::Fe => 26,
            Self::Cu => 29,
            Self::Zn => 30,
            Self::Ge => 32,
            Self::As => 33,
            Self::Se => 34,
            Self::Br => 35,
            Self::Sn => 50,
            Self::I => 53,
        }
    }

    /// Mass of the most abundant isotope, in daltons.
    pub fn monoisotopic_mass(self) -> f64 {
        match self {
            Self::H => HYDROGEN_MASS,
            Self::B => 11.009_305_36,
            Self::C => 12.0,
            Self::N => 14.003_074_004_43,
            Self::O => 15.994_914_619_57,
            Self::F => 18.998_403_162_73,
            Self::Na => 22.989_769_282,
            Self::Mg => 23.985_041_697,
            Self::Al => 26.981_538_53,
            Self::Si => 27.976_926_534_65,
            Self::P => 30.973_761_998_42,
            Self::S => 31.972_071_174_4,
            Self::Cl => 34.968_852_682,
            Self::K => 38.963_706_486_4,
            Self::Ca => 39.962_590_863,
            Self::Fe => 55.934_936_33,
            Self::Cu => 62.929_597_72,
            Self::Zn => 63.929_142_01,
            Self::Ge => 73.921_177_761,
            Self::As => 74.921_594_57,
            Self::Se => 79.916_521_8,
            Self::Br => 78.918_337_6,
            Self::Sn => 119.902_201_63,
            Self::I => 126.904_471_9,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown element symbol: '{0}'")]
pub struct ParseElementError(pub String);

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(element) = SYMBOL_TO_ELEMENT.get(trimmed) {
            return Ok(*element);
        }
        // Aromatic SMILES spellings such as "c" or "se".
        let mut chars = trimmed.chars();
        let normalized: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        SYMBOL_TO_ELEMENT
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
