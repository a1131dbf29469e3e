use super::atom::AtomIndex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[repr(u8)]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Contribution of the bond to the explicit valence of either end atom.
    /// Aromatic bonds count as single; the aromatic atom adds the extra unit.
    pub fn valence(self) -> u8 {
        match self {
            Self::Single | Self::Aromatic => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }

    /// SMILES bond symbol.
    pub fn symbol(self) -> char {
        match self {
            Self::Single => '-',
            Self::Double => '=',
            Self::Triple => '#',
            Self::Aromatic => ':',
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid bond order string")]
pub struct ParseBondOrderError;

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1" | "s" | "single" | "-" => Ok(Self::Single),
            "2" | "d" | "double" | "=" => Ok(Self::Double),
            "3" | "t" | "triple" | "#" => Ok(Self::Triple),
            "ar" | "aromatic" | ":" => Ok(Self::Aromatic),
            _ => Err(ParseBondOrderError),
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Single => "Single",
                Self::Double => "Double",
                Self::Triple => "Triple",
                Self::Aromatic => "Aromatic",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    pub atom1: AtomIndex,
    pub atom2: AtomIndex,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(atom1: AtomIndex, atom2: AtomIndex, order: BondOrder) -> Self {
        Self {
            atom1,
            atom2,
            order,
        }
    }

    pub fn contains(&self, index: AtomIndex) -> bool {
        self.atom1 == index || self.atom2 == index
    }

    /// Returns the partner of `index` in this bond, if `index` is an end.
    pub fn other(&self, index: AtomIndex) -> Option<AtomIndex> {
        if self.atom1 == index {
            Some(self.atom2)
        } else if self.atom2 == index {
            Some(self.atom1)
        } else {
            None
        }
    }

    /// End indices ordered low to high; used as an orientation-free key.
    pub fn key(&self) -> (AtomIndex, AtomIndex) {
        bond_key(self.atom1, self.atom2)
    }
}

pub fn bond_key(a: AtomIndex, b: AtomIndex) -> (AtomIndex, AtomIndex) {
    if a <= b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_order_from_str_parses_valid_strings() {
        assert_eq!("1".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("single".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("-".parse::<BondOrder>().unwrap(), BondOrder::Single);
        assert_eq!("D".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("=".parse::<BondOrder>().unwrap(), BondOrder::Double);
        assert_eq!("triple".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!("#".parse::<BondOrder>().unwrap(), BondOrder::Triple);
        assert_eq!(
            "aromatic".parse::<BondOrder>().unwrap(),
            BondOrder::Aromatic
        );
    }

    #[test]
    fn bond_order_from_str_rejects_invalid_strings() {
        assert!("".parse::<BondOrder>().is_err());
        assert!("quadruple".parse::<BondOrder>().is_err());
        assert!("0".parse::<BondOrder>().is_err());
    }

    #[test]
    fn bond_order_display_and_symbol() {
        assert_eq!(BondOrder::Double.to_string(), "Double");
        assert_eq!(BondOrder::Aromatic.to_string(), "Aromatic");
        assert_eq!(BondOrder::Triple.symbol(), '#');
        assert_eq!(BondOrder::default(), BondOrder::Single);
    }

    #[test]
    fn bond_order_valence_counts_aromatic_as_single() {
        assert_eq!(BondOrder::Single.valence(), 1);
        assert_eq!(BondOrder::Aromatic.valence(), 1);
        assert_eq!(BondOrder::Double.valence(), 2);
        assert_eq!(BondOrder::Triple.valence(), 3);
    }

    #[test]
    fn bond_contains_and_other() {
        let bond = Bond::new(4, 2, BondOrder::Single);
        assert!(bond.contains(4));
        assert!(bond.contains(2));
        assert!(!bond.contains(3));
        assert_eq!(bond.other(4), Some(2));
        assert_eq!(bond.other(2), Some(4));
        assert_eq!(bond.other(9), None);
    }

    #[test]
    fn bond_key_is_orientation_free() {
        assert_eq!(Bond::new(4, 2, BondOrder::Single).key(), (2, 4));
        assert_eq!(Bond::new(2, 4, BondOrder::Double).key(), (2, 4));
    }
}
