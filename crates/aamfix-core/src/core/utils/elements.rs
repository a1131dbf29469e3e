use phf::{Map, Set, phf_map, phf_set};

static ATOMIC_NUMBERS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2, "Li" => 3, "Be" => 4, "B" => 5, "C" => 6, "N" => 7, "O" => 8,
    "F" => 9, "Ne" => 10, "Na" => 11, "Mg" => 12, "Al" => 13, "Si" => 14, "P" => 15,
    "S" => 16, "Cl" => 17, "Ar" => 18, "K" => 19, "Ca" => 20, "Sc" => 21, "Ti" => 22,
    "V" => 23, "Cr" => 24, "Mn" => 25, "Fe" => 26, "Co" => 27, "Ni" => 28, "Cu" => 29,
    "Zn" => 30, "Ga" => 31, "Ge" => 32, "As" => 33, "Se" => 34, "Br" => 35, "Kr" => 36,
    "Rb" => 37, "Sr" => 38, "Y" => 39, "Zr" => 40, "Nb" => 41, "Mo" => 42, "Tc" => 43,
    "Ru" => 44, "Rh" => 45, "Pd" => 46, "Ag" => 47, "Cd" => 48, "In" => 49, "Sn" => 50,
    "Sb" => 51, "Te" => 52, "I" => 53, "Xe" => 54, "Cs" => 55, "Ba" => 56, "La" => 57,
    "Hf" => 72, "Ta" => 73, "W" => 74, "Re" => 75, "Os" => 76, "Ir" => 77, "Pt" => 78,
    "Au" => 79, "Hg" => 80, "Tl" => 81, "Pb" => 82, "Bi" => 83,
};

static SYMBOLS: Map<u8, &'static str> = phf_map! {
    1u8 => "H", 2u8 => "He", 3u8 => "Li", 4u8 => "Be", 5u8 => "B", 6u8 => "C", 7u8 => "N",
    8u8 => "O", 9u8 => "F", 10u8 => "Ne", 11u8 => "Na", 12u8 => "Mg", 13u8 => "Al",
    14u8 => "Si", 15u8 => "P", 16u8 => "S", 17u8 => "Cl", 18u8 => "Ar", 19u8 => "K",
    20u8 => "Ca", 21u8 => "Sc", 22u8 => "Ti", 23u8 => "V", 24u8 => "Cr", 25u8 => "Mn",
    26u8 => "Fe", 27u8 => "Co", 28u8 => "Ni", 29u8 => "Cu", 30u8 => "Zn", 31u8 => "Ga",
    32u8 => "Ge", 33u8 => "As", 34u8 => "Se", 35u8 => "Br", 36u8 => "Kr", 37u8 => "Rb",
    38u8 => "Sr", 39u8 => "Y", 40u8 => "Zr", 41u8 => "Nb", 42u8 => "Mo", 43u8 => "Tc",
    44u8 => "Ru", 45u8 => "Rh", 46u8 => "Pd", 47u8 => "Ag", 48u8 => "Cd", 49u8 => "In",
    50u8 => "Sn", 51u8 => "Sb", 52u8 => "Te", 53u8 => "I", 54u8 => "Xe", 55u8 => "Cs",
    56u8 => "Ba", 57u8 => "La", 72u8 => "Hf", 73u8 => "Ta", 74u8 => "W", 75u8 => "Re",
    76u8 => "Os", 77u8 => "Ir", 78u8 => "Pt", 79u8 => "Au", 80u8 => "Hg", 81u8 => "Tl",
    82u8 => "Pb", 83u8 => "Bi",
};

/// Elements that may be written without brackets in SMILES.
static ORGANIC_SUBSET: Set<&'static str> = phf_set! {
    "B", "C", "N", "O", "P", "S", "F", "Cl", "Br", "I",
};

/// Elements that may carry a lowercase aromatic symbol.
static AROMATIC_CAPABLE: Set<u8> = phf_set! {
    5u8, 6u8, 7u8, 8u8, 15u8, 16u8, 33u8, 34u8,
};

pub fn atomic_number(symbol: &str) -> Option<u8> {
    ATOMIC_NUMBERS.get(symbol).copied()
}

pub fn symbol(atomic_num: u8) -> Option<&'static str> {
    SYMBOLS.get(&atomic_num).copied()
}

pub fn is_organic_subset(symbol: &str) -> bool {
    ORGANIC_SUBSET.contains(symbol)
}

pub fn can_be_aromatic(atomic_num: u8) -> bool {
    AROMATIC_CAPABLE.contains(&atomic_num)
}

/// Default valences, lowest first, used to derive implicit hydrogens.
fn default_valences(atomic_num: u8) -> &'static [u8] {
    match atomic_num {
        5 => &[3],
        6 => &[4],
        7 | 15 => &[3, 5],
        8 => &[2],
        16 => &[2, 4, 6],
        9 | 17 | 35 | 53 => &[1],
        _ => &[],
    }
}

/// Number of implicit hydrogens for an organic-subset atom with the given
/// explicit bond valence, or `0` when the valence exceeds every default.
pub fn implicit_hydrogens(atomic_num: u8, explicit_valence: u8) -> u8 {
    default_valences(atomic_num)
        .iter()
        .find(|&&v| v >= explicit_valence)
        .map(|&v| v - explicit_valence)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_number_resolves_common_symbols() {
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Cl"), Some(17));
        assert_eq!(atomic_number("Pd"), Some(46));
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number("c"), None);
    }

    #[test]
    fn symbol_is_inverse_of_atomic_number() {
        for sym in ["H", "C", "N", "O", "Br", "Sn", "Pt"] {
            let z = atomic_number(sym).unwrap();
            assert_eq!(symbol(z), Some(sym));
        }
        assert_eq!(symbol(0), None);
    }

    #[test]
    fn organic_subset_membership() {
        assert!(is_organic_subset("C"));
        assert!(is_organic_subset("Br"));
        assert!(!is_organic_subset("Na"));
        assert!(!is_organic_subset("H"));
    }

    #[test]
    fn implicit_hydrogens_follow_lowest_fitting_valence() {
        assert_eq!(implicit_hydrogens(6, 0), 4);
        assert_eq!(implicit_hydrogens(6, 1), 3);
        assert_eq!(implicit_hydrogens(8, 2), 0);
        assert_eq!(implicit_hydrogens(7, 4), 1);
        assert_eq!(implicit_hydrogens(16, 3), 1);
        assert_eq!(implicit_hydrogens(9, 2), 0);
        assert_eq!(implicit_hydrogens(26, 0), 0);
    }

    #[test]
    fn aromatic_capability() {
        assert!(can_be_aromatic(6));
        assert!(can_be_aromatic(7));
        assert!(!can_be_aromatic(17));
    }
}
