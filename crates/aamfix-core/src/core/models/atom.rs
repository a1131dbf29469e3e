use crate::core::utils::elements;
use serde::Serialize;
use std::collections::BTreeSet;

/// Mapping number of an atom within one side of a reaction.
///
/// The same physical atom carries the same index on both sides of a
/// correctly mapped reaction; a mapping error shows up as an atom whose
/// index differs between two mappings of the same reaction.
pub type AtomIndex = u32;

/// Anything that exposes the set of atom indices it covers: molecules,
/// reaction sides, condensed graphs and their query projections.
pub trait AtomIndexed {
    fn atom_indices(&self) -> BTreeSet<AtomIndex>;
}

/// Represents an atom of a molecular graph with its intrinsic properties.
///
/// The atom does not store its own index; indices live in the owning
/// [`Molecule`](super::molecule::Molecule) so that remapping never touches
/// atom data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Atom {
    /// Atomic number (1 = H, 6 = C, 7 = N, ...).
    pub atomic_num: u8,
    /// Formal charge in elementary charge units.
    pub charge: i8,
    /// Mass number; `0` means natural isotopic abundance.
    pub isotope: u16,
    /// Number of attached hydrogens that are not graph nodes.
    pub hydrogens: u8,
    /// Whether the atom was written as part of an aromatic system.
    pub is_aromatic: bool,
}

impl Atom {
    /// Creates a neutral, non-aromatic atom of the given element with no
    /// hydrogens attached.
    ///
    /// # Arguments
    ///
    /// * `atomic_num` - The atomic number of the element.
    pub fn new(atomic_num: u8) -> Self {
        Self {
            atomic_num,
            ..Self::default()
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_hydrogens(mut self, hydrogens: u8) -> Self {
        self.hydrogens = hydrogens;
        self
    }

    pub fn with_isotope(mut self, isotope: u16) -> Self {
        self.isotope = isotope;
        self
    }

    pub fn aromatic(mut self) -> Self {
        self.is_aromatic = true;
        self
    }

    /// Returns the element symbol, or `*` for an atomic number outside the
    /// element table.
    pub fn symbol(&self) -> &'static str {
        elements::symbol(self.atomic_num).unwrap_or("*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(6);
        assert_eq!(atom.atomic_num, 6);
        assert_eq!(atom.charge, 0);
        assert_eq!(atom.isotope, 0);
        assert_eq!(atom.hydrogens, 0);
        assert!(!atom.is_aromatic);
    }

    #[test]
    fn builder_methods_set_fields() {
        let atom = Atom::new(8).with_charge(-1).with_hydrogens(1).with_isotope(18);
        assert_eq!(atom.charge, -1);
        assert_eq!(atom.hydrogens, 1);
        assert_eq!(atom.isotope, 18);
        assert!(Atom::new(6).aromatic().is_aromatic);
    }

    #[test]
    fn symbol_resolves_known_and_unknown_elements() {
        assert_eq!(Atom::new(17).symbol(), "Cl");
        assert_eq!(Atom::new(0).symbol(), "*");
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new(7).with_hydrogens(2);
        let atom2 = atom1;
        assert_eq!(atom1, atom2);
        assert_ne!(atom1, Atom::new(7));
    }
}
