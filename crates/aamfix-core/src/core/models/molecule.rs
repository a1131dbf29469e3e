use super::atom::{Atom, AtomIndex, AtomIndexed};
use super::error::ModelError;
use super::topology::{Bond, BondOrder, bond_key};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A molecular graph whose atoms are keyed by their mapping index.
///
/// Atoms keep their insertion order. That order is what positional pairing
/// of two mappings of the same molecule walks over, so it is preserved by
/// every transformation, including [`Molecule::remap`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    /// Atoms in insertion order.
    atoms: Vec<(AtomIndex, Atom)>,
    /// Position of each atom index inside `atoms`.
    positions: HashMap<AtomIndex, usize>,
    /// List of all bonds in insertion order.
    bonds: Vec<Bond>,
    /// Cached adjacency list holding, per atom, the neighbor and the bond slot.
    adjacency: HashMap<AtomIndex, Vec<(AtomIndex, usize)>>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an atom under the given index.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidAtomIndex`] for index `0` and
    /// [`ModelError::DuplicateAtomIndex`] if the index is already taken.
    pub fn add_atom(&mut self, index: AtomIndex, atom: Atom) -> Result<(), ModelError> {
        if index == 0 {
            return Err(ModelError::InvalidAtomIndex(index));
        }
        if self.positions.contains_key(&index) {
            return Err(ModelError::DuplicateAtomIndex {
                index,
                scope: "a molecule",
            });
        }
        self.positions.insert(index, self.atoms.len());
        self.atoms.push((index, atom));
        self.adjacency.insert(index, Vec::new());
        Ok(())
    }

    /// Connects two existing atoms.
    ///
    /// # Errors
    ///
    /// Fails if either atom is unknown, if both ends are the same atom, or if
    /// the atoms are already bonded.
    pub fn add_bond(
        &mut self,
        atom1: AtomIndex,
        atom2: AtomIndex,
        order: BondOrder,
    ) -> Result<(), ModelError> {
        for index in [atom1, atom2] {
            if !self.positions.contains_key(&index) {
                return Err(ModelError::UnknownAtom(index));
            }
        }
        if atom1 == atom2 {
            return Err(ModelError::SelfBond(atom1));
        }
        if self.bond_between(atom1, atom2).is_some() {
            let (atom1, atom2) = bond_key(atom1, atom2);
            return Err(ModelError::DuplicateBond { atom1, atom2 });
        }

        let slot = self.bonds.len();
        self.bonds.push(Bond::new(atom1, atom2, order));
        if let Some(list) = self.adjacency.get_mut(&atom1) {
            list.push((atom2, slot));
        }
        if let Some(list) = self.adjacency.get_mut(&atom2) {
            list.push((atom1, slot));
        }
        Ok(())
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.positions.get(&index).map(|&pos| &self.atoms[pos].1)
    }

    /// Returns an iterator over `(index, atom)` pairs in insertion order.
    pub fn atoms(&self) -> impl Iterator<Item = (AtomIndex, &Atom)> {
        self.atoms.iter().map(|(index, atom)| (*index, atom))
    }

    /// Atom indices in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = AtomIndex> + '_ {
        self.atoms.iter().map(|(index, _)| *index)
    }

    pub fn contains(&self, index: AtomIndex) -> bool {
        self.positions.contains_key(&index)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bond_between(&self, atom1: AtomIndex, atom2: AtomIndex) -> Option<BondOrder> {
        self.adjacency
            .get(&atom1)?
            .iter()
            .find(|(neighbor, _)| *neighbor == atom2)
            .map(|&(_, slot)| self.bonds[slot].order)
    }

    /// Neighbors of `index` paired with the connecting bond order, in bond
    /// insertion order. Unknown atoms have no neighbors.
    pub fn neighbors(&self, index: AtomIndex) -> impl Iterator<Item = (AtomIndex, BondOrder)> + '_ {
        self.adjacency
            .get(&index)
            .into_iter()
            .flatten()
            .map(|&(neighbor, slot)| (neighbor, self.bonds[slot].order))
    }

    pub fn degree(&self, index: AtomIndex) -> usize {
        self.adjacency.get(&index).map_or(0, Vec::len)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Builds a copy of this molecule with atom indices rewritten through
    /// `mapping`. Indices absent from `mapping` are kept. Atom order, atom
    /// data and bond orders are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateAtomIndex`] when two atoms would end up
    /// with the same index, or [`ModelError::InvalidAtomIndex`] when an atom
    /// would be mapped to `0`.
    pub fn remap(&self, mapping: &BTreeMap<AtomIndex, AtomIndex>) -> Result<Molecule, ModelError> {
        let translate = |index: AtomIndex| mapping.get(&index).copied().unwrap_or(index);
        let mut remapped = Molecule::new();
        for (index, atom) in &self.atoms {
            remapped.add_atom(translate(*index), *atom)?;
        }
        for bond in &self.bonds {
            remapped.add_bond(translate(bond.atom1), translate(bond.atom2), bond.order)?;
        }
        Ok(remapped)
    }
}

impl AtomIndexed for Molecule {
    fn atom_indices(&self) -> BTreeSet<AtomIndex> {
        self.indices().collect()
    }
}

impl AtomIndexed for [Molecule] {
    fn atom_indices(&self) -> BTreeSet<AtomIndex> {
        self.iter().flat_map(Molecule::indices).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethanol() -> Molecule {
        let mut mol = Molecule::new();
        mol.add_atom(1, Atom::new(6).with_hydrogens(3)).unwrap();
        mol.add_atom(2, Atom::new(6).with_hydrogens(2)).unwrap();
        mol.add_atom(3, Atom::new(8).with_hydrogens(1)).unwrap();
        mol.add_bond(1, 2, BondOrder::Single).unwrap();
        mol.add_bond(2, 3, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn construction_and_adjacency() {
        let mol = ethanol();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.degree(2), 2);
        assert_eq!(mol.degree(1), 1);
        assert_eq!(mol.degree(42), 0);
        let neighbors: Vec<_> = mol.neighbors(2).collect();
        assert_eq!(neighbors, vec![(1, BondOrder::Single), (3, BondOrder::Single)]);
        assert_eq!(mol.bond_between(3, 2), Some(BondOrder::Single));
        assert_eq!(mol.bond_between(1, 3), None);
    }

    #[test]
    fn atoms_iterate_in_insertion_order() {
        let mut mol = Molecule::new();
        mol.add_atom(7, Atom::new(6)).unwrap();
        mol.add_atom(2, Atom::new(8)).unwrap();
        mol.add_atom(5, Atom::new(7)).unwrap();
        let order: Vec<_> = mol.indices().collect();
        assert_eq!(order, vec![7, 2, 5]);
        assert_eq!(mol.atom_indices(), BTreeSet::from([2, 5, 7]));
    }

    #[test]
    fn add_atom_rejects_zero_and_duplicate_indices() {
        let mut mol = Molecule::new();
        assert_eq!(
            mol.add_atom(0, Atom::new(6)),
            Err(ModelError::InvalidAtomIndex(0))
        );
        mol.add_atom(1, Atom::new(6)).unwrap();
        assert!(matches!(
            mol.add_atom(1, Atom::new(8)),
            Err(ModelError::DuplicateAtomIndex { index: 1, .. })
        ));
    }

    #[test]
    fn add_bond_rejects_invalid_bonds() {
        let mut mol = ethanol();
        assert_eq!(
            mol.add_bond(1, 9, BondOrder::Single),
            Err(ModelError::UnknownAtom(9))
        );
        assert_eq!(
            mol.add_bond(2, 2, BondOrder::Single),
            Err(ModelError::SelfBond(2))
        );
        assert_eq!(
            mol.add_bond(3, 2, BondOrder::Double),
            Err(ModelError::DuplicateBond { atom1: 2, atom2: 3 })
        );
    }

    #[test]
    fn remap_rewrites_indices_and_keeps_order() {
        let mol = ethanol();
        let mapping = BTreeMap::from([(2, 3), (3, 2)]);
        let remapped = mol.remap(&mapping).unwrap();

        let order: Vec<_> = remapped.indices().collect();
        assert_eq!(order, vec![1, 3, 2]);
        assert_eq!(remapped.atom(3).unwrap().atomic_num, 6);
        assert_eq!(remapped.atom(2).unwrap().atomic_num, 8);
        assert_eq!(remapped.bond_between(1, 3), Some(BondOrder::Single));
        assert_eq!(remapped.bond_between(3, 2), Some(BondOrder::Single));
        assert_eq!(remapped.bond_between(1, 2), None);

        // The source molecule is untouched.
        assert_eq!(mol, ethanol());
    }

    #[test]
    fn remap_detects_index_collisions() {
        let mol = ethanol();
        let mapping = BTreeMap::from([(1, 2)]);
        assert!(matches!(
            mol.remap(&mapping),
            Err(ModelError::DuplicateAtomIndex { index: 2, .. })
        ));
    }

    #[test]
    fn side_atom_indices_union_molecules() {
        let mut water = Molecule::new();
        water.add_atom(9, Atom::new(8).with_hydrogens(2)).unwrap();
        let side = vec![ethanol(), water];
        assert_eq!(side.atom_indices(), BTreeSet::from([1, 2, 3, 9]));
    }
}
