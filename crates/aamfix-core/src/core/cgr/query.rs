use crate::core::models::atom::{Atom, AtomIndex, AtomIndexed};
use crate::core::models::topology::BondOrder;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Per-side constraints of a query atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryAtomState {
    pub charge: i8,
    pub is_aromatic: bool,
    /// Number of bonded neighbors on this side in the graph the query was cut from.
    pub neighbors: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryAtom {
    pub index: AtomIndex,
    pub atomic_num: u8,
    pub isotope: u16,
    pub reactant: Option<QueryAtomState>,
    pub product: Option<QueryAtomState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QueryBond {
    pub atom1: AtomIndex,
    pub atom2: AtomIndex,
    pub reactant: Option<BondOrder>,
    pub product: Option<BondOrder>,
}

/// A condensed-graph pattern: atoms and bonds carry the constraints a
/// matching reaction center must satisfy rather than a concrete structure.
///
/// Atoms are sorted by index and bonds by their low-high end indices, so two
/// queries cut from the same graph with the same atom set compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CgrQuery {
    atoms: Vec<QueryAtom>,
    bonds: Vec<QueryBond>,
}

impl CgrQuery {
    pub(crate) fn new(mut atoms: Vec<QueryAtom>, mut bonds: Vec<QueryBond>) -> Self {
        atoms.sort_by_key(|atom| atom.index);
        bonds.sort_by_key(|bond| (bond.atom1, bond.atom2));
        Self { atoms, bonds }
    }

    pub fn atoms(&self) -> &[QueryAtom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[QueryBond] {
        &self.bonds
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&QueryAtom> {
        self.atoms
            .binary_search_by_key(&index, |atom| atom.index)
            .ok()
            .map(|pos| &self.atoms[pos])
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl AtomIndexed for CgrQuery {
    fn atom_indices(&self) -> BTreeSet<AtomIndex> {
        self.atoms.iter().map(|atom| atom.index).collect()
    }
}

fn fmt_state(state: Option<QueryAtomState>) -> String {
    match state {
        Some(s) => format!("{:+}/{}", s.charge, s.neighbors),
        None => ".".to_string(),
    }
}

fn fmt_order(order: Option<BondOrder>) -> char {
    order.map_or('.', BondOrder::symbol)
}

/// Compact text form: `C1[+0/1>+0/2] O2[...] | 1-2[->.]`, where each atom
/// shows `charge/neighbors` before and after the reaction and each bond its
/// order before and after; `.` marks a side on which the atom or bond is
/// absent.
impl fmt::Display for CgrQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atoms: Vec<String> = self
            .atoms
            .iter()
            .map(|atom| {
                let mut symbol = Atom::new(atom.atomic_num).symbol().to_string();
                let aromatic = atom.reactant.or(atom.product).is_some_and(|s| s.is_aromatic);
                if aromatic {
                    symbol = symbol.to_lowercase();
                }
                format!(
                    "{}{}[{}>{}]",
                    symbol,
                    atom.index,
                    fmt_state(atom.reactant),
                    fmt_state(atom.product)
                )
            })
            .collect();
        let bonds: Vec<String> = self
            .bonds
            .iter()
            .map(|bond| {
                format!(
                    "{}-{}[{}>{}]",
                    bond.atom1,
                    bond.atom2,
                    fmt_order(bond.reactant),
                    fmt_order(bond.product)
                )
            })
            .collect();
        write!(f, "{} | {}", atoms.join(" "), bonds.join(" "))
    }
}
