//! # Condensed Graph of Reaction
//!
//! A condensed graph overlays the reactant and product graphs of one mapped
//! reaction on a single set of atom indices. Every atom keeps its state on
//! each side and every bond keeps its order on each side; either side may be
//! absent. Atoms whose bonding or charge differs between the sides form the
//! reaction center.
//!
//! ## Key Components
//!
//! - [`CondensedGraph`] - The overlay graph with center detection, breadth-limited
//!   neighborhood expansion and substructure extraction
//! - [`query`] - Pattern projections of a condensed graph onto an atom subset

pub mod query;

use crate::core::models::atom::{Atom, AtomIndex, AtomIndexed};
use crate::core::models::error::ModelError;
use crate::core::models::molecule::Molecule;
use crate::core::models::reaction::Reaction;
use crate::core::models::topology::{BondOrder, bond_key};
use query::{CgrQuery, QueryAtom, QueryAtomState, QueryBond};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// State of an atom on one side of the reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AtomState {
    pub charge: i8,
    pub hydrogens: u8,
    pub is_aromatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CgrAtom {
    pub atomic_num: u8,
    pub isotope: u16,
    /// State in the reactants; `None` if the atom only appears in the products.
    pub reactant: Option<AtomState>,
    /// State in the products; `None` if the atom only appears in the reactants.
    pub product: Option<AtomState>,
}

impl CgrAtom {
    /// An atom is dynamic when it exists on one side only or changes charge.
    pub fn is_dynamic(&self) -> bool {
        match (self.reactant, self.product) {
            (Some(r), Some(p)) => r.charge != p.charge,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CgrBond {
    /// Order in the reactants; `None` when the bond is formed by the reaction.
    pub reactant: Option<BondOrder>,
    /// Order in the products; `None` when the bond is broken by the reaction.
    pub product: Option<BondOrder>,
}

impl CgrBond {
    pub fn is_dynamic(&self) -> bool {
        self.reactant != self.product
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CondensedGraph {
    atoms: BTreeMap<AtomIndex, CgrAtom>,
    /// Bonds keyed by their low-high end indices.
    bonds: BTreeMap<(AtomIndex, AtomIndex), CgrBond>,
    /// Neighbors over bonds present on either side.
    adjacency: BTreeMap<AtomIndex, BTreeSet<AtomIndex>>,
}

/// Builds the condensed graph of a reaction.
///
/// # Errors
///
/// Returns [`ModelError::ElementMismatch`] if an index names atoms of
/// different elements on the two sides.
pub fn condense(reaction: &Reaction) -> Result<CondensedGraph, ModelError> {
    CondensedGraph::from_reaction(reaction)
}

impl CondensedGraph {
    pub fn from_reaction(reaction: &Reaction) -> Result<Self, ModelError> {
        let mut graph = Self::default();

        for mol in reaction.reactants() {
            for (index, atom) in mol.atoms() {
                graph.atoms.insert(
                    index,
                    CgrAtom {
                        atomic_num: atom.atomic_num,
                        isotope: atom.isotope,
                        reactant: Some(state_of(atom)),
                        product: None,
                    },
                );
            }
        }
        for mol in reaction.products() {
            for (index, atom) in mol.atoms() {
                let entry = graph.atoms.entry(index).or_insert(CgrAtom {
                    atomic_num: atom.atomic_num,
                    isotope: atom.isotope,
                    reactant: None,
                    product: None,
                });
                if entry.atomic_num != atom.atomic_num {
                    return Err(ModelError::ElementMismatch {
                        index,
                        reactant: entry.atomic_num,
                        product: atom.atomic_num,
                    });
                }
                entry.product = Some(state_of(atom));
            }
        }

        graph.overlay_bonds(reaction.reactants(), |bond, order| bond.reactant = Some(order));
        graph.overlay_bonds(reaction.products(), |bond, order| bond.product = Some(order));
        Ok(graph)
    }

    fn overlay_bonds(&mut self, side: &[Molecule], set: impl Fn(&mut CgrBond, BondOrder)) {
        for bond in side.iter().flat_map(|mol| mol.bonds()) {
            let entry = self.bonds.entry(bond.key()).or_insert(CgrBond {
                reactant: None,
                product: None,
            });
            set(entry, bond.order);
            self.adjacency.entry(bond.atom1).or_default().insert(bond.atom2);
            self.adjacency.entry(bond.atom2).or_default().insert(bond.atom1);
        }
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&CgrAtom> {
        self.atoms.get(&index)
    }

    pub fn atoms(&self) -> impl Iterator<Item = (AtomIndex, &CgrAtom)> {
        self.atoms.iter().map(|(index, atom)| (*index, atom))
    }

    pub fn bond(&self, atom1: AtomIndex, atom2: AtomIndex) -> Option<&CgrBond> {
        self.bonds.get(&bond_key(atom1, atom2))
    }

    pub fn bonds(&self) -> impl Iterator<Item = ((AtomIndex, AtomIndex), &CgrBond)> {
        self.bonds.iter().map(|(key, bond)| (*key, bond))
    }

    pub fn contains(&self, index: AtomIndex) -> bool {
        self.atoms.contains_key(&index)
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn neighbors(&self, index: AtomIndex) -> impl Iterator<Item = AtomIndex> + '_ {
        self.adjacency.get(&index).into_iter().flatten().copied()
    }

    /// Atoms whose bonding environment or charge changes, plus atoms that
    /// exist on one side only.
    pub fn center_atoms(&self) -> BTreeSet<AtomIndex> {
        let mut center: BTreeSet<AtomIndex> = self
            .atoms
            .iter()
            .filter(|(_, atom)| atom.is_dynamic())
            .map(|(index, _)| *index)
            .collect();
        for (&(atom1, atom2), bond) in &self.bonds {
            if bond.is_dynamic() {
                center.insert(atom1);
                center.insert(atom2);
            }
        }
        center
    }

    /// Breadth-limited closure around `seeds`: every atom reachable within
    /// `depth` bonds, counting bonds present on either side. Seeds that are
    /// not part of the graph are ignored.
    pub fn augmented_atoms(&self, seeds: &BTreeSet<AtomIndex>, depth: usize) -> BTreeSet<AtomIndex> {
        let mut reached: BTreeSet<AtomIndex> = seeds
            .iter()
            .copied()
            .filter(|index| self.contains(*index))
            .collect();
        let mut frontier: Vec<AtomIndex> = reached.iter().copied().collect();
        for _ in 0..depth {
            let mut next = Vec::new();
            for index in frontier {
                for neighbor in self.neighbors(index) {
                    if reached.insert(neighbor) {
                        next.push(neighbor);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        reached
    }

    pub fn augmented_substructure(&self, seeds: &BTreeSet<AtomIndex>, depth: usize) -> CondensedGraph {
        self.substructure(&self.augmented_atoms(seeds, depth))
    }

    /// Induced subgraph on `atoms`; indices absent from the graph are ignored.
    pub fn substructure(&self, atoms: &BTreeSet<AtomIndex>) -> CondensedGraph {
        let mut sub = CondensedGraph::default();
        for index in atoms {
            if let Some(atom) = self.atoms.get(index) {
                sub.atoms.insert(*index, atom.clone());
            }
        }
        for (&(atom1, atom2), bond) in &self.bonds {
            if sub.atoms.contains_key(&atom1) && sub.atoms.contains_key(&atom2) {
                sub.bonds.insert((atom1, atom2), *bond);
                sub.adjacency.entry(atom1).or_default().insert(atom2);
                sub.adjacency.entry(atom2).or_default().insert(atom1);
            }
        }
        sub
    }

    /// Projects the induced subgraph on `atoms` into a query pattern.
    ///
    /// Query atoms keep their element, isotope and per-side charge, and record
    /// their per-side degree in the full graph so that the pattern describes
    /// the surroundings it was cut from.
    pub fn substructure_query(&self, atoms: &BTreeSet<AtomIndex>) -> CgrQuery {
        let sub = self.substructure(atoms);
        let query_atoms = sub
            .atoms
            .iter()
            .map(|(&index, atom)| {
                let (reactant_degree, product_degree) = self.side_degrees(index);
                QueryAtom {
                    index,
                    atomic_num: atom.atomic_num,
                    isotope: atom.isotope,
                    reactant: atom.reactant.map(|state| QueryAtomState {
                        charge: state.charge,
                        is_aromatic: state.is_aromatic,
                        neighbors: reactant_degree,
                    }),
                    product: atom.product.map(|state| QueryAtomState {
                        charge: state.charge,
                        is_aromatic: state.is_aromatic,
                        neighbors: product_degree,
                    }),
                }
            })
            .collect();
        let query_bonds = sub
            .bonds
            .iter()
            .map(|(&(atom1, atom2), bond)| QueryBond {
                atom1,
                atom2,
                reactant: bond.reactant,
                product: bond.product,
            })
            .collect();
        CgrQuery::new(query_atoms, query_bonds)
    }

    fn side_degrees(&self, index: AtomIndex) -> (u8, u8) {
        let mut degrees = (0u8, 0u8);
        for neighbor in self.neighbors(index) {
            if let Some(bond) = self.bond(index, neighbor) {
                if bond.reactant.is_some() {
                    degrees.0 = degrees.0.saturating_add(1);
                }
                if bond.product.is_some() {
                    degrees.1 = degrees.1.saturating_add(1);
                }
            }
        }
        degrees
    }
}

fn state_of(atom: &Atom) -> AtomState {
    AtomState {
        charge: atom.charge,
        hydrogens: atom.hydrogens,
        is_aromatic: atom.is_aromatic,
    }
}

impl AtomIndexed for CondensedGraph {
    fn atom_indices(&self) -> BTreeSet<AtomIndex> {
        self.atoms.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::smiles::parse_reaction;

    fn cgr(rsmi: &str) -> CondensedGraph {
        condense(&parse_reaction(rsmi).unwrap()).unwrap()
    }

    #[test]
    fn condense_overlays_both_sides() {
        let graph = cgr("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:3].[OH2:2]");
        assert_eq!(graph.atom_count(), 3);
        assert_eq!(graph.bond_count(), 2);

        let broken = graph.bond(1, 2).unwrap();
        assert_eq!(broken.reactant, Some(BondOrder::Single));
        assert_eq!(broken.product, None);
        let formed = graph.bond(3, 1).unwrap();
        assert_eq!(formed.reactant, None);
        assert_eq!(formed.product, Some(BondOrder::Single));
    }

    #[test]
    fn center_atoms_cover_changed_bonds() {
        let graph = cgr("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:3].[OH2:2]");
        assert_eq!(graph.center_atoms(), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn unchanged_reaction_has_empty_center() {
        let graph = cgr("[CH3:1][CH2:2][OH:3]>>[CH3:1][CH2:2][OH:3]");
        assert!(graph.center_atoms().is_empty());
    }

    #[test]
    fn charge_change_and_one_sided_atoms_are_dynamic() {
        let graph = cgr("[CH3:1][O-:2].[H+:3]>>[CH3:1][OH:2]");
        let center = graph.center_atoms();
        assert!(center.contains(&2));
        assert!(center.contains(&3));
        assert!(!center.contains(&1));
    }

    #[test]
    fn element_mismatch_is_reported() {
        let rxn = parse_reaction("[CH4:1].[OH2:2]>>[CH4:2].[OH2:1]").unwrap();
        assert_eq!(
            condense(&rxn),
            Err(ModelError::ElementMismatch {
                index: 2,
                reactant: 8,
                product: 6
            })
        );
    }

    #[test]
    fn augmented_atoms_expand_breadth_first() {
        let graph = cgr("[CH3:1][CH2:2][CH2:3][CH2:4][CH3:5]>>[CH3:1][CH2:2][CH2:3][CH2:4][CH3:5]");
        let seeds = BTreeSet::from([3]);
        assert_eq!(graph.augmented_atoms(&seeds, 0), BTreeSet::from([3]));
        assert_eq!(graph.augmented_atoms(&seeds, 1), BTreeSet::from([2, 3, 4]));
        assert_eq!(graph.augmented_atoms(&seeds, 2), BTreeSet::from([1, 2, 3, 4, 5]));
        assert_eq!(graph.augmented_atoms(&BTreeSet::from([99]), 3), BTreeSet::new());
    }

    #[test]
    fn augmented_substructure_keeps_induced_bonds() {
        let graph = cgr("[CH3:1][CH2:2][CH2:3][CH2:4][CH3:5]>>[CH3:1][CH2:2][CH2:3][CH2:4][CH3:5]");
        let sub = graph.augmented_substructure(&BTreeSet::from([1]), 1);
        assert_eq!(sub.atom_indices(), BTreeSet::from([1, 2]));
        assert_eq!(sub.bond_count(), 1);
    }

    #[test]
    fn substructure_query_records_full_graph_degrees() {
        let graph = cgr("[CH3:1][OH:2].[OH2:3]>>[CH3:1][OH:3].[OH2:2]");
        let query = graph.substructure_query(&BTreeSet::from([1, 3, 42]));
        assert_eq!(query.atom_indices(), BTreeSet::from([1, 3]));
        assert_eq!(query.bonds().len(), 1);

        let carbon = query.atom(1).unwrap();
        assert_eq!(carbon.reactant.unwrap().neighbors, 1);
        assert_eq!(carbon.product.unwrap().neighbors, 1);
        let oxygen = query.atom(3).unwrap();
        assert_eq!(oxygen.reactant.unwrap().neighbors, 0);
        assert_eq!(oxygen.product.unwrap().neighbors, 1);
    }
}
