//! Mapping-independent canonical forms of molecules and reactions.
//!
//! Atoms are ranked by their intrinsic invariants and the ranks are refined
//! with the sorted ranks of their bonded neighbors until the partition stops
//! splitting. Atoms left tied after refinement are broken apart by
//! individualizing each member of the first tied class in turn and refining
//! again; the lexicographically smallest serialization over all resulting
//! labellings is the signature. Ranks never depend on atom indices or
//! insertion order, so two molecules share a signature exactly when they are
//! isomorphic.

use crate::core::models::atom::{Atom, AtomIndex};
use crate::core::models::molecule::Molecule;
use crate::core::models::reaction::Reaction;
use std::collections::HashMap;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct AtomInvariant {
    atomic_num: u8,
    isotope: u16,
    charge: i8,
    hydrogens: u8,
    is_aromatic: bool,
    degree: usize,
}

impl AtomInvariant {
    fn of(mol: &Molecule, index: AtomIndex, atom: &Atom) -> Self {
        Self {
            atomic_num: atom.atomic_num,
            isotope: atom.isotope,
            charge: atom.charge,
            hydrogens: atom.hydrogens,
            is_aromatic: atom.is_aromatic,
            degree: mol.degree(index),
        }
    }

    fn label(&self) -> String {
        let mut label = String::from("[");
        if self.isotope != 0 {
            let _ = write!(label, "{}", self.isotope);
        }
        let atom = Atom::new(self.atomic_num);
        if self.is_aromatic {
            label.push_str(&atom.symbol().to_lowercase());
        } else {
            label.push_str(atom.symbol());
        }
        let _ = write!(label, "H{}{:+}]", self.hydrogens, self.charge);
        label
    }
}

/// Dense ranks of `keys`: equal keys share a rank, ranks follow key order.
fn dense_ranks<T: Ord>(keys: &[T]) -> Vec<usize> {
    let mut sorted: Vec<&T> = keys.iter().collect();
    sorted.sort();
    sorted.dedup();
    keys.iter()
        .map(|key| sorted.binary_search(&key).unwrap_or_default())
        .collect()
}

fn class_count(ranks: &[usize]) -> usize {
    ranks.iter().max().map_or(0, |&max| max + 1)
}

/// A molecule relabelled onto dense slots `0..n`.
struct SlotGraph {
    invariants: Vec<AtomInvariant>,
    /// `(bond order, neighbor slot)` per slot.
    adjacency: Vec<Vec<(u8, usize)>>,
    bonds: Vec<(usize, usize, u8)>,
}

impl SlotGraph {
    fn new(mol: &Molecule) -> Self {
        let slot: HashMap<AtomIndex, usize> = mol
            .indices()
            .enumerate()
            .map(|(i, index)| (index, i))
            .collect();
        let invariants = mol
            .atoms()
            .map(|(index, atom)| AtomInvariant::of(mol, index, atom))
            .collect();
        let adjacency = mol
            .indices()
            .map(|index| {
                mol.neighbors(index)
                    .map(|(neighbor, order)| (order as u8, slot[&neighbor]))
                    .collect()
            })
            .collect();
        let bonds = mol
            .bonds()
            .iter()
            .map(|bond| (slot[&bond.atom1], slot[&bond.atom2], bond.order as u8))
            .collect();
        Self {
            invariants,
            adjacency,
            bonds,
        }
    }

    /// Splits classes by neighbor ranks until no class splits any further.
    /// Every step refines the previous partition, so an unchanged class
    /// count means a stable one.
    fn refine(&self, mut ranks: Vec<usize>) -> Vec<usize> {
        loop {
            let keys: Vec<(usize, Vec<(u8, usize)>)> = self
                .adjacency
                .iter()
                .enumerate()
                .map(|(i, neighbors)| {
                    let mut environment: Vec<(u8, usize)> = neighbors
                        .iter()
                        .map(|&(order, neighbor)| (order, ranks[neighbor]))
                        .collect();
                    environment.sort_unstable();
                    (ranks[i], environment)
                })
                .collect();
            let refined = dense_ranks(&keys);
            let stable = class_count(&refined) == class_count(&ranks);
            ranks = refined;
            if stable {
                return ranks;
            }
        }
    }

    /// Smallest serialization reachable from `ranks` by individualization.
    fn search(&self, ranks: Vec<usize>) -> String {
        let ranks = self.refine(ranks);

        let mut sizes = vec![0usize; class_count(&ranks)];
        for &rank in &ranks {
            sizes[rank] += 1;
        }
        let Some(target) = sizes.iter().position(|&size| size > 1) else {
            return self.serialize(&ranks);
        };

        (0..ranks.len())
            .filter(|&i| ranks[i] == target)
            .map(|chosen| {
                let keys: Vec<(usize, bool)> = ranks
                    .iter()
                    .enumerate()
                    .map(|(i, &rank)| (rank, i != chosen))
                    .collect();
                self.search(dense_ranks(&keys))
            })
            .min()
            .unwrap_or_default()
    }

    fn serialize(&self, ranks: &[usize]) -> String {
        let mut atoms: Vec<(usize, &AtomInvariant)> =
            ranks.iter().copied().zip(&self.invariants).collect();
        atoms.sort();
        let mut bonds: Vec<(usize, usize, u8)> = self
            .bonds
            .iter()
            .map(|&(a, b, order)| {
                let (r1, r2) = (ranks[a], ranks[b]);
                (r1.min(r2), r1.max(r2), order)
            })
            .collect();
        bonds.sort_unstable();

        let mut signature = String::new();
        for (rank, invariant) in atoms {
            let _ = write!(signature, "{}{}", rank, invariant.label());
        }
        signature.push('|');
        for (i, (r1, r2, order)) in bonds.into_iter().enumerate() {
            if i > 0 {
                signature.push(',');
            }
            let _ = write!(signature, "{r1}-{r2}:{order}");
        }
        signature
    }
}

/// Canonical signature of a single molecule.
pub fn molecule_signature(mol: &Molecule) -> String {
    let graph = SlotGraph::new(mol);
    let initial = dense_ranks(&graph.invariants);
    graph.search(initial)
}

fn side_signature(side: &[Molecule]) -> String {
    let mut parts: Vec<String> = side.iter().map(molecule_signature).collect();
    parts.sort();
    parts.join(".")
}

/// Canonical signature of a reaction: sorted reactant signatures, `>>`,
/// sorted product signatures. Molecule order and atom mapping are ignored.
pub fn reaction_signature(reaction: &Reaction) -> String {
    format!(
        "{}>>{}",
        side_signature(reaction.reactants()),
        side_signature(reaction.products())
    )
}
