use super::atom::{AtomIndex, AtomIndexed};
use super::error::ModelError;
use super::molecule::Molecule;
use crate::core::canonical;
use crate::core::io::smiles;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// A mapped chemical reaction: ordered reactant and product molecules.
///
/// Atom indices are unique within each side. An index present on both sides
/// names the same physical atom before and after the transformation.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    reactants: Vec<Molecule>,
    products: Vec<Molecule>,
}

impl Reaction {
    /// Creates a reaction after checking that no atom index repeats within
    /// the reactants or within the products.
    pub fn new(reactants: Vec<Molecule>, products: Vec<Molecule>) -> Result<Self, ModelError> {
        ensure_unique_indices(&reactants, "the reactants")?;
        ensure_unique_indices(&products, "the products")?;
        Ok(Self {
            reactants,
            products,
        })
    }

    pub fn reactants(&self) -> &[Molecule] {
        &self.reactants
    }

    pub fn products(&self) -> &[Molecule] {
        &self.products
    }

    pub fn reactant_atoms(&self) -> BTreeSet<AtomIndex> {
        self.reactants.atom_indices()
    }

    pub fn product_atoms(&self) -> BTreeSet<AtomIndex> {
        self.products.atom_indices()
    }

    /// Mapping-independent string form of the reaction; two reactions share
    /// it exactly when they describe the same molecules and bonds.
    pub fn canonical_form(&self) -> String {
        canonical::reaction_signature(self)
    }

    /// Returns a new reaction whose product atom indices are rewritten
    /// through `mapping`. Reactants are shared unchanged.
    ///
    /// # Errors
    ///
    /// Propagates [`ModelError::DuplicateAtomIndex`] when the rewritten
    /// product side would reuse an index.
    pub fn with_remapped_products(
        &self,
        mapping: &BTreeMap<AtomIndex, AtomIndex>,
    ) -> Result<Reaction, ModelError> {
        let products = self
            .products
            .iter()
            .map(|mol| mol.remap(mapping))
            .collect::<Result<Vec<_>, _>>()?;
        Reaction::new(self.reactants.clone(), products)
    }
}

fn ensure_unique_indices(side: &[Molecule], scope: &'static str) -> Result<(), ModelError> {
    let mut seen = HashSet::new();
    for index in side.iter().flat_map(Molecule::indices) {
        if !seen.insert(index) {
            return Err(ModelError::DuplicateAtomIndex { index, scope });
        }
    }
    Ok(())
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&smiles::write_reaction(self))
    }
}
